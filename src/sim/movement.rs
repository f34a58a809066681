//! Turn arbitration and discrete one-cell steps

use glam::IVec2;

use super::grid::Grid;
use super::state::Player;

/// Request a new heading. Returns false (and changes nothing) if `dir` would
/// reverse the snake onto its own neck.
pub fn handle_turn_input(player: &mut Player, dir: IVec2) -> bool {
    let heading = player.heading();
    let reverses = dir != IVec2::ZERO && dir == -heading;
    if reverses {
        return false;
    }
    player.vel = dir;
    true
}

/// Step one cell along the current velocity, wrapping at the board edges, and
/// drag the trail behind the new head.
pub fn advance(player: &mut Player, grid: &Grid) {
    if player.is_stationary() {
        return;
    }

    player.last_vel = player.vel;
    player.pos = grid.wrap(player.pos + player.vel);

    player.tail.push_front(player.pos);
    player.tail.truncate(player.max_tail);
}
