//! Collision detection between snakes and lasers
//!
//! Everything is exact cell equality on the integer grid; lasers are floored to
//! the cell they are passing through.

use super::state::{Laser, Player};

/// What the moving snake's head ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Its own body
    OwnTrail,
    /// The opponent's body
    OpponentTrail,
    /// The opponent's head cell
    HeadOn,
}

/// Classify what the player's head hit, if anything.
///
/// `self_grace` is the number of own segments right behind the head that are
/// ignored. A stationary player never collides.
pub fn classify_collision(
    player: &Player,
    opponent: &Player,
    self_grace: usize,
) -> Option<CollisionKind> {
    if player.is_stationary() {
        return None;
    }
    let head = player.head();

    if player.tail.iter().skip(1 + self_grace).any(|&seg| seg == head) {
        return Some(CollisionKind::OwnTrail);
    }

    if opponent.head() == head {
        return Some(CollisionKind::HeadOn);
    }
    if opponent.occupies(head) {
        return Some(CollisionKind::OpponentTrail);
    }
    None
}

/// True if the player's head hit its own body or any part of the opponent
pub fn check_collision(player: &Player, opponent: &Player, self_grace: usize) -> bool {
    classify_collision(player, opponent, self_grace).is_some()
}

/// True if the laser sits on one of the first `hit_segments` cells of the player
pub fn check_laser_collision(laser: &Laser, player: &Player, hit_segments: usize) -> bool {
    let cell = laser.cell();
    player.tail.iter().take(hit_segments).any(|&seg| seg == cell)
}
