//! Timed speed boosts and the one-shot laser

use glam::{IVec2, Vec2};

use super::collision::check_laser_collision;
use super::state::{GameEvent, GameState, Laser, Player, PlayerId};

/// Drop expired speed boosts back to the normal cadence. Safe to call every frame.
pub fn update_speed_boosts(state: &mut GameState, now: f64, events: &mut Vec<GameEvent>) {
    let normal_speed = state.tuning.normal_speed;
    for player in state.players.iter_mut() {
        if player.speed_boost_end > 0.0 && now > player.speed_boost_end {
            player.speed_boost_end = 0.0;
            player.current_speed = normal_speed;
            events.push(GameEvent::SpeedBoostExpired { player: player.id });
        }
    }
}

/// Direction a freshly fired laser travels in.
///
/// Horizontal movement wins; otherwise vertical; a snake that never moved fires up.
pub fn laser_direction(player: &Player) -> IVec2 {
    let horizontal = if player.vel.x != 0 {
        player.vel.x
    } else {
        player.last_vel.x
    };
    if horizontal != 0 {
        return IVec2::new(horizontal.signum(), 0);
    }

    let vertical = if player.vel.y != 0 {
        player.vel.y
    } else {
        player.last_vel.y
    };
    if vertical != 0 {
        IVec2::new(0, vertical.signum())
    } else {
        IVec2::new(0, -1)
    }
}

/// Fire the armed laser from the head. Returns false if nothing was fired.
pub fn shoot_laser(player: &mut Player) -> bool {
    if !player.has_laser || player.laser.is_some() {
        return false;
    }
    player.has_laser = false;
    let dir = laser_direction(player);
    debug_assert!(is_axis_aligned(dir.as_vec2()));
    player.laser = Some(Laser {
        pos: player.pos.as_vec2(),
        vel: dir.as_vec2(),
    });
    true
}

/// Move every live laser one frame. Lasers leaving the board are removed.
///
/// Returns the shooters whose laser is on the opponent's hit zone this frame.
pub fn advance_lasers(state: &mut GameState, events: &mut Vec<GameEvent>) -> Vec<PlayerId> {
    let speed = state.tuning.laser_speed;
    let hit_segments = state.tuning.laser_hit_segments;
    let grid = state.grid;
    let mut hits = Vec::new();

    for id in PlayerId::BOTH {
        let (shooter, opponent) = state.player_and_opponent_mut(id);
        let Some(laser) = shooter.laser.as_mut() else {
            continue;
        };

        laser.pos += laser.vel * speed;

        if grid.is_out_of_bounds(laser.pos) {
            shooter.laser = None;
            events.push(GameEvent::LaserExpired { player: id });
        } else if check_laser_collision(laser, opponent, hit_segments) {
            hits.push(id);
        }
    }
    hits
}

/// True if the laser's travel direction has exactly one nonzero axis
pub fn is_axis_aligned(vel: Vec2) -> bool {
    (vel.x == 0.0) != (vel.y == 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn playing_state() -> GameState {
        let mut state = GameState::new(11, Tuning::default());
        state.reset();
        state.fruits.clear();
        state
    }

    #[test]
    fn test_boost_expires_after_deadline() {
        let mut state = playing_state();
        let boost = state.tuning.boost_speed;
        let p1 = state.player_mut(PlayerId::One);
        p1.speed_boost_end = 3000.0;
        p1.current_speed = boost;

        let mut events = Vec::new();
        update_speed_boosts(&mut state, 3000.0, &mut events);
        assert!(state.player(PlayerId::One).speed_boost_active());
        assert!(events.is_empty());

        update_speed_boosts(&mut state, 3000.5, &mut events);
        let p1 = state.player(PlayerId::One);
        assert!(!p1.speed_boost_active());
        assert_eq!(p1.current_speed, state.tuning.normal_speed);
        assert_eq!(events, vec![GameEvent::SpeedBoostExpired { player: PlayerId::One }]);

        update_speed_boosts(&mut state, 9000.0, &mut events);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_shoot_without_laser_is_noop() {
        let mut state = playing_state();
        let p1 = state.player_mut(PlayerId::One);
        assert!(!shoot_laser(p1));
        assert!(p1.laser.is_none());
    }

    #[test]
    fn test_shoot_consumes_pickup_once() {
        let mut state = playing_state();
        let p1 = state.player_mut(PlayerId::One);
        p1.has_laser = true;
        p1.vel = IVec2::new(0, 1);
        assert!(shoot_laser(p1));
        assert!(!p1.has_laser);
        let laser = p1.laser.expect("laser in flight");
        assert_eq!(laser.pos, Vec2::new(5.0, 5.0));
        assert_eq!(laser.vel, Vec2::new(0.0, 1.0));

        p1.has_laser = true;
        assert!(!shoot_laser(p1));
        assert!(p1.has_laser);
    }

    #[test]
    fn test_aim_prefers_horizontal() {
        let tuning = Tuning::default();
        let mut player = Player::new(PlayerId::One, &tuning);
        assert_eq!(laser_direction(&player), IVec2::new(0, -1));

        player.last_vel = IVec2::new(-1, 0);
        player.vel = IVec2::new(0, 1);
        assert_eq!(laser_direction(&player), IVec2::new(-1, 0));

        player.last_vel = IVec2::new(0, 1);
        assert_eq!(laser_direction(&player), IVec2::new(0, 1));
        assert!(is_axis_aligned(laser_direction(&player).as_vec2()));
    }

    #[test]
    fn test_laser_leaving_board_is_cleared() {
        let mut state = playing_state();
        let p1 = state.player_mut(PlayerId::One);
        p1.laser = Some(Laser {
            pos: Vec2::new(0.1, 5.0),
            vel: Vec2::new(-1.0, 0.0),
        });
        let mut events = Vec::new();
        let hits = advance_lasers(&mut state, &mut events);
        assert!(hits.is_empty());
        assert!(state.player(PlayerId::One).laser.is_none());
        assert_eq!(events, vec![GameEvent::LaserExpired { player: PlayerId::One }]);
    }

    #[test]
    fn test_laser_hits_opponent_head_zone() {
        let mut state = playing_state();
        let p2 = state.player_mut(PlayerId::Two);
        p2.tail = vec![
            IVec2::new(10, 5),
            IVec2::new(11, 5),
            IVec2::new(12, 5),
            IVec2::new(13, 5),
        ]
        .into();
        p2.pos = IVec2::new(10, 5);

        // Fourth segment is outside the hit zone.
        state.player_mut(PlayerId::One).laser = Some(Laser {
            pos: Vec2::new(13.9, 5.5),
            vel: Vec2::new(-1.0, 0.0),
        });
        let mut events = Vec::new();
        assert!(advance_lasers(&mut state, &mut events).is_empty());

        state.player_mut(PlayerId::One).laser = Some(Laser {
            pos: Vec2::new(12.1, 5.5),
            vel: Vec2::new(1.0, 0.0),
        });
        assert_eq!(advance_lasers(&mut state, &mut events), vec![PlayerId::One]);
    }
}
