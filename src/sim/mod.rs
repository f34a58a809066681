//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time comes in as a parameter, never read from a clock
//! - Seeded RNG only
//! - Stable resolution order (player one first unless tuned otherwise)
//! - No rendering or platform dependencies

pub mod collision;
pub mod fruit;
pub mod grid;
pub mod movement;
pub mod powerup;
pub mod state;
pub mod tick;

pub use collision::{CollisionKind, check_collision, check_laser_collision, classify_collision};
pub use fruit::{check_fruit_collisions, collect_fruit, handle_fruit_collection, spawn_fruit};
pub use grid::Grid;
pub use movement::{advance, handle_turn_input};
pub use powerup::{advance_lasers, shoot_laser, update_speed_boosts};
pub use state::{
    Action, Controls, Fruit, FruitKind, GameEvent, GamePhase, GameState, Laser, LoopClock, Outcome,
    Player, PlayerId,
};
pub use tick::{TickOutcome, handle_key, step_player, tick};
