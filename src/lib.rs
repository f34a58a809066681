//! Snake Duel - A two-player laser snake game on a toroidal grid
//!
//! Core modules:
//! - `sim`: Simulation (movement, fruit, power-ups, collisions, game loop)
//! - `renderer`: Snapshot to draw-command translation
//! - `persistence`: Key/value storage backends
//! - `highscores`: Best score per player
//! - `settings`: Persisted player preferences
//! - `tuning`: Data-driven game balance
//! - `session`: Host-facing glue between the simulation and its collaborators

pub mod highscores;
pub mod persistence;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::BestScores;
pub use session::Session;
pub use settings::{FruitPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Tail cells gained per regular fruit
    pub const GROWTH_PER_FRUIT: usize = 3;
    /// Fruits kept on the board
    pub const FRUITS_COUNT: usize = 3;
    /// Trail length a player starts with
    pub const INITIAL_TAIL_LENGTH: usize = 4;

    /// Speed boost lifetime (ms)
    pub const SPEED_BOOST_DURATION: f64 = 3000.0;
    /// Step interval without a boost (ms per cell)
    pub const NORMAL_SPEED: f64 = 150.0;
    /// Step interval while boosted (ms per cell)
    pub const BOOST_SPEED: f64 = 80.0;
    /// Laser travel per frame (cells)
    pub const LASER_SPEED: f32 = 0.2;

    /// Cell size in pixels
    pub const GRID_SIZE: u32 = 20;
    /// Square canvas edge in pixels
    pub const CANVAS_SIZE: u32 = 600;
    /// Distance of the default spawns from their corners (cells)
    pub const SPAWN_INSET: i32 = 5;
    /// Minimum time between renders (~60 Hz)
    pub const RENDER_INTERVAL_MS: f64 = 16.0;

    /// Random placements tried per fruit spawn call
    pub const MAX_SPAWN_ATTEMPTS: u32 = 100;
    /// Leading trail segments a laser can hit
    pub const LASER_HIT_SEGMENTS: usize = 3;

    /// Own trail segments behind the head exempt from self-collision (strict)
    pub const SELF_COLLISION_GRACE: usize = 0;
    /// Exemption used with forgiving turns: absorbs the one-tick turn lag
    pub const FORGIVING_SELF_COLLISION_GRACE: usize = 3;
}
