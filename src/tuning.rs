//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives in [`Tuning`]. Defaults come
//! from [`crate::consts`]; a JSON document may override any subset of fields.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Probability split used when a fruit variant is drawn.
///
/// A uniform roll below `speed` yields a speed fruit, below `speed + laser` a laser
/// fruit, anything else a regular fruit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FruitWeights {
    pub speed: f32,
    pub laser: f32,
}

impl FruitWeights {
    /// 10% speed, 10% laser, 80% regular
    pub const CLASSIC: Self = Self {
        speed: 0.1,
        laser: 0.1,
    };
    /// 20% speed, 20% laser, 60% regular
    pub const FRANTIC: Self = Self {
        speed: 0.2,
        laser: 0.2,
    };

    /// Share of regular fruit implied by the two power-up weights
    pub fn regular(&self) -> f32 {
        (1.0 - self.speed - self.laser).max(0.0)
    }
}

impl Default for FruitWeights {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// Which player resolves first when both are due to move in the same tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResolutionOrder {
    #[default]
    PlayerOneFirst,
    PlayerTwoFirst,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Board edge in cells
    pub tile_count: i32,
    /// Cell size in pixels (render only)
    pub grid_size: u32,
    pub growth_per_fruit: usize,
    pub fruits_count: usize,
    pub initial_tail_length: usize,
    /// ms
    pub speed_boost_duration: f64,
    /// ms per step
    pub normal_speed: f64,
    /// ms per step
    pub boost_speed: f64,
    /// Cells per frame
    pub laser_speed: f32,
    pub fruit_weights: FruitWeights,
    pub max_spawn_attempts: u32,
    pub laser_hit_segments: usize,
    pub self_collision_grace: usize,
    pub resolution_order: ResolutionOrder,
    pub render_interval_ms: f64,
    /// Fixed spawn cell; `None` places the snake relative to the board size
    pub player_one_spawn: Option<IVec2>,
    pub player_two_spawn: Option<IVec2>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tile_count: (CANVAS_SIZE / GRID_SIZE) as i32,
            grid_size: GRID_SIZE,
            growth_per_fruit: GROWTH_PER_FRUIT,
            fruits_count: FRUITS_COUNT,
            initial_tail_length: INITIAL_TAIL_LENGTH,
            speed_boost_duration: SPEED_BOOST_DURATION,
            normal_speed: NORMAL_SPEED,
            boost_speed: BOOST_SPEED,
            laser_speed: LASER_SPEED,
            fruit_weights: FruitWeights::CLASSIC,
            max_spawn_attempts: MAX_SPAWN_ATTEMPTS,
            laser_hit_segments: LASER_HIT_SEGMENTS,
            self_collision_grace: SELF_COLLISION_GRACE,
            resolution_order: ResolutionOrder::PlayerOneFirst,
            render_interval_ms: RENDER_INTERVAL_MS,
            player_one_spawn: None,
            player_two_spawn: None,
        }
    }
}

impl Tuning {
    /// Tuning for a square canvas of `canvas_px` pixels split into `grid_size` cells
    pub fn for_canvas(canvas_px: u32, grid_size: u32) -> Self {
        Self {
            tile_count: (canvas_px / grid_size.max(1)) as i32,
            grid_size,
            ..Self::default()
        }
    }

    /// Spawn cells for player one and two, always on the board.
    ///
    /// Unset spawns sit `SPAWN_INSET` cells in from opposite corners. Explicit
    /// spawns outside the board are wrapped onto it.
    pub fn spawn_points(&self) -> [IVec2; 2] {
        let n = self.tile_count.max(1);
        let one = self.player_one_spawn.unwrap_or(IVec2::splat(SPAWN_INSET));
        let two = self.player_two_spawn.unwrap_or(IVec2::splat(n - SPAWN_INSET));
        [one, two].map(|cell| IVec2::new(cell.x.rem_euclid(n), cell.y.rem_euclid(n)))
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from the JSON file named by `SNAKE_DUEL_TUNING`, falling back to
    /// defaults when unset or unreadable.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var("SNAKE_DUEL_TUNING") else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring malformed tuning file {}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read tuning file {}: {}", path, e);
                Self::default()
            }
        }
    }
}
