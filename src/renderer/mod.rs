//! Rendering module
//!
//! The simulation hands out read-only [`Frame`] snapshots; backends turn them into
//! pixels (canvas 2D in the browser) or text (headless runs).

pub mod ascii;
pub mod shapes;

pub use shapes::{DrawCommand, draw_list};

use serde::Serialize;

use crate::sim::{Fruit, GameState, Player};

/// Everything a backend needs to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub players: [Player; 2],
    pub fruits: Vec<Fruit>,
    pub tile_count: i32,
    pub grid_size: u32,
}

impl Frame {
    pub fn capture(state: &GameState) -> Self {
        Self {
            players: state.players.clone(),
            fruits: state.fruits.clone(),
            tile_count: state.grid.tile_count,
            grid_size: state.tuning.grid_size,
        }
    }
}

/// Render collaborator. Nothing it does feeds back into the simulation.
pub trait Renderer {
    fn render(&mut self, frame: &Frame);
}

/// Keeps the most recent frame as text; used by headless runs and tests
#[derive(Debug, Default)]
pub struct TextRenderer {
    pub frames_rendered: u64,
    pub last: String,
}

impl Renderer for TextRenderer {
    fn render(&mut self, frame: &Frame) {
        self.frames_rendered += 1;
        self.last = ascii::board_to_string(frame);
    }
}
