//! Board geometry: bounds checks and toroidal wraparound

use glam::{IVec2, Vec2};

/// A square board of `tile_count` x `tile_count` cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub tile_count: i32,
}

impl Grid {
    pub fn new(tile_count: i32) -> Self {
        Self { tile_count }
    }

    /// Board derived from a square canvas and a cell size in pixels
    pub fn from_canvas(canvas_px: u32, grid_size: u32) -> Self {
        Self::new((canvas_px / grid_size.max(1)) as i32)
    }

    /// True if a continuous position lies outside the board
    pub fn is_out_of_bounds(&self, pos: Vec2) -> bool {
        let n = self.tile_count as f32;
        pos.x < 0.0 || pos.x >= n || pos.y < 0.0 || pos.y >= n
    }

    /// True if a cell lies outside the board
    pub fn is_cell_out_of_bounds(&self, cell: IVec2) -> bool {
        cell.x < 0 || cell.x >= self.tile_count || cell.y < 0 || cell.y >= self.tile_count
    }

    /// Wrap a cell that stepped at most one cell past an edge onto the opposite edge.
    /// Axes wrap independently.
    pub fn wrap(&self, cell: IVec2) -> IVec2 {
        IVec2::new(self.wrap_axis(cell.x), self.wrap_axis(cell.y))
    }

    fn wrap_axis(&self, v: i32) -> i32 {
        if v < 0 {
            self.tile_count - 1
        } else if v >= self.tile_count {
            0
        } else {
            v
        }
    }

    /// Cell containing a continuous position
    pub fn cell_of(pos: Vec2) -> IVec2 {
        pos.floor().as_ivec2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_out_of_bounds_edges() {
        let grid = Grid::new(30);
        assert!(!grid.is_out_of_bounds(Vec2::new(0.0, 0.0)));
        assert!(!grid.is_out_of_bounds(Vec2::new(29.9, 29.9)));
        assert!(grid.is_out_of_bounds(Vec2::new(30.0, 5.0)));
        assert!(grid.is_out_of_bounds(Vec2::new(5.0, -0.1)));
        assert!(grid.is_cell_out_of_bounds(IVec2::new(-1, 0)));
        assert!(!grid.is_cell_out_of_bounds(IVec2::new(29, 29)));
    }

    #[test]
    fn test_wrap_each_edge() {
        let grid = Grid::new(30);
        assert_eq!(grid.wrap(IVec2::new(-1, 7)), IVec2::new(29, 7));
        assert_eq!(grid.wrap(IVec2::new(30, 7)), IVec2::new(0, 7));
        assert_eq!(grid.wrap(IVec2::new(7, -1)), IVec2::new(7, 29));
        assert_eq!(grid.wrap(IVec2::new(7, 30)), IVec2::new(7, 0));
    }

    #[test]
    fn test_from_canvas() {
        assert_eq!(Grid::from_canvas(600, 20).tile_count, 30);
    }

    #[test]
    fn test_cell_of_floors_negative() {
        assert_eq!(Grid::cell_of(Vec2::new(-0.2, 3.8)), IVec2::new(-1, 3));
    }

    proptest! {
        #[test]
        fn wrapped_step_stays_on_board(
            x in 0i32..30,
            y in 0i32..30,
            dir in 0usize..4,
        ) {
            let grid = Grid::new(30);
            let step = [IVec2::X, -IVec2::X, IVec2::Y, -IVec2::Y][dir];
            let cell = grid.wrap(IVec2::new(x, y) + step);
            prop_assert!(!grid.is_cell_out_of_bounds(cell));
        }
    }
}
