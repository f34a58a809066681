//! Draw commands for the board

use glam::IVec2;

use super::Frame;
use crate::sim::{FruitKind, Player, PlayerId};

/// Head color while a speed boost runs
pub const HEAD_BOOSTED: &str = "#fff";
/// Head color while a laser is armed
pub const HEAD_ARMED: &str = "#ff0000";
/// Head color otherwise
pub const HEAD_PLAIN: &str = "#ffff00";
pub const OUTLINE: &str = "#fff";
pub const REGULAR_FRUIT: &str = "red";
pub const SPEED_GLYPH: &str = "⚡";
pub const LASER_GLYPH: &str = "🎯";

/// One primitive for a 2D canvas
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Wipe the whole canvas
    Clear { width: f64, height: f64 },
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        fill: String,
        stroke: Option<&'static str>,
    },
    /// Text drawn with its baseline at `y`
    Glyph {
        text: &'static str,
        x: f64,
        y: f64,
        size: f64,
    },
}

/// Pixel rectangle for a cell, leaving a 2px gutter
pub fn cell_rect(cell: IVec2, grid_size: u32) -> (f64, f64, f64, f64) {
    let g = grid_size as f64;
    (cell.x as f64 * g, cell.y as f64 * g, g - 2.0, g - 2.0)
}

/// Head color reflecting the player's active power-up
pub fn head_color(player: &Player) -> &'static str {
    if player.speed_boost_active() {
        HEAD_BOOSTED
    } else if player.has_laser {
        HEAD_ARMED
    } else {
        HEAD_PLAIN
    }
}

pub fn laser_color(id: PlayerId) -> &'static str {
    match id {
        PlayerId::One => "#90EE90",
        PlayerId::Two => "#87CEEB",
    }
}

fn rect(cell: IVec2, grid_size: u32, fill: &str, stroke: Option<&'static str>) -> DrawCommand {
    let (x, y, w, h) = cell_rect(cell, grid_size);
    DrawCommand::Rect {
        x,
        y,
        w,
        h,
        fill: fill.to_string(),
        stroke,
    }
}

/// Commands for a whole frame: fruit, both snakes, then lasers on top
pub fn draw_list(frame: &Frame) -> Vec<DrawCommand> {
    let g = frame.grid_size;
    let side = frame.tile_count as f64 * g as f64;
    let mut commands = vec![DrawCommand::Clear {
        width: side,
        height: side,
    }];

    for fruit in &frame.fruits {
        let text = match fruit.kind {
            FruitKind::Regular => {
                commands.push(rect(fruit.pos, g, REGULAR_FRUIT, None));
                continue;
            }
            FruitKind::Speed => SPEED_GLYPH,
            FruitKind::Laser => LASER_GLYPH,
        };
        commands.push(DrawCommand::Glyph {
            text,
            x: fruit.pos.x as f64 * g as f64,
            y: (fruit.pos.y + 1) as f64 * g as f64,
            size: g as f64,
        });
    }

    for player in &frame.players {
        for &segment in &player.tail {
            commands.push(rect(segment, g, &player.color, Some(OUTLINE)));
        }
        commands.push(rect(player.head(), g, head_color(player), Some(OUTLINE)));
    }

    for player in &frame.players {
        if let Some(laser) = &player.laser {
            commands.push(rect(laser.cell(), g, laser_color(player.id), Some(OUTLINE)));
        }
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Fruit, GameState, Laser};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn frame_with(mut edit: impl FnMut(&mut GameState)) -> Frame {
        let mut state = GameState::new(1, Tuning::default());
        state.reset();
        state.fruits.clear();
        edit(&mut state);
        Frame::capture(&state)
    }

    fn last_fill(commands: &[DrawCommand]) -> Option<String> {
        commands.iter().rev().find_map(|c| match c {
            DrawCommand::Rect { fill, .. } => Some(fill.clone()),
            _ => None,
        })
    }

    #[test]
    fn test_cell_rect_gutter() {
        assert_eq!(cell_rect(IVec2::new(3, 4), 20), (60.0, 80.0, 18.0, 18.0));
    }

    #[test]
    fn test_head_colors() {
        let tuning = Tuning::default();
        let mut player = Player::new(PlayerId::One, &tuning);
        assert_eq!(head_color(&player), HEAD_PLAIN);
        player.has_laser = true;
        assert_eq!(head_color(&player), HEAD_ARMED);
        player.speed_boost_end = 500.0;
        assert_eq!(head_color(&player), HEAD_BOOSTED);
    }

    #[test]
    fn test_draw_order_and_counts() {
        let frame = frame_with(|state| {
            state.fruits = vec![
                Fruit {
                    pos: IVec2::new(1, 1),
                    kind: FruitKind::Regular,
                },
                Fruit {
                    pos: IVec2::new(2, 2),
                    kind: FruitKind::Speed,
                },
            ];
        });
        let commands = draw_list(&frame);
        assert!(matches!(commands[0], DrawCommand::Clear { width, .. } if width == 600.0));
        assert!(matches!(&commands[1], DrawCommand::Rect { fill, .. } if fill == REGULAR_FRUIT));
        assert!(matches!(
            commands[2],
            DrawCommand::Glyph { text: SPEED_GLYPH, x, y, .. } if x == 40.0 && y == 60.0
        ));
        // Each snake: one body cell plus the head overlay.
        assert_eq!(commands.len(), 3 + 2 + 2);
        assert_eq!(last_fill(&commands).as_deref(), Some(HEAD_PLAIN));
    }

    #[test]
    fn test_laser_drawn_last_in_owner_color() {
        let frame = frame_with(|state| {
            state.player_mut(PlayerId::Two).laser = Some(Laser {
                pos: Vec2::new(10.6, 3.2),
                vel: Vec2::new(1.0, 0.0),
            });
        });
        let commands = draw_list(&frame);
        match commands.last() {
            Some(DrawCommand::Rect { x, y, fill, .. }) => {
                assert_eq!((*x, *y), (200.0, 60.0));
                assert_eq!(fill, laser_color(PlayerId::Two));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
