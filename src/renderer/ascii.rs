//! Plain-text board dump

use super::Frame;
use crate::sim::{FruitKind, PlayerId};

fn fruit_char(kind: FruitKind) -> char {
    match kind {
        FruitKind::Regular => '*',
        FruitKind::Speed => '>',
        FruitKind::Laser => '!',
    }
}

/// One line per row. `A`/`B` mark heads, `1`/`2` bodies, `-` lasers.
pub fn board_to_string(frame: &Frame) -> String {
    let n = frame.tile_count.max(0) as usize;
    let mut cells = vec![vec!['.'; n]; n];
    let mut put = |x: i32, y: i32, c: char| {
        if x >= 0 && y >= 0 && (x as usize) < n && (y as usize) < n {
            cells[y as usize][x as usize] = c;
        }
    };

    for fruit in &frame.fruits {
        put(fruit.pos.x, fruit.pos.y, fruit_char(fruit.kind));
    }
    for player in &frame.players {
        let (body, head) = match player.id {
            PlayerId::One => ('1', 'A'),
            PlayerId::Two => ('2', 'B'),
        };
        for segment in player.tail.iter().skip(1) {
            put(segment.x, segment.y, body);
        }
        let h = player.head();
        put(h.x, h.y, head);
    }
    for player in &frame.players {
        if let Some(laser) = &player.laser {
            let c = laser.cell();
            put(c.x, c.y, '-');
        }
    }

    cells
        .into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Fruit, GameState};
    use crate::tuning::Tuning;
    use glam::IVec2;

    #[test]
    fn test_small_board() {
        let tuning = Tuning {
            tile_count: 4,
            player_one_spawn: Some(IVec2::new(0, 0)),
            player_two_spawn: Some(IVec2::new(3, 3)),
            ..Tuning::default()
        };
        let mut state = GameState::new(1, tuning);
        state.reset();
        state.fruits = vec![Fruit {
            pos: IVec2::new(2, 1),
            kind: FruitKind::Laser,
        }];
        state.player_mut(PlayerId::One).tail = vec![IVec2::new(0, 0), IVec2::new(0, 1)].into();

        let text = board_to_string(&Frame::capture(&state));
        assert_eq!(text, "A...\n1.!.\n....\n...B");
    }
}
