//! Fruit spawning, pickup detection and pickup effects

use glam::IVec2;
use rand::Rng;

use super::state::{Fruit, FruitKind, GameEvent, GameState, Player, PlayerId};
use crate::tuning::{FruitWeights, Tuning};

/// Variant for a uniform roll in [0, 1)
pub fn fruit_kind_for_roll(roll: f32, weights: &FruitWeights) -> FruitKind {
    if roll < weights.speed {
        FruitKind::Speed
    } else if roll < weights.speed + weights.laser {
        FruitKind::Laser
    } else {
        FruitKind::Regular
    }
}

/// True if no trail and no fruit covers `cell`
pub fn is_cell_free(state: &GameState, cell: IVec2) -> bool {
    !state.players.iter().any(|p| p.occupies(cell)) && !state.fruits.iter().any(|f| f.pos == cell)
}

/// Top the board up to the target fruit count.
///
/// Gives up after `max_spawn_attempts` random placements so a crowded board cannot
/// hang the frame; the next call retries. Returns how many fruits were added.
pub fn spawn_fruit(state: &mut GameState) -> usize {
    let target = state.tuning.fruits_count;
    let tile_count = state.tuning.tile_count;
    if tile_count <= 0 {
        return 0;
    }

    let mut attempts = 0;
    let mut added = 0;
    while state.fruits.len() < target && attempts < state.tuning.max_spawn_attempts {
        attempts += 1;
        let roll: f32 = state.rng.random();
        let pos = IVec2::new(
            state.rng.random_range(0..tile_count),
            state.rng.random_range(0..tile_count),
        );
        let kind = fruit_kind_for_roll(roll, &state.tuning.fruit_weights);

        if is_cell_free(state, pos) {
            state.fruits.push(Fruit { pos, kind });
            added += 1;
        }
    }

    if state.fruits.len() < target {
        log::debug!(
            "Fruit spawn gave up after {} attempts ({}/{} on board)",
            attempts,
            state.fruits.len(),
            target
        );
    }
    added
}

/// Index of the first fruit under the player's head
pub fn check_fruit_collisions(player: &Player, fruits: &[Fruit]) -> Option<usize> {
    let head = player.head();
    fruits.iter().position(|f| f.pos == head)
}

/// Apply a fruit's effect to the player that ate it
pub fn handle_fruit_collection(player: &mut Player, fruit: &Fruit, now: f64, tuning: &Tuning) {
    match fruit.kind {
        FruitKind::Regular => {
            player.score += 1;
            player.max_tail += tuning.growth_per_fruit;
        }
        FruitKind::Speed => {
            player.speed_boost_end = now + tuning.speed_boost_duration;
            player.current_speed = tuning.boost_speed;
        }
        FruitKind::Laser => {
            player.has_laser = true;
        }
    }
}

/// Eat whatever fruit is under the player's head, then replenish the board.
pub fn collect_fruit(
    state: &mut GameState,
    id: PlayerId,
    now: f64,
    events: &mut Vec<GameEvent>,
) -> Option<FruitKind> {
    let index = check_fruit_collisions(state.player(id), &state.fruits)?;
    let fruit = state.fruits.remove(index);

    let tuning = state.tuning.clone();
    let player = state.player_mut(id);
    handle_fruit_collection(player, &fruit, now, &tuning);
    let score = player.score;
    log::debug!("{} ate {:?} fruit at {}", player.name, fruit.kind, fruit.pos);

    events.push(GameEvent::FruitCollected {
        player: id,
        kind: fruit.kind,
    });
    if fruit.kind == FruitKind::Regular {
        events.push(GameEvent::ScoreChanged { player: id, score });
    }

    spawn_fruit(state);
    Some(fruit.kind)
}
