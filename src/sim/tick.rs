//! Frame-driven game loop
//!
//! The host calls [`tick`] once per animation frame with a millisecond timestamp.
//! Each player steps on its own cadence (`current_speed`), lasers move every frame,
//! and rendering is throttled to `render_interval_ms`.

use super::collision::{CollisionKind, classify_collision};
use super::fruit::{collect_fruit, spawn_fruit};
use super::movement::{advance, handle_turn_input};
use super::powerup::{advance_lasers, shoot_laser, update_speed_boosts};
use super::state::{Action, GameEvent, GamePhase, GameState, Outcome, PlayerId};
use crate::tuning::ResolutionOrder;

/// Result of one frame
#[derive(Debug, Clone, Default)]
pub struct TickOutcome {
    /// The host should draw this frame
    pub render: bool,
    pub events: Vec<GameEvent>,
}

/// Players in the order they resolve within a tick
pub fn resolution_order(order: ResolutionOrder) -> [PlayerId; 2] {
    match order {
        ResolutionOrder::PlayerOneFirst => [PlayerId::One, PlayerId::Two],
        ResolutionOrder::PlayerTwoFirst => [PlayerId::Two, PlayerId::One],
    }
}

/// Advance the game by one host frame at time `now` (ms)
pub fn tick(state: &mut GameState, now: f64) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    if state.phase != GamePhase::Playing {
        return outcome;
    }
    let events = &mut outcome.events;

    update_speed_boosts(state, now, events);

    for id in resolution_order(state.tuning.resolution_order) {
        if state.is_over() {
            break;
        }
        let elapsed = now - state.clock.last_move[id.index()];
        if elapsed >= state.player(id).current_speed {
            step_player(state, id, now, events);
            state.clock.last_move[id.index()] = now;
        }
    }

    if !state.is_over() {
        let hits = advance_lasers(state, events);
        let laser_outcome = match hits.as_slice() {
            [] => None,
            [shooter] => Some(Outcome::Winner(*shooter)),
            _ => Some(Outcome::Draw),
        };
        if let Some(result) = laser_outcome {
            end_round(state, result, events);
        }
    }

    // Retry placements a crowded board refused earlier.
    if !state.is_over() && state.fruits.len() < state.tuning.fruits_count {
        spawn_fruit(state);
    }

    if now - state.clock.last_render >= state.tuning.render_interval_ms {
        state.clock.last_render = now;
        outcome.render = true;
    }
    outcome
}

/// One discrete move for `id`: step, eat, then check what the head hit.
pub fn step_player(state: &mut GameState, id: PlayerId, now: f64, events: &mut Vec<GameEvent>) {
    let grid = state.grid;
    advance(state.player_mut(id), &grid);
    collect_fruit(state, id, now, events);

    let player = state.player(id);
    let opponent = state.player(id.opponent());
    let result = match classify_collision(player, opponent, state.tuning.self_collision_grace) {
        None => return,
        // Both snakes driving into the same cell take each other out.
        Some(CollisionKind::HeadOn) if !opponent.is_stationary() => Outcome::Draw,
        Some(_) => Outcome::Winner(id.opponent()),
    };
    end_round(state, result, events);
}

fn end_round(state: &mut GameState, result: Outcome, events: &mut Vec<GameEvent>) {
    if state.finish(result) {
        events.push(GameEvent::RoundOver { outcome: result });
    }
}

/// Route a key-down to whichever player binds it. Ignored outside `Playing`.
pub fn handle_key(state: &mut GameState, key: &str) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }
    for id in PlayerId::BOTH {
        let player = state.player_mut(id);
        match player.controls.action(key) {
            Some(Action::Move(dir)) => {
                handle_turn_input(player, dir);
            }
            Some(Action::Shoot) => {
                if shoot_laser(player) {
                    events.push(GameEvent::LaserFired { player: id });
                }
            }
            None => {}
        }
    }
    events
}
