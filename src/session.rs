//! A game session: the simulation plus the collaborators around it
//!
//! Hosts (browser or native) own one [`Session`], forward key-downs and animation
//! frames to it, and read score text and the game-over banner back out.

use crate::highscores::BestScores;
use crate::persistence::KeyValueStore;
use crate::renderer::{Frame, Renderer};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, PlayerId, handle_key, tick};
use crate::tuning::Tuning;

pub struct Session<S: KeyValueStore> {
    pub state: GameState,
    pub best: BestScores,
    pub settings: Settings,
    base_tuning: Tuning,
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    /// Load preferences and best scores from `store` and sit in the menu
    pub fn new(seed: u64, base_tuning: Tuning, store: S) -> Self {
        let settings = Settings::load(&store);
        let best = BestScores::load(&store);
        let state = GameState::new(seed, settings.apply(base_tuning.clone()));
        Self {
            state,
            best,
            settings,
            base_tuning,
            store,
        }
    }

    /// Leave the menu. Returns false if a round already started.
    pub fn start(&mut self) -> bool {
        if self.state.phase != GamePhase::Menu {
            return false;
        }
        self.begin_round();
        true
    }

    /// Begin a new round after game over. Returns false while a round is running.
    pub fn restart(&mut self) -> bool {
        if self.state.phase != GamePhase::GameOver {
            return false;
        }
        self.begin_round();
        true
    }

    fn begin_round(&mut self) {
        self.state.tuning = self.settings.apply(self.base_tuning.clone());
        self.state.reset();
    }

    /// Change preferences; they take effect from the next round
    pub fn update_settings(&mut self, settings: Settings) {
        settings.save(&mut self.store);
        log::info!("Settings changed: {}", settings.summary());
        self.settings = settings;
    }

    pub fn cycle_fruit_preset(&mut self) {
        let settings = Settings {
            fruit_preset: self.settings.fruit_preset.next(),
            ..self.settings.clone()
        };
        self.update_settings(settings);
    }

    pub fn toggle_forgiving_turns(&mut self) {
        let settings = Settings {
            forgiving_turns: !self.settings.forgiving_turns,
            ..self.settings.clone()
        };
        self.update_settings(settings);
    }

    pub fn key_down(&mut self, key: &str) -> Vec<GameEvent> {
        handle_key(&mut self.state, key)
    }

    /// Run one animation frame. Returns true while the host should keep scheduling
    /// frames.
    pub fn frame(&mut self, now: f64, renderer: &mut dyn Renderer) -> bool {
        let outcome = tick(&mut self.state, now);
        self.record_scores(&outcome.events);
        if outcome.render {
            renderer.render(&Frame::capture(&self.state));
        }
        self.state.phase == GamePhase::Playing
    }

    fn record_scores(&mut self, events: &[GameEvent]) {
        let mut improved = false;
        for event in events {
            if let GameEvent::ScoreChanged { player, score } = *event {
                let name = &self.state.player(player).name;
                improved |= self.best.offer(name, score);
            }
        }
        if improved {
            self.best.save(&mut self.store);
        }
    }

    /// Score widget text for one player
    pub fn score_line(&self, id: PlayerId) -> String {
        let player = self.state.player(id);
        if self.settings.show_best {
            format!(
                "{} Score: {} (Best: {})",
                player.name,
                player.score,
                self.best.best(&player.name)
            )
        } else {
            format!("{} Score: {}", player.name, player.score)
        }
    }

    pub fn game_over_message(&self) -> Option<String> {
        self.state.outcome_message()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, UnavailableStore};
    use crate::renderer::TextRenderer;
    use crate::settings::FruitPreset;
    use crate::sim::{Fruit, FruitKind, Outcome};
    use crate::tuning::FruitWeights;
    use glam::IVec2;

    fn feed_fruit(session: &mut Session<impl KeyValueStore>) {
        session.state.fruits = vec![Fruit {
            pos: IVec2::new(6, 5),
            kind: FruitKind::Regular,
        }];
        session.key_down("ArrowRight");
    }

    #[test]
    fn test_menu_then_start() {
        let mut session = Session::new(1, Tuning::default(), MemoryStore::new());
        let mut renderer = TextRenderer::default();
        assert!(!session.frame(100.0, &mut renderer));
        assert_eq!(renderer.frames_rendered, 0);

        assert!(session.start());
        assert!(!session.start());
        assert!(session.frame(100.0, &mut renderer));
        assert_eq!(renderer.frames_rendered, 1);
        assert!(renderer.last.contains('A'));
    }

    #[test]
    fn test_new_best_is_persisted() {
        let mut session = Session::new(1, Tuning::default(), MemoryStore::new());
        session.start();
        feed_fruit(&mut session);
        session.frame(150.0, &mut TextRenderer::default());

        assert_eq!(session.score_line(PlayerId::One), "Player 1 Score: 1 (Best: 1)");
        assert_eq!(session.score_line(PlayerId::Two), "Player 2 Score: 0 (Best: 0)");
        let reloaded = BestScores::load(session.store());
        assert_eq!(reloaded.best("Player 1"), 1);
    }

    #[test]
    fn test_broken_storage_does_not_stop_play() {
        let mut session = Session::new(1, Tuning::default(), UnavailableStore);
        session.start();
        feed_fruit(&mut session);
        assert!(session.frame(150.0, &mut TextRenderer::default()));
        assert_eq!(session.state.player(PlayerId::One).score, 1);
        assert_eq!(session.best.best("Player 1"), 1);
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut store = MemoryStore::new();
        Settings {
            fruit_preset: FruitPreset::Frantic,
            ..Settings::default()
        }
        .save(&mut store);

        let mut session = Session::new(1, Tuning::default(), store);
        assert_eq!(session.state.tuning.fruit_weights, FruitWeights::FRANTIC);
        session.start();
        assert!(!session.restart());

        session.state.finish(Outcome::Winner(PlayerId::Two));
        assert!(!session.frame(500.0, &mut TextRenderer::default()));
        assert_eq!(session.game_over_message().as_deref(), Some("Blue Player Wins!"));

        session.update_settings(Settings {
            forgiving_turns: true,
            ..session.settings.clone()
        });
        assert!(session.restart());
        assert_eq!(session.state.phase, GamePhase::Playing);
        assert_eq!(session.state.outcome, None);
        assert_eq!(session.state.tuning.self_collision_grace, 3);
        assert_eq!(Settings::load(session.store()), session.settings);
    }

    #[test]
    fn test_settings_chosen_in_menu_apply_to_first_round() {
        let mut session = Session::new(1, Tuning::default(), MemoryStore::new());
        session.cycle_fruit_preset();
        session.toggle_forgiving_turns();
        assert_eq!(session.state.tuning.fruit_weights, FruitWeights::CLASSIC);

        assert!(session.start());
        assert_eq!(session.state.tuning.fruit_weights, FruitWeights::FRANTIC);
        assert_eq!(session.state.tuning.self_collision_grace, 3);

        let reloaded = Settings::load(session.store());
        assert_eq!(reloaded.fruit_preset, FruitPreset::Frantic);
        assert!(reloaded.forgiving_turns);
    }

    #[test]
    fn test_settings_changed_mid_round_wait_for_restart() {
        let mut session = Session::new(1, Tuning::default(), MemoryStore::new());
        session.start();
        session.toggle_forgiving_turns();
        assert_eq!(session.state.tuning.self_collision_grace, 0);

        session.state.finish(Outcome::Draw);
        assert!(session.restart());
        assert_eq!(session.state.tuning.self_collision_grace, 3);
    }

    #[test]
    fn test_score_line_without_best() {
        let mut session = Session::new(1, Tuning::default(), MemoryStore::new());
        session.settings.show_best = false;
        assert_eq!(session.score_line(PlayerId::Two), "Player 2 Score: 0");
    }
}
