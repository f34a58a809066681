//! Best score per player
//!
//! Persisted through a [`KeyValueStore`] as one JSON object keyed by player name.
//! Storage problems are logged and otherwise ignored; a missing record reads as 0.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScores {
    pub entries: BTreeMap<String, u32>,
}

impl BestScores {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "snake_duel_best_scores";

    pub fn new() -> Self {
        Self::default()
    }

    /// Best score recorded for `player`, 0 if none
    pub fn best(&self, player: &str) -> u32 {
        self.entries.get(player).copied().unwrap_or(0)
    }

    /// Record `score` if it beats the stored best. Returns true on a new best.
    pub fn offer(&mut self, player: &str, score: u32) -> bool {
        if score <= self.best(player) {
            return false;
        }
        self.entries.insert(player.to_string(), score);
        true
    }

    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<BestScores>(&json) {
                Ok(scores) => {
                    log::info!("Loaded best scores for {} players", scores.entries.len());
                    scores
                }
                Err(e) => {
                    log::warn!("Discarding unreadable best scores: {}", e);
                    Self::new()
                }
            },
            Ok(None) => {
                log::info!("No best scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Best scores unavailable: {}", e);
                Self::new()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot encode best scores: {}", e);
                return;
            }
        };
        match store.set(Self::STORAGE_KEY, &json) {
            Ok(()) => log::debug!("Best scores saved"),
            Err(e) => log::warn!("Best scores not saved: {}", e),
        }
    }
}
