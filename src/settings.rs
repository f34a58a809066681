//! Player preferences
//!
//! Persisted separately from best scores through the same key/value store.

use serde::{Deserialize, Serialize};

use crate::consts::{FORGIVING_SELF_COLLISION_GRACE, SELF_COLLISION_GRACE};
use crate::persistence::KeyValueStore;
use crate::tuning::{FruitWeights, Tuning};

/// Fruit mix presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FruitPreset {
    /// 10% speed, 10% laser
    #[default]
    Classic,
    /// 20% speed, 20% laser
    Frantic,
}

impl FruitPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            FruitPreset::Classic => "Classic",
            FruitPreset::Frantic => "Frantic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(FruitPreset::Classic),
            "frantic" => Some(FruitPreset::Frantic),
            _ => None,
        }
    }

    /// The preset after this one, wrapping around
    pub fn next(&self) -> Self {
        match self {
            FruitPreset::Classic => FruitPreset::Frantic,
            FruitPreset::Frantic => FruitPreset::Classic,
        }
    }

    pub fn weights(&self) -> FruitWeights {
        match self {
            FruitPreset::Classic => FruitWeights::CLASSIC,
            FruitPreset::Frantic => FruitWeights::FRANTIC,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub fruit_preset: FruitPreset,
    /// Ignore the segments right behind the head for self-collision
    pub forgiving_turns: bool,
    /// Show best scores next to the live scores
    pub show_best: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fruit_preset: FruitPreset::Classic,
            forgiving_turns: false,
            show_best: true,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "snake_duel_settings";

    /// Apply these preferences on top of `base`
    pub fn apply(&self, base: Tuning) -> Tuning {
        Tuning {
            fruit_weights: self.fruit_preset.weights(),
            self_collision_grace: if self.forgiving_turns {
                FORGIVING_SELF_COLLISION_GRACE
            } else {
                SELF_COLLISION_GRACE
            },
            ..base
        }
    }

    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Discarding unreadable settings: {}", e);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Settings unavailable: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize settings: {}", e);
                return;
            }
        };
        match store.set(Self::STORAGE_KEY, &json) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Settings not saved: {}", e),
        }
    }

    /// One-line summary for the HUD
    pub fn summary(&self) -> String {
        format!(
            "Fruit: {} ({:.0}% regular) | Forgiving turns: {}",
            self.fruit_preset.as_str(),
            self.fruit_preset.weights().regular() * 100.0,
            if self.forgiving_turns { "on" } else { "off" }
        )
    }
}
