//! Immutable configuration tables for the engine.
//!
//! Every catalog the simulation samples from lives here and is handed to the
//! generator and event components at construction. Nothing is global; tests
//! build a `GameConfig` with whatever fixed tables they need.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::MAX_DIFFICULTY;
use crate::modifier::EventModifier;
use crate::rarity::{Rarity, RarityTable};

/// Errors raised when configuration invariants are violated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{catalog} catalog must not be empty")]
    EmptyCatalog { catalog: &'static str },
    #[error("{catalog} catalog contains a blank entry")]
    BlankEntry { catalog: &'static str },
    #[error("{rarity} stat range inverted (min {min} > max {max})")]
    InvertedRange { rarity: Rarity, min: i32, max: i32 },
    #[error("{rarity} trait chance must be between 0.00 and 1.00 (got {value:.2})")]
    TraitChance { rarity: Rarity, value: f64 },
    #[error("modifier {name:?} carries no effects")]
    EmptyModifier { name: String },
    #[error("event {name:?} difficulty must be between 1 and {max} (got {difficulty})")]
    EventDifficulty {
        name: String,
        difficulty: u32,
        max: u32,
    },
    #[error("config could not be parsed: {message}")]
    Parse { message: String },
}

/// One entry on the event board: the fixed name and difficulty of a
/// competition. Modifier and reward are rolled when the event is staged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSpec {
    pub name: String,
    pub difficulty: u32,
}

impl EventSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, difficulty: u32) -> Self {
        Self {
            name: name.into(),
            difficulty,
        }
    }
}

/// Complete set of catalogs used by a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub rarities: RarityTable,
    #[serde(default = "GameConfig::default_traits")]
    pub traits: Vec<String>,
    #[serde(default = "GameConfig::default_part_types")]
    pub part_types: Vec<String>,
    #[serde(default = "GameConfig::default_modifiers")]
    pub modifiers: Vec<EventModifier>,
    #[serde(default = "GameConfig::default_events")]
    pub events: Vec<EventSpec>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rarities: RarityTable::default(),
            traits: Self::default_traits(),
            part_types: Self::default_part_types(),
            modifiers: Self::default_modifiers(),
            events: Self::default_events(),
        }
    }
}

impl GameConfig {
    fn default_traits() -> Vec<String> {
        [
            "Fuel Saver",
            "Drift King",
            "Turbo Boost",
            "Off-Road Expert",
            "Lightweight Design",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    fn default_part_types() -> Vec<String> {
        ["Engine", "Tires", "Brakes", "Suspension", "Exhaust"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn default_modifiers() -> Vec<EventModifier> {
        vec![
            EventModifier::new("Rainy Weather").with_handling_penalty(10),
            EventModifier::new("Icy Roads").with_handling_penalty(20),
            EventModifier::new("Hot Weather").with_durability_penalty(15),
            EventModifier::new("High Winds").with_speed_penalty(10),
            EventModifier::new("Clear Skies").with_boost(10),
        ]
    }

    fn default_events() -> Vec<EventSpec> {
        vec![
            EventSpec::new("Drag Race", 2),
            EventSpec::new("Off-Road Rally", 3),
            EventSpec::new("Endurance Race", 4),
        ]
    }

    /// Parse a config from JSON; missing sections fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, or any validation
    /// error for tables that parse but violate an invariant.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|err| ConfigError::Parse {
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration before use.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found, checking rarities, traits, part
    /// types, modifiers and events in that order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_rarities()?;
        validate_names("traits", &self.traits)?;
        validate_names("part_types", &self.part_types)?;
        self.validate_modifiers()?;
        self.validate_events()
    }

    fn validate_rarities(&self) -> Result<(), ConfigError> {
        if self.rarities.is_empty() {
            return Err(ConfigError::EmptyCatalog {
                catalog: "rarities",
            });
        }
        for (rarity, tier) in self.rarities.iter() {
            if tier.min_stat > tier.max_stat {
                return Err(ConfigError::InvertedRange {
                    rarity,
                    min: tier.min_stat,
                    max: tier.max_stat,
                });
            }
            if !(0.0..=1.0).contains(&tier.trait_chance) {
                return Err(ConfigError::TraitChance {
                    rarity,
                    value: tier.trait_chance,
                });
            }
        }
        Ok(())
    }

    fn validate_modifiers(&self) -> Result<(), ConfigError> {
        if self.modifiers.is_empty() {
            return Err(ConfigError::EmptyCatalog {
                catalog: "modifiers",
            });
        }
        for modifier in &self.modifiers {
            if modifier.name.trim().is_empty() {
                return Err(ConfigError::BlankEntry {
                    catalog: "modifiers",
                });
            }
            if !modifier.has_effects() {
                return Err(ConfigError::EmptyModifier {
                    name: modifier.name.clone(),
                });
            }
        }
        Ok(())
    }

    fn validate_events(&self) -> Result<(), ConfigError> {
        if self.events.is_empty() {
            return Err(ConfigError::EmptyCatalog { catalog: "events" });
        }
        for event in &self.events {
            if event.name.trim().is_empty() {
                return Err(ConfigError::BlankEntry { catalog: "events" });
            }
            if event.difficulty == 0 || event.difficulty > MAX_DIFFICULTY {
                return Err(ConfigError::EventDifficulty {
                    name: event.name.clone(),
                    difficulty: event.difficulty,
                    max: MAX_DIFFICULTY,
                });
            }
        }
        Ok(())
    }
}

fn validate_names(catalog: &'static str, names: &[String]) -> Result<(), ConfigError> {
    if names.is_empty() {
        return Err(ConfigError::EmptyCatalog { catalog });
    }
    if names.iter().any(|name| name.trim().is_empty()) {
        return Err(ConfigError::BlankEntry { catalog });
    }
    Ok(())
}
