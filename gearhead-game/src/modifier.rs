//! Environmental modifiers attached to events.
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::dice::RandomSource;
use crate::stats::Stats;
use crate::vehicle::Vehicle;

/// A named environmental effect. Each present effect is applied once per
/// competition; absent effects do nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventModifier {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handling_penalty: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durability_penalty: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_penalty: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost: Option<i32>,
}

impl EventModifier {
    /// A modifier with no effects yet; add them with the `with_*` builders.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handling_penalty: None,
            durability_penalty: None,
            speed_penalty: None,
            boost: None,
        }
    }

    #[must_use]
    pub const fn with_handling_penalty(mut self, amount: i32) -> Self {
        self.handling_penalty = Some(amount);
        self
    }

    #[must_use]
    pub const fn with_durability_penalty(mut self, amount: i32) -> Self {
        self.durability_penalty = Some(amount);
        self
    }

    #[must_use]
    pub const fn with_speed_penalty(mut self, amount: i32) -> Self {
        self.speed_penalty = Some(amount);
        self
    }

    #[must_use]
    pub const fn with_boost(mut self, amount: i32) -> Self {
        self.boost = Some(amount);
        self
    }

    #[must_use]
    pub const fn has_effects(&self) -> bool {
        self.handling_penalty.is_some()
            || self.durability_penalty.is_some()
            || self.speed_penalty.is_some()
            || self.boost.is_some()
    }

    /// Net stat delta of all present effects.
    #[must_use]
    pub fn effect(&self) -> Stats {
        let speed = i64::from(self.boost.unwrap_or(0)) - i64::from(self.speed_penalty.unwrap_or(0));
        Stats {
            speed: crate::numbers::clamp_i64_to_i32(speed),
            handling: self.handling_penalty.map_or(0, i32::saturating_neg),
            durability: self.durability_penalty.map_or(0, i32::saturating_neg),
            ..Stats::ZERO
        }
    }

    /// Apply every present effect to `vehicle`. The change is permanent.
    pub fn apply_to(&self, vehicle: &mut Vehicle) {
        vehicle.apply_effect(self.effect());
    }
}

/// The pool events draw their modifier from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierCatalog {
    modifiers: Vec<EventModifier>,
}

impl ModifierCatalog {
    /// Build a catalog from validated modifiers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCatalog`] for an empty list and
    /// [`ConfigError::EmptyModifier`] for a modifier without effects.
    pub fn new(modifiers: Vec<EventModifier>) -> Result<Self, ConfigError> {
        if modifiers.is_empty() {
            return Err(ConfigError::EmptyCatalog {
                catalog: "modifiers",
            });
        }
        if let Some(empty) = modifiers.iter().find(|m| !m.has_effects()) {
            return Err(ConfigError::EmptyModifier {
                name: empty.name.clone(),
            });
        }
        Ok(Self { modifiers })
    }

    /// A catalog that always yields `modifier`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyModifier`] if `modifier` has no effects.
    pub fn single(modifier: EventModifier) -> Result<Self, ConfigError> {
        Self::new(vec![modifier])
    }

    /// Draw one modifier uniformly.
    pub fn pick<S: RandomSource + ?Sized>(&self, rng: &mut S) -> EventModifier {
        let index = rng.below(self.modifiers.len());
        self.modifiers[index.min(self.modifiers.len() - 1)].clone()
    }

    #[must_use]
    pub fn modifiers(&self) -> &[EventModifier] {
        &self.modifiers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }
}
