//! Vehicle parts: immutable stat bundles with an optional trait tag.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GameError;
use crate::stats::Stats;

/// A part that can sit in the inventory, on the vehicle, or in an event's
/// reward slot. Fields are read-only after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    name: String,
    #[serde(flatten)]
    stats: Stats,
    #[serde(default, rename = "trait", skip_serializing_if = "Option::is_none")]
    trait_name: Option<String>,
}

impl Part {
    #[must_use]
    pub fn new(name: impl Into<String>, stats: Stats, trait_name: Option<String>) -> Self {
        Self {
            name: name.into(),
            stats,
            trait_name,
        }
    }

    /// A part carrying only a name: zero deltas and no trait. This is what
    /// the save contract reconstructs on load.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, Stats::ZERO, None)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The five stat deltas this part contributes when installed.
    #[must_use]
    pub const fn stats(&self) -> Stats {
        self.stats
    }

    #[must_use]
    pub fn trait_name(&self) -> Option<&str> {
        self.trait_name.as_deref()
    }

    /// Check the part contract: a part must carry a non-blank name.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidPart`] when the name is empty or blank.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.name.trim().is_empty() {
            return Err(GameError::InvalidPart {
                name: self.name.clone(),
                reason: "part name must not be blank",
            });
        }
        Ok(())
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.stats)?;
        if let Some(trait_name) = &self.trait_name {
            write!(f, " [{trait_name}]")?;
        }
        Ok(())
    }
}
