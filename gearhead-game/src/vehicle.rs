//! The player's car: current stats plus the parts bolted onto it.
use serde::{Deserialize, Serialize};

use crate::constants::{DESTROYED_AT_OR_BELOW, LOG_TARGET_GARAGE};
use crate::error::GameError;
use crate::part::Part;
use crate::stats::Stats;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    stats: Stats,
    parts: Vec<Part>,
}

impl Default for Vehicle {
    fn default() -> Self {
        Self {
            stats: Stats::BASELINE,
            parts: Vec::new(),
        }
    }
}

impl Vehicle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn stats(&self) -> Stats {
        self.stats
    }

    #[must_use]
    pub const fn speed(&self) -> i32 {
        self.stats.speed
    }

    #[must_use]
    pub const fn acceleration(&self) -> i32 {
        self.stats.acceleration
    }

    #[must_use]
    pub const fn handling(&self) -> i32 {
        self.stats.handling
    }

    #[must_use]
    pub const fn durability(&self) -> i32 {
        self.stats.durability
    }

    #[must_use]
    pub const fn fuel_efficiency(&self) -> i32 {
        self.stats.fuel_efficiency
    }

    /// Installed parts, in install order.
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Validate that `part` can be installed without mutating anything.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidPart`] when the part breaks its contract or
    /// its deltas would overflow a stat.
    pub fn check_install(&self, part: &Part) -> Result<Stats, GameError> {
        part.validate()?;
        self.stats
            .checked_add(part.stats())
            .ok_or_else(|| GameError::InvalidPart {
                name: part.name().to_string(),
                reason: "stat deltas overflow the vehicle",
            })
    }

    /// Install `part`, adding its deltas to the current stats.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidPart`]; the vehicle is unchanged on error.
    pub fn install(&mut self, part: Part) -> Result<(), GameError> {
        let next = self.check_install(&part)?;
        log::debug!(target: LOG_TARGET_GARAGE, "installing {part}");
        self.stats = next;
        self.parts.push(part);
        Ok(())
    }

    /// Remove the part at `index`, subtracting its deltas. Exact inverse of
    /// [`Vehicle::install`].
    ///
    /// # Errors
    ///
    /// Returns [`GameError::IndexOutOfRange`] for a bad index, or
    /// [`GameError::StatOverflow`] if the subtraction cannot be represented.
    /// The vehicle is unchanged on error.
    pub fn uninstall(&mut self, index: usize) -> Result<Part, GameError> {
        let part = self
            .parts
            .get(index)
            .ok_or_else(|| GameError::out_of_range(index, self.parts.len()))?;
        let next = self
            .stats
            .checked_sub(part.stats())
            .ok_or_else(|| GameError::StatOverflow {
                part: part.name().to_string(),
            })?;
        self.stats = next;
        let part = self.parts.remove(index);
        log::debug!(target: LOG_TARGET_GARAGE, "uninstalled {part}");
        Ok(part)
    }

    /// Subtract `amount` from durability. There is no floor at zero.
    pub fn take_damage(&mut self, amount: i32) {
        self.stats.durability = self.stats.durability.saturating_sub(amount);
    }

    /// Apply a transient-effect delta (modifiers). Saturates at the integer
    /// limits rather than failing.
    pub fn apply_effect(&mut self, delta: Stats) {
        self.stats = self.stats.saturating_add(delta);
    }

    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.stats.durability <= DESTROYED_AT_OR_BELOW
    }

    /// Baseline plus the deltas of the installed parts, ignoring damage and
    /// modifiers. `None` if the sum overflows.
    #[must_use]
    pub fn derived_stats(&self) -> Option<Stats> {
        self.parts
            .iter()
            .try_fold(Stats::BASELINE, |acc, part| acc.checked_add(part.stats()))
    }

    /// Export the save contract: current stats and installed part names.
    #[must_use]
    pub fn export_state(&self) -> VehicleSnapshot {
        VehicleSnapshot {
            stats: self.stats,
            parts: self.parts.iter().map(|p| p.name().to_string()).collect(),
        }
    }

    /// Load the save contract. Stats are taken verbatim; parts are rebuilt
    /// from their names only, with zero deltas and no trait.
    pub fn import_state(&mut self, snapshot: &VehicleSnapshot) {
        self.stats = snapshot.stats;
        self.parts = snapshot.parts.iter().map(Part::named).collect();
    }

    #[must_use]
    pub fn from_snapshot(snapshot: &VehicleSnapshot) -> Self {
        let mut vehicle = Self::default();
        vehicle.import_state(snapshot);
        vehicle
    }
}

/// Persisted form of a vehicle. Lossy: only part names survive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleSnapshot {
    #[serde(flatten)]
    pub stats: Stats,
    #[serde(default)]
    pub parts: Vec<String>,
}
