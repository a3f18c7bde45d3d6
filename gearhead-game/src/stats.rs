//! Five-stat value type shared by parts, vehicles and modifiers.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    BASE_ACCELERATION, BASE_DURABILITY, BASE_FUEL_EFFICIENCY, BASE_HANDLING, BASE_SPEED,
};

/// Named stat axis, used for reporting and per-stat iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Speed,
    Acceleration,
    Handling,
    Durability,
    FuelEfficiency,
}

impl StatKind {
    pub const ALL: [Self; 5] = [
        Self::Speed,
        Self::Acceleration,
        Self::Handling,
        Self::Durability,
        Self::FuelEfficiency,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Speed => "Speed",
            Self::Acceleration => "Acceleration",
            Self::Handling => "Handling",
            Self::Durability => "Durability",
            Self::FuelEfficiency => "Fuel Efficiency",
        }
    }
}

/// A bundle of the five vehicle stats. Used both as absolute values (a
/// vehicle) and as deltas (a part or modifier effect).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub speed: i32,
    #[serde(default)]
    pub acceleration: i32,
    #[serde(default)]
    pub handling: i32,
    #[serde(default)]
    pub durability: i32,
    #[serde(default)]
    pub fuel_efficiency: i32,
}

impl Stats {
    /// All-zero stats.
    pub const ZERO: Self = Self::new(0, 0, 0, 0, 0);

    /// Factory stats of a fresh vehicle.
    pub const BASELINE: Self = Self::new(
        BASE_SPEED,
        BASE_ACCELERATION,
        BASE_HANDLING,
        BASE_DURABILITY,
        BASE_FUEL_EFFICIENCY,
    );

    #[must_use]
    pub const fn new(
        speed: i32,
        acceleration: i32,
        handling: i32,
        durability: i32,
        fuel_efficiency: i32,
    ) -> Self {
        Self {
            speed,
            acceleration,
            handling,
            durability,
            fuel_efficiency,
        }
    }

    #[must_use]
    pub const fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Speed => self.speed,
            StatKind::Acceleration => self.acceleration,
            StatKind::Handling => self.handling,
            StatKind::Durability => self.durability,
            StatKind::FuelEfficiency => self.fuel_efficiency,
        }
    }

    /// Add `other` field by field, or `None` if any field would overflow.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        Some(Self {
            speed: self.speed.checked_add(other.speed)?,
            acceleration: self.acceleration.checked_add(other.acceleration)?,
            handling: self.handling.checked_add(other.handling)?,
            durability: self.durability.checked_add(other.durability)?,
            fuel_efficiency: self.fuel_efficiency.checked_add(other.fuel_efficiency)?,
        })
    }

    /// Subtract `other` field by field, or `None` if any field would overflow.
    #[must_use]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        Some(Self {
            speed: self.speed.checked_sub(other.speed)?,
            acceleration: self.acceleration.checked_sub(other.acceleration)?,
            handling: self.handling.checked_sub(other.handling)?,
            durability: self.durability.checked_sub(other.durability)?,
            fuel_efficiency: self.fuel_efficiency.checked_sub(other.fuel_efficiency)?,
        })
    }

    /// Add `other` field by field, saturating at the integer limits.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self {
            speed: self.speed.saturating_add(other.speed),
            acceleration: self.acceleration.saturating_add(other.acceleration),
            handling: self.handling.saturating_add(other.handling),
            durability: self.durability.saturating_add(other.durability),
            fuel_efficiency: self.fuel_efficiency.saturating_add(other.fuel_efficiency),
        }
    }

    /// Speed + handling + acceleration, the inputs to the success formula.
    #[must_use]
    pub fn performance(&self) -> i64 {
        i64::from(self.speed) + i64::from(self.handling) + i64::from(self.acceleration)
    }

    /// Sum of all five stats.
    #[must_use]
    pub fn total(&self) -> i64 {
        StatKind::ALL
            .iter()
            .map(|kind| i64::from(self.get(*kind)))
            .sum()
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Speed={}, Acceleration={}, Handling={}, Durability={}, Fuel Efficiency={}",
            self.speed, self.acceleration, self.handling, self.durability, self.fuel_efficiency
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_matches_factory_values() {
        assert_eq!(Stats::BASELINE, Stats::new(50, 50, 50, 100, 50));
        assert_eq!(Stats::BASELINE.performance(), 150);
        assert_eq!(Stats::BASELINE.total(), 300);
    }

    #[test]
    fn checked_ops_are_inverse() {
        let delta = Stats::new(3, -2, 7, 0, 1);
        let added = Stats::BASELINE.checked_add(delta).unwrap();
        assert_eq!(added.checked_sub(delta), Some(Stats::BASELINE));
    }

    #[test]
    fn checked_add_rejects_overflow_in_any_field() {
        let near_max = Stats {
            fuel_efficiency: i32::MAX,
            ..Stats::ZERO
        };
        assert!(near_max.checked_add(Stats::new(0, 0, 0, 0, 1)).is_none());
        assert!(near_max.checked_add(Stats::new(1, 1, 1, 1, 0)).is_some());
    }

    #[test]
    fn get_reads_every_axis() {
        let stats = Stats::new(1, 2, 3, 4, 5);
        let values: Vec<i32> = StatKind::ALL.iter().map(|k| stats.get(*k)).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn display_lists_all_stats() {
        let text = Stats::BASELINE.to_string();
        assert!(text.contains("Durability=100"));
        assert!(text.contains("Fuel Efficiency=50"));
    }

    #[test]
    fn missing_fields_deserialize_as_zero() {
        let stats: Stats = serde_json::from_str(r#"{"speed": 20}"#).unwrap();
        assert_eq!(stats, Stats::new(20, 0, 0, 0, 0));
    }
}
