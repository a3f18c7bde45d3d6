//! Rarity tiers and their stat/trait tuning table.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub const ALL: [Self; 4] = [Self::Common, Self::Rare, Self::Epic, Self::Legendary];

    /// Returns the display name for this rarity tier.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rarity {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::ALL
            .into_iter()
            .find(|rarity| rarity.name().eq_ignore_ascii_case(key))
            .ok_or_else(|| GameError::UnknownRarity {
                key: s.to_string(),
            })
    }
}

/// Stat range and trait odds for one rarity tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RarityTier {
    pub min_stat: i32,
    pub max_stat: i32,
    pub trait_chance: f64,
}

impl RarityTier {
    #[must_use]
    pub const fn new(min_stat: i32, max_stat: i32, trait_chance: f64) -> Self {
        Self {
            min_stat,
            max_stat,
            trait_chance,
        }
    }

    #[must_use]
    pub fn contains(&self, value: i32) -> bool {
        (self.min_stat..=self.max_stat).contains(&value)
    }
}

/// Lookup table from rarity to tier tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RarityTable {
    tiers: BTreeMap<Rarity, RarityTier>,
}

impl RarityTable {
    #[must_use]
    pub fn new(tiers: BTreeMap<Rarity, RarityTier>) -> Self {
        Self { tiers }
    }

    /// Tier tuning for `rarity`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownRarity`] if this table has no entry for it.
    pub fn tier(&self, rarity: Rarity) -> Result<&RarityTier, GameError> {
        self.tiers
            .get(&rarity)
            .ok_or_else(|| GameError::UnknownRarity {
                key: rarity.name().to_string(),
            })
    }

    /// Parse a rarity key and look up its tier in one step.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownRarity`] if the key does not name a rarity
    /// or this table has no entry for it.
    pub fn tier_by_key(&self, key: &str) -> Result<(Rarity, &RarityTier), GameError> {
        let rarity = key.parse::<Rarity>()?;
        self.tier(rarity).map(|tier| (rarity, tier))
    }

    /// Rarities present in the table, in tier order.
    pub fn rarities(&self) -> impl Iterator<Item = Rarity> + '_ {
        self.tiers.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Rarity, &RarityTier)> + '_ {
        self.tiers.iter().map(|(rarity, tier)| (*rarity, tier))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl Default for RarityTable {
    fn default() -> Self {
        Self::new(BTreeMap::from([
            (Rarity::Common, RarityTier::new(1, 5, 0.1)),
            (Rarity::Rare, RarityTier::new(5, 10, 0.3)),
            (Rarity::Epic, RarityTier::new(10, 15, 0.5)),
            (Rarity::Legendary, RarityTier::new(15, 20, 0.8)),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Common < Rarity::Rare);
        assert!(Rarity::Rare < Rarity::Epic);
        assert!(Rarity::Epic < Rarity::Legendary);
    }

    #[test]
    fn parses_keys_case_insensitively() {
        assert_eq!("Epic".parse::<Rarity>(), Ok(Rarity::Epic));
        assert_eq!(" legendary ".parse::<Rarity>(), Ok(Rarity::Legendary));
        assert_eq!(
            "Mythic".parse::<Rarity>(),
            Err(GameError::UnknownRarity {
                key: "Mythic".to_string()
            })
        );
    }

    #[test]
    fn default_table_matches_tuning() {
        let table = RarityTable::default();
        assert_eq!(table.len(), 4);
        let rare = table.tier(Rarity::Rare).unwrap();
        assert_eq!((rare.min_stat, rare.max_stat), (5, 10));
        assert!((rare.trait_chance - 0.3).abs() < f64::EPSILON);
        let legendary = table.tier(Rarity::Legendary).unwrap();
        assert!(legendary.contains(15) && legendary.contains(20));
        assert!(!legendary.contains(21));
    }

    #[test]
    fn missing_tier_is_unknown_rarity() {
        let table = RarityTable::new(BTreeMap::from([(
            Rarity::Common,
            RarityTier::new(1, 2, 0.0),
        )]));
        assert!(matches!(
            table.tier(Rarity::Epic),
            Err(GameError::UnknownRarity { .. })
        ));
        assert!(table.tier_by_key("common").is_ok());
        assert!(table.tier_by_key("bogus").is_err());
    }

    #[test]
    fn table_serializes_as_keyed_map() {
        let json = serde_json::to_value(RarityTable::default()).unwrap();
        assert_eq!(json["Epic"]["min_stat"], 10);
        let back: RarityTable = serde_json::from_value(json).unwrap();
        assert_eq!(back, RarityTable::default());
    }
}
