//! Procedural part generation keyed by rarity tier.
use crate::config::{ConfigError, GameConfig};
use crate::constants::{DEFAULT_BATCH_SIZE, LOG_TARGET_FORGE};
use crate::dice::RandomSource;
use crate::error::GameError;
use crate::part::Part;
use crate::rarity::{Rarity, RarityTable};
use crate::stats::Stats;

/// Builds parts from the rarity table and the trait/part-type catalogs.
#[derive(Debug, Clone, PartialEq)]
pub struct PartGenerator {
    rarities: RarityTable,
    traits: Vec<String>,
    part_types: Vec<String>,
}

impl PartGenerator {
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCatalog`] when the part-type catalog is
    /// empty; every part needs a type for its name.
    pub fn new(
        rarities: RarityTable,
        traits: Vec<String>,
        part_types: Vec<String>,
    ) -> Result<Self, ConfigError> {
        if part_types.is_empty() {
            return Err(ConfigError::EmptyCatalog {
                catalog: "part_types",
            });
        }
        Ok(Self {
            rarities,
            traits,
            part_types,
        })
    }

    /// # Errors
    ///
    /// Returns any validation error of `config`.
    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::new(
            config.rarities.clone(),
            config.traits.clone(),
            config.part_types.clone(),
        )
    }

    #[must_use]
    pub const fn rarities(&self) -> &RarityTable {
        &self.rarities
    }

    /// Generate a part of the given rarity.
    ///
    /// Draw order: part type, the five stats (speed, acceleration, handling,
    /// durability, fuel efficiency), trait chance, then trait index when the
    /// chance hits.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownRarity`] if the rarity table has no tier
    /// for `rarity`.
    pub fn generate<S: RandomSource + ?Sized>(
        &self,
        rarity: Rarity,
        rng: &mut S,
    ) -> Result<Part, GameError> {
        let tier = *self.rarities.tier(rarity)?;
        let part_type = pick(&self.part_types, rng);

        let mut roll = || rng.between(tier.min_stat, tier.max_stat);
        let stats = Stats {
            speed: roll(),
            acceleration: roll(),
            handling: roll(),
            durability: roll(),
            fuel_efficiency: roll(),
        };

        let trait_name = if !self.traits.is_empty() && rng.unit() < tier.trait_chance {
            Some(pick(&self.traits, rng).clone())
        } else {
            None
        };

        let part = Part::new(format!("{rarity} {part_type}"), stats, trait_name);
        log::trace!(target: LOG_TARGET_FORGE, "forged {part}");
        Ok(part)
    }

    /// Generate a part from a rarity key such as `"Epic"`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownRarity`] for an unrecognised key.
    pub fn generate_by_key<S: RandomSource + ?Sized>(
        &self,
        key: &str,
        rng: &mut S,
    ) -> Result<Part, GameError> {
        let (rarity, _) = self.rarities.tier_by_key(key)?;
        self.generate(rarity, rng)
    }

    /// Generate a part with a uniformly drawn rarity (drawn before the part).
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownRarity`] if the rarity table is empty.
    pub fn generate_random<S: RandomSource + ?Sized>(
        &self,
        rng: &mut S,
    ) -> Result<Part, GameError> {
        let rarities: Vec<Rarity> = self.rarities.rarities().collect();
        let Some(rarity) = rarities.get(rng.below(rarities.len())).copied() else {
            return Err(GameError::UnknownRarity {
                key: String::from("<empty table>"),
            });
        };
        self.generate(rarity, rng)
    }

    /// Generate `count` untargeted parts.
    ///
    /// # Errors
    ///
    /// Propagates the first generation error.
    pub fn generate_batch<S: RandomSource + ?Sized>(
        &self,
        count: usize,
        rng: &mut S,
    ) -> Result<Vec<Part>, GameError> {
        (0..count).map(|_| self.generate_random(rng)).collect()
    }

    /// Generate the default-sized batch.
    ///
    /// # Errors
    ///
    /// Propagates the first generation error.
    pub fn generate_default_batch<S: RandomSource + ?Sized>(
        &self,
        rng: &mut S,
    ) -> Result<Vec<Part>, GameError> {
        self.generate_batch(DEFAULT_BATCH_SIZE, rng)
    }
}

/// Uniform pick from a non-empty catalog.
fn pick<'a, S: RandomSource + ?Sized>(catalog: &'a [String], rng: &mut S) -> &'a String {
    let last = catalog.len().saturating_sub(1);
    &catalog[rng.below(catalog.len()).min(last)]
}

impl Default for PartGenerator {
    fn default() -> Self {
        let config = GameConfig::default();
        Self {
            rarities: config.rarities,
            traits: config.traits,
            part_types: config.part_types,
        }
    }
}
