//! Competitions: reward weighting, success chance and damage.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{
    COMMON_WEIGHT_BASE, COMMON_WEIGHT_SLOPE, DAMAGE_MAX_PER_DIFFICULTY, DAMAGE_MIN_PER_DIFFICULTY,
    EPIC_MIN_DIFFICULTY, LEGENDARY_MIN_DIFFICULTY, LOG_TARGET_EVENT, MAX_DIFFICULTY,
    MIN_REWARD_WEIGHT, RARE_WEIGHT_SLOPE, STAT_POINTS_PER_DIFFICULTY, SUCCESS_CHANCE_CEIL,
    SUCCESS_CHANCE_FLOOR,
};
use crate::dice::RandomSource;
use crate::error::GameError;
use crate::generator::PartGenerator;
use crate::modifier::{EventModifier, ModifierCatalog};
use crate::numbers::{difficulty_to_i32, i64_to_f64, weight_to_u32};
use crate::part::Part;
use crate::rarity::Rarity;
use crate::stats::Stats;
use crate::vehicle::Vehicle;

/// At most one entry per rarity.
pub type RewardWeights = SmallVec<[(Rarity, u32); 4]>;

/// Reward weights for `difficulty`. Rarities whose weight would be
/// non-positive are left out entirely.
#[must_use]
pub fn reward_weights(difficulty: u32) -> RewardWeights {
    let d = i64::from(difficulty);
    let mut weights = RewardWeights::new();
    let mut push = |rarity: Rarity, weight: i64| {
        let weight = weight_to_u32(weight);
        if weight > 0 {
            weights.push((rarity, weight));
        }
    };

    push(
        Rarity::Common,
        (COMMON_WEIGHT_BASE - COMMON_WEIGHT_SLOPE * d).max(MIN_REWARD_WEIGHT),
    );
    push(Rarity::Rare, (RARE_WEIGHT_SLOPE * d).max(MIN_REWARD_WEIGHT));
    if d > EPIC_MIN_DIFFICULTY {
        push(Rarity::Epic, (d - EPIC_MIN_DIFFICULTY).max(MIN_REWARD_WEIGHT));
    }
    if d > LEGENDARY_MIN_DIFFICULTY {
        push(
            Rarity::Legendary,
            (d - LEGENDARY_MIN_DIFFICULTY).max(MIN_REWARD_WEIGHT),
        );
    }
    weights
}

/// Pick an item proportionally to its weight with a single draw over the
/// total. `None` when every weight is zero.
pub fn weighted_pick<T, S>(options: &[(T, u32)], rng: &mut S) -> Option<T>
where
    T: Clone,
    S: RandomSource + ?Sized,
{
    let total: u64 = options.iter().map(|(_, weight)| u64::from(*weight)).sum();
    let bound = usize::try_from(total).ok().filter(|b| *b > 0)?;
    let roll = u64::try_from(rng.below(bound)).unwrap_or(0);

    let mut running = 0_u64;
    for (item, weight) in options {
        running += u64::from(*weight);
        if roll < running {
            return Some(item.clone());
        }
    }
    options.first().map(|(item, _)| item.clone())
}

/// Draw the reward rarity for `difficulty`.
pub fn roll_reward_rarity<S: RandomSource + ?Sized>(difficulty: u32, rng: &mut S) -> Rarity {
    weighted_pick(&reward_weights(difficulty), rng).unwrap_or(Rarity::Common)
}

/// `(speed + handling + acceleration) / (difficulty * 100)`, clamped to
/// `[0.1, 1.0]`.
#[must_use]
pub fn success_chance(stats: &Stats, difficulty: u32) -> f64 {
    let needed = f64::from(difficulty.max(1)) * STAT_POINTS_PER_DIFFICULTY;
    (i64_to_f64(stats.performance()) / needed).clamp(SUCCESS_CHANCE_FLOOR, SUCCESS_CHANCE_CEIL)
}

/// Damage for a lost race, inclusive `[10d, 30d]`.
pub fn roll_damage<S: RandomSource + ?Sized>(difficulty: u32, rng: &mut S) -> i32 {
    let d = difficulty_to_i32(difficulty);
    rng.between(
        DAMAGE_MIN_PER_DIFFICULTY.saturating_mul(d),
        DAMAGE_MAX_PER_DIFFICULTY.saturating_mul(d),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum RaceOutcome {
    Won,
    Lost { damage: i32 },
}

/// What happened in one competition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceReport {
    pub event: String,
    pub modifier: String,
    pub success_chance: f64,
    pub roll: f64,
    pub outcome: RaceOutcome,
}

impl RaceReport {
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        matches!(self.outcome, RaceOutcome::Won)
    }

    /// Damage taken; zero on a win.
    #[must_use]
    pub const fn damage(&self) -> i32 {
        match self.outcome {
            RaceOutcome::Won => 0,
            RaceOutcome::Lost { damage } => damage,
        }
    }
}

/// Display-ready description of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub name: String,
    pub difficulty: u32,
    pub modifier: EventModifier,
    pub reward: Part,
}

/// A staged competition with its modifier and reward already rolled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    name: String,
    difficulty: u32,
    modifier: EventModifier,
    reward: Part,
}

impl Event {
    /// Stage an event. Draws the modifier, then the reward rarity, then the
    /// reward part.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidDifficulty`] when `difficulty` is 0 or
    /// above [`MAX_DIFFICULTY`], or the generator's error for the reward.
    pub fn new<S: RandomSource + ?Sized>(
        name: impl Into<String>,
        difficulty: u32,
        modifiers: &ModifierCatalog,
        generator: &PartGenerator,
        rng: &mut S,
    ) -> Result<Self, GameError> {
        if difficulty == 0 || difficulty > MAX_DIFFICULTY {
            return Err(GameError::InvalidDifficulty {
                difficulty,
                max: MAX_DIFFICULTY,
            });
        }
        let name = name.into();
        let modifier = modifiers.pick(rng);
        let rarity = roll_reward_rarity(difficulty, rng);
        let reward = generator.generate(rarity, rng)?;
        log::debug!(
            target: LOG_TARGET_EVENT,
            "staged {name} (difficulty {difficulty}, {}, reward {})",
            modifier.name,
            reward.name()
        );
        Ok(Self {
            name,
            difficulty,
            modifier,
            reward,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn difficulty(&self) -> u32 {
        self.difficulty
    }

    #[must_use]
    pub const fn modifier(&self) -> &EventModifier {
        &self.modifier
    }

    #[must_use]
    pub const fn reward(&self) -> &Part {
        &self.reward
    }

    /// A copy of the reward for the winner's inventory.
    #[must_use]
    pub fn claim_reward(&self) -> Part {
        self.reward.clone()
    }

    /// Run the competition against `vehicle`.
    ///
    /// The modifier is applied first and stays applied; running the same
    /// event again applies it again. A loss deals damage before returning.
    pub fn compete<S: RandomSource + ?Sized>(
        &self,
        vehicle: &mut Vehicle,
        rng: &mut S,
    ) -> RaceReport {
        self.modifier.apply_to(vehicle);
        let chance = success_chance(&vehicle.stats(), self.difficulty);
        let roll = rng.unit();

        let outcome = if roll < chance {
            RaceOutcome::Won
        } else {
            let damage = roll_damage(self.difficulty, rng);
            vehicle.take_damage(damage);
            RaceOutcome::Lost { damage }
        };
        log::debug!(
            target: LOG_TARGET_EVENT,
            "{}: chance {chance:.2}, roll {roll:.3}, {outcome:?}",
            self.name
        );

        RaceReport {
            event: self.name.clone(),
            modifier: self.modifier.name.clone(),
            success_chance: chance,
            roll,
            outcome,
        }
    }

    /// Success chance `vehicle` would race with once the modifier lands.
    #[must_use]
    pub fn projected_success_chance(&self, vehicle: &Vehicle) -> f64 {
        let stats = vehicle.stats().saturating_add(self.modifier.effect());
        success_chance(&stats, self.difficulty)
    }

    #[must_use]
    pub fn describe(&self) -> EventSummary {
        EventSummary {
            name: self.name.clone(),
            difficulty: self.difficulty,
            modifier: self.modifier.clone(),
            reward: self.reward.clone(),
        }
    }
}
