//! Centralized balance and tuning constants for Gearhead game logic.
//!
//! These values define the deterministic math for the core simulation.
//! Catalog *contents* (rarity tiers, traits, modifiers, event board) live in
//! [`crate::config::GameConfig`] so tests can inject their own tables; the
//! formulas that consume them are tuned here.

// Vehicle baseline -------------------------------------------------------
pub const BASE_SPEED: i32 = 50;
pub const BASE_ACCELERATION: i32 = 50;
pub const BASE_HANDLING: i32 = 50;
pub const BASE_DURABILITY: i32 = 100;
pub const BASE_FUEL_EFFICIENCY: i32 = 50;

/// Durability at or below this value marks the vehicle destroyed.
pub const DESTROYED_AT_OR_BELOW: i32 = 0;

// Competition ------------------------------------------------------------
pub const SUCCESS_CHANCE_FLOOR: f64 = 0.1;
pub const SUCCESS_CHANCE_CEIL: f64 = 1.0;
/// Stat points needed per difficulty level for a guaranteed win.
pub const STAT_POINTS_PER_DIFFICULTY: f64 = 100.0;
pub const DAMAGE_MIN_PER_DIFFICULTY: i32 = 10;
pub const DAMAGE_MAX_PER_DIFFICULTY: i32 = 30;
/// Upper bound on event difficulty; keeps `30 * difficulty` inside `i32`.
pub const MAX_DIFFICULTY: u32 = 10_000;

// Reward weighting -------------------------------------------------------
pub const COMMON_WEIGHT_BASE: i64 = 10;
pub const COMMON_WEIGHT_SLOPE: i64 = 2;
pub const RARE_WEIGHT_SLOPE: i64 = 2;
/// Epic rewards only enter the pool above this difficulty.
pub const EPIC_MIN_DIFFICULTY: i64 = 2;
/// Legendary rewards only enter the pool above this difficulty.
pub const LEGENDARY_MIN_DIFFICULTY: i64 = 4;
pub const MIN_REWARD_WEIGHT: i64 = 1;

// Part generation --------------------------------------------------------
/// Default size of an untargeted batch.
pub const DEFAULT_BATCH_SIZE: usize = 10;

// Logging targets --------------------------------------------------------
pub(crate) const LOG_TARGET_EVENT: &str = "gearhead::event";
pub(crate) const LOG_TARGET_FORGE: &str = "gearhead::forge";
pub(crate) const LOG_TARGET_GARAGE: &str = "gearhead::garage";
pub(crate) const LOG_TARGET_SESSION: &str = "gearhead::session";
