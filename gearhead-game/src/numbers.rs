//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Convert i64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    cast::<i64, f64>(value).unwrap_or(0.0)
}

/// Convert a difficulty into the signed domain used by stat arithmetic,
/// saturating at `i32::MAX`.
#[must_use]
pub fn difficulty_to_i32(difficulty: u32) -> i32 {
    cast::<u32, i32>(difficulty).unwrap_or(i32::MAX)
}

/// Narrow an i64 into i32, clamping to the representable range.
#[must_use]
pub fn clamp_i64_to_i32(value: i64) -> i32 {
    let clamped = value.clamp(i64::from(i32::MIN), i64::from(i32::MAX));
    cast::<i64, i32>(clamped).unwrap_or(0)
}

/// Convert a non-negative weight into u32, returning 0 for negative input
/// and saturating above `u32::MAX`.
#[must_use]
pub fn weight_to_u32(value: i64) -> u32 {
    if value <= 0 {
        return 0;
    }
    cast::<i64, u32>(value).unwrap_or(u32::MAX)
}
