//! Numeric conversion helpers centralizing safe numeric casts and rating clamps.

use num_traits::cast::cast;

use crate::constants::{RATING_MAX, RATING_MIN};

/// Round a f64 and clamp it to the i32 range, returning 0 for NaN values.
#[must_use]
pub fn round_f64_to_i32(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    let min = cast::<i32, f64>(i32::MIN).unwrap_or(f64::MIN);
    let max = cast::<i32, f64>(i32::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).round();
    cast::<f64, i32>(clamped).unwrap_or(0)
}

/// Truncate a f64 toward zero and clamp it to the i32 range.
#[must_use]
pub fn trunc_f64_to_i32(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    let min = cast::<i32, f64>(i32::MIN).unwrap_or(f64::MIN);
    let max = cast::<i32, f64>(i32::MAX).unwrap_or(f64::MAX);
    cast::<f64, i32>(value.clamp(min, max).trunc()).unwrap_or(0)
}

/// Convert a pool length or index to f64 while allowing precision loss in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Round a non-negative f64 into an index, saturating at `max_index`.
#[must_use]
pub fn round_f64_to_index(value: f64, max_index: usize) -> usize {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    cast::<f64, usize>(value.round()).map_or(max_index, |idx| idx.min(max_index))
}

/// Clamp an integer rating into the core `[10, 99]` band.
#[must_use]
pub const fn clamp_rating(value: i32) -> i32 {
    if value < RATING_MIN {
        RATING_MIN
    } else if value > RATING_MAX {
        RATING_MAX
    } else {
        value
    }
}

/// Round then clamp a floating rating into the core band.
#[must_use]
pub fn round_to_rating(value: f64) -> i32 {
    clamp_rating(round_f64_to_i32(value))
}
