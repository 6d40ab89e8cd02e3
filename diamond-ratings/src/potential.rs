//! Age-banded rating projections: potential ceilings and draft discounts.
use rand::Rng;

use crate::constants::{
    DRAFT_RATING_FLOOR, DRAFT_SCALE_BY_AGE, DRAFT_SCALE_MATURE, PEAK_AGE_LIMIT, PEAK_DRIFT,
    PRIME_AGE_LIMIT, PRIME_GROWTH, RATING_MAX, VETERAN_DECLINE, YOUTH_AGE_LIMIT, YOUTH_GROWTH,
};
use crate::numbers::{clamp_rating, round_f64_to_i32};
use crate::rng::uniform_int;

/// Career stage that decides how a rating may still move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBand {
    /// Under 22: large upside.
    Youth,
    /// 22 through 27: moderate upside.
    Prime,
    /// 28 through 31: drift either way.
    Peak,
    /// 32 and over: decline only.
    Veteran,
}

impl AgeBand {
    #[must_use]
    pub const fn for_age(age: u8) -> Self {
        if age < YOUTH_AGE_LIMIT {
            Self::Youth
        } else if age < PRIME_AGE_LIMIT {
            Self::Prime
        } else if age < PEAK_AGE_LIMIT {
            Self::Peak
        } else {
            Self::Veteran
        }
    }

    /// Signed adjustment bounds applied to the current rating.
    #[must_use]
    pub const fn delta_bounds(self) -> (i32, i32) {
        match self {
            Self::Youth => YOUTH_GROWTH,
            Self::Prime => PRIME_GROWTH,
            Self::Peak => PEAK_DRIFT,
            Self::Veteran => (-VETERAN_DECLINE.1, -VETERAN_DECLINE.0),
        }
    }
}

/// Project a potential rating from the current one.
///
/// The result is clamped to `[10, 99]`.
pub fn project<R: Rng + ?Sized>(actual: i32, age: u8, rng: &mut R) -> i32 {
    let delta = uniform_int(AgeBand::for_age(age).delta_bounds(), rng);
    clamp_rating(actual.saturating_add(delta))
}

/// Multiplier applied to current ratings of draft prospects.
#[must_use]
pub fn draft_rating_scale(age: u8) -> f64 {
    if let Some((first_age, first_scale)) = DRAFT_SCALE_BY_AGE.first()
        && age <= *first_age
    {
        return *first_scale;
    }
    DRAFT_SCALE_BY_AGE
        .iter()
        .find(|(band_age, _)| *band_age == age)
        .map_or(DRAFT_SCALE_MATURE, |(_, scale)| *scale)
}

/// Scale one current rating for a draft prospect.
///
/// Non-positive values (unthrown pitches) pass through untouched; everything
/// else is rounded, floored at 20, and capped at 99.
#[must_use]
pub fn scale_for_draft(value: i32, scale: f64) -> i32 {
    if value <= 0 {
        return value;
    }
    round_f64_to_i32(f64::from(value) * scale).clamp(DRAFT_RATING_FLOOR, RATING_MAX)
}
