//! Post-sampling repair: archetype constraints, tail boosts, and derived eye.
use log::debug;
use rand::Rng;
use std::collections::BTreeMap;

use crate::archetypes::{Constraint, TailBoost};
use crate::attributes::AttributeKey;
use crate::constants::{EYE_BAT_WEIGHT, EYE_CONTACT_SHARE, EYE_SAMPLE_WEIGHT, RATING_MAX};
use crate::numbers::{clamp_rating, round_to_rating};
use crate::rng::uniform_int;

/// Working set of ratings for one player while it is being assembled.
pub type Ratings = BTreeMap<AttributeKey, i32>;

/// Apply one repair rule in place.
///
/// Rules naming an attribute that was never sampled are skipped.
pub fn apply_constraint<R: Rng + ?Sized>(ratings: &mut Ratings, rule: &Constraint, rng: &mut R) {
    match *rule {
        Constraint::Leads {
            lead,
            trail,
            margin,
            nudge,
        } => {
            let (Some(lead_value), Some(trail_value)) =
                (ratings.get(&lead).copied(), ratings.get(&trail).copied())
            else {
                debug!("skipping leads rule {lead}>{trail}: attribute not sampled");
                return;
            };
            if lead_value >= trail_value.saturating_add(margin) {
                return;
            }
            let target = trail_value.saturating_add(uniform_int(nudge, rng).max(margin));
            if target > RATING_MAX {
                ratings.insert(lead, RATING_MAX);
                ratings.insert(trail, clamp_rating(trail_value.min(RATING_MAX - margin)));
            } else {
                ratings.insert(lead, clamp_rating(target));
            }
        }
        Constraint::Converge {
            left,
            right,
            max_gap,
            spread,
        } => {
            let (Some(left_value), Some(right_value)) =
                (ratings.get(&left).copied(), ratings.get(&right).copied())
            else {
                debug!("skipping converge rule {left}~{right}: attribute not sampled");
                return;
            };
            if (left_value - right_value).abs() <= max_gap {
                return;
            }
            let mid = f64::midpoint(f64::from(left_value), f64::from(right_value));
            let spread = spread.abs();
            for key in [left, right] {
                let offset = uniform_int((-spread, spread), rng);
                ratings.insert(key, round_to_rating(mid + f64::from(offset)));
            }
        }
        Constraint::Floor { attribute, min } => {
            if let Some(value) = ratings.get_mut(&attribute) {
                *value = clamp_rating((*value).max(min));
            }
        }
        Constraint::Ceiling { attribute, max } => {
            if let Some(value) = ratings.get_mut(&attribute) {
                *value = clamp_rating((*value).min(max));
            }
        }
    }
}

/// Apply every rule in order.
pub fn apply_constraints<R: Rng + ?Sized>(
    ratings: &mut Ratings,
    rules: &[Constraint],
    rng: &mut R,
) {
    for rule in rules {
        apply_constraint(ratings, rule, rng);
    }
}

/// Roll the archetype's rare outlier bonus. Returns whether it fired.
///
/// Each bump draws once and lifts all of its attributes by the same amount,
/// capped at 99.
pub fn apply_tail_boost<R: Rng + ?Sized>(
    ratings: &mut Ratings,
    boost: &TailBoost,
    rng: &mut R,
) -> bool {
    if boost.chance <= 0.0 || rng.r#gen::<f64>() >= boost.chance {
        return false;
    }
    for bump in &boost.bumps {
        let delta = uniform_int(bump.range, rng);
        for key in &bump.attributes {
            if let Some(value) = ratings.get_mut(key) {
                *value = clamp_rating(value.saturating_add(delta).min(RATING_MAX));
            }
        }
    }
    true
}

/// Eye rating blended from a sampled value (when present) and the bat.
///
/// The bat component weighs contact 60/40 against power. With a sample the
/// result leans 70/30 toward it; without one the bat stands alone.
pub fn derive_eye<R: Rng + ?Sized>(
    sampled: Option<i32>,
    contact: i32,
    power: i32,
    jitter: f64,
    rng: &mut R,
) -> i32 {
    let bat = f64::from(contact).mul_add(
        EYE_CONTACT_SHARE,
        f64::from(power) * (1.0 - EYE_CONTACT_SHARE),
    );
    let base = sampled.map_or(bat, |eye| {
        f64::from(eye).mul_add(EYE_SAMPLE_WEIGHT, bat * EYE_BAT_WEIGHT)
    });
    let noise = if jitter > 0.0 && jitter.is_finite() {
        rng.gen_range(-jitter..=jitter)
    } else {
        0.0
    };
    round_to_rating(base + noise)
}
