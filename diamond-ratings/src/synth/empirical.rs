//! Empirical strategy: ratings are percentile draws from historical pools,
//! shaped by the archetype's bands and repaired by its constraints.
use rand::Rng;
use rand::seq::SliceRandom;
use smallvec::SmallVec;

use crate::archetypes::{Archetype, PitchProfileConfig, PitcherTemplate};
use crate::attributes::{AttributeKey, PITCH_KEYS};
use crate::constants::{
    DEFAULT_SAMPLE_JITTER, EYE_JITTER, FASTBALL_ARM_GAP_MAX, PITCHER_CONTROL_FLOOR,
    PITCHER_MOVEMENT_FLOOR, PITCHER_VL_LEFTY_SHIFT, PITCHER_VL_RIGHTY_SHIFT, PLATOON_FLOOR,
    PLATOON_SHIFT, PRIMARY_PITCH_FALLBACK, RATING_MAX, RELIEVER_PITCH_COUNT,
    SECONDARY_PITCH_FALLBACK, STARTER_PITCH_COUNT,
};
use crate::numbers::clamp_rating;
use crate::positions::{Hand, Role, SubRole};
use crate::rng::GenerationRng;

use super::repair::{Ratings, apply_constraints, apply_tail_boost, derive_eye};
use super::{HitterSlot, PitcherSlot, RatedPlayer, RatingContext, RatingStrategy, StrategyId};

/// Percentile sampler over the shared repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmpiricalStrategy;

const HITTER_SAMPLED_KEYS: [AttributeKey; 10] = [
    AttributeKey::Ch,
    AttributeKey::Ph,
    AttributeKey::Sp,
    AttributeKey::Pl,
    AttributeKey::Gf,
    AttributeKey::Sc,
    AttributeKey::Eye,
    AttributeKey::Fa,
    AttributeKey::Arm,
    AttributeKey::Vl,
];

const PITCHER_SAMPLED_KEYS: [AttributeKey; 8] = [
    AttributeKey::Arm,
    AttributeKey::Control,
    AttributeKey::Movement,
    AttributeKey::Endurance,
    AttributeKey::HoldRunner,
    AttributeKey::Gf,
    AttributeKey::Fa,
    AttributeKey::Vl,
];

/// Batting side shifts the vs-lefty rating: lefties lose ground, righties gain.
fn platoon_vs_lefty(value: i32, bats: Hand) -> i32 {
    match bats {
        Hand::Left => (value - PLATOON_SHIFT).max(PLATOON_FLOOR),
        Hand::Right => (value + PLATOON_SHIFT).min(RATING_MAX),
        Hand::Switch => value,
    }
}

fn pitcher_vs_lefty(value: i32, throws: Hand) -> i32 {
    match throws {
        Hand::Left => (value + PITCHER_VL_LEFTY_SHIFT).min(RATING_MAX),
        Hand::Right | Hand::Switch => (value - PITCHER_VL_RIGHTY_SHIFT).max(PLATOON_FLOOR),
    }
}

/// Which pitches a pitcher throws: fastball, signature floors, then the
/// profile's primary list, secondary list, and finally anything left.
fn select_pitches<R: Rng + ?Sized>(
    template: &PitcherTemplate,
    profile: &PitchProfileConfig,
    rng: &mut R,
) -> SmallVec<[AttributeKey; 5]> {
    let (low, high) = match template.role {
        SubRole::Starter => STARTER_PITCH_COUNT,
        SubRole::Reliever => RELIEVER_PITCH_COUNT,
    };
    let count = rng.gen_range(low..=high);
    let mut selected: SmallVec<[AttributeKey; 5]> = SmallVec::new();
    selected.push(AttributeKey::Fb);
    for pitch in template.pitch_floors.keys() {
        if !selected.contains(pitch) {
            selected.push(*pitch);
        }
    }
    while selected.len() < count {
        let open = |list: &[AttributeKey]| -> Vec<AttributeKey> {
            list.iter()
                .copied()
                .filter(|pitch| !selected.contains(pitch))
                .collect()
        };
        let mut candidates = open(&profile.primary);
        if candidates.is_empty() {
            candidates = open(&profile.secondary);
        }
        if candidates.is_empty() {
            candidates = open(&PITCH_KEYS);
        }
        let Some(pick) = candidates.choose(rng).copied() else {
            break;
        };
        selected.push(pick);
    }
    selected
}

impl RatingStrategy for EmpiricalStrategy {
    fn id(&self) -> StrategyId {
        StrategyId::Normalized
    }

    fn rate_hitter(
        &self,
        ctx: &RatingContext<'_>,
        slot: &HitterSlot,
        rng: &mut GenerationRng,
    ) -> RatedPlayer {
        let chosen = ctx
            .catalog
            .choose_hitter(Some(slot.position), slot.pin, rng.profile());
        let archetype = Archetype::Hitter(chosen);
        let stream = rng.ratings();

        let mut ratings = Ratings::new();
        let mut eye_raw = None;
        for key in HITTER_SAMPLED_KEYS {
            let value = ctx.sample(key, archetype, None, Some(slot.position), stream);
            if key == AttributeKey::Eye {
                eye_raw = Some(value);
            } else {
                ratings.insert(key, value);
            }
        }
        if let Some(vl) = ratings.get_mut(&AttributeKey::Vl) {
            *vl = platoon_vs_lefty(*vl, slot.bats);
        }

        apply_constraints(&mut ratings, ctx.catalog.constraints(archetype), stream);
        if let Some(boost) = &ctx.catalog.hitter(chosen).tail_boost {
            apply_tail_boost(&mut ratings, boost, stream);
        }

        let contact = ratings.get(&AttributeKey::Ch).copied().unwrap_or(0);
        let power = ratings.get(&AttributeKey::Ph).copied().unwrap_or(0);
        let eye = derive_eye(eye_raw, contact, power, EYE_JITTER, stream);
        ratings.insert(AttributeKey::Eye, eye);

        RatedPlayer {
            ratings,
            archetype: Some(archetype),
            role: None,
            preferred_role: None,
        }
    }

    fn rate_pitcher(
        &self,
        ctx: &RatingContext<'_>,
        slot: &PitcherSlot,
        rng: &mut GenerationRng,
    ) -> RatedPlayer {
        let chosen = ctx.catalog.choose_pitcher(slot.pin, rng.profile());
        let archetype = Archetype::Pitcher(chosen);
        let template = ctx.catalog.pitcher(chosen);
        let role = template.role;
        let stream = rng.ratings();

        let mut ratings = Ratings::new();
        for key in PITCHER_SAMPLED_KEYS {
            let value = ctx.sample(key, archetype, Some(role), None, stream);
            ratings.insert(key, value);
        }
        if let Some(vl) = ratings.get_mut(&AttributeKey::Vl) {
            *vl = pitcher_vs_lefty(*vl, slot.throws);
        }
        if let Some(control) = ratings.get_mut(&AttributeKey::Control) {
            *control = (*control).max(PITCHER_CONTROL_FLOOR);
        }
        if let Some(movement) = ratings.get_mut(&AttributeKey::Movement) {
            *movement = (*movement).max(PITCHER_MOVEMENT_FLOOR);
        }
        apply_constraints(&mut ratings, ctx.catalog.constraints(archetype), stream);

        let profile = ctx.catalog.pitch_profile(template.pitch_profile);
        let selected = select_pitches(template, profile, stream);
        let arm = ratings.get(&AttributeKey::Arm).copied().unwrap_or(0);
        for pitch in PITCH_KEYS {
            if !selected.contains(&pitch) {
                ratings.insert(pitch, 0);
                continue;
            }
            let pool = ctx
                .repository
                .pools_for(pitch, Some(Role::Pitcher), Some(role), None)
                .pool;
            let mut value = if pitch == AttributeKey::Fb {
                let sampled = pool.sample(profile.fastball_band, DEFAULT_SAMPLE_JITTER, arm, stream);
                sampled.max(arm - stream.gen_range(0..=FASTBALL_ARM_GAP_MAX))
            } else if profile.is_primary(pitch) {
                pool.sample(
                    profile.primary_band,
                    DEFAULT_SAMPLE_JITTER,
                    PRIMARY_PITCH_FALLBACK,
                    stream,
                )
            } else {
                pool.sample(
                    profile.secondary_band,
                    DEFAULT_SAMPLE_JITTER,
                    SECONDARY_PITCH_FALLBACK,
                    stream,
                )
            };
            if let Some(floor) = template.pitch_floors.get(&pitch) {
                value = value.max(*floor);
            }
            ratings.insert(pitch, clamp_rating(value));
        }

        RatedPlayer {
            ratings,
            archetype: Some(archetype),
            role: Some(role),
            preferred_role: template.preferred_role,
        }
    }
}
