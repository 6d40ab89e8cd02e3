//! Legacy pool-allocation strategy.
//!
//! A gaussian point budget is split across the core attributes by a
//! per-position weight table; situational ratings come from dice and the
//! repertoire from hand-and-delivery pitch weights. Historical pools are never
//! consulted, so this strategy behaves the same with or without data.
use rand::Rng;
use rand_distr::{Distribution, Normal};
use smallvec::SmallVec;

use crate::archetypes::{Archetype, PitcherArchetype};
use crate::attributes::{AttributeKey, PITCH_KEYS};
use crate::constants::{
    LEGACY_BUDGET_PER_ATTRIBUTE, LEGACY_BUDGET_SPREAD, LEGACY_CLOSER_FASTBALL_FLOOR,
    LEGACY_CLOSER_GF_FLOOR, LEGACY_CLOSER_SINKER_FLOOR, LEGACY_CLOSER_SLIDER_FLOOR,
    LEGACY_CORE_BOUNDS, LEGACY_ENDURANCE_DELTA_MAX, LEGACY_ENDURANCE_WOBBLE, LEGACY_EYE_JITTER,
    LEGACY_FASTBALL_BOUNDS, LEGACY_FIELDING_BOUNDS, LEGACY_FIELDING_MEAN, LEGACY_FIELDING_SPREAD,
    LEGACY_LEFTY_CONTROL_FLOOR, LEGACY_LEFTY_MOVEMENT_CAP, LEGACY_OUTLIER_BOUNDS,
    LEGACY_OUTLIER_CHANCE, LEGACY_PITCH_BOUNDS, LEGACY_PITCH_COUNT, PLATOON_SHIFT,
    STARTER_ENDURANCE_CUTOFF,
};
use crate::numbers::{clamp_rating, round_f64_to_i32, trunc_f64_to_i32, usize_to_f64};
use crate::positions::{Delivery, Hand, PitchingRole, Position};
use crate::rng::{GenerationRng, roll_dice, uniform_int, weighted_pick};

use super::repair::{Ratings, derive_eye};
use super::{HitterSlot, PitcherSlot, RatedPlayer, RatingContext, RatingStrategy, StrategyId};

/// Point-budget generator kept for saves and leagues tuned against it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyStrategy;

const HITTER_CORE_KEYS: [AttributeKey; 5] = [
    AttributeKey::Ch,
    AttributeKey::Ph,
    AttributeKey::Sp,
    AttributeKey::Fa,
    AttributeKey::Arm,
];

const PITCHER_CORE_KEYS: [AttributeKey; 5] = [
    AttributeKey::Endurance,
    AttributeKey::Control,
    AttributeKey::HoldRunner,
    AttributeKey::Movement,
    AttributeKey::Arm,
];

const PITCHER_RATING_WEIGHTS: [u32; 5] = [196, 206, 184, 184, 228];

/// Share of the budget each core hitter key receives, in `HITTER_CORE_KEYS` order.
const fn hitter_rating_weights(position: Position) -> [u32; 5] {
    match position {
        Position::Pitcher => [40, 107, 393, 557, 0],
        Position::Catcher => [189, 163, 166, 214, 269],
        Position::FirstBase | Position::DesignatedHitter => [213, 178, 163, 226, 221],
        Position::SecondBase => [200, 135, 206, 220, 239],
        Position::Shortstop => [187, 133, 199, 225, 256],
        Position::ThirdBase => [201, 162, 175, 221, 240],
        Position::LeftField => [195, 165, 202, 218, 220],
        Position::CenterField => [202, 144, 235, 206, 213],
        Position::RightField => [193, 175, 187, 212, 233],
    }
}

/// `(base, dice, faces)` rolls for situational ratings.
const GROUND_FLY_DICE: (i32, u32, i32) = (25, 10, 4);
const PULL_DICE: (i32, u32, i32) = (25, 5, 10);
const SCORING_DICE: (i32, u32, i32) = (35, 5, 5);

const fn hitter_vs_lefty_dice(bats: Hand) -> (i32, u32, i32) {
    match bats {
        Hand::Left => (15, 10, 6),
        Hand::Right => (20, 10, 6),
        Hand::Switch => (18, 10, 6),
    }
}

const fn pitcher_vs_lefty_dice(throws: Hand) -> (i32, u32, i32) {
    match throws {
        Hand::Left => (20, 10, 6),
        Hand::Right | Hand::Switch => (10, 10, 6),
    }
}

fn roll<R: Rng + ?Sized>((base, count, faces): (i32, u32, i32), rng: &mut R) -> i32 {
    clamp_rating(roll_dice(base, count, faces, rng))
}

/// Pitch selection weights by `(throws, delivery)`, in `PITCH_KEYS` order.
const fn pitch_weights(throws: Hand, delivery: Delivery) -> [u32; 7] {
    // fb, cu, cb, sl, si, scb, kn
    match (throws, delivery) {
        (Hand::Left, Delivery::Overhand) => [512, 168, 164, 138, 112, 13, 1],
        (Hand::Left, Delivery::Sidearm) => [512, 112, 138, 164, 168, 11, 1],
        (_, Delivery::Overhand) => [512, 168, 164, 138, 112, 1, 13],
        (_, Delivery::Sidearm) => [512, 112, 138, 164, 168, 1, 13],
    }
}

/// Split a point total across `weights`; the last key takes the remainder.
fn distribute_rating_points(total: i32, weights: &[u32]) -> Vec<i32> {
    let weight_sum: u32 = weights.iter().sum();
    if weight_sum == 0 || weights.is_empty() {
        return vec![0; weights.len()];
    }
    let mut assigned = 0;
    let mut points: Vec<i32> = weights
        .iter()
        .take(weights.len() - 1)
        .map(|weight| {
            let share = trunc_f64_to_i32(
                f64::from(total) * f64::from(*weight) / f64::from(weight_sum),
            );
            assigned += share;
            share
        })
        .collect();
    points.push(total - assigned);
    points
}

fn allocate<R: Rng + ?Sized>(keys: &[AttributeKey], weights: &[u32], rng: &mut R) -> Ratings {
    let count = usize_to_f64(keys.len());
    let mean = LEGACY_BUDGET_PER_ATTRIBUTE * count;
    let spread = LEGACY_BUDGET_SPREAD * count;
    let budget = Normal::new(mean, spread).map_or(mean, |dist| dist.sample(rng));
    let points = distribute_rating_points(round_f64_to_i32(budget), weights);
    keys.iter()
        .zip(points)
        .map(|(key, value)| {
            let value = if rng.gen_bool(LEGACY_OUTLIER_CHANCE) {
                uniform_int(LEGACY_OUTLIER_BOUNDS, rng)
            } else {
                value.clamp(LEGACY_CORE_BOUNDS.0, LEGACY_CORE_BOUNDS.1)
            };
            (*key, value)
        })
        .collect()
}

/// Mid-range endurance sometimes swings up to 20 points either way.
pub(crate) fn wobble_endurance<R: Rng + ?Sized>(endurance: i32, rng: &mut R) -> i32 {
    let (low, high) = LEGACY_ENDURANCE_WOBBLE;
    if !(low..=high).contains(&endurance) || !rng.gen_bool(0.5) {
        return endurance;
    }
    let delta = rng.gen_range(1..=LEGACY_ENDURANCE_DELTA_MAX);
    let swung = if rng.gen_bool(0.5) {
        endurance + delta
    } else {
        endurance - delta
    };
    clamp_rating(swung)
}

/// Weighted repertoire: a fastball plus one to four more pitches, drawn
/// without replacement. Unthrown pitches are returned as zero.
pub(crate) fn roll_repertoire<R: Rng + ?Sized>(
    throws: Hand,
    delivery: Delivery,
    rng: &mut R,
) -> Vec<(AttributeKey, i32)> {
    let count = rng.gen_range(LEGACY_PITCH_COUNT.0..=LEGACY_PITCH_COUNT.1);
    let mut options: Vec<(AttributeKey, u32)> = PITCH_KEYS
        .into_iter()
        .zip(pitch_weights(throws, delivery))
        .filter(|(key, _)| *key != AttributeKey::Fb)
        .collect();
    let mut thrown: SmallVec<[AttributeKey; 5]> = SmallVec::new();
    thrown.push(AttributeKey::Fb);
    while thrown.len() < count {
        let Some(pick) = weighted_pick(&options, rng) else {
            break;
        };
        thrown.push(pick);
        options.retain(|(key, _)| *key != pick);
    }
    PITCH_KEYS
        .into_iter()
        .map(|key| {
            let value = if !thrown.contains(&key) {
                0
            } else if key == AttributeKey::Fb {
                uniform_int(LEGACY_FASTBALL_BOUNDS, rng)
            } else {
                uniform_int(LEGACY_PITCH_BOUNDS, rng)
            };
            (key, value)
        })
        .collect()
}

fn raise(ratings: &mut Ratings, key: AttributeKey, floor: i32) {
    let value = ratings.entry(key).or_insert(0);
    *value = clamp_rating((*value).max(floor));
}

/// Closer shape: short stamina, a plus fastball, and two hard breaking pitches.
fn apply_closer_floors<R: Rng + ?Sized>(ratings: &mut Ratings, rng: &mut R) {
    if let Some(endurance) = ratings.get_mut(&AttributeKey::Endurance) {
        *endurance = (*endurance).min(STARTER_ENDURANCE_CUTOFF);
    }
    raise(ratings, AttributeKey::Fb, LEGACY_CLOSER_FASTBALL_FLOOR);
    let slider_floor = uniform_int(LEGACY_CLOSER_SLIDER_FLOOR, rng);
    raise(ratings, AttributeKey::Sl, slider_floor);
    raise(ratings, AttributeKey::Si, LEGACY_CLOSER_SINKER_FLOOR);
    raise(ratings, AttributeKey::Gf, LEGACY_CLOSER_GF_FLOOR);
}

impl RatingStrategy for LegacyStrategy {
    fn id(&self) -> StrategyId {
        StrategyId::Legacy
    }

    fn rate_hitter(
        &self,
        _ctx: &RatingContext<'_>,
        slot: &HitterSlot,
        rng: &mut GenerationRng,
    ) -> RatedPlayer {
        let stream = rng.ratings();
        let mut ratings = allocate(&HITTER_CORE_KEYS, &hitter_rating_weights(slot.position), stream);
        let contact = ratings.get(&AttributeKey::Ch).copied().unwrap_or(0);
        let power = ratings.get(&AttributeKey::Ph).copied().unwrap_or(0);
        let eye = derive_eye(None, contact, (contact + power) / 2, LEGACY_EYE_JITTER, stream);
        ratings.insert(AttributeKey::Eye, eye);
        ratings.insert(AttributeKey::Gf, roll(GROUND_FLY_DICE, stream));
        ratings.insert(AttributeKey::Pl, roll(PULL_DICE, stream));
        ratings.insert(AttributeKey::Sc, roll(SCORING_DICE, stream));
        ratings.insert(AttributeKey::Vl, roll(hitter_vs_lefty_dice(slot.bats), stream));
        for value in ratings.values_mut() {
            *value = clamp_rating(*value);
        }
        RatedPlayer {
            ratings,
            archetype: slot.pin.map(Archetype::Hitter),
            role: None,
            preferred_role: None,
        }
    }

    fn rate_pitcher(
        &self,
        _ctx: &RatingContext<'_>,
        slot: &PitcherSlot,
        rng: &mut GenerationRng,
    ) -> RatedPlayer {
        let stream = rng.ratings();
        let mut ratings = allocate(&PITCHER_CORE_KEYS, &PITCHER_RATING_WEIGHTS, stream);
        if let Some(endurance) = ratings.get_mut(&AttributeKey::Endurance) {
            *endurance = wobble_endurance(*endurance, stream);
        }
        if slot.throws == Hand::Left {
            if let Some(movement) = ratings.get_mut(&AttributeKey::Movement) {
                *movement = (*movement + PLATOON_SHIFT).min(LEGACY_LEFTY_MOVEMENT_CAP);
            }
            if let Some(control) = ratings.get_mut(&AttributeKey::Control) {
                *control = (*control - PLATOON_SHIFT).max(LEGACY_LEFTY_CONTROL_FLOOR);
            }
        }
        let fielding = Normal::new(LEGACY_FIELDING_MEAN, LEGACY_FIELDING_SPREAD)
            .map_or(LEGACY_FIELDING_MEAN, |dist| dist.sample(stream));
        ratings.insert(
            AttributeKey::Fa,
            round_f64_to_i32(fielding).clamp(LEGACY_FIELDING_BOUNDS.0, LEGACY_FIELDING_BOUNDS.1),
        );
        ratings.insert(AttributeKey::Gf, roll(GROUND_FLY_DICE, stream));
        ratings.insert(AttributeKey::Pl, roll(PULL_DICE, stream));
        ratings.insert(AttributeKey::Sc, roll(SCORING_DICE, stream));
        ratings.insert(AttributeKey::Vl, roll(pitcher_vs_lefty_dice(slot.throws), stream));
        ratings.extend(roll_repertoire(slot.throws, slot.delivery, stream));
        for (key, value) in &mut ratings {
            if !(key.is_pitch() && *value == 0) {
                *value = clamp_rating(*value);
            }
        }

        let closer = slot.pin == Some(PitcherArchetype::Closer);
        if closer {
            apply_closer_floors(&mut ratings, stream);
        }
        RatedPlayer {
            ratings,
            archetype: slot.pin.map(Archetype::Pitcher),
            role: None,
            preferred_role: closer.then_some(PitchingRole::Closer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetypes::{HitterArchetype, default_catalog};
    use crate::repository::Repository;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn points_split_with_remainder_on_last_key() {
        let points = distribute_rating_points(280, &[196, 206, 184, 184, 228]);
        assert_eq!(points.iter().sum::<i32>(), 280);
        assert_eq!(points, vec![54, 57, 51, 51, 67]);
        assert_eq!(distribute_rating_points(100, &[0, 0]), vec![0, 0]);
        assert!(distribute_rating_points(100, &[]).is_empty());
    }

    #[test]
    fn pitchers_at_p_get_no_arm_share() {
        assert_eq!(hitter_rating_weights(Position::Pitcher)[4], 0);
        assert_eq!(
            hitter_rating_weights(Position::DesignatedHitter),
            hitter_rating_weights(Position::FirstBase)
        );
    }

    #[test]
    fn repertoire_always_includes_fastball() {
        let mut rng = SmallRng::seed_from_u64(12);
        for _ in 0..300 {
            let pitches = roll_repertoire(Hand::Right, Delivery::Sidearm, &mut rng);
            assert_eq!(pitches.len(), PITCH_KEYS.len());
            let thrown: Vec<_> = pitches.iter().filter(|(_, value)| *value > 0).collect();
            assert!((2..=5).contains(&thrown.len()));
            let fastball = pitches[0];
            assert_eq!(fastball.0, AttributeKey::Fb);
            assert!((40..=99).contains(&fastball.1));
            for (_, value) in &thrown {
                assert!((20..=99).contains(value));
            }
        }
    }

    #[test]
    fn endurance_wobble_only_touches_mid_range() {
        let mut rng = SmallRng::seed_from_u64(2);
        for _ in 0..200 {
            assert_eq!(wobble_endurance(80, &mut rng), 80);
            assert_eq!(wobble_endurance(20, &mut rng), 20);
            let wobbled = wobble_endurance(50, &mut rng);
            assert!((30..=70).contains(&wobbled));
        }
    }

    #[test]
    fn legacy_hitters_stay_in_range() {
        let repo = Repository::empty();
        let ctx = RatingContext::new(&repo, default_catalog());
        let mut rng = GenerationRng::from_seed(5);
        for position in Position::FIELD {
            let slot = HitterSlot {
                position,
                bats: Hand::Switch,
                pin: Some(HitterArchetype::Gap),
            };
            let rated = LegacyStrategy.rate_hitter(&ctx, &slot, &mut rng);
            assert_eq!(rated.archetype, Some(Archetype::Hitter(HitterArchetype::Gap)));
            for key in [
                AttributeKey::Ch,
                AttributeKey::Ph,
                AttributeKey::Sp,
                AttributeKey::Eye,
                AttributeKey::Gf,
                AttributeKey::Pl,
                AttributeKey::Vl,
                AttributeKey::Sc,
                AttributeKey::Fa,
                AttributeKey::Arm,
            ] {
                let value = rated.ratings[&key];
                assert!((10..=99).contains(&value), "{position} {key} {value}");
            }
        }
    }

    #[test]
    fn legacy_closer_pin_sets_floors() {
        let repo = Repository::empty();
        let ctx = RatingContext::new(&repo, default_catalog());
        let mut rng = GenerationRng::from_seed(7);
        for _ in 0..50 {
            let slot = PitcherSlot {
                throws: Hand::Left,
                delivery: Delivery::Overhand,
                pin: Some(PitcherArchetype::Closer),
            };
            let rated = LegacyStrategy.rate_pitcher(&ctx, &slot, &mut rng);
            assert_eq!(rated.preferred_role, Some(PitchingRole::Closer));
            assert!(rated.ratings[&AttributeKey::Endurance] <= 55);
            assert!(rated.ratings[&AttributeKey::Fb] >= 85);
            assert!(rated.ratings[&AttributeKey::Sl] >= 65);
            assert!(rated.ratings[&AttributeKey::Si] >= 60);
            assert!(rated.ratings[&AttributeKey::Gf] >= 55);
            assert!(rated.ratings[&AttributeKey::Control] >= 50);
            let fa = rated.ratings[&AttributeKey::Fa];
            assert!((40..=74).contains(&fa));
        }
    }
}
