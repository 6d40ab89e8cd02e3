//! Draft pool assembly: a shuffled mix of hitters and pitchers with a closer quota.
use rand::seq::SliceRandom;
use std::collections::BTreeSet;

use crate::archetypes::{Archetype, PitcherArchetype};
use crate::constants::{DRAFT_CLOSER_RATE, DRAFT_PITCHER_RATE};
use crate::identity::NameRegistry;
use crate::numbers::{round_f64_to_index, usize_to_f64};
use crate::record::PlayerRecord;
use crate::rng::GenerationRng;
use crate::synth::{GenerationRequest, Synthesizer};

/// Pitcher slots in a pool of `size`: 40% rounded, at least one, at most all.
#[must_use]
pub fn pitcher_slots(size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    round_f64_to_index(usize_to_f64(size) * DRAFT_PITCHER_RATE, size).max(1)
}

/// Closers among `pitchers` slots: 18% rounded, at least one when any pitcher exists.
#[must_use]
pub fn closer_quota(pitchers: usize) -> usize {
    if pitchers == 0 {
        return 0;
    }
    round_f64_to_index(usize_to_f64(pitchers) * DRAFT_CLOSER_RATE, pitchers).max(1)
}

/// Generate `size` draft prospects.
///
/// Pins in `base` apply to every player of the matching role except the
/// closer-quota picks, which are always pinned to the closer archetype.
/// Position and pitcher flags in `base` are ignored; every prospect is
/// generated with draft scaling.
pub fn generate_draft_pool(
    synth: &Synthesizer<'_>,
    size: usize,
    base: &GenerationRequest,
    names: &mut NameRegistry,
    rng: &mut GenerationRng,
) -> Vec<PlayerRecord> {
    let pitchers = pitcher_slots(size);
    let mut slots: Vec<bool> = (0..size).map(|idx| idx < pitchers).collect();
    slots.shuffle(rng.profile());

    let pitcher_indices: Vec<usize> = slots
        .iter()
        .enumerate()
        .filter_map(|(idx, is_pitcher)| is_pitcher.then_some(idx))
        .collect();
    let closers: BTreeSet<usize> = pitcher_indices
        .choose_multiple(rng.profile(), closer_quota(pitchers))
        .copied()
        .collect();

    slots
        .iter()
        .enumerate()
        .map(|(idx, is_pitcher)| {
            let mut request = GenerationRequest {
                is_pitcher: *is_pitcher,
                for_draft: true,
                position: None,
                ..*base
            };
            if closers.contains(&idx) {
                request = request.pinned(Archetype::Pitcher(PitcherArchetype::Closer));
            }
            synth.generate(&request, names, rng)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetypes::{HitterArchetype, default_catalog};
    use crate::positions::PitchingRole;
    use crate::repository::Repository;
    use crate::synth::EmpiricalStrategy;

    #[test]
    fn slot_math_rounds_with_minimums() {
        assert_eq!(pitcher_slots(0), 0);
        assert_eq!(pitcher_slots(1), 1);
        assert_eq!(pitcher_slots(2), 1);
        assert_eq!(pitcher_slots(10), 4);
        assert_eq!(pitcher_slots(100), 40);
        assert_eq!(closer_quota(0), 0);
        assert_eq!(closer_quota(1), 1);
        assert_eq!(closer_quota(4), 1);
        assert_eq!(closer_quota(40), 7);
    }

    #[test]
    fn pool_mixes_roles_and_pins_closers() {
        let repo = Repository::empty();
        let synth = Synthesizer::new(&repo, default_catalog(), &EmpiricalStrategy);
        let mut names = NameRegistry::default();
        let mut rng = GenerationRng::from_seed(2024);
        let base = GenerationRequest::hitter().pinned(Archetype::Hitter(HitterArchetype::Gap));
        let pool = generate_draft_pool(&synth, 50, &base, &mut names, &mut rng);
        assert_eq!(pool.len(), 50);
        let pitchers: Vec<_> = pool.iter().filter(|record| record.is_pitcher).collect();
        assert_eq!(pitchers.len(), 20);
        let closers = pitchers
            .iter()
            .filter(|record| record.pitcher_archetype == Some(PitcherArchetype::Closer))
            .count();
        assert!(closers >= 4);
        assert!(
            pitchers
                .iter()
                .filter(|record| record.pitcher_archetype == Some(PitcherArchetype::Closer))
                .all(|record| record.preferred_pitching_role == Some(PitchingRole::Closer))
        );
        for record in pool.iter().filter(|record| !record.is_pitcher) {
            assert_eq!(record.hitter_archetype, Some(HitterArchetype::Gap));
            assert!((17..=23).contains(&record.age));
        }
    }

    #[test]
    fn empty_pool_is_empty() {
        let repo = Repository::empty();
        let synth = Synthesizer::new(&repo, default_catalog(), &EmpiricalStrategy);
        let mut names = NameRegistry::default();
        let mut rng = GenerationRng::from_seed(1);
        let pool = generate_draft_pool(&synth, 0, &GenerationRequest::default(), &mut names, &mut rng);
        assert!(pool.is_empty());
    }
}
