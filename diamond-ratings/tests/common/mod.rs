#![allow(dead_code)]

use diamond_ratings::attributes::{HITTER_KEYS, PITCH_KEYS, PITCHER_KEYS};
use diamond_ratings::{AttributeKey, HistoricalRow, PitchingRole, Position, Repository};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

const ETHNICITIES: [&str; 3] = ["White", "Hispanic", "Black"];

/// Synthetic league: hitters at every position plus starters and relievers,
/// ratings spread roughly normally around 55.
pub fn league_rows(seed: u64, per_bucket: usize) -> Vec<HistoricalRow> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut rows = Vec::new();
    let mut serial = 0usize;
    let mut name = |row: HistoricalRow, serial: &mut usize| {
        *serial += 1;
        let ethnicity = ETHNICITIES[*serial % ETHNICITIES.len()];
        row.named(&format!("Given{serial}"), &format!("Family{serial}"), ethnicity)
    };

    for position in Position::FIELD.iter().skip(1) {
        for _ in 0..per_bucket {
            let mut row = HistoricalRow::hitter(*position);
            for key in HITTER_KEYS {
                row = row.with(key, rating(&mut rng));
            }
            rows.push(name(row, &mut serial));
        }
    }
    for role in [PitchingRole::Starter, PitchingRole::Closer, PitchingRole::Setup] {
        for _ in 0..per_bucket {
            let mut row = HistoricalRow::pitcher(Some(role));
            for key in PITCHER_KEYS {
                row = row.with(key, rating(&mut rng));
            }
            for key in PITCH_KEYS {
                let value = if rng.gen_bool(0.55) { rating(&mut rng) } else { 0 };
                row = row.with(key, value);
            }
            rows.push(name(row, &mut serial));
        }
    }
    rows
}

pub fn league(seed: u64) -> Repository {
    Repository::from_rows(&league_rows(seed, 80))
}

fn rating(rng: &mut ChaCha20Rng) -> i32 {
    let sum: i32 = (0..4).map(|_| rng.gen_range(5..=25)).sum();
    (sum - 5).clamp(10, 99)
}

pub fn in_rating_bounds(value: i32) -> bool {
    (10..=99).contains(&value)
}

pub const CORE_HITTER_KEYS: [AttributeKey; 6] = [
    AttributeKey::Ph,
    AttributeKey::Ch,
    AttributeKey::Sp,
    AttributeKey::Eye,
    AttributeKey::Fa,
    AttributeKey::Arm,
];
