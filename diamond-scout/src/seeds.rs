use anyhow::{Result, bail};
use diamond_ratings::GenerationRng;
use std::collections::HashSet;

const DEFAULT_SEED: u64 = 1337;

/// One seed to generate a roster from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedInfo {
    pub seed: u64,
    /// Drawn from entropy rather than given on the command line.
    pub random: bool,
}

impl SeedInfo {
    #[must_use]
    pub const fn from_numeric(seed: u64) -> Self {
        Self {
            seed,
            random: false,
        }
    }

    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            seed: GenerationRng::from_entropy().seed(),
            random: true,
        }
    }

    #[must_use]
    pub fn rng(self) -> GenerationRng {
        GenerationRng::from_seed(self.seed)
    }
}

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Resolve CLI seed tokens.
///
/// Accepts integers (negative values use their magnitude) and the keyword
/// `random`, which draws a fresh seed each time it appears. Repeated numeric
/// seeds collapse to their first occurrence; no tokens means the default seed.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<SeedInfo>> {
    let mut seeds = Vec::new();
    let mut seen = HashSet::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }
        let info = if token.eq_ignore_ascii_case("random") {
            SeedInfo::from_entropy()
        } else if let Ok(value) = token.parse::<i64>() {
            SeedInfo::from_numeric(value.unsigned_abs())
        } else if let Ok(value) = token.parse::<u64>() {
            SeedInfo::from_numeric(value)
        } else {
            bail!("Unrecognized seed token: {token}");
        };
        if seen.insert(info.seed) {
            seeds.push(info);
        }
    }

    if seeds.is_empty() {
        seeds.push(SeedInfo::from_numeric(DEFAULT_SEED));
    }
    Ok(seeds)
}
