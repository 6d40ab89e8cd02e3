//! Engine configuration gathered from the environment or set explicitly.
//!
//! Every knob degrades to its default on bad input; nothing here fails.
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::archetypes::{HitterArchetype, PitcherArchetype, resolve_hitter_pin, resolve_pitcher_pin};
use crate::constants::{
    ENV_DATA_DIR, ENV_DISPLAY_MAX, ENV_DISPLAY_MIN, ENV_HITTER_ARCHETYPE, ENV_PITCHER_ARCHETYPE,
    ENV_RATING_CURVE, ENV_RATING_CURVE_K, ENV_RATING_DISPLAY, ENV_RATING_PROFILE, ENV_SEED,
};
use crate::display::{DisplayConfig, DisplayMode};
use crate::percentile::Curve;
use crate::source::CsvSource;
use crate::synth::StrategyId;

/// Every tunable the engine reads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub strategy: StrategyId,
    pub display: DisplayConfig,
    pub hitter_archetype: Option<HitterArchetype>,
    pub pitcher_archetype: Option<PitcherArchetype>,
    /// Explicit seed; `None` draws one from entropy.
    pub seed: Option<u64>,
    /// Directory holding `data/players*.csv`; defaults to the working directory.
    pub data_dir: Option<PathBuf>,
}

impl EngineConfig {
    /// Read configuration from process environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary lookup, e.g. a map in tests.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut cfg = Self::default();

        if let Some(raw) = get(ENV_RATING_PROFILE) {
            cfg.strategy = StrategyId::resolve(&raw);
        }
        if let Some(raw) = get(ENV_RATING_DISPLAY) {
            cfg.display.mode = DisplayMode::resolve(&raw);
        }
        if let Some(min) = get(ENV_DISPLAY_MIN).and_then(|raw| parse_or_warn(ENV_DISPLAY_MIN, &raw)) {
            cfg.display.min = min;
        }
        if let Some(max) = get(ENV_DISPLAY_MAX).and_then(|raw| parse_or_warn(ENV_DISPLAY_MAX, &raw)) {
            cfg.display.max = max;
        }
        if let Some(raw) = get(ENV_RATING_CURVE) {
            match Curve::parse(&raw) {
                Some(curve) => cfg.display.curve = curve,
                None => warn!("ignoring {ENV_RATING_CURVE}={raw:?}; expected on/off or logistic/linear"),
            }
        }
        if let Some(k) = get(ENV_RATING_CURVE_K).and_then(|raw| parse_or_warn::<f64>(ENV_RATING_CURVE_K, &raw)) {
            if k.is_finite() && k > 0.0 {
                cfg.display.k = k;
            } else {
                warn!("ignoring {ENV_RATING_CURVE_K}={k}; steepness must be positive");
            }
        }
        cfg.hitter_archetype = resolve_hitter_pin(get(ENV_HITTER_ARCHETYPE).as_deref());
        cfg.pitcher_archetype = resolve_pitcher_pin(get(ENV_PITCHER_ARCHETYPE).as_deref());
        cfg.seed = get(ENV_SEED).and_then(|raw| parse_or_warn(ENV_SEED, &raw));
        cfg.data_dir = get(ENV_DATA_DIR).map(PathBuf::from);
        cfg
    }

    /// Historical CSV source rooted at the configured data directory.
    #[must_use]
    pub fn csv_source(&self) -> CsvSource {
        CsvSource::in_dir(self.data_dir.as_deref().unwrap_or_else(|| Path::new(".")))
    }
}

fn parse_or_warn<T: FromStr>(name: &str, raw: &str) -> Option<T> {
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        warn!("ignoring {name}={raw:?}; using the default");
    }
    parsed
}
