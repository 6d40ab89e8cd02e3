//! Display normalization: raw stored ratings to calibrated, human-facing values.
//!
//! The normalizer resolves pools through the same fallback chain generation
//! uses, so a rating drawn near some percentile reads back near it. Nothing
//! here mutates a record.
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::attributes::AttributeKey;
use crate::constants::{
    CURVE_K_DEFAULT, DISPLAY_MAX_DEFAULT, DISPLAY_MIN_DEFAULT, STAR_TIERS, TOP_PERCENT_MAX,
    TOP_PERCENT_MIN,
};
use crate::numbers::{round_f64_to_i32, trunc_f64_to_i32};
use crate::percentile::{Curve, reshape};
use crate::positions::{Position, Role, SubRole};
use crate::record::PlayerRecord;
use crate::repository::Repository;
use crate::source::HistoricalRow;

/// Output representation for a displayed rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    Raw,
    #[default]
    Scale99,
    Stars,
}

impl DisplayMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Scale99 => "scale_99",
            Self::Stars => "stars",
        }
    }

    /// Parse a mode selector. Empty input means the default.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "raw" | "backend" | "normalized" => Some(Self::Raw),
            "" | "99" | "0-99" | "scale_99" | "display_99" | "percentile" | "percentile_99" => {
                Some(Self::Scale99)
            }
            "stars" | "star" | "asterisks" | "asterisk" => Some(Self::Stars),
            _ => None,
        }
    }

    /// Parse a mode selector, warning and using `scale_99` when unknown.
    #[must_use]
    pub fn resolve(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_else(|| {
            warn!("unknown rating display mode {raw:?}; using scale_99");
            Self::Scale99
        })
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display knobs: mode, output range, and reshaping curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub mode: DisplayMode,
    pub min: i32,
    pub max: i32,
    pub curve: Curve,
    pub k: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::default(),
            min: DISPLAY_MIN_DEFAULT,
            max: DISPLAY_MAX_DEFAULT,
            curve: Curve::default(),
            k: CURVE_K_DEFAULT,
        }
    }
}

impl DisplayConfig {
    #[must_use]
    pub const fn with_mode(mut self, mode: DisplayMode) -> Self {
        self.mode = mode;
        self
    }

    /// Output range with reversed bounds swapped.
    #[must_use]
    pub const fn range(&self) -> (i32, i32) {
        if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        }
    }
}

/// Displayed form of a rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayValue {
    Number(i32),
    Stars(String),
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Stars(stars) => f.write_str(stars),
        }
    }
}

/// Read-only view of one raw rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRating {
    pub value: DisplayValue,
    /// `N` in "top N%", when a pool percentile was available.
    pub top_percent: Option<i32>,
    pub bucket_average: Option<f64>,
    pub bucket: Option<String>,
}

impl DisplayRating {
    fn passthrough(value: i32) -> Self {
        Self {
            value: DisplayValue::Number(value),
            top_percent: None,
            bucket_average: None,
            bucket: None,
        }
    }

    /// Short label such as `72 (top 18%)`.
    #[must_use]
    pub fn text(&self) -> String {
        match self.top_percent {
            Some(top) => format!("{} (top {top}%)", self.value),
            None => self.value.to_string(),
        }
    }
}

/// Who a rating belongs to, as far as pool resolution cares.
///
/// Records, historical rows, and bare parameters are all converted into this
/// one shape before any lookup happens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplaySubject {
    /// `None` resolves against the global pool.
    pub is_pitcher: Option<bool>,
    pub position: Option<Position>,
    pub sub_role: Option<SubRole>,
}

impl DisplaySubject {
    #[must_use]
    pub const fn new(is_pitcher: Option<bool>, position: Option<Position>) -> Self {
        Self {
            is_pitcher,
            position,
            sub_role: None,
        }
    }
}

impl From<&PlayerRecord> for DisplaySubject {
    fn from(record: &PlayerRecord) -> Self {
        Self {
            is_pitcher: Some(record.is_pitcher),
            position: Some(record.primary_position),
            sub_role: if record.is_pitcher { record.role } else { None },
        }
    }
}

impl From<&HistoricalRow> for DisplaySubject {
    fn from(row: &HistoricalRow) -> Self {
        Self::new(Some(row.is_pitcher), row.primary_position)
    }
}

/// Percentile-based display over a shared repository.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    repository: &'a Repository,
}

impl<'a> Normalizer<'a> {
    #[must_use]
    pub const fn new(repository: &'a Repository) -> Self {
        Self { repository }
    }

    /// Display a rating given a free-form attribute label.
    ///
    /// Labels that do not name a known attribute pass the rounded value
    /// straight through.
    #[must_use]
    pub fn display_label(
        &self,
        value: f64,
        label: &str,
        subject: DisplaySubject,
        config: &DisplayConfig,
    ) -> DisplayRating {
        match AttributeKey::normalize(label) {
            Some(key) => self.display(value, key, subject, config),
            None => DisplayRating::passthrough(round_f64_to_i32(value)),
        }
    }

    /// Display one stored rating of `record`.
    #[must_use]
    pub fn display_record(
        &self,
        record: &PlayerRecord,
        key: AttributeKey,
        config: &DisplayConfig,
    ) -> DisplayRating {
        let value = if key == AttributeKey::Durability {
            record.durability()
        } else {
            record.rating(key)
        };
        self.display(f64::from(value), key, DisplaySubject::from(record), config)
    }

    /// Map a raw rating into the configured display mode.
    #[must_use]
    pub fn display(
        &self,
        value: f64,
        key: AttributeKey,
        subject: DisplaySubject,
        config: &DisplayConfig,
    ) -> DisplayRating {
        if key.is_pitch() && (value <= 0.0 || value.is_nan()) {
            return DisplayRating::passthrough(0);
        }
        let raw = round_f64_to_i32(value);
        if config.mode == DisplayMode::Raw {
            return DisplayRating::passthrough(raw);
        }

        let role = subject.is_pitcher.map(Role::from_is_pitcher);
        let position = match role {
            Some(Role::Hitter) => subject.position,
            _ => None,
        };
        let lookup = self
            .repository
            .pools_for(key, role, subject.sub_role, position);
        let bucket = lookup.bucket.map(|bucket| bucket.label().to_string());
        let bucket_average = lookup.pool.mean();
        let Some(pct) = lookup.pool.percentile_of(value) else {
            return DisplayRating {
                value: DisplayValue::Number(raw),
                top_percent: None,
                bucket_average,
                bucket,
            };
        };
        let top_percent = Some(top_percent(pct));

        let shown = match config.mode {
            DisplayMode::Stars => DisplayValue::Stars("*".repeat(star_count(pct))),
            DisplayMode::Scale99 | DisplayMode::Raw => {
                let adjusted = reshape(pct, config.curve, config.k);
                DisplayValue::Number(scale_into(adjusted, config.range()))
            }
        };
        DisplayRating {
            value: shown,
            top_percent,
            bucket_average,
            bucket,
        }
    }
}

/// `N` in "top N%", clamped to `[1, 99]`.
#[must_use]
pub fn top_percent(pct: f64) -> i32 {
    round_f64_to_i32((1.0 - pct) * 100.0).clamp(TOP_PERCENT_MIN, TOP_PERCENT_MAX)
}

/// Star tier for a percentile, one through five.
#[must_use]
pub fn star_count(pct: f64) -> usize {
    let tiers = i32::from(STAR_TIERS);
    let stars = (trunc_f64_to_i32(pct * f64::from(tiers)) + 1).clamp(1, tiers);
    usize::try_from(stars).unwrap_or(1)
}

fn scale_into(pct: f64, (min, max): (i32, i32)) -> i32 {
    let span = f64::from((max - min).max(1));
    round_f64_to_i32(f64::from(min) + pct * span).clamp(min, max)
}
