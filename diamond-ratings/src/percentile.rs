//! Bidirectional mapping between raw ratings and percentile rank in a sorted pool.
//!
//! Generation walks percentile -> value with [`sample_from_band`]; display walks
//! value -> percentile with [`percentile_of`]. Both index the pool the same way
//! so a value sampled near percentile `p` reads back near `p`.
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::numbers::{round_f64_to_index, round_to_rating, usize_to_f64};

/// Inclusive percentile interval used when sampling an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Band {
    low: f64,
    high: f64,
}

impl Band {
    /// Build a band, swapping reversed bounds and clamping both into `[0, 1]`.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self {
            low: clamp_unit(low),
            high: clamp_unit(high),
        }
    }

    /// Band whose bounds are already ordered and inside `[0, 1]`.
    pub(crate) const fn fixed(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    #[must_use]
    pub const fn low(&self) -> f64 {
        self.low
    }

    #[must_use]
    pub const fn high(&self) -> f64 {
        self.high
    }

    /// Whether both bounds already lie inside `[0, 1]`.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        (0.0..=1.0).contains(&self.low) && (0.0..=1.0).contains(&self.high)
    }

    #[must_use]
    pub fn midpoint(&self) -> f64 {
        f64::midpoint(self.low, self.high)
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let (low, high) = (clamp_unit(self.low), clamp_unit(self.high));
        if high > low { rng.gen_range(low..=high) } else { low }
    }
}

impl From<(f64, f64)> for Band {
    /// Swaps reversed bounds but keeps their values, so catalog validation can
    /// still reject a band that strays outside `[0, 1]`.
    fn from((a, b): (f64, f64)) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self { low, high }
    }
}

impl From<Band> for (f64, f64) {
    fn from(band: Band) -> Self {
        (band.low, band.high)
    }
}

/// Display re-shaping curve applied to a percentile before rescaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Curve {
    #[default]
    Linear,
    Logistic,
}

impl Curve {
    /// Parse a toggle value such as `logistic`, `on`, `linear`, or `off`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "logistic" | "sigmoid" | "s" | "on" | "true" | "1" | "yes" => Some(Self::Logistic),
            "linear" | "none" | "off" | "false" | "0" | "no" | "" => Some(Self::Linear),
            _ => None,
        }
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

/// Percentile rank of `value` within an ascending pool.
///
/// Uses the insertion point of `value` (first index whose sample is not less
/// than it) divided by `len - 1`. A single-sample pool reports `1.0`, an empty
/// pool reports `None`.
#[must_use]
pub fn percentile_of(pool: &[i32], value: f64) -> Option<f64> {
    if pool.is_empty() {
        return None;
    }
    if pool.len() == 1 {
        return Some(1.0);
    }
    let last = pool.len() - 1;
    let idx = pool.partition_point(|sample| f64::from(*sample) < value);
    if idx == 0 {
        return Some(0.0);
    }
    if idx >= last {
        return Some(1.0);
    }
    Some(usize_to_f64(idx) / usize_to_f64(last))
}

/// Sample at percentile `pct` using nearest-index lookup.
#[must_use]
pub fn value_at_percentile(pool: &[i32], pct: f64) -> Option<i32> {
    if pool.is_empty() {
        return None;
    }
    let last = pool.len() - 1;
    let idx = round_f64_to_index(clamp_unit(pct) * usize_to_f64(last), last);
    pool.get(idx).copied()
}

/// Draw a rating from `pool` within `band`, add symmetric jitter, and clamp to `[10, 99]`.
///
/// An empty pool substitutes `fallback` for the pool lookup so generation keeps
/// working without historical data.
pub fn sample_from_band<R: Rng + ?Sized>(
    pool: &[i32],
    band: Band,
    jitter: f64,
    fallback: i32,
    rng: &mut R,
) -> i32 {
    let base = if pool.is_empty() {
        f64::from(fallback)
    } else {
        let pct = band.draw(rng);
        f64::from(value_at_percentile(pool, pct).unwrap_or(fallback))
    };
    let noise = if jitter > 0.0 && jitter.is_finite() {
        rng.gen_range(-jitter..=jitter)
    } else {
        0.0
    };
    round_to_rating(base + noise)
}

/// Apply a display curve to a percentile.
///
/// The logistic curve is rescaled by its own endpoints so `0.0` and `1.0` map
/// to themselves exactly. Non-positive or non-finite steepness leaves the
/// percentile untouched.
#[must_use]
pub fn reshape(pct: f64, curve: Curve, k: f64) -> f64 {
    let pct = clamp_unit(pct);
    match curve {
        Curve::Linear => pct,
        Curve::Logistic => {
            if k <= 0.0 || !k.is_finite() {
                return pct;
            }
            let logistic = |x: f64| 1.0 / (1.0 + (-k * (x - 0.5)).exp());
            let min_val = logistic(0.0);
            let max_val = logistic(1.0);
            if (max_val - min_val).abs() < f64::EPSILON {
                return pct;
            }
            clamp_unit((logistic(pct) - min_val) / (max_val - min_val))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn pool() -> Vec<i32> {
        vec![20, 30, 40, 50, 60, 70, 80]
    }

    #[test]
    fn band_normalizes_bounds() {
        let band = Band::new(0.9, 0.2);
        assert!((band.low() - 0.2).abs() < f64::EPSILON);
        assert!((band.high() - 0.9).abs() < f64::EPSILON);
        let clamped = Band::new(-0.5, 1.5);
        assert!((clamped.low() - 0.0).abs() < f64::EPSILON);
        assert!((clamped.high() - 1.0).abs() < f64::EPSILON);
        let parsed: Band = serde_json::from_str("[0.8, 0.4]").unwrap();
        assert!((parsed.midpoint() - 0.6).abs() < 1e-9);
        assert!(parsed.is_unit());
        let loose: Band = serde_json::from_str("[0.2, 1.4]").unwrap();
        assert!(!loose.is_unit());
        assert!(clamped.is_unit());
    }

    #[test]
    fn percentile_edges() {
        assert_eq!(percentile_of(&[], 50.0), None);
        assert_eq!(percentile_of(&[55], 10.0), Some(1.0));
        let values = pool();
        assert_eq!(percentile_of(&values, 20.0), Some(0.0));
        assert_eq!(percentile_of(&values, 5.0), Some(0.0));
        assert_eq!(percentile_of(&values, 80.0), Some(1.0));
        assert_eq!(percentile_of(&values, 95.0), Some(1.0));
        assert_eq!(percentile_of(&values, 50.0), Some(0.5));
        assert_eq!(percentile_of(&values, 45.0), Some(0.5));
    }

    #[test]
    fn value_lookup_rounds_to_nearest_index() {
        let values = pool();
        assert_eq!(value_at_percentile(&values, 0.0), Some(20));
        assert_eq!(value_at_percentile(&values, 1.0), Some(80));
        assert_eq!(value_at_percentile(&values, 0.49), Some(50));
        assert_eq!(value_at_percentile(&values, 7.0), Some(80));
        assert_eq!(value_at_percentile(&[], 0.5), None);
    }

    #[test]
    fn sampling_respects_bounds_and_fallback() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..500 {
            let empty = sample_from_band(&[], Band::new(0.0, 1.0), 2.5, 50, &mut rng);
            assert!((47..=53).contains(&empty));
            let high = sample_from_band(&[95, 99, 120], Band::new(1.0, 0.0), 10.0, 50, &mut rng);
            assert!((10..=99).contains(&high));
        }
        let exact = sample_from_band(&pool(), Band::new(0.5, 0.5), 0.0, 50, &mut rng);
        assert_eq!(exact, 50);
        let floor = sample_from_band(&[], Band::new(0.5, 0.5), 0.0, -40, &mut rng);
        assert_eq!(floor, 10);
    }

    #[test]
    fn logistic_fixes_endpoints() {
        for k in [0.5, 3.0, 6.0, 12.0] {
            assert!(reshape(0.0, Curve::Logistic, k).abs() < 1e-12);
            assert!((reshape(1.0, Curve::Logistic, k) - 1.0).abs() < 1e-12);
            assert!((reshape(0.5, Curve::Logistic, k) - 0.5).abs() < 1e-12);
        }
        assert!(reshape(0.25, Curve::Logistic, 6.0) < 0.25);
        assert!(reshape(0.75, Curve::Logistic, 6.0) > 0.75);
        assert!((reshape(0.3, Curve::Logistic, 0.0) - 0.3).abs() < f64::EPSILON);
        assert!((reshape(0.3, Curve::Linear, 6.0) - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn curve_toggle_parses() {
        assert_eq!(Curve::parse("Logistic"), Some(Curve::Logistic));
        assert_eq!(Curve::parse("off"), Some(Curve::Linear));
        assert_eq!(Curve::parse("cubic"), None);
    }
}
