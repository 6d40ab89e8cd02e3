//! Historical sample sources.
//!
//! Every source converts its rows into [`HistoricalRow`] at the boundary so the
//! repository and name pool only ever see one shape.
use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};
use std::convert::Infallible;
use std::path::{Path, PathBuf};

use crate::attributes::AttributeKey;
use crate::constants::SOURCE_CANDIDATES;
use crate::error::SourceError;
use crate::numbers::round_f64_to_i32;
use crate::positions::{PitchingRole, Position};

/// One historical player row, normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoricalRow {
    pub is_pitcher: bool,
    /// Raw primary position cell; unknown codes are kept as `None`.
    pub primary_position: Option<Position>,
    pub pitching_role: Option<PitchingRole>,
    pub values: BTreeMap<AttributeKey, i32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub ethnicity: Option<String>,
}

impl HistoricalRow {
    /// Empty hitter row at `position`.
    #[must_use]
    pub fn hitter(position: Position) -> Self {
        Self {
            primary_position: Some(position),
            ..Self::default()
        }
    }

    /// Empty pitcher row with an optional role cell.
    #[must_use]
    pub fn pitcher(role: Option<PitchingRole>) -> Self {
        Self {
            is_pitcher: true,
            pitching_role: role,
            ..Self::default()
        }
    }

    /// Builder-style rating setter.
    #[must_use]
    pub fn with(mut self, key: AttributeKey, value: i32) -> Self {
        self.values.insert(key, value);
        self
    }

    /// Builder-style name setter.
    #[must_use]
    pub fn named(mut self, first: &str, last: &str, ethnicity: &str) -> Self {
        self.first_name = Some(first.to_string());
        self.last_name = Some(last.to_string());
        self.ethnicity = Some(ethnicity.to_string());
        self
    }

    #[must_use]
    pub fn value(&self, key: AttributeKey) -> Option<i32> {
        self.values.get(&key).copied()
    }

    /// Build a row from a cell lookup keyed by lowercase column name.
    ///
    /// Cells that are blank or fail numeric coercion are treated as absent.
    pub fn from_cells<'a, F>(cell: F) -> Self
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let is_pitcher = cell("is_pitcher").is_some_and(parse_flag);
        let primary_position = cell("primary_position").and_then(Position::parse);
        let pitching_role = cell("preferred_pitching_role")
            .filter(|raw| !raw.trim().is_empty())
            .or_else(|| cell("role"))
            .and_then(PitchingRole::parse);
        let values = AttributeKey::ALL
            .iter()
            .filter_map(|key| cell(key.as_str()).and_then(parse_int_cell).map(|v| (*key, v)))
            .collect();
        let text = |name: &str| {
            cell(name)
                .map(str::trim)
                .filter(|raw| !raw.is_empty())
                .map(str::to_string)
        };
        Self {
            is_pitcher,
            primary_position,
            pitching_role,
            values,
            first_name: text("first_name"),
            last_name: text("last_name"),
            ethnicity: text("ethnicity"),
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}

/// Coerce a numeric cell, rounding decimals; blank or garbage is absent.
#[must_use]
pub fn parse_int_cell(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(round_f64_to_i32)
}

/// Abstraction over where historical rows come from.
pub trait SampleSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load every readable row.
    ///
    /// # Errors
    ///
    /// Returns an error if the source exists but cannot be read at all.
    fn load_rows(&self) -> Result<Vec<HistoricalRow>, Self::Error>;
}

/// Rows held in memory, mostly for tests and embedding callers.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    rows: Vec<HistoricalRow>,
}

impl InMemorySource {
    #[must_use]
    pub const fn new(rows: Vec<HistoricalRow>) -> Self {
        Self { rows }
    }
}

impl SampleSource for InMemorySource {
    type Error = Infallible;

    fn load_rows(&self) -> Result<Vec<HistoricalRow>, Self::Error> {
        Ok(self.rows.clone())
    }
}

/// CSV source reading the first existing file among prioritized candidates.
#[derive(Debug, Clone)]
pub struct CsvSource {
    candidates: Vec<PathBuf>,
}

impl CsvSource {
    /// Source trying each path in order.
    #[must_use]
    pub const fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    /// Default candidates under `<base>/data/`.
    #[must_use]
    pub fn in_dir(base: &Path) -> Self {
        let data = base.join("data");
        Self::new(SOURCE_CANDIDATES.iter().map(|name| data.join(name)).collect())
    }

    #[must_use]
    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// First candidate that exists on disk.
    #[must_use]
    pub fn resolve_path(&self) -> Option<&Path> {
        self.candidates
            .iter()
            .map(PathBuf::as_path)
            .find(|path| path.is_file())
    }
}

impl SampleSource for CsvSource {
    type Error = SourceError;

    fn load_rows(&self) -> Result<Vec<HistoricalRow>, Self::Error> {
        let Some(path) = self.resolve_path() else {
            warn!(
                "no historical source found among {} candidate(s); pools start empty",
                self.candidates.len()
            );
            return Ok(Vec::new());
        };
        let wrap = |source: csv::Error| SourceError::Csv {
            path: path.to_path_buf(),
            source,
        };
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(wrap)?;
        let headers: HashMap<String, usize> = reader
            .headers()
            .map_err(wrap)?
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.to_lowercase(), idx))
            .collect();

        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            match record {
                Ok(record) => {
                    let row = HistoricalRow::from_cells(|name| {
                        headers.get(name).and_then(|idx| record.get(*idx))
                    });
                    rows.push(row);
                }
                Err(err) => debug!("skipping malformed row {} in {}: {err}", line + 2, path.display()),
            }
        }
        Ok(rows)
    }
}
