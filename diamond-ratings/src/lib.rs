//! Diamond Ratings Engine
//!
//! Empirical baseball rating generation and percentile display normalization.
//! Historical rows are bucketed into sorted distribution pools; new players are
//! sampled from those pools under archetype constraints, and any rating can be
//! rendered back to humans as a percentile-derived display value.
//!
//! The crate performs no I/O beyond reading the historical source, and never
//! fails generation or display: absent data degrades to fallback constants.

pub mod archetypes;
pub mod attributes;
pub mod config;
pub(crate) mod constants;
pub mod display;
pub mod draft;
pub mod error;
pub mod identity;
pub mod numbers;
pub mod percentile;
pub mod positions;
pub mod potential;
pub mod record;
pub mod repository;
pub mod rng;
pub mod source;
pub mod synth;

use log::warn;
use std::sync::Arc;

// Re-export commonly used types
pub use archetypes::{
    Archetype, ArchetypeCatalog, HitterArchetype, PitcherArchetype, default_catalog,
};
pub use attributes::AttributeKey;
pub use config::EngineConfig;
pub use display::{
    DisplayConfig, DisplayMode, DisplayRating, DisplaySubject, DisplayValue, Normalizer,
};
pub use draft::generate_draft_pool;
pub use error::{CatalogError, SourceError};
pub use identity::{AgeSpec, AgeTable, NameRegistry};
pub use percentile::Curve;
pub use positions::{Delivery, Hand, PitchingRole, Position, Role, SubRole};
pub use record::PlayerRecord;
pub use repository::{Bucket, DistributionPool, Repository, RepositoryCache};
pub use rng::GenerationRng;
pub use source::{CsvSource, HistoricalRow, InMemorySource, SampleSource};
pub use synth::{GenerationRequest, RatingStrategy, StrategyId, Synthesizer};

/// Generation and display front door over one historical source.
///
/// Owns the lazily built repository cache and the name pool; both are
/// rebuilt by [`ScoutingEngine::reset`].
pub struct ScoutingEngine<S>
where
    S: SampleSource,
{
    cache: RepositoryCache<S>,
    catalog: &'static ArchetypeCatalog,
    config: EngineConfig,
    names: NameRegistry,
}

impl<S> ScoutingEngine<S>
where
    S: SampleSource,
{
    /// Create an engine over `source` with the bundled archetype catalog.
    pub fn new(source: S, config: EngineConfig) -> Self {
        let names = load_names(&source);
        Self {
            cache: RepositoryCache::new(source),
            catalog: default_catalog(),
            config,
            names,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current pools, building them on first use.
    pub fn repository(&self) -> Arc<Repository> {
        self.cache.get()
    }

    /// RNG bundle from the configured seed, or from entropy when unset.
    #[must_use]
    pub fn rng(&self) -> GenerationRng {
        self.config
            .seed
            .map_or_else(GenerationRng::from_entropy, GenerationRng::from_seed)
    }

    /// Base request for one role with the configured archetype pins applied.
    #[must_use]
    pub const fn request(&self, is_pitcher: bool) -> GenerationRequest {
        GenerationRequest {
            is_pitcher,
            for_draft: false,
            age: None,
            position: None,
            hitter_archetype: self.config.hitter_archetype,
            pitcher_archetype: self.config.pitcher_archetype,
        }
    }

    /// Generate one player with the configured strategy.
    pub fn generate(&mut self, request: &GenerationRequest, rng: &mut GenerationRng) -> PlayerRecord {
        let repo = self.cache.get();
        let synth = Synthesizer::new(&repo, self.catalog, self.config.strategy.strategy());
        synth.generate(request, &mut self.names, rng)
    }

    /// Generate a draft pool of `size` prospects honoring the configured pins.
    pub fn generate_draft_pool(&mut self, size: usize, rng: &mut GenerationRng) -> Vec<PlayerRecord> {
        let repo = self.cache.get();
        let synth = Synthesizer::new(&repo, self.catalog, self.config.strategy.strategy());
        let base = self.request(false);
        draft::generate_draft_pool(&synth, size, &base, &mut self.names, rng)
    }

    /// Display one stored rating of `record` with the configured display settings.
    pub fn display(&self, record: &PlayerRecord, key: AttributeKey) -> DisplayRating {
        let repo = self.cache.get();
        Normalizer::new(&repo).display_record(record, key, &self.config.display)
    }

    /// Display an arbitrary rating addressed by a free-form label.
    pub fn display_label(&self, value: f64, label: &str, subject: DisplaySubject) -> DisplayRating {
        let repo = self.cache.get();
        Normalizer::new(&repo).display_label(value, label, subject, &self.config.display)
    }

    /// Return every handed-out name to the pool, keeping the built repository.
    pub fn release_names(&mut self) {
        self.names.reset();
    }

    /// Drop cached pools and reload the name pool from the source.
    pub fn reset(&mut self) {
        self.cache.reset();
        self.names = load_names(self.cache.source());
    }
}

fn load_names<S: SampleSource>(source: &S) -> NameRegistry {
    match source.load_rows() {
        Ok(rows) => NameRegistry::from_rows(&rows),
        Err(err) => {
            warn!("name pool unavailable, using fallback names: {err}");
            NameRegistry::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<HistoricalRow> {
        (0..40)
            .map(|idx| {
                HistoricalRow::hitter(Position::FirstBase)
                    .with(AttributeKey::Ch, 30 + idx)
                    .with(AttributeKey::Ph, 40 + idx)
                    .named(&format!("First{idx}"), &format!("Last{idx}"), "White")
            })
            .collect()
    }

    #[test]
    fn engine_generates_and_displays_from_source() {
        let cfg = EngineConfig {
            seed: Some(11),
            ..EngineConfig::default()
        };
        let mut engine = ScoutingEngine::new(InMemorySource::new(rows()), cfg);
        let mut rng = engine.rng();
        assert_eq!(rng.seed(), 11);
        let request = engine.request(false).at(Position::FirstBase);
        let record = engine.generate(&request, &mut rng);
        assert_eq!(record.primary_position, Position::FirstBase);
        assert!(record.first_name.starts_with("First"));

        let shown = engine.display(&record, AttributeKey::Ch);
        assert_eq!(shown.bucket.as_deref(), Some("1B"));
        assert!(shown.top_percent.is_some());
        assert_eq!(engine.display(&record, AttributeKey::Ch), shown);
    }

    #[test]
    fn reset_rebuilds_pools_and_frees_names() {
        let mut engine = ScoutingEngine::new(InMemorySource::new(rows()), EngineConfig::default());
        let mut rng = GenerationRng::from_seed(3);
        let pool = engine.generate_draft_pool(10, &mut rng);
        assert_eq!(pool.len(), 10);
        assert!(engine.cache.is_built());
        assert!(engine.names.used() > 0);
        engine.reset();
        assert!(!engine.cache.is_built());
        assert_eq!(engine.names.used(), 0);
        assert_eq!(engine.repository().row_count(), 40);
    }

    #[test]
    fn configured_pins_flow_into_requests() {
        let cfg = EngineConfig {
            hitter_archetype: Some(HitterArchetype::Power),
            pitcher_archetype: Some(PitcherArchetype::Closer),
            ..EngineConfig::default()
        };
        let engine = ScoutingEngine::new(InMemorySource::default(), cfg);
        let request = engine.request(true);
        assert!(request.is_pitcher);
        assert_eq!(request.hitter_archetype, Some(HitterArchetype::Power));
        assert_eq!(request.pitcher_archetype, Some(PitcherArchetype::Closer));
    }
}
