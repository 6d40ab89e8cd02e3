//! Error types surfaced by catalog loading and historical source reading.
//!
//! Generation and display never return these; they degrade to documented
//! fallbacks instead. The errors exist for callers that load their own
//! catalogs or sources and want to know why something was rejected.

use std::path::PathBuf;
use thiserror::Error;

use crate::archetypes::{HitterArchetype, PitchProfile, PitcherArchetype};
use crate::attributes::AttributeKey;
use crate::positions::SubRole;

/// Problems found while parsing or validating an archetype catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("archetype catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog has no template for hitter archetype {0:?}")]
    MissingHitter(HitterArchetype),
    #[error("catalog has no template for pitcher archetype {0:?}")]
    MissingPitcher(PitcherArchetype),
    #[error("catalog has no pitch profile {0:?}")]
    MissingProfile(PitchProfile),
    #[error("no pitcher archetypes are tagged with role {0}")]
    EmptyRole(SubRole),
    #[error("band for {attribute} in {archetype} lies outside [0, 1]")]
    InvalidBand {
        archetype: String,
        attribute: AttributeKey,
    },
    #[error("pitch profile {profile:?} lists non-pitch attribute {attribute}")]
    NotAPitch {
        profile: PitchProfile,
        attribute: AttributeKey,
    },
    #[error("starter share {0} must lie within [0, 1]")]
    StarterShare(f64),
    #[error("unknown archetype name {0:?}")]
    UnknownArchetype(String),
}

/// Failures while reading a tabular historical source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read historical source {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_errors_render_context() {
        let err = CatalogError::InvalidBand {
            archetype: "power".to_string(),
            attribute: AttributeKey::Ph,
        };
        assert_eq!(err.to_string(), "band for ph in power lies outside [0, 1]");
        assert_eq!(
            CatalogError::EmptyRole(SubRole::Reliever).to_string(),
            "no pitcher archetypes are tagged with role RP"
        );
    }

    #[test]
    fn parse_errors_convert() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CatalogError = parse.into();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
