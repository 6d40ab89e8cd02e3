//! Archetype catalog: named skill profiles with sampling bands, selection
//! weights, repair rules, and pitch-mix profiles.
//!
//! The catalog ships as an embedded JSON asset and is validated once. Every
//! archetype and pitch profile is a closed enum, so a typo in the asset fails
//! at load time instead of silently falling back.
use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::attributes::AttributeKey;
use crate::error::CatalogError;
use crate::percentile::Band;
use crate::positions::{PitchingRole, Position, Role, SubRole};
use crate::rng::weighted_pick;

/// Hitter skill profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitterArchetype {
    Power,
    Average,
    Spray,
    Balanced,
    Gap,
    Speed,
    EliteSpeed,
}

impl HitterArchetype {
    pub const ALL: [Self; 7] = [
        Self::Power,
        Self::Average,
        Self::Spray,
        Self::Balanced,
        Self::Gap,
        Self::Speed,
        Self::EliteSpeed,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Average => "average",
            Self::Spray => "spray",
            Self::Balanced => "balanced",
            Self::Gap => "gap",
            Self::Speed => "speed",
            Self::EliteSpeed => "elite_speed",
        }
    }

    /// Parse a pin such as `power` or `Elite Speed`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let token = pin_token(raw);
        Self::ALL.into_iter().find(|arch| arch.as_str() == token)
    }
}

/// Pitcher skill profiles; each is tagged with a starter or reliever role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitcherArchetype {
    PowerSp,
    FinesseSp,
    GroundballSp,
    BalancedSp,
    WorkhorseSp,
    Closer,
    PowerRp,
    FinesseRp,
    GroundballRp,
    LongRelief,
}

impl PitcherArchetype {
    pub const ALL: [Self; 10] = [
        Self::PowerSp,
        Self::FinesseSp,
        Self::GroundballSp,
        Self::BalancedSp,
        Self::WorkhorseSp,
        Self::Closer,
        Self::PowerRp,
        Self::FinesseRp,
        Self::GroundballRp,
        Self::LongRelief,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PowerSp => "power_sp",
            Self::FinesseSp => "finesse_sp",
            Self::GroundballSp => "groundball_sp",
            Self::BalancedSp => "balanced_sp",
            Self::WorkhorseSp => "workhorse_sp",
            Self::Closer => "closer",
            Self::PowerRp => "power_rp",
            Self::FinesseRp => "finesse_rp",
            Self::GroundballRp => "groundball_rp",
            Self::LongRelief => "long_relief",
        }
    }

    /// Parse a pin, accepting the short starter names (`power`, `workhorse`)
    /// and `setup` as an alias for the closer profile.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let token = pin_token(raw);
        let name = match token.as_str() {
            "power" => "power_sp",
            "finesse" => "finesse_sp",
            "groundball" => "groundball_sp",
            "balanced" => "balanced_sp",
            "workhorse" => "workhorse_sp",
            "setup" => "closer",
            other => other,
        };
        Self::ALL.into_iter().find(|arch| arch.as_str() == name)
    }
}

/// Pitch-mix profiles shared by several pitcher archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchProfile {
    Power,
    Finesse,
    Groundball,
    Balanced,
    Closer,
}

impl PitchProfile {
    pub const ALL: [Self; 5] = [
        Self::Power,
        Self::Finesse,
        Self::Groundball,
        Self::Balanced,
        Self::Closer,
    ];
}

/// Archetype chosen for one generated player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Archetype {
    Hitter(HitterArchetype),
    Pitcher(PitcherArchetype),
}

impl Archetype {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hitter(arch) => arch.as_str(),
            Self::Pitcher(arch) => arch.as_str(),
        }
    }

    #[must_use]
    pub const fn role(self) -> Role {
        match self {
            Self::Hitter(_) => Role::Hitter,
            Self::Pitcher(_) => Role::Pitcher,
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for HitterArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PitcherArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HitterArchetype {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CatalogError::UnknownArchetype(s.to_string()))
    }
}

impl FromStr for PitcherArchetype {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CatalogError::UnknownArchetype(s.to_string()))
    }
}

fn pin_token(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Resolve an optional hitter pin, warning and dropping it when unknown.
#[must_use]
pub fn resolve_hitter_pin(raw: Option<&str>) -> Option<HitterArchetype> {
    let raw = raw.map(str::trim).filter(|value| !value.is_empty())?;
    let parsed = HitterArchetype::parse(raw);
    if parsed.is_none() {
        warn!("unknown hitter archetype {raw:?}; choosing by weight");
    }
    parsed
}

/// Resolve an optional pitcher pin, warning and dropping it when unknown.
#[must_use]
pub fn resolve_pitcher_pin(raw: Option<&str>) -> Option<PitcherArchetype> {
    let raw = raw.map(str::trim).filter(|value| !value.is_empty())?;
    let parsed = PitcherArchetype::parse(raw);
    if parsed.is_none() {
        warn!("unknown pitcher archetype {raw:?}; choosing by weight");
    }
    parsed
}

/// Post-sampling repair rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Constraint {
    /// `lead` must exceed `trail` by at least `margin`; a violation resets
    /// `lead` to `trail` plus a draw from `nudge`.
    Leads {
        lead: AttributeKey,
        trail: AttributeKey,
        margin: i32,
        nudge: (i32, i32),
    },
    /// When `left` and `right` drift further than `max_gap` apart, both are
    /// re-drawn within `spread` of their midpoint.
    Converge {
        left: AttributeKey,
        right: AttributeKey,
        max_gap: i32,
        spread: i32,
    },
    Floor { attribute: AttributeKey, min: i32 },
    Ceiling { attribute: AttributeKey, max: i32 },
}

/// One bonus applied by a tail boost; a single draw is shared by every
/// listed attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bump {
    pub attributes: Vec<AttributeKey>,
    pub range: (i32, i32),
}

/// Rare outlier bonus on flagship attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TailBoost {
    pub chance: f64,
    pub bumps: Vec<Bump>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitterTemplate {
    pub weight: u32,
    #[serde(default)]
    pub bands: BTreeMap<AttributeKey, Band>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    #[serde(default)]
    pub tail_boost: Option<TailBoost>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitcherTemplate {
    pub role: SubRole,
    #[serde(default)]
    pub preferred_role: Option<PitchingRole>,
    pub weight: u32,
    pub pitch_profile: PitchProfile,
    #[serde(default)]
    pub bands: BTreeMap<AttributeKey, Band>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    /// Minimum ratings for signature pitches; listed pitches are always thrown.
    #[serde(default)]
    pub pitch_floors: BTreeMap<AttributeKey, i32>,
}

/// Which pitches a profile favors and the percentile band of each tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchProfileConfig {
    pub primary: Vec<AttributeKey>,
    pub secondary: Vec<AttributeKey>,
    pub fastball_band: Band,
    pub primary_band: Band,
    pub secondary_band: Band,
}

impl PitchProfileConfig {
    #[must_use]
    pub fn is_primary(&self, pitch: AttributeKey) -> bool {
        self.primary.contains(&pitch)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultBands {
    #[serde(default)]
    pub hitter: BTreeMap<AttributeKey, Band>,
    #[serde(default)]
    pub pitcher: BTreeMap<AttributeKey, Band>,
}

static FALLBACK_HITTER: HitterTemplate = HitterTemplate {
    weight: 0,
    bands: BTreeMap::new(),
    constraints: Vec::new(),
    tail_boost: None,
};

static FALLBACK_PITCHER: PitcherTemplate = PitcherTemplate {
    role: SubRole::Reliever,
    preferred_role: None,
    weight: 0,
    pitch_profile: PitchProfile::Balanced,
    bands: BTreeMap::new(),
    constraints: Vec::new(),
    pitch_floors: BTreeMap::new(),
};

static FALLBACK_PROFILE: PitchProfileConfig = PitchProfileConfig {
    primary: Vec::new(),
    secondary: Vec::new(),
    fastball_band: Band::fixed(0.6, 0.85),
    primary_band: Band::fixed(0.6, 0.82),
    secondary_band: Band::fixed(0.45, 0.7),
};

const NEUTRAL_BAND: Band = Band::fixed(0.4, 0.7);

/// Validated archetype library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeCatalog {
    starter_share: f64,
    #[serde(default)]
    default_bands: DefaultBands,
    hitters: BTreeMap<HitterArchetype, HitterTemplate>,
    #[serde(default)]
    hitter_position_weights: BTreeMap<Position, BTreeMap<HitterArchetype, u32>>,
    pitchers: BTreeMap<PitcherArchetype, PitcherTemplate>,
    pitch_profiles: BTreeMap<PitchProfile, PitchProfileConfig>,
}

impl ArchetypeCatalog {
    /// Parse and validate a catalog document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not parse, an archetype or pitch
    /// profile is missing, a band strays outside `[0, 1]`, a pitch list names a
    /// non-pitch attribute, or a pitcher role has no weighted archetype.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if !(0.0..=1.0).contains(&self.starter_share) {
            return Err(CatalogError::StarterShare(self.starter_share));
        }
        check_bands("default_hitter", &self.default_bands.hitter)?;
        check_bands("default_pitcher", &self.default_bands.pitcher)?;
        for arch in HitterArchetype::ALL {
            let template = self
                .hitters
                .get(&arch)
                .ok_or(CatalogError::MissingHitter(arch))?;
            check_bands(arch.as_str(), &template.bands)?;
        }
        for arch in PitcherArchetype::ALL {
            let template = self
                .pitchers
                .get(&arch)
                .ok_or(CatalogError::MissingPitcher(arch))?;
            check_bands(arch.as_str(), &template.bands)?;
            if let Some(key) = template.pitch_floors.keys().find(|key| !key.is_pitch()) {
                return Err(CatalogError::NotAPitch {
                    profile: template.pitch_profile,
                    attribute: *key,
                });
            }
        }
        for profile in PitchProfile::ALL {
            let config = self
                .pitch_profiles
                .get(&profile)
                .ok_or(CatalogError::MissingProfile(profile))?;
            if let Some(key) = config
                .primary
                .iter()
                .chain(&config.secondary)
                .find(|key| !key.is_pitch())
            {
                return Err(CatalogError::NotAPitch {
                    profile,
                    attribute: *key,
                });
            }
            let tiers = [config.fastball_band, config.primary_band, config.secondary_band];
            if tiers.iter().any(|band| !band.is_unit()) {
                return Err(CatalogError::InvalidBand {
                    archetype: format!("{profile:?} pitch profile"),
                    attribute: AttributeKey::Fb,
                });
            }
        }
        for role in [SubRole::Starter, SubRole::Reliever] {
            let weighted = self
                .pitchers
                .values()
                .any(|template| template.role == role && template.weight > 0);
            if !weighted {
                return Err(CatalogError::EmptyRole(role));
            }
        }
        Ok(())
    }

    /// Probability that an unpinned pitcher is drawn from the starter pool.
    #[must_use]
    pub const fn starter_share(&self) -> f64 {
        self.starter_share
    }

    #[must_use]
    pub fn hitter(&self, archetype: HitterArchetype) -> &HitterTemplate {
        self.hitters.get(&archetype).unwrap_or(&FALLBACK_HITTER)
    }

    #[must_use]
    pub fn pitcher(&self, archetype: PitcherArchetype) -> &PitcherTemplate {
        self.pitchers.get(&archetype).unwrap_or(&FALLBACK_PITCHER)
    }

    #[must_use]
    pub fn pitch_profile(&self, profile: PitchProfile) -> &PitchProfileConfig {
        self.pitch_profiles
            .get(&profile)
            .or_else(|| self.pitch_profiles.get(&PitchProfile::Balanced))
            .unwrap_or(&FALLBACK_PROFILE)
    }

    /// Sampling band for `key`: the archetype's own band, else the role
    /// default, else a neutral middle band.
    #[must_use]
    pub fn band_for(&self, archetype: Archetype, key: AttributeKey) -> Band {
        let (own, defaults) = match archetype {
            Archetype::Hitter(arch) => (&self.hitter(arch).bands, &self.default_bands.hitter),
            Archetype::Pitcher(arch) => (&self.pitcher(arch).bands, &self.default_bands.pitcher),
        };
        own.get(&key)
            .or_else(|| defaults.get(&key))
            .copied()
            .unwrap_or(NEUTRAL_BAND)
    }

    /// Repair rules attached to an archetype.
    #[must_use]
    pub fn constraints(&self, archetype: Archetype) -> &[Constraint] {
        match archetype {
            Archetype::Hitter(arch) => &self.hitter(arch).constraints,
            Archetype::Pitcher(arch) => &self.pitcher(arch).constraints,
        }
    }

    /// Selection weights for hitters at `position`.
    ///
    /// A position override wins for every archetype it lists; the rest keep
    /// their intrinsic weight.
    #[must_use]
    pub fn hitter_weights(&self, position: Option<Position>) -> Vec<(HitterArchetype, u32)> {
        let overrides = position.and_then(|pos| self.hitter_position_weights.get(&pos));
        HitterArchetype::ALL
            .into_iter()
            .map(|arch| {
                let weight = overrides
                    .and_then(|table| table.get(&arch).copied())
                    .unwrap_or_else(|| self.hitter(arch).weight);
                (arch, weight)
            })
            .collect()
    }

    /// Pitcher archetypes tagged with `role`, with their weights.
    #[must_use]
    pub fn pitcher_weights(&self, role: SubRole) -> Vec<(PitcherArchetype, u32)> {
        PitcherArchetype::ALL
            .into_iter()
            .filter_map(|arch| {
                let template = self.pitchers.get(&arch)?;
                (template.role == role).then_some((arch, template.weight))
            })
            .collect()
    }

    /// Pick a hitter archetype, honoring a pin when present.
    pub fn choose_hitter<R: Rng + ?Sized>(
        &self,
        position: Option<Position>,
        pin: Option<HitterArchetype>,
        rng: &mut R,
    ) -> HitterArchetype {
        if let Some(arch) = pin {
            return arch;
        }
        weighted_pick(&self.hitter_weights(position), rng).unwrap_or(HitterArchetype::Balanced)
    }

    /// Pick a pitcher archetype: a coarse role first, then a weighted template
    /// among those tagged with it.
    pub fn choose_pitcher<R: Rng + ?Sized>(
        &self,
        pin: Option<PitcherArchetype>,
        rng: &mut R,
    ) -> PitcherArchetype {
        if let Some(arch) = pin {
            return arch;
        }
        let role = if rng.gen_bool(self.starter_share) {
            SubRole::Starter
        } else {
            SubRole::Reliever
        };
        let fallback = match role {
            SubRole::Starter => PitcherArchetype::BalancedSp,
            SubRole::Reliever => PitcherArchetype::PowerRp,
        };
        weighted_pick(&self.pitcher_weights(role), rng).unwrap_or(fallback)
    }

    /// Choose an archetype for `role`, honoring an explicit name when known.
    ///
    /// Unknown names are logged and ignored rather than rejected.
    pub fn choose<R: Rng + ?Sized>(
        &self,
        role: Role,
        position: Option<Position>,
        explicit: Option<&str>,
        rng: &mut R,
    ) -> Archetype {
        match role {
            Role::Hitter => {
                let pin = resolve_hitter_pin(explicit);
                Archetype::Hitter(self.choose_hitter(position, pin, rng))
            }
            Role::Pitcher => {
                let pin = resolve_pitcher_pin(explicit);
                Archetype::Pitcher(self.choose_pitcher(pin, rng))
            }
        }
    }
}

fn check_bands(archetype: &str, bands: &BTreeMap<AttributeKey, Band>) -> Result<(), CatalogError> {
    match bands.iter().find(|(_, band)| !band.is_unit()) {
        Some((key, _)) => Err(CatalogError::InvalidBand {
            archetype: archetype.to_string(),
            attribute: *key,
        }),
        None => Ok(()),
    }
}

/// Catalog embedded with the crate.
///
/// # Panics
///
/// Panics if the bundled asset fails validation, which the unit tests guard.
pub fn default_catalog() -> &'static ArchetypeCatalog {
    static CATALOG: OnceLock<ArchetypeCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        ArchetypeCatalog::from_json(include_str!("../assets/archetypes.json"))
            .expect("valid archetype catalog")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use serde_json::Value;

    fn asset() -> Value {
        serde_json::from_str(include_str!("../assets/archetypes.json")).unwrap()
    }

    #[test]
    fn bundled_catalog_validates() {
        let catalog = default_catalog();
        assert!((catalog.starter_share() - 0.6).abs() < f64::EPSILON);
        let closer = catalog.pitcher(PitcherArchetype::Closer);
        assert_eq!(closer.role, SubRole::Reliever);
        assert_eq!(closer.preferred_role, Some(PitchingRole::Closer));
        assert_eq!(closer.pitch_floors.get(&AttributeKey::Sl), Some(&65));
        assert_eq!(
            catalog.pitcher(PitcherArchetype::LongRelief).preferred_role,
            Some(PitchingRole::LongRelief)
        );
    }

    #[test]
    fn bands_fall_back_to_role_defaults() {
        let catalog = default_catalog();
        let power = Archetype::Hitter(HitterArchetype::Power);
        assert!((catalog.band_for(power, AttributeKey::Ph).low() - 0.82).abs() < 1e-9);
        assert!((catalog.band_for(power, AttributeKey::Sc).low() - 0.4).abs() < 1e-9);
        let sp = catalog.band_for(Archetype::Hitter(HitterArchetype::Average), AttributeKey::Sp);
        assert!((sp.high() - 0.6).abs() < 1e-9);
        let hold = catalog.band_for(Archetype::Pitcher(PitcherArchetype::Closer), AttributeKey::Fa);
        assert!((hold.low() - 0.4).abs() < 1e-9);
        let kn = catalog.band_for(Archetype::Pitcher(PitcherArchetype::PowerSp), AttributeKey::Kn);
        assert_eq!(kn, NEUTRAL_BAND);
    }

    #[test]
    fn position_overrides_replace_weights() {
        let catalog = default_catalog();
        let first = catalog.hitter_weights(Some(Position::FirstBase));
        assert!(first.contains(&(HitterArchetype::Power, 36)));
        let unknown = catalog.hitter_weights(None);
        assert!(unknown.contains(&(HitterArchetype::Balanced, 26)));
    }

    #[test]
    fn pins_parse_with_aliases() {
        assert_eq!(HitterArchetype::parse("Elite Speed"), Some(HitterArchetype::EliteSpeed));
        assert_eq!(PitcherArchetype::parse("workhorse"), Some(PitcherArchetype::WorkhorseSp));
        assert_eq!(PitcherArchetype::parse("SETUP"), Some(PitcherArchetype::Closer));
        assert_eq!(PitcherArchetype::parse("long-relief"), Some(PitcherArchetype::LongRelief));
        assert!(matches!(
            "slugger".parse::<HitterArchetype>(),
            Err(CatalogError::UnknownArchetype(_))
        ));
        assert_eq!(resolve_hitter_pin(Some("  ")), None);
        assert_eq!(resolve_pitcher_pin(Some("knuckler")), None);
    }

    #[test]
    fn pitcher_choice_respects_role_prior() {
        let catalog = default_catalog();
        let mut rng = SmallRng::seed_from_u64(21);
        let draws = 4_000;
        let starters = (0..draws)
            .filter(|_| {
                let arch = catalog.choose_pitcher(None, &mut rng);
                catalog.pitcher(arch).role == SubRole::Starter
            })
            .count();
        let share = f64::from(u32::try_from(starters).unwrap()) / f64::from(draws);
        assert!((share - 0.6).abs() < 0.04, "starter share {share}");
        assert_eq!(
            catalog.choose_pitcher(Some(PitcherArchetype::Closer), &mut rng),
            PitcherArchetype::Closer
        );
    }

    #[test]
    fn choose_ignores_unknown_names() {
        let catalog = default_catalog();
        let mut rng = SmallRng::seed_from_u64(4);
        let pinned = catalog.choose(Role::Hitter, Some(Position::Catcher), Some("gap"), &mut rng);
        assert_eq!(pinned, Archetype::Hitter(HitterArchetype::Gap));
        let drawn = catalog.choose(Role::Pitcher, None, Some("mystery"), &mut rng);
        assert_eq!(drawn.role(), Role::Pitcher);
    }

    #[test]
    fn validation_rejects_broken_assets() {
        let mut missing = asset();
        missing["hitters"].as_object_mut().unwrap().remove("gap");
        assert!(matches!(
            ArchetypeCatalog::from_json(&missing.to_string()),
            Err(CatalogError::MissingHitter(HitterArchetype::Gap))
        ));

        let mut band = asset();
        band["pitchers"]["closer"]["bands"]["arm"] = serde_json::json!([0.9, 1.3]);
        assert!(matches!(
            ArchetypeCatalog::from_json(&band.to_string()),
            Err(CatalogError::InvalidBand { attribute: AttributeKey::Arm, .. })
        ));

        let mut pitch = asset();
        pitch["pitch_profiles"]["power"]["secondary"] = serde_json::json!(["si", "eye"]);
        assert!(matches!(
            ArchetypeCatalog::from_json(&pitch.to_string()),
            Err(CatalogError::NotAPitch { attribute: AttributeKey::Eye, .. })
        ));

        let mut share = asset();
        share["starter_share"] = serde_json::json!(1.5);
        assert!(matches!(
            ArchetypeCatalog::from_json(&share.to_string()),
            Err(CatalogError::StarterShare(_))
        ));

        let mut empty_role = asset();
        for name in ["closer", "power_rp", "finesse_rp", "groundball_rp", "long_relief"] {
            empty_role["pitchers"][name]["weight"] = serde_json::json!(0);
        }
        assert!(matches!(
            ArchetypeCatalog::from_json(&empty_role.to_string()),
            Err(CatalogError::EmptyRole(SubRole::Reliever))
        ));

        let mut typo = asset();
        typo["hitters"]["slugger"] = typo["hitters"]["power"].clone();
        assert!(matches!(
            ArchetypeCatalog::from_json(&typo.to_string()),
            Err(CatalogError::Parse(_))
        ));
    }
}
