//! Attribute synthesis: turns a generation request into a complete player record.
//!
//! [`Synthesizer`] owns the shared flow (identity, classification, potentials,
//! grafts, draft scaling) and delegates the rating draws to a
//! [`RatingStrategy`]. Two strategies ship with the crate: the empirical
//! percentile sampler and the legacy point-budget allocator.

pub mod empirical;
pub mod legacy;
pub mod repair;

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::archetypes::{Archetype, ArchetypeCatalog, HitterArchetype, PitcherArchetype};
use crate::attributes::AttributeKey;
use crate::constants::{
    DEBUG_ENV_VAR, DEFAULT_SAMPLE_FALLBACK, DEFAULT_SAMPLE_JITTER, DELIVERY_OVERHAND_WEIGHT,
    DELIVERY_SIDEARM_WEIGHT, GRAFT_ALLOCATION, HITTER_PITCHING_GRAFT_ODDS, LEGACY_CORE_BOUNDS,
    PITCHER_HITTING_GRAFT_ODDS, STARTER_ENDURANCE_CUTOFF,
};
use crate::identity::{
    AgeSpec, AgeTable, NameRegistry, roll_age, roll_appearance, roll_body, roll_durability,
    roll_player_id,
};
use crate::numbers::{clamp_rating, trunc_f64_to_i32};
use crate::positions::{
    Delivery, Hand, PitchingRole, Position, SubRole, assign_bats_throws,
    assign_primary_position, assign_secondary_positions, fielding_potentials,
};
use crate::potential;
use crate::record::{PlayerRecord, StrikeZone};
use crate::repository::Repository;
use crate::rng::{GenerationRng, uniform_int, weighted_pick};

pub use empirical::EmpiricalStrategy;
pub use legacy::LegacyStrategy;
pub use repair::Ratings;

#[cfg(debug_assertions)]
fn debug_log_enabled() -> bool {
    matches!(std::env::var(DEBUG_ENV_VAR), Ok(val) if val != "0")
}

#[cfg(not(debug_assertions))]
const fn debug_log_enabled() -> bool {
    false
}

/// Which rating strategy drives generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyId {
    /// Percentile sampling from historical pools.
    #[default]
    Normalized,
    /// Fixed point budget split by position weight tables.
    Legacy,
}

impl StrategyId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normalized => "normalized",
            Self::Legacy => "legacy",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "normalized" | "empirical" | "percentile" => Some(Self::Normalized),
            "legacy" | "arr" | "allocation" | "pool" => Some(Self::Legacy),
            _ => None,
        }
    }

    /// Parse a profile selector, falling back to [`StrategyId::Normalized`]
    /// with a warning when it is not recognized.
    #[must_use]
    pub fn resolve(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_else(|| {
            if !raw.trim().is_empty() {
                warn!("unknown rating profile {raw:?}; using normalized");
            }
            Self::Normalized
        })
    }

    /// Shared strategy instance for this id.
    #[must_use]
    pub fn strategy(self) -> &'static dyn RatingStrategy {
        match self {
            Self::Normalized => &EmpiricalStrategy,
            Self::Legacy => &LegacyStrategy,
        }
    }
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only inputs a strategy may consult while rating a player.
#[derive(Debug, Clone, Copy)]
pub struct RatingContext<'a> {
    pub repository: &'a Repository,
    pub catalog: &'a ArchetypeCatalog,
}

impl<'a> RatingContext<'a> {
    #[must_use]
    pub const fn new(repository: &'a Repository, catalog: &'a ArchetypeCatalog) -> Self {
        Self {
            repository,
            catalog,
        }
    }

    /// Draw `key` from its bucketed pool within the archetype's band.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        key: AttributeKey,
        archetype: Archetype,
        sub_role: Option<SubRole>,
        position: Option<Position>,
        rng: &mut R,
    ) -> i32 {
        let band = self.catalog.band_for(archetype, key);
        self.repository
            .pools_for(key, Some(archetype.role()), sub_role, position)
            .pool
            .sample(band, DEFAULT_SAMPLE_JITTER, DEFAULT_SAMPLE_FALLBACK, rng)
    }
}

/// Classification already settled for a hitter before rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitterSlot {
    pub position: Position,
    pub bats: Hand,
    pub pin: Option<HitterArchetype>,
}

/// Classification already settled for a pitcher before rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PitcherSlot {
    pub throws: Hand,
    pub delivery: Delivery,
    pub pin: Option<PitcherArchetype>,
}

/// Output of a strategy: ratings plus the classification it implies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatedPlayer {
    pub ratings: Ratings,
    pub archetype: Option<Archetype>,
    /// Sub-role the strategy rated for; `None` lets endurance decide.
    pub role: Option<SubRole>,
    pub preferred_role: Option<PitchingRole>,
}

/// Swappable rating generator behind the shared record contract.
pub trait RatingStrategy: Send + Sync {
    fn id(&self) -> StrategyId;

    fn rate_hitter(
        &self,
        ctx: &RatingContext<'_>,
        slot: &HitterSlot,
        rng: &mut GenerationRng,
    ) -> RatedPlayer;

    fn rate_pitcher(
        &self,
        ctx: &RatingContext<'_>,
        slot: &PitcherSlot,
        rng: &mut GenerationRng,
    ) -> RatedPlayer;
}

/// What to generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    pub is_pitcher: bool,
    /// Discount current ratings as an unrefined amateur.
    pub for_draft: bool,
    /// Age source; `None` picks the amateur table for draft requests and the
    /// established-player table otherwise.
    pub age: Option<AgeSpec>,
    /// Primary position for hitters; ignored for pitchers.
    pub position: Option<Position>,
    pub hitter_archetype: Option<HitterArchetype>,
    pub pitcher_archetype: Option<PitcherArchetype>,
}

impl GenerationRequest {
    #[must_use]
    pub fn hitter() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pitcher() -> Self {
        Self {
            is_pitcher: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Pin the archetype; a hitter pin on a pitcher request (or the reverse)
    /// is simply unused.
    #[must_use]
    pub const fn pinned(mut self, archetype: Archetype) -> Self {
        match archetype {
            Archetype::Hitter(arch) => self.hitter_archetype = Some(arch),
            Archetype::Pitcher(arch) => self.pitcher_archetype = Some(arch),
        }
        self
    }

    #[must_use]
    pub const fn drafted(mut self) -> Self {
        self.for_draft = true;
        self
    }

    #[must_use]
    pub const fn aged(mut self, spec: AgeSpec) -> Self {
        self.age = Some(spec);
        self
    }

    /// Effective age source.
    #[must_use]
    pub fn age_spec(&self) -> AgeSpec {
        self.age.unwrap_or(if self.for_draft {
            AgeSpec::Table(AgeTable::Amateur)
        } else {
            AgeSpec::default()
        })
    }
}

const DELIVERY_WEIGHTS: [(Delivery, u32); 2] = [
    (Delivery::Overhand, DELIVERY_OVERHAND_WEIGHT),
    (Delivery::Sidearm, DELIVERY_SIDEARM_WEIGHT),
];

/// Draw an arm slot.
pub fn roll_delivery<R: Rng + ?Sized>(rng: &mut R) -> Delivery {
    weighted_pick(&DELIVERY_WEIGHTS, rng).unwrap_or(Delivery::Overhand)
}

const GRAFTED_HITTING_KEYS: [AttributeKey; 6] = [
    AttributeKey::Ch,
    AttributeKey::Ph,
    AttributeKey::Sp,
    AttributeKey::Eye,
    AttributeKey::Pl,
    AttributeKey::Sc,
];

const GRAFTED_PITCHING_KEYS: [AttributeKey; 4] = [
    AttributeKey::Endurance,
    AttributeKey::Control,
    AttributeKey::Movement,
    AttributeKey::HoldRunner,
];

struct Classification {
    bats: Hand,
    throws: Hand,
    primary: Position,
    others: Vec<Position>,
    role: Option<SubRole>,
    delivery: Option<Delivery>,
    rated: RatedPlayer,
}

/// Generation orchestrator over a shared repository and catalog.
pub struct Synthesizer<'a> {
    repository: &'a Repository,
    catalog: &'a ArchetypeCatalog,
    strategy: &'a dyn RatingStrategy,
}

impl<'a> Synthesizer<'a> {
    #[must_use]
    pub const fn new(
        repository: &'a Repository,
        catalog: &'a ArchetypeCatalog,
        strategy: &'a dyn RatingStrategy,
    ) -> Self {
        Self {
            repository,
            catalog,
            strategy,
        }
    }

    #[must_use]
    pub fn strategy_id(&self) -> StrategyId {
        self.strategy.id()
    }

    /// Generate one player. Never fails: thin or missing data degrades to
    /// fallback constants.
    pub fn generate(
        &self,
        request: &GenerationRequest,
        names: &mut NameRegistry,
        rng: &mut GenerationRng,
    ) -> PlayerRecord {
        let age = roll_age(request.age_spec(), rng.identity());
        let name = names.draw(rng.identity());
        let player_id = roll_player_id(rng.identity());
        let (height, weight) = roll_body(rng.identity());
        let appearance = roll_appearance(&name.ethnicity, age, rng.identity());

        let ctx = RatingContext::new(self.repository, self.catalog);
        let class = if request.is_pitcher {
            self.classify_pitcher(&ctx, request, rng)
        } else {
            self.classify_hitter(&ctx, request, rng)
        };
        let preferred_pitching_role = class.rated.preferred_role.or(match class.role {
            Some(SubRole::Starter) if request.is_pitcher => Some(PitchingRole::Starter),
            Some(SubRole::Reliever) if request.is_pitcher => Some(PitchingRole::Reliever),
            _ => None,
        });
        let (hitter_archetype, pitcher_archetype) = match class.rated.archetype {
            Some(Archetype::Hitter(arch)) => (Some(arch), None),
            Some(Archetype::Pitcher(arch)) => (None, Some(arch)),
            None => (None, None),
        };

        let mut record = PlayerRecord {
            player_id,
            first_name: name.first,
            last_name: name.last,
            ethnicity: name.ethnicity,
            age,
            is_pitcher: request.is_pitcher,
            bats: class.bats,
            throws: class.throws,
            primary_position: class.primary,
            other_positions: class.others,
            role: class.role,
            preferred_pitching_role,
            delivery: class.delivery,
            hitter_archetype,
            pitcher_archetype,
            ratings: class.rated.ratings,
            potentials: BTreeMap::new(),
            fielding_potentials: BTreeMap::new(),
            height,
            weight,
            zone: StrikeZone::for_height(height),
            appearance,
        };

        let durability = roll_durability(age, request.is_pitcher, rng.identity());
        record.ratings.insert(AttributeKey::Durability, durability);
        project_potentials(&mut record, rng);
        if request.is_pitcher {
            graft_hitting(&mut record, rng);
        } else {
            graft_pitching(&mut record, rng);
        }
        record.fielding_potentials =
            fielding_potentials(record.primary_position, &record.other_positions)
                .into_iter()
                .collect();
        if request.for_draft {
            record.apply_draft_scale();
        }
        record.apply_defaults();

        if debug_log_enabled() {
            debug!(
                "generated {} {} {} | {} age {} archetype {:?} via {}",
                record.player_id,
                record.first_name,
                record.last_name,
                record.primary_position,
                record.age,
                record.archetype_label(),
                self.strategy.id()
            );
        }
        record
    }

    fn classify_pitcher(
        &self,
        ctx: &RatingContext<'_>,
        request: &GenerationRequest,
        rng: &mut GenerationRng,
    ) -> Classification {
        let (bats, throws) = assign_bats_throws(Position::Pitcher, rng.profile());
        let delivery = roll_delivery(rng.profile());
        let slot = PitcherSlot {
            throws,
            delivery,
            pin: request.pitcher_archetype,
        };
        let rated = self.strategy.rate_pitcher(ctx, &slot, rng);
        let role = pitcher_role(&rated);
        let others = assign_secondary_positions(Position::Pitcher, rng.profile());
        Classification {
            bats,
            throws,
            primary: Position::Pitcher,
            others,
            role: Some(role),
            delivery: Some(delivery),
            rated,
        }
    }

    fn classify_hitter(
        &self,
        ctx: &RatingContext<'_>,
        request: &GenerationRequest,
        rng: &mut GenerationRng,
    ) -> Classification {
        let requested = match request.position {
            Some(Position::Pitcher) => {
                warn!("hitter requested at P; drawing a fielding position instead");
                None
            }
            other => other,
        };
        let position = requested.unwrap_or_else(|| assign_primary_position(rng.profile()));
        let (bats, throws) = assign_bats_throws(position, rng.profile());
        let others = assign_secondary_positions(position, rng.profile());
        let slot = HitterSlot {
            position,
            bats,
            pin: request.hitter_archetype,
        };
        let rated = self.strategy.rate_hitter(ctx, &slot, rng);
        Classification {
            bats,
            throws,
            primary: position,
            others,
            role: None,
            delivery: None,
            rated,
        }
    }
}

/// Starter or reliever: bullpen preferences win, then the strategy's own
/// role, then endurance.
fn pitcher_role(rated: &RatedPlayer) -> SubRole {
    if rated.preferred_role.is_some_and(PitchingRole::is_bullpen) {
        return SubRole::Reliever;
    }
    rated.role.unwrap_or_else(|| role_for_endurance(&rated.ratings))
}

fn role_for_endurance(ratings: &Ratings) -> SubRole {
    let endurance = ratings.get(&AttributeKey::Endurance).copied().unwrap_or(0);
    if endurance > STARTER_ENDURANCE_CUTOFF {
        SubRole::Starter
    } else {
        SubRole::Reliever
    }
}

/// Potentials for every rated key; unthrown pitches stay at zero.
fn project_potentials(record: &mut PlayerRecord, rng: &mut GenerationRng) {
    for (key, value) in &record.ratings {
        if !key.has_potential() {
            continue;
        }
        let potential = if key.is_pitch() && *value <= 0 {
            0
        } else {
            potential::project(*value, record.age, rng.growth())
        };
        record.potentials.insert(*key, potential);
    }
}

fn graft_value(base: i32) -> i32 {
    clamp_rating(trunc_f64_to_i32(f64::from(base) * GRAFT_ALLOCATION))
}

/// Rarely give a pitcher a usable bat and a DH tag.
fn graft_hitting(record: &mut PlayerRecord, rng: &mut GenerationRng) {
    if rng.identity().gen_range(0..PITCHER_HITTING_GRAFT_ODDS) != 0 {
        return;
    }
    for key in GRAFTED_HITTING_KEYS {
        if record.ratings.contains_key(&key) {
            continue;
        }
        let base = rng.identity().gen_range(10..=99);
        let value = graft_value(base);
        record.ratings.insert(key, value);
        let potential = potential::project(value, record.age, rng.growth());
        record.potentials.insert(key, potential);
    }
    if !record.other_positions.contains(&Position::DesignatedHitter) {
        record.other_positions.push(Position::DesignatedHitter);
    }
    debug!("{} grafted a hitting profile", record.player_id);
}

/// Very rarely give a hitter a pitching arsenal. The player stays a hitter.
fn graft_pitching(record: &mut PlayerRecord, rng: &mut GenerationRng) {
    if rng.identity().gen_range(0..HITTER_PITCHING_GRAFT_ODDS) != 0 {
        return;
    }
    for key in GRAFTED_PITCHING_KEYS {
        let mut base = uniform_int(LEGACY_CORE_BOUNDS, rng.identity());
        if key == AttributeKey::Endurance {
            base = legacy::wobble_endurance(base, rng.identity());
        }
        let value = graft_value(base);
        record.ratings.insert(key, value);
        let potential = potential::project(value, record.age, rng.growth());
        record.potentials.insert(key, potential);
    }
    let delivery = roll_delivery(rng.identity());
    for (pitch, base) in legacy::roll_repertoire(record.throws, delivery, rng.identity()) {
        let value = if base > 0 { graft_value(base) } else { 0 };
        record.ratings.insert(pitch, value);
        let potential = if value > 0 {
            potential::project(value, record.age, rng.growth())
        } else {
            0
        };
        record.potentials.insert(pitch, potential);
    }
    record.role = Some(role_for_endurance(&record.ratings));
    record.delivery = Some(delivery);
    if !record.other_positions.contains(&Position::Pitcher) {
        record.other_positions.push(Position::Pitcher);
    }
    debug!("{} grafted a pitching arsenal", record.player_id);
}
