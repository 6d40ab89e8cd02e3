//! Generated player records and their flat export shape.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::archetypes::{HitterArchetype, PitcherArchetype};
use crate::attributes::AttributeKey;
use crate::constants::{
    DEFAULT_DURABILITY, DEFAULT_HEIGHT, DEFAULT_WEIGHT, ZONE_BASE_BOTTOM, ZONE_BASE_TOP,
    ZONE_BOTTOM_MIN, ZONE_BOTTOM_PER_INCH, ZONE_MIN_HEIGHT, ZONE_TOP_MAX, ZONE_TOP_PER_INCH,
};
use crate::identity::Appearance;
use crate::potential::{draft_rating_scale, scale_for_draft};
use crate::positions::{Delivery, Hand, PitchingRole, Position, SubRole};

/// Vertical strike zone in feet, derived from height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrikeZone {
    pub bottom: f64,
    pub top: f64,
}

impl StrikeZone {
    /// Zone for a batter `height_in` inches tall.
    #[must_use]
    pub fn for_height(height_in: u8) -> Self {
        let delta = f64::from(height_in) - f64::from(DEFAULT_HEIGHT);
        let bottom = ZONE_BOTTOM_PER_INCH
            .mul_add(delta, ZONE_BASE_BOTTOM)
            .max(ZONE_BOTTOM_MIN);
        let mut top = ZONE_TOP_PER_INCH.mul_add(delta, ZONE_BASE_TOP).min(ZONE_TOP_MAX);
        if top - bottom < ZONE_MIN_HEIGHT {
            top = bottom + ZONE_MIN_HEIGHT;
        }
        Self {
            bottom: round_thousandths(bottom),
            top: round_thousandths(top),
        }
    }
}

fn round_thousandths(value: f64) -> f64 {
    (value * 1_000.0).round() / 1_000.0
}

/// One generated player. Ownership passes entirely to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub player_id: String,
    pub first_name: String,
    pub last_name: String,
    pub ethnicity: String,
    pub age: u8,
    pub is_pitcher: bool,
    pub bats: Hand,
    pub throws: Hand,
    pub primary_position: Position,
    #[serde(default)]
    pub other_positions: Vec<Position>,
    /// Starter or reliever; pitchers only, or hitters with a grafted arsenal.
    #[serde(default)]
    pub role: Option<SubRole>,
    #[serde(default)]
    pub preferred_pitching_role: Option<PitchingRole>,
    #[serde(default)]
    pub delivery: Option<Delivery>,
    #[serde(default)]
    pub hitter_archetype: Option<HitterArchetype>,
    #[serde(default)]
    pub pitcher_archetype: Option<PitcherArchetype>,
    pub ratings: BTreeMap<AttributeKey, i32>,
    #[serde(default)]
    pub potentials: BTreeMap<AttributeKey, i32>,
    #[serde(default)]
    pub fielding_potentials: BTreeMap<Position, u16>,
    pub height: u8,
    pub weight: u16,
    pub zone: StrikeZone,
    pub appearance: Appearance,
}

impl PlayerRecord {
    /// Current rating, `0` when unset.
    #[must_use]
    pub fn rating(&self, key: AttributeKey) -> i32 {
        self.ratings.get(&key).copied().unwrap_or(0)
    }

    /// Potential rating, `0` when unset.
    #[must_use]
    pub fn potential(&self, key: AttributeKey) -> i32 {
        self.potentials.get(&key).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn durability(&self) -> i32 {
        self.ratings
            .get(&AttributeKey::Durability)
            .copied()
            .filter(|value| *value > 0)
            .unwrap_or(DEFAULT_DURABILITY)
    }

    /// Label of whichever archetype drove generation, empty when none did.
    #[must_use]
    pub fn archetype_label(&self) -> &'static str {
        if self.is_pitcher {
            self.pitcher_archetype.map_or("", PitcherArchetype::as_str)
        } else {
            self.hitter_archetype.map_or("", HitterArchetype::as_str)
        }
    }

    /// Pitches the player actually throws, with their ratings.
    #[must_use]
    pub fn repertoire(&self) -> Vec<(AttributeKey, i32)> {
        crate::attributes::PITCH_KEYS
            .iter()
            .map(|key| (*key, self.rating(*key)))
            .filter(|(_, value)| *value > 0)
            .collect()
    }

    /// Discount current ratings for a draft prospect of this record's age.
    ///
    /// Potentials and durability are left alone.
    pub fn apply_draft_scale(&mut self) {
        let scale = draft_rating_scale(self.age);
        for (key, value) in &mut self.ratings {
            if *key != AttributeKey::Durability {
                *value = scale_for_draft(*value, scale);
            }
        }
    }

    /// Fill unset physical fields with their documented defaults.
    pub fn apply_defaults(&mut self) {
        if self.height == 0 {
            self.height = DEFAULT_HEIGHT;
        }
        if self.weight == 0 {
            self.weight = DEFAULT_WEIGHT;
        }
        let durability = self.durability();
        self.ratings.insert(AttributeKey::Durability, durability);
    }

    /// Flat key to value map covering every rating and `pot_` key.
    ///
    /// Unset ratings export as `0`; height, weight, and durability export
    /// their defaults when unset.
    #[must_use]
    pub fn to_flat(&self) -> BTreeMap<String, Value> {
        let mut flat = BTreeMap::new();
        let mut put = |key: &str, value: Value| {
            flat.insert(key.to_string(), value);
        };
        put("player_id", Value::from(self.player_id.as_str()));
        put("first_name", Value::from(self.first_name.as_str()));
        put("last_name", Value::from(self.last_name.as_str()));
        put("ethnicity", Value::from(self.ethnicity.as_str()));
        put("age", Value::from(self.age));
        put("is_pitcher", Value::from(self.is_pitcher));
        put("bats", Value::from(self.bats.code()));
        put("throws", Value::from(self.throws.code()));
        put("primary_position", Value::from(self.primary_position.code()));
        put(
            "other_positions",
            Value::from(
                self.other_positions
                    .iter()
                    .map(|pos| pos.code())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
        );
        put("role", Value::from(self.role.map_or("", SubRole::code)));
        put(
            "preferred_pitching_role",
            Value::from(self.preferred_pitching_role.map_or("", PitchingRole::code)),
        );
        put(
            "delivery",
            Value::from(match self.delivery {
                Some(Delivery::Overhand) => "overhand",
                Some(Delivery::Sidearm) => "sidearm",
                None => "",
            }),
        );
        put(
            "hitter_archetype",
            Value::from(self.hitter_archetype.map_or("", HitterArchetype::as_str)),
        );
        put(
            "pitcher_archetype",
            Value::from(self.pitcher_archetype.map_or("", PitcherArchetype::as_str)),
        );
        for key in AttributeKey::ALL {
            let value = if key == AttributeKey::Durability {
                self.durability()
            } else {
                self.rating(key)
            };
            put(key.as_str(), Value::from(value));
            if key.has_potential() {
                put(&key.potential_label(), Value::from(self.potential(key)));
            }
        }
        let fielding: serde_json::Map<String, Value> = self
            .fielding_potentials
            .iter()
            .map(|(pos, value)| (pos.code().to_string(), Value::from(*value)))
            .collect();
        put("pot_fielding", Value::Object(fielding));
        put(
            "height",
            Value::from(if self.height == 0 { DEFAULT_HEIGHT } else { self.height }),
        );
        put(
            "weight",
            Value::from(if self.weight == 0 { DEFAULT_WEIGHT } else { self.weight }),
        );
        put("zone_bottom", Value::from(self.zone.bottom));
        put("zone_top", Value::from(self.zone.top));
        put("skin_tone", Value::from(self.appearance.skin_tone.as_str()));
        put("hair_color", Value::from(self.appearance.hair_color.as_str()));
        put("facial_hair", Value::from(self.appearance.facial_hair.as_str()));
        flat
    }
}
