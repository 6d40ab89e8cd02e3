//! Identity and body generation: age, names, height and weight, durability,
//! and appearance.
//!
//! None of this touches rating pools; it only fills the parts of a record that
//! make a generated player look like a person.
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::constants::{
    DURABILITY_BOUNDS, DURABILITY_DECLINE_PER_YEAR, DURABILITY_GROWTH_PER_YEAR,
    DURABILITY_PIVOT_AGE, FALLBACK_NAME, HEIGHT_RANGE, PLAYER_ID_RANGE, WEIGHT_RANGE,
};
use crate::numbers::trunc_f64_to_i32;
use crate::rng::{roll_dice, weighted_pick};
use crate::source::HistoricalRow;

/// Dice tables for player age, keyed by how the player enters the league.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeTable {
    /// Draft prospects.
    Amateur,
    /// Established players.
    #[default]
    Fictional,
    /// Depth players signed to fill a roster.
    Filler,
}

impl AgeTable {
    /// `(base, dice, faces)`.
    #[must_use]
    pub const fn dice(self) -> (i32, u32, i32) {
        match self {
            Self::Amateur => (14, 3, 3),
            Self::Fictional => (14, 4, 6),
            Self::Filler => (17, 4, 6),
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "amateur" | "draft" => Some(Self::Amateur),
            "fictional" | "established" => Some(Self::Fictional),
            "filler" => Some(Self::Filler),
            _ => None,
        }
    }
}

/// How to pick a player's age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeSpec {
    Table(AgeTable),
    /// Uniform inclusive range; reversed bounds are swapped.
    Range(u8, u8),
}

impl Default for AgeSpec {
    fn default() -> Self {
        Self::Table(AgeTable::default())
    }
}

/// Roll an age.
pub fn roll_age<R: Rng + ?Sized>(spec: AgeSpec, rng: &mut R) -> u8 {
    match spec {
        AgeSpec::Range(a, b) => {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            rng.gen_range(low..=high)
        }
        AgeSpec::Table(table) => {
            let (base, dice, faces) = table.dice();
            u8::try_from(roll_dice(base, dice, faces, rng)).unwrap_or(u8::MAX)
        }
    }
}

/// Roster id of the form `P####`.
pub fn roll_player_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("P{}", rng.gen_range(PLAYER_ID_RANGE.0..=PLAYER_ID_RANGE.1))
}

/// Height in inches and weight in pounds.
pub fn roll_body<R: Rng + ?Sized>(rng: &mut R) -> (u8, u16) {
    let height = rng.gen_range(HEIGHT_RANGE.0..=HEIGHT_RANGE.1);
    let weight = rng.gen_range(WEIGHT_RANGE.0..=WEIGHT_RANGE.1);
    (height, weight)
}

/// Durability from `35 + 10d5`, shifted by age, with an extra toll on pitchers.
pub fn roll_durability<R: Rng + ?Sized>(age: u8, is_pitcher: bool, rng: &mut R) -> i32 {
    let mut durability = roll_dice(35, 10, 5, rng);
    let age = f64::from(age);
    let pivot = f64::from(DURABILITY_PIVOT_AGE);
    if age > pivot {
        durability -= trunc_f64_to_i32((age - pivot) * DURABILITY_DECLINE_PER_YEAR);
    } else {
        durability += trunc_f64_to_i32((pivot - age) * DURABILITY_GROWTH_PER_YEAR);
    }
    if is_pitcher {
        durability -= roll_dice(5, 2, 1, rng);
    }
    durability.clamp(DURABILITY_BOUNDS.0, DURABILITY_BOUNDS.1)
}

/// A drawn name plus the ethnicity it was listed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerName {
    pub first: String,
    pub last: String,
    pub ethnicity: String,
}

impl PlayerName {
    #[must_use]
    pub fn fallback() -> Self {
        let (first, last, ethnicity) = FALLBACK_NAME;
        Self {
            first: first.to_string(),
            last: last.to_string(),
            ethnicity: ethnicity.to_string(),
        }
    }
}

/// Name pool grouped by ethnicity, with used-name tracking so a pool never
/// hands out the same person twice.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    pool: BTreeMap<String, Vec<(String, String)>>,
    used: BTreeSet<(String, String)>,
}

impl NameRegistry {
    /// Registry over every row carrying a first name, last name, and ethnicity.
    #[must_use]
    pub fn from_rows(rows: &[HistoricalRow]) -> Self {
        let mut pool: BTreeMap<String, Vec<(String, String)>> = BTreeMap::new();
        for row in rows {
            if let (Some(first), Some(last), Some(ethnicity)) =
                (&row.first_name, &row.last_name, &row.ethnicity)
            {
                pool.entry(ethnicity.clone())
                    .or_default()
                    .push((first.clone(), last.clone()));
            }
        }
        Self {
            pool,
            used: BTreeSet::new(),
        }
    }

    /// Total names known, used or not.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.pool.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn used(&self) -> usize {
        self.used.len()
    }

    /// Forget which names were handed out.
    pub fn reset(&mut self) {
        self.used.clear();
    }

    /// Draw an unused name: a random ethnicity with names left, then a random
    /// name within it. Falls back to `John Doe` once the pool is exhausted.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> PlayerName {
        let open: Vec<(&String, Vec<&(String, String)>)> = self
            .pool
            .iter()
            .filter_map(|(ethnicity, names)| {
                let free: Vec<&(String, String)> =
                    names.iter().filter(|name| !self.used.contains(*name)).collect();
                (!free.is_empty()).then_some((ethnicity, free))
            })
            .collect();
        let Some((ethnicity, free)) = open.choose(rng) else {
            return PlayerName::fallback();
        };
        let Some((first, last)) = free.choose(rng).copied().cloned() else {
            return PlayerName::fallback();
        };
        let name = PlayerName {
            first: first.clone(),
            last: last.clone(),
            ethnicity: (*ethnicity).clone(),
        };
        self.used.insert((first, last));
        name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinTone {
    Light,
    Medium,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HairColor {
    Blonde,
    Brown,
    Black,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacialHair {
    CleanShaven,
    Mustache,
    Goatee,
    Beard,
}

macro_rules! label_enum {
    ($ty:ty { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $ty {
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }
    };
}

label_enum!(SkinTone { Light => "light", Medium => "medium", Dark => "dark" });
label_enum!(HairColor { Blonde => "blonde", Brown => "brown", Black => "black", Red => "red" });
label_enum!(FacialHair {
    CleanShaven => "clean_shaven",
    Mustache => "mustache",
    Goatee => "goatee",
    Beard => "beard",
});

/// Visual traits for portrait rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    pub skin_tone: SkinTone,
    pub hair_color: HairColor,
    pub facial_hair: FacialHair,
}

fn skin_tone_weights(ethnicity: &str) -> [(SkinTone, u32); 3] {
    let (light, medium, dark) = match ethnicity {
        "Anglo" => (60, 30, 10),
        "African" => (5, 15, 80),
        "Asian" => (40, 55, 5),
        "Hispanic" => (30, 50, 20),
        _ => (33, 34, 33),
    };
    [
        (SkinTone::Light, light),
        (SkinTone::Medium, medium),
        (SkinTone::Dark, dark),
    ]
}

fn hair_color_weights(ethnicity: &str) -> [(HairColor, u32); 4] {
    let (blonde, brown, black, red) = match ethnicity {
        "Anglo" => (25, 40, 25, 10),
        "African" => (0, 20, 80, 0),
        "Asian" => (0, 10, 90, 0),
        _ => (15, 40, 40, 5),
    };
    [
        (HairColor::Blonde, blonde),
        (HairColor::Brown, brown),
        (HairColor::Black, black),
        (HairColor::Red, red),
    ]
}

fn facial_hair_weights(ethnicity: &str, age: u8) -> [(FacialHair, u32); 4] {
    let (mut clean, mut mustache, goatee, mut beard): (u32, u32, u32, u32) = match ethnicity {
        "African" => (55, 15, 10, 20),
        "Asian" => (70, 10, 10, 10),
        "Hispanic" => (55, 15, 15, 15),
        _ => (60, 10, 10, 20),
    };
    if age < 25 {
        clean += 20;
        beard = beard.saturating_sub(10);
    } else if age > 35 {
        mustache += 10;
        beard += 10;
        clean = clean.saturating_sub(20);
    }
    [
        (FacialHair::CleanShaven, clean),
        (FacialHair::Mustache, mustache),
        (FacialHair::Goatee, goatee),
        (FacialHair::Beard, beard),
    ]
}

/// Draw appearance from ethnicity-keyed tables; unknown ethnicities use the
/// default rows.
pub fn roll_appearance<R: Rng + ?Sized>(ethnicity: &str, age: u8, rng: &mut R) -> Appearance {
    Appearance {
        skin_tone: weighted_pick(&skin_tone_weights(ethnicity), rng).unwrap_or(SkinTone::Medium),
        hair_color: weighted_pick(&hair_color_weights(ethnicity), rng).unwrap_or(HairColor::Black),
        facial_hair: weighted_pick(&facial_hair_weights(ethnicity, age), rng)
            .unwrap_or(FacialHair::CleanShaven),
    }
}
