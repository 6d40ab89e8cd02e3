//! Roster classification: roles, positions, handedness, and the weighted
//! tables that assign them.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::rng::weighted_pick;

/// Coarse player role used for distribution bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Hitter,
    Pitcher,
}

impl Role {
    #[must_use]
    pub const fn from_is_pitcher(is_pitcher: bool) -> Self {
        if is_pitcher { Self::Pitcher } else { Self::Hitter }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hitter => "HITTERS",
            Self::Pitcher => "PITCHERS",
        }
    }
}

/// Pitcher sub-role: starter or reliever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubRole {
    #[serde(rename = "SP")]
    Starter,
    #[serde(rename = "RP")]
    Reliever,
}

impl SubRole {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Starter => "SP",
            Self::Reliever => "RP",
        }
    }
}

impl fmt::Display for SubRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Bullpen usage preference stored alongside the coarse role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PitchingRole {
    #[serde(rename = "SP")]
    Starter,
    #[serde(rename = "RP")]
    Reliever,
    #[serde(rename = "CL")]
    Closer,
    #[serde(rename = "SU")]
    Setup,
    #[serde(rename = "MR")]
    MiddleRelief,
    #[serde(rename = "LR")]
    LongRelief,
}

impl PitchingRole {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Starter => "SP",
            Self::Reliever => "RP",
            Self::Closer => "CL",
            Self::Setup => "SU",
            Self::MiddleRelief => "MR",
            Self::LongRelief => "LR",
        }
    }

    /// Bullpen roles always classify the pitcher as a reliever.
    #[must_use]
    pub const fn is_bullpen(self) -> bool {
        !matches!(self, Self::Starter)
    }

    /// Parse a role cell such as `SP1`, `cl`, or `LR`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let token = raw.trim().to_uppercase();
        if token.starts_with("SP") {
            return Some(Self::Starter);
        }
        match token.as_str() {
            "RP" => Some(Self::Reliever),
            "CL" => Some(Self::Closer),
            "SU" => Some(Self::Setup),
            "MR" => Some(Self::MiddleRelief),
            "LR" => Some(Self::LongRelief),
            _ => None,
        }
    }
}

impl fmt::Display for PitchingRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Defensive positions, including the designated hitter slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "P")]
    Pitcher,
    #[serde(rename = "C")]
    Catcher,
    #[serde(rename = "1B")]
    FirstBase,
    #[serde(rename = "2B")]
    SecondBase,
    #[serde(rename = "3B")]
    ThirdBase,
    #[serde(rename = "SS")]
    Shortstop,
    #[serde(rename = "LF")]
    LeftField,
    #[serde(rename = "CF")]
    CenterField,
    #[serde(rename = "RF")]
    RightField,
    #[serde(rename = "DH")]
    DesignatedHitter,
}

impl Position {
    /// Fielding positions in scorebook order.
    pub const FIELD: [Self; 9] = [
        Self::Pitcher,
        Self::Catcher,
        Self::FirstBase,
        Self::SecondBase,
        Self::ThirdBase,
        Self::Shortstop,
        Self::LeftField,
        Self::CenterField,
        Self::RightField,
    ];

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Pitcher => "P",
            Self::Catcher => "C",
            Self::FirstBase => "1B",
            Self::SecondBase => "2B",
            Self::ThirdBase => "3B",
            Self::Shortstop => "SS",
            Self::LeftField => "LF",
            Self::CenterField => "CF",
            Self::RightField => "RF",
            Self::DesignatedHitter => "DH",
        }
    }

    /// Parse a position code case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let position = match raw.trim().to_uppercase().as_str() {
            "P" => Self::Pitcher,
            "C" => Self::Catcher,
            "1B" => Self::FirstBase,
            "2B" => Self::SecondBase,
            "3B" => Self::ThirdBase,
            "SS" => Self::Shortstop,
            "LF" => Self::LeftField,
            "CF" => Self::CenterField,
            "RF" => Self::RightField,
            "DH" => Self::DesignatedHitter,
            _ => return None,
        };
        Some(position)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown position: {s}"))
    }
}

/// Batting or throwing side.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Hand {
    #[serde(rename = "L")]
    Left,
    #[default]
    #[serde(rename = "R")]
    Right,
    #[serde(rename = "S")]
    Switch,
}

impl Hand {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Left => "L",
            Self::Right => "R",
            Self::Switch => "S",
        }
    }
}

/// Pitching arm slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
    Overhand,
    Sidearm,
}

/// Draft popularity of each primary position among generated hitters.
const PRIMARY_POSITION_WEIGHTS: [(Position, u32); 8] = [
    (Position::Catcher, 19),
    (Position::FirstBase, 15),
    (Position::SecondBase, 14),
    (Position::Shortstop, 13),
    (Position::ThirdBase, 14),
    (Position::LeftField, 16),
    (Position::CenterField, 13),
    (Position::RightField, 16),
];

/// Draw a hitter's primary position from the popularity table.
pub fn assign_primary_position<R: Rng + ?Sized>(rng: &mut R) -> Position {
    weighted_pick(&PRIMARY_POSITION_WEIGHTS, rng).unwrap_or(Position::CenterField)
}

const OUTFIELD_BATS_THROWS: [((Hand, Hand), u32); 6] = [
    ((Hand::Right, Hand::Left), 1),
    ((Hand::Right, Hand::Right), 50),
    ((Hand::Left, Hand::Left), 25),
    ((Hand::Left, Hand::Right), 10),
    ((Hand::Switch, Hand::Left), 4),
    ((Hand::Switch, Hand::Right), 10),
];

const INFIELD_BATS_THROWS: [((Hand, Hand), u32); 3] = [
    ((Hand::Right, Hand::Right), 75),
    ((Hand::Left, Hand::Right), 15),
    ((Hand::Switch, Hand::Right), 10),
];

const FIRST_BASE_BATS_THROWS: [((Hand, Hand), u32); 6] = [
    ((Hand::Right, Hand::Left), 1),
    ((Hand::Right, Hand::Right), 40),
    ((Hand::Left, Hand::Left), 32),
    ((Hand::Left, Hand::Right), 13),
    ((Hand::Switch, Hand::Left), 4),
    ((Hand::Switch, Hand::Right), 10),
];

/// Draw a `(bats, throws)` pair for a position.
///
/// Catchers and middle infielders never throw left-handed; positions without
/// a dedicated table use the first-base distribution.
pub fn assign_bats_throws<R: Rng + ?Sized>(position: Position, rng: &mut R) -> (Hand, Hand) {
    let table: &[((Hand, Hand), u32)] = match position {
        Position::Pitcher | Position::LeftField | Position::CenterField | Position::RightField => {
            &OUTFIELD_BATS_THROWS
        }
        Position::Catcher | Position::SecondBase | Position::ThirdBase | Position::Shortstop => {
            &INFIELD_BATS_THROWS
        }
        Position::FirstBase | Position::DesignatedHitter => &FIRST_BASE_BATS_THROWS,
    };
    weighted_pick(table, rng).unwrap_or((Hand::Right, Hand::Right))
}

/// Chance (out of 100) and weighted candidates for a secondary position.
fn secondary_table(primary: Position) -> Option<(u32, &'static [(Position, u32)])> {
    let entry: (u32, &'static [(Position, u32)]) = match primary {
        Position::Pitcher => (
            1,
            &[
                (Position::FirstBase, 30),
                (Position::LeftField, 25),
                (Position::RightField, 45),
            ],
        ),
        Position::Catcher => (
            2,
            &[
                (Position::FirstBase, 30),
                (Position::ThirdBase, 20),
                (Position::LeftField, 20),
                (Position::RightField, 30),
            ],
        ),
        Position::FirstBase => (
            2,
            &[
                (Position::Catcher, 5),
                (Position::ThirdBase, 15),
                (Position::LeftField, 50),
                (Position::RightField, 30),
            ],
        ),
        Position::SecondBase => (
            5,
            &[
                (Position::ThirdBase, 40),
                (Position::Shortstop, 50),
                (Position::CenterField, 10),
            ],
        ),
        Position::ThirdBase => (
            5,
            &[
                (Position::Catcher, 5),
                (Position::FirstBase, 15),
                (Position::SecondBase, 20),
                (Position::Shortstop, 10),
                (Position::LeftField, 25),
                (Position::RightField, 25),
            ],
        ),
        Position::Shortstop => (
            5,
            &[
                (Position::SecondBase, 50),
                (Position::ThirdBase, 40),
                (Position::CenterField, 10),
            ],
        ),
        Position::LeftField => (
            9,
            &[
                (Position::Catcher, 5),
                (Position::FirstBase, 25),
                (Position::ThirdBase, 15),
                (Position::CenterField, 20),
                (Position::RightField, 35),
            ],
        ),
        Position::CenterField => (
            6,
            &[
                (Position::SecondBase, 10),
                (Position::Shortstop, 10),
                (Position::LeftField, 40),
                (Position::RightField, 40),
            ],
        ),
        Position::RightField => (
            9,
            &[
                (Position::Catcher, 5),
                (Position::FirstBase, 25),
                (Position::ThirdBase, 15),
                (Position::LeftField, 35),
                (Position::CenterField, 20),
            ],
        ),
        Position::DesignatedHitter => return None,
    };
    Some(entry)
}

/// Occasionally grant a secondary position based on the primary one.
pub fn assign_secondary_positions<R: Rng + ?Sized>(primary: Position, rng: &mut R) -> Vec<Position> {
    let Some((chance, weights)) = secondary_table(primary) else {
        return Vec::new();
    };
    if rng.gen_range(1..=100) > chance {
        return Vec::new();
    }
    weighted_pick(weights, rng).into_iter().collect()
}

/// Fielding ceiling a player at `primary` could reach at each other position.
const fn fielding_row(primary: Position) -> [u16; 9] {
    // Columns follow `Position::FIELD`.
    match primary {
        Position::Pitcher | Position::Catcher | Position::FirstBase | Position::DesignatedHitter => {
            [60, 10, 100, 20, 60, 10, 90, 40, 80]
        }
        Position::SecondBase => [130, 10, 160, 0, 130, 90, 150, 120, 140],
        Position::ThirdBase => [100, 10, 140, 90, 0, 80, 130, 100, 120],
        Position::Shortstop => [140, 10, 170, 100, 140, 0, 160, 120, 150],
        Position::LeftField => [90, 10, 120, 60, 90, 40, 0, 80, 100],
        Position::CenterField => [110, 10, 150, 80, 110, 70, 140, 0, 130],
        Position::RightField => [90, 10, 130, 60, 90, 40, 110, 80, 0],
    }
}

/// Fielding potentials for every position the player does not already play.
#[must_use]
pub fn fielding_potentials(primary: Position, others: &[Position]) -> Vec<(Position, u16)> {
    let row = fielding_row(primary);
    Position::FIELD
        .iter()
        .zip(row)
        .filter(|(pos, _)| **pos != primary && !others.contains(pos))
        .map(|(pos, value)| (*pos, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn pitching_roles_parse_cells() {
        assert_eq!(PitchingRole::parse("sp1"), Some(PitchingRole::Starter));
        assert_eq!(PitchingRole::parse(" cl "), Some(PitchingRole::Closer));
        assert_eq!(PitchingRole::parse("LR"), Some(PitchingRole::LongRelief));
        assert_eq!(PitchingRole::parse("closer"), None);
        assert!(PitchingRole::Setup.is_bullpen());
        assert!(!PitchingRole::Starter.is_bullpen());
    }

    #[test]
    fn positions_parse_and_serialize_codes() {
        assert_eq!(Position::parse("1b"), Some(Position::FirstBase));
        assert_eq!("ss".parse::<Position>(), Ok(Position::Shortstop));
        assert!(Position::parse("XX").is_none());
        let json = serde_json::to_string(&Position::ThirdBase).unwrap();
        assert_eq!(json, "\"3B\"");
    }

    #[test]
    fn infielders_never_throw_left() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..500 {
            for position in [
                Position::Catcher,
                Position::SecondBase,
                Position::ThirdBase,
                Position::Shortstop,
            ] {
                let (_, throws) = assign_bats_throws(position, &mut rng);
                assert_eq!(throws, Hand::Right);
            }
        }
    }

    #[test]
    fn primary_positions_exclude_pitcher_and_dh() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..500 {
            let position = assign_primary_position(&mut rng);
            assert!(!matches!(position, Position::Pitcher | Position::DesignatedHitter));
        }
    }

    #[test]
    fn secondary_positions_come_from_table() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut granted = 0;
        for _ in 0..5_000 {
            let extra = assign_secondary_positions(Position::LeftField, &mut rng);
            assert!(extra.len() <= 1);
            if let Some(pos) = extra.first() {
                granted += 1;
                assert!(matches!(
                    pos,
                    Position::Catcher
                        | Position::FirstBase
                        | Position::ThirdBase
                        | Position::CenterField
                        | Position::RightField
                ));
            }
        }
        assert!(granted > 250 && granted < 650, "granted {granted}");
        assert!(assign_secondary_positions(Position::DesignatedHitter, &mut rng).is_empty());
    }

    #[test]
    fn fielding_potentials_skip_known_positions() {
        let potentials = fielding_potentials(Position::Shortstop, &[Position::SecondBase]);
        assert_eq!(potentials.len(), 7);
        assert!(potentials.iter().all(|(pos, _)| *pos != Position::Shortstop));
        assert!(potentials.iter().all(|(pos, _)| *pos != Position::SecondBase));
        assert!(potentials.contains(&(Position::FirstBase, 170)));
    }
}
