//! Canonical rating keys and the label normalization shared by every component.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every rating the engine samples, stores, or displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKey {
    Ch,
    Ph,
    Sp,
    Eye,
    Gf,
    Pl,
    Vl,
    Sc,
    Fa,
    Arm,
    Endurance,
    Control,
    Movement,
    HoldRunner,
    Fb,
    Cu,
    Cb,
    Sl,
    Si,
    Scb,
    Kn,
    Durability,
}

/// Keys harvested from hitter rows.
pub const HITTER_KEYS: [AttributeKey; 11] = [
    AttributeKey::Ch,
    AttributeKey::Ph,
    AttributeKey::Sp,
    AttributeKey::Eye,
    AttributeKey::Gf,
    AttributeKey::Pl,
    AttributeKey::Vl,
    AttributeKey::Sc,
    AttributeKey::Fa,
    AttributeKey::Arm,
    AttributeKey::Durability,
];

/// Non-pitch keys harvested from pitcher rows.
pub const PITCHER_KEYS: [AttributeKey; 9] = [
    AttributeKey::Endurance,
    AttributeKey::Control,
    AttributeKey::Movement,
    AttributeKey::HoldRunner,
    AttributeKey::Fa,
    AttributeKey::Arm,
    AttributeKey::Gf,
    AttributeKey::Vl,
    AttributeKey::Durability,
];

/// Pitch-type keys; a value of zero means the pitch is not thrown.
pub const PITCH_KEYS: [AttributeKey; 7] = [
    AttributeKey::Fb,
    AttributeKey::Cu,
    AttributeKey::Cb,
    AttributeKey::Sl,
    AttributeKey::Si,
    AttributeKey::Scb,
    AttributeKey::Kn,
];

impl AttributeKey {
    pub const ALL: [Self; 22] = [
        Self::Ch,
        Self::Ph,
        Self::Sp,
        Self::Eye,
        Self::Gf,
        Self::Pl,
        Self::Vl,
        Self::Sc,
        Self::Fa,
        Self::Arm,
        Self::Endurance,
        Self::Control,
        Self::Movement,
        Self::HoldRunner,
        Self::Fb,
        Self::Cu,
        Self::Cb,
        Self::Sl,
        Self::Si,
        Self::Scb,
        Self::Kn,
        Self::Durability,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ch => "ch",
            Self::Ph => "ph",
            Self::Sp => "sp",
            Self::Eye => "eye",
            Self::Gf => "gf",
            Self::Pl => "pl",
            Self::Vl => "vl",
            Self::Sc => "sc",
            Self::Fa => "fa",
            Self::Arm => "arm",
            Self::Endurance => "endurance",
            Self::Control => "control",
            Self::Movement => "movement",
            Self::HoldRunner => "hold_runner",
            Self::Fb => "fb",
            Self::Cu => "cu",
            Self::Cb => "cb",
            Self::Sl => "sl",
            Self::Si => "si",
            Self::Scb => "scb",
            Self::Kn => "kn",
            Self::Durability => "durability",
        }
    }

    #[must_use]
    pub const fn is_pitch(self) -> bool {
        matches!(
            self,
            Self::Fb | Self::Cu | Self::Cb | Self::Sl | Self::Si | Self::Scb | Self::Kn
        )
    }

    /// Whether the key carries a `pot_` ceiling in exported records.
    #[must_use]
    pub const fn has_potential(self) -> bool {
        !matches!(self, Self::Durability)
    }

    /// Key of the exported potential column, e.g. `pot_ch`.
    #[must_use]
    pub fn potential_label(self) -> String {
        format!("pot_{}", self.as_str())
    }

    /// Map a free-form label to its canonical key.
    ///
    /// Accepts canonical keys, short abbreviations (`as`, `en`, `co`, `mo`),
    /// `pot_`-prefixed potential labels, long names ("contact", "slider"),
    /// and slash, dash, or colon separated multi-word labels ("Hold Runner",
    /// "vs-lefty").
    #[must_use]
    pub fn normalize(label: &str) -> Option<Self> {
        let lowered = label.trim().to_lowercase();
        let spaced = lowered.replace(['/', '-', ':'], " ");
        let token = spaced.split_whitespace().collect::<Vec<_>>().join("_");
        let token = token.strip_prefix("pot_").unwrap_or(&token);
        let key = match token {
            "ch" | "contact" => Self::Ch,
            "ph" | "power" => Self::Ph,
            "sp" | "speed" => Self::Sp,
            "eye" | "discipline" => Self::Eye,
            "gf" | "ground_fly" => Self::Gf,
            "pl" | "pull" => Self::Pl,
            "vl" | "vs_lefty" | "vs_left" => Self::Vl,
            "sc" | "scoring_position" => Self::Sc,
            "fa" | "fielding" => Self::Fa,
            "arm" | "as" | "arm_strength" => Self::Arm,
            "endurance" | "en" => Self::Endurance,
            "control" | "co" => Self::Control,
            "movement" | "mo" | "mv" => Self::Movement,
            "hold_runner" | "hold" => Self::HoldRunner,
            "fb" | "fastball" => Self::Fb,
            "cu" | "changeup" => Self::Cu,
            "cb" | "curveball" => Self::Cb,
            "sl" | "slider" => Self::Sl,
            "si" | "sinker" => Self::Si,
            "scb" | "screwball" => Self::Scb,
            "kn" | "knuckleball" => Self::Kn,
            "durability" | "dur" => Self::Durability,
            _ => return None,
        };
        Some(key)
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s).ok_or_else(|| format!("unknown rating key: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names_round_trip() {
        for key in AttributeKey::ALL {
            assert_eq!(AttributeKey::normalize(key.as_str()), Some(key));
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
    }

    #[test]
    fn normalize_accepts_alternate_spellings() {
        assert_eq!(AttributeKey::normalize("AS"), Some(AttributeKey::Arm));
        assert_eq!(AttributeKey::normalize("en"), Some(AttributeKey::Endurance));
        assert_eq!(AttributeKey::normalize("mv"), Some(AttributeKey::Movement));
        assert_eq!(AttributeKey::normalize("pot_ch"), Some(AttributeKey::Ch));
        assert_eq!(AttributeKey::normalize("pot_co"), Some(AttributeKey::Control));
        assert_eq!(
            AttributeKey::normalize("  Hold   Runner "),
            Some(AttributeKey::HoldRunner)
        );
        assert_eq!(AttributeKey::normalize("ground/fly"), Some(AttributeKey::Gf));
        assert_eq!(AttributeKey::normalize("vs-lefty"), Some(AttributeKey::Vl));
        assert_eq!(AttributeKey::normalize("hold:runner"), Some(AttributeKey::HoldRunner));
        assert_eq!(AttributeKey::normalize("pot_Slider"), Some(AttributeKey::Sl));
        assert_eq!(AttributeKey::normalize(""), None);
        assert_eq!(AttributeKey::normalize("batting_average"), None);
    }

    #[test]
    fn key_groups_partition_pitches() {
        assert!(PITCH_KEYS.iter().all(|key| key.is_pitch()));
        assert!(HITTER_KEYS.iter().all(|key| !key.is_pitch()));
        assert!(PITCHER_KEYS.iter().all(|key| !key.is_pitch()));
        assert!(!AttributeKey::Durability.has_potential());
        assert_eq!(AttributeKey::HoldRunner.potential_label(), "pot_hold_runner");
    }
}
