//! Centralized tuning constants for rating generation and display.
//!
//! Archetype bands live in the embedded catalog asset; everything here is
//! structural math that callers should not need to tweak at runtime.

// Logging ------------------------------------------------------------------
pub(crate) const DEBUG_ENV_VAR: &str = "DIAMOND_DEBUG_LOGS";

// Configuration keys -------------------------------------------------------
pub(crate) const ENV_RATING_PROFILE: &str = "DIAMOND_RATING_PROFILE";
pub(crate) const ENV_RATING_DISPLAY: &str = "DIAMOND_RATING_DISPLAY";
pub(crate) const ENV_DISPLAY_MIN: &str = "DIAMOND_DISPLAY_MIN";
pub(crate) const ENV_DISPLAY_MAX: &str = "DIAMOND_DISPLAY_MAX";
pub(crate) const ENV_RATING_CURVE: &str = "DIAMOND_RATING_CURVE";
pub(crate) const ENV_RATING_CURVE_K: &str = "DIAMOND_RATING_CURVE_K";
pub(crate) const ENV_HITTER_ARCHETYPE: &str = "DIAMOND_HITTER_ARCHETYPE";
pub(crate) const ENV_PITCHER_ARCHETYPE: &str = "DIAMOND_PITCHER_ARCHETYPE";
pub(crate) const ENV_SEED: &str = "DIAMOND_SEED";
pub(crate) const ENV_DATA_DIR: &str = "DIAMOND_DATA_DIR";

// Historical source --------------------------------------------------------
pub(crate) const SOURCE_CANDIDATES: [&str; 2] = ["players_normalized.csv", "players.csv"];
pub(crate) const STARTER_ENDURANCE_THRESHOLD: i32 = 60;

// Rating bounds ------------------------------------------------------------
pub const RATING_MIN: i32 = 10;
pub const RATING_MAX: i32 = 99;
pub(crate) const DEFAULT_SAMPLE_FALLBACK: i32 = 50;
pub(crate) const DEFAULT_SAMPLE_JITTER: f64 = 2.5;

// Display ------------------------------------------------------------------
pub(crate) const DISPLAY_MIN_DEFAULT: i32 = 35;
pub(crate) const DISPLAY_MAX_DEFAULT: i32 = 99;
pub(crate) const CURVE_K_DEFAULT: f64 = 6.0;
pub(crate) const STAR_TIERS: u8 = 5;
pub(crate) const TOP_PERCENT_MIN: i32 = 1;
pub(crate) const TOP_PERCENT_MAX: i32 = 99;

// Hitter synthesis ---------------------------------------------------------
pub(crate) const PLATOON_SHIFT: i32 = 4;
pub(crate) const PLATOON_FLOOR: i32 = 30;
pub(crate) const EYE_SAMPLE_WEIGHT: f64 = 0.7;
pub(crate) const EYE_BAT_WEIGHT: f64 = 0.3;
pub(crate) const EYE_CONTACT_SHARE: f64 = 0.6;
pub(crate) const EYE_JITTER: f64 = 2.0;

// Pitcher synthesis --------------------------------------------------------
pub(crate) const PITCHER_VL_LEFTY_SHIFT: i32 = 4;
pub(crate) const PITCHER_VL_RIGHTY_SHIFT: i32 = 2;
pub(crate) const PITCHER_CONTROL_FLOOR: i32 = 50;
pub(crate) const PITCHER_MOVEMENT_FLOOR: i32 = 52;
pub(crate) const STARTER_ENDURANCE_CUTOFF: i32 = 55;
pub(crate) const STARTER_PITCH_COUNT: (usize, usize) = (3, 5);
pub(crate) const RELIEVER_PITCH_COUNT: (usize, usize) = (2, 4);
pub(crate) const FASTBALL_ARM_GAP_MAX: i32 = 6;
pub(crate) const PRIMARY_PITCH_FALLBACK: i32 = 60;
pub(crate) const SECONDARY_PITCH_FALLBACK: i32 = 55;
pub(crate) const DELIVERY_OVERHAND_WEIGHT: u32 = 95;
pub(crate) const DELIVERY_SIDEARM_WEIGHT: u32 = 5;

// Secondary skill grafts ---------------------------------------------------
pub(crate) const PITCHER_HITTING_GRAFT_ODDS: u32 = 100;
pub(crate) const HITTER_PITCHING_GRAFT_ODDS: u32 = 1_000;
pub(crate) const GRAFT_ALLOCATION: f64 = 0.75;

// Potential projection -----------------------------------------------------
pub(crate) const YOUTH_AGE_LIMIT: u8 = 22;
pub(crate) const PRIME_AGE_LIMIT: u8 = 28;
pub(crate) const PEAK_AGE_LIMIT: u8 = 32;
pub(crate) const YOUTH_GROWTH: (i32, i32) = (10, 30);
pub(crate) const PRIME_GROWTH: (i32, i32) = (5, 15);
pub(crate) const PEAK_DRIFT: (i32, i32) = (-5, 5);
pub(crate) const VETERAN_DECLINE: (i32, i32) = (0, 10);

// Draft scaling ------------------------------------------------------------
pub(crate) const DRAFT_SCALE_BY_AGE: [(u8, f64); 4] = [(18, 0.75), (19, 0.80), (20, 0.84), (21, 0.88)];
pub(crate) const DRAFT_SCALE_MATURE: f64 = 0.90;
pub(crate) const DRAFT_RATING_FLOOR: i32 = 20;
pub(crate) const DRAFT_PITCHER_RATE: f64 = 0.4;
pub(crate) const DRAFT_CLOSER_RATE: f64 = 0.18;

// Identity -----------------------------------------------------------------
pub(crate) const HEIGHT_RANGE: (u8, u8) = (68, 78);
pub(crate) const WEIGHT_RANGE: (u16, u16) = (160, 250);
pub(crate) const PLAYER_ID_RANGE: (u32, u32) = (1_000, 9_999);
pub const DEFAULT_HEIGHT: u8 = 72;
pub const DEFAULT_WEIGHT: u16 = 195;
pub const DEFAULT_DURABILITY: i32 = 50;
pub(crate) const DURABILITY_BOUNDS: (i32, i32) = (20, 95);
pub(crate) const DURABILITY_PIVOT_AGE: u8 = 30;
pub(crate) const DURABILITY_DECLINE_PER_YEAR: f64 = 1.25;
pub(crate) const DURABILITY_GROWTH_PER_YEAR: f64 = 0.3;
pub(crate) const FALLBACK_NAME: (&str, &str, &str) = ("John", "Doe", "Unknown");

// Strike zone --------------------------------------------------------------
pub(crate) const ZONE_BASE_BOTTOM: f64 = 1.5;
pub(crate) const ZONE_BASE_TOP: f64 = 3.5;
pub(crate) const ZONE_BOTTOM_PER_INCH: f64 = 0.01;
pub(crate) const ZONE_TOP_PER_INCH: f64 = 0.015;
pub(crate) const ZONE_BOTTOM_MIN: f64 = 1.2;
pub(crate) const ZONE_TOP_MAX: f64 = 4.3;
pub(crate) const ZONE_MIN_HEIGHT: f64 = 1.8;

// Legacy allocation --------------------------------------------------------
pub(crate) const LEGACY_BUDGET_PER_ATTRIBUTE: f64 = 56.0;
pub(crate) const LEGACY_BUDGET_SPREAD: f64 = 6.0;
pub(crate) const LEGACY_OUTLIER_CHANCE: f64 = 0.04;
pub(crate) const LEGACY_OUTLIER_BOUNDS: (i32, i32) = (72, 90);
pub(crate) const LEGACY_CORE_BOUNDS: (i32, i32) = (20, 95);
pub(crate) const LEGACY_PITCH_COUNT: (usize, usize) = (2, 5);
pub(crate) const LEGACY_FASTBALL_BOUNDS: (i32, i32) = (40, 99);
pub(crate) const LEGACY_PITCH_BOUNDS: (i32, i32) = (20, 95);
pub(crate) const LEGACY_ENDURANCE_WOBBLE: (i32, i32) = (30, 69);
pub(crate) const LEGACY_ENDURANCE_DELTA_MAX: i32 = 20;
pub(crate) const LEGACY_EYE_JITTER: f64 = 4.0;
pub(crate) const LEGACY_LEFTY_MOVEMENT_CAP: i32 = 92;
pub(crate) const LEGACY_LEFTY_CONTROL_FLOOR: i32 = 50;
pub(crate) const LEGACY_FIELDING_MEAN: f64 = 54.0;
pub(crate) const LEGACY_FIELDING_SPREAD: f64 = 5.0;
pub(crate) const LEGACY_FIELDING_BOUNDS: (i32, i32) = (40, 74);
pub(crate) const LEGACY_CLOSER_FASTBALL_FLOOR: i32 = 85;
pub(crate) const LEGACY_CLOSER_SLIDER_FLOOR: (i32, i32) = (65, 90);
pub(crate) const LEGACY_CLOSER_SINKER_FLOOR: i32 = 60;
pub(crate) const LEGACY_CLOSER_GF_FLOOR: i32 = 55;
