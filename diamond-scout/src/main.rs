mod reports;
mod seeds;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use diamond_ratings::{
    CsvSource, Curve, DisplayMode, EngineConfig, GenerationRequest, HitterArchetype,
    PitcherArchetype, Position, SampleSource, ScoutingEngine, StrategyId,
};
use log::warn;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use reports::{Roster, ScoutedPlayer};
use seeds::{SeedInfo, resolve_seed_inputs, split_csv};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PoolKind {
    /// Mixed draft class with a closer quota
    Draft,
    /// Position players only
    Hitters,
    /// Pitchers only
    Pitchers,
}

#[derive(Debug, Parser)]
#[command(name = "diamond-scout", version = "0.1.0")]
#[command(about = "Seeded player generation and percentile scouting reports")]
struct Args {
    /// Which kind of pool to generate
    #[arg(long, value_enum, default_value_t = PoolKind::Draft)]
    pool: PoolKind,

    /// Players per seed
    #[arg(long, default_value_t = 20)]
    count: usize,

    /// Seeds to run (comma-separated integers or `random`)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Pin an archetype, e.g. `power` or `closer`
    #[arg(long)]
    archetype: Option<String>,

    /// Primary position for hitters, e.g. `SS`
    #[arg(long)]
    position: Option<String>,

    /// Rating strategy: normalized or legacy
    #[arg(long)]
    profile: Option<String>,

    /// Apply draft scaling to hitter and pitcher pools (draft pools always scale)
    #[arg(long)]
    for_draft: bool,

    /// Historical CSV to build pools from
    #[arg(long)]
    data: Option<PathBuf>,

    /// Display mode: raw, scale_99, or stars
    #[arg(long)]
    display: Option<String>,

    /// Compress display values with the logistic curve
    #[arg(long)]
    curve: bool,

    /// Logistic curve steepness
    #[arg(long)]
    curve_k: Option<f64>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console", "csv"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start_time = Instant::now();
    let seed_infos = resolve_seed_inputs(&split_csv(&args.seeds))?;
    let config = build_config(&args, EngineConfig::from_env());
    let source = args
        .data
        .clone()
        .map_or_else(|| config.csv_source(), |path| CsvSource::new(vec![path]));
    let mut engine = ScoutingEngine::new(source, config);

    let rosters: Vec<Roster> = seed_infos
        .iter()
        .map(|info| scout(&args, &mut engine, *info))
        .collect();

    write_reports(&args, &rosters, start_time)
}

/// Layer command-line overrides on top of the environment configuration.
fn build_config(args: &Args, mut config: EngineConfig) -> EngineConfig {
    if let Some(profile) = &args.profile {
        config.strategy = StrategyId::resolve(profile);
    }
    if let Some(display) = &args.display {
        config.display.mode = DisplayMode::resolve(display);
    }
    if args.curve {
        config.display.curve = Curve::Logistic;
    }
    if let Some(k) = args.curve_k {
        if k.is_finite() && k > 0.0 {
            config.display.k = k;
        } else {
            warn!("ignoring --curve-k {k}; steepness must be positive");
        }
    }
    if let Some(raw) = args.archetype.as_deref() {
        let (hitter, pitcher) = parse_archetype(raw, args.pool);
        config.hitter_archetype = hitter.or(config.hitter_archetype);
        config.pitcher_archetype = pitcher.or(config.pitcher_archetype);
    }
    config
}

/// Resolve an archetype name against the roles the pool generates.
fn parse_archetype(raw: &str, pool: PoolKind) -> (Option<HitterArchetype>, Option<PitcherArchetype>) {
    let hitter = (pool != PoolKind::Pitchers)
        .then(|| HitterArchetype::parse(raw))
        .flatten();
    let pitcher = (pool != PoolKind::Hitters)
        .then(|| PitcherArchetype::parse(raw))
        .flatten();
    if hitter.is_none() && pitcher.is_none() {
        warn!("unknown archetype {raw:?} for a {pool:?} pool; choosing by weight");
    }
    (hitter, pitcher)
}

fn parse_position(args: &Args) -> Option<Position> {
    let raw = args.position.as_deref()?;
    let parsed = Position::parse(raw);
    if parsed.is_none() {
        warn!("unknown position {raw:?}; drawing positions by weight");
    }
    parsed
}

/// Generate and grade one roster; names are released so every seed replays alone.
fn scout<S: SampleSource>(args: &Args, engine: &mut ScoutingEngine<S>, info: SeedInfo) -> Roster {
    if args.verbose {
        let origin = if info.random { "random" } else { "given" };
        eprintln!("🎲 seed {} ({origin})", info.seed.to_string().yellow());
    }
    engine.release_names();
    let mut rng = info.rng();
    let records = match args.pool {
        PoolKind::Draft => engine.generate_draft_pool(args.count, &mut rng),
        PoolKind::Hitters | PoolKind::Pitchers => {
            let mut request: GenerationRequest = engine.request(args.pool == PoolKind::Pitchers);
            request.for_draft = args.for_draft;
            request.position = parse_position(args);
            (0..args.count)
                .map(|_| engine.generate(&request, &mut rng))
                .collect()
        }
    };
    let players = records
        .into_iter()
        .map(|record| {
            let display = ScoutedPlayer::columns(&record)
                .into_iter()
                .map(|key| (key, engine.display(&record, key)))
                .collect();
            ScoutedPlayer { record, display }
        })
        .collect();
    Roster {
        seed: info.seed,
        players,
    }
}

fn write_reports(args: &Args, rosters: &[Roster], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, rosters)?,
        "markdown" => reports::generate_markdown_report(&mut output_target, rosters)?,
        "csv" => reports::generate_csv_report(&mut output_target, rosters)?,
        _ => reports::generate_console_report(
            &mut output_target,
            rosters,
            start_time.elapsed(),
            args.verbose,
        )?,
    }

    output_target
        .flush_inner()
        .context("failed to flush report output")?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diamond_ratings::InMemorySource;
    use std::io::Write;

    fn base_args() -> Args {
        Args {
            pool: PoolKind::Draft,
            count: 5,
            seeds: "42".to_string(),
            archetype: None,
            position: None,
            profile: None,
            for_draft: false,
            data: None,
            display: None,
            curve: false,
            curve_k: None,
            report: "json".to_string(),
            output: None,
            verbose: false,
        }
    }

    fn engine(config: EngineConfig) -> ScoutingEngine<InMemorySource> {
        ScoutingEngine::new(InMemorySource::default(), config)
    }

    #[test]
    fn cli_overrides_layer_on_environment() {
        let args = Args {
            profile: Some("legacy".to_string()),
            display: Some("stars".to_string()),
            curve: true,
            curve_k: Some(3.5),
            archetype: Some("closer".to_string()),
            ..base_args()
        };
        let config = build_config(&args, EngineConfig::default());
        assert_eq!(config.strategy, StrategyId::Legacy);
        assert_eq!(config.display.mode, DisplayMode::Stars);
        assert_eq!(config.display.curve, Curve::Logistic);
        assert!((config.display.k - 3.5).abs() < f64::EPSILON);
        assert_eq!(config.pitcher_archetype, Some(PitcherArchetype::Closer));
        assert_eq!(config.hitter_archetype, None);
    }

    #[test]
    fn bad_overrides_keep_defaults() {
        let args = Args {
            curve_k: Some(-1.0),
            archetype: Some("slugger".to_string()),
            ..base_args()
        };
        let config = build_config(&args, EngineConfig::default());
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn archetype_resolves_per_pool() {
        assert_eq!(
            parse_archetype("power", PoolKind::Hitters),
            (Some(HitterArchetype::Power), None)
        );
        assert_eq!(
            parse_archetype("closer", PoolKind::Hitters),
            (None, None)
        );
        assert_eq!(
            parse_archetype("closer", PoolKind::Pitchers),
            (None, Some(PitcherArchetype::Closer))
        );
    }

    #[test]
    fn scout_builds_pitcher_rosters_with_display() {
        let args = Args {
            pool: PoolKind::Pitchers,
            for_draft: true,
            ..base_args()
        };
        let mut engine = engine(EngineConfig::default());
        let roster = scout(&args, &mut engine, SeedInfo::from_numeric(8));
        assert_eq!(roster.seed, 8);
        assert_eq!(roster.players.len(), 5);
        for player in &roster.players {
            assert!(player.record.is_pitcher);
            assert!((17..=23).contains(&player.record.age));
            assert!(player.display.contains_key(&diamond_ratings::AttributeKey::Control));
        }
    }

    #[test]
    fn scout_replays_each_seed_independently() {
        let args = Args {
            pool: PoolKind::Hitters,
            position: Some("SS".to_string()),
            ..base_args()
        };
        let mut engine = engine(EngineConfig::default());
        let first = scout(&args, &mut engine, SeedInfo::from_numeric(3));
        let _ = scout(&args, &mut engine, SeedInfo::from_numeric(4));
        let again = scout(&args, &mut engine, SeedInfo::from_numeric(3));
        let ids = |roster: &Roster| {
            roster
                .players
                .iter()
                .map(|p| p.record.player_id.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(&first), ids(&again));
        assert!(
            first
                .players
                .iter()
                .all(|p| p.record.primary_position == Position::Shortstop)
        );
    }

    #[test]
    fn write_reports_emits_json_output() {
        let temp = std::env::temp_dir().join("diamond-scout-test-report.json");
        let args = Args {
            output: Some(temp.clone()),
            ..base_args()
        };
        let mut engine = engine(EngineConfig::default());
        let rosters = vec![scout(&args, &mut engine, SeedInfo::from_numeric(42))];
        write_reports(&args, &rosters, Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("\"seed\": 42"));
    }

    #[test]
    fn write_reports_fails_for_missing_directory() {
        let args = Args {
            output: Some(PathBuf::from("/definitely/not/here/report.json")),
            ..base_args()
        };
        assert!(write_reports(&args, &[], Instant::now()).is_err());
    }

    #[test]
    fn output_target_stdout_writes() {
        let mut target = OutputTarget::new(None).unwrap();
        target.write_all(b"ok").unwrap();
        target.flush().unwrap();
    }
}
