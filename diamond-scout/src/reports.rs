use anyhow::Result;
use colored::Colorize;
use diamond_ratings::{AttributeKey, DisplayRating, PlayerRecord};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Write;
use std::time::Duration;

/// Ratings shown for hitters, in roster column order.
pub const HITTER_COLUMNS: [AttributeKey; 8] = [
    AttributeKey::Ch,
    AttributeKey::Ph,
    AttributeKey::Eye,
    AttributeKey::Sp,
    AttributeKey::Vl,
    AttributeKey::Fa,
    AttributeKey::Arm,
    AttributeKey::Durability,
];

/// Ratings shown for pitchers ahead of their repertoire.
pub const PITCHER_COLUMNS: [AttributeKey; 6] = [
    AttributeKey::Endurance,
    AttributeKey::Control,
    AttributeKey::Movement,
    AttributeKey::HoldRunner,
    AttributeKey::Arm,
    AttributeKey::Durability,
];

/// One generated player with the display ratings a scout sees.
#[derive(Debug, Clone, Serialize)]
pub struct ScoutedPlayer {
    pub record: PlayerRecord,
    pub display: BTreeMap<AttributeKey, DisplayRating>,
}

impl ScoutedPlayer {
    /// Keys worth showing for this player: role columns, then thrown pitches.
    #[must_use]
    pub fn columns(record: &PlayerRecord) -> Vec<AttributeKey> {
        if record.is_pitcher {
            PITCHER_COLUMNS
                .iter()
                .copied()
                .chain(record.repertoire().into_iter().map(|(key, _)| key))
                .collect()
        } else {
            HITTER_COLUMNS.to_vec()
        }
    }

    fn line(&self) -> String {
        self.display
            .iter()
            .map(|(key, rating)| format!("{} {}", key.as_str().to_uppercase(), rating.text()))
            .collect::<Vec<_>>()
            .join(" | ")
    }

    fn name(&self) -> String {
        format!("{} {}", self.record.first_name, self.record.last_name)
    }

    fn slot(&self) -> &'static str {
        if self.record.is_pitcher {
            self.record
                .preferred_pitching_role
                .map_or("P", |role| role.code())
        } else {
            self.record.primary_position.code()
        }
    }
}

/// Every player generated from one seed.
#[derive(Debug, Clone, Serialize)]
pub struct Roster {
    pub seed: u64,
    pub players: Vec<ScoutedPlayer>,
}

pub fn generate_console_report(
    out: &mut dyn Write,
    rosters: &[Roster],
    total_duration: Duration,
    verbose: bool,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📋 Scouting Report".bright_cyan().bold())?;
    writeln!(out, "{}", "==================".cyan())?;

    for roster in rosters {
        let pitchers = roster.players.iter().filter(|p| p.record.is_pitcher).count();
        writeln!(
            out,
            "{} {} ({} players, {} pitchers)",
            "Seed".bold(),
            roster.seed.to_string().yellow(),
            roster.players.len(),
            pitchers
        )?;
        for player in &roster.players {
            writeln!(
                out,
                "  {:<6} {:<4} {:<22} age {:>2}  {}",
                player.record.player_id,
                player.slot().green(),
                player.name().bold(),
                player.record.age,
                player.record.archetype_label().magenta()
            )?;
            writeln!(out, "     {}", player.line())?;
            if verbose {
                let potentials = player
                    .display
                    .keys()
                    .filter(|key| key.has_potential())
                    .map(|key| format!("{}={}", key.potential_label(), player.record.potential(*key)))
                    .collect::<Vec<_>>()
                    .join(" ");
                writeln!(out, "     {}", potentials.dimmed())?;
            }
        }
        writeln!(out)?;
    }

    writeln!(out, "Generated in {total_duration:?}")?;
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, rosters: &[Roster]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(rosters)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, rosters: &[Roster]) -> Result<()> {
    writeln!(out, "# Diamond Scouting Report\n")?;

    for roster in rosters {
        writeln!(out, "## Seed {}\n", roster.seed)?;
        if roster.players.is_empty() {
            writeln!(out, "_No players generated._\n")?;
            continue;
        }
        writeln!(out, "| ID | Name | Age | Slot | Archetype | Ratings |")?;
        writeln!(out, "|----|------|-----|------|-----------|---------|")?;
        for player in &roster.players {
            writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} |",
                player.record.player_id,
                player.name(),
                player.record.age,
                player.slot(),
                player.record.archetype_label(),
                player.line()
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Flat records, one row per player, prefixed with the seed.
pub fn generate_csv_report(out: &mut dyn Write, rosters: &[Roster]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    let mut headers: Option<Vec<String>> = None;

    for roster in rosters {
        for player in &roster.players {
            let flat = player.record.to_flat();
            if headers.is_none() {
                let mut row = vec!["seed".to_string()];
                row.extend(flat.keys().cloned());
                writer.write_record(&row)?;
                headers = Some(row);
            }
            let mut row = vec![roster.seed.to_string()];
            row.extend(flat.values().map(cell_text));
            writer.write_record(&row)?;
        }
    }
    if headers.is_none() {
        writer.write_record(["seed"])?;
    }
    writer.flush()?;
    Ok(())
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
