//! Ludorum - sports-day scoring from the command line
//!
//! ## Commands
//!
//! - `score`: score a whole session file into records and standings
//! - `allocate`: allocate points for one event's entries
//! - `record`: check whether a best score breaks a record
//! - `duration`: parse a clock-style time in a metric unit
//! - `age-group`: resolve the configured age group for a date of birth
//! - `config`: print the effective scoring configuration

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, Level};

use ludorum_core::{
    allocate, evaluate_record, resolve_age_group, score_session, Duration, DurationUnit, EventKind,
    MeasurementNature, RawEntry, ScoringConfig, SessionReport, SessionSheet, StandingRecord,
};

/// Shown wherever the roster has no name for an id.
const UNKNOWN_NAME: &str = "Unknown";

#[derive(Parser)]
#[command(name = "ludorum")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Competition scoring: points, records and standings", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// Scoring configuration file (JSON); the standard tables apply when omitted
    #[arg(short, long, global = true, env = "LUDORUM_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score every event of a session file and aggregate the standings
    Score {
        /// Session file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a readable summary instead of the JSON report
        #[arg(long)]
        text: bool,

        /// Also write the updated session (records applied) to this path
        #[arg(long)]
        write_back: Option<PathBuf>,
    },

    /// Allocate points for a JSON array of raw entries
    Allocate {
        /// Entries file (JSON array)
        #[arg(short, long)]
        entries: PathBuf,

        /// Event kind: team or individual
        #[arg(short, long, default_value = "individual")]
        kind: EventKind,

        /// Event id stamped on each result
        #[arg(long, default_value = "event")]
        event_id: String,
    },

    /// Check whether a best score breaks a standing record
    Record {
        /// Best score this session, in the event's metric
        #[arg(long)]
        best: String,

        /// Metric unit (e.g. minutes, mm:ss, meters)
        #[arg(long, default_value = "")]
        metric: String,

        /// Measurement nature: time, length, height or score
        #[arg(long)]
        nature: Option<MeasurementNature>,

        /// Standing record value; omit when no record exists
        #[arg(long)]
        prior: Option<String>,

        /// Holder of the standing record
        #[arg(long, default_value = "")]
        holder: String,

        /// Display name of this session's winner
        #[arg(long)]
        winner: String,
    },

    /// Parse a clock-style time and print it in seconds
    Duration {
        /// Metric unit the value is written in (e.g. minutes, hh:mm:ss)
        #[arg(long)]
        metric: String,

        /// Value to parse (e.g. 1:02.50)
        value: String,
    },

    /// Resolve the configured age group for a date of birth
    AgeGroup {
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: NaiveDate,

        /// Reference date for the age calculation (YYYY-MM-DD)
        #[arg(long)]
        on: NaiveDate,
    },

    /// Print the effective scoring configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    ludorum_core::init_tracing(cli.json, level);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Score {
            input,
            output,
            text,
            write_back,
        } => cmd_score(
            &config,
            &input,
            output.as_deref(),
            text,
            write_back.as_deref(),
        ),
        Commands::Allocate {
            entries,
            kind,
            event_id,
        } => cmd_allocate(&config, &entries, kind, &event_id),
        Commands::Record {
            best,
            metric,
            nature,
            prior,
            holder,
            winner,
        } => cmd_record(&best, &metric, nature, prior, &holder, &winner),
        Commands::Duration { metric, value } => cmd_duration(&metric, &value),
        Commands::AgeGroup { dob, on } => cmd_age_group(&config, dob, on),
        Commands::Config => print_json(&config),
    }
}

fn load_config(path: Option<&Path>) -> Result<ScoringConfig> {
    match path {
        Some(path) => ScoringConfig::from_path(path)
            .with_context(|| format!("Failed to load scoring config {}", path.display())),
        None => Ok(ScoringConfig::default()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_score(
    config: &ScoringConfig,
    input: &Path,
    output: Option<&Path>,
    text: bool,
    write_back: Option<&Path>,
) -> Result<()> {
    let mut sheet = SessionSheet::from_path(input)
        .with_context(|| format!("Failed to load session {}", input.display()))?;
    let report = score_session(&mut sheet, config).context("Failed to score session")?;
    info!(
        session_id = %report.session_id,
        digest = %report.standings_digest,
        "session scored"
    );

    let rendered = if text {
        render_report_text(&report)
    } else {
        serde_json::to_string_pretty(&report)?
    };
    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write report {}", path.display()))?;
            println!("Wrote report to {:?}", path);
        }
        None => println!("{}", rendered),
    }

    if let Some(path) = write_back {
        fs::write(path, serde_json::to_string_pretty(&sheet)?)
            .with_context(|| format!("Failed to write session {}", path.display()))?;
        println!("Wrote updated session to {:?}", path);
    }
    Ok(())
}

fn cmd_allocate(
    config: &ScoringConfig,
    path: &Path,
    kind: EventKind,
    event_id: &str,
) -> Result<()> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read entries {}", path.display()))?;
    let entries: Vec<RawEntry> = serde_json::from_str(&json).context("Invalid entries JSON")?;
    let results = allocate(event_id, &entries, kind, &config.points);
    print_json(&results)
}

fn cmd_record(
    best: &str,
    metric: &str,
    nature: Option<MeasurementNature>,
    prior: Option<String>,
    holder: &str,
    winner: &str,
) -> Result<()> {
    let prior = prior.map(|value| StandingRecord::new(value, holder));
    let verdict = evaluate_record(prior.as_ref(), best, nature, metric, winner);
    print_json(&verdict)
}

fn cmd_duration(metric: &str, value: &str) -> Result<()> {
    let unit = DurationUnit::from_metric(metric)
        .with_context(|| format!("'{}' is not a duration unit", metric))?;
    let duration = Duration::parse(value, unit)
        .with_context(|| format!("'{}' is not a valid {:?} value", value, unit))?;
    println!("Seconds:    {:.2}", duration.as_secs_f64());
    println!("Normalized: {}", duration.format(unit));
    Ok(())
}

fn cmd_age_group(config: &ScoringConfig, dob: NaiveDate, on: NaiveDate) -> Result<()> {
    match resolve_age_group(dob, on, &config.age_groups) {
        Some(label) => println!("{}", label),
        None => println!("No configured age group matches a participant born {}", dob),
    }
    Ok(())
}

fn render_report_text(report: &SessionReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Session {}\n", report.session_id));

    let broken: Vec<String> = report
        .events
        .iter()
        .filter_map(|score| {
            let record = score.record.as_ref()?.new_record.as_ref()?;
            Some(format!(
                "  {}: {} ({})",
                score.event_id, record.value, record.holder
            ))
        })
        .collect();
    if !broken.is_empty() {
        out.push_str("\nRecords\n");
        for line in broken {
            out.push_str(&line);
            out.push('\n');
        }
    }

    out.push_str("\nHouse points\n");
    for house in &report.standings.house_points {
        out.push_str(&format!(
            "  {:>2}. {:<20} {:>8.2}\n",
            house.rank,
            house.name.as_deref().unwrap_or(UNKNOWN_NAME),
            house.points
        ));
    }

    let ludorum = &report.standings.ludorum;
    for (title, groups) in [
        ("Victor Ludorum", &ludorum.male),
        ("Victrix Ludorum", &ludorum.female),
    ] {
        for group in groups {
            out.push_str(&format!("\n{} {}\n", title, group.age_group));
            for entry in &group.entries {
                out.push_str(&format!(
                    "  {:>2}. {:<20} {:>4}\n",
                    entry.rank,
                    entry.name.as_deref().unwrap_or(UNKNOWN_NAME),
                    entry.vlp
                ));
            }
        }
    }

    out.push_str(&format!("\nDigest {}\n", report.standings_digest));
    out
}
