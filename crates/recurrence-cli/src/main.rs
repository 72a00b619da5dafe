//! `recur` CLI — check, list, validate and export recurring reminder dates.
//!
//! The recurrence is read as JSON from a file (`-i`) or stdin.
//!
//! ## Usage
//!
//! ```sh
//! # Is 2024-02-29 an occurrence of a 31st-anchored monthly reminder?
//! echo '{"anchor":"2024-01-31","kind":{"type":"monthly"}}' | recur check --date 2024-02-29
//!
//! # Occurrences within a calendar month (one date per line)
//! recur list -i reminder.json --month 2024-02
//!
//! # Occurrences within a date range, as a JSON array
//! recur list -i reminder.json --from 2024-01-01 --to 2024-12-31 --json
//!
//! # Reject malformed recurrences (zero frequency, empty weekday set, ...)
//! recur validate -i reminder.json
//!
//! # Export as an RFC 5545 RRULE (or a DTSTART + RRULE block with --ical)
//! recur rrule -i reminder.json --ical
//! ```
//!
//! Set `RUST_LOG=debug` to see evaluation diagnostics on stderr.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use recurrence_engine::RecurrenceSpec;
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "recur",
    version,
    about = "Check and list recurring reminder dates"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Recurrence JSON file (reads from stdin if omitted)
    #[arg(short, long, global = true)]
    input: Option<String>,
}

/// A calendar month given as `YYYY-MM`.
#[derive(Debug, Clone, Copy)]
struct YearMonth {
    year: i32,
    month: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Print whether a date is an occurrence (`true` or `false`)
    Check {
        /// Candidate date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
    },
    /// List occurrences within a date range or a calendar month
    List {
        /// First date of the range (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date, requires = "to", conflicts_with = "month")]
        from: Option<NaiveDate>,
        /// Last date of the range, inclusive (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date, requires = "from")]
        to: Option<NaiveDate>,
        /// Calendar month (YYYY-MM)
        #[arg(long, value_parser = parse_month, required_unless_present = "from")]
        month: Option<YearMonth>,
        /// Print a JSON array instead of one date per line
        #[arg(long)]
        json: bool,
    },
    /// Check the recurrence for malformed fields
    Validate,
    /// Export the recurrence as an RFC 5545 RRULE
    Rrule {
        /// Include the DTSTART line
        #[arg(long)]
        ical: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let raw = read_input(cli.input.as_deref())?;
    let spec = RecurrenceSpec::from_json(&raw).context("Failed to parse recurrence JSON")?;
    debug!(?spec, "loaded recurrence");

    match cli.command {
        Commands::Check { date } => {
            println!("{}", spec.is_occurrence(date));
        }
        Commands::List {
            from,
            to,
            month,
            json,
        } => {
            let dates: Vec<NaiveDate> = match (from, to, month) {
                (Some(from), Some(to), _) => spec.occurrences_between(from, to).collect(),
                (_, _, Some(YearMonth { year, month })) => spec
                    .occurrences_in_month(year, month)
                    .context("Invalid month")?
                    .collect(),
                _ => anyhow::bail!("Either --from/--to or --month is required"),
            };
            if json {
                println!("{}", serde_json::to_string(&dates)?);
            } else {
                for date in dates {
                    println!("{}", date);
                }
            }
        }
        Commands::Validate => {
            spec.validate().context("Invalid recurrence")?;
            println!("valid");
        }
        Commands::Rrule { ical } => {
            let text = match ical {
                true => spec.to_ical(),
                false => spec.to_rrule(),
            }
            .context("Failed to export recurrence")?;
            println!("{}", text);
        }
    }

    Ok(())
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got '{}': {}", s, e))
}

fn parse_month(s: &str) -> std::result::Result<YearMonth, String> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM, got '{}': {}", s, e))?;
    Ok(YearMonth {
        year: first.year(),
        month: first.month(),
    })
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
