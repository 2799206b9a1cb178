//! VecDB Explorer query converter
//!
//! Converts a saved unified query into the vector database's wire format,
//! or a raw wire query back into a unified query.
//!
//! Usage:
//!   vecdb-query [--attributes <file>] [--settings <file>] [--reverse] [--verbose] [<query-file>]
//!
//! The query is read from `<query-file>`, or from stdin when omitted. The
//! converted JSON is printed to stdout; logs go to stderr.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use vecdb_explorer::config::default_settings_path;
use vecdb_explorer::logging::{LogLevel, LogOutput, LoggingConfig, LoggingSystem};
use vecdb_explorer::{DiscoveredAttribute, QueryConverter, QuerySettings, UnifiedQuery, WireQuery};

/// Command line arguments
struct Args {
    /// Unified (or wire, with --reverse) query file; stdin when absent
    input: Option<PathBuf>,
    /// Discovered attributes JSON file
    attributes: Option<PathBuf>,
    /// Settings file overriding the default location
    settings: Option<PathBuf>,
    /// Convert wire → unified instead of unified → wire
    reverse: bool,
    verbose: bool,
}

impl Args {
    fn parse() -> Result<Self, String> {
        let mut args = std::env::args().skip(1);
        let mut parsed = Args {
            input: None,
            attributes: None,
            settings: None,
            reverse: false,
            verbose: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--attributes" | "-a" => {
                    let path = args.next().ok_or("Missing attributes file")?;
                    parsed.attributes = Some(PathBuf::from(path));
                }
                "--settings" | "-s" => {
                    let path = args.next().ok_or("Missing settings file")?;
                    parsed.settings = Some(PathBuf::from(path));
                }
                "--reverse" | "-r" => parsed.reverse = true,
                "--verbose" | "-v" => parsed.verbose = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other if other.starts_with('-') => {
                    return Err(format!("Unknown argument: {}", other));
                }
                other => parsed.input = Some(PathBuf::from(other)),
            }
        }

        Ok(parsed)
    }
}

fn print_usage() {
    eprintln!("VecDB Explorer query converter");
    eprintln!();
    eprintln!("Usage: vecdb-query [OPTIONS] [QUERY_FILE]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -a, --attributes <file>  Discovered attributes (JSON array)");
    eprintln!("  -s, --settings <file>    Query settings file (TOML or JSON)");
    eprintln!("  -r, --reverse            Convert a wire query back to a unified query");
    eprintln!("  -v, --verbose            Enable debug logging");
    eprintln!("  -h, --help               Show this help message");
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read query file {:?}", path)),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read query from stdin")?;
            Ok(buffer)
        }
    }
}

fn load_attributes(path: Option<&PathBuf>) -> Result<Vec<DiscoveredAttribute>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read attributes file {:?}", path))?;
    serde_json::from_str(&json).with_context(|| format!("Invalid attributes file {:?}", path))
}

fn main() -> Result<()> {
    let args = Args::parse().map_err(anyhow::Error::msg)?;

    let level = if args.verbose { LogLevel::Debug } else { LogLevel::Warn };
    let _logging = LoggingSystem::init(
        LoggingConfig::new()
            .with_level(level)
            .with_output(LogOutput::Console),
    )
    .context("Failed to initialize logging")?;

    let settings_path = args.settings.clone().unwrap_or_else(default_settings_path);
    let settings = QuerySettings::load_from(&settings_path)
        .with_context(|| format!("Failed to load settings from {:?}", settings_path))?;
    let converter = QueryConverter::with_settings(settings);

    let input = read_input(args.input.as_ref())?;
    let output = if args.reverse {
        let wire = WireQuery::from_json(&input).context("Failed to parse wire query")?;
        let unified = converter.from_wire(&wire);
        serde_json::to_string_pretty(&unified)?
    } else {
        let attributes = load_attributes(args.attributes.as_ref())?;
        let query: UnifiedQuery =
            serde_json::from_str(&input).context("Failed to parse unified query")?;
        debug!(attributes = attributes.len(), "Converting unified query");
        serde_json::to_string_pretty(&converter.to_wire(&query, &attributes))?
    };

    println!("{}", output);
    Ok(())
}
