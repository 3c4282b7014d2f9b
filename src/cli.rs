// Command-line host
// Caches an analysis payload and prints its timing report as JSON.
// The report core never reads the cache itself: the payload is loaded here
// and handed over explicitly.

use std::path::PathBuf;

use crate::config::TimingConfig;
use crate::error::{BeatBuddyError, BeatBuddyResult};
use crate::report::{build_report, parse_payload, TimingReport};
use crate::state::{self, DbConnection, ANALYSIS_CACHE_KEY};

pub const USAGE: &str = "\
Usage:
  beatbuddy <payload.json> [--config <file>] [--db <file>]
  beatbuddy --cached [--config <file>] [--db <file>]

Builds a timing report from an analysis payload and prints it as JSON.
A payload read from a file is also stored in the analysis cache;
--cached rebuilds the report from the most recently stored payload.";

/// Where the payload comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadSource {
    File(PathBuf),
    Cached,
}

/// Parsed command-line options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub source: PayloadSource,
    pub config_path: Option<PathBuf>,
    pub db_path: Option<PathBuf>,
}

impl CliOptions {
    /// Parse arguments, excluding the program name
    pub fn parse<I, S>(args: I) -> BeatBuddyResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut source = None;
        let mut config_path = None;
        let mut db_path = None;

        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--cached" => set_source(&mut source, PayloadSource::Cached)?,
                "--config" => config_path = Some(PathBuf::from(flag_value(&mut args, "--config")?)),
                "--db" => db_path = Some(PathBuf::from(flag_value(&mut args, "--db")?)),
                "-h" | "--help" => return Err(BeatBuddyError::Usage(USAGE.to_string())),
                flag if flag.starts_with("--") => {
                    return Err(BeatBuddyError::Usage(format!("Unknown option {}\n\n{}", flag, USAGE)))
                }
                path => set_source(&mut source, PayloadSource::File(PathBuf::from(path)))?,
            }
        }

        let source = source.ok_or_else(|| BeatBuddyError::Usage(USAGE.to_string()))?;
        Ok(CliOptions {
            source,
            config_path,
            db_path,
        })
    }
}

fn set_source(slot: &mut Option<PayloadSource>, source: PayloadSource) -> BeatBuddyResult<()> {
    if slot.is_some() {
        return Err(BeatBuddyError::Usage(format!(
            "Only one payload source may be given\n\n{}",
            USAGE
        )));
    }
    *slot = Some(source);
    Ok(())
}

fn flag_value(args: &mut impl Iterator<Item = String>, flag: &str) -> BeatBuddyResult<String> {
    args.next()
        .ok_or_else(|| BeatBuddyError::Usage(format!("{} requires a value\n\n{}", flag, USAGE)))
}

/// Run the host with the given options and return the report
pub fn execute(options: &CliOptions) -> BeatBuddyResult<TimingReport> {
    let config = match &options.config_path {
        Some(path) => TimingConfig::load(path)?,
        None => TimingConfig::default(),
    };

    let db = match &options.db_path {
        Some(path) => state::open_db(path)?,
        None => state::init_db()?,
    };

    let payload_json = load_payload_json(&options.source, &db)?;
    let payload = parse_payload(&payload_json)?;

    if let PayloadSource::File(_) = options.source {
        state::save_analysis(&db, ANALYSIS_CACHE_KEY, &payload_json)?;
    }

    Ok(build_report(&payload, &config))
}

fn load_payload_json(source: &PayloadSource, db: &DbConnection) -> BeatBuddyResult<String> {
    match source {
        PayloadSource::File(path) => {
            log::info!("Reading analysis payload from {}", path.display());
            Ok(std::fs::read_to_string(path)?)
        }
        PayloadSource::Cached => state::load_latest_analysis(db, ANALYSIS_CACHE_KEY)?
            .map(|cached| {
                log::info!("Using cached analysis {} from {}", cached.id, cached.created_at);
                cached.payload_json
            })
            .ok_or_else(|| BeatBuddyError::NoCachedAnalysis(ANALYSIS_CACHE_KEY.to_string())),
    }
}

/// Entry point used by the binary: parse process args, print the report
pub fn run() -> BeatBuddyResult<()> {
    let options = CliOptions::parse(std::env::args().skip(1))?;
    let report = execute(&options)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
