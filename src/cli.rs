//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use forecaster_core::{DEFAULT_ENDPOINT, DEFAULT_FILENAME};

/// Environment variable overriding the default endpoint.
pub const ENDPOINT_ENV_VAR: &str = "FORECASTER_ENDPOINT";

/// Query a forecast backend and save the returned spreadsheet.
///
/// Forecaster sends a natural-language prompt to the forecast service and
/// saves the spreadsheet it returns. Pass the query as arguments for a
/// one-shot run, or pipe queries on stdin (one per line).
#[derive(Parser, Debug)]
#[command(name = "forecaster")]
#[command(author, version, about)]
pub struct Args {
    /// Forecast query; words are joined with spaces
    pub query: Vec<String>,

    /// Backend endpoint URL (FORECASTER_ENDPOINT overrides the default)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Directory to save the forecast into
    #[arg(short = 'o', long, default_value = ".")]
    pub output: PathBuf,

    /// Filename for the saved forecast (server-provided name wins if sent)
    #[arg(long, default_value = DEFAULT_FILENAME)]
    pub filename: String,

    /// HTTP connect timeout in seconds (1-3600)
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub connect_timeout: u64,

    /// HTTP read timeout in seconds (1-3600)
    #[arg(long, default_value_t = 300, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub read_timeout: u64,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable ANSI colors in log output
    #[arg(long)]
    pub no_color: bool,
}

/// Resolves the endpoint: `--endpoint` flag, then the environment variable,
/// then the built-in default.
#[must_use]
pub fn resolve_endpoint(flag: Option<&str>) -> String {
    if let Some(endpoint) = flag {
        return endpoint.to_string();
    }
    if let Ok(endpoint) = std::env::var(ENDPOINT_ENV_VAR)
        && !endpoint.trim().is_empty()
    {
        return endpoint;
    }
    DEFAULT_ENDPOINT.to_string()
}
