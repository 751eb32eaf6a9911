//! CLI entry point for the forecaster client.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::Result;
use clap::Parser;
use forecaster_core::ui::{is_dumb_terminal, no_color_env_requested, should_use_spinner};
use forecaster_core::{BackendClient, SearchController, SearchOutcome, TerminalUi};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let no_color = args.no_color || no_color_env_requested() || is_dumb_terminal();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(!no_color)
        .with_env_filter(filter)
        .init();

    debug!(?args, "CLI arguments parsed");

    let endpoint = cli::resolve_endpoint(args.endpoint.as_deref());
    let client = BackendClient::with_timeouts(&endpoint, args.connect_timeout, args.read_timeout)?;
    debug!(endpoint = %client.endpoint(), "backend client ready");

    let use_spinner = should_use_spinner(
        io::stderr().is_terminal(),
        args.quiet,
        is_dumb_terminal(),
    );
    let sink = TerminalUi::new(use_spinner, client.host().to_string());
    let controller = SearchController::new(client, sink, args.output.clone(), args.filename.clone());

    // One-shot mode: query passed as arguments.
    if !args.query.is_empty() {
        let prompt = args.query.join(" ");
        let outcome = controller.handle_search(&prompt).await;
        if !matches!(outcome, SearchOutcome::Saved(_)) {
            std::process::exit(1);
        }
        return Ok(());
    }

    // Line mode: each stdin line is one interaction; EOF exits cleanly.
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    if interactive {
        info!("Enter a query and press Enter (Ctrl-D to exit).");
    }

    loop {
        if interactive {
            eprint!("query> ");
            io::stderr().flush()?;
        }
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        // Failures show a banner; the loop stays usable either way.
        let _ = controller.handle_search(&line).await;
    }

    Ok(())
}
