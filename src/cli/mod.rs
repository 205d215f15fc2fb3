//! cli
//!
//! Command-line interface layer for tagver.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments
//! - Initialize logging
//! - Delegate to the engine and render its report
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, hands a
//! [`crate::engine::Context`] and [`crate::engine::Options`] to
//! [`crate::engine::run`], and prints the outcome through
//! [`crate::ui::output`].

pub mod args;

pub use args::Cli;

use anyhow::{Context as _, Result};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

use crate::core::env::ProcessEnv;
use crate::engine;
use crate::ui::output::{self, Verbosity};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let verbosity = cli.verbosity();
    init_logging(verbosity);

    let outcome = engine::run(&cli.context(), &cli.options(), &ProcessEnv)?;
    for warning in &outcome.warnings {
        output::warn(warning, verbosity);
    }

    if cli.json {
        let json = serde_json::to_string_pretty(&outcome.report)
            .context("failed to serialize report")?;
        output::print(json);
        return Ok(());
    }

    match output::compose_identifier(
        &outcome.report,
        cli.selection(),
        &outcome.separator,
        outcome.ignore_unclean_tag,
    ) {
        Some(identifier) => output::print(identifier),
        None => output::warn("no version information found", verbosity),
    }
    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the flags.
fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}
