//! Command-line entry point for `jm`.

use std::{io, process::ExitCode};

use jm::cli::{
    CommandContext,
    args::{Commands, parse_cli},
    commands,
};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `JM_LOG=debug`.
const LOG_ENV: &str = "JM_LOG";

/// Parses arguments, loads configuration and runs the selected command.
fn main() -> ExitCode {
    init_logging();
    let cli = parse_cli();

    // `init` must work even when an existing config file is broken.
    let ctx = match cli.command {
        Commands::Init(_) => CommandContext::load_cwd_only(),
        _ => CommandContext::load(),
    };
    let mut ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(&cli.command, &mut ctx)
}

/// Sends `tracing` output to stderr, filtered by `JM_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
