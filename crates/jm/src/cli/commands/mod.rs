//! Command implementations and dispatch.

pub mod config;
pub mod extract;
pub mod init;
pub mod keywords;
pub mod matching;
mod shared;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: &Commands, ctx: &mut CommandContext) -> ExitCode {
    match command {
        Commands::Match(cmd) => matching::run(ctx, cmd),
        Commands::Keywords(cmd) => keywords::run(ctx, cmd),
        Commands::Extract(cmd) => extract::run(ctx, cmd),
        Commands::Init(cmd) => init::run(ctx, cmd),
        Commands::Config => config::run(ctx),
    }
}
