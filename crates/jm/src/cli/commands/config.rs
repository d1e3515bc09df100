//! Implementation of `jm config`.

use std::process::ExitCode;

use jm_highlight::Highlighter;

use crate::cli::{context::CommandContext, output::warning};

/// Shows effective configuration settings, then any configuration warnings on stderr.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let toml = match ctx.config.settings_to_toml() {
        Ok(toml) => toml,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    print!("{}", Highlighter::new().highlight_toml(&toml));

    for issue in ctx.config.validate() {
        eprintln!("{}", warning(&format!("warning: {issue}")));
    }
    ExitCode::SUCCESS
}
