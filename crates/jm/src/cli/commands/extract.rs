//! Implementation of `jm extract`.

use std::process::ExitCode;

use super::shared::read_text;
use crate::cli::{
    args::ExtractCommand,
    context::CommandContext,
    output::{dim, warning},
};

/// Prints the text extracted from a résumé.
pub fn run(ctx: &CommandContext, cmd: &ExtractCommand) -> ExitCode {
    let text = match read_text(ctx, &cmd.resume) {
        Ok(text) => text,
        Err(code) => return code,
    };

    if text.is_blank() {
        eprintln!(
            "{}",
            warning("warning: no text found; the document may be a scanned image")
        );
        return ExitCode::SUCCESS;
    }

    let total = text.char_count();
    if cmd.full || total <= cmd.chars {
        println!("{text}");
        return ExitCode::SUCCESS;
    }

    println!("{}", text.preview(cmd.chars));
    eprintln!(
        "{}",
        dim(&format!("... showing {} of {total} characters", cmd.chars))
    );
    ExitCode::SUCCESS
}
