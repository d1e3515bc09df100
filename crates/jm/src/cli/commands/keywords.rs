//! Implementation of `jm keywords`.

use std::process::ExitCode;

use jm_keywords::Normalizer;

use super::shared::{keyword_limit, read_text};
use crate::cli::{
    args::KeywordsCommand,
    context::CommandContext,
    output::{print_json, print_keywords},
};

/// Prints the keywords extracted from a résumé.
pub fn run(ctx: &CommandContext, cmd: &KeywordsCommand) -> ExitCode {
    let text = match read_text(ctx, &cmd.resume) {
        Ok(text) => text,
        Err(code) => return code,
    };
    let keywords = Normalizer::new(keyword_limit(ctx, &cmd.keywords)).normalize(text.as_str());

    if cmd.json {
        return print_json(&keywords);
    }
    print_keywords(&keywords);
    ExitCode::SUCCESS
}
