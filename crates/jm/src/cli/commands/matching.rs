//! Implementation of `jm match`.

use std::process::ExitCode;

use jm_keywords::Normalizer;
use jm_match::{MatchOutcome, Matcher};

use super::shared::{keyword_limit, read_text, scorer, strategy};
use crate::{
    cli::{
        args::MatchCommand,
        context::CommandContext,
        output::{dim, print_json, print_matches},
    },
    dataset::export_results,
};

/// Ranks dataset postings against a résumé.
pub fn run(ctx: &mut CommandContext, cmd: &MatchCommand) -> ExitCode {
    // Extract first so an unusable résumé is reported before the dataset or model is loaded.
    let text = match read_text(ctx, &cmd.resume) {
        Ok(text) => text,
        Err(code) => return code,
    };

    let top_k = cmd.limit.unwrap_or(ctx.config.settings.top_k);
    let normalizer = Normalizer::new(keyword_limit(ctx, &cmd.keywords));
    let strategy = match strategy(ctx, cmd.strategy) {
        Ok(strategy) => strategy,
        Err(code) => return code,
    };
    let embedding = ctx.config.embedding.clone();

    let corpus = match ctx.corpus(cmd.dataset.as_deref()) {
        Ok(corpus) => corpus,
        Err(code) => return code,
    };
    let scorer = match scorer(strategy, &embedding) {
        Ok(scorer) => scorer,
        Err(code) => return code,
    };

    let matcher = Matcher::new(corpus, scorer, normalizer, top_k);
    let report = match matcher.match_text(text.as_str()) {
        Ok(MatchOutcome::Matched(report)) => report,
        Ok(MatchOutcome::NoResult(reason)) => {
            println!("No matching postings.");
            eprintln!("{}", dim(&format!("({reason})")));
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("error: matching failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = &cmd.export {
        if let Err(e) = export_results(path, &report.results) {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
        eprintln!("Wrote {} postings to {}", report.results.len(), path.display());
    }

    if cmd.json {
        return print_json(&report);
    }
    if report.results.is_empty() {
        println!("No matching postings.");
    } else {
        print_matches(&report);
    }
    ExitCode::SUCCESS
}
