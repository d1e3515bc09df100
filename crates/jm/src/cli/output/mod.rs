//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
pub use jm_highlight::{dim, header, subheader, warning};
use jm_keywords::KeywordSet;
use jm_match::{MatchReport, SimilarityResult};
use serde::Serialize;

/// Placeholder for missing posting fields.
const MISSING: &str = "-";

/// Keywords listed above the results table.
const KEYWORD_PREVIEW: usize = 12;

/// Prints `value` as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Builds the results table.
pub fn results_table(results: &[SimilarityResult<'_>]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        "#", "Title", "Company", "Location", "Score", "Matched skills", "Link",
    ]);
    for result in results {
        let posting = result.posting;
        let text = |field: &Option<String>| field.as_deref().unwrap_or(MISSING).to_string();
        let skills = if result.matched_skills.is_empty() {
            MISSING.to_string()
        } else {
            result.matched_skills.join(", ")
        };
        table.add_row(vec![
            Cell::new(result.rank),
            Cell::new(text(&posting.title)),
            Cell::new(text(&posting.company)),
            Cell::new(text(&posting.location)),
            Cell::new(format!("{:.2}%", result.percent())),
            Cell::new(skills),
            Cell::new(text(&posting.link)),
        ]);
    }
    table
}

/// Prints a match report as a summary line and a table.
pub fn print_matches(report: &MatchReport<'_>) {
    let preview: Vec<&str> = report.keywords.terms().take(KEYWORD_PREVIEW).collect();
    println!("{}", header("Top matches"));
    println!(
        "{}",
        dim(&format!(
            "strategy: {}, keywords: {}",
            report.strategy,
            preview.join(", ")
        ))
    );
    println!("{}", results_table(&report.results));
}

/// Prints keywords one per line with their frequency.
pub fn print_keywords(keywords: &KeywordSet) {
    if keywords.is_empty() {
        println!("{}", dim("No keywords found."));
        return;
    }
    let width = keywords.terms().map(str::len).max().unwrap_or(0);
    for keyword in keywords {
        println!(
            "{:<width$}  {}",
            keyword.term,
            dim(&keyword.frequency.to_string())
        );
    }
}
