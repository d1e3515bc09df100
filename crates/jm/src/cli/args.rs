//! Clap argument definitions for the `jm` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use jm_match::Strategy;

/// Characters shown by `jm extract` unless `--chars` is given.
pub const DEFAULT_PREVIEW_CHARS: usize = 500;

/// Parse a similarity strategy from a string.
fn parse_strategy(s: &str) -> Result<Strategy, String> {
    s.parse()
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "jm")]
#[command(about = "Job Matcher - rank job postings against a résumé")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared keyword extraction flags.
#[derive(Args, Debug, Clone, Default)]
pub struct KeywordArgs {
    /// Maximum keywords taken from the résumé [default: 30]
    #[arg(short = 'k', long = "keywords", value_name = "N")]
    pub keyword_limit: Option<usize>,
}

/// Arguments for `jm match`.
#[derive(Args, Debug, Clone)]
pub struct MatchCommand {
    /// Résumé file (.pdf or .docx)
    pub resume: PathBuf,

    /// Job postings CSV, overriding the configured dataset
    #[arg(short = 'd', long, value_name = "CSV")]
    pub dataset: Option<PathBuf>,

    /// Number of postings to show [default: 5]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Similarity strategy: tfidf or embedding [default: tfidf]
    #[arg(short = 's', long, value_parser = parse_strategy)]
    pub strategy: Option<Strategy>,

    #[command(flatten)]
    /// Keyword extraction flags.
    pub keywords: KeywordArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Also write the ranked postings to a CSV file
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,
}

/// Arguments for `jm keywords`.
#[derive(Args, Debug, Clone)]
pub struct KeywordsCommand {
    /// Résumé file (.pdf or .docx)
    pub resume: PathBuf,

    #[command(flatten)]
    /// Keyword extraction flags.
    pub keywords: KeywordArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `jm extract`.
#[derive(Args, Debug, Clone)]
pub struct ExtractCommand {
    /// Résumé file (.pdf or .docx)
    pub resume: PathBuf,

    /// Characters to preview
    #[arg(short = 'c', long, default_value_t = DEFAULT_PREVIEW_CHARS)]
    pub chars: usize,

    /// Print the full text instead of a preview
    #[arg(long, conflicts_with = "chars")]
    pub full: bool,
}

/// Arguments for `jm init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.jm.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `jm` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Rank job postings against a résumé
    #[command(after_help = "\
EXAMPLES:
  jm match resume.pdf
  jm match resume.docx -n 10 --dataset jobs.csv
  jm match resume.pdf -s embedding --json
  jm match resume.pdf --export matches.csv")]
    Match(MatchCommand),

    /// Show the keywords extracted from a résumé
    Keywords(KeywordsCommand),

    /// Show the plain text extracted from a résumé
    Extract(ExtractCommand),

    /// Initialize jm configuration in the current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,
}

/// Parses CLI arguments, exiting with usage on error.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use jm_config::Settings;
    use jm_keywords::DEFAULT_KEYWORD_LIMIT;

    use super::*;

    /// Gets help text for a subcommand's argument.
    fn get_arg_help(cmd: &clap::Command, subcmd: &str, arg: &str) -> String {
        cmd.get_subcommands()
            .find(|c| c.get_name() == subcmd)
            .and_then(|c| c.get_arguments().find(|a| a.get_id() == arg))
            .and_then(|a| a.get_help().map(|h| h.to_string()))
            .unwrap_or_default()
    }

    /// Help text defaults must track the configuration defaults.
    #[test]
    fn cli_help_defaults_match_constants() {
        let cmd = Cli::command();
        let settings = Settings::default();

        let limit_help = get_arg_help(&cmd, "match", "limit");
        assert!(
            limit_help.contains(&format!("[default: {}]", settings.top_k)),
            "match --limit help should contain default {}: {limit_help}",
            settings.top_k
        );

        let strategy_help = get_arg_help(&cmd, "match", "strategy");
        assert!(
            strategy_help.contains(&format!("[default: {}]", settings.strategy)),
            "match --strategy help should contain default {}: {strategy_help}",
            settings.strategy
        );

        for subcmd in ["match", "keywords"] {
            let keywords_help = get_arg_help(&cmd, subcmd, "keyword_limit");
            assert!(
                keywords_help.contains(&format!("[default: {}]", settings.keyword_limit)),
                "{subcmd} --keywords help should contain default {}: {keywords_help}",
                settings.keyword_limit
            );
        }
        assert_eq!(settings.keyword_limit, DEFAULT_KEYWORD_LIMIT);
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_match_flags() {
        let cli = Cli::try_parse_from([
            "jm", "match", "cv.pdf", "-n", "3", "-s", "dense", "--keywords", "12", "--json",
        ])
        .unwrap();
        let Commands::Match(cmd) = cli.command else {
            panic!("expected match command");
        };
        assert_eq!(cmd.limit, Some(3));
        assert_eq!(cmd.strategy, Some(Strategy::Embedding));
        assert_eq!(cmd.keywords.keyword_limit, Some(12));
        assert!(cmd.json);
        assert!(cmd.dataset.is_none());
    }

    #[test]
    fn rejects_unknown_strategy() {
        assert!(Cli::try_parse_from(["jm", "match", "cv.pdf", "-s", "bm25"]).is_err());
    }
}
