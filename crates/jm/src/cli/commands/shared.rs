//! Shared helpers for command implementations.

use std::{path::Path, process::ExitCode};

use jm_config::EmbeddingSettings;
use jm_document::{Document, ExtractError, ExtractedText, extract};
#[cfg(feature = "candle")]
use jm_match::{EmbeddingScorer, shared_embedder};
use jm_match::{EmbedError, Scorer, Strategy, TfIdfScorer};
use tracing::warn;

use crate::cli::{args::KeywordArgs, context::CommandContext};

/// Prints the standard extraction failure message.
fn report_extract_error(err: &ExtractError) -> ExitCode {
    eprintln!("error: could not extract text: {err}");
    ExitCode::FAILURE
}

/// Reads a résumé from disk, applying the configured size limit.
fn read_document(ctx: &CommandContext, path: &Path) -> Result<Document, ExitCode> {
    Document::read(path, Some(ctx.config.settings.max_document_bytes))
        .map_err(|e| report_extract_error(&e))
}

/// Reads and extracts a résumé.
pub fn read_text(ctx: &CommandContext, path: &Path) -> Result<ExtractedText, ExitCode> {
    let document = read_document(ctx, path)?;
    extract(&document).map_err(|e| report_extract_error(&e))
}

/// Keyword limit from the flag, falling back to configuration.
pub fn keyword_limit(ctx: &CommandContext, args: &KeywordArgs) -> usize {
    args.keyword_limit.unwrap_or(ctx.config.settings.keyword_limit)
}

/// Strategy from the flag, falling back to configuration.
pub fn strategy(ctx: &CommandContext, flag: Option<Strategy>) -> Result<Strategy, ExitCode> {
    if let Some(strategy) = flag {
        return Ok(strategy);
    }
    ctx.config.settings.strategy.parse().map_err(|e| {
        eprintln!("error: invalid settings.strategy: {e}");
        ExitCode::FAILURE
    })
}

/// Builds the scorer for `strategy`.
///
/// When the embedding model cannot be loaded and `fallback_to_lexical` is set, a TF-IDF scorer
/// is returned instead.
pub fn scorer(
    strategy: Strategy,
    settings: &EmbeddingSettings,
) -> Result<Box<dyn Scorer>, ExitCode> {
    match strategy {
        Strategy::Lexical => Ok(Box::new(TfIdfScorer::default())),
        Strategy::Embedding => match embedding_scorer(settings) {
            Ok(scorer) => Ok(scorer),
            Err(e) if settings.fallback_to_lexical => {
                warn!(error = %e, "embedding model unavailable, falling back to tfidf");
                Ok(Box::new(TfIdfScorer::default()))
            }
            Err(e) => {
                eprintln!("error: {e}");
                Err(ExitCode::FAILURE)
            }
        },
    }
}

/// Loads the process-wide embedding model.
#[cfg(feature = "candle")]
fn embedding_scorer(settings: &EmbeddingSettings) -> Result<Box<dyn Scorer>, EmbedError> {
    let embedder = shared_embedder(settings)?;
    Ok(Box::new(EmbeddingScorer::new(embedder, settings.batch_size)))
}

/// Embedding support is compiled out.
#[cfg(not(feature = "candle"))]
fn embedding_scorer(_settings: &EmbeddingSettings) -> Result<Box<dyn Scorer>, EmbedError> {
    Err(EmbedError::ModelLoad(
        "jm was built without the `candle` feature".into(),
    ))
}
