//! Error types for scoring and matching.

use thiserror::Error;

/// Errors from an embedding model.
///
/// Payloads are strings so a failed one-time model load can be handed to every later caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmbedError {
    /// The model could not be downloaded or loaded.
    #[error("failed to load embedding model: {0}")]
    ModelLoad(String),
    /// Tokenization or the forward pass failed.
    #[error("embedding inference failed: {0}")]
    Inference(String),
}

/// Errors that abort a match.
///
/// Recoverable conditions such as an unreadable résumé or an empty corpus are reported as a
/// `MatchOutcome::NoResult` instead.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The embedding model failed.
    #[error(transparent)]
    Embedding(#[from] EmbedError),

    /// The model returned vectors of inconsistent width.
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Width of the query embedding.
        expected: usize,
        /// Width of the offending corpus embedding.
        actual: usize,
    },
}
