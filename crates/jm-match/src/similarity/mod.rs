//! Similarity engines.
//!
//! Every engine scores one query against a corpus of texts and returns one score per corpus
//! entry, in corpus order, each in `[0, 1]` where higher means more similar. Scores are only
//! comparable within one call.

#[cfg(feature = "candle")]
mod candle;
mod embedding;
mod tfidf;

use std::{fmt, str::FromStr};

use serde::Serialize;

#[cfg(feature = "candle")]
pub use self::candle::{CandleEmbedder, shared_embedder};
pub use self::{
    embedding::{Embedder, EmbeddingScorer},
    tfidf::TfIdfScorer,
};
use crate::MatchError;

/// Which engine scores a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Strategy {
    /// TF-IDF weighted bag of words.
    #[default]
    #[serde(rename = "tfidf")]
    Lexical,
    /// Dense sentence embeddings.
    #[serde(rename = "embedding")]
    Embedding,
}

impl Strategy {
    /// Canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lexical => "tfidf",
            Self::Embedding => "embedding",
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tfidf" | "lexical" => Ok(Self::Lexical),
            "embedding" | "dense" => Ok(Self::Embedding),
            other => Err(format!(
                "unknown strategy '{other}' (expected 'tfidf' or 'embedding')"
            )),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scores a query against a corpus.
pub trait Scorer: Send + Sync {
    /// The strategy this scorer implements.
    fn strategy(&self) -> Strategy;

    /// Returns one score in `[0, 1]` per corpus entry, in corpus order.
    ///
    /// An empty corpus yields an empty vector; a query with no usable content yields all zeros.
    fn score(&self, query: &str, corpus: &[&str]) -> Result<Vec<f32>, MatchError>;
}

impl<S: Scorer + ?Sized> Scorer for Box<S> {
    fn strategy(&self) -> Strategy {
        (**self).strategy()
    }

    fn score(&self, query: &str, corpus: &[&str]) -> Result<Vec<f32>, MatchError> {
        (**self).score(query, corpus)
    }
}

/// Cosine similarity of two equal-length vectors, clamped to `[0, 1]`.
///
/// Returns 0 when either vector has zero magnitude.
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    bounded((dot / (norm_a.sqrt() * norm_b.sqrt())) as f32)
}

/// Clamps a similarity to `[0, 1]`, mapping `-0.0` and NaN to `0.0`.
///
/// An empty float sum is `-0.0`, which `clamp` keeps and which prints as `-0.00%`.
fn bounded(score: f32) -> f32 {
    if score > 0.0 { score.min(1.0) } else { 0.0 }
}
