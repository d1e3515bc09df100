//! Job posting similarity and ranking for jm.
//!
//! A résumé is reduced to a query, scored against every posting in a [`Corpus`] by a
//! [`Scorer`], and the best postings are returned as [`SimilarityResult`]s. Two scorers are
//! provided:
//! - [`TfIdfScorer`]: lexical TF-IDF vectors compared by cosine
//! - [`EmbeddingScorer`]: sentence embeddings from any [`Embedder`], compared by cosine
//!
//! [`Matcher`] ties extraction, keyword normalization, scoring and ranking together.

#![warn(missing_docs)]

mod error;
mod pipeline;
mod posting;
mod rank;
mod similarity;

pub use error::{EmbedError, MatchError};
pub use pipeline::{MatchOutcome, MatchReport, Matcher, NoResultReason};
pub use posting::{Corpus, Posting};
pub use rank::{SimilarityResult, annotate_skills, matched_skills, rank};
#[cfg(feature = "candle")]
pub use similarity::{CandleEmbedder, shared_embedder};
pub use similarity::{Embedder, EmbeddingScorer, Scorer, Strategy, TfIdfScorer, cosine};
