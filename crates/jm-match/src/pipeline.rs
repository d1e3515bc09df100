//! The end-to-end matching pipeline: extract, normalize, score, rank.

use std::fmt;

use jm_document::{Document, ExtractError, extract};
use jm_keywords::{KeywordSet, Normalizer};
use serde::Serialize;
use tracing::debug;

use crate::{
    Corpus, MatchError,
    rank::{SimilarityResult, annotate_skills, rank},
    similarity::{Scorer, Strategy},
};

/// Why a match produced no ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoResultReason {
    /// The résumé is not a PDF or DOCX file.
    UnsupportedFormat {
        /// The rejected extension.
        format: String,
    },
    /// The résumé could not be read or parsed.
    ExtractionFailed {
        /// Extractor diagnostic.
        message: String,
    },
    /// The résumé yielded no usable text.
    EmptyQuery,
    /// There are no postings to match against.
    EmptyCorpus,
}

impl From<ExtractError> for NoResultReason {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedFormat { format } => Self::UnsupportedFormat { format },
            other => Self::ExtractionFailed {
                message: other.to_string(),
            },
        }
    }
}

impl fmt::Display for NoResultReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat { format } => {
                write!(f, "unsupported document format '{format}'")
            }
            Self::ExtractionFailed { message } => f.write_str(message),
            Self::EmptyQuery => f.write_str("no usable text in the résumé"),
            Self::EmptyCorpus => f.write_str("no job postings to match against"),
        }
    }
}

/// A successful match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport<'c> {
    /// Strategy that produced the scores.
    pub strategy: Strategy,
    /// Keywords extracted from the résumé.
    pub keywords: KeywordSet,
    /// Ranked postings, best first.
    pub results: Vec<SimilarityResult<'c>>,
}

/// Result of running the pipeline on one résumé.
#[derive(Debug, Clone)]
pub enum MatchOutcome<'c> {
    /// A ranking was produced.
    Matched(MatchReport<'c>),
    /// The pipeline stopped early.
    NoResult(NoResultReason),
}

/// Matches résumés against one corpus with one scorer.
pub struct Matcher<'c> {
    /// Postings to rank.
    corpus: &'c Corpus,
    /// Similarity engine.
    scorer: Box<dyn Scorer + 'c>,
    /// Keyword extraction for the query side.
    normalizer: Normalizer,
    /// Maximum results per match.
    top_k: usize,
}

impl<'c> Matcher<'c> {
    /// Creates a matcher.
    pub fn new(
        corpus: &'c Corpus,
        scorer: Box<dyn Scorer + 'c>,
        normalizer: Normalizer,
        top_k: usize,
    ) -> Self {
        Self {
            corpus,
            scorer,
            normalizer,
            top_k,
        }
    }

    /// Strategy of the configured scorer.
    pub fn strategy(&self) -> Strategy {
        self.scorer.strategy()
    }

    /// Extracts a document's text and matches it.
    pub fn match_document(&self, document: &Document) -> Result<MatchOutcome<'c>, MatchError> {
        match extract(document) {
            Ok(text) => self.match_text(text.as_str()),
            Err(err) => {
                debug!(error = %err, "extraction failed");
                Ok(MatchOutcome::NoResult(err.into()))
            }
        }
    }

    /// Matches already-extracted résumé text.
    pub fn match_text(&self, text: &str) -> Result<MatchOutcome<'c>, MatchError> {
        if text.trim().is_empty() {
            return Ok(MatchOutcome::NoResult(NoResultReason::EmptyQuery));
        }
        if self.corpus.is_empty() {
            return Ok(MatchOutcome::NoResult(NoResultReason::EmptyCorpus));
        }

        let keywords = self.normalizer.normalize(text);
        let strategy = self.scorer.strategy();
        let query = match strategy {
            Strategy::Lexical => keywords.to_query(),
            Strategy::Embedding => text.trim().to_string(),
        };
        if query.is_empty() {
            return Ok(MatchOutcome::NoResult(NoResultReason::EmptyQuery));
        }
        debug!(%strategy, keywords = keywords.len(), postings = self.corpus.len(), "scoring");

        let scores = self.scorer.score(&query, &self.corpus.texts())?;
        let mut results = rank(&scores, self.corpus, self.top_k);
        annotate_skills(&mut results, &keywords);

        Ok(MatchOutcome::Matched(MatchReport {
            strategy,
            keywords,
            results,
        }))
    }
}
