//! Résumé text to ranked keywords.

use std::{borrow::Cow, collections::HashMap, sync::LazyLock};

use regex::Regex;
use tracing::debug;

use crate::{
    Keyword, KeywordSet, Stopwords, acronyms::expand_acronyms, clean::strip_noise,
};

/// Keywords kept when no limit is configured.
pub const DEFAULT_KEYWORD_LIMIT: usize = 30;

/// Alphabetic runs of at least three characters starting a word.
///
/// There is no trailing boundary, so a version or digit suffix is cut off: `python3` and
/// `web3` yield `python` and `web`.
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\p{L}{3,}").expect("word pattern is valid"));

/// Reduces free text to its most frequent meaningful terms.
#[derive(Debug, Clone)]
pub struct Normalizer {
    /// Words never returned as keywords.
    stopwords: Stopwords,
    /// Maximum keywords returned.
    limit: usize,
    /// Whether skill acronyms are expanded before tokenizing.
    expand_acronyms: bool,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORD_LIMIT)
    }
}

impl Normalizer {
    /// Creates a normalizer with the résumé stopword list.
    pub fn new(limit: usize) -> Self {
        Self {
            stopwords: Stopwords::resume(),
            limit,
            expand_acronyms: false,
        }
    }

    /// Expands skill acronyms (`ml` to `machine learning`) before tokenizing.
    ///
    /// Off by default, since the expansions are words the text does not contain.
    #[must_use]
    pub fn with_acronyms(mut self) -> Self {
        self.expand_acronyms = true;
        self
    }

    /// Replaces the stopword list.
    #[must_use]
    pub fn with_stopwords(mut self, stopwords: Stopwords) -> Self {
        self.stopwords = stopwords;
        self
    }

    /// Maximum keywords returned.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Extracts up to `limit` keywords from `text`.
    ///
    /// Text is lowercased and stripped of emails, URLs and bare numbers before tokenizing.
    /// Keywords are ranked by frequency, ties by first occurrence.
    pub fn normalize(&self, text: &str) -> KeywordSet {
        let lower = text.to_lowercase();
        let cleaned = strip_noise(&lower);
        let expanded = if self.expand_acronyms {
            expand_acronyms(&cleaned)
        } else {
            Cow::Borrowed(cleaned.as_str())
        };

        let mut counts: Vec<(&str, u32)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for token in WORD.find_iter(&expanded).map(|m| m.as_str()) {
            if self.stopwords.contains(token) {
                continue;
            }
            match positions.get(token) {
                Some(&idx) => counts[idx].1 += 1,
                None => {
                    positions.insert(token, counts.len());
                    counts.push((token, 1));
                }
            }
        }

        let distinct = counts.len();
        // Stable, so equal counts keep first-occurrence order.
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(self.limit);

        debug!(distinct, kept = counts.len(), "normalized keywords");
        KeywordSet::from_ranked(
            counts
                .into_iter()
                .map(|(term, frequency)| Keyword {
                    term: term.to_string(),
                    frequency,
                })
                .collect(),
        )
    }
}
