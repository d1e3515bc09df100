//! Ranked keyword sets.

use std::slice;

use serde::Serialize;

/// A keyword and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Keyword {
    /// Lowercase term.
    pub term: String,
    /// Occurrences in the source text.
    pub frequency: u32,
}

/// Distinct keywords ordered by descending frequency, ties in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeywordSet {
    /// Ranked keywords.
    keywords: Vec<Keyword>,
}

impl KeywordSet {
    /// Wraps keywords that are already ranked and distinct.
    pub(crate) const fn from_ranked(keywords: Vec<Keyword>) -> Self {
        Self { keywords }
    }

    /// Builds a set from terms in rank order, each with frequency 1.
    ///
    /// Terms are lowercased; later duplicates are dropped.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keywords: Vec<Keyword> = Vec::new();
        for term in terms {
            let term = term.as_ref().trim().to_lowercase();
            if term.is_empty() || keywords.iter().any(|k| k.term == term) {
                continue;
            }
            keywords.push(Keyword { term, frequency: 1 });
        }
        Self { keywords }
    }

    /// Number of keywords.
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// True when no keywords survived normalization.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Iterates keywords in rank order.
    pub fn iter(&self) -> impl Iterator<Item = &Keyword> {
        self.keywords.iter()
    }

    /// Iterates the terms in rank order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(|k| k.term.as_str())
    }

    /// Checks membership of an already-lowercase term.
    pub fn contains(&self, term: &str) -> bool {
        self.keywords.iter().any(|k| k.term == term)
    }

    /// Joins the terms with single spaces, the form the lexical matcher consumes.
    pub fn to_query(&self) -> String {
        self.terms().collect::<Vec<_>>().join(" ")
    }
}

impl<'a> IntoIterator for &'a KeywordSet {
    type Item = &'a Keyword;
    type IntoIter = slice::Iter<'a, Keyword>;

    fn into_iter(self) -> Self::IntoIter {
        self.keywords.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a set from `(term, frequency)` pairs.
    fn set(pairs: &[(&str, u32)]) -> KeywordSet {
        KeywordSet::from_ranked(
            pairs
                .iter()
                .map(|(term, frequency)| Keyword {
                    term: (*term).to_string(),
                    frequency: *frequency,
                })
                .collect(),
        )
    }

    #[test]
    fn query_joins_terms_in_rank_order() {
        let keywords = set(&[("python", 3), ("machine", 2), ("learning", 2)]);
        assert_eq!(keywords.to_query(), "python machine learning");
        assert_eq!(keywords.len(), 3);
        assert!(keywords.contains("machine"));
        assert!(!keywords.contains("java"));
    }

    #[test]
    fn empty_set() {
        let keywords = KeywordSet::default();
        assert!(keywords.is_empty());
        assert_eq!(keywords.to_query(), "");
    }

    #[test]
    fn from_terms_lowercases_and_dedups() {
        let keywords = KeywordSet::from_terms(["Rust", "SQL", "rust", " ", "Go"]);
        assert_eq!(keywords.to_query(), "rust sql go");
        assert!(keywords.iter().all(|k| k.frequency == 1));
    }
}
