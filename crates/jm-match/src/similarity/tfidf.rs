//! Lexical similarity: TF-IDF vectors compared by cosine.

use std::{
    collections::{BTreeMap, HashMap},
    iter,
    sync::LazyLock,
};

use jm_keywords::{Stopwords, expand_acronyms};
use regex::Regex;
use tracing::trace;

use super::{Scorer, Strategy, bounded};
use crate::MatchError;

/// Tokens of two or more word characters.
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

/// Sparse term weights keyed by term.
type TermVector = BTreeMap<String, f64>;

/// TF-IDF scorer.
///
/// The vector space is fitted on the corpus plus the query, so document frequencies count the
/// query as one more document. Weights use smoothed IDF, `ln((1 + n) / (1 + df)) + 1`, over raw
/// term counts, and every vector is L2 normalized before the dot product.
#[derive(Debug, Clone)]
pub struct TfIdfScorer {
    /// Terms excluded from the vocabulary.
    stopwords: Stopwords,
}

impl Default for TfIdfScorer {
    fn default() -> Self {
        Self::new(Stopwords::english())
    }
}

impl TfIdfScorer {
    /// Creates a scorer with a custom stopword list.
    pub fn new(stopwords: Stopwords) -> Self {
        Self { stopwords }
    }

    /// Term counts for one text.
    fn term_counts(&self, text: &str) -> BTreeMap<String, u32> {
        let lowered = text.to_lowercase();
        let expanded = expand_acronyms(&lowered);
        let mut counts = BTreeMap::new();
        for token in TOKEN.find_iter(&expanded) {
            let term = token.as_str();
            if self.stopwords.contains(term) {
                continue;
            }
            *counts.entry(term.to_string()).or_insert(0) += 1;
        }
        counts
    }
}

/// Weights counts by IDF and normalizes to unit length.
fn weigh(counts: &BTreeMap<String, u32>, idf: &HashMap<&str, f64>) -> TermVector {
    let mut vector: TermVector = counts
        .iter()
        .map(|(term, &count)| {
            let weight = f64::from(count) * idf.get(term.as_str()).copied().unwrap_or(1.0);
            (term.clone(), weight)
        })
        .collect();
    let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for weight in vector.values_mut() {
            *weight /= norm;
        }
    }
    vector
}

/// Dot product of two sparse unit vectors.
fn dot(a: &TermVector, b: &TermVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(term, w)| large.get(term).map(|v| w * v))
        .sum()
}

impl Scorer for TfIdfScorer {
    fn strategy(&self) -> Strategy {
        Strategy::Lexical
    }

    fn score(&self, query: &str, corpus: &[&str]) -> Result<Vec<f32>, MatchError> {
        if corpus.is_empty() {
            return Ok(Vec::new());
        }

        let query_counts = self.term_counts(query);
        if query_counts.is_empty() {
            return Ok(vec![0.0; corpus.len()]);
        }
        let doc_counts: Vec<_> = corpus.iter().map(|text| self.term_counts(text)).collect();

        let mut df: HashMap<&str, u32> = HashMap::new();
        for counts in iter::once(&query_counts).chain(&doc_counts) {
            for term in counts.keys() {
                *df.entry(term.as_str()).or_insert(0) += 1;
            }
        }
        let n = f64::from(u32::try_from(corpus.len() + 1).unwrap_or(u32::MAX));
        let idf: HashMap<&str, f64> = df
            .iter()
            .map(|(&term, &df)| (term, ((1.0 + n) / (1.0 + f64::from(df))).ln() + 1.0))
            .collect();
        trace!(vocabulary = idf.len(), documents = corpus.len(), "fitted tf-idf space");

        let query_vector = weigh(&query_counts, &idf);
        Ok(doc_counts
            .iter()
            .map(|counts| bounded(dot(&query_vector, &weigh(counts, &idf)) as f32))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The three-posting corpus used across matcher tests.
    const CORPUS: [&str; 3] = [
        "python developer backend",
        "java enterprise architect",
        "python data scientist ml",
    ];

    #[test]
    fn data_science_posting_ranks_first() {
        let scores = TfIdfScorer::default()
            .score("python machine learning engineer", &CORPUS)
            .unwrap();

        assert_eq!(scores.len(), 3);
        assert!(scores[2] > scores[0], "{scores:?}");
        assert!(scores[0] > scores[1], "{scores:?}");
        assert_eq!(scores[1], 0.0);
        assert!((scores[2] - 0.5307).abs() < 1e-3, "{scores:?}");
        assert!((scores[0] - 0.1613).abs() < 1e-3, "{scores:?}");
    }

    #[test]
    fn identical_text_scores_one() {
        let scores = TfIdfScorer::default()
            .score("rust systems programming", &["rust systems programming"])
            .unwrap();
        assert!((scores[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn empty_corpus_yields_no_scores() {
        let scores = TfIdfScorer::default().score("python", &[]).unwrap();
        assert!(scores.is_empty());
    }

    #[test]
    fn empty_or_stopword_query_yields_zeros() {
        let scorer = TfIdfScorer::default();
        assert_eq!(scorer.score("", &CORPUS).unwrap(), vec![0.0; 3]);
        assert_eq!(scorer.score("the and of", &CORPUS).unwrap(), vec![0.0; 3]);
    }

    #[test]
    fn scores_are_bounded_and_deterministic() {
        let scorer = TfIdfScorer::default();
        let corpus = ["python python python", "", "python sql", "sql"];
        let first = scorer.score("python sql python", &corpus).unwrap();
        let second = scorer.score("python sql python", &corpus).unwrap();

        assert_eq!(first, second);
        assert!(first.iter().all(|s| (0.0..=1.0).contains(s)));
        assert_eq!(first[1], 0.0);
    }

    #[test]
    fn no_shared_terms_scores_positive_zero() {
        let scores = TfIdfScorer::default()
            .score("python", &["forklift operator", "python"])
            .unwrap();

        assert!(scores[0].is_sign_positive(), "{scores:?}");
        assert_eq!(format!("{:.2}", f64::from(scores[0]) * 100.0), "0.00");
        assert_eq!(serde_json::to_string(&scores[0]).unwrap(), "0.0");
    }

    #[test]
    fn acronyms_match_their_expansion() {
        let scores = TfIdfScorer::default()
            .score("ML", &["machine learning", "accounting"])
            .unwrap();
        assert!(scores[0] > 0.9, "{scores:?}");
        assert_eq!(scores[1], 0.0);
    }
}
