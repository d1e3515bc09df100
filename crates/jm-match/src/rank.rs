//! Ranking scored postings.

use std::cmp::Ordering;

use jm_keywords::{KeywordSet, expand_acronyms};
use serde::Serialize;

use crate::{Corpus, Posting};

/// One ranked posting.
#[derive(Debug, Clone, Serialize)]
pub struct SimilarityResult<'c> {
    /// 1-based position in the ranking.
    pub rank: usize,
    /// Position of the posting in the corpus.
    pub index: usize,
    /// The posting itself.
    #[serde(flatten)]
    pub posting: &'c Posting,
    /// Similarity in `[0, 1]`.
    pub score: f32,
    /// Posting skills that appear among the résumé keywords.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub matched_skills: Vec<String>,
}

impl SimilarityResult<'_> {
    /// Score as a percentage rounded to two decimals.
    pub fn percent(&self) -> f64 {
        (f64::from(self.score) * 10_000.0).round() / 100.0
    }
}

/// Orders scores descending with NaN last.
fn descending(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Returns the `k` best postings by descending score.
///
/// Ties keep corpus order. Only as many results as there are scored postings are returned, so
/// `k` larger than the corpus is not an error.
pub fn rank<'c>(scores: &[f32], corpus: &'c Corpus, k: usize) -> Vec<SimilarityResult<'c>> {
    let n = scores.len().min(corpus.len());
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| descending(scores[a], scores[b]));
    order
        .into_iter()
        .take(k)
        .enumerate()
        .map(|(position, index)| SimilarityResult {
            rank: position + 1,
            index,
            posting: &corpus[index],
            score: scores[index],
            matched_skills: Vec::new(),
        })
        .collect()
}

/// Fills in `matched_skills` on each result from the posting's skills field.
pub fn annotate_skills(results: &mut [SimilarityResult<'_>], keywords: &KeywordSet) {
    for result in results {
        result.matched_skills = result
            .posting
            .skills
            .as_deref()
            .map(|skills| matched_skills(skills, keywords))
            .unwrap_or_default();
    }
}

/// Skills from a delimited list whose words all occur in `keywords`.
///
/// Bracketed and quoted list syntax is tolerated, and acronyms match their expansions. Words
/// shorter than three letters are ignored when matching multi-word skills.
pub fn matched_skills(skills: &str, keywords: &KeywordSet) -> Vec<String> {
    let mut matched: Vec<String> = Vec::new();
    for raw in skills.split([',', ';', '|', '/', '\n']) {
        let skill = raw.trim_matches(|c: char| c.is_whitespace() || "[]'\"".contains(c));
        if skill.is_empty() || matched.iter().any(|m| m.eq_ignore_ascii_case(skill)) {
            continue;
        }
        let lowered = skill.to_lowercase();
        let expanded = expand_acronyms(&lowered);
        let hit = keywords.contains(&expanded) || {
            let words: Vec<&str> = expanded
                .split(|c: char| !c.is_alphanumeric())
                .filter(|w| w.chars().count() >= 3)
                .collect();
            !words.is_empty() && words.iter().all(|w| keywords.contains(w))
        };
        if hit {
            matched.push(skill.to_string());
        }
    }
    matched
}
