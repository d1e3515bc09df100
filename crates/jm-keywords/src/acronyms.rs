//! Skill acronym expansion.
//!
//! Job postings and résumés mix `ML` with `machine learning`. Expanding the short forms puts
//! both on the same vocabulary, and rescues two-letter acronyms that tokenizers and stopword
//! lists would otherwise drop.

use std::{borrow::Cow, collections::HashMap, sync::LazyLock};

use regex::{Captures, Regex};

/// Lowercase acronym to expansion.
static ACRONYMS: &[(&str, &str)] = &[
    ("ai", "artificial intelligence"),
    ("bi", "business intelligence"),
    ("ci", "continuous integration"),
    ("db", "database"),
    ("dl", "deep learning"),
    ("hr", "human resources"),
    ("js", "javascript"),
    ("k8s", "kubernetes"),
    ("ml", "machine learning"),
    ("nlp", "natural language processing"),
    ("oop", "object oriented programming"),
    ("qa", "quality assurance"),
    ("sre", "site reliability engineering"),
    ("ts", "typescript"),
    ("ui", "user interface"),
    ("ux", "user experience"),
];

/// Lookup table built from [`ACRONYMS`].
static EXPANSIONS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ACRONYMS.iter().copied().collect());

/// Whole-word alternation of every acronym.
static PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = ACRONYMS
        .iter()
        .map(|(short, _)| regex::escape(short))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{alternation})\b")).expect("acronym pattern is valid")
});

/// Replaces known acronyms in lowercase `text` with their long forms.
pub fn expand_acronyms(text: &str) -> Cow<'_, str> {
    PATTERN.replace_all(text, |caps: &Captures<'_>| {
        let short = &caps[0];
        EXPANSIONS.get(short).copied().unwrap_or(short).to_string()
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn expands_whole_words() {
        assert_eq!(
            expand_acronyms("ml and nlp on k8s"),
            "machine learning and natural language processing on kubernetes"
        );
    }

    #[test]
    fn leaves_embedded_letters_alone() {
        let text = "html xml email";
        assert!(matches!(expand_acronyms(text), Cow::Borrowed(_)));
    }

    #[test]
    fn punctuation_delimits_acronyms() {
        assert_eq!(expand_acronyms("(ai/ml)"), "(artificial intelligence/machine learning)");
    }

    #[test]
    fn table_is_lowercase_and_unique() {
        let mut seen = HashSet::new();
        for (short, long) in ACRONYMS {
            assert_eq!(*short, short.to_lowercase());
            assert!(!long.is_empty());
            assert!(seen.insert(*short), "duplicate {short}");
        }
    }
}
