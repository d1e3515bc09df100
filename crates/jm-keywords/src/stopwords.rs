//! Stopword filtering.
//!
//! Two lists are provided:
//! - [`Stopwords::english`]: the NLTK English list from the `stop-words` crate, function words
//!   only, used when vectorizing postings
//! - [`Stopwords::resume`]: the English list plus résumé boilerplate, used when reducing a résumé
//!   to keywords

use std::collections::HashSet;

use stop_words::LANGUAGE;

/// A case-insensitive set of words to ignore.
#[derive(Debug, Clone)]
pub struct Stopwords {
    /// Lowercase stopwords.
    words: HashSet<String>,
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::resume()
    }
}

impl Stopwords {
    /// English stopwords only.
    pub fn english() -> Self {
        Self::from_lists(&[stop_words::get(LANGUAGE::English)])
    }

    /// English stopwords plus words that appear on nearly every résumé.
    pub fn resume() -> Self {
        Self::from_lists(&[stop_words::get(LANGUAGE::English), RESUME_BOILERPLATE])
    }

    /// Builds a set from word lists.
    fn from_lists(lists: &[&[&str]]) -> Self {
        let words = lists
            .iter()
            .flat_map(|list| list.iter())
            .map(|word| word.to_lowercase())
            .collect();
        Self { words }
    }

    /// Adds extra words.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
    }

    /// Checks if a term is a stopword, ignoring case.
    pub fn contains(&self, term: &str) -> bool {
        if term.chars().any(char::is_uppercase) {
            self.words.contains(&term.to_lowercase())
        } else {
            self.words.contains(term)
        }
    }

    /// Returns the total number of stopwords.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Section headings, contact labels and filler common to résumés.
static RESUME_BOILERPLATE: &[&str] = &[
    // Document labels
    "resume", "résumé", "curriculum", "vitae", "profile", "summary", "objective", "references",
    "reference", "request", "upon", "available", "page",
    // Contact details
    "email", "mail", "phone", "mobile", "tel", "address", "linkedin", "github", "gitlab",
    "website", "portfolio", "http", "https", "www", "com",
    // Dates
    "present", "current", "january", "february", "march", "april", "june", "july", "august",
    "september", "october", "november", "december", "jan", "feb", "mar", "apr", "jun", "jul",
    "aug", "sep", "sept", "oct", "nov", "dec",
];
