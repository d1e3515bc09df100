//! Job postings and the corpus they are matched against.

use std::{ops::Index, slice};

use serde::Serialize;
use tracing::debug;

/// One job record.
///
/// Only `job_text` takes part in matching; the rest is carried through for display and skill
/// annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Posting {
    /// Free-text description used for matching.
    #[serde(skip_serializing)]
    pub job_text: String,
    /// Job title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Hiring company.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Human-readable location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Link to the posting or company.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Raw skills field, delimiter separated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
}

impl Posting {
    /// Creates a posting with only a description.
    pub fn new(job_text: impl Into<String>) -> Self {
        Self {
            job_text: job_text.into(),
            ..Self::default()
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the company.
    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Sets the skills field.
    #[must_use]
    pub fn with_skills(mut self, skills: impl Into<String>) -> Self {
        self.skills = Some(skills.into());
        self
    }

    /// True when the description has non-whitespace content.
    pub fn has_description(&self) -> bool {
        !self.job_text.trim().is_empty()
    }
}

/// Postings that share one vectorization space.
///
/// Order is fixed at construction and is the index scores map back to. Postings without a
/// description are dropped on the way in.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// Postings with descriptions, in input order.
    postings: Vec<Posting>,
}

impl Corpus {
    /// Builds a corpus, discarding postings with a blank description.
    pub fn new(postings: impl IntoIterator<Item = Posting>) -> Self {
        let mut dropped = 0_usize;
        let postings: Vec<Posting> = postings
            .into_iter()
            .filter(|p| {
                let keep = p.has_description();
                dropped += usize::from(!keep);
                keep
            })
            .collect();
        debug!(kept = postings.len(), dropped, "built corpus");
        Self { postings }
    }

    /// Number of postings.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    /// True when there is nothing to match against.
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Posting at `index`.
    pub fn get(&self, index: usize) -> Option<&Posting> {
        self.postings.get(index)
    }

    /// Iterates postings in corpus order.
    pub fn iter(&self) -> slice::Iter<'_, Posting> {
        self.postings.iter()
    }

    /// Descriptions in corpus order.
    pub fn texts(&self) -> Vec<&str> {
        self.postings.iter().map(|p| p.job_text.as_str()).collect()
    }
}

impl FromIterator<Posting> for Corpus {
    fn from_iter<I: IntoIterator<Item = Posting>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl Index<usize> for Corpus {
    type Output = Posting;

    fn index(&self, index: usize) -> &Self::Output {
        &self.postings[index]
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Posting;
    type IntoIter = slice::Iter<'a, Posting>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
