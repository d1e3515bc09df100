//! Résumé text extraction for jm.
//!
//! Converts PDF and DOCX résumés into plain text. Every failure, including a panic inside the
//! PDF parser, comes back as an [`ExtractError`]; nothing here aborts the process.

#![warn(missing_docs)]

mod docx;
mod error;
#[cfg(test)]
mod fixtures;
mod format;
mod pdf;

use std::fmt;

pub use error::ExtractError;
pub use format::{Document, DocumentFormat};
use serde::Serialize;
use tracing::debug;

/// Plain text pulled out of a document.
///
/// Empty when the document has no text layer; that is a valid result, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtractedText(String);

impl ExtractedText {
    /// Wraps already-extracted text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The full text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper.
    pub fn into_string(self) -> String {
        self.0
    }

    /// True when the text holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Number of characters.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    /// The first `max_chars` characters, cut on a character boundary.
    pub fn preview(&self, max_chars: usize) -> &str {
        match self.0.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for ExtractedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracts the plain text of a document.
pub fn extract(document: &Document) -> Result<ExtractedText, ExtractError> {
    let text = match document.format() {
        DocumentFormat::Pdf => pdf::extract_pdf(document.bytes())?,
        DocumentFormat::Docx => docx::extract_docx(document.bytes())?,
    };
    debug!(
        format = %document.format(),
        bytes = document.bytes().len(),
        chars = text.chars().count(),
        "extracted document text"
    );
    Ok(ExtractedText(text))
}
