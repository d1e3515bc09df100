//! Document formats and the in-memory document handed to the extractor.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::ExtractError;

/// Binary document formats jm can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// Portable Document Format.
    Pdf,
    /// Office Open XML word processing document.
    Docx,
}

impl DocumentFormat {
    /// All supported formats.
    pub const ALL: [Self; 2] = [Self::Pdf, Self::Docx];

    /// Returns the canonical lowercase tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }

    /// Infers the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, ExtractError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        ext.parse()
    }
}

impl FromStr for DocumentFormat {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().trim_start_matches('.');
        if tag.eq_ignore_ascii_case("pdf") {
            Ok(Self::Pdf)
        } else if tag.eq_ignore_ascii_case("docx") {
            Ok(Self::Docx)
        } else {
            Err(ExtractError::UnsupportedFormat {
                format: if tag.is_empty() {
                    String::from("(none)")
                } else {
                    tag.to_ascii_lowercase()
                },
            })
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A résumé's raw bytes tagged with their format.
#[derive(Debug, Clone)]
pub struct Document {
    /// Raw file content.
    bytes: Vec<u8>,
    /// Declared format.
    format: DocumentFormat,
    /// Where the bytes came from, if a file.
    source: Option<PathBuf>,
}

impl Document {
    /// Wraps bytes that are already in memory.
    pub fn new(bytes: Vec<u8>, format: DocumentFormat) -> Self {
        Self {
            bytes,
            format,
            source: None,
        }
    }

    /// Reads a document from disk, inferring the format from the extension.
    ///
    /// The format is checked before any I/O, so unsupported files are rejected without being
    /// opened. Files larger than `max_bytes` are refused.
    pub fn read(path: &Path, max_bytes: Option<u64>) -> Result<Self, ExtractError> {
        let format = DocumentFormat::from_path(path)?;
        let read_error = |source| ExtractError::ReadFile {
            path: path.to_path_buf(),
            source,
        };

        if let Some(limit) = max_bytes {
            let size = fs::metadata(path).map_err(read_error)?.len();
            if size > limit {
                return Err(ExtractError::TooLarge {
                    path: path.to_path_buf(),
                    size,
                    limit,
                });
            }
        }

        let bytes = fs::read(path).map_err(read_error)?;
        Ok(Self {
            bytes,
            format,
            source: Some(path.to_path_buf()),
        })
    }

    /// Raw document bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Declared format.
    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    /// Source path, when read from disk.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
