//! Error types for document text extraction.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

use crate::DocumentFormat;

/// Errors raised while reading or extracting a document.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The file type is not one jm can read.
    #[error("unsupported document format '{format}'")]
    UnsupportedFormat {
        /// The rejected extension or format tag.
        format: String,
    },

    /// The document could not be read from disk.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The document exceeds the configured size limit.
    #[error("{path} is {size} bytes, over the {limit} byte limit")]
    TooLarge {
        /// Path of the oversized file.
        path: PathBuf,
        /// Actual size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: u64,
    },

    /// The document is password protected.
    #[error("{format} document is password protected")]
    Encrypted {
        /// Format of the protected document.
        format: DocumentFormat,
    },

    /// The document is structurally broken.
    #[error("corrupt {format} document: {message}")]
    Corrupt {
        /// Format the bytes claimed to be.
        format: DocumentFormat,
        /// Parser diagnostic.
        message: String,
    },
}

impl ExtractError {
    /// Builds a `Corrupt` error from a parser diagnostic.
    pub fn corrupt(format: DocumentFormat, err: &dyn fmt::Display) -> Self {
        Self::Corrupt {
            format,
            message: err.to_string(),
        }
    }
}
