//! PDF text extraction.
//!
//! Page text comes from pdf-extract; lopdf is consulted only to tell encrypted files apart from
//! broken ones when extraction fails.

use std::{
    any::Any,
    fmt,
    panic::{self, AssertUnwindSafe},
};

use lopdf::Document as PdfFile;
use tracing::{debug, warn};

use crate::{DocumentFormat, ExtractError};

/// Extracts the text of every page, concatenated in page order.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    // pdf-extract panics on some malformed inputs; treat that as a parse failure.
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }));

    let pages = match outcome {
        Ok(Ok(pages)) => pages,
        Ok(Err(err)) => return Err(classify_failure(bytes, &err)),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(%message, "pdf parser panicked");
            return Err(classify_failure(bytes, &message));
        }
    };

    debug!(pages = pages.len(), "extracted pdf text");
    Ok(pages.concat())
}

/// Maps a failed extraction to `Encrypted` or `Corrupt`.
fn classify_failure(bytes: &[u8], err: &dyn fmt::Display) -> ExtractError {
    let encrypted = PdfFile::load_mem(bytes).is_ok_and(|doc| doc.is_encrypted());
    if encrypted {
        ExtractError::Encrypted {
            format: DocumentFormat::Pdf,
        }
    } else {
        ExtractError::corrupt(DocumentFormat::Pdf, err)
    }
}

/// Best-effort text from a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        String::from("parser panicked")
    }
}
