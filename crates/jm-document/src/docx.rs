//! DOCX text extraction.
//!
//! Reads `word/document.xml` from the OOXML container and walks its paragraphs. Run text is
//! concatenated within a paragraph and paragraphs are joined with `\n`.

use std::{
    fmt,
    io::{Cursor, Read},
};

use quick_xml::{Reader, events::Event};
use tracing::debug;
use zip::ZipArchive;

use crate::{DocumentFormat, ExtractError};

/// Archive entry holding the main document body.
const DOCUMENT_PART: &str = "word/document.xml";

/// Signature of an OLE compound file.
const OLE_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Extracts paragraph text from DOCX bytes.
pub fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let corrupt = |err: &dyn fmt::Display| ExtractError::corrupt(DocumentFormat::Docx, err);

    // Password-protected OOXML is wrapped in an OLE compound file instead of a zip.
    if bytes.starts_with(&OLE_MAGIC) {
        return Err(ExtractError::Encrypted {
            format: DocumentFormat::Docx,
        });
    }

    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| corrupt(&e))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| corrupt(&e))?
        .read_to_string(&mut xml)
        .map_err(|e| corrupt(&e))?;

    let paragraphs = paragraphs(&xml).map_err(|e| corrupt(&e))?;
    debug!(paragraphs = paragraphs.len(), "extracted docx text");
    Ok(paragraphs.join("\n"))
}

/// Collects the text of each `w:p` element in document order.
///
/// Paragraphs nest when a text box (`w:txbxContent`) sits inside a run. Each paragraph gets its
/// slot when it opens, so an outer paragraph keeps the text on both sides of the box and comes
/// before the box's own paragraphs. `mc:Fallback` repeats the content of `mc:Choice` for older
/// readers and is skipped.
fn paragraphs(xml: &str) -> Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs: Vec<String> = Vec::new();
    // Slots of the paragraphs currently open, innermost last.
    let mut open: Vec<usize> = Vec::new();
    let mut run_depth = 0_usize;
    let mut in_text = false;
    let mut fallback_depth = 0_usize;

    loop {
        let event = reader.read_event()?;
        if fallback_depth > 0 {
            match event {
                Event::Start(e) if e.local_name().as_ref() == b"Fallback" => fallback_depth += 1,
                Event::End(e) if e.local_name().as_ref() == b"Fallback" => fallback_depth -= 1,
                Event::Eof => break,
                _ => {}
            }
            continue;
        }

        let current = open.last().copied();
        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => {
                    open.push(paragraphs.len());
                    paragraphs.push(String::new());
                }
                b"r" => run_depth += 1,
                b"t" => in_text = true,
                b"Fallback" => fallback_depth = 1,
                _ => {}
            },
            Event::Empty(e) => match (e.local_name().as_ref(), current) {
                (b"p", _) => paragraphs.push(String::new()),
                (b"tab", Some(slot)) if run_depth > 0 => paragraphs[slot].push('\t'),
                (b"br" | b"cr", Some(slot)) if run_depth > 0 => paragraphs[slot].push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text => {
                if let Some(slot) = current {
                    paragraphs[slot].push_str(&t.unescape()?);
                }
            }
            Event::CData(t) if in_text => {
                if let Some(slot) = current {
                    paragraphs[slot].push_str(&String::from_utf8_lossy(&t));
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"p" => {
                    open.pop();
                }
                b"r" => run_depth = run_depth.saturating_sub(1),
                b"t" => in_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}
