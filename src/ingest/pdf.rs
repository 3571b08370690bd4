//! Transcript document reading.
//!
//! PDFs go through `pdf-extract`; the per-page texts are joined with a single
//! newline, which is the input contract of [`crate::parse`].

use std::path::Path;

use crate::error::{Result, TranscriptError};
use crate::ingest::scanner::DocumentFormat;

/// Page separator emitted by the extractor.
const PAGE_BREAK: char = '\x0C';

/// Extract the text of every page of a PDF file.
pub fn extract_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    extract_text_from_mem(&bytes).map_err(|detail| TranscriptError::Parse {
        path: path.to_string_lossy().into(),
        detail,
    })
}

/// Extract text from PDF bytes held in memory.
pub fn extract_text_from_mem(bytes: &[u8]) -> std::result::Result<String, String> {
    let raw = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| format!("PDF extraction error: {e}"))?;
    Ok(join_pages(&raw))
}

/// Split extractor output on page breaks, drop blank pages and join the rest
/// with `\n`.
#[must_use]
pub fn join_pages(raw: &str) -> String {
    raw.split(PAGE_BREAK)
        .filter(|page| !page.trim().is_empty())
        .map(|page| page.trim_end_matches(['\n', '\r']))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read a transcript as text: PDFs are extracted, text files read as UTF-8.
pub fn read_transcript(path: &Path) -> Result<String> {
    decode_transcript(path, std::fs::read(path)?)
}

/// Turn the bytes of a transcript document into text, by the format of `path`.
pub fn decode_transcript(path: &Path, bytes: Vec<u8>) -> Result<String> {
    let parse_error = |detail: String| TranscriptError::Parse {
        path: path.to_string_lossy().into(),
        detail,
    };
    match DocumentFormat::from_path(path) {
        Some(DocumentFormat::Pdf) => extract_text_from_mem(&bytes).map_err(parse_error),
        _ => String::from_utf8(bytes).map_err(|_| parse_error("content is not valid UTF-8".into())),
    }
}
