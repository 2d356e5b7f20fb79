//! Text extraction: PDF bytes to a trimmed plain-text string.
//!
//! ## Why spawn_blocking?
//!
//! `pdf-extract` is synchronous and CPU-bound: it decompresses content
//! streams and walks every text operator on every page. Running it on the
//! blocking pool keeps the Tokio workers free to serve other uploads.
//! It also turns a panic inside the parser (which happens on some
//! malformed files) into a `JoinError` we can report as a parse failure
//! instead of taking the worker down.

use crate::error::QuizError;
use tracing::{debug, warn};

/// How far into the buffer the `%PDF-` header may appear.
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Trimmed text extracted from a PDF, guaranteed to meet the minimum length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText(String);

impl ExtractedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Check for the `%PDF-` header near the start of the buffer.
pub fn looks_like_pdf(data: &[u8]) -> bool {
    let window = &data[..data.len().min(HEADER_SEARCH_WINDOW)];
    window.windows(5).any(|w| w == b"%PDF-")
}

/// Extract text from `data`, trimming it and enforcing `min_chars`.
pub async fn extract_text(data: Vec<u8>, min_chars: usize) -> Result<ExtractedText, QuizError> {
    if !looks_like_pdf(&data) {
        warn!("Upload has no %PDF- header ({} bytes)", data.len());
        return Err(QuizError::ParseError {
            detail: "missing %PDF- header".to_string(),
        });
    }

    let raw = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await
        .map_err(|e| {
            warn!("PDF extraction task failed: {}", e);
            QuizError::ParseError {
                detail: format!("extraction aborted: {e}"),
            }
        })?
        .map_err(|e| {
            warn!("PDF parsing error: {}", e);
            QuizError::ParseError {
                detail: e.to_string(),
            }
        })?;

    check_content(&raw, min_chars)
}

/// Trim raw extracted text and reject it when it is too short to quiz on.
pub fn check_content(raw: &str, min_chars: usize) -> Result<ExtractedText, QuizError> {
    let trimmed = raw.trim();
    let chars = trimmed.chars().count();
    if chars < min_chars {
        warn!("Extracted only {} chars (need {})", chars, min_chars);
        return Err(QuizError::InsufficientContent {
            chars,
            min: min_chars,
        });
    }

    debug!("Extracted {} chars of text", chars);
    Ok(ExtractedText(trimmed.to_string()))
}
