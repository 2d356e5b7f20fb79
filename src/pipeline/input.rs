//! Input validation: decide whether an upload is worth extracting.
//!
//! Checks run in a fixed order (presence, declared type, size) so a
//! non-PDF is always reported as a type error, however large it is. The
//! check is a pure predicate over the upload; nothing is read from disk.

use crate::config::{QuizConfig, PDF_CONTENT_TYPE};
use crate::error::QuizError;
use tracing::debug;

/// A file received from the caller, owned by a single pipeline run.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied filename, kept for logging only.
    pub filename: Option<String>,
    /// MIME type as declared by the client, not sniffed.
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl UploadedFile {
    /// Build an upload that declares the PDF content type.
    pub fn pdf(data: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: None,
            content_type: Some(PDF_CONTENT_TYPE.to_string()),
            data: data.into(),
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn display_name(&self) -> &str {
        self.filename.as_deref().unwrap_or("<unnamed>")
    }
}

/// Validate an optional upload against the configured limits.
///
/// Returns the upload unchanged when it is present, declares
/// `application/pdf` exactly, and is no larger than
/// `config.max_upload_bytes` (the limit itself is accepted).
pub fn validate_upload(
    upload: Option<UploadedFile>,
    config: &QuizConfig,
) -> Result<UploadedFile, QuizError> {
    let file = upload.ok_or(QuizError::MissingFile)?;

    if file.content_type.as_deref() != Some(PDF_CONTENT_TYPE) {
        return Err(QuizError::InvalidType {
            content_type: file.content_type,
        });
    }

    if file.len() > config.max_upload_bytes {
        return Err(QuizError::TooLarge {
            size: Some(file.len()),
            limit: config.max_upload_bytes,
        });
    }

    debug!("Accepted upload {} ({} bytes)", file.display_name(), file.len());
    Ok(file)
}
