//! Error types for the pdf2quiz library.
//!
//! Every pipeline stage either hands a narrowed value to the next stage or
//! stops the request with exactly one [`QuizError`]. There is no partial
//! result type: the only tolerated malformation is a bad individual
//! question, which is filtered out rather than reported (see
//! [`crate::pipeline::postprocess`]).
//!
//! Variants split into two groups that callers usually treat differently:
//!
//! * **Client errors** — the upload itself is unusable (missing, wrong type,
//!   too large, unreadable, no text). Resubmitting the same file will fail
//!   the same way. [`QuizError::is_client_error`] returns `true`.
//!
//! * **Server errors** — the model call or its output went wrong. The same
//!   upload may succeed on a second attempt.
//!
//! `Display` strings are what end users see. Provider diagnostics and raw
//! model output are logged by the stage that failed, never put in here
//! beyond the provider's own summary message.

use thiserror::Error;

/// All errors returned by the pdf2quiz library.
#[derive(Debug, Error)]
pub enum QuizError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The request carried no file field.
    #[error("No PDF file provided")]
    MissingFile,

    /// The declared MIME type is not `application/pdf`.
    #[error("File must be a PDF")]
    InvalidType { content_type: Option<String> },

    /// The upload is larger than the configured ceiling.
    ///
    /// `size` is `None` when the body was cut off while streaming, before
    /// the full length was known.
    #[error("File size must be less than {}", size_label(.limit))]
    TooLarge { size: Option<usize>, limit: usize },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// The bytes are not a PDF, or extraction failed structurally.
    #[error("Failed to parse PDF file")]
    ParseError { detail: String },

    /// Extraction succeeded but produced too little text to quiz on.
    #[error("PDF does not contain enough text content")]
    InsufficientContent { chars: usize, min: usize },

    // ── LLM errors ────────────────────────────────────────────────────────
    /// The completion call itself failed (network, auth, rate limit, timeout).
    #[error("AI generation failed: {message}")]
    ModelInvocationError { message: String },

    /// The completion call succeeded but carried no text.
    #[error("No response from AI model")]
    EmptyModelResponse,

    /// The cleaned model output is not valid JSON.
    #[error("Failed to parse AI response. Please try again.")]
    ResponseParseError { detail: String },

    /// The JSON has no `questions` array.
    #[error("Invalid quiz format from AI")]
    InvalidQuizShape,

    /// Every candidate question failed the schema check.
    #[error("No valid questions generated")]
    NoValidQuestions { candidates: usize },

    // ── Setup errors ──────────────────────────────────────────────────────
    /// No LLM provider could be built (missing API key etc.).
    #[error("LLM provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Server error: {0}")]
    Internal(String),
}

/// Whole megabytes, falling back to kilobytes and bytes for small limits.
fn size_label(bytes: &usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;
    match *bytes {
        b if b >= MB => format!("{}MB", b / MB),
        b if b >= KB => format!("{}KB", b / KB),
        b => format!("{b} bytes"),
    }
}

impl QuizError {
    /// `true` when the failure is caused by the uploaded file itself.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            QuizError::MissingFile
                | QuizError::InvalidType { .. }
                | QuizError::TooLarge { .. }
                | QuizError::ParseError { .. }
                | QuizError::InsufficientContent { .. }
        )
    }

    /// Stable snake_case identifier, used as a structured logging field.
    pub fn kind(&self) -> &'static str {
        match self {
            QuizError::MissingFile => "missing_file",
            QuizError::InvalidType { .. } => "invalid_type",
            QuizError::TooLarge { .. } => "too_large",
            QuizError::ParseError { .. } => "parse_error",
            QuizError::InsufficientContent { .. } => "insufficient_content",
            QuizError::ModelInvocationError { .. } => "model_invocation_error",
            QuizError::EmptyModelResponse => "empty_model_response",
            QuizError::ResponseParseError { .. } => "response_parse_error",
            QuizError::InvalidQuizShape => "invalid_quiz_shape",
            QuizError::NoValidQuestions { .. } => "no_valid_questions",
            QuizError::ProviderNotConfigured { .. } => "provider_not_configured",
            QuizError::InvalidConfig(_) => "invalid_config",
            QuizError::Internal(_) => "internal",
        }
    }
}
