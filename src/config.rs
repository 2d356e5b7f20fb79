//! Configuration types for quiz generation.
//!
//! All pipeline behaviour is controlled through [`QuizConfig`], built via
//! its [`QuizConfigBuilder`]. The defaults are the limits the upload
//! endpoint has always enforced: 10 MiB uploads, at least 100 characters of
//! text, an 8000-character prompt budget and five questions per quiz.
//!
//! The LLM provider is part of the config, so a running server holds exactly
//! one provider client, injected at construction time.

use crate::error::QuizError;
use crate::progress::SharedObserver;
use edgequake_llm::LLMProvider;
use std::fmt;
use std::sync::Arc;

/// Declared MIME type an upload must carry.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Default completion model.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Configuration for a quiz-generation pipeline.
///
/// # Example
/// ```rust
/// use pdf2quiz::QuizConfig;
///
/// let config = QuizConfig::builder()
///     .model("gpt-4.1-mini")
///     .temperature(0.5)
///     .question_count(8)
///     .build()
///     .unwrap();
/// assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
/// ```
#[derive(Clone)]
pub struct QuizConfig {
    /// Largest accepted upload in bytes (inclusive). Default: 10 MiB.
    pub max_upload_bytes: usize,

    /// Minimum number of characters of trimmed extracted text. Default: 100.
    ///
    /// Scanned, image-only PDFs extract to an empty or near-empty string;
    /// there is nothing to ask questions about, so they fail before any
    /// model call is paid for.
    pub min_text_chars: usize,

    /// Maximum characters of extracted text embedded in the prompt. Default: 8000.
    ///
    /// Longer documents are cut at this length and marked with `...`.
    pub max_prompt_chars: usize,

    /// Number of questions the prompt asks for. Default: 5.
    ///
    /// The model may return fewer valid ones; any non-zero number of
    /// accepted questions is a successful quiz.
    pub question_count: usize,

    /// LLM model identifier. Default: `llama-3.3-70b-versatile`.
    pub model: String,

    /// LLM provider name (e.g. "openai", "anthropic", "ollama").
    /// If None along with `provider`, the provider is auto-detected.
    pub provider_name: Option<String>,

    /// Pre-constructed LLM provider. Takes precedence over `provider_name`.
    pub provider: Option<Arc<dyn LLMProvider>>,

    /// Sampling temperature. Default: 0.7.
    ///
    /// Quiz writing benefits from some variety in distractors; this is far
    /// higher than a transcription task would use.
    pub temperature: f32,

    /// Maximum tokens the model may generate. Default: 2000.
    ///
    /// Five questions with four options each fit comfortably in ~800
    /// tokens; the headroom covers verbose models.
    pub max_tokens: usize,

    /// Nucleus-sampling parameter. Default: 1.0.
    pub top_p: f32,

    /// Deadline for one completion call in seconds. Default: 60.
    ///
    /// Expiry is reported as [`QuizError::ModelInvocationError`].
    pub api_timeout_secs: u64,

    /// Optional observer notified of every stage transition.
    pub stage_observer: Option<SharedObserver>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 10 * 1024 * 1024,
            min_text_chars: 100,
            max_prompt_chars: 8000,
            question_count: 5,
            model: DEFAULT_MODEL.to_string(),
            provider_name: None,
            provider: None,
            temperature: 0.7,
            max_tokens: 2000,
            top_p: 1.0,
            api_timeout_secs: 60,
            stage_observer: None,
        }
    }
}

impl fmt::Debug for QuizConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizConfig")
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("min_text_chars", &self.min_text_chars)
            .field("max_prompt_chars", &self.max_prompt_chars)
            .field("question_count", &self.question_count)
            .field("model", &self.model)
            .field("provider_name", &self.provider_name)
            .field("provider", &self.provider.as_ref().map(|_| "<dyn LLMProvider>"))
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("top_p", &self.top_p)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field(
                "stage_observer",
                &self.stage_observer.as_ref().map(|_| "<dyn StageObserver>"),
            )
            .finish()
    }
}

impl QuizConfig {
    /// Create a new builder for `QuizConfig`.
    pub fn builder() -> QuizConfigBuilder {
        QuizConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`QuizConfig`].
#[derive(Debug)]
pub struct QuizConfigBuilder {
    config: QuizConfig,
}

impl QuizConfigBuilder {
    pub fn max_upload_bytes(mut self, bytes: usize) -> Self {
        self.config.max_upload_bytes = bytes;
        self
    }

    pub fn min_text_chars(mut self, n: usize) -> Self {
        self.config.min_text_chars = n;
        self
    }

    pub fn max_prompt_chars(mut self, n: usize) -> Self {
        self.config.max_prompt_chars = n;
        self
    }

    pub fn question_count(mut self, n: usize) -> Self {
        self.config.question_count = n.max(1);
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.config.provider_name = Some(name.into());
        self
    }

    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.config.provider = Some(provider);
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = n;
        self
    }

    pub fn top_p(mut self, p: f32) -> Self {
        self.config.top_p = p.clamp(0.0, 1.0);
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs;
        self
    }

    pub fn stage_observer(mut self, observer: SharedObserver) -> Self {
        self.config.stage_observer = Some(observer);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<QuizConfig, QuizError> {
        let c = &self.config;
        if c.max_upload_bytes == 0 {
            return Err(QuizError::InvalidConfig(
                "Upload limit must be ≥ 1 byte".into(),
            ));
        }
        if c.max_prompt_chars < c.min_text_chars {
            return Err(QuizError::InvalidConfig(format!(
                "Prompt budget ({}) is smaller than the minimum text length ({})",
                c.max_prompt_chars, c.min_text_chars
            )));
        }
        if c.max_tokens == 0 {
            return Err(QuizError::InvalidConfig("max_tokens must be ≥ 1".into()));
        }
        if c.model.trim().is_empty() {
            return Err(QuizError::InvalidConfig("Model id must not be empty".into()));
        }
        Ok(self.config)
    }
}
