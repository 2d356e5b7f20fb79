//! The upload-to-quiz entry point.
//!
//! [`QuizGenerator`] owns the completion model and the config and runs one
//! request through every stage in order. Nothing is shared between
//! requests except those two read-only values, so a single generator behind
//! an `Arc` serves any number of concurrent uploads.

use crate::config::QuizConfig;
use crate::error::QuizError;
use crate::output::Quiz;
use crate::pipeline::input::{self, UploadedFile};
use crate::pipeline::llm::{CompletionModel, ProviderModel};
use crate::pipeline::{extract, postprocess};
use crate::progress::PipelineStage;
use crate::prompts;
use edgequake_llm::{LLMProvider, ProviderFactory};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs the validation → extraction → prompt → model → filter pipeline.
pub struct QuizGenerator {
    model: Arc<dyn CompletionModel>,
    config: QuizConfig,
}

impl QuizGenerator {
    /// Build a generator around an explicit completion model.
    ///
    /// Provider settings in `config` are ignored; use this to plug in a
    /// canned model in tests.
    pub fn new(model: Arc<dyn CompletionModel>, config: QuizConfig) -> Self {
        Self { model, config }
    }

    /// Build a generator whose model is resolved from `config`.
    ///
    /// # Errors
    /// [`QuizError::ProviderNotConfigured`] when no provider can be created.
    pub fn from_config(config: QuizConfig) -> Result<Self, QuizError> {
        let provider = resolve_provider(&config)?;
        info!("Using {} model {}", provider.name(), provider.model());
        let model = Arc::new(ProviderModel::new(provider, &config));
        Ok(Self::new(model, config))
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// Turn an upload into a validated quiz.
    ///
    /// `upload` is `None` when the request carried no file field.
    ///
    /// # Errors
    /// Exactly one [`QuizError`] from the stage that failed. Individual
    /// malformed questions are dropped, not reported.
    pub async fn generate(&self, upload: Option<UploadedFile>) -> Result<Quiz, QuizError> {
        let start = Instant::now();
        self.enter(PipelineStage::Idle);

        match self.run(upload).await {
            Ok(quiz) => {
                info!(
                    "Generated {} questions in {}ms",
                    quiz.len(),
                    start.elapsed().as_millis()
                );
                if let Some(ref obs) = self.config.stage_observer {
                    obs.on_success(quiz.len());
                }
                Ok(quiz)
            }
            Err(e) => {
                warn!(
                    kind = e.kind(),
                    "Quiz generation failed after {}ms: {}",
                    start.elapsed().as_millis(),
                    e
                );
                if let Some(ref obs) = self.config.stage_observer {
                    obs.on_failure(&e);
                }
                Err(e)
            }
        }
    }

    async fn run(&self, upload: Option<UploadedFile>) -> Result<Quiz, QuizError> {
        let config = &self.config;

        // ── Step 1: Validate the upload ──────────────────────────────────
        self.enter(PipelineStage::Validating);
        let file = input::validate_upload(upload, config)?;
        info!("Processing {} ({} bytes)", file.display_name(), file.len());

        // ── Step 2: Extract text ─────────────────────────────────────────
        self.enter(PipelineStage::Extracting);
        let text = extract::extract_text(file.data, config.min_text_chars).await?;

        // ── Step 3: Build the prompt ─────────────────────────────────────
        self.enter(PipelineStage::Prompting);
        let prompt = prompts::build_prompt(
            text.as_str(),
            config.max_prompt_chars,
            config.question_count,
        );
        debug!("Prompt is {} chars", prompt.chars().count());

        // ── Step 4: Call the model ───────────────────────────────────────
        self.enter(PipelineStage::Invoking);
        let raw = self.model.complete(&prompt).await?;
        if raw.trim().is_empty() {
            return Err(QuizError::EmptyModelResponse);
        }

        // ── Step 5: Parse the reply ──────────────────────────────────────
        self.enter(PipelineStage::ParsingResponse);
        let candidates = postprocess::parse_response(&raw)?;

        // ── Step 6: Filter questions ─────────────────────────────────────
        self.enter(PipelineStage::FilteringQuestions);
        postprocess::select_questions(candidates)
    }

    fn enter(&self, stage: PipelineStage) {
        debug!("Stage: {}", stage);
        if let Some(ref obs) = self.config.stage_observer {
            obs.on_stage(stage);
        }
    }
}

// ── Provider resolution ──────────────────────────────────────────────────

/// Instantiate a named provider with the given model.
fn create_provider(provider_name: &str, model: &str) -> Result<Arc<dyn LLMProvider>, QuizError> {
    ProviderFactory::create_llm_provider(provider_name, model).map_err(|e| {
        QuizError::ProviderNotConfigured {
            provider: provider_name.to_string(),
            hint: format!("{e}"),
        }
    })
}

/// Resolve the LLM provider, from most-specific to least-specific.
///
/// 1. **Pre-built provider** (`config.provider`) — used as-is.
/// 2. **Named provider** (`config.provider_name`) with `config.model`; the
///    factory reads the matching API key from the environment.
/// 3. **Environment pair** (`EDGEQUAKE_LLM_PROVIDER` + `EDGEQUAKE_MODEL`).
/// 4. **Full auto-detection** (`ProviderFactory::from_env`), rebuilt with
///    `config.model` so the configured model is always the one called.
pub fn resolve_provider(config: &QuizConfig) -> Result<Arc<dyn LLMProvider>, QuizError> {
    if let Some(ref provider) = config.provider {
        return Ok(Arc::clone(provider));
    }

    if let Some(ref name) = config.provider_name {
        return create_provider(name, &config.model);
    }

    if let (Ok(prov), Ok(model)) = (
        std::env::var("EDGEQUAKE_LLM_PROVIDER"),
        std::env::var("EDGEQUAKE_MODEL"),
    ) {
        if !prov.is_empty() && !model.is_empty() {
            return create_provider(&prov, &model);
        }
    }

    let (detected, _embedding) =
        ProviderFactory::from_env().map_err(|e| QuizError::ProviderNotConfigured {
            provider: "auto".to_string(),
            hint: format!(
                "No LLM provider could be auto-detected from environment.\n\
                Set OPENAI_API_KEY, ANTHROPIC_API_KEY, or pass --provider.\n\
                Error: {}",
                e
            ),
        })?;

    // Auto-detection picks each provider's own default model.
    if detected.model() == config.model {
        return Ok(detected);
    }
    debug!(
        "Rebuilding auto-detected provider {} with model {} (was {})",
        detected.name(),
        config.model,
        detected.model()
    );
    create_provider(detected.name(), &config.model)
}
