//! Completion-model interaction.
//!
//! The rest of the pipeline only sees [`CompletionModel`]: one prompt in,
//! one string out, or [`QuizError::ModelInvocationError`]. The
//! production implementation, [`ProviderModel`], forwards the prompt to an
//! `edgequake-llm` provider as a single user message. Tests substitute a
//! canned implementation and never touch the network.
//!
//! No retries: a failed call ends the request.

use crate::config::QuizConfig;
use crate::error::QuizError;
use async_trait::async_trait;
use edgequake_llm::{ChatMessage, CompletionOptions, LLMProvider};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::{timeout, Duration};
use tracing::{debug, warn};

/// Narrow capability interface over a text-completion model.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Send `prompt` as the sole user message and return the raw reply text.
    ///
    /// An empty string is a valid return value; the pipeline reports it as
    /// [`QuizError::EmptyModelResponse`].
    async fn complete(&self, prompt: &str) -> Result<String, QuizError>;
}

/// [`CompletionModel`] backed by an `edgequake-llm` provider.
pub struct ProviderModel {
    provider: Arc<dyn LLMProvider>,
    options: CompletionOptions,
    deadline: Duration,
}

impl ProviderModel {
    /// Wrap `provider` with the sampling parameters and deadline from `config`.
    pub fn new(provider: Arc<dyn LLMProvider>, config: &QuizConfig) -> Self {
        Self {
            provider,
            options: build_options(config),
            deadline: Duration::from_secs(config.api_timeout_secs),
        }
    }
}

#[async_trait]
impl CompletionModel for ProviderModel {
    async fn complete(&self, prompt: &str) -> Result<String, QuizError> {
        let start = Instant::now();
        let messages = vec![ChatMessage::user(prompt)];

        let call = self.provider.chat(&messages, Some(&self.options));
        let response = match timeout(self.deadline, call).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                warn!("Completion call failed after {:?}: {}", start.elapsed(), e);
                return Err(QuizError::ModelInvocationError {
                    message: e.to_string(),
                });
            }
            Err(_) => {
                warn!("Completion call timed out after {:?}", self.deadline);
                return Err(QuizError::ModelInvocationError {
                    message: format!("request timed out after {}s", self.deadline.as_secs()),
                });
            }
        };

        debug!(
            "Completion: {} input tokens, {} output tokens, {:?}",
            response.prompt_tokens,
            response.completion_tokens,
            start.elapsed()
        );

        Ok(response.content)
    }
}

/// Build `CompletionOptions` from the quiz config.
fn build_options(config: &QuizConfig) -> CompletionOptions {
    CompletionOptions {
        temperature: Some(config.temperature),
        max_tokens: Some(config.max_tokens),
        top_p: Some(config.top_p),
        ..Default::default()
    }
}
