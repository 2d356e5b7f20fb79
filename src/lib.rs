//! # pdf2quiz
//!
//! Turn an uploaded PDF into a multiple-choice quiz using a Large Language
//! Model.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF upload
//!  │
//!  ├─ 1. Validate  field present, declared application/pdf, ≤ 10 MiB
//!  ├─ 2. Extract   pdf-extract on the blocking pool, trim, ≥ 100 chars
//!  ├─ 3. Prompt    cut to 8000 chars + "...", embed in the quiz template
//!  ├─ 4. Complete  one chat call (llama-3.3-70b-versatile by default)
//!  ├─ 5. Parse     strip ``` fences, parse JSON, require a questions array
//!  └─ 6. Filter    keep questions with text, 4 string options, answer 0–3
//! ```
//!
//! Every stage either passes a narrower value on or ends the request with
//! one [`QuizError`]. Nothing is retried or persisted.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2quiz::{QuizConfig, QuizGenerator, UploadedFile};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Provider auto-detected from OPENAI_API_KEY / ANTHROPIC_API_KEY / …
//!     let generator = QuizGenerator::from_config(QuizConfig::default())?;
//!     let bytes = std::fs::read("lecture-notes.pdf")?;
//!     let quiz = generator.generate(Some(UploadedFile::pdf(bytes))).await?;
//!     for q in &quiz.questions {
//!         println!("{} -> {:?}", q.question, q.correct_option());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Serving over HTTP
//!
//! [`server::router`] exposes the pipeline as `POST /api/upload` (multipart
//! field `pdf`). The `pdf2quiz` binary (feature `cli`, on by default) wraps
//! it with flag/env configuration and logging.
//!
//! ## Testing without a provider
//!
//! The model sits behind [`CompletionModel`]; pass any implementation to
//! [`QuizGenerator::new`] to run the pipeline against canned replies.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod generate;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod server;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{QuizConfig, QuizConfigBuilder};
pub use error::QuizError;
pub use generate::QuizGenerator;
pub use output::{Quiz, QuizQuestion, OPTION_COUNT};
pub use pipeline::input::UploadedFile;
pub use pipeline::llm::{CompletionModel, ProviderModel};
pub use progress::{PipelineStage, StageObserver};
