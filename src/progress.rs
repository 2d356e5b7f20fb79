//! Stage-observer trait for per-request pipeline events.
//!
//! Inject an [`Arc<dyn StageObserver>`] via
//! [`crate::config::QuizConfigBuilder::stage_observer`] to be told when a
//! request enters each stage of the pipeline and how it ended.
//!
//! A request walks a strictly linear state machine:
//!
//! ```text
//! Idle → Validating → Extracting → Prompting → Invoking
//!      → ParsingResponse → FilteringQuestions → Success | Failed(kind)
//! ```
//!
//! Observers see every transition they reach; a failed request stops at the
//! stage that failed and then receives [`StageObserver::on_failure`].
//!
//! # Example
//!
//! ```rust
//! use pdf2quiz::{PipelineStage, QuizConfig, StageObserver};
//! use std::sync::{Arc, Mutex};
//!
//! #[derive(Default)]
//! struct Recorder {
//!     stages: Mutex<Vec<PipelineStage>>,
//! }
//!
//! impl StageObserver for Recorder {
//!     fn on_stage(&self, stage: PipelineStage) {
//!         self.stages.lock().unwrap().push(stage);
//!     }
//! }
//!
//! let config = QuizConfig::builder()
//!     .stage_observer(Arc::new(Recorder::default()) as Arc<dyn StageObserver>)
//!     .build()
//!     .unwrap();
//! ```

use crate::error::QuizError;
use std::fmt;
use std::sync::Arc;

/// Non-terminal states of a single pipeline run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PipelineStage {
    Idle,
    Validating,
    Extracting,
    Prompting,
    Invoking,
    ParsingResponse,
    FilteringQuestions,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Idle => "idle",
            PipelineStage::Validating => "validating",
            PipelineStage::Extracting => "extracting",
            PipelineStage::Prompting => "prompting",
            PipelineStage::Invoking => "invoking",
            PipelineStage::ParsingResponse => "parsing_response",
            PipelineStage::FilteringQuestions => "filtering_questions",
        };
        f.write_str(name)
    }
}

/// Called by the pipeline as a request moves through its stages.
///
/// Requests run concurrently, so a shared observer may be called from many
/// tasks at once. All methods default to no-ops.
pub trait StageObserver: Send + Sync {
    /// Called on entry to each stage.
    fn on_stage(&self, stage: PipelineStage) {
        let _ = stage;
    }

    /// Called once when a quiz is returned.
    ///
    /// # Arguments
    /// * `question_count` — questions that survived filtering
    fn on_success(&self, question_count: usize) {
        let _ = question_count;
    }

    /// Called once when the request terminates with an error.
    fn on_failure(&self, error: &QuizError) {
        let _ = error;
    }
}

/// Convenience alias matching the type stored in [`crate::config::QuizConfig`].
pub type SharedObserver = Arc<dyn StageObserver>;
