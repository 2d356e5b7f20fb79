//! Pipeline stages for PDF-to-quiz generation.
//!
//! Each submodule implements exactly one transformation step, so each can
//! be tested without the others.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ prompt ──▶ llm ──▶ postprocess
//! (upload)   (text)     (string)   (raw)   (Quiz)
//! ```
//!
//! 1. [`input`]   — presence, declared MIME type and size of the upload
//! 2. [`extract`] — PDF bytes to trimmed text; runs in `spawn_blocking`
//!    because `pdf-extract` is synchronous
//! 3. [`crate::prompts`] — truncate text and embed it in the template
//! 4. [`llm`]     — the only stage with network I/O, behind the
//!    [`llm::CompletionModel`] trait
//! 5. [`postprocess`] — strip fences, parse JSON, filter questions

pub mod extract;
pub mod input;
pub mod llm;
pub mod postprocess;
