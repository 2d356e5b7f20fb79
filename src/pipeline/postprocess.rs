//! Post-processing: turn raw model text into a validated [`Quiz`].
//!
//! ## Why is post-processing necessary?
//!
//! The prompt asks for bare JSON, but models do not always comply:
//!
//! - Wrapping output in ` ```json ... ``` ` fences anyway
//! - Returning three options instead of four
//! - Emitting `"correct_answer": "B"` or `4` instead of an index in 0–3
//! - Forgetting the `questions` wrapper entirely
//!
//! Fences are stripped unconditionally. Structural problems with the whole
//! payload fail the request, while problems with an individual question
//! only drop that question, so one bad entry does not cost the user the
//! other four.
//!
//! ## Order
//!
//! clean → parse → shape check → per-question filter. Each step is a pure
//! function and is tested on its own.

use crate::error::QuizError;
use crate::output::{Quiz, QuizQuestion, OPTION_COUNT};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

// ── Step 1: Strip code fences ────────────────────────────────────────────────

/// Opening or closing fence, with an optional language tag and the line
/// break that follows it.
static RE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```[A-Za-z0-9_+-]*[ \t]*\r?\n?").unwrap());

/// Remove every triple-backtick fence marker and trim the result.
///
/// Unfenced input only loses surrounding whitespace, so applying this twice
/// gives the same result as applying it once.
pub fn clean_response(raw: &str) -> String {
    RE_FENCE.replace_all(raw, "").trim().to_string()
}

// ── Step 2–3: Parse and check the payload shape ──────────────────────────────

/// Parse cleaned model text and return the candidate entries of its
/// `questions` array.
pub fn parse_candidates(cleaned: &str) -> Result<Vec<Value>, QuizError> {
    let value: Value = serde_json::from_str(cleaned).map_err(|e| {
        warn!("JSON parsing error: {}", e);
        warn!("AI response: {}", cleaned);
        QuizError::ResponseParseError {
            detail: e.to_string(),
        }
    })?;

    match value {
        Value::Object(mut map) => match map.remove("questions") {
            Some(Value::Array(candidates)) => Ok(candidates),
            Some(other) => {
                warn!("`questions` is not an array: {}", json_type(&other));
                Err(QuizError::InvalidQuizShape)
            }
            None => {
                warn!("Model response has no `questions` field");
                Err(QuizError::InvalidQuizShape)
            }
        },
        other => {
            warn!("Model response is a JSON {}, not an object", json_type(&other));
            Err(QuizError::InvalidQuizShape)
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ── Step 4: Per-question schema check ────────────────────────────────────────

/// Schema check for one candidate question.
///
/// Accepts exactly: a non-empty `question` string, an `options` array of
/// exactly four strings, and an integer `correct_answer` in `0..=3`.
/// Nothing is coerced: `"2"` and `2.0` are not valid answers.
pub fn is_valid_question(candidate: &Value) -> bool {
    let has_question = candidate
        .get("question")
        .and_then(Value::as_str)
        .is_some_and(|q| !q.is_empty());

    let has_options = candidate
        .get("options")
        .and_then(Value::as_array)
        .is_some_and(|opts| opts.len() == OPTION_COUNT && opts.iter().all(Value::is_string));

    let has_answer = candidate
        .get("correct_answer")
        .and_then(Value::as_u64)
        .is_some_and(|idx| idx < OPTION_COUNT as u64);

    has_question && has_options && has_answer
}

/// Keep only candidates that pass [`is_valid_question`], preserving order.
pub fn filter_questions(candidates: Vec<Value>) -> Vec<QuizQuestion> {
    let total = candidates.len();
    let accepted: Vec<QuizQuestion> = candidates
        .into_iter()
        .filter(is_valid_question)
        .filter_map(|candidate| serde_json::from_value(candidate).ok())
        .collect();

    if accepted.len() < total {
        debug!(
            "Dropped {} of {} malformed questions",
            total - accepted.len(),
            total
        );
    }
    accepted
}

// ── Stage entry points ───────────────────────────────────────────────────────

/// Clean the raw model reply and return its candidate questions.
pub fn parse_response(raw: &str) -> Result<Vec<Value>, QuizError> {
    parse_candidates(&clean_response(raw))
}

/// Filter candidates into a quiz; fails when none survive.
pub fn select_questions(candidates: Vec<Value>) -> Result<Quiz, QuizError> {
    let total = candidates.len();
    let questions = filter_questions(candidates);
    if questions.is_empty() {
        return Err(QuizError::NoValidQuestions { candidates: total });
    }
    Ok(Quiz { questions })
}
