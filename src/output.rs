//! Output types: the validated quiz handed back to the caller.

use serde::{Deserialize, Serialize};

/// Number of answer options every accepted question carries.
pub const OPTION_COUNT: usize = 4;

/// A single multiple-choice question that passed the schema check.
///
/// Only ever constructed from a candidate that
/// [`crate::pipeline::postprocess::is_valid_question`] accepted, so
/// `options.len() == OPTION_COUNT` and `correct_answer < OPTION_COUNT` hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// 0-based index into `options`.
    pub correct_answer: u8,
}

impl QuizQuestion {
    /// The text of the correct option.
    pub fn correct_option(&self) -> Option<&str> {
        self.options
            .get(self.correct_answer as usize)
            .map(String::as_str)
    }
}

/// The quiz returned for one upload. Serialises to the response body
/// `{ "questions": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub questions: Vec<QuizQuestion>,
}

impl Quiz {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
