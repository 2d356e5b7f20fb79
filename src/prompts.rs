//! Prompt construction for quiz generation.
//!
//! The whole request to the model is one user message: fixed instructions,
//! the document text, and the exact JSON shape the response must take.
//! Keeping the template here lets unit tests inspect the prompt without a
//! model behind it.

use std::borrow::Cow;

/// Appended to extracted text that was cut to fit the prompt budget.
pub const TRUNCATION_MARKER: &str = "...";

/// Cut `text` to its first `max_chars` characters and append
/// [`TRUNCATION_MARKER`]; shorter text passes through unchanged.
pub fn truncate_for_prompt(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            let mut cut = String::with_capacity(byte_idx + TRUNCATION_MARKER.len());
            cut.push_str(&text[..byte_idx]);
            cut.push_str(TRUNCATION_MARKER);
            Cow::Owned(cut)
        }
        None => Cow::Borrowed(text),
    }
}

/// Build the quiz-generation prompt around already-truncated document text.
pub fn quiz_prompt(document_text: &str, question_count: usize) -> String {
    format!(
        r#"You are an expert quiz generator. Based on the following text extracted from a PDF document, generate exactly {n} multiple-choice questions.

Each question should:
- Be clear and educational
- Have exactly 4 options (A, B, C, D)
- Have exactly one correct answer
- Test understanding of the key concepts in the text

Text:
{text}

You must respond ONLY with valid JSON in this exact format (no additional text or markdown):
{{
  "questions": [
    {{
      "question": "Question text here?",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correct_answer": 0
    }}
  ]
}}

The "correct_answer" field should be the index (0-3) of the correct option.
Generate exactly {n} questions now:"#,
        n = question_count,
        text = document_text,
    )
}

/// Truncate `extracted` to `max_chars` and embed it in the quiz prompt.
pub fn build_prompt(extracted: &str, max_chars: usize, question_count: usize) -> String {
    quiz_prompt(&truncate_for_prompt(extracted, max_chars), question_count)
}
