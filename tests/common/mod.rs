//! Shared fixtures: in-memory PDFs and a canned completion model.

#![allow(dead_code)]

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use pdf2quiz::{CompletionModel, QuizError};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

// ── PDF fixtures ─────────────────────────────────────────────────────────────

/// Paragraph used to fill text PDFs; 88 characters.
pub const SENTENCE: &str =
    "Photosynthesis converts light energy into chemical energy stored in glucose molecules.";

/// Build a one-page PDF whose content stream is `operations`.
fn pdf_with_operations(operations: Vec<Operation>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("encode content stream"),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("serialise pdf");
    buf
}

/// A PDF with `lines` lines of extractable text, one per text line.
pub fn text_pdf(lines: &[String]) -> Vec<u8> {
    let mut ops = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 10.into()]),
        Operation::new("Td", vec![40.into(), 800.into()]),
    ];
    for line in lines {
        ops.push(Operation::new("Tj", vec![Object::string_literal(line.as_str())]));
        ops.push(Operation::new("Td", vec![0.into(), (-12).into()]));
    }
    ops.push(Operation::new("ET", vec![]));
    pdf_with_operations(ops)
}

/// A PDF with a few paragraphs about photosynthesis, well above 100 chars.
pub fn lecture_pdf() -> Vec<u8> {
    text_pdf(&vec![SENTENCE.to_string(); 6])
}

/// A PDF whose single page only paints a filled rectangle, like a scan
/// with no text layer.
pub fn image_only_pdf() -> Vec<u8> {
    pdf_with_operations(vec![
        Operation::new("re", vec![50.into(), 50.into(), 400.into(), 600.into()]),
        Operation::new("f", vec![]),
    ])
}

// ── Model replies ────────────────────────────────────────────────────────────

pub fn question(n: usize, options: usize, answer: i64) -> Value {
    json!({
        "question": format!("Question {n}?"),
        "options": (0..options).map(|i| format!("Option {i}")).collect::<Vec<_>>(),
        "correct_answer": answer,
    })
}

/// Five valid questions wrapped in a ```json fence.
pub fn fenced_quiz_reply() -> String {
    let body = json!({
        "questions": (1..=5).map(|n| question(n, 4, (n % 4) as i64)).collect::<Vec<_>>()
    });
    format!("```json\n{}\n```", serde_json::to_string_pretty(&body).unwrap())
}

// ── Canned model ─────────────────────────────────────────────────────────────

/// Returns a fixed reply (or error) and records every prompt it receives.
pub struct CannedModel {
    reply: Result<String, String>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl CannedModel {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionModel for CannedModel {
    async fn complete(&self, prompt: &str) -> Result<String, QuizError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .clone()
            .map_err(|message| QuizError::ModelInvocationError { message })
    }
}
