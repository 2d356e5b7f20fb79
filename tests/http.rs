//! HTTP tests: drive the router with hand-built multipart bodies.

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::{fenced_quiz_reply, image_only_pdf, lecture_pdf, CannedModel};
use pdf2quiz::{server, QuizConfig, QuizGenerator};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

const BOUNDARY: &str = "pdf2quiz-test-boundary";

struct Part<'a> {
    name: &'a str,
    content_type: Option<&'a str>,
    data: Vec<u8>,
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"upload.bin\"\r\n",
                part.name
            )
            .as_bytes(),
        );
        if let Some(ct) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {ct}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(&part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

fn pdf_part(data: Vec<u8>) -> Part<'static> {
    Part {
        name: "pdf",
        content_type: Some("application/pdf"),
        data,
    }
}

fn app(model: &Arc<CannedModel>, config: QuizConfig) -> Router {
    server::router(Arc::new(QuizGenerator::new(model.clone(), config)))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_reports_ok() {
    let model = Arc::new(CannedModel::replying(""));
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(&model, QuizConfig::default()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn upload_returns_questions() {
    let model = Arc::new(CannedModel::replying(fenced_quiz_reply()));
    let request = upload_request(&[pdf_part(lecture_pdf())]);
    let (status, body) = send(app(&model, QuizConfig::default()), request).await;

    assert_eq!(status, StatusCode::OK);
    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 5);
    assert_eq!(questions[0]["options"].as_array().unwrap().len(), 4);
    assert!(questions[0]["correct_answer"].as_u64().unwrap() < 4);
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn other_fields_are_ignored() {
    let model = Arc::new(CannedModel::replying(fenced_quiz_reply()));
    let request = upload_request(&[
        Part {
            name: "title",
            content_type: None,
            data: b"Biology 101".to_vec(),
        },
        pdf_part(lecture_pdf()),
    ]);
    let (status, _) = send(app(&model, QuizConfig::default()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn form_without_pdf_field_is_bad_request() {
    let model = Arc::new(CannedModel::replying(fenced_quiz_reply()));
    let request = upload_request(&[Part {
        name: "file",
        content_type: Some("application/pdf"),
        data: lecture_pdf(),
    }]);
    let (status, body) = send(app(&model, QuizConfig::default()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No PDF file provided");
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn non_multipart_body_is_bad_request() {
    let model = Arc::new(CannedModel::replying(fenced_quiz_reply()));
    let request = Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let (status, body) = send(app(&model, QuizConfig::default()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No PDF file provided");
}

#[tokio::test]
async fn wrong_content_type_is_bad_request() {
    let model = Arc::new(CannedModel::replying(fenced_quiz_reply()));
    let request = upload_request(&[Part {
        name: "pdf",
        content_type: Some("text/plain"),
        data: b"just some notes".to_vec(),
    }]);
    let (status, body) = send(app(&model, QuizConfig::default()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "File must be a PDF");
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn scanned_pdf_is_bad_request() {
    let model = Arc::new(CannedModel::replying(fenced_quiz_reply()));
    let request = upload_request(&[pdf_part(image_only_pdf())]);
    let (status, body) = send(app(&model, QuizConfig::default()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "PDF does not contain enough text content");
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn file_over_limit_is_bad_request() {
    let model = Arc::new(CannedModel::replying(fenced_quiz_reply()));
    let config = QuizConfig::builder()
        .max_upload_bytes(2 * 1024 * 1024)
        .build()
        .unwrap();
    let request = upload_request(&[pdf_part(vec![b'x'; 2 * 1024 * 1024 + 1])]);
    let (status, body) = send(app(&model, config), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "File size must be less than 2MB");
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn model_failure_is_server_error() {
    let model = Arc::new(CannedModel::failing("upstream unavailable"));
    let request = upload_request(&[pdf_part(lecture_pdf())]);
    let (status, body) = send(app(&model, QuizConfig::default()), request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "AI generation failed: upstream unavailable");
}

#[tokio::test]
async fn unparseable_reply_is_server_error() {
    let model = Arc::new(CannedModel::replying("Sure! Here are five questions:"));
    let request = upload_request(&[pdf_part(lecture_pdf())]);
    let (status, body) = send(app(&model, QuizConfig::default()), request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to parse AI response. Please try again.");
    assert!(body.get("questions").is_none());
}

#[tokio::test]
async fn first_pdf_field_wins() {
    let model = Arc::new(CannedModel::replying(fenced_quiz_reply()));
    let request = upload_request(&[
        pdf_part(lecture_pdf()),
        Part {
            name: "pdf",
            content_type: Some("text/plain"),
            data: b"second attachment".to_vec(),
        },
    ]);
    let (status, body) = send(app(&model, QuizConfig::default()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"].as_array().unwrap().len(), 5);
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn body_cut_off_while_streaming_is_too_large() {
    let model = Arc::new(CannedModel::replying(fenced_quiz_reply()));
    let config = QuizConfig::builder()
        .max_upload_bytes(1024 * 1024)
        .build()
        .unwrap();
    let request = upload_request(&[pdf_part(vec![b'x'; 3 * 1024 * 1024])]);
    let (status, body) = send(app(&model, config), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "File size must be less than 1MB");
    assert_eq!(model.calls(), 0);
}
