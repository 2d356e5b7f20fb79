//! HTTP surface: `POST /api/upload` and `GET /health`.
//!
//! The handler reads the multipart body, hands the `pdf` field (if any) to
//! [`QuizGenerator::generate`] and renders the outcome as JSON:
//! `{ "questions": [...] }` on success, `{ "error": "..." }` otherwise.
//! Upload problems map to `400`, everything else to `500`.
//!
//! Client disconnects drop the handler future, which cancels the pipeline
//! at its next await point.

use crate::error::QuizError;
use crate::generate::QuizGenerator;
use crate::pipeline::input::UploadedFile;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

/// Multipart field carrying the PDF.
pub const UPLOAD_FIELD: &str = "pdf";

/// Allowance for multipart boundaries and headers on top of the file limit.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Shared state for all handlers.
pub type AppState = Arc<QuizGenerator>;

/// Build the application router.
///
/// The body limit sits just above the upload ceiling so that oversize files
/// still reach the validator and get the usual `TooLarge` message; bodies
/// far beyond it are cut off while streaming.
pub fn router(generator: AppState) -> Router {
    let body_limit = generator.config().max_upload_bytes + MULTIPART_OVERHEAD;

    Router::new()
        .route("/api/upload", post(upload))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(generator)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn upload(
    State(generator): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let limit = generator.config().max_upload_bytes;
    let result = match multipart {
        Ok(multipart) => match read_upload(multipart, limit).await {
            Ok(file) => generator.generate(file).await,
            Err(e) => Err(e),
        },
        // Not a multipart body at all, so there is no file field.
        Err(rejection) => {
            warn!("Rejected upload body: {}", rejection.body_text());
            Err(QuizError::MissingFile)
        }
    };

    match result {
        Ok(quiz) => (StatusCode::OK, Json(quiz)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Pull the first `pdf` field out of the form, ignoring every other field.
///
/// Later `pdf` fields are skipped without being buffered.
async fn read_upload(
    mut multipart: Multipart,
    limit: usize,
) -> Result<Option<UploadedFile>, QuizError> {
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            debug!("Ignoring form field {:?}", field.name());
            continue;
        }
        if file.is_some() {
            debug!("Ignoring duplicate {:?} field", UPLOAD_FIELD);
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, limit))?
            .to_vec();

        file = Some(UploadedFile {
            filename,
            content_type,
            data,
        });
    }

    Ok(file)
}

fn multipart_error(e: MultipartError, limit: usize) -> QuizError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!("Upload exceeded body limit: {}", e.body_text());
        return QuizError::TooLarge { size: None, limit };
    }
    warn!("Failed to read form field: {}", e.body_text());
    QuizError::Internal(format!("Failed to read form data: {}", e.body_text()))
}

impl QuizError {
    /// HTTP status reported for this error.
    pub fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for QuizError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}
