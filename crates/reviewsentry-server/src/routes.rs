//! HTTP routes and handlers

use axum::{
    extract::{DefaultBodyLimit, Host, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::state::AppState;
use reviewsentry_core::Error;
use reviewsentry_pipeline::read_reviews;

/// Maximum accepted upload size (16 MiB)
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/review", post(submit_review))
        .fallback(fallback)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

/// Version and location metadata
async fn index(Host(host): Host) -> Json<serde_json::Value> {
    Json(json!({
        "status": 200,
        "response": {
            "version": "v1.0",
            "location": format!("http://{}/", host),
        }
    }))
}

/// Liveness probe
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": 200,
        "response": "pong"
    }))
}

/// Prometheus metrics render
async fn metrics(State(state): State<AppState>) -> String {
    state.metrics_handle.render()
}

/// Accept an uploaded review report and trigger one pipeline run.
///
/// The upload is saved and read synchronously so malformed reports fail
/// the request; the classification run itself proceeds in the background
/// and the caller gets a RUNNING acknowledgment immediately. Run failures
/// after acknowledgment are observable only in logs.
async fn submit_review(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, AppError> {
    metrics::counter!("reviewsentry_requests_total").increment(1);

    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut to_email: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidRequest(format!("malformed multipart body: {}", e)))?
    {
        match field.name() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("reviews.csv").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::InvalidRequest(format!("unreadable upload: {}", e)))?;
                upload = Some((filename, data.to_vec()));
            }
            Some("email") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::InvalidRequest(format!("unreadable email field: {}", e)))?;
                to_email = Some(value);
            }
            _ => {}
        }
    }

    let (filename, data) =
        upload.ok_or_else(|| AppError::InvalidRequest("missing 'file' field".to_string()))?;
    let to_email = to_email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| AppError::InvalidRequest("missing 'email' field".to_string()))?;

    let safe_name = sanitize_filename(&filename)
        .ok_or_else(|| AppError::InvalidRequest(format!("unusable filename: {}", filename)))?;
    let file_path = PathBuf::from(&state.config.upload_dir).join(&safe_name);

    std::fs::write(&file_path, &data)
        .map_err(|e| AppError::Internal(format!("cannot save upload: {}", e)))?;

    // Read eagerly so a malformed report fails the request instead of a
    // background task nobody is watching.
    let reviews = read_reviews(&file_path)?;

    info!(
        file = %file_path.display(),
        reviews = reviews.len(),
        to = %to_email,
        "pipeline run accepted"
    );

    let orchestrator = state.orchestrator.clone();
    let output_path = state.config.output_path();
    let file_path_string = file_path.display().to_string();

    tokio::spawn(async move {
        match orchestrator.execute(&reviews, &to_email, &output_path).await {
            Ok(records) => {
                info!(violations = records.len(), "pipeline run finished");
            }
            Err(e) => {
                error!(error = %e, "pipeline run aborted");
                metrics::counter!("reviewsentry_run_failures_total").increment(1);
            }
        }
    });

    Ok(Json(json!({
        "status_code": 200,
        "task_status": "RUNNING",
        "file_path": file_path_string,
    })))
}

async fn fallback() -> &'static str {
    "Not found"
}

/// Reduce an uploaded filename to a safe basename.
///
/// Strips any directory components and replaces characters outside
/// `[A-Za-z0-9._-]`; names that reduce to nothing (`..`, empty) are
/// rejected.
fn sanitize_filename(name: &str) -> Option<String> {
    let base = Path::new(name).file_name()?.to_string_lossy().into_owned();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_matches('.').to_string();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Error handling
#[derive(Debug)]
enum AppError {
    InvalidRequest(String),
    Internal(String),
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        match err {
            Error::Read(msg) => AppError::InvalidRequest(format!("unreadable report: {}", msg)),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = json!({
            "error": {
                "message": message,
            }
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_plain_names() {
        assert_eq!(sanitize_filename("reviews.csv").unwrap(), "reviews.csv");
        assert_eq!(sanitize_filename("my-export_2.csv").unwrap(), "my-export_2.csv");
    }

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(
            sanitize_filename("/etc/passwd").unwrap(),
            "passwd"
        );
        assert_eq!(
            sanitize_filename("uploads/../reviews.csv").unwrap(),
            "reviews.csv"
        );
    }

    #[test]
    fn test_sanitize_replaces_odd_characters() {
        assert_eq!(
            sanitize_filename("review export (1).csv").unwrap(),
            "review_export__1_.csv"
        );
    }

    #[test]
    fn test_sanitize_rejects_empty_and_dotdot() {
        assert!(sanitize_filename("").is_none());
        assert!(sanitize_filename("..").is_none());
        assert!(sanitize_filename("...").is_none());
    }

    #[test]
    fn test_read_error_maps_to_bad_request() {
        let app_err: AppError = Error::read("missing file").into();
        assert!(matches!(app_err, AppError::InvalidRequest(_)));

        let app_err: AppError = Error::delivery("bounced").into();
        assert!(matches!(app_err, AppError::Internal(_)));
    }
}
