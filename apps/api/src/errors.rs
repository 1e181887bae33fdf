use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::extractor::ExtractionError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Configuration, extraction, upstream and decode failures must stay separate
/// variants; each maps to its own status code.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Service not configured: no completion API key")]
    NotConfigured,

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Upstream error: {0}")]
    Upstream(#[from] LlmError),

    #[error("Could not parse structured output")]
    DecodeFailure { raw: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotConfigured => {
                tracing::error!("Analysis requested but no completion API key is configured");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SERVICE_NOT_CONFIGURED",
                    "The analysis service is not configured".to_string(),
                )
            }
            AppError::Extraction(ExtractionError::UnsupportedFormat(_)) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FORMAT",
                self.to_string(),
            ),
            AppError::Extraction(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_ERROR",
                e.to_string(),
            ),
            AppError::Upstream(e) => {
                tracing::error!("Upstream error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "The analysis service is temporarily unavailable".to_string(),
                )
            }
            AppError::DecodeFailure { .. } => (
                StatusCode::BAD_GATEWAY,
                "DECODE_FAILURE",
                self.to_string(),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut body = json!({
            "error": {
                "code": code,
                "message": message
            }
        });
        if let AppError::DecodeFailure { raw } = self {
            body["error"]["raw"] = json!(raw);
        }

        (status, Json(body)).into_response()
    }
}
