//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::analysis::extractor::{DocumentKind, ResumeDocument};
use crate::analysis::report::ScoreCard;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// The model's object, passed through as decoded.
    pub analysis: Value,
    pub scorecard: ScoreCard,
}

/// POST /api/v1/analyze
///
/// Multipart form: `file` (PDF or TXT, required), `job_description` and
/// `job_role` (optional text fields).
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    // Reported before anything about the upload is inspected.
    if !state.analyzer.is_configured() {
        return Err(AppError::NotConfigured);
    }

    let mut document: Option<ResumeDocument> = None;
    let mut job_description: Option<String> = None;
    let mut job_role: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let kind = DocumentKind::detect(field.content_type(), field.file_name())?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read file: {e}")))?;
                document = Some(ResumeDocument::new(bytes, kind));
            }
            Some("job_description") => job_description = Some(read_text(field).await?),
            Some("job_role") => job_role = Some(read_text(field).await?),
            _ => {}
        }
    }

    let document = document.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    let result = state
        .analyzer
        .analyze(document, job_description, job_role)
        .await?;

    let scorecard = ScoreCard::from_result(&result);
    Ok(Json(AnalyzeResponse {
        analysis: result.into_value(),
        scorecard,
    }))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed form field: {e}")))
}
