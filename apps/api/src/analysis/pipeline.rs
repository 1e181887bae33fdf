//! Resume analysis — orchestrates one request end to end.
//!
//! Flow: extract → validate request → build prompt → completion call → decode.
//!
//! Nothing is shared between requests except the read-only completion client.

use std::sync::Arc;

use tracing::{info, warn, Instrument};
use uuid::Uuid;

use crate::analysis::decoder::{decode, AnalysisResult, DecodeOutcome};
use crate::analysis::extractor::{extract, ResumeDocument};
use crate::analysis::prompts::{build_for, ANALYSIS_SYSTEM};
use crate::analysis::request::AnalysisRequest;
use crate::errors::AppError;
use crate::llm_client::CompletionClient;

#[derive(Clone)]
pub struct Analyzer {
    /// `None` when no API credential was configured at startup.
    completion: Option<Arc<dyn CompletionClient>>,
}

impl Analyzer {
    pub fn new(completion: Option<Arc<dyn CompletionClient>>) -> Self {
        Self { completion }
    }

    pub fn is_configured(&self) -> bool {
        self.completion.is_some()
    }

    /// Runs the full analysis for one uploaded resume.
    pub async fn analyze(
        &self,
        document: ResumeDocument,
        job_description: Option<String>,
        target_role: Option<String>,
    ) -> Result<AnalysisResult, AppError> {
        let span = tracing::info_span!("analyze", request_id = %Uuid::new_v4(), kind = ?document.kind);
        self.run(document, job_description, target_role)
            .instrument(span)
            .await
    }

    async fn run(
        &self,
        document: ResumeDocument,
        job_description: Option<String>,
        target_role: Option<String>,
    ) -> Result<AnalysisResult, AppError> {
        let completion = self.completion.as_ref().ok_or(AppError::NotConfigured)?;

        let resume_text = tokio::task::spawn_blocking(move || extract(&document))
            .await
            .map_err(|e| AppError::Internal(e.into()))??;

        let request = AnalysisRequest::new(resume_text, job_description, target_role)
            .inspect_err(|_| warn!("Rejected document with no extractable content"))?;

        let prompt = build_for(&request);
        info!(
            "Requesting analysis: resume_chars={}, job_description={}, prompt_chars={}",
            request.resume_text.len(),
            request.job_description.is_some(),
            prompt.len()
        );

        let raw = completion.complete(ANALYSIS_SYSTEM, &prompt).await?;

        match decode(&raw) {
            DecodeOutcome::Decoded(result) => {
                info!("Analysis decoded with {} top-level fields", result.0.len());
                Ok(result)
            }
            DecodeOutcome::Failed(raw) => {
                warn!("Model output could not be decoded ({} chars)", raw.len());
                Err(AppError::DecodeFailure { raw })
            }
        }
    }
}
