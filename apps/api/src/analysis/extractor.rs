//! Document Extractor — converts an uploaded resume (PDF or UTF-8 text) into plain text.
//!
//! Extraction is mechanical. An empty result is NOT an error here; deciding that
//! a resume has no usable content is the orchestrator's job.

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported document format: {0}. Upload a PDF or plain text file")]
    UnsupportedFormat(String),

    #[error("Could not read PDF: {0}")]
    CorruptDocument(String),

    #[error("Text file is not valid UTF-8: {0}")]
    Decode(#[from] std::str::Utf8Error),

    #[error("File has no extractable content")]
    NoContent,
}

/// Declared media kind of an uploaded resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Text,
}

impl DocumentKind {
    /// Resolves the kind from the upload's content type, falling back to the
    /// file extension when the content type is missing or generic.
    pub fn detect(
        content_type: Option<&str>,
        file_name: Option<&str>,
    ) -> Result<Self, ExtractionError> {
        let essence = content_type
            .map(|ct| ct.split(';').next().unwrap_or_default().trim().to_ascii_lowercase());

        match essence.as_deref() {
            Some("application/pdf") => return Ok(DocumentKind::Pdf),
            Some("text/plain") => return Ok(DocumentKind::Text),
            _ => {}
        }

        let extension = file_name
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => Ok(DocumentKind::Pdf),
            Some("txt") | Some("text") => Ok(DocumentKind::Text),
            _ => Err(ExtractionError::UnsupportedFormat(
                essence
                    .or_else(|| file_name.map(str::to_string))
                    .unwrap_or_else(|| "unknown".to_string()),
            )),
        }
    }
}

/// Raw upload plus its declared kind. Lives only for the duration of a request.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub bytes: Bytes,
    pub kind: DocumentKind,
}

impl ResumeDocument {
    pub fn new(bytes: impl Into<Bytes>, kind: DocumentKind) -> Self {
        Self {
            bytes: bytes.into(),
            kind,
        }
    }
}

/// Extracts plain text from the document.
///
/// PDF pages are joined with `\n` in page order; a page with no text layer
/// contributes an empty string. Text files must be valid UTF-8.
pub fn extract(document: &ResumeDocument) -> Result<String, ExtractionError> {
    match document.kind {
        DocumentKind::Pdf => extract_pdf(&document.bytes),
        DocumentKind::Text => Ok(std::str::from_utf8(&document.bytes)?.to_string()),
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    // pdf-extract panics on some malformed inputs instead of returning an error.
    let pages = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
        .map_err(|_| ExtractionError::CorruptDocument("PDF parser aborted".to_string()))?
        .map_err(|e| ExtractionError::CorruptDocument(e.to_string()))?;

    Ok(join_pages(pages))
}

fn join_pages(pages: Vec<String>) -> String {
    pages.join("\n")
}
