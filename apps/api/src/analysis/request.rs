use crate::analysis::extractor::ExtractionError;

/// Validated input to the prompt builder.
///
/// `resume_text` is non-empty after trimming. Optional fields are either
/// `None` or non-blank; empty strings never survive construction.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub job_description: Option<String>,
    pub target_role: Option<String>,
}

impl AnalysisRequest {
    pub fn new(
        resume_text: String,
        job_description: Option<String>,
        target_role: Option<String>,
    ) -> Result<Self, ExtractionError> {
        if resume_text.trim().is_empty() {
            return Err(ExtractionError::NoContent);
        }

        Ok(Self {
            resume_text,
            job_description: non_blank(job_description),
            target_role: non_blank(target_role),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_resume_is_rejected() {
        let result = AnalysisRequest::new(" \n\t ".to_string(), None, None);
        assert!(matches!(result, Err(ExtractionError::NoContent)));
    }

    #[test]
    fn test_whitespace_job_description_becomes_absent() {
        let request = AnalysisRequest::new(
            "Rust engineer".to_string(),
            Some("   \n".to_string()),
            Some(String::new()),
        )
        .unwrap();
        assert_eq!(request.job_description, None);
        assert_eq!(request.target_role, None);
    }

    #[test]
    fn test_present_fields_are_kept_verbatim() {
        let request = AnalysisRequest::new(
            "Rust engineer".to_string(),
            Some("  Build payment systems  ".to_string()),
            Some("Backend Engineer".to_string()),
        )
        .unwrap();
        assert_eq!(
            request.job_description.as_deref(),
            Some("  Build payment systems  ")
        );
        assert_eq!(request.target_role.as_deref(), Some("Backend Engineer"));
    }
}
