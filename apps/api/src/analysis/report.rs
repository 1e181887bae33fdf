//! Scorecard — the presentation-boundary view of an analysis.
//!
//! The model does not guarantee the schema, so every field is read
//! defensively: wrong types and missing keys fall back to defaults.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::analysis::decoder::AnalysisResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Pass,
    Moderate,
    Fail,
}

impl StatusTone {
    pub fn from_status(status: &str) -> Self {
        if status.contains("Pass") {
            StatusTone::Pass
        } else if status.contains("Fail") {
            StatusTone::Fail
        } else {
            StatusTone::Moderate
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCard {
    pub ats_score: u8,
    pub ats_status: String,
    pub status_tone: StatusTone,
    pub ats_breakdown: BTreeMap<String, u8>,
    /// `None` when no job description was analysed.
    pub job_match_percentage: Option<u8>,
    pub found_skill_count: usize,
    pub missing_skill_count: usize,
    pub strength_count: usize,
    pub weakness_count: usize,
    pub improvement_count: usize,
}

impl ScoreCard {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let ats_status = result
            .get("ats_status")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string();

        let ats_breakdown = result
            .get("ats_breakdown")
            .and_then(Value::as_object)
            .map(|obj| {
                obj.iter()
                    .filter_map(|(k, v)| percent(v).map(|p| (k.clone(), p)))
                    .collect()
            })
            .unwrap_or_default();

        let skills = result.get("skills");
        let found_skill_count = list_len(skills.and_then(|s| s.get("found_technical")))
            + list_len(skills.and_then(|s| s.get("found_soft")));

        Self {
            ats_score: result.get("ats_score").and_then(percent).unwrap_or(0),
            status_tone: StatusTone::from_status(&ats_status),
            ats_status,
            ats_breakdown,
            job_match_percentage: result
                .get("job_match")
                .filter(|jm| jm.is_object())
                .map(|jm| jm.get("match_percentage").and_then(percent).unwrap_or(0)),
            found_skill_count,
            missing_skill_count: list_len(skills.and_then(|s| s.get("missing"))),
            strength_count: list_len(result.get("strengths")),
            weakness_count: list_len(result.get("weaknesses")),
            improvement_count: list_len(result.get("improvements")),
        }
    }
}

/// Reads a 0–100 score. Accepts floats and numeric strings; clamps out-of-range values.
fn percent(value: &Value) -> Option<u8> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !n.is_finite() {
        return None;
    }
    Some(n.round().clamp(0.0, 100.0) as u8)
}

fn list_len(value: Option<&Value>) -> usize {
    value.and_then(Value::as_array).map(Vec::len).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(value: Value) -> AnalysisResult {
        match value {
            Value::Object(map) => AnalysisResult(map),
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_full_result_maps_every_field() {
        let card = ScoreCard::from_result(&result(json!({
            "ats_score": 82,
            "ats_status": "Pass",
            "ats_breakdown": {"keywords": 90, "formatting": 75, "sections": 80, "readability": 85},
            "skills": {
                "found_technical": ["Python", "AWS", "Docker"],
                "found_soft": ["Communication"],
                "missing": ["Kubernetes"]
            },
            "job_match": {"match_percentage": 68},
            "strengths": ["Clear impact"],
            "weaknesses": ["No summary", "Dense layout"],
            "improvements": ["Add metrics", "Add summary", "Tighten bullets"]
        })));

        assert_eq!(card.ats_score, 82);
        assert_eq!(card.status_tone, StatusTone::Pass);
        assert_eq!(card.ats_breakdown.len(), 4);
        assert_eq!(card.ats_breakdown["keywords"], 90);
        assert_eq!(card.job_match_percentage, Some(68));
        assert_eq!(card.found_skill_count, 4);
        assert_eq!(card.missing_skill_count, 1);
        assert_eq!(card.strength_count, 1);
        assert_eq!(card.weakness_count, 2);
        assert_eq!(card.improvement_count, 3);
    }

    #[test]
    fn test_empty_result_uses_defaults() {
        let card = ScoreCard::from_result(&AnalysisResult::default());
        assert_eq!(card.ats_score, 0);
        assert_eq!(card.ats_status, "Unknown");
        assert_eq!(card.status_tone, StatusTone::Moderate);
        assert!(card.ats_breakdown.is_empty());
        assert_eq!(card.job_match_percentage, None);
        assert_eq!(card.found_skill_count, 0);
    }

    #[test]
    fn test_mistyped_fields_fall_back() {
        let card = ScoreCard::from_result(&result(json!({
            "ats_score": "87%",
            "ats_status": 3,
            "ats_breakdown": {"keywords": "n/a", "formatting": 140.4},
            "skills": "Python, AWS",
            "strengths": "many",
            "job_match": "no value"
        })));
        assert_eq!(card.ats_score, 87);
        assert_eq!(card.ats_status, "Unknown");
        assert_eq!(card.ats_breakdown.len(), 1);
        assert_eq!(card.ats_breakdown["formatting"], 100);
        assert_eq!(card.found_skill_count, 0);
        assert_eq!(card.strength_count, 0);
        assert_eq!(card.job_match_percentage, None);
    }

    #[test]
    fn test_null_job_match_has_no_percentage() {
        let card = ScoreCard::from_result(&result(json!({"job_match": null})));
        assert_eq!(card.job_match_percentage, None);
    }

    #[test]
    fn test_status_tone_classification() {
        assert_eq!(StatusTone::from_status("Pass"), StatusTone::Pass);
        assert_eq!(StatusTone::from_status("Fail"), StatusTone::Fail);
        assert_eq!(StatusTone::from_status("Moderate"), StatusTone::Moderate);
        assert_eq!(
            StatusTone::from_status("Needs Improvement"),
            StatusTone::Moderate
        );
    }

    #[test]
    fn test_percent_clamps_negative_scores() {
        assert_eq!(percent(&json!(-5)), Some(0));
        assert_eq!(percent(&json!(99.6)), Some(100));
        assert_eq!(percent(&json!(true)), None);
    }
}
