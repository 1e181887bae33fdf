//! Response Decoder — recovers a JSON object from free-form model output.
//!
//! Models reliably produce JSON but often wrap it in prose or markdown fences.
//! Decoding tries an ordered chain of strategies and stops at the first one
//! that yields a JSON object:
//!
//! 1. the trimmed text as-is
//! 2. the interior of each fenced code block, in order
//! 3. the span from the first `{` to the last `}`
//!
//! The decoder never enforces the analysis schema. Field types and ranges are
//! passed through untouched.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Loosely-typed analysis document as returned by the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnalysisResult(pub Map<String, Value>);

impl AnalysisResult {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Which strategy recovered the object. Logged for diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStrategy {
    Direct,
    FencedBlock,
    OuterBraces,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    Decoded(AnalysisResult),
    /// Carries the original model output, unmodified.
    Failed(String),
}

/// Decodes raw model output. Never fails loudly.
pub fn decode(raw: &str) -> DecodeOutcome {
    match decode_with_strategy(raw) {
        Some((result, strategy)) => {
            debug!("Decoded model output via {strategy:?}");
            DecodeOutcome::Decoded(result)
        }
        None => DecodeOutcome::Failed(raw.to_string()),
    }
}

fn decode_with_strategy(raw: &str) -> Option<(AnalysisResult, DecodeStrategy)> {
    let text = raw.trim();

    parse_object(text)
        .map(|r| (r, DecodeStrategy::Direct))
        .or_else(|| {
            fenced_blocks(text)
                .into_iter()
                .find_map(parse_object)
                .map(|r| (r, DecodeStrategy::FencedBlock))
        })
        .or_else(|| {
            outer_braces(text)
                .and_then(parse_object)
                .map(|r| (r, DecodeStrategy::OuterBraces))
        })
}

/// A single attempt: succeeds only for a JSON object.
fn parse_object(candidate: &str) -> Option<AnalysisResult> {
    match serde_json::from_str::<Value>(candidate.trim()) {
        Ok(Value::Object(map)) => Some(AnalysisResult(map)),
        _ => None,
    }
}

/// Interiors of every closed ``` fence, with an optional `json` language tag removed.
fn fenced_blocks(text: &str) -> Vec<&str> {
    const FENCE: &str = "```";

    let mut blocks = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(FENCE) {
        let after_open = &rest[open + FENCE.len()..];
        let Some(close) = after_open.find(FENCE) else {
            break;
        };
        blocks.push(strip_language_tag(&after_open[..close]));
        rest = &after_open[close + FENCE.len()..];
    }

    blocks
}

fn strip_language_tag(block: &str) -> &str {
    match block.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &block[4..],
        _ => block,
    }
}

/// Greedy span from the first `{` to the last `}`.
fn outer_braces(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decoded(raw: &str) -> Value {
        match decode(raw) {
            DecodeOutcome::Decoded(result) => result.into_value(),
            DecodeOutcome::Failed(raw) => panic!("expected decode to succeed for {raw:?}"),
        }
    }

    #[test]
    fn test_plain_json_decodes() {
        assert_eq!(decoded(r#"{"a":1}"#), json!({"a": 1}));
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(decoded("\n\n  {\"a\": 1}  \n"), json!({"a": 1}));
    }

    #[test]
    fn test_json_fence_after_prose_decodes() {
        let raw = "Sure, here is the result:\n```json\n{\"a\":1}\n```";
        assert_eq!(decoded(raw), json!({"a": 1}));
    }

    #[test]
    fn test_untagged_fence_decodes() {
        let raw = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(decoded(raw), json!({"key": "value"}));
    }

    #[test]
    fn test_uppercase_json_tag_decodes() {
        let raw = "```JSON\n{\"key\": \"value\"}\n```\nLet me know if you need more.";
        assert_eq!(decoded(raw), json!({"key": "value"}));
    }

    #[test]
    fn test_later_fence_used_when_first_is_not_json() {
        let raw = "```text\nnot json\n```\nand the data:\n```json\n{\"b\": [1, 2]}\n```";
        assert_eq!(decoded(raw), json!({"b": [1, 2]}));
    }

    #[test]
    fn test_outer_brace_fallback() {
        assert_eq!(decoded(r#"prefix {"a":1} suffix"#), json!({"a": 1}));
    }

    #[test]
    fn test_outer_brace_fallback_spans_nested_objects() {
        let raw = "Result: {\"skills\": {\"missing\": [\"Go\"]}, \"ats_score\": 70} -- end";
        assert_eq!(
            decoded(raw),
            json!({"skills": {"missing": ["Go"]}, "ats_score": 70})
        );
    }

    #[test]
    fn test_unclosed_fence_falls_back_to_braces() {
        let raw = "```json\n{\"a\": 1}\n";
        assert_eq!(decoded(raw), json!({"a": 1}));
    }

    #[test]
    fn test_no_json_fails_with_raw_text() {
        assert_eq!(
            decode("no json here"),
            DecodeOutcome::Failed("no json here".to_string())
        );
    }

    #[test]
    fn test_failure_preserves_raw_text_unmodified() {
        let raw = "  I cannot analyze this {resume\n";
        assert_eq!(decode(raw), DecodeOutcome::Failed(raw.to_string()));
    }

    #[test]
    fn test_non_object_json_is_a_failure() {
        assert!(matches!(decode("[1, 2, 3]"), DecodeOutcome::Failed(_)));
        assert!(matches!(decode("42"), DecodeOutcome::Failed(_)));
    }

    #[test]
    fn test_empty_object_is_a_success() {
        assert_eq!(decode("{}"), DecodeOutcome::Decoded(AnalysisResult::default()));
    }

    #[test]
    fn test_schema_violations_pass_through() {
        let value = decoded(r#"{"ats_score": "high", "strengths": null}"#);
        assert_eq!(value["ats_score"], "high");
        assert!(value["strengths"].is_null());
    }

    #[test]
    fn test_strategy_reported() {
        let (_, direct) = decode_with_strategy("{}").unwrap();
        let (_, fenced) = decode_with_strategy("```json\n{}\n```").unwrap();
        let (_, braces) = decode_with_strategy("x {} y").unwrap();
        assert_eq!(direct, DecodeStrategy::Direct);
        assert_eq!(fenced, DecodeStrategy::FencedBlock);
        assert_eq!(braces, DecodeStrategy::OuterBraces);
    }

    #[test]
    fn test_fenced_blocks_extraction() {
        let text = "a ```json\n{}\n``` b ```\nxyz\n``` c ``` dangling";
        assert_eq!(fenced_blocks(text), vec!["\n{}\n", "\nxyz\n"]);
    }

    #[test]
    fn test_outer_braces_requires_ordered_pair() {
        assert_eq!(outer_braces("} nothing {"), None);
        assert_eq!(outer_braces("no braces"), None);
        assert_eq!(outer_braces("a {x} b {y} c"), Some("{x} b {y}"));
    }
}
