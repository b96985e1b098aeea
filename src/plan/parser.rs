//! Decoding of a completion into commit proposals.
//!
//! The completion is untrusted: fields may be missing or null, and the list
//! may arrive wrapped in prose or a markdown fence. Shape is validated; the
//! content of messages and paths is passed through verbatim.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::PlanError;
use crate::llm::extract_json;
use crate::plan::model::CommitProposal;

/// Field that may wrap the list when the model answers with an object.
const WRAPPER_FIELD: &str = "commits";

#[derive(Debug, Deserialize)]
struct RawProposal {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    files: Option<Vec<String>>,
}

impl From<RawProposal> for CommitProposal {
    fn from(raw: RawProposal) -> Self {
        CommitProposal::new(raw.message.unwrap_or_default(), raw.files.unwrap_or_default())
    }
}

/// Parse a completion into an ordered list of proposals.
///
/// Accepts a top-level array, or an object carrying the array under
/// `"commits"`. Missing `message` becomes an empty string and missing
/// `files` an empty list.
pub fn parse_plan(raw: &str) -> Result<Vec<CommitProposal>, PlanError> {
    if raw.trim().is_empty() {
        return Err(PlanError::EmptyResponse);
    }

    let json_str = extract_json(raw);
    let value: Value = serde_json::from_str(&json_str).map_err(|e| malformed(raw, e))?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(WRAPPER_FIELD) {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => return Err(PlanError::EmptyResponse),
            Some(other) => {
                return Err(malformed(
                    raw,
                    format!("\"{WRAPPER_FIELD}\" is {}, expected a list", type_name(&other)),
                ));
            }
        },
        Value::Null => return Err(PlanError::EmptyResponse),
        other => {
            return Err(malformed(
                raw,
                format!("top level is {}, expected a list", type_name(&other)),
            ));
        }
    };

    let proposals = items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            serde_json::from_value::<RawProposal>(item)
                .map(CommitProposal::from)
                .map_err(|e| malformed(raw, format!("entry {idx}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Parsed {} commit proposals", proposals.len());
    Ok(proposals)
}

fn malformed(raw: &str, reason: impl ToString) -> PlanError {
    PlanError::MalformedResponse {
        raw: raw.to_string(),
        reason: reason.to_string(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_order_and_fields() {
        let raw = r#"[
            {"message": "Add logging", "files": ["a.go", "b.go"]},
            {"message": "Fix typo in README.", "files": ["README.md"]}
        ]"#;
        let proposals = parse_plan(raw).unwrap();
        assert_eq!(proposals.len(), 2);
        assert_eq!(proposals[0], CommitProposal::new("Add logging", vec!["a.go".into(), "b.go".into()]));
        // Formatting guidance is not enforced; trailing period survives verbatim
        assert_eq!(proposals[1].message, "Fix typo in README.");
    }

    #[test]
    fn test_missing_files_becomes_empty() {
        let proposals = parse_plan(r#"[{"message": "Add logging"}]"#).unwrap();
        assert_eq!(proposals[0].message, "Add logging");
        assert!(proposals[0].files.is_empty());
    }

    #[test]
    fn test_missing_or_null_message_becomes_empty() {
        let proposals =
            parse_plan(r#"[{"files": ["a"]}, {"message": null, "files": null}]"#).unwrap();
        assert_eq!(proposals[0], CommitProposal::new("", vec!["a".into()]));
        assert_eq!(proposals[1], CommitProposal::new("", vec![]));
    }

    #[test]
    fn test_multiline_message_kept_whole() {
        let proposals =
            parse_plan(r#"[{"message": "Add cache\n\nSpeeds up lookups", "files": ["c.rs"]}]"#)
                .unwrap();
        assert_eq!(proposals[0].message, "Add cache\n\nSpeeds up lookups");
    }

    #[test]
    fn test_fenced_response() {
        let raw = "```json\n[{\"message\": \"Add\", \"files\": [\"x\"]}]\n```";
        assert_eq!(parse_plan(raw).unwrap().len(), 1);
    }

    #[test]
    fn test_wrapped_object() {
        let raw = r#"{"commits": [{"message": "Add", "files": ["x"]}]}"#;
        assert_eq!(parse_plan(raw).unwrap()[0].message, "Add");
    }

    #[test]
    fn test_object_without_commits_is_empty_response() {
        assert!(matches!(
            parse_plan(r#"{"message": "Add", "files": ["x"]}"#),
            Err(PlanError::EmptyResponse)
        ));
    }

    #[test]
    fn test_blank_and_null_are_empty_response() {
        assert!(matches!(parse_plan("   \n"), Err(PlanError::EmptyResponse)));
        assert!(matches!(parse_plan("null"), Err(PlanError::EmptyResponse)));
    }

    #[test]
    fn test_empty_array_is_ok() {
        assert!(parse_plan("[]").unwrap().is_empty());
    }

    #[test]
    fn test_prose_is_malformed_and_keeps_raw() {
        let raw = "Sorry, I can't produce JSON today.";
        match parse_plan(raw) {
            Err(PlanError::MalformedResponse { raw: kept, .. }) => assert_eq!(kept, raw),
            other => panic!("Expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_types_are_malformed() {
        assert!(matches!(
            parse_plan(r#"["just a string"]"#),
            Err(PlanError::MalformedResponse { .. })
        ));
        assert!(matches!(
            parse_plan(r#"[{"message": "Add", "files": "a.go"}]"#),
            Err(PlanError::MalformedResponse { .. })
        ));
        assert!(matches!(
            parse_plan("42"),
            Err(PlanError::MalformedResponse { .. })
        ));
    }
}
