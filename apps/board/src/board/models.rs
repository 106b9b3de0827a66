use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::board::posting::{parse_posted_time, PostingAge};

/// Placeholder for any text field the upload leaves out.
pub const MISSING: &str = "N/A";

/// Placeholder link used when a posting carries no page URL.
pub const MISSING_LINK: &str = "#";

// Input keys, exactly as they appear in uploaded files.
const KEY_JOB_NO: &str = "Job No";
const KEY_TITLE: &str = "Title";
const KEY_JOB_PAGE_LINK: &str = "Job Page Link";
const KEY_POSTED: &str = "Posted";
const KEY_TYPE: &str = "Type";
const KEY_LEVEL: &str = "Level";
const KEY_ESTIMATED_TIME: &str = "Estimated Time";
const KEY_SKILL: &str = "Skill";
const KEY_DETAIL: &str = "Detail";

/// A single job posting, normalized at upload time and never modified after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRecord {
    pub job_no: String,
    pub title: String,
    pub job_page_link: String,
    #[serde(rename = "posted_minutes")]
    pub posted: PostingAge,
    #[serde(rename = "type")]
    pub job_type: String,
    pub level: String,
    pub estimated_time: String,
    pub skill: String,
    pub detail: String,
}

/// Why one element of the uploaded list could not become a `JobRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("expected an object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("field '{field}' must be text, found {found}")]
    UnexpectedType {
        field: &'static str,
        found: &'static str,
    },
}

impl JobRecord {
    /// Builds a record from one element of the uploaded JSON list.
    ///
    /// Each of the nine fields is read on its own; an absent key or `null`
    /// falls back to `"N/A"` (`"#"` for the page link). Numbers and booleans
    /// are kept as their JSON text.
    pub fn from_value(value: &Value) -> Result<Self, RecordError> {
        let fields = value.as_object().ok_or(RecordError::NotAnObject {
            found: json_kind(value),
        })?;

        let posted = text_field(fields, KEY_POSTED)?;

        Ok(Self {
            job_no: text_field(fields, KEY_JOB_NO)?.unwrap_or_else(|| MISSING.to_string()),
            title: text_field(fields, KEY_TITLE)?.unwrap_or_else(|| MISSING.to_string()),
            job_page_link: text_field(fields, KEY_JOB_PAGE_LINK)?
                .unwrap_or_else(|| MISSING_LINK.to_string()),
            posted: parse_posted_time(posted.as_deref().unwrap_or(MISSING)),
            job_type: text_field(fields, KEY_TYPE)?.unwrap_or_else(|| MISSING.to_string()),
            level: text_field(fields, KEY_LEVEL)?.unwrap_or_else(|| MISSING.to_string()),
            estimated_time: text_field(fields, KEY_ESTIMATED_TIME)?
                .unwrap_or_else(|| MISSING.to_string()),
            skill: text_field(fields, KEY_SKILL)?.unwrap_or_else(|| MISSING.to_string()),
            detail: text_field(fields, KEY_DETAIL)?.unwrap_or_else(|| MISSING.to_string()),
        })
    }
}

fn text_field(
    fields: &Map<String, Value>,
    key: &'static str,
) -> Result<Option<String>, RecordError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(Some(v.to_string())),
        Some(other) => Err(RecordError::UnexpectedType {
            field: key,
            found: json_kind(other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_record_keeps_every_field() {
        let record = JobRecord::from_value(&json!({
            "Job No": "J-17",
            "Title": "Rust Engineer",
            "Job Page Link": "https://jobs.example.com/17",
            "Posted": "2 hours ago",
            "Type": "Hourly",
            "Level": "Senior",
            "Estimated Time": "1 to 3 months",
            "Skill": "Rust",
            "Detail": "Build a parser."
        }))
        .unwrap();

        assert_eq!(record.job_no, "J-17");
        assert_eq!(record.title, "Rust Engineer");
        assert_eq!(record.job_page_link, "https://jobs.example.com/17");
        assert_eq!(record.posted, PostingAge::Minutes(120));
        assert_eq!(record.job_type, "Hourly");
        assert_eq!(record.level, "Senior");
        assert_eq!(record.estimated_time, "1 to 3 months");
        assert_eq!(record.skill, "Rust");
        assert_eq!(record.detail, "Build a parser.");
    }

    #[test]
    fn test_empty_object_defaults_every_field() {
        let record = JobRecord::from_value(&json!({})).unwrap();
        assert_eq!(record.job_no, MISSING);
        assert_eq!(record.title, MISSING);
        assert_eq!(record.job_page_link, MISSING_LINK);
        assert_eq!(record.posted, PostingAge::Unknown);
        assert_eq!(record.job_type, MISSING);
        assert_eq!(record.level, MISSING);
        assert_eq!(record.estimated_time, MISSING);
        assert_eq!(record.skill, MISSING);
        assert_eq!(record.detail, MISSING);
    }

    #[test]
    fn test_null_field_is_treated_as_missing() {
        let record = JobRecord::from_value(&json!({"Title": null, "Job Page Link": null})).unwrap();
        assert_eq!(record.title, MISSING);
        assert_eq!(record.job_page_link, MISSING_LINK);
    }

    #[test]
    fn test_numeric_job_no_is_kept_as_text() {
        let record = JobRecord::from_value(&json!({"Job No": 4021, "Skill": true})).unwrap();
        assert_eq!(record.job_no, "4021");
        assert_eq!(record.skill, "true");
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let record = JobRecord::from_value(&json!({"Title": "A", "Salary": 100})).unwrap();
        assert_eq!(record.title, "A");
    }

    #[test]
    fn test_non_object_element_is_rejected() {
        let err = JobRecord::from_value(&json!("just a string")).unwrap_err();
        assert_eq!(err, RecordError::NotAnObject { found: "a string" });
    }

    #[test]
    fn test_nested_field_is_rejected() {
        let err = JobRecord::from_value(&json!({"Skill": ["Rust", "Go"]})).unwrap_err();
        assert_eq!(
            err,
            RecordError::UnexpectedType {
                field: "Skill",
                found: "an array"
            }
        );
        assert!(err.to_string().contains("'Skill'"));
    }

    #[test]
    fn test_serializes_with_posted_minutes() {
        let record = JobRecord::from_value(&json!({"Title": "A", "Posted": "1 day ago"})).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["posted_minutes"], json!(1440));
        assert_eq!(value["type"], json!("N/A"));
    }
}
