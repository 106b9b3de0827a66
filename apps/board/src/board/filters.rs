use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::board::models::JobRecord;

/// Label of the synthetic option that disables a filter dimension.
pub const ALL: &str = "All";

/// One dropdown choice: either no filtering or an exact value match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Selection::All => ALL,
            Selection::Only(value) => value,
        }
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        if value == ALL {
            Selection::All
        } else {
            Selection::Only(value)
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Selection::from(value.to_string())
    }
}

impl From<Selection> for String {
    fn from(selection: Selection) -> Self {
        selection.as_str().to_string()
    }
}

/// The three dropdown values read when the user applies filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub level: Selection,
    #[serde(default, rename = "type")]
    pub job_type: Selection,
    #[serde(default)]
    pub skill: Selection,
}

impl FilterSelection {
    pub fn accepts(&self, record: &JobRecord) -> bool {
        self.level.matches(&record.level)
            && self.job_type.matches(&record.job_type)
            && self.skill.matches(&record.skill)
    }

    pub fn is_unfiltered(&self) -> bool {
        self.level == Selection::All
            && self.job_type == Selection::All
            && self.skill == Selection::All
    }
}

/// Dropdown contents, each list starting with the "All" option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub levels: Vec<String>,
    #[serde(rename = "types")]
    pub job_types: Vec<String>,
    pub skills: Vec<String>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            levels: vec![ALL.to_string()],
            job_types: vec![ALL.to_string()],
            skills: vec![ALL.to_string()],
        }
    }
}

/// Collects the distinct level, type and skill values in order of first
/// appearance.
pub fn derive_filter_options(records: &[Arc<JobRecord>]) -> FilterOptions {
    FilterOptions {
        levels: distinct_with_all(records.iter().map(|r| r.level.as_str())),
        job_types: distinct_with_all(records.iter().map(|r| r.job_type.as_str())),
        skills: distinct_with_all(records.iter().map(|r| r.skill.as_str())),
    }
}

fn distinct_with_all<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut options = vec![ALL.to_string()];
    for value in values {
        if seen.insert(value) {
            options.push(value.to_string());
        }
    }
    options
}

/// Recomputes the working view from the full collection.
pub fn apply_filters(records: &[Arc<JobRecord>], selection: &FilterSelection) -> Vec<Arc<JobRecord>> {
    records
        .iter()
        .filter(|record| selection.accepts(record))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(level: &str, job_type: &str, skill: &str) -> Arc<JobRecord> {
        Arc::new(
            JobRecord::from_value(&json!({
                "Title": format!("{level} {job_type} {skill}"),
                "Level": level,
                "Type": job_type,
                "Skill": skill,
            }))
            .unwrap(),
        )
    }

    fn fixture() -> Vec<Arc<JobRecord>> {
        vec![
            record("Junior", "Fixed", "Rust"),
            record("Senior", "Hourly", "Go"),
            record("Senior", "Fixed", "Rust"),
            record("Junior", "Hourly", "Python"),
        ]
    }

    #[test]
    fn test_options_keep_first_appearance_order() {
        let options = derive_filter_options(&fixture());
        assert_eq!(options.levels, vec!["All", "Junior", "Senior"]);
        assert_eq!(options.job_types, vec!["All", "Fixed", "Hourly"]);
        assert_eq!(options.skills, vec!["All", "Rust", "Go", "Python"]);
    }

    #[test]
    fn test_options_for_empty_collection_are_just_all() {
        assert_eq!(derive_filter_options(&[]), FilterOptions::default());
    }

    #[test]
    fn test_defaulted_values_become_options() {
        let records = vec![Arc::new(JobRecord::from_value(&json!({})).unwrap())];
        let options = derive_filter_options(&records);
        assert_eq!(options.levels, vec!["All", "N/A"]);
    }

    #[test]
    fn test_all_selection_keeps_everything() {
        let records = fixture();
        let view = apply_filters(&records, &FilterSelection::default());
        assert_eq!(view, records);
    }

    #[test]
    fn test_single_dimension() {
        let selection = FilterSelection {
            level: "Senior".into(),
            ..Default::default()
        };
        let view = apply_filters(&fixture(), &selection);
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|r| r.level == "Senior"));
    }

    #[test]
    fn test_dimensions_are_conjunctive() {
        let selection = FilterSelection {
            level: "Senior".into(),
            job_type: "Fixed".into(),
            skill: "Rust".into(),
        };
        let view = apply_filters(&fixture(), &selection);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].title, "Senior Fixed Rust");
    }

    #[test]
    fn test_no_match_yields_empty_view() {
        let selection = FilterSelection {
            level: "Junior".into(),
            skill: "Go".into(),
            ..Default::default()
        };
        assert!(apply_filters(&fixture(), &selection).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let records = fixture();
        let selection = FilterSelection {
            job_type: "Hourly".into(),
            ..Default::default()
        };
        let once = apply_filters(&records, &selection);
        let twice = apply_filters(&records, &selection);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_selection_from_all_label() {
        assert_eq!(Selection::from("All"), Selection::All);
        assert_eq!(Selection::from("all"), Selection::Only("all".to_string()));
        assert!(FilterSelection::default().is_unfiltered());
    }

    #[test]
    fn test_selection_deserializes_from_form_fields() {
        let selection: FilterSelection =
            serde_json::from_value(json!({"level": "Senior", "type": "All"})).unwrap();
        assert_eq!(selection.level, Selection::Only("Senior".to_string()));
        assert_eq!(selection.job_type, Selection::All);
        assert_eq!(selection.skill, Selection::All);
    }
}
