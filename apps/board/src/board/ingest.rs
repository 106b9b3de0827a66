use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use serde_json::Value;
use thiserror::Error;

use crate::board::models::{JobRecord, RecordError};

/// Only files whose name ends with this suffix are accepted (case-sensitive).
pub const JSON_EXTENSION: &str = ".json";

/// A file chosen by the user, with the outcome of reading its contents.
///
/// Reading happens before the upload reaches the board, so a failed read is
/// carried here rather than surfaced by the transport.
#[derive(Debug, Clone)]
pub struct FileSelection {
    pub file_name: Option<String>,
    pub contents: Result<Bytes, String>,
}

impl FileSelection {
    pub fn new(file_name: impl Into<String>, contents: impl Into<Bytes>) -> Self {
        Self {
            file_name: Some(file_name.into()),
            contents: Ok(contents.into()),
        }
    }

    pub fn unreadable(file_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            file_name: Some(file_name.into()),
            contents: Err(reason.into()),
        }
    }

    pub fn none() -> Self {
        Self {
            file_name: None,
            contents: Ok(Bytes::new()),
        }
    }

    /// Reads a job file from disk, named by its final path component.
    pub async fn from_path(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(String::from);
        let contents = tokio::fs::read(path)
            .await
            .map(Bytes::from)
            .map_err(|e| e.to_string());

        Self {
            file_name,
            contents,
        }
    }
}

/// Reasons an upload is rejected. The display text is the alert shown to the
/// user; the board keeps whatever it had before.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    #[error("Please upload a valid JSON file.")]
    InvalidSelection,

    #[error("Error reading the file. Please try again.")]
    ReadFailed(String),

    #[error("Failed to parse JSON: {0}")]
    MalformedJson(String),

    #[error("The JSON file is empty or not in the expected format.")]
    EmptyOrNotList,

    #[error("Job entry {index} is malformed: {source}")]
    MalformedRecord {
        index: usize,
        #[source]
        source: RecordError,
    },
}

impl IngestError {
    /// True for problems with the chosen file itself rather than its contents.
    pub fn is_selection_problem(&self) -> bool {
        matches!(
            self,
            IngestError::InvalidSelection | IngestError::ReadFailed(_)
        )
    }
}

/// Checks the chosen file name before anything is read or parsed.
pub fn check_selection(file_name: Option<&str>) -> Result<&str, IngestError> {
    match file_name {
        Some(name) if !name.is_empty() && name.ends_with(JSON_EXTENSION) => Ok(name),
        _ => Err(IngestError::InvalidSelection),
    }
}

/// Runs an upload through every ingestion step and returns the new records.
pub fn load_records(selection: &FileSelection) -> Result<Vec<Arc<JobRecord>>, IngestError> {
    check_selection(selection.file_name.as_deref())?;

    let contents = selection
        .contents
        .as_ref()
        .map_err(|reason| IngestError::ReadFailed(reason.clone()))?;

    parse_records(contents)
}

/// Parses raw JSON text into records, one per list element.
pub fn parse_records(contents: &[u8]) -> Result<Vec<Arc<JobRecord>>, IngestError> {
    let document: Value =
        serde_json::from_slice(contents).map_err(|e| IngestError::MalformedJson(e.to_string()))?;

    let items = match document {
        Value::Array(items) if !items.is_empty() => items,
        _ => return Err(IngestError::EmptyOrNotList),
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            JobRecord::from_value(item)
                .map(Arc::new)
                .map_err(|source| IngestError::MalformedRecord { index, source })
        })
        .collect()
}
