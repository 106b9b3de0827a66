// Job board widget: the in-memory collection, its working view, and the
// commands that change them. All HTTP concerns live in `handlers`.

pub mod filters;
pub mod handlers;
pub mod ingest;
pub mod models;
pub mod posting;
pub mod sorting;

use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::board::filters::{apply_filters, derive_filter_options, FilterOptions, FilterSelection};
use crate::board::ingest::{load_records, FileSelection, IngestError};
use crate::board::models::JobRecord;
use crate::board::sorting::{sort_view, SortMode};

/// Where a click on the open detail modal landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalClick {
    /// The dedicated close control.
    #[serde(rename = "close")]
    CloseControl,
    /// The overlay outside the modal content.
    Backdrop,
    /// Inside the modal content; does not dismiss.
    Content,
}

/// One user action against the board.
#[derive(Debug, Clone)]
pub enum Command {
    Ingest(FileSelection),
    Filter(FilterSelection),
    /// Carries the raw dropdown label; unknown labels leave the order alone.
    Sort(String),
    /// Index into the current working view.
    OpenDetail(usize),
    ModalClick(ModalClick),
}

/// What a successful command changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Ingested { records: usize },
    Filtered { visible: usize },
    Sorted(SortMode),
    DetailOpened,
    DetailClosed,
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("No job at position {0} in the current list")]
    UnknownEntry(usize),
}

/// Application state for one board: the full collection from the latest
/// upload, the working view derived from it, and the open detail modal.
///
/// Every mutation goes through [`JobBoard::dispatch`] and either replaces
/// state completely or leaves it untouched.
#[derive(Debug, Default)]
pub struct JobBoard {
    records: Vec<Arc<JobRecord>>,
    view: Vec<Arc<JobRecord>>,
    options: FilterOptions,
    selection: FilterSelection,
    active_sort: Option<SortMode>,
    detail: Option<Arc<JobRecord>>,
}

impl JobBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&mut self, command: Command) -> Result<Effect, BoardError> {
        match command {
            Command::Ingest(selection) => Ok(self.ingest(&selection)?),
            Command::Filter(selection) => Ok(self.filter(selection)),
            Command::Sort(label) => Ok(self.sort(&label)),
            Command::OpenDetail(index) => self.open_detail(index),
            Command::ModalClick(click) => Ok(self.click_modal(click)),
        }
    }

    /// Replaces the collection with the records from `selection`.
    ///
    /// On any error nothing changes, including the open detail view.
    pub fn ingest(&mut self, selection: &FileSelection) -> Result<Effect, IngestError> {
        let records = load_records(selection)?;

        self.options = derive_filter_options(&records);
        self.view = records.clone();
        self.records = records;
        self.selection = FilterSelection::default();
        self.active_sort = None;
        self.detail = None;

        info!(
            file = selection.file_name.as_deref().unwrap_or_default(),
            records = self.records.len(),
            "Job file ingested"
        );
        Ok(Effect::Ingested {
            records: self.records.len(),
        })
    }

    /// Rebuilds the working view from the full collection, discarding any sort.
    pub fn filter(&mut self, selection: FilterSelection) -> Effect {
        self.view = apply_filters(&self.records, &selection);
        self.selection = selection;
        self.active_sort = None;

        debug!(
            level = self.selection.level.as_str(),
            job_type = self.selection.job_type.as_str(),
            skill = self.selection.skill.as_str(),
            visible = self.view.len(),
            "Filters applied"
        );
        Effect::Filtered {
            visible: self.view.len(),
        }
    }

    /// Sorts the current working view. Unknown labels are a no-op.
    pub fn sort(&mut self, label: &str) -> Effect {
        let Some(mode) = SortMode::from_label(label) else {
            debug!(label, "Ignoring unknown sort mode");
            return Effect::Unchanged;
        };

        sort_view(&mut self.view, mode);
        self.active_sort = Some(mode);

        debug!(mode = %mode, visible = self.view.len(), "View sorted");
        Effect::Sorted(mode)
    }

    /// Shows the record at `index` of the working view, replacing whatever
    /// the modal held before.
    pub fn open_detail(&mut self, index: usize) -> Result<Effect, BoardError> {
        let record = self
            .view
            .get(index)
            .cloned()
            .ok_or(BoardError::UnknownEntry(index))?;

        debug!(index, job_no = %record.job_no, "Detail opened");
        self.detail = Some(record);
        Ok(Effect::DetailOpened)
    }

    pub fn click_modal(&mut self, click: ModalClick) -> Effect {
        match click {
            ModalClick::CloseControl | ModalClick::Backdrop if self.detail.is_some() => {
                self.detail = None;
                debug!(?click, "Detail closed");
                Effect::DetailClosed
            }
            _ => Effect::Unchanged,
        }
    }

    pub fn records(&self) -> &[Arc<JobRecord>] {
        &self.records
    }

    pub fn view(&self) -> &[Arc<JobRecord>] {
        &self.view
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn active_sort(&self) -> Option<SortMode> {
        self.active_sort
    }

    pub fn detail(&self) -> Option<&JobRecord> {
        self.detail.as_deref()
    }
}
