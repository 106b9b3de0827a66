//! Server-rendered board page.
//!
//! `render_page` is a pure function of the board, the clock and the
//! timestamp pattern; handlers pass `Local::now()`, tests pass a fixed time.

use askama::Template;
use chrono::{DateTime, TimeZone};

use crate::board::filters::Selection;
use crate::board::models::{JobRecord, MISSING_LINK};
use crate::board::sorting::SortMode;
use crate::board::JobBoard;

pub const EMPTY_STATE: &str = "No jobs available matching your criteria.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub value: String,
    pub selected: bool,
}

/// One row of the job list. `index` is the position in the working view and
/// is what the detail form posts back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub index: usize,
    pub title: String,
    pub job_type: String,
    pub level: String,
    pub posted: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    pub job_no: String,
    pub job_type: String,
    pub level: String,
    pub estimated_time: String,
    pub skill: String,
    pub detail: String,
    pub posted: String,
    pub link: String,
}

#[derive(Debug, Template)]
#[template(path = "board.html")]
pub struct BoardPage {
    pub alert: Option<String>,
    pub total: usize,
    pub entries: Vec<ListEntry>,
    pub empty_state: &'static str,
    pub level_options: Vec<OptionView>,
    pub type_options: Vec<OptionView>,
    pub skill_options: Vec<OptionView>,
    pub sort_options: Vec<OptionView>,
    pub detail: Option<DetailView>,
}

pub fn render_page<Tz>(
    board: &JobBoard,
    now: DateTime<Tz>,
    timestamp_format: &str,
    alert: Option<String>,
) -> BoardPage
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let posted = |record: &JobRecord| {
        record
            .posted
            .format_relative_to(now.clone(), timestamp_format)
    };

    let entries = board
        .view()
        .iter()
        .enumerate()
        .map(|(index, record)| ListEntry {
            index,
            title: record.title.clone(),
            job_type: record.job_type.clone(),
            level: record.level.clone(),
            posted: posted(record.as_ref()),
            link: safe_link(&record.job_page_link),
        })
        .collect();

    let detail = board.detail().map(|record| DetailView {
        title: record.title.clone(),
        job_no: record.job_no.clone(),
        job_type: record.job_type.clone(),
        level: record.level.clone(),
        estimated_time: record.estimated_time.clone(),
        skill: record.skill.clone(),
        detail: record.detail.clone(),
        posted: posted(record),
        link: safe_link(&record.job_page_link),
    });

    let selection = board.selection();
    let options = board.options();

    BoardPage {
        alert,
        total: board.records().len(),
        entries,
        empty_state: EMPTY_STATE,
        level_options: option_views(&options.levels, &selection.level),
        type_options: option_views(&options.job_types, &selection.job_type),
        skill_options: option_views(&options.skills, &selection.skill),
        sort_options: SortMode::ALL
            .iter()
            .map(|mode| OptionView {
                value: mode.label().to_string(),
                selected: board.active_sort() == Some(*mode),
            })
            .collect(),
        detail,
    }
}

/// Only http(s) links become clickable; anything else points at `#`.
fn safe_link(link: &str) -> String {
    let lower = link.trim_start().to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        link.to_string()
    } else {
        MISSING_LINK.to_string()
    }
}

fn option_views(values: &[String], selected: &Selection) -> Vec<OptionView> {
    values
        .iter()
        .map(|value| OptionView {
            value: value.clone(),
            selected: value == selected.as_str(),
        })
        .collect()
}
