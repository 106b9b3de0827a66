use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::board::models::JobRecord;

/// Orderings offered by the sort dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortMode {
    TitleAscending,
    TitleDescending,
    NewestFirst,
    OldestFirst,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [
        SortMode::TitleAscending,
        SortMode::TitleDescending,
        SortMode::NewestFirst,
        SortMode::OldestFirst,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortMode::TitleAscending => "Title (A-Z)",
            SortMode::TitleDescending => "Title (Z-A)",
            SortMode::NewestFirst => "Posted Time (Newest First)",
            SortMode::OldestFirst => "Posted Time (Oldest First)",
        }
    }

    /// Maps a dropdown label back to a mode. Unrecognized labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.label() == label)
    }

    pub fn compare(&self, a: &JobRecord, b: &JobRecord) -> Ordering {
        match self {
            SortMode::TitleAscending => locale_compare(&a.title, &b.title),
            SortMode::TitleDescending => locale_compare(&b.title, &a.title),
            // Fewer minutes ago means more recent.
            SortMode::NewestFirst => a.posted.cmp(&b.posted),
            SortMode::OldestFirst => b.posted.cmp(&a.posted),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sorts the working view in place. Stable: equal keys keep their order.
pub fn sort_view(view: &mut [Arc<JobRecord>], mode: SortMode) {
    view.sort_by(|a, b| mode.compare(a, b));
}

/// Title ordering in the spirit of a root-locale collator.
///
/// Titles are compared in three passes over their canonical decomposition:
/// base letters case-insensitively, then accents (unaccented first), then
/// case (lowercase first). Byte order breaks any remaining tie.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| accents(a).cmp(&accents(b)))
        .then_with(|| case_marks(a).cmp(case_marks(b)))
        .then_with(|| a.cmp(b))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

/// One entry per base character: the marks that follow it.
fn accents(s: &str) -> Vec<Vec<char>> {
    let mut out: Vec<Vec<char>> = Vec::new();
    for c in s.nfd() {
        match out.last_mut() {
            Some(marks) if is_combining_mark(c) => marks.push(c),
            _ => out.push(Vec::new()),
        }
    }
    out
}

fn case_marks(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
}
