//! Posting-age normalization.
//!
//! Uploaded postings describe their age as free text ("5 minutes ago",
//! "2 hours ago", "3 days ago"). Ages are stored as whole minutes and turned
//! back into a wall-clock timestamp only when a page is rendered.

use std::cmp::Ordering;
use std::fmt::Write;

use chrono::{DateTime, Duration, TimeZone};
use serde::Serialize;

const MINUTES_PER_HOUR: u64 = 60;
const MINUTES_PER_DAY: u64 = 1440;

/// Rendered in place of a timestamp when the age is unknown or out of range.
pub const INVALID_DATE: &str = "Invalid Date";

/// How long ago a job was posted.
///
/// `Unknown` stands for an unparseable posting time and compares as
/// infinitely old: it orders after every known age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PostingAge {
    Minutes(u64),
    Unknown,
}

impl PostingAge {
    pub fn minutes(&self) -> Option<u64> {
        match self {
            PostingAge::Minutes(m) => Some(*m),
            PostingAge::Unknown => None,
        }
    }

    /// Formats `now - self` with the given strftime pattern.
    ///
    /// Recomputed from `now` on every call, so the same record shows a later
    /// timestamp each time a page is rendered. A pattern chrono cannot format
    /// also yields `INVALID_DATE`.
    pub fn format_relative_to<Tz>(&self, now: DateTime<Tz>, pattern: &str) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let posted_at = self
            .minutes()
            .and_then(|m| i64::try_from(m).ok())
            .and_then(Duration::try_minutes)
            .and_then(|ago| now.checked_sub_signed(ago));

        let Some(at) = posted_at else {
            return INVALID_DATE.to_string();
        };

        let mut shown = String::new();
        match write!(shown, "{}", at.format(pattern)) {
            Ok(()) => shown,
            Err(_) => INVALID_DATE.to_string(),
        }
    }
}

impl Ord for PostingAge {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (PostingAge::Minutes(a), PostingAge::Minutes(b)) => a.cmp(b),
            (PostingAge::Minutes(_), PostingAge::Unknown) => Ordering::Less,
            (PostingAge::Unknown, PostingAge::Minutes(_)) => Ordering::Greater,
            (PostingAge::Unknown, PostingAge::Unknown) => Ordering::Equal,
        }
    }
}

impl PartialOrd for PostingAge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Converts "<n> <unit> ago" into minutes.
///
/// Only the first two whitespace-separated tokens are read. The unit matches
/// if it contains "minute", "hour" or "day"; anything else, a missing or
/// negative count, or an overflowing product yields `PostingAge::Unknown`.
pub fn parse_posted_time(posted: &str) -> PostingAge {
    let mut tokens = posted.split_whitespace();
    let (Some(value), Some(unit)) = (tokens.next(), tokens.next()) else {
        return PostingAge::Unknown;
    };
    let Some(count) = leading_integer(value) else {
        return PostingAge::Unknown;
    };

    let factor = if unit.contains("minute") {
        1
    } else if unit.contains("hour") {
        MINUTES_PER_HOUR
    } else if unit.contains("day") {
        MINUTES_PER_DAY
    } else {
        return PostingAge::Unknown;
    };

    count
        .checked_mul(factor)
        .map_or(PostingAge::Unknown, PostingAge::Minutes)
}

/// Reads the leading run of digits ("15+" -> 15). A leading '-' is rejected.
fn leading_integer(token: &str) -> Option<u64> {
    let unsigned = token.strip_prefix('+').unwrap_or(token);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..digits_end].parse().ok()
}
