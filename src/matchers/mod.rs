//! Gates a scraped candidate has to pass before it is accepted as the
//! local film: title, then studio, then release date, then duration.

pub mod date;
pub mod duration;
pub mod studio;
pub mod title;

pub use date::{match_release_date, parse_release_date, within_date_tolerance};
pub use duration::{match_duration, parse_duration, DurationBaseline};
pub use studio::match_studio;
pub use title::match_title;

use chrono::NaiveDate;
use thiserror::Error;

/// Why a candidate page was rejected. Expected outcome, not a failure of
/// the run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Mismatch {
    #[error("Title '{candidate}' matches none of the known title forms")]
    Title { candidate: String },

    #[error("Studio '{candidate}' does not match '{expected}'")]
    Studio { candidate: String, expected: String },

    #[error("Release date {candidate} is {delta_days} days from {anchor}, tolerance is {tolerance_days}")]
    ReleaseDate {
        candidate: NaiveDate,
        anchor: NaiveDate,
        delta_days: i64,
        tolerance_days: i64,
    },

    #[error("Release date '{0}' could not be parsed")]
    UnparseableDate(String),

    #[error("Duration {candidate_minutes} min is more than {tolerance_minutes} min from {baseline_minutes} min")]
    Duration {
        candidate_minutes: u64,
        baseline_minutes: u64,
        tolerance_minutes: i64,
    },

    #[error("Candidate has no {0}")]
    MissingField(&'static str),
}

impl Mismatch {
    /// Short label used for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            Mismatch::Title { .. } => "title",
            Mismatch::Studio { .. } => "studio",
            Mismatch::ReleaseDate { .. } => "release_date",
            Mismatch::UnparseableDate(_) => "unparseable_date",
            Mismatch::Duration { .. } => "duration",
            Mismatch::MissingField(_) => "missing_field",
        }
    }
}

pub type MatchResult<T> = Result<T, Mismatch>;
