use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info};

use super::{MatchResult, Mismatch};
use crate::config::{MatchingConfig, ToleranceMode};
use crate::film::FilmRecord;

lazy_static! {
    static ref ORDINAL_SUFFIX: Regex =
        Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").expect("Invalid ordinal regex");
    static ref BARE_YEAR: Regex = Regex::new(r"^(\d{4})$").expect("Invalid year regex");
}

/// Formats seen across catalog sites, tried in order after the site hint.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%b. %d, %Y",
    "%Y%m%d",
];

/// Month-and-year formats, anchored to the first of the month.
const MONTH_FORMATS: &[&str] = &["%B %Y", "%b %Y", "%m/%Y", "%Y-%m"];

/// Parse a scraped release date. A bare year means Dec-31 of that year.
pub fn parse_release_date(raw: &str, format_hint: Option<&str>) -> Option<NaiveDate> {
    let cleaned = ORDINAL_SUFFIX.replace_all(raw.trim(), "$1");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        return None;
    }

    if let Some(hint) = format_hint {
        if let Ok(date) = NaiveDate::parse_from_str(&cleaned, hint) {
            return Some(date);
        }
        debug!("Date '{}' does not follow the site format '{}'", raw, hint);
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&cleaned, fmt).ok())
    {
        return Some(date);
    }

    let first_of_month = format!("1 {}", cleaned);
    if let Some(date) = MONTH_FORMATS.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(&first_of_month, &format!("%d {}", fmt)).ok()
    }) {
        return Some(date);
    }

    BARE_YEAR
        .captures(&cleaned)
        .and_then(|caps| caps[1].parse::<i32>().ok())
        .and_then(|year| NaiveDate::from_ymd_opt(year, 12, 31))
}

/// Whether `candidate` lies within `tolerance_days` of `anchor`.
pub fn within_date_tolerance(candidate: NaiveDate, anchor: NaiveDate, tolerance_days: i64) -> bool {
    (candidate - anchor).num_days().abs() <= tolerance_days
}

/// Check `candidate` against the record's date anchor and tighten the
/// anchor on success. With no anchor yet, the candidate becomes it.
pub fn match_release_date(
    candidate: NaiveDate,
    record: &mut FilmRecord,
    mode: ToleranceMode,
    config: &MatchingConfig,
) -> MatchResult<NaiveDate> {
    let Some(anchor) = record.compare_date else {
        info!("No date known for '{}', adopting {}", record.title, candidate);
        record.compare_date = Some(candidate);
        return Ok(candidate);
    };

    let tolerance_days = config.date_tolerance(mode);
    if !within_date_tolerance(candidate, anchor, tolerance_days) {
        return Err(Mismatch::ReleaseDate {
            candidate,
            anchor,
            delta_days: (candidate - anchor).num_days().abs(),
            tolerance_days,
        });
    }

    debug!("Release date {} accepted against {}", candidate, anchor);
    record.compare_date = Some(candidate);
    Ok(candidate)
}
