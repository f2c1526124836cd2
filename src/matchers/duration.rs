use lazy_static::lazy_static;
use regex::Regex;
use std::time::Duration;
use tracing::{debug, warn};

use super::{MatchResult, Mismatch};
use crate::config::MatchingConfig;
use crate::film::FilmRecord;

lazy_static! {
    static ref ISO_8601: Regex =
        Regex::new(r"^pt?(?:(\d+)h)?(?:(\d+)m)?(?:(\d+)s)?$").expect("Invalid ISO duration regex");
    static ref HOURS_MINUTES: Regex = Regex::new(
        r"^(?:(\d+)\s*h(?:ours?|rs?)?\.?)?\s*(?:(\d+)\s*m(?:in(?:ute)?s?)?\.?)?\s*(?:(\d+)\s*s(?:ec(?:ond)?s?)?\.?)?$"
    )
    .expect("Invalid hours/minutes regex");
}

/// Which running time a candidate duration is compared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationBaseline {
    /// Measured from the local file.
    File,
    /// Recorded on the film in the reference index.
    ReferenceIndex,
}

/// Seconds held by capture `group`. `None` when the value overflows.
fn captured_secs(caps: &regex::Captures, group: usize, unit: u64) -> Option<u64> {
    match caps.get(group) {
        Some(m) => m.as_str().parse::<u64>().ok()?.checked_mul(unit),
        None => Some(0),
    }
}

fn hms_secs(h: u64, m: u64, s: u64) -> Option<u64> {
    h.checked_mul(3600)?
        .checked_add(m.checked_mul(60)?)?
        .checked_add(s)
}

fn captured_hms(caps: &regex::Captures) -> Option<u64> {
    captured_secs(caps, 1, 3600)?
        .checked_add(captured_secs(caps, 2, 60)?)?
        .checked_add(captured_secs(caps, 3, 1)?)
}

/// Parse a scraped running time. Zero, unrecognized or overflowing values
/// are `None`.
pub fn parse_duration(raw: &str) -> Option<Duration> {
    let text = raw.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }

    let secs = if text.contains(':') {
        let parts: Vec<u64> = text
            .split(':')
            .map(|p| p.trim().parse::<u64>())
            .collect::<Result<_, _>>()
            .ok()?;
        match parts.as_slice() {
            [h, m, s] => hms_secs(*h, *m, *s)?,
            [m, s] => hms_secs(0, *m, *s)?,
            _ => return None,
        }
    } else if let Ok(minutes) = text.parse::<u64>() {
        minutes.checked_mul(60)?
    } else if let Some(caps) = ISO_8601.captures(&text) {
        captured_hms(&caps)?
    } else if let Some(caps) = HOURS_MINUTES.captures(&text) {
        captured_hms(&caps)?
    } else {
        return None;
    };

    (secs > 0).then(|| Duration::from_secs(secs))
}

/// Check `candidate` against the chosen baseline. Missing values on either
/// side pass. With duration matching switched off a mismatch is only
/// logged.
pub fn match_duration(
    candidate: Option<Duration>,
    record: &FilmRecord,
    baseline: DurationBaseline,
    config: &MatchingConfig,
) -> MatchResult<()> {
    let known = match baseline {
        DurationBaseline::File => record.duration,
        DurationBaseline::ReferenceIndex => record
            .index_film
            .as_ref()
            .and_then(|film| film.duration_secs)
            .map(Duration::from_secs),
    };
    let (Some(candidate), Some(known)) = (candidate, known) else {
        debug!("Duration check skipped for '{}': nothing to compare", record.title);
        return Ok(());
    };

    let delta_secs = candidate.as_secs().abs_diff(known.as_secs());
    let tolerance_secs = (config.duration_tolerance_minutes.max(0) as u64).saturating_mul(60);
    if delta_secs <= tolerance_secs {
        return Ok(());
    }

    let mismatch = Mismatch::Duration {
        candidate_minutes: candidate.as_secs() / 60,
        baseline_minutes: known.as_secs() / 60,
        tolerance_minutes: config.duration_tolerance_minutes,
    };
    if config.duration_matching {
        Err(mismatch)
    } else {
        warn!("Ignoring duration mismatch for '{}': {}", record.title, mismatch);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::film::FilmInput;
    use crate::reference_index::IndexFilm;

    fn minutes(m: u64) -> Duration {
        Duration::from_secs(m * 60)
    }

    fn record(duration_minutes: Option<u64>) -> FilmRecord {
        FilmRecord::new(FilmInput {
            studio: "Falcon".to_string(),
            title: "Summer Heat".to_string(),
            duration_secs: duration_minutes.map(|m| m * 60),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_parse_duration_formats() {
        assert_eq!(parse_duration("1:32:00"), Some(minutes(92)));
        assert_eq!(parse_duration("92:30"), Some(Duration::from_secs(92 * 60 + 30)));
        assert_eq!(parse_duration("1h 32m"), Some(minutes(92)));
        assert_eq!(parse_duration("1 hr 32 min"), Some(minutes(92)));
        assert_eq!(parse_duration("92 min"), Some(minutes(92)));
        assert_eq!(parse_duration("92 Mins."), Some(minutes(92)));
        assert_eq!(parse_duration("92 minutes"), Some(minutes(92)));
        assert_eq!(parse_duration("PT1H32M"), Some(minutes(92)));
        assert_eq!(parse_duration("92"), Some(minutes(92)));
        assert_eq!(parse_duration("0"), None);
        assert_eq!(parse_duration("a while"), None);
        assert_eq!(parse_duration("1:xx"), None);
    }

    #[test]
    fn test_parse_duration_overflow() {
        assert_eq!(parse_duration("307445734561825861"), None);
        assert_eq!(parse_duration("9999999999999999:00:00"), None);
        assert_eq!(parse_duration("1:307445734561825861:00"), None);
        assert_eq!(parse_duration("PT9999999999999999H"), None);
        assert_eq!(parse_duration("9999999999999999 hours 1 min"), None);
        assert_eq!(parse_duration("1:00:18446744073709551615"), None);
    }

    #[test]
    fn test_match_against_file() {
        let config = MatchingConfig::default();
        let rec = record(Some(90));
        assert!(match_duration(Some(minutes(94)), &rec, DurationBaseline::File, &config).is_ok());
        assert_eq!(
            match_duration(Some(minutes(120)), &rec, DurationBaseline::File, &config),
            Err(Mismatch::Duration {
                candidate_minutes: 120,
                baseline_minutes: 90,
                tolerance_minutes: 5,
            })
        );
    }

    #[test]
    fn test_disabled_matching_only_logs() {
        let config = MatchingConfig {
            duration_matching: false,
            ..Default::default()
        };
        let rec = record(Some(90));
        assert!(match_duration(Some(minutes(120)), &rec, DurationBaseline::File, &config).is_ok());
    }

    #[test]
    fn test_missing_values_pass() {
        let config = MatchingConfig::default();
        assert!(match_duration(Some(minutes(120)), &record(None), DurationBaseline::File, &config).is_ok());
        assert!(match_duration(None, &record(Some(90)), DurationBaseline::File, &config).is_ok());
    }

    #[test]
    fn test_reference_index_baseline() {
        let config = MatchingConfig::default();
        let mut rec = record(Some(90));
        rec.index_film = Some(IndexFilm {
            title: "Summer Heat".to_string(),
            duration_secs: Some(120 * 60),
            ..Default::default()
        });
        assert!(match_duration(
            Some(minutes(118)),
            &rec,
            DurationBaseline::ReferenceIndex,
            &config
        )
        .is_ok());
        assert!(match_duration(Some(minutes(118)), &rec, DurationBaseline::File, &config).is_err());
    }
}
