use tracing::debug;

use super::{MatchResult, Mismatch};
use crate::film::FilmRecord;
use crate::normalize::normalize;

/// Accept on equality or containment either way, against the primary or
/// the secondary studio.
pub fn match_studio(candidate: &str, record: &FilmRecord) -> MatchResult<()> {
    let compare = normalize(candidate);
    if !compare.is_empty() {
        let known = std::iter::once(&record.compare_studio)
            .chain(record.compare_secondary_studio.as_ref())
            .filter(|s| !s.is_empty());
        for studio in known {
            if compare == *studio || compare.contains(studio.as_str()) || studio.contains(&compare) {
                debug!("Studio '{}' matches '{}'", candidate, studio);
                return Ok(());
            }
        }
    }
    Err(Mismatch::Studio {
        candidate: candidate.to_string(),
        expected: record.studio.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::film::FilmInput;

    fn record(studio: &str, secondary: Option<&str>) -> FilmRecord {
        FilmRecord::new(FilmInput {
            studio: studio.to_string(),
            secondary_studio: secondary.map(str::to_string),
            title: "Summer Heat".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_containment_either_way() {
        let rec = record("Falcon", None);
        assert!(match_studio("Falcon Studios", &rec).is_ok());
        assert!(match_studio("falcon", &rec).is_ok());
        assert!(match_studio("Titan Media", &rec).is_err());

        let rec = record("Falcon Studios Group", None);
        assert!(match_studio("Falcon", &rec).is_ok());
    }

    #[test]
    fn test_domain_suffix_and_ampersand() {
        let rec = record("Raging & Stallion", None);
        assert!(match_studio("RagingAndStallion.com", &rec).is_ok());
    }

    #[test]
    fn test_secondary_studio() {
        let rec = record("Falcon", Some("Jocks"));
        assert!(match_studio("Jocks Studios", &rec).is_ok());
        assert!(match_studio("Titan", &rec).is_err());
    }

    #[test]
    fn test_empty_candidate_rejected() {
        let rec = record("Falcon", None);
        assert_eq!(
            match_studio(" - ", &rec),
            Err(Mismatch::Studio {
                candidate: " - ".to_string(),
                expected: "Falcon".to_string()
            })
        );
    }
}
