//! Folds an accepted film into the record handed to the presentation
//! layer. Missing optional data is substituted, never an error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;
use tracing::debug;

use crate::config::UnknownTermDisposition;
use crate::film::FilmRecord;
use crate::resolver::{Identity, MatchStep};
use crate::taxonomy::{TaxonomyTables, TidiedTerm};

pub const STATUS_FOUND: &str = "Status: Found in Reference Index";
pub const STATUS_NOT_FOUND: &str = "Status: Not in Reference Index";
pub const STATUS_MULTI_PART: &str = "Status: Multi-Part Release";
pub const STATUS_COMPILATION: &str = "Status: Compilation";

/// What the accepted candidate page contributed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AcceptedFacts {
    pub title: String,
    pub studio: String,
    pub release_date: Option<NaiveDate>,
    pub duration: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentitySummary {
    pub name: String,
    pub role: String,
    pub photo_url: Option<String>,
    pub nationality: Option<String>,
    pub found: bool,
    pub matched_by: Option<MatchStep>,
}

impl From<&Identity> for IdentitySummary {
    fn from(identity: &Identity) -> Self {
        Self {
            name: identity.canonical_name.clone(),
            role: identity.role_label().to_string(),
            photo_url: identity.photo_url.clone(),
            nationality: identity.nationality.clone(),
            found: identity.is_found(),
            matched_by: identity.matched_by,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub studio: String,
    pub title: String,
    pub release_date: Option<NaiveDate>,
    pub duration_secs: Option<u64>,
    pub cast: Vec<IdentitySummary>,
    pub directors: Vec<IdentitySummary>,
    pub genres: BTreeSet<String>,
    pub countries: BTreeSet<String>,
    pub collections: BTreeSet<String>,
    pub legend: String,
    pub synopsis: Option<String>,
    pub found_in_reference_index: bool,
    pub success: bool,
}

pub struct Aggregator<'a> {
    taxonomy: &'a TaxonomyTables,
    unknown_terms: UnknownTermDisposition,
}

impl<'a> Aggregator<'a> {
    pub fn new(taxonomy: &'a TaxonomyTables, unknown_terms: UnknownTermDisposition) -> Self {
        Self {
            taxonomy,
            unknown_terms,
        }
    }

    pub fn aggregate<'t>(
        &self,
        record: &FilmRecord,
        accepted: &AcceptedFacts,
        raw_terms: impl IntoIterator<Item = &'t str>,
        synopsis: Option<&str>,
    ) -> EnrichedRecord {
        let (mut genres, mut countries) = self.taxonomy.tidy_all(raw_terms, self.unknown_terms);
        if let Some(text) = synopsis {
            for hint in self.taxonomy.scan_synopsis(text) {
                match hint {
                    TidiedTerm::Genre(g) => {
                        genres.insert(g);
                    }
                    TidiedTerm::Country(c) => {
                        countries.insert(c);
                    }
                    TidiedTerm::Ignored | TidiedTerm::Unknown(_) => {}
                }
            }
        }
        if record.is_compilation() {
            genres.insert("Compilation".to_string());
        }

        let cast = summarize(&record.cast);
        let directors = summarize(&record.directors);
        let legend = legend(&cast, &directors);
        debug!("Aggregated '{}': {}", record.title, legend);

        let studio = non_empty_or(&accepted.studio, &record.studio);
        let mut collections = BTreeSet::new();
        collections.insert(format!("Studio: {}", studio));
        for summary in cast.iter().filter(|s| s.found) {
            collections.insert(format!("Cast: {}", summary.name));
        }
        for summary in directors.iter().filter(|s| s.found) {
            collections.insert(format!("Director: {}", summary.name));
        }
        collections.extend(genres.iter().map(|g| format!("Genre: {}", g)));
        collections.extend(countries.iter().map(|c| format!("Country: {}", c)));
        collections.insert(
            if record.found_in_reference_index {
                STATUS_FOUND
            } else {
                STATUS_NOT_FOUND
            }
            .to_string(),
        );
        if record.is_stacked {
            collections.insert(STATUS_MULTI_PART.to_string());
        }
        if record.is_compilation() {
            collections.insert(STATUS_COMPILATION.to_string());
        }

        EnrichedRecord {
            studio,
            title: non_empty_or(&accepted.title, &record.title),
            release_date: accepted.release_date.or(record.compare_date),
            duration_secs: accepted.duration.or(record.duration).map(|d| d.as_secs()),
            cast,
            directors,
            genres,
            countries,
            collections,
            legend,
            synopsis: synopsis
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            found_in_reference_index: record.found_in_reference_index,
            success: true,
        }
    }
}

fn non_empty_or(preferred: &str, fallback: &str) -> String {
    let preferred = preferred.trim();
    if preferred.is_empty() {
        fallback.to_string()
    } else {
        preferred.to_string()
    }
}

/// Summaries sorted by displayed name.
fn summarize(identities: &BTreeMap<String, Identity>) -> Vec<IdentitySummary> {
    let mut summaries: Vec<IdentitySummary> = identities.values().map(IdentitySummary::from).collect();
    summaries.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    summaries
}

fn legend(cast: &[IdentitySummary], directors: &[IdentitySummary]) -> String {
    let count = |list: &[IdentitySummary]| list.iter().filter(|s| s.found).count();
    let mut legend = if cast.is_empty() {
        "No cast listed".to_string()
    } else {
        format!("{} of {} cast found in reference index", count(cast), cast.len())
    };
    if !directors.is_empty() {
        legend.push_str(&format!(
            "; {} of {} directors found in reference index",
            count(directors),
            directors.len()
        ));
    }
    legend
}
