//! Drives one local film from reference-index lookup to the enriched
//! record.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::aggregate::{AcceptedFacts, Aggregator, EnrichedRecord};
use crate::config::{MatchingConfig, ToleranceMode};
use crate::extractor::CandidateExtractor;
use crate::film::{CandidateRecord, FilmInput, FilmRecord};
use crate::matchers::{
    match_duration, match_release_date, match_studio, match_title, parse_duration,
    parse_release_date, within_date_tolerance, DurationBaseline, MatchResult, Mismatch,
};
use crate::metrics;
use crate::reference_index::{IndexFilm, IndexFilmHit, ReferenceIndex};
use crate::resolver::IdentityResolver;
use crate::taxonomy::TaxonomyTables;

/// One film and the catalog pages scraped for it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilmJob {
    pub film: FilmInput,
    #[serde(default)]
    pub pages: Vec<serde_json::Value>,
}

impl FilmJob {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job file: {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse job file: {:?}", path))
    }
}

pub struct FilmMatcher<'a> {
    config: &'a MatchingConfig,
    taxonomy: &'a TaxonomyTables,
    index: &'a dyn ReferenceIndex,
}

impl<'a> FilmMatcher<'a> {
    pub fn new(
        config: &'a MatchingConfig,
        taxonomy: &'a TaxonomyTables,
        index: &'a dyn ReferenceIndex,
    ) -> Self {
        Self {
            config,
            taxonomy,
            index,
        }
    }

    /// Look the film up in the reference index and keep its detail on the
    /// record when a hit survives the title, studio, date and duration
    /// checks. The record's date anchor is left alone.
    pub fn locate_in_index(&self, record: &mut FilmRecord) -> bool {
        let mut queries = vec![record.title.clone()];
        if record.short_title != record.title {
            queries.push(record.short_title.clone());
        }

        for query in queries {
            let hits = match self.index.search_by_title(&query, record.year) {
                Ok(hits) => hits,
                Err(err) => {
                    warn!("Reference index title search for '{}' failed: {}", query, err);
                    metrics::record_index_film_lookup("error");
                    return false;
                }
            };
            debug!("Title search '{}' returned {} hits", query, hits.len());

            for hit in hits {
                if let Some(film) = self.check_hit(&hit, record) {
                    info!("Located '{}' in reference index as '{}'", record.title, film.title);
                    record.index_film = Some(film);
                    record.found_in_reference_index = true;
                    metrics::record_index_film_lookup("found");
                    return true;
                }
            }
        }

        info!("'{}' is not in the reference index", record.title);
        metrics::record_index_film_lookup("not_found");
        false
    }

    fn check_hit(&self, hit: &IndexFilmHit, record: &FilmRecord) -> Option<IndexFilm> {
        let title_ok = std::iter::once(hit.title.as_str())
            .chain(hit.aka_title.as_deref())
            .any(|title| match_title(title, record).is_ok());
        if !title_ok {
            return None;
        }

        let film = match self.index.fetch_film_detail(&hit.detail_url) {
            Ok(film) => film,
            Err(err) => {
                warn!("No film detail at {}: {}", hit.detail_url, err);
                return None;
            }
        };

        if let Some(studio) = &film.studio {
            if let Err(mismatch) = match_studio(studio, record) {
                debug!("Skipping index hit '{}': {}", film.title, mismatch);
                return None;
            }
        }
        if let (Some(date), Some(anchor)) = (film.release_date, record.compare_date) {
            let tolerance = self.config.date_tolerance(ToleranceMode::ReferenceIndex);
            if !within_date_tolerance(date, anchor, tolerance) {
                debug!("Skipping index hit '{}': released {}", film.title, date);
                return None;
            }
        }
        let index_duration = film.duration_secs.map(Duration::from_secs);
        if let Err(mismatch) = match_duration(index_duration, record, DurationBaseline::File, self.config) {
            debug!("Skipping index hit '{}': {}", film.title, mismatch);
            return None;
        }
        Some(film)
    }

    /// Run one candidate through title, studio, date and duration. The
    /// record's date anchor is tightened on success.
    pub fn evaluate_candidate(
        &self,
        candidate: &CandidateRecord,
        record: &mut FilmRecord,
    ) -> MatchResult<AcceptedFacts> {
        let title = candidate
            .title
            .as_deref()
            .ok_or(Mismatch::MissingField("title"))?;
        match_title(title, record)?;

        let studio = candidate
            .studio
            .as_deref()
            .ok_or(Mismatch::MissingField("studio"))?;
        match_studio(studio, record)?;

        let raw_date = candidate
            .release_date
            .as_deref()
            .ok_or(Mismatch::MissingField("release date"))?;
        let date = parse_release_date(raw_date, candidate.release_date_format.as_deref())
            .ok_or_else(|| Mismatch::UnparseableDate(raw_date.to_string()))?;
        let date = match_release_date(date, record, ToleranceMode::Site, self.config)?;

        let duration = candidate.duration.as_deref().and_then(parse_duration);
        let baseline = if record.duration.is_some() {
            DurationBaseline::File
        } else {
            DurationBaseline::ReferenceIndex
        };
        match_duration(duration, record, baseline, self.config)?;

        Ok(AcceptedFacts {
            title: title.trim().to_string(),
            studio: studio.trim().to_string(),
            release_date: Some(date),
            duration,
        })
    }

    /// Try `pages` in order until one is accepted, then resolve people and
    /// aggregate. `None` when no page is accepted.
    pub fn process(
        &self,
        record: &mut FilmRecord,
        pages: &[serde_json::Value],
        extractor: &dyn CandidateExtractor,
    ) -> Option<EnrichedRecord> {
        if !record.found_in_reference_index {
            self.locate_in_index(record);
        }

        for (n, page) in pages.iter().enumerate() {
            let candidate = match extractor.extract(page) {
                Ok(candidate) => candidate,
                Err(err) => {
                    warn!("Skipping page {}: {:#}", n, err);
                    metrics::record_candidate_rejected("extraction");
                    continue;
                }
            };

            // Matchers tighten the record, so only an accepted page may
            // leave its mark on it.
            let mut trial = record.clone();
            let accepted = match self.evaluate_candidate(&candidate, &mut trial) {
                Ok(accepted) => accepted,
                Err(mismatch) => {
                    info!("Rejected page {} for '{}': {}", n, record.title, mismatch);
                    metrics::record_candidate_rejected(mismatch.reason());
                    continue;
                }
            };
            *record = trial;
            metrics::record_candidate_accepted(extractor.name());
            info!("Accepted page {} for '{}'", n, record.title);

            self.resolve_people(record, &candidate, extractor);

            let aggregator = Aggregator::new(self.taxonomy, self.config.unknown_terms);
            return Some(aggregator.aggregate(
                record,
                &accepted,
                candidate.raw_terms(),
                candidate.synopsis.as_deref(),
            ));
        }

        info!("No candidate page accepted for '{}'", record.title);
        None
    }

    fn resolve_people(
        &self,
        record: &mut FilmRecord,
        candidate: &CandidateRecord,
        extractor: &dyn CandidateExtractor,
    ) {
        let resolver = IdentityResolver::new(self.index, self.config)
            .allowing_non_qualifying_roles(extractor.allows_non_qualifying_roles());

        match resolver.resolve_cast(&candidate.cast, record) {
            Ok(cast) => record.cast = cast,
            Err(err) => debug!("No cast for '{}': {}", record.title, err),
        }
        match resolver.resolve_directors(&candidate.directors, record) {
            Ok(directors) => record.directors = directors,
            Err(err) => debug!("No directors for '{}': {}", record.title, err),
        }
    }
}
