//! The local film being enriched and the candidate pages scraped for it.

use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;
use thiserror::Error;

use crate::normalize::{normalize, sort_alpha_chars, strip_determiner};
use crate::reference_index::IndexFilm;
use crate::resolver::Identity;

lazy_static! {
    static ref SERIES_MARKER: Regex = Regex::new(
        r"(?i)[\s,:\-]*\b(?:vol(?:ume)?|part|pt|episode|ep|chapter|no)\.?\s*(?:\d+|[ivx]+)\s*$"
    )
    .expect("Invalid series marker regex");
}

const FRAGMENT_SEPARATORS: &[&str] = &[" - ", ": "];

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecordError {
    #[error("Title '{0}' has nothing left to compare after normalization")]
    EmptyTitle(String),

    #[error("Studio '{0}' has nothing left to compare after normalization")]
    EmptyStudio(String),
}

/// What the filename parser knows about a local file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilmInput {
    pub studio: String,
    pub secondary_studio: Option<String>,
    pub title: String,
    /// Episode fragments, e.g. "Episode 2" or a scene name.
    pub episodes: Vec<String>,
    pub year: Option<i32>,
    pub duration_secs: Option<u64>,
    pub filename_cast: Vec<String>,
    pub is_stacked: bool,
    pub is_compilation: bool,
}

/// Everything collected about one local film while it is processed.
#[derive(Debug, Clone, PartialEq)]
pub struct FilmRecord {
    pub studio: String,
    pub compare_studio: String,
    pub secondary_studio: Option<String>,
    pub compare_secondary_studio: Option<String>,
    pub title: String,
    pub short_title: String,
    /// Sorted-character keys of every acceptable form of the title.
    pub compare_titles: BTreeSet<String>,
    pub episode_titles: BTreeSet<String>,
    pub year: Option<i32>,
    /// `None` until a year or an accepted date provides an anchor.
    pub compare_date: Option<NaiveDate>,
    pub duration: Option<Duration>,
    pub filename_cast: Vec<String>,
    pub cast: BTreeMap<String, Identity>,
    pub directors: BTreeMap<String, Identity>,
    pub index_film: Option<IndexFilm>,
    pub found_in_reference_index: bool,
    pub is_compilation: bool,
    pub is_stacked: bool,
}

fn title_key(text: &str) -> String {
    sort_alpha_chars(&normalize(text))
}

/// `title` without a trailing volume/part/episode marker.
pub fn short_title(title: &str) -> String {
    let stripped = SERIES_MARKER.replace(title, "");
    let stripped = stripped.trim();
    if stripped.is_empty() {
        title.trim().to_string()
    } else {
        stripped.to_string()
    }
}

impl FilmRecord {
    pub fn new(input: FilmInput) -> Result<Self, RecordError> {
        let compare_studio = normalize(&input.studio);
        if compare_studio.is_empty() {
            return Err(RecordError::EmptyStudio(input.studio));
        }

        let title = input.title.trim().to_string();
        let short_title = short_title(&title);
        let compare_titles: BTreeSet<String> = [
            title.clone(),
            strip_determiner(&title),
            short_title.clone(),
            strip_determiner(&short_title),
        ]
        .iter()
        .map(|t| title_key(t))
        .filter(|k| !k.is_empty())
        .collect();
        if compare_titles.is_empty() {
            return Err(RecordError::EmptyTitle(input.title));
        }

        let mut fragments: Vec<&str> = input.episodes.iter().map(String::as_str).collect();
        for separator in FRAGMENT_SEPARATORS {
            if title.contains(separator) {
                fragments.extend(title.split(separator));
            }
        }
        let episode_titles = fragments
            .into_iter()
            .flat_map(|f| [title_key(f), title_key(&strip_determiner(f))])
            .filter(|k| !k.is_empty())
            .collect();

        let compare_secondary_studio = input
            .secondary_studio
            .as_deref()
            .map(normalize)
            .filter(|s| !s.is_empty());

        Ok(Self {
            studio: input.studio.trim().to_string(),
            compare_studio,
            secondary_studio: input.secondary_studio,
            compare_secondary_studio,
            title,
            short_title,
            compare_titles,
            episode_titles,
            year: input.year,
            compare_date: input.year.and_then(|y| NaiveDate::from_ymd_opt(y, 12, 31)),
            duration: input.duration_secs.map(Duration::from_secs),
            filename_cast: input.filename_cast,
            cast: BTreeMap::new(),
            directors: BTreeMap::new(),
            index_film: None,
            found_in_reference_index: false,
            is_compilation: input.is_compilation,
            is_stacked: input.is_stacked,
        })
    }

    /// Best known release year: the accepted date if any, else the
    /// filename year.
    pub fn release_year(&self) -> Option<i32> {
        self.compare_date.map(|d| d.year()).or(self.year)
    }

    /// Compilation status from the filename or the reference index.
    pub fn is_compilation(&self) -> bool {
        self.is_compilation
            || self
                .index_film
                .as_ref()
                .map_or(false, |film| film.is_compilation)
    }
}

/// Raw strings scraped from one catalog page. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateRecord {
    pub title: Option<String>,
    pub studio: Option<String>,
    pub release_date: Option<String>,
    /// chrono format string for `release_date`, when the site is known to
    /// use one.
    pub release_date_format: Option<String>,
    pub duration: Option<String>,
    pub genres: Vec<String>,
    pub countries: Vec<String>,
    pub cast: Vec<String>,
    pub directors: Vec<String>,
    pub synopsis: Option<String>,
}

impl CandidateRecord {
    /// Genre and country labels together, for tidying.
    pub fn raw_terms(&self) -> impl Iterator<Item = &str> {
        self.genres
            .iter()
            .chain(self.countries.iter())
            .map(String::as_str)
    }
}
