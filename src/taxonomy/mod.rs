//! Site vocabulary to canonical genre/country mapping.
//!
//! Tables are built once at startup, optionally extended from a TOML file,
//! validated, and then only read.

mod synopsis;
mod tables;

pub use synopsis::SynopsisScanner;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

use crate::config::{ConfigError, UnknownTermDisposition};
use crate::normalize::normalize;

/// Outcome of running a raw label through the tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TidiedTerm {
    Genre(String),
    Country(String),
    /// Known noise, e.g. "HD" or "New Release".
    Ignored,
    /// Not in any table; kept verbatim.
    Unknown(String),
}

/// On-disk shape of a taxonomy extension file.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct TaxonomyFile {
    pub canonical_genres: Vec<String>,
    pub canonical_countries: Vec<String>,
    pub genres: HashMap<String, String>,
    pub countries: HashMap<String, String>,
    pub ignored: Vec<String>,
    pub synopsis_genres: HashMap<String, String>,
    pub synopsis_countries: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct TaxonomyTables {
    canonical_genres: BTreeSet<String>,
    canonical_countries: BTreeSet<String>,
    genres: HashMap<String, String>,
    countries: HashMap<String, String>,
    ignored: HashSet<String>,
    synopsis: SynopsisScanner,
}

impl TaxonomyTables {
    /// The built-in tables.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::build(TaxonomyFile::default())
    }

    /// Built-in tables extended with the entries of a TOML file. Entries in
    /// the file win over built-in ones with the same label.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read taxonomy file: {:?}", path))?;
        let file: TaxonomyFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse taxonomy file: {:?}", path))?;
        Ok(Self::build(file)?)
    }

    fn build(extra: TaxonomyFile) -> Result<Self, ConfigError> {
        let canonical_genres = tables::CANONICAL_GENRES
            .iter()
            .map(|s| s.to_string())
            .chain(extra.canonical_genres)
            .collect();
        let canonical_countries = tables::CANONICAL_COUNTRIES
            .iter()
            .map(|s| s.to_string())
            .chain(extra.canonical_countries)
            .collect();

        let genres = keyed(tables::GENRE_LABELS, extra.genres);
        let countries = keyed(tables::COUNTRY_LABELS, extra.countries);
        let ignored = tables::IGNORED_LABELS
            .iter()
            .map(|s| normalize(s))
            .chain(extra.ignored.iter().map(|s| normalize(s)))
            .collect();

        let synopsis_entries = tables::SYNOPSIS_GENRES
            .iter()
            .map(|(k, v)| (k.to_string(), TidiedTerm::Genre(v.to_string())))
            .chain(
                tables::SYNOPSIS_COUNTRIES
                    .iter()
                    .map(|(k, v)| (k.to_string(), TidiedTerm::Country(v.to_string()))),
            )
            .chain(
                extra
                    .synopsis_genres
                    .into_iter()
                    .map(|(k, v)| (k, TidiedTerm::Genre(v))),
            )
            .chain(
                extra
                    .synopsis_countries
                    .into_iter()
                    .map(|(k, v)| (k, TidiedTerm::Country(v))),
            );

        let tables = Self {
            canonical_genres,
            canonical_countries,
            genres,
            countries,
            ignored,
            synopsis: SynopsisScanner::new(synopsis_entries)?,
        };
        tables.validate()?;
        Ok(tables)
    }

    /// Every mapping, synopsis cues included, must point into the canonical
    /// vocabulary and every label must survive normalization.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.genres.contains_key("") || self.countries.contains_key("") {
            return Err(ConfigError::InvalidTaxonomy(
                "a label normalizes to an empty string".to_string(),
            ));
        }
        for (label, genre) in &self.genres {
            if !self.canonical_genres.contains(genre) {
                return Err(ConfigError::InvalidTaxonomy(format!(
                    "label '{}' maps to unknown genre '{}'",
                    label, genre
                )));
            }
        }
        for (label, country) in &self.countries {
            if !self.canonical_countries.contains(country) {
                return Err(ConfigError::InvalidTaxonomy(format!(
                    "label '{}' maps to unknown country '{}'",
                    label, country
                )));
            }
        }
        for (cue, term) in self.synopsis.entries() {
            let known = match term {
                TidiedTerm::Genre(genre) => self.canonical_genres.contains(genre),
                TidiedTerm::Country(country) => self.canonical_countries.contains(country),
                TidiedTerm::Ignored | TidiedTerm::Unknown(_) => false,
            };
            if !known {
                return Err(ConfigError::InvalidTaxonomy(format!(
                    "synopsis cue '{}' maps to unknown term {:?}",
                    cue, term
                )));
            }
        }
        Ok(())
    }

    /// Route a raw site label to a genre, a country, noise, or unknown.
    pub fn tidy(&self, label: &str) -> TidiedTerm {
        let key = normalize(label);
        if key.is_empty() || self.ignored.contains(&key) {
            return TidiedTerm::Ignored;
        }
        if let Some(genre) = self.genres.get(&key) {
            return TidiedTerm::Genre(genre.clone());
        }
        if let Some(country) = self.countries.get(&key) {
            return TidiedTerm::Country(country.clone());
        }
        TidiedTerm::Unknown(label.trim().to_string())
    }

    /// Tidy `labels`, splitting the results into genre and country sets.
    /// Unknown labels become genres or vanish according to `disposition`.
    pub fn tidy_all<'a>(
        &self,
        labels: impl IntoIterator<Item = &'a str>,
        disposition: UnknownTermDisposition,
    ) -> (BTreeSet<String>, BTreeSet<String>) {
        let mut genres = BTreeSet::new();
        let mut countries = BTreeSet::new();
        for label in labels {
            match self.tidy(label) {
                TidiedTerm::Genre(g) => {
                    genres.insert(g);
                }
                TidiedTerm::Country(c) => {
                    countries.insert(c);
                }
                TidiedTerm::Unknown(raw) => {
                    if disposition == UnknownTermDisposition::PassThrough {
                        genres.insert(raw);
                    }
                }
                TidiedTerm::Ignored => {}
            }
        }
        (genres, countries)
    }

    /// Genre/country hints found in a synopsis.
    pub fn scan_synopsis(&self, text: &str) -> Vec<TidiedTerm> {
        self.synopsis.scan(text)
    }
}

fn keyed(builtin: &[(&str, &str)], extra: HashMap<String, String>) -> HashMap<String, String> {
    let mut map: HashMap<String, String> = builtin
        .iter()
        .map(|(label, target)| (normalize(label), target.to_string()))
        .collect();
    for (label, target) in extra {
        map.insert(normalize(&label), target);
    }
    map
}
