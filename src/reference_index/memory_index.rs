//! Reference index held in memory, loaded from a JSON snapshot.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use super::{
    IdentityDetail, IndexFilm, IndexFilmHit, IndexPerson, LookupError, LookupResult, Pool,
    ReferenceIndex,
};
use crate::normalize::{normalize, normalize_for_index};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonEntry {
    #[serde(flatten)]
    pub person: IndexPerson,
    #[serde(default)]
    pub detail: IdentityDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmEntry {
    pub detail_url: String,
    #[serde(default)]
    pub aka_title: Option<String>,
    #[serde(flatten)]
    pub film: IndexFilm,
}

/// On-disk shape of the snapshot file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexSnapshot {
    pub cast: Vec<PersonEntry>,
    pub directors: Vec<PersonEntry>,
    pub films: Vec<FilmEntry>,
}

pub struct MemoryReferenceIndex {
    snapshot: IndexSnapshot,
}

impl MemoryReferenceIndex {
    pub fn new(snapshot: IndexSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read reference index file: {:?}", path))?;
        let snapshot: IndexSnapshot = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse reference index file: {:?}", path))?;
        info!(
            "Loaded reference index from {:?}: {} cast, {} directors, {} films",
            path,
            snapshot.cast.len(),
            snapshot.directors.len(),
            snapshot.films.len()
        );
        Ok(Self::new(snapshot))
    }

    fn pool(&self, pool: Pool) -> &[PersonEntry] {
        match pool {
            Pool::Cast => &self.snapshot.cast,
            Pool::Directors => &self.snapshot.directors,
        }
    }

    fn all_people(&self) -> impl Iterator<Item = &PersonEntry> {
        self.snapshot.cast.iter().chain(self.snapshot.directors.iter())
    }
}

/// Whether any of `names` shares a word with the query or contains it
/// whole.
fn name_hit(query: &str, query_words: &[String], names: &[&str]) -> bool {
    names.iter().any(|name| {
        let compare = normalize_for_index(name);
        if compare.is_empty() {
            return false;
        }
        compare.contains(query)
            || name
                .split_whitespace()
                .map(normalize_for_index)
                .any(|word| !word.is_empty() && query_words.contains(&word))
    })
}

impl ReferenceIndex for MemoryReferenceIndex {
    fn search_by_name(&self, name: &str, pool: Pool) -> LookupResult<Vec<IndexPerson>> {
        let query = normalize_for_index(name);
        if query.is_empty() {
            return Err(LookupError::NotFound(name.to_string()));
        }
        let query_words: Vec<String> = name
            .split_whitespace()
            .map(normalize_for_index)
            .filter(|w| !w.is_empty())
            .collect();

        let hits: Vec<IndexPerson> = self
            .pool(pool)
            .iter()
            .filter(|entry| {
                let mut names = vec![entry.person.name.as_str()];
                names.extend(entry.person.aliases.iter().map(String::as_str));
                name_hit(&query, &query_words, &names)
            })
            .map(|entry| entry.person.clone())
            .collect();

        debug!(
            "Name search '{}' in {} pool: {} hits",
            name,
            pool.as_str(),
            hits.len()
        );
        Ok(hits)
    }

    fn fetch_identity_detail(&self, detail_url: &str) -> LookupResult<IdentityDetail> {
        self.all_people()
            .find(|entry| entry.person.detail_url.as_deref() == Some(detail_url))
            .map(|entry| entry.detail.clone())
            .ok_or_else(|| LookupError::NotFound(detail_url.to_string()))
    }

    fn search_by_title(&self, title: &str, year: Option<i32>) -> LookupResult<Vec<IndexFilmHit>> {
        let query = normalize(title);
        if query.is_empty() {
            return Err(LookupError::NotFound(title.to_string()));
        }

        let hits = self
            .snapshot
            .films
            .iter()
            .filter(|entry| {
                std::iter::once(entry.film.title.as_str())
                    .chain(entry.aka_title.as_deref())
                    .map(normalize)
                    .any(|candidate| !candidate.is_empty() && candidate.contains(&query))
            })
            .filter(|entry| match (year, entry.film.release_year()) {
                (Some(wanted), Some(released)) => (wanted - released).abs() <= 1,
                _ => true,
            })
            .map(|entry| IndexFilmHit {
                title: entry.film.title.clone(),
                aka_title: entry.aka_title.clone(),
                detail_url: entry.detail_url.clone(),
                year: entry.film.release_year(),
            })
            .collect();
        Ok(hits)
    }

    fn fetch_film_detail(&self, detail_url: &str) -> LookupResult<IndexFilm> {
        self.snapshot
            .films
            .iter()
            .find(|entry| entry.detail_url == detail_url)
            .map(|entry| entry.film.clone())
            .ok_or_else(|| LookupError::NotFound(detail_url.to_string()))
    }
}
