//! The canonical performer/director/film database that names are resolved
//! against.

mod http_client;
mod memory_index;
mod models;

pub use http_client::HttpReferenceIndex;
pub use memory_index::{FilmEntry, IndexSnapshot, MemoryReferenceIndex, PersonEntry};
pub use models::{FilmographyCredit, IdentityDetail, IndexFilm, IndexFilmHit, IndexPerson, Pool};

use anyhow::Result;
use thiserror::Error;

use crate::config::ReferenceIndexSettings;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LookupError {
    #[error("Reference index unreachable: {0}")]
    Unreachable(String),

    #[error("Unusable reference index response: {0}")]
    BadResponse(String),

    #[error("Nothing in the reference index for '{0}'")]
    NotFound(String),

    #[error("Search for '{name}' returned {count} results")]
    TooManyResults { name: String, count: usize },

    #[error("No names to resolve")]
    NothingToResolve,
}

pub type LookupResult<T> = std::result::Result<T, LookupError>;

/// Queries against the reference index. Implementations block.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ReferenceIndex: Send + Sync {
    /// People in `pool` whose name or alias resembles `name`.
    fn search_by_name(&self, name: &str, pool: Pool) -> LookupResult<Vec<IndexPerson>>;

    fn fetch_identity_detail(&self, detail_url: &str) -> LookupResult<IdentityDetail>;

    /// Films titled like `title`, optionally restricted to releases around
    /// `year`.
    fn search_by_title(&self, title: &str, year: Option<i32>) -> LookupResult<Vec<IndexFilmHit>>;

    fn fetch_film_detail(&self, detail_url: &str) -> LookupResult<IndexFilm>;
}

/// Build the configured reference index.
pub fn open(settings: &ReferenceIndexSettings) -> Result<Box<dyn ReferenceIndex>> {
    Ok(match settings {
        ReferenceIndexSettings::File(path) => Box::new(MemoryReferenceIndex::from_file(path)?),
        ReferenceIndexSettings::Http {
            base_url,
            timeout_sec,
            min_delay_ms,
            max_delay_ms,
        } => Box::new(HttpReferenceIndex::new(
            base_url,
            *timeout_sec,
            *min_delay_ms,
            *max_delay_ms,
        )?),
    })
}
