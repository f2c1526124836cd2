use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The two reference pools a name can be searched in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pool {
    Cast,
    Directors,
}

impl Pool {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pool::Cast => "cast",
            Pool::Directors => "directors",
        }
    }

    /// Role recorded on an identity when the index does not give one.
    pub fn default_role(&self) -> &'static str {
        match self {
            Pool::Cast => "Cast",
            Pool::Directors => "Director",
        }
    }
}

/// One row of a name search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexPerson {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub career_start: Option<i32>,
    #[serde(default)]
    pub career_end: Option<i32>,
    #[serde(default)]
    pub detail_url: Option<String>,
    /// Credited role, only present on a film's recorded credits.
    #[serde(default)]
    pub role: Option<String>,
}

fn default_qualifying() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmographyCredit {
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    /// False for appearances that do not count towards the pool, e.g.
    /// non-performing or solo-only roles.
    #[serde(default = "default_qualifying")]
    pub qualifying: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityDetail {
    #[serde(default)]
    pub biography: BTreeMap<String, String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub filmography: Vec<FilmographyCredit>,
}

impl IdentityDetail {
    /// A person with a known filmography made only of non-qualifying
    /// credits. An empty filmography proves nothing.
    pub fn only_non_qualifying(&self) -> bool {
        !self.filmography.is_empty() && self.filmography.iter().all(|c| !c.qualifying)
    }
}

/// One row of a title search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexFilmHit {
    pub title: String,
    #[serde(default)]
    pub aka_title: Option<String>,
    pub detail_url: String,
    #[serde(default)]
    pub year: Option<i32>,
}

/// Everything the index records about a film.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexFilm {
    pub title: String,
    #[serde(default)]
    pub studio: Option<String>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub duration_secs: Option<u64>,
    #[serde(default)]
    pub is_compilation: bool,
    #[serde(default)]
    pub cast: Vec<IndexPerson>,
    #[serde(default)]
    pub directors: Vec<IndexPerson>,
}

impl IndexFilm {
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.map(|d| d.year())
    }

    pub fn credits(&self, pool: Pool) -> &[IndexPerson] {
        match pool {
            Pool::Cast => &self.cast,
            Pool::Directors => &self.directors,
        }
    }
}
