use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::cascade::{MatchStep, NameForms};
use crate::reference_index::{IdentityDetail, IndexPerson, Pool};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityRole {
    Credited(String),
    NotFound,
}

/// A cast member or director as resolved against the reference index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub canonical_name: String,
    pub aliases: BTreeSet<String>,
    pub compare_name: String,
    pub compare_aliases: BTreeSet<String>,
    /// First active year minus one, when known.
    pub active_career_start: Option<i32>,
    /// Last active year plus one, when known.
    pub active_career_end: Option<i32>,
    pub nationality: Option<String>,
    pub biography: BTreeMap<String, String>,
    pub photo_url: Option<String>,
    pub role: IdentityRole,
    pub matched_by: Option<MatchStep>,
    pub detail_url: Option<String>,
}

impl Identity {
    pub fn from_person(person: &IndexPerson, pool: Pool, step: MatchStep) -> Self {
        let aliases: BTreeSet<String> = person.aliases.iter().cloned().collect();
        let compare_aliases = aliases
            .iter()
            .map(|a| NameForms::new(a).compare)
            .filter(|a| !a.is_empty())
            .collect();
        Self {
            canonical_name: person.name.clone(),
            compare_name: NameForms::new(&person.name).compare,
            aliases,
            compare_aliases,
            active_career_start: person.career_start.map(|y| y.saturating_sub(1)),
            active_career_end: person.career_end.map(|y| y.saturating_add(1)),
            nationality: None,
            biography: BTreeMap::new(),
            photo_url: None,
            role: IdentityRole::Credited(
                person
                    .role
                    .clone()
                    .unwrap_or_else(|| pool.default_role().to_string()),
            ),
            matched_by: Some(step),
            detail_url: person.detail_url.clone(),
        }
    }

    /// Placeholder for a name the cascade could not place.
    pub fn not_found(name: &str) -> Self {
        Self {
            canonical_name: name.to_string(),
            aliases: BTreeSet::new(),
            compare_name: NameForms::new(name).compare,
            compare_aliases: BTreeSet::new(),
            active_career_start: None,
            active_career_end: None,
            nationality: None,
            biography: BTreeMap::new(),
            photo_url: None,
            role: IdentityRole::NotFound,
            matched_by: None,
            detail_url: None,
        }
    }

    pub fn with_detail(mut self, detail: IdentityDetail) -> Self {
        self.nationality = detail.nationality;
        self.biography = detail.biography;
        self.photo_url = detail.photo_url;
        self
    }

    pub fn is_found(&self) -> bool {
        self.role != IdentityRole::NotFound
    }

    /// Whether the (already widened) career window covers `year`. Unknown
    /// edges never exclude.
    pub fn was_active_in(&self, year: i32) -> bool {
        self.active_career_start.map_or(true, |start| year >= start)
            && self.active_career_end.map_or(true, |end| year <= end)
    }

    /// Whether `compare` is this identity's name or one of its aliases.
    pub fn answers_to(&self, compare: &str) -> bool {
        !compare.is_empty()
            && (self.compare_name == compare || self.compare_aliases.contains(compare))
    }

    pub fn role_label(&self) -> &str {
        match &self.role {
            IdentityRole::Credited(role) => role,
            IdentityRole::NotFound => "not found",
        }
    }
}
