//! Resolution of scraped cast and director names to reference-index
//! identities.
//!
//! Names are tried first against the credits the index records for the
//! film, then against a fresh name search narrowed by career years, genre
//! plausibility and alias collisions. Lookup failures never escape: the
//! name is kept as "not found".

pub mod cascade;
mod identity;

pub use cascade::{best_match, MatchStep, NameForms, Target, CASCADE};
pub use identity::{Identity, IdentityRole};

use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::config::MatchingConfig;
use crate::film::FilmRecord;
use crate::metrics;
use crate::normalize::strip_parenthetical;
use crate::reference_index::{
    IdentityDetail, IndexPerson, LookupError, LookupResult, Pool, ReferenceIndex,
};

pub struct IdentityResolver<'a> {
    index: &'a dyn ReferenceIndex,
    config: &'a MatchingConfig,
    allow_non_qualifying: bool,
}

impl<'a> IdentityResolver<'a> {
    pub fn new(index: &'a dyn ReferenceIndex, config: &'a MatchingConfig) -> Self {
        Self {
            index,
            config,
            allow_non_qualifying: config.allow_non_qualifying_roles,
        }
    }

    /// Let the candidate's site widen the genre filter.
    pub fn allowing_non_qualifying_roles(mut self, allow: bool) -> Self {
        self.allow_non_qualifying |= allow;
        self
    }

    /// Resolve cast names. A cast supplied in the filename replaces the
    /// scraped one.
    pub fn resolve_cast(
        &self,
        names: &[String],
        record: &FilmRecord,
    ) -> Result<BTreeMap<String, Identity>, LookupError> {
        let names = if record.filename_cast.is_empty() {
            names
        } else {
            debug!("Using filename cast for '{}'", record.title);
            record.filename_cast.as_slice()
        };
        self.resolve(names, record, Pool::Cast)
    }

    pub fn resolve_directors(
        &self,
        names: &[String],
        record: &FilmRecord,
    ) -> Result<BTreeMap<String, Identity>, LookupError> {
        self.resolve(names, record, Pool::Directors)
    }

    fn resolve(
        &self,
        names: &[String],
        record: &FilmRecord,
        pool: Pool,
    ) -> Result<BTreeMap<String, Identity>, LookupError> {
        let credits: &[IndexPerson] = record
            .index_film
            .as_ref()
            .map(|film| film.credits(pool))
            .unwrap_or(&[]);

        let mut batch = prepare_names(names);
        if batch.is_empty() {
            let recorded: Vec<String> = credits.iter().map(|p| p.name.clone()).collect();
            batch = prepare_names(&recorded);
        }
        if batch.is_empty() {
            return Err(LookupError::NothingToResolve);
        }

        let credit_targets: Vec<Target> = credits.iter().map(Target::from_person).collect();
        let mut resolved: BTreeMap<String, Identity> = BTreeMap::new();
        for name in batch {
            let identity = self.resolve_one(&name, record, pool, credits, &credit_targets, &resolved);
            resolved.insert(name, identity);
        }
        Ok(resolved)
    }

    fn resolve_one(
        &self,
        name: &str,
        record: &FilmRecord,
        pool: Pool,
        credits: &[IndexPerson],
        credit_targets: &[Target],
        resolved: &BTreeMap<String, Identity>,
    ) -> Identity {
        let forms = NameForms::new(name);

        if let Some((idx, step)) = best_match(&forms, credit_targets) {
            let person = &credits[idx];
            debug!(
                "'{}' matched credited {} '{}' at step {}",
                name,
                pool.as_str(),
                person.name,
                step.as_str()
            );
            let detail = self.fetch_detail(person);
            return self.accept(person, pool, step, detail);
        }

        match self.search(name, &forms, record, pool, resolved) {
            Ok(identity) => identity,
            Err(err) => {
                warn!("Could not resolve {} '{}': {}", pool.as_str(), name, err);
                metrics::record_identity_not_found(pool.as_str(), lookup_reason(&err));
                Identity::not_found(name)
            }
        }
    }

    fn search(
        &self,
        name: &str,
        forms: &NameForms,
        record: &FilmRecord,
        pool: Pool,
        resolved: &BTreeMap<String, Identity>,
    ) -> LookupResult<Identity> {
        let results = self.index.search_by_name(name, pool)?;
        if results.is_empty() {
            return Err(LookupError::NotFound(name.to_string()));
        }
        if results.len() > self.config.max_search_results {
            return Err(LookupError::TooManyResults {
                name: name.to_string(),
                count: results.len(),
            });
        }

        let check_career = results.len() > 1 && !record.is_compilation();
        let year = record.release_year();
        let mut remaining: Vec<&IndexPerson> = results
            .iter()
            .filter(|person| match year {
                Some(year) if check_career => {
                    let plausible = career_covers(person, year);
                    if !plausible {
                        debug!(
                            "Excluding '{}': career {:?}-{:?} misses {}",
                            person.name, person.career_start, person.career_end, year
                        );
                    }
                    plausible
                }
                _ => true,
            })
            .filter(|person| {
                let claimed = alias_claimed_elsewhere(person, resolved);
                if claimed {
                    debug!("Excluding '{}': alias already resolved to someone else", person.name);
                }
                !claimed
            })
            .collect();

        // Genre plausibility needs the detail page, so it is only checked for
        // the person the cascade settles on.
        loop {
            let targets: Vec<Target> = remaining.iter().map(|p| Target::from_person(p)).collect();
            let Some((idx, step)) = best_match(forms, &targets) else {
                return Err(LookupError::NotFound(name.to_string()));
            };
            let person = remaining[idx];
            let detail = self.fetch_detail(person);

            let implausible = detail
                .as_ref()
                .map_or(false, IdentityDetail::only_non_qualifying);
            if implausible && !self.allow_non_qualifying {
                debug!("Excluding '{}': only non-qualifying credits", person.name);
                remaining.remove(idx);
                continue;
            }

            info!(
                "Resolved {} '{}' to '{}' at step {}",
                pool.as_str(),
                name,
                person.name,
                step.as_str()
            );
            return Ok(self.accept(person, pool, step, detail));
        }
    }

    fn fetch_detail(&self, person: &IndexPerson) -> Option<IdentityDetail> {
        let url = person.detail_url.as_deref()?;
        match self.index.fetch_identity_detail(url) {
            Ok(detail) => Some(detail),
            Err(err) => {
                warn!("No detail for '{}': {}", person.name, err);
                None
            }
        }
    }

    fn accept(
        &self,
        person: &IndexPerson,
        pool: Pool,
        step: MatchStep,
        detail: Option<IdentityDetail>,
    ) -> Identity {
        metrics::record_identity_resolved(pool.as_str(), step.as_str());
        let identity = Identity::from_person(person, pool, step);
        match detail {
            Some(detail) => identity.with_detail(detail),
            None => identity,
        }
    }
}

fn lookup_reason(err: &LookupError) -> &'static str {
    match err {
        LookupError::Unreachable(_) => "unreachable",
        LookupError::BadResponse(_) => "bad_response",
        LookupError::NotFound(_) => "not_found",
        LookupError::TooManyResults { .. } => "too_many_results",
        LookupError::NothingToResolve => "nothing_to_resolve",
    }
}

/// Career window widened by a year at each edge. Unknown edges never
/// exclude.
fn career_covers(person: &IndexPerson, year: i32) -> bool {
    person.career_start.map_or(true, |start| year >= start.saturating_sub(1))
        && person.career_end.map_or(true, |end| year <= end.saturating_add(1))
}

/// Whether one of `person`'s aliases already belongs to a different
/// identity resolved for this film.
fn alias_claimed_elsewhere(person: &IndexPerson, resolved: &BTreeMap<String, Identity>) -> bool {
    person.aliases.iter().any(|alias| {
        let compare = NameForms::new(alias).compare;
        resolved
            .values()
            .filter(|identity| identity.is_found() && identity.canonical_name != person.name)
            .any(|identity| identity.answers_to(&compare))
    })
}

fn lowercase_words(name: &str) -> Vec<String> {
    name.split_whitespace().map(|w| w.to_lowercase()).collect()
}

/// Clean a batch of scraped names: qualifiers removed, duplicates dropped,
/// and names that are a whole-word fragment of another name in the batch
/// dropped in favour of the longer form.
pub fn prepare_names(names: &[String]) -> Vec<String> {
    let cleaned: Vec<String> = names
        .iter()
        .map(|n| {
            strip_parenthetical(n)
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|n| !n.is_empty())
        .collect();
    let words: Vec<Vec<String>> = cleaned.iter().map(|n| lowercase_words(n)).collect();

    let mut prepared: Vec<String> = Vec::new();
    let mut seen: Vec<&[String]> = Vec::new();
    for (i, name) in cleaned.iter().enumerate() {
        let own = words[i].as_slice();
        let is_fragment = words.iter().any(|other| {
            other.len() > own.len() && other.windows(own.len()).any(|window| window == own)
        });
        if is_fragment {
            debug!("Dropping '{}': part of a longer name in the batch", name);
            continue;
        }
        if seen.contains(&own) {
            continue;
        }
        seen.push(own);
        prepared.push(name.clone());
    }
    prepared
}
