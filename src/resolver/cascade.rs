//! The graduated name-matching cascade.
//!
//! Steps run from cheap and precise to expensive and loose. A pool of
//! targets is scanned step by step, so an exact hit on any target always
//! beats a phonetic hit on an earlier one.

use serde::{Deserialize, Serialize};

use crate::normalize::{normalize_for_index, strip_parenthetical};
use crate::reference_index::IndexPerson;
use crate::similarity::{distance_budget, sounds_alike, within_distance};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStep {
    Exact,
    ExactAlias,
    Partial,
    PartialAlias,
    Levenshtein,
    LevenshteinAlias,
    Soundex,
    SoundexAlias,
}

pub const CASCADE: [MatchStep; 8] = [
    MatchStep::Exact,
    MatchStep::ExactAlias,
    MatchStep::Partial,
    MatchStep::PartialAlias,
    MatchStep::Levenshtein,
    MatchStep::LevenshteinAlias,
    MatchStep::Soundex,
    MatchStep::SoundexAlias,
];

impl MatchStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStep::Exact => "exact",
            MatchStep::ExactAlias => "exact_alias",
            MatchStep::Partial => "partial",
            MatchStep::PartialAlias => "partial_alias",
            MatchStep::Levenshtein => "levenshtein",
            MatchStep::LevenshteinAlias => "levenshtein_alias",
            MatchStep::Soundex => "soundex",
            MatchStep::SoundexAlias => "soundex_alias",
        }
    }

    /// 1-based position in the cascade.
    pub fn rank(&self) -> usize {
        CASCADE.iter().position(|s| s == self).unwrap_or(CASCADE.len()) + 1
    }

    fn against_alias(&self) -> bool {
        matches!(
            self,
            MatchStep::ExactAlias
                | MatchStep::PartialAlias
                | MatchStep::LevenshteinAlias
                | MatchStep::SoundexAlias
        )
    }
}

/// A name in every shape the cascade compares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameForms {
    /// Whole name, normalized, no separators.
    pub compare: String,
    /// Each word normalized on its own; empty words dropped.
    pub words: Vec<String>,
    pub word_count: usize,
}

impl NameForms {
    pub fn new(raw: &str) -> Self {
        let cleaned = strip_parenthetical(raw);
        let words: Vec<String> = cleaned
            .split_whitespace()
            .map(normalize_for_index)
            .filter(|w| !w.is_empty())
            .collect();
        Self {
            compare: normalize_for_index(&cleaned),
            word_count: words.len(),
            words,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.compare.is_empty()
    }

    fn first_word(&self) -> &str {
        self.words.first().map(String::as_str).unwrap_or(&self.compare)
    }
}

/// A reference-index person as seen by the cascade.
#[derive(Debug, Clone)]
pub struct Target {
    pub name: NameForms,
    pub aliases: Vec<NameForms>,
}

impl Target {
    pub fn new(name: &str, aliases: &[String]) -> Self {
        Self {
            name: NameForms::new(name),
            aliases: aliases
                .iter()
                .map(|a| NameForms::new(a))
                .filter(|a| !a.is_empty())
                .collect(),
        }
    }

    pub fn from_person(person: &IndexPerson) -> Self {
        Self::new(&person.name, &person.aliases)
    }

    /// Whether `other` shares this target's name or any alias.
    pub fn shares_name_with(&self, other: &NameForms) -> bool {
        self.name.compare == other.compare || self.aliases.iter().any(|a| a.compare == other.compare)
    }
}

/// Whether a single step accepts `candidate` for `target`.
pub fn step_matches(step: MatchStep, candidate: &NameForms, target: &Target) -> bool {
    if candidate.is_empty() {
        return false;
    }
    if step.against_alias() {
        target
            .aliases
            .iter()
            .any(|alias| compare(step, candidate, alias))
    } else {
        compare(step, candidate, &target.name)
    }
}

fn compare(step: MatchStep, candidate: &NameForms, known: &NameForms) -> bool {
    if known.is_empty() {
        return false;
    }
    match step {
        MatchStep::Exact | MatchStep::ExactAlias => candidate.compare == known.compare,
        MatchStep::Partial | MatchStep::PartialAlias => is_word_run(&candidate.words, &known.words),
        MatchStep::Levenshtein | MatchStep::LevenshteinAlias => within_distance(
            &candidate.compare,
            comparison_side(candidate, known),
            distance_budget(candidate.word_count),
        ),
        MatchStep::Soundex | MatchStep::SoundexAlias => {
            sounds_alike(&candidate.compare, comparison_side(candidate, known))
        }
    }
}

/// Single-token candidates are compared with the known name's first token
/// only, so "Zak" can reach "Zak Spears".
fn comparison_side<'a>(candidate: &NameForms, known: &'a NameForms) -> &'a str {
    if candidate.word_count <= 1 {
        known.first_word()
    } else {
        &known.compare
    }
}

/// Whether `needle` appears as a contiguous run of whole words in
/// `haystack`.
fn is_word_run(needle: &[String], haystack: &[String]) -> bool {
    if needle.is_empty() || needle.len() > haystack.len() {
        return false;
    }
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// First `(target index, step)` hit, scanning step-major.
pub fn best_match(candidate: &NameForms, targets: &[Target]) -> Option<(usize, MatchStep)> {
    CASCADE.iter().find_map(|&step| {
        targets
            .iter()
            .position(|target| step_matches(step, candidate, target))
            .map(|idx| (idx, step))
    })
}
