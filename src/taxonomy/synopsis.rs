//! Keyword scanner pulling genre and country hints out of synopsis text.

use regex::Regex;
use std::collections::HashMap;

use super::TidiedTerm;
use crate::config::ConfigError;
use crate::normalize::fold_diacritics;

#[derive(Debug, Clone, Default)]
pub struct SynopsisScanner {
    pattern: Option<Regex>,
    terms: HashMap<String, TidiedTerm>,
}

impl SynopsisScanner {
    /// Build a scanner from `(keyword, term)` pairs. Keywords are matched
    /// case- and accent-insensitively on word boundaries.
    pub fn new(
        entries: impl IntoIterator<Item = (String, TidiedTerm)>,
    ) -> Result<Self, ConfigError> {
        let terms: HashMap<String, TidiedTerm> = entries
            .into_iter()
            .map(|(keyword, term)| (fold_diacritics(&keyword.trim().to_lowercase()), term))
            .filter(|(keyword, _)| !keyword.is_empty())
            .collect();

        if terms.is_empty() {
            return Ok(Self::default());
        }

        // Longest keywords first so "rio de janeiro" beats any shorter cue
        let mut keywords: Vec<&String> = terms.keys().collect();
        keywords.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let alternation = keywords
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"\b(?:{})\b", alternation)).map_err(|e| {
            ConfigError::InvalidTaxonomy(format!("synopsis cues do not compile: {}", e))
        })?;

        Ok(Self {
            pattern: Some(pattern),
            terms,
        })
    }

    /// Terms hinted at by `text`, in order of first appearance, without
    /// duplicates.
    pub fn scan(&self, text: &str) -> Vec<TidiedTerm> {
        let Some(pattern) = &self.pattern else {
            return Vec::new();
        };
        let folded = fold_diacritics(&text.to_lowercase());

        let mut found: Vec<TidiedTerm> = Vec::new();
        for m in pattern.find_iter(&folded) {
            if let Some(term) = self.terms.get(m.as_str()) {
                if !found.contains(term) {
                    found.push(term.clone());
                }
            }
        }
        found
    }

    /// Every `(keyword, term)` pair the scanner knows.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &TidiedTerm)> {
        self.terms.iter().map(|(k, t)| (k.as_str(), t))
    }
}
