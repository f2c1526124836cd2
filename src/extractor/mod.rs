//! Site adapters turning a fetched page into a [`CandidateRecord`].
//!
//! Extractors are looked up by name, so a site is chosen by configuration.

mod json;
mod labeled;

pub use json::JsonExtractor;
pub use labeled::LabeledFieldsExtractor;

use anyhow::Result;
use std::collections::BTreeMap;

use crate::config::ConfigError;
use crate::film::CandidateRecord;

pub trait CandidateExtractor: Send + Sync {
    fn name(&self) -> &str;

    fn extract(&self, page: &serde_json::Value) -> Result<CandidateRecord>;

    /// Whether people with only non-qualifying credits are acceptable for
    /// this site.
    fn allows_non_qualifying_roles(&self) -> bool {
        false
    }
}

#[derive(Default)]
pub struct ExtractorRegistry {
    extractors: BTreeMap<String, Box<dyn CandidateExtractor>>,
}

impl ExtractorRegistry {
    /// Registry holding every extractor shipped with the crate.
    pub fn with_builtin() -> Self {
        let mut registry = Self::default();
        registry.register(Box::new(JsonExtractor));
        registry.register(Box::new(LabeledFieldsExtractor::default()));
        registry
    }

    /// Add `extractor`, replacing any previous one with the same name.
    pub fn register(&mut self, extractor: Box<dyn CandidateExtractor>) {
        self.extractors
            .insert(extractor.name().to_string(), extractor);
    }

    pub fn get(&self, name: &str) -> Result<&dyn CandidateExtractor, ConfigError> {
        self.extractors
            .get(name)
            .map(|e| e.as_ref())
            .ok_or_else(|| ConfigError::UnknownExtractor {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    pub fn names(&self) -> Vec<&str> {
        self.extractors.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedExtractor;

    impl CandidateExtractor for FixedExtractor {
        fn name(&self) -> &str {
            "fixed"
        }

        fn extract(&self, _page: &serde_json::Value) -> Result<CandidateRecord> {
            Ok(CandidateRecord {
                title: Some("Summer Heat".to_string()),
                ..Default::default()
            })
        }

        fn allows_non_qualifying_roles(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_builtin_registry() {
        let registry = ExtractorRegistry::with_builtin();
        assert_eq!(registry.names(), vec!["json", "labeled"]);
        assert_eq!(registry.get("json").unwrap().name(), "json");
    }

    #[test]
    fn test_unknown_extractor() {
        let registry = ExtractorRegistry::with_builtin();
        let err = registry.get("nope").err().unwrap();
        assert!(matches!(
            &err,
            ConfigError::UnknownExtractor { name, available }
                if name == "nope" && available == "json, labeled"
        ));
        assert_eq!(
            err.to_string(),
            "No extractor registered under 'nope' (available: json, labeled)"
        );
    }

    #[test]
    fn test_register_custom_extractor() {
        let mut registry = ExtractorRegistry::with_builtin();
        registry.register(Box::new(FixedExtractor));

        let extractor = registry.get("fixed").unwrap();
        assert!(extractor.allows_non_qualifying_roles());
        let candidate = extractor.extract(&serde_json::Value::Null).unwrap();
        assert_eq!(candidate.title.as_deref(), Some("Summer Heat"));
    }
}
