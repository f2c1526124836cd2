use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    /// Name of the registered candidate extractor, e.g. "json".
    pub extractor: Option<String>,
    /// TOML file with taxonomy entries merged over the built-in tables.
    pub taxonomy_file: Option<String>,

    // Feature configs
    pub matching: Option<MatchingFileConfig>,
    pub reference_index: Option<ReferenceIndexFileConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct MatchingFileConfig {
    pub date_tolerance_days: Option<i64>,
    pub duration_matching: Option<bool>,
    pub duration_tolerance_minutes: Option<i64>,
    pub max_search_results: Option<usize>,
    pub allow_non_qualifying_roles: Option<bool>,
    /// "pass_through" or "drop"
    pub unknown_terms: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct ReferenceIndexFileConfig {
    /// JSON dump of the reference index, used instead of `url` when set.
    pub file: Option<String>,
    pub url: Option<String>,
    pub timeout_sec: Option<u64>,
    pub min_delay_ms: Option<u64>,
    pub max_delay_ms: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
extractor = "json"

[matching]
date_tolerance_days = 200
duration_matching = false
unknown_terms = "drop"

[reference_index]
url = "http://index.local/api"
min_delay_ms = 10
"#
        )
        .unwrap();

        let config = FileConfig::load(file.path()).unwrap();
        assert_eq!(config.extractor.as_deref(), Some("json"));
        let matching = config.matching.unwrap();
        assert_eq!(matching.date_tolerance_days, Some(200));
        assert_eq!(matching.duration_matching, Some(false));
        assert_eq!(matching.unknown_terms.as_deref(), Some("drop"));
        assert_eq!(matching.max_search_results, None);
        let index = config.reference_index.unwrap();
        assert_eq!(index.url.as_deref(), Some("http://index.local/api"));
        assert_eq!(index.min_delay_ms, Some(10));
        assert_eq!(index.file, None);
    }

    #[test]
    fn test_load_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = FileConfig::load(file.path()).unwrap();
        assert!(config.matching.is_none());
        assert!(config.reference_index.is_none());
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "matching = [").unwrap();
        let err = FileConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = FileConfig::load(Path::new("/nonexistent/film-resolver.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
