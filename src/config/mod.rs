mod file_config;

pub use file_config::{FileConfig, MatchingFileConfig, ReferenceIndexFileConfig};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_DATE_TOLERANCE_DAYS: i64 = 366;
pub const DEFAULT_DURATION_TOLERANCE_MINUTES: i64 = 5;
pub const DEFAULT_MAX_SEARCH_RESULTS: usize = 25;
pub const DEFAULT_EXTRACTOR: &str = "json";

/// Startup configuration problems. All of them abort the run before any
/// film is processed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Tolerance '{field}' must be positive, got {value}")]
    InvalidTolerance { field: &'static str, value: i64 },

    #[error("Unknown value '{value}' for '{field}'")]
    InvalidValue { field: &'static str, value: String },

    #[error("Invalid taxonomy tables: {0}")]
    InvalidTaxonomy(String),

    #[error("No extractor registered under '{name}' (available: {available})")]
    UnknownExtractor { name: String, available: String },

    #[error("A reference index must be configured via --index-file, --index-url or the config file")]
    MissingReferenceIndex,

    #[error("Reference index file does not exist: {0:?}")]
    ReferenceIndexFileNotFound(PathBuf),
}

/// What happens to a genre/country label that no taxonomy table knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownTermDisposition {
    /// Keep the label verbatim as a genre.
    #[default]
    PassThrough,
    /// Discard the label.
    Drop,
}

impl UnknownTermDisposition {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pass_through" | "passthrough" | "keep" => Some(Self::PassThrough),
            "drop" | "null" | "discard" => Some(Self::Drop),
            _ => None,
        }
    }
}

/// Which source a date is being checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToleranceMode {
    /// A scraped catalog site.
    Site,
    /// The reference index; its dates lag behind releases.
    ReferenceIndex,
}

/// Tolerances and switches shared by every matcher. Built once at startup
/// and passed by reference; never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchingConfig {
    pub date_tolerance_days: i64,
    pub duration_matching: bool,
    pub duration_tolerance_minutes: i64,
    /// Name searches returning more hits than this are skipped as ambiguous.
    pub max_search_results: usize,
    /// Accept people whose filmography is only non-qualifying roles.
    pub allow_non_qualifying_roles: bool,
    pub unknown_terms: UnknownTermDisposition,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            date_tolerance_days: DEFAULT_DATE_TOLERANCE_DAYS,
            duration_matching: true,
            duration_tolerance_minutes: DEFAULT_DURATION_TOLERANCE_MINUTES,
            max_search_results: DEFAULT_MAX_SEARCH_RESULTS,
            allow_non_qualifying_roles: false,
            unknown_terms: UnknownTermDisposition::PassThrough,
        }
    }
}

impl MatchingConfig {
    /// Allowed day delta for a release date from the given source.
    pub fn date_tolerance(&self, mode: ToleranceMode) -> i64 {
        match mode {
            ToleranceMode::Site => self.date_tolerance_days,
            ToleranceMode::ReferenceIndex => self.date_tolerance_days.saturating_mul(2),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.date_tolerance_days <= 0 {
            return Err(ConfigError::InvalidTolerance {
                field: "date_tolerance_days",
                value: self.date_tolerance_days,
            });
        }
        if self.duration_tolerance_minutes <= 0 {
            return Err(ConfigError::InvalidTolerance {
                field: "duration_tolerance_minutes",
                value: self.duration_tolerance_minutes,
            });
        }
        if self.max_search_results == 0 {
            return Err(ConfigError::InvalidTolerance {
                field: "max_search_results",
                value: 0,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceIndexSettings {
    File(PathBuf),
    Http {
        base_url: String,
        timeout_sec: u64,
        min_delay_ms: u64,
        max_delay_ms: u64,
    },
}

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub index_file: Option<PathBuf>,
    pub index_url: Option<String>,
    pub extractor: Option<String>,
    pub taxonomy_file: Option<PathBuf>,
    pub no_duration_match: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub matching: MatchingConfig,
    pub reference_index: ReferenceIndexSettings,
    pub extractor: String,
    pub taxonomy_file: Option<PathBuf>,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let m_file = file.matching.unwrap_or_default();
        let defaults = MatchingConfig::default();
        let unknown_terms = match m_file.unknown_terms {
            Some(raw) => UnknownTermDisposition::parse(&raw).ok_or(ConfigError::InvalidValue {
                field: "unknown_terms",
                value: raw,
            })?,
            None => defaults.unknown_terms,
        };
        let matching = MatchingConfig {
            date_tolerance_days: m_file
                .date_tolerance_days
                .unwrap_or(defaults.date_tolerance_days),
            duration_matching: m_file
                .duration_matching
                .unwrap_or(!cli.no_duration_match),
            duration_tolerance_minutes: m_file
                .duration_tolerance_minutes
                .unwrap_or(defaults.duration_tolerance_minutes),
            max_search_results: m_file
                .max_search_results
                .unwrap_or(defaults.max_search_results),
            allow_non_qualifying_roles: m_file
                .allow_non_qualifying_roles
                .unwrap_or(defaults.allow_non_qualifying_roles),
            unknown_terms,
        };
        matching.validate()?;

        // Reference index: TOML [reference_index] takes precedence, a file
        // source wins over a URL
        let ri_file = file.reference_index.unwrap_or_default();
        let index_file = ri_file
            .file
            .map(PathBuf::from)
            .or_else(|| cli.index_file.clone());
        let index_url = ri_file.url.or_else(|| cli.index_url.clone());
        let reference_index = if let Some(path) = index_file {
            if !path.exists() {
                return Err(ConfigError::ReferenceIndexFileNotFound(path).into());
            }
            ReferenceIndexSettings::File(path)
        } else if let Some(base_url) = index_url {
            let min_delay_ms = ri_file.min_delay_ms.unwrap_or(500);
            let max_delay_ms = ri_file.max_delay_ms.unwrap_or(1500).max(min_delay_ms);
            ReferenceIndexSettings::Http {
                base_url: base_url.trim_end_matches('/').to_string(),
                timeout_sec: ri_file.timeout_sec.unwrap_or(30),
                min_delay_ms,
                max_delay_ms,
            }
        } else {
            return Err(ConfigError::MissingReferenceIndex.into());
        };

        let extractor = file
            .extractor
            .or_else(|| cli.extractor.clone())
            .unwrap_or_else(|| DEFAULT_EXTRACTOR.to_string());

        let taxonomy_file = file
            .taxonomy_file
            .map(PathBuf::from)
            .or_else(|| cli.taxonomy_file.clone());

        Ok(Self {
            matching,
            reference_index,
            extractor,
            taxonomy_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_file() -> tempfile::NamedTempFile {
        tempfile::NamedTempFile::new().unwrap()
    }

    #[test]
    fn test_date_tolerance_doubles_for_reference_index() {
        let config = MatchingConfig::default();
        assert_eq!(config.date_tolerance(ToleranceMode::Site), 366);
        assert_eq!(config.date_tolerance(ToleranceMode::ReferenceIndex), 732);

        let wide = MatchingConfig {
            date_tolerance_days: i64::MAX,
            ..Default::default()
        };
        assert_eq!(wide.date_tolerance(ToleranceMode::ReferenceIndex), i64::MAX);
    }

    #[test]
    fn test_parse_unknown_term_disposition() {
        assert_eq!(
            UnknownTermDisposition::parse("pass_through"),
            Some(UnknownTermDisposition::PassThrough)
        );
        assert_eq!(
            UnknownTermDisposition::parse("DROP"),
            Some(UnknownTermDisposition::Drop)
        );
        assert_eq!(UnknownTermDisposition::parse("maybe"), None);
    }

    #[test]
    fn test_resolve_cli_only() {
        let file = index_file();
        let cli = CliConfig {
            index_file: Some(file.path().to_path_buf()),
            no_duration_match: true,
            ..Default::default()
        };

        let config = AppConfig::resolve(&cli, None).unwrap();

        assert_eq!(
            config.reference_index,
            ReferenceIndexSettings::File(file.path().to_path_buf())
        );
        assert!(!config.matching.duration_matching);
        assert_eq!(config.matching.date_tolerance_days, 366);
        assert_eq!(config.matching.max_search_results, 25);
        assert_eq!(config.extractor, "json");
        assert!(config.taxonomy_file.is_none());
    }

    #[test]
    fn test_resolve_toml_overrides_cli() {
        let cli = CliConfig {
            index_url: Some("http://cli.local".to_string()),
            extractor: Some("cli-extractor".to_string()),
            no_duration_match: true,
            ..Default::default()
        };
        let file_config = FileConfig {
            extractor: Some("json".to_string()),
            matching: Some(MatchingFileConfig {
                duration_matching: Some(true),
                date_tolerance_days: Some(100),
                unknown_terms: Some("drop".to_string()),
                ..Default::default()
            }),
            reference_index: Some(ReferenceIndexFileConfig {
                url: Some("http://toml.local/".to_string()),
                min_delay_ms: Some(900),
                max_delay_ms: Some(100),
                ..Default::default()
            }),
            ..Default::default()
        };

        let config = AppConfig::resolve(&cli, Some(file_config)).unwrap();

        assert_eq!(config.extractor, "json");
        assert!(config.matching.duration_matching);
        assert_eq!(config.matching.date_tolerance_days, 100);
        assert_eq!(config.matching.unknown_terms, UnknownTermDisposition::Drop);
        assert_eq!(
            config.reference_index,
            ReferenceIndexSettings::Http {
                base_url: "http://toml.local".to_string(),
                timeout_sec: 30,
                min_delay_ms: 900,
                // never below the minimum
                max_delay_ms: 900,
            }
        );
    }

    #[test]
    fn test_resolve_missing_reference_index_error() {
        let err = AppConfig::resolve(&CliConfig::default(), None).unwrap_err();
        assert!(err.to_string().contains("A reference index must be configured"));
    }

    #[test]
    fn test_resolve_nonexistent_index_file_error() {
        let cli = CliConfig {
            index_file: Some(PathBuf::from("/nonexistent/index.json")),
            ..Default::default()
        };
        let err = AppConfig::resolve(&cli, None).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_resolve_invalid_tolerance_error() {
        let file = index_file();
        let cli = CliConfig {
            index_file: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let file_config = FileConfig {
            matching: Some(MatchingFileConfig {
                duration_tolerance_minutes: Some(0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let err = AppConfig::resolve(&cli, Some(file_config)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::InvalidTolerance {
                field: "duration_tolerance_minutes",
                ..
            })
        ));
    }

    #[test]
    fn test_resolve_invalid_unknown_terms_error() {
        let file = index_file();
        let cli = CliConfig {
            index_file: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let file_config = FileConfig {
            matching: Some(MatchingFileConfig {
                unknown_terms: Some("sometimes".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let err = AppConfig::resolve(&cli, Some(file_config)).unwrap_err();
        assert!(err.to_string().contains("sometimes"));
    }
}
