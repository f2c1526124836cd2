//! Film Resolver Library
//!
//! Decides whether scraped catalog pages describe a local film and resolves
//! the people credited on it against a reference index.

pub mod aggregate;
pub mod config;
pub mod extractor;
pub mod film;
pub mod matchers;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod reference_index;
pub mod resolver;
pub mod similarity;
pub mod taxonomy;

// Re-export commonly used types for convenience
pub use aggregate::{Aggregator, EnrichedRecord, IdentitySummary};
pub use config::{AppConfig, ConfigError, MatchingConfig, UnknownTermDisposition};
pub use extractor::{CandidateExtractor, ExtractorRegistry};
pub use film::{CandidateRecord, FilmInput, FilmRecord};
pub use matchers::{MatchResult, Mismatch};
pub use pipeline::{FilmJob, FilmMatcher};
pub use reference_index::{LookupError, MemoryReferenceIndex, ReferenceIndex};
pub use resolver::{Identity, IdentityResolver, MatchStep};
pub use taxonomy::TaxonomyTables;
