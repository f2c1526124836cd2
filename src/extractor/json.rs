use anyhow::{Context, Result};

use super::CandidateExtractor;
use crate::film::CandidateRecord;

/// For pages that already carry the candidate fields as JSON.
pub struct JsonExtractor;

impl CandidateExtractor for JsonExtractor {
    fn name(&self) -> &str {
        "json"
    }

    fn extract(&self, page: &serde_json::Value) -> Result<CandidateRecord> {
        serde_json::from_value(page.clone()).context("Page is not a candidate record")
    }
}
