use tracing::debug;

use super::{MatchResult, Mismatch};
use crate::film::FilmRecord;
use crate::normalize::{normalize, sort_alpha_chars};

/// Accept `candidate` when its sorted-character key is one of the record's
/// title forms or one of its episode fragments. Never fuzzy.
pub fn match_title(candidate: &str, record: &FilmRecord) -> MatchResult<()> {
    let key = sort_alpha_chars(&normalize(candidate));
    let rejected = || Mismatch::Title {
        candidate: candidate.to_string(),
    };
    if key.is_empty() {
        return Err(rejected());
    }

    if record.compare_titles.contains(&key) {
        debug!("Title '{}' matches '{}'", candidate, record.title);
        return Ok(());
    }
    if record.episode_titles.contains(&key) {
        debug!("Title '{}' matches an episode of '{}'", candidate, record.title);
        return Ok(());
    }
    Err(rejected())
}
