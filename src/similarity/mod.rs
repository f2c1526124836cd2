mod levenshtein;
mod soundex;

pub use levenshtein::{distance_budget, levenshtein_distance, within_distance};
pub use soundex::{soundex, sounds_alike};
