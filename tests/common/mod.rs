//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{test_index, ZAK_SPEARS};
//!
//! #[test]
//! fn test_search() {
//!     let index = test_index();
//!     // ...
//! }
//! ```

mod constants;
mod fixtures;

// Public API - this is what tests import
pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::{film_input, summer_heat_job, test_index, test_snapshot, write_index_file};
