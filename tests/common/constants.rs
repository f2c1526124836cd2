//! Shared constants for end-to-end tests
//!
//! When the test reference index changes, update only this file and
//! `fixtures.rs`.

// ============================================================================
// Films
// ============================================================================

/// Film present in the test reference index
pub const SUMMER_HEAT: &str = "Summer Heat";

/// Detail link of "Summer Heat"
pub const SUMMER_HEAT_URL: &str = "/films/summer-heat";

/// Film absent from the test reference index
pub const NIGHT_SHIFT: &str = "Night Shift";

pub const STUDIO: &str = "Falcon";

pub const STUDIO_FULL: &str = "Falcon Studios";

// ============================================================================
// People
// ============================================================================

/// Active 1990-1995, aliases "Spears" and "Zack Spears"
pub const ZAK_SPEARS: &str = "Zak Spears";

/// Active 2008-2014, a different person with a similar name
pub const ZAK_SPEARMAN: &str = "Zak Spearman";

/// Active 1992-1999, Brazilian
pub const LEO_ROCHA: &str = "Leo Rocha";

/// Active 1993-1998, not credited on any indexed film
pub const AARON_LAWRENCE: &str = "Aaron Lawrence";

/// Only non-qualifying credits
pub const STEVE_SOLO: &str = "Steve Solo";

/// Director, alias "Taylor Whitney"
pub const CHI_CHI_LARUE: &str = "Chi Chi LaRue";
