//! Trailing roman numeral conversion.
//!
//! Sequel numbering shows up as "II" on one catalog and "2" on another, so
//! a roman numeral at the very end of a title is rewritten to arabic digits
//! before any other normalization happens.

use lazy_static::lazy_static;
use regex::Regex;

/// Roman forms 1..=19, indexed by value - 1.
const ROMAN_NUMERALS: [&str; 19] = [
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII", "XIII", "XIV", "XV",
    "XVI", "XVII", "XVIII", "XIX",
];

lazy_static! {
    // Longest forms first so the alternation never settles on a prefix.
    static ref TRAILING_ROMAN: Regex = Regex::new(
        r"(?:^|\s)(XVIII|XVII|XIII|VIII|XIX|XVI|XIV|XII|VII|III|XV|XI|IX|IV|VI|II|X|V|I)\s*$"
    )
    .expect("trailing roman numeral regex");
}

/// Value of a standard roman numeral between 1 and 19.
fn roman_to_arabic(numeral: &str) -> Option<u32> {
    ROMAN_NUMERALS
        .iter()
        .position(|r| *r == numeral)
        .map(|idx| idx as u32 + 1)
}

/// Replace a whitespace-separated roman numeral at the end of `text` with
/// its arabic value. Only upper-case numerals are recognised; anything
/// mid-string is left untouched.
pub fn convert_trailing_roman(text: &str) -> String {
    let Some(caps) = TRAILING_ROMAN.captures(text) else {
        return text.to_string();
    };
    let Some(numeral) = caps.get(1) else {
        return text.to_string();
    };
    match roman_to_arabic(numeral.as_str()) {
        Some(value) => format!("{}{}", &text[..numeral.start()], value),
        None => text.to_string(),
    }
}
