//! Text canonicalization for comparisons.
//!
//! Every matcher compares strings through [`normalize`] (or the
//! reference-index flavour [`normalize_for_index`]), never raw text.

mod roman;

pub use roman::convert_trailing_roman;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref DOMAIN_SUFFIX: Regex =
        Regex::new(r"\.(?:com|net|org|tv|xxx|biz|info|co\.uk|de|fr|nl|eu)\b")
            .expect("domain suffix regex");
    static ref VOLUME_VOCABULARY: Regex =
        Regex::new(r"\b(?:vol|volume|part|pt)\b\.?").expect("volume vocabulary regex");
    static ref MARKER_ONE: Regex =
        Regex::new(r"(?i)(?:^|\s|\b(?:vol|volume|part|pt)\.?)\s*#?1\s*$").expect("marker regex");
    static ref PARENTHETICAL: Regex =
        Regex::new(r"\s*[\(\[][^\)\]]*[\)\]]").expect("parenthetical regex");
    static ref LEADING_DETERMINER: Regex =
        Regex::new(r"(?i)^(?:the|an|a)\s+").expect("determiner regex");
}

/// Canonical comparison form of `text`.
///
/// Converts a trailing roman numeral, lower-cases, strips diacritics,
/// expands `&` to `and`, standardizes quotes and dashes, drops domain
/// suffixes, volume/part words and every literal `1`, and finally keeps
/// only alphanumeric characters.
///
/// The `1` rule is lossy: a title that genuinely ends in "1" loses it.
pub fn normalize(text: &str) -> String {
    normalize_with(text, true)
}

/// Same as [`normalize`] without the `&` expansion; the reference index
/// never spells names with `&`.
pub fn normalize_for_index(text: &str) -> String {
    normalize_with(text, false)
}

fn normalize_with(text: &str, expand_ampersand: bool) -> String {
    let converted = convert_trailing_roman(text);
    let mut folded = fold_diacritics(&converted.trim().to_lowercase());
    if expand_ampersand {
        folded = folded.replace('&', " and ");
    }
    let standardized = standardize_punctuation(&folded);

    if standardized.contains('1') && !MARKER_ONE.is_match(&standardized) {
        trace!(text = %text, "Stripping numeral 1 from a non-marker position");
    }

    // Stripping can expose new vocabulary once separators are gone.
    let mut current = standardized;
    loop {
        let stripped: String = strip_noise(&current)
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        if stripped == current {
            return stripped;
        }
        current = stripped;
    }
}

fn strip_noise(text: &str) -> String {
    let without_domain = DOMAIN_SUFFIX.replace_all(text, "");
    let without_volume = VOLUME_VOCABULARY.replace_all(&without_domain, "");
    without_volume.replace('1', "")
}

/// Strip accents and fold letters that have no decomposition.
pub fn fold_diacritics(text: &str) -> String {
    text.chars()
        .flat_map(replace_special_char)
        .collect::<String>()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

fn replace_special_char(c: char) -> Vec<char> {
    match c {
        'ł' => vec!['l'],
        'Ł' => vec!['L'],
        'ø' => vec!['o'],
        'Ø' => vec!['O'],
        'æ' => vec!['a', 'e'],
        'Æ' => vec!['A', 'E'],
        'œ' => vec!['o', 'e'],
        'Œ' => vec!['O', 'E'],
        'ß' => vec!['s', 's'],
        'đ' => vec!['d'],
        'Đ' => vec!['D'],
        'þ' => vec!['t', 'h'],
        'Þ' => vec!['T', 'h'],
        'ı' => vec!['i'],
        other => vec![other],
    }
}

/// Collapse curly/backtick quote variants to `'` or `"`, and dash variants
/// to `-`.
pub fn standardize_punctuation(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '`' | '\u{00B4}' | '\u{2032}' => {
                '\''
            }
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => '"',
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2015}'
            | '\u{2212}' => '-',
            other => other,
        })
        .collect()
}

/// Coarse, order-insensitive key: digits in their original order followed
/// by the letters sorted.
pub fn sort_alpha_chars(text: &str) -> String {
    let digits: String = text.chars().filter(|c| c.is_numeric()).collect();
    let mut letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    letters.sort_unstable();
    let mut key = digits;
    key.extend(letters);
    key
}

/// Remove `(...)` and `[...]` qualifiers, e.g. "Leo Rocha (as Leo)".
pub fn strip_parenthetical(text: &str) -> String {
    PARENTHETICAL.replace_all(text, "").trim().to_string()
}

/// Drop a leading "The", "A" or "An".
pub fn strip_determiner(title: &str) -> String {
    LEADING_DETERMINER.replace(title.trim(), "").to_string()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "The Best of Zak Spears",
        "Rocky II",
        "Café Society Vol. 1",
        "Men & Boys",
        "Don\u{2019}t Stop \u{2014} Now",
        "Studio.com Presents",
        "Part 1",
        "P.T.",
        "Żółć Øresund Straße",
        "  Spaces   Everywhere  ",
        "Summer Heat Part III",
        "",
        "Volume",
        "Ｆｕｌｌｗｉｄｔｈ",
    ];

    #[test]
    fn test_normalize_is_idempotent() {
        for sample in SAMPLES {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
            let once = normalize_for_index(sample);
            assert_eq!(
                normalize_for_index(&once),
                once,
                "index form not idempotent for {:?}",
                sample
            );
        }
    }

    #[test]
    fn test_normalize_basic_forms() {
        assert_eq!(normalize("The Best of Zak Spears"), "thebestofzakspears");
        assert_eq!(normalize("  Zak   SPEARS "), "zakspears");
        assert_eq!(normalize("Rocky II"), "rocky2");
        assert_eq!(normalize("Rocky 2"), "rocky2");
    }

    #[test]
    fn test_normalize_strips_diacritics() {
        assert_eq!(normalize("Café Olé"), "cafeole");
        assert_eq!(normalize("Øresund"), "oresund");
        assert_eq!(normalize("Straße"), "strasse");
        assert_eq!(normalize("Jiří Dvořák"), "jiridvorak");
    }

    #[test]
    fn test_normalize_ampersand() {
        assert_eq!(normalize("Men & Boys"), "menandboys");
        assert_eq!(normalize_for_index("Men & Boys"), "menboys");
    }

    #[test]
    fn test_normalize_quotes_and_dashes() {
        assert_eq!(normalize("Don\u{2019}t"), normalize("Don't"));
        assert_eq!(normalize("Don`t"), normalize("Don't"));
        assert_eq!(normalize("Hot\u{2014}Cold"), normalize("Hot-Cold"));
    }

    #[test]
    fn test_normalize_strips_volume_and_domain_noise() {
        assert_eq!(normalize("Summer Heat Vol. 1"), "summerheat");
        assert_eq!(normalize("Summer Heat Part 1"), "summerheat");
        assert_eq!(normalize("Summer Heat"), "summerheat");
        assert_eq!(normalize("Summer Heat Part I"), "summerheat");
        assert_eq!(normalize("Summer Heat Volume 2"), "summerheat2");
        assert_eq!(normalize("ManHunt.com"), "manhunt");
    }

    #[test]
    fn test_normalize_one_is_stripped_mid_word() {
        // Lossy by construction: every literal 1 goes.
        assert_eq!(normalize("Route 101"), "route0");
        assert_eq!(normalize("B1G"), "bg");
    }

    #[test]
    fn test_normalize_keeps_non_latin_letters() {
        assert_eq!(normalize("Иван Петров"), "иванпетров");
    }

    #[test]
    fn test_sort_alpha_chars() {
        assert_eq!(sort_alpha_chars("cab2"), "2abc");
        assert_eq!(sort_alpha_chars("b3a2"), "32ab");
        assert_eq!(
            sort_alpha_chars(&normalize("Spears Zak")),
            sort_alpha_chars(&normalize("Zak Spears"))
        );
    }

    #[test]
    fn test_strip_parenthetical() {
        assert_eq!(strip_parenthetical("Leo Rocha (as Leo)"), "Leo Rocha");
        assert_eq!(strip_parenthetical("Leo [uncredited] Rocha"), "Leo Rocha");
        assert_eq!(strip_parenthetical("Plain"), "Plain");
    }

    #[test]
    fn test_strip_determiner() {
        assert_eq!(strip_determiner("The Best of Zak"), "Best of Zak");
        assert_eq!(strip_determiner("A Night Out"), "Night Out");
        assert_eq!(strip_determiner("An Affair"), "Affair");
        assert_eq!(strip_determiner("Theatre Kids"), "Theatre Kids");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("Zak Spears"), 2);
        assert_eq!(word_count("  Zak  "), 1);
        assert_eq!(word_count(""), 0);
    }
}
