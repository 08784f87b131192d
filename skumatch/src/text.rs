//! Text normalization for OCR input and catalog fields.
//!
//! Both sides of a comparison go through [`token_set`]: catalog records at
//! index time and OCR text at query time. Any divergence between the two
//! paths makes Jaccard scores meaningless, so there is exactly one pipeline:
//! lowercase -> punctuation to spaces -> whitespace split -> synonym expansion.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Characters replaced by a single space during normalization.
/// Includes typographic quotes, the ideographic comma and the middle dot
/// that Korean package labels use as separators.
const PUNCTUATION: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`',
    '~', '(', ')', '[', ']', '"', '\'', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}', '、',
    '·',
];

/// Korean label terms and the English catalog words they stand for.
const KO_TO_EN_SYNONYMS: &[(&str, &str)] = &[
    ("샤인머스캣", "shine muscat"),
    ("포도", "grape"),
    ("복숭아", "peach"),
    ("라임", "lime"),
    ("유자", "yuzu"),
    ("쿠키앤크림", "cookies cream"),
    ("커피", "coffee"),
    ("카페라떼", "cafe latte"),
    ("카페라테", "cafe latte"),
    ("녹차", "green tea"),
    ("바닐라", "vanilla"),
];

static SYNONYMS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| KO_TO_EN_SYNONYMS.iter().copied().collect());

/// Digits immediately followed by a unit. Unanchored: "350ml" and
/// "x350mlx" both match.
pub(crate) static VOLUME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[0-9]+(ml|g|l)").unwrap());

/// Lowercase and replace every punctuation character with a space.
pub fn normalize(text: &str) -> String {
    text.to_lowercase().replace(PUNCTUATION, " ")
}

/// Normalize, then split into non-empty words in reading order.
/// Duplicates are kept.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Append the English words of every dictionary hit. Original tokens are
/// never dropped; the result keeps first occurrences only.
pub fn expand_synonyms(tokens: &[String]) -> Vec<String> {
    let expansions = tokens
        .iter()
        .filter_map(|token| SYNONYMS.get(token.as_str()))
        .flat_map(|phrase| phrase.split(' '))
        .map(str::to_string);

    let mut seen = HashSet::new();
    tokens
        .iter()
        .cloned()
        .chain(expansions)
        .filter(|token| seen.insert(token.clone()))
        .collect()
}

/// The canonical token set for a piece of text.
pub fn token_set(text: &str) -> HashSet<String> {
    expand_synonyms(&tokenize(text)).into_iter().collect()
}

/// Pull quantity tokens ("350ml", "146g", "1l") out of a token set.
///
/// Each token is reduced to its ASCII letters and digits first, so
/// "350ml입니다" still yields "350ml".
pub fn detect_volume_tokens(tokens: &HashSet<String>) -> HashSet<String> {
    tokens
        .iter()
        .filter_map(|token| {
            let stripped: String = token.chars().filter(char::is_ascii_alphanumeric).collect();
            VOLUME_REGEX
                .find(&stripped)
                .map(|m| m.as_str().to_string())
        })
        .collect()
}
