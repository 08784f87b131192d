//! Scoring of a catalog entry against a query.
//!
//! Base score is the Jaccard similarity of the two token sets. Fixed
//! adjustments are then layered on top:
//!
//! 1. hint bonus: each entry hint echoed by the query
//! 2. volume bonus: each entry hint that is a quantity found in the query
//! 3. brand boost: brand named by both entry and query
//! 4. flavor penalty: the query names a flavor the entry does not have
//!
//! The sum is clamped to `[0, 1]`. All weights are constants; identical
//! input always yields an identical score.

use crate::indexer::IndexedEntry;
use std::collections::HashSet;
use std::hash::Hash;

/// Bonus per entry hint present in the query tokens
pub const HINT_BONUS: f64 = 0.03;
/// Bonus per entry hint present in the query's volume tokens
pub const VOLUME_BONUS: f64 = 0.04;
/// Applied once when the query names a flavor the entry lacks
pub const FLAVOR_CONFLICT_PENALTY: f64 = 0.1;

/// Brand keyword -> boost when both entry and query contain it.
pub const BRAND_BOOSTS: &[(&str, f64)] = &[
    ("okf", 0.05),
    ("hersheys", 0.05),
    ("hershey", 0.05),
    ("starbucks", 0.05),
    ("lotte", 0.04),
    ("pepsico", 0.03),
];

/// Words that pin down a flavor, roast or variant.
pub const FLAVOR_KEYWORDS: &[&str] = &[
    "grape", "peach", "yuzu", "lime", "muscat", "shine", "milk", "vanilla", "mocha", "cookies",
    "cream", "matcha", "green", "tea", "caramel", "hazelnut", "pike", "place", "roast", "dark",
    "chocolate", "americano", "sweetened",
];

/// Components of an entry's score, kept for explanation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreBreakdown {
    pub jaccard: f64,
    pub hint_bonus: f64,
    pub volume_bonus: f64,
    pub brand_boost: f64,
    /// Zero or `FLAVOR_CONFLICT_PENALTY`, stored as a positive amount
    pub flavor_penalty: f64,
}

impl ScoreBreakdown {
    /// Final score: sum of components clamped to `[0, 1]`.
    pub fn total(&self) -> f64 {
        let raw = self.jaccard + self.hint_bonus + self.volume_bonus + self.brand_boost
            - self.flavor_penalty;
        raw.clamp(0.0, 1.0)
    }
}

/// `|A ∩ B| / |A ∪ B|`, or 0 when both sets are empty.
pub fn jaccard<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Score an entry and keep every component.
pub fn score_breakdown(
    entry: &IndexedEntry,
    query_tokens: &HashSet<String>,
    volume_tokens: &HashSet<String>,
) -> ScoreBreakdown {
    let jaccard = jaccard(entry.tokens(), query_tokens);

    let mut hint_bonus = 0.0;
    let mut volume_bonus = 0.0;
    for hint in entry.hints() {
        if query_tokens.contains(hint) {
            hint_bonus += HINT_BONUS;
        }
        if volume_tokens.contains(hint) {
            volume_bonus += VOLUME_BONUS;
        }
    }

    let brand_boost: f64 = BRAND_BOOSTS
        .iter()
        .filter(|(brand, _)| entry.tokens().contains(*brand) && query_tokens.contains(*brand))
        .map(|(_, boost)| boost)
        .sum();

    let flavor_penalty = if has_flavor_conflict(entry.flavor_tokens(), query_tokens) {
        FLAVOR_CONFLICT_PENALTY
    } else {
        0.0
    };

    ScoreBreakdown {
        jaccard,
        hint_bonus,
        volume_bonus,
        brand_boost,
        flavor_penalty,
    }
}

/// Score an entry against a query. Always within `[0, 1]`.
pub fn score_entry(
    entry: &IndexedEntry,
    query_tokens: &HashSet<String>,
    volume_tokens: &HashSet<String>,
) -> f64 {
    score_breakdown(entry, query_tokens, volume_tokens).total()
}

/// True when any flavor keyword in the query is missing from the entry's
/// flavor. One conflict is enough; more do not add up.
fn has_flavor_conflict(flavor_tokens: &HashSet<String>, query_tokens: &HashSet<String>) -> bool {
    FLAVOR_KEYWORDS
        .iter()
        .any(|keyword| query_tokens.contains(*keyword) && !flavor_tokens.contains(*keyword))
}
