//! Match index
//!
//! Every catalog record is turned into an `IndexedEntry` once: its full token
//! set, the hint tokens that earn bonuses, and its flavor tokens for conflict
//! detection. The index is immutable after construction and safe to share
//! across threads.

use crate::models::SkuRecord;
use crate::text::{normalize, token_set, VOLUME_REGEX};
use std::collections::HashSet;

/// Brand-line substrings that mark a token as a category hint.
const CATEGORY_HINTS: &[&str] = &["sparkling", "coffee", "frapp"];

/// A catalog record with its pre-computed token sets.
#[derive(Debug, Clone)]
pub struct IndexedEntry {
    record: SkuRecord,
    tokens: HashSet<String>,
    hints: HashSet<String>,
    flavor_tokens: HashSet<String>,
}

impl IndexedEntry {
    pub fn new(record: SkuRecord) -> Self {
        let tokens = token_set(&record.index_text());
        let hints = extract_hints(&record);
        let flavor_tokens = token_set(&record.flavor);
        Self {
            record,
            tokens,
            hints,
            flavor_tokens,
        }
    }

    pub fn record(&self) -> &SkuRecord {
        &self.record
    }

    /// Tokens of brand line, flavor and code, synonym-expanded
    pub fn tokens(&self) -> &HashSet<String> {
        &self.tokens
    }

    /// Volume and category tokens of the brand line plus every flavor word
    pub fn hints(&self) -> &HashSet<String> {
        &self.hints
    }

    pub fn flavor_tokens(&self) -> &HashSet<String> {
        &self.flavor_tokens
    }
}

/// Collect the tokens that earn hint and volume bonuses.
///
/// Brand-line tokens qualify when they contain a quantity ("350ml") or a
/// category word; flavor tokens always qualify.
pub fn extract_hints(record: &SkuRecord) -> HashSet<String> {
    let brand = normalize(&record.brand_line);
    let brand_hints = brand.split_whitespace().filter(|token| {
        VOLUME_REGEX.is_match(token) || CATEGORY_HINTS.iter().any(|c| token.contains(c))
    });

    let flavor = normalize(&record.flavor);
    brand_hints
        .chain(flavor.split_whitespace())
        .map(str::to_string)
        .collect()
}

/// Read-only collection of indexed entries in catalog order.
#[derive(Debug, Clone, Default)]
pub struct MatchIndex {
    entries: Vec<IndexedEntry>,
}

impl MatchIndex {
    /// Index every record. Catalog order is kept: ties in ranking fall back
    /// to it.
    pub fn build(records: Vec<SkuRecord>) -> Self {
        let entries = records.into_iter().map(IndexedEntry::new).collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[IndexedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
