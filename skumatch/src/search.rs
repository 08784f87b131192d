//! Ranking of the whole index against one OCR query.
//!
//! Every entry is scored (rayon, indexed so catalog order survives the
//! fan-out), then stably sorted by descending score. Equal scores keep
//! catalog order, so the first-registered SKU wins a tie. Nothing is
//! filtered out: the ranking is total over the catalog.

use crate::indexer::{IndexedEntry, MatchIndex};
use crate::interface::{MatchResult, SkuMatch};
use crate::ranking::{score_breakdown, ScoreBreakdown};
use crate::text::{detect_volume_tokens, token_set};
use rayon::prelude::*;
use std::collections::HashSet;

/// Number of runner-up results returned next to the best match.
pub const MAX_ALTERNATIVES: usize = 3;

/// Prepared query: token set plus the quantity tokens found in it.
#[derive(Debug, Clone)]
pub struct Query {
    pub tokens: HashSet<String>,
    pub volume_tokens: HashSet<String>,
}

impl Query {
    pub fn parse(ocr_text: &str) -> Self {
        let tokens = token_set(ocr_text);
        let volume_tokens = detect_volume_tokens(&tokens);
        Self {
            tokens,
            volume_tokens,
        }
    }
}

/// An entry with its score components, in rank order.
#[derive(Debug, Clone)]
pub struct RankedEntry<'a> {
    pub entry: &'a IndexedEntry,
    pub breakdown: ScoreBreakdown,
    pub score: f64,
}

impl RankedEntry<'_> {
    pub fn to_result(&self) -> MatchResult {
        MatchResult::from_record(self.entry.record(), self.score)
    }
}

/// Score every entry and sort best first.
pub fn rank_entries<'a>(index: &'a MatchIndex, query: &Query) -> Vec<RankedEntry<'a>> {
    let mut ranked: Vec<RankedEntry<'a>> = index
        .entries()
        .par_iter()
        .map(|entry| {
            let breakdown = score_breakdown(entry, &query.tokens, &query.volume_tokens);
            RankedEntry {
                entry,
                breakdown,
                score: breakdown.total(),
            }
        })
        .collect();

    // Stable: ties stay in catalog order
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Full ranking as public results.
pub fn rank(index: &MatchIndex, query: &Query) -> Vec<MatchResult> {
    rank_entries(index, query)
        .iter()
        .map(RankedEntry::to_result)
        .collect()
}

/// Best match and up to `MAX_ALTERNATIVES` runners-up from a ranking.
/// Only those entries are turned into results.
pub fn select_matches(ranked: &[RankedEntry<'_>]) -> SkuMatch {
    let mut head = ranked
        .iter()
        .take(1 + MAX_ALTERNATIVES)
        .map(RankedEntry::to_result);
    let best = head.next();
    let alternatives = head.collect();
    SkuMatch { best, alternatives }
}
