//! SkuMatcher - the matching service
//!
//! Owns a catalog source and the index derived from it.
//!
//! Concurrency Model:
//! - The index is built at most once, on first use, behind a `OnceCell`.
//!   Callers arriving while the build runs block until it finishes and
//!   then see the same index.
//! - The build outcome is memoized, failures included: a broken catalog is
//!   reported to every caller without being re-read.
//! - After the build, queries only read shared immutable data. No locks
//!   are taken on the query path.

use crate::catalog::JsonFileCatalog;
use crate::indexer::MatchIndex;
use crate::interface::{CatalogSource, MatchResult, SkuMatch, SkuMatchError};
use crate::models::SkuRecord;
use crate::search::{self, Query, RankedEntry};
use once_cell::sync::OnceCell;
use std::path::PathBuf;
use std::time::Instant;

/// Thread-safe SKU matcher. Share it behind an `Arc` or a reference.
pub struct SkuMatcher {
    source: Box<dyn CatalogSource>,
    index: OnceCell<Result<MatchIndex, SkuMatchError>>,
}

impl SkuMatcher {
    /// Matcher over any catalog source. Nothing is loaded until the first
    /// query or an explicit `index()` call.
    pub fn new(source: impl CatalogSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            index: OnceCell::new(),
        }
    }

    /// Matcher reading a JSON catalog file
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(JsonFileCatalog::new(path))
    }

    /// Matcher over records already in memory
    pub fn from_records(records: Vec<SkuRecord>) -> Self {
        Self::new(records)
    }

    /// The shared index, built on first call.
    pub fn index(&self) -> Result<&MatchIndex, SkuMatchError> {
        self.index
            .get_or_init(|| self.build_index())
            .as_ref()
            .map_err(|e| e.clone())
    }

    /// Whether the index has been built (successfully or not)
    pub fn is_initialized(&self) -> bool {
        self.index.get().is_some()
    }

    fn build_index(&self) -> Result<MatchIndex, SkuMatchError> {
        let start = Instant::now();
        let origin = self.source.describe();

        let records = self.source.load_catalog().map_err(|e| {
            tracing::error!(source = %origin, error = %e, "catalog load failed");
            SkuMatchError::from(e)
        })?;

        let index = MatchIndex::build(records);
        tracing::info!(
            source = %origin,
            entries = index.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "match index built"
        );
        Ok(index)
    }

    /// Best match and up to three alternatives for a piece of OCR text.
    ///
    /// Only fails when the catalog cannot be loaded. An empty catalog gives
    /// an empty `SkuMatch`.
    pub fn match_sku(&self, ocr_text: &str) -> Result<SkuMatch, SkuMatchError> {
        let ranked = self.explain(ocr_text)?;
        let result = search::select_matches(&ranked);
        match &result.best {
            Some(best) => tracing::debug!(
                code = %best.code,
                score = best.score,
                alternatives = result.alternatives.len(),
                "sku matched"
            ),
            None => tracing::debug!("no candidates: catalog is empty"),
        }
        Ok(result)
    }

    /// The whole catalog ranked against the OCR text, best first.
    pub fn rank(&self, ocr_text: &str) -> Result<Vec<MatchResult>, SkuMatchError> {
        let index = self.index()?;
        let query = Self::parse_query(ocr_text);
        Ok(search::rank(index, &query))
    }

    /// Ranking with per-entry score components.
    pub fn explain<'a>(&'a self, ocr_text: &str) -> Result<Vec<RankedEntry<'a>>, SkuMatchError> {
        let index = self.index()?;
        Ok(search::rank_entries(index, &Self::parse_query(ocr_text)))
    }

    fn parse_query(ocr_text: &str) -> Query {
        let query = Query::parse(ocr_text);
        tracing::debug!(
            chars = ocr_text.chars().count(),
            tokens = query.tokens.len(),
            volume_tokens = query.volume_tokens.len(),
            "parsed query"
        );
        query
    }
}
