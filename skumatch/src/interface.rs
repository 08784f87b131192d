//! Public interface of the matcher.
//!
//! Result types handed to callers, the crate error type, and the
//! `CatalogSource` seam through which the catalog is supplied.

use serde::Serialize;
use thiserror::Error;

use crate::models::SkuRecord;

// ═══════════════════════════════════════════════════════════════════════════════
// RECORDS (Structs)
// ═══════════════════════════════════════════════════════════════════════════════

/// One scored catalog entry. Built fresh per query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub code: String,
    pub brand_line: String,
    pub flavor: String,
    /// Always within `[0.0, 1.0]`
    pub score: f64,
}

impl MatchResult {
    pub(crate) fn from_record(record: &SkuRecord, score: f64) -> Self {
        Self {
            code: record.code.clone(),
            brand_line: record.brand_line.clone(),
            flavor: record.flavor.clone(),
            score,
        }
    }
}

/// Best match plus the next candidates in rank order.
///
/// `best` is `None` only when the catalog is empty. A present `best` may
/// still carry a score of zero; deciding what counts as "no match" is up
/// to the caller.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SkuMatch {
    #[serde(rename = "match")]
    pub best: Option<MatchResult>,
    pub alternatives: Vec<MatchResult>,
}

impl SkuMatch {
    /// True when there were no candidates at all
    pub fn is_empty(&self) -> bool {
        self.best.is_none()
    }

    /// Codes of `best` followed by the alternatives
    pub fn codes(&self) -> Vec<&str> {
        self.best
            .iter()
            .chain(self.alternatives.iter())
            .map(|m| m.code.as_str())
            .collect()
    }
}

/// Error type for matcher operations.
///
/// Payloads are strings so a failed index build can be memoized and handed
/// to every later caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkuMatchError {
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),
    #[error("Catalog malformed: {0}")]
    CatalogMalformed(String),
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
}

// ═══════════════════════════════════════════════════════════════════════════════
// SERVICE INTERFACE
// ═══════════════════════════════════════════════════════════════════════════════

/// Supplies the catalog. Called at most once per `SkuMatcher`.
pub trait CatalogSource: Send + Sync {
    /// Read every record. Failure here is fatal for the matcher.
    fn load_catalog(&self) -> Result<Vec<SkuRecord>, crate::catalog::CatalogError>;

    /// Human-readable origin, used in log lines
    fn describe(&self) -> String;
}

impl From<crate::catalog::CatalogError> for SkuMatchError {
    fn from(e: crate::catalog::CatalogError) -> Self {
        use crate::catalog::CatalogError;
        match e {
            CatalogError::Io { .. } => SkuMatchError::CatalogUnavailable(e.to_string()),
            CatalogError::Json { .. } => SkuMatchError::CatalogMalformed(e.to_string()),
            CatalogError::DuplicateCode(_) | CatalogError::BlankCode { .. } => {
                SkuMatchError::InvalidCatalog(e.to_string())
            }
        }
    }
}
