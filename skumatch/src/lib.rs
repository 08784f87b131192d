//! SKU matching core - identify a catalog entry from package OCR text
//!
//! Mixed-script OCR output is normalized into a token set (lowercase,
//! punctuation stripped, Korean flavor terms expanded to their English
//! catalog words) and every catalog entry is scored against it: Jaccard
//! similarity plus fixed hint, volume and brand bonuses and a flavor-conflict
//! penalty. The result is a deterministic ranking: a best match and up to
//! three alternatives.
//!
//! The index is built once per [`SkuMatcher`] and shared by all queries.

pub mod catalog;
pub mod config;
pub mod indexer;
pub mod interface;
pub mod models;
pub mod ranking;
pub mod search;
mod store;
pub mod text;

pub use catalog::{CatalogError, JsonFileCatalog};
pub use interface::*;
pub use models::SkuRecord;
pub use store::SkuMatcher;
