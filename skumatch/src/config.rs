//! Catalog location resolution.
//!
//! Precedence: explicit path > `SKU_CATALOG_PATH` > `data/sku_master.json`
//! under the working directory.

use std::path::PathBuf;

/// Environment variable naming the catalog file
pub const CATALOG_PATH_ENV: &str = "SKU_CATALOG_PATH";

/// Catalog path used when nothing else is configured, relative to the
/// working directory
pub const DEFAULT_CATALOG_PATH: &str = "data/sku_master.json";

/// Pick the catalog file to load.
pub fn resolve_catalog_path(explicit: Option<PathBuf>) -> PathBuf {
    resolve_with_env(explicit, std::env::var_os(CATALOG_PATH_ENV).map(PathBuf::from))
}

fn resolve_with_env(explicit: Option<PathBuf>, from_env: Option<PathBuf>) -> PathBuf {
    explicit
        .or(from_env.filter(|p| !p.as_os_str().is_empty()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH))
}
