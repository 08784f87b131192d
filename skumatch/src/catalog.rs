//! Catalog sources
//!
//! The catalog is a JSON array of SKU records. It is read once per matcher
//! and validated before any index is built: an unreadable, malformed or
//! inconsistent catalog is an error, never an empty catalog.

use crate::interface::CatalogSource;
use crate::models::SkuRecord;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate SKU code {0:?}")]
    DuplicateCode(String),
    #[error("record #{position} has a blank SKU code")]
    BlankCode { position: usize },
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Read and validate a catalog file.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> CatalogResult<Vec<SkuRecord>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_catalog(&raw, &path.display().to_string())?;
    tracing::info!(path = %path.display(), records = records.len(), "catalog loaded");
    Ok(records)
}

/// Parse and validate catalog JSON. `origin` only shows up in errors.
pub fn parse_catalog(json: &str, origin: &str) -> CatalogResult<Vec<SkuRecord>> {
    let records: Vec<SkuRecord> =
        serde_json::from_str(json).map_err(|source| CatalogError::Json {
            origin: origin.to_string(),
            source,
        })?;
    validate_catalog(&records)?;
    Ok(records)
}

/// Codes must be non-blank and unique.
pub fn validate_catalog(records: &[SkuRecord]) -> CatalogResult<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        if record.code.trim().is_empty() {
            return Err(CatalogError::BlankCode { position });
        }
        if !seen.insert(record.code.as_str()) {
            return Err(CatalogError::DuplicateCode(record.code.clone()));
        }
    }
    Ok(())
}

/// Catalog stored as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for JsonFileCatalog {
    fn load_catalog(&self) -> CatalogResult<Vec<SkuRecord>> {
        load_catalog(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Records already in memory (tests, embedding callers).
impl CatalogSource for Vec<SkuRecord> {
    fn load_catalog(&self) -> CatalogResult<Vec<SkuRecord>> {
        validate_catalog(self)?;
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory catalog ({} records)", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_catalog() {
        let json = r#"[
            {"code": "OKFSZGRA", "brand_line": "OKF Sparkling Zero 350ml", "flavor": "Grape"},
            {"code": "OKFSZPEA", "brand_line": "OKF Sparkling Zero 350ml", "flavor": "Peach"}
        ]"#;
        let records = parse_catalog(json, "inline").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].code, "OKFSZPEA");
    }

    #[test]
    fn test_parse_empty_catalog() {
        assert!(parse_catalog("[]", "inline").unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed_json() {
        let err = parse_catalog("[{\"code\": ", "inline").unwrap_err();
        assert!(matches!(err, CatalogError::Json { .. }));
        assert!(err.to_string().contains("inline"));
    }

    #[test]
    fn test_parse_missing_required_field() {
        let err = parse_catalog(r#"[{"code": "A", "flavor": "C"}]"#, "inline").unwrap_err();
        assert!(matches!(err, CatalogError::Json { .. }));
    }

    #[test]
    fn test_validate_duplicate_code() {
        let records = vec![
            SkuRecord::new("A", "Brand", "Grape"),
            SkuRecord::new("B", "Brand", "Peach"),
            SkuRecord::new("A", "Brand", "Lime"),
        ];
        match validate_catalog(&records) {
            Err(CatalogError::DuplicateCode(code)) => assert_eq!(code, "A"),
            other => panic!("expected duplicate code error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_blank_code() {
        let records = vec![
            SkuRecord::new("A", "Brand", "Grape"),
            SkuRecord::new("  ", "Brand", "Peach"),
        ];
        assert!(matches!(
            validate_catalog(&records),
            Err(CatalogError::BlankCode { position: 1 })
        ));
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_catalog(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_json_file_catalog_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"code": "LOWHEKIC", "brand_line": "Lotte Hershey's Kisses 146g", "flavor": "Cookies & Cream", "units_per_box": "12"}}]"#
        )
        .unwrap();

        let source = JsonFileCatalog::new(file.path());
        let records = source.load_catalog().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].units_per_box.as_deref(), Some("12"));
        assert_eq!(source.describe(), file.path().display().to_string());
    }

    #[test]
    fn test_in_memory_source_validates() {
        let records = vec![SkuRecord::new("A", "x", "y"), SkuRecord::new("A", "x", "z")];
        assert!(records.load_catalog().is_err());
    }
}
