//! Catalog records as supplied by the catalog source.

use serde::{Deserialize, Serialize};

/// One catalog entry.
///
/// `code` is unique across a catalog. `units_per_box` and `shelf_life` are
/// carried through for display and never take part in scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuRecord {
    pub code: String,
    pub brand_line: String,
    pub flavor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units_per_box: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shelf_life: Option<String>,
}

impl SkuRecord {
    /// Create a record without the descriptive extras
    pub fn new(
        code: impl Into<String>,
        brand_line: impl Into<String>,
        flavor: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            brand_line: brand_line.into(),
            flavor: flavor.into(),
            units_per_box: None,
            shelf_life: None,
        }
    }

    /// Text that feeds the entry's token set: brand line, flavor, then code.
    pub fn index_text(&self) -> String {
        format!("{} {} {}", self.brand_line, self.flavor, self.code)
    }
}
