//! JSON rendering of the category tree.

use crate::error::{Error, Result};
use crate::model::CategoryTree;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a category tree to JSON.
///
/// Categories map to an array of records (flat) or to an object of
/// subcategory arrays (nested). A `conflicts` array is added only when
/// declarations were dropped.
pub fn to_json(tree: &CategoryTree, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(tree),
        JsonFormat::Compact => serde_json::to_string(tree),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
