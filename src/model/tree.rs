//! Two-level category tree.

use super::DocumentRecord;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

/// Bucket for records that declare no category.
pub const OTHER_CATEGORY: &str = "Other";

/// Contents of one top-level category.
///
/// The shape is decided when the category is first created and never changes
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryNode {
    /// Records listed directly under the category
    Flat(Vec<DocumentRecord>),
    /// Records grouped by subcategory name
    Nested(BTreeMap<String, Vec<DocumentRecord>>),
}

impl CategoryNode {
    /// Check whether the node holds nested subcategories.
    pub fn is_nested(&self) -> bool {
        matches!(self, CategoryNode::Nested(_))
    }

    /// Total number of placed records, counting every subcategory.
    pub fn record_count(&self) -> usize {
        match self {
            CategoryNode::Flat(records) => records.len(),
            CategoryNode::Nested(subs) => subs.values().map(Vec::len).sum(),
        }
    }

    /// Number of subcategories (zero for flat nodes).
    pub fn subcategory_count(&self) -> usize {
        match self {
            CategoryNode::Flat(_) => 0,
            CategoryNode::Nested(subs) => subs.len(),
        }
    }

    /// Check whether the node holds no records.
    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }
}

/// A declaration that disagreed with the shape already chosen for its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeConflict {
    /// Category name
    pub category: String,
    /// File whose declaration was dropped
    pub file: String,
    /// Whether the existing bucket is nested (the dropped declaration was flat)
    pub existing_nested: bool,
}

/// Per-category counts for console summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// Category name
    pub name: String,
    /// Records placed under the category
    pub files: usize,
    /// Number of subcategories (zero for flat categories)
    pub subcategories: usize,
}

/// Category name → node mapping. Keys iterate in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTree {
    /// Top-level categories
    pub categories: BTreeMap<String, CategoryNode>,

    /// Declarations dropped because of a flat/nested mismatch
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicts: Vec<ShapeConflict>,
}

impl CategoryTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether the tree has no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of top-level categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Look up a top-level category.
    pub fn get(&self, category: &str) -> Option<&CategoryNode> {
        self.categories.get(category)
    }

    /// Iterate over categories in lexicographic order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, CategoryNode> {
        self.categories.iter()
    }

    /// Append a record to a flat category, creating it if needed.
    ///
    /// Returns `false` without placing the record if the category already
    /// exists in nested form.
    pub fn push_flat(&mut self, category: &str, record: &DocumentRecord) -> bool {
        let node = self
            .categories
            .entry(category.to_string())
            .or_insert_with(|| CategoryNode::Flat(Vec::new()));
        match node {
            CategoryNode::Flat(records) => {
                records.push(record.clone());
                true
            }
            CategoryNode::Nested(_) => false,
        }
    }

    /// Make sure `category` exists in nested form.
    ///
    /// Returns `false` if the category already exists as a flat list.
    pub fn ensure_nested(&mut self, category: &str) -> bool {
        let node = self
            .categories
            .entry(category.to_string())
            .or_insert_with(|| CategoryNode::Nested(BTreeMap::new()));
        node.is_nested()
    }

    /// Append a record under `category` / `subcategory`, creating both if
    /// needed.
    ///
    /// Returns `false` without placing the record if the category already
    /// exists as a flat list.
    pub fn push_nested(
        &mut self,
        category: &str,
        subcategory: &str,
        record: &DocumentRecord,
    ) -> bool {
        let node = self
            .categories
            .entry(category.to_string())
            .or_insert_with(|| CategoryNode::Nested(BTreeMap::new()));
        match node {
            CategoryNode::Nested(subs) => {
                subs.entry(subcategory.to_string())
                    .or_default()
                    .push(record.clone());
                true
            }
            CategoryNode::Flat(_) => false,
        }
    }

    /// Record a dropped declaration.
    pub fn add_conflict(&mut self, conflict: ShapeConflict) {
        self.conflicts.push(conflict);
    }

    /// Total number of placements across the tree.
    pub fn placement_count(&self) -> usize {
        self.categories.values().map(CategoryNode::record_count).sum()
    }

    /// Number of times a file was placed anywhere in the tree.
    pub fn placements_of(&self, file: &str) -> usize {
        fn count(records: &[DocumentRecord], file: &str) -> usize {
            records.iter().filter(|r| r.file == file).count()
        }

        self.categories
            .values()
            .map(|node| match node {
                CategoryNode::Flat(records) => count(records, file),
                CategoryNode::Nested(subs) => subs.values().map(|r| count(r, file)).sum(),
            })
            .sum()
    }

    /// Per-category counts, in lexicographic order with `Other` last.
    pub fn summary(&self) -> Vec<CategoryCount> {
        let mut rows: Vec<CategoryCount> = self
            .categories
            .iter()
            .filter(|(name, _)| name.as_str() != OTHER_CATEGORY)
            .map(|(name, node)| CategoryCount {
                name: name.clone(),
                files: node.record_count(),
                subcategories: node.subcategory_count(),
            })
            .collect();

        if let Some(other) = self.categories.get(OTHER_CATEGORY) {
            rows.push(CategoryCount {
                name: OTHER_CATEGORY.to_string(),
                files: other.record_count(),
                subcategories: other.subcategory_count(),
            });
        }

        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(file: &str, title: &str) -> DocumentRecord {
        DocumentRecord::new(file, title, Vec::new(), file)
    }

    #[test]
    fn test_push_flat_creates_bucket() {
        let mut tree = CategoryTree::new();
        assert!(tree.push_flat("Networking", &record("a.md", "Alpha")));
        assert!(tree.push_flat("Networking", &record("b.md", "Beta")));

        let node = tree.get("Networking").unwrap();
        assert!(!node.is_nested());
        assert_eq!(node.record_count(), 2);
    }

    #[test]
    fn test_push_nested_creates_subcategories() {
        let mut tree = CategoryTree::new();
        assert!(tree.push_nested("Linux", "Security", &record("a.md", "Alpha")));
        assert!(tree.push_nested("Linux", "Kernel", &record("a.md", "Alpha")));

        let node = tree.get("Linux").unwrap();
        assert!(node.is_nested());
        assert_eq!(node.subcategory_count(), 2);
        assert_eq!(tree.placements_of("a.md"), 2);
    }

    #[test]
    fn test_shape_is_fixed_on_creation() {
        let mut tree = CategoryTree::new();
        assert!(tree.push_flat("Linux", &record("a.md", "Alpha")));
        assert!(!tree.push_nested("Linux", "Security", &record("b.md", "Beta")));
        assert!(!tree.ensure_nested("Linux"));

        assert!(tree.ensure_nested("Cloud"));
        assert!(!tree.push_flat("Cloud", &record("c.md", "Gamma")));
        assert_eq!(tree.placement_count(), 1);
    }

    #[test]
    fn test_summary_puts_other_last() {
        let mut tree = CategoryTree::new();
        tree.push_flat(OTHER_CATEGORY, &record("c.md", "Gamma"));
        tree.push_flat("Zebra", &record("z.md", "Zed"));
        tree.push_nested("Alpha", "One", &record("a.md", "A"));

        let names: Vec<_> = tree.summary().into_iter().map(|row| row.name).collect();
        assert_eq!(names, vec!["Alpha", "Zebra", "Other"]);
    }

    #[test]
    fn test_tree_json_shape() {
        let mut tree = CategoryTree::new();
        tree.push_nested("Linux", "Security", &record("b.md", "Beta"));
        tree.push_flat("Networking", &record("a.md", "Alpha"));

        let value = serde_json::to_value(&tree).unwrap();
        assert!(value["categories"]["Linux"]["Security"].is_array());
        assert!(value["categories"]["Networking"].is_array());
        assert!(value.get("conflicts").is_none());
    }
}
