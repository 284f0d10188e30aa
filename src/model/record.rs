//! Per-file records and their category declarations.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Metadata extracted from one scanned Markdown file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// File name relative to the scanned directory (e.g. `"linux.md"`)
    pub file: String,

    /// Display title, taken from the first level-1 heading
    pub title: String,

    /// Category declarations, in frontmatter order
    pub categories: Vec<CategoryDeclaration>,

    /// Full path the record was read from
    pub path: PathBuf,
}

impl DocumentRecord {
    /// Create a new record.
    pub fn new(
        file: impl Into<String>,
        title: impl Into<String>,
        categories: Vec<CategoryDeclaration>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            file: file.into(),
            title: title.into(),
            categories,
            path: path.into(),
        }
    }

    /// Whether the record declares no categories at all.
    pub fn is_uncategorized(&self) -> bool {
        self.categories.is_empty()
    }

    /// Markdown link to the file, e.g. `[Title](file.md)`.
    pub fn link(&self) -> String {
        format!("[{}]({})", self.title, self.file)
    }
}

/// A single category tag, normalized from the frontmatter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CategoryDeclaration {
    /// `categories: Networking`
    Simple { name: String },

    /// `categories: [{Linux: Security}]`
    NestedSingle { main: String, sub: String },

    /// `categories: [{Linux: [Security, Kernel]}]`
    NestedList { main: String, subs: Vec<String> },
}

impl CategoryDeclaration {
    /// Create a flat declaration.
    pub fn simple(name: impl Into<String>) -> Self {
        CategoryDeclaration::Simple { name: name.into() }
    }

    /// Create a nested declaration with one subcategory.
    pub fn nested(main: impl Into<String>, sub: impl Into<String>) -> Self {
        CategoryDeclaration::NestedSingle {
            main: main.into(),
            sub: sub.into(),
        }
    }

    /// Create a nested declaration with several subcategories.
    pub fn nested_list<I, S>(main: impl Into<String>, subs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CategoryDeclaration::NestedList {
            main: main.into(),
            subs: subs.into_iter().map(Into::into).collect(),
        }
    }

    /// Top-level category name.
    pub fn main(&self) -> &str {
        match self {
            CategoryDeclaration::Simple { name } => name,
            CategoryDeclaration::NestedSingle { main, .. } => main,
            CategoryDeclaration::NestedList { main, .. } => main,
        }
    }

    /// Whether this declaration uses the nested (two-level) form.
    pub fn is_nested(&self) -> bool {
        !matches!(self, CategoryDeclaration::Simple { .. })
    }

    /// Subcategory names; empty for flat declarations.
    pub fn subcategories(&self) -> Vec<&str> {
        match self {
            CategoryDeclaration::Simple { .. } => Vec::new(),
            CategoryDeclaration::NestedSingle { sub, .. } => vec![sub.as_str()],
            CategoryDeclaration::NestedList { subs, .. } => {
                subs.iter().map(String::as_str).collect()
            }
        }
    }
}
