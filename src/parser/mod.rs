//! Markdown metadata parsing.

mod categories;
mod frontmatter;
mod options;
mod title;

pub use categories::{categories_from_frontmatter, normalize_categories, CATEGORIES_KEY};
pub use frontmatter::extract_frontmatter;
pub use options::{ErrorMode, ScanOptions};
pub use title::{extract_title, UNTITLED};
