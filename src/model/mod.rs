//! Data model for scanned documents and the category tree built from them.
//!
//! Records are produced by the catalog scan, grouped into a
//! [`CategoryTree`] by the organizer, and consumed by the renderers.

mod record;
mod tree;

pub use record::{CategoryDeclaration, DocumentRecord};
pub use tree::{CategoryCount, CategoryNode, CategoryTree, ShapeConflict, OTHER_CATEGORY};
