//! Rendering module for converting the category tree to output formats.

mod json;
mod markdown;
mod options;

pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, TocRenderer, TOC_HEADING};
pub use options::RenderOptions;
