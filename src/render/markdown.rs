//! Markdown rendering of the category tree.

use crate::model::{CategoryNode, CategoryTree, DocumentRecord, OTHER_CATEGORY};

use super::RenderOptions;

/// Heading that opens the generated block.
pub const TOC_HEADING: &str = "## Table of Contents";

/// Render the tree as a Markdown table of contents.
pub fn to_markdown(tree: &CategoryTree, options: &RenderOptions) -> String {
    TocRenderer::new(options.clone()).render(tree)
}

/// Table of contents renderer.
///
/// Categories and subcategories are listed in lexicographic order, records by
/// title (ties keep their scan order). [`OTHER_CATEGORY`] always comes last
/// and is omitted when empty.
pub struct TocRenderer {
    options: RenderOptions,
}

impl TocRenderer {
    /// Create a new renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a tree to Markdown.
    pub fn render(&self, tree: &CategoryTree) -> String {
        let mut output = String::new();
        output.push_str(TOC_HEADING);
        output.push_str("\n\n");

        for (name, node) in tree.iter() {
            if name != OTHER_CATEGORY {
                self.render_category(&mut output, name, node, true);
            }
        }

        if let Some(other) = tree.get(OTHER_CATEGORY) {
            if !other.is_empty() {
                self.render_category(&mut output, OTHER_CATEGORY, other, false);
            }
        }

        output
    }

    fn render_category(
        &self,
        output: &mut String,
        name: &str,
        node: &CategoryNode,
        trailing_blank: bool,
    ) {
        self.push_bullet(output, 0, name);

        match node {
            CategoryNode::Nested(subcategories) => {
                for (sub, records) in subcategories {
                    self.push_bullet(output, 1, sub);
                    self.render_records(output, 2, records);
                    output.push('\n');
                }
            }
            CategoryNode::Flat(records) => {
                self.render_records(output, 1, records);
                if trailing_blank {
                    output.push('\n');
                }
            }
        }
    }

    fn render_records(&self, output: &mut String, depth: usize, records: &[DocumentRecord]) {
        let mut sorted: Vec<&DocumentRecord> = records.iter().collect();
        sorted.sort_by(|a, b| a.title.cmp(&b.title));

        for record in sorted {
            // Link entries carry a second space after the marker.
            self.push_bullet(output, depth, &format!(" {}", record.link()));
        }
    }

    fn push_bullet(&self, output: &mut String, depth: usize, text: &str) {
        output.push_str(&" ".repeat(depth * self.options.indent_width));
        output.push(self.options.list_marker);
        output.push(' ');
        output.push_str(text);
        output.push('\n');
    }
}
