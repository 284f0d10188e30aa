//! Splicing the rendered table of contents into a README.
//!
//! An existing block starts at a line reading exactly
//! [`TOC_HEADING`](crate::render::TOC_HEADING) and runs until the line break
//! before the next `## ` heading, or to the end of the document. When no block
//! exists yet, the table of contents goes right before the anchor text
//! (`## Why?` by default), or at the end of the document.

use crate::error::{Error, Result};
use crate::render::TOC_HEADING;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Default text before which a new table of contents is inserted.
pub const DEFAULT_ANCHOR: &str = "## Why?";

fn heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"(?m)^{}\r?$", regex::escape(TOC_HEADING)))
            .expect("heading pattern is valid")
    })
}

/// Options for patching a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOptions {
    /// Fallback insertion point when the document has no table of contents
    pub anchor: String,
}

impl PatchOptions {
    /// Create new patch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback insertion anchor.
    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = anchor.into();
        self
    }
}

impl Default for PatchOptions {
    fn default() -> Self {
        Self {
            anchor: DEFAULT_ANCHOR.to_string(),
        }
    }
}

/// Where the table of contents ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// An existing block was replaced
    Replaced,
    /// Inserted before the anchor text
    BeforeAnchor,
    /// Appended to the end of the document
    Appended,
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Placement::Replaced => write!(f, "replaced existing table of contents"),
            Placement::BeforeAnchor => write!(f, "inserted before anchor"),
            Placement::Appended => write!(f, "appended to end of document"),
        }
    }
}

/// A patched document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
    /// New document content
    pub content: String,
    /// Where the table of contents was placed
    pub placement: Placement,
    /// Whether the content differs from the input
    pub changed: bool,
}

/// Compute the patched document without touching the filesystem.
pub fn patch_document(content: &str, toc: &str, options: &PatchOptions) -> Patched {
    let (new_content, placement) = if let Some((start, end)) = find_toc_block(content) {
        let mut patched = String::with_capacity(content.len() + toc.len());
        patched.push_str(&content[..start]);
        patched.push_str(toc);
        patched.push_str(&content[end..]);
        (patched, Placement::Replaced)
    } else if let Some(index) = find_anchor(content, &options.anchor) {
        let patched = format!("{}\n\n{}\n{}", &content[..index], toc, &content[index..]);
        (patched, Placement::BeforeAnchor)
    } else {
        let head = content.trim_end();
        let patched = if head.is_empty() {
            toc.to_string()
        } else {
            format!("{}\n\n{}", head, toc)
        };
        (patched, Placement::Appended)
    };

    Patched {
        changed: new_content != content,
        content: new_content,
        placement,
    }
}

/// Byte range of the first existing table of contents block.
pub fn find_toc_block(content: &str) -> Option<(usize, usize)> {
    let heading = heading_regex().find(content)?;
    let rest = &content[heading.end()..];
    let end = rest
        .find("\n## ")
        .map_or(content.len(), |offset| heading.end() + offset);
    Some((heading.start(), end))
}

fn find_anchor(content: &str, anchor: &str) -> Option<usize> {
    if anchor.is_empty() {
        return None;
    }
    content.find(anchor)
}

/// Patch the README at `path` in place.
pub fn update_readme<P: AsRef<Path>>(
    path: P,
    toc: &str,
    options: &PatchOptions,
) -> Result<Patched> {
    let path = path.as_ref();
    let content = read_readme(path)?;
    let patched = patch_document(&content, toc, options);

    fs::write(path, &patched.content).map_err(|source| Error::WriteFile {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("{}: {}", path.display(), patched.placement);

    Ok(patched)
}

/// Check whether the README at `path` already contains `toc` as generated.
pub fn is_up_to_date<P: AsRef<Path>>(
    path: P,
    toc: &str,
    options: &PatchOptions,
) -> Result<bool> {
    let content = read_readme(path.as_ref())?;
    Ok(!patch_document(&content, toc, options).changed)
}

fn read_readme(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| Error::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| Error::Encoding {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOC: &str = "## Table of Contents\n\n* Other\n  *  [Gamma](c.md)\n";

    #[test]
    fn test_replace_block_before_next_heading() {
        let readme = "# Notes\n\n## Table of Contents\n\n* Old\n\n## Installation\n\nrun it\n";
        let patched = patch_document(readme, TOC, &PatchOptions::default());

        assert_eq!(patched.placement, Placement::Replaced);
        assert_eq!(
            patched.content,
            format!("# Notes\n\n{}\n## Installation\n\nrun it\n", TOC)
        );
    }

    #[test]
    fn test_replace_block_at_end_of_document() {
        let readme = "# Notes\n\n## Table of Contents\n\n* Old\n  * stale\n\n";
        let patched = patch_document(readme, TOC, &PatchOptions::default());
        assert_eq!(patched.content, format!("# Notes\n\n{}", TOC));
    }

    #[test]
    fn test_insert_before_anchor() {
        let readme = "# Notes\n\nSome description.\n\n## Why?\n\nBecause.\n";
        let patched = patch_document(readme, TOC, &PatchOptions::default());

        assert_eq!(patched.placement, Placement::BeforeAnchor);
        assert!(patched
            .content
            .starts_with("# Notes\n\nSome description.\n\n"));
        assert_eq!(
            patched.content,
            format!("# Notes\n\nSome description.\n\n\n\n{}\n## Why?\n\nBecause.\n", TOC)
        );
    }

    #[test]
    fn test_append_when_no_anchor() {
        let readme = "# Notes\n\nDescription.\n\n\n";
        let patched = patch_document(readme, TOC, &PatchOptions::default());

        assert_eq!(patched.placement, Placement::Appended);
        assert_eq!(patched.content, format!("# Notes\n\nDescription.\n\n{}", TOC));
    }

    #[test]
    fn test_append_to_empty_document() {
        let patched = patch_document("", TOC, &PatchOptions::default());
        assert_eq!(patched.content, TOC);
    }

    #[test]
    fn test_custom_anchor() {
        let readme = "# Notes\n\n## Usage\n";
        let options = PatchOptions::new().with_anchor("## Usage");
        let patched = patch_document(readme, TOC, &options);
        assert_eq!(patched.placement, Placement::BeforeAnchor);
        assert!(patched.content.ends_with(&format!("{}\n## Usage\n", TOC)));
    }

    #[test]
    fn test_patch_is_idempotent() {
        let readmes = [
            "# Notes\n\n## Table of Contents\n\n* Old\n\n## Installation\n",
            "# Notes\n\nIntro.\n\n## Why?\n\nBecause.\n",
            "# Notes\n\nIntro.\n",
            "# Notes\n\n## Table of Contents\n",
        ];
        let tocs = [TOC, "## Table of Contents\n\n* Tools\n  *  [A](a.md)\n\n"];

        for readme in readmes {
            for toc in tocs {
                let once = patch_document(readme, toc, &PatchOptions::default());
                let twice = patch_document(&once.content, toc, &PatchOptions::default());
                assert_eq!(once.content, twice.content, "readme: {:?}", readme);
                assert!(!twice.changed);
                assert_eq!(twice.placement, Placement::Replaced);
            }
        }
    }

    #[test]
    fn test_heading_must_be_a_whole_line() {
        let readme = "### Table of Contents\n\nIntro.\n";
        assert!(find_toc_block(readme).is_none());

        let readme = "## Table of Contents and more\n";
        assert!(find_toc_block(readme).is_none());
    }

    #[test]
    fn test_only_first_block_is_replaced() {
        let readme = "## Table of Contents\n\nA\n\n## Middle\n\n## Table of Contents\n\nB\n";
        let patched = patch_document(readme, TOC, &PatchOptions::default());
        assert_eq!(
            patched.content,
            format!("{}\n## Middle\n\n## Table of Contents\n\nB\n", TOC)
        );
    }
}
