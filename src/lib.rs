//! # mdtoc
//!
//! Categorized table of contents generation for a directory of Markdown notes.
//!
//! Each note may declare categories in its YAML frontmatter. The notes are
//! grouped into a two-level category tree, rendered as a Markdown bullet list,
//! and spliced into the directory's README.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mdtoc::TocGenerator;
//!
//! fn main() -> mdtoc::Result<()> {
//!     let generator = TocGenerator::new();
//!
//!     // Render without touching the README
//!     let result = generator.build("notes")?;
//!     println!("{}", result.toc);
//!
//!     // Or scan, render and patch in one go
//!     let report = generator.run("notes", "notes/README.md")?;
//!     println!("{} documents", report.result.catalog.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Frontmatter
//!
//! ```markdown
//! ---
//! categories:
//!   - Tools
//!   - Linux: [Security, Kernel]
//! ---
//! # Hardening a server
//! ```
//!
//! Notes without categories are listed under `Other`, rendered last.

pub mod catalog;
pub mod error;
pub mod model;
pub mod organize;
pub mod parser;
pub mod patch;
pub mod render;

// Re-export commonly used types
pub use catalog::{scan_directory, Catalog, SkippedFile};
pub use error::{Error, Result};
pub use model::{
    CategoryCount, CategoryDeclaration, CategoryNode, CategoryTree, DocumentRecord,
    ShapeConflict, OTHER_CATEGORY,
};
pub use organize::organize;
pub use parser::{extract_frontmatter, extract_title, ErrorMode, ScanOptions};
pub use patch::{patch_document, PatchOptions, Patched, Placement, DEFAULT_ANCHOR};
pub use render::{JsonFormat, RenderOptions, TOC_HEADING};

use std::path::Path;

/// Scan a directory and render its table of contents with default options.
///
/// # Example
///
/// ```no_run
/// let toc = mdtoc::generate_toc("notes").unwrap();
/// println!("{}", toc);
/// ```
pub fn generate_toc<P: AsRef<Path>>(dir: P) -> Result<String> {
    Ok(TocGenerator::new().build(dir)?.toc)
}

/// Scan a directory and update its table of contents in `readme`.
///
/// # Example
///
/// ```no_run
/// let report = mdtoc::update_readme_toc(".", "README.md").unwrap();
/// for row in report.result.tree.summary() {
///     println!("{}: {} files", row.name, row.files);
/// }
/// ```
pub fn update_readme_toc<P, Q>(dir: P, readme: Q) -> Result<RunReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    TocGenerator::new().run(dir, readme)
}

/// Builder for scanning, rendering and patching.
///
/// # Example
///
/// ```no_run
/// use mdtoc::TocGenerator;
///
/// let report = TocGenerator::new()
///     .strict()
///     .exclude("CHANGELOG.md")
///     .with_anchor("## Usage")
///     .run("docs", "docs/README.md")?;
/// # Ok::<(), mdtoc::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TocGenerator {
    scan_options: ScanOptions,
    render_options: RenderOptions,
    patch_options: PatchOptions,
}

impl TocGenerator {
    /// Create a new generator with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort on the first unreadable file instead of skipping it.
    pub fn strict(mut self) -> Self {
        self.scan_options = self.scan_options.strict();
        self
    }

    /// Skip an additional file name while scanning.
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.scan_options = self.scan_options.exclude(name);
        self
    }

    /// Replace the scan options.
    pub fn with_scan_options(mut self, options: ScanOptions) -> Self {
        self.scan_options = options;
        self
    }

    /// Replace the render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Set the fallback insertion anchor.
    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.patch_options = self.patch_options.with_anchor(anchor);
        self
    }

    /// Replace the patch options.
    pub fn with_patch_options(mut self, options: PatchOptions) -> Self {
        self.patch_options = options;
        self
    }

    /// Patch options in use.
    pub fn patch_options(&self) -> &PatchOptions {
        &self.patch_options
    }

    /// Scan `dir` for Markdown files.
    pub fn scan<P: AsRef<Path>>(&self, dir: P) -> Result<Catalog> {
        scan_directory(dir, &self.scan_options)
    }

    /// Scan, organize and render without writing anything.
    pub fn build<P: AsRef<Path>>(&self, dir: P) -> Result<TocResult> {
        let catalog = self.scan(dir)?;
        Ok(self.build_from_catalog(catalog))
    }

    /// Organize and render an already scanned catalog.
    pub fn build_from_catalog(&self, catalog: Catalog) -> TocResult {
        let tree = organize(&catalog.records);
        let toc = render::to_markdown(&tree, &self.render_options);
        TocResult { catalog, tree, toc }
    }

    /// Scan `dir`, render its table of contents and patch `readme`.
    ///
    /// Only strict mode returns errors, for a directory that cannot be listed
    /// or an unreadable file. README problems are reported in
    /// [`RunReport::readme`], and the README is left alone when no document
    /// was found.
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(&self, dir: P, readme: Q) -> Result<RunReport> {
        let result = self.build(dir)?;
        Ok(self.apply(result, readme))
    }

    /// Patch `readme` with an already built result.
    pub fn apply<Q: AsRef<Path>>(&self, result: TocResult, readme: Q) -> RunReport {
        let readme = readme.as_ref();

        let status = if result.catalog.is_empty() {
            log::info!("no documents found, leaving {} untouched", readme.display());
            ReadmeStatus::NoDocuments
        } else {
            match patch::update_readme(readme, &result.toc, &self.patch_options) {
                Ok(patched) => ReadmeStatus::Patched {
                    placement: patched.placement,
                    changed: patched.changed,
                },
                Err(e) => {
                    log::debug!("README update failed: {}", e);
                    ReadmeStatus::Failed(e.to_string())
                }
            }
        };

        RunReport {
            result,
            readme: status,
        }
    }
}

/// Output of [`TocGenerator::build`].
#[derive(Debug, Clone)]
pub struct TocResult {
    /// Scanned records and skipped files
    pub catalog: Catalog,
    /// Organized categories
    pub tree: CategoryTree,
    /// Rendered Markdown
    pub toc: String,
}

impl TocResult {
    /// Convert the category tree to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.tree, format)
    }
}

/// What happened to the README during [`TocGenerator::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadmeStatus {
    /// The README was rewritten
    Patched {
        /// Where the table of contents was placed
        placement: Placement,
        /// Whether the content actually changed
        changed: bool,
    },
    /// Nothing to list; the README was not touched
    NoDocuments,
    /// Reading or writing the README failed
    Failed(String),
}

/// Result of a full scan + patch run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Scan and render output
    pub result: TocResult,
    /// README outcome
    pub readme: ReadmeStatus,
}
