//! Directory scanning: one [`DocumentRecord`] per Markdown file.
//!
//! # Example
//!
//! ```no_run
//! use mdtoc::catalog::scan_directory;
//! use mdtoc::ScanOptions;
//!
//! fn main() -> mdtoc::Result<()> {
//!     let catalog = scan_directory("notes", &ScanOptions::default())?;
//!     for record in &catalog.records {
//!         println!("{} -> {}", record.file, record.title);
//!     }
//!     Ok(())
//! }
//! ```

use crate::error::{Error, Result};
use crate::model::DocumentRecord;
use crate::parser::{categories_from_frontmatter, extract_frontmatter, extract_title};
use crate::parser::{ErrorMode, ScanOptions};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A file that was left out of the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    /// Path of the skipped file
    pub path: PathBuf,
    /// Human-readable reason
    pub reason: String,
}

/// Result of scanning a directory.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    /// Parsed records, in directory enumeration order
    pub records: Vec<DocumentRecord>,
    /// Files that failed to read or parse (lenient mode only)
    pub skipped: Vec<SkippedFile>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether no record was collected.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of collected records.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Scan `dir` (non-recursively) for Markdown files.
///
/// Listing failures and failures on individual files are handled according
/// to [`ScanOptions::error_mode`]: in lenient mode a directory that cannot be
/// listed yields an empty catalog.
pub fn scan_directory<P: AsRef<Path>>(dir: P, options: &ScanOptions) -> Result<Catalog> {
    let dir = dir.as_ref();
    let mut catalog = Catalog::new();

    let files = match markdown_files(dir, options) {
        Ok(files) => files,
        Err(e) if options.error_mode == ErrorMode::Lenient => {
            log::warn!("cannot list {}: {}", dir.display(), e);
            return Ok(catalog);
        }
        Err(e) => return Err(e),
    };

    for path in files {
        match read_document(&path) {
            Ok(record) => {
                log::debug!("{}: {:?}", record.file, record.title);
                catalog.records.push(record);
            }
            Err(e) if options.error_mode == ErrorMode::Lenient && e.is_per_file() => {
                log::warn!("skipping {}: {}", path.display(), e);
                catalog.skipped.push(SkippedFile {
                    path,
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    Ok(catalog)
}

/// List candidate files directly inside `dir`, in enumeration order.
pub fn markdown_files(dir: &Path, options: &ScanOptions) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                log::warn!("skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        let has_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == options.extension);
        if !has_extension || !path.is_file() {
            continue;
        }

        match path.file_name().and_then(|name| name.to_str()) {
            Some(name) if options.is_excluded(name) => {
                log::debug!("excluding {}", name);
            }
            Some(_) => files.push(path),
            None => log::warn!("skipping non UTF-8 file name {}", path.display()),
        }
    }

    Ok(files)
}

/// Read one file and build its record.
pub fn read_document(path: &Path) -> Result<DocumentRecord> {
    let bytes = fs::read(path).map_err(|source| Error::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8(bytes).map_err(|_| Error::Encoding {
        path: path.to_path_buf(),
    })?;

    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    parse_document(&content, file, path)
}

/// Build a record from already loaded file content.
pub fn parse_document(
    content: &str,
    file: impl Into<String>,
    path: impl Into<PathBuf>,
) -> Result<DocumentRecord> {
    let path = path.into();
    let (frontmatter, body) = extract_frontmatter(content);
    let title = extract_title(body);
    let categories = categories_from_frontmatter(&frontmatter, &path)?;

    Ok(DocumentRecord::new(file, title, categories, path))
}
