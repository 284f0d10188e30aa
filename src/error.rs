//! Error types for the mdtoc library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mdtoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building a table of contents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when listing, reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// I/O error tied to a specific file.
    #[error("Failed to read {}: {source}", .path.display())]
    ReadFile {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// I/O error writing a specific file.
    #[error("Failed to write {}: {source}", .path.display())]
    WriteFile {
        /// File that could not be written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The file is not valid UTF-8 text.
    #[error("{} is not valid UTF-8", .path.display())]
    Encoding {
        /// Offending file
        path: PathBuf,
    },

    /// The `categories` frontmatter value has a shape that cannot be normalized.
    #[error("Invalid categories in {}: {reason}", .path.display())]
    InvalidCategories {
        /// File declaring the categories
        path: PathBuf,
        /// What was wrong with the value
        reason: String,
    },

    /// Error during rendering (JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Whether this error concerns a single input file and can be skipped in
    /// lenient mode.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            Error::ReadFile { .. } | Error::Encoding { .. } | Error::InvalidCategories { .. }
        )
    }
}
