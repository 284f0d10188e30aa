//! Scanning options and configuration.

/// Options for scanning a directory of Markdown files.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// File extension to collect, without the dot
    pub extension: String,

    /// Exact file names to skip (case-sensitive)
    pub exclude: Vec<String>,
}

impl ScanOptions {
    /// Create new scan options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable strict mode (abort on the first unreadable file).
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Set the file extension to collect.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Skip an additional file name.
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.exclude.push(name.into());
        self
    }

    /// Check whether a file name is excluded.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|excluded| excluded == name)
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            extension: "md".to_string(),
            exclude: vec!["README.md".to_string()],
        }
    }
}

/// Error handling mode for per-file failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Log and skip the file, keep scanning
    #[default]
    Lenient,
    /// Fail on the first error
    Strict,
}
