use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for extraction and catalog maintenance
#[derive(Debug, Error)]
pub enum ExtractError {
    /// No project marker found while walking up from the start directory
    #[error("Can't find project directory (no {markers}) above {start}.\n\nTip: Run the extractor from inside a project that has a {markers}")]
    ProjectRootNotFound { start: PathBuf, markers: String },

    /// Existing catalog or outdated file is not a valid JSON catalog
    #[error("Failed to parse catalog file {file}:\n{reason}\n\nTip: Fix the JSON syntax or remove the file to regenerate it")]
    CatalogParse { file: PathBuf, reason: String },

    /// Writing a catalog file failed
    #[error("Failed to write {file}: {source}")]
    Write {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Tree-sitter grammar or query could not be loaded
    #[error("Grammar error: {0}")]
    Grammar(#[from] anyhow::Error),

    /// Generic error with context
    #[error("{0}")]
    Generic(String),
}

impl ExtractError {
    /// Create a ProjectRootNotFound error for the given start directory
    pub fn project_root_not_found(start: impl Into<PathBuf>, markers: &[&str]) -> Self {
        Self::ProjectRootNotFound {
            start: start.into(),
            markers: markers.join(" or "),
        }
    }

    /// Create a CatalogParse error from a file path and reason
    pub fn catalog_parse_error(file: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::CatalogParse {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Create a Write error for the given file
    pub fn write_error(file: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            file: file.into(),
            source,
        }
    }

    /// Whether this error is a configuration problem that aborts the whole run
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::ProjectRootNotFound { .. })
    }
}

/// Result type alias for ExtractError
pub type Result<T> = std::result::Result<T, ExtractError>;
