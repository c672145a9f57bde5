//! Error types for packaging operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `PackError`.
pub type Result<T> = std::result::Result<T, PackError>;

/// Errors that can occur while packaging a build directory.
#[derive(Error, Debug)]
pub enum PackError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Root directory to package does not exist.
    #[error("source not found: {path}")]
    SourceNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// Path cannot be represented as a zip entry name.
    #[error("invalid path {path}: {reason}")]
    InvalidPath {
        /// The offending path.
        path: PathBuf,
        /// Why the path was rejected.
        reason: String,
    },

    /// The zip writer or reader reported an error.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The external archiving tool could not be started.
    #[error("failed to run archiving tool '{program}': {source}")]
    ToolSpawn {
        /// Program name or path that failed to start.
        program: String,
        /// Underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration is inconsistent.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}

impl PackError {
    /// Returns `true` if this error came from the external archiving tool.
    ///
    /// # Examples
    ///
    /// ```
    /// use webzip_core::PackError;
    ///
    /// let err = PackError::ToolSpawn {
    ///     program: "WinRAR.exe".to_string(),
    ///     source: std::io::Error::from(std::io::ErrorKind::NotFound),
    /// };
    /// assert!(err.is_tool_error());
    ///
    /// let err = PackError::InvalidConfig {
    ///     reason: "empty prefix".to_string(),
    /// };
    /// assert!(!err.is_tool_error());
    /// ```
    #[must_use]
    pub const fn is_tool_error(&self) -> bool {
        matches!(self, Self::ToolSpawn { .. })
    }

    /// Returns the filesystem path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::SourceNotFound { path } | Self::InvalidPath { path, .. } => Some(path),
            _ => None,
        }
    }
}
