//! Error types for storage operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An I/O error occurred on a specific file.
    #[error("I/O error on {}: {source}", .path.display())]
    File {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// The parent directory of the backing file does not exist.
    #[error("directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),
}

impl StorageError {
    /// Wraps an I/O error with the path it occurred on.
    pub fn file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }
}
