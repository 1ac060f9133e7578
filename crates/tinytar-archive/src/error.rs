//! Archive error types

use thiserror::Error;
use tinytar_formats::HeaderError;

/// Archive-level error type
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Header construction or parsing failed
    #[error(transparent)]
    Header(#[from] HeaderError),

    /// A file could not be opened or created
    #[error("failed to open {path}: {source}")]
    Open {
        /// Path that failed to open
        path: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// The archive is truncated or malformed
    #[error("corrupt archive: {0}")]
    Corrupt(String),

    /// Update precondition violated: some requested files are not members
    #[error("not already present in archive: {}", missing.join(", "))]
    NotSubset {
        /// Requested paths missing from the archive
        missing: Vec<String>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for archive operations
pub type ArchiveResult<T> = Result<T, ArchiveError>;
