//! Error types for archive packaging operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `PackError`.
pub type Result<T> = std::result::Result<T, PackError>;

/// Broad failure category of a [`PackError`].
///
/// Callers that only need to distinguish "the tree could not be read" from
/// "the archive could not be written" can match on this instead of on every
/// variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The root directory or one of its subdirectories could not be walked.
    Traversal,
    /// The output archive could not be created, written or finalized.
    Io,
    /// Invalid configuration or input that no retry would fix.
    Unexpected,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Traversal => write!(f, "traversal"),
            Self::Io => write!(f, "i/o"),
            Self::Unexpected => write!(f, "unexpected"),
        }
    }
}

/// Errors that can occur while packaging a directory tree.
#[derive(Error, Debug)]
pub enum PackError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The ZIP writer rejected an entry or failed to finalize.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Root directory does not exist.
    #[error("source not found: {path}")]
    SourceNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// Root path exists but is not a directory.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// Directory traversal failed below the root.
    #[error("cannot traverse {path}: {source}")]
    Traversal {
        /// Path being visited when the walk failed.
        path: PathBuf,
        /// Underlying directory-read error.
        #[source]
        source: std::io::Error,
    },

    /// A file name cannot be represented as a UTF-8 archive entry name.
    #[error("cannot derive archive entry name for {path}")]
    InvalidEntryName {
        /// The file whose name is not representable.
        path: PathBuf,
    },

    /// Compression level outside 1-9.
    #[error("invalid compression level {level}: must be 1-9")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u8,
    },

    /// Output name is empty or not a plain relative path.
    #[error("invalid output name: {name:?}")]
    InvalidOutputName {
        /// The rejected name.
        name: String,
    },
}

impl PackError {
    /// Returns the failure category of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use xpack_core::ErrorCategory;
    /// use xpack_core::PackError;
    /// use std::path::PathBuf;
    ///
    /// let err = PackError::SourceNotFound {
    ///     path: PathBuf::from("missing"),
    /// };
    /// assert_eq!(err.category(), ErrorCategory::Traversal);
    ///
    /// let err = PackError::InvalidCompressionLevel { level: 0 };
    /// assert_eq!(err.category(), ErrorCategory::Unexpected);
    /// ```
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::SourceNotFound { .. } | Self::NotADirectory { .. } | Self::Traversal { .. } => {
                ErrorCategory::Traversal
            }
            Self::Io(_) | Self::Zip(_) => ErrorCategory::Io,
            Self::InvalidEntryName { .. }
            | Self::InvalidCompressionLevel { .. }
            | Self::InvalidOutputName { .. } => ErrorCategory::Unexpected,
        }
    }

    /// Wraps a directory-read failure with the path it failed on.
    pub(crate) fn traversal(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Traversal {
            path: path.to_path_buf(),
            source,
        }
    }
}
