//! Error types for weave-core
//!
//! Only batch-level failures live here. Anything that concerns a single
//! input document is folded into the [`BatchResult`](crate::BatchResult)
//! instead of being raised.

use crate::config::ConfigError;
use std::path::{Path, PathBuf};
use weave_insertion::{InsertionError, TargetRole};

/// Batch-aborting errors
#[derive(Debug, thiserror::Error)]
pub enum IntegrateError {
    /// A target file does not exist; checked before any record is read
    #[error("{role} file not found: {}", path.display())]
    TargetMissing {
        /// Which target
        role: TargetRole,
        /// Path that was looked up
        path: PathBuf,
    },

    /// A target file exists but could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Anchor configuration is unusable
    #[error("insertion engine error: {0}")]
    Insertion(#[from] InsertionError),

    /// Patched texts could not be written
    #[error("output error: {0}")]
    Output(#[from] OutputError),
}

impl IntegrateError {
    /// Create target missing error
    #[inline]
    pub fn target_missing(role: TargetRole, path: impl Into<PathBuf>) -> Self {
        Self::TargetMissing {
            role,
            path: path.into(),
        }
    }

    /// Check if the batch was refused before any record was read
    #[inline]
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::TargetMissing { .. } | Self::Io { .. })
    }
}

/// Output writer errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// File system operation failed
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// Path that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A module file path escapes the output directory
    #[error("unsafe module file path: {}", .0.display())]
    UnsafePath(PathBuf),
}

impl OutputError {
    /// Create I/O error for `path`
    #[inline]
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
