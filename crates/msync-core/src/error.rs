//! Error types for msync-core

use std::path::PathBuf;

/// Result type for msync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort one synchronization.
///
/// Informational results such as an entry already being present are not
/// errors; they are reported through [`crate::SyncOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The list block is missing from the document; nothing was written
    #[error("Could not find block {marker} in {path}")]
    BlockNotFound { path: PathBuf, marker: String },

    /// The document could not be read
    #[error("Failed to read {path}: {source}")]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: msync_fs::Error,
    },

    /// The document could not be written
    #[error("Failed to update {path}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: msync_fs::Error,
    },

    /// Configuration is unusable
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Watch subscription failed
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// Filesystem error from msync-fs
    #[error(transparent)]
    Fs(#[from] msync_fs::Error),
}

impl Error {
    pub(crate) fn block(path: impl Into<PathBuf>, source: msync_blocks::Error) -> Self {
        let marker = match source {
            msync_blocks::Error::BlockNotFound { marker } => marker,
            msync_blocks::Error::BlockNotClosed { marker, .. } => marker,
        };
        Self::BlockNotFound {
            path: path.into(),
            marker,
        }
    }
}
