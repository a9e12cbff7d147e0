//! Error types for msync-blocks

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Could not find block {marker} in document")]
    BlockNotFound { marker: String },

    #[error("Block {marker} opened at line {start} is never closed by {close}")]
    BlockNotClosed {
        marker: String,
        close: String,
        start: usize,
    },
}
