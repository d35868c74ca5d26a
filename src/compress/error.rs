//! Compression tool error types.

use thiserror::Error;

/// Errors raised by a `CompressTool`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompressError {
    #[error("Unsupported compression algorithm: {name}")]
    UnsupportedAlgorithm { name: String },

    #[error("Compressed data is corrupted: {reason}")]
    Corrupted { reason: String },

    #[error("Input of {len} bytes is too large to compress")]
    TooLarge { len: usize },

    #[error("Compression failed: {0}")]
    Codec(String),
}

impl CompressError {
    pub(crate) fn corrupted(reason: impl Into<String>) -> Self {
        CompressError::Corrupted {
            reason: reason.into(),
        }
    }
}

/// Result type for compression operations.
pub type CompressResult<T> = Result<T, CompressError>;
