//! Configuration for the standard compression tool.

use crate::compress::algorithm::Algorithm;

/// Settings for `StandardCompressTool`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressConfig {
    /// Algorithm (with options) used when COMPRESS is called without one
    pub default_algorithm: String,
    /// Inputs shorter than this are always stored uncompressed
    pub min_compress_len: usize,
}

impl CompressConfig {
    pub const DEFAULT_ALGORITHM: &'static str = Algorithm::DEFAULT.name();
    pub const DEFAULT_MIN_COMPRESS_LEN: usize = 5;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.default_algorithm = algorithm.into();
        self
    }

    pub fn with_min_compress_len(mut self, len: usize) -> Self {
        self.min_compress_len = len;
        self
    }
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self {
            default_algorithm: Self::DEFAULT_ALGORITHM.to_string(),
            min_compress_len: Self::DEFAULT_MIN_COMPRESS_LEN,
        }
    }
}
