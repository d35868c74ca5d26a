//! Compression tool backing the COMPRESS and EXPAND functions.
//!
//! This module provides:
//! - The `CompressTool` service trait consumed by expressions
//! - A standard implementation with NO, LZ4, DEFLATE and ZSTD codecs
//! - The self-describing stream header (algorithm id + original length)

pub mod algorithm;
pub mod codec;
pub mod config;
pub mod error;
pub mod tool;
pub mod varint;

pub use algorithm::{Algorithm, AlgorithmSpec};
pub use codec::Codec;
pub use config::CompressConfig;
pub use error::{CompressError, CompressResult};
pub use tool::{CompressTool, StandardCompressTool};
