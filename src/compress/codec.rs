//! Byte-level codecs for each supported algorithm.

use crate::compress::algorithm::Algorithm;
use crate::compress::error::{CompressError, CompressResult};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// A single compression algorithm working on raw payloads (no header).
pub trait Codec: Send + Sync {
    fn algorithm(&self) -> Algorithm;

    /// Compress `data`. `level` is already clamped to the codec range.
    fn compress(&self, data: &[u8], level: Option<i32>) -> CompressResult<Vec<u8>>;

    /// Expand `data` that is known to decode to exactly `original_len` bytes
    fn expand(&self, data: &[u8], original_len: usize) -> CompressResult<Vec<u8>>;
}

/// Look up the codec for an algorithm
pub fn codec_for(algorithm: Algorithm) -> &'static dyn Codec {
    match algorithm {
        Algorithm::No => &StoredCodec,
        Algorithm::Lz4 => &Lz4Codec,
        Algorithm::Deflate => &DeflateCodec,
        Algorithm::Zstd => &ZstdCodec,
    }
}

/// LZ4 sequences emit at most 255 bytes per input byte
const LZ4_MAX_EXPANSION: usize = 255;

/// Cap on the buffer reserved up front from an untrusted length header
const MAX_PREALLOC_RATIO: usize = 16;

fn capacity_hint(original_len: usize, input_len: usize) -> usize {
    original_len.min(input_len.saturating_mul(MAX_PREALLOC_RATIO))
}

fn check_len(algorithm: Algorithm, out: Vec<u8>, original_len: usize) -> CompressResult<Vec<u8>> {
    if out.len() != original_len {
        return Err(CompressError::corrupted(format!(
            "{} stream expanded to {} bytes, header says {}",
            algorithm,
            out.len(),
            original_len
        )));
    }
    Ok(out)
}

/// Stores the input unchanged
pub struct StoredCodec;

impl Codec for StoredCodec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::No
    }

    fn compress(&self, data: &[u8], _level: Option<i32>) -> CompressResult<Vec<u8>> {
        Ok(data.to_vec())
    }

    fn expand(&self, data: &[u8], original_len: usize) -> CompressResult<Vec<u8>> {
        check_len(self.algorithm(), data.to_vec(), original_len)
    }
}

/// LZ4 block format via `lz4_flex`
pub struct Lz4Codec;

impl Codec for Lz4Codec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Lz4
    }

    fn compress(&self, data: &[u8], _level: Option<i32>) -> CompressResult<Vec<u8>> {
        Ok(lz4_flex::block::compress(data))
    }

    fn expand(&self, data: &[u8], original_len: usize) -> CompressResult<Vec<u8>> {
        // decompress() allocates the full length before reading any input
        if original_len > data.len().saturating_mul(LZ4_MAX_EXPANSION) {
            return Err(CompressError::corrupted(format!(
                "LZ4 stream of {} bytes cannot expand to {}",
                data.len(),
                original_len
            )));
        }
        let out = lz4_flex::block::decompress(data, original_len)
            .map_err(|e| CompressError::corrupted(format!("LZ4: {}", e)))?;
        check_len(self.algorithm(), out, original_len)
    }
}

/// zlib-wrapped DEFLATE via `flate2`
pub struct DeflateCodec;

impl DeflateCodec {
    const DEFAULT_LEVEL: i32 = 6;
}

impl Codec for DeflateCodec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Deflate
    }

    fn compress(&self, data: &[u8], level: Option<i32>) -> CompressResult<Vec<u8>> {
        let level = level.unwrap_or(Self::DEFAULT_LEVEL).max(0) as u32;
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(level));
        encoder
            .write_all(data)
            .map_err(|e| CompressError::Codec(e.to_string()))?;
        encoder
            .finish()
            .map_err(|e| CompressError::Codec(e.to_string()))
    }

    fn expand(&self, data: &[u8], original_len: usize) -> CompressResult<Vec<u8>> {
        let mut out = Vec::with_capacity(capacity_hint(original_len, data.len()));
        // One byte past the expected length is enough to detect a bad header
        ZlibDecoder::new(data)
            .take(original_len as u64 + 1)
            .read_to_end(&mut out)
            .map_err(|e| CompressError::corrupted(format!("DEFLATE: {}", e)))?;
        check_len(self.algorithm(), out, original_len)
    }
}

/// Zstandard via the `zstd` bulk and streaming APIs
pub struct ZstdCodec;

impl ZstdCodec {
    const DEFAULT_LEVEL: i32 = 3;
}

impl Codec for ZstdCodec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Zstd
    }

    fn compress(&self, data: &[u8], level: Option<i32>) -> CompressResult<Vec<u8>> {
        zstd::bulk::compress(data, level.unwrap_or(Self::DEFAULT_LEVEL))
            .map_err(|e| CompressError::Codec(e.to_string()))
    }

    fn expand(&self, data: &[u8], original_len: usize) -> CompressResult<Vec<u8>> {
        let corrupted = |e: std::io::Error| CompressError::corrupted(format!("ZSTD: {}", e));
        let mut out = Vec::with_capacity(capacity_hint(original_len, data.len()));
        zstd::stream::read::Decoder::new(data)
            .map_err(corrupted)?
            .take(original_len as u64 + 1)
            .read_to_end(&mut out)
            .map_err(corrupted)?;
        check_len(self.algorithm(), out, original_len)
    }
}
