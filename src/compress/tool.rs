//! The compression tool service and its standard implementation.
//!
//! Every stream produced by `StandardCompressTool` is self-describing:
//!
//! ```text
//! +--------------+---------------------------+-----------------+
//! | algorithm id | original length (varint)  | codec payload   |
//! |   1 byte     |   1-5 bytes               |   ...           |
//! +--------------+---------------------------+-----------------+
//! ```
//!
//! so EXPAND never needs to be told which algorithm was used.

use crate::compress::algorithm::{Algorithm, AlgorithmSpec};
use crate::compress::codec::codec_for;
use crate::compress::config::CompressConfig;
use crate::compress::error::{CompressError, CompressResult};
use crate::compress::varint;
use log::trace;

/// Byte transform service used by the COMPRESS and EXPAND functions.
///
/// Implementations must be safe to call concurrently; expressions hold no
/// locks around these calls.
pub trait CompressTool: Send + Sync {
    /// Compress `data` with the named algorithm, or the tool's default when
    /// `algorithm` is `None`.
    fn compress(&self, data: &[u8], algorithm: Option<&str>) -> CompressResult<Vec<u8>>;

    /// Reverse `compress`
    fn expand(&self, data: &[u8]) -> CompressResult<Vec<u8>>;
}

/// Stateless compression tool over the built-in codecs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardCompressTool {
    default_spec: AlgorithmSpec,
    min_compress_len: usize,
}

impl StandardCompressTool {
    /// Create a tool, validating the configured default algorithm
    pub fn new(config: CompressConfig) -> CompressResult<Self> {
        let default_spec = AlgorithmSpec::parse(&config.default_algorithm)?;
        Ok(Self {
            default_spec,
            min_compress_len: config.min_compress_len,
        })
    }

    pub fn default_algorithm(&self) -> AlgorithmSpec {
        self.default_spec
    }

    fn write_stream(algorithm: Algorithm, original_len: u32, payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(payload.len() + 6);
        out.push(algorithm.id());
        varint::write_u32(&mut out, original_len);
        out.extend_from_slice(payload);
        out
    }
}

/// Equivalent to `StandardCompressTool::new(CompressConfig::default())`
impl Default for StandardCompressTool {
    fn default() -> Self {
        let config = CompressConfig::default();
        Self {
            default_spec: AlgorithmSpec::new(Algorithm::DEFAULT),
            min_compress_len: config.min_compress_len,
        }
    }
}

impl CompressTool for StandardCompressTool {
    fn compress(&self, data: &[u8], algorithm: Option<&str>) -> CompressResult<Vec<u8>> {
        // Unknown names fail even for inputs that would be stored
        let spec = match algorithm {
            Some(name) => AlgorithmSpec::parse(name)?,
            None => self.default_spec,
        };
        let original_len =
            u32::try_from(data.len()).map_err(|_| CompressError::TooLarge { len: data.len() })?;

        if data.len() < self.min_compress_len {
            trace!("storing {} byte input uncompressed", data.len());
            return Ok(Self::write_stream(Algorithm::No, original_len, data));
        }

        let payload = codec_for(spec.algorithm).compress(data, spec.level)?;
        if payload.len() > data.len() {
            trace!(
                "{} grew input from {} to {} bytes, storing instead",
                spec,
                data.len(),
                payload.len()
            );
            return Ok(Self::write_stream(Algorithm::No, original_len, data));
        }

        trace!(
            "{} compressed {} bytes to {}",
            spec,
            data.len(),
            payload.len()
        );
        Ok(Self::write_stream(spec.algorithm, original_len, &payload))
    }

    fn expand(&self, data: &[u8]) -> CompressResult<Vec<u8>> {
        let (&id, rest) = data
            .split_first()
            .ok_or_else(|| CompressError::corrupted("empty input"))?;
        let algorithm = Algorithm::from_id(id)
            .ok_or_else(|| CompressError::corrupted(format!("unknown algorithm id {}", id)))?;
        let (original_len, header_len) = varint::read_u32(rest)?;

        codec_for(algorithm).expand(&rest[header_len..], original_len as usize)
    }
}
