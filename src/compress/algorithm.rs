//! Algorithm identifiers and name parsing.

use crate::compress::error::{CompressError, CompressResult};
use std::fmt;
use std::ops::RangeInclusive;

/// Compression algorithms known to the standard tool.
///
/// The discriminant is written as the first byte of every compressed stream,
/// so existing values must never be renumbered.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    No = 0,
    Lz4 = 1,
    Deflate = 2,
    Zstd = 3,
}

impl Algorithm {
    /// Used when COMPRESS is called without an algorithm
    pub const DEFAULT: Algorithm = Algorithm::Lz4;

    pub const ALL: [Algorithm; 4] = [
        Algorithm::No,
        Algorithm::Lz4,
        Algorithm::Deflate,
        Algorithm::Zstd,
    ];

    pub fn id(&self) -> u8 {
        *self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.id() == id)
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Algorithm::No => "NO",
            Algorithm::Lz4 => "LZ4",
            Algorithm::Deflate => "DEFLATE",
            Algorithm::Zstd => "ZSTD",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.name().eq_ignore_ascii_case(name))
    }

    /// Legal compression levels, `None` if the codec has no level knob
    pub fn level_range(&self) -> Option<RangeInclusive<i32>> {
        match self {
            Algorithm::No | Algorithm::Lz4 => None,
            Algorithm::Deflate => Some(0..=9),
            Algorithm::Zstd => Some(1..=22),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An algorithm together with its options, e.g. `DEFLATE L9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmSpec {
    pub algorithm: Algorithm,
    pub level: Option<i32>,
}

impl AlgorithmSpec {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            level: None,
        }
    }

    /// Parse `NAME [Ln]`. Names are case-insensitive; levels are clamped to
    /// the codec's range and dropped for codecs without levels.
    pub fn parse(text: &str) -> CompressResult<Self> {
        let unsupported = || CompressError::UnsupportedAlgorithm {
            name: text.to_string(),
        };

        let mut parts = text.split_whitespace();
        let algorithm = parts
            .next()
            .and_then(Algorithm::from_name)
            .ok_or_else(unsupported)?;

        let mut level = None;
        for option in parts {
            let digits = option
                .strip_prefix('L')
                .or_else(|| option.strip_prefix('l'))
                .ok_or_else(unsupported)?;
            let requested: i32 = digits.parse().map_err(|_| unsupported())?;
            level = Some(requested);
        }

        let level = match (algorithm.level_range(), level) {
            (Some(range), Some(requested)) => {
                Some(requested.clamp(*range.start(), *range.end()))
            }
            _ => None,
        };

        Ok(Self { algorithm, level })
    }
}

impl fmt::Display for AlgorithmSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            Some(level) => write!(f, "{} L{}", self.algorithm, level),
            None => write!(f, "{}", self.algorithm),
        }
    }
}
