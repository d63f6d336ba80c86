//! Core digest trait and the algorithm selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Fnv1a, Hsieh, Murmur2};
use crate::error::Error;

/// A digest converts bytes into a position on the 32-bit ring.
///
/// Implementations are pure: the same input always yields the same output,
/// on every platform. All arithmetic wraps.
pub trait HashFunction: Send + Sync + 'static {
    /// Hashes `data` into a ring position.
    ///
    /// # Arguments
    ///
    /// * `data` - The bytes to digest (may be empty)
    ///
    /// # Returns
    ///
    /// A position in `[0, 2^32)`
    fn digest(&self, data: &[u8]) -> u32;

    /// Returns the name of this digest.
    fn name(&self) -> &'static str;
}

/// Selects one of the built-in digests.
///
/// Murmur is the default. The numeric selectors match the historic
/// `0 = FNV, 1 = Hsieh, 2 = Murmur` ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Fnv,
    Hsieh,
    #[default]
    Murmur,
}

impl HashAlgorithm {
    /// All selectable algorithms, in selector order.
    pub const ALL: [HashAlgorithm; 3] = [Self::Fnv, Self::Hsieh, Self::Murmur];

    /// Maps a numeric selector to an algorithm. Unknown selectors fall back
    /// to Murmur.
    pub fn from_selector(selector: u32) -> Self {
        match selector {
            0 => Self::Fnv,
            1 => Self::Hsieh,
            _ => Self::Murmur,
        }
    }
}

impl HashFunction for HashAlgorithm {
    #[inline]
    fn digest(&self, data: &[u8]) -> u32 {
        match self {
            Self::Fnv => Fnv1a.digest(data),
            Self::Hsieh => Hsieh.digest(data),
            Self::Murmur => Murmur2.digest(data),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Fnv => Fnv1a.name(),
            Self::Hsieh => Hsieh.name(),
            Self::Murmur => Murmur2.name(),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Fnv => "fnv",
            Self::Hsieh => "hsieh",
            Self::Murmur => "murmur",
        };
        f.write_str(label)
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fnv" | "fnv1a" => Ok(Self::Fnv),
            "hsieh" | "superfasthash" => Ok(Self::Hsieh),
            "murmur" | "murmur2" => Ok(Self::Murmur),
            _ => Err(Error::UnknownHash(s.to_string())),
        }
    }
}
