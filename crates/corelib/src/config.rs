//! Ring configuration.
//!
//! A ring is fully described by its digest and its replica count. Both have
//! defaults, so an empty JSON object is a valid configuration:
//!
//! ```json
//! { "hash": "murmur", "replicas": 168 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::hash::HashAlgorithm;

/// Virtual nodes per unit of weight when none is configured.
pub const DEFAULT_REPLICAS: u32 = 168;

/// Upper bound accepted by [`RingConfig::validate`].
pub const MAX_REPLICAS: u32 = 65_536;

/// Construction parameters for a [`HashRing`](crate::ring::HashRing).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RingConfig {
    /// Digest used for both virtual nodes and keys.
    pub hash: HashAlgorithm,
    /// Virtual nodes generated per unit of weight per logical node.
    pub replicas: u32,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            hash: HashAlgorithm::default(),
            replicas: DEFAULT_REPLICAS,
        }
    }
}

impl RingConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Rejects replica counts that cannot produce a usable ring.
    pub fn validate(&self) -> Result<()> {
        if self.replicas == 0 {
            return Err(Error::InvalidConfig("replicas must be at least 1".into()));
        }
        if self.replicas > MAX_REPLICAS {
            return Err(Error::InvalidConfig(format!(
                "replicas must not exceed {MAX_REPLICAS}, got {}",
                self.replicas
            )));
        }
        Ok(())
    }
}
