//! Consistent hashing ring.
//!
//! This crate maps keys onto a dynamic set of nodes so that adding or
//! removing a node only remaps a bounded fraction of keys:
//! - Digest functions placing keys and virtual nodes on a 32-bit circle
//! - Node identity (scalar bytes or explicit names)
//! - Virtual node generation with weights
//! - The ring: insertion, removal, lookup with backup, round-robin

pub mod config;
pub mod error;
pub mod hash;
pub mod node;
pub mod ring;
pub mod vnode;

pub use config::RingConfig;
pub use error::{Error, Result};
pub use hash::{HashAlgorithm, HashFunction};
pub use node::{NodeHandle, ScalarIdentity};
pub use ring::{HashRing, RingBuilder};
pub use vnode::{DEFAULT_WEIGHT, MAX_WEIGHT};
