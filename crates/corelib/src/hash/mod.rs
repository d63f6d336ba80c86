//! Digest functions for placing keys and virtual nodes on the ring.
//!
//! Every function maps an arbitrary byte string to a 32-bit ring position.
//! They are stateless, so the ring holds a cheap `Copy` selector
//! ([`HashAlgorithm`]) rather than a boxed strategy.

pub mod fnv;
pub mod hsieh;
pub mod murmur;
pub mod traits;

pub use fnv::Fnv1a;
pub use hsieh::Hsieh;
pub use murmur::Murmur2;
pub use traits::{HashAlgorithm, HashFunction};
