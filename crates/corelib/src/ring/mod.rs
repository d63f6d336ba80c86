//! Consistent hash ring implementation.
//!
//! The ring maps 32-bit positions to node values and provides lookup,
//! backup lookup and round-robin selection over them.

pub mod builder;
pub mod position;
#[allow(clippy::module_inception)]
pub mod ring;
mod round_robin;

pub use builder::RingBuilder;
pub use position::Position;
pub use ring::HashRing;
pub use round_robin::ROUND_ROBIN_BACKUP_MAX_STEPS;
