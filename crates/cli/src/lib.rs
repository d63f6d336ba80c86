//! Demonstration and benchmark driver for the consistent hash ring.
//!
//! Provides commands for:
//! - Scalar node rings: fruit lookups, lookup and round-robin histograms
//! - Named node rings: memcached-style endpoints behind shared handles

pub mod commands;
pub mod config;

pub use commands::{Command, Histogram};
pub use config::CliConfig;
