//! Command-line configuration.
//!
//! Ring settings come from an optional JSON file, then `--hash` and
//! `--replicas` (or their environment variables) override it.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use conring_core::{HashAlgorithm, RingConfig};
use tracing_subscriber::EnvFilter;

use crate::commands::Command;

/// Consistent hash ring demonstration and benchmark driver.
#[derive(Debug, Parser)]
#[command(name = "conring", version)]
pub struct CliConfig {
    /// JSON ring configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Digest: fnv, hsieh or murmur
    #[arg(long, global = true, env = "CONRING_HASH")]
    pub hash: Option<HashAlgorithm>,

    /// Virtual nodes per unit of weight
    #[arg(long, global = true, env = "CONRING_REPLICAS")]
    pub replicas: Option<u32>,

    /// Seed for the key generator (random if omitted)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Log ring mutations
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Installs the global tracing subscriber. `RUST_LOG` wins over
    /// `--verbose`.
    pub fn init_tracing(&self) {
        let default = if self.verbose { "debug" } else { "info" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }

    /// Resolves the ring configuration from file and flags.
    pub fn ring_config(&self) -> anyhow::Result<RingConfig> {
        let mut config = match &self.config {
            Some(path) => RingConfig::load(path)
                .with_context(|| format!("loading ring configuration from {}", path.display()))?,
            None => RingConfig::default(),
        };
        if let Some(hash) = self.hash {
            config.hash = hash;
        }
        if let Some(replicas) = self.replicas {
            config.replicas = replicas;
        }
        config.validate().context("validating ring configuration")?;
        Ok(config)
    }

    /// Runs the selected command.
    pub fn run(&self) -> anyhow::Result<()> {
        let ring = self.ring_config()?;
        tracing::info!(hash = %ring.hash, replicas = ring.replicas, "ring configuration");
        self.command.execute(&ring, self.seed)
    }
}
