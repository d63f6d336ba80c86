//! Demonstration commands.
//!
//! Each command builds a ring, routes a batch of random keys through it and
//! prints how the keys spread across nodes. Nothing here adds ring
//! behavior; it only exercises the public API.

use std::collections::BTreeMap;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use clap::Subcommand;
use conring_core::{HashRing, NodeHandle, RingConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

/// Scalar nodes and their weights.
const SCALAR_NODES: [(u64, u32); 5] = [
    (0x1_2345_6789, 1),
    (0x2_2446_6880, 3),
    (0x6_789a_bcde, 2),
    (0x8_8888_8888, 2),
    (0xf_edcb_a987, 2),
];

const FRUITS: [&str; 6] = ["apple", "pear", "banana", "orange", "cherry", "apricot"];

/// A cache server addressed by name.
#[derive(Debug)]
pub struct Endpoint {
    pub name: &'static str,
    pub weight: u32,
}

const ENDPOINTS: [Endpoint; 3] = [
    Endpoint { name: "9.8.7.6:11211", weight: 2 },
    Endpoint { name: "5.6.7.8:11311", weight: 3 },
    Endpoint { name: "6.5.4.3:11511", weight: 5 },
];

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ring of integer node ids: fruit lookups, histograms, then churn
    Scalar {
        /// Lookups and round-robin calls per phase
        #[arg(long, default_value_t = 1_000_000)]
        count: usize,
    },
    /// Ring of named endpoints behind shared handles
    Named {
        /// Lookups per phase
        #[arg(long, default_value_t = 1_000_000)]
        count: usize,
    },
}

impl Command {
    pub fn execute(&self, config: &RingConfig, seed: Option<u64>) -> anyhow::Result<()> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        match *self {
            Command::Scalar { count } => run_scalar(config, count, &mut rng),
            Command::Named { count } => run_named(config, count, &mut rng),
        }
        Ok(())
    }
}

/// Per-node counters printed in key order.
#[derive(Debug)]
pub struct Histogram<K> {
    counts: BTreeMap<K, usize>,
}

impl<K: Ord> Default for Histogram<K> {
    fn default() -> Self {
        Self { counts: BTreeMap::new() }
    }
}

impl<K: Ord> Histogram<K> {
    pub fn record(&mut self, key: K) {
        *self.counts.entry(key).or_default() += 1;
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn get(&self, key: &K) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Prints one line per node with its share of the total.
    pub fn print(&self, title: &str, label: impl Fn(&K) -> String) {
        let total = self.total().max(1);
        println!("  === {title}");
        for (key, count) in &self.counts {
            let share = *count as f64 * 100.0 / total as f64;
            println!("  node:{:<16} count:{count:<8} {share:>6.2}%", label(key));
        }
    }
}

fn run_scalar(config: &RingConfig, count: usize, rng: &mut StdRng) {
    let mut ring: HashRing<u64> = HashRing::from_config(config);
    if ring.lookup(rng.gen::<u32>()).is_none() {
        warn!(empty = ring.is_empty(), "lookup failed on empty ring");
    }

    for (node, weight) in SCALAR_NODES {
        ring.add_node(node, weight);
    }
    println!("ring entries: {}", ring.len());

    for fruit in FRUITS {
        if let Some((primary, backup)) = ring.lookup_bytes_with_backup(fruit.as_bytes()) {
            println!("fruit:{fruit:<10} primary:{primary:x} backup:{backup:x}");
        }
    }

    scalar_distribution(&mut ring, count, rng);

    ring.remove_node(&0x8_8888_8888, 2);
    ring.remove_node(&0xf_edcb_a987, 2);
    ring.add_node(0xf_edcb_a987, 4);
    println!("ring entries: {}", ring.len());

    scalar_distribution(&mut ring, count, rng);
}

fn scalar_distribution(ring: &mut HashRing<u64>, count: usize, rng: &mut StdRng) {
    if ring.is_empty() || count == 0 {
        return;
    }

    let started = Instant::now();
    let mut lookups = Histogram::default();
    for _ in 0..count - 1 {
        if let Some(&node) = ring.lookup(rng.gen::<u32>()) {
            lookups.record(node);
        }
    }
    // one byte-string key through the same path
    let key = format!("{}{}", unix_secs(), rng.gen::<u32>());
    if let Some(&node) = ring.lookup_bytes(key.as_bytes()) {
        lookups.record(node);
    }
    info!(count, elapsed = ?started.elapsed(), "lookup phase done");
    lookups.print("hash lookup", |node| format!("{node:x}"));

    let started = Instant::now();
    let mut picks = Histogram::default();
    for _ in 0..count {
        if let Some(&node) = ring.round_robin() {
            picks.record(node);
        }
    }
    info!(count, elapsed = ?started.elapsed(), "round-robin phase done");
    picks.print("round robin", |node| format!("{node:x}"));
}

fn run_named(config: &RingConfig, count: usize, rng: &mut StdRng) {
    let handles: Vec<NodeHandle<Endpoint>> = ENDPOINTS
        .into_iter()
        .map(NodeHandle::new)
        .collect();

    let mut ring = HashRing::from_config(config);
    for handle in &handles {
        ring.add_named_node(handle.clone(), handle.name.as_bytes(), handle.weight);
    }
    println!("ring entries: {}", ring.len());

    let started = Instant::now();
    let mut lookups = Histogram::default();
    for i in 0..count {
        let stamp = u64::from(rng.gen::<u32>()) + unix_micros();
        let key = format!("{i}-{stamp}");
        if let Some(node) = ring.lookup_bytes(key.as_bytes()) {
            lookups.record(node.name);
        }
    }
    info!(count, elapsed = ?started.elapsed(), "lookup phase done");
    lookups.print("hash lookup", |name| name.to_string());

    let removed = &handles[1];
    ring.remove_named_node(removed.name.as_bytes(), removed.weight);
    println!("removed {} -> ring entries: {}", removed.name, ring.len());
}

fn unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn unix_micros() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}
