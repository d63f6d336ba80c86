//! Fluent construction of a populated ring.

use super::ring::HashRing;
use crate::config::{RingConfig, DEFAULT_REPLICAS};
use crate::hash::HashAlgorithm;
use crate::node::ScalarIdentity;

/// Builder for [`HashRing`].
///
/// Nodes are inserted in the order they were added to the builder, which
/// decides the winner of any position collision.
///
/// # Example
///
/// ```rust
/// use conring_core::{HashAlgorithm, RingBuilder};
///
/// let ring = RingBuilder::new()
///     .algorithm(HashAlgorithm::Fnv)
///     .replicas(40)
///     .node(1u32, 1)
///     .node(2u32, 3)
///     .build();
///
/// assert_eq!(ring.len(), 160);
/// ```
#[derive(Debug, Clone)]
pub struct RingBuilder<N> {
    algorithm: HashAlgorithm,
    replicas: u32,
    nodes: Vec<(N, Vec<u8>, u32)>,
}

impl<N> Default for RingBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> RingBuilder<N> {
    /// Starts a builder with the default digest and replica count.
    pub fn new() -> Self {
        Self {
            algorithm: HashAlgorithm::default(),
            replicas: DEFAULT_REPLICAS,
            nodes: Vec::new(),
        }
    }

    /// Starts a builder from a configuration.
    pub fn from_config(config: &RingConfig) -> Self {
        Self::new().algorithm(config.hash).replicas(config.replicas)
    }

    /// Sets the digest.
    pub fn algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the virtual nodes per unit of weight.
    pub fn replicas(mut self, replicas: u32) -> Self {
        self.replicas = replicas;
        self
    }

    /// Adds a node identified by its own bytes.
    pub fn node(mut self, node: N, weight: u32) -> Self
    where
        N: ScalarIdentity,
    {
        let identity = node.identity_bytes();
        self.nodes.push((node, identity, weight));
        self
    }

    /// Adds a node identified by an explicit name.
    pub fn named_node(mut self, node: N, name: impl Into<Vec<u8>>, weight: u32) -> Self {
        self.nodes.push((node, name.into(), weight));
        self
    }

    /// Builds the ring.
    pub fn build(self) -> HashRing<N>
    where
        N: Clone,
    {
        let mut ring = HashRing::new(self.algorithm, self.replicas);
        for (node, identity, weight) in self.nodes {
            ring.insert_identity(&identity, node, weight);
        }
        ring
    }
}
