//! Hash ring data structure.
//!
//! Holds a `BTreeMap<u32, N>` of virtual node positions plus the persistent
//! round-robin cursor. Lookup walks clockwise from the key's digest.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use super::position::{self, Position};
use crate::config::RingConfig;
use crate::error::{Error, Result};
use crate::hash::{HashAlgorithm, HashFunction};
use crate::node::ScalarIdentity;
use crate::vnode::{clamp_weight, VirtualNodeKeys};

/// Consistent hash ring over node values of type `N`.
///
/// Each logical node occupies `weight * replicas` positions. A key is served
/// by the first position at or after its digest, wrapping past the top of
/// the 32-bit space.
///
/// Node values are stored by value, one copy per virtual node, so `N`
/// should be cheap to clone: an integer id, or a
/// [`NodeHandle`](crate::node::NodeHandle) for richer node state.
///
/// The ring is single-owner: mutation (including round-robin selection,
/// which moves the shared cursor) needs `&mut self`. Share it across
/// threads behind the caller's own lock.
///
/// # Example
///
/// ```rust
/// use conring_core::{HashAlgorithm, HashRing};
///
/// let mut ring: HashRing<u64> = HashRing::new(HashAlgorithm::Murmur, 168);
/// ring.add_node(1, 1);
/// ring.add_node(2, 3);
///
/// let node = ring.lookup_bytes(b"apple").copied();
/// assert!(matches!(node, Some(1) | Some(2)));
/// ```
#[derive(Clone, Debug)]
pub struct HashRing<N> {
    pub(super) circle: BTreeMap<Position, N>,
    algorithm: HashAlgorithm,
    replicas: u32,
    /// Next entry for round-robin; `None` is the end-of-ring sentinel.
    pub(super) cursor: Option<Position>,
}

impl<N> Default for HashRing<N> {
    fn default() -> Self {
        Self::from_config(&RingConfig::default())
    }
}

impl<N> HashRing<N> {
    /// Creates an empty ring.
    ///
    /// # Arguments
    /// * `algorithm` - Digest for virtual nodes and keys
    /// * `replicas` - Virtual nodes per unit of weight (168 is the usual
    ///   choice; more smooths the distribution at the cost of memory and
    ///   insert time)
    pub fn new(algorithm: HashAlgorithm, replicas: u32) -> Self {
        Self {
            circle: BTreeMap::new(),
            algorithm,
            replicas,
            cursor: None,
        }
    }

    /// Creates an empty ring from a configuration.
    pub fn from_config(config: &RingConfig) -> Self {
        Self::new(config.hash, config.replicas)
    }

    /// Digest used by this ring.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Virtual nodes per unit of weight.
    pub fn replicas(&self) -> u32 {
        self.replicas
    }

    /// Number of virtual node entries on the ring.
    ///
    /// Inserting a node of weight `w` adds `w * replicas` entries minus any
    /// position collisions.
    pub fn len(&self) -> usize {
        self.circle.len()
    }

    /// True if the ring has no entries.
    pub fn is_empty(&self) -> bool {
        self.circle.is_empty()
    }

    /// True if some virtual node sits exactly at `position`.
    pub fn contains_position(&self, position: Position) -> bool {
        self.circle.contains_key(&position)
    }

    /// All entries in ascending position order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &N)> + '_ {
        self.circle.iter().map(|(&p, node)| (p, node))
    }

    /// Ring position of a byte-string key.
    #[inline]
    pub fn position_of(&self, key: &[u8]) -> Position {
        self.algorithm.digest(key)
    }

    /// Looks up the node serving a scalar key, hashed over its native bytes.
    ///
    /// # Returns
    /// `None` only if the ring is empty.
    pub fn lookup<K: ScalarIdentity>(&self, key: K) -> Option<&N> {
        key.with_identity(|bytes| self.lookup_bytes(bytes))
    }

    /// Looks up the node serving a byte-string key.
    ///
    /// # Returns
    /// `None` only if the ring is empty.
    pub fn lookup_bytes(&self, key: &[u8]) -> Option<&N> {
        position::lower_bound_wrapping(&self.circle, self.position_of(key)).map(|(_, node)| node)
    }

    /// Like [`lookup_bytes`](Self::lookup_bytes), reporting an empty ring as
    /// [`Error::EmptyRing`].
    pub fn try_lookup_bytes(&self, key: &[u8]) -> Result<&N> {
        self.lookup_bytes(key).ok_or(Error::EmptyRing)
    }

    /// Adds a node identified by its own bytes.
    ///
    /// `weight` is clamped to [`MAX_WEIGHT`](crate::vnode::MAX_WEIGHT); zero
    /// adds nothing. Positions already taken are overwritten, so the last
    /// insertion wins a collision.
    pub fn add_node(&mut self, node: N, weight: u32)
    where
        N: ScalarIdentity + Clone,
    {
        let identity = node.identity_bytes();
        self.insert_identity(&identity, node, weight);
    }

    /// Adds a node identified by an explicit name.
    ///
    /// Use this when the node value is a handle whose bytes are not a stable
    /// identity. Only `name` is hashed; `node` is stored as given.
    pub fn add_named_node(&mut self, node: N, name: &[u8], weight: u32)
    where
        N: Clone,
    {
        self.insert_identity(name, node, weight);
    }

    /// Removes the virtual nodes of a node identified by its own bytes.
    ///
    /// Regenerates the positions for `weight` and drops each one that is
    /// present. A weight larger than the one inserted is harmless; a
    /// smaller one leaves the remaining weight groups on the ring.
    ///
    /// # Returns
    /// Number of entries removed.
    pub fn remove_node(&mut self, node: &N, weight: u32) -> usize
    where
        N: ScalarIdentity,
    {
        let identity = node.identity_bytes();
        self.erase_identity(&identity, weight)
    }

    /// Removes the virtual nodes generated from `name`.
    ///
    /// # Returns
    /// Number of entries removed.
    pub fn remove_named_node(&mut self, name: &[u8], weight: u32) -> usize {
        self.erase_identity(name, weight)
    }

    pub(crate) fn insert_identity(&mut self, identity: &[u8], node: N, weight: u32)
    where
        N: Clone,
    {
        let weight = clamp_weight(weight);
        let mut added = 0usize;
        for pos in VirtualNodeKeys::new(identity, weight, self.replicas, &self.algorithm) {
            if self.circle.insert(pos, node.clone()).is_none() {
                added += 1;
            }
        }

        debug!(
            identity_len = identity.len(),
            weight,
            added,
            ring_size = self.circle.len(),
            "added node to ring"
        );
    }

    fn erase_identity(&mut self, identity: &[u8], weight: u32) -> usize {
        let weight = clamp_weight(weight);
        let mut removed = 0usize;
        for pos in VirtualNodeKeys::new(identity, weight, self.replicas, &self.algorithm) {
            if !self.circle.contains_key(&pos) {
                continue;
            }
            if self.cursor == Some(pos) {
                self.cursor = position::next_after(&self.circle, pos);
                trace!(removed = pos, cursor = ?self.cursor, "advanced round-robin cursor");
            }
            self.circle.remove(&pos);
            removed += 1;
        }

        debug!(
            identity_len = identity.len(),
            weight,
            removed,
            ring_size = self.circle.len(),
            "removed node from ring"
        );
        removed
    }
}

impl<N: PartialEq> HashRing<N> {
    /// Looks up the node serving a scalar key and a backup node.
    ///
    /// See [`lookup_bytes_with_backup`](Self::lookup_bytes_with_backup).
    pub fn lookup_with_backup<K: ScalarIdentity>(&self, key: K) -> Option<(&N, &N)> {
        key.with_identity(|bytes| self.lookup_bytes_with_backup(bytes))
    }

    /// Looks up the node serving a byte-string key and a backup node.
    ///
    /// The backup is the first node clockwise from the primary that differs
    /// from it. The search gives up after `replicas` steps and returns the
    /// node it stopped on, which equals the primary when the ring holds a
    /// single logical node. The round-robin cursor is not touched.
    ///
    /// # Returns
    /// `(primary, backup)`, or `None` only if the ring is empty.
    pub fn lookup_bytes_with_backup(&self, key: &[u8]) -> Option<(&N, &N)> {
        let mut walk = position::clockwise(&self.circle, self.position_of(key));
        let primary = walk.next()?;

        let mut backup = primary;
        let mut step = 0;
        while backup == primary && step < self.replicas {
            backup = walk.next()?;
            step += 1;
        }
        Some((primary, backup))
    }

    /// Number of distinct node values present.
    ///
    /// Linear in ring size times distinct count; intended for diagnostics.
    pub fn distinct_nodes(&self) -> usize {
        let mut seen: Vec<&N> = Vec::new();
        for node in self.circle.values() {
            if !seen.contains(&node) {
                seen.push(node);
            }
        }
        seen.len()
    }
}
