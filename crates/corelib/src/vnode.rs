//! Virtual node identifiers.
//!
//! Each logical node is placed on the ring `weight * replicas` times. The
//! identifier hashed for one placement is the node's identity bytes followed
//! by the decimal text of the weight group `w` and then of the replica index
//! `i`, with no separator:
//!
//! ```text
//! identity ++ "{w}" ++ "{i}"      e.g. b"cache-a" ++ "0" ++ "17" -> b"cache-a017"
//! ```
//!
//! The format is part of the ring's compatibility contract: changing it moves
//! every virtual node. Since `w` stays below [`MAX_WEIGHT`] it always
//! renders as a single digit, so distinct `(w, i)` pairs never share an
//! identifier.

use std::io::Write;

use crate::hash::HashFunction;

/// Largest accepted weight; larger values are clamped.
pub const MAX_WEIGHT: u32 = 10;

/// Weight used when the caller has no preference.
pub const DEFAULT_WEIGHT: u32 = 1;

/// Clamps a requested weight into `[0, MAX_WEIGHT]`.
#[inline]
pub fn clamp_weight(weight: u32) -> u32 {
    weight.min(MAX_WEIGHT)
}

/// Iterator over the ring positions of one logical node.
///
/// Yields one position per `(w, i)` pair in `w`-major order. The identifier
/// buffer is reused between steps, so generating all positions for a node
/// allocates once.
///
/// # Example
///
/// ```rust
/// use conring_core::hash::HashAlgorithm;
/// use conring_core::vnode::VirtualNodeKeys;
///
/// let positions: Vec<u32> =
///     VirtualNodeKeys::new(b"node-a", 2, 4, &HashAlgorithm::Murmur).collect();
/// assert_eq!(positions.len(), 8);
/// ```
pub struct VirtualNodeKeys<'a, H: HashFunction> {
    hasher: &'a H,
    buf: Vec<u8>,
    identity_len: usize,
    weight: u32,
    replicas: u32,
    w: u32,
    i: u32,
}

impl<'a, H: HashFunction> VirtualNodeKeys<'a, H> {
    /// Creates the position generator for `identity`.
    ///
    /// `weight` is clamped to [`MAX_WEIGHT`]; a weight of zero yields nothing.
    pub fn new(identity: &[u8], weight: u32, replicas: u32, hasher: &'a H) -> Self {
        // two u32 renderings are at most 20 bytes
        let mut buf = Vec::with_capacity(identity.len() + 20);
        buf.extend_from_slice(identity);
        Self {
            hasher,
            buf,
            identity_len: identity.len(),
            weight: clamp_weight(weight),
            replicas,
            w: 0,
            i: 0,
        }
    }

    /// Renders the identifier for `(w, i)` into the internal buffer.
    fn render(&mut self, w: u32, i: u32) -> &[u8] {
        self.buf.truncate(self.identity_len);
        // writing into a Vec cannot fail
        let _ = write!(self.buf, "{w}{i}");
        &self.buf
    }
}

impl<H: HashFunction> Iterator for VirtualNodeKeys<'_, H> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.replicas == 0 || self.w >= self.weight {
            return None;
        }

        let (w, i) = (self.w, self.i);
        self.i += 1;
        if self.i == self.replicas {
            self.i = 0;
            self.w += 1;
        }

        let hasher = self.hasher;
        Some(hasher.digest(self.render(w, i)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.replicas == 0 || self.w >= self.weight {
            0
        } else {
            (u64::from(self.weight - self.w) * u64::from(self.replicas) - u64::from(self.i)) as usize
        };
        (remaining, Some(remaining))
    }
}

impl<H: HashFunction> ExactSizeIterator for VirtualNodeKeys<'_, H> {}

/// Renders a single virtual node identifier.
///
/// Mostly useful for diagnostics; the ring itself uses [`VirtualNodeKeys`].
pub fn vnode_identifier(identity: &[u8], w: u32, i: u32) -> Vec<u8> {
    let mut buf = Vec::with_capacity(identity.len() + 20);
    buf.extend_from_slice(identity);
    let _ = write!(buf, "{w}{i}");
    buf
}
