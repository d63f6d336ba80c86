//! Round-robin selection over the ring.
//!
//! A single cursor, shared by every round-robin call on a ring, walks the
//! positions in ascending order. After picking a node it skips ahead past
//! the run of entries owned by the same node, so successive calls tend to
//! land on different logical nodes. Over many calls each node is picked in
//! proportion to its number of runs, which follows its weight.

use super::position;
use super::ring::HashRing;
use crate::vnode::MAX_WEIGHT;

/// Skip-ahead bound used by [`HashRing::round_robin_with_backup`].
pub const ROUND_ROBIN_BACKUP_MAX_STEPS: usize = MAX_WEIGHT as usize;

impl<N: PartialEq> HashRing<N> {
    /// Picks the next node in round-robin order.
    ///
    /// The skip-ahead stops after `len / replicas` steps, roughly one per
    /// unit of weight on the ring.
    ///
    /// # Returns
    /// `None` only if the ring is empty.
    pub fn round_robin(&mut self) -> Option<&N> {
        let max_steps = self.round_robin_steps();
        let (picked, _) = self.advance_cursor(max_steps)?;
        self.circle.get(&picked)
    }

    /// Picks the next node in round-robin order plus the node the cursor
    /// lands on afterwards.
    ///
    /// The skip-ahead here is bounded by [`ROUND_ROBIN_BACKUP_MAX_STEPS`]
    /// rather than the ring-size bound of [`round_robin`](Self::round_robin),
    /// so the two calls can leave the cursor in different places. The
    /// backup may equal the primary.
    ///
    /// # Returns
    /// `(primary, backup)`, or `None` only if the ring is empty.
    pub fn round_robin_with_backup(&mut self) -> Option<(&N, &N)> {
        let (picked, next) = self.advance_cursor(ROUND_ROBIN_BACKUP_MAX_STEPS)?;
        Some((self.circle.get(&picked)?, self.circle.get(&next)?))
    }

    fn round_robin_steps(&self) -> usize {
        match self.replicas() {
            0 => 0,
            replicas => self.circle.len() / replicas as usize,
        }
    }

    /// Moves the cursor past the entry it points at and the entries that
    /// follow with the same node, up to `max_steps` moves.
    ///
    /// Returns the position picked and the new cursor position.
    fn advance_cursor(&mut self, max_steps: usize) -> Option<(u32, u32)> {
        let first = *self.circle.keys().next()?;
        let picked = self
            .cursor
            .filter(|pos| self.circle.contains_key(pos))
            .unwrap_or(first);
        let node = self.circle.get(&picked)?;

        let mut cursor = picked;
        let mut step = 0;
        while step < max_steps && self.circle.get(&cursor) == Some(node) {
            cursor = position::next_wrapping(&self.circle, cursor).unwrap_or(first);
            step += 1;
        }

        self.cursor = Some(cursor);
        Some((picked, cursor))
    }
}
