//! Circular navigation over the ordered position map.
//!
//! Positions are `u32` digests kept in a `BTreeMap`. The map is read as a
//! circle: the successor of the largest position is the smallest one.

use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

/// A point on the 32-bit ring.
pub type Position = u32;

/// First entry at or after `position`, wrapping to the smallest entry.
///
/// Returns `None` only for an empty map.
#[inline]
pub(crate) fn lower_bound_wrapping<N>(
    circle: &BTreeMap<Position, N>,
    position: Position,
) -> Option<(Position, &N)> {
    circle
        .range(position..)
        .next()
        .or_else(|| circle.iter().next())
        .map(|(&p, node)| (p, node))
}

/// Entry strictly after `position`, or `None` past the last entry.
#[inline]
pub(crate) fn next_after<N>(circle: &BTreeMap<Position, N>, position: Position) -> Option<Position> {
    circle
        .range((Excluded(position), Unbounded))
        .next()
        .map(|(&p, _)| p)
}

/// Entry strictly after `position`, wrapping to the smallest entry.
#[inline]
pub(crate) fn next_wrapping<N>(
    circle: &BTreeMap<Position, N>,
    position: Position,
) -> Option<Position> {
    next_after(circle, position).or_else(|| circle.keys().next().copied())
}

/// Endless clockwise walk of node values starting at the lower bound of
/// `position`. Yields nothing for an empty map.
pub(crate) fn clockwise<N>(
    circle: &BTreeMap<Position, N>,
    position: Position,
) -> impl Iterator<Item = &N> + '_ {
    circle
        .range(position..)
        .chain(circle.range(..position))
        .map(|(_, node)| node)
        .cycle()
}
