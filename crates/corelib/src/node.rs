//! Node identity for the consistent hash ring.
//!
//! A node's position on the ring is derived from an identity byte string.
//! Two flavors are supported:
//!
//! - **Scalar identity**: integer-like values whose own in-memory bytes are
//!   the identity ([`ScalarIdentity`]). The same trait drives scalar keys.
//! - **Named identity**: any value paired with an explicit name at insert
//!   time. [`NodeHandle`] is the usual value type here: a shared reference
//!   whose equality is pointer identity, so the ring never looks inside it.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Values whose fixed-size native byte representation is their identity.
///
/// Implemented for the primitive integers and byte arrays. The bytes are
/// native-endian, matching what a raw memory copy of the value would see.
pub trait ScalarIdentity {
    /// Calls `f` with the identity bytes of `self`.
    fn with_identity<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R;

    /// Appends the identity bytes of `self` to `buf`.
    fn write_identity(&self, buf: &mut Vec<u8>) {
        self.with_identity(|bytes| buf.extend_from_slice(bytes));
    }

    /// Returns the identity bytes as an owned buffer.
    fn identity_bytes(&self) -> Vec<u8> {
        self.with_identity(|bytes| bytes.to_vec())
    }
}

macro_rules! impl_scalar_identity {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ScalarIdentity for $ty {
                #[inline]
                fn with_identity<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
                    f(&self.to_ne_bytes())
                }
            }
        )*
    };
}

impl_scalar_identity!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl<const N: usize> ScalarIdentity for [u8; N] {
    #[inline]
    fn with_identity<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(self)
    }
}

impl<T: ScalarIdentity + ?Sized> ScalarIdentity for &T {
    #[inline]
    fn with_identity<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        (**self).with_identity(f)
    }
}

/// Opaque shared handle to caller-owned node state.
///
/// Equality is by pointer: two handles are the same node only if they
/// point at the same allocation. Keep this cheap to clone; the ring stores
/// one clone per virtual node.
pub struct NodeHandle<T>(Arc<T>);

impl<T> NodeHandle<T> {
    /// Wraps `value` in a new handle.
    pub fn new(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Wraps an existing shared value.
    pub fn from_arc(value: Arc<T>) -> Self {
        Self(value)
    }

    /// Returns the shared value.
    pub fn as_arc(&self) -> &Arc<T> {
        &self.0
    }
}

impl<T> Clone for NodeHandle<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> PartialEq for NodeHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Eq for NodeHandle<T> {}

impl<T> std::hash::Hash for NodeHandle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl<T> Deref for NodeHandle<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: fmt::Debug> fmt::Debug for NodeHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeHandle").field(&*self.0).finish()
    }
}
