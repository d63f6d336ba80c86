//! FNV-1a digest with a trailing avalanche.

use super::traits::HashFunction;

const OFFSET_BASIS: u32 = 0x811C_9DC5;
const PRIME: u32 = 16_777_619;

/// 32-bit FNV-1a followed by a shift/xor/add finalizer.
///
/// The finalizer is not part of canonical FNV-1a; it is kept so positions
/// match rings built by existing deployments.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fnv1a;

impl HashFunction for Fnv1a {
    fn digest(&self, data: &[u8]) -> u32 {
        let mut hash = data
            .iter()
            .fold(OFFSET_BASIS, |h, &b| (h ^ u32::from(b)).wrapping_mul(PRIME));

        hash = hash.wrapping_add(hash << 13);
        hash ^= hash >> 7;
        hash = hash.wrapping_add(hash << 3);
        hash ^= hash >> 17;
        hash = hash.wrapping_add(hash << 5);
        hash
    }

    fn name(&self) -> &'static str {
        "Fnv1a"
    }
}
