//! MurmurHash2 with a length-derived seed.

use super::traits::HashFunction;

const M: u32 = 0x5bd1_e995;
const R: u32 = 24;
const SEED_FACTOR: u32 = 0xdead_beef;

/// MurmurHash2 (32-bit) seeded with `0xdeadbeef * len`.
///
/// This is the ring's default digest.
#[derive(Clone, Copy, Debug, Default)]
pub struct Murmur2;

impl HashFunction for Murmur2 {
    fn digest(&self, data: &[u8]) -> u32 {
        let len = data.len() as u32;
        let seed = SEED_FACTOR.wrapping_mul(len);
        let mut h = seed ^ len;

        let mut blocks = data.chunks_exact(4);
        for block in &mut blocks {
            let mut k = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
            k = k.wrapping_mul(M);
            k ^= k >> R;
            k = k.wrapping_mul(M);

            h = h.wrapping_mul(M);
            h ^= k;
        }

        let tail = blocks.remainder();
        if tail.len() >= 3 {
            h ^= u32::from(tail[2]) << 16;
        }
        if tail.len() >= 2 {
            h ^= u32::from(tail[1]) << 8;
        }
        if !tail.is_empty() {
            h ^= u32::from(tail[0]);
            h = h.wrapping_mul(M);
        }

        h ^= h >> 13;
        h = h.wrapping_mul(M);
        h ^= h >> 15;
        h
    }

    fn name(&self) -> &'static str {
        "Murmur2"
    }
}
