//! Paul Hsieh's SuperFastHash.

use super::traits::HashFunction;

/// SuperFastHash over 4-byte groups read as two little-endian `u16`s.
///
/// Returns 0 for empty input.
#[derive(Clone, Copy, Debug, Default)]
pub struct Hsieh;

#[inline]
fn get16(data: &[u8]) -> u32 {
    u32::from(u16::from_le_bytes([data[0], data[1]]))
}

impl HashFunction for Hsieh {
    fn digest(&self, data: &[u8]) -> u32 {
        if data.is_empty() {
            return 0;
        }

        let mut hash: u32 = 0;
        let mut blocks = data.chunks_exact(4);
        for block in &mut blocks {
            hash = hash.wrapping_add(get16(block));
            let tmp = (get16(&block[2..]) << 11) ^ hash;
            hash = (hash << 16) ^ tmp;
            hash = hash.wrapping_add(hash >> 11);
        }

        let tail = blocks.remainder();
        match tail.len() {
            3 => {
                hash = hash.wrapping_add(get16(tail));
                hash ^= hash << 16;
                // the third byte is sign-extended
                hash ^= (tail[2] as i8 as i32 as u32) << 18;
                hash = hash.wrapping_add(hash >> 11);
            }
            2 => {
                hash = hash.wrapping_add(get16(tail));
                hash ^= hash << 11;
                hash = hash.wrapping_add(hash >> 17);
            }
            1 => {
                hash = hash.wrapping_add(u32::from(tail[0]));
                hash ^= hash << 10;
                hash = hash.wrapping_add(hash >> 1);
            }
            _ => {}
        }

        hash ^= hash << 3;
        hash = hash.wrapping_add(hash >> 5);
        hash ^= hash << 4;
        hash = hash.wrapping_add(hash >> 17);
        hash ^= hash << 25;
        hash = hash.wrapping_add(hash >> 6);
        hash
    }

    fn name(&self) -> &'static str {
        "Hsieh"
    }
}
