//! Fixed-length bit array backing a Bloom filter.
//!
//! Bit `i` lives in byte `i / 8` at position `i % 8`, least-significant bit
//! first. [`BitArray::to_bytes`] exposes exactly that layout.

use bit_vec::BitVec;

/// A zero-initialised array of bits that never changes length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitArray {
    bits: BitVec,
}

impl BitArray {
    pub fn new(len: usize) -> Self {
        BitArray {
            bits: BitVec::from_elem(len, false),
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Set bit `i`. Setting an already-set bit is a no-op.
    ///
    /// # Panics
    /// Panics if `i >= len()`.
    #[inline]
    pub fn set(&mut self, i: usize) {
        self.bits.set(i, true);
    }

    /// Test bit `i`; out-of-range indices read as unset.
    #[inline]
    pub fn get(&self, i: usize) -> bool {
        self.bits.get(i).unwrap_or(false)
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.bits
            .storage()
            .iter()
            .map(|word| word.count_ones() as usize)
            .sum()
    }

    /// The packed bytes, `ceil(len / 8)` of them, padding bits zero.
    pub fn to_bytes(&self) -> Vec<u8> {
        // BitVec keeps bit i in u32 word i / 32 at position i % 32, so the
        // little-endian bytes of each word are already in byte-per-8-bits order.
        self.bits
            .storage()
            .iter()
            .flat_map(|word| word.to_le_bytes())
            .take(self.bits.len().div_ceil(8))
            .collect()
    }
}
