//! Seeded hash functions for Bloom filters
//!
//! Every function in a pool is the same 32-bit xxHash routine run with a
//! different seed, so a pool is just an ordered list of seeds.

use crate::{BloomError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::fmt;
use xxhash_rust::xxh32::xxh32;

/// Seed used by [`HashPool::from_seed`] callers that do not pick their own.
pub const DEFAULT_SEED: u64 = 9001;

/// Largest number of hash functions a pool may hold.
pub const MAX_HASH_FUNCTIONS: usize = i16::MAX as usize;

/// A single hash function: `xxh32(key, seed)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeededHash {
    seed: u32,
}

impl SeededHash {
    pub fn new(seed: u32) -> Self {
        SeededHash { seed }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Hash the raw bytes of a key.
    #[inline]
    pub fn hash(&self, key: &[u8]) -> u32 {
        xxh32(key, self.seed)
    }

    /// Hash a key and reduce it to a bit index in `0..modulus`.
    #[inline]
    pub fn index(&self, key: &[u8], modulus: usize) -> usize {
        (self.hash(key) as u64 % modulus as u64) as usize
    }
}

impl fmt::Display for SeededHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "xxh32-{:08x}", self.seed)
    }
}

/// An ordered, immutable pool of distinct seeds.
///
/// Position matters: a filter using `k` active functions always uses the
/// first `k` seeds of its pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashPool {
    seeds: Box<[u32]>,
}

impl HashPool {
    /// Derive `count` seeds from a `StdRng` seeded with `seed`.
    ///
    /// The same `(seed, count)` always yields the same pool, and a longer
    /// pool built from the same seed extends a shorter one.
    pub fn from_seed(seed: u64, count: usize) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::from_rng(&mut rng, count)
    }

    /// Draw `count` distinct seeds from a caller-supplied random source.
    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Result<Self> {
        check_count(count)?;

        let mut seen = HashSet::with_capacity(count);
        let mut seeds = Vec::with_capacity(count);
        while seeds.len() < count {
            let seed: u32 = rng.gen();
            if seen.insert(seed) {
                seeds.push(seed);
            }
        }

        Ok(HashPool {
            seeds: seeds.into_boxed_slice(),
        })
    }

    /// Build a pool from explicit seeds. Seeds must be non-empty and distinct.
    pub fn from_seeds(seeds: Vec<u32>) -> Result<Self> {
        check_count(seeds.len())?;

        let mut seen = HashSet::with_capacity(seeds.len());
        if let Some(dup) = seeds.iter().find(|&&s| !seen.insert(s)) {
            return Err(BloomError::InvalidConfiguration(format!(
                "Duplicate hash seed {}",
                dup
            )));
        }

        Ok(HashPool {
            seeds: seeds.into_boxed_slice(),
        })
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    /// Always false: a pool holds at least one function.
    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    pub fn seeds(&self) -> &[u32] {
        &self.seeds
    }

    pub fn get(&self, i: usize) -> Option<SeededHash> {
        self.seeds.get(i).copied().map(SeededHash::new)
    }

    /// The first `k` functions of the pool, failing unless `1 <= k <= len()`.
    pub fn prefix(&self, k: usize) -> Result<impl Iterator<Item = SeededHash> + '_> {
        if k == 0 || k > self.seeds.len() {
            return Err(BloomError::InvalidHashCount {
                requested: k,
                available: self.seeds.len(),
            });
        }
        Ok(self.seeds[..k].iter().copied().map(SeededHash::new))
    }
}

fn check_count(count: usize) -> Result<()> {
    if count == 0 {
        return Err(BloomError::InvalidConfiguration(
            "Number of hash functions must be > 0".to_string(),
        ));
    }
    if count > MAX_HASH_FUNCTIONS {
        return Err(BloomError::InvalidConfiguration(format!(
            "Number of hash functions must not exceed {}, got {}",
            MAX_HASH_FUNCTIONS, count
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_hash_deterministic() {
        let hasher = SeededHash::new(7);
        assert_eq!(hasher.hash(b"alpha"), hasher.hash(b"alpha"));
        assert_eq!(hasher.hash(b"alpha"), xxh32(b"alpha", 7));
    }

    #[test]
    fn test_seeded_hash_index_in_range() {
        let hasher = SeededHash::new(123);
        for key in [&b""[..], b"a", b"alpha", b"a much longer key than the others"] {
            assert!(hasher.index(key, 100) < 100);
            assert_eq!(hasher.index(key, 1), 0);
        }
    }

    #[test]
    fn test_seeds_change_hashes() {
        let a = SeededHash::new(1);
        let b = SeededHash::new(2);
        assert_ne!(a.hash(b"alpha"), b.hash(b"alpha"));
    }

    #[test]
    fn test_pool_from_seed_reproducible() {
        let first = HashPool::from_seed(42, 8).unwrap();
        let second = HashPool::from_seed(42, 8).unwrap();
        assert_eq!(first, second);

        let shorter = HashPool::from_seed(42, 3).unwrap();
        assert_eq!(shorter.seeds(), &first.seeds()[..3]);

        let other = HashPool::from_seed(43, 8).unwrap();
        assert_ne!(first, other);
    }

    #[test]
    fn test_pool_seeds_distinct() {
        let pool = HashPool::from_seed(DEFAULT_SEED, 64).unwrap();
        let unique: HashSet<_> = pool.seeds().iter().collect();
        assert_eq!(unique.len(), 64);
    }

    #[test]
    fn test_pool_rejects_empty() {
        assert!(matches!(
            HashPool::from_seed(1, 0),
            Err(BloomError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            HashPool::from_seeds(vec![]),
            Err(BloomError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_pool_rejects_oversized() {
        for count in [MAX_HASH_FUNCTIONS + 1, usize::MAX] {
            assert!(matches!(
                HashPool::from_seed(1, count),
                Err(BloomError::InvalidConfiguration(_))
            ));
        }
        assert!(matches!(
            HashPool::from_seeds((0..=MAX_HASH_FUNCTIONS as u32).collect()),
            Err(BloomError::InvalidConfiguration(_))
        ));

        let pool = HashPool::from_seed(1, MAX_HASH_FUNCTIONS).unwrap();
        assert_eq!(pool.len(), MAX_HASH_FUNCTIONS);
    }

    #[test]
    fn test_pool_rejects_duplicate_seeds() {
        let err = HashPool::from_seeds(vec![1, 2, 1]).unwrap_err();
        assert_eq!(
            err,
            BloomError::InvalidConfiguration("Duplicate hash seed 1".to_string())
        );
    }

    #[test]
    fn test_pool_prefix() {
        let pool = HashPool::from_seeds(vec![10, 20, 30]).unwrap();

        let seeds: Vec<u32> = pool.prefix(2).unwrap().map(|h| h.seed()).collect();
        assert_eq!(seeds, vec![10, 20]);
        assert_eq!(pool.get(2), Some(SeededHash::new(30)));
        assert_eq!(pool.get(3), None);

        assert!(matches!(
            pool.prefix(0),
            Err(BloomError::InvalidHashCount {
                requested: 0,
                available: 3
            })
        ));
        assert!(matches!(
            pool.prefix(4),
            Err(BloomError::InvalidHashCount {
                requested: 4,
                available: 3
            })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(SeededHash::new(255).to_string(), "xxh32-000000ff");
    }
}
