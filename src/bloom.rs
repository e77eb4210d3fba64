//! Standard Bloom filter implementation
//!
//! A space-efficient probabilistic data structure for membership testing.
//! Every call names how many functions of the hash pool are active; a key
//! added with `k` functions is always found again with `k` or fewer.

use crate::bits::BitArray;
use crate::hash::{HashPool, SeededHash, DEFAULT_SEED};
use crate::{BloomError, Result};
use rand::Rng;
use tracing::debug;

/// Largest filter size in bits. Indices come from 32-bit hashes, so bits
/// past this point could never be set.
pub const MAX_SIZE: usize = u32::MAX as usize;

/// A standard Bloom filter
#[derive(Debug, Clone)]
pub struct BloomFilter {
    /// Bit array storing the filter data
    bits: BitArray,
    /// Hash functions used for this filter
    pool: HashPool,
    /// Number of accepted `add` calls (for statistics)
    count: usize,
}

impl BloomFilter {
    /// Create a new Bloom filter
    ///
    /// # Arguments
    /// * `size` - Number of bits in the filter
    /// * `num_hashes` - Number of hash functions in the pool
    ///
    /// The pool is derived from [`DEFAULT_SEED`], so two filters built with
    /// the same arguments behave identically.
    pub fn new(size: usize, num_hashes: usize) -> Result<Self> {
        Self::with_seed(size, num_hashes, DEFAULT_SEED)
    }

    /// Create a Bloom filter whose hash pool is derived from `seed`.
    pub fn with_seed(size: usize, num_hashes: usize, seed: u64) -> Result<Self> {
        let pool = HashPool::from_seed(seed, num_hashes).inspect_err(|err| {
            debug!(size, num_hashes, %err, "rejected bloom filter configuration");
        })?;
        Self::with_pool(size, pool)
    }

    /// Create a Bloom filter drawing its hash seeds from `rng`, once.
    pub fn with_rng<R: Rng + ?Sized>(
        size: usize,
        num_hashes: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let pool = HashPool::from_rng(rng, num_hashes).inspect_err(|err| {
            debug!(size, num_hashes, %err, "rejected bloom filter configuration");
        })?;
        Self::with_pool(size, pool)
    }

    /// Create a Bloom filter over an existing hash pool.
    pub fn with_pool(size: usize, pool: HashPool) -> Result<Self> {
        if size == 0 || size > MAX_SIZE {
            debug!(
                size,
                num_hashes = pool.len(),
                "rejected bloom filter configuration"
            );
            return Err(BloomError::InvalidConfiguration(format!(
                "Size must be in 1..={}, got {}",
                MAX_SIZE, size
            )));
        }

        debug!(size, hash_functions = pool.len(), "created bloom filter");

        Ok(BloomFilter {
            bits: BitArray::new(size),
            pool,
            count: 0,
        })
    }

    /// Insert a key into the filter using the first `k` hash functions.
    pub fn add<K: AsRef<[u8]>>(&mut self, key: K, k: usize) -> Result<()> {
        for idx in indices(&self.pool, self.bits.len(), key.as_ref(), k)? {
            self.bits.set(idx);
        }

        self.count += 1;
        Ok(())
    }

    /// Check if a key might be in the filter, using the first `k` hash functions.
    /// Returns true if the key might be present (with possible false positives)
    /// Returns false if the key is definitely not present
    pub fn contains<K: AsRef<[u8]>>(&self, key: K, k: usize) -> Result<bool> {
        let mut bit_indices = indices(&self.pool, self.bits.len(), key.as_ref(), k)?;
        Ok(bit_indices.all(|idx| self.bits.get(idx)))
    }

    /// Get the number of hash functions in the pool
    pub fn hash_function_count(&self) -> usize {
        self.pool.len()
    }

    /// The pool's seeds, in the order they are applied
    pub fn seeds(&self) -> &[u32] {
        self.pool.seeds()
    }

    /// Get the size (number of bits)
    pub fn size(&self) -> usize {
        self.bits.len()
    }

    /// Get the number of `add` calls accepted so far
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check if nothing has been added yet
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Get the current load factor (fraction of bits set)
    pub fn load_factor(&self) -> f64 {
        self.bits.count_ones() as f64 / self.bits.len() as f64
    }

    /// Estimated false positive rate for queries with `k` active functions,
    /// taken from the current fill: `load_factor^k`.
    pub fn estimated_fpr(&self, k: usize) -> Result<f64> {
        self.pool
            .prefix(k)
            .map(|_| self.load_factor().powi(k as i32))
    }

    /// The packed bit array: bit `i` is bit `i % 8` of byte `i / 8`.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits.to_bytes()
    }

    /// Get statistics about the filter
    pub fn stats(&self) -> BloomStats {
        let load_factor = self.load_factor();
        BloomStats {
            size: self.bits.len(),
            num_hash_functions: self.pool.len(),
            elements_inserted: self.count,
            bits_set: self.bits.count_ones(),
            load_factor,
            estimated_fpr: load_factor.powi(self.pool.len() as i32),
        }
    }
}

/// Bit indices for `key` under the first `k` functions of `pool`:
/// `h_i(key) mod size` for `i` in `0..k`.
fn indices<'a>(
    pool: &'a HashPool,
    size: usize,
    key: &'a [u8],
    k: usize,
) -> Result<impl Iterator<Item = usize> + 'a> {
    let functions = pool.prefix(k).inspect_err(|err| {
        debug!(%err, "rejected active hash count");
    })?;
    Ok(functions.map(move |hash_fn: SeededHash| hash_fn.index(key, size)))
}

/// Statistics about a Bloom filter
#[derive(Debug, Clone, PartialEq)]
pub struct BloomStats {
    pub size: usize,
    pub num_hash_functions: usize,
    pub elements_inserted: usize,
    pub bits_set: usize,
    pub load_factor: f64,
    /// False positive estimate with every pool function active
    pub estimated_fpr: f64,
}

impl std::fmt::Display for BloomStats {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "BloomFilter Stats:\n\
             - Size: {} bits\n\
             - Hash functions: {}\n\
             - Elements inserted: {}\n\
             - Bits set: {}\n\
             - Load factor: {:.3}\n\
             - Estimated FPR: {:.6}",
            self.size,
            self.num_hash_functions,
            self.elements_inserted,
            self.bits_set,
            self.load_factor,
            self.estimated_fpr
        )
    }
}
