//! Builder for configuring Bloom filters

use crate::bloom::BloomFilter;
use crate::hash::DEFAULT_SEED;
use crate::params::optimal_parameters;
use crate::Result;

#[derive(Debug, Clone, PartialEq)]
enum Sizing {
    Manual {
        size: usize,
        num_hashes: usize,
    },
    Accuracy {
        expected_items: usize,
        fpr: f64,
        max_bits: Option<usize>,
    },
}

/// Builder for creating [`BloomFilter`] instances.
///
/// Provides two construction modes:
/// - [`with_size()`](Self::with_size): bit count and hash pool size given directly
/// - [`with_accuracy()`](Self::with_accuracy): derived from expected items and
///   a target false positive rate
///
/// Parameters are validated by [`build()`](Self::build), never clamped.
///
/// # Examples
///
/// ```
/// # use seeded_bloom::BloomFilterBuilder;
/// let filter = BloomFilterBuilder::with_accuracy(10_000, 0.01)
///     .seed(42)
///     .build()
///     .unwrap();
/// assert_eq!(filter.hash_function_count(), 7);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BloomFilterBuilder {
    sizing: Sizing,
    seed: u64,
}

impl BloomFilterBuilder {
    /// Manual sizing: `size` bits and a pool of `num_hashes` functions.
    pub fn with_size(size: usize, num_hashes: usize) -> Self {
        BloomFilterBuilder {
            sizing: Sizing::Manual { size, num_hashes },
            seed: DEFAULT_SEED,
        }
    }

    /// Optimal sizing for `expected_items` keys at false positive rate `fpr`.
    pub fn with_accuracy(expected_items: usize, fpr: f64) -> Self {
        BloomFilterBuilder {
            sizing: Sizing::Accuracy {
                expected_items,
                fpr,
                max_bits: None,
            },
            seed: DEFAULT_SEED,
        }
    }

    /// Sets the seed the hash pool is derived from (default: [`DEFAULT_SEED`]).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Caps the bit count chosen by [`with_accuracy()`](Self::with_accuracy);
    /// the hash count is then re-derived for the capped size. Ignored for
    /// [`with_size()`](Self::with_size).
    pub fn max_bits(mut self, bits: usize) -> Self {
        if let Sizing::Accuracy { max_bits, .. } = &mut self.sizing {
            *max_bits = Some(bits);
        }
        self
    }

    pub fn build(self) -> Result<BloomFilter> {
        let (size, num_hashes) = match self.sizing {
            Sizing::Manual { size, num_hashes } => (size, num_hashes),
            Sizing::Accuracy {
                expected_items,
                fpr,
                max_bits,
            } => {
                let params = optimal_parameters(expected_items, fpr, max_bits)?;
                (params.num_bits, params.num_hashes)
            }
        };
        BloomFilter::with_seed(size, num_hashes, self.seed)
    }
}
