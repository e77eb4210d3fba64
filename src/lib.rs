//! # Seeded Bloom
//!
//! A Bloom filter whose bit indices come from a fixed, reproducible pool of
//! seeded hash functions. Callers choose how many functions of the pool are
//! active on each `add`/`contains` call, which makes it easy to study the
//! trade-off between filter size, hash count and false-positive rate.

pub mod bits;
pub mod bloom;
pub mod builder;
pub mod hash;
pub mod params;

pub use bits::BitArray;
pub use bloom::{BloomFilter, BloomStats, MAX_SIZE};
pub use builder::BloomFilterBuilder;
pub use hash::{HashPool, SeededHash, DEFAULT_SEED, MAX_HASH_FUNCTIONS};
pub use params::{optimal_parameters, BloomParameters};

/// Common error types for the library
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BloomError {
    /// The filter or its hash pool cannot be built with the given parameters.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// An active hash count outside `1..=available` was requested.
    #[error("invalid hash count {requested}: expected 1..={available}")]
    InvalidHashCount { requested: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, BloomError>;
