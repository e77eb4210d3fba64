//! Sizing formulas for Bloom filters

use crate::{BloomError, Result};
use std::f64::consts::LN_2;

/// Bloom filter parameters derived from a capacity and a target rate
#[derive(Debug, Clone, PartialEq)]
pub struct BloomParameters {
    pub num_bits: usize,
    pub num_hashes: usize,
    pub expected_fpr: f64,
}

/// Optimal number of bits: m = -n * ln(p) / (ln(2))^2
pub fn optimal_num_bits(expected_elements: usize, desired_fpr: f64) -> usize {
    let n = expected_elements as f64;
    ((-n * desired_fpr.ln() / (LN_2 * LN_2)).ceil() as usize).max(1)
}

/// Optimal number of hash functions: k = (m/n) * ln(2), at least 1
pub fn optimal_num_hashes(num_bits: usize, expected_elements: usize) -> usize {
    if expected_elements == 0 {
        return 1;
    }
    let ratio = num_bits as f64 / expected_elements as f64;
    ((ratio * LN_2).round() as usize).max(1)
}

/// Probability that a key never added reads as present, for a filter of
/// `num_bits` bits holding `num_elements` keys, each added with `num_hashes`
/// functions: (1 - (1 - 1/m)^(k*n))^k
pub fn false_positive_probability(num_bits: usize, num_elements: usize, num_hashes: usize) -> f64 {
    if num_bits == 0 {
        return 1.0;
    }
    let m = num_bits as f64;
    let k = num_hashes as f64;
    let unset = (1.0 - 1.0 / m).powf(k * num_elements as f64);
    (1.0 - unset).powf(k)
}

/// Calculate optimal Bloom filter parameters for given constraints
pub fn optimal_parameters(
    expected_elements: usize,
    desired_fpr: f64,
    max_memory_bits: Option<usize>,
) -> Result<BloomParameters> {
    if expected_elements == 0 {
        return Err(BloomError::InvalidConfiguration(
            "Expected elements must be > 0".to_string(),
        ));
    }
    if !(desired_fpr > 0.0 && desired_fpr < 1.0) {
        return Err(BloomError::InvalidConfiguration(format!(
            "False positive rate must be in (0, 1), got {}",
            desired_fpr
        )));
    }

    let optimal_bits = optimal_num_bits(expected_elements, desired_fpr);

    // Apply memory constraint if given
    let num_bits = match max_memory_bits {
        Some(0) => {
            return Err(BloomError::InvalidConfiguration(
                "Memory limit must be > 0 bits".to_string(),
            ))
        }
        Some(max_bits) if optimal_bits > max_bits => max_bits,
        _ => optimal_bits,
    };

    let num_hashes = optimal_num_hashes(num_bits, expected_elements);

    Ok(BloomParameters {
        num_bits,
        num_hashes,
        expected_fpr: false_positive_probability(num_bits, expected_elements, num_hashes),
    })
}
