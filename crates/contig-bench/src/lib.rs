//! Benchmark workloads for the contig containers.
//!
//! - [`filled`]: an array of `0..len` built by appends
//! - [`scatter_positions`]: deterministic, well-spread insert positions

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use contig_array::DynamicArray;

/// An array holding `0..len`, built by `len` appends (so capacity follows
/// the doubling policy).
pub fn filled(len: u64) -> DynamicArray<u64> {
    let mut array = DynamicArray::new();
    for i in 0..len {
        array.push(i);
    }
    array
}

/// `count` insert positions, the k-th valid for an array of length `k`.
///
/// Multiplicative hashing keeps the sequence deterministic without an
/// RNG and spreads positions across the whole array.
pub fn scatter_positions(count: usize) -> Vec<usize> {
    (0..count)
        .map(|k| (k.wrapping_mul(2_654_435_761) >> 7) % (k + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_holds_sequence() {
        let array = filled(5);
        assert_eq!(array, [0, 1, 2, 3, 4]);
        assert_eq!(array.capacity(), 8);
    }

    #[test]
    fn positions_are_valid() {
        for (k, &p) in scatter_positions(500).iter().enumerate() {
            assert!(p <= k);
        }
    }
}
