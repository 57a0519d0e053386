//! Growth policy for containers that reallocate on append.
//!
//! Capacity doubles starting from [`MIN_NON_ZERO_CAPACITY`]. Over N
//! sequential appends the total number of element transfers is bounded
//! by 2N, so append is O(1) amortized while a reallocation transiently
//! holds at most about twice the live footprint.
//!
//! The policy is fixed at compile time. Explicit reservations
//! (`reserve`, growing `resize`) bypass it and allocate exactly what
//! was asked for.

use crate::error::AllocError;

/// Multiplier applied to a non-empty capacity on growth.
pub const GROWTH_FACTOR: usize = 2;

/// Capacity of the first block allocated for an empty container.
pub const MIN_NON_ZERO_CAPACITY: usize = 1;

/// Capacity to grow to when a container with `current` slots is full.
///
/// Returns `max(1, 2 * current)`.
///
/// # Errors
///
/// Returns [`AllocError::CapacityOverflow`] if doubling overflows `usize`.
pub fn next_capacity(current: usize) -> Result<usize, AllocError> {
    if current == 0 {
        return Ok(MIN_NON_ZERO_CAPACITY);
    }
    current
        .checked_mul(GROWTH_FACTOR)
        .ok_or(AllocError::CapacityOverflow { requested: current })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grows_to_one() {
        assert_eq!(next_capacity(0), Ok(1));
    }

    #[test]
    fn doubling_sequence() {
        let mut cap = 0;
        let mut seen = Vec::new();
        for _ in 0..6 {
            cap = next_capacity(cap).unwrap();
            seen.push(cap);
        }
        assert_eq!(seen, [1, 2, 4, 8, 16, 32]);
    }

    #[test]
    fn overflow_is_reported() {
        let cap = usize::MAX / 2 + 1;
        assert_eq!(
            next_capacity(cap),
            Err(AllocError::CapacityOverflow { requested: cap })
        );
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn growth_is_strict(current in 0usize..(usize::MAX / 2)) {
                let next = next_capacity(current).unwrap();
                prop_assert!(next > current);
                prop_assert!(next <= current.max(1) * GROWTH_FACTOR);
            }
        }
    }
}
