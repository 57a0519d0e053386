//! Error types for fallible allocation.
//!
//! Only resource failures are reported through these types. Contract
//! violations (out-of-range index, pop on empty) are assertions at the
//! call site and never surface as errors.

use std::alloc::Layout;
use std::error::Error;
use std::fmt;

/// Errors from the fallible allocation surface (`try_*` operations).
///
/// The infallible operations never return this type: they forward
/// out-of-memory to [`std::alloc::handle_alloc_error`] and panic on
/// capacity overflow instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The requested slot count cannot be expressed as a valid
    /// [`Layout`]: its byte size exceeds `isize::MAX`.
    CapacityOverflow {
        /// Number of element slots requested.
        requested: usize,
    },
    /// The global allocator could not satisfy the request.
    OutOfMemory {
        /// Layout that was passed to the allocator.
        layout: Layout,
    },
}

impl AllocError {
    /// Diverge the way the infallible surface does.
    ///
    /// `OutOfMemory` goes to [`std::alloc::handle_alloc_error`] so the
    /// process-wide allocation error hook sees it unchanged;
    /// `CapacityOverflow` panics.
    pub fn raise(self) -> ! {
        match self {
            Self::CapacityOverflow { .. } => panic!("capacity overflow"),
            Self::OutOfMemory { layout } => std::alloc::handle_alloc_error(layout),
        }
    }
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: {requested} slots exceed the addressable size")
            }
            Self::OutOfMemory { layout } => {
                write!(
                    f,
                    "allocation of {} bytes (align {}) failed",
                    layout.size(),
                    layout.align()
                )
            }
        }
    }
}

impl Error for AllocError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_requested_slots() {
        let err = AllocError::CapacityOverflow { requested: 42 };
        assert!(err.to_string().contains("42 slots"));
    }

    #[test]
    fn display_names_layout() {
        let layout = Layout::from_size_align(64, 8).unwrap();
        let err = AllocError::OutOfMemory { layout };
        assert_eq!(err.to_string(), "allocation of 64 bytes (align 8) failed");
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn raise_overflow_panics() {
        AllocError::CapacityOverflow { requested: usize::MAX }.raise();
    }

    #[test]
    fn is_std_error() {
        fn assert_error<E: Error + Send + Sync + 'static>() {}
        assert_error::<AllocError>();
    }
}
