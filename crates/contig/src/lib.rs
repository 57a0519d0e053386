//! Contig: a growable contiguous array built from first principles.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the contig sub-crates. For most users, adding `contig` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use contig::prelude::*;
//!
//! let mut array = DynamicArray::new();
//! array.reserve(10);
//! for i in 0..5 {
//!     array.push(i);
//! }
//! assert_eq!(array.len(), 5);
//! assert_eq!(array.capacity(), 10);
//!
//! let copy = array.clone();
//! array.insert(0, -1);
//! assert_eq!(copy, [0, 1, 2, 3, 4]);
//! assert_eq!(array[0], -1);
//!
//! let squares = dyn_array![1, 4, 9];
//! assert_eq!(squares.iter().sum::<i32>(), 14);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`array`] | `contig-array` | `DynamicArray`, `IntoIter`, `dyn_array!` |
//! | [`block`] | `contig-block` | `MemoryBlock` and placement helpers |
//! | [`types`] | `contig-core` | `AllocError`, growth policy |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// The growable array (`contig-array`).
///
/// [`array::DynamicArray`] is also available in the [`prelude`].
pub use contig_array as array;

/// Raw storage (`contig-block`).
///
/// [`block::MemoryBlock`] owns uninitialized storage for a fixed number
/// of slots; [`block::uninit`] begins and ends element lifetimes in it.
pub use contig_block as block;

/// Shared types (`contig-core`): the allocation error and growth policy.
pub use contig_core as types;

pub use contig_array::dyn_array;

/// Common imports for typical contig usage.
///
/// ```rust
/// use contig::prelude::*;
/// ```
pub mod prelude {
    pub use contig_array::{dyn_array, DynamicArray, IntoIter};
    pub use contig_block::MemoryBlock;
    pub use contig_core::AllocError;
}
