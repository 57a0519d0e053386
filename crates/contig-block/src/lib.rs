//! Raw storage for the contig containers.
//!
//! A [`MemoryBlock`] owns an uninitialized region sized for a fixed
//! number of `T` slots and nothing else: it never constructs, reads or
//! drops an element. Element lifetimes are the business of whoever owns
//! the block, which uses the placement helpers in [`uninit`] to begin
//! and end them over explicit slot ranges.
//!
//! ```text
//! MemoryBlock<T>            (allocation primitive)
//! ├── ptr ──► [ slot 0 | slot 1 | ... | slot capacity-1 ]
//! └── capacity
//!
//! uninit::{write_with, clone_from_slice, relocate, destroy}
//!     placement construction / destruction over slot ranges,
//!     each unwind-safe on its own
//! ```
//!
//! This crate and `contig-array` are the only places in the workspace
//! that contain `unsafe` code.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod block;
pub mod uninit;

pub use block::MemoryBlock;
pub use contig_core::AllocError;
