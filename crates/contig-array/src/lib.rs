//! Growable contiguous array built directly on raw memory.
//!
//! [`DynamicArray`] owns one [`MemoryBlock`] and a length. Slots
//! `[0, len)` hold live elements, slots `[len, capacity)` are raw
//! storage. The array decides exactly when storage is allocated and when
//! element lifetimes begin and end; the block only allocates.
//!
//! # Architecture
//!
//! ```text
//! DynamicArray<T>
//! ├── MemoryBlock<T>   (contig-block: allocate / address / swap)
//! │   └── [ live 0 .. len | raw len .. capacity ]
//! └── len
//!
//! growth: next_capacity = max(1, 2 × capacity)   (contig-core::growth)
//! ```
//!
//! # Failure guarantees
//!
//! A panicking element constructor, `Default` or `Clone` propagates to
//! the caller; nothing is leaked or dropped twice.
//!
//! | Operation | On panic |
//! |---|---|
//! | `push` / `emplace_back_with` | unchanged |
//! | `insert` / `emplace_with` (either path) | unchanged |
//! | `reserve`, growing `resize`, reallocating `clone_from` | unchanged (capacity may have grown for `resize`) |
//! | `remove` / `erase` | element already removed, array consistent |
//! | non-reallocating `clone_from` | valid, contents unspecified |
//!
//! Every transfer between blocks is a bitwise relocation, which cannot
//! fail for any Rust type, so reallocation never needs to duplicate
//! elements. Duplication happens only in `clone` / `clone_from`.
//!
//! # Invalidation
//!
//! Any operation that reallocates or shifts invalidates raw pointers
//! obtained from [`DynamicArray::as_ptr`] and friends. Borrowed
//! iterators are protected by the borrow checker.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod array;
mod clone;
mod edit;
pub mod iter;
mod macros;
mod traits;

pub use array::DynamicArray;
pub use contig_block::MemoryBlock;
pub use contig_core::AllocError;
pub use iter::IntoIter;
