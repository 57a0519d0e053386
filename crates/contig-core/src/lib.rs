//! Core types for the contig containers.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the storage and container crates: the
//! allocation error type and the growth policy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod growth;

pub use error::AllocError;
pub use growth::next_capacity;
