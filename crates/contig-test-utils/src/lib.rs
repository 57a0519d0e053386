//! Test utilities for contig development.
//!
//! Element types that make lifetimes and failures observable:
//!
//! - [`Tracked`] — counts constructions, clones and drops in shared [`Counters`].
//! - [`FailingFactory`] — builds `Tracked` values, panics after N calls.
//! - [`FailingClone`] — an element whose `clone` panics once a shared
//!   [`CloneBudget`] runs out.
//! - [`PanicOnDrop`] — a `Tracked`-style element whose destructor can be
//!   armed to panic.
//! - [`Counted`] — `Default`-constructible element with per-thread
//!   construction and drop counters and an optional failure point.
//!
//! [`init_logging`] installs `env_logger` for test binaries.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    CloneBudget, Counted, Counters, FailingClone, FailingFactory, PanicOnDrop, Tracked,
};

/// Route `log` records to the test harness's captured output.
///
/// Safe to call from every test; only the first call installs a logger.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
    log::trace!("test logging initialised");
}
