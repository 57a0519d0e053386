//! Reusable element fixtures.
//!
//! Shared counters use `AtomicUsize` so the fixtures stay `Send + Sync`
//! and can cross `catch_unwind` boundaries. [`Counted`] uses thread-local
//! counters instead because `Default` takes no arguments; each test runs
//! on its own thread, so the counts do not leak between tests.

use std::cell::Cell;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Lifetime counters shared by a family of [`Tracked`] values.
#[derive(Debug, Default)]
pub struct Counters {
    constructed: AtomicUsize,
    cloned: AtomicUsize,
    dropped: AtomicUsize,
}

impl Counters {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Values built with [`Tracked::new`].
    pub fn constructed(&self) -> usize {
        self.constructed.load(Ordering::Relaxed)
    }

    /// Values built by `Clone::clone`.
    pub fn cloned(&self) -> usize {
        self.cloned.load(Ordering::Relaxed)
    }

    pub fn dropped(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Values currently alive: everything built minus everything dropped.
    pub fn live(&self) -> usize {
        self.constructed() + self.cloned() - self.dropped()
    }
}

/// An `i32` payload that reports its lifetime events to [`Counters`].
pub struct Tracked {
    value: i32,
    counters: Arc<Counters>,
}

impl Tracked {
    pub fn new(value: i32, counters: &Arc<Counters>) -> Self {
        counters.constructed.fetch_add(1, Ordering::Relaxed);
        Self {
            value,
            counters: Arc::clone(counters),
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.counters.cloned.fetch_add(1, Ordering::Relaxed);
        Self {
            value: self.value,
            counters: Arc::clone(&self.counters),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.counters.dropped.fetch_add(1, Ordering::Relaxed);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tracked").field(&self.value).finish()
    }
}

/// Builds [`Tracked`] values, panicking deterministically after a
/// configurable number of successful constructions.
///
/// Useful for checking that a failing element constructor leaves a
/// container exactly as it was.
pub struct FailingFactory {
    succeed_count: usize,
    counters: Arc<Counters>,
    call_count: AtomicUsize,
}

impl FailingFactory {
    /// Create a factory that succeeds `succeed_count` times then panics.
    pub fn new(succeed_count: usize) -> Self {
        Self {
            succeed_count,
            counters: Counters::new(),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Build a value, or panic if the success budget is spent.
    ///
    /// # Panics
    ///
    /// Panics on every call after the first `succeed_count`.
    pub fn make(&self, value: i32) -> Tracked {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            panic!(
                "deliberate failure after {} successful constructions",
                self.succeed_count
            );
        }
        Tracked::new(value, &self.counters)
    }

    /// How many times `make()` has been called, failures included.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Counters shared by every value this factory built.
    pub fn counters(&self) -> &Arc<Counters> {
        &self.counters
    }
}

/// A [`Counters`]-tracked element whose destructor can be armed to panic.
///
/// The drop is counted before the panic, so `live()` still balances.
/// An armed value does not panic while the thread is already unwinding.
pub struct PanicOnDrop {
    value: i32,
    armed: bool,
    counters: Arc<Counters>,
}

impl PanicOnDrop {
    /// A value whose destructor behaves normally.
    pub fn new(value: i32, counters: &Arc<Counters>) -> Self {
        counters.constructed.fetch_add(1, Ordering::Relaxed);
        Self {
            value,
            armed: false,
            counters: Arc::clone(counters),
        }
    }

    /// A value whose destructor panics.
    pub fn armed(value: i32, counters: &Arc<Counters>) -> Self {
        let mut element = Self::new(value, counters);
        element.armed = true;
        element
    }

    pub fn value(&self) -> i32 {
        self.value
    }
}

impl Drop for PanicOnDrop {
    fn drop(&mut self) {
        self.counters.dropped.fetch_add(1, Ordering::Relaxed);
        if self.armed && !std::thread::panicking() {
            panic!("deliberate failure while dropping {}", self.value);
        }
    }
}

impl fmt::Debug for PanicOnDrop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanicOnDrop")
            .field("value", &self.value)
            .field("armed", &self.armed)
            .finish()
    }
}

/// Remaining successful clones for a family of [`FailingClone`] values.
#[derive(Debug)]
pub struct CloneBudget {
    remaining: AtomicUsize,
}

impl CloneBudget {
    pub fn new(remaining: usize) -> Arc<Self> {
        Arc::new(Self {
            remaining: AtomicUsize::new(remaining),
        })
    }

    pub fn set(&self, remaining: usize) {
        self.remaining.store(remaining, Ordering::Relaxed);
    }

    pub fn remaining(&self) -> usize {
        self.remaining.load(Ordering::Relaxed)
    }

    fn spend(&self) {
        let spent = self
            .remaining
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1));
        if spent.is_err() {
            panic!("deliberate clone failure: budget exhausted");
        }
    }
}

/// A [`Tracked`] value whose `clone` panics when its [`CloneBudget`] is empty.
pub struct FailingClone {
    inner: Tracked,
    budget: Arc<CloneBudget>,
}

impl FailingClone {
    pub fn new(value: i32, counters: &Arc<Counters>, budget: &Arc<CloneBudget>) -> Self {
        Self {
            inner: Tracked::new(value, counters),
            budget: Arc::clone(budget),
        }
    }

    pub fn value(&self) -> i32 {
        self.inner.value()
    }
}

impl Clone for FailingClone {
    fn clone(&self) -> Self {
        self.budget.spend();
        Self {
            inner: self.inner.clone(),
            budget: Arc::clone(&self.budget),
        }
    }
}

impl PartialEq for FailingClone {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl fmt::Debug for FailingClone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FailingClone").field(&self.value()).finish()
    }
}

thread_local! {
    static DEFAULTS: Cell<usize> = const { Cell::new(0) };
    static DROPS: Cell<usize> = const { Cell::new(0) };
    static FAIL_AFTER: Cell<Option<usize>> = const { Cell::new(None) };
}

/// A `Default`-constructible element with per-thread lifetime counters.
///
/// `Counted::default()` is `Counted(0)`. Clones are not counted as
/// default constructions but their drops are counted.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Counted(pub i32);

impl Counted {
    /// Zero this thread's counters and clear any failure point.
    pub fn reset() {
        DEFAULTS.with(|c| c.set(0));
        DROPS.with(|c| c.set(0));
        FAIL_AFTER.with(|c| c.set(None));
    }

    /// Default constructions on this thread since the last reset.
    pub fn defaults() -> usize {
        DEFAULTS.with(Cell::get)
    }

    /// Drops on this thread since the last reset.
    pub fn drops() -> usize {
        DROPS.with(Cell::get)
    }

    /// Make `Default::default` panic once `successes` more default
    /// constructions have happened on this thread.
    pub fn fail_after(successes: usize) {
        FAIL_AFTER.with(|c| c.set(Some(successes)));
    }
}

impl Default for Counted {
    fn default() -> Self {
        FAIL_AFTER.with(|c| match c.get() {
            Some(0) => panic!("deliberate default-construction failure"),
            Some(n) => c.set(Some(n - 1)),
            None => {}
        });
        DEFAULTS.with(|c| c.set(c.get() + 1));
        Counted(0)
    }
}

impl Drop for Counted {
    fn drop(&mut self) {
        DROPS.with(|c| c.set(c.get() + 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[test]
    fn tracked_counts_lifetimes() {
        let counters = Counters::new();
        let a = Tracked::new(1, &counters);
        let b = a.clone();
        assert_eq!(counters.live(), 2);
        drop(a);
        drop(b);
        assert_eq!(counters.constructed(), 1);
        assert_eq!(counters.cloned(), 1);
        assert_eq!(counters.dropped(), 2);
        assert_eq!(counters.live(), 0);
    }

    #[test]
    fn factory_fails_after_budget() {
        let factory = FailingFactory::new(1);
        let first = factory.make(3);
        assert_eq!(first.value(), 3);
        assert!(catch_unwind(|| factory.make(4)).is_err());
        assert_eq!(factory.calls(), 2);
        assert!(catch_unwind(|| factory.make(5)).is_err());
        assert_eq!(factory.calls(), 3);
        assert_eq!(factory.counters().constructed(), 1);
    }

    #[test]
    fn armed_drop_panics_after_counting() {
        let counters = Counters::new();
        let quiet = PanicOnDrop::new(1, &counters);
        let loud = PanicOnDrop::armed(2, &counters);
        assert_eq!(loud.value(), 2);
        drop(quiet);
        assert!(catch_unwind(AssertUnwindSafe(move || drop(loud))).is_err());
        assert_eq!(counters.dropped(), 2);
        assert_eq!(counters.live(), 0);
    }

    #[test]
    fn clone_budget_is_shared() {
        let counters = Counters::new();
        let budget = CloneBudget::new(1);
        let a = FailingClone::new(1, &counters, &budget);
        let _b = a.clone();
        assert_eq!(budget.remaining(), 0);
        assert!(catch_unwind(|| a.clone()).is_err());
        budget.set(2);
        let _c = a.clone();
        assert_eq!(budget.remaining(), 1);
    }

    #[test]
    fn counted_failure_point() {
        Counted::reset();
        Counted::fail_after(1);
        let ok = Counted::default();
        assert_eq!(ok, Counted(0));
        assert!(catch_unwind(Counted::default).is_err());
        assert_eq!(Counted::defaults(), 1);
        drop(ok);
        assert!(Counted::drops() >= 1);
    }
}
