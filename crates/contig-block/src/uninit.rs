//! Placement construction and destruction over raw slot ranges.
//!
//! Each helper begins or ends the lifetimes of a contiguous run of
//! elements at a caller-supplied address. The constructing helpers are
//! unwind-safe on their own: if producing the k-th element panics, the
//! k-1 elements already written are dropped before the panic continues,
//! so the range is left exactly as uninitialized as it was found.
//!
//! None of these touch the caller's length bookkeeping. Commit the new
//! length only after a helper returns.

use std::mem;
use std::ptr;

/// Drops the constructed prefix of a range if construction unwinds.
struct PartialRange<T> {
    start: *mut T,
    initialized: usize,
}

impl<T> Drop for PartialRange<T> {
    fn drop(&mut self) {
        // SAFETY: exactly `initialized` elements were written from `start`.
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.start, self.initialized)) }
    }
}

/// Construct `count` elements at `dst..dst + count`, each produced by `make`.
///
/// If `make` panics, the elements built so far are dropped and the panic
/// resumes with the range uninitialized.
///
/// # Safety
///
/// `dst` must be valid for writes of `count` consecutive `T` and those
/// slots must not hold live values (they are overwritten, not dropped).
pub unsafe fn write_with<T>(dst: *mut T, count: usize, mut make: impl FnMut() -> T) {
    let mut guard = PartialRange {
        start: dst,
        initialized: 0,
    };
    while guard.initialized < count {
        // SAFETY: `initialized < count`, so the slot is in the caller's range.
        unsafe { dst.add(guard.initialized).write(make()) };
        guard.initialized += 1;
    }
    mem::forget(guard);
}

/// Construct clones of every element of `src` at `dst..dst + src.len()`.
///
/// If a clone panics, the clones made so far are dropped and the panic
/// resumes with the destination uninitialized. `src` is never modified.
///
/// # Safety
///
/// Same as [`write_with`] with `count = src.len()`; additionally the
/// destination must not overlap `src`.
pub unsafe fn clone_from_slice<T: Clone>(src: &[T], dst: *mut T) {
    let mut guard = PartialRange {
        start: dst,
        initialized: 0,
    };
    for item in src {
        // SAFETY: `initialized < src.len()`, inside the caller's range.
        unsafe { dst.add(guard.initialized).write(item.clone()) };
        guard.initialized += 1;
    }
    mem::forget(guard);
}

/// Move `count` elements from `src` to `dst` by bitwise relocation.
///
/// Relocation cannot fail. Afterwards the source slots are logically
/// uninitialized: ownership of every value now lives at `dst`, and the
/// source must be released without dropping them.
///
/// # Safety
///
/// `src` must hold `count` live values, `dst` must be valid for `count`
/// writes of uninitialized storage, and the ranges must not overlap.
pub unsafe fn relocate<T>(src: *const T, dst: *mut T, count: usize) {
    // SAFETY: forwarded from the caller.
    unsafe { ptr::copy_nonoverlapping(src, dst, count) }
}

/// Drop `count` live elements starting at `start`, in index order.
///
/// # Safety
///
/// `start..start + count` must hold live values that nobody else will
/// drop or read again.
pub unsafe fn destroy<T>(start: *mut T, count: usize) {
    // SAFETY: forwarded from the caller.
    unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(start, count)) }
}
