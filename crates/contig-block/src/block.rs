//! Fixed-capacity raw storage.
//!
//! [`MemoryBlock`] is the leaf allocation primitive: a pointer to storage
//! for exactly `capacity` values of `T`, plus that capacity. It has no
//! notion of which slots hold live values, so it never reads or drops
//! one. Its owner must end every element lifetime it began before the
//! block is released.

use std::alloc::{self, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::mem::{self, MaybeUninit};
use std::ops::{Index, IndexMut};
use std::ptr::NonNull;
use std::slice;

use contig_core::AllocError;

/// An owned, uninitialized region with room for `capacity` values of `T`.
///
/// The handle is either empty (capacity 0, no storage) or refers to
/// storage allocated for exactly `capacity` slots. Ownership is
/// exclusive: a block is moved or swapped, never duplicated, so it does
/// not implement `Clone`.
///
/// ```compile_fail
/// use contig_block::MemoryBlock;
///
/// let block = MemoryBlock::<u32>::with_capacity(4);
/// let copy = block.clone();
/// ```
///
/// Zero-sized element types never reach the allocator; their blocks
/// still report the capacity they were created with.
pub struct MemoryBlock<T> {
    /// Start of the storage. Dangling when nothing was allocated.
    ptr: NonNull<T>,
    /// Number of `T` slots the storage holds.
    capacity: usize,
    _owns: PhantomData<T>,
}

// SAFETY: the block exclusively owns its storage and hands out access to
// it only through `&self` / `&mut self`, so it is as thread-safe as `T`.
unsafe impl<T: Send> Send for MemoryBlock<T> {}
// SAFETY: see above.
unsafe impl<T: Sync> Sync for MemoryBlock<T> {}

impl<T> MemoryBlock<T> {
    /// An empty handle. Does not allocate.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            _owns: PhantomData,
        }
    }

    /// Allocate raw storage for exactly `capacity` slots.
    ///
    /// `capacity == 0` yields an empty handle without calling the
    /// allocator.
    ///
    /// # Panics
    ///
    /// Panics with `"capacity overflow"` if the byte size exceeds
    /// `isize::MAX`. Allocation failure is forwarded to
    /// [`std::alloc::handle_alloc_error`].
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(block) => block,
            Err(err) => err.raise(),
        }
    }

    /// Allocate raw storage for exactly `capacity` slots, reporting
    /// failure instead of diverging.
    ///
    /// # Errors
    ///
    /// - [`AllocError::CapacityOverflow`] if `capacity` slots of `T`
    ///   cannot be described by a [`Layout`].
    /// - [`AllocError::OutOfMemory`] if the global allocator returns null.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        if capacity == 0 {
            return Ok(Self::empty());
        }
        let layout = Layout::array::<T>(capacity)
            .map_err(|_| AllocError::CapacityOverflow { requested: capacity })?;
        if layout.size() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                capacity,
                _owns: PhantomData,
            });
        }
        // SAFETY: `layout` has a non-zero size.
        let raw = unsafe { alloc::alloc(layout) };
        let ptr = NonNull::new(raw.cast::<T>()).ok_or(AllocError::OutOfMemory { layout })?;
        log::trace!(
            "allocated block: {capacity} slots, {} bytes",
            layout.size()
        );
        Ok(Self {
            ptr,
            capacity,
            _owns: PhantomData,
        })
    }

    /// Number of slots this block holds.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// True for the empty handle.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.capacity == 0
    }

    /// Address of slot 0. Dangling (but aligned) for an empty block.
    #[must_use]
    pub const fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Mutable address of slot 0. Dangling (but aligned) for an empty block.
    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Address of the slot at `offset`.
    ///
    /// `offset == capacity` (one past the end) is allowed for pointer
    /// arithmetic but must not be dereferenced.
    ///
    /// # Panics
    ///
    /// Panics if `offset > capacity`.
    #[must_use]
    pub fn slot(&self, offset: usize) -> *const T {
        self.check_offset(offset);
        // SAFETY: `offset <= capacity`, so the result stays within the
        // allocation or one past its end.
        unsafe { self.ptr.as_ptr().add(offset) }
    }

    /// Mutable address of the slot at `offset`. Same bounds as [`slot`](Self::slot).
    ///
    /// # Panics
    ///
    /// Panics if `offset > capacity`.
    #[must_use]
    pub fn slot_mut(&mut self, offset: usize) -> *mut T {
        self.check_offset(offset);
        // SAFETY: as in `slot`.
        unsafe { self.ptr.as_ptr().add(offset) }
    }

    /// All slots, viewed as possibly-uninitialized values.
    #[must_use]
    pub fn as_uninit_slice(&self) -> &[MaybeUninit<T>] {
        // SAFETY: the storage holds `capacity` slots (or the pointer is
        // dangling and aligned with `capacity` 0 / a zero-sized `T`), and
        // `MaybeUninit<T>` has no validity requirement.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr().cast(), self.capacity) }
    }

    /// All slots, mutably, viewed as possibly-uninitialized values.
    #[must_use]
    pub fn as_uninit_slice_mut(&mut self) -> &mut [MaybeUninit<T>] {
        // SAFETY: as in `as_uninit_slice`; `&mut self` guarantees uniqueness.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr().cast(), self.capacity) }
    }

    /// Exchange storage and capacity with `other`. O(1), never fails.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }

    /// Move the storage out, leaving `self` empty.
    #[must_use]
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::empty())
    }

    fn check_offset(&self, offset: usize) {
        assert!(
            offset <= self.capacity,
            "slot offset (is {offset}) should be <= capacity (is {})",
            self.capacity
        );
    }

    /// Layout of the live allocation, if there is one.
    fn allocated_layout(&self) -> Option<Layout> {
        if self.capacity == 0 || mem::size_of::<T>() == 0 {
            return None;
        }
        Layout::array::<T>(self.capacity).ok()
    }
}

impl<T> Drop for MemoryBlock<T> {
    fn drop(&mut self) {
        if let Some(layout) = self.allocated_layout() {
            log::trace!(
                "releasing block: {} slots, {} bytes",
                self.capacity,
                layout.size()
            );
            // SAFETY: `ptr` came from `alloc::alloc` with this exact layout
            // and has not been released; the block never outlives it.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) }
        }
    }
}

impl<T> Default for MemoryBlock<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> fmt::Debug for MemoryBlock<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryBlock")
            .field("ptr", &self.ptr)
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<T> Index<usize> for MemoryBlock<T> {
    type Output = MaybeUninit<T>;

    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    fn index(&self, index: usize) -> &MaybeUninit<T> {
        assert!(
            index < self.capacity,
            "slot index (is {index}) should be < capacity (is {})",
            self.capacity
        );
        &self.as_uninit_slice()[index]
    }
}

impl<T> IndexMut<usize> for MemoryBlock<T> {
    fn index_mut(&mut self, index: usize) -> &mut MaybeUninit<T> {
        assert!(
            index < self.capacity,
            "slot index (is {index}) should be < capacity (is {})",
            self.capacity
        );
        &mut self.as_uninit_slice_mut()[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contig_test_utils::{Counters, Tracked};

    #[test]
    fn zero_capacity_is_empty_and_dangling() {
        let block = MemoryBlock::<u64>::with_capacity(0);
        assert!(block.is_empty());
        assert_eq!(block.capacity(), 0);
        assert_eq!(block.as_ptr(), NonNull::<u64>::dangling().as_ptr());
    }

    #[test]
    fn capacity_is_exact() {
        let block = MemoryBlock::<u32>::with_capacity(7);
        assert_eq!(block.capacity(), 7);
        assert_eq!(block.as_uninit_slice().len(), 7);
    }

    #[test]
    fn slots_are_contiguous() {
        let block = MemoryBlock::<u64>::with_capacity(4);
        let base = block.slot(0) as usize;
        for i in 0..=4 {
            assert_eq!(block.slot(i) as usize - base, i * mem::size_of::<u64>());
        }
    }

    #[test]
    fn one_past_end_is_addressable() {
        let block = MemoryBlock::<u8>::with_capacity(3);
        assert_eq!(block.slot(3) as usize, block.as_ptr() as usize + 3);
    }

    #[test]
    #[should_panic(expected = "slot offset (is 4) should be <= capacity (is 3)")]
    fn slot_past_one_past_end_panics() {
        let block = MemoryBlock::<u8>::with_capacity(3);
        let _ = block.slot(4);
    }

    #[test]
    #[should_panic(expected = "slot index (is 3) should be < capacity (is 3)")]
    fn index_at_capacity_panics() {
        let block = MemoryBlock::<u8>::with_capacity(3);
        let _ = &block[3];
    }

    #[test]
    fn indexed_slots_hold_written_values() {
        let mut block = MemoryBlock::<u32>::with_capacity(2);
        block[0].write(10);
        block[1].write(20);
        // SAFETY: both slots were written above.
        let (a, b) = unsafe { (block[0].assume_init(), block[1].assume_init()) };
        assert_eq!((a, b), (10, 20));
    }

    #[test]
    fn swap_exchanges_storage() {
        let mut a = MemoryBlock::<u16>::with_capacity(2);
        let mut b = MemoryBlock::<u16>::with_capacity(5);
        let (pa, pb) = (a.as_ptr(), b.as_ptr());
        a.swap(&mut b);
        assert_eq!((a.capacity(), b.capacity()), (5, 2));
        assert_eq!((a.as_ptr(), b.as_ptr()), (pb, pa));
    }

    #[test]
    fn take_leaves_source_empty() {
        let mut a = MemoryBlock::<u16>::with_capacity(8);
        let ptr = a.as_ptr();
        let b = a.take();
        assert_eq!(a.capacity(), 0);
        assert!(a.is_empty());
        assert_eq!(b.capacity(), 8);
        assert_eq!(b.as_ptr(), ptr);
    }

    #[test]
    fn zero_sized_types_keep_requested_capacity() {
        let block = MemoryBlock::<()>::with_capacity(1_000);
        assert_eq!(block.capacity(), 1_000);
        assert!(!block.is_empty());
    }

    #[test]
    fn overflowing_request_is_reported() {
        let err = MemoryBlock::<u64>::try_with_capacity(usize::MAX).unwrap_err();
        assert_eq!(
            err,
            AllocError::CapacityOverflow {
                requested: usize::MAX
            }
        );
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn overflowing_request_panics_on_infallible_path() {
        let _ = MemoryBlock::<u64>::with_capacity(usize::MAX);
    }

    #[test]
    #[cfg_attr(miri, ignore)] // leaks the element on purpose
    fn release_does_not_drop_slot_contents() {
        let counters = Counters::new();
        let mut block = MemoryBlock::<Tracked>::with_capacity(2);
        block[0].write(Tracked::new(1, &counters));
        drop(block);
        // The element was leaked, not dropped: the block has no element accounting.
        assert_eq!(counters.dropped(), 0);
        assert_eq!(counters.live(), 1);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn slot_offsets_scale_with_element_size(capacity in 0usize..512) {
                let block = MemoryBlock::<[u32; 3]>::with_capacity(capacity);
                let base = block.slot(0) as usize;
                for i in 0..=capacity {
                    prop_assert_eq!(block.slot(i) as usize - base, i * mem::size_of::<[u32; 3]>());
                }
                prop_assert_eq!(block.as_uninit_slice().len(), capacity);
            }

            #[test]
            fn swap_round_trips(a in 0usize..64, b in 0usize..64) {
                let mut first = MemoryBlock::<u16>::with_capacity(a);
                let mut second = MemoryBlock::<u16>::with_capacity(b);
                let (pa, pb) = (first.as_ptr(), second.as_ptr());
                first.swap(&mut second);
                prop_assert_eq!((first.capacity(), second.capacity()), (b, a));
                prop_assert_eq!((first.as_ptr(), second.as_ptr()), (pb, pa));
            }
        }
    }
}
