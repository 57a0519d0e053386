//! The [`DynamicArray`] type: storage bookkeeping, reservation and access.
//!
//! Element-editing operations (append, insert, erase, resize) live in
//! `edit.rs`; copy semantics in `clone.rs`.

use std::mem;
use std::ops::{Deref, DerefMut, Range};
use std::slice;

use contig_block::{uninit, MemoryBlock};
use contig_core::{growth, AllocError};

/// A growable contiguous array of `T`.
///
/// Invariant: `len <= capacity`; slots `[0, len)` hold live elements and
/// slots `[len, capacity)` are uninitialized. Dropping the array drops
/// the live elements in index order, then releases the block.
///
/// # Examples
///
/// ```
/// use contig_array::DynamicArray;
///
/// let mut array = DynamicArray::new();
/// array.push(1);
/// array.push(2);
/// array.push(3);
/// array.insert(1, 9);
/// assert_eq!(array, [1, 9, 2, 3]);
///
/// array.erase(0);
/// array.pop_back();
/// array.resize(4);
/// assert_eq!(array, [9, 2, 0, 0]);
/// ```
pub struct DynamicArray<T> {
    pub(crate) block: MemoryBlock<T>,
    pub(crate) len: usize,
}

impl<T> DynamicArray<T> {
    /// An empty array. Does not allocate.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            block: MemoryBlock::empty(),
            len: 0,
        }
    }

    /// An empty array with storage for exactly `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            block: MemoryBlock::with_capacity(capacity),
            len: 0,
        }
    }

    /// An array of `len` default-constructed elements, with capacity `len`.
    #[must_use]
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        let mut array = Self::with_capacity(len);
        array.resize_with(len, T::default);
        array
    }

    /// An array of `len` clones of `elem`, with capacity `len`.
    #[must_use]
    pub fn from_elem(elem: T, len: usize) -> Self
    where
        T: Clone,
    {
        let mut array = Self::with_capacity(len);
        array.resize_with(len, || elem.clone());
        array
    }

    /// Number of live elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True if there are no live elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots allocated, live or not.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.block.capacity()
    }

    /// Ensure capacity for at least `new_capacity` elements.
    ///
    /// No-op if `new_capacity <= capacity()`. Otherwise allocates exactly
    /// `new_capacity` slots and relocates the live elements. Length,
    /// values and order are unchanged.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; allocation failure goes to
    /// [`std::alloc::handle_alloc_error`].
    pub fn reserve(&mut self, new_capacity: usize) {
        if let Err(err) = self.try_reserve(new_capacity) {
            err.raise();
        }
    }

    /// Fallible [`reserve`](Self::reserve).
    ///
    /// # Errors
    ///
    /// Returns the [`AllocError`] from the allocation; the array is
    /// untouched in that case.
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<(), AllocError> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }
        let mut grown = MemoryBlock::<T>::try_with_capacity(new_capacity)?;
        // SAFETY: `grown` has `new_capacity > len` uninitialized slots and
        // the current block holds `len` live elements; distinct allocations.
        unsafe { uninit::relocate(self.block.as_ptr(), grown.as_mut_ptr(), self.len) };
        self.adopt(grown);
        Ok(())
    }

    /// Grow by the doubling policy while placing a new element at `index`.
    ///
    /// The element is built in the new block before anything else moves,
    /// so a panicking `make` releases the new block and leaves `self`
    /// untouched. The surrounding elements are then relocated around it.
    pub(crate) fn grow_and_emplace<F>(&mut self, index: usize, make: F)
    where
        F: FnOnce() -> T,
    {
        debug_assert!(index <= self.len);
        let new_capacity = growth::next_capacity(self.capacity()).unwrap_or_else(|err| err.raise());
        let mut grown = MemoryBlock::<T>::with_capacity(new_capacity);
        let dst = grown.slot_mut(0);
        // SAFETY: `index <= len < new_capacity`, so the slot is in bounds
        // and uninitialized.
        unsafe { dst.add(index).write(make()) };
        let src = self.block.as_ptr();
        // SAFETY: the prefix `[0, index)` and suffix `[index, len)` are live
        // in the old block and land on free slots either side of `index`.
        unsafe {
            uninit::relocate(src, dst, index);
            uninit::relocate(src.add(index), dst.add(index + 1), self.len - index);
        }
        self.adopt(grown);
        self.len += 1;
    }

    /// Swap in a block the live elements were relocated into.
    fn adopt(&mut self, mut grown: MemoryBlock<T>) {
        log::debug!(
            "reallocating: {} -> {} slots ({} live)",
            self.capacity(),
            grown.capacity(),
            self.len
        );
        self.block.swap(&mut grown);
        // `grown` now holds the drained old storage; releasing it drops nothing.
    }

    /// Exchange contents with `other`. O(1), never fails.
    pub fn swap(&mut self, other: &mut Self) {
        self.block.swap(&mut other.block);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Move-assign: drop the current contents and take over `source`'s,
    /// leaving `source` empty with capacity 0.
    pub fn take_from(&mut self, source: &mut Self) {
        *self = mem::take(source);
    }

    /// The live elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[0, len)` are live and the pointer is aligned and non-null
        // even for the empty block.
        unsafe { slice::from_raw_parts(self.block.as_ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, with unique access through `&mut self`.
        unsafe { slice::from_raw_parts_mut(self.block.as_mut_ptr(), self.len) }
    }

    /// Address of the first element. Invalidated by reallocation.
    #[must_use]
    pub const fn as_ptr(&self) -> *const T {
        self.block.as_ptr()
    }

    /// Mutable address of the first element. Invalidated by reallocation.
    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.block.as_mut_ptr()
    }

    /// Raw `begin..end` addresses of the live range.
    #[must_use]
    pub fn as_ptr_range(&self) -> Range<*const T> {
        self.block.as_ptr()..self.block.slot(self.len)
    }

    /// The last element.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty.
    #[must_use]
    pub fn back(&self) -> &T {
        assert!(self.len > 0, "back() called on an empty DynamicArray");
        &self.as_slice()[self.len - 1]
    }

    /// The last element, mutably.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty.
    #[must_use]
    pub fn back_mut(&mut self) -> &mut T {
        assert!(self.len > 0, "back_mut() called on an empty DynamicArray");
        let last = self.len - 1;
        &mut self.as_mut_slice()[last]
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        // SAFETY: `[0, len)` are live and owned by this array.
        unsafe { uninit::destroy(self.block.as_mut_ptr(), self.len) }
        // The block releases its storage in its own drop.
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for DynamicArray<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for DynamicArray<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}
