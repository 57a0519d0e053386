//! Element-editing operations: append, insert, erase, pop, resize.

use std::ptr;

use contig_block::uninit;
use contig_core::{growth, AllocError};

use crate::DynamicArray;

impl<T> DynamicArray<T> {
    /// Append `value` at the end.
    ///
    /// Amortized O(1): when full, capacity grows to `max(1, 2 × capacity)`.
    pub fn push(&mut self, value: T) {
        self.emplace_back_with(|| value);
    }

    /// Construct an element in place at the end and return it.
    ///
    /// `make` runs before any existing element is touched. If it panics
    /// the array is exactly as before the call, capacity included.
    pub fn emplace_back_with<F>(&mut self, make: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        if self.len == self.capacity() {
            self.grow_and_emplace(self.len, make);
        } else {
            let slot = self.block.slot_mut(self.len);
            // SAFETY: `len < capacity`, so the slot is in bounds and free.
            unsafe { slot.write(make()) };
            self.len += 1;
        }
        let last = self.len - 1;
        // SAFETY: slot `last` was constructed above.
        unsafe { &mut *self.block.slot_mut(last) }
    }

    /// Append `value`, reporting allocation failure instead of diverging.
    ///
    /// # Errors
    ///
    /// Returns the [`AllocError`] if growing fails. The array is
    /// unchanged and `value` is dropped.
    pub fn try_push(&mut self, value: T) -> Result<&mut T, AllocError> {
        if self.len == self.capacity() {
            self.try_reserve(growth::next_capacity(self.capacity())?)?;
        }
        let slot = self.block.slot_mut(self.len);
        // SAFETY: capacity now exceeds `len`; the slot is free.
        unsafe { slot.write(value) };
        self.len += 1;
        // SAFETY: just constructed.
        Ok(unsafe { &mut *slot })
    }

    /// Insert `value` at `index`, shifting `[index, len)` right by one.
    ///
    /// Returns the element at its final location.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> &mut T {
        self.emplace_with(index, || value)
    }

    /// Construct an element in place at `index`, shifting `[index, len)`
    /// right by one. Returns the element at its final location.
    ///
    /// `index == len` is an append. When the array is full the element is
    /// built in a freshly grown block and the neighbours are relocated
    /// around it. Otherwise the element is built first and the tail then
    /// shifted by an infallible move. Either way a panicking `make`
    /// leaves the array unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn emplace_with<F>(&mut self, index: usize, make: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        assert!(
            index <= self.len,
            "insertion index (is {index}) should be <= len (is {})",
            self.len
        );
        if index == self.len {
            return self.emplace_back_with(make);
        }
        if self.len == self.capacity() {
            self.grow_and_emplace(index, make);
        } else {
            let value = make();
            let at = self.block.slot_mut(index);
            // SAFETY: `len < capacity`, so `[index, len)` shifted by one stays
            // in bounds; `ptr::copy` handles the overlap. Slot `index` is then
            // a stale duplicate that is overwritten without being dropped.
            unsafe {
                ptr::copy(at, at.add(1), self.len - index);
                at.write(value);
            }
            self.len += 1;
        }
        // SAFETY: slot `index` holds the new element.
        unsafe { &mut *self.block.slot_mut(index) }
    }

    /// Remove the element at `index`, shifting `[index + 1, len)` left by one.
    ///
    /// Returns `index`, which now holds the element that followed the
    /// erased one (or equals `len` if the last element was erased).
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.remove(index));
        index
    }

    /// Remove and return the element at `index`, shifting the tail left.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.len,
            "removal index (is {index}) should be < len (is {})",
            self.len
        );
        let at = self.block.slot_mut(index);
        // SAFETY: slot `index` is live; it is read out once and then
        // overwritten by the shifted tail, which stays within `[0, len)`.
        unsafe {
            let value = at.read();
            ptr::copy(at.add(1), at, self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// Drop the last element.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty.
    pub fn pop_back(&mut self) {
        assert!(self.len > 0, "pop_back() called on an empty DynamicArray");
        self.len -= 1;
        let last = self.block.slot_mut(self.len);
        // SAFETY: the slot was live and is no longer counted by `len`.
        unsafe { ptr::drop_in_place(last) }
    }

    /// Remove and return the last element, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot was live and is no longer counted by `len`.
        Some(unsafe { self.block.slot(self.len).read() })
    }

    /// Drop trailing elements so that at most `new_len` remain.
    ///
    /// No-op if `new_len >= len`. Capacity is unchanged.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let tail = self.len - new_len;
        self.len = new_len;
        // SAFETY: `[new_len, old len)` were live and are no longer counted.
        unsafe { uninit::destroy(self.block.slot_mut(new_len), tail) }
    }

    /// Drop every element, keeping the storage.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Resize to `new_len`, default-constructing any new trailing elements.
    ///
    /// Shrinking drops `[new_len, len)`. Growing past capacity first
    /// reserves exactly `new_len`.
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default);
    }

    /// Resize to `new_len`, filling new trailing slots with `make()`.
    ///
    /// If `make` panics, the elements built by this call are dropped and
    /// the length is unchanged.
    pub fn resize_with<F>(&mut self, new_len: usize, make: F)
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }
        self.reserve(new_len);
        let extra = new_len - self.len;
        // SAFETY: capacity >= new_len, so `[len, new_len)` are free slots.
        unsafe { uninit::write_with(self.block.slot_mut(self.len), extra, make) };
        self.len = new_len;
    }
}
