//! Copy semantics: duplicate construction and copy-assignment.

use contig_block::{uninit, MemoryBlock};

use crate::DynamicArray;

impl<T: Clone> Clone for DynamicArray<T> {
    /// Duplicate every live element into fresh storage sized to match
    /// (`capacity == len`).
    fn clone(&self) -> Self {
        let mut block = MemoryBlock::<T>::with_capacity(self.len);
        // SAFETY: the fresh block has exactly `len` free slots.
        unsafe { uninit::clone_from_slice(self.as_slice(), block.as_mut_ptr()) };
        Self {
            block,
            len: self.len,
        }
    }

    /// Copy-assign from `source`.
    ///
    /// If `source` does not fit in the current capacity, a full copy is
    /// built first and swapped in, so a panicking clone leaves `self`
    /// untouched. Otherwise the storage is reused: the overlapping prefix
    /// is assigned with `clone_from`, surplus elements are dropped and
    /// missing ones are cloned into spare capacity. A panic on that path
    /// leaves `self` valid with unspecified contents.
    fn clone_from(&mut self, source: &Self) {
        if source.len > self.capacity() {
            let mut copy = source.clone();
            self.swap(&mut copy);
            return;
        }
        let shared = self.len.min(source.len);
        self.as_mut_slice()[..shared].clone_from_slice(&source.as_slice()[..shared]);
        if source.len <= self.len {
            self.truncate(source.len);
        } else {
            let missing = &source.as_slice()[self.len..];
            // SAFETY: `source.len <= capacity`, so `[len, source.len)` are
            // free slots; the source is a different array.
            unsafe { uninit::clone_from_slice(missing, self.block.slot_mut(self.len)) };
            self.len = source.len;
        }
    }
}

impl<T: Clone> From<&[T]> for DynamicArray<T> {
    fn from(items: &[T]) -> Self {
        let mut block = MemoryBlock::<T>::with_capacity(items.len());
        // SAFETY: the fresh block has exactly `items.len()` free slots.
        unsafe { uninit::clone_from_slice(items, block.as_mut_ptr()) };
        Self {
            block,
            len: items.len(),
        }
    }
}
