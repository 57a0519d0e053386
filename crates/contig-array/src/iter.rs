//! Iteration over a [`DynamicArray`].
//!
//! Borrowing iteration goes through the slice (`iter`, `iter_mut`).
//! [`IntoIter`] takes ownership of the block and yields elements by
//! value from both ends.

use std::fmt;
use std::iter::FusedIterator;
use std::mem::ManuallyDrop;
use std::slice;

use contig_block::{uninit, MemoryBlock};
use contig_core::growth;

use crate::DynamicArray;

/// Owning iterator returned by `DynamicArray::into_iter`.
///
/// Live elements occupy `[start, end)` of the block. Elements not yet
/// yielded are dropped with the iterator.
pub struct IntoIter<T> {
    block: MemoryBlock<T>,
    start: usize,
    end: usize,
}

impl<T> IntoIter<T> {
    /// The elements not yet yielded.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[start, end)` are live.
        unsafe { slice::from_raw_parts(self.block.slot(self.start), self.end - self.start) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        let slot = self.block.slot(self.start);
        self.start += 1;
        // SAFETY: the slot was live and is no longer in `[start, end)`.
        Some(unsafe { slot.read() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: the slot was live and is no longer in `[start, end)`.
        Some(unsafe { self.block.slot(self.end).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining = self.end - self.start;
        // SAFETY: `[start, end)` are live and owned by the iterator.
        unsafe { uninit::destroy(self.block.slot_mut(self.start), remaining) }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        // The array's own drop must not run: the elements move to the iterator.
        let mut array = ManuallyDrop::new(self);
        IntoIter {
            block: array.block.take(),
            start: 0,
            end: array.len,
        }
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let needed = self.len.saturating_add(lower);
        if needed > self.capacity() {
            // Never below the doubling step, so repeated small extends stay amortized.
            let doubled = growth::next_capacity(self.capacity()).unwrap_or(needed);
            self.reserve(needed.max(doubled));
        }
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}
