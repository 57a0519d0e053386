//! Standard trait surface: formatting, comparison, hashing, conversion
//! and slice indexing.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Index, IndexMut};
use std::slice::SliceIndex;

use crate::DynamicArray;

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, U> PartialEq<DynamicArray<U>> for DynamicArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &DynamicArray<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, U> PartialEq<[U]> for DynamicArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T, U> PartialEq<&[U]> for DynamicArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T, U, const N: usize> PartialEq<[U; N]> for DynamicArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == &other[..]
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T: Hash> Hash for DynamicArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for DynamicArray<T> {
    type Output = I::Output;

    /// # Panics
    ///
    /// Panics if the index is outside `[0, len)`.
    fn index(&self, index: I) -> &I::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for DynamicArray<T> {
    fn index_mut(&mut self, index: I) -> &mut I::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T, const N: usize> From<[T; N]> for DynamicArray<T> {
    fn from(items: [T; N]) -> Self {
        let mut array = Self::with_capacity(N);
        for item in items {
            array.push(item);
        }
        array
    }
}

impl<T> AsRef<[T]> for DynamicArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for DynamicArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn debug_lists_elements() {
        let array: DynamicArray<i32> = [1, 2].into();
        assert_eq!(format!("{array:?}"), "[1, 2]");
    }

    #[test]
    fn equality_against_slices_and_arrays() {
        let a: DynamicArray<i32> = [1, 2, 3].into();
        let b: DynamicArray<i32> = [1, 2, 3].into();
        assert_eq!(a, b);
        assert_eq!(a, [1, 2, 3]);
        assert_eq!(a, &[1, 2, 3][..]);
        assert_ne!(a, [1, 2]);
    }

    #[test]
    fn hash_matches_slice() {
        let a: DynamicArray<u8> = [4, 5].into();
        assert_eq!(hash_of(&a), hash_of(&[4u8, 5][..]));
    }

    #[test]
    fn range_indexing() {
        let mut a: DynamicArray<i32> = [1, 2, 3, 4].into();
        assert_eq!(&a[1..3], [2, 3]);
        a[1..3].copy_from_slice(&[7, 8]);
        assert_eq!(a, [1, 7, 8, 4]);
    }

    #[test]
    #[should_panic]
    fn index_out_of_range_panics() {
        let a: DynamicArray<i32> = [1].into();
        let _value = a[1];
    }

    #[test]
    fn from_array_sizes_exactly() {
        let a = DynamicArray::from([0u64; 5]);
        assert_eq!(a.capacity(), 5);
        assert_eq!(a.len(), 5);
    }
}
