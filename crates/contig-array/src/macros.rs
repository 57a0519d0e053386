/// Build a [`DynamicArray`](crate::DynamicArray) from a list of elements
/// or from `elem; n`, in the manner of `vec!`.
///
/// ```
/// use contig_array::dyn_array;
///
/// let listed = dyn_array![1, 2, 3];
/// assert_eq!(listed, [1, 2, 3]);
///
/// let repeated = dyn_array!["x".to_string(); 2];
/// assert_eq!(repeated, ["x", "x"]);
/// ```
#[macro_export]
macro_rules! dyn_array {
    () => {
        $crate::DynamicArray::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::DynamicArray::from_elem($elem, $n)
    };
    ($($item:expr),+ $(,)?) => {
        $crate::DynamicArray::from([$($item),+])
    };
}
