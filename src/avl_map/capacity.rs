use compare::Natural;

use super::AvlMap;
use crate::raw::RawAvlMap;

impl<K: Ord, V> AvlMap<K, V, Natural<K>> {
    /// Creates an empty map with capacity for at least `capacity` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::AvlMap;
    ///
    /// let map: AvlMap<i32, i32> = AvlMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= 32);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        AvlMap::with_capacity_and_comparator(capacity, compare::natural())
    }
}

impl<K, V, C> AvlMap<K, V, C> {
    /// Creates an empty map ordered by `cmp`, with capacity for at least
    /// `capacity` elements.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        AvlMap {
            raw: RawAvlMap::with_capacity(capacity),
            cmp,
        }
    }

    /// Returns how many elements the map can hold without reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::AvlMap;
    ///
    /// let map: AvlMap<u8, (), _> = AvlMap::with_capacity_and_comparator(16, |a: &u8, b: &u8| b.cmp(a));
    /// assert!(map.capacity() >= 16);
    /// ```
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
