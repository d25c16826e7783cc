use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::Index;

use alloc::vec;

use compare::{Compare, Natural};

use crate::cursor::Cursor;
use crate::error::MapError;
use crate::raw::{Handle, Item, Probe, RawAvlMap};

mod capacity;
mod cursor;
mod entry;

pub use entry::{Entry, OccupiedEntry, VacantEntry};

/// An ordered map based on an [AVL tree].
///
/// Keys are kept in the order defined by the map's comparator `C`, which
/// defaults to [`Natural`] (the key's own [`Ord`]). Two keys are the same key
/// exactly when the comparator reports them [`Equal`](core::cmp::Ordering::Equal).
/// Any [`Compare<K>`] works, including closures `Fn(&K, &K) -> Ordering` and
/// strict weak orderings wrapped in [`Less`](crate::compare::Less).
///
/// Every node carries one entry and the heights of a node's two subtrees never
/// differ by more than one, so the height stays below 1.45 log<sub>2</sub>(n + 2)
/// and lookups, insertions and removals are O(log n).
///
/// Besides borrowing iterators, the map hands out [`Cursor`]s: plain, `Copy`
/// positions that can be held across mutations and are validated every time
/// they are used. See [`begin`](AvlMap::begin) and friends.
///
/// It is a logic error for a key to be modified in such a way that its ordering
/// relative to any other key, as determined by the comparator, changes while it
/// is in the map. The behavior resulting from such a logic error is not
/// specified, but will be encapsulated to the `AvlMap` that observed it and not
/// result in undefined behavior.
///
/// # Examples
///
/// ```
/// use avl_map::AvlMap;
///
/// let mut movie_reviews = AvlMap::new();
///
/// movie_reviews.insert("Office Space", "Deals with real issues in the workplace.");
/// movie_reviews.insert("Pulp Fiction", "Masterpiece.");
/// movie_reviews.insert("The Godfather", "Very enjoyable.");
/// movie_reviews.insert("The Blues Brothers", "Eye lyked it a lot.");
///
/// // oops, this review has a lot of spelling mistakes, let's delete it.
/// movie_reviews.remove(&"The Blues Brothers");
///
/// // A second insert under an existing key does not replace the value.
/// let (_, inserted) = movie_reviews.insert("Pulp Fiction", "Overrated.");
/// assert!(!inserted);
/// assert_eq!(movie_reviews[&"Pulp Fiction"], "Masterpiece.");
///
/// for (movie, review) in &movie_reviews {
///     println!("{movie}: \"{review}\"");
/// }
/// ```
///
/// A custom order is given through [`with_comparator`](AvlMap::with_comparator):
///
/// ```
/// use avl_map::AvlMap;
///
/// let mut descending = AvlMap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
/// descending.extend([(1, 'a'), (3, 'c'), (2, 'b')]);
///
/// let keys: Vec<_> = descending.keys().copied().collect();
/// assert_eq!(keys, [3, 2, 1]);
/// ```
///
/// [AVL tree]: https://en.wikipedia.org/wiki/AVL_tree
pub struct AvlMap<K, V, C = Natural<K>> {
    raw: RawAvlMap<K, V>,
    cmp: C,
}

/// An iterator over the entries of an `AvlMap`.
///
/// This `struct` is created by the [`iter`] method on [`AvlMap`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use avl_map::AvlMap;
///
/// let map = AvlMap::from([(1, "a"), (2, "b")]);
/// let mut iter = map.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next_back(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: AvlMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    tree: &'a RawAvlMap<K, V>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// A mutable iterator over the entries of an `AvlMap`.
///
/// This `struct` is created by the [`iter_mut`] method on [`AvlMap`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use avl_map::AvlMap;
///
/// let mut map = AvlMap::from([(1, 10), (2, 20)]);
/// for (_, value) in map.iter_mut() {
///     *value += 1;
/// }
/// let values: Vec<_> = map.values().copied().collect();
/// assert_eq!(values, [11, 21]);
/// ```
///
/// [`iter_mut`]: AvlMap::iter_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, K, V> {
    inner: vec::IntoIter<&'a mut Item<K, V>>,
}

/// An owning iterator over the entries of an `AvlMap`, sorted by key.
///
/// This `struct` is created by the [`into_iter`] method on [`AvlMap`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: vec::IntoIter<(K, V)>,
}

/// An iterator over the keys of an `AvlMap`.
///
/// This `struct` is created by the [`keys`] method on [`AvlMap`].
///
/// [`keys`]: AvlMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of an `AvlMap`.
///
/// This `struct` is created by the [`values`] method on [`AvlMap`].
///
/// [`values`]: AvlMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// A mutable iterator over the values of an `AvlMap`.
///
/// This `struct` is created by the [`values_mut`] method on [`AvlMap`].
///
/// [`values_mut`]: AvlMap::values_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<K: Ord, V> AvlMap<K, V> {
    /// Makes a new, empty `AvlMap` ordered by the keys' [`Ord`].
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        AvlMap::with_comparator(compare::natural())
    }
}

impl<K, V, C> AvlMap<K, V, C> {
    /// Makes a new, empty `AvlMap` ordered by `cmp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::AvlMap;
    ///
    /// let mut map = AvlMap::with_comparator(|a: &&str, b: &&str| a.len().cmp(&b.len()));
    /// map.insert("three", 3);
    /// map.insert("one", 1);
    ///
    /// // Same length, so the same key.
    /// assert!(!map.insert("two", 2).1);
    /// assert_eq!(map.first_key_value(), Some((&"one", &1)));
    /// ```
    #[must_use]
    pub fn with_comparator(cmp: C) -> Self {
        AvlMap {
            raw: RawAvlMap::new(),
            cmp,
        }
    }

    /// Returns a reference to the map's comparator.
    #[must_use]
    pub const fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::AvlMap;
    ///
    /// let mut a = AvlMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the height of the underlying tree: 0 when empty, otherwise the
    /// number of nodes on the longest path from the root to a leaf.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::AvlMap;
    ///
    /// let map: AvlMap<i32, ()> = (1..=7).map(|k| (k, ())).collect();
    /// assert_eq!(map.height(), 3);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Clears the map, removing all elements.
    ///
    /// Every cursor obtained from the map so far becomes invalid, including
    /// past-the-end cursors.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::{AvlMap, MapError};
    ///
    /// let mut a = AvlMap::from([(1, "a")]);
    /// let cursor = a.begin();
    /// a.clear();
    /// assert!(a.is_empty());
    /// assert_eq!(a.get_at(cursor), Err(MapError::InvalidIterator));
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the first key-value pair in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.first_key_value(), None);
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.first_key_value(), Some((&1, &"b")));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first().map(|node| self.raw.key_value(node))
    }

    /// Returns the last key-value pair in the map.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last().map(|node| self.raw.key_value(node))
    }

    /// Removes and returns the first element in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::AvlMap;
    ///
    /// let mut map = AvlMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.pop_first(), Some((1, "a")));
    /// assert_eq!(map.pop_first(), Some((2, "b")));
    /// assert_eq!(map.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let node = self.raw.first()?;
        Some(self.raw.remove_node(node))
    }

    /// Removes and returns the last element in the map.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let node = self.raw.last()?;
        Some(self.raw.remove_node(node))
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// Elements are visited in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::AvlMap;
    ///
    /// let mut map: AvlMap<i32, i32> = (0..8).map(|x| (x, x * 10)).collect();
    /// // Keep only the elements with even-numbered keys.
    /// map.retain(|&k, _| k % 2 == 0);
    /// assert!(map.into_iter().eq(vec![(0, 0), (2, 20), (4, 40), (6, 60)]));
    /// ```
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.raw.retain(f);
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::AvlMap;
    ///
    /// let map = AvlMap::from([(3, "c"), (2, "b"), (1, "a")]);
    ///
    /// for (key, value) in map.iter() {
    ///     println!("{key}: {value}");
    /// }
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            tree: &self.raw,
            front: self.raw.first(),
            back: self.raw.last(),
            remaining: self.raw.len(),
        }
    }

    /// Gets a mutable iterator over the entries of the map, sorted by key.
    ///
    /// Unlike [`iter`](Self::iter), this collects a reference to every entry
    /// before yielding the first one, so creating it costs *O*(*n*) time and
    /// memory even if only a prefix is consumed. Use
    /// [`get_at_mut`](Self::get_at_mut) with cursor stepping to touch a few
    /// entries without that cost.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::AvlMap;
    ///
    /// let mut map = AvlMap::from([("a", 1), ("b", 2), ("c", 3)]);
    ///
    /// // add 10 to the value if the key isn't "a"
    /// for (key, value) in map.iter_mut() {
    ///     if key != &"a" {
    ///         *value += 10;
    ///     }
    /// }
    /// assert_eq!(map[&"c"], 13);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.raw.items_mut_in_order().into_iter(),
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::AvlMap;
    ///
    /// let map = AvlMap::from([(2, "b"), (1, "hello")]);
    /// let values: Vec<&str> = map.values().cloned().collect();
    /// assert_eq!(values, ["hello", "b"]);
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Gets a mutable iterator over the values of the map, in order by key.
    ///
    /// Built on [`iter_mut`](Self::iter_mut) and carries the same *O*(*n*)
    /// setup cost.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::AvlMap;
    ///
    /// let mut map = AvlMap::from([(1, String::from("hello")), (2, String::from("goodbye"))]);
    ///
    /// for value in map.values_mut() {
    ///     value.push_str("!");
    /// }
    ///
    /// let values: Vec<String> = map.values().cloned().collect();
    /// assert_eq!(values, [String::from("hello!"), String::from("goodbye!")]);
    /// ```
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut { inner: self.iter_mut() }
    }
}

impl<K, V, C: Compare<K>> AvlMap<K, V, C> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.raw.get(&self.cmp, key)
    }

    /// Returns the stored key-value pair matching `key`.
    ///
    /// The stored key may differ from `key` when the comparator equates
    /// distinct values.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.raw.search(&self.cmp, key).map(|node| self.raw.key_value(node))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.raw.get_mut(&self.cmp, key)
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key(&self, key: &K) -> bool {
        self.raw.search(&self.cmp, key).is_some()
    }

    /// Returns the number of entries under `key`: always 0 or 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::AvlMap;
    ///
    /// let map = AvlMap::from([(1, "a")]);
    /// assert_eq!(map.count(&1), 1);
    /// assert_eq!(map.count(&2), 0);
    /// ```
    pub fn count(&self, key: &K) -> usize {
        usize::from(self.contains_key(key))
    }

    /// Returns the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::KeyNotFound`] if the map holds no such key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::{AvlMap, MapError};
    ///
    /// let map = AvlMap::from([(1, "a")]);
    /// assert_eq!(map.at(&1), Ok(&"a"));
    /// assert_eq!(map.at(&2), Err(MapError::KeyNotFound));
    /// ```
    pub fn at(&self, key: &K) -> Result<&V, MapError> {
        self.get(key).ok_or(MapError::KeyNotFound)
    }

    /// Returns a mutable reference to the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::KeyNotFound`] if the map holds no such key.
    pub fn at_mut(&mut self, key: &K) -> Result<&mut V, MapError> {
        self.get_mut(key).ok_or(MapError::KeyNotFound)
    }

    /// Inserts a key-value pair unless an equivalent key is already present.
    ///
    /// Returns a cursor to the entry now stored under the key, and `true` if
    /// that entry was newly created. If the key was present, the map is left
    /// untouched: the stored value is *not* replaced, and the given key and
    /// value are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// let (cursor, inserted) = map.insert(37, "a");
    /// assert!(inserted);
    /// assert_eq!(map.get_at(cursor), Ok((&37, &"a")));
    ///
    /// let (again, inserted) = map.insert(37, "b");
    /// assert!(!inserted);
    /// assert_eq!(again, cursor);
    /// assert_eq!(map[&37], "a");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (Cursor, bool) {
        let (item, inserted) = self.raw.insert(&self.cmp, key, value);
        (self.raw.cursor_to_item(item), inserted)
    }

    /// Removes a key from the map, returning the value at the key if it was
    /// previously in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was previously in the map.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        self.raw.remove_entry(&self.cmp, key)
    }

    /// Gets the given key's corresponding entry in the map for in-place
    /// manipulation.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::AvlMap;
    ///
    /// let mut count: AvlMap<&str, usize> = AvlMap::new();
    ///
    /// // count the number of occurrences of letters in the vec
    /// for x in ["a", "b", "a", "c", "a", "b"] {
    ///     count.entry(x).and_modify(|curr| *curr += 1).or_insert(1);
    /// }
    ///
    /// assert_eq!(count[&"a"], 3);
    /// assert_eq!(count[&"b"], 2);
    /// assert_eq!(count[&"c"], 1);
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        match self.raw.probe(&self.cmp, &key) {
            Probe::Occupied(node) => Entry::Occupied(OccupiedEntry {
                item: self.raw.node(node).item(),
                tree: &mut self.raw,
            }),
            Probe::Vacant(vacancy) => Entry::Vacant(VacantEntry {
                key,
                vacancy,
                tree: &mut self.raw,
            }),
        }
    }

    /// Returns the value under `key`, first inserting `V::default()` if the key
    /// is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::AvlMap;
    ///
    /// let mut letters: AvlMap<char, u32> = AvlMap::new();
    /// for ch in "a short treatise on fungi".chars() {
    ///     *letters.get_or_insert_default(ch) += 1;
    /// }
    /// assert_eq!(letters[&'t'], 3);
    /// assert_eq!(letters.get(&'y'), None);
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.entry(key).or_default()
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for AvlMap<K, V, C> {
    /// Deep-copies the map. The copy is a different map: cursors into `self`
    /// are not valid for it.
    fn clone(&self) -> Self {
        AvlMap {
            raw: self.raw.clone(),
            cmp: self.cmp.clone(),
        }
    }

    /// Replaces the contents of `self` with a deep copy of `source`.
    ///
    /// `self` is cleared first, so every cursor into it becomes invalid.
    fn clone_from(&mut self, source: &Self) {
        self.raw.clone_from(&source.raw);
        self.cmp.clone_from(&source.cmp);
    }
}

impl<K: Hash, V: Hash, C> Hash for AvlMap<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for AvlMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq, C> Eq for AvlMap<K, V, C> {}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for AvlMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> Default for AvlMap<K, V> {
    fn default() -> Self {
        AvlMap::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlMap<K, V> {
    /// Collects entries in iteration order; a later duplicate of a key already
    /// collected is dropped.
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = AvlMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V, C: Compare<K>> Extend<(K, V)> for AvlMap<K, V, C> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K: Copy, V: Copy, C: Compare<K>> Extend<(&'a K, &'a V)> for AvlMap<K, V, C> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        for (&k, &v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a AvlMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut AvlMap<K, V, C> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V, C> IntoIterator for AvlMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::AvlMap;
    ///
    /// let map = AvlMap::from([(2, "b"), (1, "a")]);
    /// let mut iter = map.into_iter();
    /// assert_eq!(iter.next(), Some((1, "a")));
    /// assert_eq!(iter.next_back(), Some((2, "b")));
    /// ```
    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<K, V, C: Compare<K>> Index<&K> for AvlMap<K, V, C> {
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map. Use [`AvlMap::at`] for a
    /// fallible lookup.
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for AvlMap<K, V> {
    /// Converts a `[(K, V); N]` into an `AvlMap<K, V>`.
    ///
    /// If the array holds several entries with the same key, the first one is
    /// kept.
    ///
    /// ```
    /// use avl_map::AvlMap;
    ///
    /// let map1 = AvlMap::from([(1, 2), (3, 4)]);
    /// let map2: AvlMap<_, _> = [(1, 2), (3, 4)].into();
    /// assert_eq!(map1, map2);
    /// ```
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front?;
        self.remaining -= 1;
        self.front = self.tree.successor(node);
        Some(self.tree.key_value(node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: 'a, V: 'a> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back?;
        self.remaining -= 1;
        self.back = self.tree.predecessor(node);
        Some(self.tree.key_value(node))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|item| (&item.key, &mut item.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|item| (&item.key, &mut item.value))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IterMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice().iter().map(|item| (&item.key, &item.value))).finish()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

impl<K, V: fmt::Debug> fmt::Debug for ValuesMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.inner.as_slice().iter().map(|item| &item.value)).finish()
    }
}
