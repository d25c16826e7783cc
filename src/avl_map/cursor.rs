use compare::Compare;

use super::AvlMap;
use crate::cursor::Cursor;
use crate::error::MapError;

impl<K, V, C> AvlMap<K, V, C> {
    /// Returns a cursor to the first entry, or [`end`](Self::end) if the map
    /// is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::AvlMap;
    ///
    /// let map = AvlMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(map.get_at(map.begin()), Ok((&1, &"a")));
    /// ```
    #[must_use]
    pub fn begin(&self) -> Cursor {
        self.raw.cursor_at(self.raw.first())
    }

    /// Returns the past-the-end cursor.
    ///
    /// It denotes no entry; stepping backward from it reaches the last entry.
    #[must_use]
    pub fn end(&self) -> Cursor {
        self.raw.cursor_at(None)
    }

    /// Returns the cursor to the entry after the one `cursor` denotes, or
    /// [`end`](Self::end) after the last entry.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidIterator`] if `cursor` is past-the-end or does
    /// not denote a live entry of this map.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::{AvlMap, MapError};
    ///
    /// let map = AvlMap::from([(1, "a")]);
    /// assert_eq!(map.successor(map.begin()), Ok(map.end()));
    /// assert_eq!(map.successor(map.end()), Err(MapError::InvalidIterator));
    /// ```
    pub fn successor(&self, cursor: Cursor) -> Result<Cursor, MapError> {
        self.raw.step_forward(cursor)
    }

    /// Returns the cursor to the entry before the one `cursor` denotes. From
    /// [`end`](Self::end) this is the last entry.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidIterator`] if `cursor` denotes the first
    /// entry, is past-the-end of an empty map, or does not denote a live
    /// position of this map.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::{AvlMap, MapError};
    ///
    /// let map = AvlMap::from([(1, "a"), (2, "b")]);
    /// let last = map.predecessor(map.end()).unwrap();
    /// assert_eq!(map.get_at(last), Ok((&2, &"b")));
    /// assert_eq!(map.predecessor(map.begin()), Err(MapError::InvalidIterator));
    /// ```
    pub fn predecessor(&self, cursor: Cursor) -> Result<Cursor, MapError> {
        self.raw.step_backward(cursor)
    }

    /// Returns the entry `cursor` denotes.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidIterator`] if `cursor` is past-the-end or does
    /// not denote a live entry of this map.
    pub fn get_at(&self, cursor: Cursor) -> Result<(&K, &V), MapError> {
        let node = self.raw.resolve_entry(cursor)?;
        Ok(self.raw.key_value(node))
    }

    /// Returns the entry `cursor` denotes, with its value mutable.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidIterator`] if `cursor` is past-the-end or does
    /// not denote a live entry of this map.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::AvlMap;
    ///
    /// let mut map = AvlMap::from([(1, 10)]);
    /// let cursor = map.begin();
    /// *map.get_at_mut(cursor).unwrap().1 += 5;
    /// assert_eq!(map[&1], 15);
    /// ```
    pub fn get_at_mut(&mut self, cursor: Cursor) -> Result<(&K, &mut V), MapError> {
        let node = self.raw.resolve_entry(cursor)?;
        Ok(self.raw.key_value_mut(node))
    }

    /// Removes the entry `cursor` denotes and returns it.
    ///
    /// Only `cursor` (and copies of it) become invalid; cursors to every other
    /// entry keep denoting the same entries.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidIterator`] if `cursor` is past-the-end or does
    /// not denote a live entry of this map. The map is unchanged in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::{AvlMap, MapError};
    ///
    /// let mut map = AvlMap::from([(1, "a"), (2, "b"), (3, "c")]);
    /// let two = map.find(&2);
    /// let three = map.find(&3);
    ///
    /// assert_eq!(map.erase(two), Ok((2, "b")));
    /// assert_eq!(map.erase(two), Err(MapError::InvalidIterator));
    /// assert_eq!(map.get_at(three), Ok((&3, &"c")));
    /// ```
    pub fn erase(&mut self, cursor: Cursor) -> Result<(K, V), MapError> {
        let node = self.raw.resolve_entry(cursor)?;
        Ok(self.raw.remove_node(node))
    }
}

impl<K, V, C: Compare<K>> AvlMap<K, V, C> {
    /// Returns a cursor to the entry under `key`, or [`end`](Self::end) if
    /// there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::AvlMap;
    ///
    /// let map = AvlMap::from([(1, "a")]);
    /// assert_eq!(map.get_at(map.find(&1)), Ok((&1, &"a")));
    /// assert_eq!(map.find(&2), map.end());
    /// ```
    pub fn find(&self, key: &K) -> Cursor {
        self.raw.cursor_at(self.raw.search(&self.cmp, key))
    }
}
