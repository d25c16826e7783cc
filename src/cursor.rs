use crate::raw::{Handle, TreeId};

/// A position in an [`AvlMap`](crate::AvlMap): either one of its entries or the
/// past-the-end sentinel.
///
/// A `Cursor` is a plain value. It does not borrow the map, so it can be held
/// across mutations and handed back to the map later; every operation that
/// takes a cursor checks it first and reports
/// [`MapError::InvalidIterator`](crate::MapError::InvalidIterator) if it no
/// longer denotes a live position of that map.
///
/// A cursor follows its *entry*, not the tree node that happens to carry it.
/// Removing a different key never changes what a cursor dereferences to, even
/// when the removal relocates this cursor's entry inside the tree. Removing
/// the cursor's own key, clearing the map, or using the cursor with any other
/// map (including a clone of the one it came from) makes it invalid.
///
/// Two cursors are equal when they denote the same entry of the same map, or
/// are both past-the-end of the same map.
///
/// # Examples
///
/// ```
/// use avl_map::AvlMap;
///
/// let mut map = AvlMap::from([(1, "a"), (2, "b"), (3, "c")]);
///
/// let mut cursor = map.begin();
/// let mut keys = Vec::new();
/// while cursor != map.end() {
///     keys.push(*map.get_at(cursor).unwrap().0);
///     cursor = map.successor(cursor).unwrap();
/// }
/// assert_eq!(keys, [1, 2, 3]);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Cursor {
    tree: TreeId,
    item: Option<ItemRef>,
}

/// Generation-checked reference to a stored entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) struct ItemRef {
    pub(crate) handle: Handle,
    pub(crate) generation: u32,
}

impl Cursor {
    pub(crate) const fn new(tree: TreeId, item: Option<ItemRef>) -> Self {
        Self { tree, item }
    }

    pub(crate) const fn tree(&self) -> TreeId {
        self.tree
    }

    pub(crate) const fn item(&self) -> Option<ItemRef> {
        self.item
    }

    /// Returns `true` if this is the past-the-end position.
    ///
    /// This does not check that the cursor is still valid for its map.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_map::AvlMap;
    ///
    /// let map: AvlMap<i32, i32> = AvlMap::new();
    /// assert!(map.begin().is_end());
    /// assert_eq!(map.begin(), map.end());
    /// ```
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.item.is_none()
    }
}
