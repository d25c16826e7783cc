use core::cmp::{Ordering, max};
use core::mem;

use alloc::vec::Vec;

use compare::Compare;
use tracing::{debug, trace};

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Item, Node, Side};
use super::tree_id::TreeId;
use crate::cursor::{Cursor, ItemRef};
use crate::error::MapError;

/// The AVL tree backing `AvlMap`.
pub(crate) struct RawAvlMap<K, V> {
    /// Arena storing the tree structure.
    nodes: Arena<Node>,
    /// Arena storing the entries. Nodes point into it, and each entry points
    /// back at the node carrying it.
    items: Arena<Item<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Total number of key-value pairs in the tree.
    len: usize,
    /// Identity that cursors are checked against.
    id: TreeId,
}

impl<K, V> RawAvlMap<K, V> {
    /// Creates a new, empty tree.
    pub(crate) fn new() -> Self {
        Self {
            nodes: Arena::new(),
            items: Arena::new(),
            root: None,
            len: 0,
            id: TreeId::fresh(),
        }
    }

    /// Creates a new tree with room for `capacity` entries.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            items: Arena::with_capacity(capacity),
            root: None,
            len: 0,
            id: TreeId::fresh(),
        }
    }

    /// Returns the number of key-value pairs in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the capacity of the tree.
    pub(crate) fn capacity(&self) -> usize {
        self.items.capacity().min(self.nodes.capacity())
    }

    /// Drops every entry. Outstanding cursors stop matching this tree.
    pub(crate) fn clear(&mut self) {
        debug!(len = self.len, "clearing tree");
        self.nodes.clear();
        self.items.clear();
        self.root = None;
        self.len = 0;
        self.id = TreeId::fresh();
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub(crate) fn height(&self) -> usize {
        usize::from(self.height_of(self.root))
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node {
        self.nodes.get(handle)
    }

    pub(crate) fn item(&self, handle: Handle) -> &Item<K, V> {
        self.items.get(handle)
    }

    pub(crate) fn item_mut(&mut self, handle: Handle) -> &mut Item<K, V> {
        self.items.get_mut(handle)
    }

    /// Key and value carried by `node`.
    pub(crate) fn key_value(&self, node: Handle) -> (&K, &V) {
        let item = self.items.get(self.nodes.get(node).item());
        (&item.key, &item.value)
    }

    /// Key and mutable value carried by `node`.
    pub(crate) fn key_value_mut(&mut self, node: Handle) -> (&K, &mut V) {
        let item = self.items.get_mut(self.nodes.get(node).item());
        (&item.key, &mut item.value)
    }

    /// The leftmost node.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.extreme(root, Side::Left))
    }

    /// The rightmost node.
    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.extreme(root, Side::Right))
    }

    /// The in-order successor of `node`, or `None` if it is the last node.
    pub(crate) fn successor(&self, node: Handle) -> Option<Handle> {
        self.neighbor(node, Side::Right)
    }

    /// The in-order predecessor of `node`, or `None` if it is the first node.
    pub(crate) fn predecessor(&self, node: Handle) -> Option<Handle> {
        self.neighbor(node, Side::Left)
    }

    /// Follows `side` links from `node` until there are none left.
    fn extreme(&self, mut node: Handle, side: Side) -> Handle {
        while let Some(child) = self.nodes.get(node).child(side) {
            node = child;
        }
        node
    }

    /// The next node toward `side` in key order, using only the node links:
    /// the nearest node of the subtree on `side` if there is one, otherwise the
    /// first ancestor reached from its opposite side.
    fn neighbor(&self, node: Handle, side: Side) -> Option<Handle> {
        if let Some(child) = self.nodes.get(node).child(side) {
            return Some(self.extreme(child, side.opposite()));
        }

        let mut current = node;
        while let Some(parent) = self.nodes.get(current).parent() {
            if self.nodes.get(parent).child(side.opposite()) == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    // ─── Cursors ────────────────────────────────────────────────────────────

    /// A cursor to the entry carried by `node`, or past-the-end for `None`.
    pub(crate) fn cursor_at(&self, node: Option<Handle>) -> Cursor {
        Cursor::new(self.id, node.map(|node| self.item_ref(self.nodes.get(node).item())))
    }

    /// A cursor to the entry behind `item`.
    pub(crate) fn cursor_to_item(&self, item: Handle) -> Cursor {
        Cursor::new(self.id, Some(self.item_ref(item)))
    }

    fn item_ref(&self, handle: Handle) -> ItemRef {
        ItemRef {
            handle,
            generation: self.items.generation(handle),
        }
    }

    /// Maps a cursor back to the node carrying its entry; `Ok(None)` is
    /// past-the-end.
    pub(crate) fn resolve(&self, cursor: Cursor) -> Result<Option<Handle>, MapError> {
        if cursor.tree() != self.id {
            debug!(reason = "foreign or cleared tree", "rejected cursor");
            return Err(MapError::InvalidIterator);
        }

        let Some(item) = cursor.item() else {
            return Ok(None);
        };

        match self.items.get_checked(item.handle, item.generation) {
            Some(item) => Ok(Some(item.node())),
            None => {
                debug!(reason = "entry was removed", "rejected cursor");
                Err(MapError::InvalidIterator)
            }
        }
    }

    /// Like [`resolve`](Self::resolve), but past-the-end is rejected too.
    pub(crate) fn resolve_entry(&self, cursor: Cursor) -> Result<Handle, MapError> {
        self.resolve(cursor)?.ok_or_else(|| {
            debug!(reason = "past-the-end", "rejected cursor");
            MapError::InvalidIterator
        })
    }

    /// The cursor one position after `cursor`.
    pub(crate) fn step_forward(&self, cursor: Cursor) -> Result<Cursor, MapError> {
        let node = self.resolve_entry(cursor)?;
        Ok(self.cursor_at(self.successor(node)))
    }

    /// The cursor one position before `cursor`. Past-the-end steps back to the
    /// last entry.
    pub(crate) fn step_backward(&self, cursor: Cursor) -> Result<Cursor, MapError> {
        let previous = match self.resolve(cursor)? {
            Some(node) => self.predecessor(node),
            None => self.last(),
        };

        match previous {
            Some(node) => Ok(self.cursor_at(Some(node))),
            None => {
                debug!(reason = "before the first entry", "rejected cursor");
                Err(MapError::InvalidIterator)
            }
        }
    }

    // ─── Removal ────────────────────────────────────────────────────────────

    /// Removes the entry behind `item`, wherever it currently sits.
    pub(crate) fn remove_item(&mut self, item: Handle) -> (K, V) {
        let node = self.items.get(item).node();
        self.remove_node(node)
    }

    /// Removes the entry carried by `node`.
    ///
    /// A node with two children gives up its entry and takes its in-order
    /// successor's instead; the successor's node, now carrying the doomed
    /// entry and at most one child, is the one spliced out. Cursors follow
    /// entries, so a cursor to the successor's key is unaffected.
    pub(crate) fn remove_node(&mut self, node: Handle) -> (K, V) {
        let target = match (self.nodes.get(node).left(), self.nodes.get(node).right()) {
            (Some(_), Some(right)) => {
                let successor = self.extreme(right, Side::Left);
                self.swap_items(node, successor);
                successor
            }
            _ => node,
        };

        let removed = self.nodes.take(target);
        let parent = removed.parent();
        let child = removed.left().or(removed.right());
        if let Some(child) = child {
            self.nodes.get_mut(child).set_parent(parent);
        }
        self.replace_child(parent, target, child);
        self.len -= 1;

        self.retrace(parent);
        trace!(len = self.len, "removed entry");

        self.items.take(removed.item()).into_pair()
    }

    /// Exchanges the entries carried by two nodes.
    fn swap_items(&mut self, a: Handle, b: Handle) {
        let item_a = self.nodes.get(a).item();
        let item_b = self.nodes.get(b).item();
        self.nodes.get_mut(a).set_item(item_b);
        self.nodes.get_mut(b).set_item(item_a);
        self.items.get_mut(item_a).set_node(b);
        self.items.get_mut(item_b).set_node(a);
    }

    /// Removes every entry for which `keep` returns `false`, visiting entries
    /// in key order.
    pub(crate) fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut doomed = Vec::new();
        let mut current = self.first();
        while let Some(node) = current {
            let item = self.nodes.get(node).item();
            let entry = self.items.get_mut(item);
            if !keep(&entry.key, &mut entry.value) {
                doomed.push(item);
            }
            current = self.successor(node);
        }

        // Removals relocate entries between nodes, so go through the entries.
        for item in doomed {
            drop(self.remove_item(item));
        }
    }

    /// Moves every entry out in key order, leaving the tree empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let order = self.item_order();
        let entries = order.into_iter().map(|item| self.items.take(item).into_pair()).collect();
        self.clear();
        entries
    }

    /// Entry handles in key order.
    fn item_order(&self) -> Vec<Handle> {
        let mut order = Vec::with_capacity(self.len);
        let mut current = self.first();
        while let Some(node) = current {
            order.push(self.nodes.get(node).item());
            current = self.successor(node);
        }
        order
    }

    /// Mutable references to every entry, in key order. Allocates a key-order
    /// buffer and a by-slot buffer up front.
    pub(crate) fn items_mut_in_order(&mut self) -> Vec<&mut Item<K, V>> {
        let order = self.item_order();

        let mut by_slot: Vec<Option<&mut Item<K, V>>> = Vec::new();
        by_slot.resize_with(self.items.slot_count(), || None);
        for (handle, item) in self.items.iter_mut() {
            by_slot[handle.to_index()] = Some(item);
        }

        order
            .into_iter()
            .map(|handle| by_slot[handle.to_index()].take().expect("`RawAvlMap::items_mut_in_order()` - entry is not live!"))
            .collect()
    }

    // ─── Balancing ──────────────────────────────────────────────────────────

    fn height_of(&self, node: Option<Handle>) -> u8 {
        node.map_or(0, |node| self.nodes.get(node).height())
    }

    /// Height of the left subtree minus height of the right subtree.
    fn balance_factor(&self, node: Handle) -> i16 {
        let node = self.nodes.get(node);
        i16::from(self.height_of(node.left())) - i16::from(self.height_of(node.right()))
    }

    fn update_height(&mut self, node: Handle) {
        let n = self.nodes.get(node);
        let height = 1 + max(self.height_of(n.left()), self.height_of(n.right()));
        self.nodes.get_mut(node).set_height(height);
    }

    /// Points whatever referenced `old` (its parent's link, or the root) at `new`.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            Some(parent) => {
                let side = self.nodes.get(parent).side_of(old);
                self.nodes.get_mut(parent).set_child(side, new);
            }
            None => self.root = new,
        }
    }

    /// Rotates the subtree rooted at `pivot` toward `direction`, promoting the
    /// child on the opposite side. Returns the new subtree root.
    fn rotate(&mut self, pivot: Handle, direction: Side) -> Handle {
        let from = direction.opposite();
        let promoted = self.nodes.get(pivot).child(from).expect("`RawAvlMap::rotate()` - no child to promote!");
        let inner = self.nodes.get(promoted).child(direction);
        let parent = self.nodes.get(pivot).parent();

        self.replace_child(parent, pivot, Some(promoted));
        self.nodes.get_mut(promoted).set_parent(parent);

        self.nodes.get_mut(pivot).set_child(from, inner);
        if let Some(inner) = inner {
            self.nodes.get_mut(inner).set_parent(Some(pivot));
        }

        self.nodes.get_mut(promoted).set_child(direction, Some(pivot));
        self.nodes.get_mut(pivot).set_parent(Some(promoted));

        self.update_height(pivot);
        self.update_height(promoted);
        trace!(?direction, ?pivot, height = self.nodes.get(promoted).height(), "rotated subtree");
        promoted
    }

    /// Restores the balance of `node`, whose children may differ in height by
    /// two, and refreshes its height. Returns the root of the resulting subtree.
    fn rebalance(&mut self, node: Handle) -> Handle {
        let balance = self.balance_factor(node);
        if balance > 1 {
            let left = self.nodes.get(node).left().expect("`RawAvlMap::rebalance()` - left-heavy without a left child!");
            if self.balance_factor(left) < 0 {
                self.rotate(left, Side::Left);
            }
            self.rotate(node, Side::Right)
        } else if balance < -1 {
            let right =
                self.nodes.get(node).right().expect("`RawAvlMap::rebalance()` - right-heavy without a right child!");
            if self.balance_factor(right) > 0 {
                self.rotate(right, Side::Right);
            }
            self.rotate(node, Side::Left)
        } else {
            self.update_height(node);
            node
        }
    }

    /// Walks from `start` toward the root after one subtree below it grew or
    /// shrank by a level, refreshing heights and rotating where the balance
    /// broke. Stops at the first subtree whose height came out unchanged,
    /// since nothing above it can have moved.
    fn retrace(&mut self, start: Option<Handle>) {
        let mut current = start;
        while let Some(node) = current {
            let before = self.nodes.get(node).height();
            let subtree = self.rebalance(node);
            let subtree = self.nodes.get(subtree);
            if subtree.height() == before {
                break;
            }
            current = subtree.parent();
        }
    }
}

/// Outcome of descending the tree for a key.
pub(crate) enum Probe {
    /// The node carrying an equivalent key.
    Occupied(Handle),
    /// Where the key would be attached.
    Vacant(Vacancy),
}

/// An empty child link (or the empty root) that a missing key belongs in.
///
/// Only meaningful until the tree is next modified.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Vacancy {
    parent: Option<(Handle, Side)>,
}

/// Key-ordered operations. The comparator lives with the caller and must be
/// the same one on every call.
impl<K, V> RawAvlMap<K, V> {
    /// Descends from the root toward `key`.
    pub(crate) fn probe<C: Compare<K>>(&self, cmp: &C, key: &K) -> Probe {
        let mut parent = None;
        let mut current = self.root;
        while let Some(node) = current {
            let n = self.nodes.get(node);
            let side = match cmp.compare(key, &self.items.get(n.item()).key) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Probe::Occupied(node),
            };
            parent = Some((node, side));
            current = n.child(side);
        }
        Probe::Vacant(Vacancy { parent })
    }

    /// Finds the node carrying `key`.
    pub(crate) fn search<C: Compare<K>>(&self, cmp: &C, key: &K) -> Option<Handle> {
        match self.probe(cmp, key) {
            Probe::Occupied(node) => Some(node),
            Probe::Vacant(_) => None,
        }
    }

    pub(crate) fn get<C: Compare<K>>(&self, cmp: &C, key: &K) -> Option<&V> {
        self.search(cmp, key).map(|node| self.key_value(node).1)
    }

    pub(crate) fn get_mut<C: Compare<K>>(&mut self, cmp: &C, key: &K) -> Option<&mut V> {
        let node = self.search(cmp, key)?;
        Some(self.key_value_mut(node).1)
    }

    /// Inserts `key` unless an equivalent key is present.
    ///
    /// Returns the handle of the entry now stored under the key and whether it
    /// was newly created. An existing entry is left untouched and the given
    /// key and value are dropped.
    pub(crate) fn insert<C: Compare<K>>(&mut self, cmp: &C, key: K, value: V) -> (Handle, bool) {
        match self.probe(cmp, &key) {
            Probe::Occupied(node) => (self.nodes.get(node).item(), false),
            Probe::Vacant(vacancy) => (self.insert_at(vacancy, key, value), true),
        }
    }

    /// Attaches a new leaf at `vacancy` and rebalances. Returns the new entry's
    /// handle.
    pub(crate) fn insert_at(&mut self, vacancy: Vacancy, key: K, value: V) -> Handle {
        let node = self.nodes.next_handle();
        let item = self.items.alloc(Item::new(key, value, node));
        let parent = vacancy.parent.map(|(parent, _)| parent);
        let allocated = self.nodes.alloc(Node::leaf(item, parent));
        debug_assert_eq!(allocated, node, "`RawAvlMap::insert_at()` - node handle mispredicted!");

        match vacancy.parent {
            Some((parent, side)) => {
                debug_assert!(self.nodes.get(parent).child(side).is_none(), "`RawAvlMap::insert_at()` - slot is taken!");
                self.nodes.get_mut(parent).set_child(side, Some(node));
            }
            None => self.root = Some(node),
        }
        self.len += 1;

        self.retrace(parent);
        trace!(len = self.len, "inserted entry");

        item
    }

    pub(crate) fn remove_entry<C: Compare<K>>(&mut self, cmp: &C, key: &K) -> Option<(K, V)> {
        let node = self.search(cmp, key)?;
        Some(self.remove_node(node))
    }
}

impl<K: Clone, V: Clone> RawAvlMap<K, V> {
    /// Deep-copies `source` into this tree, which must be empty.
    fn build_from(&mut self, source: &Self) {
        debug_assert!(self.root.is_none(), "`RawAvlMap::build_from()` - destination is not empty!");
        let root = source.root.map(|root| self.build(source, root, None));
        self.root = root;
        self.len = source.len;
        debug!(len = self.len, "deep-copied tree");
    }

    /// Copies the subtree of `source` rooted at `node` under `parent`,
    /// returning the copy's root.
    fn build(&mut self, source: &Self, node: Handle, parent: Option<Handle>) -> Handle {
        let original = source.nodes.get(node);
        let entry = source.items.get(original.item());

        let copy = self.nodes.next_handle();
        let item = self.items.alloc(Item::new(entry.key.clone(), entry.value.clone(), copy));
        let mut fresh = Node::leaf(item, parent);
        fresh.set_height(original.height());
        let allocated = self.nodes.alloc(fresh);
        debug_assert_eq!(allocated, copy, "`RawAvlMap::build()` - node handle mispredicted!");

        let left = original.left().map(|left| self.build(source, left, Some(copy)));
        let right = original.right().map(|right| self.build(source, right, Some(copy)));
        let fresh = self.nodes.get_mut(copy);
        fresh.set_child(Side::Left, left);
        fresh.set_child(Side::Right, right);
        copy
    }
}

impl<K: Clone, V: Clone> Clone for RawAvlMap<K, V> {
    fn clone(&self) -> Self {
        let mut tree = Self::with_capacity(self.len);
        tree.build_from(self);
        tree
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        // Built detached, so a panicking `clone` leaves `self` empty.
        let mut copy = Self {
            nodes: mem::replace(&mut self.nodes, Arena::new()),
            items: mem::replace(&mut self.items, Arena::new()),
            root: None,
            len: 0,
            id: self.id,
        };
        copy.build_from(source);
        *self = copy;
    }
}
