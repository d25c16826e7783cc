use super::handle::Handle;

/// Which child link of a parent a node hangs from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A tree node. Holds no key or value itself, only the handle of the item it
/// currently carries, so an entry can move between nodes without being moved
/// in memory.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    item: Handle,
    height: u8,
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
}

/// A stored key/value pair and the node that currently carries it.
#[derive(Clone, Debug)]
pub(crate) struct Item<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    node: Handle,
}

impl Node {
    /// Creates a new leaf node (height 1) under `parent`.
    pub(crate) const fn leaf(item: Handle, parent: Option<Handle>) -> Self {
        Self {
            item,
            height: 1,
            parent,
            left: None,
            right: None,
        }
    }

    pub(crate) const fn item(&self) -> Handle {
        self.item
    }

    pub(crate) fn set_item(&mut self, item: Handle) {
        self.item = item;
    }

    pub(crate) const fn height(&self) -> u8 {
        self.height
    }

    pub(crate) fn set_height(&mut self, height: u8) {
        self.height = height;
    }

    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// The side `child` hangs from. Panics if it is not a child of this node.
    pub(crate) fn side_of(&self, child: Handle) -> Side {
        if self.left == Some(child) {
            Side::Left
        } else {
            assert_eq!(self.right, Some(child), "`Node::side_of()` - `child` is not a child!");
            Side::Right
        }
    }
}

impl<K, V> Item<K, V> {
    pub(crate) const fn new(key: K, value: V, node: Handle) -> Self {
        Self { key, value, node }
    }

    pub(crate) const fn node(&self) -> Handle {
        self.node
    }

    pub(crate) fn set_node(&mut self, node: Handle) {
        self.node = node;
    }

    pub(crate) fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}
