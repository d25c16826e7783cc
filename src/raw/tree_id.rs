use core::sync::atomic::{AtomicUsize, Ordering};

static NEXT_TREE_ID: AtomicUsize = AtomicUsize::new(0);

/// Process-unique identity of one tree's current contents.
///
/// A tree takes a fresh id when it is created, cloned, or cleared, so a cursor
/// only ever matches the tree (and the generation of that tree) it came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) struct TreeId(usize);

impl TreeId {
    pub(crate) fn fresh() -> Self {
        Self(NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed))
    }
}
