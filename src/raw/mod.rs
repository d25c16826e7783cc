mod arena;
mod handle;
mod node;
mod raw_avl_map;
mod tree_id;

pub(crate) use handle::Handle;
pub(crate) use node::Item;
pub(crate) use raw_avl_map::{Probe, RawAvlMap, Vacancy};
pub(crate) use tree_id::TreeId;
