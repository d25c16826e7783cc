//! An ordered map backed by a height-balanced (AVL) binary search tree, with
//! checked cursors.
//!
//! [`AvlMap`] keeps its entries sorted by a pluggable comparator and offers
//! the usual ordered-map API next to a cursor API: a [`Cursor`] is a small
//! `Copy` value naming one entry (or the past-the-end position) that can be
//! kept across mutations of the map and is validated whenever it is used.
//!
//! # Example
//!
//! ```
//! use avl_map::{AvlMap, MapError};
//!
//! let mut scores = AvlMap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert("Carol", 92);
//!
//! assert_eq!(scores.at(&"Bob"), Ok(&85));
//! assert_eq!(scores.at(&"Dave"), Err(MapError::KeyNotFound));
//!
//! // Walk the map with a cursor.
//! let mut cursor = scores.begin();
//! let mut names = Vec::new();
//! while cursor != scores.end() {
//!     names.push(*scores.get_at(cursor)?.0);
//!     cursor = scores.successor(cursor)?;
//! }
//! assert_eq!(names, ["Alice", "Bob", "Carol"]);
//!
//! // Cursors outlive mutations of other entries, but not of their own.
//! let bob = scores.find(&"Bob");
//! scores.remove(&"Alice");
//! assert_eq!(scores.get_at(bob), Ok((&"Bob", &85)));
//! scores.erase(bob)?;
//! assert_eq!(scores.get_at(bob), Err(MapError::InvalidIterator));
//! # Ok::<(), MapError>(())
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Custom orderings** - Any [`Compare`](compare::Compare) implementation, closure, or
//!   [`Less`](compare::Less)-wrapped strict weak ordering
//! - **Checked cursors** - Stale, foreign and past-the-end cursors are reported as
//!   [`MapError::InvalidIterator`] instead of misbehaving
//! - **No unsafe code**
//!
//! # Implementation
//!
//! Nodes and entries live in two separate arenas. A node refers to the entry it
//! carries and an entry refers back to its node, which lets removal of a node with
//! two children move entries between nodes while cursors keep following entries.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod cursor;
mod error;
mod raw;

pub mod avl_map;
pub mod compare;

pub use avl_map::AvlMap;
pub use cursor::Cursor;
pub use error::MapError;
