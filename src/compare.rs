//! Comparators that order the keys of an [`AvlMap`](crate::AvlMap).
//!
//! The map never calls `Ord` directly. It asks its comparator, any
//! [`Compare<K>`], and treats two keys as the same key exactly when the
//! comparator reports [`Ordering::Equal`]. [`Natural`] (the default) defers to
//! `Ord`; closures of type `Fn(&K, &K) -> Ordering` work as comparators out of
//! the box, and [`Less`] adapts a strict weak ordering given as a "less than"
//! predicate.

use core::cmp::Ordering;

pub use ::compare::{Compare, Natural, natural};

/// Adapts a strict weak ordering, given as a "less than" predicate, into a
/// [`Compare`].
///
/// Two keys are equivalent, and therefore the same map key, exactly when
/// neither is less than the other.
///
/// # Examples
///
/// ```
/// use avl_map::AvlMap;
/// use avl_map::compare::Less;
///
/// // Case-insensitive keys: "Apple" and "APPLE" are the same key.
/// let mut map = AvlMap::with_comparator(Less(|a: &&str, b: &&str| {
///     a.to_lowercase() < b.to_lowercase()
/// }));
///
/// assert!(map.insert("Apple", 1).1);
/// assert!(!map.insert("APPLE", 2).1);
/// assert_eq!(map.at(&"apple"), Ok(&1));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Less<F>(pub F);

impl<K: ?Sized, F> Compare<K> for Less<F>
where
    F: Fn(&K, &K) -> bool,
{
    fn compare(&self, l: &K, r: &K) -> Ordering {
        if (self.0)(l, r) {
            Ordering::Less
        } else if (self.0)(r, l) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}
