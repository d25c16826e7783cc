use std::collections::BTreeMap;

use avl_map::compare::Less;
use avl_map::{AvlMap, Cursor, MapError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Keys in a range smaller than `TEST_SIZE` so that operations collide.
fn key_strategy() -> impl Strategy<Value = i64> {
    -1_000i64..1_000i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

/// AVL height bound for `len` entries: h < 1.4405 * log2(len + 2).
fn height_bound(len: usize) -> usize {
    // 1.4405 * log2(n + 2) <= 1.45 * (ilog2(n + 2) + 1)
    (145 * ((len + 2).ilog2() as usize + 1)).div_ceil(100)
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    Remove(i64),
    Get(i64),
    At(i64),
    Count(i64),
    GetKeyValue(i64),
    FirstKeyValue,
    LastKeyValue,
    PopFirst,
    PopLast,
    EraseFound(i64),
    GetOrInsertDefault(i64),
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        6 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        3 => key_strategy().prop_map(MapOp::Remove),
        2 => key_strategy().prop_map(MapOp::Get),
        1 => key_strategy().prop_map(MapOp::At),
        1 => key_strategy().prop_map(MapOp::Count),
        1 => key_strategy().prop_map(MapOp::GetKeyValue),
        1 => Just(MapOp::FirstKeyValue),
        1 => Just(MapOp::LastKeyValue),
        1 => Just(MapOp::PopFirst),
        1 => Just(MapOp::PopLast),
        2 => key_strategy().prop_map(MapOp::EraseFound),
        1 => key_strategy().prop_map(MapOp::GetOrInsertDefault),
    ]
}

// ─── Core CRUD operations ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both AvlMap and BTreeMap and
    /// asserts identical results at every step.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut avl: AvlMap<i64, i64> = AvlMap::new();
        let mut bt: BTreeMap<i64, i64> = BTreeMap::new();

        for op in &ops {
            match op {
                MapOp::Insert(k, v) => {
                    let (cursor, inserted) = avl.insert(*k, *v);
                    let expected = !bt.contains_key(k);
                    bt.entry(*k).or_insert(*v);
                    prop_assert_eq!(inserted, expected, "insert({}, {})", k, v);
                    prop_assert_eq!(avl.get_at(cursor), Ok((k, &bt[k])), "insert({}, {}) cursor", k, v);
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(avl.remove(k), bt.remove(k), "remove({})", k);
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(avl.get(k), bt.get(k), "get({})", k);
                }
                MapOp::At(k) => {
                    prop_assert_eq!(avl.at(k), bt.get(k).ok_or(MapError::KeyNotFound), "at({})", k);
                }
                MapOp::Count(k) => {
                    prop_assert_eq!(avl.count(k), usize::from(bt.contains_key(k)), "count({})", k);
                }
                MapOp::GetKeyValue(k) => {
                    prop_assert_eq!(avl.get_key_value(k), bt.get_key_value(k), "get_key_value({})", k);
                }
                MapOp::FirstKeyValue => {
                    prop_assert_eq!(avl.first_key_value(), bt.first_key_value(), "first_key_value");
                }
                MapOp::LastKeyValue => {
                    prop_assert_eq!(avl.last_key_value(), bt.last_key_value(), "last_key_value");
                }
                MapOp::PopFirst => {
                    prop_assert_eq!(avl.pop_first(), bt.pop_first(), "pop_first");
                }
                MapOp::PopLast => {
                    prop_assert_eq!(avl.pop_last(), bt.pop_last(), "pop_last");
                }
                MapOp::EraseFound(k) => {
                    let cursor = avl.find(k);
                    match bt.remove_entry(k) {
                        Some(entry) => {
                            prop_assert_eq!(avl.erase(cursor), Ok(entry), "erase(find({}))", k);
                            prop_assert_eq!(avl.find(k), avl.end(), "find({}) after erase", k);
                        }
                        None => {
                            prop_assert!(cursor.is_end(), "find({}) of a missing key", k);
                            prop_assert_eq!(avl.erase(cursor), Err(MapError::InvalidIterator));
                        }
                    }
                }
                MapOp::GetOrInsertDefault(k) => {
                    let value = *avl.get_or_insert_default(*k);
                    prop_assert_eq!(value, *bt.entry(*k).or_default(), "get_or_insert_default({})", k);
                }
            }
            prop_assert_eq!(avl.len(), bt.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(avl.is_empty(), bt.is_empty(), "is_empty mismatch after {:?}", op);
            prop_assert!(avl.height() <= height_bound(avl.len()), "height {} for {} entries", avl.height(), avl.len());
        }

        let avl_items: Vec<_> = avl.iter().map(|(&k, &v)| (k, v)).collect();
        let bt_items: Vec<_> = bt.iter().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(avl_items, bt_items);
    }

    /// Tests that every iterator matches BTreeMap after random insertions.
    #[test]
    fn iterators_match_btreemap(entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..TEST_SIZE)) {
        let mut avl: AvlMap<i64, i64> = AvlMap::new();
        let mut bt: BTreeMap<i64, i64> = BTreeMap::new();

        for (k, v) in &entries {
            avl.insert(*k, *v);
            bt.entry(*k).or_insert(*v);
        }

        prop_assert!(avl.iter().eq(bt.iter()), "iter() mismatch");
        prop_assert!(avl.iter().rev().eq(bt.iter().rev()), "iter().rev() mismatch");
        prop_assert!(avl.keys().eq(bt.keys()), "keys() mismatch");
        prop_assert!(avl.values().rev().eq(bt.values().rev()), "values().rev() mismatch");
        prop_assert_eq!(avl.iter().len(), bt.len());

        for (value, expected) in avl.values_mut().zip(bt.values_mut()) {
            *value = value.wrapping_mul(3);
            *expected = expected.wrapping_mul(3);
        }
        for (_, value) in avl.iter_mut().rev().step_by(2) {
            *value = 0;
        }
        for (_, value) in bt.iter_mut().rev().step_by(2) {
            *value = 0;
        }

        let avl_owned: Vec<_> = avl.into_iter().collect();
        let bt_owned: Vec<_> = bt.into_iter().collect();
        prop_assert_eq!(avl_owned, bt_owned, "into_iter() mismatch");
    }

    /// Walking a cursor from `begin()` takes exactly `len()` steps to reach
    /// `end()`, and the same number of steps back.
    #[test]
    fn cursor_walks_cover_every_entry(keys in proptest::collection::btree_set(key_strategy(), 0..500)) {
        let map: AvlMap<i64, ()> = keys.iter().map(|&k| (k, ())).collect();

        let mut forward = Vec::new();
        let mut cursor = map.begin();
        while cursor != map.end() {
            forward.push(*map.get_at(cursor).unwrap().0);
            cursor = map.successor(cursor).unwrap();
        }
        prop_assert_eq!(forward.len(), map.len());
        prop_assert!(forward.iter().eq(keys.iter()));
        prop_assert_eq!(map.successor(cursor), Err(MapError::InvalidIterator));

        let mut backward = Vec::new();
        let mut cursor = map.end();
        while cursor != map.begin() {
            cursor = map.predecessor(cursor).unwrap();
            backward.push(*map.get_at(cursor).unwrap().0);
        }
        prop_assert!(backward.iter().eq(keys.iter().rev()));
        prop_assert_eq!(map.predecessor(cursor), Err(MapError::InvalidIterator));
    }

    /// Cursors keep denoting their own entry while other entries are erased,
    /// whatever the erasure does to the tree's shape.
    #[test]
    fn cursors_follow_their_entries(
        keys in proptest::collection::btree_set(key_strategy(), 1..300),
        doomed in proptest::collection::vec(key_strategy(), 0..300),
    ) {
        let mut map: AvlMap<i64, i64> = keys.iter().map(|&k| (k, k * 2)).collect();
        let cursors: Vec<(i64, Cursor)> = keys.iter().map(|&k| (k, map.find(&k))).collect();

        for key in &doomed {
            map.remove(key);
        }

        for (key, cursor) in cursors {
            let doubled = key * 2;
            if map.contains_key(&key) {
                prop_assert_eq!(map.get_at(cursor), Ok((&key, &doubled)));
            } else {
                prop_assert_eq!(map.get_at(cursor), Err(MapError::InvalidIterator));
                prop_assert_eq!(map.erase(cursor), Err(MapError::InvalidIterator));
            }
        }
    }

    /// Retain visits entries in order and keeps exactly what the predicate
    /// accepts.
    #[test]
    fn retain_matches_btreemap(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..TEST_SIZE),
        modulus in 2i64..7,
    ) {
        let mut avl: AvlMap<i64, i64> = AvlMap::new();
        let mut bt: BTreeMap<i64, i64> = BTreeMap::new();
        for (k, v) in &entries {
            avl.insert(*k, *v);
            bt.entry(*k).or_insert(*v);
        }

        let mut visited = Vec::new();
        avl.retain(|k, v| {
            visited.push(*k);
            *v = v.wrapping_add(1);
            k.rem_euclid(modulus) != 0
        });
        bt.retain(|k, v| {
            *v = v.wrapping_add(1);
            k.rem_euclid(modulus) != 0
        });

        prop_assert!(visited.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(avl.iter().eq(bt.iter()));
        prop_assert!(avl.height() <= height_bound(avl.len()));
    }
}

// ─── Concrete scenarios ──────────────────────────────────────────────────────

#[test]
fn ascending_inserts_balance() {
    let mut map = AvlMap::new();
    for key in [1, 2, 3] {
        assert!(map.insert(key, ()).1);
    }
    assert_eq!(map.height(), 2);
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 2, 3]);
}

#[test]
fn descending_inserts_balance() {
    let map = AvlMap::from([(3, 'c'), (2, 'b'), (1, 'a')]);
    assert_eq!(map.height(), 2);
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 2, 3]);
}

#[test]
fn at_on_empty_map_is_key_not_found() {
    let map: AvlMap<i32, i32> = AvlMap::new();
    assert_eq!(map.at(&42), Err(MapError::KeyNotFound));
}

#[test]
fn at_mut_updates_in_place() {
    let mut map = AvlMap::from([(1, 10)]);
    *map.at_mut(&1).unwrap() += 1;
    assert_eq!(map.at(&1), Ok(&11));
    assert_eq!(map.at_mut(&2), Err(MapError::KeyNotFound));
}

#[test]
fn get_or_insert_default_inserts_missing_key() {
    let mut map = AvlMap::from([(1, String::from("one"))]);
    let before = map.len();

    assert_eq!(map.get_or_insert_default(5), "");
    assert_eq!(map.at(&5), Ok(&String::new()));
    assert_eq!(map.len(), before + 1);

    map.get_or_insert_default(5).push_str("five");
    assert_eq!(map.len(), before + 1);
    assert_eq!(map[&5], "five");
}

#[test]
fn erase_two_child_node_keeps_balance() {
    let mut map: AvlMap<i32, i32> = (1..=7).map(|k| (k, k)).collect();
    let removed = map.erase(map.find(&4));
    assert_eq!(removed, Ok((4, 4)));
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 2, 3, 5, 6, 7]);
    assert_eq!(map.height(), 3);
    assert_eq!(map.find(&4), map.end());
}

#[test]
fn advancing_end_is_invalid() {
    let map = AvlMap::from([(1, ())]);
    assert_eq!(map.successor(map.end()), Err(MapError::InvalidIterator));
    assert_eq!(map.get_at(map.end()), Err(MapError::InvalidIterator));
}

#[test]
fn successor_cursor_survives_two_child_erase() {
    let mut map: AvlMap<i32, &str> = AvlMap::from([(1, "a"), (2, "b"), (3, "c"), (4, "d"), (5, "e"), (6, "f"), (7, "g")]);
    let root_key = 4;
    let successor = map.find(&5);
    let predecessor = map.find(&3);

    map.remove(&root_key);

    assert_eq!(map.get_at(successor), Ok((&5, &"e")));
    assert_eq!(map.get_at(predecessor), Ok((&3, &"c")));
    assert_eq!(map.successor(predecessor), Ok(successor));
    assert_eq!(map.predecessor(successor), Ok(predecessor));
}

#[test]
fn clone_rejects_original_cursors() {
    let original = AvlMap::from([(1, 'a')]);
    let copy = original.clone();
    assert_eq!(copy.get_at(original.begin()), Err(MapError::InvalidIterator));
    assert_eq!(copy.successor(original.end()), Err(MapError::InvalidIterator));
}

#[test]
fn clear_invalidates_cursors_even_after_reinsert() {
    let mut map = AvlMap::from([(1, 'a'), (2, 'b')]);
    let first = map.begin();
    let end = map.end();

    map.clear();
    assert!(map.is_empty());
    map.insert(1, 'a');

    assert_eq!(map.get_at(first), Err(MapError::InvalidIterator));
    assert_eq!(map.predecessor(end), Err(MapError::InvalidIterator));
    assert_ne!(map.begin(), first);
}

#[test]
fn reverse_comparator_orders_descending() {
    let mut map = AvlMap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    for key in [5, 1, 4, 2, 3, 4] {
        map.insert(key, key * 10);
    }
    assert_eq!(map.len(), 5);
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), [5, 4, 3, 2, 1]);
    assert_eq!(map.first_key_value(), Some((&5, &50)));
}

#[test]
fn less_adapter_treats_equivalent_keys_as_duplicates() {
    let mut map = AvlMap::with_comparator(Less(|a: &String, b: &String| a.to_lowercase() < b.to_lowercase()));
    assert!(map.insert(String::from("Banana"), 1).1);
    assert!(map.insert(String::from("apple"), 2).1);

    let (cursor, inserted) = map.insert(String::from("APPLE"), 3);
    assert!(!inserted);
    assert_eq!(map.get_at(cursor), Ok((&String::from("apple"), &2)));
    assert_eq!(map.keys().cloned().collect::<Vec<_>>(), ["apple", "Banana"]);
    assert_eq!(map.count(&String::from("BANANA")), 1);
}

// ─── Deep copy ───────────────────────────────────────────────────────────────

#[test]
fn clone_is_independent_both_ways() {
    let mut original: AvlMap<i32, Vec<i32>> = (0..50).map(|k| (k, vec![k])).collect();
    let mut copy = original.clone();
    assert_eq!(copy, original);
    assert_eq!(copy.height(), original.height());

    copy.remove(&10);
    copy.get_mut(&11).unwrap().push(0);
    assert_eq!(original.get(&10), Some(&vec![10]));
    assert_eq!(original[&11], [11]);

    original.insert(100, vec![]);
    original.get_mut(&12).unwrap().clear();
    assert!(!copy.contains_key(&100));
    assert_eq!(copy[&12], [12]);
}

#[test]
fn clone_from_replaces_destination() {
    let source = AvlMap::from([(7, 'x'), (8, 'y')]);
    let mut destination: AvlMap<i32, char> = (0..100).map(|k| (k, 'a')).collect();
    let stale = destination.find(&50);

    destination.clone_from(&source);

    assert_eq!(destination, source);
    assert_eq!(destination.get_at(stale), Err(MapError::InvalidIterator));
    assert_eq!(destination.get_at(destination.find(&7)), Ok((&7, &'x')));
}

#[test]
fn clone_of_empty_map() {
    let empty: AvlMap<i32, i32> = AvlMap::new();
    let copy = empty.clone();
    assert!(copy.is_empty());
    assert_eq!(copy.begin(), copy.end());
}

// ─── Trait implementations ───────────────────────────────────────────────────

#[test]
fn equality_ignores_insertion_order() {
    let a = AvlMap::from([(1, 'a'), (2, 'b'), (3, 'c')]);
    let b = AvlMap::from([(3, 'c'), (1, 'a'), (2, 'b')]);
    let c = AvlMap::from([(1, 'a'), (2, 'b')]);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn hash_is_consistent_with_eq() {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    let a = AvlMap::from([(1, 'a'), (2, 'b')]);
    let b = AvlMap::from([(2, 'b'), (1, 'a')]);
    assert_eq!(hash_of(&a), hash_of(&b));
}

#[test]
fn extend_by_reference_and_from_iterator() {
    let source = AvlMap::from([(1, 10), (2, 20)]);
    let mut target: AvlMap<i32, i32> = [(2, 99), (3, 30)].into_iter().collect();
    target.extend(&source);
    assert_eq!(target.iter().map(|(&k, &v)| (k, v)).collect::<Vec<_>>(), [(1, 10), (2, 99), (3, 30)]);
}

#[test]
fn debug_output() {
    let map = AvlMap::from([(2, "b"), (1, "a")]);
    assert_eq!(format!("{map:?}"), r#"{1: "a", 2: "b"}"#);
    assert_eq!(format!("{:?}", map.iter()), r#"[(1, "a"), (2, "b")]"#);
}

#[test]
#[should_panic(expected = "no entry found for key")]
fn index_panics_on_missing_key() {
    let map = AvlMap::from([(1, 1)]);
    let _ = map[&2];
}

#[test]
fn default_and_capacity() {
    let map: AvlMap<u8, u8> = AvlMap::default();
    assert!(map.is_empty());
    assert_eq!(map.height(), 0);

    let sized: AvlMap<u8, u8> = AvlMap::with_capacity(64);
    assert!(sized.capacity() >= 64);
}

#[test]
fn errors_display() {
    assert_eq!(MapError::KeyNotFound.to_string(), "key not found in map");
    let error: Box<dyn std::error::Error> = Box::new(MapError::InvalidIterator);
    assert_eq!(error.to_string(), "cursor does not denote a valid position in this map");
}

// ─── Thread Safety Tests ──────────────────────────────────────────────────────

mod send_sync_tests {
    use avl_map::avl_map::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
    use avl_map::{AvlMap, Cursor};
    use static_assertions::{assert_impl_all, assert_not_impl_any};

    assert_impl_all!(AvlMap<i64, i64>: Send, Sync);
    assert_impl_all!(Iter<'static, i64, i64>: Send, Sync);
    assert_impl_all!(IterMut<'static, i64, i64>: Send);
    assert_impl_all!(IntoIter<i64, i64>: Send, Sync);
    assert_impl_all!(Keys<'static, i64, i64>: Send, Sync);
    assert_impl_all!(Values<'static, i64, i64>: Send, Sync);
    assert_impl_all!(ValuesMut<'static, i64, i64>: Send);
    assert_impl_all!(Cursor: Send, Sync, Copy);
    assert_not_impl_any!(AvlMap<std::rc::Rc<i64>, i64>: Send, Sync);
}

// ─── Drop Semantics Tests ─────────────────────────────────────────────────────

mod drop_tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use avl_map::AvlMap;

    struct Droppable {
        drop_count: Rc<Cell<i32>>,
    }

    impl Droppable {
        fn new(drop_count: &Rc<Cell<i32>>) -> Self {
            Self {
                drop_count: Rc::clone(drop_count),
            }
        }
    }

    impl Drop for Droppable {
        fn drop(&mut self) {
            self.drop_count.set(self.drop_count.get() + 1);
        }
    }

    #[test]
    fn values_dropped_on_remove_and_erase() {
        let drop_count = Rc::new(Cell::new(0));
        let mut map: AvlMap<i64, Droppable> = AvlMap::new();
        for i in 0..100 {
            map.insert(i, Droppable::new(&drop_count));
        }
        assert_eq!(drop_count.get(), 0, "no drops before removal");

        map.remove(&50);
        assert_eq!(drop_count.get(), 1, "one value dropped after remove");

        let cursor = map.find(&25);
        drop(map.erase(cursor));
        assert_eq!(drop_count.get(), 2, "two values dropped after erase");
    }

    #[test]
    fn rejected_insert_drops_new_value_only() {
        let drop_count = Rc::new(Cell::new(0));
        let mut map: AvlMap<i64, Droppable> = AvlMap::new();
        map.insert(1, Droppable::new(&drop_count));

        let (_, inserted) = map.insert(1, Droppable::new(&drop_count));
        assert!(!inserted);
        assert_eq!(drop_count.get(), 1, "rejected value dropped");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn values_dropped_on_clear_and_map_drop() {
        let drop_count = Rc::new(Cell::new(0));
        {
            let mut map: AvlMap<i64, Droppable> = AvlMap::new();
            for i in 0..100 {
                map.insert(i, Droppable::new(&drop_count));
            }
            map.clear();
            assert_eq!(drop_count.get(), 100, "all values dropped after clear");

            for i in 0..10 {
                map.insert(i, Droppable::new(&drop_count));
            }
        }
        assert_eq!(drop_count.get(), 110, "remaining values dropped with the map");
    }

    #[test]
    fn partially_consumed_into_iter_drops_rest() {
        let drop_count = Rc::new(Cell::new(0));
        let map: AvlMap<i64, Droppable> = (0..10).map(|i| (i, Droppable::new(&drop_count))).collect();

        let mut iter = map.into_iter();
        drop(iter.next());
        drop(iter.next_back());
        assert_eq!(drop_count.get(), 2);
        drop(iter);
        assert_eq!(drop_count.get(), 10);
    }
}

// ─── Entry API ───────────────────────────────────────────────────────────────

#[test]
fn entry_counts_words() {
    let mut counts: AvlMap<&str, usize> = AvlMap::new();
    for word in "the quick brown fox jumps over the lazy dog the end".split_whitespace() {
        counts.entry(word).and_modify(|n| *n += 1).or_insert(1);
    }
    assert_eq!(counts[&"the"], 3);
    assert_eq!(counts[&"fox"], 1);
    assert_eq!(counts.len(), 9);
    assert!(counts.keys().zip(counts.keys().skip(1)).all(|(a, b)| a < b));
}

#[test]
fn entry_cursor_and_removal() {
    let mut map: AvlMap<i32, i32> = (0..20).map(|k| (k, k)).collect();
    let cursor = match map.entry(10) {
        avl_map::avl_map::Entry::Occupied(o) => o.cursor(),
        avl_map::avl_map::Entry::Vacant(_) => unreachable!(),
    };
    assert_eq!(map.get_at(cursor), Ok((&10, &10)));

    if let avl_map::avl_map::Entry::Occupied(o) = map.entry(10) {
        assert_eq!(o.remove(), 10);
    }
    assert_eq!(map.get_at(cursor), Err(MapError::InvalidIterator));
    assert_eq!(*map.entry(10).or_insert_with(|| 42), 42);
    assert_eq!(map.entry(11).key(), &11);
}
