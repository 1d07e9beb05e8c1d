/*!
Ordered (red-black tree) and unordered (hash) set/map containers sharing a
single iterator protocol, plus the handful of sequence containers and
generic algorithms an application built on them needs close at hand.

* **Eight associative containers:** [`TreeSet`]/[`TreeMultiSet`]/[`TreeMap`]/
  [`TreeMultiMap`] (ordered, red-black tree index) and [`HashSet`]/
  [`HashMultiSet`]/[`HashMap`]/[`HashMultiMap`] (unordered, open-hashing
  index) — the unique/multi and set/map axes are surface policy over two
  shared indices, not four separate implementations.
* **One iterator protocol:** every container iterator implements
  [`iter::ForwardIterator`], and additionally [`iter::BidirectionalIterator`]
  /[`iter::RandomAccessIterator`] where the backing structure supports it, so
  [`algo`] and [`iter::Rev`] work uniformly across the whole crate.
* **Predictable complexity:** tree operations are worst-case `O(log n)`
  (textbook red-black rebalancing, not amortized rebuild); hash operations
  are expected `O(1)` with `rehash` triggered by `max_load_factor`.
* **Safe:** `#![forbid(unsafe_code)]`. No recursive tree/list algorithm —
  every traversal is iterative, so stack depth never scales with container
  size.

### Usage

```
use corecol::{TreeMap, TreeSet};

let mut ages: TreeMap<&str, u32> = TreeMap::new();
ages.insert("alice", 30);
ages.insert("bob", 25);
assert_eq!(*ages.at(&"alice"), 30);
assert_eq!(ages.iter().map(|(k, _)| *k).collect::<Vec<_>>(), vec!["alice", "bob"]);

let mut seen: TreeSet<i32> = TreeSet::new();
for k in [3, 1, 4, 1, 5, 9, 2, 6] {
    seen.insert(k);
}
assert_eq!(seen.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6, 9]);
```

### Validation

Every index (`tree::RedBlackTree`, `hash::HashTable`) carries seeded
randomized differential tests against `std::collections::BTreeMap`/
`BTreeSet`/`HashMap`/`HashSet` alongside the literal scenario tests named in
the container's own module, matching the same "validate against the standard
library's ordered/unordered collections" strategy this crate's design is
descended from.

### License and Contributing

Licensed under the MIT license.
*/

#![forbid(unsafe_code)]

mod compare;
pub use compare::{Comparator, FnComparator, OrdComparator};

mod error;
pub use error::{Error, LogicError, RuntimeError, SystemError};

mod env;
pub use env::is_host_module_system;

mod list;
pub use list::Handle;

/// The iterator protocol (§4.1): [`iter::ForwardIterator`],
/// [`iter::BidirectionalIterator`], [`iter::RandomAccessIterator`], and the
/// [`iter::Rev`] reverse adaptor.
pub mod iter;

mod tree;
mod hash;

mod containers;
pub use containers::{
    HashMap, HashMapEntry, HashMapOccupiedEntry, HashMapVacantEntry, HashMultiMap, HashMultiSet, HashSet,
    HashIntoIter, HashIter, HashIterMut, HashKeys, TreeMap, TreeMapEntry, TreeMapOccupiedEntry, TreeMapVacantEntry,
    TreeMultiMap, TreeMultiSet, TreeSet, TreeIntoIter, TreeIter, TreeIterMut, TreeKeys,
};

/// Sequence containers and adaptors (§6): `Vector`, `Deque`, `List`,
/// `Stack`, `Queue` — external collaborators, lightly specified relative to
/// the associative container core, but each exposes iterators satisfying
/// the same [`iter`] protocol.
pub mod sequence;

/// Generic algorithms (§4.6) against the iterator protocol only.
pub mod algo;

#[cfg(test)]
mod test {
    use super::*;

    // E1 (spec.md §8): TreeSet<int> insert [3, 1, 4, 1, 5, 9, 2, 6].
    #[test]
    fn e1_tree_set_scenario() {
        let mut s: TreeSet<i32> = TreeSet::new();
        for k in [3, 1, 4, 1, 5, 9, 2, 6] {
            s.insert(k);
        }
        assert_eq!(s.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6, 9]);
        assert_eq!(*s.lower_bound(&4).next().unwrap(), 4);
        assert_eq!(*s.upper_bound(&4).next().unwrap(), 5);
    }

    // E3 (spec.md §8): HashMap<string,int> insert ("a",1),("b",2),("a",3).
    #[test]
    fn e3_hash_map_scenario() {
        let mut m: HashMap<&str, i32> = HashMap::new();
        assert!(m.insert("a", 1));
        assert!(m.insert("b", 2));
        assert!(!m.insert("a", 3));
        assert_eq!(m.len(), 2);
        assert_eq!(*m.at(&"a"), 1);
    }

    // E5 (spec.md §8): swap exchanges contents between two containers.
    #[test]
    fn e5_swap_scenario() {
        let mut a: TreeSet<i32> = TreeSet::from_iter([1, 2, 3]);
        let mut b: TreeSet<i32> = TreeSet::from_iter([10, 20]);
        a.swap(&mut b);
        assert_eq!(a.iter().copied().collect::<Vec<_>>(), vec![10, 20]);
        assert_eq!(b.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
