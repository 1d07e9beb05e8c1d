//! Public associative containers (§4.5): the eight-container matrix —
//! {tree, hash} × {set, multiset, map, multimap} — built as thin policy
//! wrappers over the shared indices in `crate::tree`/`crate::hash`. This is
//! the role the teacher's root-level `set.rs`/`map.rs` play (one wrapper
//! pair over one shared `SgTree`), generalized to four wrappers per index
//! since unique-vs-multi is now a surface policy rather than a second core
//! implementation (§9).

mod hash;
mod tree;

pub use hash::{
    Entry as HashMapEntry, HashMap, HashMultiMap, HashMultiSet, HashSet, IntoIter as HashIntoIter, Iter as HashIter,
    IterMut as HashIterMut, Keys as HashKeys, OccupiedEntry as HashMapOccupiedEntry, VacantEntry as HashMapVacantEntry,
};
pub use tree::{
    Entry as TreeMapEntry, IntoIter as TreeIntoIter, Iter as TreeIter, IterMut as TreeIterMut, Keys as TreeKeys,
    OccupiedEntry as TreeMapOccupiedEntry, TreeMap, TreeMultiMap, TreeMultiSet, TreeSet,
    VacantEntry as TreeMapVacantEntry,
};
