//! Ordered associative containers (§4.5): `TreeSet`, `TreeMultiSet`,
//! `TreeMap`, `TreeMultiMap`. Thin policy wrappers over a shared
//! `tree::RedBlackTree<K, V, C>` — the same "wrapper over a shared index"
//! shape the teacher uses for `SgSet`/`SgMap` over `self.bst` (`set.rs`/
//! `map.rs` in the retrieval pack), generalized to four variants instead of
//! two since unique-vs-multi is now a surface-level policy rather than a
//! second core implementation (§9).

use crate::compare::{Comparator, OrdComparator};
use crate::error::{Error, LogicError};
use crate::iter::{BidirectionalIterator, ForwardIterator};
use crate::tree::{IntoIter as CoreIntoIter, Iter as CoreIter, IterMut as CoreIterMut, RedBlackTree};

// Iterator wrappers -----------------------------------------------------------------------------------------------

/// Borrowed key/value iterator, yielded by [`TreeMap::iter`] /
/// [`TreeMultiMap::iter`].
pub struct Iter<'a, K, V, C = OrdComparator<K>> {
    pub(crate) inner: CoreIter<'a, K, V, C>,
}

impl<'a, K, V, C> Clone for Iter<'a, K, V, C> {
    fn clone(&self) -> Self {
        Iter { inner: self.inner.clone() }
    }
}

impl<'a, K, V, C: Comparator<K>> Iterator for Iter<'a, K, V, C> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}
impl<'a, K, V, C: Comparator<K>> DoubleEndedIterator for Iter<'a, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}
impl<'a, K, V, C: Comparator<K>> ForwardIterator for Iter<'a, K, V, C> {
    fn equal_to(&self, other: &Self) -> bool {
        self.inner.equal_to(&other.inner)
    }
}
impl<'a, K, V, C: Comparator<K>> BidirectionalIterator for Iter<'a, K, V, C> {}

/// Borrowed, mutable-value iterator, yielded by [`TreeMap::iter_mut`].
pub struct IterMut<'a, K, V> {
    pub(crate) inner: CoreIterMut<'a, K, V>,
}
impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}
impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

/// Owning key/value iterator, yielded by `into_iter`.
pub struct IntoIter<K, V> {
    inner: CoreIntoIter<K, V>,
}
impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}
impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

/// Borrowed key iterator, yielded by [`TreeSet::iter`] / [`TreeMap::keys`].
pub struct Keys<'a, K, V, C = OrdComparator<K>> {
    inner: CoreIter<'a, K, V, C>,
}
impl<'a, K, V, C> Clone for Keys<'a, K, V, C> {
    fn clone(&self) -> Self {
        Keys { inner: self.inner.clone() }
    }
}
impl<'a, K, V, C: Comparator<K>> Iterator for Keys<'a, K, V, C> {
    type Item = &'a K;
    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }
}
impl<'a, K, V, C: Comparator<K>> DoubleEndedIterator for Keys<'a, K, V, C> {
    fn next_back(&mut self) -> Option<&'a K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}
impl<'a, K, V, C: Comparator<K>> ForwardIterator for Keys<'a, K, V, C> {
    fn equal_to(&self, other: &Self) -> bool {
        self.inner.equal_to(&other.inner)
    }
}
impl<'a, K, V, C: Comparator<K>> BidirectionalIterator for Keys<'a, K, V, C> {}

// TreeSet ---------------------------------------------------------------------------------------------------------

/// Ordered set, unique keys. `O(log n)` lookup/insert/erase.
pub struct TreeSet<K, C = OrdComparator<K>> {
    tree: RedBlackTree<K, (), C>,
}

impl<K: Ord> TreeSet<K, OrdComparator<K>> {
    pub fn new() -> Self {
        TreeSet {
            tree: RedBlackTree::new(),
        }
    }
}

impl<K: Ord> Default for TreeSet<K, OrdComparator<K>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C: Comparator<K>> TreeSet<K, C> {
    pub fn with_comparator(comparator: C) -> Self {
        TreeSet {
            tree: RedBlackTree::with_comparator(comparator),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
    pub fn clear(&mut self) {
        self.tree.clear()
    }
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.tree.find_exact_idx(key).is_some()
    }
    pub fn get(&self, key: &K) -> Option<&K> {
        self.tree.find_exact_idx(key).map(|idx| self.tree.key_at(idx))
    }

    /// 0 or 1, since keys are unique (§4.5's shared Lookup API).
    pub fn count(&self, key: &K) -> usize {
        self.tree.find_exact_idx(key).map_or(0, |_| 1)
    }

    pub fn iter(&self) -> Keys<'_, K, (), C> {
        Keys {
            inner: CoreIter::new(&self.tree),
        }
    }

    /// `true` if `key` was not already present.
    pub fn insert(&mut self, key: K) -> bool {
        self.tree.insert_unique(key, ()).1
    }

    /// `O(1)` when `hint` correctly precedes `key`'s insertion point,
    /// `O(log n)` otherwise (§4.5).
    pub fn insert_hint(&mut self, hint: &Keys<'_, K, (), C>, key: K) -> bool {
        self.tree.insert_hint_unique(hint.inner.current_idx(), key, ()).1
    }

    pub fn erase(&mut self, key: &K) -> bool {
        match self.tree.find_exact_idx(key) {
            Some(idx) => {
                self.tree.erase_idx(idx);
                true
            }
            None => false,
        }
    }

    pub fn lower_bound(&self, key: &K) -> Keys<'_, K, (), C> {
        Keys {
            inner: CoreIter::from_bounds(&self.tree, self.tree.lower_bound_idx(key), None),
        }
    }
    pub fn upper_bound(&self, key: &K) -> Keys<'_, K, (), C> {
        Keys {
            inner: CoreIter::from_bounds(&self.tree, self.tree.upper_bound_idx(key), None),
        }
    }
}

impl<K, C: Comparator<K> + Default> FromIterator<K> for TreeSet<K, C> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = TreeSet::with_comparator(C::default());
        for k in iter {
            set.insert(k);
        }
        set
    }
}

// TreeMultiSet ------------------------------------------------------------------------------------------------------

/// Ordered set, duplicate keys permitted; equal keys stay list-adjacent.
pub struct TreeMultiSet<K, C = OrdComparator<K>> {
    tree: RedBlackTree<K, (), C>,
}

impl<K: Ord> TreeMultiSet<K, OrdComparator<K>> {
    pub fn new() -> Self {
        TreeMultiSet {
            tree: RedBlackTree::new(),
        }
    }
}

impl<K: Ord> Default for TreeMultiSet<K, OrdComparator<K>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C: Comparator<K>> TreeMultiSet<K, C> {
    pub fn with_comparator(comparator: C) -> Self {
        TreeMultiSet {
            tree: RedBlackTree::with_comparator(comparator),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
    pub fn clear(&mut self) {
        self.tree.clear()
    }
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree)
    }

    pub fn count(&self, key: &K) -> usize {
        let (lo, hi) = self.tree.equal_range_idx(key);
        let mut n = 0;
        let mut cur = lo;
        while cur != hi {
            n += 1;
            cur = self.tree.successor(cur.expect("cur reached hi before None"));
        }
        n
    }

    pub fn iter(&self) -> Keys<'_, K, (), C> {
        Keys {
            inner: CoreIter::new(&self.tree),
        }
    }

    pub fn insert(&mut self, key: K) {
        self.tree.insert_multi(key, ());
    }

    pub fn insert_hint(&mut self, hint: &Keys<'_, K, (), C>, key: K) {
        self.tree.insert_hint_multi(hint.inner.current_idx(), key, ());
    }

    /// Erases every cell equal to `key`. Returns the number removed.
    pub fn erase(&mut self, key: &K) -> usize {
        let mut erased = 0;
        while let Some(idx) = self.tree.find_exact_idx(key) {
            self.tree.erase_idx(idx);
            erased += 1;
        }
        erased
    }

    pub fn equal_range(&self, key: &K) -> Keys<'_, K, (), C> {
        let (lo, hi) = self.tree.equal_range_idx(key);
        Keys {
            inner: CoreIter::from_bounds(&self.tree, lo, hi),
        }
    }
}

// TreeMap -----------------------------------------------------------------------------------------------------------

/// Ordered map, unique keys.
pub struct TreeMap<K, V, C = OrdComparator<K>> {
    tree: RedBlackTree<K, V, C>,
}

impl<K: Ord, V> TreeMap<K, V, OrdComparator<K>> {
    pub fn new() -> Self {
        TreeMap {
            tree: RedBlackTree::new(),
        }
    }
}

impl<K: Ord, V> Default for TreeMap<K, V, OrdComparator<K>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Comparator<K>> TreeMap<K, V, C> {
    pub fn with_comparator(comparator: C) -> Self {
        TreeMap {
            tree: RedBlackTree::with_comparator(comparator),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
    pub fn clear(&mut self) {
        self.tree.clear()
    }
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.find_exact_idx(key).is_some()
    }
    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.find_exact_idx(key).map(|idx| self.tree.value_at(idx))
    }
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.tree.find_exact_idx(key)?;
        Some(self.tree.value_at_mut(idx))
    }

    /// 0 or 1, since keys are unique (§4.5's shared Lookup API).
    pub fn count(&self, key: &K) -> usize {
        self.tree.find_exact_idx(key).map_or(0, |_| 1)
    }

    /// Panics if `key` is absent, mirroring the teacher's `Index` impl for
    /// `SgMap` (§4.5 "`at` panicking like the teacher's `Index` impl").
    pub fn at(&self, key: &K) -> &V {
        self.get(key).expect("TreeMap::at: key not present")
    }

    pub fn try_at(&self, key: &K) -> Result<&V, Error> {
        self.get(key).ok_or_else(|| LogicError::OutOfRange.into())
    }

    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter {
            inner: CoreIter::new(&self.tree),
        }
    }
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: CoreIterMut::new(&mut self.tree),
        }
    }
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }
    pub fn values_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut V> {
        self.iter_mut().map(|(_, v)| v)
    }

    /// Inserts only if `key` is absent (no update-on-duplicate, §4.5/§9).
    /// Returns `true` if inserted.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.tree.insert_unique(key, value).1
    }

    pub fn insert_hint(&mut self, hint: &Iter<'_, K, V, C>, key: K, value: V) -> bool {
        self.tree.insert_hint_unique(hint.inner.current_idx(), key, value).1
    }

    pub fn erase(&mut self, key: &K) -> Option<V> {
        let idx = self.tree.find_exact_idx(key)?;
        Some(self.tree.erase_idx(idx).1)
    }

    pub fn lower_bound(&self, key: &K) -> Iter<'_, K, V, C> {
        Iter {
            inner: CoreIter::from_bounds(&self.tree, self.tree.lower_bound_idx(key), None),
        }
    }
    pub fn upper_bound(&self, key: &K) -> Iter<'_, K, V, C> {
        Iter {
            inner: CoreIter::from_bounds(&self.tree, self.tree.upper_bound_idx(key), None),
        }
    }

    /// Entry-style default-insert (§4.5): `or_insert`/`or_insert_with`
    /// against a single slot found (or created) in one lookup, rather than
    /// the teacher's unfinished `entry()` (`map_types.rs`'s `Entry::*`,
    /// every arm a `todo!()` in the retrieval pack).
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, C> {
        match self.tree.find_exact_idx(&key) {
            Some(idx) => Entry::Occupied(OccupiedEntry { tree: &mut self.tree, idx }),
            None => Entry::Vacant(VacantEntry {
                tree: &mut self.tree,
                key,
            }),
        }
    }
}

/// A view into a single slot of a [`TreeMap`] (§4.5's "entry-style
/// default-insert").
pub enum Entry<'a, K, V, C> {
    Occupied(OccupiedEntry<'a, K, V, C>),
    Vacant(VacantEntry<'a, K, V, C>),
}

pub struct OccupiedEntry<'a, K, V, C> {
    tree: &'a mut RedBlackTree<K, V, C>,
    idx: usize,
}

pub struct VacantEntry<'a, K, V, C> {
    tree: &'a mut RedBlackTree<K, V, C>,
    key: K,
}

impl<'a, K, V, C: Comparator<K>> Entry<'a, K, V, C> {
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(e) => e.tree.value_at_mut(e.idx),
            Entry::Vacant(e) => {
                let idx = e.tree.insert_multi(e.key, default);
                e.tree.value_at_mut(idx)
            }
        }
    }

    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(e) => e.tree.value_at_mut(e.idx),
            Entry::Vacant(e) => {
                let value = default();
                let idx = e.tree.insert_multi(e.key, value);
                e.tree.value_at_mut(idx)
            }
        }
    }

    pub fn or_insert_with_key<F: FnOnce(&K) -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(e) => e.tree.value_at_mut(e.idx),
            Entry::Vacant(e) => {
                let value = default(&e.key);
                let idx = e.tree.insert_multi(e.key, value);
                e.tree.value_at_mut(idx)
            }
        }
    }

    pub fn and_modify<F: FnOnce(&mut V)>(self, f: F) -> Self {
        match self {
            Entry::Occupied(mut e) => {
                f(e.tree.value_at_mut(e.idx));
                Entry::Occupied(e)
            }
            Entry::Vacant(e) => Entry::Vacant(e),
        }
    }
}

impl<'a, K, V: Default, C: Comparator<K>> Entry<'a, K, V, C> {
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(V::default)
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for TreeMap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = TreeMap::with_comparator(C::default());
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<K, V, C> IntoIterator for TreeMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            inner: CoreIntoIter::new(self.tree.into_elems()),
        }
    }
}

// TreeMultiMap --------------------------------------------------------------------------------------------------------

/// Ordered map, duplicate keys permitted; equal keys stay list-adjacent.
pub struct TreeMultiMap<K, V, C = OrdComparator<K>> {
    tree: RedBlackTree<K, V, C>,
}

impl<K: Ord, V> TreeMultiMap<K, V, OrdComparator<K>> {
    pub fn new() -> Self {
        TreeMultiMap {
            tree: RedBlackTree::new(),
        }
    }
}

impl<K: Ord, V> Default for TreeMultiMap<K, V, OrdComparator<K>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Comparator<K>> TreeMultiMap<K, V, C> {
    pub fn with_comparator(comparator: C) -> Self {
        TreeMultiMap {
            tree: RedBlackTree::with_comparator(comparator),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
    pub fn clear(&mut self) {
        self.tree.clear()
    }
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree)
    }

    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter {
            inner: CoreIter::new(&self.tree),
        }
    }
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: CoreIterMut::new(&mut self.tree),
        }
    }

    /// Run-length over the equal-key span (§4.5's shared Lookup API),
    /// mirroring `TreeMultiSet::count`.
    pub fn count(&self, key: &K) -> usize {
        let (lo, hi) = self.tree.equal_range_idx(key);
        let mut n = 0;
        let mut cur = lo;
        while cur != hi {
            n += 1;
            cur = self.tree.successor(cur.expect("cur reached hi before None"));
        }
        n
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.tree.insert_multi(key, value);
    }

    pub fn insert_hint(&mut self, hint: &Iter<'_, K, V, C>, key: K, value: V) {
        self.tree.insert_hint_multi(hint.inner.current_idx(), key, value);
    }

    pub fn equal_range(&self, key: &K) -> Iter<'_, K, V, C> {
        let (lo, hi) = self.tree.equal_range_idx(key);
        Iter {
            inner: CoreIter::from_bounds(&self.tree, lo, hi),
        }
    }

    /// Erases every cell equal to `key`. Returns the number removed.
    pub fn erase(&mut self, key: &K) -> usize {
        let mut erased = 0;
        while let Some(idx) = self.tree.find_exact_idx(key) {
            self.tree.erase_idx(idx);
            erased += 1;
        }
        erased
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tree_set_basic() {
        let mut s: TreeSet<i32> = TreeSet::new();
        assert!(s.insert(3));
        assert!(s.insert(1));
        assert!(!s.insert(3));
        assert_eq!(s.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(s.count(&3), 1);
        assert_eq!(s.count(&99), 0);
        assert!(s.erase(&3));
        assert!(!s.erase(&3));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn tree_multiset_counts_duplicates() {
        let mut s: TreeMultiSet<i32> = TreeMultiSet::new();
        s.insert(2);
        s.insert(2);
        s.insert(1);
        assert_eq!(s.count(&2), 2);
        assert_eq!(s.erase(&2), 2);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn tree_map_insert_get_at() {
        let mut m: TreeMap<&str, i32> = TreeMap::new();
        assert!(m.insert("a", 1));
        assert!(!m.insert("a", 2));
        assert_eq!(*m.at(&"a"), 1, "insert must not overwrite an existing key (§9)");
        *m.get_mut(&"a").unwrap() = 5;
        assert_eq!(*m.at(&"a"), 5);
        assert_eq!(m.count(&"a"), 1);
        assert_eq!(m.count(&"z"), 0);
    }

    #[test]
    fn tree_map_entry_or_insert_with() {
        let mut m: TreeMap<&str, i32> = TreeMap::new();
        *m.entry("a").or_insert(0) += 1;
        *m.entry("a").or_insert(0) += 1;
        assert_eq!(*m.at(&"a"), 2);
    }

    #[test]
    fn tree_map_into_iter_is_sorted() {
        let mut m: TreeMap<i32, &str> = TreeMap::new();
        m.insert(2, "b");
        m.insert(1, "a");
        let collected: Vec<_> = m.into_iter().collect();
        assert_eq!(collected, vec![(1, "a"), (2, "b")]);
    }

    #[test]
    fn tree_multimap_equal_range() {
        let mut m: TreeMultiMap<i32, i32> = TreeMultiMap::new();
        m.insert(1, 10);
        m.insert(1, 20);
        m.insert(2, 30);
        let got: Vec<_> = m.equal_range(&1).map(|(_, v)| *v).collect();
        assert_eq!(got, vec![10, 20]);
        assert_eq!(m.count(&1), 2);
        assert_eq!(m.count(&2), 1);
        assert_eq!(m.count(&3), 0);
    }
}
