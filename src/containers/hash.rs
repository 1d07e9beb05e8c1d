//! Unordered associative containers (§4.5): `HashSet`, `HashMultiSet`,
//! `HashMap`, `HashMultiMap`. Thin policy wrappers over a shared
//! `hash::HashTable<K, V, S>`, the same "wrapper over a shared index" shape
//! `containers::tree` uses — no teacher precedent exists for the hash index
//! itself (the teacher is ordered-only, §9), but the wrapper shape is
//! grounded the same way.

use std::hash::{BuildHasher, Hash};

use crate::hash::{FnvBuildHasher, HashTable, IntoIter as CoreIntoIter, Iter as CoreIter, IterMut as CoreIterMut};
use crate::iter::{BidirectionalIterator, ForwardIterator};
use crate::list::Handle;

// Iterator wrappers -----------------------------------------------------------------------------------------------

pub struct Iter<'a, K, V> {
    pub(crate) inner: CoreIter<'a, K, V>,
}
impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Iter { inner: self.inner.clone() }
    }
}
impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}
impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}
impl<'a, K, V> ForwardIterator for Iter<'a, K, V> {
    fn equal_to(&self, other: &Self) -> bool {
        self.inner.equal_to(&other.inner)
    }
}
impl<'a, K, V> BidirectionalIterator for Iter<'a, K, V> {}

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
impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

pub struct Keys<'a, K, V> {
    inner: CoreIter<'a, K, V>,
}
impl<'a, K, V> Clone for Keys<'a, K, V> {
    fn clone(&self) -> Self {
        Keys { inner: self.inner.clone() }
    }
}
impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;
    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }
}
impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}
impl<'a, K, V> ForwardIterator for Keys<'a, K, V> {
    fn equal_to(&self, other: &Self) -> bool {
        self.inner.equal_to(&other.inner)
    }
}
impl<'a, K, V> BidirectionalIterator for Keys<'a, K, V> {}

// HashSet -----------------------------------------------------------------------------------------------------------

/// Unordered set, unique keys. Amortized `O(1)` lookup/insert/erase.
pub struct HashSet<K, S = FnvBuildHasher> {
    table: HashTable<K, (), S>,
}

impl<K: Hash + Eq> HashSet<K, FnvBuildHasher> {
    pub fn new() -> Self {
        HashSet { table: HashTable::new() }
    }
}

impl<K: Hash + Eq> Default for HashSet<K, FnvBuildHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, S: BuildHasher> HashSet<K, S> {
    pub fn with_hasher(hash_builder: S) -> Self {
        HashSet {
            table: HashTable::with_hasher(hash_builder),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
    pub fn clear(&mut self) {
        self.table.clear()
    }
    pub fn swap(&mut self, other: &mut Self) {
        self.table.swap(&mut other.table)
    }
    pub fn bucket_count(&self) -> usize {
        self.table.bucket_count()
    }
    pub fn load_factor(&self) -> f32 {
        self.table.load_factor()
    }
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.table.find(key).is_some()
    }

    /// 0 or 1, since keys are unique (§4.5's shared Lookup API).
    pub fn count(&self, key: &K) -> usize {
        self.table.count(key)
    }

    pub fn iter(&self) -> Keys<'_, K, ()> {
        Keys {
            inner: CoreIter::new(&self.table.elems),
        }
    }

    /// `true` if `key` was not already present.
    pub fn insert(&mut self, key: K) -> bool {
        self.table.insert_unique(key, ()).1
    }

    pub fn erase(&mut self, key: &K) -> bool {
        match self.table.find(key) {
            Some(h) => {
                self.table.erase(h);
                true
            }
            None => false,
        }
    }
}

impl<K: Hash + Eq, S: BuildHasher + Default> FromIterator<K> for HashSet<K, S> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = HashSet::with_hasher(S::default());
        for k in iter {
            set.insert(k);
        }
        set
    }
}

// HashMultiSet --------------------------------------------------------------------------------------------------------

/// Unordered set, duplicate keys permitted.
pub struct HashMultiSet<K, S = FnvBuildHasher> {
    table: HashTable<K, (), S>,
}

impl<K: Hash + Eq> HashMultiSet<K, FnvBuildHasher> {
    pub fn new() -> Self {
        HashMultiSet { table: HashTable::new() }
    }
}

impl<K: Hash + Eq> Default for HashMultiSet<K, FnvBuildHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, S: BuildHasher> HashMultiSet<K, S> {
    pub fn with_hasher(hash_builder: S) -> Self {
        HashMultiSet {
            table: HashTable::with_hasher(hash_builder),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
    pub fn clear(&mut self) {
        self.table.clear()
    }
    pub fn swap(&mut self, other: &mut Self) {
        self.table.swap(&mut other.table)
    }

    pub fn count(&self, key: &K) -> usize {
        self.table.count(key)
    }

    pub fn iter(&self) -> Keys<'_, K, ()> {
        Keys {
            inner: CoreIter::new(&self.table.elems),
        }
    }

    pub fn insert(&mut self, key: K) {
        self.table.insert_multi(key, ());
    }

    pub fn equal_range(&self, key: &K) -> Keys<'_, K, ()> {
        let (lo, hi) = self.table.equal_range(key);
        Keys {
            inner: CoreIter::from_bounds(&self.table.elems, lo, hi),
        }
    }

    /// Erases every cell equal to `key`. Returns the number removed.
    pub fn erase(&mut self, key: &K) -> usize {
        let mut erased = 0;
        while let Some(h) = self.table.find(key) {
            self.table.erase(h);
            erased += 1;
        }
        erased
    }
}

// HashMap -----------------------------------------------------------------------------------------------------------

/// Unordered map, unique keys.
pub struct HashMap<K, V, S = FnvBuildHasher> {
    table: HashTable<K, V, S>,
}

impl<K: Hash + Eq, V> HashMap<K, V, FnvBuildHasher> {
    pub fn new() -> Self {
        HashMap { table: HashTable::new() }
    }
}

impl<K: Hash + Eq, V> Default for HashMap<K, V, FnvBuildHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> HashMap<K, V, S> {
    pub fn with_hasher(hash_builder: S) -> Self {
        HashMap {
            table: HashTable::with_hasher(hash_builder),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
    pub fn clear(&mut self) {
        self.table.clear()
    }
    pub fn swap(&mut self, other: &mut Self) {
        self.table.swap(&mut other.table)
    }
    pub fn bucket_count(&self) -> usize {
        self.table.bucket_count()
    }
    pub fn load_factor(&self) -> f32 {
        self.table.load_factor()
    }
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.table.find(key).is_some()
    }
    pub fn get(&self, key: &K) -> Option<&V> {
        self.table.find(key).map(|h| self.table.value_at(h))
    }
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let h = self.table.find(key)?;
        Some(self.table.value_at_mut(h))
    }

    /// 0 or 1, since keys are unique (§4.5's shared Lookup API).
    pub fn count(&self, key: &K) -> usize {
        self.table.count(key)
    }

    /// Panics if `key` is absent, matching `TreeMap::at` (§4.5).
    pub fn at(&self, key: &K) -> &V {
        self.get(key).expect("HashMap::at: key not present")
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: CoreIter::new(&self.table.elems),
        }
    }
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: CoreIterMut::new(&mut self.table.elems),
        }
    }
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.iter_mut().map(|(_, v)| v)
    }

    /// Inserts only if `key` is absent (no update-on-duplicate, matching
    /// `TreeMap::insert`'s policy, §9). Returns `true` if inserted.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.table.insert_unique(key, value).1
    }

    pub fn erase(&mut self, key: &K) -> Option<V> {
        let h = self.table.find(key)?;
        Some(self.table.erase(h).1)
    }

    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, S> {
        match self.table.find(&key) {
            Some(h) => Entry::Occupied(OccupiedEntry {
                table: &mut self.table,
                handle: h,
            }),
            None => Entry::Vacant(VacantEntry {
                table: &mut self.table,
                key,
            }),
        }
    }
}

/// A view into a single slot of a [`HashMap`] (mirrors
/// `containers::tree::Entry`).
pub enum Entry<'a, K, V, S> {
    Occupied(OccupiedEntry<'a, K, V, S>),
    Vacant(VacantEntry<'a, K, V, S>),
}

pub struct OccupiedEntry<'a, K, V, S> {
    table: &'a mut HashTable<K, V, S>,
    handle: Handle,
}

pub struct VacantEntry<'a, K, V, S> {
    table: &'a mut HashTable<K, V, S>,
    key: K,
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> Entry<'a, K, V, S> {
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(e) => e.table.value_at_mut(e.handle),
            Entry::Vacant(e) => {
                let h = e.table.insert_multi(e.key, default);
                e.table.value_at_mut(h)
            }
        }
    }

    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(e) => e.table.value_at_mut(e.handle),
            Entry::Vacant(e) => {
                let value = default();
                let h = e.table.insert_multi(e.key, value);
                e.table.value_at_mut(h)
            }
        }
    }

    pub fn or_insert_with_key<F: FnOnce(&K) -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(e) => e.table.value_at_mut(e.handle),
            Entry::Vacant(e) => {
                let value = default(&e.key);
                let h = e.table.insert_multi(e.key, value);
                e.table.value_at_mut(h)
            }
        }
    }

    pub fn and_modify<F: FnOnce(&mut V)>(self, f: F) -> Self {
        match self {
            Entry::Occupied(mut e) => {
                f(e.table.value_at_mut(e.handle));
                Entry::Occupied(e)
            }
            Entry::Vacant(e) => Entry::Vacant(e),
        }
    }
}

impl<'a, K: Hash + Eq, V: Default, S: BuildHasher> Entry<'a, K, V, S> {
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(V::default)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher + Default> FromIterator<(K, V)> for HashMap<K, V, S> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = HashMap::with_hasher(S::default());
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<K, V, S> IntoIterator for HashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            inner: CoreIntoIter::new(self.table.elems),
        }
    }
}

// HashMultiMap --------------------------------------------------------------------------------------------------------

/// Unordered map, duplicate keys permitted; equal keys stay list-adjacent.
pub struct HashMultiMap<K, V, S = FnvBuildHasher> {
    table: HashTable<K, V, S>,
}

impl<K: Hash + Eq, V> HashMultiMap<K, V, FnvBuildHasher> {
    pub fn new() -> Self {
        HashMultiMap { table: HashTable::new() }
    }
}

impl<K: Hash + Eq, V> Default for HashMultiMap<K, V, FnvBuildHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> HashMultiMap<K, V, S> {
    pub fn with_hasher(hash_builder: S) -> Self {
        HashMultiMap {
            table: HashTable::with_hasher(hash_builder),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
    pub fn clear(&mut self) {
        self.table.clear()
    }
    pub fn swap(&mut self, other: &mut Self) {
        self.table.swap(&mut other.table)
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: CoreIter::new(&self.table.elems),
        }
    }
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: CoreIterMut::new(&mut self.table.elems),
        }
    }

    pub fn count(&self, key: &K) -> usize {
        self.table.count(key)
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.table.insert_multi(key, value);
    }

    pub fn equal_range(&self, key: &K) -> Iter<'_, K, V> {
        let (lo, hi) = self.table.equal_range(key);
        Iter {
            inner: CoreIter::from_bounds(&self.table.elems, lo, hi),
        }
    }

    /// Erases every cell equal to `key`. Returns the number removed.
    pub fn erase(&mut self, key: &K) -> usize {
        let mut erased = 0;
        while let Some(h) = self.table.find(key) {
            self.table.erase(h);
            erased += 1;
        }
        erased
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hash_set_basic() {
        let mut s: HashSet<i32> = HashSet::new();
        assert!(s.insert(1));
        assert!(!s.insert(1));
        assert!(s.contains(&1));
        assert_eq!(s.count(&1), 1);
        assert_eq!(s.count(&2), 0);
        assert!(s.erase(&1));
        assert!(!s.contains(&1));
    }

    #[test]
    fn hash_multiset_counts() {
        let mut s: HashMultiSet<&str> = HashMultiSet::new();
        s.insert("a");
        s.insert("a");
        s.insert("b");
        assert_eq!(s.count(&"a"), 2);
        assert_eq!(s.erase(&"a"), 2);
        assert_eq!(s.count(&"a"), 0);
    }

    #[test]
    fn hash_map_insert_and_entry() {
        let mut m: HashMap<&str, i32> = HashMap::new();
        assert!(m.insert("a", 1));
        assert!(!m.insert("a", 2));
        assert_eq!(*m.at(&"a"), 1, "insert must not overwrite an existing key (§9)");
        *m.entry("a").or_insert(0) += 10;
        assert_eq!(*m.at(&"a"), 11);
        *m.entry("b").or_insert(5) += 1;
        assert_eq!(*m.at(&"b"), 6);
        assert_eq!(m.count(&"a"), 1);
        assert_eq!(m.count(&"z"), 0);
    }

    #[test]
    fn hash_multimap_equal_range() {
        let mut m: HashMultiMap<&str, i32> = HashMultiMap::new();
        m.insert("x", 1);
        m.insert("y", 2);
        m.insert("x", 3);
        let got: Vec<_> = m.equal_range(&"x").map(|(_, v)| *v).collect();
        assert_eq!(got, vec![1, 3]);
        assert_eq!(m.count(&"x"), 2);
        assert_eq!(m.count(&"y"), 1);
        assert_eq!(m.count(&"z"), 0);
    }
}
