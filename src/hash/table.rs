use std::hash::{BuildHasher, Hash, Hasher};

use crate::list::{CellArena, Handle};

use super::hasher::FnvBuildHasher;

const INITIAL_BUCKETS: usize = 8;
const DEFAULT_MAX_LOAD_FACTOR: f32 = 1.0;

/// Unordered index over list cells (§4.4): new component, no teacher
/// precedent (the teacher is ordered-only). Separate-chaining hash table;
/// each bucket is a singly linked chain threaded through `chain`, indexed
/// directly by a cell's [`Handle`] rather than through a second arena —
/// since `Handle` already is a stable small integer (the teacher's arena
/// slot index, generalized in `list.rs`), there is no need to mint a
/// second index space the way the tree index needs its own node arena.
///
/// Iteration order is simply list order: for hash containers that is
/// insertion order (Data Model invariant 1's "either sorted order or
/// insertion-time order" clause), so hash iterators need nothing beyond
/// `list::CellArena::handles()` — no per-container traversal structure to
/// build or maintain.
pub(crate) struct HashTable<K, V, S = FnvBuildHasher> {
    pub(crate) elems: CellArena<(K, V)>,
    buckets: Vec<Option<Handle>>,
    chain: Vec<Option<Handle>>,
    hashes: Vec<u64>,
    len: usize,
    max_load_factor: f32,
    pub(crate) hash_builder: S,
}

impl<K: Hash + Eq, V> HashTable<K, V, FnvBuildHasher> {
    pub(crate) fn new() -> Self {
        Self::with_hasher(FnvBuildHasher)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> HashTable<K, V, S> {
    pub(crate) fn with_hasher(hash_builder: S) -> Self {
        HashTable {
            elems: CellArena::new(),
            buckets: Vec::new(),
            chain: Vec::new(),
            hashes: Vec::new(),
            len: 0,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            hash_builder,
        }
    }

    // Capacity -----------------------------------------------------------------------------------------------------

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn clear(&mut self) {
        self.elems.clear();
        self.buckets.clear();
        self.chain.clear();
        self.hashes.clear();
        self.len = 0;
    }

    pub(crate) fn swap(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.elems, &mut other.elems);
        core::mem::swap(&mut self.buckets, &mut other.buckets);
        core::mem::swap(&mut self.chain, &mut other.chain);
        core::mem::swap(&mut self.hashes, &mut other.hashes);
        core::mem::swap(&mut self.len, &mut other.len);
        core::mem::swap(&mut self.max_load_factor, &mut other.max_load_factor);
        core::mem::swap(&mut self.hash_builder, &mut other.hash_builder);
    }

    pub(crate) fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub(crate) fn load_factor(&self) -> f32 {
        if self.buckets.is_empty() {
            0.0
        } else {
            self.len as f32 / self.buckets.len() as f32
        }
    }

    pub(crate) fn max_load_factor(&self) -> f32 {
        self.max_load_factor
    }

    pub(crate) fn set_max_load_factor(&mut self, factor: f32) {
        self.max_load_factor = factor;
        if self.load_factor() > factor {
            let target = ((self.len as f32 / factor).ceil() as usize).max(INITIAL_BUCKETS);
            self.rehash(target.next_power_of_two());
        }
    }

    /// Ensures capacity for at least `additional` more elements without a
    /// rehash along the way (§4.4's `reserve`).
    pub(crate) fn reserve(&mut self, additional: usize) {
        let needed = self.len + additional;
        let target = ((needed as f32 / self.max_load_factor).ceil() as usize).max(INITIAL_BUCKETS);
        if target > self.buckets.len() {
            self.rehash(target.next_power_of_two());
        }
    }

    // Accessors --------------------------------------------------------------------------------------------------

    pub(crate) fn key_at(&self, handle: Handle) -> &K {
        &self.elems.get(handle).0
    }

    pub(crate) fn value_at(&self, handle: Handle) -> &V {
        &self.elems.get(handle).1
    }

    pub(crate) fn value_at_mut(&mut self, handle: Handle) -> &mut V {
        &mut self.elems.get_mut(handle).1
    }

    fn hash_of(&self, key: &K) -> u64 {
        let mut hasher = self.hash_builder.build_hasher();
        key.hash(&mut hasher);
        hasher.finish()
    }

    fn bucket_index(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    // Lookup -----------------------------------------------------------------------------------------------------

    /// Exact-match lookup. `O(1)` amortized, `O(bucket length)` worst case.
    pub(crate) fn find(&self, key: &K) -> Option<Handle> {
        if self.buckets.is_empty() {
            return None;
        }
        let hash = self.hash_of(key);
        let mut cur = self.buckets[self.bucket_index(hash)];
        while let Some(handle) = cur {
            if self.hashes[handle.0] == hash && self.elems.get(handle).0 == *key {
                return Some(handle);
            }
            cur = self.chain[handle.0];
        }
        None
    }

    pub(crate) fn count(&self, key: &K) -> usize {
        if self.buckets.is_empty() {
            return 0;
        }
        let hash = self.hash_of(key);
        let mut cur = self.buckets[self.bucket_index(hash)];
        let mut n = 0;
        while let Some(handle) = cur {
            if self.hashes[handle.0] == hash && self.elems.get(handle).0 == *key {
                n += 1;
            }
            cur = self.chain[handle.0];
        }
        n
    }

    /// `(lo, hi)` in list order: `lo` is the first matching cell, `hi` is
    /// one past the last (or `None` at the list tail). Relies on equal
    /// keys being kept list-adjacent by [`Self::insert_multi`].
    pub(crate) fn equal_range(&self, key: &K) -> (Option<Handle>, Option<Handle>) {
        let first = match self.find(key) {
            Some(h) => h,
            None => return (None, None),
        };
        let mut lo = first;
        while let Some(p) = self.elems.prev(lo) {
            if self.elems.get(p).0 != *key {
                break;
            }
            lo = p;
        }
        let mut last = first;
        while let Some(n) = self.elems.next(last) {
            if self.elems.get(n).0 != *key {
                break;
            }
            last = n;
        }
        (Some(lo), self.elems.next(last))
    }

    // Insertion ----------------------------------------------------------------------------------------------------

    /// Inserts only if no equal key is already present (backing for
    /// unique containers) — the same no-update-on-duplicate policy as
    /// `tree::RedBlackTree::insert_unique` (§4.5, §9).
    pub(crate) fn insert_unique(&mut self, key: K, val: V) -> (Handle, bool) {
        if let Some(existing) = self.find(&key) {
            return (existing, false);
        }
        (self.insert_multi(key, val), true)
    }

    /// Always inserts (backing for multi containers). When an equal key is
    /// already present, the new cell is spliced in immediately after it so
    /// that equal keys stay list-adjacent — the "hash-multi contiguous
    /// adjacency" rule `equal_range`/`count` depend on; a fresh, distinct
    /// key is appended at the list tail, preserving plain insertion order
    /// for the common case.
    pub(crate) fn insert_multi(&mut self, key: K, val: V) -> Handle {
        self.maybe_grow();
        let hash = self.hash_of(&key);
        let handle = match self.find(&key) {
            Some(existing) => self.elems.insert_after(existing, (key, val)),
            None => self.elems.push_back((key, val)),
        };
        self.link_bucket(handle, hash);
        handle
    }

    fn ensure_slot(&mut self, idx: usize) {
        if self.hashes.len() <= idx {
            self.hashes.resize(idx + 1, 0);
            self.chain.resize(idx + 1, None);
        }
    }

    fn link_bucket(&mut self, handle: Handle, hash: u64) {
        self.ensure_slot(handle.0);
        self.hashes[handle.0] = hash;
        let b = self.bucket_index(hash);
        self.chain[handle.0] = self.buckets[b];
        self.buckets[b] = Some(handle);
        self.len += 1;
    }

    fn unlink_bucket(&mut self, handle: Handle) {
        let hash = self.hashes[handle.0];
        let b = self.bucket_index(hash);
        let mut cur = self.buckets[b];
        let mut prev: Option<Handle> = None;
        while let Some(h) = cur {
            if h == handle {
                match prev {
                    Some(p) => self.chain[p.0] = self.chain[h.0],
                    None => self.buckets[b] = self.chain[h.0],
                }
                break;
            }
            prev = Some(h);
            cur = self.chain[h.0];
        }
        self.len -= 1;
    }

    fn maybe_grow(&mut self) {
        if self.buckets.is_empty() {
            self.rehash(INITIAL_BUCKETS);
            return;
        }
        let needed = self.len + 1;
        if needed as f32 > self.buckets.len() as f32 * self.max_load_factor {
            self.rehash(self.buckets.len() * 2);
        }
    }

    fn rehash(&mut self, nbuckets: usize) {
        let nbuckets = nbuckets.max(INITIAL_BUCKETS);
        self.buckets = vec![None; nbuckets];
        self.chain.clear();
        self.hashes.clear();
        let handles: Vec<Handle> = self.elems.handles().collect();
        for handle in handles {
            let hash = self.hash_of(&self.elems.get(handle).0);
            self.ensure_slot(handle.0);
            self.hashes[handle.0] = hash;
            let b = (hash % nbuckets as u64) as usize;
            self.chain[handle.0] = self.buckets[b];
            self.buckets[b] = Some(handle);
        }
    }

    // Erase ------------------------------------------------------------------------------------------------------

    pub(crate) fn erase(&mut self, handle: Handle) -> (K, V) {
        self.unlink_bucket(handle);
        self.elems.remove(handle)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn insert_unique_rejects_duplicate() {
        let mut t: HashTable<&str, i32> = HashTable::new();
        let (h1, inserted) = t.insert_unique("a", 1);
        assert!(inserted);
        let (h2, inserted) = t.insert_unique("a", 2);
        assert!(!inserted);
        assert_eq!(h1, h2);
        assert_eq!(*t.value_at(h1), 1);
    }

    #[test]
    fn find_after_many_inserts_and_rehashes() {
        let mut t: HashTable<i32, i32> = HashTable::new();
        for k in 0..500 {
            t.insert_unique(k, k * 2);
        }
        assert_eq!(t.len(), 500);
        for k in 0..500 {
            let h = t.find(&k).unwrap();
            assert_eq!(*t.value_at(h), k * 2);
        }
        assert!(t.find(&500).is_none());
    }

    #[test]
    fn multi_insert_keeps_equal_keys_adjacent() {
        let mut t: HashTable<&str, i32> = HashTable::new();
        t.insert_multi("x", 1);
        t.insert_multi("y", 2);
        t.insert_multi("x", 3);
        t.insert_multi("x", 4);

        assert_eq!(t.count(&"x"), 3);
        let (lo, hi) = t.equal_range(&"x");
        let mut vals = Vec::new();
        let mut cur = lo;
        while cur != hi {
            let h = cur.unwrap();
            vals.push(*t.value_at(h));
            cur = t.elems.next(h);
        }
        assert_eq!(vals, vec![1, 3, 4]);
    }

    #[test]
    fn erase_unlinks_from_bucket_and_list() {
        let mut t: HashTable<i32, &str> = HashTable::new();
        let (h1, _) = t.insert_unique(1, "a");
        t.insert_unique(2, "b");
        assert_eq!(t.erase(h1), (1, "a"));
        assert!(t.find(&1).is_none());
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn rehash_preserves_all_entries() {
        let mut t: HashTable<i32, i32> = HashTable::new();
        for k in 0..50 {
            t.insert_unique(k, k);
        }
        let before: Vec<(i32, i32)> = t.elems.handles().map(|h| *t.elems.get(h)).collect();
        t.reserve(1000);
        let after: Vec<(i32, i32)> = t.elems.handles().map(|h| *t.elems.get(h)).collect();
        assert_eq!(before, after);
        for k in 0..50 {
            assert!(t.find(&k).is_some());
        }
    }
}
