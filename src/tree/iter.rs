//! Tree-index iterators (§4.1, §4.3). In-order traversal via parent
//! pointers and `successor`/`predecessor` — a direct upgrade of the
//! teacher's stack-based `tree/iter.rs`, which re-walks from the root on
//! every step because its nodes carry no parent link. Iteration order here
//! is exactly list order (Data Model invariant 1), since every insertion
//! splices its cell into the matching list position at insert time.

use crate::compare::Comparator;
use crate::iter::{BidirectionalIterator, ForwardIterator};

use super::rbtree::RedBlackTree;

/// Borrowed, forward-and-backward key/value iterator. Cheaply `Clone`able
/// (it borrows the tree, never mutates it), so it implements the full
/// `ForwardIterator`/`BidirectionalIterator` protocol.
pub(crate) struct Iter<'a, K, V, C> {
    tree: &'a RedBlackTree<K, V, C>,
    front: Option<usize>,
    back: Option<usize>,
    done: bool,
}

impl<'a, K, V, C: Comparator<K>> Iter<'a, K, V, C> {
    pub(crate) fn new(tree: &'a RedBlackTree<K, V, C>) -> Self {
        Iter {
            front: tree.first_idx(),
            back: tree.last_idx(),
            done: tree.is_empty(),
            tree,
        }
    }

    /// Bounded traversal over `[lo, hi)` node indices, backing
    /// `equal_range`/range-erase views (§4.3, §4.5). `lo == None` means an
    /// empty range.
    pub(crate) fn from_bounds(tree: &'a RedBlackTree<K, V, C>, lo: Option<usize>, hi: Option<usize>) -> Self {
        match lo {
            None => Iter {
                tree,
                front: None,
                back: None,
                done: true,
            },
            Some(lo_idx) => {
                // Back cursor for a DoubleEndedIterator must point at the last
                // *included* element, i.e. `hi`'s predecessor — `hi` itself
                // (when present) is one past the end of the range.
                let back = match hi {
                    Some(hi_idx) => tree.predecessor(hi_idx),
                    None => tree.last_idx(),
                };
                let done = back.is_none();
                Iter {
                    tree,
                    front: Some(lo_idx),
                    back,
                    done,
                }
            }
        }
    }
}

impl<'a, K, V, C> Clone for Iter<'a, K, V, C> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            done: self.done,
        }
    }
}

impl<'a, K, V, C: Comparator<K>> Iterator for Iter<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let idx = self.front?;
        if Some(idx) == self.back {
            self.done = true;
        } else {
            self.front = self.tree.successor(idx);
        }
        Some((self.tree.key_at(idx), self.tree.value_at(idx)))
    }
}

impl<'a, K, V, C: Comparator<K>> DoubleEndedIterator for Iter<'a, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let idx = self.back?;
        if Some(idx) == self.front {
            self.done = true;
        } else {
            self.back = self.tree.predecessor(idx);
        }
        Some((self.tree.key_at(idx), self.tree.value_at(idx)))
    }
}

impl<'a, K, V, C: Comparator<K>> ForwardIterator for Iter<'a, K, V, C> {
    fn equal_to(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.front == other.front && self.done == other.done
    }
}

impl<'a, K, V, C> Iter<'a, K, V, C> {
    /// The node index this iterator currently points at, or `None` at
    /// `end()`. Used as the hint argument for `insert_hint_*` (§4.5: "hint
    /// is an iterator").
    pub(crate) fn current_idx(&self) -> Option<usize> {
        if self.done {
            None
        } else {
            self.front
        }
    }
}

impl<'a, K, V, C: Comparator<K>> BidirectionalIterator for Iter<'a, K, V, C> {}

/// Borrowed, mutable-value iterator. Traversal order is computed once up
/// front (an immutable walk before any `&mut` is handed out), then every
/// cell's `&mut (K, V)` is borrowed simultaneously via
/// `list::CellArena::get_disjoint_mut` — ordinary disjoint-slot borrowing,
/// no `unsafe`, matching the crate's `#![forbid(unsafe_code)]` posture.
///
/// Does not implement [`ForwardIterator`]: that trait requires `Clone`,
/// which a live `&mut` borrow can never soundly provide.
pub(crate) struct IterMut<'a, K, V> {
    cells: std::collections::VecDeque<&'a mut (K, V)>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new<C: Comparator<K>>(tree: &'a mut RedBlackTree<K, V, C>) -> Self {
        let mut order = Vec::with_capacity(tree.len());
        let mut curr = tree.first_idx();
        while let Some(idx) = curr {
            order.push(idx);
            curr = tree.successor(idx);
        }
        let handles: Vec<_> = order.into_iter().map(|idx| tree.handle_at(idx)).collect();
        let cells = tree.elems.get_disjoint_mut(&handles).into_iter().collect();
        IterMut { cells }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.cells.pop_front()?;
        Some((&cell.0, &mut cell.1))
    }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let cell = self.cells.pop_back()?;
        Some((&cell.0, &mut cell.1))
    }
}

/// Consuming iterator. Drains the element list directly rather than
/// walking the tree, since the whole structure is being torn down anyway —
/// `O(1)` per element instead of `O(log n)` for a tree-maintaining erase.
pub(crate) struct IntoIter<K, V> {
    elems: crate::list::CellArena<(K, V)>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(elems: crate::list::CellArena<(K, V)>) -> Self {
        IntoIter { elems }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let h = self.elems.head()?;
        Some(self.elems.remove(h))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.elems.len(), Some(self.elems.len()))
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let h = self.elems.tail()?;
        Some(self.elems.remove(h))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::compare::OrdComparator;

    fn build() -> RedBlackTree<i32, &'static str, OrdComparator<i32>> {
        let mut t = RedBlackTree::new();
        for (k, v) in [(2, "b"), (1, "a"), (3, "c")] {
            t.insert_unique(k, v);
        }
        t
    }

    #[test]
    fn iter_forward_and_backward() {
        let t = build();
        let it = Iter::new(&t);
        let forward: Vec<_> = it.clone().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(forward, vec![(1, "a"), (2, "b"), (3, "c")]);
        let backward: Vec<_> = it.rev().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(backward, vec![(3, "c"), (2, "b"), (1, "a")]);
    }

    #[test]
    fn iter_mut_updates_values_in_place() {
        let mut t = build();
        for (_, v) in IterMut::new(&mut t) {
            *v = "x";
        }
        let got: Vec<_> = Iter::new(&t).map(|(_, v)| *v).collect();
        assert_eq!(got, vec!["x", "x", "x"]);
    }

    #[test]
    fn into_iter_drains_in_list_order() {
        let t = build();
        let elems = t.into_elems();
        let got: Vec<_> = IntoIter::new(elems).collect();
        assert_eq!(got, vec![(1, "a"), (2, "b"), (3, "c")]);
    }

    #[test]
    fn bounded_iter_matches_equal_range() {
        let mut t: RedBlackTree<i32, ()> = RedBlackTree::new();
        for k in [1, 2, 2, 2, 3] {
            t.insert_multi(k, ());
        }
        let (lo, hi) = t.equal_range_idx(&2);
        let got: Vec<_> = Iter::from_bounds(&t, lo, hi).map(|(k, _)| *k).collect();
        assert_eq!(got, vec![2, 2, 2]);
    }
}
