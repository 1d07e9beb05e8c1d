use crate::compare::{Comparator, OrdComparator};
use crate::list::{CellArena, Handle};

use super::node::{Color, NodeArena, RbNode};

/// Balanced BST index over list nodes for ordered associative containers
/// (§4.3). Stores `(K, V)` pairs directly — set containers instantiate
/// `V = ()`, the same trick `std::collections::BTreeSet` uses internally
/// over `BTreeMap<T, ()>`, so the tree core never needs a separate
/// key-extraction abstraction for the set/map split (§9's "set ⇒
/// value=key" axis falls out of this for free).
///
/// Rebalancing is the one piece with no teacher precedent to generalize:
/// see `tree/node.rs` and `SPEC_FULL.md` §4.3/§9 for why the teacher's
/// scapegoat-tree rebuild algorithm was replaced outright rather than
/// adapted.
pub(crate) struct RedBlackTree<K, V, C = OrdComparator<K>> {
    pub(crate) elems: CellArena<(K, V)>,
    nodes: NodeArena,
    root: Option<usize>,
    len: usize,
    pub(crate) comparator: C,
}

impl<K: Ord, V> RedBlackTree<K, V, OrdComparator<K>> {
    pub(crate) fn new() -> Self {
        Self::with_comparator(OrdComparator::new())
    }
}

impl<K, V, C: Comparator<K>> RedBlackTree<K, V, C> {
    pub(crate) fn with_comparator(comparator: C) -> Self {
        RedBlackTree {
            elems: CellArena::new(),
            nodes: NodeArena::new(),
            root: None,
            len: 0,
            comparator,
        }
    }

    // Capacity -----------------------------------------------------------------------------------------------------

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Releases cells but preserves the comparator (§5 "clear releases
    /// cells but preserves the container object and comparator/hash
    /// state").
    pub(crate) fn clear(&mut self) {
        self.elems.clear();
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// `O(1)`: re-parents the internal structures between `self` and
    /// `other`, including comparator state (§4.5, §5).
    pub(crate) fn swap(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.elems, &mut other.elems);
        core::mem::swap(&mut self.nodes, &mut other.nodes);
        core::mem::swap(&mut self.root, &mut other.root);
        core::mem::swap(&mut self.len, &mut other.len);
        core::mem::swap(&mut self.comparator, &mut other.comparator);
    }

    // Accessors used by container wrappers and by iterators ---------------------------------------------------------

    pub(crate) fn key_at(&self, idx: usize) -> &K {
        &self.elems.get(self.nodes.get(idx).handle).0
    }

    pub(crate) fn value_at(&self, idx: usize) -> &V {
        &self.elems.get(self.nodes.get(idx).handle).1
    }

    pub(crate) fn value_at_mut(&mut self, idx: usize) -> &mut V {
        &mut self.elems.get_mut(self.nodes.get(idx).handle).1
    }

    pub(crate) fn handle_at(&self, idx: usize) -> Handle {
        self.nodes.get(idx).handle
    }

    /// Consumes the tree, handing back the underlying element list for a
    /// consuming iterator to drain directly (`tree::iter::IntoIter`).
    pub(crate) fn into_elems(self) -> CellArena<(K, V)> {
        self.elems
    }

    pub(crate) fn first_idx(&self) -> Option<usize> {
        self.root.map(|r| self.tree_minimum(r))
    }

    pub(crate) fn last_idx(&self) -> Option<usize> {
        self.root.map(|r| self.tree_maximum(r))
    }

    pub(crate) fn successor(&self, idx: usize) -> Option<usize> {
        let node = self.nodes.get(idx);
        if let Some(r) = node.right {
            return Some(self.tree_minimum(r));
        }
        let mut x = idx;
        let mut p = node.parent;
        while let Some(pp) = p {
            if self.nodes.get(pp).left == Some(x) {
                return Some(pp);
            }
            x = pp;
            p = self.nodes.get(pp).parent;
        }
        None
    }

    pub(crate) fn predecessor(&self, idx: usize) -> Option<usize> {
        let node = self.nodes.get(idx);
        if let Some(l) = node.left {
            return Some(self.tree_maximum(l));
        }
        let mut x = idx;
        let mut p = node.parent;
        while let Some(pp) = p {
            if self.nodes.get(pp).right == Some(x) {
                return Some(pp);
            }
            x = pp;
            p = self.nodes.get(pp).parent;
        }
        None
    }

    fn tree_minimum(&self, mut idx: usize) -> usize {
        while let Some(l) = self.nodes.get(idx).left {
            idx = l;
        }
        idx
    }

    fn tree_maximum(&self, mut idx: usize) -> usize {
        while let Some(r) = self.nodes.get(idx).right {
            idx = r;
        }
        idx
    }

    // Lookup (§4.3 operation table) ----------------------------------------------------------------------------------

    /// Smallest key not less than `key`. `O(log n)`.
    pub(crate) fn lower_bound_idx(&self, key: &K) -> Option<usize> {
        let mut curr = self.root;
        let mut result = None;
        while let Some(idx) = curr {
            if !self.comparator.less(self.key_at(idx), key) {
                result = Some(idx);
                curr = self.nodes.get(idx).left;
            } else {
                curr = self.nodes.get(idx).right;
            }
        }
        result
    }

    /// Smallest key strictly greater than `key`. `O(log n)`. Note this is
    /// its own traversal, not a delegation to `lower_bound` — see
    /// Open Question 1 in `SPEC_FULL.md` §9.
    pub(crate) fn upper_bound_idx(&self, key: &K) -> Option<usize> {
        let mut curr = self.root;
        let mut result = None;
        while let Some(idx) = curr {
            if self.comparator.less(key, self.key_at(idx)) {
                result = Some(idx);
                curr = self.nodes.get(idx).left;
            } else {
                curr = self.nodes.get(idx).right;
            }
        }
        result
    }

    pub(crate) fn equal_range_idx(&self, key: &K) -> (Option<usize>, Option<usize>) {
        (self.lower_bound_idx(key), self.upper_bound_idx(key))
    }

    /// Per the §4.3 operation table: "node with smallest key ≥ k, or null
    /// if k exceeds max" — i.e. literally `lower_bound`. Containers that
    /// need an *exact*-match lookup (`get`/`contains`/`count`) additionally
    /// check [`Comparator::equivalent`] on the result; see
    /// [`Self::find_exact_idx`].
    pub(crate) fn find_idx(&self, key: &K) -> Option<usize> {
        self.lower_bound_idx(key)
    }

    /// Exact-match lookup: `lower_bound` filtered down to equivalence.
    pub(crate) fn find_exact_idx(&self, key: &K) -> Option<usize> {
        let idx = self.lower_bound_idx(key)?;
        if self.comparator.equivalent(self.key_at(idx), key) {
            Some(idx)
        } else {
            None
        }
    }

    // Insertion ------------------------------------------------------------------------------------------------------

    /// Always inserts, even if an equivalent key already exists (backing
    /// for multi containers). Returns the new node's index.
    pub(crate) fn insert_multi(&mut self, key: K, val: V) -> usize {
        match self.root {
            None => {
                let handle = self.elems.push_back((key, val));
                let idx = self.nodes.add(RbNode::new(handle));
                self.nodes.get_mut(idx).color = Color::Black;
                self.root = Some(idx);
                self.len = 1;
                idx
            }
            Some(_) => {
                let (parent_idx, go_left) = self.descend_for_insert(&key);
                self.link_new_node(parent_idx, go_left, key, val)
            }
        }
    }

    /// Inserts only if no equivalent key is already present (backing for
    /// unique containers). Per §4.5's state machine, a key already present
    /// is left untouched (no "updated in place" transition) — this differs
    /// from a plain `BTreeMap`-style overwrite-on-duplicate; see Open
    /// Questions in `SPEC_FULL.md` §9.
    pub(crate) fn insert_unique(&mut self, key: K, val: V) -> (usize, bool) {
        match self.find_exact_idx(&key) {
            Some(idx) => (idx, false),
            None => (self.insert_multi(key, val), true),
        }
    }

    /// Hint-insert for unique containers (§4.5): `hint` is a node index, or
    /// `None` for `end()`. Placement is `O(1)` when the hint is correct,
    /// else falls back to the full search.
    ///
    /// `hint == end()` is itself a valid `O(1)` fast path, not just a
    /// trigger for the full search: when the tree is non-empty and `key` is
    /// greater than the current maximum, the new key belongs immediately
    /// after it, the same position `insert_at_hint` would derive from a
    /// hint pointing at that maximum. Without this, repeated
    /// `insert_hint(end(), ...)` over sorted input (§8 property 6, scenario
    /// E4) would degrade from the intended total `O(n)` to `O(n log n)`.
    pub(crate) fn insert_hint_unique(&mut self, hint: Option<usize>, key: K, val: V) -> (usize, bool) {
        if let Some(h) = hint {
            if self.comparator.less(self.key_at(h), &key) {
                let hint_next = self.successor(h);
                let hint_ok = match hint_next {
                    None => true,
                    Some(hn) => self.comparator.less(&key, self.key_at(hn)),
                };
                if hint_ok {
                    return (self.insert_at_hint(h, key, val), true);
                }
            }
        } else if let Some(max_idx) = self.last_idx() {
            if self.comparator.less(self.key_at(max_idx), &key) {
                return (self.insert_at_hint(max_idx, key, val), true);
            }
        }
        self.insert_unique(key, val)
    }

    /// Hint-insert for multi containers (§4.5): predicate weakened with
    /// equivalence, since a duplicate is not a rejection here. Same
    /// `hint == end()` fast path as `insert_hint_unique`.
    pub(crate) fn insert_hint_multi(&mut self, hint: Option<usize>, key: K, val: V) -> usize {
        if let Some(h) = hint {
            let less_or_equiv =
                self.comparator.less(self.key_at(h), &key) || self.comparator.equivalent(self.key_at(h), &key);
            if less_or_equiv {
                let hint_next = self.successor(h);
                let hint_ok = match hint_next {
                    None => true,
                    Some(hn) => self.comparator.less(&key, self.key_at(hn)),
                };
                if hint_ok {
                    return self.insert_at_hint(h, key, val);
                }
            }
        } else if let Some(max_idx) = self.last_idx() {
            let less_or_equiv =
                self.comparator.less(self.key_at(max_idx), &key) || self.comparator.equivalent(self.key_at(max_idx), &key);
            if less_or_equiv {
                return self.insert_at_hint(max_idx, key, val);
            }
        }
        self.insert_multi(key, val)
    }

    /// `O(1)` structural placement immediately after `hint`, the standard
    /// trick also used by `libstdc++`'s `_Rb_tree::_M_insert_` hint path:
    /// if `hint` has no right child, the new node becomes its right child
    /// (and thus its in-order successor); otherwise it becomes the left
    /// child of `hint`'s successor (which, being a successor, never has a
    /// left child).
    fn insert_at_hint(&mut self, hint_idx: usize, key: K, val: V) -> usize {
        if self.nodes.get(hint_idx).right.is_none() {
            self.link_new_node(hint_idx, false, key, val)
        } else {
            let succ = self
                .successor(hint_idx)
                .expect("hint has a right child, so its successor exists");
            self.link_new_node(succ, true, key, val)
        }
    }

    // Search for the parent a fresh key should attach under, and on which side.
    // Ties (equivalent keys) descend right, keeping a stable, if unspecified,
    // placement among multi-key duplicates.
    fn descend_for_insert(&self, key: &K) -> (usize, bool) {
        let mut curr = self.root.expect("descend_for_insert requires a non-empty tree");
        loop {
            let go_left = self.comparator.less(key, self.key_at(curr));
            let child = if go_left {
                self.nodes.get(curr).left
            } else {
                self.nodes.get(curr).right
            };
            match child {
                Some(next) => curr = next,
                None => return (curr, go_left),
            }
        }
    }

    // Attach a freshly allocated node as `parent`'s left/right child, splice
    // its element cell into the matching list position (invariant 1: a new
    // leaf's in-order position is always adjacent to its parent), and run
    // the insert fixup.
    fn link_new_node(&mut self, parent_idx: usize, go_left: bool, key: K, val: V) -> usize {
        let parent_handle = self.nodes.get(parent_idx).handle;
        let handle = if go_left {
            self.elems.insert_before(parent_handle, (key, val))
        } else {
            self.elems.insert_after(parent_handle, (key, val))
        };
        let idx = self.nodes.add(RbNode::new(handle));
        self.nodes.get_mut(idx).parent = Some(parent_idx);
        if go_left {
            self.nodes.get_mut(parent_idx).left = Some(idx);
        } else {
            self.nodes.get_mut(parent_idx).right = Some(idx);
        }
        self.len += 1;
        self.insert_fixup(idx);
        idx
    }

    // Red-black rebalancing (textbook, iterative; Cormen/Leiserson/Rivest/Stein) ---------------------------------------

    fn color(&self, idx: Option<usize>) -> Color {
        match idx {
            Some(i) => self.nodes.get(i).color,
            None => Color::Black,
        }
    }

    fn parent_of(&self, idx: usize) -> Option<usize> {
        self.nodes.get(idx).parent
    }

    fn rotate_left(&mut self, x: usize) {
        let y = self.nodes.get(x).right.expect("rotate_left requires a right child");
        let y_left = self.nodes.get(y).left;
        self.nodes.get_mut(x).right = y_left;
        if let Some(yl) = y_left {
            self.nodes.get_mut(yl).parent = Some(x);
        }
        let x_parent = self.nodes.get(x).parent;
        self.nodes.get_mut(y).parent = x_parent;
        match x_parent {
            None => self.root = Some(y),
            Some(p) => {
                if self.nodes.get(p).left == Some(x) {
                    self.nodes.get_mut(p).left = Some(y);
                } else {
                    self.nodes.get_mut(p).right = Some(y);
                }
            }
        }
        self.nodes.get_mut(y).left = Some(x);
        self.nodes.get_mut(x).parent = Some(y);
    }

    fn rotate_right(&mut self, x: usize) {
        let y = self.nodes.get(x).left.expect("rotate_right requires a left child");
        let y_right = self.nodes.get(y).right;
        self.nodes.get_mut(x).left = y_right;
        if let Some(yr) = y_right {
            self.nodes.get_mut(yr).parent = Some(x);
        }
        let x_parent = self.nodes.get(x).parent;
        self.nodes.get_mut(y).parent = x_parent;
        match x_parent {
            None => self.root = Some(y),
            Some(p) => {
                if self.nodes.get(p).left == Some(x) {
                    self.nodes.get_mut(p).left = Some(y);
                } else {
                    self.nodes.get_mut(p).right = Some(y);
                }
            }
        }
        self.nodes.get_mut(y).right = Some(x);
        self.nodes.get_mut(x).parent = Some(y);
    }

    fn insert_fixup(&mut self, mut z: usize) {
        while let Some(p) = self.parent_of(z) {
            if self.nodes.get(p).color == Color::Black {
                break;
            }
            // p is red, so p is not the root (root is always black), so a grandparent exists.
            let g = self
                .parent_of(p)
                .expect("a red node always has a parent, since the root is always black");
            if Some(p) == self.nodes.get(g).left {
                let u = self.nodes.get(g).right;
                if self.color(u) == Color::Red {
                    self.nodes.get_mut(p).color = Color::Black;
                    self.nodes.get_mut(u.unwrap()).color = Color::Black;
                    self.nodes.get_mut(g).color = Color::Red;
                    z = g;
                } else {
                    if Some(z) == self.nodes.get(p).right {
                        z = p;
                        self.rotate_left(z);
                    }
                    let p2 = self.parent_of(z).unwrap();
                    let g2 = self.parent_of(p2).unwrap();
                    self.nodes.get_mut(p2).color = Color::Black;
                    self.nodes.get_mut(g2).color = Color::Red;
                    self.rotate_right(g2);
                }
            } else {
                let u = self.nodes.get(g).left;
                if self.color(u) == Color::Red {
                    self.nodes.get_mut(p).color = Color::Black;
                    self.nodes.get_mut(u.unwrap()).color = Color::Black;
                    self.nodes.get_mut(g).color = Color::Red;
                    z = g;
                } else {
                    if Some(z) == self.nodes.get(p).left {
                        z = p;
                        self.rotate_right(z);
                    }
                    let p2 = self.parent_of(z).unwrap();
                    let g2 = self.parent_of(p2).unwrap();
                    self.nodes.get_mut(p2).color = Color::Black;
                    self.nodes.get_mut(g2).color = Color::Red;
                    self.rotate_left(g2);
                }
            }
        }
        self.nodes.get_mut(self.root.unwrap()).color = Color::Black;
    }

    // Erase ------------------------------------------------------------------------------------------------------

    fn transplant(&mut self, u: usize, v: Option<usize>) {
        let p = self.nodes.get(u).parent;
        match p {
            None => self.root = v,
            Some(pp) => {
                if self.nodes.get(pp).left == Some(u) {
                    self.nodes.get_mut(pp).left = v;
                } else {
                    self.nodes.get_mut(pp).right = v;
                }
            }
        }
        if let Some(vv) = v {
            self.nodes.get_mut(vv).parent = p;
        }
    }

    /// Removes the node at `idx` (and its list cell), returns its key/value.
    ///
    /// The node with two children is removed by relinking its in-order
    /// successor into its position — not by copying the successor's value
    /// over it — the same "zero-copy" approach the teacher documents in
    /// `tree/tree.rs::priv_remove` for its own two-children case. This
    /// matters here for a reason the teacher's scapegoat tree never had to
    /// consider: it keeps the successor's own arena index (hence any
    /// iterator pointing at it) stable across the erase, satisfying
    /// invariant 6 ("erasure invalidates iterators to the erased cell
    /// only").
    pub(crate) fn erase_idx(&mut self, z: usize) -> (K, V) {
        let mut y = z;
        let mut y_original_color = self.nodes.get(y).color;
        let x: Option<usize>;
        let x_parent: Option<usize>;

        let z_left = self.nodes.get(z).left;
        let z_right = self.nodes.get(z).right;

        match (z_left, z_right) {
            (None, _) => {
                x = z_right;
                x_parent = self.nodes.get(z).parent;
                self.transplant(z, z_right);
            }
            (Some(_), None) => {
                x = z_left;
                x_parent = self.nodes.get(z).parent;
                self.transplant(z, z_left);
            }
            (Some(zl), Some(zr)) => {
                y = self.tree_minimum(zr);
                y_original_color = self.nodes.get(y).color;
                x = self.nodes.get(y).right;
                if self.nodes.get(y).parent == Some(z) {
                    x_parent = Some(y);
                } else {
                    x_parent = self.nodes.get(y).parent;
                    let y_right = self.nodes.get(y).right;
                    self.transplant(y, y_right);
                    self.nodes.get_mut(y).right = Some(zr);
                    self.nodes.get_mut(zr).parent = Some(y);
                }
                self.transplant(z, Some(y));
                self.nodes.get_mut(y).left = Some(zl);
                self.nodes.get_mut(zl).parent = Some(y);
                self.nodes.get_mut(y).color = self.nodes.get(z).color;
            }
        }

        if y_original_color == Color::Black {
            self.delete_fixup(x, x_parent);
        }

        let removed = self.nodes.remove(z);
        self.len -= 1;
        self.elems.remove(removed.handle)
    }

    fn delete_fixup(&mut self, mut x: Option<usize>, mut xp: Option<usize>) {
        while x != self.root && self.color(x) == Color::Black {
            let p = match xp {
                Some(p) => p,
                None => break,
            };
            let x_is_left = self.nodes.get(p).left == x;
            if x_is_left {
                let mut w = self.nodes.get(p).right;
                if self.color(w) == Color::Red {
                    self.nodes.get_mut(w.unwrap()).color = Color::Black;
                    self.nodes.get_mut(p).color = Color::Red;
                    self.rotate_left(p);
                    w = self.nodes.get(p).right;
                }
                let mut w_idx = w.expect("sibling cannot be nil while the subtree is black-deficient");
                let wl = self.nodes.get(w_idx).left;
                let wr = self.nodes.get(w_idx).right;
                if self.color(wl) == Color::Black && self.color(wr) == Color::Black {
                    self.nodes.get_mut(w_idx).color = Color::Red;
                    x = Some(p);
                    xp = self.nodes.get(p).parent;
                } else {
                    if self.color(wr) == Color::Black {
                        if let Some(wl_idx) = wl {
                            self.nodes.get_mut(wl_idx).color = Color::Black;
                        }
                        self.nodes.get_mut(w_idx).color = Color::Red;
                        self.rotate_right(w_idx);
                        w_idx = self.nodes.get(p).right.unwrap();
                    }
                    self.nodes.get_mut(w_idx).color = self.nodes.get(p).color;
                    self.nodes.get_mut(p).color = Color::Black;
                    if let Some(wr_idx) = self.nodes.get(w_idx).right {
                        self.nodes.get_mut(wr_idx).color = Color::Black;
                    }
                    self.rotate_left(p);
                    x = self.root;
                    xp = None;
                }
            } else {
                let mut w = self.nodes.get(p).left;
                if self.color(w) == Color::Red {
                    self.nodes.get_mut(w.unwrap()).color = Color::Black;
                    self.nodes.get_mut(p).color = Color::Red;
                    self.rotate_right(p);
                    w = self.nodes.get(p).left;
                }
                let mut w_idx = w.expect("sibling cannot be nil while the subtree is black-deficient");
                let wl = self.nodes.get(w_idx).left;
                let wr = self.nodes.get(w_idx).right;
                if self.color(wr) == Color::Black && self.color(wl) == Color::Black {
                    self.nodes.get_mut(w_idx).color = Color::Red;
                    x = Some(p);
                    xp = self.nodes.get(p).parent;
                } else {
                    if self.color(wl) == Color::Black {
                        if let Some(wr_idx) = wr {
                            self.nodes.get_mut(wr_idx).color = Color::Black;
                        }
                        self.nodes.get_mut(w_idx).color = Color::Red;
                        self.rotate_left(w_idx);
                        w_idx = self.nodes.get(p).left.unwrap();
                    }
                    self.nodes.get_mut(w_idx).color = self.nodes.get(p).color;
                    self.nodes.get_mut(p).color = Color::Black;
                    if let Some(wl_idx) = self.nodes.get(w_idx).left {
                        self.nodes.get_mut(wl_idx).color = Color::Black;
                    }
                    self.rotate_right(p);
                    x = self.root;
                    xp = None;
                }
            }
        }
        if let Some(xi) = x {
            self.nodes.get_mut(xi).color = Color::Black;
        }
    }

    // Debug-time invariant checking (§3 invariant 4, exercised in testing per §7's
    // "Debug-time safety: debug_assert! for logical invariants").
    #[cfg(test)]
    pub(crate) fn check_invariants(&self)
    where
        K: core::fmt::Debug,
    {
        if let Some(root) = self.root {
            assert_eq!(self.nodes.get(root).color, Color::Black, "root must be black");
            self.check_subtree(root);
        }
        assert_eq!(
            self.in_order_keys(),
            {
                let mut v = self.in_order_keys();
                v.sort();
                v
            },
            "in-order key sequence must be sorted"
        );
    }

    #[cfg(test)]
    fn in_order_keys(&self) -> Vec<&K>
    where
        K: core::fmt::Debug,
    {
        let mut out = Vec::new();
        let mut curr = self.first_idx();
        while let Some(idx) = curr {
            out.push(self.key_at(idx));
            curr = self.successor(idx);
        }
        out
    }

    #[cfg(test)]
    fn check_subtree(&self, idx: usize) -> usize {
        let node = self.nodes.get(idx);
        if node.color == Color::Red {
            if let Some(l) = node.left {
                assert_eq!(self.nodes.get(l).color, Color::Black, "red node has a red child");
            }
            if let Some(r) = node.right {
                assert_eq!(self.nodes.get(r).color, Color::Black, "red node has a red child");
            }
        }
        let left_bh = node.left.map(|l| self.check_subtree(l)).unwrap_or(0);
        let right_bh = node.right.map(|r| self.check_subtree(r)).unwrap_or(0);
        assert_eq!(left_bh, right_bh, "black-height mismatch between subtrees");
        left_bh + if node.color == Color::Black { 1 } else { 0 }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use std::collections::BTreeMap;

    fn keys<K: Ord + Clone, V, C: Comparator<K>>(t: &RedBlackTree<K, V, C>) -> Vec<K> {
        let mut out = Vec::new();
        let mut curr = t.first_idx();
        while let Some(idx) = curr {
            out.push(t.key_at(idx).clone());
            curr = t.successor(idx);
        }
        out
    }

    #[test]
    fn e1_tree_set_insert_and_bounds() {
        let mut t: RedBlackTree<i32, ()> = RedBlackTree::new();
        for k in [3, 1, 4, 1, 5, 9, 2, 6] {
            t.insert_unique(k, ());
        }
        assert_eq!(keys(&t), vec![1, 2, 3, 4, 5, 6, 9]);

        let lb = t.lower_bound_idx(&4);
        assert_eq!(*t.key_at(lb.unwrap()), 4);
        let ub = t.upper_bound_idx(&4);
        assert_eq!(*t.key_at(ub.unwrap()), 5);

        let (lo, hi) = t.equal_range_idx(&1);
        assert_eq!(*t.key_at(lo.unwrap()), 1);
        assert_eq!(*t.key_at(hi.unwrap()), 2);
        t.check_invariants();
    }

    #[test]
    fn e2_tree_multiset_insert_and_equal_range() {
        let mut t: RedBlackTree<i32, ()> = RedBlackTree::new();
        for k in [2, 2, 1, 2, 3] {
            t.insert_multi(k, ());
        }
        assert_eq!(keys(&t), vec![1, 2, 2, 2, 3]);

        let (lo, hi) = t.equal_range_idx(&2);
        let mut count = 0;
        let mut curr = lo;
        while curr != hi {
            count += 1;
            curr = t.successor(curr.unwrap());
        }
        assert_eq!(count, 3);
        t.check_invariants();
    }

    #[test]
    fn insert_then_erase_every_element_maintains_invariants() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut t: RedBlackTree<i32, i32> = RedBlackTree::new();
        let mut model: BTreeMap<i32, i32> = BTreeMap::new();

        for _ in 0..500 {
            let k: i32 = rng.gen_range(-100..100);
            let v = k * 2;
            t.insert_unique(k, v);
            model.insert(k, v);
            t.check_invariants();
        }

        assert_eq!(keys(&t), model.keys().copied().collect::<Vec<_>>());

        let remove_order: Vec<i32> = model.keys().copied().collect();
        for k in remove_order {
            let idx = t.find_exact_idx(&k).unwrap();
            let (removed_k, removed_v) = t.erase_idx(idx);
            assert_eq!(removed_k, k);
            assert_eq!(Some(removed_v), model.remove(&k));
            t.check_invariants();
            assert_eq!(keys(&t), model.keys().copied().collect::<Vec<_>>());
        }
        assert!(t.is_empty());
    }

    #[test]
    fn hint_insert_ascending_reuses_end_hint() {
        let mut t: RedBlackTree<i32, i32> = RedBlackTree::new();
        let mut hint = None;
        for k in 0..200 {
            let (idx, inserted) = t.insert_hint_unique(hint, k, k * 10);
            assert!(inserted);
            hint = Some(idx);
            t.check_invariants();
        }
        assert_eq!(keys(&t), (0..200).collect::<Vec<_>>());
    }

    #[test]
    fn hint_insert_always_passing_end_stays_on_the_fast_path() {
        // §8 property 6 / scenario E4: repeated `insert_hint(end(), ...)` over
        // sorted input must append in O(1) each time, not just when the
        // caller threads the previous insert's own index back in as the hint.
        let mut t: RedBlackTree<i32, i32> = RedBlackTree::new();
        for k in 0..200 {
            let (_, inserted) = t.insert_hint_unique(None, k, k * 10);
            assert!(inserted);
            t.check_invariants();
        }
        assert_eq!(keys(&t), (0..200).collect::<Vec<_>>());
    }

    #[test]
    fn hint_insert_multi_always_passing_end_stays_on_the_fast_path() {
        let mut t: RedBlackTree<i32, i32> = RedBlackTree::new();
        for k in 0..200 {
            t.insert_hint_multi(None, k / 2, k);
            t.check_invariants();
        }
        assert_eq!(keys(&t), (0..200).map(|k| k / 2).collect::<Vec<_>>());
    }

    #[test]
    fn hint_insert_rejects_duplicate_and_returns_existing() {
        let mut t: RedBlackTree<i32, &str> = RedBlackTree::new();
        let (first_idx, inserted) = t.insert_unique(5, "first");
        assert!(inserted);
        let (second_idx, inserted) = t.insert_hint_unique(Some(first_idx), 5, "second");
        assert!(!inserted);
        assert_eq!(second_idx, first_idx);
        assert_eq!(*t.value_at(second_idx), "first");
    }

    #[test]
    fn swap_exchanges_contents() {
        let mut a: RedBlackTree<i32, ()> = RedBlackTree::new();
        let mut b: RedBlackTree<i32, ()> = RedBlackTree::new();
        for k in [1, 2, 3] {
            a.insert_unique(k, ());
        }
        for k in [10, 20] {
            b.insert_unique(k, ());
        }
        a.swap(&mut b);
        assert_eq!(keys(&a), vec![10, 20]);
        assert_eq!(keys(&b), vec![1, 2, 3]);
    }

    #[test]
    fn clear_then_clear_is_idempotent() {
        let mut t: RedBlackTree<i32, ()> = RedBlackTree::new();
        t.insert_unique(1, ());
        t.clear();
        assert!(t.is_empty());
        t.clear();
        assert!(t.is_empty());
    }
}
