//! Ordered (red-black tree) index (§4.3). `node`/`rbtree` hold the
//! structural core; `iter` exposes traversal. The public [`TreeSet`] /
//! [`TreeMap`] / [`TreeMultiSet`] / [`TreeMultiMap`] wrappers in
//! `crate::containers` are thin policy layers over [`RedBlackTree`] — see
//! `SPEC_FULL.md` §4.3/§9 for why the core index itself had to be rebuilt
//! rather than generalized from the teacher's scapegoat tree.

mod iter;
mod node;
mod rbtree;

pub(crate) use iter::{IntoIter, Iter, IterMut};
pub(crate) use rbtree::RedBlackTree;
