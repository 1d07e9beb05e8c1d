//! Unordered (hash) index (§4.4): new relative to the teacher, which is
//! ordered-only. `hasher` supplies the default FNV-1a `BuildHasher`,
//! `table` is the structural core, `iter` exposes traversal. The public
//! [`HashSet`]/[`HashMap`]/[`HashMultiSet`]/[`HashMultiMap`] wrappers live
//! in `crate::containers`.

mod hasher;
mod iter;
mod table;

pub(crate) use hasher::{FnvBuildHasher, FnvHasher};
pub(crate) use iter::{IntoIter, Iter, IterMut};
pub(crate) use table::HashTable;
