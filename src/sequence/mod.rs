//! Sequence containers (§6): external collaborators to the associative
//! core, lightly specified relative to it, but following the same
//! iterator protocol so `crate::algo` and `crate::iter::Rev` work over
//! them uniformly.

mod deque;
mod list;
mod stack_queue;
mod vector;

pub use deque::{Deque, Iter as DequeIter};
pub use list::{IntoIter as ListIntoIter, Iter as ListIter, IterMut as ListIterMut, List};
pub use stack_queue::{Queue, Stack};
pub use vector::{Iter as VectorIter, Vector};
