use crate::list::Handle;

/// Red-black node color (Data Model invariant 4: root is black, no red
/// node has a red child, every root-to-leaf path crosses the same number
/// of black nodes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// A tree node carries only structural links and a handle into the shared
/// element list — "the node payload is a pointer to the list iterator, not
/// a copy of the value" (§4.3). Unlike the teacher's `Node<K,V>`
/// (`tree/node.rs` in the retrieval pack), this stores an explicit
/// `parent` index: the teacher avoids one by re-deriving the root-to-node
/// path on every insert, which a scapegoat tree's rebuild-based rebalancing
/// can afford but a red-black tree's per-rotation fixups cannot (see
/// `DESIGN.md` / `SPEC_FULL.md` §9 for the full rationale).
pub(crate) struct RbNode {
    pub(crate) handle: Handle,
    pub(crate) color: Color,
    pub(crate) parent: Option<usize>,
    pub(crate) left: Option<usize>,
    pub(crate) right: Option<usize>,
}

impl RbNode {
    pub(crate) fn new(handle: Handle) -> Self {
        RbNode {
            handle,
            color: Color::Red,
            parent: None,
            left: None,
            right: None,
        }
    }
}

/// Arena of [`RbNode`]s with free-list reuse, the same growth/erase
/// strategy as the teacher's `NodeArena` (`tree/arena.rs`).
pub(crate) struct NodeArena {
    slots: Vec<Option<RbNode>>,
    free: Vec<usize>,
}

impl NodeArena {
    pub(crate) fn new() -> Self {
        NodeArena {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, node: RbNode) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    pub(crate) fn remove(&mut self, idx: usize) -> RbNode {
        let node = self.slots[idx].take().expect("double-remove of a tree node");
        self.free.push(idx);
        node
    }

    pub(crate) fn get(&self, idx: usize) -> &RbNode {
        self.slots[idx].as_ref().expect("dangling tree node index")
    }

    pub(crate) fn get_mut(&mut self, idx: usize) -> &mut RbNode {
        self.slots[idx].as_mut().expect("dangling tree node index")
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
