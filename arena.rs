//! A node pool keyed by index rather than pointer.
//!
//! Mirrors `storage::pager`'s page pool: nodes live in a growable `Vec` and
//! are referred to everywhere else by their `NodeId`, never by reference.
//! A freed slot's index is pushed onto a stack and reused by the next
//! allocation, the same "unused locations get stored in some stack" scheme
//! the pager's own design notes describe for evicted pages.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

pub(crate) struct Arena<K, V> {
    slots: Vec<Option<super::tree::Node<K, V>>>,
    free: Vec<usize>,
}

impl<K, V> Arena<K, V> {
    pub(crate) fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Reserves a slot without populating it. The caller must `fill` it
    /// before the id is handed to anything that reads through it.
    pub(crate) fn alloc(&mut self) -> NodeId {
        if let Some(idx) = self.free.pop() {
            NodeId(idx)
        } else {
            self.slots.push(None);
            NodeId(self.slots.len() - 1)
        }
    }

    pub(crate) fn fill(&mut self, id: NodeId, node: super::tree::Node<K, V>) {
        self.slots[id.0] = Some(node);
    }

    pub(crate) fn get(&self, id: NodeId) -> &super::tree::Node<K, V> {
        self.slots[id.0]
            .as_ref()
            .expect("NodeId referred to an empty arena slot")
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut super::tree::Node<K, V> {
        self.slots[id.0]
            .as_mut()
            .expect("NodeId referred to an empty arena slot")
    }

    /// Removes and returns the node at `id`, leaving the slot empty. The id
    /// must subsequently be handed to `free` (once nothing references it
    /// any more) or `fill` (to reuse it in place, as the root does on grow).
    pub(crate) fn take(&mut self, id: NodeId) -> super::tree::Node<K, V> {
        self.slots[id.0]
            .take()
            .expect("NodeId referred to an empty arena slot")
    }

    /// Marks an already-emptied slot as reusable by a future `alloc`.
    pub(crate) fn free(&mut self, id: NodeId) {
        debug_assert!(self.slots[id.0].is_none(), "freeing a still-populated slot");
        self.free.push(id.0);
    }
}
