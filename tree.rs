//! The `Btree` itself: owns an [`Arena`] of [`Node`]s and drives insertion,
//! lookup and the three traversal orders over it.
//!
//! The insertion algorithm (`add` / `upwards_add`) follows
//! `original_source/src/btree/btree.hpp`'s `Btree::add` / `upwards_add` /
//! `seperate_current_for_unfitting` / `grow` almost step for step, with the
//! raw `Node*` parent-climbing replaced by arena lookups through `NodeId`.

use std::fmt::Debug;

use crate::arena::{Arena, NodeId};
use crate::error::{BtreeError, Result};
use crate::keys::{Branch, Entry, Keys, Location};

pub(crate) struct Node<K, V> {
    pub(crate) keys: Keys<K, V>,
    pub(crate) parent: Option<NodeId>,
}

/// Result of walking root→leaf looking for a key: either a node on the path
/// already holds it, or the walk bottomed out at the leaf it would belong
/// to without finding it.
enum Descent {
    Found(NodeId),
    Leaf(NodeId),
}

/// An ordered map backed by a B-tree of branching degree `D`. Every non-root
/// node holds between `D / 2` and `D` entries; descending from the root
/// always reaches a leaf at the same depth, for every leaf.
pub struct Btree<K, V, const D: usize> {
    arena: Arena<K, V>,
    root: NodeId,
}

impl<K: Ord, V, const D: usize> Btree<K, V, D> {
    pub fn new() -> Self {
        assert!(D >= 2, "a Btree needs a branching degree of at least 2");
        let mut arena = Arena::new();
        let root = arena.alloc();
        arena.fill(root, Node { keys: Keys::empty(D), parent: None });
        Btree { arena, root }
    }

    /// Inserts `key`/`value`. Fails with [`BtreeError::DuplicateKey`] if
    /// `key` is already present; the tree is left unchanged in that case.
    pub fn add(&mut self, key: K, value: V) -> Result<()> {
        match self.descend(&key) {
            Descent::Found(_) => Err(BtreeError::DuplicateKey),
            Descent::Leaf(leaf) => {
                self.upwards_add(leaf, Branch::leaf(Entry { key, value }));
                Ok(())
            }
        }
    }

    /// Looks up `key`, failing with [`BtreeError::KeyNotFound`] if absent.
    pub fn get(&self, key: &K) -> Result<&V> {
        match self.descend(key) {
            Descent::Found(id) => Ok(self
                .arena
                .get(id)
                .keys
                .entries
                .iter()
                .find(|e| &e.key == key)
                .map(|e| &e.value)
                .expect("descend(key) == Found(id) guarantees id holds key")),
            Descent::Leaf(_) => Err(BtreeError::KeyNotFound),
        }
    }

    /// Looks up `key` and returns a mutable handle to its stored value,
    /// failing with [`BtreeError::KeyNotFound`] if absent.
    pub fn get_mut(&mut self, key: &K) -> Result<&mut V> {
        match self.descend(key) {
            Descent::Found(id) => Ok(self
                .arena
                .get_mut(id)
                .keys
                .find_value_mut(key)
                .expect("descend(key) == Found(id) guarantees id holds key")),
            Descent::Leaf(_) => Err(BtreeError::KeyNotFound),
        }
    }

    pub fn contains_key(&self, key: &K) -> bool {
        matches!(self.descend(key), Descent::Found(_))
    }

    /// Walks from the root toward `key`, checking every node on the path —
    /// not just the leaf it would land in — since a promoted median lives in
    /// an internal node, not a leaf. Mirrors `get_leaf_for_key`'s own
    /// `is_present` check at each step. One `Keys::locate` probe per node
    /// decides presence and, on a miss, which child to descend into, rather
    /// than searching the node twice.
    fn descend(&self, key: &K) -> Descent {
        let mut current = self.root;
        loop {
            match self.arena.get(current).keys.locate(key) {
                Location::Present => return Descent::Found(current),
                Location::Absent => return Descent::Leaf(current),
                Location::Descend(child) => current = child,
            }
        }
    }

    /// Adds `branch` to `current`, splitting and propagating upward through
    /// parents as long as a node overflows, and growing a new root if the
    /// overflow reaches all the way to the top.
    fn upwards_add(&mut self, mut current: NodeId, mut branch: Branch<K, V>) {
        loop {
            if self.arena.get(current).keys.size() < D {
                self.arena.get_mut(current).keys.add(branch);
                return;
            }

            let node = self.arena.take(current);
            let parent = node.parent;
            let outcome = node.keys.split_for_overflow(branch);

            if parent.is_none() {
                // `current` is the root: it keeps its id, becomes the parent
                // of two brand-new halves, and starts a new level.
                let left_id = self.arena.alloc();
                let right_id = self.arena.alloc();
                self.reparent_half(&outcome.left, left_id);
                self.reparent_half(&outcome.right, right_id);
                self.arena.fill(left_id, Node { keys: outcome.left, parent: Some(current) });
                self.arena.fill(right_id, Node { keys: outcome.right, parent: Some(current) });

                let mut root_keys = Keys::empty(D);
                root_keys.add(Branch { entry: outcome.promoted, left: Some(left_id), right: Some(right_id) });
                self.arena.fill(current, Node { keys: root_keys, parent: None });
                return;
            }

            // `current` is interior or a non-root leaf: free its id and
            // hand both halves fresh ones, then keep propagating the
            // promoted entry into the (unchanged-id) parent.
            self.arena.free(current);
            let left_id = self.arena.alloc();
            let right_id = self.arena.alloc();
            self.reparent_half(&outcome.left, left_id);
            self.reparent_half(&outcome.right, right_id);
            self.arena.fill(left_id, Node { keys: outcome.left, parent });
            self.arena.fill(right_id, Node { keys: outcome.right, parent });

            branch = Branch { entry: outcome.promoted, left: Some(left_id), right: Some(right_id) };
            current = parent.expect("checked above");
        }
    }

    fn reparent_half(&mut self, half: &Keys<K, V>, new_owner: NodeId) {
        for &child in &half.children {
            self.arena.get_mut(child).parent = Some(new_owner);
        }
    }

    /// Entries in ascending key order.
    pub fn dump(&self) -> Vec<(&K, &V)> {
        let mut out = Vec::new();
        self.walk_inorder(|k, v| out.push((k, v)));
        out
    }

    /// Visits every entry in ascending key order.
    pub fn walk_inorder<'a, F: FnMut(&'a K, &'a V)>(&'a self, mut visit: F) {
        self.walk_inorder_from(self.root, &mut visit);
    }

    fn walk_inorder_from<'a>(&'a self, id: NodeId, visit: &mut dyn FnMut(&'a K, &'a V)) {
        let node = self.arena.get(id);
        if node.keys.is_leaf() {
            for e in &node.keys.entries {
                visit(&e.key, &e.value);
            }
            return;
        }
        for i in 0..node.keys.entries.len() {
            self.walk_inorder_from(node.keys.children[i], visit);
            visit(&node.keys.entries[i].key, &node.keys.entries[i].value);
        }
        self.walk_inorder_from(*node.keys.children.last().unwrap(), visit);
    }

    /// Visits a node's own entries before recursing into its children, in
    /// child order.
    pub fn walk_preorder<'a, F: FnMut(&'a K, &'a V)>(&'a self, mut visit: F) {
        self.walk_preorder_from(self.root, &mut visit);
    }

    fn walk_preorder_from<'a>(&'a self, id: NodeId, visit: &mut dyn FnMut(&'a K, &'a V)) {
        let node = self.arena.get(id);
        for e in &node.keys.entries {
            visit(&e.key, &e.value);
        }
        for &child in &node.keys.children {
            self.walk_preorder_from(child, visit);
        }
    }

    /// Visits a node's children, in child order, before its own entries.
    pub fn walk_postorder<'a, F: FnMut(&'a K, &'a V)>(&'a self, mut visit: F) {
        self.walk_postorder_from(self.root, &mut visit);
    }

    fn walk_postorder_from<'a>(&'a self, id: NodeId, visit: &mut dyn FnMut(&'a K, &'a V)) {
        let node = self.arena.get(id);
        for &child in &node.keys.children {
            self.walk_postorder_from(child, visit);
        }
        for e in &node.keys.entries {
            visit(&e.key, &e.value);
        }
    }

    /// A capability-typed handle onto the root, for code (tests, mostly)
    /// that wants to walk the tree's shape through [`Traversable`] without
    /// depending on `Btree`'s internals.
    pub fn root_handle(&self) -> NodeHandle {
        NodeHandle(self.root)
    }
}

impl<K: Ord, V, const D: usize> Default for Btree<K, V, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Debug, V: Debug, const D: usize> Debug for Btree<K, V, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Btree").field("degree", &D).finish_non_exhaustive()
    }
}

/// A plain, copyable reference to a node, opaque outside this crate. Exists
/// so a [`Traversable`] implementation (or anything else inspecting tree
/// shape) can hold "a place in the tree" without exposing `NodeId` itself.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct NodeHandle(NodeId);

/// A read-only capability for walking a tree's branching shape, independent
/// of what it stores. Lets shape-only checks (e.g. "do all leaves sit at
/// the same depth") operate on any tree-shaped type, `Btree` included,
/// without either side depending on the other's concrete type.
pub trait Traversable {
    type Handle: Copy + Eq;

    fn root(&self) -> Self::Handle;
    fn children(&self, handle: Self::Handle) -> Vec<Self::Handle>;
    fn is_leaf(&self, handle: Self::Handle) -> bool;
}

impl<K: Ord, V, const D: usize> Traversable for Btree<K, V, D> {
    type Handle = NodeHandle;

    fn root(&self) -> Self::Handle {
        self.root_handle()
    }

    fn children(&self, handle: Self::Handle) -> Vec<Self::Handle> {
        self.arena.get(handle.0).keys.children.iter().map(|&id| NodeHandle(id)).collect()
    }

    fn is_leaf(&self, handle: Self::Handle) -> bool {
        self.arena.get(handle.0).keys.is_leaf()
    }
}
