//! A test-only toy tree, unrelated to [`btree_index::Btree`], that exists
//! purely to exercise [`btree_index::Traversable`] against a shape the core
//! never produces (arbitrary fan-out, not just B-tree splits).

use btree_index::Traversable;

/// An owned, arbitrary-fanout tree built from nested leaves/branches.
/// Nodes are stored flat and addressed by index so that `Handle` can stay
/// `Copy`, the same trick `Btree` itself uses for `NodeId`.
pub struct TraversableTree {
    children: Vec<Vec<usize>>,
}

impl TraversableTree {
    pub fn leaf() -> Self {
        TraversableTree { children: vec![Vec::new()] }
    }

    /// A root with exactly these subtrees as children, in order.
    pub fn branch(subtrees: Vec<TraversableTree>) -> Self {
        let mut children = vec![Vec::new()];
        let mut root_children = Vec::with_capacity(subtrees.len());
        for subtree in subtrees {
            let offset = children.len();
            for node in &subtree.children {
                children.push(node.iter().map(|&i| i + offset).collect());
            }
            root_children.push(offset);
        }
        children[0] = root_children;
        TraversableTree { children }
    }
}

impl Traversable for TraversableTree {
    type Handle = usize;

    fn root(&self) -> usize {
        0
    }

    fn children(&self, handle: usize) -> Vec<usize> {
        self.children[handle].clone()
    }

    fn is_leaf(&self, handle: usize) -> bool {
        self.children[handle].is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::measurable::{all_leaves_same_depth, leaf_depths};

    #[test]
    fn single_leaf_has_depth_zero() {
        let t = TraversableTree::leaf();
        assert_eq!(leaf_depths(&t), vec![0]);
        assert!(all_leaves_same_depth(&t));
    }

    #[test]
    fn balanced_branch_reports_equal_depths() {
        let t = TraversableTree::branch(vec![
            TraversableTree::branch(vec![TraversableTree::leaf(), TraversableTree::leaf()]),
            TraversableTree::branch(vec![TraversableTree::leaf(), TraversableTree::leaf()]),
        ]);
        let depths = leaf_depths(&t);
        assert_eq!(depths.len(), 4);
        assert!(all_leaves_same_depth(&t));
        assert!(depths.iter().all(|&d| d == 2));
    }

    #[test]
    fn unbalanced_branch_is_detected() {
        let t = TraversableTree::branch(vec![
            TraversableTree::leaf(),
            TraversableTree::branch(vec![TraversableTree::leaf(), TraversableTree::leaf()]),
        ]);
        assert!(!all_leaves_same_depth(&t));
    }
}
