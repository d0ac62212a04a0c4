//! A depth-measuring traversal used only to assert the balance invariant in
//! tests, generic over anything [`Traversable`]. Just a free function over
//! the capability trait, with no inheritance involved.

use btree_index::Traversable;

/// Depth of every leaf reachable from `t`'s root, in visitation order.
pub fn leaf_depths<T: Traversable>(t: &T) -> Vec<usize> {
    fn walk<T: Traversable>(t: &T, handle: T::Handle, depth: usize, out: &mut Vec<usize>) {
        if t.is_leaf(handle) {
            out.push(depth);
            return;
        }
        for child in t.children(handle) {
            walk(t, child, depth + 1, out);
        }
    }

    let mut out = Vec::new();
    walk(t, t.root(), 0, &mut out);
    out
}

/// True iff every leaf in `t` sits at the same depth.
pub fn all_leaves_same_depth<T: Traversable>(t: &T) -> bool {
    let depths = leaf_depths(t);
    depths.windows(2).all(|w| w[0] == w[1])
}
