//! An in-memory B-tree index: an ordered map from unique keys to values,
//! parameterised by a compile-time branching degree `D`.
//!
//! The three layers follow the classical Bayer–McCreight shape: [`keys`]
//! holds a node's sorted key/value array and child pointers, [`tree`] is the
//! recursive insertion state machine over a node arena, and [`arena`] is the
//! index-based node pool that stands in for the raw back-pointers of the
//! structure this crate is modeled on.

mod arena;
mod error;
mod keys;
mod tree;

pub use error::{BtreeError, Result};
pub use tree::{Btree, NodeHandle, Traversable};
