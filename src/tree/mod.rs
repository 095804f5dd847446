//! Tree input types and the per-render snapshot.
//!
//! The caller's [`TreeNode`] is copied into a [`TreeSnapshot`] at the start
//! of every render pass; nothing downstream holds on to the caller's tree.

mod js;
mod node;
mod snapshot;

pub use js::tree_from_js;
pub use node::{Identifier, NodeKey, Side, TreeNode};
pub use snapshot::{LayoutNode, TreeSnapshot};
