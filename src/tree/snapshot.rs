//! Engine-owned copy of the caller's tree.
//!
//! The snapshot flattens the tree into an index arena (root at index 0) so
//! the position assigner can annotate nodes without touching the caller's
//! structure. A snapshot lives for exactly one render pass.

use super::node::{Identifier, NodeKey, Side, TreeNode};

/// One node of the snapshot.
#[derive(Debug, Clone)]
pub struct LayoutNode {
    /// Structural identity (path from the root).
    pub key: NodeKey,
    /// Display value copied from the caller's node.
    pub value: Identifier,
    /// Left child index into the arena.
    pub left: Option<usize>,
    /// Right child index into the arena.
    pub right: Option<usize>,
    /// Parent index into the arena (None for the root).
    pub parent: Option<usize>,
    /// Value of the parent node, kept for display and lookups.
    pub parent_value: Option<Identifier>,
    /// Position in the in-order sequence. Assigned by the layout pass.
    pub rank_index: usize,
    /// Edges from the root. Assigned by the layout pass.
    pub depth: u32,
}

/// Arena copy of a caller's tree.
#[derive(Debug, Clone)]
pub struct TreeSnapshot {
    nodes: Vec<LayoutNode>,
}

impl TreeSnapshot {
    /// Copy `root` into a fresh snapshot.
    ///
    /// Returns `None` for an absent tree; callers render the empty state.
    /// The walk uses an explicit stack, so tree depth is bounded only by
    /// memory.
    pub fn from_tree(root: Option<&TreeNode>) -> Option<Self> {
        let root = root?;
        let mut nodes: Vec<LayoutNode> = Vec::new();
        // (source node, parent index, which slot of the parent it fills)
        let mut stack: Vec<(&TreeNode, Option<(usize, Side)>)> = vec![(root, None)];

        while let Some((source, slot)) = stack.pop() {
            let idx = nodes.len();
            let parent = slot.map(|(p, _)| p);
            nodes.push(LayoutNode {
                key: NodeKey::from_index(idx),
                value: source.value.clone(),
                left: None,
                right: None,
                parent,
                parent_value: parent.map(|p| nodes[p].value.clone()),
                rank_index: 0,
                depth: 0,
            });
            match slot {
                Some((p, Side::Left)) => nodes[p].left = Some(idx),
                Some((p, Side::Right)) => nodes[p].right = Some(idx),
                None => {}
            }

            // Right is pushed first so the left subtree is copied first
            if let Some(right) = source.right.as_deref() {
                stack.push((right, Some((idx, Side::Right))));
            }
            if let Some(left) = source.left.as_deref() {
                stack.push((left, Some((idx, Side::Left))));
            }
        }
        Some(Self { nodes })
    }

    /// Arena index of the root.
    #[inline]
    pub fn root(&self) -> usize {
        0
    }

    /// Number of nodes in the snapshot.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Snapshots always hold at least the root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in pre-order (node, left subtree, right subtree).
    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [LayoutNode] {
        &mut self.nodes
    }
}
