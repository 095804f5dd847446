//! In-order rank layout for binary trees.
//!
//! Every node gets a column equal to its position in the in-order sequence
//! and a row equal to its depth. Because in-order visits the whole left
//! subtree before a node and the whole right subtree after it, a subtree's
//! columns form a contiguous range that never interleaves with its
//! sibling's, so boxes cannot overlap whatever the tree's shape.
//!
//! # Algorithm Overview
//!
//! 1. **Rank walk:** visit left, assign the next rank, visit right, using an
//!    explicit stack; record depth and track the maximum depth.
//! 2. **Pixel transform:** `x = rank * spacing`, `y = depth * vertical_gap`,
//!    where `spacing = max(horizontal_gap, node_width + min_gap)`.
//!
//! The result depends only on the tree's shape.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::config::TreeViewConfig;
use crate::tree::{Identifier, LayoutNode, NodeKey, TreeSnapshot};

/// Logical (pre-measurement) placement of a single node.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalPosition {
    /// Display value.
    pub value: Identifier,
    /// In-order rank.
    pub rank_index: usize,
    /// Edges from the root.
    pub depth: u32,
    /// Left edge of the node box in layout space.
    pub x: f32,
    /// Top edge of the node box in layout space.
    pub y: f32,
    /// Parent's structural key.
    pub parent: Option<NodeKey>,
    /// Parent's display value.
    pub parent_value: Option<Identifier>,
}

/// Result of the in-order layout.
#[derive(Debug, Clone)]
pub struct LogicalLayout {
    /// Positions keyed by structural key, in pre-order insertion order.
    pub positions: IndexMap<NodeKey, LogicalPosition>,
    /// Deepest level reached (root = 0).
    pub max_depth: u32,
    /// Horizontal distance between consecutive ranks.
    pub spacing: f32,
    /// Stringified value → every key carrying that value.
    value_index: HashMap<String, Vec<NodeKey>>,
}

impl LogicalLayout {
    /// Number of laid out nodes.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether nothing was laid out.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Keys of every node whose value stringifies to `value`.
    pub fn keys_for_value(&self, value: &Identifier) -> &[NodeKey] {
        self.value_index
            .get(&value.to_string())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Keys sorted by rank (the in-order sequence).
    #[cfg(test)]
    pub fn in_order_keys(&self) -> Vec<&NodeKey> {
        let mut keys: Vec<_> = self.positions.iter().collect();
        keys.sort_by_key(|(_, pos)| pos.rank_index);
        keys.into_iter().map(|(key, _)| key).collect()
    }
}

/// The in-order layout engine.
#[derive(Debug, Clone)]
pub struct InOrderLayout {
    spacing: f32,
    vertical_gap: f32,
}

impl InOrderLayout {
    /// Create a layout from the view configuration.
    pub fn new(config: &TreeViewConfig) -> Self {
        Self {
            spacing: config.spacing(),
            vertical_gap: config.vertical_gap,
        }
    }

    /// Assign ranks and depths to `snapshot` and compute logical positions.
    pub fn compute(&self, snapshot: &mut TreeSnapshot) -> LogicalLayout {
        let max_depth = if snapshot.is_empty() {
            0
        } else {
            let root = snapshot.root();
            Self::assign_ranks(root, snapshot.nodes_mut())
        };

        let nodes = snapshot.nodes();
        let mut positions = IndexMap::with_capacity(nodes.len());
        let mut value_index: HashMap<String, Vec<NodeKey>> = HashMap::new();

        // Arena order is pre-order, which is also the order nodes are drawn
        for node in nodes {
            value_index
                .entry(node.value.to_string())
                .or_default()
                .push(node.key);
            positions.insert(
                node.key,
                LogicalPosition {
                    value: node.value.clone(),
                    rank_index: node.rank_index,
                    depth: node.depth,
                    x: node.rank_index as f32 * self.spacing,
                    y: node.depth as f32 * self.vertical_gap,
                    parent: node.parent.map(|p| nodes[p].key),
                    parent_value: node.parent_value.clone(),
                },
            );
        }

        tracing::debug!(
            nodes = positions.len(),
            max_depth,
            spacing = self.spacing,
            "in-order layout computed"
        );

        LogicalLayout {
            positions,
            max_depth,
            spacing: self.spacing,
            value_index,
        }
    }

    /// In-order walk (left subtree, node, right subtree) with an explicit
    /// stack. Assigns rank and depth; returns the maximum depth.
    fn assign_ranks(root: usize, nodes: &mut [LayoutNode]) -> u32 {
        let mut next_rank = 0;
        let mut max_depth = 0;
        let mut stack: Vec<(usize, u32)> = Vec::new();
        let mut current = Some((root, 0));

        loop {
            while let Some((v, depth)) = current {
                stack.push((v, depth));
                current = nodes[v].left.map(|l| (l, depth + 1));
            }
            let Some((v, depth)) = stack.pop() else {
                break;
            };
            max_depth = max_depth.max(depth);
            nodes[v].rank_index = next_rank;
            nodes[v].depth = depth;
            next_rank += 1;
            current = nodes[v].right.map(|r| (r, depth + 1));
        }
        max_depth
    }
}
