//! R-tree index over measured node boxes using the rstar crate.
//!
//! Provides:
//! - The drawing's bounding box (the root envelope)
//! - Point hit testing in stage coordinates

use rstar::{AABB, Envelope, PointDistance, RTree, RTreeObject};

use crate::tree::NodeKey;

/// A node's rendered box with its draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeBox {
    /// The node's structural key.
    pub key: NodeKey,
    /// Draw order; later boxes paint over earlier ones.
    pub order: usize,
    /// Top-left corner.
    pub min: [f32; 2],
    /// Bottom-right corner.
    pub max: [f32; 2],
}

impl NodeBox {
    /// Create a box from its top-left corner and size.
    pub fn new(key: NodeKey, order: usize, left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            key,
            order,
            min: [left, top],
            max: [left + width, top + height],
        }
    }
}

impl RTreeObject for NodeBox {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

impl PointDistance for NodeBox {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        self.envelope().distance_2(point)
    }

    fn contains_point(&self, point: &[f32; 2]) -> bool {
        self.envelope().contains_point(point)
    }
}

/// Spatial index for measured node boxes.
///
/// Uses an R*-tree, bulk loaded once per render pass.
pub struct SpatialIndex {
    tree: RTree<NodeBox>,
}

impl std::fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("len", &self.tree.size())
            .finish()
    }
}

impl SpatialIndex {
    /// Create a new empty spatial index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Build an index from a set of boxes.
    pub fn from_boxes(boxes: Vec<NodeBox>) -> Self {
        Self {
            tree: RTree::bulk_load(boxes),
        }
    }

    /// Axis-aligned bounds of every box as `(min, max)`, or None if empty.
    pub fn bounds(&self) -> Option<([f32; 2], [f32; 2])> {
        if self.is_empty() {
            return None;
        }
        let envelope = self.tree.root().envelope();
        Some((envelope.lower(), envelope.upper()))
    }

    /// The topmost box containing a point.
    pub fn node_at(&self, x: f32, y: f32) -> Option<&NodeKey> {
        self.tree
            .locate_all_at_point(&[x, y])
            .max_by_key(|b| b.order)
            .map(|b| &b.key)
    }

    /// Get the number of boxes in the index.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
