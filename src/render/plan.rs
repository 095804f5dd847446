//! Render plans: the renderer-agnostic result of one layout pass.
//!
//! A pass runs in two phases. [`LayoutPass::new`] snapshots the tree and
//! computes logical positions from shape alone. The host then draws the
//! nodes, and [`LayoutPass::finish`] takes their measured boxes to size,
//! re-home and scale the stage and to build connectors and highlight steps.

use serde::Serialize;

use crate::animation::{HighlightSchedule, HighlightStep};
use crate::config::TreeViewConfig;
use crate::layout::{InOrderLayout, LogicalLayout};
use crate::spatial::SpatialIndex;
use crate::stage::{Connector, Extent, Measure, NominalMeasure, StageFit, connect};
use crate::tree::{Identifier, NodeKey, TreeNode, TreeSnapshot};

/// Text shown in place of an absent tree.
pub const EMPTY_TREE_MESSAGE: &str = "No nodes yet — add a root to visualize the tree.";

/// A node after both layout phases.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedNode {
    pub key: NodeKey,
    pub value: Identifier,
    pub rank_index: usize,
    pub depth: u32,
    /// Logical x from the in-order layout.
    pub x: f32,
    /// Logical y from the in-order layout.
    pub y: f32,
    /// Re-homed rendered box; `None` when the host had no element for it.
    pub stage_box: Option<Extent>,
    pub parent: Option<NodeKey>,
    pub parent_value: Option<Identifier>,
}

/// Everything needed to draw and animate one tree.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPlan {
    pub stage_width: f32,
    pub stage_height: f32,
    pub scale: f32,
    pub scroll_left: Option<f32>,
    pub container_height: f32,
    pub max_depth: u32,
    pub spacing: f32,
    /// Nodes in draw order (pre-order).
    pub nodes: Vec<PlacedNode>,
    pub connectors: Vec<Connector>,
    pub steps: Vec<HighlightStep>,
    /// When the last highlight is removed (ms from render).
    pub animation_ms: u32,
    #[serde(skip)]
    layout: LogicalLayout,
    #[serde(skip)]
    index: SpatialIndex,
}

impl RenderPlan {
    /// Keys of every node carrying `value`.
    pub fn keys_for_value(&self, value: &Identifier) -> &[NodeKey] {
        self.layout.keys_for_value(value)
    }

    /// Topmost node at a point in (unscaled) stage coordinates.
    pub fn node_at(&self, x: f32, y: f32) -> Option<&NodeKey> {
        self.index.node_at(x, y)
    }

    /// Look up a placed node by key.
    pub fn node(&self, key: &NodeKey) -> Option<&PlacedNode> {
        let idx = self.layout.positions.get_index_of(key)?;
        self.nodes.get(idx)
    }
}

/// Outcome of planning a possibly-absent tree.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TreeRender {
    /// No tree: show the placeholder, draw nothing else.
    Empty { message: &'static str },
    Tree(RenderPlan),
}

/// Phase one of a render: snapshot plus logical layout.
#[derive(Debug)]
pub struct LayoutPass {
    config: TreeViewConfig,
    layout: LogicalLayout,
}

impl LayoutPass {
    /// Snapshot `tree` and lay it out. `None` for an absent tree.
    pub fn new(tree: Option<&TreeNode>, config: &TreeViewConfig) -> Option<Self> {
        let mut snapshot = TreeSnapshot::from_tree(tree)?;
        let layout = InOrderLayout::new(config).compute(&mut snapshot);
        Some(Self {
            config: config.clone(),
            layout,
        })
    }

    pub fn layout(&self) -> &LogicalLayout {
        &self.layout
    }

    /// Phase two: fit measured boxes to the stage and build connectors and
    /// highlight steps.
    pub fn finish(
        self,
        measure: &impl Measure,
        viewport_width: f32,
        path: &[Identifier],
    ) -> RenderPlan {
        let Self { config, layout } = self;
        let fit = StageFit::compute(&layout, measure, viewport_width, &config);
        let connectors = connect(&layout, &fit.boxes);
        let schedule = HighlightSchedule::from_path(path, &config);
        let animation_ms = schedule.total_duration_ms();
        let steps = schedule.into_steps();

        let nodes = layout
            .positions
            .iter()
            .map(|(key, pos)| PlacedNode {
                key: *key,
                value: pos.value.clone(),
                rank_index: pos.rank_index,
                depth: pos.depth,
                x: pos.x,
                y: pos.y,
                stage_box: fit.boxes.get(key).copied(),
                parent: pos.parent,
                parent_value: pos.parent_value.clone(),
            })
            .collect();

        RenderPlan {
            stage_width: fit.width,
            stage_height: fit.height,
            scale: fit.scale,
            scroll_left: fit.scroll_left,
            container_height: config.container_height(layout.max_depth),
            max_depth: layout.max_depth,
            spacing: layout.spacing,
            nodes,
            connectors,
            steps,
            animation_ms,
            layout,
            index: fit.index,
        }
    }
}

/// Plan a tree without a renderer, measuring nodes at their nominal size.
pub fn plan_tree(
    tree: Option<&TreeNode>,
    path: &[Identifier],
    viewport_width: f32,
    config: &TreeViewConfig,
) -> TreeRender {
    let Some(pass) = LayoutPass::new(tree, config) else {
        return TreeRender::Empty {
            message: EMPTY_TREE_MESSAGE,
        };
    };
    let measure = NominalMeasure::new(config.node_width, config.node_height);
    TreeRender::Tree(pass.finish(&measure, viewport_width, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(tree: &TreeNode, path: &[Identifier]) -> RenderPlan {
        match plan_tree(Some(tree), path, 800.0, &TreeViewConfig::default()) {
            TreeRender::Tree(plan) => plan,
            TreeRender::Empty { .. } => panic!("expected a tree plan"),
        }
    }

    #[test]
    fn test_empty_tree_plans_placeholder_only() {
        let render = plan_tree(None, &[Identifier::from(1)], 800.0, &TreeViewConfig::default());
        match render {
            TreeRender::Empty { message } => assert_eq!(message, EMPTY_TREE_MESSAGE),
            TreeRender::Tree(_) => panic!("null root must not produce a stage"),
        }
    }

    #[test]
    fn test_single_node_plan() {
        let plan = plan(&TreeNode::leaf(1), &[]);
        assert_eq!(plan.nodes.len(), 1);
        assert!(plan.connectors.is_empty());
        assert!(plan.steps.is_empty());
        assert_eq!(plan.animation_ms, 0);
        assert_eq!((plan.stage_width, plan.stage_height), (90.0, 90.0));
        assert_eq!(plan.container_height, 400.0);
    }

    #[test]
    fn test_plan_joins_layout_and_stage() {
        let tree = TreeNode::leaf(5)
            .with_left(TreeNode::leaf(3))
            .with_right(TreeNode::leaf(8));
        let plan = plan(&tree, &[Identifier::from(5), Identifier::from(8)]);

        assert_eq!(plan.nodes.len(), 3);
        assert_eq!(plan.connectors.len(), 2);
        assert_eq!(plan.steps.len(), 2);
        assert_eq!(plan.steps[1].start_ms, 600);
        assert_eq!(plan.animation_ms, 1300);

        let root = plan.node(&NodeKey::root()).unwrap();
        assert_eq!(root.value, Identifier::from(5));
        assert_eq!(root.stage_box, Some(Extent::new(120.0, 0.0, 50.0, 50.0)));
        assert_eq!(plan.keys_for_value(&Identifier::from(8)).len(), 1);
        assert_eq!(plan.node_at(125.0, 5.0), Some(&NodeKey::root()));
    }

    #[test]
    fn test_missing_path_values_still_get_steps() {
        // A search miss ends on a value that is not in the tree; the step is
        // planned and the animator skips it
        let tree = TreeNode::leaf(5).with_left(TreeNode::leaf(3));
        let plan = plan(&tree, &[Identifier::from(5), Identifier::from(3), Identifier::from(4)]);
        assert_eq!(plan.steps.len(), 3);
        assert!(plan.keys_for_value(&Identifier::from(4)).is_empty());
    }

    #[test]
    fn test_plan_serializes_for_js() {
        let tree = TreeNode::leaf(2).with_right(TreeNode::leaf(4));
        let plan = plan(&tree, &[Identifier::from(2)]);
        let json = serde_json::to_value(TreeRender::Tree(plan)).unwrap();

        assert_eq!(json["kind"], "tree");
        assert_eq!(json["stageWidth"], 210.0);
        assert_eq!(json["nodes"][1]["parentValue"], 2.0);
        assert_eq!(json["nodes"][1]["stageBox"]["left"], 120.0);
        assert_eq!(json["steps"][0]["durationMs"], 700);
        assert_eq!(json["animationMs"], 700);
        assert!(json.get("layout").is_none());

        let empty = serde_json::to_value(plan_tree(None, &[], 800.0, &TreeViewConfig::default())).unwrap();
        assert_eq!(empty["kind"], "empty");
        assert_eq!(empty["message"], EMPTY_TREE_MESSAGE);
    }
}
