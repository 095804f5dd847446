//! Stage sizing, re-homing and responsive scale.

use indexmap::IndexMap;

use super::measure::{Extent, Measure};
use crate::config::TreeViewConfig;
use crate::layout::LogicalLayout;
use crate::spatial::{NodeBox, SpatialIndex};
use crate::tree::NodeKey;

/// Responsive scale for a stage of the given width.
///
/// Returns `(scale, scroll_left)`. A stage wider than the viewport shrinks
/// uniformly, never below `min_scale`. If the result is still exactly 1 the
/// container is scrolled so the content is centred instead of clipped.
pub fn responsive_scale(
    stage_width: f32,
    viewport_width: f32,
    config: &TreeViewConfig,
) -> (f32, Option<f32>) {
    let mut scale = 1.0;
    if stage_width > viewport_width {
        scale = config
            .min_scale
            .max((viewport_width - config.viewport_margin) / stage_width);
    }

    let scroll_left = if scale == 1.0 && stage_width > viewport_width {
        Some(((stage_width - viewport_width) / 2.0).floor())
    } else {
        None
    };
    (scale, scroll_left)
}

/// Measured layout re-homed to the stage origin.
#[derive(Debug)]
pub struct StageFit {
    /// Top-left of the measured content before re-homing.
    pub origin: (f32, f32),
    /// Content width (bounding box).
    pub content_width: f32,
    /// Content height (bounding box).
    pub content_height: f32,
    /// Stage width: content plus padding.
    pub width: f32,
    /// Stage height: content plus padding.
    pub height: f32,
    /// Uniform transform applied to the whole stage.
    pub scale: f32,
    /// Container scroll offset when the unscaled stage overflows.
    pub scroll_left: Option<f32>,
    /// Re-homed boxes in draw order. Unmeasured nodes are absent.
    pub boxes: IndexMap<NodeKey, Extent>,
    /// Index over `boxes` for hit testing.
    pub index: SpatialIndex,
}

impl StageFit {
    /// Measure every node, re-home the drawing and fit it to the viewport.
    pub fn compute(
        layout: &LogicalLayout,
        measure: &impl Measure,
        viewport_width: f32,
        config: &TreeViewConfig,
    ) -> Self {
        let mut measured: IndexMap<NodeKey, Extent> = IndexMap::with_capacity(layout.len());
        for (key, position) in &layout.positions {
            match measure.measure(key, position) {
                Some(extent) => {
                    measured.insert(*key, extent);
                }
                None => tracing::warn!(node = %key, "node has no rendered box; skipping"),
            }
        }

        let raw_index = SpatialIndex::from_boxes(Self::to_boxes(&measured));
        let (min, max) = raw_index
            .bounds()
            .unwrap_or(([0.0, 0.0], [config.node_width, config.node_height]));

        let content_width = max[0] - min[0];
        let content_height = max[1] - min[1];
        let width = content_width + config.stage_padding;
        let height = content_height + config.stage_padding;

        let boxes: IndexMap<NodeKey, Extent> = measured
            .into_iter()
            .map(|(key, extent)| (key, extent.shifted(min[0], min[1])))
            .collect();
        let index = SpatialIndex::from_boxes(Self::to_boxes(&boxes));

        let (scale, scroll_left) = responsive_scale(width, viewport_width, config);

        tracing::debug!(
            width,
            height,
            scale,
            viewport_width,
            measured = boxes.len(),
            "stage fitted"
        );

        Self {
            origin: (min[0], min[1]),
            content_width,
            content_height,
            width,
            height,
            scale,
            scroll_left,
            boxes,
            index,
        }
    }

    fn to_boxes(extents: &IndexMap<NodeKey, Extent>) -> Vec<NodeBox> {
        extents
            .iter()
            .enumerate()
            .map(|(order, (key, e))| {
                NodeBox::new(*key, order, e.left, e.top, e.width, e.height)
            })
            .collect()
    }
}
