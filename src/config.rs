//! Fixed per-deployment configuration for the tree view.
//!
//! The wasm entry points always use [`TreeViewConfig::default`]. Rust callers
//! (and tests) can construct a custom config to exercise other geometries.

/// Geometry and timing constants for the tree view.
#[derive(Debug, Clone)]
pub struct TreeViewConfig {
    /// Radius of the circular node glyph.
    pub node_radius: f32,
    /// Nominal width of a node box.
    pub node_width: f32,
    /// Nominal height of a node box.
    pub node_height: f32,
    /// Base horizontal spacing between consecutive in-order ranks.
    pub horizontal_gap: f32,
    /// Vertical spacing between tree levels.
    pub vertical_gap: f32,
    /// Minimum gap kept between two node boxes.
    pub min_gap: f32,
    /// Delay between consecutive highlight steps (ms).
    pub animation_delay_ms: u32,
    /// How long a node stays highlighted (ms).
    pub highlight_duration_ms: u32,
    /// Padding added to the content size on each axis of the stage.
    pub stage_padding: f32,
    /// Margin subtracted from the viewport width before scaling.
    pub viewport_margin: f32,
    /// Lower bound for the responsive shrink factor.
    pub min_scale: f32,
    /// Viewport width assumed when the container reports none.
    pub fallback_viewport_width: f32,
    /// Minimum container height.
    pub min_container_height: f32,
    /// Extra container height below the deepest level.
    pub container_height_slack: f32,
}

impl Default for TreeViewConfig {
    fn default() -> Self {
        Self {
            node_radius: 25.0,
            node_width: 50.0,
            node_height: 50.0,
            horizontal_gap: 120.0,
            vertical_gap: 100.0,
            min_gap: 12.0,
            animation_delay_ms: 600,
            highlight_duration_ms: 700,
            stage_padding: 40.0,
            viewport_margin: 40.0,
            min_scale: 0.35,
            fallback_viewport_width: 800.0,
            min_container_height: 400.0,
            container_height_slack: 60.0,
        }
    }
}

impl TreeViewConfig {
    /// Horizontal distance between consecutive in-order ranks.
    ///
    /// Never smaller than a node box plus the minimum gap, so neighbouring
    /// boxes cannot touch regardless of the configured gap.
    pub fn spacing(&self) -> f32 {
        self.horizontal_gap.max(self.node_width + self.min_gap)
    }

    /// Container height needed for a tree whose deepest level is `max_depth`.
    pub fn container_height(&self, max_depth: u32) -> f32 {
        let tree_height = (max_depth as f32 + 1.0) * self.vertical_gap + self.node_height;
        self.min_container_height
            .max(tree_height + self.container_height_slack)
    }
}
