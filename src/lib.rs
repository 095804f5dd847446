//! Tree Visualizer - WASM Module
//!
//! Lays out binary search trees for the browser and animates traversal
//! paths over them. Compiled to WebAssembly; the JavaScript-facing API is
//! exposed via wasm-bindgen.
//!
//! # Architecture
//!
//! - `tree`: input tree type, structural node keys and the arena snapshot
//! - `layout`: in-order rank layout (logical positions from shape alone)
//! - `stage`: measured boxes, bounding box, responsive scale, connectors
//! - `spatial`: R-tree over node boxes for bounds and hit testing
//! - `animation`: highlight schedule, generation tokens, timer playback
//! - `render`: render plans and the DOM host
//! - `picker`: start/end station selection for the metro map page

use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod animation;
pub mod config;
pub mod error;
pub mod layout;
pub mod logging;
pub mod picker;
pub mod render;
pub mod spatial;
pub mod stage;
pub mod tree;

use config::TreeViewConfig;
use error::RenderError;
use picker::{Point, RoutePlan, StationLayoutConfig, StationSelection};
use tree::Identifier;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init(logging::DEFAULT_DIRECTIVE);
}

/// Render a tree into the container with the given id and animate the path.
///
/// # Arguments
///
/// * `container_id` - Id of the host element; a missing element is a no-op
/// * `tree_root` - `{ value, left, right }` tree, or `null` for an empty tree
/// * `animation_path` - Node values to highlight in order; may be empty
///
/// Failures are logged to the console and never thrown.
#[wasm_bindgen(js_name = renderTree)]
pub fn render_tree(container_id: &str, tree_root: JsValue, animation_path: JsValue) {
    let tree = tree::tree_from_js(&tree_root).unwrap_or_else(|err| {
        tracing::warn!(container = container_id, %err, "rendering empty tree");
        None
    });
    let path = decode_path(animation_path).unwrap_or_else(|err| {
        tracing::warn!(container = container_id, %err, "skipping animation");
        Vec::new()
    });

    let config = TreeViewConfig::default();
    if let Err(err) = render::dom::render_tree(container_id, tree.as_ref(), &path, &config) {
        tracing::warn!(container = container_id, %err, "tree render incomplete");
    }
}

/// Compute a render plan without touching the DOM.
///
/// Nodes are measured at their nominal size. Returns
/// `{ kind: "empty", message }` for a `null` tree, otherwise
/// `{ kind: "tree", stageWidth, stageHeight, scale, nodes, connectors, steps, ... }`.
///
/// # Arguments
///
/// * `tree_root` - `{ value, left, right }` tree or `null`
/// * `animation_path` - Node values to highlight in order
/// * `viewport_width` - Width available to the stage
#[wasm_bindgen(js_name = layoutTree)]
pub fn layout_tree(
    tree_root: JsValue,
    animation_path: JsValue,
    viewport_width: f32,
) -> Result<JsValue, JsValue> {
    let tree = tree::tree_from_js(&tree_root)?;
    let path = decode_path(animation_path)?;
    let plan = render::plan_tree(
        tree.as_ref(),
        &path,
        viewport_width,
        &TreeViewConfig::default(),
    );
    Ok(to_js(&plan)?)
}

fn decode_path(value: JsValue) -> Result<Vec<Identifier>, RenderError> {
    if value.is_null() || value.is_undefined() {
        return Ok(Vec::new());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| RenderError::InvalidPath(e.to_string()))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, RenderError> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| RenderError::Serialize(e.to_string()))
}

/// Start/end station picker for the metro map page.
///
/// Each instance owns its own selection, so several maps can coexist.
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct StationPicker {
    selection: StationSelection,
    layout: StationLayoutConfig,
}

#[wasm_bindgen]
impl StationPicker {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select a station. Returns `{ role: "start" | "end", reset }`.
    #[wasm_bindgen(js_name = selectStation)]
    pub fn select_station(&mut self, name: &str) -> Result<JsValue, JsValue> {
        let change = self.selection.select(name);
        tracing::debug!(station = name, role = ?change.role, reset = change.reset, "station selected");
        Ok(to_js(&change)?)
    }

    #[wasm_bindgen(js_name = resetSelection)]
    pub fn reset_selection(&mut self) {
        self.selection.reset();
    }

    #[wasm_bindgen(getter)]
    pub fn start(&self) -> Option<String> {
        self.selection.start().map(str::to_owned)
    }

    #[wasm_bindgen(getter)]
    pub fn end(&self) -> Option<String> {
        self.selection.end().map(str::to_owned)
    }

    /// Whether both a start and an end are selected.
    #[wasm_bindgen(getter, js_name = isComplete)]
    pub fn is_complete(&self) -> bool {
        self.selection.is_complete()
    }

    /// Start station name for display, `--` when unset.
    #[wasm_bindgen(getter, js_name = startDisplay)]
    pub fn start_display(&self) -> String {
        self.selection.start_display().to_owned()
    }

    /// End station name for display, `--` when unset.
    #[wasm_bindgen(getter, js_name = endDisplay)]
    pub fn end_display(&self) -> String {
        self.selection.end_display().to_owned()
    }

    // =========================================================================
    // Map Layout
    // =========================================================================

    /// Placement and label offset for station `index` of `count` on `line`.
    ///
    /// Returns `{ placement: { kind: "pinned", x, y } | { kind: "alongTrack", distance }, label: { dx, dy, anchor } }`.
    /// Along-track distances are meant for `SVGPathElement.getPointAtLength`.
    #[wasm_bindgen(js_name = placeStation)]
    pub fn place_station(
        &self,
        line: &str,
        name: &str,
        index: usize,
        count: usize,
        track_length: f32,
    ) -> Result<JsValue, JsValue> {
        let layout = picker::place_station(&self.layout, line, name, index, count, track_length);
        Ok(to_js(&layout)?)
    }

    /// Indices (in document order) of station labels to hide.
    #[wasm_bindgen(js_name = hiddenLabels)]
    pub fn hidden_labels(names: Vec<String>) -> Vec<u32> {
        picker::hidden_labels(&names)
            .into_iter()
            .map(|i| i as u32)
            .collect()
    }

    /// Animation plan for a computed route.
    ///
    /// # Arguments
    ///
    /// * `names` - Station names along the route, in travel order
    /// * `positions` - `{ [name]: { x, y } }` for stations placed on the map
    #[wasm_bindgen(js_name = routePlan)]
    pub fn route_plan(names: Vec<String>, positions: JsValue) -> Result<JsValue, JsValue> {
        let positions: std::collections::HashMap<String, Point> =
            serde_wasm_bindgen::from_value(positions)
                .map_err(|e| RenderError::InvalidPath(e.to_string()))?;
        let plan = RoutePlan::new(&names, &positions);
        tracing::debug!(
            stations = plan.stations.len(),
            segments = plan.segments.len(),
            "route planned"
        );
        Ok(to_js(&plan)?)
    }
}
