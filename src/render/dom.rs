//! DOM host for the tree view.
//!
//! Builds the container contents for one render pass:
//!
//! ```text
//! #container (position: relative, overflow: auto)
//! └── div.vt-stage (scaled, centred)
//!     ├── svg.vt-svg           connector lines
//!     └── div.vt-node-container × n
//!         └── div.tree-node    label
//! ```
//!
//! Node elements are created at their logical positions first so the
//! browser can size them; their offsets are then read back as the measured
//! boxes for the second layout phase.

use std::collections::HashMap;

use indexmap::IndexMap;
use wasm_bindgen::JsCast as _;
use web_sys::{Document, Element, HtmlElement};

use super::plan::{EMPTY_TREE_MESSAGE, LayoutPass, RenderPlan};
use crate::animation::{Generation, PathAnimator, generation};
use crate::config::TreeViewConfig;
use crate::error::RenderError;
use crate::layout::LogicalPosition;
use crate::stage::{Extent, Measure};
use crate::tree::{Identifier, NodeKey, TreeNode};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Reads rendered boxes back from node elements.
struct DomMeasure<'a> {
    elements: &'a IndexMap<NodeKey, HtmlElement>,
}

impl Measure for DomMeasure<'_> {
    fn measure(&self, key: &NodeKey, _position: &LogicalPosition) -> Option<Extent> {
        let el = self.elements.get(key)?;
        Some(Extent::new(
            el.offset_left() as f32,
            el.offset_top() as f32,
            el.offset_width() as f32,
            el.offset_height() as f32,
        ))
    }
}

/// Render `tree` into the element with id `container_id`, then animate
/// `path` over it.
///
/// A missing container is a no-op. An absent tree renders the empty-state
/// placeholder. Any earlier animation in the same container is silenced.
pub fn render_tree(
    container_id: &str,
    tree: Option<&TreeNode>,
    path: &[Identifier],
    config: &TreeViewConfig,
) -> Result<(), RenderError> {
    let window = web_sys::window().ok_or(RenderError::NoDocument)?;
    let document = window.document().ok_or(RenderError::NoDocument)?;
    let Some(container) = document.get_element_by_id(container_id) else {
        tracing::debug!(container = container_id, "container not found; nothing to render");
        return Ok(());
    };
    let container: HtmlElement = container
        .dyn_into()
        .map_err(|_| RenderError::Dom(format!("#{container_id} is not an HTML element")))?;

    let generation = generation::advance(container_id);
    container.set_inner_html("");

    let Some(pass) = LayoutPass::new(tree, config) else {
        render_empty(&document, &container)?;
        tracing::debug!(container = container_id, "rendered empty tree placeholder");
        return Ok(());
    };

    let container_height = config.container_height(pass.layout().max_depth);
    let style = container.style();
    style.set_property("position", "relative")?;
    style.set_property("width", "100%")?;
    style.set_property("height", &px(container_height))?;
    style.set_property("overflow", "auto")?;

    let stage = create_html(&document, "div")?;
    stage.set_class_name("vt-stage");
    let stage_style = stage.style();
    stage_style.set_property("position", "relative")?;
    stage_style.set_property("transform-origin", "top center")?;
    stage_style.set_property("z-index", "1")?;
    container.append_child(&stage)?;

    let svg = document.create_element_ns(Some(SVG_NS), "svg")?;
    svg.set_attribute("class", "vt-svg")?;
    stage.append_child(&svg)?;

    let elements = create_nodes(&document, &stage, pass.layout().positions.iter(), config)?;

    let viewport_width = viewport_width(&container, config);
    let plan = pass.finish(&DomMeasure { elements: &elements }, viewport_width, path);

    place_nodes(&plan, &elements)?;
    size_stage(&plan, &stage, &svg)?;
    draw_connectors(&document, &plan, &svg)?;
    apply_scale(&plan, &container, &stage)?;

    tracing::debug!(
        container = container_id,
        nodes = plan.nodes.len(),
        connectors = plan.connectors.len(),
        scale = plan.scale,
        "tree rendered"
    );

    if !plan.steps.is_empty() {
        animate(&window, container_id, generation, &plan, &elements)?;
    }
    Ok(())
}

fn render_empty(document: &Document, container: &HtmlElement) -> Result<(), RenderError> {
    let empty = create_html(document, "div")?;
    empty.set_class_name("tree-empty");
    empty.set_text_content(Some(EMPTY_TREE_MESSAGE));
    container.append_child(&empty)?;
    Ok(())
}

/// Create one absolutely positioned element per node at its logical spot.
fn create_nodes<'a>(
    document: &Document,
    stage: &HtmlElement,
    positions: impl Iterator<Item = (&'a NodeKey, &'a LogicalPosition)>,
    config: &TreeViewConfig,
) -> Result<IndexMap<NodeKey, HtmlElement>, RenderError> {
    let mut elements = IndexMap::new();
    for (key, position) in positions {
        let label = position.value.to_string();

        let node = create_html(document, "div")?;
        node.set_class_name("vt-node-container");
        node.set_id(&format!("node-{label}"));
        node.set_attribute("data-node-key", &key.index().to_string())?;
        let style = node.style();
        style.set_property("position", "absolute")?;
        style.set_property("left", &px(position.x))?;
        style.set_property("top", &px(position.y))?;
        style.set_property("min-width", &px(config.node_width))?;
        style.set_property("height", &px(config.node_height))?;
        style.set_property("z-index", "2")?;

        let inner = create_html(document, "div")?;
        inner.set_class_name("tree-node");
        inner.set_text_content(Some(&label));
        let inner_style = inner.style();
        inner_style.set_property("width", "100%")?;
        inner_style.set_property("height", "100%")?;
        inner_style.set_property("display", "flex")?;
        inner_style.set_property("align-items", "center")?;
        inner_style.set_property("justify-content", "center")?;
        inner_style.set_property("border-radius", &px(config.node_radius))?;

        node.append_child(&inner)?;
        stage.append_child(&node)?;
        elements.insert(*key, node);
    }
    Ok(elements)
}

/// Move every measured node to its re-homed box.
fn place_nodes(
    plan: &RenderPlan,
    elements: &IndexMap<NodeKey, HtmlElement>,
) -> Result<(), RenderError> {
    for node in &plan.nodes {
        let (Some(stage_box), Some(el)) = (node.stage_box, elements.get(&node.key)) else {
            continue;
        };
        let style = el.style();
        style.set_property("left", &px(stage_box.left))?;
        style.set_property("top", &px(stage_box.top))?;
    }
    Ok(())
}

fn size_stage(plan: &RenderPlan, stage: &HtmlElement, svg: &Element) -> Result<(), RenderError> {
    let width = px(plan.stage_width);
    let height = px(plan.stage_height);

    let stage_style = stage.style();
    stage_style.set_property("width", &width)?;
    stage_style.set_property("height", &height)?;

    svg.set_attribute("width", &plan.stage_width.to_string())?;
    svg.set_attribute("height", &plan.stage_height.to_string())?;
    svg.set_attribute(
        "style",
        &format!(
            "position:absolute;top:0;left:0;pointer-events:none;z-index:1;width:{width};height:{height}"
        ),
    )?;
    Ok(())
}

fn draw_connectors(document: &Document, plan: &RenderPlan, svg: &Element) -> Result<(), RenderError> {
    while let Some(child) = svg.first_child() {
        svg.remove_child(&child)?;
    }
    for connector in &plan.connectors {
        let line = document.create_element_ns(Some(SVG_NS), "line")?;
        line.set_attribute("x1", &connector.x1.to_string())?;
        line.set_attribute("y1", &connector.y1.to_string())?;
        line.set_attribute("x2", &connector.x2.to_string())?;
        line.set_attribute("y2", &connector.y2.to_string())?;
        line.set_attribute("class", "vt-line")?;
        svg.append_child(&line)?;
    }
    Ok(())
}

fn apply_scale(
    plan: &RenderPlan,
    container: &HtmlElement,
    stage: &HtmlElement,
) -> Result<(), RenderError> {
    let style = stage.style();
    style.set_property("margin", "0 auto")?;
    style.set_property("transform-origin", "top center")?;
    style.set_property("transform", &format!("scale({})", plan.scale))?;
    if let Some(scroll_left) = plan.scroll_left {
        container.set_scroll_left(scroll_left as i32);
    }
    Ok(())
}

fn animate(
    window: &web_sys::Window,
    container_id: &str,
    generation: Generation,
    plan: &RenderPlan,
    elements: &IndexMap<NodeKey, HtmlElement>,
) -> Result<(), RenderError> {
    // Resolve values up front; the plan does not outlive this call
    let mut by_value: HashMap<String, Vec<HtmlElement>> = HashMap::new();
    for step in &plan.steps {
        by_value.entry(step.value.to_string()).or_insert_with(|| {
            plan.keys_for_value(&step.value)
                .iter()
                .filter_map(|key| elements.get(key).cloned())
                .collect()
        });
    }

    let animator = PathAnimator::new(window.clone(), container_id, generation);
    let schedule_len = plan.steps.len();
    let scheduled = animator.play(&plan.steps, |value| {
        by_value.get(&value.to_string()).cloned().unwrap_or_default()
    })?;
    if scheduled < schedule_len {
        tracing::debug!(
            skipped = schedule_len - scheduled,
            "path values without a node were skipped"
        );
    }
    tracing::debug!(container = container_id, ends_ms = plan.animation_ms, "path animation started");
    Ok(())
}

/// Width available to the stage: client width, else offset width, else the
/// configured fallback.
fn viewport_width(container: &HtmlElement, config: &TreeViewConfig) -> f32 {
    [container.client_width(), container.offset_width()]
        .into_iter()
        .find(|&w| w > 0)
        .map_or(config.fallback_viewport_width, |w| w as f32)
}

fn create_html(document: &Document, tag: &str) -> Result<HtmlElement, RenderError> {
    document
        .create_element(tag)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| RenderError::Dom(format!("<{tag}> is not an HTML element")))
}

fn px(value: f32) -> String {
    format!("{value}px")
}

