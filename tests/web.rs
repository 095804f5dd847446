//! Browser tests for the DOM host. Run with `wasm-pack test --headless`.

#![cfg(target_arch = "wasm32")]

use js_sys::{Object, Promise, Reflect};
use tree_visualizer_wasm::animation::{HIGHLIGHT_CLASS, HighlightSchedule, PathAnimator, generation};
use tree_visualizer_wasm::config::TreeViewConfig;
use tree_visualizer_wasm::render::dom::render_tree;
use tree_visualizer_wasm::render::{EMPTY_TREE_MESSAGE, TreeRender, plan_tree};
use tree_visualizer_wasm::tree::{Identifier, TreeNode, tree_from_js};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement, Window};

wasm_bindgen_test_configure!(run_in_browser);

fn window() -> Window {
    web_sys::window().unwrap()
}

fn document() -> Document {
    window().document().unwrap()
}

fn container(id: &str) -> HtmlElement {
    let doc = document();
    if let Some(old) = doc.get_element_by_id(id) {
        old.remove();
    }
    let el: HtmlElement = doc.create_element("div").unwrap().unchecked_into();
    el.set_id(id);
    el.style().set_property("width", "600px").unwrap();
    doc.body().unwrap().append_child(&el).unwrap();
    el
}

/// A bare node element inside `parent`.
fn node_in(parent: &HtmlElement) -> HtmlElement {
    let node: HtmlElement = document().create_element("div").unwrap().unchecked_into();
    parent.append_child(&node).unwrap();
    node
}

async fn sleep(ms: i32) {
    let promise = Promise::new(&mut |resolve, _reject| {
        window()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn is_highlighted(el: &HtmlElement) -> bool {
    el.class_list().contains(HIGHLIGHT_CLASS)
}

fn z_index(el: &HtmlElement) -> String {
    el.style().get_property_value("z-index").unwrap()
}

fn set(object: &Object, key: &str, value: &JsValue) {
    Reflect::set(object, &JsValue::from_str(key), value).unwrap();
}

#[wasm_bindgen_test]
fn empty_tree_shows_placeholder_only() {
    let el = container("vt-empty");
    render_tree("vt-empty", None, &[], &TreeViewConfig::default()).unwrap();

    let placeholder = el.query_selector(".tree-empty").unwrap().unwrap();
    assert_eq!(placeholder.text_content().as_deref(), Some(EMPTY_TREE_MESSAGE));
    assert!(el.query_selector(".vt-stage").unwrap().is_none());
    assert!(el.query_selector("svg").unwrap().is_none());
}

#[wasm_bindgen_test]
fn tree_builds_stage_svg_and_nodes() {
    let el = container("vt-tree");
    let tree = TreeNode::leaf(5)
        .with_left(TreeNode::leaf(3))
        .with_right(TreeNode::leaf(8));
    let path = [Identifier::from(5), Identifier::from(8)];
    render_tree("vt-tree", Some(&tree), &path, &TreeViewConfig::default()).unwrap();

    assert!(el.query_selector(".vt-stage").unwrap().is_some());
    assert!(el.query_selector("svg.vt-svg").unwrap().is_some());
    assert!(el.query_selector("#node-3").unwrap().is_some());
    let inner: HtmlElement = el
        .query_selector("#node-8 .tree-node")
        .unwrap()
        .unwrap()
        .unchecked_into();
    assert_eq!(inner.style().get_property_value("border-radius").unwrap(), "25px");
    assert!(el.query_selector("line.vt-line").unwrap().is_some());
    assert!(el.query_selector(".tree-empty").unwrap().is_none());
}

#[wasm_bindgen_test]
fn rerender_replaces_previous_contents() {
    let el = container("vt-rerender");
    let tree = TreeNode::leaf(1).with_right(TreeNode::leaf(2));
    render_tree("vt-rerender", Some(&tree), &[], &TreeViewConfig::default()).unwrap();
    render_tree("vt-rerender", None, &[], &TreeViewConfig::default()).unwrap();

    assert!(el.query_selector("#node-1").unwrap().is_none());
    assert!(el.query_selector(".tree-empty").unwrap().is_some());
}

#[wasm_bindgen_test]
fn missing_container_is_a_no_op() {
    let tree = TreeNode::leaf(1);
    assert!(render_tree("vt-does-not-exist", Some(&tree), &[], &TreeViewConfig::default()).is_ok());
}

#[wasm_bindgen_test]
fn play_skips_values_without_elements() {
    let el = container("vt-play-skip");
    let node = node_in(&el);
    let path = [Identifier::from(1), Identifier::from(99), Identifier::from(1)];
    let schedule = HighlightSchedule::with_timing(&path, 0, 10);

    let animator = PathAnimator::new(window(), "vt-play-skip", generation::advance("vt-play-skip"));
    let scheduled = animator
        .play(schedule.steps(), |value| {
            if value.to_string() == "1" {
                vec![node.clone()]
            } else {
                Vec::new()
            }
        })
        .unwrap();
    assert_eq!(scheduled, path.len() - 1);
}

#[wasm_bindgen_test]
async fn highlight_raises_then_restores_node() {
    let el = container("vt-play");
    let node = node_in(&el);
    let schedule = HighlightSchedule::with_timing(&[Identifier::from(7)], 0, 80);

    let animator = PathAnimator::new(window(), "vt-play", generation::advance("vt-play"));
    let target = node.clone();
    animator
        .play(schedule.steps(), move |_| vec![target.clone()])
        .unwrap();
    assert!(!is_highlighted(&node));

    sleep(20).await;
    assert!(is_highlighted(&node));
    assert_eq!(z_index(&node), "10");

    sleep(120).await;
    assert!(!is_highlighted(&node));
    assert_eq!(z_index(&node), "2");
}

#[wasm_bindgen_test]
async fn newer_generation_silences_pending_highlights() {
    let el = container("vt-play-stale");
    let node = node_in(&el);
    let schedule = HighlightSchedule::with_timing(&[Identifier::from(7)], 0, 80);

    let animator = PathAnimator::new(window(), "vt-play-stale", generation::advance("vt-play-stale"));
    let target = node.clone();
    animator
        .play(schedule.steps(), move |_| vec![target.clone()])
        .unwrap();
    generation::advance("vt-play-stale");

    sleep(30).await;
    assert!(!is_highlighted(&node));
    assert_eq!(z_index(&node), "");
}

#[wasm_bindgen_test]
async fn rendered_path_highlights_its_node() {
    let el = container("vt-path");
    let tree = TreeNode::leaf(5).with_left(TreeNode::leaf(3));
    render_tree("vt-path", Some(&tree), &[Identifier::from(5)], &TreeViewConfig::default()).unwrap();

    sleep(30).await;
    let root: HtmlElement = el.query_selector("#node-5").unwrap().unwrap().unchecked_into();
    let left: HtmlElement = el.query_selector("#node-3").unwrap().unwrap().unchecked_into();
    assert!(is_highlighted(&root));
    assert!(!is_highlighted(&left));
}

#[wasm_bindgen_test]
async fn rerender_cancels_pending_highlights() {
    let el = container("vt-rerender-path");
    let tree = TreeNode::leaf(5).with_left(TreeNode::leaf(3));
    let config = TreeViewConfig::default();
    render_tree("vt-rerender-path", Some(&tree), &[Identifier::from(5)], &config).unwrap();
    let old: HtmlElement = el.query_selector("#node-5").unwrap().unwrap().unchecked_into();

    render_tree("vt-rerender-path", Some(&tree), &[], &config).unwrap();
    sleep(50).await;

    let new: HtmlElement = el.query_selector("#node-5").unwrap().unwrap().unchecked_into();
    assert!(!is_highlighted(&old));
    assert!(!is_highlighted(&new));
    assert_eq!(z_index(&new), "2");
}

#[wasm_bindgen_test]
fn js_tree_with_bad_nodes_renders_the_rest() {
    let el = container("vt-bad-node");
    let tree = js_sys::JSON::parse(
        r#"{"value": 50,
            "left": {"value": null, "left": 0, "right": {"value": 40}},
            "right": {"value": true, "left": [1, 2], "right": "x"}}"#,
    )
    .unwrap();
    tree_visualizer_wasm::render_tree("vt-bad-node", tree, JsValue::NULL);

    assert!(el.query_selector(".tree-empty").unwrap().is_none());
    for id in ["#node-50", "#node-null", "#node-40", "#node-true"] {
        assert!(el.query_selector(id).unwrap().is_some(), "{id} missing");
    }
    assert_eq!(el.query_selector_all(".vt-node-container").unwrap().length(), 4);
    assert_eq!(el.query_selector_all("line.vt-line").unwrap().length(), 3);
}

#[wasm_bindgen_test]
fn js_tree_values_follow_string_coercion() {
    let root = Object::new();
    set(&root, "value", &JsValue::from_f64(1e21));
    let left = Object::new();
    set(&left, "value", &js_sys::Array::of2(&JsValue::from(1), &JsValue::NULL));
    set(&root, "left", &left);
    let right = Object::new();
    set(&right, "value", &Object::new());
    set(&root, "right", &right);

    let tree = tree_from_js(&root).unwrap().unwrap();
    let values: Vec<String> = [
        &tree.value,
        &tree.left.as_ref().unwrap().value,
        &tree.right.as_ref().unwrap().value,
    ]
    .iter()
    .map(|v| v.to_string())
    .collect();
    assert_eq!(values, ["1e+21", "1,", "[object Object]"]);

    assert!(tree_from_js(&JsValue::from(5)).is_err());
    assert!(tree_from_js(&JsValue::UNDEFINED).unwrap().is_none());
}

#[wasm_bindgen_test]
fn deep_js_tree_decodes_and_plans() {
    let mut root = JsValue::NULL;
    for v in 0..10_000 {
        let node = Object::new();
        set(&node, "value", &JsValue::from(v));
        set(&node, "left", &root);
        root = node.into();
    }

    let tree = tree_from_js(&root).unwrap().unwrap();
    assert_eq!(tree.value, Identifier::from(9_999));
    match plan_tree(Some(&tree), &[], 800.0, &TreeViewConfig::default()) {
        TreeRender::Tree(plan) => {
            assert_eq!(plan.nodes.len(), 10_000);
            assert_eq!(plan.max_depth, 9_999);
        }
        TreeRender::Empty { .. } => panic!("expected a tree plan"),
    }
}

#[wasm_bindgen_test]
fn cyclic_js_tree_drops_the_repeat() {
    let root = Object::new();
    set(&root, "value", &JsValue::from(1));
    set(&root, "left", &root);

    let tree = tree_from_js(&root).unwrap().unwrap();
    assert!(tree.left.is_none());
}
