//! Reads a `{ value, left, right }` tree straight off a JS object.
//!
//! The object graph is walked with an explicit stack, so tree depth is
//! bounded by memory rather than by the wasm call stack. Values are coerced
//! the way JS `String()` would; children that are not plain objects count as
//! absent. An object reached a second time (a cycle or a shared subtree) is
//! dropped with a warning.

use js_sys::{Array, Reflect, Set};
use wasm_bindgen::{JsCast as _, JsValue};

use super::node::{Identifier, Side, TreeNode};
use crate::error::RenderError;

/// A node read from JS, children as indices into the pre-order list.
struct Slot {
    value: Identifier,
    left: Option<usize>,
    right: Option<usize>,
}

/// Decode `root` into an owned tree. `null` and `undefined` are no tree.
pub fn tree_from_js(root: &JsValue) -> Result<Option<TreeNode>, RenderError> {
    if root.is_null() || root.is_undefined() {
        return Ok(None);
    }
    if !is_node(root) {
        return Err(RenderError::InvalidTree(format!(
            "expected an object, got {}",
            js_string(root)
        )));
    }

    let seen = Set::new(&JsValue::UNDEFINED);
    let mut slots: Vec<Slot> = Vec::new();
    let mut stack: Vec<(JsValue, Option<(usize, Side)>)> = vec![(root.clone(), None)];

    while let Some((object, parent)) = stack.pop() {
        if seen.has(&object) {
            tracing::warn!(parent = ?parent.map(|(p, _)| p), "tree node reached twice; dropping it");
            continue;
        }
        seen.add(&object);

        let idx = slots.len();
        slots.push(Slot {
            value: identifier(&field(&object, "value")?),
            left: None,
            right: None,
        });
        match parent {
            Some((p, Side::Left)) => slots[p].left = Some(idx),
            Some((p, Side::Right)) => slots[p].right = Some(idx),
            None => {}
        }

        // Right first so the left subtree is numbered first
        for (side, name) in [(Side::Right, "right"), (Side::Left, "left")] {
            let child = field(&object, name)?;
            if is_node(&child) {
                stack.push((child, Some((idx, side))));
            }
        }
    }

    // Children always come after their parent in pre-order
    let mut built: Vec<Option<TreeNode>> = (0..slots.len()).map(|_| None).collect();
    for (idx, slot) in slots.into_iter().enumerate().rev() {
        let left = slot.left.and_then(|i| built[i].take()).map(Box::new);
        let right = slot.right.and_then(|i| built[i].take()).map(Box::new);
        built[idx] = Some(TreeNode {
            value: slot.value,
            left,
            right,
        });
    }
    Ok(built.into_iter().next().flatten())
}

fn is_node(value: &JsValue) -> bool {
    value.is_object() && !Array::is_array(value)
}

fn field(object: &JsValue, name: &str) -> Result<JsValue, RenderError> {
    Reflect::get(object, &JsValue::from_str(name))
        .map_err(|err| RenderError::InvalidTree(format!("reading `{name}` threw {err:?}")))
}

fn identifier(value: &JsValue) -> Identifier {
    if let Some(n) = value.as_f64() {
        Identifier::Number(n)
    } else if let Some(text) = value.as_string() {
        Identifier::Text(text)
    } else {
        Identifier::Text(js_string(value))
    }
}

/// `String(value)` for the shapes a node value realistically takes.
fn js_string(value: &JsValue) -> String {
    if let Some(b) = value.as_bool() {
        b.to_string()
    } else if let Some(n) = value.as_f64() {
        Identifier::Number(n).to_string()
    } else if let Some(text) = value.as_string() {
        text
    } else if value.is_null() {
        "null".to_owned()
    } else if value.is_undefined() {
        "undefined".to_owned()
    } else if let Some(array) = value.dyn_ref::<Array>() {
        String::from(array.join(","))
    } else if value.is_object() {
        "[object Object]".to_owned()
    } else {
        format!("{value:?}")
    }
}
