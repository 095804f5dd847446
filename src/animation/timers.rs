//! `setTimeout`-driven playback of a [`HighlightStep`] list.
//!
//! Each step schedules its own pair of timers (highlight, then restore), so
//! steps run concurrently rather than chained. Every callback re-checks the
//! container's [`Generation`] before touching the DOM.

use std::rc::Rc;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlElement, Window};

use super::generation::{self, Generation};
use super::schedule::HighlightStep;
use crate::error::RenderError;
use crate::tree::Identifier;

/// Class toggled on a highlighted node.
pub const HIGHLIGHT_CLASS: &str = "vt-highlight";

const RAISED_Z_INDEX: &str = "10";
const RESTING_Z_INDEX: &str = "2";

/// Plays highlight steps against live node elements.
pub struct PathAnimator {
    window: Window,
    container_id: Rc<str>,
    generation: Generation,
}

impl std::fmt::Debug for PathAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathAnimator")
            .field("container_id", &self.container_id)
            .field("generation", &self.generation)
            .finish()
    }
}

impl PathAnimator {
    pub fn new(window: Window, container_id: &str, generation: Generation) -> Self {
        Self {
            window,
            container_id: Rc::from(container_id),
            generation,
        }
    }

    /// Schedule every step. `resolve` maps a path value to the elements that
    /// carry it; values with no element are skipped.
    ///
    /// Returns the number of steps scheduled.
    pub fn play(
        &self,
        steps: &[HighlightStep],
        resolve: impl Fn(&Identifier) -> Vec<HtmlElement>,
    ) -> Result<usize, RenderError> {
        let mut scheduled = 0;
        for step in steps {
            let elements = resolve(&step.value);
            if elements.is_empty() {
                tracing::debug!(value = %step.value, index = step.index, "no node for path value");
                continue;
            }

            let window = self.window.clone();
            let container_id = Rc::clone(&self.container_id);
            let generation = self.generation;
            let hold_ms = step.duration_ms;

            set_timeout(&self.window, step.start_ms, move || {
                if !generation::is_current(&container_id, generation) {
                    return;
                }
                for el in &elements {
                    if let Err(err) = set_highlighted(el, true) {
                        tracing::warn!(error = ?err, "failed to highlight node");
                    }
                }

                let restore = move || {
                    if !generation::is_current(&container_id, generation) {
                        return;
                    }
                    for el in &elements {
                        if let Err(err) = set_highlighted(el, false) {
                            tracing::warn!(error = ?err, "failed to restore node");
                        }
                    }
                };
                if let Err(err) = set_timeout(&window, hold_ms, restore) {
                    tracing::warn!(%err, "failed to schedule highlight restore");
                }
            })?;
            scheduled += 1;
        }

        tracing::debug!(
            container = %self.container_id,
            generation = self.generation.0,
            scheduled,
            "highlight path scheduled"
        );
        Ok(scheduled)
    }
}

/// Toggle the highlight class and raise (or restore) stacking order.
fn set_highlighted(el: &HtmlElement, on: bool) -> Result<(), JsValue> {
    if on {
        el.class_list().add_1(HIGHLIGHT_CLASS)?;
        el.style().set_property("z-index", RAISED_Z_INDEX)
    } else {
        el.class_list().remove_1(HIGHLIGHT_CLASS)?;
        el.style().set_property("z-index", RESTING_Z_INDEX)
    }
}

/// Run `callback` once after `delay_ms`.
fn set_timeout(
    window: &Window,
    delay_ms: u32,
    callback: impl FnOnce() + 'static,
) -> Result<i32, RenderError> {
    let callback = Closure::once_into_js(callback);
    let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);
    let callback: &js_sys::Function = callback.unchecked_ref();
    let id = window.set_timeout_with_callback_and_timeout_and_arguments_0(callback, timeout)?;
    Ok(id)
}
