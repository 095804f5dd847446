//! Path highlight animation.
//!
//! [`HighlightSchedule`] is the pure timeline; [`PathAnimator`] plays it
//! against DOM elements with `setTimeout`, guarded by per-container
//! generations so a re-render silences stale callbacks.

pub mod generation;
mod schedule;
mod timers;

pub use generation::Generation;
pub use schedule::{HighlightSchedule, HighlightStep};
pub use timers::{HIGHLIGHT_CLASS, PathAnimator};
