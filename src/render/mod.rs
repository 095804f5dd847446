//! Rendering: plans and the DOM host that draws them.

pub mod dom;
mod plan;

pub use plan::{EMPTY_TREE_MESSAGE, LayoutPass, PlacedNode, RenderPlan, TreeRender, plan_tree};
