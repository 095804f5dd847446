//! Spatial indexing over rendered node boxes.
//!
//! This module provides an R-tree based index used for the stage bounding
//! box and for hit testing placed nodes.

mod rtree;

pub use rtree::{NodeBox, SpatialIndex};
