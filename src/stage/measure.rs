//! Second phase of the layout protocol: measured node extents.
//!
//! Logical positions come from tree shape alone, but the rendered size of a
//! node depends on its label. The host reports each node's real box through
//! [`Measure`]; sizing and connectors only ever use measured boxes.

use serde::Serialize;

use crate::layout::LogicalPosition;
use crate::tree::NodeKey;

/// An axis-aligned rendered box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extent {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Extent {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Centre of the box, where connectors attach.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// The same box moved by `(-dx, -dy)`.
    pub fn shifted(&self, dx: f32, dy: f32) -> Self {
        Self {
            left: self.left - dx,
            top: self.top - dy,
            ..*self
        }
    }
}

/// Source of rendered node boxes.
///
/// Returning `None` means the node has no visual element; it is left out of
/// the bounding box and any connector touching it is skipped.
pub trait Measure {
    fn measure(&self, key: &NodeKey, position: &LogicalPosition) -> Option<Extent>;
}

/// Measures every node as a fixed-size box at its logical position.
///
/// Used when no renderer is involved (plans computed for the host, tests).
#[derive(Debug, Clone, Copy)]
pub struct NominalMeasure {
    pub width: f32,
    pub height: f32,
}

impl NominalMeasure {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Measure for NominalMeasure {
    fn measure(&self, _key: &NodeKey, position: &LogicalPosition) -> Option<Extent> {
        Some(Extent::new(position.x, position.y, self.width, self.height))
    }
}

impl<F> Measure for F
where
    F: Fn(&NodeKey, &LogicalPosition) -> Option<Extent>,
{
    fn measure(&self, key: &NodeKey, position: &LogicalPosition) -> Option<Extent> {
        self(key, position)
    }
}
