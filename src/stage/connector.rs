//! Parent/child connector lines.

use indexmap::IndexMap;
use serde::Serialize;

use super::measure::Extent;
use crate::layout::LogicalLayout;
use crate::tree::NodeKey;

/// A straight line between the centres of a parent box and a child box.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
    pub parent: NodeKey,
    pub child: NodeKey,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// Build every connector from the re-homed boxes.
///
/// Nodes without a parent draw nothing. If either endpoint has no box the
/// connector is skipped and the rest are still drawn.
pub fn connect(layout: &LogicalLayout, boxes: &IndexMap<NodeKey, Extent>) -> Vec<Connector> {
    let mut connectors = Vec::with_capacity(layout.len().saturating_sub(1));

    for (child, position) in &layout.positions {
        let Some(parent) = position.parent.as_ref() else {
            continue;
        };
        let (Some(parent_box), Some(child_box)) = (boxes.get(parent), boxes.get(child)) else {
            tracing::warn!(%parent, %child, "connector endpoint missing; skipping");
            continue;
        };

        let (x1, y1) = parent_box.center();
        let (x2, y2) = child_box.center();
        connectors.push(Connector {
            parent: *parent,
            child: *child,
            x1,
            y1,
            x2,
            y2,
        });
    }

    connectors
}
