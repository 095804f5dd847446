//! Canvas sizing, centering and connectors.
//!
//! Takes the logical layout, asks the host for each node's rendered box,
//! re-homes the drawing to the origin and computes the stage size, the
//! responsive scale and the connector geometry.

mod connector;
mod fit;
mod measure;

pub use connector::{Connector, connect};
pub use fit::{StageFit, responsive_scale};
pub use measure::{Extent, Measure, NominalMeasure};
