//! Station picker for the metro map page.
//!
//! Pure state and geometry; the wasm `StationPicker` class in the crate root
//! exposes it to the page script.

mod route;
mod selection;
mod stations;

pub use route::{RoutePlan, RouteSegment, RouteStation, SEGMENT_DELAY_MS, STATION_DELAY_MS};
pub use selection::{Role, SelectionChange, StationSelection, UNSET_DISPLAY, display_name};
pub use stations::{
    INTERCHANGES, LabelOffset, Placement, Point, StationLayout, StationLayoutConfig, TextAnchor,
    hidden_labels, place_station,
};
