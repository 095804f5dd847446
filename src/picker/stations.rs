//! Station placement along rail lines and label staggering.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Interchange names whose label is shown only once.
pub const INTERCHANGES: [&str; 3] = ["Doroteo Jose-Recto", "Cubao", "EDSA-Taft Avenue"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Fixed map coordinates for interchange stations and the fraction of a
/// line kept clear at each end.
#[derive(Debug, Clone, PartialEq)]
pub struct StationLayoutConfig {
    pub recto_hub: Point,
    pub cubao_hub: Point,
    pub taft_hub: Point,
    pub end_padding: f32,
}

impl Default for StationLayoutConfig {
    fn default() -> Self {
        Self {
            recto_hub: Point::new(250.0, 260.0),
            cubao_hub: Point::new(630.0, 220.0),
            taft_hub: Point::new(250.0, 530.0),
            end_padding: 0.08,
        }
    }
}

impl StationLayoutConfig {
    /// The hub a station is pinned to, if any.
    pub fn hub_for(&self, name: &str) -> Option<Point> {
        if name.contains("Recto") || name.contains("Doroteo Jose") {
            Some(self.recto_hub)
        } else if name.contains("Cubao") {
            Some(self.cubao_hub)
        } else if name.contains("Taft Avenue") || name == "EDSA" {
            Some(self.taft_hub)
        } else {
            None
        }
    }

    /// Distance along a line of `length` for station `index` of `count`.
    pub fn distance_along(&self, index: usize, count: usize, length: f32) -> f32 {
        let fraction = if count > 1 {
            index as f32 / (count - 1) as f32
        } else {
            0.0
        };
        fraction * length * (1.0 - 2.0 * self.end_padding) + length * self.end_padding
    }
}

/// Where a station goes: a fixed hub point or a distance along its track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Placement {
    Pinned { x: f32, y: f32 },
    AlongTrack { distance: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Label offset relative to the station marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelOffset {
    pub dx: f32,
    pub dy: f32,
    pub anchor: TextAnchor,
}

impl LabelOffset {
    /// `lrt1` labels sit left of the line, `mrt3` labels right of it, and
    /// labels on any other line alternate between two heights above it.
    pub fn for_line(line: &str, index: usize) -> Self {
        match line {
            "lrt1" => Self {
                dx: -15.0,
                dy: 0.0,
                anchor: TextAnchor::End,
            },
            "mrt3" => Self {
                dx: 15.0,
                dy: 0.0,
                anchor: TextAnchor::Start,
            },
            _ => Self {
                dx: 0.0,
                dy: if index % 2 == 0 { -15.0 } else { -28.0 },
                anchor: TextAnchor::Middle,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StationLayout {
    pub placement: Placement,
    pub label: LabelOffset,
}

/// Place station `index` of `count` on `line`, whose track is `length` long.
pub fn place_station(
    config: &StationLayoutConfig,
    line: &str,
    name: &str,
    index: usize,
    count: usize,
    length: f32,
) -> StationLayout {
    let placement = match config.hub_for(name) {
        Some(hub) => Placement::Pinned { x: hub.x, y: hub.y },
        None => Placement::AlongTrack {
            distance: config.distance_along(index, count, length),
        },
    };
    StationLayout {
        placement,
        label: LabelOffset::for_line(line, index),
    }
}

/// Indices of stations whose label should be hidden: every repeat of an
/// interchange name after its first occurrence.
pub fn hidden_labels<S: AsRef<str>>(names: &[S]) -> Vec<usize> {
    let mut seen = HashSet::new();
    names
        .iter()
        .enumerate()
        .filter(|&(_, name)| {
            let name = name.as_ref();
            INTERCHANGES.contains(&name) && !seen.insert(name)
        })
        .map(|(i, _)| i)
        .collect()
}
