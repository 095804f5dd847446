use std::collections::HashMap;

use serde::Serialize;

use super::stations::Point;

/// Per-station stagger for the on-route animation.
pub const STATION_DELAY_MS: u32 = 100;
/// Per-segment stagger for the route line animation.
pub const SEGMENT_DELAY_MS: u32 = 150;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStation {
    pub name: String,
    pub delay_ms: u32,
}

/// Line between two consecutive route stations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSegment {
    /// Index of the segment's first station in the route.
    pub index: usize,
    pub from: Point,
    pub to: Point,
    pub delay_ms: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoutePlan {
    pub stations: Vec<RouteStation>,
    pub segments: Vec<RouteSegment>,
}

impl RoutePlan {
    /// Plan the highlight for a route. Segments are drawn only where both
    /// ends have a known position.
    pub fn new<S: AsRef<str>>(route: &[S], positions: &HashMap<String, Point>) -> Self {
        let stations = route
            .iter()
            .zip(0u32..)
            .map(|(name, i)| RouteStation {
                name: name.as_ref().to_owned(),
                delay_ms: i * STATION_DELAY_MS,
            })
            .collect();

        let segments = route
            .windows(2)
            .zip(0u32..)
            .filter_map(|(pair, i)| {
                let from = *positions.get(pair[0].as_ref())?;
                let to = *positions.get(pair[1].as_ref())?;
                Some(RouteSegment {
                    index: i as usize,
                    from,
                    to,
                    delay_ms: i * SEGMENT_DELAY_MS,
                })
            })
            .collect();

        Self { stations, segments }
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions() -> HashMap<String, Point> {
        HashMap::from([
            ("Recto".to_owned(), Point::new(250.0, 260.0)),
            ("Legarda".to_owned(), Point::new(320.0, 250.0)),
            ("Cubao".to_owned(), Point::new(630.0, 220.0)),
        ])
    }

    #[test]
    fn test_station_delays() {
        let plan = RoutePlan::new(&["Recto", "Legarda", "Cubao"], &positions());
        let delays: Vec<u32> = plan.stations.iter().map(|s| s.delay_ms).collect();
        assert_eq!(delays, vec![0, 100, 200]);
    }

    #[test]
    fn test_segments_need_both_positions() {
        let plan = RoutePlan::new(&["Recto", "Legarda", "Unknown", "Cubao"], &positions());
        assert_eq!(plan.stations.len(), 4);
        assert_eq!(plan.segments.len(), 1);
        assert_eq!(plan.segments[0].index, 0);
        assert_eq!(plan.segments[0].to, Point::new(320.0, 250.0));
    }

    #[test]
    fn test_segment_delay_follows_index() {
        let plan = RoutePlan::new(&["Recto", "Legarda", "Cubao"], &positions());
        assert_eq!(plan.segments[1].index, 1);
        assert_eq!(plan.segments[1].delay_ms, 150);
    }

    #[test]
    fn test_empty_route() {
        let plan = RoutePlan::new::<&str>(&[], &positions());
        assert!(plan.is_empty());
        assert!(plan.segments.is_empty());
    }
}
