use serde::Serialize;

/// Text shown for an unset start or end.
pub const UNSET_DISPLAY: &str = "--";

/// Which role a selected station took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Start,
    End,
}

/// Result of [`StationSelection::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionChange {
    pub role: Role,
    /// True when the previous selection was cleared first.
    pub reset: bool,
}

/// Start/end pair for a route query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationSelection {
    start: Option<String>,
    end: Option<String>,
}

impl StationSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill start, then end; a third pick (or re-picking the start as end)
    /// starts over with `name` as the new start.
    pub fn select(&mut self, name: &str) -> SelectionChange {
        if self.start.is_none() {
            self.start = Some(name.to_owned());
            return SelectionChange {
                role: Role::Start,
                reset: false,
            };
        }
        if self.end.is_none() && self.start.as_deref() != Some(name) {
            self.end = Some(name.to_owned());
            return SelectionChange {
                role: Role::End,
                reset: false,
            };
        }
        self.reset();
        self.start = Some(name.to_owned());
        SelectionChange {
            role: Role::Start,
            reset: true,
        }
    }

    pub fn reset(&mut self) {
        self.start = None;
        self.end = None;
    }

    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    pub fn end(&self) -> Option<&str> {
        self.end.as_deref()
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn start_display(&self) -> &str {
        self.start.as_deref().map_or(UNSET_DISPLAY, display_name)
    }

    pub fn end_display(&self) -> &str {
        self.end.as_deref().map_or(UNSET_DISPLAY, display_name)
    }
}

/// Station name without its parenthesised line suffix.
///
/// `"Cubao (MRT-3)"` displays as `"Cubao"`.
pub fn display_name(name: &str) -> &str {
    name.split_once(" (").map_or(name, |(head, _)| head)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(role: Role, reset: bool) -> SelectionChange {
        SelectionChange { role, reset }
    }

    #[test]
    fn test_start_then_end() {
        let mut sel = StationSelection::new();
        assert_eq!(sel.start_display(), "--");

        let first = sel.select("Cubao (MRT-3)");
        assert_eq!(first, change(Role::Start, false));
        let second = sel.select("Recto (LRT-2)");
        assert_eq!(second, change(Role::End, false));

        assert!(sel.is_complete());
        assert_eq!(sel.start_display(), "Cubao");
        assert_eq!(sel.end_display(), "Recto");
    }

    #[test]
    fn test_same_station_twice_restarts() {
        let mut sel = StationSelection::new();
        sel.select("Cubao");
        let got = sel.select("Cubao");
        assert_eq!(got, change(Role::Start, true));
        assert_eq!(sel.start(), Some("Cubao"));
        assert_eq!(sel.end(), None);
    }

    #[test]
    fn test_third_pick_restarts() {
        let mut sel = StationSelection::new();
        sel.select("Baclaran");
        sel.select("Monumento");
        let change = sel.select("Santolan");
        assert!(change.reset);
        assert_eq!(sel.start(), Some("Santolan"));
        assert_eq!(sel.end_display(), UNSET_DISPLAY);
    }

    #[test]
    fn test_reset_clears_both() {
        let mut sel = StationSelection::new();
        sel.select("Baclaran");
        sel.select("Monumento");
        sel.reset();
        assert_eq!(sel, StationSelection::default());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("EDSA (LRT-1)"), "EDSA");
        assert_eq!(display_name("Taft Avenue"), "Taft Avenue");
        assert_eq!(display_name("A (x) (y)"), "A");
    }
}
