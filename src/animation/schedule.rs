//! Highlight timeline for an animation path.
//!
//! Step `i` turns on at `i * delay` and off `hold` milliseconds later. Steps
//! are independent: with `hold > delay` consecutive highlights overlap.

use serde::Serialize;

use crate::config::TreeViewConfig;
use crate::tree::Identifier;

/// One scheduled show-then-hide emphasis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightStep {
    /// Position in the path.
    pub index: usize,
    /// Value to highlight.
    pub value: Identifier,
    /// Offset from animation start (ms).
    pub start_ms: u32,
    /// How long the highlight is held (ms).
    pub duration_ms: u32,
}

impl HighlightStep {
    /// When the highlight is removed (ms from animation start).
    #[inline]
    pub fn end_ms(&self) -> u32 {
        self.start_ms.saturating_add(self.duration_ms)
    }
}

/// All highlight steps for one path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightSchedule {
    steps: Vec<HighlightStep>,
}

impl HighlightSchedule {
    /// Build the schedule for `path` using the configured delay and hold.
    pub fn from_path(path: &[Identifier], config: &TreeViewConfig) -> Self {
        Self::with_timing(path, config.animation_delay_ms, config.highlight_duration_ms)
    }

    /// Build a schedule with explicit timing.
    pub fn with_timing(path: &[Identifier], delay_ms: u32, hold_ms: u32) -> Self {
        let steps = path
            .iter()
            .enumerate()
            .map(|(index, value)| HighlightStep {
                index,
                value: value.clone(),
                start_ms: (index as u32).saturating_mul(delay_ms),
                duration_ms: hold_ms,
            })
            .collect();
        Self { steps }
    }

    pub fn steps(&self) -> &[HighlightStep] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<HighlightStep> {
        self.steps
    }

    /// Time at which the last highlight is removed.
    pub fn total_duration_ms(&self) -> u32 {
        self.steps.iter().map(HighlightStep::end_ms).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(values: &[&str]) -> Vec<Identifier> {
        values.iter().map(|v| Identifier::from(*v)).collect()
    }

    #[test]
    fn test_step_offsets() {
        let (d, h) = (600, 700);
        let schedule = HighlightSchedule::with_timing(&path(&["a", "b", "c"]), d, h);
        let times: Vec<(String, u32, u32)> = schedule
            .steps()
            .iter()
            .map(|s| (s.value.to_string(), s.start_ms, s.end_ms()))
            .collect();

        assert_eq!(
            times,
            [
                ("a".to_string(), 0, h),
                ("b".to_string(), d, d + h),
                ("c".to_string(), 2 * d, 2 * d + h),
            ]
        );
    }

    #[test]
    fn test_default_timing() {
        let schedule = HighlightSchedule::from_path(&path(&["50", "30", "40"]), &TreeViewConfig::default());
        assert_eq!(schedule.steps()[2].start_ms, 1200);
        assert_eq!(schedule.total_duration_ms(), 1900);
    }

    #[test]
    fn test_empty_path() {
        let schedule = HighlightSchedule::from_path(&[], &TreeViewConfig::default());
        assert!(schedule.steps().is_empty());
        assert_eq!(schedule.total_duration_ms(), 0);
    }

    #[test]
    fn test_total_duration_covers_overlapping_holds() {
        // Holds longer than the delay overlap; the last one still ends last
        let schedule = HighlightSchedule::with_timing(&path(&["a", "b", "c"]), 600, 700);
        assert_eq!(schedule.steps()[0].end_ms(), 700);
        assert!(schedule.steps()[1].start_ms < schedule.steps()[0].end_ms());
        assert_eq!(schedule.total_duration_ms(), 1900);

        // Short holds leave gaps between steps
        let gapped = HighlightSchedule::with_timing(&path(&["a", "b"]), 500, 100);
        assert_eq!(gapped.total_duration_ms(), 600);
    }

    #[test]
    fn test_repeated_value_gets_its_own_step() {
        let schedule = HighlightSchedule::with_timing(&path(&["a", "a"]), 100, 50);
        assert_eq!(schedule.steps().len(), 2);
        assert_eq!(schedule.steps()[1].start_ms, 100);
    }
}
