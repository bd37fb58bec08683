//! Chart data for the elimination timeline
//!
//! The timeline spans from the end of drinking to whichever is later: full
//! elimination, or a day past the safe instant. It carries two bars (time
//! already elapsed and time still needed) and a marker for "now", all as
//! percentages of the span so any renderer can draw them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    /// Time since drinking ended
    Elapsed,
    /// Time from now until the level is safe
    UntilSafe,
}

impl SegmentKind {
    pub fn label(&self) -> &'static str {
        match self {
            SegmentKind::Elapsed => "Passed",
            SegmentKind::UntilSafe => "Time Until Safe",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSegment {
    pub kind: SegmentKind,
    pub hours: f64,
    /// Left edge, percent of the span
    pub start_pct: f64,
    /// Width, percent of the span
    pub width_pct: f64,
    /// Whether the current level is above the threshold
    pub above_threshold: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    /// Span of the chart in hours
    pub total_hours: f64,
    pub segments: Vec<TimelineSegment>,
    /// Position of "now", percent of the span, clamped to [0, 100]
    pub now_marker_pct: f64,
}

impl Timeline {
    /// Lay out the timeline
    ///
    /// Segments with no width are left out; the second segment starts where
    /// the first one ends.
    pub fn build(
        hours_since_last_drink: f64,
        hours_until_safe: f64,
        total_elimination_hours: f64,
        above_threshold: bool,
    ) -> Self {
        let total_hours = total_elimination_hours.max(hours_until_safe + 24.0);
        let pct = |h: f64| h / total_hours * 100.0;

        let mut segments = Vec::with_capacity(2);
        let mut cursor = 0.0;
        for (kind, hours) in [
            (SegmentKind::Elapsed, hours_since_last_drink),
            (SegmentKind::UntilSafe, hours_until_safe),
        ] {
            let width = pct(hours);
            if width > 0.0 {
                segments.push(TimelineSegment {
                    kind,
                    hours,
                    start_pct: cursor,
                    width_pct: width,
                    above_threshold: kind == SegmentKind::UntilSafe && above_threshold,
                });
                cursor += width;
            }
        }

        Timeline {
            total_hours,
            segments,
            now_marker_pct: pct(hours_since_last_drink).clamp(0.0, 100.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_layout_while_eliminating() {
        let t = Timeline::build(10.0, 6.0, 40.0, true);
        assert_eq!(t.total_hours, 40.0);
        assert_eq!(t.segments.len(), 2);
        assert_relative_eq!(t.segments[0].width_pct, 25.0);
        assert_relative_eq!(t.segments[1].start_pct, 25.0);
        assert_relative_eq!(t.segments[1].width_pct, 15.0);
        assert!(t.segments[1].above_threshold);
        assert!(!t.segments[0].above_threshold);
        assert_relative_eq!(t.now_marker_pct, 25.0);
    }

    #[test]
    fn test_span_extends_past_safe_instant() {
        let t = Timeline::build(2.0, 30.0, 20.0, true);
        assert_eq!(t.total_hours, 54.0);
    }

    #[test]
    fn test_empty_segments_dropped() {
        // still drinking: nothing has passed yet
        let t = Timeline::build(-1.0, 12.0, 20.0, false);
        assert_eq!(t.segments.len(), 1);
        assert_eq!(t.segments[0].kind, SegmentKind::UntilSafe);
        assert_eq!(t.segments[0].start_pct, 0.0);
        assert_eq!(t.now_marker_pct, 0.0);

        // safe and long past
        let t = Timeline::build(100.0, 0.0, 20.0, false);
        assert_eq!(t.segments.len(), 1);
        assert_eq!(t.now_marker_pct, 100.0);
    }
}
