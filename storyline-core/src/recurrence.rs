//! Expansion of yearly events into per-year instances.
//!
//! Instances are only ever placed in years that already hold a regular
//! event, so a recurring festival never stretches the timeline on its own.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::collect::TimedEvent;

/// An event ready for layout: either a regular event or one instance of a
/// yearly event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedEvent {
    #[serde(flatten)]
    pub timed: TimedEvent,
    pub is_yearly_instance: bool,
    /// Start year of the yearly event this instance was expanded from.
    pub original_year: Option<i32>,
}

impl ExpandedEvent {
    pub fn from_regular(timed: TimedEvent) -> Self {
        ExpandedEvent {
            timed,
            is_yearly_instance: false,
            original_year: None,
        }
    }

    pub fn title(&self) -> &str {
        self.timed.title()
    }

    pub fn year(&self) -> Option<i32> {
        self.timed.timing.year
    }
}

/// Last year a yearly event may appear in, or `None` when it can't appear at all.
fn upper_bound(event: &TimedEvent, start_year: i32, anchored_years: &BTreeSet<i32>) -> Option<i32> {
    if event.yearly_perennial {
        // No anchors means nothing to recur into.
        anchored_years.last().copied()
    } else {
        let span = event.yearly_duration.max(1) - 1;
        Some(start_year.saturating_add_unsigned(span))
    }
}

fn instance(event: &TimedEvent, start_year: i32, year: i32) -> ExpandedEvent {
    let mut timed = event.clone();
    timed.timing.year = Some(year);
    // Keeps the span; an end that would leave the i32 range is dropped.
    timed.timing.end_year = timed.timing.end_year.and_then(|end| {
        let shifted = i64::from(end) + i64::from(year) - i64::from(start_year);
        i32::try_from(shifted).ok()
    });

    ExpandedEvent {
        timed,
        is_yearly_instance: true,
        original_year: Some(start_year),
    }
}

/// Expand every yearly event into the anchored years it covers.
///
/// An event starting in `Y0` appears in each anchored year `Y` with
/// `Y0 <= Y <= upper`, where `upper` is the last anchored year for perennial
/// events and `Y0 + duration - 1` otherwise. Events without a year never recur.
pub fn expand(yearly: &[TimedEvent], anchored_years: &BTreeSet<i32>) -> Vec<ExpandedEvent> {
    let mut expanded = Vec::new();

    for event in yearly {
        let Some(start_year) = event.timing.year else {
            trace!(event = %event.title(), "yearly event without a year, skipping");
            continue;
        };
        let Some(upper) = upper_bound(event, start_year, anchored_years) else {
            continue;
        };
        if upper < start_year {
            continue;
        }

        let before = expanded.len();
        expanded.extend(
            anchored_years
                .range(start_year..=upper)
                .map(|&year| instance(event, start_year, year)),
        );
        trace!(
            event = %event.title(),
            instances = expanded.len() - before,
            "expanded yearly event"
        );
    }

    expanded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PlanEvent;
    use crate::timing::ParsedTiming;

    fn yearly_event(year: i32, perennial: bool, duration: u32) -> TimedEvent {
        TimedEvent {
            event: PlanEvent {
                title: "Harvest".to_string(),
                yearly: true,
                ..PlanEvent::default()
            },
            timing: ParsedTiming {
                year: Some(year),
                month: Some(8),
                ..ParsedTiming::default()
            },
            arc_title: "Village".to_string(),
            yearly: true,
            yearly_perennial: perennial,
            yearly_duration: duration,
        }
    }

    fn years(events: &[ExpandedEvent]) -> Vec<i32> {
        events.iter().filter_map(|e| e.year()).collect()
    }

    #[test]
    fn test_perennial_bounded_by_anchored_years() {
        let anchored = BTreeSet::from([10, 11, 15]);
        let expanded = expand(&[yearly_event(10, true, 1)], &anchored);

        assert_eq!(years(&expanded), vec![10, 11, 15]);
        assert!(expanded.iter().all(|e| e.is_yearly_instance));
        assert!(expanded.iter().all(|e| e.original_year == Some(10)));
    }

    #[test]
    fn test_perennial_never_precedes_start_year() {
        let anchored = BTreeSet::from([8, 9, 12]);
        let expanded = expand(&[yearly_event(10, true, 1)], &anchored);

        assert_eq!(years(&expanded), vec![12]);
    }

    #[test]
    fn test_duration_limits_expansion() {
        let anchored: BTreeSet<i32> = (9..=13).collect();
        let expanded = expand(&[yearly_event(10, false, 3)], &anchored);

        assert_eq!(years(&expanded), vec![10, 11, 12]);
    }

    #[test]
    fn test_default_duration_is_start_year_only() {
        let anchored: BTreeSet<i32> = (9..=13).collect();
        assert_eq!(years(&expand(&[yearly_event(10, false, 1)], &anchored)), vec![10]);
        assert_eq!(years(&expand(&[yearly_event(10, false, 0)], &anchored)), vec![10]);
    }

    #[test]
    fn test_start_year_must_be_anchored() {
        let anchored = BTreeSet::from([11]);
        assert!(expand(&[yearly_event(10, false, 1)], &anchored).is_empty());
    }

    #[test]
    fn test_perennial_without_anchors_yields_nothing() {
        let expanded = expand(&[yearly_event(10, true, 1)], &BTreeSet::new());
        assert!(expanded.is_empty());
    }

    #[test]
    fn test_end_year_shifts_with_instance() {
        let mut event = yearly_event(10, true, 1);
        event.timing.end_year = Some(11);
        event.timing.has_end_date = true;

        let expanded = expand(&[event], &BTreeSet::from([10, 20]));
        assert_eq!(expanded[1].timed.timing.end_year, Some(21));
    }

    #[test]
    fn test_years_near_the_limits() {
        let mut event = yearly_event(i32::MIN, true, 1);
        event.timing.end_year = Some(0);
        event.timing.has_end_date = true;

        let expanded = expand(&[event], &BTreeSet::from([i32::MIN, i32::MAX]));
        assert_eq!(years(&expanded), vec![i32::MIN, i32::MAX]);
        assert_eq!(expanded[0].timed.timing.end_year, Some(0));
        assert_eq!(expanded[1].timed.timing.end_year, None);

        let long = expand(&[yearly_event(i32::MAX, false, 5)], &BTreeSet::from([i32::MAX]));
        assert_eq!(years(&long), vec![i32::MAX]);
    }

    #[test]
    fn test_yearly_event_without_year_is_skipped() {
        let mut event = yearly_event(10, true, 1);
        event.timing.year = None;

        assert!(expand(&[event], &BTreeSet::from([10])).is_empty());
    }
}
