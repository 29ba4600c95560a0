//! Walking plans and resolving every event's timing.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TimelineResult;
use crate::plan::{Plan, PlanEvent};
use crate::timing::{ParsedTiming, TimingResolver};

/// Joins a plan title and a sub-arc title.
pub const ARC_PATH_SEPARATOR: &str = " → ";

/// An event whose timing has been resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedEvent {
    pub event: PlanEvent,
    pub timing: ParsedTiming,
    pub arc_title: String,
    pub yearly: bool,
    pub yearly_perennial: bool,
    pub yearly_duration: u32,
}

impl TimedEvent {
    fn new(event: &PlanEvent, timing: ParsedTiming, arc_title: String) -> Self {
        TimedEvent {
            event: event.clone(),
            timing,
            arc_title,
            yearly: event.yearly,
            yearly_perennial: event.yearly_perennial,
            yearly_duration: event.yearly_duration.unwrap_or(1),
        }
    }

    pub fn title(&self) -> &str {
        &self.event.title
    }
}

/// Events split by whether they recur.
///
/// Recurring events are expanded only into years that regular events
/// anchor, so the two are kept apart until [`crate::recurrence::expand`].
#[derive(Debug, Clone, Default)]
pub struct CollectedEvents {
    pub regular: Vec<TimedEvent>,
    pub yearly: Vec<TimedEvent>,
    /// Events skipped because their timing could not be parsed.
    pub dropped: usize,
}

impl CollectedEvents {
    /// Years that have at least one regular event.
    pub fn anchored_years(&self) -> BTreeSet<i32> {
        self.regular.iter().filter_map(|e| e.timing.year).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.regular.is_empty() && self.yearly.is_empty()
    }
}

/// Resolve the timing of every event in `plans`.
///
/// Unparsable events are dropped and counted; only a malformed calendar
/// aborts the walk.
pub fn collect(plans: &[Plan], resolver: &TimingResolver<'_>) -> TimelineResult<CollectedEvents> {
    let mut collected = CollectedEvents::default();

    for plan in plans {
        for (arc_title, event) in plan.events_with_arcs() {
            let parsed = match &event.timing {
                Some(spec) => resolver.parse(spec)?,
                None => None,
            };

            let Some(timing) = parsed else {
                debug!(event = %event.title, arc = %arc_title, "dropping event without usable timing");
                collected.dropped += 1;
                continue;
            };

            let timed = TimedEvent::new(event, timing, arc_title);
            if timed.yearly {
                collected.yearly.push(timed);
            } else {
                collected.regular.push(timed);
            }
        }
    }

    debug!(
        regular = collected.regular.len(),
        yearly = collected.yearly.len(),
        dropped = collected.dropped,
        "collected events"
    );

    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarRegistry;
    use serde_json::json;

    fn plans(value: serde_json::Value) -> Vec<Plan> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_input() {
        let registry = CalendarRegistry::default();
        let resolver = TimingResolver::new(&registry, "default");

        let collected = collect(&[], &resolver).unwrap();
        assert!(collected.regular.is_empty());
        assert!(collected.yearly.is_empty());
        assert_eq!(collected.dropped, 0);
    }

    #[test]
    fn test_splits_regular_and_yearly() {
        let registry = CalendarRegistry::default();
        let resolver = TimingResolver::new(&registry, "default");
        let input = plans(json!([{
            "title": "Kingdom",
            "events": [
                { "title": "Coronation", "timing": "Day 1, Month 1, Year 10" },
                { "title": "Founders' Day", "timing": "Day 5, Month 4, Year 10", "yearly": true, "yearlyPerennial": true },
            ],
        }]));

        let collected = collect(&input, &resolver).unwrap();
        assert_eq!(collected.regular.len(), 1);
        assert_eq!(collected.yearly.len(), 1);
        assert!(collected.yearly[0].yearly_perennial);
        assert_eq!(collected.yearly[0].yearly_duration, 1);
    }

    #[test]
    fn test_drops_unparsable_and_untimed_events() {
        let registry = CalendarRegistry::default();
        let resolver = TimingResolver::new(&registry, "default");
        let input = plans(json!([{
            "title": "Kingdom",
            "events": [
                { "title": "Someday", "timing": "eventually" },
                { "title": "No timing" },
                { "title": "Battle", "timing": "Year 12" },
            ],
        }]));

        let collected = collect(&input, &resolver).unwrap();
        assert_eq!(collected.regular.len(), 1);
        assert_eq!(collected.regular[0].title(), "Battle");
        assert_eq!(collected.dropped, 2);
    }

    #[test]
    fn test_badly_shaped_timing_drops_only_that_event() {
        let registry = CalendarRegistry::default();
        let resolver = TimingResolver::new(&registry, "default");
        let input = crate::plan::parse_plans(
            r#"[{ "title": "A", "events": [
                { "title": "Good", "timing": "Year 3" },
                { "title": "No date", "timing": { "time": { "hour": 4 } } },
                { "title": "Negative month", "timing": { "date": { "year": 3, "month": -1 } } },
                { "title": "Also good", "timing": { "date": { "year": 4 } } }
            ] }]"#,
        )
        .unwrap();

        let collected = collect(&input, &resolver).unwrap();
        let titles: Vec<&str> = collected.regular.iter().map(|e| e.title()).collect();
        assert_eq!(titles, vec!["Good", "Also good"]);
        assert_eq!(collected.dropped, 2);
    }

    #[test]
    fn test_sub_arc_events_get_composite_titles() {
        let registry = CalendarRegistry::default();
        let resolver = TimingResolver::new(&registry, "default");
        let input = plans(json!([{
            "title": "Exile",
            "events": [{ "title": "Banished", "timing": "Year 3" }],
            "subArcs": [{
                "title": "Return",
                "events": [{ "title": "Landfall", "timing": { "date": { "year": 9 } } }],
            }],
        }]));

        let collected = collect(&input, &resolver).unwrap();
        let arcs: Vec<&str> = collected.regular.iter().map(|e| e.arc_title.as_str()).collect();
        assert_eq!(arcs, vec!["Exile", "Exile → Return"]);
    }

    #[test]
    fn test_anchored_years() {
        let registry = CalendarRegistry::default();
        let resolver = TimingResolver::new(&registry, "default");
        let input = plans(json!([{
            "title": "Saga",
            "events": [
                { "title": "a", "timing": "Year 15" },
                { "title": "b", "timing": "Year 10" },
                { "title": "c", "timing": "Year 10" },
                { "title": "d", "timing": "Hour 4" },
                { "title": "e", "timing": "Year 99", "yearly": true },
            ],
        }]));

        let collected = collect(&input, &resolver).unwrap();
        let years: Vec<i32> = collected.anchored_years().into_iter().collect();
        assert_eq!(years, vec![10, 15]);
    }
}
