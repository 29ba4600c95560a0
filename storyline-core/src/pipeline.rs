//! The full run: collect, expand, organize, index.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::{CalendarRegistry, DEFAULT_TIME_SYSTEM};
use crate::collect::collect;
use crate::error::TimelineResult;
use crate::filter::{FilterIndex, build_filter_index};
use crate::plan::Plan;
use crate::recurrence::{ExpandedEvent, expand};
use crate::timeline::{Side, StackGroup, YearGroup, organize};
use crate::timing::TimingResolver;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineOptions {
    /// Calendar for month names and for timings that don't name their own.
    pub time_system: String,
    pub start_side: Side,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        TimelineOptions {
            time_system: DEFAULT_TIME_SYSTEM.to_string(),
            start_side: Side::Left,
        }
    }
}

/// A laid-out timeline plus what the filter controls need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub time_system: String,
    pub years: Vec<YearGroup>,
    pub filter: FilterIndex,
    pub end_side: Side,
    /// Events left out because their timing couldn't be parsed.
    pub dropped: usize,
}

impl Timeline {
    /// Run the whole pipeline over `plans`.
    ///
    /// Nothing is cached between runs; call again whenever the plans change.
    pub fn build(
        plans: &[Plan],
        registry: &CalendarRegistry,
        options: &TimelineOptions,
    ) -> TimelineResult<Timeline> {
        let resolver = TimingResolver::new(registry, &options.time_system);
        let calendar = resolver.selected_calendar()?;
        if calendar.is_none() {
            debug!(time_system = %options.time_system, "selected calendar not found, using numeric months");
        }

        let collected = collect(plans, &resolver)?;
        let anchored_years = collected.anchored_years();
        let dropped = collected.dropped;

        let instances = expand(&collected.yearly, &anchored_years);
        let mut events: Vec<ExpandedEvent> = collected
            .regular
            .into_iter()
            .map(ExpandedEvent::from_regular)
            .collect();
        events.extend(instances);

        let organized = organize(&events, calendar, options.start_side);
        let filter = build_filter_index(plans, &events);

        debug!(
            events = events.len(),
            years = organized.years.len(),
            dropped,
            "built timeline"
        );

        Ok(Timeline {
            time_system: options.time_system.clone(),
            years: organized.years,
            filter,
            end_side: organized.end_side,
            dropped,
        })
    }

    /// No timed events at all; renderers show a dedicated empty state.
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn event_count(&self) -> usize {
        self.years.iter().map(YearGroup::event_count).sum()
    }

    pub fn stacks(&self) -> impl Iterator<Item = &StackGroup> {
        self.years
            .iter()
            .flat_map(|y| &y.months)
            .flat_map(|m| &m.stacks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_plans_build_empty_timeline() {
        let timeline = Timeline::build(&[], &CalendarRegistry::default(), &TimelineOptions::default())
            .unwrap();

        assert!(timeline.is_empty());
        assert_eq!(timeline.event_count(), 0);
        assert!(timeline.filter.tags.is_empty());
        assert_eq!(timeline.filter.year_range.min, None);
    }

    #[test]
    fn test_unknown_selected_calendar_still_builds() {
        let plans: Vec<Plan> = serde_json::from_value(json!([{
            "title": "A",
            "events": [{ "title": "x", "timing": "Month 2, Year 1" }],
        }]))
        .unwrap();
        let options = TimelineOptions {
            time_system: "unknown".to_string(),
            ..TimelineOptions::default()
        };

        let timeline = Timeline::build(&plans, &CalendarRegistry::default(), &options).unwrap();
        assert_eq!(timeline.event_count(), 1);
        assert_eq!(timeline.years[0].months[0].month_name, None);
    }
}
