//! Data for the tag/year filter controls.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::plan::Plan;
use crate::recurrence::ExpandedEvent;

/// Tags starting with this are hidden from the filter index.
pub const HIDDEN_TAG_PREFIX: char = '!';

pub fn is_hidden_tag(tag: &str) -> bool {
    tag.trim_start().starts_with(HIDDEN_TAG_PREFIX)
}

/// Tag name without whitespace or the hidden prefix.
fn bare_tag(tag: &str) -> &str {
    let tag = tag.trim();
    tag.strip_prefix(HIDDEN_TAG_PREFIX).unwrap_or(tag).trim()
}

/// Sorted, de-duplicated visible tags across all plans.
///
/// A name hidden anywhere (`!secret`) stays out of the index even if
/// another plan also lists it plainly.
pub fn build_tag_index(plans: &[Plan]) -> BTreeSet<String> {
    let tags = || plans.iter().flat_map(|p| &p.tags);

    let hidden: BTreeSet<&str> = tags()
        .filter(|t| is_hidden_tag(t))
        .map(|t| bare_tag(t))
        .collect();

    tags()
        .filter(|t| !is_hidden_tag(t))
        .map(|t| bare_tag(t))
        .filter(|t| !t.is_empty() && !hidden.contains(t))
        .map(str::to_string)
        .collect()
}

/// Whether `plan` carries `tag`, hidden or not.
pub fn plan_has_tag(plan: &Plan, tag: &str) -> bool {
    let wanted = bare_tag(tag);
    !wanted.is_empty() && plan.tags.iter().any(|t| bare_tag(t) == wanted)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct YearRange {
    pub min: Option<i32>,
    pub max: Option<i32>,
}

impl YearRange {
    pub fn contains(&self, year: i32) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => (min..=max).contains(&year),
            _ => false,
        }
    }
}

/// Smallest and largest year across `events`; both `None` when no event has a year.
pub fn year_range(events: &[ExpandedEvent]) -> YearRange {
    events
        .iter()
        .filter_map(ExpandedEvent::year)
        .fold(YearRange::default(), |range, year| YearRange {
            min: Some(range.min.map_or(year, |m| m.min(year))),
            max: Some(range.max.map_or(year, |m| m.max(year))),
        })
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterIndex {
    pub tags: BTreeSet<String>,
    pub year_range: YearRange,
}

pub fn build_filter_index(plans: &[Plan], events: &[ExpandedEvent]) -> FilterIndex {
    FilterIndex {
        tags: build_tag_index(plans),
        year_range: year_range(events),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::TimedEvent;
    use crate::plan::PlanEvent;
    use crate::timing::ParsedTiming;

    fn plan(tags: &[&str]) -> Plan {
        Plan {
            title: "Plan".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Plan::default()
        }
    }

    fn event_in(year: Option<i32>) -> ExpandedEvent {
        ExpandedEvent::from_regular(TimedEvent {
            event: PlanEvent::default(),
            timing: ParsedTiming {
                year,
                hour: Some(1),
                ..ParsedTiming::default()
            },
            arc_title: String::new(),
            yearly: false,
            yearly_perennial: false,
            yearly_duration: 1,
        })
    }

    #[test]
    fn test_hidden_tags_excluded() {
        let tags = build_tag_index(&[plan(&["!secret", "public"])]);
        assert_eq!(tags, BTreeSet::from(["public".to_string()]));
    }

    #[test]
    fn test_tags_trimmed_deduplicated_sorted() {
        let tags = build_tag_index(&[plan(&[" war ", "", "  "]), plan(&["love", "war"])]);
        let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
        assert_eq!(tags, vec!["love", "war"]);
    }

    #[test]
    fn test_hidden_name_suppresses_visible_copy() {
        let tags = build_tag_index(&[plan(&["twist"]), plan(&["! twist", "!"])]);
        assert!(tags.is_empty());
    }

    #[test]
    fn test_plan_has_tag_matches_hidden_tags_directly() {
        let secret = plan(&["!secret", "public"]);
        assert!(plan_has_tag(&secret, "secret"));
        assert!(plan_has_tag(&secret, "!secret"));
        assert!(plan_has_tag(&secret, "public"));
        assert!(!plan_has_tag(&secret, "private"));
        assert!(!plan_has_tag(&secret, ""));
    }

    #[test]
    fn test_year_range() {
        let events = vec![event_in(Some(12)), event_in(None), event_in(Some(-4)), event_in(Some(3))];
        let range = year_range(&events);
        assert_eq!(range, YearRange { min: Some(-4), max: Some(12) });
        assert!(range.contains(0));
        assert!(!range.contains(13));
    }

    #[test]
    fn test_year_range_without_years() {
        assert_eq!(year_range(&[]), YearRange { min: None, max: None });
        assert_eq!(year_range(&[event_in(None)]), YearRange::default());
    }
}
