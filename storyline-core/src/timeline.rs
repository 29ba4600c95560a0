//! Layout of expanded events into a two-column timeline.
//!
//! Events are grouped by year, then month, sorted, and events happening at
//! the same moment are stacked into one unit. Units alternate between the
//! left and right column across the whole timeline.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calendar::CalendarDefinition;
use crate::recurrence::ExpandedEvent;

/// Column a stack is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Left,
    Right,
}

impl Side {
    pub fn flip(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Events sharing one `(month, day, hour)` moment, drawn as a single unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackGroup {
    pub side: Side,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub events: Vec<ExpandedEvent>,
}

impl StackGroup {
    pub fn is_stacked(&self) -> bool {
        self.events.len() > 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthBucket {
    /// Zero-based month, `None` for events that don't name one.
    pub month: Option<u32>,
    pub month_name: Option<String>,
    pub stacks: Vec<StackGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearGroup {
    /// Events without a year are filed under year 0.
    pub year: i32,
    pub months: Vec<MonthBucket>,
}

impl YearGroup {
    pub fn event_count(&self) -> usize {
        self.months
            .iter()
            .flat_map(|m| &m.stacks)
            .map(|s| s.events.len())
            .sum()
    }
}

/// Organizer output. `end_side` is where a continuation would start.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizedTimeline {
    pub years: Vec<YearGroup>,
    pub end_side: Side,
}

impl OrganizedTimeline {
    /// All stacks in display order.
    pub fn stacks(&self) -> impl Iterator<Item = &StackGroup> {
        self.years
            .iter()
            .flat_map(|y| &y.months)
            .flat_map(|m| &m.stacks)
    }
}

fn stack_bucket(mut events: Vec<&ExpandedEvent>) -> Vec<StackGroup> {
    events.sort_by(|a, b| {
        a.timed
            .timing
            .sort_key()
            .cmp(&b.timed.timing.sort_key())
            .then_with(|| a.title().cmp(b.title()))
    });

    events
        .chunk_by(|a, b| a.timed.timing.sort_key() == b.timed.timing.sort_key())
        .map(|chunk| {
            let (month, day, hour) = chunk[0].timed.timing.sort_key();
            StackGroup {
                side: Side::default(),
                month,
                day,
                hour,
                events: chunk.iter().map(|e| (*e).clone()).collect(),
            }
        })
        .collect()
}

/// Assign sides to every stack in order, flipping after each one.
/// Returns the side the next stack would get.
fn assign_sides<'a>(stacks: impl Iterator<Item = &'a mut StackGroup>, start: Side) -> Side {
    stacks.fold(start, |side, stack| {
        stack.side = side;
        side.flip()
    })
}

/// Group, sort, stack and assign sides.
///
/// `calendar` only supplies month names; without one buckets are unnamed.
pub fn organize(
    events: &[ExpandedEvent],
    calendar: Option<&CalendarDefinition>,
    start_side: Side,
) -> OrganizedTimeline {
    let mut by_year: BTreeMap<i32, BTreeMap<Option<u32>, Vec<&ExpandedEvent>>> = BTreeMap::new();
    for event in events {
        by_year
            .entry(event.year().unwrap_or(0))
            .or_default()
            .entry(event.timed.timing.month)
            .or_default()
            .push(event);
    }

    let mut years: Vec<YearGroup> = by_year
        .into_iter()
        .map(|(year, months)| YearGroup {
            year,
            months: months
                .into_iter()
                .map(|(month, bucket)| MonthBucket {
                    month,
                    month_name: month
                        .and_then(|m| calendar.and_then(|c| c.month_name(m)))
                        .map(str::to_string),
                    stacks: stack_bucket(bucket),
                })
                .collect(),
        })
        .collect();

    let end_side = assign_sides(
        years
            .iter_mut()
            .flat_map(|y| y.months.iter_mut())
            .flat_map(|m| m.stacks.iter_mut()),
        start_side,
    );

    OrganizedTimeline { years, end_side }
}
