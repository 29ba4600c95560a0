//! Calendar-aware timeline engine for story plans.
//!
//! The pipeline runs leaves first:
//! - [`calendar`]: calendar definitions and the [`CalendarRegistry`] snapshot
//! - [`timing`]: parsing legacy text and structured timings into [`ParsedTiming`]
//! - [`collect`]: walking plans and splitting regular from yearly events
//! - [`recurrence`]: expanding yearly events into anchored years
//! - [`timeline`]: grouping, sorting, stacking and left/right placement
//! - [`filter`]: tag index and year range for filter controls
//!
//! [`Timeline::build`] chains all of it. Nothing here touches the filesystem.

pub mod calendar;
pub mod collect;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod plan;
pub mod recurrence;
pub mod timeline;
pub mod timing;

pub use calendar::{CalendarDefinition, CalendarRegistry, DEFAULT_TIME_SYSTEM};
pub use collect::{CollectedEvents, TimedEvent, collect};
pub use error::{TimelineError, TimelineResult};
pub use filter::{FilterIndex, YearRange, build_filter_index, build_tag_index, year_range};
pub use pipeline::{Timeline, TimelineOptions};
pub use plan::{Plan, PlanEvent, SubArc, parse_plans};
pub use recurrence::{ExpandedEvent, expand};
pub use timeline::{MonthBucket, OrganizedTimeline, Side, StackGroup, YearGroup, organize};
pub use timing::{ParsedTiming, StructuredTiming, TimingResolver, TimingSpec};
