//! Event timing: the two input encodings and the canonical parsed form.
//!
//! Plans written before calendars existed describe timing as free text
//! ("Day 4, Month 3, Year 300"). Newer plans carry a structured date/time
//! tied to a calendar. [`TimingResolver::parse`] turns either into a
//! [`ParsedTiming`], which is all the rest of the pipeline looks at.

pub mod display;
mod legacy;

use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarDefinition, CalendarRegistry};
use crate::error::TimelineResult;

/// Raw timing as stored on an event.
///
/// Anything carrying a well-formed `date` field is structured; a bare string
/// is legacy text. Any other shape is kept as-is so that one broken event
/// doesn't fail the whole plan file. Of those, only `{"text": "..."}` parses,
/// as legacy text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimingSpec {
    Structured(StructuredTiming),
    LegacyText(String),
    Unrecognized(serde_json::Value),
}

/// Date components. `month` is the zero-based index into the calendar's months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateParts {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub day: Option<u32>,
}

impl DateParts {
    fn is_empty(&self) -> bool {
        self.year.is_none() && self.month.is_none() && self.day.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "AM", alias = "am")]
    Am,
    #[serde(rename = "PM", alias = "pm")]
    Pm,
}

/// Time of day, either on a clock (`hour`/`minute`/`period`) or in calendar
/// divisions (`division`/`subdivision`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeParts {
    #[serde(default)]
    pub hour: Option<u32>,
    #[serde(default)]
    pub minute: Option<u32>,
    #[serde(default)]
    pub division: Option<u32>,
    #[serde(default)]
    pub subdivision: Option<u32>,
    #[serde(default)]
    pub period: Option<Period>,
}

impl TimeParts {
    /// Hour (or division index) in the calendar's own units.
    fn resolve_hour(&self, calendar: Option<&CalendarDefinition>) -> Option<u32> {
        match calendar {
            Some(c) if c.uses_division_names() => self.division.or(self.hour),
            _ => self
                .hour
                .map(|hour| match (self.period, hour) {
                    (Some(Period::Pm), h) if h < 12 => h + 12,
                    (Some(Period::Am), 12) => 0,
                    (_, h) => h,
                })
                .or(self.division),
        }
    }

    fn resolve_minute(&self, calendar: Option<&CalendarDefinition>) -> Option<u32> {
        match calendar {
            Some(c) if c.uses_division_names() => self.subdivision.or(self.minute),
            _ => self.minute.or(self.subdivision),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredTiming {
    pub date: DateParts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<TimeParts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_system_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateParts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<TimeParts>,
}

/// Canonical timing. `month` and `end_month` are zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTiming {
    pub hour: Option<u32>,
    /// Minute or subdivision, kept for display only.
    pub minute: Option<u32>,
    pub day: Option<u32>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub end_hour: Option<u32>,
    pub end_minute: Option<u32>,
    pub end_day: Option<u32>,
    pub end_month: Option<u32>,
    pub end_year: Option<i32>,
    pub has_end_date: bool,
    pub original_text: String,
}

impl ParsedTiming {
    /// True when none of the start components is known.
    pub fn is_unscheduled(&self) -> bool {
        self.hour.is_none() && self.day.is_none() && self.month.is_none() && self.year.is_none()
    }

    pub fn has_year(&self) -> bool {
        self.year.is_some()
    }

    /// Ordering key within a year; missing components count as 0.
    pub fn sort_key(&self) -> (u32, u32, u32) {
        (
            self.month.unwrap_or(0),
            self.day.unwrap_or(0),
            self.hour.unwrap_or(0),
        )
    }

    /// Render with the given calendar, or numerically without one.
    pub fn format(&self, calendar: Option<&CalendarDefinition>) -> String {
        display::format(self, calendar)
    }
}

/// Turns [`TimingSpec`]s into [`ParsedTiming`]s against a calendar snapshot.
pub struct TimingResolver<'a> {
    registry: &'a CalendarRegistry,
    selected_time_system: &'a str,
}

impl<'a> TimingResolver<'a> {
    /// `selected_time_system` is used for structured timings that don't name
    /// their own calendar.
    pub fn new(registry: &'a CalendarRegistry, selected_time_system: &'a str) -> Self {
        TimingResolver {
            registry,
            selected_time_system,
        }
    }

    pub fn registry(&self) -> &'a CalendarRegistry {
        self.registry
    }

    pub fn selected_calendar(&self) -> TimelineResult<Option<&'a CalendarDefinition>> {
        self.registry.resolve(self.selected_time_system)
    }

    /// Parse a timing.
    ///
    /// `Ok(None)` means nothing recognizable was found; the caller drops the
    /// event. `Err` only comes from a malformed calendar definition.
    pub fn parse(&self, spec: &TimingSpec) -> TimelineResult<Option<ParsedTiming>> {
        match spec {
            TimingSpec::Structured(timing) => self.parse_structured(timing),
            TimingSpec::LegacyText(text) => Ok(legacy::parse(text)),
            TimingSpec::Unrecognized(value) => Ok(value
                .get("text")
                .and_then(serde_json::Value::as_str)
                .and_then(legacy::parse)),
        }
    }

    fn parse_structured(&self, timing: &StructuredTiming) -> TimelineResult<Option<ParsedTiming>> {
        let system_id = timing
            .time_system_id
            .as_deref()
            .unwrap_or(self.selected_time_system);
        let calendar = self.registry.resolve(system_id)?;

        let time = timing.time.unwrap_or_default();
        let hour = time.resolve_hour(calendar);

        if timing.date.is_empty() && hour.is_none() {
            return Ok(None);
        }

        let minute = time.resolve_minute(calendar);
        let mut parsed = ParsedTiming {
            hour,
            minute,
            day: timing.date.day,
            month: timing.date.month,
            year: timing.date.year,
            ..ParsedTiming::default()
        };

        let start = display::Moment::new(timing.date, hour, minute);
        let mut text = display::render_moment(&start, calendar);

        if let Some(end_date) = timing.end_date {
            let end_time = timing.end_time.unwrap_or_default();
            let end_hour = end_time.resolve_hour(calendar);
            let end_minute = end_time.resolve_minute(calendar);

            parsed.end_hour = end_hour;
            parsed.end_minute = end_minute;
            parsed.end_day = end_date.day;
            parsed.end_month = end_date.month;
            parsed.end_year = end_date.year;
            parsed.has_end_date = true;

            let end = display::Moment::new(end_date, end_hour, end_minute);
            text.push_str(display::RANGE_SEPARATOR);
            text.push_str(&display::render_moment(&end, calendar));
        }

        parsed.original_text = text;
        Ok(Some(parsed))
    }
}
