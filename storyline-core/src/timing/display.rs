//! Rendering timings as display text.
//!
//! Date templates (`settings.dateFormat`) understand these placeholders:
//!
//! | placeholder  | value                                     |
//! |--------------|-------------------------------------------|
//! | `{day}`      | day of month                              |
//! | `{month}`    | month name                                |
//! | `{monthNum}` | one-based month number                    |
//! | `{year}`     | raw year                                  |
//! | `{eraYear}`  | year counted within its era               |
//! | `{era}`      | era abbreviation                          |
//! | `{weekday}`  | weekday name, empty without weekdays      |
//!
//! The template only applies to complete dates; partial dates list whatever
//! parts are known. Without a calendar everything is rendered numerically.

use crate::calendar::{CalendarDate, CalendarDefinition, TimeFormat};

use super::{DateParts, ParsedTiming};

pub const RANGE_SEPARATOR: &str = " → ";

/// One end of a timing, with the minute kept for display only.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Moment {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
}

impl Moment {
    pub(crate) fn new(date: DateParts, hour: Option<u32>, minute: Option<u32>) -> Self {
        Moment {
            year: date.year,
            month: date.month,
            day: date.day,
            hour,
            minute,
        }
    }

    fn start_of(parsed: &ParsedTiming) -> Self {
        Moment {
            year: parsed.year,
            month: parsed.month,
            day: parsed.day,
            hour: parsed.hour,
            minute: parsed.minute,
        }
    }

    fn end_of(parsed: &ParsedTiming) -> Self {
        Moment {
            year: parsed.end_year,
            month: parsed.end_month,
            day: parsed.end_day,
            hour: parsed.end_hour,
            minute: parsed.end_minute,
        }
    }
}

/// Render a parsed timing, including its end when it has one.
pub fn format(parsed: &ParsedTiming, calendar: Option<&CalendarDefinition>) -> String {
    let mut text = render_moment(&Moment::start_of(parsed), calendar);
    if parsed.has_end_date {
        text.push_str(RANGE_SEPARATOR);
        text.push_str(&render_moment(&Moment::end_of(parsed), calendar));
    }
    text
}

pub(crate) fn render_moment(moment: &Moment, calendar: Option<&CalendarDefinition>) -> String {
    let Some(calendar) = calendar else {
        return render_numeric(moment);
    };

    let date = render_date(moment, calendar);
    let time = render_time(moment, calendar);

    match (date.is_empty(), time.is_empty()) {
        (false, false) => format!("{date}, {time}"),
        (false, true) => date,
        (true, _) => time,
    }
}

fn render_numeric(moment: &Moment) -> String {
    let mut parts = Vec::new();
    if let Some(day) = moment.day {
        parts.push(format!("Day {day}"));
    }
    if let Some(month) = moment.month {
        parts.push(format!("Month {}", month.saturating_add(1)));
    }
    if let Some(year) = moment.year {
        parts.push(format!("Year {year}"));
    }
    if let Some(hour) = moment.hour {
        parts.push(format!("Hour {hour}"));
    }
    if let Some(minute) = moment.minute.filter(|m| *m > 0) {
        parts.push(format!("Minute {minute}"));
    }
    parts.join(", ")
}

fn month_label(calendar: &CalendarDefinition, month: u32) -> String {
    calendar
        .month_name(month)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Month {}", month.saturating_add(1)))
}

fn year_label(calendar: &CalendarDefinition, year: i32) -> (String, String) {
    match calendar.era_year(year) {
        Some((counted, era)) => (counted.to_string(), era.abbreviation.clone()),
        None => (year.to_string(), String::new()),
    }
}

fn render_date(moment: &Moment, calendar: &CalendarDefinition) -> String {
    if let (Some(year), Some(month), Some(day)) = (moment.year, moment.month, moment.day) {
        let (era_year, era) = year_label(calendar, year);
        let weekday = calendar
            .weekday_for(&CalendarDate { year, month, day })
            .unwrap_or_default();

        let text = calendar
            .settings
            .date_format
            .replace("{day}", &day.to_string())
            .replace("{monthNum}", &month.saturating_add(1).to_string())
            .replace("{month}", &month_label(calendar, month))
            .replace("{eraYear}", &era_year)
            .replace("{era}", &era)
            .replace("{year}", &year.to_string())
            .replace("{weekday}", weekday);
        return tidy(&text);
    }

    let mut parts = Vec::new();
    if let Some(day) = moment.day {
        parts.push(day.to_string());
    }
    if let Some(month) = moment.month {
        parts.push(month_label(calendar, month));
    }
    if let Some(year) = moment.year {
        match year_label(calendar, year) {
            (counted, era) if era.is_empty() => parts.push(counted),
            (counted, era) => parts.push(format!("{counted} {era}")),
        }
    }
    parts.join(" ")
}

fn render_time(moment: &Moment, calendar: &CalendarDefinition) -> String {
    let Some(hour) = moment.hour else {
        return String::new();
    };
    let minute = moment.minute.unwrap_or(0);

    if calendar.uses_division_names() || calendar.settings.time_format == TimeFormat::Divisions {
        let name = calendar
            .division_name(hour)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Division {}", hour.saturating_add(1)));
        return if minute > 0 {
            format!(
                "{name}, {minute} {}",
                calendar.time_divisions.subdivision_name
            )
        } else {
            name
        };
    }

    match calendar.settings.time_format {
        TimeFormat::TwelveHour => {
            let suffix = if hour % 24 < 12 { "AM" } else { "PM" };
            let clock = match hour % 12 {
                0 => 12,
                h => h,
            };
            format!("{clock}:{minute:02} {suffix}")
        }
        _ => format!("{hour:02}:{minute:02}"),
    }
}

/// Collapse gaps left by empty placeholders.
fn tidy(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(" ,", ",")
        .trim_matches(|c: char| c == ',' || c.is_whitespace())
        .to_string()
}
