//! Calendar definitions for fictional and real-world time systems.
//!
//! A [`CalendarDefinition`] describes how a world counts time: its months,
//! weekdays, eras, seasons, moon cycle and how a day is divided. Definitions
//! are plain data; the [`registry`] hands out read-only snapshots of them.

pub mod presets;
pub mod registry;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{TimelineError, TimelineResult};

pub use registry::{CalendarRegistry, DEFAULT_TIME_SYSTEM};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarType {
    #[default]
    Solar,
    Lunisolar,
    Custom,
}

/// A month and how many days it has.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Month {
    pub name: String,
    pub day_count: u32,
}

/// A day within the year. `month` is zero-based, `day` is one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

/// A fully specified date. `month` is zero-based, `day` is one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// A holiday or otherwise notable day that repeats every year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedDay {
    pub name: String,
    pub date: MonthDay,
}

/// How a day is split up. A Gregorian day is 24 divisions of 60 minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeDivisions {
    pub divisions_per_day: u32,
    pub minutes_per_division: u32,
    #[serde(default = "default_subdivision_name")]
    pub subdivision_name: String,
    #[serde(default)]
    pub use_division_names: bool,
    #[serde(default)]
    pub division_names: Vec<String>,
}

fn default_subdivision_name() -> String {
    "minutes".to_string()
}

impl Default for TimeDivisions {
    fn default() -> Self {
        TimeDivisions {
            divisions_per_day: 24,
            minutes_per_division: 60,
            subdivision_name: default_subdivision_name(),
            use_division_names: false,
            division_names: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Era {
    pub name: String,
    pub abbreviation: String,
    pub start_date: CalendarDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<CalendarDate>,
    /// Years count down towards the end of the era (e.g. BCE).
    #[serde(default)]
    pub is_backward: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub name: String,
    pub start_date: MonthDay,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoonPhases {
    #[serde(default)]
    pub enabled: bool,
    /// Days from one new moon to the next.
    pub cycle_length: f64,
    pub epoch_new_moon: CalendarDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeFormat {
    #[serde(rename = "12h")]
    TwelveHour,
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
    #[serde(rename = "divisions")]
    Divisions,
}

/// Display settings.
///
/// `date_format` is a template; see [`crate::timing::format`] for placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarSettings {
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub time_format: TimeFormat,
}

fn default_date_format() -> String {
    "{day} {month} {year}".to_string()
}

impl Default for CalendarSettings {
    fn default() -> Self {
        CalendarSettings {
            date_format: default_date_format(),
            time_format: TimeFormat::default(),
        }
    }
}

/// A complete calendar.
///
/// Built-in definitions are never edited in place; call
/// [`CalendarDefinition::customize`] to get an editable copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_built_in: bool,
    #[serde(default)]
    pub calendar_type: CalendarType,
    pub months: Vec<Month>,
    #[serde(default)]
    pub weekdays: Vec<String>,
    #[serde(default)]
    pub named_days: Vec<NamedDay>,
    #[serde(default)]
    pub time_divisions: TimeDivisions,
    #[serde(default)]
    pub eras: Vec<Era>,
    #[serde(default)]
    pub seasons: Vec<Season>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moon_phases: Option<MoonPhases>,
    #[serde(default)]
    pub settings: CalendarSettings,
}

/// The eight conventional phases of a moon cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoonPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    const ALL: [MoonPhase; 8] = [
        MoonPhase::NewMoon,
        MoonPhase::WaxingCrescent,
        MoonPhase::FirstQuarter,
        MoonPhase::WaxingGibbous,
        MoonPhase::FullMoon,
        MoonPhase::WaningGibbous,
        MoonPhase::LastQuarter,
        MoonPhase::WaningCrescent,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::FullMoon => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl CalendarDefinition {
    /// Check the structural invariants everything downstream indexes on.
    pub fn validate(&self) -> TimelineResult<()> {
        let malformed = |reason: String| TimelineError::MalformedCalendar {
            id: self.id.clone(),
            reason,
        };

        if self.months.is_empty() {
            return Err(malformed("calendar has no months".into()));
        }
        if let Some(month) = self.months.iter().find(|m| m.day_count == 0) {
            return Err(malformed(format!("month '{}' has no days", month.name)));
        }
        if self.time_divisions.divisions_per_day == 0 {
            return Err(malformed("a day must have at least one division".into()));
        }
        if let Some(moon) = &self.moon_phases {
            if moon.enabled && moon.cycle_length <= 0.0 {
                return Err(malformed("moon cycle length must be positive".into()));
            }
        }

        Ok(())
    }

    /// Editable deep copy with a fresh id. Built-ins are only ever edited this way.
    pub fn customize(&self) -> CalendarDefinition {
        let mut copy = self.clone();
        copy.id = format!("custom-{}", Uuid::new_v4());
        copy.name = format!("{} (custom)", self.name);
        copy.is_built_in = false;
        copy.calendar_type = CalendarType::Custom;
        copy
    }

    pub fn month_name(&self, month: u32) -> Option<&str> {
        self.months.get(month as usize).map(|m| m.name.as_str())
    }

    pub fn days_in_year(&self) -> u32 {
        self.months.iter().map(|m| m.day_count).sum()
    }

    /// Zero-based ordinal of a day within its year.
    pub fn day_of_year(&self, month: u32, day: u32) -> Option<u32> {
        let current = self.months.get(month as usize)?;
        if day == 0 || day > current.day_count {
            return None;
        }
        let preceding: u32 = self.months[..month as usize]
            .iter()
            .map(|m| m.day_count)
            .sum();
        Some(preceding + day - 1)
    }

    /// Days elapsed since day 1 of month 0 of year 0.
    fn absolute_day(&self, date: &CalendarDate) -> Option<i64> {
        let ordinal = self.day_of_year(date.month, date.day)?;
        Some(date.year as i64 * self.days_in_year() as i64 + ordinal as i64)
    }

    /// Weekdays run in an unbroken cycle starting on year 0's first day.
    pub fn weekday_for(&self, date: &CalendarDate) -> Option<&str> {
        if self.weekdays.is_empty() {
            return None;
        }
        let day = self.absolute_day(date)?;
        let index = day.rem_euclid(self.weekdays.len() as i64) as usize;
        Some(self.weekdays[index].as_str())
    }

    pub fn era_for_year(&self, year: i32) -> Option<&Era> {
        self.eras.iter().rev().find(|era| {
            era.start_date.year <= year && era.end_date.is_none_or(|end| year <= end.year)
        })
    }

    /// Year number as counted within its era, plus the era itself.
    pub fn era_year(&self, year: i32) -> Option<(i32, &Era)> {
        let era = self.era_for_year(year)?;
        let counted = if era.is_backward {
            let anchor = era.end_date.unwrap_or(era.start_date).year;
            anchor - year + 1
        } else {
            year - era.start_date.year + 1
        };
        Some((counted, era))
    }

    /// Seasons wrap around the year: a date before the earliest season start
    /// belongs to the last season of the previous year.
    pub fn season_for(&self, month: u32, day: u32) -> Option<&Season> {
        let date = MonthDay { month, day };
        self.seasons
            .iter()
            .filter(|s| s.start_date <= date)
            .max_by_key(|s| s.start_date)
            .or_else(|| self.seasons.iter().max_by_key(|s| s.start_date))
    }

    pub fn moon_phase(&self, date: &CalendarDate) -> Option<MoonPhase> {
        let moon = self.moon_phases.as_ref().filter(|m| m.enabled)?;
        if moon.cycle_length <= 0.0 {
            return None;
        }
        let elapsed = (self.absolute_day(date)? - self.absolute_day(&moon.epoch_new_moon)?) as f64;
        let age = elapsed.rem_euclid(moon.cycle_length);
        let slot = ((age / moon.cycle_length) * 8.0).round() as usize % 8;
        Some(MoonPhase::ALL[slot])
    }

    pub fn named_day(&self, month: u32, day: u32) -> Option<&NamedDay> {
        self.named_days
            .iter()
            .find(|n| n.date.month == month && n.date.day == day)
    }

    pub fn division_name(&self, division: u32) -> Option<&str> {
        self.time_divisions
            .division_names
            .get(division as usize)
            .map(String::as_str)
    }

    pub fn uses_division_names(&self) -> bool {
        self.time_divisions.use_division_names && !self.time_divisions.division_names.is_empty()
    }
}

impl fmt::Display for CalendarDefinition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::presets;

    fn gregorian() -> CalendarDefinition {
        presets::default_calendar()
    }

    #[test]
    fn test_validate_rejects_empty_months() {
        let mut calendar = gregorian();
        calendar.months.clear();

        let err = calendar.validate().unwrap_err();
        assert!(matches!(err, TimelineError::MalformedCalendar { .. }));
    }

    #[test]
    fn test_validate_rejects_zero_day_month() {
        let mut calendar = gregorian();
        calendar.months[3].day_count = 0;

        assert!(calendar.validate().is_err());
    }

    #[test]
    fn test_customize_is_a_detached_copy() {
        let builtin = gregorian();
        let mut copy = builtin.customize();
        copy.months[0].name = "Frostmonth".to_string();

        assert!(copy.id.starts_with("custom-"));
        assert!(!copy.is_built_in);
        assert_eq!(builtin.months[0].name, "January");
        assert_ne!(builtin.customize().id, builtin.customize().id);
    }

    #[test]
    fn test_day_of_year() {
        let calendar = gregorian();
        assert_eq!(calendar.day_of_year(0, 1), Some(0));
        assert_eq!(calendar.day_of_year(1, 1), Some(31));
        assert_eq!(calendar.day_of_year(11, 31), Some(364));
        assert_eq!(calendar.day_of_year(1, 30), None);
        assert_eq!(calendar.day_of_year(12, 1), None);
        assert_eq!(calendar.days_in_year(), 365);
    }

    #[test]
    fn test_weekday_cycle_is_continuous_across_years() {
        let calendar = gregorian();
        let last = CalendarDate { year: 4, month: 11, day: 31 };
        let first = CalendarDate { year: 5, month: 0, day: 1 };

        let last_index = calendar
            .weekdays
            .iter()
            .position(|w| Some(w.as_str()) == calendar.weekday_for(&last))
            .unwrap();
        let first_index = calendar
            .weekdays
            .iter()
            .position(|w| Some(w.as_str()) == calendar.weekday_for(&first))
            .unwrap();

        assert_eq!((last_index + 1) % 7, first_index);
    }

    #[test]
    fn test_era_year_counts_forward_and_backward() {
        let calendar = gregorian();

        let (year, era) = calendar.era_year(300).unwrap();
        assert_eq!((year, era.abbreviation.as_str()), (300, "CE"));

        let (year, era) = calendar.era_year(0).unwrap();
        assert_eq!((year, era.abbreviation.as_str()), (1, "BCE"));

        let (year, _) = calendar.era_year(-43).unwrap();
        assert_eq!(year, 44);
    }

    #[test]
    fn test_season_wraps_around_year_end() {
        let calendar = gregorian();
        assert_eq!(calendar.season_for(6, 1).unwrap().name, "Summer");
        // Early January is still the winter that started in December.
        assert_eq!(calendar.season_for(0, 5).unwrap().name, "Winter");
    }

    #[test]
    fn test_moon_phase_cycles_from_epoch() {
        let calendar = presets::lunisolar_calendar();
        let epoch = calendar.moon_phases.as_ref().unwrap().epoch_new_moon;

        assert_eq!(calendar.moon_phase(&epoch), Some(MoonPhase::NewMoon));

        let mid_cycle = CalendarDate { day: epoch.day + 15, ..epoch };
        assert_eq!(calendar.moon_phase(&mid_cycle), Some(MoonPhase::FullMoon));

        assert_eq!(gregorian().moon_phase(&epoch), None);
    }

    #[test]
    fn test_named_day_and_division_lookup() {
        let calendar = presets::lunisolar_calendar();
        assert_eq!(calendar.named_day(0, 1).unwrap().name, "Lantern Dawn");
        assert_eq!(calendar.division_name(0), Some("Rat"));
        assert!(calendar.uses_division_names());
        assert!(!gregorian().uses_division_names());
    }

    #[test]
    fn test_deserializes_from_camel_case_toml() {
        let source = r#"
            id = "shire"
            name = "Shire Reckoning"
            weekdays = ["Sterday", "Sunday"]

            [[months]]
            name = "Afteryule"
            dayCount = 30

            [[months]]
            name = "Solmath"
            dayCount = 30

            [timeDivisions]
            divisionsPerDay = 24
            minutesPerDivision = 60

            [settings]
            dateFormat = "{day} {month} S.R. {year}"
            timeFormat = "12h"
        "#;

        let calendar: CalendarDefinition = toml::from_str(source).unwrap();
        assert_eq!(calendar.months.len(), 2);
        assert_eq!(calendar.months[1].day_count, 30);
        assert_eq!(calendar.settings.time_format, TimeFormat::TwelveHour);
        assert_eq!(calendar.calendar_type, CalendarType::Solar);
        assert!(!calendar.is_built_in);
        assert!(calendar.validate().is_ok());
    }
}
