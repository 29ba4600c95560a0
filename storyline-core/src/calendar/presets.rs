//! Built-in calendars.

use std::sync::OnceLock;

use super::{
    CalendarDate, CalendarDefinition, CalendarSettings, CalendarType, Era, Month, MonthDay,
    MoonPhases, NamedDay, Season, TimeDivisions, TimeFormat,
};

pub const LUNISOLAR_ID: &str = "preset-lunisolar";
pub const TIDAL_ID: &str = "preset-tidal";

/// All built-in calendars, built once and shared read-only.
pub fn builtins() -> &'static [CalendarDefinition] {
    static BUILTINS: OnceLock<Vec<CalendarDefinition>> = OnceLock::new();
    BUILTINS.get_or_init(|| vec![default_calendar(), lunisolar_calendar(), tidal_calendar()])
}

fn months(spec: &[(&str, u32)]) -> Vec<Month> {
    spec.iter()
        .map(|(name, day_count)| Month {
            name: name.to_string(),
            day_count: *day_count,
        })
        .collect()
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn season(name: &str, month: u32, day: u32, color: &str) -> Season {
    Season {
        name: name.to_string(),
        start_date: MonthDay { month, day },
        color: color.to_string(),
    }
}

/// Gregorian-shaped solar calendar without leap years.
pub fn default_calendar() -> CalendarDefinition {
    CalendarDefinition {
        id: super::DEFAULT_TIME_SYSTEM.to_string(),
        name: "Standard Calendar".to_string(),
        is_built_in: true,
        calendar_type: CalendarType::Solar,
        months: months(&[
            ("January", 31),
            ("February", 28),
            ("March", 31),
            ("April", 30),
            ("May", 31),
            ("June", 30),
            ("July", 31),
            ("August", 31),
            ("September", 30),
            ("October", 31),
            ("November", 30),
            ("December", 31),
        ]),
        weekdays: names(&[
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
            "Sunday",
        ]),
        named_days: vec![
            NamedDay {
                name: "New Year's Day".to_string(),
                date: MonthDay { month: 0, day: 1 },
            },
            NamedDay {
                name: "Midsummer".to_string(),
                date: MonthDay { month: 5, day: 21 },
            },
        ],
        time_divisions: TimeDivisions::default(),
        eras: vec![
            Era {
                name: "Before Common Era".to_string(),
                abbreviation: "BCE".to_string(),
                start_date: CalendarDate { year: -9999, month: 0, day: 1 },
                end_date: Some(CalendarDate { year: 0, month: 11, day: 31 }),
                is_backward: true,
            },
            Era {
                name: "Common Era".to_string(),
                abbreviation: "CE".to_string(),
                start_date: CalendarDate { year: 1, month: 0, day: 1 },
                end_date: None,
                is_backward: false,
            },
        ],
        seasons: vec![
            season("Spring", 2, 20, "#7cb342"),
            season("Summer", 5, 21, "#fdd835"),
            season("Autumn", 8, 22, "#fb8c00"),
            season("Winter", 11, 21, "#4fc3f7"),
        ],
        moon_phases: None,
        settings: CalendarSettings {
            date_format: "{month} {day}, {eraYear} {era}".to_string(),
            time_format: TimeFormat::TwelveHour,
        },
    }
}

/// Thirteen lunar months with the day split into twelve named double-hours.
pub fn lunisolar_calendar() -> CalendarDefinition {
    CalendarDefinition {
        id: LUNISOLAR_ID.to_string(),
        name: "Lunisolar Calendar".to_string(),
        is_built_in: true,
        calendar_type: CalendarType::Lunisolar,
        months: months(&[
            ("First Moon", 30),
            ("Second Moon", 29),
            ("Third Moon", 30),
            ("Fourth Moon", 29),
            ("Fifth Moon", 30),
            ("Sixth Moon", 29),
            ("Seventh Moon", 30),
            ("Eighth Moon", 29),
            ("Ninth Moon", 30),
            ("Tenth Moon", 29),
            ("Eleventh Moon", 30),
            ("Twelfth Moon", 29),
            ("Leap Moon", 30),
        ]),
        weekdays: Vec::new(),
        named_days: vec![
            NamedDay {
                name: "Lantern Dawn".to_string(),
                date: MonthDay { month: 0, day: 1 },
            },
            NamedDay {
                name: "Harvest Moon".to_string(),
                date: MonthDay { month: 7, day: 15 },
            },
        ],
        time_divisions: TimeDivisions {
            divisions_per_day: 12,
            minutes_per_division: 120,
            subdivision_name: "ke".to_string(),
            use_division_names: true,
            division_names: names(&[
                "Rat", "Ox", "Tiger", "Rabbit", "Dragon", "Snake", "Horse", "Goat", "Monkey",
                "Rooster", "Dog", "Pig",
            ]),
        },
        eras: vec![Era {
            name: "Reign of the Jade Throne".to_string(),
            abbreviation: "JT".to_string(),
            start_date: CalendarDate { year: 1, month: 0, day: 1 },
            end_date: None,
            is_backward: false,
        }],
        seasons: vec![
            season("Spring", 0, 1, "#81c784"),
            season("Summer", 3, 1, "#ffb74d"),
            season("Autumn", 6, 1, "#e57373"),
            season("Winter", 9, 1, "#90caf9"),
        ],
        moon_phases: Some(MoonPhases {
            enabled: true,
            cycle_length: 29.5,
            epoch_new_moon: CalendarDate { year: 0, month: 0, day: 1 },
        }),
        settings: CalendarSettings {
            date_format: "Day {day} of the {month}, Year {eraYear} {era}".to_string(),
            time_format: TimeFormat::Divisions,
        },
    }
}

/// Coastal reckoning: eight forty-five day tides, the day kept in eight watches.
pub fn tidal_calendar() -> CalendarDefinition {
    CalendarDefinition {
        id: TIDAL_ID.to_string(),
        name: "Tidal Reckoning".to_string(),
        is_built_in: true,
        calendar_type: CalendarType::Custom,
        months: months(&[
            ("Ebbing", 45),
            ("Slack", 45),
            ("Flooding", 45),
            ("Highwater", 45),
            ("Turning", 45),
            ("Neap", 45),
            ("Spring Tide", 45),
            ("Stillwater", 45),
        ]),
        weekdays: names(&["Anchor", "Sail", "Net", "Gull", "Harbor"]),
        named_days: Vec::new(),
        time_divisions: TimeDivisions {
            divisions_per_day: 8,
            minutes_per_division: 180,
            subdivision_name: "bells".to_string(),
            use_division_names: true,
            division_names: names(&[
                "Deep Watch",
                "Dawn Watch",
                "Morning Watch",
                "Forenoon Watch",
                "Afternoon Watch",
                "Dog Watch",
                "First Watch",
                "Middle Watch",
            ]),
        },
        eras: vec![
            Era {
                name: "Before the Flood".to_string(),
                abbreviation: "BF".to_string(),
                start_date: CalendarDate { year: -5000, month: 0, day: 1 },
                end_date: Some(CalendarDate { year: 0, month: 7, day: 45 }),
                is_backward: true,
            },
            Era {
                name: "After the Flood".to_string(),
                abbreviation: "AF".to_string(),
                start_date: CalendarDate { year: 1, month: 0, day: 1 },
                end_date: None,
                is_backward: false,
            },
        ],
        seasons: vec![
            season("Calm", 0, 1, "#b3e5fc"),
            season("Storm", 4, 1, "#546e7a"),
        ],
        moon_phases: Some(MoonPhases {
            enabled: true,
            cycle_length: 30.0,
            epoch_new_moon: CalendarDate { year: 1, month: 0, day: 1 },
        }),
        settings: CalendarSettings {
            date_format: "{weekday}, {day} {month} {eraYear} {era}".to_string(),
            time_format: TimeFormat::Divisions,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_are_valid_and_flagged() {
        for calendar in builtins() {
            assert!(calendar.validate().is_ok(), "{} should be valid", calendar.id);
            assert!(calendar.is_built_in);
        }
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        let mut ids: Vec<_> = builtins().iter().map(|c| c.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), builtins().len());
    }

    #[test]
    fn test_division_names_cover_the_day() {
        for calendar in builtins().iter().filter(|c| c.uses_division_names()) {
            assert_eq!(
                calendar.time_divisions.division_names.len() as u32,
                calendar.time_divisions.divisions_per_day
            );
        }
    }
}
