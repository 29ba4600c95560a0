//! Terminal rendering for timelines.
//!
//! Extension traits that add colored two-column output to storyline-core
//! types using owo_colors.

use owo_colors::OwoColorize;
use storyline_core::calendar::CalendarDefinition;
use storyline_core::{ExpandedEvent, FilterIndex, MonthBucket, Side, StackGroup, Timeline, YearGroup};

/// Column where right-hand entries start.
const RIGHT_COLUMN: usize = 44;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self, calendar: Option<&CalendarDefinition>) -> String;
}

/// Heading for a stack. Regular events show their timing as written;
/// yearly instances are re-rendered since their year has moved.
fn when(event: &ExpandedEvent, calendar: Option<&CalendarDefinition>) -> String {
    let timing = &event.timed.timing;
    if event.is_yearly_instance || timing.original_text.is_empty() {
        timing.format(calendar)
    } else {
        timing.original_text.clone()
    }
}

fn render_event(event: &ExpandedEvent) -> String {
    let mut line = event.title().bold().to_string();
    if event.is_yearly_instance {
        line.push_str(&format!(" {}", "↻".cyan()));
    }
    line.push_str(&format!(" {}", format!("({})", event.timed.arc_title).dimmed()));
    line
}

impl Render for StackGroup {
    fn render(&self, calendar: Option<&CalendarDefinition>) -> String {
        let when = self
            .events
            .first()
            .map(|e| when(e, calendar))
            .unwrap_or_default();

        let mut lines = vec![when.yellow().to_string()];
        lines.extend(self.events.iter().map(render_event));

        let (marker, indent) = match self.side {
            Side::Left => ("◀", String::new()),
            Side::Right => ("▶", " ".repeat(RIGHT_COLUMN)),
        };

        lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                if i == 0 {
                    format!("{indent}{} {line}", marker.green())
                } else {
                    format!("{indent}  {line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Render for MonthBucket {
    fn render(&self, calendar: Option<&CalendarDefinition>) -> String {
        let heading = match (&self.month_name, self.month) {
            (Some(name), _) => name.clone(),
            (None, Some(month)) => format!("Month {}", month + 1),
            (None, None) => "Sometime this year".to_string(),
        };

        let mut lines = vec![format!("  {}", heading.underline())];
        lines.extend(self.stacks.iter().map(|s| s.render(calendar)));
        lines.join("\n")
    }
}

impl Render for YearGroup {
    fn render(&self, calendar: Option<&CalendarDefinition>) -> String {
        let label = match calendar.and_then(|c| c.era_year(self.year)) {
            Some((counted, era)) => format!("Year {} ({counted} {})", self.year, era.abbreviation),
            None => format!("Year {}", self.year),
        };

        let mut lines = vec![format!("══ {} ══", label).bold().to_string()];
        lines.extend(self.months.iter().map(|m| m.render(calendar)));
        lines.join("\n")
    }
}

impl Render for Timeline {
    fn render(&self, calendar: Option<&CalendarDefinition>) -> String {
        if self.is_empty() {
            return "No timed events".dimmed().to_string();
        }

        let mut sections: Vec<String> = self.years.iter().map(|y| y.render(calendar)).collect();

        let mut summary = format!(
            "{} events in {} years",
            self.event_count(),
            self.years.len()
        );
        if self.dropped > 0 {
            summary.push_str(&format!(", {} without usable timing", self.dropped));
        }
        sections.push(summary.dimmed().to_string());

        sections.join("\n\n")
    }
}

/// Plain listing of the filter index.
pub fn render_filter_index(index: &FilterIndex) -> String {
    let mut lines = vec!["Tags".bold().to_string()];
    if index.tags.is_empty() {
        lines.push(format!("  {}", "(none)".dimmed()));
    }
    lines.extend(index.tags.iter().map(|t| format!("  {t}")));

    lines.push(String::new());
    lines.push("Years".bold().to_string());
    match (index.year_range.min, index.year_range.max) {
        (Some(min), Some(max)) => lines.push(format!("  {min} – {max}")),
        _ => lines.push(format!("  {}", "(none)".dimmed())),
    }

    lines.join("\n")
}
