use anyhow::Result;
use owo_colors::OwoColorize;
use storyline_core::calendar::CalendarDefinition;
use storyline_core::CalendarRegistry;

pub fn list(registry: &CalendarRegistry, selected: &str) -> Result<()> {
    for id in registry.ids() {
        let marker = if id == selected { "*" } else { " " };
        match registry.resolve(id) {
            Ok(Some(calendar)) => {
                let kind = if calendar.is_built_in { "built-in" } else { "user" };
                println!(
                    "{} {} {} {}",
                    marker.green(),
                    id.bold(),
                    calendar.name,
                    format!("[{kind}]").dimmed()
                );
            }
            Ok(None) => {}
            Err(e) => println!("{} {} {}", marker, id.bold(), e.to_string().red()),
        }
    }

    Ok(())
}

pub fn show(registry: &CalendarRegistry, id: &str) -> Result<()> {
    let calendar = registry.require(id)?;
    println!("{}", describe(calendar));
    Ok(())
}

fn describe(calendar: &CalendarDefinition) -> String {
    let mut lines = vec![
        calendar.to_string().bold().to_string(),
        format!("  {} days per year", calendar.days_in_year()),
        String::new(),
        "Months".bold().to_string(),
    ];

    for (i, month) in calendar.months.iter().enumerate() {
        lines.push(format!("  {:>2}. {} ({} days)", i + 1, month.name, month.day_count));
    }

    if !calendar.weekdays.is_empty() {
        lines.push(String::new());
        lines.push("Weekdays".bold().to_string());
        lines.push(format!("  {}", calendar.weekdays.join(", ")));
    }

    let divisions = &calendar.time_divisions;
    lines.push(String::new());
    lines.push("Day".bold().to_string());
    lines.push(format!(
        "  {} divisions of {} {}",
        divisions.divisions_per_day, divisions.minutes_per_division, divisions.subdivision_name
    ));
    if calendar.uses_division_names() {
        lines.push(format!("  {}", divisions.division_names.join(", ")));
    }

    if !calendar.eras.is_empty() {
        lines.push(String::new());
        lines.push("Eras".bold().to_string());
        for era in &calendar.eras {
            let end = era
                .end_date
                .map(|d| d.year.to_string())
                .unwrap_or_else(|| "…".to_string());
            let direction = if era.is_backward { ", counting down" } else { "" };
            lines.push(format!(
                "  {} ({}) {} – {}{}",
                era.name, era.abbreviation, era.start_date.year, end, direction
            ));
        }
    }

    if !calendar.seasons.is_empty() {
        lines.push(String::new());
        lines.push("Seasons".bold().to_string());
        for season in &calendar.seasons {
            let month = calendar.month_name(season.start_date.month).unwrap_or("?");
            lines.push(format!("  {} from {} {}", season.name, season.start_date.day, month));
        }
    }

    if !calendar.named_days.is_empty() {
        lines.push(String::new());
        lines.push("Named days".bold().to_string());
        for day in &calendar.named_days {
            let month = calendar.month_name(day.date.month).unwrap_or("?");
            lines.push(format!("  {} on {} {}", day.name, day.date.day, month));
        }
    }

    if let Some(moon) = calendar.moon_phases.as_ref().filter(|m| m.enabled) {
        lines.push(String::new());
        lines.push("Moon".bold().to_string());
        lines.push(format!("  {}-day cycle", moon.cycle_length));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyline_core::calendar::presets;

    #[test]
    fn test_describe_lists_calendar_parts() {
        let text = describe(&presets::lunisolar_calendar());

        assert!(text.contains("Leap Moon"));
        assert!(text.contains("Rat, Ox"));
        assert!(text.contains("29.5-day cycle"));
        assert!(!text.contains("Weekdays"));
    }
}
