//! Loading user-defined calendars from disk.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use storyline_core::{CalendarDefinition, CalendarRegistry};
use tracing::info;

use crate::config::StorylineConfig;

/// TOML layout: one `[[calendars]]` table per definition.
#[derive(Deserialize)]
struct CalendarFile {
    #[serde(default)]
    calendars: Vec<CalendarDefinition>,
}

/// Parse a calendars file. `.json` files hold an array, anything else is TOML.
pub fn parse_calendars(path: &Path, content: &str) -> Result<Vec<CalendarDefinition>> {
    let mut calendars = if path.extension().is_some_and(|e| e == "json") {
        serde_json::from_str::<Vec<CalendarDefinition>>(content)
            .with_context(|| format!("Invalid calendars JSON in {}", path.display()))?
    } else {
        toml::from_str::<CalendarFile>(content)
            .with_context(|| format!("Invalid calendars TOML in {}", path.display()))?
            .calendars
    };

    // Whatever the file says, nothing loaded from disk is a built-in.
    for calendar in &mut calendars {
        calendar.is_built_in = false;
    }

    Ok(calendars)
}

pub fn load_calendars(path: &Path) -> Result<Vec<CalendarDefinition>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read calendars file {}", path.display()))?;
    parse_calendars(path, &content)
}

/// Registry snapshot for this run: built-ins plus the configured user calendars.
pub fn load_registry(config: &StorylineConfig) -> Result<CalendarRegistry> {
    let user = match config.calendars_path() {
        Some(path) => {
            let calendars = load_calendars(&path)?;
            info!(count = calendars.len(), path = %path.display(), "loaded user calendars");
            calendars
        }
        None => Vec::new(),
    };

    Ok(CalendarRegistry::new(user))
}
