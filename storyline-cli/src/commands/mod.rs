pub mod calendars;
pub mod config;
pub mod tags;
pub mod timeline;

use std::path::Path;

use anyhow::{Context, Result};
use storyline_core::Plan;

/// Read a JSON array of plans.
pub fn load_plans(path: &Path) -> Result<Vec<Plan>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read plans file {}", path.display()))?;
    storyline_core::parse_plans(&content).with_context(|| format!("Invalid plans in {}", path.display()))
}
