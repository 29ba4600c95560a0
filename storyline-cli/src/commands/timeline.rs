use std::path::Path;

use anyhow::Result;
use storyline_core::{CalendarRegistry, Timeline, TimelineOptions};
use tracing::info;

use crate::render::Render;

pub fn run(
    plans_path: &Path,
    registry: &CalendarRegistry,
    options: &TimelineOptions,
    json: bool,
) -> Result<()> {
    let plans = super::load_plans(plans_path)?;
    info!(plans = plans.len(), time_system = %options.time_system, "building timeline");

    let timeline = Timeline::build(&plans, registry, options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&timeline)?);
        return Ok(());
    }

    let calendar = registry.resolve(&options.time_system)?;
    println!("{}", timeline.render(calendar));

    Ok(())
}
