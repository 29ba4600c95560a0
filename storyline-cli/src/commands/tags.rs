use std::path::Path;

use anyhow::Result;
use storyline_core::{CalendarRegistry, Timeline, TimelineOptions};

use crate::render::render_filter_index;

pub fn run(
    plans_path: &Path,
    registry: &CalendarRegistry,
    options: &TimelineOptions,
    json: bool,
) -> Result<()> {
    let plans = super::load_plans(plans_path)?;
    // The year range covers expanded yearly instances too, so run the full pipeline.
    let timeline = Timeline::build(&plans, registry, options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&timeline.filter)?);
    } else {
        println!("{}", render_filter_index(&timeline.filter));
    }

    Ok(())
}
