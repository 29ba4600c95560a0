use anyhow::Result;
use owo_colors::OwoColorize;

use crate::config::StorylineConfig;

pub fn run(config: &StorylineConfig) -> Result<()> {
    let config_path = StorylineConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!(
        "  Calendars:  {}",
        config
            .calendars_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(built-in only)".to_string())
    );

    println!();
    println!("{}", "Settings".bold());
    println!("  Time system: {}", config.time_system);
    println!("  Start side:  {}", config.start_side);

    Ok(())
}
