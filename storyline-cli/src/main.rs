mod calendars;
mod commands;
mod config;
mod logging;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use storyline_core::{CalendarRegistry, Side, TimelineOptions};

use crate::config::StorylineConfig;

#[derive(Parser)]
#[command(name = "storyline")]
#[command(about = "Lay out story plans on a calendar-aware timeline")]
struct Cli {
    /// Log pipeline details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// User calendars file (TOML or JSON), overrides the config
    #[arg(long, global = true)]
    calendars: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SideArg {
    Left,
    Right,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Left => Side::Left,
            SideArg::Right => Side::Right,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the timeline for a plans file
    Timeline {
        /// JSON file with an array of plans
        plans: PathBuf,

        /// Calendar id for month names and untagged timings
        #[arg(short, long)]
        calendar: Option<String>,

        /// Column of the first entry
        #[arg(long, value_enum)]
        start_side: Option<SideArg>,

        /// Print the laid-out timeline as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the tag index and year range for a plans file
    Tags {
        plans: PathBuf,

        #[arg(short, long)]
        calendar: Option<String>,

        #[arg(long)]
        json: bool,
    },
    /// List available calendars
    Calendars,
    /// Describe one calendar
    ShowCalendar { id: String },
    /// Show config paths and settings
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let mut config = StorylineConfig::load()?;
    if let Some(path) = cli.calendars {
        config.calendars_file = Some(path);
    }

    match cli.command {
        Commands::Timeline {
            plans,
            calendar,
            start_side,
            json,
        } => {
            let registry = calendars::load_registry(&config)?;
            let mut options = timeline_options(&config, &registry, calendar)?;
            if let Some(side) = start_side {
                options.start_side = side.into();
            }
            commands::timeline::run(&plans, &registry, &options, json)
        }
        Commands::Tags {
            plans,
            calendar,
            json,
        } => {
            let registry = calendars::load_registry(&config)?;
            let options = timeline_options(&config, &registry, calendar)?;
            commands::tags::run(&plans, &registry, &options, json)
        }
        Commands::Calendars => {
            let registry = calendars::load_registry(&config)?;
            commands::calendars::list(&registry, &config.time_system)
        }
        Commands::ShowCalendar { id } => {
            let registry = calendars::load_registry(&config)?;
            commands::calendars::show(&registry, &id)
        }
        Commands::Config => commands::config::run(&config),
    }
}

/// Pipeline options from config and flags. An explicitly requested calendar must exist.
fn timeline_options(
    config: &StorylineConfig,
    registry: &CalendarRegistry,
    calendar: Option<String>,
) -> Result<TimelineOptions> {
    let time_system = match calendar {
        Some(id) => {
            if registry.resolve(&id)?.is_none() {
                anyhow::bail!(
                    "Calendar '{}' not found. Available: {}",
                    id,
                    registry.ids().join(", ")
                );
            }
            id
        }
        None => config.time_system.clone(),
    };

    Ok(TimelineOptions {
        time_system,
        start_side: config.start_side,
    })
}
