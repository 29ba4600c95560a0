//! CLI configuration at ~/.config/storyline/config.toml

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use storyline_core::{DEFAULT_TIME_SYSTEM, Side};

fn default_time_system() -> String {
    DEFAULT_TIME_SYSTEM.to_string()
}

/// Settings read from the config file, overridable with `STORYLINE_*`
/// environment variables and then by command-line flags.
#[derive(Debug, Deserialize, Clone)]
pub struct StorylineConfig {
    /// Calendar used for month names and for timings that don't name one.
    #[serde(default = "default_time_system")]
    pub time_system: String,

    /// TOML or JSON file with user-defined calendars.
    #[serde(default)]
    pub calendars_file: Option<PathBuf>,

    /// Column the first stack is drawn in.
    #[serde(default)]
    pub start_side: Side,
}

impl Default for StorylineConfig {
    fn default() -> Self {
        StorylineConfig {
            time_system: default_time_system(),
            calendars_file: None,
            start_side: Side::Left,
        }
    }
}

impl StorylineConfig {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("storyline");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config, writing a commented default file on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config: StorylineConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("STORYLINE"))
            .build()
            .with_context(|| format!("Could not read config file {}", path.display()))?
            .try_deserialize()
            .context("Invalid storyline configuration")?;

        Ok(config)
    }

    /// `calendars_file` with `~` expanded.
    pub fn calendars_path(&self) -> Option<PathBuf> {
        self.calendars_file.as_ref().map(|p| {
            PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).into_owned())
        })
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> Result<()> {
        let contents = format!(
            "\
# storyline configuration

# Calendar used for month names and untagged structured timings:
# time_system = \"{}\"

# User-defined calendars (TOML with [[calendars]] tables, or a JSON array):
# calendars_file = \"~/stories/calendars.toml\"

# Column the first timeline entry is drawn in (left or right):
# start_side = \"left\"
",
            DEFAULT_TIME_SYSTEM
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Could not create config directory")?;
        }

        std::fs::write(path, contents).context("Could not write config file")?;

        Ok(())
    }
}
