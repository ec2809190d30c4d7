use std::path::Path;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use studyplan_core::{PlanError, Result};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_SETTINGS_FILE: &str = "studyplan.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub validation: ValidationSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,
    /// Emit JSON lines instead of human-readable logs.
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    /// Pin the evaluation date; defaults to the local date.
    pub today: Option<NaiveDate>,
    pub skip_content_validation: bool,
}

impl ValidationSettings {
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Load settings from `path`, or from `studyplan.toml` when it exists.
///
/// An explicit path must exist; the implicit one falls back to defaults.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let path = match path {
        Some(path) => path,
        None => {
            let default_path = Path::new(DEFAULT_SETTINGS_FILE);
            if !default_path.exists() {
                return Ok(Settings::default());
            }
            default_path
        }
    };

    let content = std::fs::read_to_string(path)?;
    parse_settings(&content)
}

fn parse_settings(content: &str) -> Result<Settings> {
    toml::from_str(content).map_err(PlanError::from)
}
