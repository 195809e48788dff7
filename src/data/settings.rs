use crate::calc::format::{validate_date_format, DEFAULT_DATE_FORMAT};
use crate::data::persistence::Persistable;
use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// chrono strftime pattern for the field text.
    pub date_format: String,
    /// Shown dimmed in the field while nothing is selected.
    pub placeholder: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            placeholder: "Select date".to_string(),
        }
    }
}

impl Persistable for Settings {}

impl Settings {
    /// Loads and validates the settings file at `path`. Missing files give defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let settings = Self::load_from(path)?;
        settings
            .validate()
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        info!(
            "settings loaded from {} (date_format '{}')",
            path.display(),
            settings.date_format
        );
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        validate_date_format(&self.date_format)
    }
}
