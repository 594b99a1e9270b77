//! Host configuration.
//!
//! Lives at `~/.mentorbook/config.json`: where the fixture database sits
//! and how far ahead the date scan looks. A missing file falls back to
//! defaults so a fresh checkout works; a malformed file is an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Path to the `database.json` fixture.
    pub database_path: String,
    /// Booking-scan horizon for `slots::available_dates`, in weeks.
    #[serde(default = "default_weeks_ahead")]
    pub weeks_ahead: u32,
}

fn default_weeks_ahead() -> u32 {
    4
}

/// The canonical config file path (`~/.mentorbook/config.json`).
pub fn config_path() -> Result<PathBuf, ScheduleError> {
    let home = dirs::home_dir().ok_or(ScheduleError::HomeDirNotFound)?;
    Ok(home.join(".mentorbook").join("config.json"))
}

fn default_database_path() -> Result<String, ScheduleError> {
    let home = dirs::home_dir().ok_or(ScheduleError::HomeDirNotFound)?;
    Ok(home
        .join(".mentorbook")
        .join("database.json")
        .to_string_lossy()
        .to_string())
}

/// Load configuration from the canonical path.
pub fn load_config() -> Result<AppConfig, ScheduleError> {
    load_config_from(&config_path()?)
}

/// Load configuration from an explicit path.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ScheduleError> {
    if !path.exists() {
        log::debug!("no config at {}, using defaults", path.display());
        return Ok(AppConfig {
            database_path: default_database_path()?,
            weeks_ahead: default_weeks_ahead(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}
