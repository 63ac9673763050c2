//! Settings loading with layered providers.
//!
//! Loading flow:
//! 1. Start with compiled [`Settings::default()`]
//! 2. If the settings file exists, merge its values over the defaults
//! 3. Merge `TASKBOT_*` environment overrides (highest priority)
//!
//! Environment keys use `__` as the section separator, e.g.
//! `TASKBOT_TELEGRAM__BOT_TOKEN` or `TASKBOT_DATABASE__PORT`.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized};
use tracing::debug;

use crate::errors::Result;
use crate::types::Settings;

const ENV_PREFIX: &str = "TASKBOT_";

/// Resolve the path to the settings file (`~/.taskbot/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".taskbot").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<Settings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, file values are skipped. If the file
/// contains invalid JSON, loading fails.
pub fn load_settings_from_path(path: &Path) -> Result<Settings> {
    let mut figment = Figment::from(Serialized::defaults(Settings::default()));

    if path.exists() {
        debug!(?path, "loading settings from file");
        figment = figment.merge(Json::file(path));
    } else {
        debug!(?path, "settings file not found, using defaults");
    }

    let settings = figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()?;
    Ok(settings)
}
