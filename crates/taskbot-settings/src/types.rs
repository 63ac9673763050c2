//! Settings types with compiled defaults.

use serde::{Deserialize, Serialize};

/// Root settings for the taskbot host process.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Bot transport credentials.
    pub telegram: TelegramSettings,
    /// Storage backend coordinates.
    pub database: DatabaseSettings,
}

/// Bot transport credentials.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramSettings {
    /// Bot API token. Empty by default; the host fails fast without one.
    pub bot_token: String,
    /// Chat ID allowed to run maintenance commands.
    pub admin_id: i64,
}

/// Storage backend coordinates, consumed by the external repository
/// implementation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Database host.
    pub host: String,
    /// Database port.
    pub port: u16,
    /// Database name.
    pub database: String,
    /// Role to connect as.
    pub user: String,
    /// Role password. Empty by default.
    pub password: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "taskbot".to_string(),
            user: "taskbot".to_string(),
            password: String::new(),
        }
    }
}
