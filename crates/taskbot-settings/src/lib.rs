//! # taskbot-settings
//!
//! Layered configuration for the taskbot host process: compiled defaults,
//! an optional JSON settings file, and `TASKBOT_*` environment overrides,
//! highest priority last. The service layer itself never reads settings;
//! the host wires values in at construction time.

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::SettingsError;
pub use loader::{load_settings, load_settings_from_path};
pub use types::{DatabaseSettings, Settings, TelegramSettings};
