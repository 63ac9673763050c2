//! # taskbot-tasks
//!
//! Task service for the taskbot service layer: validated creation and
//! partial updates, date-window search grouped by calendar day, and batched
//! notification attachment.

pub mod params;
pub mod service;
mod validate;

pub use params::{CreateParams, SearchByDateParams, UpdateParams};
pub use service::TaskService;
