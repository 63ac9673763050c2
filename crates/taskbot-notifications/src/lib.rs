//! # taskbot-notifications
//!
//! Notification service for the taskbot service layer: reminder CRUD with
//! repeat-interval default/clamp rules and the upcoming-window query an
//! external dispatcher polls.

pub mod params;
pub mod service;
mod validate;

pub use params::{CreateParams, UpdateParams};
pub use service::NotificationService;
