//! # taskbot-users
//!
//! User service for the taskbot service layer: idempotent registration by
//! external chat identity, lookup, and deletion.

pub mod params;
pub mod service;
mod validate;

pub use params::CreateParams;
pub use service::UserService;
