//! # taskbot-core
//!
//! Foundation types for the taskbot service layer: domain models, the
//! error hierarchy, the storage contracts the services consume, and an
//! in-memory reference backend used by the service test suites.

pub mod errors;
pub mod memory;
pub mod models;
pub mod repository;
