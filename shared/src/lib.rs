//! Shared types for the scheduling service
//!
//! Error system, API response structure, domain models and
//! date/time helpers used by the server and its tests.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
