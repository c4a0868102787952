//! Data models
//!
//! Shared between the scheduling server and its clients (via API).
//! Every stored document carries a `revision` counter that the store bumps on
//! each write; clients may echo it back for compare-and-swap updates.

pub mod employee;
pub mod rules;
pub mod schedule;
pub mod schedule_change;
pub mod shift;

// Re-exports
pub use employee::*;
pub use rules::*;
pub use schedule::*;
pub use schedule_change::*;
pub use shift::*;

use serde::{Deserialize, Serialize};

/// Plain acknowledgement body (`{"message": "..."}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
