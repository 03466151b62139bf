//! Shared data structures and utilities for the hddmon disk monitoring system
//!
//! This crate contains the record types exchanged between the daemon, its
//! websocket clients, and the remote listener, together with the daemon
//! configuration structures and the JSON codec helpers they all share.

pub mod config;
pub mod defaults;
pub mod hdd;
pub mod image;
pub mod legacy;
pub mod message;
pub mod note;
pub mod smart;
pub mod task;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::HddmondConfig;
pub use hdd::{HddData, HealthStatus};
pub use image::ImageData;
pub use message::{HddUpdate, UpdateAction};
pub use note::NoteData;
pub use smart::{Attribute, Smart};
pub use task::{TaskData, TaskQueueData};
pub use utils::{from_json, to_json};

/// Result type alias used throughout the crate
pub type Result<T> = anyhow::Result<T>;

/// Common error types for the disk monitoring system
#[derive(Debug, thiserror::Error)]
pub enum HddmonError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HddmonError::SchemaMismatch("missing field `serial`".to_string());
        assert_eq!(err.to_string(), "Schema mismatch: missing field `serial`");

        let err = HddmonError::Validation("capacity must be positive".to_string());
        assert_eq!(err.to_string(), "Validation error: capacity must be positive");
    }
}
