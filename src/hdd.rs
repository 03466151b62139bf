//! Drive record structures
//!
//! This module defines the top-level drive snapshot exchanged between the
//! monitoring daemon and its frontends, along with the drive status tag the
//! daemon maintains for each device.

use crate::smart::Smart;
use crate::task::TaskQueueData;
use serde::{Deserialize, Serialize};

/// Drive status as tracked by the daemon
///
/// Serialized as the exact variant name. Strings outside the known set
/// deserialize to `Unknown` so newer daemons can add states without breaking
/// older consumers.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum HealthStatus {
    /// Drive failed assessment or a task reported failure
    Failing,
    /// A short self-test is running
    ShortTesting,
    /// A long self-test is running
    LongTesting,
    /// No assessment has been made yet
    #[default]
    Default,
    /// Drive passed assessment
    Passing,
    /// Assessment completed with warnings
    Warn,
    /// Status could not be determined
    #[serde(other)]
    Unknown,
}

/// One physical or logical drive known to the daemon
///
/// Snapshots are immutable; the daemon emits a fresh record on every change
/// instead of patching fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HddData {
    /// Drive serial number
    pub serial: String,
    /// Drive model string
    pub model: String,
    /// World Wide Name, empty when the device does not report one
    pub wwn: String,
    /// Capacity in gigabytes, None when the size string could not be parsed
    pub capacity: Option<f64>,
    /// Daemon status tag, None when the producer has not assessed the drive
    pub status: Option<HealthStatus>,
    /// Overall S.M.A.R.T. assessment (e.g., "PASS", "FAIL", "Warn")
    pub assessment: String,
    /// Task queue snapshot for this drive
    pub task_queue: TaskQueueData,
    /// Device node (e.g., "/dev/sda")
    pub node: String,
    /// Physical port the drive sits in, when detection succeeded
    pub port: Option<String>,
    /// Captured S.M.A.R.T. report
    pub smart: Smart,
}

impl HealthStatus {
    /// Status display name, identical to the wire form
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Failing => "Failing",
            HealthStatus::ShortTesting => "ShortTesting",
            HealthStatus::LongTesting => "LongTesting",
            HealthStatus::Default => "Default",
            HealthStatus::Passing => "Passing",
            HealthStatus::Warn => "Warn",
            HealthStatus::Unknown => "Unknown",
        }
    }

    /// Whether a self-test is currently running on the drive
    pub fn is_testing(&self) -> bool {
        matches!(self, HealthStatus::ShortTesting | HealthStatus::LongTesting)
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl HddData {
    /// Human-readable capacity for display
    pub fn display_capacity(&self) -> String {
        crate::utils::format_capacity(self.capacity)
    }

    /// Validate the drive snapshot
    ///
    /// Checks identifier formats, capacity sanity, and recurses into the
    /// task queue and S.M.A.R.T. report. Errors carry the drive context.
    pub fn validate(&self) -> crate::Result<()> {
        if let Err(e) = self.validate_fields() {
            let error_msg = e.to_string();
            let clean_msg = error_msg
                .strip_prefix("Validation error: ")
                .unwrap_or(&error_msg);

            return Err(crate::HddmonError::Validation(format!(
                "Drive '{}' (node: '{}'): {}",
                self.serial, self.node, clean_msg
            ))
            .into());
        }

        Ok(())
    }

    fn validate_fields(&self) -> crate::Result<()> {
        crate::utils::validate_serial(&self.serial)?;
        crate::utils::validate_wwn(&self.wwn)?;
        crate::utils::validate_node(&self.node)?;

        if let Some(capacity) = self.capacity {
            if !capacity.is_finite() || capacity <= 0.0 {
                return Err(crate::HddmonError::Validation(format!(
                    "capacity must be a positive gigabyte count, got {}",
                    capacity
                ))
                .into());
            }
        }

        self.task_queue.validate()?;
        self.smart.validate()
    }
}
