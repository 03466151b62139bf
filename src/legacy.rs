//! First-generation schema variant
//!
//! The daemon's first frontend contract predates self-test tracking and
//! per-drive assessment. These shapes are kept for consumers that still speak
//! the old schema and are deliberately separate from the current ones: the
//! two generations are never merged. The only bridge is the lossy downgrade
//! conversion below; there is no upgrade path because the missing fields
//! cannot be reconstructed.

use serde::{Deserialize, Serialize};

use crate::task::TaskData;

/// Queue snapshot without the running-task field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskQueueData {
    pub maxqueue: usize,
    pub paused: bool,
    pub queue: Vec<TaskData>,
    pub completed: Vec<String>,
}

/// Drive record without node, port, assessment, or S.M.A.R.T. data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HddData {
    pub serial: String,
    pub model: String,
    pub wwn: String,
    pub capacity: Option<f64>,
    /// Status display string (e.g., "Passing")
    pub health_status: String,
    pub task_queue: TaskQueueData,
}

impl TaskQueueData {
    /// Validate the queue snapshot
    pub fn validate(&self) -> crate::Result<()> {
        if self.queue.len() > self.maxqueue {
            return Err(crate::HddmonError::Validation(format!(
                "Queue holds {} tasks but maxqueue is {}",
                self.queue.len(),
                self.maxqueue
            ))
            .into());
        }

        for (index, task) in self.queue.iter().enumerate() {
            if let Err(e) = task.validate() {
                let error_msg = e.to_string();
                let clean_msg = error_msg
                    .strip_prefix("Validation error: ")
                    .unwrap_or(&error_msg);

                return Err(crate::HddmonError::Validation(format!(
                    "Task #{} (name: '{}'): {}",
                    index + 1,
                    task.name,
                    clean_msg
                ))
                .into());
            }
        }

        Ok(())
    }
}

impl HddData {
    /// Validate the drive record
    pub fn validate(&self) -> crate::Result<()> {
        crate::utils::validate_serial(&self.serial)?;
        crate::utils::validate_wwn(&self.wwn)?;
        self.task_queue.validate()
    }
}

impl From<&crate::task::TaskQueueData> for TaskQueueData {
    /// Downgrade drops the running task; it was never a pending queue entry.
    fn from(queue: &crate::task::TaskQueueData) -> Self {
        Self {
            maxqueue: queue.maxqueue,
            paused: queue.paused,
            queue: queue.queue.clone(),
            completed: queue.completed.clone(),
        }
    }
}

impl From<&crate::hdd::HddData> for HddData {
    /// Downgrade keeps the identity fields and renders the status tag as the
    /// old display string. Node, port, assessment, and the S.M.A.R.T. report
    /// have no counterpart in this generation and are dropped.
    fn from(hdd: &crate::hdd::HddData) -> Self {
        Self {
            serial: hdd.serial.clone(),
            model: hdd.model.clone(),
            wwn: hdd.wwn.clone(),
            capacity: hdd.capacity,
            health_status: hdd.status.unwrap_or_default().to_string(),
            task_queue: TaskQueueData::from(&hdd.task_queue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hdd::HealthStatus;

    fn sample_queue() -> crate::task::TaskQueueData {
        let mut queue = crate::task::TaskQueueData::new();
        queue
            .queue
            .push(TaskData::new("Erase".to_string(), -1.0, "queued".to_string()));
        queue.completed.push("Short test".to_string());
        queue.current_task = Some(TaskData::new(
            "Image".to_string(),
            64.0,
            "64%".to_string(),
        ));
        queue
    }

    #[test]
    fn test_queue_downgrade_drops_running_task() {
        let queue = sample_queue();
        let old = TaskQueueData::from(&queue);

        assert_eq!(old.maxqueue, queue.maxqueue);
        assert_eq!(old.queue, queue.queue);
        assert_eq!(old.completed, queue.completed);

        let value = serde_json::to_value(&old).unwrap();
        assert!(value.get("current_task").is_none());
    }

    #[test]
    fn test_drive_downgrade_maps_status_to_display_string() {
        let mut smart_queue = crate::task::TaskQueueData::new();
        smart_queue.completed.push("Erase".to_string());

        let hdd = crate::hdd::HddData {
            serial: "Z1D2PHH3".to_string(),
            model: "ST500DM002".to_string(),
            wwn: "0x5000c500a1b2c3d4".to_string(),
            capacity: Some(500.0),
            status: Some(HealthStatus::Warn),
            assessment: "Warn".to_string(),
            task_queue: smart_queue,
            node: "/dev/sdb".to_string(),
            port: None,
            smart: crate::smart::Smart {
                last_captured: "2020-03-01T18:22:08".to_string(),
                attributes: Vec::new(),
                firmware: "CC43".to_string(),
                interface: "sat".to_string(),
                messages: Vec::new(),
                smart_capable: true,
                smart_enabled: true,
                assessment: "Warn".to_string(),
                test_capabilities: Vec::new(),
            },
        };

        let old = HddData::from(&hdd);
        assert_eq!(old.serial, "Z1D2PHH3");
        assert_eq!(old.health_status, "Warn");
        assert_eq!(old.capacity, Some(500.0));
        assert!(old.validate().is_ok());

        // Dropped fields never appear on the old wire form
        let value = serde_json::to_value(&old).unwrap();
        assert!(value.get("node").is_none());
        assert!(value.get("smart").is_none());
        assert!(value.get("assessment").is_none());
    }

    #[test]
    fn test_unassessed_status_downgrades_to_default() {
        let hdd = crate::hdd::HddData {
            serial: "WD1234".to_string(),
            model: "WD5000AAKX".to_string(),
            wwn: String::new(),
            capacity: None,
            status: None,
            assessment: String::new(),
            task_queue: crate::task::TaskQueueData::new(),
            node: "/dev/sdc".to_string(),
            port: None,
            smart: crate::smart::Smart {
                last_captured: String::new(),
                attributes: Vec::new(),
                firmware: String::new(),
                interface: String::new(),
                messages: Vec::new(),
                smart_capable: false,
                smart_enabled: false,
                assessment: String::new(),
                test_capabilities: Vec::new(),
            },
        };

        let old = HddData::from(&hdd);
        assert_eq!(old.health_status, "Default");
    }

    #[test]
    fn test_old_schema_round_trip() {
        let old = HddData {
            serial: "Z1D2PHH3".to_string(),
            model: "ST500DM002".to_string(),
            wwn: String::new(),
            capacity: Some(500.0),
            health_status: "Passing".to_string(),
            task_queue: TaskQueueData {
                maxqueue: 8,
                paused: false,
                queue: Vec::new(),
                completed: vec!["Erase".to_string()],
            },
        };

        let json = serde_json::to_string(&old).unwrap();
        assert!(json.contains("\"health_status\":\"Passing\""));

        let decoded: HddData = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, old);
    }
}
