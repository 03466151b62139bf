//! Task queue structures for per-drive background operations
//!
//! This module defines the snapshot types describing what a drive's task
//! queue looked like at one instant: the pending tasks, the running task,
//! and the name history of everything that already left the queue.

use serde::{Deserialize, Serialize};

/// Progress value reported by tasks that cannot measure their progress
pub const PROGRESS_UNSUPPORTED: f64 = -1.0;

/// A single queued or running drive operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskData {
    /// Human-readable task name (e.g., "Erase", "Image")
    pub name: String,
    /// Whether this task reports measurable progress
    pub progress_supported: bool,
    /// Progress reading, -1 when the task cannot measure it
    pub progress: f64,
    /// Display string for the current task state
    pub string_rep: String,
    /// Exit code once the task has finished, None while pending or running
    pub return_code: Option<i32>,
}

/// Snapshot of one drive's task queue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskQueueData {
    /// Maximum number of tasks the queue accepts
    pub maxqueue: usize,
    /// Whether queue processing is paused
    pub paused: bool,
    /// Pending tasks in execution order
    pub queue: Vec<TaskData>,
    /// Names of tasks that have left the queue, most recent first
    pub completed: Vec<String>,
    /// The task currently executing, None when the drive is idle
    pub current_task: Option<TaskData>,
}

impl TaskData {
    /// Create a task record from a raw progress reading
    ///
    /// Tasks that cannot measure progress report the -1 sentinel, which
    /// clears `progress_supported`. The exit code is unset until the task
    /// reaches a terminal state.
    pub fn new(name: String, progress: f64, string_rep: String) -> Self {
        Self {
            name,
            progress_supported: progress != PROGRESS_UNSUPPORTED,
            progress,
            string_rep,
            return_code: None,
        }
    }

    /// Whether the task has finished and reported an exit code
    pub fn is_finished(&self) -> bool {
        self.return_code.is_some()
    }

    /// Validate the task record
    pub fn validate(&self) -> crate::Result<()> {
        if self.name.is_empty() {
            return Err(
                crate::HddmonError::Validation("Task name cannot be empty".to_string()).into(),
            );
        }

        // progress_supported mirrors the -1 sentinel
        let derived = self.progress != PROGRESS_UNSUPPORTED;
        if self.progress_supported != derived {
            return Err(crate::HddmonError::Validation(format!(
                "progress_supported is {} but progress is {}",
                self.progress_supported, self.progress
            ))
            .into());
        }

        Ok(())
    }
}

impl Default for TaskQueueData {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskQueueData {
    /// Create an idle queue snapshot with the standard capacity
    pub fn new() -> Self {
        Self {
            maxqueue: crate::defaults::default_maxqueue(),
            paused: false,
            queue: Vec::new(),
            completed: Vec::new(),
            current_task: None,
        }
    }

    /// Whether the queue has reached its capacity
    pub fn is_full(&self) -> bool {
        self.queue.len() >= self.maxqueue
    }

    /// Whether nothing is queued or running
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty() && self.current_task.is_none()
    }

    /// Number of tasks the queue can still accept
    pub fn remaining_capacity(&self) -> usize {
        self.maxqueue.saturating_sub(self.queue.len())
    }

    /// Validate the queue snapshot
    ///
    /// A snapshot whose queue exceeds `maxqueue` still decodes; this check
    /// is what flags it.
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

        if let Some(task) = &self.current_task {
            if let Err(e) = task.validate() {
                let error_msg = e.to_string();
                let clean_msg = error_msg
                    .strip_prefix("Validation error: ")
                    .unwrap_or(&error_msg);

                return Err(crate::HddmonError::Validation(format!(
                    "Current task (name: '{}'): {}",
                    task.name, clean_msg
                ))
                .into());
            }
        }

        Ok(())
    }
}
