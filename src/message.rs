//! Update messages pushed from the daemon to its frontends
//!
//! Every state change travels as a small envelope: an action tag plus a
//! payload whose shape depends on the action. Drive attach/detach carries a
//! full drive record; everything else is scoped to one drive's task queue.
//! This module defines the shapes only; transport lives elsewhere.

use crate::hdd::HddData;
use crate::task::TaskQueueData;
use serde::{Deserialize, Deserializer, Serialize};

/// Action tag of an update message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UpdateAction {
    /// A drive was attached
    Add,
    /// A drive was removed
    Remove,
    /// A task was appended to a drive's queue
    TaskAdded,
    /// The running task finished
    TaskFinished,
    /// The running task was aborted
    TaskAbort,
    /// The running task reported progress
    TaskProgress,
    /// The pending queue was reordered or edited
    TaskListMod,
    /// Queue processing was paused or resumed
    PauseChange,
    /// A task error state changed
    ErrorChange,
}

/// Queue-scoped payload for task lifecycle updates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskQueueUpdate {
    /// Serial of the drive whose queue changed
    pub serial: String,
    /// Queue snapshot after the change
    pub taskqueue: TaskQueueData,
}

/// Payload variants carried by update messages
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum UpdateData {
    Hdd(HddData),
    TaskQueue(TaskQueueUpdate),
}

/// One pushed state-change message
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HddUpdate {
    /// What happened
    pub update: UpdateAction,
    /// Payload, shaped according to the action
    pub data: UpdateData,
}

impl UpdateAction {
    /// Action name, identical to the wire form
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateAction::Add => "add",
            UpdateAction::Remove => "remove",
            UpdateAction::TaskAdded => "taskadded",
            UpdateAction::TaskFinished => "taskfinished",
            UpdateAction::TaskAbort => "taskabort",
            UpdateAction::TaskProgress => "taskprogress",
            UpdateAction::TaskListMod => "tasklistmod",
            UpdateAction::PauseChange => "pausechange",
            UpdateAction::ErrorChange => "errorchange",
        }
    }

    /// Whether this action carries a full drive record instead of a queue
    /// update
    pub fn carries_hdd(&self) -> bool {
        matches!(self, UpdateAction::Add | UpdateAction::Remove)
    }
}

impl std::fmt::Display for UpdateAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl HddUpdate {
    /// Envelope announcing an attached drive
    pub fn add(hdd: HddData) -> Self {
        Self {
            update: UpdateAction::Add,
            data: UpdateData::Hdd(hdd),
        }
    }

    /// Envelope announcing a removed drive
    pub fn remove(hdd: HddData) -> Self {
        Self {
            update: UpdateAction::Remove,
            data: UpdateData::Hdd(hdd),
        }
    }

    /// Envelope carrying a queue change for one drive
    pub fn task_change(
        update: UpdateAction,
        serial: String,
        taskqueue: TaskQueueData,
    ) -> crate::Result<Self> {
        if update.carries_hdd() {
            return Err(crate::HddmonError::Validation(format!(
                "Action '{}' carries a full drive record, not a task queue update",
                update
            ))
            .into());
        }

        Ok(Self {
            update,
            data: UpdateData::TaskQueue(TaskQueueUpdate { serial, taskqueue }),
        })
    }

    /// Validate that the action and payload shape agree, then the payload
    /// itself
    pub fn validate(&self) -> crate::Result<()> {
        match (&self.data, self.update.carries_hdd()) {
            (UpdateData::Hdd(hdd), true) => hdd.validate(),
            (UpdateData::TaskQueue(change), false) => {
                crate::utils::validate_serial(&change.serial)?;
                change.taskqueue.validate()
            }
            _ => Err(crate::HddmonError::Validation(format!(
                "Action '{}' does not match the payload shape",
                self.update
            ))
            .into()),
        }
    }
}

// Custom deserializer implementation for HddUpdate that uses the 'update'
// field to determine which payload variant to deserialize, rather than
// relying on untagged enum field matching.
impl<'de> Deserialize<'de> for HddUpdate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{Error, IgnoredAny, MapAccess, Visitor};
        use std::fmt;

        struct HddUpdateVisitor;

        impl<'de> Visitor<'de> for HddUpdateVisitor {
            type Value = HddUpdate;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an update message object")
            }

            fn visit_map<V>(self, mut map: V) -> Result<HddUpdate, V::Error>
            where
                V: MapAccess<'de>,
            {
                let mut update: Option<UpdateAction> = None;
                let mut data: Option<serde_json::Value> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "update" => {
                            if update.is_some() {
                                return Err(Error::duplicate_field("update"));
                            }
                            update = Some(map.next_value()?);
                        }
                        "data" => {
                            if data.is_some() {
                                return Err(Error::duplicate_field("data"));
                            }
                            data = Some(map.next_value()?);
                        }
                        _ => {
                            let _: IgnoredAny = map.next_value()?;
                        }
                    }
                }

                let update = update.ok_or_else(|| Error::missing_field("update"))?;
                let data = data.ok_or_else(|| Error::missing_field("data"))?;

                // Deserialize the payload based on the action (NOT based on
                // which fields are present)
                let data = if update.carries_hdd() {
                    let hdd: HddData = serde_json::from_value(data).map_err(|e| {
                        Error::custom(format!("Failed to parse drive payload: {}", e))
                    })?;
                    UpdateData::Hdd(hdd)
                } else {
                    let change: TaskQueueUpdate = serde_json::from_value(data).map_err(|e| {
                        Error::custom(format!("Failed to parse task queue payload: {}", e))
                    })?;
                    UpdateData::TaskQueue(change)
                };

                Ok(HddUpdate { update, data })
            }
        }

        deserializer.deserialize_map(HddUpdateVisitor)
    }
}
