//! Operator note structures

use serde::{Deserialize, Serialize};

/// A timestamped note an operator attached to a drive
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoteData {
    /// Free-form tags for filtering (e.g., "bad-sectors", "customer-return")
    pub tags: Vec<String>,
    /// Note text
    pub note: String,
    /// Who recorded the note
    pub note_taker: String,
    /// When the note was recorded (ISO 8601)
    pub timestamp: String,
}

impl NoteData {
    /// Whether the note carries the given tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
