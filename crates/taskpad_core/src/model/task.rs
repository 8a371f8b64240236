//! Task domain record.
//!
//! # Responsibility
//! - Define the single entity of the store and its creation rules.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `text` is trimmed and non-empty for every constructed task.
//! - Serialized field names are stable; completion state travels as
//!   `isCompleted` so existing on-device blobs keep round-tripping.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// A single user-entered to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable ID assigned at creation.
    pub id: TaskId,
    /// Trimmed, non-empty user text.
    pub text: String,
    /// Completion flag, toggled in place.
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
}

impl Task {
    /// Creates a new open task with a generated stable ID.
    ///
    /// Callers are expected to pass text that already went through
    /// [`normalize_text`].
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), text)
    }

    /// Creates a task with a caller-provided stable ID.
    ///
    /// Used by decode paths where identity already exists in the blob.
    pub fn with_id(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            is_completed: false,
        }
    }
}

/// Applies the task text policy: trim, then decline blank input.
///
/// Returns `None` for empty or whitespace-only input. Creation and edit both
/// funnel through this, matching the single input guard of the UI layer.
pub fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
