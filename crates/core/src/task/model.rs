//! Task model definitions

use serde::{Deserialize, Serialize};

/// Server-assigned task identifier
pub type TaskId = i64;

/// A task as held by the backend
///
/// The id is assigned by the backend on creation and is immutable. Task
/// values are never mutated in place; every known state of a task is
/// obtained fresh from a collection refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub completed: bool,
}

impl Task {
    /// Description text for display, empty when the backend sent none.
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}
