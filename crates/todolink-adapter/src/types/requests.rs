/*
[INPUT]:  Table schema definitions and serde requirements
[OUTPUT]: Typed Rust request bodies with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When insert/update payloads change
*/

use serde::{Deserialize, Serialize};

/// Insert body for a new task row.
///
/// `complete`, `id` and `created_at` are left to the store defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub task: String,
    pub image: Option<String>,
}

impl NewTask {
    pub fn new(task: impl Into<String>, image: Option<String>) -> Self {
        Self {
            task: task.into(),
            image,
        }
    }
}

/// Partial update body for a task row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    pub complete: bool,
}
