/*
[INPUT]:  Table schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When the `tasks` table schema changes
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the remote store
pub type TaskId = i64;

/// A row of the `tasks` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub task: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub complete: bool,
    /// Storage path of the attached image, relative to the bucket
    #[serde(default)]
    pub image: Option<String>,
}

impl Task {
    /// Attached image key, ignoring empty strings written by older clients
    pub fn image_key(&self) -> Option<&str> {
        self.image.as_deref().filter(|key| !key.is_empty())
    }
}

/// Result of a successful object upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Object key inside the bucket; this is what task rows reference
    pub path: String,
    /// Bucket-qualified key reported by storage (`images/<path>`)
    pub key: String,
}
