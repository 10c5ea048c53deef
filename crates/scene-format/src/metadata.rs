use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scene metadata stored alongside the model tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneMetadata {
    /// Human-readable scene name.
    pub name: String,
    /// When the scene was first created.
    pub created: DateTime<Utc>,
    /// When the scene was last modified.
    pub modified: DateTime<Utc>,
}

impl SceneMetadata {
    /// Create metadata with the given name and current timestamp.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            created: now,
            modified: now,
        }
    }
}
