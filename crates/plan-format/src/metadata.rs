use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Project metadata attached to generated reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Human-readable project name.
    pub name: String,
    /// When the report was generated.
    pub generated: DateTime<Utc>,
}

impl ProjectMetadata {
    /// Create metadata with the given name and the current timestamp.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generated: Utc::now(),
        }
    }
}
