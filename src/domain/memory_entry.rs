use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryEntry {
    pub timestamp: DateTime<Utc>,
    pub summary: String,
    pub caption: String,
}

impl MemoryEntry {
    pub fn new(summary: String, caption: String) -> Self {
        Self {
            timestamp: Utc::now(),
            summary,
            caption,
        }
    }
}
