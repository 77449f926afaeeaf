//! Usage-history data file.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors loading the usage-history file.
#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    #[error("failed to read usage history: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse usage history: {0}")]
    Json(#[from] serde_json::Error),
}

/// Usage count for one period.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UsageRecord {
    /// Period label, e.g. "2024-01".
    pub time: String,
    #[serde(alias = "使用次數")]
    pub usage_count: u64,
}

/// The loaded usage history, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageHistory {
    records: Vec<UsageRecord>,
}

impl UsageHistory {
    pub fn new(records: Vec<UsageRecord>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self, UsageError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Load from a JSON file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, UsageError> {
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json(&json)
    }

    pub fn records(&self) -> &[UsageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
