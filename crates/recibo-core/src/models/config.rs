//! Configuration structures for receipt storage and drafting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for recibo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReciboConfig {
    /// Where receipts are persisted.
    pub storage: StorageConfig,

    /// Values a fresh draft starts with.
    pub defaults: DraftDefaults,

    /// Lifecycle rules.
    pub policy: PolicyConfig,
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the key files. `None` uses the platform data directory.
    pub data_dir: Option<PathBuf>,

    /// Key under which the receipt collection is stored.
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            key: crate::store::DEFAULT_KEY.to_string(),
        }
    }
}

/// Defaults applied to new drafts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftDefaults {
    /// Service label of a new draft.
    pub service_type: String,

    /// Company name printed on receipts.
    pub company_name: String,

    /// Reference of the item a new draft starts with.
    pub first_item_ref: String,

    /// Description of the item a new draft starts with.
    pub first_item_description: String,

    /// Value of the item a new draft starts with.
    pub first_item_value: rust_decimal::Decimal,
}

impl Default for DraftDefaults {
    fn default() -> Self {
        Self {
            service_type: "Serviços Gerais".to_string(),
            company_name: "Rosania Modelista".to_string(),
            first_item_ref: "ITEM-001".to_string(),
            first_item_description: "Serviço Prestado".to_string(),
            first_item_value: rust_decimal::Decimal::from(150),
        }
    }
}

/// What happens to `createdAt` when a saved receipt is confirmed again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatedAtPolicy {
    /// Keep the first-save timestamp and date.
    #[default]
    Preserve,
    /// Stamp the re-save time, restarting the delete window.
    Restamp,
}

/// Lifecycle rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// How long after creation a receipt may still be deleted, in seconds.
    pub delete_window_secs: u64,

    /// Timestamp handling on re-save.
    pub created_at: CreatedAtPolicy,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            delete_window_secs: 5 * 60,
            created_at: CreatedAtPolicy::Preserve,
        }
    }
}

impl PolicyConfig {
    /// Delete window in milliseconds.
    pub fn delete_window_ms(&self) -> i64 {
        i64::try_from(self.delete_window_secs.saturating_mul(1000)).unwrap_or(i64::MAX)
    }
}

impl ReciboConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
