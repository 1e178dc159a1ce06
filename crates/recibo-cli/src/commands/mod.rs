//! CLI subcommands and the state they share.

pub mod config;
pub mod delete;
pub mod edit;
pub mod export;
pub mod list;
pub mod new;
pub mod output;
pub mod show;

use std::path::{Path, PathBuf};

use tracing::debug;

use recibo_core::models::config::ReciboConfig;
use recibo_core::{FileBackend, Receipt, ReceiptStore, SystemClock, UuidGenerator};

/// Loaded configuration plus the store it points at.
pub struct Context {
    pub config: ReciboConfig,
    pub store: ReceiptStore<FileBackend>,
    pub clock: SystemClock,
    pub ids: UuidGenerator,
}

impl Context {
    /// Resolve configuration and open the receipt store.
    ///
    /// Config: explicit path, else the default config file if present, else
    /// built-in defaults. Data directory: `--data-dir`, else the config
    /// value, else the platform data directory.
    pub fn load(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let config = match config_path {
            Some(path) => ReciboConfig::from_file(path)?,
            None => {
                let default_path = config::default_config_path();
                if default_path.exists() {
                    ReciboConfig::from_file(&default_path)?
                } else {
                    ReciboConfig::default()
                }
            }
        };

        let data_dir = data_dir
            .or_else(|| config.storage.data_dir.clone())
            .unwrap_or_else(default_data_dir);
        debug!("Using data directory {}", data_dir.display());

        let store = ReceiptStore::with_key(FileBackend::new(data_dir), config.storage.key.clone());

        Ok(Self {
            config,
            store,
            clock: SystemClock,
            ids: UuidGenerator,
        })
    }

    /// Find a receipt by full number or by an unambiguous prefix.
    pub fn find_receipt(&self, id: &str) -> anyhow::Result<Receipt> {
        let receipts = self.store.try_load_all()?;

        if let Some(exact) = receipts.iter().find(|r| r.receipt_number == id) {
            return Ok(exact.clone());
        }

        let prefix = id.trim_end_matches("...");
        let mut candidates = receipts
            .into_iter()
            .filter(|r| !prefix.is_empty() && r.receipt_number.starts_with(prefix));

        match (candidates.next(), candidates.next()) {
            (Some(found), None) => Ok(found),
            (Some(_), Some(_)) => anyhow::bail!("Receipt reference '{}' is ambiguous", id),
            (None, _) => anyhow::bail!("Receipt not found: {}", id),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("recibo")
}
