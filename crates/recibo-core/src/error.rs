//! Error types for the recibo-core library.

use thiserror::Error;

/// Main error type for the recibo library.
#[derive(Error, Debug)]
pub enum ReciboError {
    /// Receipt store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Draft editing error.
    #[error("draft error: {0}")]
    Draft(#[from] DraftError),

    /// Draft confirmation error.
    #[error("confirmation error: {0}")]
    Confirm(#[from] ConfirmError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by a key-value storage backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Storage is disabled or cannot be reached.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The write would exceed the backend's quota. `limit` is `None` when
    /// the backend does not report it (browser `localStorage`).
    #[error("storage quota exceeded ({needed} bytes needed{})", limit_suffix(.limit))]
    QuotaExceeded { needed: usize, limit: Option<usize> },

    /// The key cannot be mapped onto the backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Underlying file system failure.
    #[error("storage I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

fn limit_suffix(limit: &Option<usize>) -> String {
    limit
        .map(|limit| format!(", {} allowed", limit))
        .unwrap_or_default()
}

/// Errors raised by [`crate::store::ReceiptStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend refused the read or write.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The collection could not be serialized.
    #[error("failed to serialize receipts: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The stored blob is not a valid receipt list.
    #[error("stored receipts are malformed: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// Errors raised while editing a draft.
#[derive(Error, Debug)]
pub enum DraftError {
    /// The draft is confirmed and locked for editing.
    #[error("receipt is confirmed; reopen it before editing")]
    Confirmed,

    /// No item with the given id exists on the draft.
    #[error("unknown item: {0}")]
    UnknownItem(String),

    /// The client extraction service failed.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

/// Failure to confirm a draft. The draft is left untouched.
#[derive(Error, Debug)]
pub enum ConfirmError {
    /// The draft was already confirmed; reopen it to save changes.
    #[error("receipt {0} is already confirmed")]
    AlreadyConfirmed(String),

    /// The store rejected the save.
    #[error("failed to save receipt {receipt_number}: {source}")]
    Store {
        receipt_number: String,
        #[source]
        source: StoreError,
    },
}

/// Errors from a client-name extraction service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The service could not produce a result.
    #[error("failed to extract client information: {0}")]
    Failed(String),
}

impl ExtractionError {
    /// Extraction failures are never fatal; the user may retry or type the name.
    pub fn is_retryable(&self) -> bool {
        true
    }
}

/// Result type for the recibo library.
pub type Result<T> = std::result::Result<T, ReciboError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_message_without_limit() {
        let err = StorageError::QuotaExceeded {
            needed: 5_300_000,
            limit: None,
        };
        assert_eq!(err.to_string(), "storage quota exceeded (5300000 bytes needed)");
    }
}
