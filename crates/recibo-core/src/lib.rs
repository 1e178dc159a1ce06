//! Core library for payment receipts.
//!
//! This crate provides:
//! - The receipt data model and its JSON wire format
//! - Total computation with lenient amount coercion
//! - A receipt store over pluggable key-value backends (file, memory)
//! - Search, ordering and delete-eligibility rules
//! - Draft editing and confirmation

pub mod clock;
pub mod draft;
pub mod error;
pub mod extract;
pub mod ids;
pub mod models;
pub mod search;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use draft::{Draft, ItemField};
pub use error::{
    ConfirmError, DraftError, ExtractionError, ReciboError, Result, StorageError, StoreError,
};
pub use extract::ClientExtractor;
pub use ids::{IdGenerator, SequentialIds, UuidGenerator};
pub use models::amount::{
    coerce_amount, compute_total, format_brl, normalize_amount, parse_amount,
};
pub use models::config::{CreatedAtPolicy, ReciboConfig};
pub use models::receipt::{Client, CompanyInfo, LineItem, Receipt};
pub use search::{filter, is_deletable, short_ref, sort_recent_first, DELETE_WINDOW_MS};
#[cfg(feature = "native")]
pub use store::FileBackend;
pub use store::{KeyValueBackend, MemoryBackend, ReceiptStore, UpsertOutcome};
