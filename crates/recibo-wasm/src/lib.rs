//! WASM bindings for the payment receipt store.
//!
//! Receipts live in the browser's `localStorage` under a single key, in the
//! same JSON layout the native store writes to disk.

use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use recibo_core::error::StorageError;
use recibo_core::store::{StorageResult, DEFAULT_KEY};
use recibo_core::{
    coerce_amount, compute_total, filter, format_brl, is_deletable, short_ref, KeyValueBackend,
    LineItem, Receipt, ReceiptStore, UpsertOutcome, DELETE_WINDOW_MS,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// `window.localStorage` as a key-value backend.
pub struct LocalStorageBackend {
    storage: web_sys::Storage,
}

impl LocalStorageBackend {
    /// Open the window's local storage. Fails when storage is disabled
    /// (private browsing, sandboxed iframes) or there is no window.
    pub fn open() -> StorageResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(describe(&e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueBackend for LocalStorageBackend {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(describe(&e)))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| write_error(&e, key.len() + value.len()))
    }
}

/// Map a failed `setItem` to a storage error. Browsers raise a
/// `QuotaExceededError` DOMException when the origin's quota is full.
fn write_error(error: &JsValue, needed: usize) -> StorageError {
    let quota = error
        .dyn_ref::<web_sys::DomException>()
        .is_some_and(|ex| ex.name() == "QuotaExceededError");
    if quota {
        StorageError::QuotaExceeded {
            needed,
            limit: None,
        }
    } else {
        StorageError::Unavailable(describe(error))
    }
}

fn describe(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}

fn to_js_error(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(to_js_error)
}

/// Receipt collection backed by `localStorage`.
#[wasm_bindgen]
pub struct ReceiptBook {
    store: ReceiptStore<LocalStorageBackend>,
}

#[wasm_bindgen]
impl ReceiptBook {
    /// Open the receipt collection stored under `key` (default `"receipts"`).
    #[wasm_bindgen(constructor)]
    pub fn new(key: Option<String>) -> Result<ReceiptBook, JsValue> {
        let backend = LocalStorageBackend::open().map_err(to_js_error)?;
        let key = key.unwrap_or_else(|| DEFAULT_KEY.to_string());
        Ok(Self {
            store: ReceiptStore::with_key(backend, key),
        })
    }

    /// All saved receipts in stored order. Missing or unreadable data
    /// yields an empty array.
    #[wasm_bindgen(js_name = loadAll)]
    pub fn load_all(&self) -> Result<JsValue, JsValue> {
        to_js(&self.store.load_all())
    }

    /// All saved receipts, most recent first.
    #[wasm_bindgen(js_name = listRecent)]
    pub fn list_recent(&self) -> Result<JsValue, JsValue> {
        to_js(&self.store.list_recent())
    }

    /// Insert or replace a receipt by its number.
    ///
    /// Returns `"inserted"` or `"replaced"`.
    #[wasm_bindgen]
    pub fn upsert(&self, receipt: JsValue) -> Result<String, JsValue> {
        let receipt: Receipt = serde_wasm_bindgen::from_value(receipt).map_err(to_js_error)?;
        let outcome = self.store.upsert(&receipt).map_err(to_js_error)?;
        Ok(match outcome {
            UpsertOutcome::Inserted => "inserted",
            UpsertOutcome::Replaced => "replaced",
        }
        .to_string())
    }

    /// Remove a receipt by number and return the remaining receipts.
    #[wasm_bindgen]
    pub fn delete(&self, receipt_number: &str) -> Result<JsValue, JsValue> {
        let remaining = self.store.delete(receipt_number).map_err(to_js_error)?;
        to_js(&remaining)
    }

    /// Most recent receipts whose client name or number contains `query`.
    #[wasm_bindgen]
    pub fn search(&self, query: &str) -> Result<JsValue, JsValue> {
        to_js(&filter(&self.store.list_recent(), query))
    }
}

/// Whether a receipt can still be deleted.
///
/// `now_ms` defaults to `Date.now()`, `window_ms` to five minutes.
#[wasm_bindgen(js_name = isDeletable)]
pub fn is_deletable_js(
    receipt: JsValue,
    now_ms: Option<f64>,
    window_ms: Option<f64>,
) -> Result<bool, JsValue> {
    let receipt: Receipt = serde_wasm_bindgen::from_value(receipt).map_err(to_js_error)?;
    let now = now_ms.unwrap_or_else(js_sys::Date::now) as i64;
    let window = window_ms.map_or(DELETE_WINDOW_MS, |w| w as i64);
    Ok(is_deletable(&receipt, now, window))
}

/// Sum of item values plus the extra value. Non-numeric values count as zero.
#[wasm_bindgen(js_name = computeTotal)]
pub fn compute_total_js(items: JsValue, extra_value: JsValue) -> Result<f64, JsValue> {
    let items: Vec<LineItem> = if items.is_undefined() || items.is_null() {
        Vec::new()
    } else {
        serde_wasm_bindgen::from_value(items).map_err(to_js_error)?
    };
    let extra: serde_json::Value = if extra_value.is_undefined() {
        serde_json::Value::Null
    } else {
        serde_wasm_bindgen::from_value(extra_value).map_err(to_js_error)?
    };
    Ok(compute_total(&items, coerce_amount(&extra))
        .to_f64()
        .unwrap_or_default())
}

/// Format an amount as Brazilian reais (e.g. `R$ 1.234,56`).
#[wasm_bindgen(js_name = formatBrl)]
pub fn format_brl_js(amount: JsValue) -> Result<String, JsValue> {
    let value: serde_json::Value =
        serde_wasm_bindgen::from_value(amount).map_err(to_js_error)?;
    Ok(format_brl(coerce_amount(&value)))
}

/// Abbreviated receipt number for list views.
#[wasm_bindgen(js_name = shortRef)]
pub fn short_ref_js(receipt_number: &str) -> String {
    short_ref(receipt_number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn sample(number: &str, created_at: f64) -> JsValue {
        let json = serde_json::json!({
            "receiptNumber": number,
            "serviceType": "Costura",
            "client": { "name": "Maria" },
            "items": [{ "id": "i1", "ref": "ITEM-001", "description": "Bainha", "value": 40 }],
            "extraValue": 0,
            "total": 40,
            "companyInfo": { "name": "Ateliê" },
            "date": "19 de outubro de 2026",
            "createdAt": created_at,
        });
        json.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .unwrap()
    }

    #[wasm_bindgen_test]
    fn test_compute_total() {
        let items = sample("r1", 0.0);
        let items = js_sys::Reflect::get(&items, &"items".into()).unwrap();
        assert_eq!(compute_total_js(items.clone(), JsValue::from_f64(-5.0)).unwrap(), 35.0);
        assert_eq!(compute_total_js(items.clone(), JsValue::from_str("abc")).unwrap(), 40.0);
        assert_eq!(compute_total_js(items, JsValue::from_str("2.5")).unwrap(), 42.5);
        assert_eq!(compute_total_js(JsValue::NULL, JsValue::UNDEFINED).unwrap(), 0.0);
    }

    #[wasm_bindgen_test]
    fn test_write_error_mapping() {
        let full =
            web_sys::DomException::new_with_message_and_name("full", "QuotaExceededError").unwrap();
        assert!(matches!(
            write_error(&full.into(), 42),
            StorageError::QuotaExceeded {
                needed: 42,
                limit: None
            }
        ));

        let denied =
            web_sys::DomException::new_with_message_and_name("denied", "SecurityError").unwrap();
        assert!(matches!(
            write_error(&denied.into(), 42),
            StorageError::Unavailable(_)
        ));
    }

    #[wasm_bindgen_test]
    fn test_is_deletable() {
        let receipt = sample("r1", 1_000.0);
        assert!(is_deletable_js(receipt.clone(), Some(1_000.0 + 299_000.0), None).unwrap());
        assert!(!is_deletable_js(receipt, Some(1_000.0 + 301_000.0), None).unwrap());
    }

    #[wasm_bindgen_test]
    fn test_format_and_short_ref() {
        assert_eq!(format_brl_js(JsValue::from_f64(1234.5)).unwrap(), "R$ 1.234,50");
        assert_eq!(short_ref_js("abc"), "abc");
    }

    #[wasm_bindgen_test]
    fn test_book_round_trip() {
        let book = ReceiptBook::new(Some("recibo-wasm-test".to_string())).unwrap();
        for receipt in book.store.load_all() {
            book.delete(&receipt.receipt_number).unwrap();
        }

        assert_eq!(book.upsert(sample("r1", 1.0)).unwrap(), "inserted");
        assert_eq!(book.upsert(sample("r2", 2.0)).unwrap(), "inserted");
        assert_eq!(book.upsert(sample("r1", 1.0)).unwrap(), "replaced");

        let recent = book.store.list_recent();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].receipt_number, "r2");

        let remaining: Vec<Receipt> =
            serde_wasm_bindgen::from_value(book.delete("r2").unwrap()).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].receipt_number, "r1");

        book.delete("r1").unwrap();
        assert!(book.store.load_all().is_empty());
    }
}
