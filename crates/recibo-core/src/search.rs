//! Search, ordering and delete eligibility for saved receipts.

use crate::models::receipt::Receipt;

/// How long after creation the UI offers deletion, in milliseconds.
pub const DELETE_WINDOW_MS: i64 = 5 * 60 * 1000;

/// Characters of the receipt number shown in list views.
const SHORT_REF_LEN: usize = 18;

/// Receipts whose client name or receipt number contains `query`,
/// ignoring case. An empty query matches everything. Order is preserved.
pub fn filter(receipts: &[Receipt], query: &str) -> Vec<Receipt> {
    let query = query.to_lowercase();
    receipts
        .iter()
        .filter(|r| matches(r, &query))
        .cloned()
        .collect()
}

/// `query` must already be lowercased.
fn matches(receipt: &Receipt, query: &str) -> bool {
    query.is_empty()
        || receipt.client.name.to_lowercase().contains(query)
        || receipt.receipt_number.to_lowercase().contains(query)
}

/// Sort most recent first; receipts created at the same instant keep their order.
pub fn sort_recent_first(receipts: &mut [Receipt]) {
    receipts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Whether the receipt is still young enough for the UI to offer deletion.
pub fn is_deletable(receipt: &Receipt, now_ms: i64, window_ms: i64) -> bool {
    receipt.age_millis(now_ms) < window_ms
}

/// Truncated receipt number for list views, e.g. `5b0c8f5e-1d7a-4f8e...`.
pub fn short_ref(receipt_number: &str) -> String {
    match receipt_number.char_indices().nth(SHORT_REF_LEN) {
        Some((cut, _)) => format!("{}...", &receipt_number[..cut]),
        None => receipt_number.to_string(),
    }
}
