//! Receipt drafts: the in-memory receipt under edit.
//!
//! A draft is editable until it is confirmed. Confirmation persists it
//! through a [`ReceiptStore`] and only flips the draft to confirmed when the
//! save succeeds. A saved receipt can be loaded back into a draft, reopened,
//! edited and confirmed again under the same receipt number.

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::error::{ConfirmError, DraftError};
use crate::extract::ClientExtractor;
use crate::ids::IdGenerator;
use crate::models::amount;
use crate::models::config::{CreatedAtPolicy, DraftDefaults};
use crate::models::receipt::{Client, CompanyInfo, LineItem, Receipt};
use crate::store::{KeyValueBackend, ReceiptStore};

/// Result type for draft edits.
pub type Result<T> = std::result::Result<T, DraftError>;

/// A single field change on a line item.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemField {
    Ref(String),
    Description(String),
    Value(Decimal),
}

/// Creation stamp fixed at first save.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Stamp {
    created_at: i64,
    date: String,
}

/// The receipt currently being edited.
#[derive(Debug, Clone)]
pub struct Draft {
    receipt_number: String,
    service_type: String,
    client: Client,
    items: Vec<LineItem>,
    extra_value: Decimal,
    company_info: CompanyInfo,
    stamp: Option<Stamp>,
    confirmed: bool,
}

impl Draft {
    /// A fresh draft pre-filled with the configured defaults and one item.
    pub fn new(defaults: &DraftDefaults, ids: &dyn IdGenerator) -> Self {
        let first = LineItem {
            id: ids.next_id(),
            reference: defaults.first_item_ref.clone(),
            description: defaults.first_item_description.clone(),
            value: defaults.first_item_value,
        };

        Self {
            receipt_number: ids.next_id(),
            service_type: defaults.service_type.clone(),
            client: Client::default(),
            items: vec![first],
            extra_value: Decimal::ZERO,
            company_info: CompanyInfo::new(defaults.company_name.clone()),
            stamp: None,
            confirmed: false,
        }
    }

    /// Load a saved receipt. The result is confirmed and locked.
    pub fn from_receipt(receipt: Receipt) -> Self {
        Self {
            receipt_number: receipt.receipt_number,
            service_type: receipt.service_type,
            client: receipt.client,
            items: receipt.items,
            extra_value: receipt.extra_value,
            company_info: receipt.company_info,
            stamp: Some(Stamp {
                created_at: receipt.created_at,
                date: receipt.date,
            }),
            confirmed: true,
        }
    }

    /// Start a new, empty receipt: fresh number, no items, no extra value,
    /// default service type. The company name carries over.
    pub fn reset(&mut self, defaults: &DraftDefaults, ids: &dyn IdGenerator) {
        self.receipt_number = ids.next_id();
        self.service_type = defaults.service_type.clone();
        self.client = Client::default();
        self.items.clear();
        self.extra_value = Decimal::ZERO;
        self.stamp = None;
        self.confirmed = false;
        debug!("Started new draft {}", self.receipt_number);
    }

    /// Unlock a confirmed draft for editing. The receipt number is kept, so
    /// confirming again replaces the stored receipt.
    pub fn reopen(&mut self) {
        self.confirmed = false;
    }

    pub fn receipt_number(&self) -> &str {
        &self.receipt_number
    }

    pub fn service_type(&self) -> &str {
        &self.service_type
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn extra_value(&self) -> Decimal {
        self.extra_value
    }

    pub fn company_info(&self) -> &CompanyInfo {
        &self.company_info
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Creation time of the stored receipt, if it was ever saved.
    pub fn created_at(&self) -> Option<i64> {
        self.stamp.as_ref().map(|s| s.created_at)
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.confirmed {
            return Err(DraftError::Confirmed);
        }
        Ok(())
    }

    pub fn set_service_type(&mut self, service_type: impl Into<String>) -> Result<()> {
        self.ensure_editable()?;
        self.service_type = service_type.into();
        Ok(())
    }

    pub fn set_client_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.ensure_editable()?;
        self.client.name = name.into();
        Ok(())
    }

    pub fn set_company_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.ensure_editable()?;
        self.company_info.name = name.into();
        Ok(())
    }

    pub fn set_extra_value(&mut self, extra_value: Decimal) -> Result<()> {
        self.ensure_editable()?;
        self.extra_value = amount::normalize_amount(extra_value);
        Ok(())
    }

    /// Append an empty item labelled `ITEM-NNN` and return its id.
    pub fn add_item(&mut self, ids: &dyn IdGenerator) -> Result<String> {
        self.ensure_editable()?;
        let item = LineItem {
            id: ids.next_id(),
            reference: format!("ITEM-{:03}", self.items.len() + 1),
            description: String::new(),
            value: Decimal::ZERO,
        };
        let id = item.id.clone();
        self.items.push(item);
        Ok(id)
    }

    /// Change one field of an item.
    pub fn update_item(&mut self, id: &str, field: ItemField) -> Result<()> {
        self.ensure_editable()?;
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| DraftError::UnknownItem(id.to_string()))?;

        match field {
            ItemField::Ref(reference) => item.reference = reference,
            ItemField::Description(description) => item.description = description,
            ItemField::Value(value) => item.value = amount::normalize_amount(value),
        }
        Ok(())
    }

    pub fn remove_item(&mut self, id: &str) -> Result<()> {
        self.ensure_editable()?;
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            return Err(DraftError::UnknownItem(id.to_string()));
        }
        Ok(())
    }

    /// Replace the client with whatever the extractor finds in `text`.
    ///
    /// Blank text clears the name without calling the extractor. On failure
    /// the client is left as it was and the error can be shown for a retry.
    pub fn fill_client_from_text(
        &mut self,
        extractor: &dyn ClientExtractor,
        text: &str,
    ) -> Result<()> {
        self.ensure_editable()?;
        if text.trim().is_empty() {
            self.client = Client::default();
            return Ok(());
        }

        let extracted = extractor.extract(text)?;
        self.client = Client::new(extracted.name.trim());
        Ok(())
    }

    pub fn subtotal(&self) -> Decimal {
        amount::subtotal(&self.items)
    }

    /// Current total; follows every item and extra-value change.
    pub fn total(&self) -> Decimal {
        amount::compute_total(&self.items, self.extra_value)
    }

    /// The receipt this draft would save right now.
    pub fn preview(&self, clock: &dyn Clock) -> Receipt {
        let stamp = self.stamp.clone().unwrap_or_else(|| fresh_stamp(clock));
        self.build(stamp)
    }

    /// Persist the draft and lock it.
    ///
    /// With [`CreatedAtPolicy::Preserve`] a previously saved receipt keeps its
    /// creation time and date; with [`CreatedAtPolicy::Restamp`] every save
    /// stamps the current time. On failure nothing changes.
    pub fn confirm<B: KeyValueBackend>(
        &mut self,
        store: &ReceiptStore<B>,
        clock: &dyn Clock,
        policy: CreatedAtPolicy,
    ) -> std::result::Result<Receipt, ConfirmError> {
        if self.confirmed {
            return Err(ConfirmError::AlreadyConfirmed(self.receipt_number.clone()));
        }

        let stamp = match (policy, &self.stamp) {
            (CreatedAtPolicy::Preserve, Some(stamp)) => stamp.clone(),
            _ => fresh_stamp(clock),
        };
        let receipt = self.build(stamp.clone());

        store.upsert(&receipt).map_err(|source| ConfirmError::Store {
            receipt_number: self.receipt_number.clone(),
            source,
        })?;

        self.stamp = Some(stamp);
        self.confirmed = true;
        info!("Confirmed receipt {} (total {})", receipt.receipt_number, receipt.total);
        Ok(receipt)
    }

    fn build(&self, stamp: Stamp) -> Receipt {
        Receipt {
            receipt_number: self.receipt_number.clone(),
            service_type: self.service_type.clone(),
            client: self.client.clone(),
            items: self.items.clone(),
            extra_value: self.extra_value,
            total: self.total(),
            company_info: self.company_info.clone(),
            date: stamp.date,
            created_at: stamp.created_at,
        }
    }
}

fn fresh_stamp(clock: &dyn Clock) -> Stamp {
    let created_at = clock.now_millis();
    Stamp {
        created_at,
        date: clock.date_label(created_at),
    }
}
