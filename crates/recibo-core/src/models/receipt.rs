//! Receipt data model as persisted in the `receipts` key.
//!
//! Field names are camelCase on the wire so collections written by the
//! browser version of the app load unchanged.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount::{self, lenient};

/// A confirmed payment receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Unique identifier, primary key of the collection.
    pub receipt_number: String,

    /// Free-text service label.
    #[serde(default)]
    pub service_type: String,

    /// Who is paying.
    #[serde(default)]
    pub client: Client,

    /// Line items in display order.
    #[serde(default)]
    pub items: Vec<LineItem>,

    /// Fee (positive) or discount (negative) added to the item sum.
    #[serde(default, with = "lenient")]
    pub extra_value: Decimal,

    /// Frozen total at save time.
    #[serde(default, with = "lenient")]
    pub total: Decimal,

    /// Issuing company.
    #[serde(default)]
    pub company_info: CompanyInfo,

    /// Localized creation date, e.g. "19 de outubro de 2026".
    #[serde(default)]
    pub date: String,

    /// Creation time in epoch milliseconds.
    #[serde(default)]
    pub created_at: i64,
}

/// Client information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Full client name.
    #[serde(default)]
    pub name: String,
}

impl Client {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Issuing company information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    /// Display name printed in the receipt header.
    #[serde(default)]
    pub name: String,
}

impl CompanyInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A single line on the receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Unique within the receipt.
    pub id: String,

    /// Display label, e.g. "ITEM-001".
    #[serde(rename = "ref", default)]
    pub reference: String,

    /// What was provided.
    #[serde(default)]
    pub description: String,

    /// Amount; may be negative.
    #[serde(default, with = "lenient")]
    pub value: Decimal,
}

impl Receipt {
    /// Sum of item values, without the extra adjustment.
    pub fn subtotal(&self) -> Decimal {
        amount::subtotal(&self.items)
    }

    /// Total recomputed from items and extra value.
    pub fn computed_total(&self) -> Decimal {
        amount::compute_total(&self.items, self.extra_value)
    }

    /// Milliseconds elapsed since the receipt was first saved.
    pub fn age_millis(&self, now_ms: i64) -> i64 {
        now_ms.saturating_sub(self.created_at)
    }

    /// Check the receipt for inconsistencies and return the issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.receipt_number.trim().is_empty() {
            issues.push("Missing receipt number".to_string());
        }

        if self.client.name.trim().is_empty() {
            issues.push("Missing client name".to_string());
        }

        if self.items.is_empty() {
            issues.push("No line items".to_string());
        }

        let mut seen = std::collections::HashSet::new();
        for item in &self.items {
            if !seen.insert(item.id.as_str()) {
                issues.push(format!("Duplicate item id {}", item.id));
            }
        }

        let computed = self.computed_total();
        if computed != self.total {
            issues.push(format!(
                "Stored total ({}) differs from items plus extra ({})",
                self.total, computed
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Receipt {
        Receipt {
            receipt_number: "5b0c8f5e-1d7a-4f8e-9f51-5d0a0f3e2c11".to_string(),
            service_type: "Serviços Gerais".to_string(),
            client: Client::new("Maria Souza"),
            items: vec![
                LineItem {
                    id: "a".to_string(),
                    reference: "ITEM-001".to_string(),
                    description: "Ajuste de barra".to_string(),
                    value: Decimal::from(150),
                },
                LineItem {
                    id: "b".to_string(),
                    reference: "ITEM-002".to_string(),
                    description: "Zíper".to_string(),
                    value: Decimal::new(1250, 2),
                },
            ],
            extra_value: Decimal::from(-20),
            total: Decimal::new(14250, 2),
            company_info: CompanyInfo::new("Rosania Modelista"),
            date: "19 de outubro de 2026".to_string(),
            created_at: 1_792_400_000_000,
        }
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(json["receiptNumber"], "5b0c8f5e-1d7a-4f8e-9f51-5d0a0f3e2c11");
        assert_eq!(json["companyInfo"]["name"], "Rosania Modelista");
        assert_eq!(json["items"][0]["ref"], "ITEM-001");
        assert_eq!(json["items"][0]["value"], 150);
        assert_eq!(json["items"][1]["value"], 12.5);
        assert_eq!(json["extraValue"], -20);
        assert_eq!(json["createdAt"], 1_792_400_000_000_i64);
    }

    #[test]
    fn test_collection_round_trip() {
        let mut second = sample();
        second.receipt_number = "other".to_string();
        second.items.clear();
        second.extra_value = Decimal::new(333, 1);
        second.total = Decimal::new(333, 1);

        let collection = vec![sample(), second];
        let json = serde_json::to_string(&collection).unwrap();
        let decoded: Vec<Receipt> = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, collection);
    }

    #[test]
    fn test_reads_browser_data() {
        let json = r#"{
            "receiptNumber": "r1",
            "serviceType": "Costura",
            "client": {"name": "Ana"},
            "items": [
                {"id": "x", "ref": "ITEM-001", "description": "Barra", "value": 100},
                {"id": "y", "ref": "ITEM-002", "description": "", "value": "abc"},
                {"id": "z", "ref": "ITEM-003", "description": ""}
            ],
            "total": 100,
            "companyInfo": {"name": "Rosania Modelista"},
            "extraValue": null,
            "date": "1 de janeiro de 2025",
            "createdAt": 1735700000000
        }"#;

        let receipt: Receipt = serde_json::from_str(json).unwrap();

        assert_eq!(receipt.items[1].value, Decimal::ZERO);
        assert_eq!(receipt.items[2].value, Decimal::ZERO);
        assert_eq!(receipt.extra_value, Decimal::ZERO);
        assert_eq!(receipt.computed_total(), Decimal::from(100));
        assert!(receipt.validate().is_empty());
    }

    #[test]
    fn test_validate_flags_total_mismatch() {
        let mut receipt = sample();
        receipt.total = Decimal::from(1);
        receipt.client.name.clear();

        let issues = receipt.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("client"));
        assert!(issues[1].contains("differs"));
    }
}
