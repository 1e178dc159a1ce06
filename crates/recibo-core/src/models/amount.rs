//! Monetary amounts: lenient coercion, totals and display.
//!
//! Every amount entering the system goes through [`coerce_amount`] (stored
//! JSON) or [`parse_amount`] (typed input). Both are total: anything that is
//! not a finite decimal number becomes zero.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use super::receipt::LineItem;

/// Significant digits an amount keeps. Amounts are stored as JSON numbers,
/// and every decimal of up to 15 digits survives the trip through `f64`.
pub const AMOUNT_SIGNIFICANT_DIGITS: u32 = 15;

/// Coerce an arbitrary JSON value into an amount.
///
/// - numbers map to their decimal value
/// - strings holding a decimal number (surrounding whitespace ignored) are parsed
/// - `null`, missing fields, non-numeric strings, `NaN`, infinities,
///   booleans, arrays and objects are zero
pub fn coerce_amount(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => parse_amount(&n.to_string()),
        Value::String(s) => parse_amount(s),
        _ => Decimal::ZERO,
    }
}

/// Parse a textual amount, treating anything unparsable as zero.
///
/// Accepts plain (`150`, `-50.5`) and scientific (`1.5e2`) notation.
/// A comma is accepted as the decimal separator when no dot is present.
pub fn parse_amount(text: &str) -> Decimal {
    let text = text.trim();
    if text.is_empty() {
        return Decimal::ZERO;
    }

    let normalized = if text.contains(',') && !text.contains('.') {
        text.replace(',', ".")
    } else {
        text.to_string()
    };

    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .map(normalize_amount)
        .unwrap_or(Decimal::ZERO)
}

/// Round an amount to [`AMOUNT_SIGNIFICANT_DIGITS`] so it reads back unchanged
/// after being saved.
pub fn normalize_amount(amount: Decimal) -> Decimal {
    amount
        .round_sf(AMOUNT_SIGNIFICANT_DIGITS)
        .unwrap_or(amount)
}

/// Sum of all item values.
pub fn subtotal(items: &[LineItem]) -> Decimal {
    items.iter().map(|item| item.value).sum()
}

/// Receipt total: item values plus the extra adjustment.
pub fn compute_total(items: &[LineItem], extra_value: Decimal) -> Decimal {
    normalize_amount(subtotal(items) + extra_value)
}

/// Format an amount in Brazilian reais, e.g. `R$ 1.234,56`.
pub fn format_brl(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}R$ {},{}", sign, grouped, frac_part)
}

/// Serde adapter storing amounts as JSON numbers and reading them leniently.
pub mod lenient {
    use rust_decimal::Decimal;
    use rust_decimal::prelude::ToPrimitive;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    use super::coerce_amount;

    pub fn serialize<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        let normalized = amount.normalize();
        if normalized.scale() == 0 {
            if let Some(int) = normalized.to_i64() {
                return serializer.serialize_i64(int);
            }
        }
        serializer.serialize_f64(amount.to_f64().unwrap_or_default())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().map(coerce_amount).unwrap_or(Decimal::ZERO))
    }
}
