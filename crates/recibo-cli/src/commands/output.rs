//! Receipt rendering: JSON, CSV and a plain-text layout.

use std::fs;
use std::path::Path;

use console::style;

use recibo_core::{format_brl, Receipt};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per line item
    Csv,
    /// Plain text receipt
    Text,
}

const CSV_HEADER: [&str; 11] = [
    "receipt_number",
    "date",
    "created_at",
    "client",
    "service_type",
    "company",
    "item_ref",
    "item_description",
    "item_value",
    "extra_value",
    "total",
];

pub fn format_receipts(receipts: &[Receipt], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(receipts)?),
        OutputFormat::Csv => format_csv(receipts),
        OutputFormat::Text => Ok(receipts
            .iter()
            .map(format_text)
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

pub fn format_receipt(receipt: &Receipt, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(receipt)?),
        _ => format_receipts(std::slice::from_ref(receipt), format),
    }
}

fn format_csv(receipts: &[Receipt]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;

    for receipt in receipts {
        let created_at = receipt.created_at.to_string();
        let extra = receipt.extra_value.to_string();
        let total = receipt.total.to_string();
        let head = [
            receipt.receipt_number.as_str(),
            receipt.date.as_str(),
            created_at.as_str(),
            receipt.client.name.as_str(),
            receipt.service_type.as_str(),
            receipt.company_info.name.as_str(),
        ];

        if receipt.items.is_empty() {
            let mut row = head.to_vec();
            row.extend(["", "", "", extra.as_str(), total.as_str()]);
            wtr.write_record(&row)?;
            continue;
        }

        for item in &receipt.items {
            let value = item.value.to_string();
            let mut row = head.to_vec();
            row.extend([
                item.reference.as_str(),
                item.description.as_str(),
                value.as_str(),
                extra.as_str(),
                total.as_str(),
            ]);
            wtr.write_record(&row)?;
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

/// Text layout of the printed receipt.
pub fn format_text(receipt: &Receipt) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", receipt.company_info.name));
    output.push_str("Nota de Pagamento\n");
    output.push_str(&format!("Ref: {}\n", receipt.receipt_number));
    output.push_str(&format!("Data: {}\n", receipt.date));
    output.push('\n');

    output.push_str(&format!("Serviço: {}\n", receipt.service_type));
    output.push_str(&format!("Cliente: {}\n", receipt.client.name));
    output.push('\n');

    if receipt.items.is_empty() {
        output.push_str("  (nenhum item)\n");
    }
    for item in &receipt.items {
        output.push_str(&format!(
            "  {:<10} {:<30} {:>14}\n",
            item.reference,
            item.description,
            format_brl(item.value)
        ));
    }
    output.push('\n');

    output.push_str(&format!("  {:<41} {:>14}\n", "Subtotal", format_brl(receipt.subtotal())));
    output.push_str(&format!("  {:<41} {:>14}\n", "Extra", format_brl(receipt.extra_value)));
    output.push_str(&format!("  {:<41} {:>14}\n", "Total a Pagar", format_brl(receipt.total)));
    output.push('\n');
    output.push_str("Aguardando o pagamento e o envio do comprovante\n");

    output
}

/// Write to a file when a path is given, otherwise to stdout.
pub fn emit(content: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            println!("{} Output written to {}", style("✓").green(), path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
