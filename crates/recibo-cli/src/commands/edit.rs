//! Edit command - reload a saved receipt, change it and confirm it again.

use clap::Args;
use console::style;

use recibo_core::{parse_amount, Draft};

use super::new::add_items;
use super::output::{emit, format_receipt, OutputFormat};
use super::Context;

/// Arguments for the edit command.
#[derive(Args)]
pub struct EditArgs {
    /// Receipt number (or unambiguous prefix)
    id: String,

    /// New client name
    #[arg(long)]
    client: Option<String>,

    /// New service description
    #[arg(short, long)]
    service: Option<String>,

    /// New company name
    #[arg(long)]
    company: Option<String>,

    /// New extra value
    #[arg(short, long, allow_hyphen_values = true)]
    extra: Option<String>,

    /// Replace all items (repeatable, REF=DESCRIPTION=VALUE)
    #[arg(short, long = "item", value_name = "ITEM")]
    items: Vec<String>,

    /// Append items (repeatable, REF=DESCRIPTION=VALUE)
    #[arg(short, long = "add-item", value_name = "ITEM")]
    add_items: Vec<String>,

    /// Output format for the saved receipt
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

pub fn run(args: EditArgs, ctx: &Context) -> anyhow::Result<()> {
    let receipt = ctx.find_receipt(&args.id)?;
    let mut draft = Draft::from_receipt(receipt);
    draft.reopen();

    if let Some(client) = args.client {
        draft.set_client_name(client.trim())?;
    }
    if let Some(service) = args.service {
        draft.set_service_type(service)?;
    }
    if let Some(company) = args.company {
        draft.set_company_name(company)?;
    }
    if let Some(extra) = &args.extra {
        draft.set_extra_value(parse_amount(extra))?;
    }
    if !args.items.is_empty() {
        let existing: Vec<String> = draft.items().iter().map(|i| i.id.clone()).collect();
        for id in existing {
            draft.remove_item(&id)?;
        }
        add_items(&mut draft, ctx, &args.items)?;
    }
    add_items(&mut draft, ctx, &args.add_items)?;

    let receipt = draft
        .confirm(&ctx.store, &ctx.clock, ctx.config.policy.created_at)
        .map_err(|e| anyhow::anyhow!("Could not save the receipt: {}", e))?;

    emit(&format_receipt(&receipt, args.format)?, None)?;
    eprintln!(
        "{} Updated receipt {}",
        style("✓").green(),
        receipt.receipt_number
    );

    Ok(())
}
