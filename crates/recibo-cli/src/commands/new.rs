//! New command - build a draft from arguments and confirm it.

use std::path::PathBuf;

use clap::Args;
use console::style;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use recibo_core::{parse_amount, Draft, ItemField};

use super::output::{emit, format_receipt, OutputFormat};
use super::Context;

/// Arguments for the new command.
#[derive(Args)]
pub struct NewArgs {
    /// Client name
    #[arg(long)]
    client: String,

    /// Service description (default from config)
    #[arg(short, long)]
    service: Option<String>,

    /// Company name printed on the receipt (default from config)
    #[arg(long)]
    company: Option<String>,

    /// Line item as REF=DESCRIPTION=VALUE or DESCRIPTION=VALUE (repeatable).
    /// Replaces the default first item.
    #[arg(short, long = "item", value_name = "ITEM")]
    items: Vec<String>,

    /// Fee (positive) or discount (negative) added to the total
    #[arg(short, long, allow_hyphen_values = true)]
    extra: Option<String>,

    /// Start without the default first item
    #[arg(long)]
    blank: bool,

    /// Output format for the saved receipt
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Write the receipt to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// A parsed `--item` argument.
#[derive(Debug, PartialEq)]
pub struct ItemSpec {
    pub reference: Option<String>,
    pub description: String,
    pub value: Decimal,
}

/// Parse `REF=DESCRIPTION=VALUE`, `DESCRIPTION=VALUE` or `DESCRIPTION`.
/// Values that are not numbers count as zero.
pub fn parse_item_spec(spec: &str) -> ItemSpec {
    let parts: Vec<&str> = spec.splitn(3, '=').collect();
    let (reference, description, value) = match parts.as_slice() {
        [reference, description, value] => (Some(reference.trim()), *description, *value),
        [description, value] => (None, *description, *value),
        _ => (None, spec, ""),
    };

    let parsed = parse_amount(value);
    if parsed.is_zero() && !value.trim().is_empty() && value.trim().parse::<f64>().is_err() {
        warn!("Item value '{}' is not a number, using 0", value);
    }

    ItemSpec {
        reference: reference.filter(|r| !r.is_empty()).map(str::to_string),
        description: description.trim().to_string(),
        value: parsed,
    }
}

/// Append parsed item specs to an editable draft.
pub fn add_items(draft: &mut Draft, ctx: &Context, specs: &[String]) -> anyhow::Result<()> {
    for spec in specs {
        let spec = parse_item_spec(spec);
        let id = draft.add_item(&ctx.ids)?;
        if let Some(reference) = spec.reference {
            draft.update_item(&id, ItemField::Ref(reference))?;
        }
        draft.update_item(&id, ItemField::Description(spec.description))?;
        draft.update_item(&id, ItemField::Value(spec.value))?;
    }
    Ok(())
}

pub fn run(args: NewArgs, ctx: &Context) -> anyhow::Result<()> {
    let defaults = &ctx.config.defaults;
    let mut draft = Draft::new(defaults, &ctx.ids);

    if args.blank || !args.items.is_empty() {
        draft.reset(defaults, &ctx.ids);
    }

    draft.set_client_name(args.client.trim())?;
    if let Some(service) = args.service {
        draft.set_service_type(service)?;
    }
    if let Some(company) = args.company {
        draft.set_company_name(company)?;
    }
    if let Some(extra) = &args.extra {
        draft.set_extra_value(parse_amount(extra))?;
    }
    add_items(&mut draft, ctx, &args.items)?;

    debug!(
        "Confirming draft {} with {} items",
        draft.receipt_number(),
        draft.items().len()
    );

    let receipt = draft
        .confirm(&ctx.store, &ctx.clock, ctx.config.policy.created_at)
        .map_err(|e| anyhow::anyhow!("Could not save the receipt: {}", e))?;

    for issue in receipt.validate() {
        eprintln!("{} {}", style("!").yellow(), issue);
    }

    emit(&format_receipt(&receipt, args.format)?, args.output.as_deref())?;
    eprintln!(
        "{} Saved receipt {}",
        style("✓").green(),
        receipt.receipt_number
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_spec() {
        assert_eq!(
            parse_item_spec("ITEM-009=Ajuste de barra=45,50"),
            ItemSpec {
                reference: Some("ITEM-009".to_string()),
                description: "Ajuste de barra".to_string(),
                value: Decimal::new(4550, 2),
            }
        );
        assert_eq!(
            parse_item_spec("Zíper=12"),
            ItemSpec {
                reference: None,
                description: "Zíper".to_string(),
                value: Decimal::from(12),
            }
        );
        assert_eq!(parse_item_spec("Botões").value, Decimal::ZERO);
        assert_eq!(parse_item_spec("X=abc").value, Decimal::ZERO);
        assert_eq!(parse_item_spec("=Desc=-5").reference, None);
        assert_eq!(parse_item_spec("=Desc=-5").value, Decimal::from(-5));
    }
}
