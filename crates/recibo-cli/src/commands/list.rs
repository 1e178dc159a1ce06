//! List command - search saved receipts.

use clap::Args;
use console::style;

use recibo_core::{filter, format_brl, is_deletable, short_ref, Clock};

use super::Context;

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Filter by client name or receipt number (case-insensitive)
    query: Option<String>,

    /// Print full receipt numbers
    #[arg(long)]
    full: bool,
}

pub fn run(args: ListArgs, ctx: &Context) -> anyhow::Result<()> {
    let receipts = ctx.store.list_recent();
    let matches = filter(&receipts, args.query.as_deref().unwrap_or(""));

    if matches.is_empty() {
        println!("{} No receipts found.", style("ℹ").blue());
        return Ok(());
    }

    let now = ctx.clock.now_millis();
    let window = ctx.config.policy.delete_window_ms();

    for receipt in &matches {
        let reference = if args.full {
            receipt.receipt_number.clone()
        } else {
            short_ref(&receipt.receipt_number)
        };
        let marker = if is_deletable(receipt, now, window) {
            style(" (deletable)").yellow().to_string()
        } else {
            String::new()
        };

        println!(
            "{}  {}{}",
            style(&receipt.client.name).cyan().bold(),
            format_brl(receipt.total),
            marker
        );
        println!("    Ref: {}  {}", reference, style(&receipt.date).dim());
    }

    println!();
    println!(
        "{} of {} receipts",
        style(matches.len()).green(),
        receipts.len()
    );

    Ok(())
}
