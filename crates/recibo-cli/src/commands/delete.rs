//! Delete command - remove a receipt while it is still in its delete window.

use clap::Args;
use console::style;
use tracing::info;

use recibo_core::{is_deletable, Clock};

use super::Context;

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// Receipt number (or unambiguous prefix)
    id: String,

    /// Confirm the deletion; it cannot be undone
    #[arg(short, long)]
    yes: bool,
}

pub fn run(args: DeleteArgs, ctx: &Context) -> anyhow::Result<()> {
    let receipt = ctx.find_receipt(&args.id)?;
    let window = ctx.config.policy.delete_window_ms();

    if !is_deletable(&receipt, ctx.clock.now_millis(), window) {
        anyhow::bail!(
            "Receipt {} was created more than {} minute(s) ago and can no longer be deleted.",
            receipt.receipt_number,
            ctx.config.policy.delete_window_secs / 60
        );
    }

    if !args.yes {
        anyhow::bail!(
            "Deleting receipt {} cannot be undone. Re-run with --yes to confirm.",
            receipt.receipt_number
        );
    }

    let remaining = ctx.store.delete(&receipt.receipt_number)?;
    info!("{} receipts remain", remaining.len());

    println!(
        "{} Deleted receipt {} ({})",
        style("✓").green(),
        receipt.receipt_number,
        receipt.client.name
    );

    Ok(())
}
