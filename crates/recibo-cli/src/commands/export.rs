//! Export command - dump saved receipts, most recent first.

use std::path::PathBuf;

use clap::Args;

use recibo_core::{filter, sort_recent_first};

use super::output::{emit, format_receipts, OutputFormat};
use super::Context;

/// Arguments for the export command.
#[derive(Args)]
pub struct ExportArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only export receipts matching this client name or receipt number
    #[arg(short, long)]
    query: Option<String>,
}

pub fn run(args: ExportArgs, ctx: &Context) -> anyhow::Result<()> {
    let receipts = ctx.store.try_load_all()?;
    let mut selected = filter(&receipts, args.query.as_deref().unwrap_or(""));
    sort_recent_first(&mut selected);

    emit(&format_receipts(&selected, args.format)?, args.output.as_deref())
}
