//! Show command - print or save a single receipt.

use std::path::PathBuf;

use clap::Args;
use console::style;

use super::output::{emit, format_receipt, OutputFormat};
use super::Context;

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Receipt number (or unambiguous prefix)
    id: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report inconsistencies in the stored receipt
    #[arg(long)]
    validate: bool,
}

pub fn run(args: ShowArgs, ctx: &Context) -> anyhow::Result<()> {
    let receipt = ctx.find_receipt(&args.id)?;

    if args.validate {
        let issues = receipt.validate();
        if !issues.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    emit(&format_receipt(&receipt, args.format)?, args.output.as_deref())
}
