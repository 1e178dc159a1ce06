//! CLI application for payment receipts.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, delete, edit, export, list, new, show, Context};

/// Payment receipts - create, search and export receipts ("notas de pagamento")
#[derive(Parser)]
#[command(name = "recibo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding saved receipts
    #[arg(long, global = true, env = "RECIBO_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create and confirm a new receipt
    New(new::NewArgs),

    /// List saved receipts, most recent first
    List(list::ListArgs),

    /// Show a single receipt
    Show(show::ShowArgs),

    /// Reopen a saved receipt, change it and confirm it again
    Edit(edit::EditArgs),

    /// Delete a recently created receipt
    Delete(delete::DeleteArgs),

    /// Export all saved receipts
    Export(export::ExportArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let context = || Context::load(cli.config.as_deref(), cli.data_dir.clone());

    // Execute command
    match cli.command {
        Commands::New(args) => new::run(args, &context()?),
        Commands::List(args) => list::run(args, &context()?),
        Commands::Show(args) => show::run(args, &context()?),
        Commands::Edit(args) => edit::run(args, &context()?),
        Commands::Delete(args) => delete::run(args, &context()?),
        Commands::Export(args) => export::run(args, &context()?),
        Commands::Config(args) => config::run(args, cli.config.as_deref()),
    }
}
