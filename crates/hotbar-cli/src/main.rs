use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::dump::TableKind;

#[derive(Parser)]
#[command(name = "hotbar")]
#[command(about = "Inspect hotbar and recast tables in a memory snapshot")]
struct Args {
    /// Signature set (JSON); the builtin set is used when absent or unreadable
    #[arg(short, long, global = true)]
    signatures: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a synthetic snapshot with a few populated slots
    Demo {
        #[arg(short, long, default_value = "snapshot.json")]
        output: PathBuf,
    },
    /// Print the raw tables of a snapshot, one line per slot
    Dump {
        snapshot: PathBuf,
        #[arg(short, long, value_enum, default_value_t = TableKind::Both)]
        table: TableKind,
    },
    /// Print one slot view as JSON
    Slot {
        snapshot: PathBuf,
        /// Bar index (0-19)
        bar: u8,
        /// Slot index (0-15)
        slot: u8,
    },
    /// Print all 16 slot views of a bar as JSON
    Bar {
        snapshot: PathBuf,
        /// Bar index (0-19)
        bar: u8,
    },
    /// Print or save the builtin signature set
    Signatures {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Distance between two addresses, and the rel32 displacement encoding it
    Offset {
        /// Address of the displacement (hex)
        from: String,
        /// Target address (hex)
        to: String,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("hotbar=info".parse()?))
        .init();

    let args = Args::parse();
    let signatures = args.signatures.as_deref();

    match args.command {
        Command::Demo { output } => commands::demo::run(signatures, &output),
        Command::Dump { snapshot, table } => commands::dump::run(signatures, &snapshot, table),
        Command::Slot {
            snapshot,
            bar,
            slot,
        } => commands::slot::run_slot(signatures, &snapshot, bar, slot),
        Command::Bar { snapshot, bar } => commands::slot::run_bar(signatures, &snapshot, bar),
        Command::Signatures { output } => commands::signatures::run(output.as_deref()),
        Command::Offset { from, to } => commands::offset::run(&from, &to),
    }
}
