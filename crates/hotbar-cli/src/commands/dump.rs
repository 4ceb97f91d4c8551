//! Dump command implementation.

use std::path::Path;

use anyhow::{Result, bail};
use clap::ValueEnum;
use hotbar::{RawDisplayRecord, RawRecastRecord, SlotRecord, format_table, resolve_table_addresses};
use owo_colors::OwoColorize;

use super::hex_utils::format_hex_address;
use super::{open_snapshot, signatures_or_builtin};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableKind {
    Display,
    Recast,
    Both,
}

/// Run the dump command
pub fn run(signatures: Option<&Path>, snapshot: &Path, table: TableKind) -> Result<()> {
    let signatures = signatures_or_builtin(signatures);
    let snapshot = open_snapshot(snapshot)?;

    let Some(addresses) = resolve_table_addresses(&snapshot, &signatures)? else {
        bail!(
            "Table addresses did not resolve with signatures {}",
            signatures.version
        );
    };

    if table != TableKind::Recast {
        let bars = RawDisplayRecord::read_table(&snapshot, addresses.hotbar)?;
        println!(
            "{}",
            format!("=== Hotbar table ({}) ===", format_hex_address(addresses.hotbar)).bold()
        );
        print!("{}", format_table(&bars));
    }

    if table != TableKind::Display {
        if table == TableKind::Both {
            println!();
        }
        let bars = RawRecastRecord::read_table(&snapshot, addresses.recast)?;
        println!(
            "{}",
            format!("=== Recast table ({}) ===", format_hex_address(addresses.recast)).bold()
        );
        print!("{}", format_table(&bars));
    }

    Ok(())
}
