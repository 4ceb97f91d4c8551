//! Slot and bar command implementations.

use std::path::Path;

use anyhow::Result;
use hotbar::{FrameTicker, HotbarTable, HotbarTableConfig, HotbarType, SlotView};
use owo_colors::OwoColorize;

use super::{open_snapshot, signatures_or_builtin};

/// Run the slot command
pub fn run_slot(signatures: Option<&Path>, snapshot: &Path, bar: u8, slot: u8) -> Result<()> {
    let config = HotbarTableConfig::builder()
        .signatures(signatures_or_builtin(signatures))
        .build();
    let snapshot = open_snapshot(snapshot)?;
    let ticker = FrameTicker::new();
    let table = HotbarTable::with_config(&snapshot, &ticker, config);

    let label = HotbarType::from_u8(bar).map_or("???", |b| b.short_label());
    println!("{}", format!("=== [{}] [Slot{:02}] ===", label, slot as u16 + 1).bold());

    match table.get_raw(bar, slot)? {
        Some(view) => println!("{}", serde_json::to_string_pretty(&*view)?),
        None => println!("{}", "absent".yellow()),
    }

    Ok(())
}

/// Run the bar command
pub fn run_bar(signatures: Option<&Path>, snapshot: &Path, bar: u8) -> Result<()> {
    let config = HotbarTableConfig::builder()
        .signatures(signatures_or_builtin(signatures))
        .build();
    let snapshot = open_snapshot(snapshot)?;
    let ticker = FrameTicker::new();
    let table = HotbarTable::with_config(&snapshot, &ticker, config);

    let Some(views) = table.bar_raw(bar)? else {
        println!("{}", format!("Unknown bar {}", bar).yellow());
        return Ok(());
    };

    let label = HotbarType::from_u8(bar).map_or("???", |b| b.short_label());
    println!("{}", format!("=== [{}] ===", label).bold());

    let views: Vec<Option<&SlotView>> = views.iter().map(|v| v.as_deref()).collect();
    println!("{}", serde_json::to_string_pretty(&views)?);

    Ok(())
}
