//! Demo command implementation.

use std::path::Path;

use anyhow::Result;
use hotbar::{
    HotbarType, RawDisplayRecord, RawRecastRecord, SlotCoordinate, SnapshotBuilder, encode_table,
};
use owo_colors::OwoColorize;

use super::hex_utils::format_hex_address;
use super::signatures_or_builtin;

/// Packed modifier code for Ctrl
const CTRL: u16 = 41666;
/// Packed modifier code for Shift+Alt
const SHIFT_ALT: u16 = 48322;

/// (bar, slot, name, keybind label, modifiers, key code, action id, recast)
type DemoSlot = (HotbarType, u8, &'static str, &'static str, u16, u16, i32, RawRecastRecord);

fn ready(cost: i32) -> RawRecastRecord {
    RawRecastRecord {
        category: 1,
        slot_type: 1,
        is_available: true,
        has_charges_available: true,
        cost_or_cooldown: cost,
        in_range: true,
        ..Default::default()
    }
}

fn demo_slots() -> Vec<DemoSlot> {
    vec![
        (HotbarType::Hotbar1, 0, "Fire", "[1]", 49, 49, 141, ready(800)),
        (HotbarType::Hotbar1, 1, "Blizzard", "[2]", 50, 50, 142, ready(400)),
        (HotbarType::Hotbar1, 2, "Thunder", "[3]", 51, 51, 144, RawRecastRecord {
            proc_or_combo: 1,
            ..ready(400)
        }),
        (HotbarType::Hotbar1, 3, "Transpose", "[4]", 52, 52, 149, RawRecastRecord {
            is_available: false,
            cooldown_percent: 40,
            ..ready(5)
        }),
        (HotbarType::Hotbar2, 0, "Swiftcast", "[C1]", CTRL, 49, 7561, ready(60)),
        (HotbarType::Hotbar2, 1, "Lucid Dreaming", "[SA2]", SHIFT_ALT, 50, 7562, ready(60)),
        (HotbarType::CrossHotbar1, 4, "Sprint", "", 0, 0, 3, ready(0)),
    ]
}

/// Run the demo command
pub fn run(signatures: Option<&Path>, output: &Path) -> Result<()> {
    let signatures = signatures_or_builtin(signatures);

    let mut displays = Vec::new();
    let mut recasts = Vec::new();
    for (bar, slot, name, keybind, modifiers, key_code, id, recast) in demo_slots() {
        let Some(coord) = SlotCoordinate::new(bar, slot) else {
            continue;
        };
        displays.push((
            coord,
            RawDisplayRecord {
                name: format!("{}{}", name, keybind),
                keybind: keybind.to_string(),
                modifiers,
                key_code,
                id,
                id2: id,
                icon_id: id + 2000,
                ..Default::default()
            },
        ));
        recasts.push((coord, RawRecastRecord { id, icon: id + 2000, ..recast }));
    }
    let populated = displays.len();

    let layout = SnapshotBuilder::new(signatures)
        .hotbar_table(encode_table(displays))
        .recast_table(encode_table(recasts))
        .build()?;
    let addresses = layout.addresses;
    layout.into_snapshot().save(output)?;

    println!("{}", "=== Demo snapshot ===".bold());
    println!("Hotbar table: {}", format_hex_address(addresses.hotbar));
    println!("Recast table: {}", format_hex_address(addresses.recast));
    println!("Populated slots: {}", populated);
    println!("Saved to: {}", output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotbar::{FrameTicker, HotbarTable, MemorySnapshot};
    use tempfile::NamedTempFile;

    #[test]
    fn test_demo_snapshot_reads_back() {
        let temp_file = NamedTempFile::new().unwrap();
        run(None, temp_file.path()).unwrap();

        let snapshot = MemorySnapshot::load(temp_file.path()).unwrap();
        let ticker = FrameTicker::new();
        let table = HotbarTable::new(&snapshot, &ticker);

        let fire = table.get_raw(0, 0).unwrap().unwrap();
        assert_eq!(fire.name(), "Fire");
        assert_eq!(fire.keybind(), "1");
        assert_eq!(fire.cost(), 800);

        let swiftcast = table.get_raw(1, 0).unwrap().unwrap();
        assert_eq!(swiftcast.keybind(), "C1");
        assert_eq!(swiftcast.modifier_vk_codes(), vec![17]);

        let sprint = table.get_raw(10, 4).unwrap().unwrap();
        assert_eq!(sprint.name(), "Sprint");
        assert_eq!(sprint.key_code(), 0);
    }
}
