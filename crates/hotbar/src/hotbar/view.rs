use serde::Serialize;
use strum::{Display, IntoStaticStr};

use crate::hotbar::{RawDisplayRecord, RawRecastRecord};

/// Modifier key, with its virtual-key code and key-mask bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, IntoStaticStr, Display)]
pub enum ModifierKey {
    Ctrl,
    Shift,
    Alt,
}

impl ModifierKey {
    /// Virtual-key code (SHIFT = 16, CTRL = 17, ALT = 18)
    pub fn vk_code(&self) -> u16 {
        match self {
            Self::Shift => 16,
            Self::Ctrl => 17,
            Self::Alt => 18,
        }
    }

    /// Key-mask bit (SHIFT = 0x10000, CTRL = 0x20000, ALT = 0x40000)
    pub fn mask(&self) -> u32 {
        match self {
            Self::Shift => 0x1_0000,
            Self::Ctrl => 0x2_0000,
            Self::Alt => 0x4_0000,
        }
    }
}

/// Decode the packed modifier field of a display record.
///
/// Only these seven values have been observed (binding Ctrl/Shift/Alt
/// combinations to "1"); every other value, including a bare key code,
/// means no modifiers.
pub fn decode_modifiers(raw: u16) -> &'static [ModifierKey] {
    use ModifierKey::*;

    match raw {
        41666 => &[Ctrl],
        42946 => &[Shift],
        43714 => &[Alt],
        48322 => &[Shift, Alt],
        48578 => &[Ctrl, Shift],
        48834 => &[Ctrl, Alt],
        46786 => &[Ctrl, Shift, Alt],
        _ => &[],
    }
}

/// Interpreted, read-only view of one slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotView {
    name: String,
    keybind: String,
    key_code: u16,
    modifiers: &'static [ModifierKey],
    category: i32,
    slot_type: i32,
    id: i32,
    icon: i32,
    is_available: bool,
    has_charges_available: bool,
    gcd_cooldown_percent: i32,
    cooldown_percent: i32,
    cost_or_cooldown: i32,
    item_quantity: i32,
    is_proc_or_combo: bool,
    in_range: bool,
}

impl SlotView {
    pub fn new(display: &RawDisplayRecord, recast: &RawRecastRecord) -> Self {
        Self {
            name: display_name(&display.name, &display.keybind),
            keybind: display
                .keybind
                .trim_matches(|c| c == ' ' || c == '[' || c == ']')
                .to_string(),
            key_code: if display.key_code == 0 {
                display.modifiers
            } else {
                display.key_code
            },
            modifiers: decode_modifiers(display.modifiers),
            category: recast.category,
            slot_type: recast.slot_type,
            id: recast.id,
            icon: recast.icon,
            is_available: recast.is_available,
            has_charges_available: recast.has_charges_available,
            gcd_cooldown_percent: recast.gcd_cooldown_percent,
            cooldown_percent: recast.cooldown_percent,
            cost_or_cooldown: recast.cost_or_cooldown,
            item_quantity: recast.item_quantity,
            is_proc_or_combo: recast.proc_or_combo > 0,
            in_range: recast.in_range,
        }
    }

    /// Name of the action, with the keybind label removed
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Keybind shown on hover, without brackets
    pub fn keybind(&self) -> &str {
        &self.keybind
    }

    /// Primary virtual-key code of the keybind
    pub fn key_code(&self) -> u16 {
        self.key_code
    }

    pub fn modifiers(&self) -> &'static [ModifierKey] {
        self.modifiers
    }

    pub fn modifier_vk_codes(&self) -> Vec<u16> {
        self.modifiers.iter().map(ModifierKey::vk_code).collect()
    }

    pub fn modifier_mask(&self) -> u32 {
        self.modifiers.iter().fold(0, |mask, m| mask | m.mask())
    }

    pub fn category(&self) -> i32 {
        self.category
    }

    pub fn slot_type(&self) -> i32 {
        self.slot_type
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn icon(&self) -> i32 {
        self.icon
    }

    pub fn is_available(&self) -> bool {
        self.is_available
    }

    /// For slots with charges, whether any are left; always true otherwise
    pub fn has_charges_available(&self) -> bool {
        self.has_charges_available
    }

    pub fn gcd_cooldown_percent(&self) -> i32 {
        self.gcd_cooldown_percent
    }

    pub fn cooldown_percent(&self) -> i32 {
        self.cooldown_percent
    }

    /// MP/CP/GP cost. Same field as [`cooldown_seconds`](Self::cooldown_seconds).
    pub fn cost(&self) -> i32 {
        self.cost_or_cooldown
    }

    /// Recast time in seconds. Same field as [`cost`](Self::cost).
    pub fn cooldown_seconds(&self) -> i32 {
        self.cost_or_cooldown
    }

    /// Charges or item count
    pub fn item_quantity(&self) -> i32 {
        self.item_quantity
    }

    pub fn is_proc_or_combo(&self) -> bool {
        self.is_proc_or_combo
    }

    pub fn in_range(&self) -> bool {
        self.in_range
    }
}

/// Strip the first occurrence of the keybind label from the name
fn display_name(name: &str, keybind: &str) -> String {
    if keybind.is_empty() {
        return name.to_string();
    }
    name.replacen(keybind, "", 1)
}
