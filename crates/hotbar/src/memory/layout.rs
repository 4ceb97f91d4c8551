//! Memory layout constants for the hotbar and recast tables
//!
//! Both tables hold 20 bars of 16 slots stored contiguously, bar-major.
//! Offsets are relative to the start of one slot record.

/// Number of bars in each table
pub const NUM_BARS: usize = 20;

/// Number of slots in each bar
pub const NUM_SLOTS: usize = 16;

/// Display (hotbar) slot record, packed on 2-byte boundaries
///
/// ```text
/// Offset   Field              Size    Description
/// ──────────────────────────────────────────────────────
/// 0x00     Name               102     UTF-8, NUL-terminated
/// 0x66     Keybind            32      UTF-8, NUL-terminated, e.g. "[C1]"
/// 0x86     Modifiers          2       Packed modifier code
/// 0x88     KeyCode            2       Primary virtual-key code
/// 0x8A     (reserved)         12
/// 0x96     Id                 4
/// 0x9A     Id2                4       Repeats Id
/// 0x9E     IconId             4
/// 0xA2     (reserved)         62
/// ```
pub mod display {
    pub const NAME: usize = 0;
    pub const NAME_LEN: usize = 102;

    pub const KEYBIND: usize = NAME + NAME_LEN;
    pub const KEYBIND_LEN: usize = 32;

    pub const MODIFIERS: usize = KEYBIND + KEYBIND_LEN;
    pub const KEY_CODE: usize = MODIFIERS + 2;

    pub const PADDING: usize = KEY_CODE + 2;
    pub const PADDING_LEN: usize = 12;

    pub const ID: usize = PADDING + PADDING_LEN;
    pub const ID2: usize = ID + 4;
    pub const ICON_ID: usize = ID2 + 4;

    pub const UNKNOWN: usize = ICON_ID + 4;
    pub const UNKNOWN_LEN: usize = 62;

    pub const SLOT_SIZE: usize = 224;
    pub const BAR_SIZE: usize = super::NUM_SLOTS * SLOT_SIZE;
    pub const TABLE_SIZE: usize = super::NUM_BARS * BAR_SIZE;

    const _: () = assert!(UNKNOWN + UNKNOWN_LEN == SLOT_SIZE);
}

/// Recast slot record, natural alignment, 32-bit booleans
///
/// ```text
/// Offset   Field              Size    Description
/// ──────────────────────────────────────────────────────
/// 0x00     Category           4
/// 0x04     (reserved)         4
/// 0x08     Type               4
/// 0x0C     Id                 4
/// 0x10     Icon               4
/// 0x14     IsAvailable        4
/// 0x18     HasCharges         4
/// 0x1C     (reserved)         4
/// 0x20     GcdPercent         4
/// 0x24     CooldownPercent    4
/// 0x28     CostOrCooldown     4       Cost or seconds, by slot type
/// 0x2C     ItemQuantity       4
/// 0x30     (reserved)         8
/// 0x38     ProcOrCombo        4
/// 0x3C     InRange            4
/// ```
pub mod recast {
    pub const WORD: usize = 4;

    pub const CATEGORY: usize = 0;
    pub const UNKNOWN1: usize = WORD;
    pub const UNKNOWN1_LEN: usize = 4;
    pub const TYPE: usize = WORD * 2;
    pub const ID: usize = WORD * 3;
    pub const ICON: usize = WORD * 4;
    pub const IS_AVAILABLE: usize = WORD * 5;
    pub const HAS_CHARGES: usize = WORD * 6;
    pub const UNKNOWN2: usize = WORD * 7;
    pub const UNKNOWN2_LEN: usize = 4;
    pub const GCD_PERCENT: usize = WORD * 8;
    pub const COOLDOWN_PERCENT: usize = WORD * 9;
    pub const COST_OR_COOLDOWN: usize = WORD * 10;
    pub const ITEM_QUANTITY: usize = WORD * 11;
    pub const UNKNOWN3: usize = WORD * 12;
    pub const UNKNOWN3_LEN: usize = 8;
    pub const PROC_OR_COMBO: usize = WORD * 14;
    pub const IN_RANGE: usize = WORD * 15;

    pub const SLOT_SIZE: usize = 64;
    pub const BAR_SIZE: usize = super::NUM_SLOTS * SLOT_SIZE;
    pub const TABLE_SIZE: usize = super::NUM_BARS * BAR_SIZE;

    const _: () = assert!(IN_RANGE + WORD == SLOT_SIZE);
}
