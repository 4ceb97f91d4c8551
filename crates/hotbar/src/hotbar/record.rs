//! Raw slot records as they sit in the host's memory
//!
//! Each record type decodes from and encodes to its exact byte layout
//! (see [`crate::memory::layout`]). Reserved regions are kept verbatim so a
//! decode/encode pass reproduces the input bytes for well-formed text.

use crate::error::{Error, Result};
use crate::hotbar::SlotCoordinate;
use crate::memory::layout::{NUM_BARS, NUM_SLOTS, display, recast};
use crate::memory::{ByteBuffer, ReadMemory, encode_c_string};

/// Fixed-size record type stored 16 per bar, 20 bars per table
pub trait SlotRecord: Sized {
    const SLOT_SIZE: usize;
    const BAR_SIZE: usize = NUM_SLOTS * Self::SLOT_SIZE;
    const TABLE_SIZE: usize = NUM_BARS * Self::BAR_SIZE;

    /// Decode one record; `None` if fewer than `SLOT_SIZE` bytes are given
    fn from_bytes(bytes: &[u8]) -> Option<Self>;

    fn to_bytes(&self) -> Vec<u8>;

    /// Address of the record at `coord` in a table starting at `base`
    fn address_of(base: u64, coord: SlotCoordinate) -> u64 {
        let offset = coord.bar().index() * Self::BAR_SIZE + coord.slot() as usize * Self::SLOT_SIZE;
        base.wrapping_add(offset as u64)
    }

    /// Decode only the record at `coord`
    fn read_at<R: ReadMemory>(reader: &R, base: u64, coord: SlotCoordinate) -> Result<Self> {
        let address = Self::address_of(base, coord);
        let bytes = reader.read_bytes(address, Self::SLOT_SIZE)?;
        Self::from_bytes(&bytes).ok_or_else(|| Error::short_read(address, bytes.len()))
    }

    /// Decode the whole table, bars outer and slots inner
    fn read_table<R: ReadMemory>(reader: &R, base: u64) -> Result<Vec<[Self; NUM_SLOTS]>> {
        let bytes = reader.read_bytes(base, Self::TABLE_SIZE)?;
        if bytes.len() < Self::TABLE_SIZE {
            return Err(Error::short_read(base, bytes.len()));
        }

        let mut bars = Vec::with_capacity(NUM_BARS);
        for (index, bar) in bytes[..Self::TABLE_SIZE].chunks_exact(Self::BAR_SIZE).enumerate() {
            let slots = bar
                .chunks_exact(Self::SLOT_SIZE)
                .map(Self::from_bytes)
                .collect::<Option<Vec<_>>>()
                .and_then(|slots| <[Self; NUM_SLOTS]>::try_from(slots).ok());
            let bar_address = base.wrapping_add((index * Self::BAR_SIZE) as u64);
            bars.push(slots.ok_or_else(|| Error::short_read(bar_address, bar.len()))?);
        }
        Ok(bars)
    }
}

/// Display configuration of one slot (224 bytes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDisplayRecord {
    pub name: String,
    pub keybind: String,
    /// Packed modifier code; see [`decode_modifiers`](crate::hotbar::decode_modifiers)
    pub modifiers: u16,
    pub key_code: u16,
    pub padding: [u8; display::PADDING_LEN],
    pub id: i32,
    /// Always observed equal to `id`
    pub id2: i32,
    pub icon_id: i32,
    pub unknown: [u8; display::UNKNOWN_LEN],
}

impl Default for RawDisplayRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            keybind: String::new(),
            modifiers: 0,
            key_code: 0,
            padding: [0; display::PADDING_LEN],
            id: 0,
            id2: 0,
            icon_id: 0,
            unknown: [0; display::UNKNOWN_LEN],
        }
    }
}

impl SlotRecord for RawDisplayRecord {
    const SLOT_SIZE: usize = display::SLOT_SIZE;

    fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SLOT_SIZE {
            return None;
        }
        let buf = ByteBuffer::new(bytes);

        let mut padding = [0u8; display::PADDING_LEN];
        padding.copy_from_slice(buf.bytes_at(display::PADDING, display::PADDING_LEN));
        let mut unknown = [0u8; display::UNKNOWN_LEN];
        unknown.copy_from_slice(buf.bytes_at(display::UNKNOWN, display::UNKNOWN_LEN));

        Some(Self {
            name: buf.string_at(display::NAME, display::NAME_LEN),
            keybind: buf.string_at(display::KEYBIND, display::KEYBIND_LEN),
            modifiers: buf.u16_at(display::MODIFIERS),
            key_code: buf.u16_at(display::KEY_CODE),
            padding,
            id: buf.i32_at(display::ID),
            id2: buf.i32_at(display::ID2),
            icon_id: buf.i32_at(display::ICON_ID),
            unknown,
        })
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(Self::SLOT_SIZE);
        bytes.extend(encode_c_string(&self.name, display::NAME_LEN));
        bytes.extend(encode_c_string(&self.keybind, display::KEYBIND_LEN));
        bytes.extend(self.modifiers.to_le_bytes());
        bytes.extend(self.key_code.to_le_bytes());
        bytes.extend(self.padding);
        bytes.extend(self.id.to_le_bytes());
        bytes.extend(self.id2.to_le_bytes());
        bytes.extend(self.icon_id.to_le_bytes());
        bytes.extend(self.unknown);
        debug_assert_eq!(bytes.len(), Self::SLOT_SIZE);
        bytes
    }
}

/// Cooldown and availability state of one slot (64 bytes)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecastRecord {
    pub category: i32,
    pub unknown1: [u8; recast::UNKNOWN1_LEN],
    pub slot_type: i32,
    pub id: i32,
    pub icon: i32,
    pub is_available: bool,
    pub has_charges_available: bool,
    pub unknown2: [u8; recast::UNKNOWN2_LEN],
    pub gcd_cooldown_percent: i32,
    pub cooldown_percent: i32,
    /// Cost for actions with a resource cost, cooldown seconds otherwise
    pub cost_or_cooldown: i32,
    /// Equals `cost_or_cooldown` for items
    pub item_quantity: i32,
    pub unknown3: [u8; recast::UNKNOWN3_LEN],
    pub proc_or_combo: i32,
    pub in_range: bool,
}

impl SlotRecord for RawRecastRecord {
    const SLOT_SIZE: usize = recast::SLOT_SIZE;

    fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SLOT_SIZE {
            return None;
        }
        let buf = ByteBuffer::new(bytes);

        let mut unknown1 = [0u8; recast::UNKNOWN1_LEN];
        unknown1.copy_from_slice(buf.bytes_at(recast::UNKNOWN1, recast::UNKNOWN1_LEN));
        let mut unknown2 = [0u8; recast::UNKNOWN2_LEN];
        unknown2.copy_from_slice(buf.bytes_at(recast::UNKNOWN2, recast::UNKNOWN2_LEN));
        let mut unknown3 = [0u8; recast::UNKNOWN3_LEN];
        unknown3.copy_from_slice(buf.bytes_at(recast::UNKNOWN3, recast::UNKNOWN3_LEN));

        Some(Self {
            category: buf.i32_at(recast::CATEGORY),
            unknown1,
            slot_type: buf.i32_at(recast::TYPE),
            id: buf.i32_at(recast::ID),
            icon: buf.i32_at(recast::ICON),
            is_available: buf.bool32_at(recast::IS_AVAILABLE),
            has_charges_available: buf.bool32_at(recast::HAS_CHARGES),
            unknown2,
            gcd_cooldown_percent: buf.i32_at(recast::GCD_PERCENT),
            cooldown_percent: buf.i32_at(recast::COOLDOWN_PERCENT),
            cost_or_cooldown: buf.i32_at(recast::COST_OR_COOLDOWN),
            item_quantity: buf.i32_at(recast::ITEM_QUANTITY),
            unknown3,
            proc_or_combo: buf.i32_at(recast::PROC_OR_COMBO),
            in_range: buf.bool32_at(recast::IN_RANGE),
        })
    }

    fn to_bytes(&self) -> Vec<u8> {
        let bool32 = |value: bool| (value as i32).to_le_bytes();

        let mut bytes = Vec::with_capacity(Self::SLOT_SIZE);
        bytes.extend(self.category.to_le_bytes());
        bytes.extend(self.unknown1);
        bytes.extend(self.slot_type.to_le_bytes());
        bytes.extend(self.id.to_le_bytes());
        bytes.extend(self.icon.to_le_bytes());
        bytes.extend(bool32(self.is_available));
        bytes.extend(bool32(self.has_charges_available));
        bytes.extend(self.unknown2);
        bytes.extend(self.gcd_cooldown_percent.to_le_bytes());
        bytes.extend(self.cooldown_percent.to_le_bytes());
        bytes.extend(self.cost_or_cooldown.to_le_bytes());
        bytes.extend(self.item_quantity.to_le_bytes());
        bytes.extend(self.unknown3);
        bytes.extend(self.proc_or_combo.to_le_bytes());
        bytes.extend(bool32(self.in_range));
        debug_assert_eq!(bytes.len(), Self::SLOT_SIZE);
        bytes
    }
}

/// Lay out a full table from records indexed by coordinate.
///
/// Slots without a record are zero-filled.
pub fn encode_table<T: SlotRecord>(
    records: impl IntoIterator<Item = (SlotCoordinate, T)>,
) -> Vec<u8> {
    let mut table = vec![0u8; T::TABLE_SIZE];
    for (coord, record) in records {
        let start = T::address_of(0, coord) as usize;
        table[start..start + T::SLOT_SIZE].copy_from_slice(&record.to_bytes());
    }
    table
}
