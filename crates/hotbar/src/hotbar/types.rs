use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, FromRepr, IntoEnumIterator, IntoStaticStr};

use crate::memory::layout::NUM_SLOTS;

/// The 20 bars, in table order
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    FromRepr,
    EnumIter,
    EnumCount,
    IntoStaticStr,
    Display,
)]
#[repr(u8)]
pub enum HotbarType {
    Hotbar1 = 0,
    Hotbar2 = 1,
    Hotbar3 = 2,
    Hotbar4 = 3,
    Hotbar5 = 4,
    Hotbar6 = 5,
    Hotbar7 = 6,
    Hotbar8 = 7,
    Hotbar9 = 8,
    Hotbar10 = 9,
    CrossHotbar1 = 10,
    CrossHotbar2 = 11,
    CrossHotbar3 = 12,
    CrossHotbar4 = 13,
    CrossHotbar5 = 14,
    CrossHotbar6 = 15,
    CrossHotbar7 = 16,
    CrossHotbar8 = 17,
    PetBar = 18,
    CrossPetBar = 19,
}

impl HotbarType {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Three-letter label used in table dumps
    pub fn short_label(&self) -> &'static str {
        match self {
            Self::Hotbar1 => "HB1",
            Self::Hotbar2 => "HB2",
            Self::Hotbar3 => "HB3",
            Self::Hotbar4 => "HB4",
            Self::Hotbar5 => "HB5",
            Self::Hotbar6 => "HB6",
            Self::Hotbar7 => "HB7",
            Self::Hotbar8 => "HB8",
            Self::Hotbar9 => "HB9",
            Self::Hotbar10 => "HB0",
            Self::CrossHotbar1 => "XB1",
            Self::CrossHotbar2 => "XB2",
            Self::CrossHotbar3 => "XB3",
            Self::CrossHotbar4 => "XB4",
            Self::CrossHotbar5 => "XB5",
            Self::CrossHotbar6 => "XB6",
            Self::CrossHotbar7 => "XB7",
            Self::CrossHotbar8 => "XB8",
            Self::PetBar => "PET",
            Self::CrossPetBar => "XPT",
        }
    }
}

/// A (bar, slot) position; the slot is always below 16
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SlotCoordinate {
    bar: HotbarType,
    slot: u8,
}

impl SlotCoordinate {
    pub fn new(bar: HotbarType, slot: u8) -> Option<Self> {
        ((slot as usize) < NUM_SLOTS).then_some(Self { bar, slot })
    }

    pub fn from_raw(bar: u8, slot: u8) -> Option<Self> {
        Self::new(HotbarType::from_u8(bar)?, slot)
    }

    pub fn bar(&self) -> HotbarType {
        self.bar
    }

    pub fn slot(&self) -> u8 {
        self.slot
    }

    /// Every coordinate, bars outer and slots inner
    pub fn all() -> impl Iterator<Item = SlotCoordinate> + Clone {
        HotbarType::iter().flat_map(Self::in_bar)
    }

    /// The 16 coordinates of one bar in slot order
    pub fn in_bar(bar: HotbarType) -> impl Iterator<Item = SlotCoordinate> + Clone {
        (0..NUM_SLOTS as u8).map(move |slot| SlotCoordinate { bar, slot })
    }
}

impl std::fmt::Display for SlotCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] [Slot{:02}]", self.bar.short_label(), self.slot + 1)
    }
}
