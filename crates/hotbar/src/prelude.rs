//! Prelude module for convenient imports
//!
//! ```ignore
//! use hotbar::prelude::*;
//! ```
//!
//! This brings the following into scope:
//!
//! - Table: `HotbarTable`, `HotbarTableConfig`, `FrameTicker`
//! - Slots: `HotbarType`, `SlotCoordinate`, `SlotView`, `ModifierKey`
//! - Memory access traits: `ReadMemory`, `SignatureScanner`
//! - Error handling: `Error`, `Result`

// Table and frame events
pub use crate::framework::{FrameTickSource, FrameTicker};
pub use crate::hotbar::{HotbarTable, HotbarTableConfig};

// Error handling
pub use crate::error::{Error, Result};

// Slot types
pub use crate::hotbar::{HotbarType, ModifierKey, SlotCoordinate, SlotView};

// Memory backends
pub use crate::memory::{ReadMemory, SignatureScanner};
pub use crate::offset::TableSignatures;
