//! # hotbar
//!
//! Read-only access to the host's hotbar and recast tables.
//!
//! This crate provides:
//! - Pointer chain resolution from a code signature to both tables
//! - Decoding of the fixed-size display and recast slot records
//! - A per-frame slot cache and the [`HotbarTable`] lookup surface
//! - Offline memory snapshots for tools and tests
//!
//! ## Feature Flags
//!
//! - `debug-tools`: Enables record dumps and field tables for memory analysis.
//!   This feature is intended for CLI tools and development, not production use.

#[cfg(feature = "debug-tools")]
pub mod debug;
pub mod error;
pub mod framework;
pub mod hotbar;
pub mod memory;
pub mod offset;
pub mod prelude;
pub mod snapshot;

pub use error::{Error, Result};
pub use framework::{FrameTickSource, FrameTicker, TickHandle};
pub use hotbar::{
    AddressState, HotbarTable, HotbarTableConfig, HotbarTableConfigBuilder, HotbarType,
    ModifierKey, RawDisplayRecord, RawRecastRecord, SlotCache, SlotCoordinate, SlotRecord,
    SlotView, decode_modifiers, encode_table,
};
pub use memory::{ByteBuffer, ReadMemory, SignatureScanner, find_pattern};
pub use offset::{
    PointerSignature, ResolvedAddresses, TableSignatures, builtin_signatures, load_signatures,
    resolve_pointer_path, resolve_table_addresses, save_signatures,
};
pub use snapshot::{MemoryRegion, MemorySnapshot, SnapshotBuilder, SnapshotLayout};

// Debug utilities (requires debug-tools feature)
#[cfg(feature = "debug-tools")]
pub use debug::{
    DISPLAY_FIELDS, DebugFields, FieldFormatter, RECAST_FIELDS, format_bar, format_record,
    format_table,
};
