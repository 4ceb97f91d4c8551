//! Debug utilities for inspecting raw slot tables
//!
//! This module provides:
//! - Static per-record field tables (`DISPLAY_FIELDS`, `RECAST_FIELDS`)
//! - One-line record formatting (`format_record`)
//! - Column-aligned dumps of a bar or a whole table (`format_bar`, `format_table`)

mod dump;
mod fields;

pub use dump::{format_bar, format_record, format_table};
pub use fields::{DISPLAY_FIELDS, DebugFields, FieldFormatter, RECAST_FIELDS};
