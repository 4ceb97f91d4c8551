//! Hex address parsing and formatting utilities.

use anyhow::{Result, anyhow};

/// Parse a hex address, with or without a `0x` prefix
pub fn parse_hex_address(s: &str) -> Result<u64> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u64::from_str_radix(digits, 16).map_err(|e| anyhow!("Invalid hex address '{}': {}", s, e))
}

pub fn format_hex_address(addr: u64) -> String {
    format!("0x{:X}", addr)
}

/// Signed offset as `+0x10` / `-0x10`
pub fn format_signed_offset(offset: i128) -> String {
    let sign = if offset < 0 { "-" } else { "+" };
    format!("{}0x{:X}", sign, offset.unsigned_abs())
}
