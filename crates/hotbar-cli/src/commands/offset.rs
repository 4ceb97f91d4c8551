//! Offset command implementation.

use super::hex_utils::{format_hex_address, format_signed_offset, parse_hex_address};
use anyhow::Result;

/// Length of the displacement operand a relative hop skips
const REL32_LEN: i128 = 4;

/// Displacement that makes a relative hop at `from` land on `to`, if it fits in 32 bits
pub fn rel32_displacement(from: u64, to: u64) -> Option<i32> {
    i32::try_from(to as i128 - (from as i128 + REL32_LEN)).ok()
}

/// Run the offset command
pub fn run(from: &str, to: &str) -> Result<()> {
    let from_addr = parse_hex_address(from)?;
    let to_addr = parse_hex_address(to)?;

    println!("From: {}", format_hex_address(from_addr));
    println!("To:   {}", format_hex_address(to_addr));
    println!();
    println!(
        "Offset: {}",
        format_signed_offset(to_addr as i128 - from_addr as i128)
    );

    match rel32_displacement(from_addr, to_addr) {
        Some(disp) => println!(
            "rel32:  {} (bytes {:02X?})",
            format_signed_offset(disp as i128),
            disp.to_le_bytes()
        ),
        None => println!("rel32:  out of range"),
    }

    Ok(())
}
