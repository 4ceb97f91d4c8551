//! Pointer chain resolution from a signature match to a live table address

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::memory::{ReadMemory, SignatureScanner};
use crate::offset::{PointerSignature, TableSignatures, format_pattern};

/// Length of the rel32 displacement the first hop skips over
const REL32_LEN: i64 = 4;

/// Base addresses of both tables, resolved once per table lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAddresses {
    pub hotbar: u64,
    pub recast: u64,
}

/// Walk `offsets` from `base`, returning the address of the last hop.
///
/// Each hop adds its offset to the current address; the result is then
/// dereferenced to give the next current address. With `relative_first_hop`
/// the first hop instead reads a signed 32-bit displacement and continues at
/// `candidate + disp + 4`. The final hop is dereferenced like every other,
/// but the returned address is the one before that dereference, i.e. the
/// table itself rather than its first 8 bytes.
///
/// A zero candidate at any hop yields 0 ("not ready"). Read failures
/// propagate.
pub fn resolve_pointer_path<R: ReadMemory>(
    reader: &R,
    base: u64,
    offsets: &[i64],
    relative_first_hop: bool,
) -> Result<u64> {
    let mut relative = relative_first_hop;
    let mut candidate = base;
    let mut next = base;

    for &offset in offsets {
        candidate = next.wrapping_add_signed(offset);
        if candidate == 0 {
            trace!("Pointer chain hit a zero address");
            return Ok(0);
        }

        if relative {
            relative = false;
            let disp = reader.read_i32(candidate)?;
            next = candidate.wrapping_add_signed(disp as i64 + REL32_LEN);
            trace!("  0x{:X} -> 0x{:X} (rel32 {:+})", candidate, next, disp);
        } else {
            next = reader.read_ptr(candidate)?;
            trace!("  0x{:X} -> 0x{:X}", candidate, next);
        }
    }

    Ok(candidate)
}

/// Scan for `signature` and follow its chain; `None` if either step comes up empty
pub fn resolve_signature<R>(reader: &R, signature: &PointerSignature) -> Result<Option<u64>>
where
    R: ReadMemory + SignatureScanner,
{
    let pattern = signature.pattern_bytes()?;
    let Some(matched) = reader.scan_text(&pattern) else {
        debug!("Signature not found: {}", format_pattern(&pattern));
        return Ok(None);
    };

    let base = matched.wrapping_add_signed(signature.signature_offset);
    let address = resolve_pointer_path(
        reader,
        base,
        &signature.offsets,
        signature.relative_first_hop,
    )?;

    Ok((address != 0).then_some(address))
}

/// Resolve both table addresses; `None` unless both chains land on a non-zero address
pub fn resolve_table_addresses<R>(
    reader: &R,
    signatures: &TableSignatures,
) -> Result<Option<ResolvedAddresses>>
where
    R: ReadMemory + SignatureScanner,
{
    let hotbar = resolve_signature(reader, &signatures.hotbar)?;
    debug!("Hotbar table address {:X?}", hotbar);

    let recast = resolve_signature(reader, &signatures.recast)?;
    debug!("Recast table address {:X?}", recast);

    match (hotbar, recast) {
        (Some(hotbar), Some(recast)) => Ok(Some(ResolvedAddresses { hotbar, recast })),
        _ => {
            warn!(
                "Table addresses unresolved (signatures {}), slots stay unavailable",
                signatures.version
            );
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MockMemoryBuilder;

    #[test]
    fn test_plain_chain_returns_last_candidate() {
        // 0x1000 -> [0x1000 + 8] = 0x2000 -> [0x2000 + 16] = 0x3000 -> candidate 0x3000 + 4
        let mock = MockMemoryBuilder::new()
            .pointer(0x1008, 0x2000)
            .pointer(0x2010, 0x3000)
            .region(0x3000, vec![0; 16])
            .build();

        let addr = resolve_pointer_path(&mock, 0x1000, &[8, 16, 4], false).unwrap();
        assert_eq!(addr, 0x3004);
    }

    #[test]
    fn test_final_hop_is_still_dereferenced() {
        // The last candidate must be readable even though its value is discarded
        let mock = MockMemoryBuilder::new().pointer(0x1008, 0x2000).build();

        let err = resolve_pointer_path(&mock, 0x1000, &[8, 0], false).unwrap_err();
        assert!(err.is_memory_fault());
    }

    #[test]
    fn test_relative_first_hop() {
        // rel32 at 0x5010 = 0x100 -> next = 0x5010 + 0x100 + 4 = 0x5114
        let mock = MockMemoryBuilder::new()
            .region(0x5010, 0x100i32.to_le_bytes().to_vec())
            .pointer(0x5114, 0x8000)
            .region(0x8000, vec![0; 64])
            .build();

        let addr = resolve_pointer_path(&mock, 0x5010, &[0, 0, 0x20], true).unwrap();
        assert_eq!(addr, 0x8020);
    }

    #[test]
    fn test_negative_displacement() {
        let mock = MockMemoryBuilder::new()
            .region(0x5000, (-0x1004i32).to_le_bytes().to_vec())
            .pointer(0x4000, 0x9000)
            .build();

        let addr = resolve_pointer_path(&mock, 0x5000, &[0, 0], true).unwrap();
        assert_eq!(addr, 0x4000);
    }

    #[test]
    fn test_relative_flag_only_applies_once() {
        // Second hop must be a pointer read, not another rel32
        let mock = MockMemoryBuilder::new()
            .region(0x5000, 0x0FFCi32.to_le_bytes().to_vec())
            .pointer(0x6000, 0x7000)
            .pointer(0x7008, 0x1)
            .build();

        let addr = resolve_pointer_path(&mock, 0x5000, &[0, 0, 8], true).unwrap();
        assert_eq!(addr, 0x7008);
    }

    #[test]
    fn test_zero_pointer_means_not_ready() {
        let mock = MockMemoryBuilder::new().pointer(0x1000, 0).build();

        let addr = resolve_pointer_path(&mock, 0x1000, &[0, 0, 56], false).unwrap();
        assert_eq!(addr, 0);
    }

    #[test]
    fn test_empty_chain_returns_base() {
        let mock = MockMemoryBuilder::new().build();
        assert_eq!(resolve_pointer_path(&mock, 0x1234, &[], true).unwrap(), 0x1234);
    }

    #[test]
    fn test_unresolved_when_signature_missing() {
        let mock = MockMemoryBuilder::new().text(0x1000, vec![0x90; 32]).build();

        let resolved = resolve_table_addresses(&mock, &TableSignatures::default()).unwrap();
        assert_eq!(resolved, None);
        assert_eq!(mock.scan_count(), 2);
    }
}
