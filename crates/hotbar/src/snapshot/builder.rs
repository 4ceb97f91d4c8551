//! Synthetic address spaces that resolve through a given signature set
//!
//! The builder emits a `.text` region holding each signature followed by
//! its first-hop cell, a heap of pointer nodes for the intermediate hops,
//! and the two tables. Chains that share a prefix share nodes, which is how
//! the builtin hotbar and recast chains hang off the same UI module.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::memory::layout::{display, recast};
use crate::offset::{PointerSignature, ResolvedAddresses, TableSignatures, resolve_table_addresses};
use crate::snapshot::{MemoryRegion, MemorySnapshot, TEXT_REGION};

const TEXT_BASE: u64 = 0x1_4000_0000;
/// Close enough to the text for any rel32 first hop
const HEAP_BASE: u64 = 0x1_4100_0000;
const HOTBAR_BASE: u64 = 0x2_0000_0000;
const RECAST_BASE: u64 = 0x2_1000_0000;

pub const HEAP_REGION: &str = "heap";
pub const HOTBAR_REGION: &str = "hotbar";
pub const RECAST_REGION: &str = "recast";

const NODE_SIZE: usize = 0x100;
const POINTER_LEN: usize = 8;
/// int3 padding around placed signatures
const TEXT_FILLER: u8 = 0xCC;
const TEXT_GAP: usize = 16;

/// Regions of a built address space plus where the tables ended up
#[derive(Debug, Clone)]
pub struct SnapshotLayout {
    pub version: String,
    pub regions: Vec<MemoryRegion>,
    pub addresses: ResolvedAddresses,
}

impl SnapshotLayout {
    pub fn into_snapshot(self) -> MemorySnapshot {
        MemorySnapshot::new(&self.version, self.regions)
    }
}

#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    signatures: TableSignatures,
    hotbar_table: Vec<u8>,
    recast_table: Vec<u8>,
}

impl SnapshotBuilder {
    /// Start with both tables zero-filled
    pub fn new(signatures: TableSignatures) -> Self {
        Self {
            signatures,
            hotbar_table: vec![0; display::TABLE_SIZE],
            recast_table: vec![0; recast::TABLE_SIZE],
        }
    }

    /// Raw display table bytes; padded with zeros to the full table size
    pub fn hotbar_table(mut self, mut bytes: Vec<u8>) -> Self {
        if bytes.len() < display::TABLE_SIZE {
            bytes.resize(display::TABLE_SIZE, 0);
        }
        self.hotbar_table = bytes;
        self
    }

    /// Raw recast table bytes; padded with zeros to the full table size
    pub fn recast_table(mut self, mut bytes: Vec<u8>) -> Self {
        if bytes.len() < recast::TABLE_SIZE {
            bytes.resize(recast::TABLE_SIZE, 0);
        }
        self.recast_table = bytes;
        self
    }

    /// Lay out every region and check the chains resolve to the tables
    pub fn build(self) -> Result<SnapshotLayout> {
        let addresses = ResolvedAddresses {
            hotbar: HOTBAR_BASE,
            recast: RECAST_BASE,
        };

        let mut space = ChainSpace::new();
        space.link(&self.signatures.hotbar, addresses.hotbar)?;
        space.link(&self.signatures.recast, addresses.recast)?;

        let mut regions = space.into_regions();
        regions.push(MemoryRegion::new(HOTBAR_REGION, HOTBAR_BASE, self.hotbar_table));
        regions.push(MemoryRegion::new(RECAST_REGION, RECAST_BASE, self.recast_table));

        let snapshot = MemorySnapshot::new(&self.signatures.version, regions);
        let resolved = resolve_table_addresses(&snapshot, &self.signatures)?;
        if resolved != Some(addresses) {
            return Err(layout_error(format!(
                "chains resolve to {:X?}, expected {:X?}",
                resolved, addresses
            )));
        }

        debug!(
            "Built snapshot: hotbar at 0x{:X}, recast at 0x{:X}, {} bytes",
            addresses.hotbar,
            addresses.recast,
            snapshot.size()
        );

        Ok(SnapshotLayout {
            version: snapshot.version,
            regions: snapshot.regions,
            addresses,
        })
    }
}

fn layout_error(message: impl Into<String>) -> Error {
    Error::SnapshotLayout(message.into())
}

/// Growable byte range that remembers which bytes were set
struct Arena {
    base: u64,
    bytes: Vec<u8>,
    written: Vec<bool>,
    filler: u8,
}

impl Arena {
    fn new(base: u64, filler: u8) -> Self {
        Self {
            base,
            bytes: Vec::new(),
            written: Vec::new(),
            filler,
        }
    }

    fn end(&self) -> u64 {
        self.base + self.bytes.len() as u64
    }

    fn grow_to(&mut self, len: usize) {
        if len > self.bytes.len() {
            self.bytes.resize(len, self.filler);
            self.written.resize(len, false);
        }
    }

    /// Set bytes, failing if any of them already hold a different value
    fn write(&mut self, address: u64, data: &[u8]) -> Result<()> {
        let start = (address - self.base) as usize;
        self.grow_to(start + data.len());

        for (i, &byte) in data.iter().enumerate() {
            if self.written[start + i] && self.bytes[start + i] != byte {
                return Err(layout_error(format!(
                    "conflicting values at 0x{:X}",
                    address + i as u64
                )));
            }
        }
        self.bytes[start..start + data.len()].copy_from_slice(data);
        self.written[start..start + data.len()].fill(true);
        Ok(())
    }

    /// Previously written bytes, if all of them were written
    fn read(&self, address: u64, len: usize) -> Option<&[u8]> {
        let start = address.checked_sub(self.base)? as usize;
        let end = start.checked_add(len)?;
        let written = self.written.get(start..end)?;
        written.iter().all(|&w| w).then(|| &self.bytes[start..end])
    }
}

/// Text and heap under construction
struct ChainSpace {
    text: Arena,
    heap: Arena,
    placed: HashMap<Vec<Option<u8>>, u64>,
}

impl ChainSpace {
    fn new() -> Self {
        Self {
            text: Arena::new(TEXT_BASE, TEXT_FILLER),
            heap: Arena::new(HEAP_BASE, 0),
            placed: HashMap::new(),
        }
    }

    fn arena_mut(&mut self, address: u64) -> Result<&mut Arena> {
        match address {
            a if (TEXT_BASE..HEAP_BASE).contains(&a) => Ok(&mut self.text),
            a if a >= HEAP_BASE && a < self.heap.end() => Ok(&mut self.heap),
            a => Err(layout_error(format!("chain cell 0x{:X} outside text and heap", a))),
        }
    }

    fn arena(&self, address: u64) -> &Arena {
        if address >= HEAP_BASE { &self.heap } else { &self.text }
    }

    /// Address of the signature in the text, placing it on first use
    fn place_pattern(&mut self, pattern: Vec<Option<u8>>) -> Result<u64> {
        if let Some(&address) = self.placed.get(&pattern) {
            return Ok(address);
        }

        let address = self.text.end() + TEXT_GAP as u64;
        let bytes: Vec<u8> = pattern.iter().map(|b| b.unwrap_or(0)).collect();
        self.text.write(address, &bytes)?;
        self.placed.insert(pattern, address);
        Ok(address)
    }

    fn alloc_node(&mut self) -> u64 {
        let address = self.heap.end();
        self.heap.grow_to(self.heap.bytes.len() + NODE_SIZE);
        address
    }

    /// Where an already written cell leads
    fn follow(&self, cell: u64, relative: bool) -> Option<u64> {
        let arena = self.arena(cell);
        if relative {
            let disp = i32::from_le_bytes(arena.read(cell, 4)?.try_into().ok()?);
            Some(cell.wrapping_add_signed(disp as i64 + 4))
        } else {
            Some(u64::from_le_bytes(arena.read(cell, POINTER_LEN)?.try_into().ok()?))
        }
    }

    fn store(&mut self, cell: u64, next: u64, relative: bool) -> Result<()> {
        if relative {
            let disp = next as i128 - (cell as i128 + 4);
            let disp = i32::try_from(disp)
                .map_err(|_| layout_error(format!("0x{:X} out of rel32 reach of 0x{:X}", next, cell)))?;
            self.arena_mut(cell)?.write(cell, &disp.to_le_bytes())
        } else {
            self.arena_mut(cell)?.write(cell, &next.to_le_bytes())
        }
    }

    /// Write the cells so that `signature` resolves to `target`
    fn link(&mut self, signature: &PointerSignature, target: u64) -> Result<()> {
        let offsets = &signature.offsets;
        if offsets.len() < 2 {
            return Err(layout_error(format!(
                "chain for {} needs at least two hops",
                signature.pattern
            )));
        }

        let matched = self.place_pattern(signature.pattern_bytes()?)?;
        let last = offsets.len() - 1;
        let final_offset = offsets[last];
        let mut current = matched.wrapping_add_signed(signature.signature_offset);

        for (hop, &offset) in offsets[..last].iter().enumerate() {
            if hop > 0 && !(0..=(NODE_SIZE - POINTER_LEN) as i64).contains(&offset) {
                return Err(layout_error(format!(
                    "offset {} at hop {} does not fit a {}-byte node",
                    offset, hop, NODE_SIZE
                )));
            }

            let cell = current.wrapping_add_signed(offset);
            let relative = hop == 0 && signature.relative_first_hop;
            let next = if hop + 1 == last {
                final_offset
                    .checked_neg()
                    .and_then(|neg| target.checked_add_signed(neg))
                    .ok_or_else(|| layout_error(format!("final offset {}", final_offset)))?
            } else if let Some(existing) = self.follow(cell, relative) {
                existing
            } else {
                self.alloc_node()
            };

            self.store(cell, next, relative)?;
            current = next;
        }

        Ok(())
    }

    fn into_regions(mut self) -> Vec<MemoryRegion> {
        let tail = self.text.bytes.len() + TEXT_GAP;
        self.text.grow_to(tail);
        vec![
            MemoryRegion::new(TEXT_REGION, self.text.base, self.text.bytes),
            MemoryRegion::new(HEAP_REGION, self.heap.base, self.heap.bytes),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{ReadMemory, SignatureScanner};

    #[test]
    fn test_builtin_signatures_resolve() {
        let layout = SnapshotBuilder::new(TableSignatures::default()).build().unwrap();
        assert_eq!(layout.addresses.hotbar, HOTBAR_BASE);
        assert_eq!(layout.addresses.recast, RECAST_BASE);

        let names: Vec<&str> = layout.regions.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec![TEXT_REGION, HEAP_REGION, HOTBAR_REGION, RECAST_REGION]);

        let snapshot = layout.into_snapshot();
        assert_eq!(snapshot.version, "5.3");
        assert_eq!(
            snapshot.region(HOTBAR_REGION).unwrap().bytes.len(),
            display::TABLE_SIZE
        );
    }

    #[test]
    fn test_shared_prefix_shares_nodes() {
        // Hotbar allocates six nodes; recast follows three and adds two
        let layout = SnapshotBuilder::new(TableSignatures::default()).build().unwrap();
        let heap = layout.regions.iter().find(|r| r.name == HEAP_REGION).unwrap();
        assert_eq!(heap.bytes.len(), 8 * NODE_SIZE);
    }

    #[test]
    fn test_signature_followed_by_displacement() {
        let signatures = TableSignatures::default();
        let snapshot = SnapshotBuilder::new(signatures.clone())
            .build()
            .unwrap()
            .into_snapshot();

        let pattern = signatures.hotbar.pattern_bytes().unwrap();
        let matched = snapshot.scan_text(&pattern).unwrap();
        let disp = snapshot.read_i32(matched + 15).unwrap();
        assert_eq!(matched.wrapping_add_signed(15 + 4 + disp as i64), HEAP_BASE);
    }

    #[test]
    fn test_absolute_first_hop() {
        let mut signatures = TableSignatures::default();
        for signature in [&mut signatures.hotbar, &mut signatures.recast] {
            signature.relative_first_hop = false;
        }

        let snapshot = SnapshotBuilder::new(signatures.clone())
            .build()
            .unwrap()
            .into_snapshot();
        let matched = snapshot
            .scan_text(&signatures.hotbar.pattern_bytes().unwrap())
            .unwrap();
        assert_eq!(snapshot.read_ptr(matched + 15).unwrap(), HEAP_BASE);
    }

    #[test]
    fn test_identical_chains_conflict() {
        let mut signatures = TableSignatures::default();
        signatures.recast = signatures.hotbar.clone();

        let err = SnapshotBuilder::new(signatures).build().unwrap_err();
        assert!(matches!(err, Error::SnapshotLayout(_)));
    }

    #[test]
    fn test_rejects_unplaceable_chains() {
        let mut short = TableSignatures::default();
        short.hotbar.offsets = vec![0];
        assert!(SnapshotBuilder::new(short).build().is_err());

        let mut negative = TableSignatures::default();
        negative.recast.offsets = vec![0, 0, -8, 0];
        assert!(SnapshotBuilder::new(negative).build().is_err());

        let mut huge = TableSignatures::default();
        huge.hotbar.offsets = vec![0, 0, 0x1000, 0];
        assert!(SnapshotBuilder::new(huge).build().is_err());
    }

    #[test]
    fn test_wildcards_become_zero() {
        let mut signatures = TableSignatures::default();
        signatures.hotbar.pattern = "48 8B ?? ?? 90".to_string();
        signatures.hotbar.signature_offset = 5;

        let snapshot = SnapshotBuilder::new(signatures.clone())
            .build()
            .unwrap()
            .into_snapshot();
        let matched = snapshot
            .scan_text(&signatures.hotbar.pattern_bytes().unwrap())
            .unwrap();
        assert_eq!(
            snapshot.read_bytes(matched, 5).unwrap(),
            vec![0x48, 0x8B, 0, 0, 0x90]
        );
    }
}
