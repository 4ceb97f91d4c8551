//! In-memory stand-in for a live process, for tests.
//!
//! Memory is a set of regions with interior mutability so tests can rewrite
//! bytes while a table still borrows the reader. Scans and reads are counted.

use std::cell::{Cell, RefCell};

use crate::error::{Error, Result};
use crate::memory::{ReadMemory, SignatureScanner, find_pattern};
use crate::snapshot::{MemoryRegion, TEXT_REGION};

#[derive(Debug, Default)]
pub struct MockMemoryReader {
    regions: RefCell<Vec<MemoryRegion>>,
    scan_count: Cell<usize>,
    read_count: Cell<usize>,
}

impl MockMemoryReader {
    pub fn builder() -> MockMemoryBuilder {
        MockMemoryBuilder::default()
    }

    pub fn from_regions(regions: Vec<MemoryRegion>) -> Self {
        Self {
            regions: RefCell::new(regions),
            ..Default::default()
        }
    }

    /// Overwrite bytes inside an existing region
    pub fn write_bytes(&self, address: u64, data: &[u8]) -> Result<()> {
        let mut regions = self.regions.borrow_mut();
        let region = regions
            .iter_mut()
            .find(|r| r.contains(address, data.len()))
            .ok_or_else(|| Error::unmapped(address, data.len()))?;
        let start = (address - region.base) as usize;
        region.bytes[start..start + data.len()].copy_from_slice(data);
        Ok(())
    }

    /// Number of `scan_text` calls so far
    pub fn scan_count(&self) -> usize {
        self.scan_count.get()
    }

    /// Number of `read_bytes` calls so far
    pub fn read_count(&self) -> usize {
        self.read_count.get()
    }
}

impl ReadMemory for MockMemoryReader {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        self.read_count.set(self.read_count.get() + 1);
        let regions = self.regions.borrow();
        regions
            .iter()
            .find_map(|r| r.slice(address, size))
            .map(<[u8]>::to_vec)
            .ok_or_else(|| Error::unmapped(address, size))
    }
}

impl SignatureScanner for MockMemoryReader {
    fn scan_text(&self, pattern: &[Option<u8>]) -> Option<u64> {
        self.scan_count.set(self.scan_count.get() + 1);
        let regions = self.regions.borrow();
        regions
            .iter()
            .filter(|r| r.name == TEXT_REGION)
            .find_map(|r| find_pattern(&r.bytes, pattern).map(|pos| r.base + pos as u64))
    }
}

/// Builder for [`MockMemoryReader`]
#[derive(Debug, Default)]
pub struct MockMemoryBuilder {
    regions: Vec<MemoryRegion>,
}

impl MockMemoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a data region
    pub fn region(mut self, base: u64, bytes: Vec<u8>) -> Self {
        self.regions.push(MemoryRegion::new("data", base, bytes));
        self
    }

    /// Add a code region searched by `scan_text`
    pub fn text(mut self, base: u64, bytes: Vec<u8>) -> Self {
        self.regions.push(MemoryRegion::new(TEXT_REGION, base, bytes));
        self
    }

    /// Write a little-endian pointer into a fresh 8-byte region
    pub fn pointer(self, address: u64, value: u64) -> Self {
        self.region(address, value.to_le_bytes().to_vec())
    }

    pub fn build(self) -> MockMemoryReader {
        MockMemoryReader::from_regions(self.regions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_within_region() {
        let mock = MockMemoryBuilder::new()
            .region(0x1000, vec![1, 2, 3, 4, 5, 6, 7, 8])
            .build();

        assert_eq!(mock.read_bytes(0x1002, 2).unwrap(), vec![3, 4]);
        assert_eq!(mock.read_i32(0x1000).unwrap(), 0x04030201);
        assert_eq!(mock.read_count(), 2);
    }

    #[test]
    fn test_read_outside_region_faults() {
        let mock = MockMemoryBuilder::new().region(0x1000, vec![0; 4]).build();

        assert!(mock.read_bytes(0x0FFF, 1).unwrap_err().is_memory_fault());
        assert!(mock.read_bytes(0x1002, 4).is_err());
        assert!(mock.read_u64(0).is_err());
    }

    #[test]
    fn test_write_then_read() {
        let mock = MockMemoryBuilder::new().pointer(0x2000, 0xAABB).build();
        assert_eq!(mock.read_ptr(0x2000).unwrap(), 0xAABB);

        mock.write_bytes(0x2000, &0x1234u64.to_le_bytes()).unwrap();
        assert_eq!(mock.read_ptr(0x2000).unwrap(), 0x1234);
        assert!(mock.write_bytes(0x2004, &[0; 8]).is_err());
    }

    #[test]
    fn test_scan_only_searches_text() {
        let mock = MockMemoryBuilder::new()
            .region(0x1000, vec![0x48, 0x8B])
            .text(0x5000, vec![0x90, 0x90, 0x48, 0x8B])
            .build();

        assert_eq!(mock.scan_text(&[Some(0x48), Some(0x8B)]), Some(0x5002));
        assert_eq!(mock.scan_text(&[Some(0xCC)]), None);
        assert_eq!(mock.scan_count(), 2);
    }
}
