//! Offline memory snapshots
//!
//! A snapshot is a set of named address ranges captured from (or built to
//! look like) the host process. It implements [`ReadMemory`] and
//! [`SignatureScanner`], so a [`HotbarTable`](crate::HotbarTable) can run
//! against it exactly as against live memory.

mod builder;

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::memory::{ReadMemory, SignatureScanner, find_pattern};

pub use builder::{HEAP_REGION, HOTBAR_REGION, RECAST_REGION, SnapshotBuilder, SnapshotLayout};

/// Name of the region(s) searched by signature scans
pub const TEXT_REGION: &str = ".text";

/// One contiguous, readable address range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRegion {
    pub name: String,
    pub base: u64,
    #[serde(with = "hex_bytes")]
    pub bytes: Vec<u8>,
}

impl MemoryRegion {
    pub fn new(name: &str, base: u64, bytes: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            base,
            bytes,
        }
    }

    pub fn end(&self) -> u64 {
        self.base + self.bytes.len() as u64
    }

    /// Whether `[address, address + len)` lies inside this region
    pub fn contains(&self, address: u64, len: usize) -> bool {
        address >= self.base
            && address
                .checked_add(len as u64)
                .is_some_and(|end| end <= self.end())
    }

    pub fn slice(&self, address: u64, len: usize) -> Option<&[u8]> {
        if !self.contains(address, len) {
            return None;
        }
        let start = (address - self.base) as usize;
        Some(&self.bytes[start..start + len])
    }
}

/// Captured address space, serializable as JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemorySnapshot {
    /// Signature set version the snapshot was taken with
    pub version: String,
    pub captured_at: DateTime<Utc>,
    pub regions: Vec<MemoryRegion>,
}

impl MemorySnapshot {
    pub fn new(version: &str, regions: Vec<MemoryRegion>) -> Self {
        Self {
            version: version.to_string(),
            captured_at: Utc::now(),
            regions,
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let snapshot: Self = serde_json::from_str(&content)?;
        debug!(
            "Loaded snapshot {} ({} regions, captured {})",
            path.as_ref().display(),
            snapshot.regions.len(),
            snapshot.captured_at
        );
        Ok(snapshot)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn region(&self, name: &str) -> Option<&MemoryRegion> {
        self.regions.iter().find(|r| r.name == name)
    }

    /// Total number of captured bytes
    pub fn size(&self) -> usize {
        self.regions.iter().map(|r| r.bytes.len()).sum()
    }
}

impl ReadMemory for MemorySnapshot {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        self.regions
            .iter()
            .find_map(|r| r.slice(address, size))
            .map(<[u8]>::to_vec)
            .ok_or_else(|| Error::unmapped(address, size))
    }
}

impl SignatureScanner for MemorySnapshot {
    fn scan_text(&self, pattern: &[Option<u8>]) -> Option<u64> {
        self.regions
            .iter()
            .filter(|r| r.name == TEXT_REGION)
            .find_map(|r| find_pattern(&r.bytes, pattern).map(|pos| r.base + pos as u64))
    }
}

/// Region bytes as a compact upper-case hex string
mod hex_bytes {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::fmt::Write;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        let mut hex = String::with_capacity(bytes.len() * 2);
        for b in bytes {
            let _ = write!(hex, "{:02X}", b);
        }
        serializer.serialize_str(&hex)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let hex = String::deserialize(deserializer)?;
        if hex.len() % 2 != 0 {
            return Err(D::Error::custom("odd number of hex digits"));
        }
        (0..hex.len())
            .step_by(2)
            .map(|i| {
                hex.get(i..i + 2)
                    .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                    .ok_or_else(|| D::Error::custom(format!("invalid hex at {}", i)))
            })
            .collect()
    }
}
