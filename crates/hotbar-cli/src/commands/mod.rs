//! CLI command implementations.

pub mod demo;
pub mod dump;
pub mod hex_utils;
pub mod offset;
pub mod signatures;
pub mod slot;

use std::path::Path;

use anyhow::{Context, Result};
use hotbar::{MemorySnapshot, TableSignatures, builtin_signatures, load_signatures};
use tracing::{info, warn};

/// Signature set from `path`, or the builtin set
pub fn signatures_or_builtin(path: Option<&Path>) -> TableSignatures {
    let Some(path) = path else {
        return builtin_signatures();
    };

    match load_signatures(path) {
        Ok(signatures) => {
            info!("Loaded signatures version: {}", signatures.version);
            signatures
        }
        Err(e) if e.is_not_found() => {
            warn!("Signatures file {} not found, using builtin", path.display());
            builtin_signatures()
        }
        Err(e) => {
            warn!("Failed to load signatures: {}, using builtin", e);
            builtin_signatures()
        }
    }
}

pub fn open_snapshot(path: &Path) -> Result<MemorySnapshot> {
    let snapshot = MemorySnapshot::load(path)
        .with_context(|| format!("Failed to load snapshot {}", path.display()))?;
    info!(
        "Snapshot {} ({} regions, {} bytes)",
        snapshot.version,
        snapshot.regions.len(),
        snapshot.size()
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotbar::save_signatures;
    use tempfile::{NamedTempFile, tempdir};

    #[test]
    fn test_missing_signatures_fall_back_to_builtin() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");
        assert_eq!(signatures_or_builtin(Some(&path)), builtin_signatures());
        assert_eq!(signatures_or_builtin(None), builtin_signatures());
    }

    #[test]
    fn test_malformed_signatures_fall_back_to_builtin() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "{ not json").unwrap();
        assert_eq!(signatures_or_builtin(Some(temp_file.path())), builtin_signatures());
    }

    #[test]
    fn test_signatures_file_is_used() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut signatures = builtin_signatures();
        signatures.version = "custom".to_string();
        save_signatures(temp_file.path(), &signatures).unwrap();
        assert_eq!(signatures_or_builtin(Some(temp_file.path())).version, "custom");
    }
}
