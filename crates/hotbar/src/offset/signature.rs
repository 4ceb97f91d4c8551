use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Code signature plus the pointer chain leading from it to a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerSignature {
    pub pattern: String,
    /// Added to the match address before the chain starts (usually the pattern length)
    pub signature_offset: i64,
    pub offsets: Vec<i64>,
    /// First hop reads a rel32 displacement instead of a pointer
    #[serde(default)]
    pub relative_first_hop: bool,
}

impl PointerSignature {
    pub fn pattern_bytes(&self) -> Result<Vec<Option<u8>>> {
        parse_pattern(&self.pattern)
    }
}

/// Signatures for both tables of one client build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSignatures {
    pub version: String,
    pub hotbar: PointerSignature,
    pub recast: PointerSignature,
}

impl Default for TableSignatures {
    fn default() -> Self {
        builtin_signatures()
    }
}

/// `mov rdi, [rip+disp32]` loading the UI module; both tables hang off it.
const UI_MODULE_PATTERN: &str = "48 8B 47 08 49 8B 5D 00 49 8B 77 28 48 8B 3D";

pub fn builtin_signatures() -> TableSignatures {
    TableSignatures {
        version: "5.3".to_string(),
        hotbar: PointerSignature {
            pattern: UI_MODULE_PATTERN.to_string(),
            signature_offset: 15,
            offsets: vec![0, 0, 56, 48, 40, 32, 0, 0],
            relative_first_hop: true,
        },
        recast: PointerSignature {
            pattern: UI_MODULE_PATTERN.to_string(),
            signature_offset: 15,
            offsets: vec![0, 0, 56, 24, 48, 32, 60],
            relative_first_hop: true,
        },
    }
}

pub fn load_signatures<P: AsRef<Path>>(path: P) -> Result<TableSignatures> {
    let content = fs::read_to_string(&path)?;
    let data = serde_json::from_str(&content)?;
    Ok(data)
}

pub fn save_signatures<P: AsRef<Path>>(path: P, signatures: &TableSignatures) -> Result<()> {
    let content = serde_json::to_string_pretty(signatures)?;
    fs::write(path, content)?;
    Ok(())
}

pub fn parse_pattern(pattern: &str) -> Result<Vec<Option<u8>>> {
    let mut bytes = Vec::new();
    for token in pattern.split_whitespace() {
        if token == "??" || token == "?" {
            bytes.push(None);
            continue;
        }

        let value = u8::from_str_radix(token, 16).map_err(|e| {
            Error::InvalidSignature(format!("Invalid signature token '{}': {}", token, e))
        })?;
        bytes.push(Some(value));
    }

    if bytes.is_empty() {
        return Err(Error::InvalidSignature(
            "Signature pattern is empty".to_string(),
        ));
    }

    Ok(bytes)
}

pub fn format_pattern(bytes: &[Option<u8>]) -> String {
    bytes
        .iter()
        .map(|b| match b {
            Some(value) => format!("{:02X}", value),
            None => "??".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
