use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read process memory at address {address:#x}: {message}")]
    MemoryReadFailed { address: u64, message: String },

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Invalid snapshot layout: {0}")]
    SnapshotLayout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a read failure for `size` bytes at `address`
    pub fn unmapped(address: u64, size: usize) -> Self {
        Error::MemoryReadFailed {
            address,
            message: format!("{} bytes not mapped", size),
        }
    }

    /// Build a read failure for a read that returned only `len` bytes
    pub fn short_read(address: u64, len: usize) -> Self {
        Error::MemoryReadFailed {
            address,
            message: format!("short read ({} bytes)", len),
        }
    }

    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }

    /// Check if this error came from a failed memory read
    pub fn is_memory_fault(&self) -> bool {
        matches!(self, Error::MemoryReadFailed { .. })
    }
}
