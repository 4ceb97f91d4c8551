use crate::error::{Error, Result};

/// Raw read access to the host process address space.
///
/// Only `read_bytes` is required; the typed readers decode little-endian
/// values from it and fail with a short read if it returns fewer bytes
/// than asked for. A read against an unmapped address returns
/// [`Error::MemoryReadFailed`](crate::Error::MemoryReadFailed).
pub trait ReadMemory {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>>;

    fn read_u16(&self, address: u64) -> Result<u16> {
        Ok(u16::from_le_bytes(read_array(self, address)?))
    }

    fn read_i32(&self, address: u64) -> Result<i32> {
        Ok(i32::from_le_bytes(read_array(self, address)?))
    }

    fn read_u64(&self, address: u64) -> Result<u64> {
        Ok(u64::from_le_bytes(read_array(self, address)?))
    }

    /// Read a pointer-width value (the host is a 64-bit process)
    fn read_ptr(&self, address: u64) -> Result<u64> {
        self.read_u64(address)
    }
}

impl<T: ReadMemory + ?Sized> ReadMemory for &T {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        (**self).read_bytes(address, size)
    }
}

/// First `N` bytes at `address`
fn read_array<R: ReadMemory + ?Sized, const N: usize>(reader: &R, address: u64) -> Result<[u8; N]> {
    let bytes = reader.read_bytes(address, N)?;
    bytes
        .get(..N)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| Error::short_read(address, bytes.len()))
}
