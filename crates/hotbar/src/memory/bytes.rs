use encoding_rs::UTF_8;

/// Decode a fixed-width, NUL-terminated text field.
///
/// Bytes after the first NUL are ignored; invalid sequences are replaced.
pub fn decode_c_string(bytes: &[u8]) -> String {
    let len = memchr::memchr(0, bytes).unwrap_or(bytes.len());
    let (decoded, _) = UTF_8.decode_without_bom_handling(&bytes[..len]);
    decoded.into_owned()
}

/// Encode text into a fixed-width field, truncating so a terminating NUL always fits.
///
/// Truncation never splits a multi-byte character.
pub fn encode_c_string(text: &str, width: usize) -> Vec<u8> {
    let mut field = vec![0u8; width];
    if width == 0 {
        return field;
    }

    let mut end = text.len().min(width - 1);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    field[..end].copy_from_slice(&text.as_bytes()[..end]);
    field
}

/// Little-endian field reader over a fixed-size record.
///
/// Offsets outside the buffer read as zero; record decoders check the
/// total length up front.
#[derive(Debug, Clone, Copy)]
pub struct ByteBuffer<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteBuffer<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn bytes_at(&self, offset: usize, len: usize) -> &'a [u8] {
        let end = (offset + len).min(self.bytes.len());
        self.bytes.get(offset..end).unwrap_or(&[])
    }

    pub fn u16_at(&self, offset: usize) -> u16 {
        let mut buf = [0u8; 2];
        let src = self.bytes_at(offset, 2);
        buf[..src.len()].copy_from_slice(src);
        u16::from_le_bytes(buf)
    }

    pub fn i32_at(&self, offset: usize) -> i32 {
        let mut buf = [0u8; 4];
        let src = self.bytes_at(offset, 4);
        buf[..src.len()].copy_from_slice(src);
        i32::from_le_bytes(buf)
    }

    /// 32-bit boolean: any nonzero value is true
    pub fn bool32_at(&self, offset: usize) -> bool {
        self.i32_at(offset) != 0
    }

    pub fn string_at(&self, offset: usize, width: usize) -> String {
        decode_c_string(self.bytes_at(offset, width))
    }
}
