mod bytes;
pub mod layout;
mod reader;
mod scan;

#[cfg(test)]
pub mod mock;

pub use bytes::{ByteBuffer, decode_c_string, encode_c_string};
pub use reader::ReadMemory;
pub use scan::{SignatureScanner, find_pattern};

#[cfg(test)]
pub use mock::{MockMemoryBuilder, MockMemoryReader};
