//! Wire codecs used by the buffer.
//!
//! - [`ByteOrder`] / [`FixedWidth`] - fixed-width integers and floats
//! - varint helpers - LEB128-style groups with zig-zag for signed values

mod order;
mod varint;

pub use order::{ByteOrder, FixedWidth};
pub(crate) use varint::{VarintFault, decode_uvarint};
pub use varint::{
    MAX_VARINT_LEN_32, MAX_VARINT_LEN_64, encode_uvarint, uvarint_len, zigzag_decode,
    zigzag_encode,
};
