//! Typed writes and reads: fixed-width numbers, varints, booleans and
//! length-prefixed strings and blobs.
//!
//! Strings and blobs are framed as an unsigned varint byte count followed
//! by the raw bytes.

use crate::codec::{
    FixedWidth, MAX_VARINT_LEN_64, VarintFault, decode_uvarint, encode_uvarint, zigzag_decode,
    zigzag_encode,
};
use crate::error::BufferError;

use super::CursorBuffer;

impl CursorBuffer {
    /// Writes any fixed-width primitive in the configured byte order.
    pub fn write_fixed<T: FixedWidth>(&mut self, value: T) -> &mut Self {
        let order = self.order;
        value.encode(order, self.claim(T::WIDTH));
        self
    }

    /// Reads any fixed-width primitive in the configured byte order.
    pub fn read_fixed<T: FixedWidth>(&mut self) -> Result<T, BufferError> {
        let order = self.order;
        let src = self.consume(T::WIDTH)?;
        Ok(T::decode(order, src))
    }

    /// Writes `value` as an unsigned varint (1 to 10 bytes).
    pub fn write_varint_u64(&mut self, value: u64) -> &mut Self {
        let mut scratch = [0u8; MAX_VARINT_LEN_64];
        let n = encode_uvarint(value, &mut scratch);
        self.write_bytes(&scratch[..n])
    }

    /// Writes `value` as an unsigned varint.
    pub fn write_varint_u32(&mut self, value: u32) -> &mut Self {
        self.write_varint_u64(u64::from(value))
    }

    /// Writes `value` zig-zag mapped as a varint.
    pub fn write_varint_i64(&mut self, value: i64) -> &mut Self {
        self.write_varint_u64(zigzag_encode(value))
    }

    /// Writes `value` zig-zag mapped as a varint.
    pub fn write_varint_i32(&mut self, value: i32) -> &mut Self {
        self.write_varint_i64(i64::from(value))
    }

    /// Decodes the varint at the cursor without advancing.
    ///
    /// Returns the value and its encoded length.
    pub fn peek_varint_u64(&self) -> Result<(u64, usize), BufferError> {
        let rest = self.rest();
        decode_uvarint(rest).map_err(|fault| match fault {
            VarintFault::Truncated => BufferError::insufficient(rest.len() + 1, rest.len()),
            VarintFault::Malformed { consumed } => BufferError::MalformedVarint { consumed },
        })
    }

    /// Reads an unsigned varint.
    pub fn read_varint_u64(&mut self) -> Result<u64, BufferError> {
        let (value, n) = self.peek_varint_u64()?;
        self.position += n;
        Ok(value)
    }

    /// Reads an unsigned varint that must fit in 32 bits.
    pub fn read_varint_u32(&mut self) -> Result<u32, BufferError> {
        let (value, n) = self.peek_varint_u64()?;
        let value = u32::try_from(value).map_err(|_| BufferError::VarintOverflow { bits: 32 })?;
        self.position += n;
        Ok(value)
    }

    /// Reads a zig-zag mapped varint.
    pub fn read_varint_i64(&mut self) -> Result<i64, BufferError> {
        self.read_varint_u64().map(zigzag_decode)
    }

    /// Reads a zig-zag mapped varint that must fit in 32 bits.
    pub fn read_varint_i32(&mut self) -> Result<i32, BufferError> {
        let (value, n) = self.peek_varint_u64()?;
        let value = i32::try_from(zigzag_decode(value))
            .map_err(|_| BufferError::VarintOverflow { bits: 32 })?;
        self.position += n;
        Ok(value)
    }

    /// Writes a boolean as one byte, 1 or 0.
    pub fn write_bool(&mut self, value: bool) -> &mut Self {
        self.write_u8(u8::from(value))
    }

    /// Reads a boolean byte.
    ///
    /// Only 0 and 1 are accepted; any other byte fails with
    /// [`BufferError::InvalidBool`] and the cursor stays put.
    pub fn read_bool(&mut self) -> Result<bool, BufferError> {
        let value = match self.peek_bytes(1)?[0] {
            0 => false,
            1 => true,
            value => return Err(BufferError::InvalidBool { value }),
        };
        self.position += 1;
        Ok(value)
    }

    /// Writes a varint length prefix followed by `bytes`.
    pub fn write_blob(&mut self, bytes: &[u8]) -> &mut Self {
        self.write_varint_u64(bytes.len() as u64).write_bytes(bytes)
    }

    /// Writes a varint length prefix followed by the UTF-8 bytes of `value`.
    pub fn write_string(&mut self, value: &str) -> &mut Self {
        self.write_blob(value.as_bytes())
    }

    /// Locates the payload of the length-prefixed blob at the cursor.
    fn blob_span(&self) -> Result<(usize, usize), BufferError> {
        let (len, prefix) = self.peek_varint_u64()?;
        let available = self.available();
        let need = usize::try_from(len)
            .ok()
            .and_then(|len| len.checked_add(prefix))
            .ok_or(BufferError::insufficient(usize::MAX, available))?;
        if available < need {
            return Err(BufferError::insufficient(need, available));
        }
        let start = self.position + prefix;
        Ok((start, self.position + need))
    }

    /// Reads a length-prefixed blob as a view into the buffer.
    pub fn read_blob(&mut self) -> Result<&[u8], BufferError> {
        let (start, end) = self.blob_span()?;
        self.position = end;
        Ok(&self.storage[start..end])
    }

    /// Reads a length-prefixed string as a view into the buffer.
    pub fn read_str(&mut self) -> Result<&str, BufferError> {
        let (start, end) = self.blob_span()?;
        let value = std::str::from_utf8(&self.storage[start..end])?;
        self.position = end;
        Ok(value)
    }

    /// Reads a length-prefixed string.
    ///
    /// Invalid UTF-8 fails with [`BufferError::InvalidUtf8`] and the cursor
    /// stays put.
    pub fn read_string(&mut self) -> Result<String, BufferError> {
        self.read_str().map(str::to_owned)
    }
}

macro_rules! fixed_accessors {
    ($($write:ident, $read:ident => $ty:ty;)*) => {
        impl CursorBuffer {
            $(
                #[doc = concat!("Writes a `", stringify!($ty), "` in the configured byte order.")]
                #[inline]
                pub fn $write(&mut self, value: $ty) -> &mut Self {
                    self.write_fixed(value)
                }

                #[doc = concat!("Reads a `", stringify!($ty), "` in the configured byte order.")]
                #[inline]
                pub fn $read(&mut self) -> Result<$ty, BufferError> {
                    self.read_fixed()
                }
            )*
        }
    };
}

fixed_accessors! {
    write_u8, read_u8 => u8;
    write_i8, read_i8 => i8;
    write_u16, read_u16 => u16;
    write_i16, read_i16 => i16;
    write_u32, read_u32 => u32;
    write_i32, read_i32 => i32;
    write_u64, read_u64 => u64;
    write_i64, read_i64 => i64;
    write_f32, read_f32 => f32;
    write_f64, read_f64 => f64;
}
