//! Head-length framing.
//!
//! A framed buffer starts with a 4-byte unsigned head holding the number of
//! bytes that follow it. The head is written as a placeholder first and
//! patched by [`CursorBuffer::update_head`] once the payload is complete.

use crate::codec::FixedWidth;
use crate::config::BufferConfig;
use crate::error::BufferError;

use super::CursorBuffer;

/// Width of the length head in bytes.
pub const HEAD_LEN: usize = 4;

impl CursorBuffer {
    /// Creates a buffer with a zeroed length head reserved at offset 0.
    ///
    /// # Example
    ///
    /// ```
    /// use cursorbuf::{CursorBuffer, HEAD_LEN};
    ///
    /// let mut buf = CursorBuffer::with_head();
    /// buf.write_string("ping").write_u16(7);
    /// buf.update_head()?;
    ///
    /// assert_eq!(buf.head()? as usize, buf.len() - HEAD_LEN);
    /// # Ok::<(), cursorbuf::BufferError>(())
    /// ```
    pub fn with_head() -> Self {
        Self::with_head_config(BufferConfig::default())
    }

    /// Creates a buffer from `config` with a zeroed length head reserved.
    pub fn with_head_config(config: BufferConfig) -> Self {
        let mut buf = Self::with_config(config);
        buf.write_u32(0);
        buf
    }

    /// Empties the buffer and reserves a zeroed length head.
    ///
    /// Useful on buffers checked out of a pool.
    pub fn reset_with_head(&mut self) -> &mut Self {
        self.reset().write_u32(0)
    }

    /// Patches the head with the number of bytes after it.
    ///
    /// The head uses the current byte order. Afterwards the cursor sits just
    /// past the head.
    ///
    /// # Errors
    ///
    /// - [`BufferError::InsufficientData`] if no head was reserved
    /// - [`BufferError::FrameTooLarge`] if the payload exceeds `u32::MAX`
    pub fn update_head(&mut self) -> Result<&mut Self, BufferError> {
        if self.length < HEAD_LEN {
            return Err(BufferError::insufficient(HEAD_LEN, self.length));
        }
        let payload = self.length - HEAD_LEN;
        let head = u32::try_from(payload).map_err(|_| BufferError::FrameTooLarge {
            actual: payload,
            max: u32::MAX as usize,
        })?;
        Ok(self.set_position(0).write_u32(head))
    }

    /// Returns the value currently stored in the head.
    pub fn head(&self) -> Result<u32, BufferError> {
        let src = self.read_bytes_at(0, HEAD_LEN)?;
        Ok(u32::decode(self.order, src))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ByteOrder;

    #[test]
    fn test_with_head_reserves_placeholder() {
        let buf = CursorBuffer::with_head();
        assert_eq!(buf.len(), HEAD_LEN);
        assert_eq!(buf.position(), HEAD_LEN);
        assert_eq!(buf.head().unwrap(), 0);
    }

    #[test]
    fn test_update_head() {
        let mut buf = CursorBuffer::with_head();
        buf.write_bytes(&[1, 2, 3, 4, 5]);
        buf.update_head().unwrap();

        assert_eq!(buf.as_bytes(), &[0, 0, 0, 5, 1, 2, 3, 4, 5]);
        assert_eq!(buf.position(), HEAD_LEN);
        assert_eq!(buf.len(), 9);
    }

    #[test]
    fn test_update_head_little_endian() {
        let config = BufferConfig::default().with_byte_order(ByteOrder::LittleEndian);
        let mut buf = CursorBuffer::with_head_config(config);
        buf.write_u8(0xAA);
        buf.update_head().unwrap();
        assert_eq!(buf.as_bytes(), &[1, 0, 0, 0, 0xAA]);
    }

    #[test]
    fn test_update_head_without_head() {
        let mut buf = CursorBuffer::new();
        buf.write_u8(1);
        assert!(buf.update_head().unwrap_err().is_insufficient_data());
    }

    #[test]
    fn test_reset_with_head() {
        let mut buf = CursorBuffer::new();
        buf.write_bytes(&[9; 16]);
        buf.reset_with_head().write_u8(1);
        buf.update_head().unwrap();
        assert_eq!(buf.as_bytes(), &[0, 0, 0, 1, 1]);
    }
}
