//! Configuration for buffers, pools and frame readers.
//!
//! - [`BufferConfig`] - Byte order and initial capacity of a new buffer
//! - [`PoolConfig`] - Buffer template and idle limit of a [`crate::BufferPool`]
//! - [`FrameConfig`] - Head byte order and size limit for frame readers
//!
//! # Example
//!
//! ```
//! use cursorbuf::{BufferConfig, ByteOrder, PoolConfig};
//!
//! let config = BufferConfig::new(ByteOrder::LittleEndian, 1024)?;
//!
//! let pool = PoolConfig::default()
//!     .with_buffer_config(config)
//!     .with_max_idle(Some(64));
//! # Ok::<(), cursorbuf::BufferError>(())
//! ```

use crate::codec::ByteOrder;
use crate::error::BufferError;

/// Default capacity reserved by a new buffer (256 bytes).
pub const DEFAULT_INITIAL_CAPACITY: usize = 256;

/// Default maximum frame payload accepted by frame readers (16 MiB).
pub const DEFAULT_MAX_FRAME_LEN: usize = 16 * 1024 * 1024;

/// Configuration for a [`crate::CursorBuffer`].
///
/// # Example
///
/// ```
/// use cursorbuf::{BufferConfig, ByteOrder, CursorBuffer};
///
/// let config = BufferConfig::default().with_byte_order(ByteOrder::LittleEndian);
/// let buf = CursorBuffer::with_config(config);
/// assert_eq!(buf.byte_order(), ByteOrder::LittleEndian);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferConfig {
    byte_order: ByteOrder,
    initial_capacity: usize,
}

impl BufferConfig {
    /// Creates a new configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidConfig`] if `initial_capacity` exceeds
    /// `isize::MAX`.
    pub fn new(byte_order: ByteOrder, initial_capacity: usize) -> Result<Self, BufferError> {
        if initial_capacity > isize::MAX as usize {
            return Err(BufferError::InvalidConfig {
                message: "initial_capacity cannot exceed isize::MAX",
            });
        }

        Ok(Self {
            byte_order,
            initial_capacity,
        })
    }

    /// Sets the byte order.
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Sets the initial capacity.
    ///
    /// Note: This does not validate the configuration. Use [`BufferConfig::validate`].
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Returns the byte order.
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Returns the initial capacity.
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), BufferError> {
        Self::new(self.byte_order, self.initial_capacity).map(|_| ())
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::default(),
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

/// Configuration for a [`crate::BufferPool`].
///
/// `max_idle` bounds how many returned buffers are kept. `None` (the
/// default) keeps every returned buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PoolConfig {
    buffer: BufferConfig,
    max_idle: Option<usize>,
}

impl PoolConfig {
    /// Creates a new pool configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidConfig`] if the buffer template is
    /// invalid or `max_idle` is `Some(0)`.
    pub fn new(buffer: BufferConfig, max_idle: Option<usize>) -> Result<Self, BufferError> {
        buffer.validate()?;

        if max_idle == Some(0) {
            return Err(BufferError::InvalidConfig {
                message: "max_idle must be non-zero when set",
            });
        }

        Ok(Self { buffer, max_idle })
    }

    /// Sets the template used for freshly constructed buffers.
    pub fn with_buffer_config(mut self, buffer: BufferConfig) -> Self {
        self.buffer = buffer;
        self
    }

    /// Sets the idle limit.
    pub fn with_max_idle(mut self, max_idle: Option<usize>) -> Self {
        self.max_idle = max_idle;
        self
    }

    /// Returns the buffer template.
    pub fn buffer_config(&self) -> &BufferConfig {
        &self.buffer
    }

    /// Returns the idle limit.
    pub fn max_idle(&self) -> Option<usize> {
        self.max_idle
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), BufferError> {
        Self::new(self.buffer, self.max_idle).map(|_| ())
    }
}

/// Configuration for frame readers.
///
/// Frames are a 4-byte unsigned length head in `byte_order`, followed by
/// that many payload bytes.
///
/// # Example
///
/// ```
/// use cursorbuf::{ByteOrder, FrameConfig};
///
/// let config = FrameConfig::new(ByteOrder::BigEndian, 64 * 1024)?;
/// assert_eq!(config.max_frame_len(), 64 * 1024);
/// # Ok::<(), cursorbuf::BufferError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameConfig {
    byte_order: ByteOrder,
    max_frame_len: usize,
}

impl FrameConfig {
    /// Creates a new frame configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidConfig`] if `max_frame_len` is zero or
    /// does not fit the 32-bit head.
    pub fn new(byte_order: ByteOrder, max_frame_len: usize) -> Result<Self, BufferError> {
        if max_frame_len == 0 {
            return Err(BufferError::InvalidConfig {
                message: "max_frame_len must be non-zero",
            });
        }

        if max_frame_len as u64 > u64::from(u32::MAX) {
            return Err(BufferError::InvalidConfig {
                message: "max_frame_len cannot exceed u32::MAX",
            });
        }

        Ok(Self {
            byte_order,
            max_frame_len,
        })
    }

    /// Sets the head byte order.
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Sets the maximum payload size.
    ///
    /// Note: This does not validate the configuration. Use [`FrameConfig::validate`].
    pub fn with_max_frame_len(mut self, max_frame_len: usize) -> Self {
        self.max_frame_len = max_frame_len;
        self
    }

    /// Returns the head byte order.
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Returns the maximum payload size.
    pub fn max_frame_len(&self) -> usize {
        self.max_frame_len
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), BufferError> {
        Self::new(self.byte_order, self.max_frame_len).map(|_| ())
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::default(),
            max_frame_len: DEFAULT_MAX_FRAME_LEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_config_default() {
        let config = BufferConfig::default();
        assert_eq!(config.byte_order(), ByteOrder::BigEndian);
        assert_eq!(config.initial_capacity(), DEFAULT_INITIAL_CAPACITY);
    }

    #[test]
    fn test_buffer_config_builder() {
        let config = BufferConfig::default()
            .with_byte_order(ByteOrder::LittleEndian)
            .with_initial_capacity(0);
        assert_eq!(config.byte_order(), ByteOrder::LittleEndian);
        assert_eq!(config.initial_capacity(), 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_buffer_config_invalid_capacity() {
        assert!(BufferConfig::new(ByteOrder::BigEndian, usize::MAX).is_err());
    }

    #[test]
    fn test_pool_config_default_is_unbounded() {
        let config = PoolConfig::default();
        assert_eq!(config.max_idle(), None);
        assert_eq!(config.buffer_config(), &BufferConfig::default());
    }

    #[test]
    fn test_pool_config_zero_idle_rejected() {
        assert!(PoolConfig::new(BufferConfig::default(), Some(0)).is_err());
        assert!(PoolConfig::default().with_max_idle(Some(0)).validate().is_err());
        assert!(PoolConfig::new(BufferConfig::default(), Some(1)).is_ok());
    }

    #[test]
    fn test_frame_config_validation() {
        assert!(FrameConfig::new(ByteOrder::BigEndian, 0).is_err());
        assert!(FrameConfig::new(ByteOrder::BigEndian, 1).is_ok());
        assert!(FrameConfig::default().validate().is_ok());
        assert_eq!(FrameConfig::default().max_frame_len(), DEFAULT_MAX_FRAME_LEN);
    }
}
