//! The cursor buffer: storage, growth and cursor control.
//!
//! Typed codecs live in `typed.rs`, ingestion and std/bytes trait
//! implementations in `io.rs`, head-length framing in `head.rs`.

use std::fmt;

use bytes::{Bytes, BytesMut};

use crate::codec::ByteOrder;
use crate::config::{BufferConfig, DEFAULT_INITIAL_CAPACITY};
use crate::error::BufferError;

/// A growable byte region with a read/write cursor and a logical length.
///
/// Writes start at the cursor and extend the length when they run past it.
/// Reads start at the cursor and never move past the length; a failed read
/// leaves the cursor untouched.
///
/// The buffer is not synchronized. Share it across threads only with
/// external coordination, or check buffers in and out of a
/// [`crate::BufferPool`].
///
/// # Example
///
/// ```
/// use cursorbuf::{ByteOrder, CursorBuffer};
///
/// let mut buf = CursorBuffer::new();
/// buf.write_bool(true).write_i32(133).write_string("hi");
///
/// buf.set_position(0);
/// assert!(buf.read_bool()?);
/// assert_eq!(buf.read_i32()?, 133);
/// assert_eq!(buf.read_string()?, "hi");
/// assert_eq!(buf.available(), 0);
/// # Ok::<(), cursorbuf::BufferError>(())
/// ```
#[derive(Clone)]
pub struct CursorBuffer {
    // Every byte of `storage` is initialized; its len is the capacity.
    pub(crate) storage: Vec<u8>,
    pub(crate) position: usize,
    pub(crate) length: usize,
    pub(crate) order: ByteOrder,
}

impl CursorBuffer {
    /// Creates an empty big-endian buffer with the default capacity.
    pub fn new() -> Self {
        Self::with_config(BufferConfig::default())
    }

    /// Creates an empty big-endian buffer that holds `capacity` bytes
    /// before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: vec![0; capacity],
            position: 0,
            length: 0,
            order: ByteOrder::default(),
        }
    }

    /// Creates an empty buffer from a configuration.
    pub fn with_config(config: BufferConfig) -> Self {
        let mut buf = Self::with_capacity(config.initial_capacity());
        buf.order = config.byte_order();
        buf
    }

    /// Takes ownership of `bytes` as the buffer content.
    ///
    /// The cursor starts at 0 and the length equals `bytes.len()`.
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        let length = bytes.len();
        Self {
            storage: bytes,
            position: 0,
            length,
            order: ByteOrder::default(),
        }
    }

    /// A buffer with no storage at all, used as a moved-out placeholder.
    pub(crate) fn unallocated() -> Self {
        Self::with_capacity(0)
    }

    /// Replaces the content with `bytes`, keeping the byte order.
    pub fn set_bytes(&mut self, bytes: Vec<u8>) -> &mut Self {
        self.length = bytes.len();
        self.storage = bytes;
        self.position = 0;
        self
    }

    /// Ensures room for `n` more bytes past the current length.
    ///
    /// Capacity doubles (from [`DEFAULT_INITIAL_CAPACITY`] when empty) until
    /// it covers `len() + n`. It never shrinks.
    ///
    /// # Panics
    ///
    /// Panics if the required capacity overflows `usize`, like [`Vec::reserve`].
    pub fn grow(&mut self, n: usize) -> &mut Self {
        let need = self
            .length
            .checked_add(n)
            .unwrap_or_else(|| panic!("cursorbuf: capacity overflow"));
        if let Some(new_cap) = self.next_capacity(need) {
            self.storage.reserve_exact(new_cap - self.storage.len());
            self.storage.resize(new_cap, 0);
        }
        self
    }

    /// Fallible [`CursorBuffer::grow`].
    ///
    /// On failure the content is untouched.
    pub fn try_grow(&mut self, n: usize) -> Result<&mut Self, BufferError> {
        let need = self
            .length
            .checked_add(n)
            .ok_or(BufferError::AllocationFailed {
                requested: usize::MAX,
            })?;
        if let Some(new_cap) = self.next_capacity(need) {
            self.storage
                .try_reserve_exact(new_cap - self.storage.len())
                .map_err(|_| BufferError::AllocationFailed { requested: new_cap })?;
            self.storage.resize(new_cap, 0);
        }
        Ok(self)
    }

    fn next_capacity(&self, need: usize) -> Option<usize> {
        let capacity = self.storage.len();
        if need <= capacity {
            return None;
        }

        let mut new_cap = if capacity == 0 {
            DEFAULT_INITIAL_CAPACITY
        } else {
            capacity
        };
        while new_cap < need {
            new_cap = new_cap.checked_mul(2).unwrap_or(need);
        }
        Some(new_cap)
    }

    /// Reserves `n` bytes at the cursor for a write and advances past them.
    pub(crate) fn claim(&mut self, n: usize) -> &mut [u8] {
        self.grow(n);
        let start = self.position;
        self.position += n;
        if self.length < self.position {
            self.length = self.position;
        }
        &mut self.storage[start..self.position]
    }

    /// Returns the next `n` bytes and advances, or fails without moving.
    pub(crate) fn consume(&mut self, n: usize) -> Result<&[u8], BufferError> {
        let available = self.available();
        if available < n {
            return Err(BufferError::insufficient(n, available));
        }
        let start = self.position;
        self.position += n;
        Ok(&self.storage[start..self.position])
    }

    /// Appends `bytes` at the cursor verbatim.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.claim(bytes.len()).copy_from_slice(bytes);
        self
    }

    /// Returns a view of the next `n` bytes and advances the cursor.
    ///
    /// The view borrows the buffer; use
    /// [`CursorBuffer::read_bytes_copied`] to keep the bytes past later
    /// mutation.
    pub fn read_bytes(&mut self, n: usize) -> Result<&[u8], BufferError> {
        self.consume(n)
    }

    /// Copies the next `n` bytes out and advances the cursor.
    pub fn read_bytes_copied(&mut self, n: usize) -> Result<Bytes, BufferError> {
        self.consume(n).map(Bytes::copy_from_slice)
    }

    /// Returns the next `n` bytes without advancing.
    pub fn peek_bytes(&self, n: usize) -> Result<&[u8], BufferError> {
        self.read_bytes_at(self.position, n)
    }

    /// Reads `n` bytes at absolute `position` without touching the cursor.
    ///
    /// `position` is clamped to the length, as [`CursorBuffer::set_position`]
    /// does.
    pub fn read_bytes_at(&self, position: usize, n: usize) -> Result<&[u8], BufferError> {
        let position = position.min(self.length);
        let available = self.length - position;
        if available < n {
            return Err(BufferError::insufficient(n, available));
        }
        Ok(&self.storage[position..position + n])
    }

    /// Advances the cursor by `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<&mut Self, BufferError> {
        self.consume(n)?;
        Ok(self)
    }

    /// Moves the cursor, clamped to `[0, len()]`.
    pub fn set_position(&mut self, position: usize) -> &mut Self {
        self.position = position.min(self.length);
        self
    }

    /// Returns the cursor.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the bytes between cursor and length.
    pub fn available(&self) -> usize {
        self.length - self.position
    }

    /// Returns the logical length.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns true if the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the size of the backing storage.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Returns the byte order used by fixed-width codecs.
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Changes the byte order for subsequent operations.
    ///
    /// Bytes already written keep the order they were written in.
    pub fn set_byte_order(&mut self, order: ByteOrder) -> &mut Self {
        self.order = order;
        self
    }

    /// Empties the buffer, keeping its capacity.
    pub fn reset(&mut self) -> &mut Self {
        self.position = 0;
        self.length = 0;
        self
    }

    /// Sets cursor and length to `position`, dropping the tail.
    ///
    /// The dropped bytes are not erased; later writes overwrite them.
    /// `position` is clamped to the current length.
    pub fn truncate(&mut self, position: usize) -> &mut Self {
        let position = position.min(self.length);
        self.position = position;
        self.length = position;
        self
    }

    /// Alias of [`CursorBuffer::truncate`].
    pub fn back(&mut self, position: usize) -> &mut Self {
        self.truncate(position)
    }

    /// Discards the bytes before `position` by shifting the rest to the front.
    ///
    /// The cursor returns to 0. Deleting at or past the length empties
    /// the buffer.
    pub fn delete_before(&mut self, position: usize) -> &mut Self {
        if position >= self.length {
            return self.reset();
        }
        self.storage.copy_within(position..self.length, 0);
        self.length -= position;
        self.position = 0;
        self
    }

    /// Returns the whole logical content.
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage[..self.length]
    }

    /// Returns the content between cursor and length.
    pub fn rest(&self) -> &[u8] {
        &self.storage[self.position..self.length]
    }

    /// Copies the whole logical content.
    pub fn copy_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(self.as_bytes())
    }

    /// Copies the content between cursor and length.
    pub fn copy_rest_of_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(self.rest())
    }

    /// Consumes the buffer and returns its logical content without copying.
    pub fn into_bytes(self) -> Bytes {
        Bytes::from(self.into_vec())
    }

    /// Consumes the buffer and returns its logical content as a vector.
    pub fn into_vec(self) -> Vec<u8> {
        let mut storage = self.storage;
        storage.truncate(self.length);
        storage
    }
}

impl Default for CursorBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CursorBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorBuffer")
            .field("position", &self.position)
            .field("len", &self.length)
            .field("capacity", &self.storage.len())
            .field("byte_order", &self.order)
            .finish()
    }
}

impl From<Vec<u8>> for CursorBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_vec(bytes)
    }
}

impl From<&[u8]> for CursorBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from_vec(bytes.to_vec())
    }
}

impl From<Bytes> for CursorBuffer {
    fn from(bytes: Bytes) -> Self {
        Self::from_vec(bytes.to_vec())
    }
}

impl From<BytesMut> for CursorBuffer {
    fn from(bytes: BytesMut) -> Self {
        Self::from_vec(bytes.to_vec())
    }
}

impl From<CursorBuffer> for Bytes {
    fn from(buf: CursorBuffer) -> Self {
        buf.into_bytes()
    }
}
