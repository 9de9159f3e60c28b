//! Incremental decoder for head-framed byte streams.
//!
//! The decoder owns one accumulating [`CursorBuffer`]. Callers append raw
//! bytes at its tail, then pull complete frames from the cursor. Consumed
//! bytes are compacted away before the next append so a long-lived stream
//! does not grow the buffer without bound.

use crate::buffer::{CursorBuffer, HEAD_LEN};
use crate::codec::FixedWidth;
use crate::config::{BufferConfig, FrameConfig};
use crate::error::BufferError;

/// Stateful head-frame decoder with a `decode()`/`finish()` API.
///
/// # Example
///
/// ```
/// use cursorbuf::{CursorBuffer, FrameConfig, FrameDecoder};
///
/// let mut frame = CursorBuffer::with_head();
/// frame.write_string("hello");
/// frame.update_head()?;
///
/// let mut decoder = FrameDecoder::new(FrameConfig::default());
/// decoder.extend(&frame.as_bytes()[..3]);
/// assert!(decoder.decode()?.is_none());
///
/// decoder.extend(&frame.as_bytes()[3..]);
/// let mut payload = decoder.decode()?.expect("complete frame");
/// assert_eq!(payload.read_string()?, "hello");
/// assert!(decoder.finish().is_ok());
/// # Ok::<(), cursorbuf::BufferError>(())
/// ```
#[derive(Debug)]
pub struct FrameDecoder {
    buffer: CursorBuffer,
    config: FrameConfig,
}

impl FrameDecoder {
    /// Creates a decoder with an empty accumulation buffer.
    pub fn new(config: FrameConfig) -> Self {
        Self {
            buffer: CursorBuffer::with_config(BufferConfig::default()),
            config,
        }
    }

    /// Returns the decoder configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Returns the accumulation buffer, compacted and ready for an append
    /// at its tail.
    pub fn buffer_mut(&mut self) -> &mut CursorBuffer {
        self.compact();
        &mut self.buffer
    }

    /// Appends raw stream bytes.
    pub fn extend(&mut self, bytes: &[u8]) {
        self.compact();
        let end = self.buffer.len();
        self.buffer.set_position(end).write_bytes(bytes);
        self.buffer.set_position(0);
    }

    /// Number of buffered bytes not yet returned as frames.
    pub fn pending_len(&self) -> usize {
        self.buffer.available()
    }

    fn compact(&mut self) {
        let consumed = self.buffer.position();
        if consumed > 0 {
            self.buffer.delete_before(consumed);
        }
    }

    /// Extracts the next complete frame, if one is buffered.
    ///
    /// The returned buffer holds the payload only, cursor at 0, with the
    /// configured byte order.
    ///
    /// # Errors
    ///
    /// [`BufferError::FrameTooLarge`] if the head announces more than
    /// `max_frame_len` bytes. The head is left unconsumed.
    pub fn decode(&mut self) -> Result<Option<CursorBuffer>, BufferError> {
        let head = match self.buffer.peek_bytes(HEAD_LEN) {
            Ok(src) => u32::decode(self.config.byte_order(), src) as usize,
            Err(_) => return Ok(None),
        };

        if head > self.config.max_frame_len() {
            tracing::debug!(
                head,
                max = self.config.max_frame_len(),
                "rejecting oversized frame"
            );
            return Err(BufferError::FrameTooLarge {
                actual: head,
                max: self.config.max_frame_len(),
            });
        }

        if self.buffer.available() - HEAD_LEN < head {
            return Ok(None);
        }

        self.buffer.skip(HEAD_LEN)?;
        let payload = self.buffer.read_bytes(head)?.to_vec();
        tracing::trace!(len = head, "decoded frame");

        let mut frame = CursorBuffer::from_vec(payload);
        frame.set_byte_order(self.config.byte_order());
        Ok(Some(frame))
    }

    /// Checks that the stream ended on a frame boundary.
    ///
    /// # Errors
    ///
    /// An [`std::io::ErrorKind::UnexpectedEof`] error if a partial frame is
    /// still buffered.
    pub fn finish(&mut self) -> Result<(), BufferError> {
        let pending = self.pending_len();
        if pending == 0 {
            return Ok(());
        }
        tracing::debug!(pending, "stream ended inside a frame");
        Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("stream ended with {} bytes of a partial frame", pending),
        )
        .into())
    }

    /// Drops buffered bytes and starts over.
    pub fn reset(&mut self) {
        self.buffer.reset();
    }
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new(FrameConfig::default())
    }
}
