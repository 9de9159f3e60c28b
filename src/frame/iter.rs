//! Iterator over head-framed messages read from a [`std::io::Read`] source.

use std::io::Read;

use crate::buffer::CursorBuffer;
use crate::config::FrameConfig;
use crate::error::BufferError;

use super::FrameDecoder;

/// An iterator that yields one payload buffer per frame.
///
/// `FrameReader` pulls bytes from the source in chunks, as needed, and
/// stops after the first error.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use cursorbuf::{CursorBuffer, FrameConfig, FrameReader};
///
/// let mut wire = Vec::new();
/// for word in ["alpha", "beta"] {
///     let mut frame = CursorBuffer::with_head();
///     frame.write_string(word);
///     frame.update_head()?;
///     wire.extend_from_slice(frame.as_bytes());
/// }
///
/// let reader = FrameReader::new(Cursor::new(wire), FrameConfig::default());
/// let words = reader
///     .map(|frame| frame?.read_string())
///     .collect::<Result<Vec<_>, _>>()?;
/// assert_eq!(words, ["alpha", "beta"]);
/// # Ok::<(), cursorbuf::BufferError>(())
/// ```
pub struct FrameReader<R> {
    reader: R,
    decoder: FrameDecoder,
    finished: bool,
}

impl<R: Read> FrameReader<R> {
    /// Creates a frame reader over `reader`.
    pub fn new(reader: R, config: FrameConfig) -> Self {
        Self {
            reader,
            decoder: FrameDecoder::new(config),
            finished: false,
        }
    }

    /// Returns the wrapped source.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Iterator for FrameReader<R> {
    type Item = Result<CursorBuffer, BufferError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.decoder.decode() {
                Ok(Some(frame)) => return Some(Ok(frame)),
                Ok(None) => {}
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }

            match self.decoder.buffer_mut().fill_from(&mut self.reader) {
                Ok(0) => {
                    self.finished = true;
                    return self.decoder.finish().err().map(Err);
                }
                Ok(_) => {}
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<R> std::fmt::Debug for FrameReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameReader")
            .field("decoder", &self.decoder)
            .field("finished", &self.finished)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn wire(payloads: &[&[u8]]) -> Vec<u8> {
        let mut out = Vec::new();
        for payload in payloads {
            let mut frame = CursorBuffer::with_head();
            frame.write_bytes(payload);
            frame.update_head().unwrap();
            out.extend_from_slice(frame.as_bytes());
        }
        out
    }

    #[test]
    fn test_empty_source() {
        let mut reader = FrameReader::new(Cursor::new(Vec::new()), FrameConfig::default());
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_frames_larger_than_read_step() {
        let big = vec![0x5A; 1000];
        let data = wire(&[b"small", &big, b""]);
        let frames: Vec<_> = FrameReader::new(Cursor::new(data), FrameConfig::default())
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].as_bytes(), b"small");
        assert_eq!(frames[1].as_bytes(), &big[..]);
        assert!(frames[2].is_empty());
    }

    #[test]
    fn test_truncated_stream() {
        let mut data = wire(&[b"complete", b"partial"]);
        data.truncate(data.len() - 2);

        let mut reader = FrameReader::new(Cursor::new(data), FrameConfig::default());
        assert!(reader.next().unwrap().is_ok());
        assert!(matches!(
            reader.next(),
            Some(Err(BufferError::Io(ref e))) if e.kind() == std::io::ErrorKind::UnexpectedEof
        ));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_oversized_frame_fuses() {
        let data = wire(&[b"0123456789", b"ok"]);
        let config = FrameConfig::default().with_max_frame_len(4);
        let mut reader = FrameReader::new(Cursor::new(data), config);
        assert!(matches!(
            reader.next(),
            Some(Err(BufferError::FrameTooLarge { actual: 10, max: 4 }))
        ));
        assert!(reader.next().is_none());
    }
}
