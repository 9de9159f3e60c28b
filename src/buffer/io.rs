//! Streaming ingestion and the std / `bytes` trait surface.
//!
//! - `fill_from` / `read_all_from` / `read_exact_from` append bytes pulled
//!   from a [`std::io::Read`] source at the logical tail
//! - [`std::io::Write`] appends at the cursor and never short-writes
//! - [`std::io::Read`] and [`bytes::Buf`] consume from the cursor

use std::io::{self, Read, Write};

use bytes::Buf;

use crate::error::BufferError;

use super::CursorBuffer;

/// Spare room reserved before each chunked read from a source.
pub const READ_STEP: usize = 256;

impl CursorBuffer {
    /// Pulls one chunk from `reader` into the tail.
    ///
    /// The bytes land after the current length; the cursor does not move.
    /// Returns the number of bytes appended, 0 meaning end of data.
    /// Interrupted reads are retried.
    pub fn fill_from<R: Read + ?Sized>(&mut self, reader: &mut R) -> Result<usize, BufferError> {
        self.grow(READ_STEP);
        let start = self.length;
        loop {
            match reader.read(&mut self.storage[start..]) {
                Ok(n) => {
                    self.length += n;
                    return Ok(n);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Pulls from `reader` until it signals end of data.
    ///
    /// Returns the total number of bytes appended.
    pub fn read_all_from<R: Read + ?Sized>(&mut self, reader: &mut R) -> Result<usize, BufferError> {
        let mut total = 0;
        loop {
            match self.fill_from(reader)? {
                0 => return Ok(total),
                n => total += n,
            }
        }
    }

    /// Appends exactly `n` bytes from `reader`.
    ///
    /// If the source ends first this fails with an
    /// [`io::ErrorKind::UnexpectedEof`] error and the length is unchanged.
    pub fn read_exact_from<R: Read + ?Sized>(
        &mut self,
        reader: &mut R,
        n: usize,
    ) -> Result<&mut Self, BufferError> {
        self.grow(n);
        let start = self.length;
        reader.read_exact(&mut self.storage[start..start + n])?;
        self.length += n;
        Ok(self)
    }
}

impl Write for CursorBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Read for CursorBuffer {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let n = out.len().min(self.available());
        out[..n].copy_from_slice(&self.storage[self.position..self.position + n]);
        self.position += n;
        Ok(n)
    }
}

impl Buf for CursorBuffer {
    fn remaining(&self) -> usize {
        self.available()
    }

    fn chunk(&self) -> &[u8] {
        self.rest()
    }

    fn advance(&mut self, cnt: usize) {
        assert!(
            cnt <= self.available(),
            "cannot advance past `remaining`: {} <= {}",
            cnt,
            self.available()
        );
        self.position += cnt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Yields at most `step` bytes per read.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            let n = self.step.min(out.len()).min(self.data.len());
            out[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    struct Failing;

    impl Read for Failing {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        }
    }

    #[test]
    fn test_fill_from_appends_at_tail() {
        let mut buf = CursorBuffer::new();
        buf.write_bytes(&[1, 2]);
        buf.set_position(1);

        let n = buf.fill_from(&mut Cursor::new(vec![3, 4, 5])).unwrap();
        assert_eq!(n, 3);
        assert_eq!(buf.as_bytes(), &[1, 2, 3, 4, 5]);
        assert_eq!(buf.position(), 1);
    }

    #[test]
    fn test_fill_from_end_of_data() {
        let mut buf = CursorBuffer::new();
        assert_eq!(buf.fill_from(&mut io::empty()).unwrap(), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_read_all_from() {
        let data: Vec<u8> = (0..1000).map(|i| (i % 256) as u8).collect();
        let mut buf = CursorBuffer::with_capacity(0);
        let mut src = Trickle {
            data: &data,
            step: 7,
        };
        assert_eq!(buf.read_all_from(&mut src).unwrap(), 1000);
        assert_eq!(buf.as_bytes(), &data[..]);
    }

    #[test]
    fn test_source_failure_propagates() {
        let mut buf = CursorBuffer::new();
        let err = buf.read_all_from(&mut Failing).unwrap_err();
        match err {
            BufferError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::ConnectionReset),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_exact_from() {
        let mut buf = CursorBuffer::new();
        let mut src = Trickle {
            data: &[1, 2, 3, 4, 5],
            step: 2,
        };
        buf.read_exact_from(&mut src, 4).unwrap();
        assert_eq!(buf.as_bytes(), &[1, 2, 3, 4]);

        let err = buf.read_exact_from(&mut src, 4).unwrap_err();
        assert!(matches!(err, BufferError::Io(ref e) if e.kind() == io::ErrorKind::UnexpectedEof));
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn test_io_write_and_read() {
        let mut buf = CursorBuffer::new();
        assert_eq!(buf.write(&[0, 1, 2, 3]).unwrap(), 4);

        buf.set_position(0);
        let mut out = [0u8; 2];
        assert_eq!(Read::read(&mut buf, &mut out).unwrap(), 2);
        assert_eq!(out, [0, 1]);

        buf.set_position(0);
        let mut out = [0u8; 10];
        assert_eq!(Read::read(&mut buf, &mut out).unwrap(), 4);
    }

    #[test]
    fn test_buf_impl() {
        let mut buf = CursorBuffer::new();
        buf.write_u32(0xDEADBEEF).write_u8(9);
        buf.set_position(0);

        assert_eq!(buf.remaining(), 5);
        assert_eq!(buf.get_u32(), 0xDEADBEEF);
        assert_eq!(buf.chunk(), &[9]);
        Buf::advance(&mut buf, 1);
        assert!(!buf.has_remaining());
    }

    #[test]
    #[should_panic(expected = "cannot advance past")]
    fn test_buf_advance_past_end() {
        let mut buf = CursorBuffer::from_vec(vec![1]);
        Buf::advance(&mut buf, 2);
    }
}
