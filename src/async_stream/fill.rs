//! Async ingestion from a `futures_io::AsyncRead` source.

use std::future::{Future, poll_fn};
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_io::AsyncRead;

use crate::buffer::{CursorBuffer, READ_STEP};
use crate::error::BufferError;

impl CursorBuffer {
    /// Polls `reader` once for a chunk appended at the tail.
    ///
    /// Same semantics as [`CursorBuffer::fill_from`]: the cursor does not
    /// move and `Ready(Ok(0))` means end of data.
    pub fn poll_fill_from<R: AsyncRead + ?Sized>(
        &mut self,
        cx: &mut Context<'_>,
        mut reader: Pin<&mut R>,
    ) -> Poll<Result<usize, BufferError>> {
        self.grow(READ_STEP);
        let start = self.length;
        loop {
            match reader.as_mut().poll_read(cx, &mut self.storage[start..]) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Ok(n)) => {
                    self.length += n;
                    return Poll::Ready(Ok(n));
                }
                Poll::Ready(Err(e)) if e.kind() == io::ErrorKind::Interrupted => continue,
                Poll::Ready(Err(e)) => return Poll::Ready(Err(e.into())),
            }
        }
    }

    /// Pulls one chunk from `reader` into the tail.
    pub fn fill_from_async<'a, R: AsyncRead + Unpin + ?Sized>(
        &'a mut self,
        reader: &'a mut R,
    ) -> FillFrom<'a, R> {
        FillFrom {
            buffer: self,
            reader,
        }
    }

    /// Pulls from `reader` until it signals end of data.
    pub async fn read_all_from_async<R: AsyncRead + Unpin + ?Sized>(
        &mut self,
        reader: &mut R,
    ) -> Result<usize, BufferError> {
        let mut total = 0;
        loop {
            match self.fill_from_async(reader).await? {
                0 => return Ok(total),
                n => total += n,
            }
        }
    }

    /// Appends exactly `n` bytes from `reader`.
    ///
    /// If the source ends first this fails with an
    /// [`io::ErrorKind::UnexpectedEof`] error and the length is unchanged.
    pub async fn read_exact_from_async<R: AsyncRead + Unpin + ?Sized>(
        &mut self,
        reader: &mut R,
        n: usize,
    ) -> Result<&mut Self, BufferError> {
        self.grow(n);
        let start = self.length;
        let mut filled = 0;
        while filled < n {
            let dst = &mut self.storage[start + filled..start + n];
            let got = poll_fn(|cx| Pin::new(&mut *reader).poll_read(cx, &mut *dst)).await;
            match got {
                Ok(0) => return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into()),
                Ok(got) => filled += got,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        self.length += n;
        Ok(self)
    }
}

/// Future returned by [`CursorBuffer::fill_from_async`].
#[must_use = "futures do nothing unless polled"]
pub struct FillFrom<'a, R: ?Sized> {
    buffer: &'a mut CursorBuffer,
    reader: &'a mut R,
}

impl<R: AsyncRead + Unpin + ?Sized> Future for FillFrom<'_, R> {
    type Output = Result<usize, BufferError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;
        this.buffer.poll_fill_from(cx, Pin::new(&mut *this.reader))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fill_from_async() {
        let mut reader: &[u8] = &[1, 2, 3];
        let mut buf = CursorBuffer::new();
        buf.write_u8(0);

        assert_eq!(buf.fill_from_async(&mut reader).await.unwrap(), 3);
        assert_eq!(buf.as_bytes(), &[0, 1, 2, 3]);
        assert_eq!(buf.position(), 1);
        assert_eq!(buf.fill_from_async(&mut reader).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_read_all_from_async() {
        let data: Vec<u8> = (0..1000).map(|i| (i % 256) as u8).collect();
        let mut reader: &[u8] = &data;
        let mut buf = CursorBuffer::with_capacity(0);
        assert_eq!(buf.read_all_from_async(&mut reader).await.unwrap(), 1000);
        assert_eq!(buf.as_bytes(), &data[..]);
    }

    #[tokio::test]
    async fn test_read_exact_from_async_short() {
        let mut reader: &[u8] = &[1, 2, 3];
        let mut buf = CursorBuffer::new();
        buf.read_exact_from_async(&mut reader, 2).await.unwrap();
        assert_eq!(buf.as_bytes(), &[1, 2]);

        let err = buf.read_exact_from_async(&mut reader, 2).await.unwrap_err();
        assert!(matches!(err, BufferError::Io(ref e) if e.kind() == io::ErrorKind::UnexpectedEof));
        assert_eq!(buf.len(), 2);
    }
}
