//! Async stream adapter for head-framed messages.
//!
//! This module decodes frames from any `futures_io::AsyncRead`, making it
//! runtime-agnostic and compatible with tokio, async-std, smol, and other
//! async runtimes.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use cursorbuf::{frames_async, FrameConfig};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), cursorbuf::BufferError> {
//!     let mut stream = frames_async(reader, FrameConfig::default());
//!
//!     while let Some(frame) = stream.next().await {
//!         let mut frame = frame?;
//!         println!("frame: {}", frame.read_string()?);
//!     }
//!     Ok(())
//! }
//! ```

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::buffer::CursorBuffer;
use crate::config::FrameConfig;
use crate::error::BufferError;
use crate::frame::FrameDecoder;

pin_project! {
    /// A stream that yields one payload buffer per frame read from an
    /// async reader.
    ///
    /// Works with tokio (through `tokio_util::compat`), async-std, smol, or
    /// any futures-compatible runtime. The stream ends after the first
    /// error.
    pub struct FrameStream<R> {
        #[pin]
        reader: R,
        decoder: FrameDecoder,
        finished: bool,
    }
}

impl<R> FrameStream<R> {
    /// Creates a frame stream over `reader`.
    pub fn new(reader: R, config: FrameConfig) -> Self {
        Self {
            reader,
            decoder: FrameDecoder::new(config),
            finished: false,
        }
    }
}

impl<R: AsyncRead> Stream for FrameStream<R> {
    type Item = Result<CursorBuffer, BufferError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        loop {
            match this.decoder.decode() {
                Ok(Some(frame)) => return Poll::Ready(Some(Ok(frame))),
                Ok(None) => {}
                Err(e) => {
                    *this.finished = true;
                    return Poll::Ready(Some(Err(e)));
                }
            }

            match this
                .decoder
                .buffer_mut()
                .poll_fill_from(cx, this.reader.as_mut())
            {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Ok(0)) => {
                    *this.finished = true;
                    return Poll::Ready(this.decoder.finish().err().map(Err));
                }
                Poll::Ready(Ok(_)) => {}
                Poll::Ready(Err(e)) => {
                    *this.finished = true;
                    return Poll::Ready(Some(Err(e)));
                }
            }
        }
    }
}

/// Creates a frame stream from an async reader.
///
/// Uses `futures_io::AsyncRead` for runtime-agnostic async I/O. For tokio
/// readers, convert with `tokio_util::compat::TokioAsyncReadCompatExt`.
pub fn frames_async<R: AsyncRead>(reader: R, config: FrameConfig) -> FrameStream<R> {
    FrameStream::new(reader, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(payloads: &[&str]) -> Vec<u8> {
        let mut out = Vec::new();
        for payload in payloads {
            let mut frame = CursorBuffer::with_head();
            frame.write_string(payload);
            frame.update_head().unwrap();
            out.extend_from_slice(frame.as_bytes());
        }
        out
    }

    #[tokio::test]
    async fn test_frame_stream_empty() {
        let reader: &[u8] = &[];
        let stream = FrameStream::new(reader, FrameConfig::default());
        let frames: Vec<_> = futures_util::StreamExt::collect(stream).await;
        assert!(frames.is_empty());
    }

    #[tokio::test]
    async fn test_frame_stream_decodes_all() {
        let data = wire(&["a", "bb", "ccc"]);
        let reader: &[u8] = &data;
        let stream = frames_async(reader, FrameConfig::default());

        let frames: Vec<_> = futures_util::StreamExt::collect(stream).await;
        let words = frames
            .into_iter()
            .map(|frame| frame?.read_string())
            .collect::<Result<Vec<_>, BufferError>>()
            .unwrap();
        assert_eq!(words, ["a", "bb", "ccc"]);
    }

    #[tokio::test]
    async fn test_frame_stream_truncated() {
        let mut data = wire(&["whole", "cut"]);
        data.pop();
        let reader: &[u8] = &data;
        let stream = frames_async(reader, FrameConfig::default());

        let frames: Vec<_> = futures_util::StreamExt::collect(stream).await;
        assert_eq!(frames.len(), 2);
        assert!(frames[0].is_ok());
        assert!(frames[1].is_err());
    }
}
