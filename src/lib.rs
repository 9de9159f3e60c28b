//! cursorbuf
//!
//! Binary read/write cursor over a growable byte region.
//!
//! `cursorbuf` serializes and deserializes primitive values in a chosen byte
//! order, plus compact varints and length-prefixed strings and blobs. It is
//! designed as a small building block for:
//!
//! - network message encoding
//! - length-delimited framing
//! - binary file records
//!
//! The crate intentionally:
//! - does NOT describe its own wire format (byte order and framing are
//!   agreed out of band)
//! - does NOT synchronize a single buffer
//! - does NOT compress or encrypt
//!
//! # Wire format
//!
//! - fixed-width integers and IEEE-754 floats in the buffer's [`ByteOrder`]
//! - varints: 7 bits per byte, least significant group first, high bit set
//!   while more bytes follow, at most 10 bytes; signed values zig-zag mapped
//! - strings and blobs: unsigned varint byte count, then the raw bytes
//! - booleans: one byte, 1 or 0
//! - frames: 4-byte unsigned length head, then the payload
//!
//! # Encode / decode
//!
//! ```
//! use cursorbuf::{ByteOrder, CursorBuffer};
//!
//! let mut buf = CursorBuffer::new();
//! buf.set_byte_order(ByteOrder::LittleEndian)
//!     .write_u16(7)
//!     .write_varint_i64(-3)
//!     .write_string("hello");
//!
//! buf.set_position(0);
//! assert_eq!(buf.read_u16()?, 7);
//! assert_eq!(buf.read_varint_i64()?, -3);
//! assert_eq!(buf.read_string()?, "hello");
//! # Ok::<(), cursorbuf::BufferError>(())
//! ```
//!
//! # Pooling
//!
//! ```
//! use cursorbuf::BufferPool;
//!
//! let pool = BufferPool::new();
//! {
//!     let mut buf = pool.lease();
//!     buf.write_u64(42);
//! } // returned to the pool here
//! assert_eq!(pool.idle_len(), 1);
//! ```
//!
//! # Async (feature = "async-io")
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
//!         let frame = frame?;
//!         println!("frame {} bytes", frame.len());
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod buffer;
mod codec;
mod config;
mod error;
mod frame;

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface
//

pub use buffer::{BufferPool, CursorBuffer, HEAD_LEN, PoolStats, PooledBuffer, READ_STEP};
pub use codec::{
    ByteOrder, FixedWidth, MAX_VARINT_LEN_32, MAX_VARINT_LEN_64, encode_uvarint, uvarint_len,
    zigzag_decode, zigzag_encode,
};
pub use config::{
    BufferConfig, DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_FRAME_LEN, FrameConfig, PoolConfig,
};
pub use error::BufferError;
pub use frame::{FrameDecoder, FrameReader};

#[cfg(feature = "async-io")]
pub use async_stream::{FillFrom, FrameStream, frames_async};
