//! Async ingestion and framing support.
//!
//! This module provides asynchronous ingestion using the `futures-io::AsyncRead`
//! trait, making it runtime-agnostic and compatible with tokio, async-std,
//! smol, and other async runtimes.
//!
//! - `CursorBuffer::fill_from_async` and friends - async counterparts of the
//!   sync ingestion methods
//! - [`frames_async`] - Creates an async stream of frames from an async reader
//!
//! This module requires the `async-io` feature to be enabled.

mod fill;
mod stream;

pub use fill::FillFrom;
pub use stream::{FrameStream, frames_async};
