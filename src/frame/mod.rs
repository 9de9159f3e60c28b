//! Head-framed message streams.
//!
//! - [`FrameDecoder`] - Stateful decoder with `extend()`/`decode()`/`finish()` API
//! - [`FrameReader`] - Iterator that yields frames from a [`std::io::Read`] source

mod decoder;
mod iter;

pub use decoder::FrameDecoder;
pub use iter::FrameReader;
