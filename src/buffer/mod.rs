//! The binary cursor buffer and its pool.
//!
//! - [`CursorBuffer`] - growable byte region with cursor, length and byte order
//! - [`BufferPool`] - thread-safe reuse of buffers between messages

mod cursor;
mod head;
mod io;
mod pool;
mod typed;

pub use cursor::CursorBuffer;
pub use head::HEAD_LEN;
pub use io::READ_STEP;
pub use pool::{BufferPool, PoolStats, PooledBuffer};
