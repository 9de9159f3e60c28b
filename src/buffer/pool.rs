//! Thread-safe pool of reusable cursor buffers.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::config::PoolConfig;
use crate::error::BufferError;

use super::CursorBuffer;

/// A snapshot of pool activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    /// Buffers currently waiting for checkout.
    pub idle: usize,
    /// Buffers constructed because no idle one was available.
    pub created: usize,
    /// Checkouts served from the idle set.
    pub reused: usize,
}

/// A pool of interchangeable [`CursorBuffer`]s.
///
/// Checkout hands out an idle buffer or builds a fresh one. Release empties
/// the buffer (cursor and length to 0, byte order back to the pool default)
/// but keeps its capacity, so pooled buffers settle at the size of the
/// typical message.
///
/// The pool is cheap to clone; clones share the same idle set.
///
/// # Example
///
/// ```
/// use cursorbuf::BufferPool;
///
/// let pool = BufferPool::new();
///
/// let mut buf = pool.checkout();
/// buf.write_string("hello");
/// pool.release(buf);
///
/// let buf = pool.checkout();
/// assert!(buf.is_empty());
/// ```
#[derive(Clone, Default)]
pub struct BufferPool {
    inner: Arc<PoolInner>,
}

#[derive(Default)]
struct PoolInner {
    idle: Mutex<Vec<CursorBuffer>>,
    config: PoolConfig,
    created: AtomicUsize,
    reused: AtomicUsize,
}

impl BufferPool {
    /// Creates an unbounded pool of default buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pool from a validated configuration.
    pub fn with_config(config: PoolConfig) -> Result<Self, BufferError> {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(PoolInner {
                idle: Mutex::new(Vec::new()),
                config,
                created: AtomicUsize::new(0),
                reused: AtomicUsize::new(0),
            }),
        })
    }

    /// Returns the pool configuration.
    pub fn config(&self) -> &PoolConfig {
        &self.inner.config
    }

    /// Takes an empty buffer out of the pool.
    pub fn checkout(&self) -> CursorBuffer {
        let reused = self.inner.idle.lock().pop();
        match reused {
            Some(buf) => {
                self.inner.reused.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(capacity = buf.capacity(), "reusing pooled buffer");
                buf
            }
            None => {
                self.inner.created.fetch_add(1, Ordering::Relaxed);
                tracing::trace!("pool empty, constructing buffer");
                CursorBuffer::with_config(*self.inner.config.buffer_config())
            }
        }
    }

    /// Takes a buffer out of the pool wrapped in a guard that returns it
    /// on drop.
    pub fn lease(&self) -> PooledBuffer {
        PooledBuffer {
            buffer: self.checkout(),
            pool: self.clone(),
            detached: false,
        }
    }

    /// Empties `buffer` and makes it available again.
    ///
    /// Passing `None` does nothing.
    pub fn release(&self, buffer: impl Into<Option<CursorBuffer>>) {
        let Some(mut buffer) = buffer.into() else {
            return;
        };
        buffer
            .reset()
            .set_byte_order(self.inner.config.buffer_config().byte_order());

        let mut idle = self.inner.idle.lock();
        if let Some(max) = self.inner.config.max_idle() {
            if idle.len() >= max {
                tracing::debug!(max_idle = max, "pool full, dropping returned buffer");
                return;
            }
        }
        idle.push(buffer);
    }

    /// Drops every idle buffer and returns how many were released.
    pub fn shrink(&self) -> usize {
        let mut idle = self.inner.idle.lock();
        let count = idle.len();
        idle.clear();
        count
    }

    /// Returns the number of idle buffers.
    pub fn idle_len(&self) -> usize {
        self.inner.idle.lock().len()
    }

    /// Returns a snapshot of pool activity.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            idle: self.idle_len(),
            created: self.inner.created.load(Ordering::Relaxed),
            reused: self.inner.reused.load(Ordering::Relaxed),
        }
    }
}

impl std::fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferPool")
            .field("config", &self.inner.config)
            .field("stats", &self.stats())
            .finish()
    }
}

/// A buffer leased from a [`BufferPool`], returned to it on drop.
pub struct PooledBuffer {
    buffer: CursorBuffer,
    pool: BufferPool,
    detached: bool,
}

impl PooledBuffer {
    /// Takes the buffer out of the guard; it will not return to the pool.
    pub fn detach(mut self) -> CursorBuffer {
        self.detached = true;
        std::mem::replace(&mut self.buffer, CursorBuffer::unallocated())
    }
}

impl Deref for PooledBuffer {
    type Target = CursorBuffer;

    fn deref(&self) -> &CursorBuffer {
        &self.buffer
    }
}

impl DerefMut for PooledBuffer {
    fn deref_mut(&mut self) -> &mut CursorBuffer {
        &mut self.buffer
    }
}

impl Drop for PooledBuffer {
    fn drop(&mut self) {
        if !self.detached {
            let buffer = std::mem::replace(&mut self.buffer, CursorBuffer::unallocated());
            self.pool.release(buffer);
        }
    }
}

impl std::fmt::Debug for PooledBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PooledBuffer").field(&self.buffer).finish()
    }
}
