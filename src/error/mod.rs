//! Error types for cursorbuf.

use std::fmt;

/// Errors that can occur while encoding, decoding or ingesting bytes.
///
/// Every read-family operation that fails leaves the buffer cursor where it
/// was before the call, so a caller may supply more bytes and retry.
#[derive(Debug)]
pub enum BufferError {
    /// Fewer bytes remain between cursor and length than the read requires.
    InsufficientData {
        /// Bytes the operation needed.
        requested: usize,
        /// Bytes that were available.
        available: usize,
    },

    /// A varint ran past its byte budget without a terminating byte.
    MalformedVarint {
        /// Bytes inspected before giving up.
        consumed: usize,
    },

    /// A well-formed varint does not fit the requested integer width.
    VarintOverflow {
        /// Width of the target integer in bits.
        bits: u32,
    },

    /// A boolean byte other than 0 or 1.
    InvalidBool {
        /// The offending byte.
        value: u8,
    },

    /// A length-prefixed string did not hold valid UTF-8.
    InvalidUtf8(std::str::Utf8Error),

    /// A frame head announced more bytes than allowed.
    FrameTooLarge {
        /// The announced (or produced) payload size.
        actual: usize,
        /// The configured maximum.
        max: usize,
    },

    /// The allocator refused to grow the backing storage.
    AllocationFailed {
        /// Capacity that was requested.
        requested: usize,
    },

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// The external byte source failed.
    Io(std::io::Error),
}

impl BufferError {
    /// Returns true if the failure may go away once more bytes are loaded.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, BufferError::InsufficientData { .. })
    }

    pub(crate) fn insufficient(requested: usize, available: usize) -> Self {
        BufferError::InsufficientData {
            requested,
            available,
        }
    }
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::InsufficientData {
                requested,
                available,
            } => write!(
                f,
                "insufficient data: need {} bytes, {} available",
                requested, available
            ),
            BufferError::MalformedVarint { consumed } => {
                write!(f, "malformed varint: no terminator after {} bytes", consumed)
            }
            BufferError::VarintOverflow { bits } => {
                write!(f, "varint overflows {}-bit integer", bits)
            }
            BufferError::InvalidBool { value } => write!(f, "invalid bool byte: {:#04x}", value),
            BufferError::InvalidUtf8(e) => write!(f, "invalid utf-8 string: {}", e),
            BufferError::FrameTooLarge { actual, max } => {
                write!(f, "frame too large: {} bytes (max {})", actual, max)
            }
            BufferError::AllocationFailed { requested } => {
                write!(f, "allocation failed: {} bytes", requested)
            }
            BufferError::InvalidConfig { message } => write!(f, "invalid config: {}", message),
            BufferError::Io(e) => write!(f, "io error: {}", e),
        }
    }
}

impl std::error::Error for BufferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BufferError::Io(e) => Some(e),
            BufferError::InvalidUtf8(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BufferError {
    fn from(e: std::io::Error) -> Self {
        BufferError::Io(e)
    }
}

impl From<std::str::Utf8Error> for BufferError {
    fn from(e: std::str::Utf8Error) -> Self {
        BufferError::InvalidUtf8(e)
    }
}

impl From<BufferError> for std::io::Error {
    fn from(e: BufferError) -> Self {
        match e {
            BufferError::Io(e) => e,
            BufferError::InsufficientData { .. } => {
                std::io::Error::new(std::io::ErrorKind::UnexpectedEof, e)
            }
            other => std::io::Error::new(std::io::ErrorKind::InvalidData, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: BufferError = io_err.into();
        assert!(matches!(err, BufferError::Io(_)));
    }

    #[test]
    fn test_display() {
        let err = BufferError::insufficient(8, 3);
        assert!(err.to_string().contains("need 8 bytes, 3 available"));

        let err = BufferError::InvalidBool { value: 7 };
        assert_eq!(err.to_string(), "invalid bool byte: 0x07");
    }

    #[test]
    fn test_is_insufficient_data() {
        assert!(BufferError::insufficient(1, 0).is_insufficient_data());
        assert!(!BufferError::MalformedVarint { consumed: 10 }.is_insufficient_data());
    }

    #[test]
    fn test_into_io_error_kind() {
        let io: std::io::Error = BufferError::insufficient(4, 0).into();
        assert_eq!(io.kind(), std::io::ErrorKind::UnexpectedEof);

        let io: std::io::Error = BufferError::MalformedVarint { consumed: 10 }.into();
        assert_eq!(io.kind(), std::io::ErrorKind::InvalidData);
    }
}
