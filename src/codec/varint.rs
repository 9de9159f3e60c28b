//! Variable-length integer codec.
//!
//! Each byte carries 7 payload bits, least significant group first, with the
//! high bit set while more bytes follow. Signed values go through zig-zag
//! mapping first so small magnitudes stay short.

/// Maximum encoded length of a 64-bit varint.
pub const MAX_VARINT_LEN_64: usize = 10;

/// Maximum encoded length of a 32-bit varint.
pub const MAX_VARINT_LEN_32: usize = 5;

const CONTINUATION: u8 = 0x80;
const PAYLOAD: u8 = 0x7f;

/// Outcome of a failed varint decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VarintFault {
    /// Input ended before a terminating byte.
    Truncated,
    /// No terminator within the byte budget, or bits past 64.
    Malformed { consumed: usize },
}

/// Maps a signed value onto the unsigned range, small magnitudes first.
#[inline]
pub fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`zigzag_encode`].
#[inline]
pub fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Encodes `value` into `dst` and returns the number of bytes used.
#[inline]
pub fn encode_uvarint(mut value: u64, dst: &mut [u8; MAX_VARINT_LEN_64]) -> usize {
    let mut i = 0;
    while value >= u64::from(CONTINUATION) {
        dst[i] = (value as u8) | CONTINUATION;
        value >>= 7;
        i += 1;
    }
    dst[i] = value as u8;
    i + 1
}

/// Returns the encoded length of `value` without encoding it.
pub fn uvarint_len(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Decodes a varint from the front of `src`.
///
/// Returns the value and the number of bytes consumed.
pub(crate) fn decode_uvarint(src: &[u8]) -> Result<(u64, usize), VarintFault> {
    let mut value = 0u64;
    let mut shift = 0u32;

    for (i, &byte) in src.iter().take(MAX_VARINT_LEN_64).enumerate() {
        if i == MAX_VARINT_LEN_64 - 1 && byte > 1 {
            // The tenth byte may only contribute the 64th bit.
            return Err(VarintFault::Malformed { consumed: i + 1 });
        }
        value |= u64::from(byte & PAYLOAD) << shift;
        if byte & CONTINUATION == 0 {
            return Ok((value, i + 1));
        }
        shift += 7;
    }

    // A tenth byte always terminates or fails above, so running out here
    // means the input was short.
    Err(VarintFault::Truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: u64) -> Vec<u8> {
        let mut scratch = [0u8; MAX_VARINT_LEN_64];
        let n = encode_uvarint(value, &mut scratch);
        scratch[..n].to_vec()
    }

    #[test]
    fn test_encode_133() {
        assert_eq!(encode(133), vec![0x85, 0x01]);
    }

    #[test]
    fn test_encode_small_values() {
        assert_eq!(encode(0), vec![0x00]);
        assert_eq!(encode(1), vec![0x01]);
        assert_eq!(encode(127), vec![0x7f]);
        assert_eq!(encode(128), vec![0x80, 0x01]);
        assert_eq!(encode(300), vec![0xac, 0x02]);
    }

    #[test]
    fn test_encode_max_is_ten_bytes() {
        let bytes = encode(u64::MAX);
        assert_eq!(bytes.len(), MAX_VARINT_LEN_64);
        assert_eq!(bytes[9], 0x01);
        assert_eq!(decode_uvarint(&bytes), Ok((u64::MAX, 10)));
    }

    #[test]
    fn test_uvarint_len_matches_encoding() {
        for value in [0, 1, 127, 128, 16_383, 16_384, u32::MAX as u64, u64::MAX] {
            assert_eq!(uvarint_len(value), encode(value).len(), "value {}", value);
        }
    }

    #[test]
    fn test_zigzag_mapping() {
        assert_eq!(zigzag_encode(0), 0);
        assert_eq!(zigzag_encode(-1), 1);
        assert_eq!(zigzag_encode(1), 2);
        assert_eq!(zigzag_encode(-2), 3);
        assert_eq!(zigzag_encode(i64::MAX), u64::MAX - 1);
        assert_eq!(zigzag_encode(i64::MIN), u64::MAX);

        for v in [0, -1, 1, i64::MIN, i64::MAX, -64, 63] {
            assert_eq!(zigzag_decode(zigzag_encode(v)), v);
        }
    }

    #[test]
    fn test_decode_truncated() {
        assert_eq!(decode_uvarint(&[]), Err(VarintFault::Truncated));
        assert_eq!(decode_uvarint(&[0x85]), Err(VarintFault::Truncated));
        assert_eq!(decode_uvarint(&[0xff; 9]), Err(VarintFault::Truncated));
    }

    #[test]
    fn test_decode_unterminated() {
        assert_eq!(
            decode_uvarint(&[0xff; 12]),
            Err(VarintFault::Malformed { consumed: 10 })
        );
    }

    #[test]
    fn test_decode_tenth_byte_overflow() {
        let mut bytes = [0xffu8; 10];
        bytes[9] = 0x02;
        assert_eq!(
            decode_uvarint(&bytes),
            Err(VarintFault::Malformed { consumed: 10 })
        );
    }

    #[test]
    fn test_decode_stops_at_terminator() {
        assert_eq!(decode_uvarint(&[0x85, 0x01, 0xff]), Ok((133, 2)));
    }
}
