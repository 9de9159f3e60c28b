//! Byte order selection and fixed-width primitive encoding.

/// Byte order used for multi-byte fixed-width integers and floats.
///
/// Varints and raw bytes are order-independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteOrder {
    /// Most significant byte first (network order).
    #[default]
    BigEndian,
    /// Least significant byte first.
    LittleEndian,
}

impl ByteOrder {
    /// The byte order of the host.
    #[cfg(target_endian = "big")]
    pub const NATIVE: ByteOrder = ByteOrder::BigEndian;

    /// The byte order of the host.
    #[cfg(target_endian = "little")]
    pub const NATIVE: ByteOrder = ByteOrder::LittleEndian;
}

mod sealed {
    pub trait Sealed {}
}

/// A primitive with a fixed encoded width.
///
/// Implemented for `u8`..`u64`, `i8`..`i64`, `f32` and `f64`. Floats are
/// encoded through their IEEE-754 bit pattern, so NaN payloads survive a
/// round trip.
pub trait FixedWidth: sealed::Sealed + Copy {
    /// Encoded size in bytes.
    const WIDTH: usize;

    /// Writes `self` into `dst[..Self::WIDTH]`.
    fn encode(self, order: ByteOrder, dst: &mut [u8]);

    /// Reads a value from `src[..Self::WIDTH]`.
    fn decode(order: ByteOrder, src: &[u8]) -> Self;
}

macro_rules! impl_fixed_width {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl FixedWidth for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn encode(self, order: ByteOrder, dst: &mut [u8]) {
                    let bytes = match order {
                        ByteOrder::BigEndian => self.to_be_bytes(),
                        ByteOrder::LittleEndian => self.to_le_bytes(),
                    };
                    dst[..Self::WIDTH].copy_from_slice(&bytes);
                }

                #[inline]
                fn decode(order: ByteOrder, src: &[u8]) -> Self {
                    let mut bytes = [0u8; std::mem::size_of::<$ty>()];
                    bytes.copy_from_slice(&src[..Self::WIDTH]);
                    match order {
                        ByteOrder::BigEndian => <$ty>::from_be_bytes(bytes),
                        ByteOrder::LittleEndian => <$ty>::from_le_bytes(bytes),
                    }
                }
            }
        )*
    };
}

impl_fixed_width!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);
