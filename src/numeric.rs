// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Encode and decode fixed-width integers, booleans and floats, nullable or not.
// Author: Lukas Bower

//! Fixed-width numeric fields.
//!
//! Integers are written big-endian in two's complement at their native width.
//! Nullable integers reserve the width's minimum value as a sentinel: when the
//! value is absent or genuinely equals the minimum, a single flag byte follows
//! the sentinel (`1` for the minimum, `0` for absent). Every other value is
//! written at its bare width. Floats travel as their IEEE-754 bit pattern
//! through the integer path of the same width.

use crate::cursor::Cursor;
use crate::error::CodecError;

const BOOL_NULL: u8 = 0xFF;
const BOOL_TRUE: u8 = 1;
const BOOL_FALSE: u8 = 0;

/// Signed integer with a fixed big-endian wire width.
pub trait FixedWidth: Copy + Eq + Sized {
    /// Number of bytes on the wire.
    const WIDTH: usize;
    /// Smallest representable value, reused as the null sentinel.
    const MIN: Self;

    /// Append the big-endian two's-complement bytes of `self`.
    fn write_be(self, out: &mut Vec<u8>);

    /// Read `WIDTH` bytes and reinterpret them as a big-endian value.
    fn read_be(cursor: &mut Cursor<'_>) -> Result<Self, CodecError>;
}

macro_rules! impl_fixed_width {
    ($($ty:ty),*) => {
        $(
            impl FixedWidth for $ty {
                const WIDTH: usize = core::mem::size_of::<$ty>();
                const MIN: Self = <$ty>::MIN;

                fn write_be(self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_be_bytes());
                }

                fn read_be(cursor: &mut Cursor<'_>) -> Result<Self, CodecError> {
                    Ok(<$ty>::from_be_bytes(cursor.take_array()?))
                }
            }
        )*
    };
}

impl_fixed_width!(i8, i16, i32, i64);

/// Wire-level view of a nullable integer.
///
/// `Minimum` and `Absent` share the same leading bytes and differ only in the
/// trailing flag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel<T> {
    /// No value.
    Absent,
    /// The width's minimum value.
    Minimum,
    /// Any other value.
    Value(T),
}

impl<T: FixedWidth> Sentinel<T> {
    /// Classify an optional value.
    #[must_use]
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            None => Self::Absent,
            Some(v) if v == T::MIN => Self::Minimum,
            Some(v) => Self::Value(v),
        }
    }

    /// Collapse back to an optional value.
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Absent => None,
            Self::Minimum => Some(T::MIN),
            Self::Value(v) => Some(v),
        }
    }

    /// Append the wire form of this value.
    pub fn write(self, out: &mut Vec<u8>) {
        match self {
            Self::Absent => {
                T::MIN.write_be(out);
                out.push(BOOL_FALSE);
            }
            Self::Minimum => {
                T::MIN.write_be(out);
                out.push(BOOL_TRUE);
            }
            Self::Value(v) if v == T::MIN => Self::Minimum.write(out),
            Self::Value(v) => v.write_be(out),
        }
    }

    /// Read the wire form, consuming the flag byte only after a sentinel.
    pub fn read(cursor: &mut Cursor<'_>) -> Result<Self, CodecError> {
        let raw = T::read_be(cursor)?;
        if raw != T::MIN {
            return Ok(Self::Value(raw));
        }
        if decode_bool(cursor)? {
            Ok(Self::Minimum)
        } else {
            Ok(Self::Absent)
        }
    }
}

/// Encode a fixed-width integer at its native width.
#[must_use]
pub fn encode_fixed<T: FixedWidth>(value: T) -> Vec<u8> {
    let mut out = Vec::with_capacity(T::WIDTH);
    value.write_be(&mut out);
    out
}

/// Decode a fixed-width integer at its native width.
pub fn decode_fixed<T: FixedWidth>(cursor: &mut Cursor<'_>) -> Result<T, CodecError> {
    T::read_be(cursor)
}

/// Encode a nullable fixed-width integer using the sentinel layout.
#[must_use]
pub fn encode_nullable<T: FixedWidth>(value: Option<T>) -> Vec<u8> {
    let mut out = Vec::with_capacity(T::WIDTH + 1);
    Sentinel::from_option(value).write(&mut out);
    out
}

/// Decode a nullable fixed-width integer written with [`encode_nullable`].
pub fn decode_nullable<T: FixedWidth>(cursor: &mut Cursor<'_>) -> Result<Option<T>, CodecError> {
    Sentinel::read(cursor).map(Sentinel::into_option)
}

macro_rules! int_codec {
    ($ty:ty, $enc:ident, $dec:ident, $enc_opt:ident, $dec_opt:ident) => {
        #[doc = concat!("Encode an `", stringify!($ty), "` as big-endian two's complement.")]
        #[must_use]
        pub fn $enc(value: $ty) -> Vec<u8> {
            encode_fixed(value)
        }

        #[doc = concat!("Decode an `", stringify!($ty), "` written by [`", stringify!($enc), "`].")]
        pub fn $dec(cursor: &mut Cursor<'_>) -> Result<$ty, CodecError> {
            decode_fixed(cursor)
        }

        #[doc = concat!("Encode an `Option<", stringify!($ty), ">` using the minimum-value sentinel.")]
        #[must_use]
        pub fn $enc_opt(value: Option<$ty>) -> Vec<u8> {
            encode_nullable(value)
        }

        #[doc = concat!("Decode an `Option<", stringify!($ty), ">` written by [`", stringify!($enc_opt), "`].")]
        pub fn $dec_opt(cursor: &mut Cursor<'_>) -> Result<Option<$ty>, CodecError> {
            decode_nullable(cursor)
        }
    };
}

int_codec!(i8, encode_i8, decode_i8, encode_opt_i8, decode_opt_i8);
int_codec!(i16, encode_i16, decode_i16, encode_opt_i16, decode_opt_i16);
int_codec!(i32, encode_i32, decode_i32, encode_opt_i32, decode_opt_i32);
int_codec!(i64, encode_i64, decode_i64, encode_opt_i64, decode_opt_i64);

/// Encode a boolean as a single `1`/`0` byte.
#[must_use]
pub fn encode_bool(value: bool) -> Vec<u8> {
    vec![if value { BOOL_TRUE } else { BOOL_FALSE }]
}

/// Decode a boolean; any non-zero byte reads as `true`.
pub fn decode_bool(cursor: &mut Cursor<'_>) -> Result<bool, CodecError> {
    let [byte] = cursor.take_array::<1>()?;
    Ok(byte != BOOL_FALSE)
}

/// Encode an optional boolean; absence is the byte `-1`.
#[must_use]
pub fn encode_opt_bool(value: Option<bool>) -> Vec<u8> {
    match value {
        None => vec![BOOL_NULL],
        Some(v) => encode_bool(v),
    }
}

/// Decode an optional boolean written by [`encode_opt_bool`].
pub fn decode_opt_bool(cursor: &mut Cursor<'_>) -> Result<Option<bool>, CodecError> {
    let [byte] = cursor.take_array::<1>()?;
    Ok(match byte {
        BOOL_NULL => None,
        BOOL_FALSE => Some(false),
        _ => Some(true),
    })
}

/// Encode an `f32` as its bit pattern in four bytes.
#[must_use]
pub fn encode_f32(value: f32) -> Vec<u8> {
    encode_i32(value.to_bits() as i32)
}

/// Decode an `f32` written by [`encode_f32`].
pub fn decode_f32(cursor: &mut Cursor<'_>) -> Result<f32, CodecError> {
    decode_i32(cursor).map(|bits| f32::from_bits(bits as u32))
}

/// Encode an optional `f32` through the nullable four-byte integer path.
///
/// `-0.0` shares its bit pattern with `i32::MIN`, so it carries the flag byte.
#[must_use]
pub fn encode_opt_f32(value: Option<f32>) -> Vec<u8> {
    encode_opt_i32(value.map(|v| v.to_bits() as i32))
}

/// Decode an optional `f32` written by [`encode_opt_f32`].
pub fn decode_opt_f32(cursor: &mut Cursor<'_>) -> Result<Option<f32>, CodecError> {
    decode_opt_i32(cursor).map(|bits| bits.map(|b| f32::from_bits(b as u32)))
}

/// Encode an `f64` as its bit pattern in eight bytes.
#[must_use]
pub fn encode_f64(value: f64) -> Vec<u8> {
    encode_i64(value.to_bits() as i64)
}

/// Decode an `f64` written by [`encode_f64`].
pub fn decode_f64(cursor: &mut Cursor<'_>) -> Result<f64, CodecError> {
    decode_i64(cursor).map(|bits| f64::from_bits(bits as u64))
}

/// Encode an optional `f64` through the nullable eight-byte integer path.
#[must_use]
pub fn encode_opt_f64(value: Option<f64>) -> Vec<u8> {
    encode_opt_i64(value.map(|v| v.to_bits() as i64))
}

/// Decode an optional `f64` written by [`encode_opt_f64`].
pub fn decode_opt_f64(cursor: &mut Cursor<'_>) -> Result<Option<f64>, CodecError> {
    decode_opt_i64(cursor).map(|bits| bits.map(|b| f64::from_bits(b as u64)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_is_big_endian() {
        assert_eq!(encode_i32(5), vec![0, 0, 0, 5]);
        assert_eq!(encode_i16(-2), vec![0xFF, 0xFE]);
        assert_eq!(encode_i8(i8::MIN), vec![0x80]);
        assert_eq!(
            encode_i64(0x0102_0304_0506_0708),
            vec![1, 2, 3, 4, 5, 6, 7, 8]
        );
    }

    #[test]
    fn full_range_i64_decodes_without_overflow() {
        let data = [0xFFu8; 8];
        let mut cursor = Cursor::new(&data);
        assert_eq!(decode_i64(&mut cursor).unwrap(), -1);

        let data = [0x80u8, 0, 0, 0, 0, 0, 0, 0];
        let mut cursor = Cursor::new(&data);
        assert_eq!(decode_i64(&mut cursor).unwrap(), i64::MIN);
    }

    #[test]
    fn sentinel_appends_flag_only_when_needed() {
        assert_eq!(encode_opt_i32(None), vec![0x80, 0, 0, 0, 0]);
        assert_eq!(encode_opt_i32(Some(i32::MIN)), vec![0x80, 0, 0, 0, 1]);
        assert_eq!(encode_opt_i32(Some(7)), vec![0, 0, 0, 7]);
        assert_eq!(encode_opt_i8(None), vec![0x80, 0]);
        assert_eq!(encode_opt_i16(Some(i16::MIN)), vec![0x80, 0, 1]);
    }

    #[test]
    fn explicit_minimum_value_variant_still_writes_flag() {
        let mut out = Vec::new();
        Sentinel::Value(i16::MIN).write(&mut out);
        assert_eq!(out, vec![0x80, 0, 1]);
    }

    #[test]
    fn minimum_and_absent_stay_distinct() {
        let mut data = encode_opt_i64(Some(i64::MIN));
        data.extend(encode_opt_i64(None));
        let mut cursor = Cursor::new(&data);
        assert_eq!(decode_opt_i64(&mut cursor).unwrap(), Some(i64::MIN));
        assert_eq!(decode_opt_i64(&mut cursor).unwrap(), None);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn sentinel_without_flag_is_truncated() {
        let data = [0x80u8, 0];
        let mut cursor = Cursor::new(&data);
        assert_eq!(
            decode_opt_i16(&mut cursor),
            Err(CodecError::Truncated {
                needed: 1,
                remaining: 0
            })
        );
    }

    #[test]
    fn booleans_use_single_byte() {
        assert_eq!(encode_bool(true), vec![1]);
        assert_eq!(encode_bool(false), vec![0]);
        assert_eq!(encode_opt_bool(None), vec![0xFF]);
        let data = [0xFFu8, 1, 0, 2];
        let mut cursor = Cursor::new(&data);
        assert_eq!(decode_opt_bool(&mut cursor).unwrap(), None);
        assert_eq!(decode_opt_bool(&mut cursor).unwrap(), Some(true));
        assert_eq!(decode_opt_bool(&mut cursor).unwrap(), Some(false));
        assert!(decode_bool(&mut cursor).unwrap());
    }

    #[test]
    fn float_bit_patterns_survive() {
        let values = [
            f32::NAN,
            f32::INFINITY,
            f32::NEG_INFINITY,
            -0.0f32,
            f32::MIN_POSITIVE,
        ];
        for value in values {
            let encoded = encode_opt_f32(Some(value));
            let mut cursor = Cursor::new(&encoded);
            let decoded = decode_opt_f32(&mut cursor).unwrap().unwrap();
            assert_eq!(decoded.to_bits(), value.to_bits());
            assert!(cursor.is_exhausted());
        }
        assert_eq!(encode_opt_f32(Some(-0.0)), vec![0x80, 0, 0, 0, 1]);
        assert_eq!(encode_f32(-0.0), vec![0x80, 0, 0, 0]);
    }

    #[test]
    fn double_null_and_negative_zero_are_distinct() {
        let mut data = encode_opt_f64(Some(-0.0));
        data.extend(encode_opt_f64(None));
        data.extend(encode_f64(f64::NEG_INFINITY));
        let mut cursor = Cursor::new(&data);
        let negative_zero = decode_opt_f64(&mut cursor).unwrap().unwrap();
        assert_eq!(negative_zero.to_bits(), (-0.0f64).to_bits());
        assert_eq!(decode_opt_f64(&mut cursor).unwrap(), None);
        assert_eq!(decode_f64(&mut cursor).unwrap(), f64::NEG_INFINITY);
        assert!(cursor.is_exhausted());
    }
}
