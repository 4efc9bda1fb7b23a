// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Frame payloads produced by an injected object serialization capability.
// Author: Lukas Bower

//! Opaque object framing.
//!
//! The payload format belongs to an [`ObjectCodec`] supplied by the caller;
//! this module only adds and strips the four-byte length prefix.

use std::fmt::Display;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cursor::Cursor;
use crate::error::CodecError;
use crate::frame::frame_len;
use crate::numeric::decode_i32;

/// Capability turning values into opaque bytes and back.
pub trait ObjectCodec {
    /// Value type handled by this capability.
    type Value;
    /// Failure reported by the capability.
    type Error: Display;

    /// Serialize a value to its opaque payload.
    fn to_bytes(&self, value: &Self::Value) -> Result<Vec<u8>, Self::Error>;

    /// Reconstruct a value from a payload produced by [`ObjectCodec::to_bytes`].
    fn from_bytes(&self, bytes: &[u8]) -> Result<Self::Value, Self::Error>;
}

/// [`ObjectCodec`] for any serde type, backed by JSON.
#[derive(Debug)]
pub struct JsonObjectCodec<T> {
    _value: PhantomData<fn() -> T>,
}

impl<T> JsonObjectCodec<T> {
    /// Create the codec.
    #[must_use]
    pub fn new() -> Self {
        Self {
            _value: PhantomData,
        }
    }
}

impl<T> Default for JsonObjectCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonObjectCodec<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T: Serialize + DeserializeOwned> ObjectCodec for JsonObjectCodec<T> {
    type Value = T;
    type Error = serde_json::Error;

    fn to_bytes(&self, value: &T) -> Result<Vec<u8>, Self::Error> {
        serde_json::to_vec(value)
    }

    fn from_bytes(&self, bytes: &[u8]) -> Result<T, Self::Error> {
        serde_json::from_slice(bytes)
    }
}

/// Serialize `value` with `codec` and prefix the payload with its length.
pub fn encode_object<C: ObjectCodec>(codec: &C, value: &C::Value) -> Result<Vec<u8>, CodecError> {
    let payload = payload_of(codec, value)?;
    let len = frame_len(payload.len())?;
    let mut out = Vec::with_capacity(4 + payload.len());
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Read a length-prefixed payload and reconstruct it with `codec`.
pub fn decode_object<C: ObjectCodec>(
    codec: &C,
    cursor: &mut Cursor<'_>,
) -> Result<C::Value, CodecError> {
    decode_object_bounded(codec, cursor, usize::MAX)
}

/// Serialize `value` into a string holding one character per payload byte.
///
/// Each byte maps to the character with the same code point (Latin-1), which
/// makes the conversion a bijection between payloads and such strings.
pub fn object_to_text<C: ObjectCodec>(codec: &C, value: &C::Value) -> Result<String, CodecError> {
    let payload = payload_of(codec, value)?;
    Ok(payload.iter().map(|&b| char::from(b)).collect())
}

/// Reconstruct a value from text produced by [`object_to_text`].
pub fn object_from_text<C: ObjectCodec>(codec: &C, text: &str) -> Result<C::Value, CodecError> {
    let payload = text
        .char_indices()
        .map(|(offset, ch)| {
            u8::try_from(ch).map_err(|_| CodecError::parse(offset, "character outside latin-1"))
        })
        .collect::<Result<Vec<u8>, _>>()?;
    codec
        .from_bytes(&payload)
        .map_err(|err| CodecError::External(err.to_string()))
}

pub(crate) fn decode_object_bounded<C: ObjectCodec>(
    codec: &C,
    cursor: &mut Cursor<'_>,
    max: usize,
) -> Result<C::Value, CodecError> {
    // Objects have no null form, so every negative length is malformed.
    let len = decode_i32(cursor)?;
    let len = usize::try_from(len).map_err(|_| CodecError::NegativeLength(len))?;
    if len > max {
        return Err(CodecError::FrameTooLarge { declared: len, max });
    }
    let payload = cursor.take(len)?;
    codec
        .from_bytes(payload)
        .map_err(|err| CodecError::External(err.to_string()))
}

fn payload_of<C: ObjectCodec>(codec: &C, value: &C::Value) -> Result<Vec<u8>, CodecError> {
    codec
        .to_bytes(value)
        .map_err(|err| CodecError::External(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        weight: f64,
        tags: Vec<String>,
    }

    fn sample() -> Sample {
        Sample {
            name: "probe".to_owned(),
            weight: 2.5,
            tags: vec!["a".to_owned(), "b".to_owned()],
        }
    }

    #[test]
    fn payload_is_length_prefixed() {
        let codec = JsonObjectCodec::<Sample>::new();
        let payload = serde_json::to_vec(&sample()).unwrap();
        let encoded = encode_object(&codec, &sample()).unwrap();
        assert_eq!(&encoded[..4], &(payload.len() as i32).to_be_bytes());
        assert_eq!(&encoded[4..], payload.as_slice());

        let mut cursor = Cursor::new(&encoded);
        assert_eq!(decode_object(&codec, &mut cursor).unwrap(), sample());
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn capability_failure_is_surfaced() {
        let codec = JsonObjectCodec::<Sample>::new();
        let mut encoded = 3i32.to_be_bytes().to_vec();
        encoded.extend_from_slice(b"{{{");
        let mut cursor = Cursor::new(&encoded);
        let err = decode_object(&codec, &mut cursor).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::ExternalCapabilityFailure);
    }

    #[test]
    fn null_length_is_malformed_for_objects() {
        let codec = JsonObjectCodec::<Sample>::new();
        let encoded = (-1i32).to_be_bytes();
        let mut cursor = Cursor::new(&encoded);
        assert_eq!(
            decode_object(&codec, &mut cursor),
            Err(CodecError::NegativeLength(-1))
        );
        let encoded = (-9i32).to_be_bytes();
        let mut cursor = Cursor::new(&encoded);
        assert_eq!(
            decode_object(&codec, &mut cursor),
            Err(CodecError::NegativeLength(-9))
        );
    }

    struct RawBytes;

    impl ObjectCodec for RawBytes {
        type Value = Vec<u8>;
        type Error = &'static str;

        fn to_bytes(&self, value: &Vec<u8>) -> Result<Vec<u8>, Self::Error> {
            Ok(value.clone())
        }

        fn from_bytes(&self, bytes: &[u8]) -> Result<Vec<u8>, Self::Error> {
            if bytes.is_empty() {
                return Err("empty payload");
            }
            Ok(bytes.to_vec())
        }
    }

    #[test]
    fn text_form_is_byte_bijection() {
        let value: Vec<u8> = (0..=255).collect();
        let text = object_to_text(&RawBytes, &value).unwrap();
        assert_eq!(text.chars().count(), 256);
        assert_eq!(object_from_text(&RawBytes, &text).unwrap(), value);
        assert_eq!(
            object_from_text(&RawBytes, "ok€"),
            Err(CodecError::parse(2, "character outside latin-1"))
        );
        assert_eq!(
            object_from_text(&RawBytes, ""),
            Err(CodecError::External("empty payload".to_owned()))
        );
    }
}
