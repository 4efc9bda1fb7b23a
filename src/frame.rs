// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Length-prefixed framing for strings and raw byte buffers.
// Author: Lukas Bower

//! Length-prefixed strings and byte buffers.
//!
//! A frame is a four-byte big-endian signed length followed by that many
//! payload bytes. A negative length marks an absent value and carries no
//! payload; encoders always write `-1`. Strings are framed as their UTF-8
//! bytes, so the prefix counts bytes rather than characters.

use crate::cursor::Cursor;
use crate::error::CodecError;
use crate::numeric::decode_i32;

const NULL_LENGTH: i32 = -1;

/// Encode an optional string as a length-prefixed UTF-8 frame.
pub fn encode_str(value: Option<&str>) -> Result<Vec<u8>, CodecError> {
    encode_bytes(value.map(str::as_bytes))
}

/// Decode a string frame written by [`encode_str`].
pub fn decode_string(cursor: &mut Cursor<'_>) -> Result<Option<String>, CodecError> {
    decode_string_bounded(cursor, usize::MAX)
}

/// Encode an optional byte buffer as a length-prefixed frame.
pub fn encode_bytes(value: Option<&[u8]>) -> Result<Vec<u8>, CodecError> {
    let Some(payload) = value else {
        return Ok(NULL_LENGTH.to_be_bytes().to_vec());
    };
    let len = frame_len(payload.len())?;
    let mut out = Vec::with_capacity(4 + payload.len());
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(payload);
    Ok(out)
}

/// Decode a byte buffer frame written by [`encode_bytes`].
pub fn decode_bytes(cursor: &mut Cursor<'_>) -> Result<Option<Vec<u8>>, CodecError> {
    decode_bytes_bounded(cursor, usize::MAX)
}

/// Return every byte from the cursor to the end of the buffer, unframed.
pub fn decode_rest(cursor: &mut Cursor<'_>) -> Vec<u8> {
    cursor.take_rest().to_vec()
}

pub(crate) fn decode_string_bounded(
    cursor: &mut Cursor<'_>,
    max: usize,
) -> Result<Option<String>, CodecError> {
    match read_frame(cursor, max)? {
        None => Ok(None),
        Some(payload) => std::str::from_utf8(payload)
            .map(|text| Some(text.to_owned()))
            .map_err(|_| CodecError::InvalidUtf8),
    }
}

pub(crate) fn decode_bytes_bounded(
    cursor: &mut Cursor<'_>,
    max: usize,
) -> Result<Option<Vec<u8>>, CodecError> {
    Ok(read_frame(cursor, max)?.map(<[u8]>::to_vec))
}

/// Read a length prefix and borrow its payload.
///
/// The declared length is checked against `max` and against the bytes left
/// in the cursor before anything is copied.
pub(crate) fn read_frame<'a>(
    cursor: &mut Cursor<'a>,
    max: usize,
) -> Result<Option<&'a [u8]>, CodecError> {
    match read_length(cursor)? {
        None => Ok(None),
        Some(len) => {
            if len > max {
                return Err(CodecError::FrameTooLarge { declared: len, max });
            }
            cursor.take(len).map(Some)
        }
    }
}

/// Read a length prefix, mapping every negative value to `None`.
pub(crate) fn read_length(cursor: &mut Cursor<'_>) -> Result<Option<usize>, CodecError> {
    let len = decode_i32(cursor)?;
    Ok(usize::try_from(len).ok())
}

pub(crate) fn frame_len(len: usize) -> Result<i32, CodecError> {
    i32::try_from(len).map_err(|_| CodecError::LengthOverflow(len))
}
