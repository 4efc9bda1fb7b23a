// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Apply configured limits to framed flatwire decoding.
// Author: Lukas Bower

//! Configured codec applying [`CodecConfig`] limits to framed values.

use log::{trace, warn};

use crate::config::CodecConfig;
use crate::cursor::Cursor;
use crate::enums::Ordinal;
use crate::error::CodecError;
use crate::frame::{decode_bytes_bounded, decode_string_bounded};
use crate::list::{
    decode_list_bounded, decode_typed_list_bounded, encode_list, encode_typed_list,
    from_ordinals, to_ordinals, ListElement,
};
use crate::object::{decode_object_bounded, encode_object, ObjectCodec};

/// Codec carrying a validated [`CodecConfig`].
///
/// Fixed-width fields need no limits and are decoded with the free functions;
/// this type covers every field whose size comes from the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    /// Create a codec after validating `config`.
    pub fn new(config: CodecConfig) -> Result<Self, CodecError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Decode a string frame within the configured frame limit.
    pub fn decode_string(&self, cursor: &mut Cursor<'_>) -> Result<Option<String>, CodecError> {
        trace!("decode string frame at offset {}", cursor.position());
        decode_string_bounded(cursor, self.config.max_frame_len).map_err(|err| self.note(err))
    }

    /// Decode a byte buffer frame within the configured frame limit.
    pub fn decode_bytes(&self, cursor: &mut Cursor<'_>) -> Result<Option<Vec<u8>>, CodecError> {
        trace!("decode bytes frame at offset {}", cursor.position());
        decode_bytes_bounded(cursor, self.config.max_frame_len).map_err(|err| self.note(err))
    }

    /// Encode a string list using the configured separator, rejecting lists
    /// the same codec would refuse to decode.
    pub fn encode_list<S: AsRef<str>>(&self, list: &[Option<S>]) -> Result<Vec<u8>, CodecError> {
        self.check_list_len(list.len())?;
        self.check_frame(encode_list(list, self.config.list_separator)?)
    }

    /// Decode a string list using the configured separator and limits.
    pub fn decode_list(&self, cursor: &mut Cursor<'_>) -> Result<Vec<Option<String>>, CodecError> {
        trace!("decode list frame at offset {}", cursor.position());
        decode_list_bounded(
            cursor,
            self.config.list_separator,
            self.config.max_frame_len,
            self.config.max_list_len,
        )
        .map_err(|err| self.note(err))
    }

    /// Encode a typed list using the configured separator.
    pub fn encode_typed_list<T: ListElement>(
        &self,
        list: &[Option<T>],
    ) -> Result<Vec<u8>, CodecError> {
        self.check_list_len(list.len())?;
        self.check_frame(encode_typed_list(list, self.config.list_separator)?)
    }

    /// Decode a typed list using the configured separator and limits.
    pub fn decode_typed_list<T: ListElement>(
        &self,
        cursor: &mut Cursor<'_>,
    ) -> Result<Vec<Option<T>>, CodecError> {
        trace!("decode typed list frame at offset {}", cursor.position());
        decode_typed_list_bounded(
            cursor,
            self.config.list_separator,
            self.config.max_frame_len,
            self.config.max_list_len,
        )
        .map_err(|err| self.note(err))
    }

    /// Encode an enum list using the configured separator.
    pub fn encode_enum_list<E: Ordinal>(&self, list: &[Option<E>]) -> Result<Vec<u8>, CodecError> {
        self.encode_typed_list(&to_ordinals(list)?)
    }

    /// Decode an enum list using the configured separator and limits.
    pub fn decode_enum_list<E: Ordinal>(
        &self,
        cursor: &mut Cursor<'_>,
    ) -> Result<Vec<Option<E>>, CodecError> {
        from_ordinals(self.decode_typed_list::<i32>(cursor)?)
    }

    /// Encode an object through `capability`, rejecting payloads over the
    /// frame limit.
    pub fn encode_object<C: ObjectCodec>(
        &self,
        capability: &C,
        value: &C::Value,
    ) -> Result<Vec<u8>, CodecError> {
        self.check_frame(encode_object(capability, value)?)
    }

    /// Decode an object frame within the configured frame limit.
    pub fn decode_object<C: ObjectCodec>(
        &self,
        capability: &C,
        cursor: &mut Cursor<'_>,
    ) -> Result<C::Value, CodecError> {
        trace!("decode object frame at offset {}", cursor.position());
        decode_object_bounded(capability, cursor, self.config.max_frame_len)
            .map_err(|err| self.note(err))
    }

    fn check_list_len(&self, len: usize) -> Result<(), CodecError> {
        if len > self.config.max_list_len {
            return Err(self.note(CodecError::ListTooLong {
                declared: len,
                max: self.config.max_list_len,
            }));
        }
        Ok(())
    }

    /// Pass an encoded frame through if its payload fits the frame limit.
    fn check_frame(&self, encoded: Vec<u8>) -> Result<Vec<u8>, CodecError> {
        let payload = encoded.len().saturating_sub(4);
        if payload > self.config.max_frame_len {
            return Err(self.note(CodecError::FrameTooLarge {
                declared: payload,
                max: self.config.max_frame_len,
            }));
        }
        Ok(encoded)
    }

    fn note(&self, err: CodecError) -> CodecError {
        match &err {
            CodecError::FrameTooLarge { declared, max } => {
                warn!("rejecting frame of {declared} bytes (limit {max})");
            }
            CodecError::ListTooLong { declared, max } => {
                warn!("rejecting list of {declared} elements (limit {max})");
            }
            other => trace!("codec call failed: {other}"),
        }
        err
    }
}
