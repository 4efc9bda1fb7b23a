// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Encode closed enumerations by their position in a fixed variant table.
// Author: Lukas Bower

//! Ordinal encoding for closed enumerations.

use log::debug;

use crate::cursor::Cursor;
use crate::error::CodecError;
use crate::numeric::{decode_i32, encode_i32};

/// Closed set of variants with a stable order.
///
/// The position of a variant in [`Ordinal::VARIANTS`] is its wire ordinal, so
/// new variants must only ever be appended.
pub trait Ordinal: Copy + PartialEq + 'static {
    /// Every variant, in ordinal order.
    const VARIANTS: &'static [Self];

    /// Position of `self` in [`Ordinal::VARIANTS`].
    fn ordinal(self) -> Option<i32> {
        Self::VARIANTS
            .iter()
            .position(|v| *v == self)
            .and_then(|idx| i32::try_from(idx).ok())
    }

    /// Variant at `ordinal`, if any.
    fn from_ordinal(ordinal: i32) -> Option<Self> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|idx| Self::VARIANTS.get(idx).copied())
    }
}

/// Encode a variant as its four-byte ordinal.
pub fn encode_enum<E: Ordinal>(value: E) -> Result<Vec<u8>, CodecError> {
    value
        .ordinal()
        .map(encode_i32)
        .ok_or(CodecError::UnlistedVariant)
}

/// Decode a variant ordinal, yielding `None` when no variant matches.
pub fn decode_enum<E: Ordinal>(cursor: &mut Cursor<'_>) -> Result<Option<E>, CodecError> {
    let ordinal = decode_i32(cursor)?;
    let variant = E::from_ordinal(ordinal);
    if variant.is_none() {
        debug!(
            "ordinal {ordinal} has no variant among {} entries",
            E::VARIANTS.len()
        );
    }
    Ok(variant)
}

/// Decode a variant ordinal, failing with [`CodecError::UnknownVariant`] when
/// no variant matches.
pub fn decode_enum_strict<E: Ordinal>(cursor: &mut Cursor<'_>) -> Result<E, CodecError> {
    let ordinal = decode_i32(cursor)?;
    E::from_ordinal(ordinal).ok_or(CodecError::UnknownVariant(ordinal))
}
