// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Define the error type shared by every flatwire encoder and decoder.
// Author: Lukas Bower

//! Error values produced while encoding or decoding flatwire data.

/// Coarse classification of a [`CodecError`], for callers that branch on the
/// failure category rather than the exact variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input ended before a field was complete.
    Truncated,
    /// A length, count or payload could not be interpreted.
    MalformedEncoding,
    /// The caller passed an argument the codec cannot work with.
    InvalidArgument,
    /// An enum ordinal or value has no matching variant.
    UnknownVariant,
    /// The injected object capability failed.
    ExternalCapabilityFailure,
}

/// Possible errors produced while encoding or decoding flatwire values.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum CodecError {
    /// Input buffer held fewer bytes than the field being read.
    #[error("truncated input: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        /// Bytes the field required.
        needed: usize,
        /// Bytes still available to the cursor.
        remaining: usize,
    },
    /// An object length prefix was negative; objects have no null form.
    #[error("negative length prefix {0}")]
    NegativeLength(i32),
    /// String payload was not valid UTF-8.
    #[error("invalid utf8 in string field")]
    InvalidUtf8,
    /// Readable list text could not be parsed.
    #[error("parse error at offset {offset}: {reason}")]
    Parse {
        /// Offset into the text of the field that failed.
        offset: usize,
        /// Short description of what was wrong.
        reason: &'static str,
    },
    /// Declared frame length exceeds the configured maximum.
    #[error("frame too large: declared {declared} max {max}")]
    FrameTooLarge {
        /// Length declared by the frame prefix.
        declared: usize,
        /// Configured upper bound.
        max: usize,
    },
    /// Declared list element count exceeds the configured maximum.
    #[error("list too long: declared {declared} elements max {max}")]
    ListTooLong {
        /// Element count declared by the list text.
        declared: usize,
        /// Configured upper bound.
        max: usize,
    },
    /// Payload is too long to describe with a 4-byte signed length.
    #[error("payload of {0} bytes exceeds the 4-byte length prefix")]
    LengthOverflow(usize),
    /// Caller supplied an unusable argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// Configuration failed to parse or validate.
    #[error("invalid codec configuration: {0}")]
    InvalidConfig(String),
    /// Ordinal does not name any variant of the target enum.
    #[error("unknown enum ordinal {0}")]
    UnknownVariant(i32),
    /// Value being encoded is missing from its type's variant list.
    #[error("enum value is not listed in its variant table")]
    UnlistedVariant,
    /// Injected object capability reported a failure.
    #[error("object capability failed: {0}")]
    External(String),
}

impl CodecError {
    /// Classify this error into its coarse [`ErrorKind`].
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Truncated { .. } => ErrorKind::Truncated,
            Self::NegativeLength(_)
            | Self::InvalidUtf8
            | Self::Parse { .. }
            | Self::FrameTooLarge { .. }
            | Self::ListTooLong { .. }
            | Self::LengthOverflow(_) => ErrorKind::MalformedEncoding,
            Self::InvalidArgument(_) | Self::InvalidConfig(_) => ErrorKind::InvalidArgument,
            Self::UnknownVariant(_) | Self::UnlistedVariant => ErrorKind::UnknownVariant,
            Self::External(_) => ErrorKind::ExternalCapabilityFailure,
        }
    }

    pub(crate) fn parse(offset: usize, reason: &'static str) -> Self {
        Self::Parse { offset, reason }
    }
}
