// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Define and load the limits applied by the configured codec.
// Author: Lukas Bower

//! Codec limits and defaults.

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Default upper bound for a single framed payload.
pub const DEFAULT_MAX_FRAME_LEN: usize = 16 * 1024 * 1024;
/// Default upper bound for the element count of a decoded list.
pub const DEFAULT_MAX_LIST_LEN: usize = 1024 * 1024;
/// Default separator for the byte form of lists.
pub const DEFAULT_LIST_SEPARATOR: char = '\n';

/// Limits and defaults applied by [`crate::Codec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Maximum payload length accepted from a frame prefix.
    pub max_frame_len: usize,
    /// Maximum element count accepted from list text.
    pub max_list_len: usize,
    /// Separator used for the byte form of lists.
    pub list_separator: char,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_frame_len: DEFAULT_MAX_FRAME_LEN,
            max_list_len: DEFAULT_MAX_LIST_LEN,
            list_separator: DEFAULT_LIST_SEPARATOR,
        }
    }
}

impl CodecConfig {
    /// Parse a configuration from TOML and validate it. Missing keys take
    /// their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, CodecError> {
        let config: Self =
            toml::from_str(source).map_err(|err| CodecError::InvalidConfig(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the limits are usable.
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.max_frame_len == 0 {
            return Err(CodecError::InvalidConfig(
                "max_frame_len must be non-zero".to_owned(),
            ));
        }
        if self.max_frame_len > i32::MAX as usize {
            return Err(CodecError::InvalidConfig(format!(
                "max_frame_len {} exceeds the 4-byte length prefix",
                self.max_frame_len
            )));
        }
        if self.max_list_len == 0 {
            return Err(CodecError::InvalidConfig(
                "max_list_len must be non-zero".to_owned(),
            ));
        }
        if self.list_separator.is_ascii_digit() || self.list_separator == '-' {
            return Err(CodecError::InvalidConfig(format!(
                "list_separator {:?} collides with length digits",
                self.list_separator
            )));
        }
        Ok(())
    }
}
