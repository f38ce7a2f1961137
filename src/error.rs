// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `hdlbus` library.
//!
//! Decode-level failures ([`DecodeError`]) never escape a device: they are
//! turned into diagnostics at the device boundary. The remaining errors cover
//! value validation and configuration loading.

use thiserror::Error;

use crate::types::CommandType;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while decoding a packet payload.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Error occurred while reading device configuration.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// An invalid power state string was provided.
    #[error("invalid power state: {0}")]
    InvalidPowerState(String),

    /// A floor heating mode byte outside 1-5.
    #[error("invalid floor heating mode: {0}")]
    InvalidMode(u8),
}

/// Errors raised by a family codec when a payload cannot be decoded.
///
/// A codec returns these before touching any channel, so a rejected frame
/// leaves the device state unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The payload is shorter than the offsets the command needs.
    #[error("payload for {command} needs {required} bytes, got {actual}")]
    ShortPayload {
        /// The command being decoded.
        command: CommandType,
        /// Minimum payload length required.
        required: usize,
        /// Actual payload length.
        actual: usize,
    },

    /// A percent byte above 100.
    #[error("percent value {value} at offset {offset} exceeds 100")]
    InvalidPercent {
        /// Payload offset of the offending byte.
        offset: usize,
        /// The raw byte.
        value: u8,
    },
}

/// Errors related to device configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration property holds a value that cannot be used.
    #[error("invalid value {value:?} for property {key}")]
    InvalidProperty {
        /// The property key.
        key: String,
        /// The raw property value.
        value: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
