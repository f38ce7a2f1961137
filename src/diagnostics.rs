// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decode diagnostics.
//!
//! Nothing a codec encounters is fatal. Unhandled commands, out-of-range
//! channels and malformed payloads are reported as a [`Diagnostic`] to the
//! [`DiagnosticSink`] passed into every decode call, and decoding carries on.
//!
//! # Sinks
//!
//! - [`TracingSink`]: forwards diagnostics to `tracing`
//! - [`CollectingSink`]: keeps diagnostics in memory for inspection
//!
//! # Examples
//!
//! ```
//! use hdlbus_lib::diagnostics::{CollectingSink, Diagnostic, DiagnosticSink};
//! use hdlbus_lib::types::{CommandType, DeviceType};
//!
//! let sink = CollectingSink::new();
//! sink.record(Diagnostic::UnhandledCommand {
//!     device_type: DeviceType::Mr0810_432,
//!     command: CommandType::Other(0x1234),
//! });
//! assert_eq!(sink.len(), 1);
//! ```

use parking_lot::Mutex;
use thiserror::Error;

use crate::error::DecodeError;
use crate::types::{CommandType, DeviceType};

/// Something a codec noticed but did not act on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// The device family has no decoding for this command.
    #[error("for type {device_type}, unhandled command {command}")]
    UnhandledCommand {
        /// Model tag of the device.
        device_type: DeviceType,
        /// The command that was ignored.
        command: CommandType,
    },

    /// Scene broadcasts are recognised but carry no channel state we decode.
    #[error("for type {device_type}, scene broadcast not decoded")]
    SceneBroadcastIgnored {
        /// Model tag of the device.
        device_type: DeviceType,
    },

    /// A control payload addressed a channel the device does not have.
    #[error("for type {device_type}, command {command} does not support channel {channel}")]
    UnsupportedChannel {
        /// Model tag of the device.
        device_type: DeviceType,
        /// The command being decoded.
        command: CommandType,
        /// The channel index found in the payload.
        channel: u8,
    },

    /// A floor heating packet for a different channel than the configured one.
    #[error("for type {device_type}, packet channel is {actual} but configured channel is {expected}")]
    ChannelMismatch {
        /// Model tag of the device.
        device_type: DeviceType,
        /// Configured channel number.
        expected: u8,
        /// Channel number in the packet.
        actual: u8,
    },

    /// The frame was rejected; device state is unchanged.
    #[error("for type {device_type}, rejected frame: {error}")]
    MalformedPayload {
        /// Model tag of the device.
        device_type: DeviceType,
        /// Why the frame was rejected.
        error: DecodeError,
    },

    /// A packet reached a device with no codec.
    #[error("packet {command} for unsupported device ignored")]
    UnsupportedDevice {
        /// The command that was ignored.
        command: CommandType,
    },
}

impl Diagnostic {
    /// Returns `true` for diagnostics that indicate a corrupt or truncated frame.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedPayload { .. })
    }
}

/// Receiver of decode diagnostics.
///
/// Implementations must be cheap; they are called inline from decode.
pub trait DiagnosticSink: Send + Sync {
    /// Records a single diagnostic.
    fn record(&self, diagnostic: Diagnostic);
}

/// Sink that logs every diagnostic through `tracing`.
///
/// Malformed payloads are logged at `warn`, everything else at `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, diagnostic: Diagnostic) {
        if diagnostic.is_malformed() {
            tracing::warn!(%diagnostic, "Rejected bus frame");
        } else {
            tracing::debug!(%diagnostic, "Packet not fully decoded");
        }
    }
}

/// Sink that stores diagnostics in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything recorded so far.
    #[must_use]
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.lock().clone()
    }

    /// Removes and returns everything recorded so far.
    pub fn drain(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.entries.lock())
    }

    /// Number of recorded diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn record(&self, diagnostic: Diagnostic) {
        self.entries.lock().push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collecting_sink_drains() {
        let sink = CollectingSink::new();
        assert!(sink.is_empty());

        sink.record(Diagnostic::SceneBroadcastIgnored {
            device_type: DeviceType::Mr0416_C,
        });
        sink.record(Diagnostic::UnsupportedDevice {
            command: CommandType::ResponseReadStatusOfChannels,
        });

        assert_eq!(sink.len(), 2);
        let drained = sink.drain();
        assert_eq!(drained.len(), 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn diagnostic_display() {
        let diagnostic = Diagnostic::UnsupportedChannel {
            device_type: DeviceType::Mdt04015_433,
            command: CommandType::ResponseSingleChannelControl,
            channel: 7,
        };
        assert_eq!(
            diagnostic.to_string(),
            "for type MDT04015_433, command Response_Single_Channel_Control does not support channel 7"
        );
    }

    #[test]
    fn malformed_classification() {
        let malformed = Diagnostic::MalformedPayload {
            device_type: DeviceType::Mr1610_433,
            error: DecodeError::ShortPayload {
                command: CommandType::ResponseReadStatusOfChannels,
                required: 17,
                actual: 4,
            },
        };
        assert!(malformed.is_malformed());
        assert!(
            !Diagnostic::SceneBroadcastIgnored {
                device_type: DeviceType::Mr1610_433
            }
            .is_malformed()
        );
    }

    #[test]
    fn tracing_sink_accepts_everything() {
        let sink = TracingSink;
        sink.record(Diagnostic::UnsupportedDevice {
            command: CommandType::Other(1),
        });
    }
}
