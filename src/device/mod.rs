// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bus devices and their decode engine.
//!
//! A [`Device`] pairs a bus identity with a dirty flag and the typed channel
//! state of its family ([`ChannelState`]). Every family codec implements
//! [`Decode`]; [`Device::decode`] is the single entry point callers use once
//! a packet has been matched to a device.
//!
//! # Dirty Flag
//!
//! Decoding only ever sets the flag, and only when a field's new value
//! differs from the stored one. The consumer clears it with
//! [`Device::set_updated`] after it has published the change.
//!
//! ```
//! use hdlbus_lib::device::{create, Device};
//! use hdlbus_lib::diagnostics::TracingSink;
//! use hdlbus_lib::manager::DeviceConfiguration;
//! use hdlbus_lib::protocol::Packet;
//! use hdlbus_lib::types::{CommandType, DeviceType, PowerState};
//!
//! let config = DeviceConfiguration::new(1, 20, DeviceType::Mr0410_431);
//! let mut device = create(&config);
//!
//! let packet = Packet::new(
//!     DeviceType::Mr0410_431,
//!     CommandType::ResponseReadStatusOfChannels,
//!     1,
//!     20,
//!     vec![4, 100, 0, 0, 100],
//! );
//! device.decode(&packet, &TracingSink);
//!
//! assert!(device.is_updated());
//! let relays = device.relay_bank().unwrap();
//! assert_eq!(relays.channel(1), Some(PowerState::On));
//! assert_eq!(relays.channel(2), Some(PowerState::Off));
//!
//! device.set_updated(false);
//! device.decode(&packet, &TracingSink);
//! assert!(!device.is_updated());
//! ```

mod dimmer;
mod factory;
mod floor_heating;
mod relay;

pub use dimmer::DimmerBank;
pub use factory::{create, create_for_packet, create_for_serial};
pub use floor_heating::FloorHeating;
pub use relay::RelayBank;

use std::fmt;

use serde::Serialize;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::DecodeError;
use crate::manager::DeviceConfiguration;
use crate::protocol::Packet;
use crate::types::DeviceType;

/// Serial number reported by devices without a codec.
pub const UNSUPPORTED_SERIAL_NR: &str = "Unsupported device";

/// A family codec: applies a packet to typed channel state.
pub trait Decode {
    /// Applies `packet` to this channel state.
    ///
    /// Returns `Ok(true)` if any stored value changed. Commands and channels
    /// the family does not handle are reported to `sink` and leave the state
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] when the payload cannot be decoded. No field
    /// is modified in that case.
    fn decode(
        &mut self,
        device_type: DeviceType,
        packet: &Packet,
        sink: &dyn DiagnosticSink,
    ) -> Result<bool, DecodeError>;
}

/// Per-family channel state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "family", rename_all = "camelCase")]
pub enum ChannelState {
    /// On/off relay bank.
    Relay(RelayBank),
    /// Percent dimmer bank.
    Dimmer(DimmerBank),
    /// Floor heating controller.
    FloorHeating(FloorHeating),
    /// Model without a codec.
    Unsupported,
}

/// A device on the bus.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    subnet: u8,
    device_id: u8,
    serial_nr: String,
    device_type: DeviceType,
    updated: bool,
    state: ChannelState,
}

impl Device {
    pub(crate) fn new(config: &DeviceConfiguration, state: ChannelState) -> Self {
        let device_type = match state {
            ChannelState::Unsupported => DeviceType::Invalid,
            _ => config.device_type(),
        };
        Self {
            subnet: config.subnet(),
            device_id: config.device_id(),
            serial_nr: config.serial_nr().to_string(),
            device_type,
            updated: false,
            state,
        }
    }

    /// Decodes a packet addressed to this device.
    ///
    /// Never fails: rejected frames and unhandled commands are reported to
    /// `sink` and leave the state unchanged. Sets the dirty flag when any
    /// field changed; never clears it.
    pub fn decode(&mut self, packet: &Packet, sink: &dyn DiagnosticSink) {
        let device_type = self.device_type;
        let result = match &mut self.state {
            ChannelState::Relay(bank) => bank.decode(device_type, packet, sink),
            ChannelState::Dimmer(bank) => bank.decode(device_type, packet, sink),
            ChannelState::FloorHeating(controller) => controller.decode(device_type, packet, sink),
            ChannelState::Unsupported => {
                sink.record(Diagnostic::UnsupportedDevice {
                    command: packet.command_type(),
                });
                Ok(false)
            }
        };

        match result {
            Ok(true) => self.updated = true,
            Ok(false) => {}
            Err(error) => sink.record(Diagnostic::MalformedPayload { device_type, error }),
        }
    }

    /// Model tag. [`DeviceType::Invalid`] for the unsupported sentinel.
    #[must_use]
    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }

    /// Serial number. The unsupported sentinel always reports
    /// [`UNSUPPORTED_SERIAL_NR`].
    #[must_use]
    pub fn serial_nr(&self) -> &str {
        match self.state {
            ChannelState::Unsupported => UNSUPPORTED_SERIAL_NR,
            _ => &self.serial_nr,
        }
    }

    /// Subnet of the device.
    #[must_use]
    pub fn subnet(&self) -> u8 {
        self.subnet
    }

    /// Device id within the subnet.
    #[must_use]
    pub fn device_id(&self) -> u8 {
        self.device_id
    }

    /// Returns `true` if decoded state changed since the flag was last cleared.
    #[must_use]
    pub fn is_updated(&self) -> bool {
        self.updated
    }

    /// Sets or clears the dirty flag.
    pub fn set_updated(&mut self, updated: bool) {
        self.updated = updated;
    }

    /// Returns `false` for the unsupported sentinel, which must never be
    /// announced as a real device.
    #[must_use]
    pub fn is_discoverable(&self) -> bool {
        !matches!(self.state, ChannelState::Unsupported)
    }

    /// Typed channel state.
    #[must_use]
    pub fn state(&self) -> &ChannelState {
        &self.state
    }

    /// Relay channels, if this is a relay bank.
    #[must_use]
    pub fn relay_bank(&self) -> Option<&RelayBank> {
        match &self.state {
            ChannelState::Relay(bank) => Some(bank),
            _ => None,
        }
    }

    /// Dimmer channels, if this is a dimmer bank.
    #[must_use]
    pub fn dimmer_bank(&self) -> Option<&DimmerBank> {
        match &self.state {
            ChannelState::Dimmer(bank) => Some(bank),
            _ => None,
        }
    }

    /// Thermostat state, if this is a floor heating controller.
    #[must_use]
    pub fn floor_heating(&self) -> Option<&FloorHeating> {
        match &self.state {
            ChannelState::FloorHeating(controller) => Some(controller),
            _ => None,
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.device_type(), self.serial_nr())
    }
}

/// Stores `value` in `slot` and reports whether it differs from what was there.
pub(crate) fn track<T: PartialEq>(slot: &mut Option<T>, value: T) -> bool {
    if slot.as_ref() == Some(&value) {
        return false;
    }
    *slot = Some(value);
    true
}
