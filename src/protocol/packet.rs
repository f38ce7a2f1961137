// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoded bus message.

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::types::{CommandType, DeviceType};

use super::serial::derive_serial_nr;

/// A message received from the bus, already framed and checksum-validated.
///
/// The payload is positional: what byte `n` means depends on both the
/// command type and the family of the device the packet is addressed to.
/// Codecs check its length with [`Packet::require`] before indexing, so a
/// short payload surfaces as a [`DecodeError`] instead of a panic.
///
/// # Examples
///
/// ```
/// use hdlbus_lib::protocol::Packet;
/// use hdlbus_lib::types::{CommandType, DeviceType};
///
/// let packet = Packet::new(
///     DeviceType::Mr0410_431,
///     CommandType::ResponseReadStatusOfChannels,
///     1,
///     23,
///     vec![4, 0, 100, 0, 100],
/// );
/// assert_eq!(packet.serial_nr(), "1023");
/// assert_eq!(packet.require(5).unwrap()[2], 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packet {
    source_device_type: DeviceType,
    command_type: CommandType,
    subnet: u8,
    device_id: u8,
    serial_nr: String,
    data: Vec<u8>,
}

impl Packet {
    /// Creates a packet whose serial number is derived from its address.
    #[must_use]
    pub fn new(
        source_device_type: DeviceType,
        command_type: CommandType,
        subnet: u8,
        device_id: u8,
        data: Vec<u8>,
    ) -> Self {
        Self {
            source_device_type,
            command_type,
            subnet,
            device_id,
            serial_nr: derive_serial_nr(subnet, device_id),
            data,
        }
    }

    /// Overrides the derived serial number.
    #[must_use]
    pub fn with_serial_nr(mut self, serial_nr: impl Into<String>) -> Self {
        self.serial_nr = serial_nr.into();
        self
    }

    /// Model tag of the sending device.
    #[must_use]
    pub fn source_device_type(&self) -> DeviceType {
        self.source_device_type
    }

    /// Command classification.
    #[must_use]
    pub fn command_type(&self) -> CommandType {
        self.command_type
    }

    /// Subnet of the sending device.
    #[must_use]
    pub fn subnet(&self) -> u8 {
        self.subnet
    }

    /// Device id of the sending device.
    #[must_use]
    pub fn device_id(&self) -> u8 {
        self.device_id
    }

    /// Serial number identifying the sending device.
    #[must_use]
    pub fn serial_nr(&self) -> &str {
        &self.serial_nr
    }

    /// Raw payload bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Checks that the payload holds at least `len` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::ShortPayload`] when it does not.
    pub fn require(&self, len: usize) -> Result<&[u8], DecodeError> {
        if self.data.len() < len {
            return Err(DecodeError::ShortPayload {
                command: self.command_type,
                required: len,
                actual: self.data.len(),
            });
        }
        Ok(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packet(data: Vec<u8>) -> Packet {
        Packet::new(
            DeviceType::Mdt04015_433,
            CommandType::ResponseSingleChannelControl,
            2,
            5,
            data,
        )
    }

    #[test]
    fn serial_is_derived_then_overridable() {
        let p = packet(vec![]);
        assert_eq!(p.serial_nr(), "2005");

        let p = p.with_serial_nr("custom");
        assert_eq!(p.serial_nr(), "custom");
        assert_eq!(p.subnet(), 2);
        assert_eq!(p.device_id(), 5);
    }

    #[test]
    fn require_reports_lengths() {
        let p = packet(vec![1, 2]);
        assert!(p.require(2).is_ok());
        assert_eq!(
            p.require(3),
            Err(DecodeError::ShortPayload {
                command: CommandType::ResponseSingleChannelControl,
                required: 3,
                actual: 2,
            })
        );
    }
}
