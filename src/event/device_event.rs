// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device event types.

use serde::Serialize;

use crate::device::Device;
use crate::types::DeviceType;

/// Events emitted by the device registry.
///
/// Every event carries the normalized serial number of the device it
/// concerns, so events about one device always compare equal by serial.
///
/// # Examples
///
/// ```
/// use hdlbus_lib::event::DeviceEvent;
///
/// let unknown = DeviceEvent::UnknownDevice {
///     serial_nr: "9099".to_string(),
///     subnet: 9,
///     device_id: 99,
/// };
/// assert!(unknown.is_unknown_device());
/// assert_eq!(unknown.serial_nr(), "9099");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum DeviceEvent {
    /// A configured device was seen on the bus for the first time.
    #[serde(rename_all = "camelCase")]
    DeviceAdded {
        /// Serial number of the device.
        serial_nr: String,
        /// Model of the device.
        device_type: DeviceType,
    },

    /// A device was forgotten by the registry.
    #[serde(rename_all = "camelCase")]
    DeviceRemoved {
        /// Serial number of the device.
        serial_nr: String,
    },

    /// Decoding a packet changed at least one field of a device.
    #[serde(rename_all = "camelCase")]
    StateChanged {
        /// Serial number of the device.
        serial_nr: String,
        /// Snapshot of the device after the change.
        device: Box<Device>,
    },

    /// A packet arrived from a device with no matching configuration.
    #[serde(rename_all = "camelCase")]
    UnknownDevice {
        /// Serial number derived from the packet.
        serial_nr: String,
        /// Source subnet.
        subnet: u8,
        /// Source device id.
        device_id: u8,
    },
}

impl DeviceEvent {
    /// Serial number of the device this event concerns.
    #[must_use]
    pub fn serial_nr(&self) -> &str {
        match self {
            Self::DeviceAdded { serial_nr, .. }
            | Self::DeviceRemoved { serial_nr }
            | Self::StateChanged { serial_nr, .. }
            | Self::UnknownDevice { serial_nr, .. } => serial_nr,
        }
    }

    /// Returns `true` for added/removed events.
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::DeviceAdded { .. } | Self::DeviceRemoved { .. })
    }

    /// Returns `true` if this is a state change event.
    #[must_use]
    pub fn is_state_change(&self) -> bool {
        matches!(self, Self::StateChanged { .. })
    }

    /// Returns `true` if this reports an unconfigured device.
    #[must_use]
    pub fn is_unknown_device(&self) -> bool {
        matches!(self, Self::UnknownDevice { .. })
    }

    /// Device snapshot carried by a state change event.
    #[must_use]
    pub fn device(&self) -> Option<&Device> {
        match self {
            Self::StateChanged { device, .. } => Some(device),
            _ => None,
        }
    }

    /// Creates a device added event.
    #[must_use]
    pub fn device_added(serial_nr: impl Into<String>, device_type: DeviceType) -> Self {
        Self::DeviceAdded {
            serial_nr: serial_nr.into(),
            device_type,
        }
    }

    /// Creates a device removed event.
    #[must_use]
    pub fn device_removed(serial_nr: impl Into<String>) -> Self {
        Self::DeviceRemoved {
            serial_nr: serial_nr.into(),
        }
    }

    /// Creates a state change event carrying a device snapshot.
    #[must_use]
    pub fn state_changed(serial_nr: impl Into<String>, device: Device) -> Self {
        Self::StateChanged {
            serial_nr: serial_nr.into(),
            device: Box::new(device),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::create;
    use crate::manager::DeviceConfiguration;

    #[test]
    fn serial_nr_for_all_variants() {
        let device = create(&DeviceConfiguration::new(1, 5, DeviceType::Mr0416_431));
        let events = [
            DeviceEvent::device_added("1005", DeviceType::Mr0416_431),
            DeviceEvent::device_removed("1005"),
            DeviceEvent::state_changed("1005", device),
            DeviceEvent::UnknownDevice {
                serial_nr: "1005".to_string(),
                subnet: 1,
                device_id: 5,
            },
        ];

        for event in &events {
            assert_eq!(event.serial_nr(), "1005");
        }
    }

    #[test]
    fn classification() {
        let added = DeviceEvent::device_added("1", DeviceType::Ml01);
        assert!(added.is_lifecycle());
        assert!(!added.is_state_change());
        assert!(added.device().is_none());

        let device = create(&DeviceConfiguration::new(1, 2, DeviceType::Mdt04015_433));
        let changed = DeviceEvent::state_changed("1002", device.clone());
        assert!(changed.is_state_change());
        assert_eq!(changed.device(), Some(&device));
    }

    #[test]
    fn serializes_with_event_tag() {
        let json =
            serde_json::to_value(DeviceEvent::device_added("1020", DeviceType::Mr0810_432)).unwrap();
        assert_eq!(json["event"], "deviceAdded");
        assert_eq!(json["serialNr"], "1020");
        assert_eq!(json["deviceType"], "MR0810_432");
    }
}
