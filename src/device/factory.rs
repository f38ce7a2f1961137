// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device construction from provisioning data.

use crate::diagnostics::DiagnosticSink;
use crate::manager::DeviceConfiguration;
use crate::protocol::{Packet, normalize_serial_nr, serial_nr_matches};
use crate::types::DeviceFamily;

use super::{ChannelState, Device, DimmerBank, FloorHeating, RelayBank};

/// Channel used by a floor heating controller without a `channelNr` property.
const DEFAULT_FLOOR_HEATING_CHANNEL: u8 = 1;

/// Builds the device variant for a configuration.
///
/// Never fails: a model without a codec yields the unsupported sentinel.
/// All channel state starts unknown and the dirty flag starts clear.
#[must_use]
pub fn create(config: &DeviceConfiguration) -> Device {
    let state = match config.device_type().family() {
        DeviceFamily::Relay { channels } => ChannelState::Relay(RelayBank::new(channels)),
        DeviceFamily::Dimmer => ChannelState::Dimmer(DimmerBank::new()),
        DeviceFamily::FloorHeating => {
            ChannelState::FloorHeating(FloorHeating::new(floor_heating_channel(config)))
        }
        DeviceFamily::Unsupported => {
            tracing::debug!(
                device_type = %config.device_type(),
                serial_nr = %config.serial_nr(),
                "No codec for device type, creating unsupported device"
            );
            ChannelState::Unsupported
        }
    };
    Device::new(config, state)
}

fn floor_heating_channel(config: &DeviceConfiguration) -> u8 {
    match config.channel_nr() {
        Ok(Some(channel)) => channel,
        Ok(None) => DEFAULT_FLOOR_HEATING_CHANNEL,
        Err(e) => {
            tracing::warn!(
                serial_nr = %config.serial_nr(),
                error = %e,
                "Ignoring floor heating channel property"
            );
            DEFAULT_FLOOR_HEATING_CHANNEL
        }
    }
}

/// Builds the device whose configuration matches `serial_nr`.
///
/// Matching ignores case and surrounding whitespace; the first match wins.
/// Returns `None` for a missing or blank serial, an empty configuration list,
/// or when nothing matches. Callers treat `None` as an unknown device.
///
/// # Examples
///
/// ```
/// use hdlbus_lib::device::create_for_serial;
/// use hdlbus_lib::manager::DeviceConfiguration;
/// use hdlbus_lib::types::DeviceType;
///
/// let configs = vec![
///     DeviceConfiguration::new(1, 1, DeviceType::Mr0810_432).with_serial_nr(" AB12 "),
/// ];
///
/// assert!(create_for_serial(Some("ab12"), &configs).is_some());
/// assert!(create_for_serial(Some("999999"), &configs).is_none());
/// assert!(create_for_serial(None, &configs).is_none());
/// ```
#[must_use]
pub fn create_for_serial(
    serial_nr: Option<&str>,
    configs: &[DeviceConfiguration],
) -> Option<Device> {
    let Some(serial_nr) = serial_nr.map(normalize_serial_nr).filter(|s| !s.is_empty()) else {
        tracing::debug!(configs = configs.len(), "Device lookup without serial number");
        return None;
    };

    let found = configs
        .iter()
        .find(|config| serial_nr_matches(config.serial_nr(), &serial_nr));

    if let Some(config) = found {
        tracing::debug!(serial_nr = %serial_nr, "Match found for serial number");
        Some(create(config))
    } else {
        tracing::debug!(
            serial_nr = %serial_nr,
            configs = configs.len(),
            "No configuration matches serial number"
        );
        None
    }
}

/// Resolves the device a packet belongs to and decodes the packet into it.
///
/// Returns `None` when no configuration matches the packet's serial number.
#[must_use]
pub fn create_for_packet(
    packet: &Packet,
    configs: &[DeviceConfiguration],
    sink: &dyn DiagnosticSink,
) -> Option<Device> {
    let Some(mut device) = create_for_serial(Some(packet.serial_nr()), configs) else {
        tracing::warn!(
            serial_nr = %packet.serial_nr(),
            source_type = %packet.source_device_type(),
            "Cannot create device from received packet"
        );
        return None;
    };
    device.decode(packet, sink);
    Some(device)
}
