// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device registry routing received packets to their devices.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::sync::broadcast;

use crate::device::{Device, create_for_serial};
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::ConfigError;
use crate::event::{DeviceEvent, EventBus};
use crate::protocol::{Packet, normalize_serial_nr};

use super::device_config::{DeviceConfiguration, load_configurations};

/// What [`DeviceRegistry::handle_packet`] did with a packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The device's state changed and a state change event was published.
    Changed,
    /// The packet was decoded but no field changed.
    Unchanged,
    /// No configuration matches the packet's serial number.
    UnknownDevice,
}

/// Registry of the devices seen on the bus.
///
/// Devices are created lazily from their configuration the first time a
/// packet from them arrives. Each device sits behind its own lock so decodes
/// for different devices never contend; the registry maps are only locked
/// long enough to look up or insert an entry.
///
/// # Events
///
/// Events carry the normalized serial number (trimmed, lowercase).
///
/// - [`DeviceEvent::DeviceAdded`] when a supported device is first created
/// - [`DeviceEvent::StateChanged`] after a decode changed a device; the dirty
///   flag is cleared once the snapshot is taken
/// - [`DeviceEvent::UnknownDevice`] for packets from unconfigured devices
/// - [`DeviceEvent::DeviceRemoved`] from [`remove_device`](Self::remove_device)
///
/// # Examples
///
/// ```
/// use hdlbus_lib::event::DeviceEvent;
/// use hdlbus_lib::manager::{DeviceConfiguration, DeviceRegistry, DispatchOutcome};
/// use hdlbus_lib::protocol::Packet;
/// use hdlbus_lib::types::{CommandType, DeviceType, PowerState};
///
/// let registry = DeviceRegistry::new(vec![
///     DeviceConfiguration::new(1, 20, DeviceType::Mr0410_431),
/// ]);
/// let mut events = registry.subscribe();
///
/// let packet = Packet::new(
///     DeviceType::Mr0410_431,
///     CommandType::ResponseReadStatusOfChannels,
///     1,
///     20,
///     vec![4, 100, 0, 0, 0],
/// );
/// assert_eq!(registry.handle_packet(&packet), DispatchOutcome::Changed);
/// assert_eq!(registry.handle_packet(&packet), DispatchOutcome::Unchanged);
///
/// assert!(matches!(events.try_recv(), Ok(DeviceEvent::DeviceAdded { .. })));
/// assert!(matches!(events.try_recv(), Ok(DeviceEvent::StateChanged { .. })));
///
/// let device = registry.device("1020").unwrap();
/// assert_eq!(device.relay_bank().unwrap().channel(1), Some(PowerState::On));
/// ```
pub struct DeviceRegistry {
    configurations: RwLock<Vec<DeviceConfiguration>>,
    /// Devices keyed by normalized serial number.
    devices: RwLock<HashMap<String, Arc<Mutex<Device>>>>,
    event_bus: EventBus,
    sink: Arc<dyn DiagnosticSink>,
}

impl DeviceRegistry {
    /// Creates a registry over the given configurations.
    ///
    /// Diagnostics go to a [`TracingSink`] until replaced with
    /// [`with_sink`](Self::with_sink).
    #[must_use]
    pub fn new(configurations: Vec<DeviceConfiguration>) -> Self {
        Self {
            configurations: RwLock::new(configurations),
            devices: RwLock::new(HashMap::new()),
            event_bus: EventBus::new(),
            sink: Arc::new(TracingSink),
        }
    }

    /// Creates a registry from a JSON array of configurations.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the document cannot be parsed.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(load_configurations(json)?))
    }

    /// Replaces the diagnostic sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replaces the event bus with one buffering `capacity` events.
    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_bus = EventBus::with_capacity(capacity);
        self
    }

    // =========================================================================
    // Subscription
    // =========================================================================

    /// Subscribes to registry events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DeviceEvent> {
        self.event_bus.subscribe()
    }

    /// Returns the number of active event subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.event_bus.subscriber_count()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Returns a copy of the current configurations.
    #[must_use]
    pub fn configurations(&self) -> Vec<DeviceConfiguration> {
        self.configurations.read().clone()
    }

    /// Replaces the configurations used for devices not yet created.
    ///
    /// Devices already in the registry keep their state; remove them with
    /// [`remove_device`](Self::remove_device) to have them rebuilt.
    pub fn set_configurations(&self, configurations: Vec<DeviceConfiguration>) {
        tracing::debug!(count = configurations.len(), "Replacing device configurations");
        *self.configurations.write() = configurations;
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Routes a received packet to its device and decodes it.
    ///
    /// Creates the device from its configuration on first contact. Decode
    /// diagnostics go to the registry's sink; nothing here fails.
    pub fn handle_packet(&self, packet: &Packet) -> DispatchOutcome {
        let key = normalize_serial_nr(packet.serial_nr());
        let Some(slot) = self.resolve(&key, packet) else {
            self.event_bus.publish(DeviceEvent::UnknownDevice {
                serial_nr: key,
                subnet: packet.subnet(),
                device_id: packet.device_id(),
            });
            return DispatchOutcome::UnknownDevice;
        };

        let snapshot = {
            let mut device = slot.lock();
            device.decode(packet, self.sink.as_ref());
            if !device.is_updated() {
                return DispatchOutcome::Unchanged;
            }
            let snapshot = device.clone();
            device.set_updated(false);
            snapshot
        };

        tracing::trace!(device = %snapshot, command = %packet.command_type(), "Device state changed");
        self.event_bus.publish(DeviceEvent::state_changed(key, snapshot));
        DispatchOutcome::Changed
    }

    fn resolve(&self, key: &str, packet: &Packet) -> Option<Arc<Mutex<Device>>> {
        if key.is_empty() {
            tracing::debug!(command = %packet.command_type(), "Packet without serial number");
            return None;
        }

        if let Some(slot) = self.devices.read().get(key) {
            return Some(Arc::clone(slot));
        }

        let device = {
            let configurations = self.configurations.read();
            create_for_serial(Some(key), &configurations)
        };
        let Some(device) = device else {
            tracing::debug!(
                serial_nr = %packet.serial_nr(),
                source_type = %packet.source_device_type(),
                "Packet from unconfigured device"
            );
            return None;
        };

        let mut devices = self.devices.write();
        // Another thread may have created it between the two locks
        if let Some(slot) = devices.get(key) {
            return Some(Arc::clone(slot));
        }

        let announce = device
            .is_discoverable()
            .then(|| DeviceEvent::device_added(key, device.device_type()));
        let slot = Arc::new(Mutex::new(device));
        devices.insert(key.to_string(), Arc::clone(&slot));
        drop(devices);

        if let Some(event) = announce {
            tracing::debug!(serial_nr = %key, "Device added");
            self.event_bus.publish(event);
        }
        Some(slot)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns a snapshot of the device with the given serial number.
    #[must_use]
    pub fn device(&self, serial_nr: &str) -> Option<Device> {
        let slot = self
            .devices
            .read()
            .get(&normalize_serial_nr(serial_nr))
            .map(Arc::clone)?;
        let device = slot.lock().clone();
        Some(device)
    }

    /// Returns snapshots of every device, in no particular order.
    #[must_use]
    pub fn devices(&self) -> Vec<Device> {
        let slots: Vec<_> = self.devices.read().values().map(Arc::clone).collect();
        slots.iter().map(|slot| slot.lock().clone()).collect()
    }

    /// Forgets a device. It is rebuilt from configuration on its next packet.
    ///
    /// Returns `true` if the device was present.
    pub fn remove_device(&self, serial_nr: &str) -> bool {
        let key = normalize_serial_nr(serial_nr);
        let removed = self.devices.write().remove(&key).is_some();
        if removed {
            self.event_bus.publish(DeviceEvent::device_removed(key));
        }
        removed
    }

    /// Number of devices created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.read().len()
    }

    /// Returns `true` if no device has been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.read().is_empty()
    }
}

impl fmt::Debug for DeviceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceRegistry")
            .field("configurations", &self.configurations.read().len())
            .field("devices", &self.devices.read().len())
            .field("event_bus", &self.event_bus)
            .finish_non_exhaustive()
    }
}
