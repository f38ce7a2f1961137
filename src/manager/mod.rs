// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device provisioning and packet dispatch.
//!
//! [`DeviceConfiguration`] is what the provisioning layer knows about each
//! device: its bus address, serial number, model and free-form properties.
//! [`DeviceRegistry`] owns the devices built from those configurations and
//! routes every received [`Packet`](crate::protocol::Packet) to the right one.
//!
//! # Examples
//!
//! ```
//! use hdlbus_lib::event::DeviceEvent;
//! use hdlbus_lib::manager::DeviceRegistry;
//! use hdlbus_lib::protocol::Packet;
//! use hdlbus_lib::types::{CommandType, DeviceType};
//!
//! let registry = DeviceRegistry::from_json(
//!     r#"[{"subnet": 1, "deviceId": 30, "deviceType": "MDT04015_433"}]"#,
//! )
//! .unwrap();
//! let mut events = registry.subscribe();
//!
//! let packet = Packet::new(
//!     DeviceType::Mdt04015_433,
//!     CommandType::ResponseReadCurrentLevelOfChannels,
//!     1,
//!     30,
//!     vec![4, 10, 20, 30, 40],
//! );
//! registry.handle_packet(&packet);
//!
//! while let Ok(event) = events.try_recv() {
//!     if let DeviceEvent::StateChanged { device, .. } = event {
//!         let levels = device.dimmer_bank().unwrap();
//!         assert_eq!(levels.channel(4).map(|d| d.value()), Some(40));
//!     }
//! }
//! ```

mod device_config;
mod registry;

pub use device_config::{DeviceConfiguration, PROPERTY_CHANNEL_NR, load_configurations};
pub use registry::{DeviceRegistry, DispatchOutcome};
