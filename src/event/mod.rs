// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for device discovery and state changes.
//!
//! The [`EventBus`] uses tokio's broadcast channel so that several consumers
//! (a discovery service, a state publisher) can each receive every event the
//! [`DeviceRegistry`](crate::manager::DeviceRegistry) emits.
//!
//! # Examples
//!
//! ```
//! use hdlbus_lib::event::{DeviceEvent, EventBus};
//! use hdlbus_lib::types::DeviceType;
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(DeviceEvent::device_added("1020", DeviceType::Mr0810_432));
//!
//! let event = rx.try_recv().unwrap();
//! assert_eq!(event.serial_nr(), "1020");
//! ```

mod device_event;
mod event_bus;

pub use device_event::DeviceEvent;
pub use event_bus::EventBus;
