// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `HdlBus` Lib - decoding HDL Buspro device packets into typed state.
//!
//! This library turns packets received from an HDL Buspro installation into
//! the state of the devices that sent them. Transport and framing are left
//! to the caller: hand each received [`Packet`] to a [`DeviceRegistry`] and
//! subscribe to its events.
//!
//! # Supported Devices
//!
//! - **Relay banks**: 4, 8, 12 and 16 channel models (on/off per channel)
//! - **Dimmers**: 4 channel models (percent level per channel)
//! - **Floor heating**: thermostat mode, setpoints and current target
//!
//! Every other model in the [`DeviceType`] catalogue is accepted but decodes
//! nothing.
//!
//! # Quick Start
//!
//! ```
//! use hdlbus_lib::{DeviceConfiguration, DeviceRegistry, DispatchOutcome, Packet};
//! use hdlbus_lib::types::{CommandType, DeviceType, PowerState};
//!
//! let registry = DeviceRegistry::new(vec![
//!     DeviceConfiguration::new(1, 40, DeviceType::Mr0810_432),
//! ]);
//!
//! // A relay reports channels 1 and 3 on
//! let packet = Packet::new(
//!     DeviceType::Mr0810_432,
//!     CommandType::ResponseSingleChannelControl,
//!     1,
//!     40,
//!     vec![1, 0xF8, 100, 0, 0b0000_0101],
//! );
//! assert_eq!(registry.handle_packet(&packet), DispatchOutcome::Changed);
//!
//! let device = registry.device("1040").unwrap();
//! assert_eq!(device.relay_bank().unwrap().channels_on(), vec![1, 3]);
//! ```
//!
//! # Diagnostics
//!
//! Decoding never fails. Anything a codec cannot use is reported to a
//! [`DiagnosticSink`]; the default [`TracingSink`] logs through `tracing`.

pub mod device;
pub mod diagnostics;
pub mod error;
pub mod event;
pub mod manager;
pub mod protocol;
pub mod types;

pub use device::{ChannelState, Decode, Device, DimmerBank, FloorHeating, RelayBank};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, TracingSink};
pub use error::{ConfigError, DecodeError, Error, Result, ValueError};
pub use event::{DeviceEvent, EventBus};
pub use manager::{DeviceConfiguration, DeviceRegistry, DispatchOutcome, load_configurations};
pub use protocol::Packet;
pub use types::{
    CommandType, DeviceFamily, DeviceType, Dimmer, FloorHeatingMode, PowerState, TemperatureUnit,
    TimerSlot,
};
