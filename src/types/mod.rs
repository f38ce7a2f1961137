// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for decoded bus state.
//!
//! # Types
//!
//! - [`PowerState`] - On/Off state of a relay channel
//! - [`Dimmer`] - Dimmer channel level (0-100%)
//! - [`DeviceType`] - Vendor model tag, classified into a [`DeviceFamily`]
//! - [`CommandType`] - Message intent of a packet
//! - [`FloorHeatingMode`], [`TemperatureUnit`], [`TimerSlot`] - Thermostat state

mod command_type;
mod device_type;
mod dimmer;
mod floor_heating;
mod power;

pub use command_type::CommandType;
pub use device_type::{DeviceFamily, DeviceType};
pub use dimmer::Dimmer;
pub use floor_heating::{FloorHeatingMode, TemperatureUnit, TimerSlot};
pub use power::PowerState;
