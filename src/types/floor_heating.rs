// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor heating controller value types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Operating mode of a floor heating controller.
///
/// # Examples
///
/// ```
/// use hdlbus_lib::types::FloorHeatingMode;
///
/// assert_eq!(FloorHeatingMode::try_from(2).unwrap(), FloorHeatingMode::Day);
/// assert!(FloorHeatingMode::try_from(9).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FloorHeatingMode {
    /// Normal (comfort) setpoint.
    Normal,
    /// Day setpoint.
    Day,
    /// Night setpoint.
    Night,
    /// Away setpoint.
    Away,
    /// Day/night schedule; the active setpoint follows [`TimerSlot`].
    Timer,
}

impl FloorHeatingMode {
    /// Returns the wire value (1-5).
    #[must_use]
    pub const fn as_byte(&self) -> u8 {
        match self {
            Self::Normal => 1,
            Self::Day => 2,
            Self::Night => 3,
            Self::Away => 4,
            Self::Timer => 5,
        }
    }
}

impl TryFrom<u8> for FloorHeatingMode {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Normal),
            2 => Ok(Self::Day),
            3 => Ok(Self::Night),
            4 => Ok(Self::Away),
            5 => Ok(Self::Timer),
            other => Err(ValueError::InvalidMode(other)),
        }
    }
}

impl fmt::Display for FloorHeatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Normal => "Normal",
            Self::Day => "Day",
            Self::Night => "Night",
            Self::Away => "Away",
            Self::Timer => "Timer",
        };
        f.write_str(name)
    }
}

/// Temperature unit reported by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureUnit {
    /// Degrees Celsius.
    Celsius,
    /// Degrees Fahrenheit.
    Fahrenheit,
}

impl TemperatureUnit {
    /// Wire byte 1 means Fahrenheit; every other value is Celsius.
    #[must_use]
    pub const fn from_byte(value: u8) -> Self {
        if value == 1 { Self::Fahrenheit } else { Self::Celsius }
    }

    /// Returns the unit symbol (`"C"` or `"F"`).
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Active half of the day/night schedule used in timer mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerSlot {
    /// Day half of the schedule.
    Day,
    /// Night half of the schedule.
    Night,
}

impl TimerSlot {
    /// Wire byte 1 means night; every other value is day.
    #[must_use]
    pub const fn from_byte(value: u8) -> Self {
        if value == 1 { Self::Night } else { Self::Day }
    }

    /// Returns the slot name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Night => "Night",
        }
    }
}

impl fmt::Display for TimerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
