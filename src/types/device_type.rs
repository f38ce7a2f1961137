// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device model tags and their codec families.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Model tag of a device on the bus.
///
/// Tags are written the way the bus vendor names its models
/// (`MR0810_432`, `MDT04015_433`, ...). Unknown tags parse to
/// [`DeviceType::Invalid`] rather than failing, so an unrecognised model in a
/// configuration still yields a device (the unsupported sentinel).
///
/// # Examples
///
/// ```
/// use hdlbus_lib::types::{DeviceFamily, DeviceType};
///
/// let tag: DeviceType = "MR0810_432".parse().unwrap();
/// assert_eq!(tag, DeviceType::Mr0810_432);
/// assert_eq!(tag.family(), DeviceFamily::Relay { channels: 8 });
///
/// assert_eq!(DeviceType::from_tag("XYZ"), DeviceType::Invalid);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
#[allow(non_camel_case_types)]
pub enum DeviceType {
    /// 6-channel 3A dimmer.
    Mdt0601_233,
    /// 4-channel 1.5A universal dimmer.
    Mdt04015_433,
    /// Logic module.
    Ml01,
    /// Button panel with floor heating.
    Mpl8_48_Fh,
    /// Floor heating controller module.
    Mfh06_432,
    /// 4-button panel.
    Mpt04_48,
    /// 16-channel 10A relay.
    Mr1610_433,
    /// 12-channel 16A relay.
    Mr1216_233,
    /// 12-channel 10A relay.
    Mr1210_433,
    /// 8-channel 16A relay.
    Mr0816_432,
    /// 8-channel 10A relay.
    Mr0810_432,
    /// 4-channel 16A relay, compact housing.
    Mr0416_C,
    /// 4-channel 16A relay.
    Mr0416_231,
    /// 4-channel 16A relay.
    Mr0416_431,
    /// 4-channel 10A relay.
    Mr0410_431,
    /// Curtain controller.
    Mrda06,
    /// 6-channel 10A curtain controller.
    Mrda0610_432,
    /// 8-in-1 multi sensor.
    Msp08M_4C,
    /// 8-in-1 multi sensor.
    Ms08Mn_2C,
    /// 12-in-1 multi sensor.
    Ms12_2C,
    /// 24-zone sensor input.
    Ms24,
    /// Curtain motor controller.
    Mw02_231,
    /// Placeholder for unknown or unsupported models.
    Invalid,
}

/// The codec family a device type is decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceFamily {
    /// Relay bank with a fixed number of on/off channels.
    Relay {
        /// Number of channels on the bank.
        channels: u8,
    },
    /// 4-channel dimmer bank.
    Dimmer,
    /// Single-channel floor heating controller.
    FloorHeating,
    /// No codec exists for this model.
    Unsupported,
}

impl DeviceType {
    /// Every known tag, in catalogue order.
    pub const ALL: [Self; 23] = [
        Self::Mdt0601_233,
        Self::Mdt04015_433,
        Self::Ml01,
        Self::Mpl8_48_Fh,
        Self::Mfh06_432,
        Self::Mpt04_48,
        Self::Mr1610_433,
        Self::Mr1216_233,
        Self::Mr1210_433,
        Self::Mr0816_432,
        Self::Mr0810_432,
        Self::Mr0416_C,
        Self::Mr0416_231,
        Self::Mr0416_431,
        Self::Mr0410_431,
        Self::Mrda06,
        Self::Mrda0610_432,
        Self::Msp08M_4C,
        Self::Ms08Mn_2C,
        Self::Ms12_2C,
        Self::Ms24,
        Self::Mw02_231,
        Self::Invalid,
    ];

    /// Returns the vendor tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mdt0601_233 => "MDT0601_233",
            Self::Mdt04015_433 => "MDT04015_433",
            Self::Ml01 => "ML01",
            Self::Mpl8_48_Fh => "MPL8_48_FH",
            Self::Mfh06_432 => "MFH06_432",
            Self::Mpt04_48 => "MPT04_48",
            Self::Mr1610_433 => "MR1610_433",
            Self::Mr1216_233 => "MR1216_233",
            Self::Mr1210_433 => "MR1210_433",
            Self::Mr0816_432 => "MR0816_432",
            Self::Mr0810_432 => "MR0810_432",
            Self::Mr0416_C => "MR0416_C",
            Self::Mr0416_231 => "MR0416_231",
            Self::Mr0416_431 => "MR0416_431",
            Self::Mr0410_431 => "MR0410_431",
            Self::Mrda06 => "MRDA06",
            Self::Mrda0610_432 => "MRDA0610_432",
            Self::Msp08M_4C => "MSP08M_4C",
            Self::Ms08Mn_2C => "MS08Mn_2C",
            Self::Ms12_2C => "MS12_2C",
            Self::Ms24 => "MS24",
            Self::Mw02_231 => "MW02_231",
            Self::Invalid => "Invalid",
        }
    }

    /// Parses a vendor tag, case-insensitively and ignoring surrounding
    /// whitespace. Unknown tags map to [`DeviceType::Invalid`].
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(tag))
            .unwrap_or(Self::Invalid)
    }

    /// Returns the codec family for this model.
    #[must_use]
    pub const fn family(&self) -> DeviceFamily {
        match self {
            Self::Mr0416_C | Self::Mr0416_231 | Self::Mr0416_431 | Self::Mr0410_431 => {
                DeviceFamily::Relay { channels: 4 }
            }
            Self::Mr0816_432 | Self::Mr0810_432 => DeviceFamily::Relay { channels: 8 },
            Self::Mr1216_233 | Self::Mr1210_433 => DeviceFamily::Relay { channels: 12 },
            Self::Mr1610_433 => DeviceFamily::Relay { channels: 16 },
            Self::Mdt04015_433 => DeviceFamily::Dimmer,
            Self::Mfh06_432 => DeviceFamily::FloorHeating,
            _ => DeviceFamily::Unsupported,
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

impl From<String> for DeviceType {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<DeviceType> for String {
    fn from(device_type: DeviceType) -> Self {
        device_type.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_through_from_tag() {
        for device_type in DeviceType::ALL {
            assert_eq!(DeviceType::from_tag(device_type.as_str()), device_type);
        }
    }

    #[test]
    fn from_tag_is_lenient() {
        assert_eq!(DeviceType::from_tag(" mr1610_433 "), DeviceType::Mr1610_433);
        assert_eq!(DeviceType::from_tag("MR9999"), DeviceType::Invalid);
        assert_eq!(DeviceType::from_tag(""), DeviceType::Invalid);
    }

    #[test]
    fn relay_families_carry_channel_counts() {
        assert_eq!(
            DeviceType::Mr0410_431.family(),
            DeviceFamily::Relay { channels: 4 }
        );
        assert_eq!(
            DeviceType::Mr0816_432.family(),
            DeviceFamily::Relay { channels: 8 }
        );
        assert_eq!(
            DeviceType::Mr1210_433.family(),
            DeviceFamily::Relay { channels: 12 }
        );
        assert_eq!(
            DeviceType::Mr1610_433.family(),
            DeviceFamily::Relay { channels: 16 }
        );
    }

    #[test]
    fn models_without_codec_are_unsupported() {
        assert_eq!(DeviceType::Ms24.family(), DeviceFamily::Unsupported);
        assert_eq!(DeviceType::Mdt0601_233.family(), DeviceFamily::Unsupported);
        assert_eq!(DeviceType::Invalid.family(), DeviceFamily::Unsupported);
    }

    #[test]
    fn serde_uses_vendor_tags() {
        let json = serde_json::to_string(&DeviceType::Mfh06_432).unwrap();
        assert_eq!(json, "\"MFH06_432\"");

        let parsed: DeviceType = serde_json::from_str("\"SOMETHING_NEW\"").unwrap();
        assert_eq!(parsed, DeviceType::Invalid);
    }
}
