// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device configuration supplied by the provisioning layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;
use crate::protocol::derive_serial_nr;
use crate::types::DeviceType;

/// Property key holding the floor heating channel number.
pub const PROPERTY_CHANNEL_NR: &str = "channelNr";

/// Configuration for a single bus device.
///
/// The serial number defaults to the one derived from subnet and device id;
/// the provisioning layer may override it.
///
/// # Examples
///
/// ```
/// use hdlbus_lib::manager::DeviceConfiguration;
/// use hdlbus_lib::types::DeviceType;
///
/// let config = DeviceConfiguration::new(1, 12, DeviceType::Mfh06_432)
///     .with_property("channelNr", 3);
///
/// assert_eq!(config.serial_nr(), "1012");
/// assert_eq!(config.channel_nr().unwrap(), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawDeviceConfiguration")]
pub struct DeviceConfiguration {
    subnet: u8,
    device_id: u8,
    serial_nr: String,
    device_type: DeviceType,
    properties: BTreeMap<String, Value>,
}

/// Wire shape of [`DeviceConfiguration`]: the serial number may be omitted.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDeviceConfiguration {
    subnet: u8,
    device_id: u8,
    #[serde(default)]
    serial_nr: Option<String>,
    device_type: DeviceType,
    #[serde(default)]
    properties: BTreeMap<String, Value>,
}

impl From<RawDeviceConfiguration> for DeviceConfiguration {
    fn from(raw: RawDeviceConfiguration) -> Self {
        let serial_nr = raw
            .serial_nr
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| derive_serial_nr(raw.subnet, raw.device_id));
        Self {
            subnet: raw.subnet,
            device_id: raw.device_id,
            serial_nr,
            device_type: raw.device_type,
            properties: raw.properties,
        }
    }
}

impl DeviceConfiguration {
    /// Creates a configuration with a derived serial number and no properties.
    #[must_use]
    pub fn new(subnet: u8, device_id: u8, device_type: DeviceType) -> Self {
        Self {
            subnet,
            device_id,
            serial_nr: derive_serial_nr(subnet, device_id),
            device_type,
            properties: BTreeMap::new(),
        }
    }

    /// Overrides the serial number.
    #[must_use]
    pub fn with_serial_nr(mut self, serial_nr: impl Into<String>) -> Self {
        self.serial_nr = serial_nr.into();
        self
    }

    /// Adds a property, replacing any previous value for the same key.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Subnet of the device.
    #[must_use]
    pub fn subnet(&self) -> u8 {
        self.subnet
    }

    /// Device id within the subnet.
    #[must_use]
    pub fn device_id(&self) -> u8 {
        self.device_id
    }

    /// Serial number as provisioned.
    #[must_use]
    pub fn serial_nr(&self) -> &str {
        &self.serial_nr
    }

    /// Model tag.
    #[must_use]
    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }

    /// Free-form properties.
    #[must_use]
    pub fn properties(&self) -> &BTreeMap<String, Value> {
        &self.properties
    }

    /// Looks up a single property.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Reads the [`PROPERTY_CHANNEL_NR`] property.
    ///
    /// Accepts a JSON number or a numeric string. Returns `Ok(None)` when the
    /// property is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidProperty`] when the value is not a
    /// channel number in 0-255.
    pub fn channel_nr(&self) -> Result<Option<u8>, ConfigError> {
        let Some(value) = self.property(PROPERTY_CHANNEL_NR) else {
            return Ok(None);
        };
        let parsed = match value {
            Value::Number(n) => n.as_u64().and_then(|n| u8::try_from(n).ok()),
            Value::String(s) => s.trim().parse::<u8>().ok(),
            _ => None,
        };
        parsed.map(Some).ok_or_else(|| ConfigError::InvalidProperty {
            key: PROPERTY_CHANNEL_NR.to_string(),
            value: value.to_string(),
        })
    }
}

/// Parses a JSON array of device configurations.
///
/// # Errors
///
/// Returns [`ConfigError::Json`] if the document is not a valid array of
/// configurations. Unknown model tags are not an error; they become
/// [`DeviceType::Invalid`].
///
/// # Examples
///
/// ```
/// use hdlbus_lib::manager::load_configurations;
///
/// let configs = load_configurations(
///     r#"[{"subnet": 1, "deviceId": 4, "deviceType": "MR0810_432"}]"#,
/// )
/// .unwrap();
/// assert_eq!(configs[0].serial_nr(), "1004");
/// ```
pub fn load_configurations(json: &str) -> Result<Vec<DeviceConfiguration>, ConfigError> {
    let configs: Vec<DeviceConfiguration> = serde_json::from_str(json)?;
    tracing::debug!(count = configs.len(), "Loaded device configurations");
    Ok(configs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_derives_serial() {
        let config = DeviceConfiguration::new(3, 45, DeviceType::Mr0410_431);
        assert_eq!(config.serial_nr(), "3045");
        assert_eq!(config.subnet(), 3);
        assert_eq!(config.device_id(), 45);
        assert!(config.properties().is_empty());
    }

    #[test]
    fn serial_override() {
        let config =
            DeviceConfiguration::new(3, 45, DeviceType::Mr0410_431).with_serial_nr(" AB12 ");
        assert_eq!(config.serial_nr(), " AB12 ");
    }

    #[test]
    fn properties_keep_last_value_per_key() {
        let config = DeviceConfiguration::new(1, 1, DeviceType::Mfh06_432)
            .with_property("channelNr", 1)
            .with_property("channelNr", 2);
        assert_eq!(config.properties().len(), 1);
        assert_eq!(config.channel_nr().unwrap(), Some(2));
    }

    #[test]
    fn channel_nr_accepts_numeric_string() {
        let config =
            DeviceConfiguration::new(1, 1, DeviceType::Mfh06_432).with_property("channelNr", " 4 ");
        assert_eq!(config.channel_nr().unwrap(), Some(4));
    }

    #[test]
    fn channel_nr_rejects_garbage() {
        let config =
            DeviceConfiguration::new(1, 1, DeviceType::Mfh06_432).with_property("channelNr", 300);
        assert!(matches!(
            config.channel_nr(),
            Err(ConfigError::InvalidProperty { .. })
        ));
    }

    #[test]
    fn channel_nr_absent() {
        let config = DeviceConfiguration::new(1, 1, DeviceType::Mfh06_432);
        assert_eq!(config.channel_nr().unwrap(), None);
    }

    #[test]
    fn load_full_document() {
        let json = r#"[
            {"subnet": 1, "deviceId": 4, "serialNr": "relay-a", "deviceType": "MR0810_432"},
            {"subnet": 1, "deviceId": 9, "deviceType": "MFH06_432",
             "properties": {"channelNr": 2}},
            {"subnet": 2, "deviceId": 1, "serialNr": "  ", "deviceType": "NOT_A_MODEL"}
        ]"#;

        let configs = load_configurations(json).unwrap();
        assert_eq!(configs.len(), 3);
        assert_eq!(configs[0].serial_nr(), "relay-a");
        assert_eq!(configs[1].channel_nr().unwrap(), Some(2));
        assert_eq!(configs[2].serial_nr(), "2001");
        assert_eq!(configs[2].device_type(), DeviceType::Invalid);
    }

    #[test]
    fn load_rejects_malformed_json() {
        assert!(matches!(
            load_configurations("{not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
