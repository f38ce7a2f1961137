// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dimmer channel level.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Dimmer channel level as a percentage (0-100).
///
/// The bus transmits the level as a raw byte that is read directly as a
/// percent; no scaling is applied.
///
/// # Examples
///
/// ```
/// use hdlbus_lib::types::Dimmer;
///
/// let dim = Dimmer::new(75).unwrap();
/// assert_eq!(dim.value(), 75);
/// assert!(Dimmer::new(101).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Dimmer(u8);

impl Dimmer {
    /// Minimum dimmer value (0%).
    pub const MIN: Self = Self(0);

    /// Maximum dimmer value (100%).
    pub const MAX: Self = Self(100);

    /// Creates a new dimmer value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: u16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Returns the percentage value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns `true` if the channel is fully off.
    #[must_use]
    pub const fn is_off(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Dimmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for Dimmer {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Dimmer> for u8 {
    fn from(dimmer: Dimmer) -> Self {
        dimmer.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimmer_valid_values() {
        for v in 0..=100 {
            assert_eq!(Dimmer::new(v).unwrap().value(), v);
        }
    }

    #[test]
    fn dimmer_invalid_value() {
        assert!(matches!(
            Dimmer::new(101),
            Err(ValueError::OutOfRange { actual: 101, .. })
        ));
    }

    #[test]
    fn dimmer_display() {
        assert_eq!(Dimmer::new(75).unwrap().to_string(), "75%");
    }

    #[test]
    fn dimmer_serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<Dimmer>("42").is_ok());
        assert!(serde_json::from_str::<Dimmer>("142").is_err());
    }
}
