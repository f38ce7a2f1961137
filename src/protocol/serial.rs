// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serial number derivation and matching.
//!
//! A device is addressed on the bus by its subnet and device id. The serial
//! number combines both as `subnet * 1000 + device_id`, so subnet 1 /
//! device 23 becomes `"1023"`.

/// Derives the serial number for a bus address.
///
/// # Examples
///
/// ```
/// use hdlbus_lib::protocol::derive_serial_nr;
///
/// assert_eq!(derive_serial_nr(1, 23), "1023");
/// assert_eq!(derive_serial_nr(0, 7), "7");
/// ```
#[must_use]
pub fn derive_serial_nr(subnet: u8, device_id: u8) -> String {
    (u32::from(subnet) * 1000 + u32::from(device_id)).to_string()
}

/// Normalizes a serial number for lookup: trimmed and lowercased.
#[must_use]
pub fn normalize_serial_nr(serial_nr: &str) -> String {
    serial_nr.trim().to_lowercase()
}

/// Compares two serial numbers ignoring case and surrounding whitespace.
///
/// # Examples
///
/// ```
/// use hdlbus_lib::protocol::serial_nr_matches;
///
/// assert!(serial_nr_matches(" AB12 ", "ab12"));
/// assert!(!serial_nr_matches("AB12", "AB13"));
/// ```
#[must_use]
pub fn serial_nr_matches(a: &str, b: &str) -> bool {
    normalize_serial_nr(a) == normalize_serial_nr(b)
}
