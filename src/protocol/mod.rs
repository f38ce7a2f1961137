// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bus message shape consumed by the decode engine.
//!
//! Transport, framing and checksum validation happen upstream. This module
//! only defines the already-decoded [`Packet`] and the serial number rules
//! used to match packets to devices.

mod packet;
mod serial;

pub use packet::Packet;
pub use serial::{derive_serial_nr, normalize_serial_nr, serial_nr_matches};
