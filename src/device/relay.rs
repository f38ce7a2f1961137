// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Relay bank codec, shared by every relay model regardless of channel count.

use serde::Serialize;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::DecodeError;
use crate::protocol::Packet;
use crate::types::{CommandType, DeviceType, PowerState};

use super::{Decode, track};

/// Offset of the first bitmask byte in a single channel control reply.
const CONTROL_OFFSET: usize = 4;

/// On/off state of a relay bank with N channels.
///
/// # Payload Layout
///
/// - Status / current level replies: byte `i` is the level of channel `i`
///   (1-based), zero meaning off.
/// - Single channel control replies: one bitmask byte per 8 channels starting
///   at offset 4; bit `k` of byte `b` is channel `8 * b + k + 1`.
///
/// # Examples
///
/// ```
/// use hdlbus_lib::device::RelayBank;
///
/// let bank = RelayBank::new(8);
/// assert_eq!(bank.channel_count(), 8);
/// assert_eq!(bank.channel(1), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayBank {
    channel_count: u8,
    channels: Vec<Option<PowerState>>,
}

impl RelayBank {
    /// Creates a bank with every channel unknown.
    #[must_use]
    pub fn new(channel_count: u8) -> Self {
        Self {
            channel_count,
            channels: vec![None; usize::from(channel_count)],
        }
    }

    /// Number of channels on the bank.
    #[must_use]
    pub fn channel_count(&self) -> u8 {
        self.channel_count
    }

    /// State of channel `index` (1-based), `None` if unknown or out of range.
    #[must_use]
    pub fn channel(&self, index: u8) -> Option<PowerState> {
        let slot = usize::from(index).checked_sub(1)?;
        self.channels.get(slot).copied().flatten()
    }

    /// Every channel in order, `None` where not yet reported.
    #[must_use]
    pub fn channels(&self) -> &[Option<PowerState>] {
        &self.channels
    }

    /// Channels currently on, as 1-based indices.
    #[must_use]
    pub fn channels_on(&self) -> Vec<u8> {
        (1..=self.channel_count())
            .filter(|&i| self.channel(i) == Some(PowerState::On))
            .collect()
    }

    fn apply(&mut self, states: impl IntoIterator<Item = PowerState>) -> bool {
        let mut changed = false;
        for (slot, state) in self.channels.iter_mut().zip(states) {
            changed |= track(slot, state);
        }
        changed
    }

    fn decode_levels(&mut self, packet: &Packet) -> Result<bool, DecodeError> {
        let count = self.channels.len();
        let data = packet.require(count + 1)?;
        let states: Vec<PowerState> = data[1..=count]
            .iter()
            .map(|&level| PowerState::from_level(level))
            .collect();
        Ok(self.apply(states))
    }

    fn decode_control_mask(&mut self, packet: &Packet) -> Result<bool, DecodeError> {
        let count = self.channels.len();
        let data = packet.require(CONTROL_OFFSET + count.div_ceil(8))?;
        let states: Vec<PowerState> = (0..count)
            .map(|i| {
                let mask = data[CONTROL_OFFSET + i / 8];
                PowerState::from((mask >> (i % 8)) & 1 == 1)
            })
            .collect();
        Ok(self.apply(states))
    }
}

impl Decode for RelayBank {
    fn decode(
        &mut self,
        device_type: DeviceType,
        packet: &Packet,
        sink: &dyn DiagnosticSink,
    ) -> Result<bool, DecodeError> {
        match packet.command_type() {
            command if command.is_level_report() => self.decode_levels(packet),
            CommandType::ResponseSingleChannelControl => self.decode_control_mask(packet),
            CommandType::BroadcastStatusOfScene => {
                sink.record(Diagnostic::SceneBroadcastIgnored { device_type });
                Ok(false)
            }
            command => {
                sink.record(Diagnostic::UnhandledCommand {
                    device_type,
                    command,
                });
                Ok(false)
            }
        }
    }
}
