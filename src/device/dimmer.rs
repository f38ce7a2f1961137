// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dimmer bank codec.

use serde::Serialize;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::DecodeError;
use crate::protocol::Packet;
use crate::types::{CommandType, DeviceType, Dimmer};

use super::{Decode, track};

/// Number of channels on a dimmer bank.
pub const DIMMER_CHANNELS: u8 = 4;

/// Offset of the new level in a single channel control reply.
const CONTROL_LEVEL_OFFSET: usize = 2;

/// Levels of a 4-channel dimmer bank.
///
/// Status and current level replies carry one percent byte per channel at
/// offsets 1-4. A single channel control reply names the channel in byte 0
/// and its new level in byte 2.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DimmerBank {
    channels: [Option<Dimmer>; DIMMER_CHANNELS as usize],
}

impl DimmerBank {
    /// Creates a bank with every channel unknown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Level of channel `index` (1-4), `None` if unknown or out of range.
    #[must_use]
    pub fn channel(&self, index: u8) -> Option<Dimmer> {
        let slot = usize::from(index).checked_sub(1)?;
        self.channels.get(slot).copied().flatten()
    }

    /// Every channel in order.
    #[must_use]
    pub fn channels(&self) -> &[Option<Dimmer>] {
        &self.channels
    }

    fn decode_levels(&mut self, packet: &Packet) -> Result<bool, DecodeError> {
        let data = packet.require(usize::from(DIMMER_CHANNELS) + 1)?;

        let mut levels = [Dimmer::MIN; DIMMER_CHANNELS as usize];
        for (offset, level) in (1..).zip(levels.iter_mut()) {
            *level = percent_at(data, offset)?;
        }

        let mut changed = false;
        for (slot, level) in self.channels.iter_mut().zip(levels) {
            changed |= track(slot, level);
        }
        Ok(changed)
    }

    fn decode_single_channel(
        &mut self,
        device_type: DeviceType,
        packet: &Packet,
        sink: &dyn DiagnosticSink,
    ) -> Result<bool, DecodeError> {
        let data = packet.require(CONTROL_LEVEL_OFFSET + 1)?;
        let channel = data[0];
        if !(1..=DIMMER_CHANNELS).contains(&channel) {
            sink.record(Diagnostic::UnsupportedChannel {
                device_type,
                command: packet.command_type(),
                channel,
            });
            return Ok(false);
        }

        let level = percent_at(data, CONTROL_LEVEL_OFFSET)?;
        Ok(track(
            &mut self.channels[usize::from(channel - 1)],
            level,
        ))
    }
}

fn percent_at(data: &[u8], offset: usize) -> Result<Dimmer, DecodeError> {
    let value = data[offset];
    Dimmer::new(value).map_err(|_| DecodeError::InvalidPercent { offset, value })
}

impl Decode for DimmerBank {
    fn decode(
        &mut self,
        device_type: DeviceType,
        packet: &Packet,
        sink: &dyn DiagnosticSink,
    ) -> Result<bool, DecodeError> {
        match packet.command_type() {
            command if command.is_level_report() => self.decode_levels(packet),
            CommandType::ResponseSingleChannelControl => {
                self.decode_single_channel(device_type, packet, sink)
            }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;

    const TYPE: DeviceType = DeviceType::Mdt04015_433;

    fn packet(command: CommandType, data: Vec<u8>) -> Packet {
        Packet::new(TYPE, command, 1, 30, data)
    }

    fn percent(value: u8) -> Option<Dimmer> {
        Some(Dimmer::new(value).unwrap())
    }

    #[test]
    fn level_report_reads_percent_directly() {
        let mut bank = DimmerBank::new();
        let changed = bank
            .decode(
                TYPE,
                &packet(CommandType::ResponseReadStatusOfChannels, vec![4, 0, 25, 50, 100]),
                &CollectingSink::new(),
            )
            .unwrap();

        assert!(changed);
        assert_eq!(bank.channels(), &[percent(0), percent(25), percent(50), percent(100)]);
    }

    #[test]
    fn single_channel_control_updates_only_that_channel() {
        let mut bank = DimmerBank::new();
        bank.decode(
            TYPE,
            &packet(CommandType::ResponseSingleChannelControl, vec![3, 0xF8, 60]),
            &CollectingSink::new(),
        )
        .unwrap();

        assert_eq!(bank.channel(3), percent(60));
        assert_eq!(bank.channel(1), None);
        assert_eq!(bank.channel(4), None);
    }

    #[test]
    fn single_channel_control_out_of_range_is_reported() {
        let mut bank = DimmerBank::new();
        let sink = CollectingSink::new();
        let changed = bank
            .decode(
                TYPE,
                &packet(CommandType::ResponseSingleChannelControl, vec![5, 0xF8, 60]),
                &sink,
            )
            .unwrap();

        assert!(!changed);
        assert_eq!(
            sink.entries(),
            vec![Diagnostic::UnsupportedChannel {
                device_type: TYPE,
                command: CommandType::ResponseSingleChannelControl,
                channel: 5,
            }]
        );
    }

    #[test]
    fn percent_over_100_rejects_whole_frame() {
        let mut bank = DimmerBank::new();
        let result = bank.decode(
            TYPE,
            &packet(CommandType::ResponseReadStatusOfChannels, vec![4, 10, 20, 130, 40]),
            &CollectingSink::new(),
        );

        assert_eq!(
            result,
            Err(DecodeError::InvalidPercent {
                offset: 3,
                value: 130
            })
        );
        assert!(bank.channels().iter().all(Option::is_none));
    }

    #[test]
    fn short_control_payload_is_rejected() {
        let mut bank = DimmerBank::new();
        let result = bank.decode(
            TYPE,
            &packet(CommandType::ResponseSingleChannelControl, vec![1]),
            &CollectingSink::new(),
        );
        assert!(matches!(
            result,
            Err(DecodeError::ShortPayload {
                required: 3,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn unchanged_levels_report_no_change() {
        let mut bank = DimmerBank::new();
        let report = packet(CommandType::ResponseReadCurrentLevelOfChannels, vec![4, 1, 2, 3, 4]);
        let sink = CollectingSink::new();

        assert!(bank.decode(TYPE, &report, &sink).unwrap());
        assert!(!bank.decode(TYPE, &report, &sink).unwrap());
    }
}
