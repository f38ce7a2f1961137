// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Message intent carried by a bus packet.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Command classification of a decoded bus message.
///
/// Only the commands that carry channel state are named; anything else the
/// framing layer hands over is kept as [`CommandType::Other`] with its raw
/// opcode so it can still be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandType {
    /// Reply to a status read: one level byte per channel.
    ResponseReadStatusOfChannels,
    /// Reply to a current-level read: one level byte per channel.
    ResponseReadCurrentLevelOfChannels,
    /// Reply to a single channel control command.
    ResponseSingleChannelControl,
    /// Scene status broadcast.
    BroadcastStatusOfScene,
    /// Reply to a floor heating status read.
    ResponseReadFloorHeatingStatus,
    /// Any other opcode.
    Other(u16),
}

impl CommandType {
    /// Returns `true` for the two commands that carry a full channel level table.
    #[must_use]
    pub const fn is_level_report(&self) -> bool {
        matches!(
            self,
            Self::ResponseReadStatusOfChannels | Self::ResponseReadCurrentLevelOfChannels
        )
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResponseReadStatusOfChannels => f.write_str("Response_Read_Status_of_Channels"),
            Self::ResponseReadCurrentLevelOfChannels => {
                f.write_str("Response_Read_Current_Level_of_Channels")
            }
            Self::ResponseSingleChannelControl => f.write_str("Response_Single_Channel_Control"),
            Self::BroadcastStatusOfScene => f.write_str("Broadcast_Status_of_Scene"),
            Self::ResponseReadFloorHeatingStatus => {
                f.write_str("Response_Read_Floor_Heating_Status")
            }
            Self::Other(opcode) => write!(f, "0x{opcode:04X}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_reports() {
        assert!(CommandType::ResponseReadStatusOfChannels.is_level_report());
        assert!(CommandType::ResponseReadCurrentLevelOfChannels.is_level_report());
        assert!(!CommandType::ResponseSingleChannelControl.is_level_report());
        assert!(!CommandType::Other(0x0031).is_level_report());
    }

    #[test]
    fn display_other_as_hex_opcode() {
        assert_eq!(CommandType::Other(0xE3E8).to_string(), "0xE3E8");
    }
}
