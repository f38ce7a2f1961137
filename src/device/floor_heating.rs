// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor heating controller codec.

use serde::Serialize;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::DecodeError;
use crate::protocol::Packet;
use crate::types::{CommandType, DeviceType, FloorHeatingMode, TemperatureUnit, TimerSlot};

use super::{Decode, track};

/// Payload length of a floor heating status reply.
const STATUS_LEN: usize = 9;

/// State of a single-channel floor heating controller.
///
/// The displayed current temperature is not transmitted; it is the setpoint
/// of whichever mode is active (in timer mode, the setpoint of the active
/// timer slot). Each setpoint setter refreshes it against the mode and timer
/// slot already stored, so a status reply commits unit, mode and timer slot
/// before any setpoint.
///
/// # Status Reply Layout
///
/// | Offset | Meaning                                  |
/// |--------|------------------------------------------|
/// | 0      | Channel number                           |
/// | 2      | Unit: 1 = Fahrenheit, else Celsius       |
/// | 3      | Mode: 1-5 = Normal/Day/Night/Away/Timer  |
/// | 4-7    | Normal, Day, Night, Away setpoints       |
/// | 8      | Timer slot: 1 = Night, else Day          |
///
/// # Examples
///
/// ```
/// use hdlbus_lib::device::FloorHeating;
/// use hdlbus_lib::types::FloorHeatingMode;
///
/// let mut heating = FloorHeating::new(1);
/// heating.set_mode(FloorHeatingMode::Day);
/// heating.set_day_setpoint(22.5);
/// assert_eq!(heating.current_temperature(), Some(22.5));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorHeating {
    channel_nr: u8,
    unit: Option<TemperatureUnit>,
    mode: Option<FloorHeatingMode>,
    timer: Option<TimerSlot>,
    normal_setpoint: Option<f64>,
    day_setpoint: Option<f64>,
    night_setpoint: Option<f64>,
    away_setpoint: Option<f64>,
    current_temperature: Option<f64>,
}

impl FloorHeating {
    /// Creates a controller bound to `channel_nr` with all state unknown.
    #[must_use]
    pub fn new(channel_nr: u8) -> Self {
        Self {
            channel_nr,
            unit: None,
            mode: None,
            timer: None,
            normal_setpoint: None,
            day_setpoint: None,
            night_setpoint: None,
            away_setpoint: None,
            current_temperature: None,
        }
    }

    /// Channel number packets must carry in byte 0.
    #[must_use]
    pub fn channel_nr(&self) -> u8 {
        self.channel_nr
    }

    /// Reported temperature unit.
    #[must_use]
    pub fn unit(&self) -> Option<TemperatureUnit> {
        self.unit
    }

    /// Active mode.
    #[must_use]
    pub fn mode(&self) -> Option<FloorHeatingMode> {
        self.mode
    }

    /// Active timer slot.
    #[must_use]
    pub fn timer(&self) -> Option<TimerSlot> {
        self.timer
    }

    /// Normal mode setpoint.
    #[must_use]
    pub fn normal_setpoint(&self) -> Option<f64> {
        self.normal_setpoint
    }

    /// Day mode setpoint.
    #[must_use]
    pub fn day_setpoint(&self) -> Option<f64> {
        self.day_setpoint
    }

    /// Night mode setpoint.
    #[must_use]
    pub fn night_setpoint(&self) -> Option<f64> {
        self.night_setpoint
    }

    /// Away mode setpoint.
    #[must_use]
    pub fn away_setpoint(&self) -> Option<f64> {
        self.away_setpoint
    }

    /// Setpoint of the active mode.
    #[must_use]
    pub fn current_temperature(&self) -> Option<f64> {
        self.current_temperature
    }

    /// Stores the unit. Returns `true` if it changed.
    pub fn set_unit(&mut self, unit: TemperatureUnit) -> bool {
        track(&mut self.unit, unit)
    }

    /// Stores the mode. Returns `true` if it changed.
    ///
    /// Does not touch the current temperature; that follows on the next
    /// setpoint update.
    pub fn set_mode(&mut self, mode: FloorHeatingMode) -> bool {
        track(&mut self.mode, mode)
    }

    /// Stores the timer slot. Returns `true` if it changed.
    pub fn set_timer(&mut self, timer: TimerSlot) -> bool {
        track(&mut self.timer, timer)
    }

    /// Stores the normal setpoint, refreshing the current temperature in
    /// normal mode. Returns `true` if anything changed.
    pub fn set_normal_setpoint(&mut self, value: f64) -> bool {
        let mut changed = track(&mut self.normal_setpoint, value);
        if self.mode == Some(FloorHeatingMode::Normal) {
            changed |= track(&mut self.current_temperature, value);
        }
        changed
    }

    /// Stores the day setpoint, refreshing the current temperature in day
    /// mode or in timer mode during the day slot.
    pub fn set_day_setpoint(&mut self, value: f64) -> bool {
        let mut changed = track(&mut self.day_setpoint, value);
        if self.is_active(FloorHeatingMode::Day, TimerSlot::Day) {
            changed |= track(&mut self.current_temperature, value);
        }
        changed
    }

    /// Stores the night setpoint, refreshing the current temperature in
    /// night mode or in timer mode during the night slot.
    pub fn set_night_setpoint(&mut self, value: f64) -> bool {
        let mut changed = track(&mut self.night_setpoint, value);
        if self.is_active(FloorHeatingMode::Night, TimerSlot::Night) {
            changed |= track(&mut self.current_temperature, value);
        }
        changed
    }

    /// Stores the away setpoint, refreshing the current temperature in away
    /// mode.
    pub fn set_away_setpoint(&mut self, value: f64) -> bool {
        let mut changed = track(&mut self.away_setpoint, value);
        if self.mode == Some(FloorHeatingMode::Away) {
            changed |= track(&mut self.current_temperature, value);
        }
        changed
    }

    fn is_active(&self, mode: FloorHeatingMode, slot: TimerSlot) -> bool {
        match self.mode {
            Some(FloorHeatingMode::Timer) => self.timer == Some(slot),
            current => current == Some(mode),
        }
    }

    fn decode_status(&mut self, packet: &Packet) -> Result<bool, DecodeError> {
        let data = packet.require(STATUS_LEN)?;

        let mut changed = self.set_unit(TemperatureUnit::from_byte(data[2]));
        if let Ok(mode) = FloorHeatingMode::try_from(data[3]) {
            changed |= self.set_mode(mode);
        }
        changed |= self.set_timer(TimerSlot::from_byte(data[8]));

        // Setpoints last: each one reads the mode and timer slot stored above.
        changed |= self.set_normal_setpoint(f64::from(data[4]));
        changed |= self.set_day_setpoint(f64::from(data[5]));
        changed |= self.set_night_setpoint(f64::from(data[6]));
        changed |= self.set_away_setpoint(f64::from(data[7]));
        Ok(changed)
    }
}

impl Decode for FloorHeating {
    fn decode(
        &mut self,
        device_type: DeviceType,
        packet: &Packet,
        sink: &dyn DiagnosticSink,
    ) -> Result<bool, DecodeError> {
        let channel = packet.require(1)?[0];
        if channel != self.channel_nr {
            sink.record(Diagnostic::ChannelMismatch {
                device_type,
                expected: self.channel_nr,
                actual: channel,
            });
            return Ok(false);
        }

        match packet.command_type() {
            CommandType::ResponseReadFloorHeatingStatus => self.decode_status(packet),
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

    const TYPE: DeviceType = DeviceType::Mfh06_432;

    fn status(data: Vec<u8>) -> Packet {
        Packet::new(TYPE, CommandType::ResponseReadFloorHeatingStatus, 1, 40, data)
    }

    #[test]
    fn status_reply_decodes_all_fields() {
        let mut heating = FloorHeating::new(1);
        let changed = heating
            .decode(
                TYPE,
                &status(vec![1, 0, 0, 3, 20, 22, 18, 15, 0]),
                &CollectingSink::new(),
            )
            .unwrap();

        assert!(changed);
        assert_eq!(heating.unit(), Some(TemperatureUnit::Celsius));
        assert_eq!(heating.mode(), Some(FloorHeatingMode::Night));
        assert_eq!(heating.timer(), Some(TimerSlot::Day));
        assert_eq!(heating.normal_setpoint(), Some(20.0));
        assert_eq!(heating.day_setpoint(), Some(22.0));
        assert_eq!(heating.night_setpoint(), Some(18.0));
        assert_eq!(heating.away_setpoint(), Some(15.0));
        assert_eq!(heating.current_temperature(), Some(18.0));
    }

    #[test]
    fn mode_switch_in_same_reply_drives_current_temperature() {
        let mut heating = FloorHeating::new(1);
        let sink = CollectingSink::new();

        heating
            .decode(TYPE, &status(vec![1, 0, 0, 1, 20, 23, 18, 15, 0]), &sink)
            .unwrap();
        assert_eq!(heating.current_temperature(), Some(20.0));

        // Switch to day mode; the day setpoint must win in the same reply.
        heating
            .decode(TYPE, &status(vec![1, 0, 0, 2, 20, 23, 18, 15, 0]), &sink)
            .unwrap();
        assert_eq!(heating.current_temperature(), Some(23.0));
    }

    #[test]
    fn setpoint_applied_before_mode_leaves_current_stale() {
        let mut heating = FloorHeating::new(1);
        heating.set_mode(FloorHeatingMode::Normal);
        heating.set_normal_setpoint(20.0);

        heating.set_day_setpoint(22.5);
        assert_eq!(heating.current_temperature(), Some(20.0));

        heating.set_mode(FloorHeatingMode::Day);
        assert_eq!(heating.current_temperature(), Some(20.0));

        assert!(heating.set_day_setpoint(22.5));
        assert_eq!(heating.current_temperature(), Some(22.5));
    }

    #[test]
    fn timer_mode_follows_slot() {
        let mut heating = FloorHeating::new(2);
        let sink = CollectingSink::new();

        heating
            .decode(TYPE, &status(vec![2, 0, 1, 5, 20, 23, 17, 15, 1]), &sink)
            .unwrap();
        assert_eq!(heating.unit(), Some(TemperatureUnit::Fahrenheit));
        assert_eq!(heating.timer(), Some(TimerSlot::Night));
        assert_eq!(heating.current_temperature(), Some(17.0));

        heating
            .decode(TYPE, &status(vec![2, 0, 1, 5, 20, 23, 17, 15, 0]), &sink)
            .unwrap();
        assert_eq!(heating.current_temperature(), Some(23.0));
    }

    #[test]
    fn away_mode_uses_away_setpoint() {
        let mut heating = FloorHeating::new(1);
        heating
            .decode(
                TYPE,
                &status(vec![1, 0, 0, 4, 20, 23, 17, 12, 0]),
                &CollectingSink::new(),
            )
            .unwrap();
        assert_eq!(heating.current_temperature(), Some(12.0));
    }

    #[test]
    fn unknown_mode_byte_keeps_previous_mode() {
        let mut heating = FloorHeating::new(1);
        let sink = CollectingSink::new();
        heating
            .decode(TYPE, &status(vec![1, 0, 0, 4, 20, 23, 17, 12, 0]), &sink)
            .unwrap();
        heating
            .decode(TYPE, &status(vec![1, 0, 0, 9, 20, 23, 17, 12, 0]), &sink)
            .unwrap();
        assert_eq!(heating.mode(), Some(FloorHeatingMode::Away));
    }

    #[test]
    fn identical_reply_reports_no_change() {
        let mut heating = FloorHeating::new(1);
        let sink = CollectingSink::new();
        let reply = status(vec![1, 0, 0, 2, 20, 23, 17, 12, 0]);

        assert!(heating.decode(TYPE, &reply, &sink).unwrap());
        assert!(!heating.decode(TYPE, &reply, &sink).unwrap());
    }

    #[test]
    fn other_channel_is_ignored() {
        let mut heating = FloorHeating::new(1);
        let sink = CollectingSink::new();
        let changed = heating
            .decode(TYPE, &status(vec![3, 0, 0, 2, 20, 23, 17, 12, 0]), &sink)
            .unwrap();

        assert!(!changed);
        assert_eq!(heating.mode(), None);
        assert_eq!(
            sink.entries(),
            vec![Diagnostic::ChannelMismatch {
                device_type: TYPE,
                expected: 1,
                actual: 3,
            }]
        );
    }

    #[test]
    fn short_status_is_rejected_without_mutation() {
        let mut heating = FloorHeating::new(1);
        let result = heating.decode(
            TYPE,
            &status(vec![1, 0, 0, 2, 20]),
            &CollectingSink::new(),
        );

        assert!(matches!(
            result,
            Err(DecodeError::ShortPayload {
                required: 9,
                actual: 5,
                ..
            })
        ));
        assert_eq!(heating, FloorHeating::new(1));
    }

    #[test]
    fn empty_payload_is_rejected() {
        let mut heating = FloorHeating::new(1);
        let result = heating.decode(TYPE, &status(vec![]), &CollectingSink::new());
        assert!(result.is_err());
    }

    #[test]
    fn other_commands_are_reported() {
        let mut heating = FloorHeating::new(1);
        let sink = CollectingSink::new();
        let packet = Packet::new(TYPE, CommandType::ResponseReadStatusOfChannels, 1, 40, vec![1]);

        assert!(!heating.decode(TYPE, &packet, &sink).unwrap());
        assert_eq!(
            sink.entries(),
            vec![Diagnostic::UnhandledCommand {
                device_type: TYPE,
                command: CommandType::ResponseReadStatusOfChannels,
            }]
        );
    }
}
