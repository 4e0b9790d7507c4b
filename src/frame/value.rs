// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

use crate::error::{Error, Result};

/// Voltage (V), current (A) and power (W) of the array, battery or load.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoltageCurrentPower {
    pub voltage: f32,
    pub current: f32,
    pub power: f64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatedArrayBatteryChargingMode {
    pub array: VoltageCurrentPower,
    pub battery: VoltageCurrentPower,
    /// `None` for a code the device library does not know.
    pub charging_mode: Option<ChargingMode>,
}

/// Rated load current in A.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatedLoad {
    pub current: f32,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActualArrayBattery {
    pub array: VoltageCurrentPower,
    pub battery: VoltageCurrentPower,
}

/// Load values and temperatures in °C.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActualLoadTemperature {
    pub load: VoltageCurrentPower,
    pub battery_temperature: f32,
    pub inside_temperature: f32,
    pub power_components_temperature: f32,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActualBatterySocRemoteTemperature {
    /// Remaining battery capacity in percent.
    pub soc: u16,
    /// °C
    pub remote_temperature: f32,
}

/// Battery system voltage in V.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatterySystem {
    pub voltage: f32,
}

/// Statistics of the current day in V.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayMinMaxVoltageStatistics {
    pub max_array_voltage: f32,
    pub min_array_voltage: f32,
    pub max_battery_voltage: f32,
    pub min_battery_voltage: f32,
}

/// Consumed or generated energy in kWh.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyStatistics {
    pub day: f64,
    pub month: f64,
    pub year: f64,
    pub total: f64,
}

/// Battery settings, voltages in V.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryConfig {
    pub battery_type: BatteryType,
    /// Ah
    pub capacity: u16,
    /// mV/°C/2V
    pub temperature_compensation: f32,
    pub high_voltage_disconnect: f32,
    pub charging_limit_voltage: f32,
    pub over_voltage_reconnect: f32,
    pub equalization_voltage: f32,
    pub boost_voltage: f32,
    pub float_voltage: f32,
    pub boost_reconnect_voltage: f32,
    pub low_voltage_reconnect: f32,
    pub under_voltage_recover: f32,
    pub under_voltage_warning: f32,
    pub low_voltage_disconnect: f32,
    pub discharging_limit_voltage: f32,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatteryType {
    UserDefined,
    Sealed,
    Gel,
    Flooded,
}

/// Decodes the whole 16 bit word of the battery type register, not just
/// its first byte.
impl TryFrom<u16> for BatteryType {
    type Error = Error;

    fn try_from(code: u16) -> Result<Self> {
        let battery_type = match code {
            0 => Self::UserDefined,
            1 => Self::Sealed,
            2 => Self::Gel,
            3 => Self::Flooded,
            _ => {
                return Err(Error::Code {
                    field: "battery type",
                    code,
                });
            }
        };
        Ok(battery_type)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChargingMode {
    /// Connect/disconnect
    Direct,
    Pwm,
    Mppt,
}

impl ChargingMode {
    #[must_use]
    pub const fn new(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Direct),
            1 => Some(Self::Pwm),
            2 => Some(Self::Mppt),
            _ => None,
        }
    }
}

/// State of the battery, the charging and the discharging circuit.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryChargingDischargingStatus {
    pub battery: BatteryStatus,
    pub charging: ChargingStatus,
    pub discharging: DischargingStatus,
}

impl BatteryChargingDischargingStatus {
    /// The output load is switched on.
    #[must_use]
    pub const fn is_output_load_on(&self) -> bool {
        self.discharging.running
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryStatus {
    pub voltage: BatteryVoltage,
    pub temperature: BatteryTemperature,
    pub inner_resistance_fault: bool,
    /// The rated system voltage could not be identified.
    pub wrong_system_voltage: bool,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatteryVoltage {
    Normal,
    Over,
    Under,
    LowVoltageDisconnect,
    Fault,
}

impl TryFrom<u16> for BatteryVoltage {
    type Error = Error;

    fn try_from(code: u16) -> Result<Self> {
        Ok(match code {
            0 => Self::Normal,
            1 => Self::Over,
            2 => Self::Under,
            3 => Self::LowVoltageDisconnect,
            4 => Self::Fault,
            _ => {
                return Err(Error::Code {
                    field: "battery voltage",
                    code,
                });
            }
        })
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatteryTemperature {
    Normal,
    Over,
    Under,
}

impl TryFrom<u16> for BatteryTemperature {
    type Error = Error;

    fn try_from(code: u16) -> Result<Self> {
        Ok(match code {
            0 => Self::Normal,
            1 => Self::Over,
            2 => Self::Under,
            _ => {
                return Err(Error::Code {
                    field: "battery temperature",
                    code,
                });
            }
        })
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChargingStatus {
    pub running: bool,
    pub fault: bool,
    pub phase: ChargingPhase,
    pub input_short_circuit: bool,
    pub mosfet_short_circuit: bool,
    pub load_short_circuit: bool,
    pub load_over_current: bool,
    pub input_over_current: bool,
    pub anti_reverse_mosfet_short_circuit: bool,
    pub charging_or_anti_reverse_mosfet_short_circuit: bool,
    pub charging_mosfet_short_circuit: bool,
    pub input_voltage: ChargingInputVoltage,
}

/// All four codes of the two bit field are defined.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChargingPhase {
    Off,
    Float,
    Boost,
    Equalization,
}

impl ChargingPhase {
    pub(crate) const fn from_bits(bits: u16) -> Self {
        match bits & 0b11 {
            0 => Self::Off,
            1 => Self::Float,
            2 => Self::Boost,
            _ => Self::Equalization,
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChargingInputVoltage {
    Normal,
    Disconnected,
    Over,
    Fault,
}

impl ChargingInputVoltage {
    pub(crate) const fn from_bits(bits: u16) -> Self {
        match bits & 0b11 {
            0 => Self::Normal,
            1 => Self::Disconnected,
            2 => Self::Over,
            _ => Self::Fault,
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DischargingStatus {
    pub running: bool,
    pub fault: bool,
    pub output_over_voltage: bool,
    pub boost_over_voltage: bool,
    pub high_voltage_side_short_circuit: bool,
    pub input_over_voltage: bool,
    pub output_voltage_abnormal: bool,
    pub unable_to_stop_discharging: bool,
    pub unable_to_discharge: bool,
    pub short_circuit: bool,
    pub output_power: OutputPower,
    pub input_voltage: DischargingInputVoltage,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputPower {
    Light,
    Moderate,
    Rated,
    Overload,
}

impl OutputPower {
    pub(crate) const fn from_bits(bits: u16) -> Self {
        match bits & 0b11 {
            0 => Self::Light,
            1 => Self::Moderate,
            2 => Self::Rated,
            _ => Self::Overload,
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DischargingInputVoltage {
    Normal,
    Low,
    High,
    Fault,
}

impl DischargingInputVoltage {
    pub(crate) const fn from_bits(bits: u16) -> Self {
        match bits & 0b11 {
            0 => Self::Normal,
            1 => Self::Low,
            2 => Self::High,
            _ => Self::Fault,
        }
    }
}

/// Real time clock of the device.
///
/// The fields are kept as the device reports them, `year` counts from 2000.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Clock {
    pub second: u8,
    pub minute: u8,
    pub hour: u8,
    pub day: u8,
    pub month: u8,
    pub year: u8,
}

impl Clock {
    /// Create a validated clock, `year` is the full year (`2000..=2255`).
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Result<Self> {
        let check = |field, value: u32, range: std::ops::RangeInclusive<u32>| {
            if range.contains(&value) {
                Ok(())
            } else {
                Err(Error::ClockField { field, value })
            }
        };
        check("year", year.into(), 2000..=2255)?;
        check("month", month.into(), 1..=12)?;
        check("day", day.into(), 1..=31)?;
        check("hour", hour.into(), 0..=23)?;
        check("minute", minute.into(), 0..=59)?;
        check("second", second.into(), 0..=59)?;
        Ok(Self {
            second,
            minute,
            hour,
            day,
            month,
            year: (year - 2000) as u8,
        })
    }

    /// The full year.
    #[must_use]
    pub fn full_year(&self) -> u16 {
        2000 + u16::from(self.year)
    }

    /// Payload of the clock-set request.
    ///
    /// The device expects minute, second, day, hour, year and month,
    /// which is not the order the clock registers are read in.
    #[must_use]
    pub const fn to_payload(&self) -> [u8; 6] {
        [
            self.minute,
            self.second,
            self.day,
            self.hour,
            self.year,
            self.month,
        ]
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.full_year(),
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second
        )
    }
}

#[cfg(feature = "chrono")]
impl TryFrom<chrono::NaiveDateTime> for Clock {
    type Error = Error;

    fn try_from(dt: chrono::NaiveDateTime) -> Result<Self> {
        use chrono::{Datelike, Timelike};
        let year = u16::try_from(dt.year()).map_err(|_| Error::ClockField {
            field: "year",
            value: dt.year().unsigned_abs(),
        })?;
        Self::new(
            year,
            dt.month() as u8,
            dt.day() as u8,
            dt.hour() as u8,
            dt.minute() as u8,
            dt.second() as u8,
        )
    }
}

#[cfg(feature = "chrono")]
impl Clock {
    /// `None` if the device reports an impossible date.
    #[must_use]
    pub fn to_naive(&self) -> Option<chrono::NaiveDateTime> {
        chrono::NaiveDate::from_ymd_opt(
            i32::from(self.full_year()),
            self.month.into(),
            self.day.into(),
        )?
        .and_hms_opt(self.hour.into(), self.minute.into(), self.second.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn battery_type_codes() {
        assert_eq!(BatteryType::try_from(0).unwrap(), BatteryType::UserDefined);
        assert_eq!(BatteryType::try_from(3).unwrap(), BatteryType::Flooded);
        assert!(matches!(
            BatteryType::try_from(4),
            Err(Error::Code {
                field: "battery type",
                code: 4
            })
        ));
    }

    #[test]
    fn battery_type_uses_the_whole_word() {
        assert!(matches!(
            BatteryType::try_from(0x0100),
            Err(Error::Code {
                field: "battery type",
                code: 0x0100
            })
        ));
    }

    #[test]
    fn unknown_charging_mode_is_absent() {
        assert_eq!(ChargingMode::new(2), Some(ChargingMode::Mppt));
        assert_eq!(ChargingMode::new(3), None);
    }

    #[test]
    fn status_codes() {
        assert_eq!(BatteryVoltage::try_from(3).unwrap(), BatteryVoltage::LowVoltageDisconnect);
        assert!(BatteryVoltage::try_from(5).is_err());
        assert!(BatteryTemperature::try_from(3).is_err());
        assert_eq!(ChargingPhase::from_bits(2), ChargingPhase::Boost);
        assert_eq!(OutputPower::from_bits(3), OutputPower::Overload);
        assert_eq!(ChargingInputVoltage::from_bits(1), ChargingInputVoltage::Disconnected);
        assert_eq!(DischargingInputVoltage::from_bits(2), DischargingInputVoltage::High);
    }

    #[test]
    fn create_clock() {
        let clock = Clock::new(2024, 12, 31, 23, 59, 58).unwrap();
        assert_eq!(clock.year, 24);
        assert_eq!(clock.full_year(), 2024);
        assert_eq!(clock.to_string(), "2024-12-31 23:59:58");

        assert!(matches!(
            Clock::new(1999, 1, 1, 0, 0, 0),
            Err(Error::ClockField {
                field: "year",
                value: 1999
            })
        ));
        assert!(Clock::new(2024, 13, 1, 0, 0, 0).is_err());
        assert!(Clock::new(2024, 1, 0, 0, 0, 0).is_err());
        assert!(Clock::new(2024, 1, 1, 24, 0, 0).is_err());
        assert!(Clock::new(2024, 1, 1, 0, 60, 0).is_err());
        assert!(Clock::new(2255, 1, 1, 0, 0, 60).is_err());
    }

    #[test]
    fn clock_payload_order() {
        let clock = Clock::new(2025, 6, 15, 14, 30, 45).unwrap();
        assert_eq!(clock.to_payload(), [30, 45, 15, 14, 25, 6]);
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn clock_from_and_to_chrono() {
        let dt = chrono::NaiveDate::from_ymd_opt(2025, 6, 15)
            .unwrap()
            .and_hms_opt(14, 30, 45)
            .unwrap();
        let clock = Clock::try_from(dt).unwrap();
        assert_eq!(clock.to_payload(), [30, 45, 15, 14, 25, 6]);
        assert_eq!(clock.to_naive(), Some(dt));

        let clock = Clock {
            second: 0,
            minute: 0,
            hour: 0,
            day: 30,
            month: 2,
            year: 25,
        };
        assert_eq!(clock.to_naive(), None);
    }
}
