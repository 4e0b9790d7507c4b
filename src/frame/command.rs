// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    register::{self, Register},
    *,
};
use crate::error::{Error, Result};

/// Largest payload whose length fits into the byte count field.
const MAX_PAYLOAD_LEN: usize = 254;

/// The data following the register address of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Number of registers to read.
    Quantity(Quantity),
    /// New state of a coil.
    Coil(bool),
    /// Register contents to write, always an even number of bytes.
    Registers(Vec<u8>),
}

/// A request to the device.
///
/// Besides the frame content it carries the [`ResponseKind`] the device
/// will answer with. The kind is never encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    function: FunctionCode,
    address: Address,
    body: Body,
    kind: ResponseKind,
}

impl Command {
    /// Read a single register.
    #[must_use]
    pub fn read(register: &Register, kind: ResponseKind) -> Self {
        Self {
            function: register.table.read_code(),
            address: register.address,
            body: Body::Quantity(1),
            kind,
        }
    }

    /// Read all registers from `begin` up to and including `end`.
    pub fn read_range(begin: &Register, end: &Register, kind: ResponseKind) -> Result<Self> {
        if begin.table != end.table {
            return Err(Error::RegisterRange {
                begin: begin.address,
                end: end.address,
            });
        }
        Ok(Self {
            function: begin.table.read_code(),
            address: begin.address,
            body: Body::Quantity(begin.count_to(end)?),
            kind,
        })
    }

    /// Write consecutive holding registers starting at `begin`.
    pub fn write_registers(begin: &Register, payload: Vec<u8>) -> Result<Self> {
        if payload.is_empty() || payload.len() % 2 != 0 || payload.len() > MAX_PAYLOAD_LEN {
            return Err(Error::PayloadLength(payload.len()));
        }
        Ok(Self {
            function: FunctionCode::WriteMultipleRegisters,
            address: begin.address,
            body: Body::Registers(payload),
            kind: ResponseKind::Ok,
        })
    }

    /// Switch a coil on or off.
    #[must_use]
    pub fn write_coil(register: &Register, on: bool) -> Self {
        Self {
            function: FunctionCode::WriteSingleCoil,
            address: register.address,
            body: Body::Coil(on),
            kind: ResponseKind::Ok,
        }
    }

    #[must_use]
    pub const fn function(&self) -> FunctionCode {
        self.function
    }

    /// The (first) register address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    #[must_use]
    pub const fn body(&self) -> &Body {
        &self.body
    }

    /// The decode hint for the response.
    #[must_use]
    pub const fn kind(&self) -> ResponseKind {
        self.kind
    }
}

// Requests of the device library.
impl Command {
    fn span(function: FunctionCode, begin: &Register, end: &Register, kind: ResponseKind) -> Self {
        debug_assert!(begin.address <= end.address);
        Self {
            function,
            address: begin.address,
            body: Body::Quantity(end.address - begin.address + 1),
            kind,
        }
    }

    /// Rated array and battery data and the charging mode.
    #[must_use]
    pub fn rated_array_battery_charging_mode() -> Self {
        Self::span(
            FunctionCode::ReadInputRegisters,
            &register::ARRAY_RATED_VOLTAGE,
            &register::CHARGING_MODE,
            ResponseKind::RatedArrayBatteryChargingMode,
        )
    }

    #[must_use]
    pub fn rated_load() -> Self {
        Self::read(&register::LOAD_RATED_CURRENT, ResponseKind::RatedLoad)
    }

    #[must_use]
    pub fn actual_array_battery() -> Self {
        Self::span(
            FunctionCode::ReadInputRegisters,
            &register::ARRAY_ACTUAL_VOLTAGE,
            &register::BATTERY_ACTUAL_POWER_HIGH,
            ResponseKind::ActualArrayBattery,
        )
    }

    /// Actual load, battery temperature and inside temperatures.
    #[must_use]
    pub fn actual_load_temperature() -> Self {
        Self::span(
            FunctionCode::ReadInputRegisters,
            &register::LOAD_ACTUAL_VOLTAGE,
            &register::POWER_COMPONENTS_TEMPERATURE,
            ResponseKind::ActualLoadTemperature,
        )
    }

    #[must_use]
    pub fn actual_battery_soc_remote_temperature() -> Self {
        Self::span(
            FunctionCode::ReadInputRegisters,
            &register::BATTERY_ACTUAL_SOC,
            &register::REMOTE_BATTERY_ACTUAL_TEMPERATURE,
            ResponseKind::ActualBatterySocRemoteTemperature,
        )
    }

    #[must_use]
    pub fn battery_system() -> Self {
        Self::read(&register::BATTERY_SYSTEM_VOLTAGE, ResponseKind::BatterySystem)
    }

    #[must_use]
    pub fn battery_charging_discharging_status() -> Self {
        Self::span(
            FunctionCode::ReadInputRegisters,
            &register::BATTERY_STATUS,
            &register::DISCHARGING_STATUS,
            ResponseKind::BatteryChargingDischargingStatus,
        )
    }

    #[must_use]
    pub fn battery_config() -> Self {
        Self::span(
            FunctionCode::ReadHoldingRegisters,
            &register::BATTERY_TYPE,
            &register::DISCHARGING_LIMIT_VOLTAGE,
            ResponseKind::BatteryConfig,
        )
    }

    #[must_use]
    pub fn clock() -> Self {
        Self::span(
            FunctionCode::ReadHoldingRegisters,
            &register::CLOCK_SECONDS_MINUTES,
            &register::CLOCK_MONTH_YEAR,
            ResponseKind::Clock,
        )
    }

    /// Set the real time clock.
    #[must_use]
    pub fn set_clock(clock: &Clock) -> Self {
        Self {
            function: FunctionCode::WriteMultipleRegisters,
            address: register::CLOCK_SECONDS_MINUTES.address,
            body: Body::Registers(clock.to_payload().to_vec()),
            kind: ResponseKind::Ok,
        }
    }

    /// Switch the output load (manual load mode).
    #[must_use]
    pub fn load_on(on: bool) -> Self {
        Self::write_coil(&register::LOAD_ON, on)
    }

    #[must_use]
    pub fn day_min_max_voltage_statistics() -> Self {
        Self::span(
            FunctionCode::ReadInputRegisters,
            &register::DAY_MAX_ARRAY_VOLTAGE,
            &register::DAY_MIN_BATTERY_VOLTAGE,
            ResponseKind::DayMinMaxVoltageStatistics,
        )
    }

    #[must_use]
    pub fn load_energy_statistics() -> Self {
        Self::span(
            FunctionCode::ReadInputRegisters,
            &register::DAY_LOAD_ENERGY_LOW,
            &register::TOTAL_LOAD_ENERGY_HIGH,
            ResponseKind::LoadEnergyStatistics,
        )
    }

    #[must_use]
    pub fn array_energy_statistics() -> Self {
        Self::span(
            FunctionCode::ReadInputRegisters,
            &register::DAY_ARRAY_ENERGY_LOW,
            &register::TOTAL_ARRAY_ENERGY_HIGH,
            ResponseKind::ArrayEnergyStatistics,
        )
    }

    /// Read the state of a coil.
    #[must_use]
    pub fn read_coil(register: &Register) -> Self {
        Self {
            function: FunctionCode::ReadCoils,
            ..Self::read(register, ResponseKind::Switch)
        }
    }

    /// Read the state of a discrete input, e.g. [`register::IS_NIGHT`].
    #[must_use]
    pub fn read_discrete_input(register: &Register) -> Self {
        Self {
            function: FunctionCode::ReadDiscreteInputs,
            ..Self::read(register, ResponseKind::Switch)
        }
    }
}
