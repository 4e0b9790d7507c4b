// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

mod command;
pub mod register;
mod value;

pub use self::{command::*, register::Register, value::*};

/// The device id of the charge controller.
///
/// It is used for requests and expected in every response.
pub const DEVICE_ID: u8 = 1;

/// Set in the function code of an error response.
pub(crate) const ERROR_FLAG: u8 = 0x80;

/// A register address is represented by 16 bit (from `0` to `65535`).
pub type Address = u16;

/// Number of registers to process (`0` - `65535`).
pub type Quantity = u16;

/// Registers carry 16 bit words (big-endian representation).
pub type Word = u16;

/// A function code.
///
/// It is represented by an unsigned 8 bit integer.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionCode {
    /// Function Code: `01` (`0x01`).
    ReadCoils,

    /// Function Code: `02` (`0x02`).
    ReadDiscreteInputs,

    /// Function Code: `03` (`0x03`).
    ReadHoldingRegisters,

    /// Function Code: `04` (`0x04`).
    ReadInputRegisters,

    /// Function Code: `05` (`0x05`).
    WriteSingleCoil,

    /// Function Code: `16` (`0x10`).
    WriteMultipleRegisters,

    /// A function code the device library does not know.
    Custom(u8),
}

impl FunctionCode {
    /// Create a new [`FunctionCode`] with `value`.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        match value {
            0x01 => Self::ReadCoils,
            0x02 => Self::ReadDiscreteInputs,
            0x03 => Self::ReadHoldingRegisters,
            0x04 => Self::ReadInputRegisters,
            0x05 => Self::WriteSingleCoil,
            0x10 => Self::WriteMultipleRegisters,
            code => Self::Custom(code),
        }
    }

    /// Get the [`u8`] value of the current [`FunctionCode`].
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::ReadCoils => 0x01,
            Self::ReadDiscreteInputs => 0x02,
            Self::ReadHoldingRegisters => 0x03,
            Self::ReadInputRegisters => 0x04,
            Self::WriteSingleCoil => 0x05,
            Self::WriteMultipleRegisters => 0x10,
            Self::Custom(code) => code,
        }
    }

    /// Requests with this code are acknowledged by echoing the request header.
    #[must_use]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::WriteSingleCoil | Self::WriteMultipleRegisters)
    }

    /// Responses with this code carry a byte count followed by the payload.
    #[must_use]
    pub const fn is_read(self) -> bool {
        matches!(
            self,
            Self::ReadCoils
                | Self::ReadDiscreteInputs
                | Self::ReadHoldingRegisters
                | Self::ReadInputRegisters
        )
    }
}

impl From<u8> for FunctionCode {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for FunctionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadCoils => f.write_str("read coils"),
            Self::ReadDiscreteInputs => f.write_str("read discrete inputs"),
            Self::ReadHoldingRegisters => f.write_str("read holding registers"),
            Self::ReadInputRegisters => f.write_str("read input registers"),
            Self::WriteSingleCoil => f.write_str("write single coil"),
            Self::WriteMultipleRegisters => f.write_str("write multiple registers"),
            Self::Custom(code) => write!(f, "function 0x{code:0>2X}"),
        }
    }
}

/// An error reported by the device.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    IllegalFunction,
    IllegalDataAddress,
    IllegalDataValue,
    ServerDeviceFailure,
    Acknowledge,
    ServerDeviceBusy,
    NegativeAcknowledge,
    MemoryParityError,
    /// Any code outside of `0x01..=0x08`.
    Unknown(u8),
}

impl ErrorCode {
    #[must_use]
    pub const fn new(code: u8) -> Self {
        match code {
            0x01 => Self::IllegalFunction,
            0x02 => Self::IllegalDataAddress,
            0x03 => Self::IllegalDataValue,
            0x04 => Self::ServerDeviceFailure,
            0x05 => Self::Acknowledge,
            0x06 => Self::ServerDeviceBusy,
            0x07 => Self::NegativeAcknowledge,
            0x08 => Self::MemoryParityError,
            code => Self::Unknown(code),
        }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::IllegalFunction => 0x01,
            Self::IllegalDataAddress => 0x02,
            Self::IllegalDataValue => 0x03,
            Self::ServerDeviceFailure => 0x04,
            Self::Acknowledge => 0x05,
            Self::ServerDeviceBusy => 0x06,
            Self::NegativeAcknowledge => 0x07,
            Self::MemoryParityError => 0x08,
            Self::Unknown(code) => code,
        }
    }

    const fn get_name(self) -> &'static str {
        match self {
            Self::IllegalFunction => "Unknown function id",
            Self::IllegalDataAddress => "Unknown register address",
            Self::IllegalDataValue => "Invalid data value",
            Self::ServerDeviceFailure => "Unrecoverable error on device",
            Self::Acknowledge => "Processing of function started",
            Self::ServerDeviceBusy => "Device busy",
            Self::NegativeAcknowledge => "Error executing function on device",
            Self::MemoryParityError => "Read error on device",
            Self::Unknown(_) => "Unknown error code",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.get_name())
    }
}

/// A device error response.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorResponse {
    /// The requested function (error flag cleared).
    pub function: FunctionCode,
    pub code: ErrorCode,
}

impl ErrorResponse {
    /// Decode the function code and error code bytes of an error frame.
    #[must_use]
    pub const fn new(fn_code: u8, code: u8) -> Self {
        Self {
            function: FunctionCode::new(fn_code & !ERROR_FLAG),
            code: ErrorCode::new(code),
        }
    }
}

/// A decoded message received from the device.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// A write has been acknowledged.
    Ok(FunctionCode),
    /// The device rejected a request.
    Error(ErrorResponse),
    /// Raw bytes of a frame that could not be interpreted, e.g. one with an
    /// unrecognized function code.
    Generic(Vec<u8>),
    Switch(bool),
    RatedArrayBatteryChargingMode(RatedArrayBatteryChargingMode),
    RatedLoad(RatedLoad),
    ActualArrayBattery(ActualArrayBattery),
    ActualLoadTemperature(ActualLoadTemperature),
    ActualBatterySocRemoteTemperature(ActualBatterySocRemoteTemperature),
    BatterySystem(BatterySystem),
    BatteryChargingDischargingStatus(BatteryChargingDischargingStatus),
    BatteryConfig(BatteryConfig),
    Clock(Clock),
    DayMinMaxVoltageStatistics(DayMinMaxVoltageStatistics),
    LoadEnergyStatistics(EnergyStatistics),
    ArrayEnergyStatistics(EnergyStatistics),
}

/// The kind of response a command asks for.
///
/// It selects the payload decoder for the next read response.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseKind {
    /// Acknowledgement of a write.
    Ok,
    /// State of a single coil or discrete input.
    Switch,
    RatedArrayBatteryChargingMode,
    RatedLoad,
    ActualArrayBattery,
    ActualLoadTemperature,
    ActualBatterySocRemoteTemperature,
    BatterySystem,
    BatteryChargingDischargingStatus,
    BatteryConfig,
    Clock,
    DayMinMaxVoltageStatistics,
    LoadEnergyStatistics,
    ArrayEnergyStatistics,
}
