//! Register map of the charge controller.
//!
//! The decoders locate every field through this table: a field's payload
//! offset is its distance to the first register of the request, its scale
//! says how the raw value turns into a real value.

use super::{Address, FunctionCode, Quantity};
use crate::error::{Error, Result};

/// The data table a register belongs to.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Coils,
    DiscreteInputs,
    InputRegisters,
    HoldingRegisters,
}

impl Table {
    /// The function code reading this table.
    #[must_use]
    pub const fn read_code(self) -> FunctionCode {
        match self {
            Self::Coils => FunctionCode::ReadCoils,
            Self::DiscreteInputs => FunctionCode::ReadDiscreteInputs,
            Self::InputRegisters => FunctionCode::ReadInputRegisters,
            Self::HoldingRegisters => FunctionCode::ReadHoldingRegisters,
        }
    }
}

/// How the raw register content is laid out.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Single bit (coils and discrete inputs).
    Bit,
    /// Unsigned 16 bit value.
    Word,
    /// Low word of a 32 bit value, the high word is stored in the next register.
    LowWord,
    /// High word of a 32 bit value.
    HighWord,
    /// Independent fields packed into bit ranges.
    BitField,
    /// Small enumerated code.
    Code,
}

/// Factor between raw and real value.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scale {
    /// The raw value is the real value.
    One,
    /// The raw value is the real value times 100.
    Hundredth,
}

impl Scale {
    #[must_use]
    pub fn apply(self, raw: u32) -> f64 {
        match self {
            Self::One => f64::from(raw),
            Self::Hundredth => f64::from(raw) / 100.0,
        }
    }
}

/// A named register.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register {
    pub name: &'static str,
    pub address: Address,
    pub table: Table,
    pub shape: Shape,
    pub scale: Scale,
}

impl Register {
    const fn new(
        name: &'static str,
        address: Address,
        table: Table,
        shape: Shape,
        scale: Scale,
    ) -> Self {
        Self {
            name,
            address,
            table,
            shape,
            scale,
        }
    }

    /// Number of registers from `self` up to and including `end`.
    pub fn count_to(&self, end: &Register) -> Result<Quantity> {
        end.address
            .checked_sub(self.address)
            .and_then(|n| n.checked_add(1))
            .ok_or(Error::RegisterRange {
                begin: self.address,
                end: end.address,
            })
    }

    /// Find a register by its name.
    #[must_use]
    pub fn find(name: &str) -> Option<&'static Register> {
        REGISTERS.iter().find(|r| r.name == name)
    }

    /// Find a register of a table by its address.
    #[must_use]
    pub fn at(table: Table, address: Address) -> Option<&'static Register> {
        REGISTERS
            .iter()
            .find(|r| r.table == table && r.address == address)
    }
}

use Scale::{Hundredth, One};
use Shape::{Bit, BitField, Code, HighWord, LowWord, Word};
use Table::{Coils, DiscreteInputs, HoldingRegisters, InputRegisters};

// Coils

/// Charging on.
pub const CHARGING_ON: Register = Register::new("charging_on", 0x0000, Coils, Bit, One);
pub const MANUAL_LOAD_MODE_ON: Register =
    Register::new("manual_load_mode_on", 0x0001, Coils, Bit, One);
/// Load on while in manual load mode.
pub const LOAD_ON: Register = Register::new("load_on", 0x0002, Coils, Bit, One);
pub const DEFAULT_LOAD_ON: Register = Register::new("default_load_on", 0x0003, Coils, Bit, One);
pub const TEST_LOAD_MODE_ON: Register =
    Register::new("test_load_mode_on", 0x0005, Coils, Bit, One);
pub const FORCE_LOAD_ON: Register = Register::new("force_load_on", 0x0006, Coils, Bit, One);
pub const RESTORE_SYSTEM_DEFAULTS: Register =
    Register::new("restore_system_defaults", 0x0013, Coils, Bit, One);
/// Clearing the statistics requires root privileges on the device.
pub const CLEAR_STATISTICS: Register =
    Register::new("clear_statistics", 0x0014, Coils, Bit, One);

// Discrete inputs

/// Inside temperature is above the protection point.
pub const OVER_INSIDE_TEMPERATURE: Register =
    Register::new("over_inside_temperature", 0x2000, DiscreteInputs, Bit, One);
pub const IS_NIGHT: Register = Register::new("is_night", 0x200C, DiscreteInputs, Bit, One);

// Rated data

pub const ARRAY_RATED_VOLTAGE: Register =
    Register::new("array_rated_voltage", 0x3000, InputRegisters, Word, Hundredth);
pub const ARRAY_RATED_CURRENT: Register =
    Register::new("array_rated_current", 0x3001, InputRegisters, Word, Hundredth);
pub const ARRAY_RATED_POWER_LOW: Register =
    Register::new("array_rated_power_low", 0x3002, InputRegisters, LowWord, Hundredth);
pub const ARRAY_RATED_POWER_HIGH: Register =
    Register::new("array_rated_power_high", 0x3003, InputRegisters, HighWord, Hundredth);
pub const BATTERY_RATED_VOLTAGE: Register =
    Register::new("battery_rated_voltage", 0x3004, InputRegisters, Word, Hundredth);
pub const BATTERY_RATED_CURRENT: Register =
    Register::new("battery_rated_current", 0x3005, InputRegisters, Word, Hundredth);
pub const BATTERY_RATED_POWER_LOW: Register =
    Register::new("battery_rated_power_low", 0x3006, InputRegisters, LowWord, Hundredth);
pub const BATTERY_RATED_POWER_HIGH: Register =
    Register::new("battery_rated_power_high", 0x3007, InputRegisters, HighWord, Hundredth);
/// 0 = connect/disconnect, 1 = PWM, 2 = MPPT
pub const CHARGING_MODE: Register =
    Register::new("charging_mode", 0x3008, InputRegisters, Code, One);
pub const LOAD_RATED_CURRENT: Register =
    Register::new("load_rated_current", 0x300E, InputRegisters, Word, Hundredth);

// Real time data

pub const ARRAY_ACTUAL_VOLTAGE: Register =
    Register::new("array_actual_voltage", 0x3100, InputRegisters, Word, Hundredth);
pub const ARRAY_ACTUAL_CURRENT: Register =
    Register::new("array_actual_current", 0x3101, InputRegisters, Word, Hundredth);
pub const ARRAY_ACTUAL_POWER_LOW: Register =
    Register::new("array_actual_power_low", 0x3102, InputRegisters, LowWord, Hundredth);
pub const ARRAY_ACTUAL_POWER_HIGH: Register =
    Register::new("array_actual_power_high", 0x3103, InputRegisters, HighWord, Hundredth);
pub const BATTERY_ACTUAL_VOLTAGE: Register =
    Register::new("battery_actual_voltage", 0x3104, InputRegisters, Word, Hundredth);
pub const BATTERY_ACTUAL_CURRENT: Register =
    Register::new("battery_actual_current", 0x3105, InputRegisters, Word, Hundredth);
pub const BATTERY_ACTUAL_POWER_LOW: Register =
    Register::new("battery_actual_power_low", 0x3106, InputRegisters, LowWord, Hundredth);
pub const BATTERY_ACTUAL_POWER_HIGH: Register =
    Register::new("battery_actual_power_high", 0x3107, InputRegisters, HighWord, Hundredth);
pub const LOAD_ACTUAL_VOLTAGE: Register =
    Register::new("load_actual_voltage", 0x310C, InputRegisters, Word, Hundredth);
pub const LOAD_ACTUAL_CURRENT: Register =
    Register::new("load_actual_current", 0x310D, InputRegisters, Word, Hundredth);
pub const LOAD_ACTUAL_POWER_LOW: Register =
    Register::new("load_actual_power_low", 0x310E, InputRegisters, LowWord, Hundredth);
pub const LOAD_ACTUAL_POWER_HIGH: Register =
    Register::new("load_actual_power_high", 0x310F, InputRegisters, HighWord, Hundredth);
pub const BATTERY_ACTUAL_TEMPERATURE: Register =
    Register::new("battery_actual_temperature", 0x3110, InputRegisters, Word, Hundredth);
pub const INSIDE_ACTUAL_TEMPERATURE: Register =
    Register::new("inside_actual_temperature", 0x3111, InputRegisters, Word, Hundredth);
pub const POWER_COMPONENTS_TEMPERATURE: Register = Register::new(
    "power_components_temperature",
    0x3112,
    InputRegisters,
    Word,
    Hundredth,
);
/// Remaining battery capacity in percent.
pub const BATTERY_ACTUAL_SOC: Register =
    Register::new("battery_actual_soc", 0x311A, InputRegisters, Word, One);
pub const REMOTE_BATTERY_ACTUAL_TEMPERATURE: Register = Register::new(
    "remote_battery_actual_temperature",
    0x311B,
    InputRegisters,
    Word,
    Hundredth,
);
/// 12, 24, 36 or 48 V
pub const BATTERY_SYSTEM_VOLTAGE: Register =
    Register::new("battery_system_voltage", 0x311D, InputRegisters, Word, Hundredth);

// Status words

/// - `0..=3`: voltage
/// - `4..=7`: temperature
/// - `8`: inner resistance fault
/// - `15`: wrong identification of the system voltage
pub const BATTERY_STATUS: Register =
    Register::new("battery_status", 0x3200, InputRegisters, BitField, One);
/// - `0`: running
/// - `1`: fault
/// - `2..=3`: charging phase
/// - `4`, `7..=13`: fault flags
/// - `14..=15`: input voltage
pub const CHARGING_STATUS: Register =
    Register::new("charging_status", 0x3201, InputRegisters, BitField, One);
/// - `0`: running
/// - `1`: fault
/// - `4..=11`: fault flags
/// - `12..=13`: output power
/// - `14..=15`: input voltage
pub const DISCHARGING_STATUS: Register =
    Register::new("discharging_status", 0x3202, InputRegisters, BitField, One);

// Statistics

pub const DAY_MAX_ARRAY_VOLTAGE: Register =
    Register::new("day_max_array_voltage", 0x3300, InputRegisters, Word, Hundredth);
pub const DAY_MIN_ARRAY_VOLTAGE: Register =
    Register::new("day_min_array_voltage", 0x3301, InputRegisters, Word, Hundredth);
pub const DAY_MAX_BATTERY_VOLTAGE: Register =
    Register::new("day_max_battery_voltage", 0x3302, InputRegisters, Word, Hundredth);
pub const DAY_MIN_BATTERY_VOLTAGE: Register =
    Register::new("day_min_battery_voltage", 0x3303, InputRegisters, Word, Hundredth);
pub const DAY_LOAD_ENERGY_LOW: Register =
    Register::new("day_load_energy_low", 0x3304, InputRegisters, LowWord, Hundredth);
pub const DAY_LOAD_ENERGY_HIGH: Register =
    Register::new("day_load_energy_high", 0x3305, InputRegisters, HighWord, Hundredth);
pub const MONTH_LOAD_ENERGY_LOW: Register =
    Register::new("month_load_energy_low", 0x3306, InputRegisters, LowWord, Hundredth);
pub const MONTH_LOAD_ENERGY_HIGH: Register =
    Register::new("month_load_energy_high", 0x3307, InputRegisters, HighWord, Hundredth);
pub const YEAR_LOAD_ENERGY_LOW: Register =
    Register::new("year_load_energy_low", 0x3308, InputRegisters, LowWord, Hundredth);
pub const YEAR_LOAD_ENERGY_HIGH: Register =
    Register::new("year_load_energy_high", 0x3309, InputRegisters, HighWord, Hundredth);
pub const TOTAL_LOAD_ENERGY_LOW: Register =
    Register::new("total_load_energy_low", 0x330A, InputRegisters, LowWord, Hundredth);
pub const TOTAL_LOAD_ENERGY_HIGH: Register =
    Register::new("total_load_energy_high", 0x330B, InputRegisters, HighWord, Hundredth);
pub const DAY_ARRAY_ENERGY_LOW: Register =
    Register::new("day_array_energy_low", 0x330C, InputRegisters, LowWord, Hundredth);
pub const DAY_ARRAY_ENERGY_HIGH: Register =
    Register::new("day_array_energy_high", 0x330D, InputRegisters, HighWord, Hundredth);
pub const MONTH_ARRAY_ENERGY_LOW: Register =
    Register::new("month_array_energy_low", 0x330E, InputRegisters, LowWord, Hundredth);
pub const MONTH_ARRAY_ENERGY_HIGH: Register =
    Register::new("month_array_energy_high", 0x330F, InputRegisters, HighWord, Hundredth);
pub const YEAR_ARRAY_ENERGY_LOW: Register =
    Register::new("year_array_energy_low", 0x3310, InputRegisters, LowWord, Hundredth);
pub const YEAR_ARRAY_ENERGY_HIGH: Register =
    Register::new("year_array_energy_high", 0x3311, InputRegisters, HighWord, Hundredth);
pub const TOTAL_ARRAY_ENERGY_LOW: Register =
    Register::new("total_array_energy_low", 0x3312, InputRegisters, LowWord, Hundredth);
pub const TOTAL_ARRAY_ENERGY_HIGH: Register =
    Register::new("total_array_energy_high", 0x3313, InputRegisters, HighWord, Hundredth);

// Holding registers

/// 0 = user defined, 1 = sealed, 2 = GEL, 3 = flooded
pub const BATTERY_TYPE: Register =
    Register::new("battery_type", 0x9000, HoldingRegisters, Code, One);
/// Battery capacity in Ah.
pub const BATTERY_CAPACITY: Register =
    Register::new("battery_capacity", 0x9001, HoldingRegisters, Word, One);
/// mV/°C/2V
pub const TEMPERATURE_COMPENSATION: Register = Register::new(
    "temperature_compensation",
    0x9002,
    HoldingRegisters,
    Word,
    Hundredth,
);
pub const HIGH_VOLTAGE_DISCONNECT: Register =
    Register::new("high_voltage_disconnect", 0x9003, HoldingRegisters, Word, Hundredth);
pub const CHARGING_LIMIT_VOLTAGE: Register =
    Register::new("charging_limit_voltage", 0x9004, HoldingRegisters, Word, Hundredth);
pub const OVER_VOLTAGE_RECONNECT: Register =
    Register::new("over_voltage_reconnect", 0x9005, HoldingRegisters, Word, Hundredth);
pub const EQUALIZATION_VOLTAGE: Register =
    Register::new("equalization_voltage", 0x9006, HoldingRegisters, Word, Hundredth);
pub const BOOST_VOLTAGE: Register =
    Register::new("boost_voltage", 0x9007, HoldingRegisters, Word, Hundredth);
pub const FLOAT_VOLTAGE: Register =
    Register::new("float_voltage", 0x9008, HoldingRegisters, Word, Hundredth);
pub const BOOST_RECONNECT_VOLTAGE: Register =
    Register::new("boost_reconnect_voltage", 0x9009, HoldingRegisters, Word, Hundredth);
pub const LOW_VOLTAGE_RECONNECT: Register =
    Register::new("low_voltage_reconnect", 0x900A, HoldingRegisters, Word, Hundredth);
pub const UNDER_VOLTAGE_RECOVER: Register =
    Register::new("under_voltage_recover", 0x900B, HoldingRegisters, Word, Hundredth);
pub const UNDER_VOLTAGE_WARNING: Register =
    Register::new("under_voltage_warning", 0x900C, HoldingRegisters, Word, Hundredth);
pub const LOW_VOLTAGE_DISCONNECT: Register =
    Register::new("low_voltage_disconnect", 0x900D, HoldingRegisters, Word, Hundredth);
pub const DISCHARGING_LIMIT_VOLTAGE: Register = Register::new(
    "discharging_limit_voltage",
    0x900E,
    HoldingRegisters,
    Word,
    Hundredth,
);
/// - `0..=7`: second
/// - `8..=15`: minute
pub const CLOCK_SECONDS_MINUTES: Register =
    Register::new("clock_seconds_minutes", 0x9013, HoldingRegisters, BitField, One);
/// - `0..=7`: hour
/// - `8..=15`: day of month
pub const CLOCK_HOUR_DAY: Register =
    Register::new("clock_hour_day", 0x9014, HoldingRegisters, BitField, One);
/// - `0..=7`: month
/// - `8..=15`: year since 2000
pub const CLOCK_MONTH_YEAR: Register =
    Register::new("clock_month_year", 0x9015, HoldingRegisters, BitField, One);

/// All known registers.
pub const REGISTERS: &[Register] = &[
    CHARGING_ON,
    MANUAL_LOAD_MODE_ON,
    LOAD_ON,
    DEFAULT_LOAD_ON,
    TEST_LOAD_MODE_ON,
    FORCE_LOAD_ON,
    RESTORE_SYSTEM_DEFAULTS,
    CLEAR_STATISTICS,
    OVER_INSIDE_TEMPERATURE,
    IS_NIGHT,
    ARRAY_RATED_VOLTAGE,
    ARRAY_RATED_CURRENT,
    ARRAY_RATED_POWER_LOW,
    ARRAY_RATED_POWER_HIGH,
    BATTERY_RATED_VOLTAGE,
    BATTERY_RATED_CURRENT,
    BATTERY_RATED_POWER_LOW,
    BATTERY_RATED_POWER_HIGH,
    CHARGING_MODE,
    LOAD_RATED_CURRENT,
    ARRAY_ACTUAL_VOLTAGE,
    ARRAY_ACTUAL_CURRENT,
    ARRAY_ACTUAL_POWER_LOW,
    ARRAY_ACTUAL_POWER_HIGH,
    BATTERY_ACTUAL_VOLTAGE,
    BATTERY_ACTUAL_CURRENT,
    BATTERY_ACTUAL_POWER_LOW,
    BATTERY_ACTUAL_POWER_HIGH,
    LOAD_ACTUAL_VOLTAGE,
    LOAD_ACTUAL_CURRENT,
    LOAD_ACTUAL_POWER_LOW,
    LOAD_ACTUAL_POWER_HIGH,
    BATTERY_ACTUAL_TEMPERATURE,
    INSIDE_ACTUAL_TEMPERATURE,
    POWER_COMPONENTS_TEMPERATURE,
    BATTERY_ACTUAL_SOC,
    REMOTE_BATTERY_ACTUAL_TEMPERATURE,
    BATTERY_SYSTEM_VOLTAGE,
    BATTERY_STATUS,
    CHARGING_STATUS,
    DISCHARGING_STATUS,
    DAY_MAX_ARRAY_VOLTAGE,
    DAY_MIN_ARRAY_VOLTAGE,
    DAY_MAX_BATTERY_VOLTAGE,
    DAY_MIN_BATTERY_VOLTAGE,
    DAY_LOAD_ENERGY_LOW,
    DAY_LOAD_ENERGY_HIGH,
    MONTH_LOAD_ENERGY_LOW,
    MONTH_LOAD_ENERGY_HIGH,
    YEAR_LOAD_ENERGY_LOW,
    YEAR_LOAD_ENERGY_HIGH,
    TOTAL_LOAD_ENERGY_LOW,
    TOTAL_LOAD_ENERGY_HIGH,
    DAY_ARRAY_ENERGY_LOW,
    DAY_ARRAY_ENERGY_HIGH,
    MONTH_ARRAY_ENERGY_LOW,
    MONTH_ARRAY_ENERGY_HIGH,
    YEAR_ARRAY_ENERGY_LOW,
    YEAR_ARRAY_ENERGY_HIGH,
    TOTAL_ARRAY_ENERGY_LOW,
    TOTAL_ARRAY_ENERGY_HIGH,
    BATTERY_TYPE,
    BATTERY_CAPACITY,
    TEMPERATURE_COMPENSATION,
    HIGH_VOLTAGE_DISCONNECT,
    CHARGING_LIMIT_VOLTAGE,
    OVER_VOLTAGE_RECONNECT,
    EQUALIZATION_VOLTAGE,
    BOOST_VOLTAGE,
    FLOAT_VOLTAGE,
    BOOST_RECONNECT_VOLTAGE,
    LOW_VOLTAGE_RECONNECT,
    UNDER_VOLTAGE_RECOVER,
    UNDER_VOLTAGE_WARNING,
    LOW_VOLTAGE_DISCONNECT,
    DISCHARGING_LIMIT_VOLTAGE,
    CLOCK_SECONDS_MINUTES,
    CLOCK_HOUR_DAY,
    CLOCK_MONTH_YEAR,
];
