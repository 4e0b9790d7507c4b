// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payload decoders of the read responses.

use byteorder::{BigEndian, ByteOrder};

use crate::{
    error::{Error, Result},
    frame::{register::*, *},
    util::{bits, unpack_coils},
};

pub mod checksum;
pub mod rtu;

/// Turns the payload of a read response into a [`Response`].
pub type PayloadDecoder = fn(&[u8]) -> Result<Response>;

impl ResponseKind {
    /// The payload decoder of this kind.
    ///
    /// `None` for [`ResponseKind::Ok`], acknowledgements carry no payload.
    #[must_use]
    pub const fn decoder(self) -> Option<PayloadDecoder> {
        let decoder: PayloadDecoder = match self {
            Self::Ok => return None,
            Self::Switch => switch,
            Self::RatedArrayBatteryChargingMode => rated_array_battery_charging_mode,
            Self::RatedLoad => rated_load,
            Self::ActualArrayBattery => actual_array_battery,
            Self::ActualLoadTemperature => actual_load_temperature,
            Self::ActualBatterySocRemoteTemperature => actual_battery_soc_remote_temperature,
            Self::BatterySystem => battery_system,
            Self::BatteryChargingDischargingStatus => battery_charging_discharging_status,
            Self::BatteryConfig => battery_config,
            Self::Clock => clock,
            Self::DayMinMaxVoltageStatistics => day_min_max_voltage_statistics,
            Self::LoadEnergyStatistics => load_energy_statistics,
            Self::ArrayEnergyStatistics => array_energy_statistics,
        };
        Some(decoder)
    }
}

/// Decode the payload of a read response (the bytes between the byte
/// count and the checksum) as `kind`.
pub fn decode_payload(kind: ResponseKind, payload: &[u8]) -> Result<Response> {
    let decode = kind.decoder().ok_or(Error::NoDecoder(kind))?;
    decode(payload)
}

/// Positional view of the registers `first..=last` of a payload.
struct Registers<'p> {
    first: Address,
    payload: &'p [u8],
}

impl<'p> Registers<'p> {
    fn new(first: &Register, last: &Register, payload: &'p [u8]) -> Result<Self> {
        let expected = usize::from(first.count_to(last)?) * 2;
        if payload.len() < expected {
            return Err(Error::PayloadSize {
                expected,
                actual: payload.len(),
            });
        }
        Ok(Self {
            first: first.address,
            payload,
        })
    }

    fn offset(&self, reg: &Register) -> Result<usize> {
        reg.address
            .checked_sub(self.first)
            .map(|n| usize::from(n) * 2)
            .ok_or(Error::RegisterRange {
                begin: self.first,
                end: reg.address,
            })
    }

    fn word_at(&self, offset: usize) -> Result<Word> {
        self.payload
            .get(offset..offset + 2)
            .map(BigEndian::read_u16)
            .ok_or(Error::PayloadSize {
                expected: offset + 2,
                actual: self.payload.len(),
            })
    }

    fn word(&self, reg: &Register) -> Result<Word> {
        self.word_at(self.offset(reg)?)
    }

    /// The scaled value of a 16 bit register.
    fn real(&self, reg: &Register) -> Result<f32> {
        Ok(reg.scale.apply(self.word(reg)?.into()) as f32)
    }

    /// The scaled value of a 32 bit register pair, low word first.
    fn double(&self, low: &Register) -> Result<f64> {
        debug_assert_eq!(low.shape, Shape::LowWord);
        let offset = self.offset(low)?;
        let low_word = u32::from(self.word_at(offset)?);
        let high_word = u32::from(self.word_at(offset + 2)?);
        Ok(low.scale.apply((high_word << 16) | low_word))
    }

    fn vcp(
        &self,
        voltage: &Register,
        current: &Register,
        power_low: &Register,
    ) -> Result<VoltageCurrentPower> {
        Ok(VoltageCurrentPower {
            voltage: self.real(voltage)?,
            current: self.real(current)?,
            power: self.double(power_low)?,
        })
    }

    /// Upper and lower byte of a register.
    fn bytes(&self, reg: &Register) -> Result<(u8, u8)> {
        let [high, low] = self.word(reg)?.to_be_bytes();
        Ok((high, low))
    }
}

fn switch(payload: &[u8]) -> Result<Response> {
    let mut state = [false];
    unpack_coils(payload, 1, &mut state)?;
    Ok(Response::Switch(state[0]))
}

fn rated_array_battery_charging_mode(payload: &[u8]) -> Result<Response> {
    let regs = Registers::new(&ARRAY_RATED_VOLTAGE, &CHARGING_MODE, payload)?;
    let (_, mode) = regs.bytes(&CHARGING_MODE)?;
    Ok(Response::RatedArrayBatteryChargingMode(
        RatedArrayBatteryChargingMode {
            array: regs.vcp(
                &ARRAY_RATED_VOLTAGE,
                &ARRAY_RATED_CURRENT,
                &ARRAY_RATED_POWER_LOW,
            )?,
            battery: regs.vcp(
                &BATTERY_RATED_VOLTAGE,
                &BATTERY_RATED_CURRENT,
                &BATTERY_RATED_POWER_LOW,
            )?,
            charging_mode: ChargingMode::new(mode),
        },
    ))
}

fn rated_load(payload: &[u8]) -> Result<Response> {
    let regs = Registers::new(&LOAD_RATED_CURRENT, &LOAD_RATED_CURRENT, payload)?;
    Ok(Response::RatedLoad(RatedLoad {
        current: regs.real(&LOAD_RATED_CURRENT)?,
    }))
}

fn actual_array_battery(payload: &[u8]) -> Result<Response> {
    let regs = Registers::new(&ARRAY_ACTUAL_VOLTAGE, &BATTERY_ACTUAL_POWER_HIGH, payload)?;
    Ok(Response::ActualArrayBattery(ActualArrayBattery {
        array: regs.vcp(
            &ARRAY_ACTUAL_VOLTAGE,
            &ARRAY_ACTUAL_CURRENT,
            &ARRAY_ACTUAL_POWER_LOW,
        )?,
        battery: regs.vcp(
            &BATTERY_ACTUAL_VOLTAGE,
            &BATTERY_ACTUAL_CURRENT,
            &BATTERY_ACTUAL_POWER_LOW,
        )?,
    }))
}

fn actual_load_temperature(payload: &[u8]) -> Result<Response> {
    let regs = Registers::new(&LOAD_ACTUAL_VOLTAGE, &POWER_COMPONENTS_TEMPERATURE, payload)?;
    Ok(Response::ActualLoadTemperature(ActualLoadTemperature {
        load: regs.vcp(
            &LOAD_ACTUAL_VOLTAGE,
            &LOAD_ACTUAL_CURRENT,
            &LOAD_ACTUAL_POWER_LOW,
        )?,
        battery_temperature: regs.real(&BATTERY_ACTUAL_TEMPERATURE)?,
        inside_temperature: regs.real(&INSIDE_ACTUAL_TEMPERATURE)?,
        power_components_temperature: regs.real(&POWER_COMPONENTS_TEMPERATURE)?,
    }))
}

fn actual_battery_soc_remote_temperature(payload: &[u8]) -> Result<Response> {
    let regs = Registers::new(
        &BATTERY_ACTUAL_SOC,
        &REMOTE_BATTERY_ACTUAL_TEMPERATURE,
        payload,
    )?;
    Ok(Response::ActualBatterySocRemoteTemperature(
        ActualBatterySocRemoteTemperature {
            soc: regs.word(&BATTERY_ACTUAL_SOC)?,
            remote_temperature: regs.real(&REMOTE_BATTERY_ACTUAL_TEMPERATURE)?,
        },
    ))
}

fn battery_system(payload: &[u8]) -> Result<Response> {
    let regs = Registers::new(&BATTERY_SYSTEM_VOLTAGE, &BATTERY_SYSTEM_VOLTAGE, payload)?;
    Ok(Response::BatterySystem(BatterySystem {
        voltage: regs.real(&BATTERY_SYSTEM_VOLTAGE)?,
    }))
}

fn battery_charging_discharging_status(payload: &[u8]) -> Result<Response> {
    let regs = Registers::new(&BATTERY_STATUS, &DISCHARGING_STATUS, payload)?;
    let battery = regs.word(&BATTERY_STATUS)?;
    let charging = regs.word(&CHARGING_STATUS)?;
    let discharging = regs.word(&DISCHARGING_STATUS)?;
    let flag = |word, bit| bits(word, bit, bit) != 0;
    Ok(Response::BatteryChargingDischargingStatus(
        BatteryChargingDischargingStatus {
            battery: BatteryStatus {
                voltage: BatteryVoltage::try_from(bits(battery, 0, 3))?,
                temperature: BatteryTemperature::try_from(bits(battery, 4, 7))?,
                inner_resistance_fault: flag(battery, 8),
                wrong_system_voltage: flag(battery, 15),
            },
            charging: ChargingStatus {
                running: flag(charging, 0),
                fault: flag(charging, 1),
                phase: ChargingPhase::from_bits(bits(charging, 2, 3)),
                input_short_circuit: flag(charging, 4),
                mosfet_short_circuit: flag(charging, 7),
                load_short_circuit: flag(charging, 8),
                load_over_current: flag(charging, 9),
                input_over_current: flag(charging, 10),
                anti_reverse_mosfet_short_circuit: flag(charging, 11),
                charging_or_anti_reverse_mosfet_short_circuit: flag(charging, 12),
                charging_mosfet_short_circuit: flag(charging, 13),
                input_voltage: ChargingInputVoltage::from_bits(bits(charging, 14, 15)),
            },
            discharging: DischargingStatus {
                running: flag(discharging, 0),
                fault: flag(discharging, 1),
                output_over_voltage: flag(discharging, 4),
                boost_over_voltage: flag(discharging, 5),
                high_voltage_side_short_circuit: flag(discharging, 6),
                input_over_voltage: flag(discharging, 7),
                output_voltage_abnormal: flag(discharging, 8),
                unable_to_stop_discharging: flag(discharging, 9),
                unable_to_discharge: flag(discharging, 10),
                short_circuit: flag(discharging, 11),
                output_power: OutputPower::from_bits(bits(discharging, 12, 13)),
                input_voltage: DischargingInputVoltage::from_bits(bits(discharging, 14, 15)),
            },
        },
    ))
}

fn battery_config(payload: &[u8]) -> Result<Response> {
    let regs = Registers::new(&BATTERY_TYPE, &DISCHARGING_LIMIT_VOLTAGE, payload)?;
    Ok(Response::BatteryConfig(BatteryConfig {
        battery_type: BatteryType::try_from(regs.word(&BATTERY_TYPE)?)?,
        capacity: regs.word(&BATTERY_CAPACITY)?,
        temperature_compensation: regs.real(&TEMPERATURE_COMPENSATION)?,
        high_voltage_disconnect: regs.real(&HIGH_VOLTAGE_DISCONNECT)?,
        charging_limit_voltage: regs.real(&CHARGING_LIMIT_VOLTAGE)?,
        over_voltage_reconnect: regs.real(&OVER_VOLTAGE_RECONNECT)?,
        equalization_voltage: regs.real(&EQUALIZATION_VOLTAGE)?,
        boost_voltage: regs.real(&BOOST_VOLTAGE)?,
        float_voltage: regs.real(&FLOAT_VOLTAGE)?,
        boost_reconnect_voltage: regs.real(&BOOST_RECONNECT_VOLTAGE)?,
        low_voltage_reconnect: regs.real(&LOW_VOLTAGE_RECONNECT)?,
        under_voltage_recover: regs.real(&UNDER_VOLTAGE_RECOVER)?,
        under_voltage_warning: regs.real(&UNDER_VOLTAGE_WARNING)?,
        low_voltage_disconnect: regs.real(&LOW_VOLTAGE_DISCONNECT)?,
        discharging_limit_voltage: regs.real(&DISCHARGING_LIMIT_VOLTAGE)?,
    }))
}

fn clock(payload: &[u8]) -> Result<Response> {
    let regs = Registers::new(&CLOCK_SECONDS_MINUTES, &CLOCK_MONTH_YEAR, payload)?;
    let (minute, second) = regs.bytes(&CLOCK_SECONDS_MINUTES)?;
    let (day, hour) = regs.bytes(&CLOCK_HOUR_DAY)?;
    let (year, month) = regs.bytes(&CLOCK_MONTH_YEAR)?;
    Ok(Response::Clock(Clock {
        second,
        minute,
        hour,
        day,
        month,
        year,
    }))
}

fn day_min_max_voltage_statistics(payload: &[u8]) -> Result<Response> {
    let regs = Registers::new(&DAY_MAX_ARRAY_VOLTAGE, &DAY_MIN_BATTERY_VOLTAGE, payload)?;
    Ok(Response::DayMinMaxVoltageStatistics(
        DayMinMaxVoltageStatistics {
            max_array_voltage: regs.real(&DAY_MAX_ARRAY_VOLTAGE)?,
            min_array_voltage: regs.real(&DAY_MIN_ARRAY_VOLTAGE)?,
            max_battery_voltage: regs.real(&DAY_MAX_BATTERY_VOLTAGE)?,
            min_battery_voltage: regs.real(&DAY_MIN_BATTERY_VOLTAGE)?,
        },
    ))
}

fn load_energy_statistics(payload: &[u8]) -> Result<Response> {
    let regs = Registers::new(&DAY_LOAD_ENERGY_LOW, &TOTAL_LOAD_ENERGY_HIGH, payload)?;
    Ok(Response::LoadEnergyStatistics(EnergyStatistics {
        day: regs.double(&DAY_LOAD_ENERGY_LOW)?,
        month: regs.double(&MONTH_LOAD_ENERGY_LOW)?,
        year: regs.double(&YEAR_LOAD_ENERGY_LOW)?,
        total: regs.double(&TOTAL_LOAD_ENERGY_LOW)?,
    }))
}

fn array_energy_statistics(payload: &[u8]) -> Result<Response> {
    let regs = Registers::new(&DAY_ARRAY_ENERGY_LOW, &TOTAL_ARRAY_ENERGY_HIGH, payload)?;
    Ok(Response::ArrayEnergyStatistics(EnergyStatistics {
        day: regs.double(&DAY_ARRAY_ENERGY_LOW)?,
        month: regs.double(&MONTH_ARRAY_ENERGY_LOW)?,
        year: regs.double(&YEAR_ARRAY_ENERGY_LOW)?,
        total: regs.double(&TOTAL_ARRAY_ENERGY_LOW)?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_read_kind_has_a_decoder() {
        assert!(ResponseKind::Ok.decoder().is_none());
        assert!(matches!(
            decode_payload(ResponseKind::Ok, &[]),
            Err(Error::NoDecoder(ResponseKind::Ok))
        ));
        assert!(ResponseKind::Clock.decoder().is_some());
        assert!(ResponseKind::Switch.decoder().is_some());
    }

    #[test]
    fn switch() {
        assert_eq!(
            decode_payload(ResponseKind::Switch, &[0b_0000_0001]).unwrap(),
            Response::Switch(true)
        );
        assert_eq!(
            decode_payload(ResponseKind::Switch, &[0b_0000_0010]).unwrap(),
            Response::Switch(false)
        );
        assert!(matches!(
            decode_payload(ResponseKind::Switch, &[]),
            Err(Error::BufferSize)
        ));
    }

    #[test]
    fn battery_system() {
        let payload = &[0x0B, 0xB8]; // 3000
        assert_eq!(
            decode_payload(ResponseKind::BatterySystem, payload).unwrap(),
            Response::BatterySystem(BatterySystem { voltage: 30.0 })
        );
    }

    #[test]
    fn rated_load() {
        let payload = &[0x03, 0xE8]; // 1000
        assert_eq!(
            decode_payload(ResponseKind::RatedLoad, payload).unwrap(),
            Response::RatedLoad(RatedLoad { current: 10.0 })
        );
    }

    #[test]
    fn register_before_the_first_one() {
        let regs = Registers::new(&BATTERY_STATUS, &DISCHARGING_STATUS, &[0; 6]).unwrap();
        assert_eq!(regs.word(&DISCHARGING_STATUS).unwrap(), 0);
        assert!(matches!(
            regs.word(&BATTERY_SYSTEM_VOLTAGE),
            Err(Error::RegisterRange {
                begin: 0x3200,
                end: 0x311D
            })
        ));
        assert!(matches!(
            regs.double(&DAY_LOAD_ENERGY_LOW),
            Err(Error::PayloadSize { .. })
        ));
    }

    #[test]
    fn payload_too_short() {
        assert!(matches!(
            decode_payload(ResponseKind::ActualArrayBattery, &[0; 15]),
            Err(Error::PayloadSize {
                expected: 16,
                actual: 15
            })
        ));
        assert!(matches!(
            decode_payload(ResponseKind::BatterySystem, &[]),
            Err(Error::PayloadSize {
                expected: 2,
                actual: 0
            })
        ));
    }

    #[test]
    fn actual_array_battery() {
        let payload: &[u8] = &[
            0x09, 0x60, // array voltage: 24.00
            0x00, 0x96, // array current: 1.50
            0x0E, 0x10, // array power low
            0x00, 0x00, // array power high: 36.00
            0x05, 0x14, // battery voltage: 13.00
            0x01, 0x2C, // battery current: 3.00
            0x86, 0xA0, // battery power low
            0x00, 0x01, // battery power high: 1000.00
        ];
        let Response::ActualArrayBattery(rsp) =
            decode_payload(ResponseKind::ActualArrayBattery, payload).unwrap()
        else {
            panic!("unexpected response");
        };
        assert_eq!(rsp.array.voltage, 24.0);
        assert_eq!(rsp.array.current, 1.5);
        assert_eq!(rsp.array.power, 36.0);
        assert_eq!(rsp.battery.voltage, 13.0);
        assert_eq!(rsp.battery.current, 3.0);
        assert_eq!(rsp.battery.power, 1000.0);
    }

    #[test]
    fn rated_array_battery_charging_mode() {
        let mut payload = vec![0; 18];
        payload[0..2].copy_from_slice(&[0x27, 0x10]); // array voltage: 100.00
        payload[16..18].copy_from_slice(&[0x00, 0x02]); // MPPT
        let Response::RatedArrayBatteryChargingMode(rsp) =
            decode_payload(ResponseKind::RatedArrayBatteryChargingMode, &payload).unwrap()
        else {
            panic!("unexpected response");
        };
        assert_eq!(rsp.array.voltage, 100.0);
        assert_eq!(rsp.charging_mode, Some(ChargingMode::Mppt));

        payload[17] = 7;
        let Response::RatedArrayBatteryChargingMode(rsp) =
            decode_payload(ResponseKind::RatedArrayBatteryChargingMode, &payload).unwrap()
        else {
            panic!("unexpected response");
        };
        assert_eq!(rsp.charging_mode, None);
    }

    #[test]
    fn actual_load_temperature() {
        let payload: &[u8] = &[
            0x05, 0x00, // load voltage: 12.80
            0x00, 0x64, // load current: 1.00
            0x05, 0x00, // load power low
            0x00, 0x00, // load power high: 12.80
            0x09, 0xC4, // battery temperature: 25.00
            0x0A, 0x28, // inside temperature: 26.00
            0x0A, 0x8C, // power components temperature: 27.00
        ];
        assert_eq!(
            decode_payload(ResponseKind::ActualLoadTemperature, payload).unwrap(),
            Response::ActualLoadTemperature(ActualLoadTemperature {
                load: VoltageCurrentPower {
                    voltage: 12.8,
                    current: 1.0,
                    power: 12.8,
                },
                battery_temperature: 25.0,
                inside_temperature: 26.0,
                power_components_temperature: 27.0,
            })
        );
    }

    #[test]
    fn actual_battery_soc_remote_temperature() {
        let payload = &[0x00, 0x55, 0x07, 0xD0];
        assert_eq!(
            decode_payload(ResponseKind::ActualBatterySocRemoteTemperature, payload).unwrap(),
            Response::ActualBatterySocRemoteTemperature(ActualBatterySocRemoteTemperature {
                soc: 85,
                remote_temperature: 20.0,
            })
        );
    }

    #[test]
    fn battery_charging_discharging_status() {
        let payload: &[u8] = &[
            0x01, 0x12, // battery: under voltage, over temperature, inner resistance fault
            0x40, 0x09, // charging: running, boost, input disconnected
            0x20, 0x01, // discharging: running, rated output power
        ];
        let Response::BatteryChargingDischargingStatus(rsp) =
            decode_payload(ResponseKind::BatteryChargingDischargingStatus, payload).unwrap()
        else {
            panic!("unexpected response");
        };
        assert_eq!(rsp.battery.voltage, BatteryVoltage::Under);
        assert_eq!(rsp.battery.temperature, BatteryTemperature::Over);
        assert!(rsp.battery.inner_resistance_fault);
        assert!(!rsp.battery.wrong_system_voltage);
        assert!(rsp.charging.running);
        assert!(!rsp.charging.fault);
        assert_eq!(rsp.charging.phase, ChargingPhase::Boost);
        assert_eq!(rsp.charging.input_voltage, ChargingInputVoltage::Disconnected);
        assert!(rsp.discharging.running);
        assert_eq!(rsp.discharging.output_power, OutputPower::Rated);
        assert_eq!(rsp.discharging.input_voltage, DischargingInputVoltage::Normal);
        assert!(rsp.is_output_load_on());
    }

    #[test]
    fn battery_status_with_unknown_voltage_code() {
        let payload = &[0x00, 0x05, 0x00, 0x00, 0x00, 0x00];
        assert!(matches!(
            decode_payload(ResponseKind::BatteryChargingDischargingStatus, payload),
            Err(Error::Code {
                field: "battery voltage",
                code: 5
            })
        ));
    }

    #[test]
    fn battery_config() {
        let mut payload = vec![0; 30];
        payload[0..2].copy_from_slice(&[0x00, 0x02]); // GEL
        payload[2..4].copy_from_slice(&[0x00, 0xC8]); // 200 Ah
        payload[4..6].copy_from_slice(&[0x01, 0xF4]); // 5.00
        payload[28..30].copy_from_slice(&[0x04, 0x4C]); // 11.00
        let Response::BatteryConfig(rsp) =
            decode_payload(ResponseKind::BatteryConfig, &payload).unwrap()
        else {
            panic!("unexpected response");
        };
        assert_eq!(rsp.battery_type, BatteryType::Gel);
        assert_eq!(rsp.capacity, 200);
        assert_eq!(rsp.temperature_compensation, 5.0);
        assert_eq!(rsp.discharging_limit_voltage, 11.0);

        payload[1] = 4;
        assert!(matches!(
            decode_payload(ResponseKind::BatteryConfig, &payload),
            Err(Error::Code {
                field: "battery type",
                code: 4
            })
        ));
    }

    #[test]
    fn clock() {
        let clock = Clock::new(2025, 6, 15, 14, 30, 45).unwrap();
        assert_eq!(
            decode_payload(ResponseKind::Clock, &clock.to_payload()).unwrap(),
            Response::Clock(clock)
        );
        let payload = &[0x3B, 0x3A, 0x1F, 0x17, 0x18, 0x0C];
        let Response::Clock(clock) = decode_payload(ResponseKind::Clock, payload).unwrap() else {
            panic!("unexpected response");
        };
        assert_eq!(clock.to_string(), "2024-12-31 23:59:58");
    }

    #[test]
    fn day_min_max_voltage_statistics() {
        let payload = &[0x0F, 0xA0, 0x00, 0x00, 0x05, 0xDC, 0x04, 0xB0];
        assert_eq!(
            decode_payload(ResponseKind::DayMinMaxVoltageStatistics, payload).unwrap(),
            Response::DayMinMaxVoltageStatistics(DayMinMaxVoltageStatistics {
                max_array_voltage: 40.0,
                min_array_voltage: 0.0,
                max_battery_voltage: 15.0,
                min_battery_voltage: 12.0,
            })
        );
    }

    #[test]
    fn energy_statistics() {
        let payload: &[u8] = &[
            0x00, 0x64, 0x00, 0x00, // day: 1.00
            0x27, 0x10, 0x00, 0x00, // month: 100.00
            0x00, 0x00, 0x00, 0x01, // year: 655.36
            0xFF, 0xFF, 0xFF, 0xFF, // total: 42949672.95
        ];
        let expected = EnergyStatistics {
            day: 1.0,
            month: 100.0,
            year: 655.36,
            total: 42_949_672.95,
        };
        assert_eq!(
            decode_payload(ResponseKind::LoadEnergyStatistics, payload).unwrap(),
            Response::LoadEnergyStatistics(expected)
        );
        assert_eq!(
            decode_payload(ResponseKind::ArrayEnergyStatistics, payload).unwrap(),
            Response::ArrayEnergyStatistics(expected)
        );
    }
}
