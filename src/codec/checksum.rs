// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CRC-16/Modbus trailer of a frame.
//!
//! The functions take the whole frame including the two trailing checksum
//! bytes, which are stored low byte first.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Error, Result};

/// Number of checksum bytes at the end of a frame.
pub const CRC_LEN: usize = 2;

/// Calculate the CRC (Cyclic Redundancy Check) sum.
#[must_use]
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc = 0xFFFF;
    for x in data {
        crc ^= u16::from(*x);
        for _ in 0..8 {
            // if we followed clippy's suggestion to move out the crc >>= 1, the condition may not be met any more
            // the recommended action therefore makes no sense and it is better to allow this lint
            #[allow(clippy::branches_sharing_code)]
            if (crc & 0x0001) != 0 {
                crc >>= 1;
                crc ^= 0xA001;
            } else {
                crc >>= 1;
            }
        }
    }
    crc
}

/// The checksum of all bytes but the trailing two.
#[must_use]
pub fn generate(frame: &[u8]) -> u16 {
    crc16(&frame[..frame.len().saturating_sub(CRC_LEN)])
}

/// Overwrite the trailing two bytes with the checksum of the frame.
pub fn write(frame: &mut [u8]) -> Result<()> {
    if frame.len() < CRC_LEN {
        return Err(Error::BufferSize);
    }
    let crc = generate(frame);
    let at = frame.len() - CRC_LEN;
    LittleEndian::write_u16(&mut frame[at..], crc);
    Ok(())
}

/// Compare the trailer with the checksum of the frame.
pub fn verify(frame: &[u8]) -> Result<()> {
    if frame.len() < CRC_LEN {
        return Err(Error::BufferSize);
    }
    let at = frame.len() - CRC_LEN;
    let expected = generate(frame);
    let actual = LittleEndian::read_u16(&frame[at..]);
    if expected != actual {
        return Err(Error::Crc {
            expected: expected.to_le_bytes(),
            actual: actual.to_le_bytes(),
            frame: frame.to_vec(),
        });
    }
    Ok(())
}
