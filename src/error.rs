// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::{io, time::Duration};

use thiserror::Error;

use crate::{frame::ResponseKind, util::HexBytes};

/// tracer-core Error
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid buffer size
    #[error("Invalid buffer size")]
    BufferSize,
    /// The frame does not start with the fixed device id
    #[error("expected device id 0x01, but was 0x{0:0>2X}")]
    DeviceId(u8),
    /// The response kind carries no payload to decode
    #[error("no payload decoder for {0:?} responses")]
    NoDecoder(ResponseKind),
    /// The stored trailer disagrees with the recomputed checksum.
    ///
    /// Both checksums are given in wire order (low byte first).
    #[error(
        "expected checksum {}, but was {} in {}",
        HexBytes(.expected),
        HexBytes(.actual),
        HexBytes(.frame)
    )]
    Crc {
        expected: [u8; 2],
        actual: [u8; 2],
        frame: Vec<u8>,
    },
    /// The declared frame length exceeds the received bytes
    #[error("frame needs {needed} byte(s), but only {available} are left")]
    Truncated { needed: usize, available: usize },
    /// Command payloads must be non-empty and of even length
    #[error("expected an even number of payload bytes > 0, but got {0}")]
    PayloadLength(usize),
    /// Response payload is shorter than its positional layout
    #[error("expected at least {expected} payload byte(s), but got {actual}")]
    PayloadSize { expected: usize, actual: usize },
    /// Enumerated field with an unmapped code
    #[error("unknown {field} code: {code}")]
    Code { field: &'static str, code: u16 },
    /// End register lies before the begin register
    #[error("register 0x{end:0>4X} lies before 0x{begin:0>4X}")]
    RegisterRange { begin: u16, end: u16 },
    /// Clock field out of range
    #[error("clock {field} out of range: {value}")]
    ClockField { field: &'static str, value: u32 },
    /// A request is still waiting for its response
    #[error("a {0:?} request is still pending")]
    Pending(ResponseKind),
    /// The device turnaround time has not elapsed yet
    #[error("device is busy for another {0:?}")]
    GuardInterval(Duration),
    /// Transport failure
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
