// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

#![doc = include_str!("../README.md")]

mod codec;
mod config;
mod error;
mod frame;
mod session;
mod util;

pub use codec::rtu;
pub use codec::{PayloadDecoder, checksum, decode_payload};
pub use config::*;
pub use error::*;
pub use frame::*;
pub use session::*;
pub use util::{HexBytes, bits};
