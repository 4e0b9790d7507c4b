// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! RTU client (master) specific functions.

use byteorder::{BigEndian, ByteOrder};

use super::*;
use crate::{
    frame::{Body, Command, ErrorResponse, Response, ResponseKind},
    util::{HexBytes, bool_to_u16_coil},
};

/// Number of bytes of the encoded command.
#[must_use]
pub fn request_len(cmd: &Command) -> usize {
    match cmd.body() {
        Body::Quantity(_) | Body::Coil(_) => REQUEST_FRAME_LEN,
        Body::Registers(data) => WRITE_HEADER_LEN + data.len() + CRC_LEN,
    }
}

/// Encode a command into `buf` and return the frame length.
pub fn encode_command(cmd: &Command, buf: &mut [u8]) -> Result<usize> {
    let len = request_len(cmd);
    let Some(buf) = buf.get_mut(..len) else {
        return Err(Error::BufferSize);
    };
    buf[0] = DEVICE_ID;
    buf[1] = cmd.function().value();
    BigEndian::write_u16(&mut buf[2..], cmd.address());
    match cmd.body() {
        Body::Quantity(quantity) => BigEndian::write_u16(&mut buf[4..], *quantity),
        Body::Coil(on) => BigEndian::write_u16(&mut buf[4..], bool_to_u16_coil(*on)),
        Body::Registers(data) => {
            let quantity = u16::try_from(data.len() / 2).map_err(|_| Error::BufferSize)?;
            let byte_count = u8::try_from(data.len()).map_err(|_| Error::BufferSize)?;
            BigEndian::write_u16(&mut buf[4..], quantity);
            buf[6] = byte_count;
            buf[WRITE_HEADER_LEN..len - CRC_LEN].copy_from_slice(data);
        }
    }
    checksum::write(buf)?;
    Ok(len)
}

/// Encode a command into a new buffer.
pub fn encode(cmd: &Command) -> Result<Vec<u8>> {
    let mut buf = vec![0; request_len(cmd)];
    encode_command(cmd, &mut buf)?;
    Ok(buf)
}

/// Splits a received buffer into responses.
///
/// Frames are decoded front to back. The first structural failure (wrong
/// device id, truncated frame or checksum mismatch) ends the pass, the
/// responses decoded so far are kept. Afterwards [`Decoder::error`] tells
/// why the pass ended early.
///
/// Read responses carry no hint of what was read, their payload is decoded
/// as `kind`, i.e. the response kind of the outstanding command.
#[derive(Debug)]
pub struct Decoder<'b> {
    buf: &'b [u8],
    pos: usize,
    kind: Option<ResponseKind>,
    error: Option<Error>,
}

impl<'b> Decoder<'b> {
    #[must_use]
    pub const fn new(buf: &'b [u8], kind: Option<ResponseKind>) -> Self {
        Self {
            buf,
            pos: 0,
            kind,
            error: None,
        }
    }

    /// Number of bytes consumed so far.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// The failure that ended the pass.
    #[must_use]
    pub const fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    fn next_frame(&mut self) -> Result<Option<Response>> {
        let buf = &self.buf[self.pos..];
        let Some(frame_len) = response_frame_len(buf)? else {
            log::debug!("Unknown function code 0x{:0>2X}, passing on {} byte(s)", buf[1], buf.len());
            self.pos = self.buf.len();
            return Ok(Some(Response::Generic(buf.to_vec())));
        };
        let frame = extract_frame(buf, frame_len)?;
        self.pos += frame_len;
        log::trace!("Received frame: {}", HexBytes(frame.raw));
        Ok(self.response(&frame))
    }

    fn response(&self, frame: &DecodedFrame<'_>) -> Option<Response> {
        if frame.is_error() {
            return Some(Response::Error(ErrorResponse::new(
                frame.fn_code,
                frame.data[0],
            )));
        }
        let function = FunctionCode::new(frame.fn_code);
        if function.is_write() {
            return Some(Response::Ok(function));
        }
        let Some((kind, decoder)) = self
            .kind
            .and_then(|kind| kind.decoder().map(|decoder| (kind, decoder)))
        else {
            log::warn!(
                "No decoder for {function} response, passing on {}",
                HexBytes(frame.raw)
            );
            return Some(Response::Generic(frame.raw.to_vec()));
        };
        if !reads_kind(function, kind) {
            log::warn!(
                "Expected {kind:?} response, but got {function} response: {}",
                HexBytes(frame.raw)
            );
            return Some(Response::Generic(frame.raw.to_vec()));
        }
        decoder(frame.payload())
            .inspect_err(|err| log::warn!("Failed to decode {kind:?} response: {err}"))
            .ok()
    }
}

/// Bit reads answer [`ResponseKind::Switch`], register reads all other kinds.
const fn reads_kind(function: FunctionCode, kind: ResponseKind) -> bool {
    match kind {
        ResponseKind::Ok => false,
        ResponseKind::Switch => matches!(
            function,
            FunctionCode::ReadCoils | FunctionCode::ReadDiscreteInputs
        ),
        _ => matches!(
            function,
            FunctionCode::ReadHoldingRegisters | FunctionCode::ReadInputRegisters
        ),
    }
}

impl Iterator for Decoder<'_> {
    type Item = Response;

    fn next(&mut self) -> Option<Response> {
        while self.error.is_none() && self.pos < self.buf.len() {
            match self.next_frame() {
                Ok(Some(rsp)) => return Some(rsp),
                Ok(None) => {}
                Err(err) => {
                    log::error!(
                        "Failed to decode response at byte {} of {}: {err}",
                        self.pos,
                        HexBytes(self.buf)
                    );
                    self.error = Some(err);
                }
            }
        }
        None
    }
}

/// Decode all responses of a received buffer.
#[must_use]
pub fn decode(buf: &[u8], kind: Option<ResponseKind>) -> Vec<Response> {
    Decoder::new(buf, kind).collect()
}
