// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! RTU framing of the charge controller.

use super::checksum::{self, CRC_LEN};
use crate::{
    error::{Error, Result},
    frame::{DEVICE_ID, ERROR_FLAG, FunctionCode},
};

pub mod client;

pub use self::client::*;

/// Position of the function code.
const FN_CODE_INDEX: usize = 1;
/// Position of the byte count of a read response.
const DATA_SIZE_INDEX: usize = 2;
/// Position of the payload of a read response.
const DATA_INDEX: usize = 3;

/// Device id, function code, error code and checksum.
pub const ERROR_FRAME_LEN: usize = 5;
/// Device id, function code, address, quantity (or coil value) and checksum.
pub const ACK_FRAME_LEN: usize = 8;
/// Length of a read request and of a write coil request.
pub const REQUEST_FRAME_LEN: usize = 8;
/// Header of a write multiple registers request, the byte count included.
pub const WRITE_HEADER_LEN: usize = 7;

/// An extracted response frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedFrame<'a> {
    pub fn_code: u8,
    /// Bytes between the function code and the checksum.
    pub data: &'a [u8],
    /// The whole frame.
    pub raw: &'a [u8],
}

impl<'a> DecodedFrame<'a> {
    /// The device reported an error.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.fn_code & ERROR_FLAG != 0
    }

    /// Payload of a read response, without the byte count.
    #[must_use]
    pub fn payload(&self) -> &'a [u8] {
        self.data.get(1..).unwrap_or_default()
    }
}

/// Length of the response frame at the start of `buf`.
///
/// Returns `None` for a function code without a known frame layout: such a
/// frame extends to the end of the buffer.
pub fn response_frame_len(buf: &[u8]) -> Result<Option<usize>> {
    let Some(&device_id) = buf.first() else {
        return Err(Error::BufferSize);
    };
    if device_id != DEVICE_ID {
        return Err(Error::DeviceId(device_id));
    }
    let Some(&fn_code) = buf.get(FN_CODE_INDEX) else {
        return Err(Error::Truncated {
            needed: FN_CODE_INDEX + 1,
            available: buf.len(),
        });
    };
    let function = FunctionCode::new(fn_code);
    let len = if fn_code & ERROR_FLAG != 0 {
        ERROR_FRAME_LEN
    } else if function.is_write() {
        ACK_FRAME_LEN
    } else if function.is_read() {
        let Some(&byte_count) = buf.get(DATA_SIZE_INDEX) else {
            return Err(Error::Truncated {
                needed: DATA_INDEX,
                available: buf.len(),
            });
        };
        DATA_INDEX + usize::from(byte_count) + CRC_LEN
    } else {
        return Ok(None);
    };
    if len > buf.len() {
        return Err(Error::Truncated {
            needed: len,
            available: buf.len(),
        });
    }
    Ok(Some(len))
}

/// Extract a frame of `frame_len` bytes out of a buffer and verify its checksum.
pub fn extract_frame(buf: &[u8], frame_len: usize) -> Result<DecodedFrame<'_>> {
    if frame_len < FN_CODE_INDEX + 1 + CRC_LEN {
        return Err(Error::BufferSize);
    }
    let Some(raw) = buf.get(..frame_len) else {
        return Err(Error::Truncated {
            needed: frame_len,
            available: buf.len(),
        });
    };
    checksum::verify(raw)?;
    Ok(DecodedFrame {
        fn_code: raw[FN_CODE_INDEX],
        data: &raw[FN_CODE_INDEX + 1..frame_len - CRC_LEN],
        raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_len_of_error_response() {
        let buf = &[0x01, 0x84, 0x02, 0xC2, 0xC1];
        assert_eq!(response_frame_len(buf).unwrap(), Some(5));
        // custom function codes may fail as well
        let buf = &[0x01, 0xAB, 0x01, 0x00, 0x00];
        assert_eq!(response_frame_len(buf).unwrap(), Some(5));
    }

    #[test]
    fn frame_len_of_write_ack() {
        let buf = &[0x01, 0x05, 0x00, 0x02, 0xFF, 0x00, 0x00, 0x00, 0x01];
        assert_eq!(response_frame_len(buf).unwrap(), Some(8));
        let buf = &[0x01, 0x10, 0x90, 0x13, 0x00, 0x03, 0x00, 0x00];
        assert_eq!(response_frame_len(buf).unwrap(), Some(8));
    }

    #[test]
    fn frame_len_of_read_response() {
        let buf = &[
            0x01, // device id
            0x04, // function code
            0x02, // byte count
            0x0B, 0xB8, // payload
            0x00, 0x00, // crc
            0x01, // next frame
        ];
        assert_eq!(response_frame_len(buf).unwrap(), Some(7));
    }

    #[test]
    fn frame_len_of_unknown_function() {
        let buf = &[0x01, 0x2B, 0x0E, 0x01];
        assert_eq!(response_frame_len(buf).unwrap(), None);
        // the layout is unknown, so the length is never checked
        assert_eq!(response_frame_len(&[0x01, 0x06]).unwrap(), None);
    }

    #[test]
    fn frame_len_of_broken_frames() {
        assert!(matches!(response_frame_len(&[]), Err(Error::BufferSize)));
        assert!(matches!(
            response_frame_len(&[0x02, 0x04, 0x02]),
            Err(Error::DeviceId(0x02))
        ));
        assert!(matches!(
            response_frame_len(&[0x01]),
            Err(Error::Truncated {
                needed: 2,
                available: 1
            })
        ));
        assert!(matches!(
            response_frame_len(&[0x01, 0x03]),
            Err(Error::Truncated {
                needed: 3,
                available: 2
            })
        ));
        assert!(matches!(
            response_frame_len(&[0x01, 0x04, 0x06, 0x00, 0x00]),
            Err(Error::Truncated {
                needed: 11,
                available: 5
            })
        ));
        assert!(matches!(
            response_frame_len(&[0x01, 0x90, 0x02]),
            Err(Error::Truncated {
                needed: 5,
                available: 3
            })
        ));
    }

    #[test]
    fn extract_valid_frame() {
        let mut buf = vec![0x01, 0x04, 0x02, 0x0B, 0xB8, 0x00, 0x00];
        checksum::write(&mut buf).unwrap();
        buf.push(0x01);

        let frame = extract_frame(&buf, 7).unwrap();
        assert_eq!(frame.fn_code, 0x04);
        assert!(!frame.is_error());
        assert_eq!(frame.data, &[0x02, 0x0B, 0xB8]);
        assert_eq!(frame.payload(), &[0x0B, 0xB8]);
        assert_eq!(frame.raw, &buf[..7]);
    }

    #[test]
    fn extract_frame_with_corrupted_checksum() {
        let mut buf = vec![0x01, 0x84, 0x02, 0x00, 0x00];
        checksum::write(&mut buf).unwrap();
        buf[4] ^= 0xFF;
        assert!(matches!(extract_frame(&buf, 5), Err(Error::Crc { .. })));
        assert!(matches!(
            extract_frame(&buf, 6),
            Err(Error::Truncated {
                needed: 6,
                available: 5
            })
        ));
    }
}
