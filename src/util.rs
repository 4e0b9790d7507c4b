//! Common helpers

use std::fmt;

use super::*;

/// Turn a bool into a u16 coil value
#[must_use]
pub const fn bool_to_u16_coil(state: bool) -> u16 {
    if state { 0xFF00 } else { 0x0000 }
}

///  Unpack coils from a byte array.
pub fn unpack_coils(bytes: &[u8], count: u16, coils: &mut [bool]) -> Result<()> {
    if coils.len() < count as usize || bytes.len() * 8 < count as usize {
        return Err(Error::BufferSize);
    }
    (0..count).for_each(|i| {
        coils[i as usize] = (bytes[(i / 8u16) as usize] >> (i % 8)) & 0b1 > 0;
    });
    Ok(())
}

/// Extract the inclusive bit range `start..=end` of a word.
#[must_use]
pub const fn bits(word: u16, start: u8, end: u8) -> u16 {
    debug_assert!(start <= end && end < 16);
    let count = end - start + 1;
    let mask = if count >= 16 {
        u16::MAX
    } else {
        (1u16 << count) - 1
    };
    (word >> start) & mask
}

/// Renders bytes as space separated upper case hex pairs.
#[derive(Debug, Clone, Copy)]
pub struct HexBytes<'a>(pub &'a [u8]);

impl fmt::Display for HexBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{b:02X}")?;
        }
        Ok(())
    }
}
