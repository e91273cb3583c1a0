//! Bidirectional packed longs.
//!
//! Free-space lists are walked in both directions without an index, so each
//! entry must be decodable from its first byte going forward and from its last
//! byte going backward. Every byte of an encoding carries 6 data bits and two
//! marker bits:
//!
//! ```text
//!   bit 7  BIDI_START  first byte of the encoding
//!   bit 6  BIDI_END    last byte of the encoding
//!   bits 0-5           data, least significant group first
//! ```
//!
//! A one-byte encoding carries both markers. Interior bytes carry neither.
//! Values must fit in 60 bits, giving encodings of 1 to 10 bytes.
//!
//! Decoding returns a [`BidiWord`]: the value in the low 60 bits and the number
//! of bytes it occupied in the top 4 bits, so a scanner knows how far to step.

use crate::def::{
    BIDI_END, BIDI_GROUP_BITS, BIDI_GROUP_MASK, BIDI_SIZE_SHIFT, BIDI_START, BIDI_VALUE_BITS,
    BIDI_VALUE_MASK, MAX_BIDI_SIZE,
};
use crate::error::{DataIoError, Result};
use crate::io::DataOutput;
use crate::slice::get_range_mut;
use log::trace;

/// A decoded bidirectional value tagged with its encoded length.
///
/// Layout: `value | (size << 60)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BidiWord(u64);

impl BidiWord {
    pub fn new(value: u64, size: usize) -> Self {
        debug_assert!(value <= BIDI_VALUE_MASK && size <= MAX_BIDI_SIZE);
        BidiWord((value & BIDI_VALUE_MASK) | ((size as u64) << BIDI_SIZE_SHIFT))
    }

    pub fn from_raw(raw: u64) -> Self {
        BidiWord(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }

    pub fn value(self) -> u64 {
        self.0 & BIDI_VALUE_MASK
    }

    /// Number of bytes the encoding occupies.
    pub fn size(self) -> usize {
        (self.0 >> BIDI_SIZE_SHIFT) as usize
    }
}

impl From<BidiWord> for u64 {
    fn from(word: BidiWord) -> Self {
        word.raw()
    }
}

/// Number of bytes `pack_long_bidi` writes for `value`.
pub fn pack_long_bidi_size(value: u64) -> usize {
    let bits = u64::BITS - value.leading_zeros();
    (bits.div_ceil(BIDI_GROUP_BITS) as usize).max(1)
}

fn encode(value: u64, bz: &mut [u8; MAX_BIDI_SIZE]) -> Result<usize> {
    if value > BIDI_VALUE_MASK {
        return Err(DataIoError::InvalidArgument(format!(
            "bidi value {:#x} does not fit in {} bits",
            value, BIDI_VALUE_BITS
        )));
    }
    let size = pack_long_bidi_size(value);
    for (i, b) in bz.iter_mut().enumerate().take(size) {
        *b = ((value >> (BIDI_GROUP_BITS as usize * i)) & BIDI_GROUP_MASK) as u8;
    }
    bz[0] |= BIDI_START;
    bz[size - 1] |= BIDI_END;
    Ok(size)
}

/// Writes `value` at `offset`, returning the number of bytes written.
pub fn pack_long_bidi(buf: &mut [u8], offset: usize, value: u64) -> Result<usize> {
    let mut bz = [0u8; MAX_BIDI_SIZE];
    let size = encode(value, &mut bz)?;
    get_range_mut(buf, offset, size)?.copy_from_slice(&bz[..size]);
    Ok(size)
}

/// Appends `value` to `out`, returning the number of bytes written.
pub fn pack_long_bidi_to<O: DataOutput + ?Sized>(out: &mut O, value: u64) -> Result<usize> {
    let mut bz = [0u8; MAX_BIDI_SIZE];
    let size = encode(value, &mut bz)?;
    out.write_all_bytes(&bz[..size])?;
    Ok(size)
}

fn corrupted(msg: String) -> DataIoError {
    trace!("bidi decode failed: {}", msg);
    DataIoError::DataCorruption(msg)
}

/// Decodes forward from the first byte of an encoding at `offset`.
pub fn unpack_long_bidi(buf: &[u8], offset: usize) -> Result<BidiWord> {
    let mut result = 0u64;
    let mut pos = offset;
    for size in 0..MAX_BIDI_SIZE {
        let b = *buf.get(pos).ok_or_else(|| DataIoError::end_of_data(1, 0))?;
        if size == 0 && b & BIDI_START == 0 {
            return Err(corrupted(format!("no start marker at {}", pos)));
        }
        if size > 0 && b & BIDI_START != 0 {
            return Err(corrupted(format!("unexpected start marker at {}", pos)));
        }
        result |= (b as u64 & BIDI_GROUP_MASK) << (BIDI_GROUP_BITS as usize * size);
        if b & BIDI_END != 0 {
            return Ok(BidiWord::new(result, size + 1));
        }
        pos += 1;
    }
    Err(corrupted(format!(
        "encoding at {} longer than {} bytes",
        offset, MAX_BIDI_SIZE
    )))
}

/// Decodes backward from the byte just before `end`, never reading below
/// `floor`.
pub fn unpack_long_bidi_reverse(buf: &[u8], end: usize, floor: usize) -> Result<BidiWord> {
    if end > buf.len() {
        return Err(DataIoError::end_of_data(end - buf.len(), 0));
    }
    let mut result = 0u64;
    let mut pos = end;
    for size in 0..MAX_BIDI_SIZE {
        if pos <= floor {
            return Err(DataIoError::end_of_data(1, 0));
        }
        pos -= 1;
        let b = buf[pos];
        if size == 0 && b & BIDI_END == 0 {
            return Err(corrupted(format!("no end marker at {}", pos)));
        }
        if size > 0 && b & BIDI_END != 0 {
            return Err(corrupted(format!("unexpected end marker at {}", pos)));
        }
        result = (result << BIDI_GROUP_BITS) | (b as u64 & BIDI_GROUP_MASK);
        if b & BIDI_START != 0 {
            return Ok(BidiWord::new(result, size + 1));
        }
    }
    Err(corrupted(format!(
        "encoding ending at {} longer than {} bytes",
        end, MAX_BIDI_SIZE
    )))
}
