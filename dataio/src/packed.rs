//! Variable-length ("packed") integers.
//!
//! A value is split into 7-bit groups, most significant group first. Every
//! byte except the last has the continuation bit `0x80` set, so the final byte
//! holds the low 7 bits of the value:
//!
//! ```text
//! 100   -> 64
//! 2111  -> 90 3f
//! 1<<63 -> 81 80 80 80 80 80 80 80 80 00
//! ```
//!
//! The encoding is minimal: a value of `b` significant bits always takes
//! `max(1, ceil(b / 7))` bytes, and a 32-bit value encodes exactly like the
//! same number as a 64-bit value. Signed values are packed as their
//! two's-complement bit pattern, so any negative `i64` takes 10 bytes and any
//! negative `i32` takes 5.

use crate::def::{
    MAX_PACKED_INT_SIZE, MAX_PACKED_LONG_SIZE, PACK_CONTINUATION, PACK_GROUP_BITS, PACK_GROUP_MASK,
};
use crate::error::{DataIoError, Result};
use crate::io::{BufferInput, DataInput, DataOutput};
use crate::slice::get_range_mut;

/// Number of bytes `pack_long` emits for `value`.
#[inline]
pub fn pack_long_size(value: u64) -> usize {
    let bits = u64::BITS - value.leading_zeros();
    (bits.div_ceil(PACK_GROUP_BITS) as usize).max(1)
}

/// Number of bytes `pack_int` emits for `value`.
#[inline]
pub fn pack_int_size(value: u32) -> usize {
    pack_long_size(value as u64)
}

fn encode_long(value: u64, bz: &mut [u8; MAX_PACKED_LONG_SIZE]) -> usize {
    let size = pack_long_size(value);
    for (i, b) in bz.iter_mut().enumerate().take(size) {
        let shift = PACK_GROUP_BITS as usize * (size - 1 - i);
        *b = ((value >> shift) & PACK_GROUP_MASK) as u8;
        if i + 1 < size {
            *b |= PACK_CONTINUATION;
        }
    }
    size
}

pub fn pack_long<O: DataOutput + ?Sized>(out: &mut O, value: u64) -> Result<()> {
    let mut bz = [0u8; MAX_PACKED_LONG_SIZE];
    let size = encode_long(value, &mut bz);
    out.write_all_bytes(&bz[..size])
}

pub fn pack_int<O: DataOutput + ?Sized>(out: &mut O, value: u32) -> Result<()> {
    pack_long(out, value as u64)
}

pub fn pack_long_signed<O: DataOutput + ?Sized>(out: &mut O, value: i64) -> Result<()> {
    pack_long(out, value as u64)
}

pub fn pack_int_signed<O: DataOutput + ?Sized>(out: &mut O, value: i32) -> Result<()> {
    pack_int(out, value as u32)
}

/// Reads one packed value of at most `max_size` bytes whose result fits in
/// `width` bits.
fn unpack_bits<I: DataInput + ?Sized>(input: &mut I, max_size: usize, width: u32) -> Result<u64> {
    let mut ret = 0u64;
    for _ in 0..max_size {
        if ret >> (width - PACK_GROUP_BITS) != 0 {
            return Err(DataIoError::DataCorruption(format!(
                "packed value overflows {} bits",
                width
            )));
        }
        let b = input.read_u8()?;
        ret = (ret << PACK_GROUP_BITS) | (b as u64 & PACK_GROUP_MASK);
        if b & PACK_CONTINUATION == 0 {
            return Ok(ret);
        }
    }
    Err(DataIoError::DataCorruption(format!(
        "packed value longer than {} bytes",
        max_size
    )))
}

pub fn unpack_long<I: DataInput + ?Sized>(input: &mut I) -> Result<u64> {
    unpack_bits(input, MAX_PACKED_LONG_SIZE, u64::BITS)
}

pub fn unpack_int<I: DataInput + ?Sized>(input: &mut I) -> Result<u32> {
    Ok(unpack_bits(input, MAX_PACKED_INT_SIZE, u32::BITS)? as u32)
}

/// Skips `count` packed values without decoding them.
pub fn unpack_long_skip<I: DataInput + ?Sized>(input: &mut I, count: usize) -> Result<()> {
    for _ in 0..count {
        let mut len = 0;
        loop {
            len += 1;
            if input.read_u8()? & PACK_CONTINUATION == 0 {
                break;
            }
            if len == MAX_PACKED_LONG_SIZE {
                return Err(DataIoError::DataCorruption(format!(
                    "packed value longer than {} bytes",
                    MAX_PACKED_LONG_SIZE
                )));
            }
        }
    }
    Ok(())
}

/// Fills `dst` with consecutive packed values.
pub fn unpack_long_array<I: DataInput + ?Sized>(input: &mut I, dst: &mut [u64]) -> Result<()> {
    for v in dst.iter_mut() {
        *v = unpack_long(input)?;
    }
    Ok(())
}

/// Packs `value` into `buf` at `offset`, returning the number of bytes written.
pub fn pack_long_at(buf: &mut [u8], offset: usize, value: u64) -> Result<usize> {
    let mut bz = [0u8; MAX_PACKED_LONG_SIZE];
    let size = encode_long(value, &mut bz);
    get_range_mut(buf, offset, size)?.copy_from_slice(&bz[..size]);
    Ok(size)
}

/// Unpacks the value at `offset`, returning it with the number of bytes read.
pub fn unpack_long_at(buf: &[u8], offset: usize) -> Result<(u64, usize)> {
    let mut input = BufferInput::new(buf, offset);
    let value = unpack_long(&mut input)?;
    Ok((value, input.position() - offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{ArrayInput, ArrayOutput, StreamInput, StreamOutput};
    use std::io::Cursor;

    fn packed(value: u64) -> Vec<u8> {
        let mut out = ArrayOutput::new();
        pack_long(&mut out, value).unwrap();
        out.copy_bytes()
    }

    #[test]
    fn test_wire_format() {
        assert_eq!(packed(0), vec![0x00]);
        assert_eq!(packed(100), vec![0x64]);
        assert_eq!(packed(127), vec![0x7F]);
        assert_eq!(packed(128), vec![0x81, 0x00]);
        assert_eq!(packed(2111), vec![0x90, 0x3F]);
        assert_eq!(
            packed(1 << 63),
            vec![0x81, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x00]
        );
        assert_eq!(packed(u64::MAX).len(), 10);
    }

    #[test]
    fn test_pack_long_size() {
        assert_eq!(pack_long_size(0), 1);
        assert_eq!(pack_long_size(1), 1);
        assert_eq!(pack_long_size(1 << 7), 2);
        assert_eq!(pack_long_size((1 << 14) - 1), 2);
        assert_eq!(pack_long_size(1 << 14), 3);
        assert_eq!(pack_long_size(1 << 63), 10);
        assert_eq!(pack_int_size(u32::MAX), 5);
    }

    #[test]
    fn test_size_matches_encoding() {
        let mut i = 0u64;
        while i < u64::MAX / 3 {
            assert_eq!(packed(i).len(), pack_long_size(i));
            i = i * 3 + 1;
        }
    }

    #[test]
    fn test_pack_long() {
        let buf = vec![0u8; 20];
        let mut out = ArrayOutput::with_buf(buf);
        let mut i = 0u64;
        while i < i64::MAX as u64 {
            out.set_position(10);
            pack_long(&mut out, i).unwrap();
            let written = out.position();

            let mut input = ArrayInput::with_position(out.buf().to_vec(), 10);
            assert_eq!(unpack_long(&mut input).unwrap(), i);
            assert_eq!(input.position(), written);
            i += 1 + i / 10000;
        }
    }

    #[test]
    fn test_pack_int() {
        let mut buf = [0u8; 20];
        let mut i = 0u32;
        while i < i32::MAX as u32 {
            let written = pack_long_at(&mut buf, 10, i as u64).unwrap();
            let mut input = BufferInput::new(&buf, 10);
            assert_eq!(unpack_int(&mut input).unwrap(), i);
            assert_eq!(input.position(), 10 + written);
            i += 1 + i / 10000;
        }
    }

    #[test]
    fn test_pack_long_compat() {
        let mut out = ArrayOutput::new();
        for v in [2111u64, 100, 1111] {
            pack_long(&mut out, v).unwrap();
        }
        let bz = out.copy_bytes();

        let mut array = ArrayInput::new(bz.clone());
        let mut buffer = BufferInput::new(&bz, 0);
        let mut stream = StreamInput::new(Cursor::new(bz.clone()));
        for v in [2111u64, 100, 1111] {
            assert_eq!(unpack_long(&mut array).unwrap(), v);
            assert_eq!(unpack_long(&mut buffer).unwrap(), v);
            assert_eq!(unpack_long(&mut stream).unwrap(), v);
        }
    }

    #[test]
    fn test_pack_int_compat() {
        let mut out = StreamOutput::new(Vec::new());
        for v in [2111u32, 100, 1111] {
            pack_int(&mut out, v).unwrap();
        }
        let bz = out.into_inner();

        let mut array = ArrayInput::new(bz.clone());
        let mut buffer = BufferInput::new(&bz, 0);
        for v in [2111u32, 100, 1111] {
            assert_eq!(unpack_int(&mut array).unwrap(), v);
            assert_eq!(unpack_int(&mut buffer).unwrap(), v);
        }
    }

    #[test]
    fn test_signed_values() {
        let mut out = ArrayOutput::new();
        pack_long_signed(&mut out, -1).unwrap();
        assert_eq!(out.position(), 10);
        pack_int_signed(&mut out, -1).unwrap();
        assert_eq!(out.position(), 15);
        pack_long_signed(&mut out, i64::MIN).unwrap();

        let mut input = ArrayInput::new(out.copy_bytes());
        assert_eq!(unpack_long(&mut input).unwrap() as i64, -1);
        assert_eq!(unpack_int(&mut input).unwrap() as i32, -1);
        assert_eq!(unpack_long(&mut input).unwrap() as i64, i64::MIN);
    }

    #[test]
    fn test_pack_long_with_streams() {
        let mut v = 0i64;
        let mut step = 0;
        while v >= 0 && v < i64::MAX {
            let mut out = StreamOutput::new(Vec::new());
            pack_long_signed(&mut out, v).unwrap();
            pack_long_signed(&mut out, -v).unwrap();
            let mut input = StreamInput::new(Cursor::new(out.into_inner()));
            assert_eq!(unpack_long(&mut input).unwrap() as i64, v);
            assert_eq!(unpack_long(&mut input).unwrap() as i64, -v);
            step += 1;
            v = v.wrapping_mul(2).wrapping_add(step % 2);
        }
    }

    #[test]
    fn test_end_of_data() {
        let mut input = ArrayInput::new(Vec::new());
        assert!(unpack_long(&mut input).unwrap_err().is_end_of_data());

        let mut input = ArrayInput::new(vec![0x81u8, 0x82]);
        assert!(unpack_long(&mut input).unwrap_err().is_end_of_data());

        let mut input = StreamInput::new(Cursor::new(vec![0xFFu8]));
        assert!(unpack_int(&mut input).unwrap_err().is_end_of_data());
    }

    #[test]
    fn test_overlong_rejected() {
        let mut input = ArrayInput::new(vec![0x80u8; 11]);
        assert!(matches!(
            unpack_long(&mut input),
            Err(DataIoError::DataCorruption(_))
        ));

        // 2^64 does not fit
        let mut bz = vec![0x82u8];
        bz.extend_from_slice(&[0x80; 8]);
        bz.push(0x00);
        let mut input = ArrayInput::new(bz);
        assert!(matches!(
            unpack_long(&mut input),
            Err(DataIoError::DataCorruption(_))
        ));

        // 2^32 does not fit in an int
        let mut input = ArrayInput::new(vec![0x90u8, 0x80, 0x80, 0x80, 0x00]);
        assert!(matches!(
            unpack_int(&mut input),
            Err(DataIoError::DataCorruption(_))
        ));
    }

    #[test]
    fn test_skip_and_array() {
        let mut out = ArrayOutput::new();
        for v in [5u64, 300, u64::MAX, 7, 8] {
            pack_long(&mut out, v).unwrap();
        }
        let mut input = ArrayInput::new(out.copy_bytes());
        unpack_long_skip(&mut input, 3).unwrap();
        let mut dst = [0u64; 2];
        unpack_long_array(&mut input, &mut dst).unwrap();
        assert_eq!(dst, [7, 8]);
        assert!(unpack_long_skip(&mut input, 1).unwrap_err().is_end_of_data());
    }

    #[test]
    fn test_slice_variants() {
        let mut buf = [0u8; 4];
        assert_eq!(pack_long_at(&mut buf, 1, 2111).unwrap(), 2);
        assert_eq!(unpack_long_at(&buf, 1).unwrap(), (2111, 2));
        assert!(pack_long_at(&mut buf, 3, 2111).unwrap_err().is_end_of_data());
        assert!(unpack_long_at(&buf, 4).unwrap_err().is_end_of_data());
    }
}
