//! Fixed-width big-endian integers at explicit offsets.
//!
//! Every accessor checks that the whole field lies inside the buffer and fails
//! with `EndOfData` otherwise.

use crate::def::{SIX_LONG_BITS, SIX_LONG_MAX};
use crate::error::{DataIoError, Result};
use crate::slice::{get_range, get_range_mut};
use byteorder::{BigEndian, ByteOrder};

/// Reads a 48-bit unsigned value stored in 6 bytes.
pub fn get_six_long(buf: &[u8], offset: usize) -> Result<u64> {
    Ok(BigEndian::read_u48(get_range(buf, offset, 6)?))
}

/// Stores a 48-bit unsigned value in 6 bytes. Larger values are rejected.
pub fn put_six_long(buf: &mut [u8], offset: usize, value: u64) -> Result<()> {
    if value > SIX_LONG_MAX {
        return Err(DataIoError::InvalidArgument(format!(
            "{:#x} does not fit in {} bits",
            value, SIX_LONG_BITS
        )));
    }
    BigEndian::write_u48(get_range_mut(buf, offset, 6)?, value);
    Ok(())
}

pub fn get_long(buf: &[u8], offset: usize) -> Result<i64> {
    Ok(BigEndian::read_i64(get_range(buf, offset, 8)?))
}

pub fn put_long(buf: &mut [u8], offset: usize, value: i64) -> Result<()> {
    BigEndian::write_i64(get_range_mut(buf, offset, 8)?, value);
    Ok(())
}

pub fn get_u64(buf: &[u8], offset: usize) -> Result<u64> {
    Ok(BigEndian::read_u64(get_range(buf, offset, 8)?))
}

pub fn put_u64(buf: &mut [u8], offset: usize, value: u64) -> Result<()> {
    BigEndian::write_u64(get_range_mut(buf, offset, 8)?, value);
    Ok(())
}

pub fn get_int(buf: &[u8], offset: usize) -> Result<i32> {
    Ok(BigEndian::read_i32(get_range(buf, offset, 4)?))
}

pub fn put_int(buf: &mut [u8], offset: usize, value: i32) -> Result<()> {
    BigEndian::write_i32(get_range_mut(buf, offset, 4)?, value);
    Ok(())
}
