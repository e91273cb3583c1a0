//! Byte sequences the codecs read from and write to.
//!
//! `DataInput` and `DataOutput` are the only capabilities the packed-integer
//! codecs need: read or write one byte, read or write a run of bytes, and
//! report the current position. Each backing medium implements them once:
//!
//! - [`ArrayInput`] / [`ArrayOutput`]: an owned array with a cursor; the writer
//!   grows its array on demand.
//! - [`BufferInput`]: a borrowed, externally owned buffer (for example a
//!   memory-mapped page) read in place from a base offset.
//! - [`StreamInput`] / [`StreamOutput`]: any `std::io::Read` / `std::io::Write`.
//!
//! An instance tracks one cursor and must not be shared between threads
//! without external synchronisation; every mutating method takes `&mut self`.

pub mod array;
pub mod buffer;
pub mod stream;

pub use array::{ArrayInput, ArrayOutput};
pub use buffer::BufferInput;
pub use stream::{
    pack_long_to, read_fully, skip_fully, unpack_long_from, StreamInput, StreamOutput,
};

use crate::bidi;
use crate::def::READ_CHUNK_SIZE;
use crate::error::{DataIoError, Result};
use crate::packed;
use byteorder::{BigEndian, ByteOrder};

/// A position-tracking source of bytes.
pub trait DataInput {
    /// Reads one byte, failing with `EndOfData` if none is left.
    fn read_u8(&mut self) -> Result<u8>;

    /// Fills `dst` completely, failing with `EndOfData` if the input runs out
    /// first.
    fn read_into(&mut self, dst: &mut [u8]) -> Result<()>;

    /// Number of bytes consumed so far, or the absolute offset for inputs
    /// that start at a base offset.
    fn position(&self) -> usize;

    fn skip_bytes(&mut self, n: usize) -> Result<()> {
        for _ in 0..n {
            self.read_u8()?;
        }
        Ok(())
    }

    /// Reads a big-endian `i32`.
    fn read_int(&mut self) -> Result<i32> {
        let mut bz = [0u8; 4];
        self.read_into(&mut bz)?;
        Ok(BigEndian::read_i32(&bz))
    }

    /// Reads a big-endian `i64`.
    fn read_long(&mut self) -> Result<i64> {
        let mut bz = [0u8; 8];
        self.read_into(&mut bz)?;
        Ok(BigEndian::read_i64(&bz))
    }

    fn unpack_int(&mut self) -> Result<u32> {
        packed::unpack_int(self)
    }

    fn unpack_long(&mut self) -> Result<u64> {
        packed::unpack_long(self)
    }

    fn unpack_long_skip(&mut self, count: usize) -> Result<()> {
        packed::unpack_long_skip(self, count)
    }

    fn unpack_long_array(&mut self, dst: &mut [u64]) -> Result<()> {
        packed::unpack_long_array(self, dst)
    }

    /// Reads a byte string written by [`DataOutput::write_packed_bytes`].
    fn read_packed_bytes(&mut self) -> Result<Vec<u8>> {
        let len = self.unpack_int()? as usize;
        // a corrupted length must not allocate gigabytes up front
        let mut bz = Vec::with_capacity(len.min(READ_CHUNK_SIZE));
        while bz.len() < len {
            let start = bz.len();
            bz.resize(start + (len - start).min(READ_CHUNK_SIZE), 0);
            self.read_into(&mut bz[start..])?;
        }
        Ok(bz)
    }

    /// Reads a string written by [`DataOutput::write_packed_str`].
    fn read_packed_str(&mut self) -> Result<String> {
        let bz = self.read_packed_bytes()?;
        String::from_utf8(bz)
            .map_err(|e| DataIoError::DataCorruption(format!("packed string is not UTF-8: {}", e)))
    }
}

/// A position-tracking sink of bytes.
pub trait DataOutput {
    fn write_u8(&mut self, b: u8) -> Result<()>;

    fn write_all_bytes(&mut self, src: &[u8]) -> Result<()>;

    /// Number of bytes emitted so far, or the absolute offset for outputs
    /// that write into an existing array.
    fn position(&self) -> usize;

    /// Writes a big-endian `i32`.
    fn write_int(&mut self, v: i32) -> Result<()> {
        self.write_all_bytes(&v.to_be_bytes())
    }

    /// Writes a big-endian `i64`.
    fn write_long(&mut self, v: i64) -> Result<()> {
        self.write_all_bytes(&v.to_be_bytes())
    }

    fn pack_int(&mut self, v: u32) -> Result<()> {
        packed::pack_int(self, v)
    }

    fn pack_long(&mut self, v: u64) -> Result<()> {
        packed::pack_long(self, v)
    }

    /// Appends a bidirectional encoding of `v`, returning its byte count.
    fn pack_long_bidi(&mut self, v: u64) -> Result<usize> {
        bidi::pack_long_bidi_to(self, v)
    }

    /// Writes the length as a packed int followed by the bytes.
    fn write_packed_bytes(&mut self, bz: &[u8]) -> Result<()> {
        let len = u32::try_from(bz.len()).map_err(|_| {
            DataIoError::InvalidArgument(format!("byte string too long: {}", bz.len()))
        })?;
        self.pack_int(len)?;
        self.write_all_bytes(bz)
    }

    fn write_packed_str(&mut self, s: &str) -> Result<()> {
        self.write_packed_bytes(s.as_bytes())
    }
}

impl<T: DataInput + ?Sized> DataInput for &mut T {
    fn read_u8(&mut self) -> Result<u8> {
        (**self).read_u8()
    }

    fn read_into(&mut self, dst: &mut [u8]) -> Result<()> {
        (**self).read_into(dst)
    }

    fn position(&self) -> usize {
        (**self).position()
    }

    fn skip_bytes(&mut self, n: usize) -> Result<()> {
        (**self).skip_bytes(n)
    }
}

impl<T: DataOutput + ?Sized> DataOutput for &mut T {
    fn write_u8(&mut self, b: u8) -> Result<()> {
        (**self).write_u8(b)
    }

    fn write_all_bytes(&mut self, src: &[u8]) -> Result<()> {
        (**self).write_all_bytes(src)
    }

    fn position(&self) -> usize {
        (**self).position()
    }
}

/// Shared by the slice-backed inputs: copies `dst.len()` bytes at `*pos` and
/// advances it.
pub(crate) fn read_slice_at(bz: &[u8], pos: &mut usize, dst: &mut [u8]) -> Result<()> {
    let src = crate::slice::get_range(bz, *pos, dst.len())?;
    dst.copy_from_slice(src);
    *pos += dst.len();
    Ok(())
}

pub(crate) fn byte_at(bz: &[u8], pos: &mut usize) -> Result<u8> {
    let b = *bz.get(*pos).ok_or_else(|| DataIoError::end_of_data(1, 0))?;
    *pos += 1;
    Ok(b)
}

pub(crate) fn skip_slice(bz: &[u8], pos: &mut usize, n: usize) -> Result<()> {
    crate::slice::get_range(bz, *pos, n)?;
    *pos += n;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_width_round_trip() {
        let mut out = ArrayOutput::new();
        out.write_int(-5).unwrap();
        out.write_long(i64::MIN + 3).unwrap();
        out.write_u8(0xAB).unwrap();
        assert_eq!(out.position(), 13);
        assert_eq!(&out.buf()[..4], &[0xFF, 0xFF, 0xFF, 0xFB]);

        let mut input = ArrayInput::new(out.copy_bytes());
        assert_eq!(input.read_int().unwrap(), -5);
        assert_eq!(input.read_long().unwrap(), i64::MIN + 3);
        assert_eq!(input.read_u8().unwrap(), 0xAB);
        assert!(input.read_u8().unwrap_err().is_end_of_data());
    }

    #[test]
    fn test_packed_strings() {
        let mut out = ArrayOutput::new();
        out.write_packed_str("").unwrap();
        out.write_packed_str("héllo").unwrap();
        out.write_packed_bytes(&[1, 2, 3]).unwrap();

        let mut input = ArrayInput::new(out.copy_bytes());
        assert_eq!(input.read_packed_str().unwrap(), "");
        assert_eq!(input.read_packed_str().unwrap(), "héllo");
        assert_eq!(input.read_packed_bytes().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_packed_string_bad_utf8() {
        let mut out = ArrayOutput::new();
        out.write_packed_bytes(&[0xFF, 0xFE]).unwrap();
        let mut input = ArrayInput::new(out.copy_bytes());
        assert!(matches!(
            input.read_packed_str(),
            Err(DataIoError::DataCorruption(_))
        ));
    }

    #[test]
    fn test_truncated_packed_bytes() {
        let mut input = ArrayInput::new(vec![5u8, 1, 2]);
        assert!(input.read_packed_bytes().unwrap_err().is_end_of_data());

        // length u32::MAX followed by nothing
        let mut input = ArrayInput::new(vec![0x8Fu8, 0xFF, 0xFF, 0xFF, 0x7F, 1]);
        assert!(input.read_packed_bytes().unwrap_err().is_end_of_data());
    }

    #[test]
    fn test_mut_ref_forwarding() {
        fn pack_three(mut out: impl DataOutput) {
            out.pack_long(1).unwrap();
            out.pack_long(300).unwrap();
            out.pack_long(u64::MAX).unwrap();
        }
        let mut out = ArrayOutput::new();
        pack_three(&mut out);
        assert_eq!(out.position(), 1 + 2 + 10);

        let mut input = ArrayInput::new(out.copy_bytes());
        let by_ref = &mut input;
        assert_eq!(by_ref.unpack_long().unwrap(), 1);
        assert_eq!(input.position(), 1);
    }
}
