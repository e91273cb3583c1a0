use super::{DataInput, DataOutput};
use crate::error::{DataIoError, Result};
use std::io::{self, Read, Write};

/// Fills `dst` completely from `src`.
///
/// Bytes beyond `dst.len()` are left unread in `src`. Fails with `EndOfData`
/// if `src` is exhausted before `dst` is full.
pub fn read_fully<R: Read + ?Sized>(src: &mut R, dst: &mut [u8]) -> Result<()> {
    let mut filled = 0;
    while filled < dst.len() {
        match src.read(&mut dst[filled..]) {
            Ok(0) => return Err(DataIoError::end_of_data(dst.len() - filled, 0)),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Discards exactly `n` bytes of `src`, failing with `EndOfData` if fewer are
/// left.
pub fn skip_fully<R: Read + ?Sized>(src: &mut R, n: u64) -> Result<()> {
    let copied = io::copy(&mut src.take(n), &mut io::sink())?;
    if copied < n {
        return Err(DataIoError::end_of_data((n - copied) as usize, 0));
    }
    Ok(())
}

/// Packs `value` straight onto a writer.
pub fn pack_long_to<W: Write + ?Sized>(w: &mut W, value: u64) -> Result<()> {
    StreamOutput::new(w).pack_long(value)
}

/// Unpacks one value straight from a reader, consuming only its bytes.
pub fn unpack_long_from<R: Read + ?Sized>(r: &mut R) -> Result<u64> {
    StreamInput::new(r).unpack_long()
}

/// Adapts any `Read` to `DataInput`, one byte at a time.
#[derive(Debug)]
pub struct StreamInput<R> {
    inner: R,
    pos: usize,
}

impl<R: Read> StreamInput<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, pos: 0 }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> DataInput for StreamInput<R> {
    fn read_u8(&mut self) -> Result<u8> {
        let mut b = [0u8; 1];
        read_fully(&mut self.inner, &mut b)?;
        self.pos += 1;
        Ok(b[0])
    }

    fn read_into(&mut self, dst: &mut [u8]) -> Result<()> {
        read_fully(&mut self.inner, dst)?;
        self.pos += dst.len();
        Ok(())
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn skip_bytes(&mut self, n: usize) -> Result<()> {
        skip_fully(&mut self.inner, n as u64)?;
        self.pos += n;
        Ok(())
    }
}

/// Adapts any `Write` to `DataOutput`.
#[derive(Debug)]
pub struct StreamOutput<W> {
    inner: W,
    pos: usize,
}

impl<W: Write> StreamOutput<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, pos: 0 }
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> DataOutput for StreamOutput<W> {
    fn write_u8(&mut self, b: u8) -> Result<()> {
        self.inner.write_all(&[b])?;
        self.pos += 1;
        Ok(())
    }

    fn write_all_bytes(&mut self, src: &[u8]) -> Result<()> {
        self.inner.write_all(src)?;
        self.pos += src.len();
        Ok(())
    }

    fn position(&self) -> usize {
        self.pos
    }
}
