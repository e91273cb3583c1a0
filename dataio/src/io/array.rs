use super::{byte_at, read_slice_at, skip_slice, DataInput, DataOutput};
use crate::config::Config;
use crate::error::{DataIoError, Result};
use bytes::Bytes;
use log::debug;

/// Reads from an owned array with an explicit cursor.
#[derive(Debug, Clone, Default)]
pub struct ArrayInput {
    buf: Bytes,
    pos: usize,
}

impl ArrayInput {
    pub fn new(buf: impl Into<Bytes>) -> Self {
        Self {
            buf: buf.into(),
            pos: 0,
        }
    }

    pub fn with_position(buf: impl Into<Bytes>, pos: usize) -> Self {
        Self {
            buf: buf.into(),
            pos,
        }
    }

    /// The backing array, including the bytes already consumed.
    pub fn internal_bytes(&self) -> &Bytes {
        &self.buf
    }

    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }
}

impl DataInput for ArrayInput {
    fn read_u8(&mut self) -> Result<u8> {
        byte_at(&self.buf, &mut self.pos)
    }

    fn read_into(&mut self, dst: &mut [u8]) -> Result<()> {
        read_slice_at(&self.buf, &mut self.pos, dst)
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn skip_bytes(&mut self, n: usize) -> Result<()> {
        skip_slice(&self.buf, &mut self.pos, n)
    }
}

/// Writes into an owned array that grows on demand.
///
/// The cursor may be moved anywhere with `set_position`; writing past the end
/// of the array doubles it (or grows it to exactly what is needed, whichever is
/// larger) while keeping every byte written so far.
#[derive(Debug, Clone)]
pub struct ArrayOutput {
    buf: Vec<u8>,
    pos: usize,
    max_size: usize,
}

impl Default for ArrayOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ArrayOutput {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        Self {
            buf: vec![0u8; config.initial_output_size],
            pos: 0,
            max_size: config.max_output_size,
        }
    }

    /// Writes into `buf` from offset 0. `buf` keeps its length until a write
    /// needs more room.
    pub fn with_buf(buf: Vec<u8>) -> Self {
        let max_size = Config::default().max_output_size.max(buf.len());
        Self {
            buf,
            pos: 0,
            max_size,
        }
    }

    /// The whole backing array, including any unwritten tail.
    pub fn buf(&self) -> &[u8] {
        &self.buf
    }

    pub fn buf_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    /// Copy of the bytes before the cursor.
    pub fn copy_bytes(&self) -> Vec<u8> {
        self.buf[..self.pos.min(self.buf.len())].to_vec()
    }

    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Makes sure `n` more bytes fit after the cursor.
    pub fn ensure_avail(&mut self, n: usize) -> Result<()> {
        let needed = self.pos.checked_add(n).ok_or_else(|| {
            DataIoError::InvalidArgument(format!("write of {} bytes at {} overflows", n, self.pos))
        })?;
        if needed <= self.buf.len() {
            return Ok(());
        }
        if needed > self.max_size {
            return Err(DataIoError::InvalidArgument(format!(
                "output would grow to {} bytes, limit is {}",
                needed, self.max_size
            )));
        }
        let new_len = self.buf.len().saturating_mul(2).max(needed).min(self.max_size);
        debug!("ArrayOutput grows from {} to {} bytes", self.buf.len(), new_len);
        self.buf.resize(new_len, 0);
        Ok(())
    }
}

impl DataOutput for ArrayOutput {
    fn write_u8(&mut self, b: u8) -> Result<()> {
        self.ensure_avail(1)?;
        self.buf[self.pos] = b;
        self.pos += 1;
        Ok(())
    }

    fn write_all_bytes(&mut self, src: &[u8]) -> Result<()> {
        self.ensure_avail(src.len())?;
        self.buf[self.pos..self.pos + src.len()].copy_from_slice(src);
        self.pos += src.len();
        Ok(())
    }

    fn position(&self) -> usize {
        self.pos
    }
}
