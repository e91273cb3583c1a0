use super::{byte_at, read_slice_at, skip_slice, DataInput};
use crate::error::Result;

/// Reads in place from a buffer owned elsewhere, such as a mapped page.
///
/// Positions are absolute offsets into the whole buffer, so a reader created at
/// base offset 100 reports position 100 before its first read.
#[derive(Debug, Clone, Copy)]
pub struct BufferInput<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> BufferInput<'a> {
    pub fn new(buf: &'a [u8], offset: usize) -> Self {
        Self { buf, pos: offset }
    }

    pub fn internal_buffer(&self) -> &'a [u8] {
        self.buf
    }

    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }
}

impl DataInput for BufferInput<'_> {
    fn read_u8(&mut self) -> Result<u8> {
        byte_at(self.buf, &mut self.pos)
    }

    fn read_into(&mut self, dst: &mut [u8]) -> Result<()> {
        read_slice_at(self.buf, &mut self.pos, dst)
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn skip_bytes(&mut self, n: usize) -> Result<()> {
        skip_slice(self.buf, &mut self.pos, n)
    }
}
