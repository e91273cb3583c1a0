//! # Compact binary codecs for a storage engine
//!
//! Page allocators, record serializers and the write-ahead log all need the same
//! handful of encodings. This crate provides them, and nothing else: it never
//! owns a file or a page, it only reads and writes the bytes it is handed.
//!
//! - [`packed`]: variable-length integers, 1 to 10 bytes, most significant
//!   7-bit group first with a continuation bit on every byte but the last.
//! - [`bidi`]: variable-length integers that can be decoded from either end,
//!   so a free-space list can be walked forward and backward without an index.
//! - [`parity`]: check bits stamped into the low bits of a pointer word, so a
//!   torn or corrupted pointer is detected when it is read back.
//! - [`fixed`]: big-endian 4, 6 and 8 byte integers at explicit offsets.
//! - [`bits`]: power-of-two size classes, low-bit masks, hash mixers.
//! - [`hexa`]: hex text form for diagnostics.
//! - [`io`]: the `DataInput` / `DataOutput` byte sequences the codecs run over,
//!   backed by an owned array, a borrowed buffer, or any `Read` / `Write`.
//!
//! All byte formats produced here are stable on-disk formats; see [`def`].
//!
//! Failures are immediate and never retried: running out of bytes is
//! [`DataIoError::EndOfData`], a bad pointer word is
//! [`DataIoError::PointerChecksumBroken`], a malformed encoding is
//! [`DataIoError::DataCorruption`].
//!
//! ```
//! use dataio::io::{ArrayInput, ArrayOutput, DataInput, DataOutput};
//! use dataio::parity::{parity4_get, parity4_set};
//!
//! let mut out = ArrayOutput::new();
//! out.pack_long(parity4_set(4096)).unwrap();
//! out.pack_long(100).unwrap();
//!
//! let mut input = ArrayInput::new(out.copy_bytes());
//! assert_eq!(parity4_get(input.unpack_long().unwrap()).unwrap(), 4096);
//! assert_eq!(input.unpack_long().unwrap(), 100);
//! ```

pub mod bidi;
pub mod bits;
pub mod config;
pub mod def;
pub mod error;
pub mod fixed;
pub mod hexa;
pub mod io;
pub mod packed;
pub mod parity;
pub mod slice;

pub use error::{DataIoError, Result};
