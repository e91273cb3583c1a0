//! Bit-layout constants shared by the codecs.
//!
//! Every on-disk format produced by this crate is described by the constants
//! below. They are part of the storage format: changing any of them breaks
//! compatibility with data written by earlier versions.

/// Set on every byte of a packed integer except the last one.
pub const PACK_CONTINUATION: u8 = 0x80;

/// Data bits carried by one byte of a packed integer.
pub const PACK_GROUP_BITS: u32 = 7;

/// Mask selecting the data bits of one packed-integer byte.
pub const PACK_GROUP_MASK: u64 = (1 << PACK_GROUP_BITS) - 1;

/// Longest packed `u64` (ceil(64 / 7)).
pub const MAX_PACKED_LONG_SIZE: usize = 10;

/// Longest packed `u32` (ceil(32 / 7)).
pub const MAX_PACKED_INT_SIZE: usize = 5;

/// Marks the first byte of a bidirectional encoding.
pub const BIDI_START: u8 = 0x80;

/// Marks the last byte of a bidirectional encoding.
pub const BIDI_END: u8 = 0x40;

/// Data bits carried by one byte of a bidirectional encoding.
pub const BIDI_GROUP_BITS: u32 = 6;

/// Mask selecting the data bits of one bidirectional byte.
pub const BIDI_GROUP_MASK: u64 = (1 << BIDI_GROUP_BITS) - 1;

/// Width of the value domain accepted by the bidirectional codec.
pub const BIDI_VALUE_BITS: u32 = 60;

/// Mask selecting the value part of a decoded bidirectional word.
pub const BIDI_VALUE_MASK: u64 = (1 << BIDI_VALUE_BITS) - 1;

/// Position of the byte-count tag in a decoded bidirectional word.
pub const BIDI_SIZE_SHIFT: u32 = BIDI_VALUE_BITS;

/// Longest bidirectional encoding (ceil(60 / 6)).
pub const MAX_BIDI_SIZE: usize = 10;

/// Width of a six-byte long.
pub const SIX_LONG_BITS: u32 = 48;

/// Largest value storable as a six-byte long.
pub const SIX_LONG_MAX: u64 = (1 << SIX_LONG_BITS) - 1;

/// Check bits of the odd-parity scheme.
pub const PARITY1_BITS: u32 = 1;

/// Check bits of the 3-bit popcount scheme.
pub const PARITY3_BITS: u32 = 3;

/// Check bits of the 4-bit popcount scheme.
pub const PARITY4_BITS: u32 = 4;

/// Check bits of the 16-bit hashed scheme.
pub const PARITY16_BITS: u32 = 16;

/// Multiplier of the 64-bit hash mixer (2^64 / golden ratio).
pub const LONG_HASH_MULTIPLIER: u64 = 0x9E37_79B9_7F4A_7C15;

/// Multiplier of the 32-bit hash mixer (2^32 / golden ratio).
pub const INT_HASH_MULTIPLIER: u32 = 0x9E37_79B9;

/// Starting capacity of a default `ArrayOutput`.
pub const DEFAULT_OUTPUT_SIZE: usize = 128;

/// Growth ceiling of a default `ArrayOutput` (1GB).
pub const DEFAULT_MAX_OUTPUT_SIZE: usize = 1024 * 1024 * 1024;

/// Largest run a packed byte string is read in, whatever its stored length.
pub const READ_CHUNK_SIZE: usize = 64 * 1024;
