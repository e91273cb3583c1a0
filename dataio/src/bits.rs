//! Bit utilities used for size classing and hashing.

use crate::def::{INT_HASH_MULTIPLIER, LONG_HASH_MULTIPLIER};

/// Returns the smallest power of two that is greater than or equal to `x`.
///
/// `x = 0` returns 1. Values above `2^31` have no 32-bit answer: they panic
/// in debug builds and return 0 in release builds. Use
/// [`checked_next_pow_two_u32`] when `x` is not known to be in range.
#[inline]
pub fn next_pow_two_u32(x: u32) -> u32 {
    x.next_power_of_two()
}

/// 64-bit counterpart of [`next_pow_two_u32`]; values above `2^63` panic in
/// debug builds and return 0 in release builds.
#[inline]
pub fn next_pow_two_u64(x: u64) -> u64 {
    x.next_power_of_two()
}

/// Like [`next_pow_two_u32`], but `None` when the answer does not fit.
#[inline]
pub fn checked_next_pow_two_u32(x: u32) -> Option<u32> {
    x.checked_next_power_of_two()
}

#[inline]
pub fn checked_next_pow_two_u64(x: u64) -> Option<u64> {
    x.checked_next_power_of_two()
}

/// Returns a word with exactly the low `bit_count` bits set.
///
/// `bit_count` of 64 or more yields `u64::MAX`.
#[inline]
pub fn fill_low_bits(bit_count: u32) -> u64 {
    1u64.checked_shl(bit_count).map_or(u64::MAX, |v| v - 1)
}

/// Returns the shift of a power of two, i.e. `log2(pow)`.
///
/// # Panics
/// If `pow` is not a power of two
#[inline]
pub fn shift(pow: u64) -> u32 {
    assert!(pow.is_power_of_two(), "not a power of two: {}", pow);
    pow.trailing_zeros()
}

/// Rounds `n` up to the nearest multiple of `mult`.
#[inline]
pub fn round_up(n: u64, mult: u64) -> u64 {
    n.div_ceil(mult) * mult
}

/// Rounds `n` down to the nearest multiple of `mult`.
#[inline]
pub fn round_down(n: u64, mult: u64) -> u64 {
    n - n % mult
}

/// Spreads the bits of a 64-bit key (Fibonacci hashing followed by two
/// xor-folds). Stable across versions; the 16-bit parity scheme stores its
/// output on disk.
#[inline]
pub fn long_hash(h: u64) -> u64 {
    let h = h.wrapping_mul(LONG_HASH_MULTIPLIER);
    let h = h ^ (h >> 32);
    h ^ (h >> 16)
}

/// 32-bit counterpart of [`long_hash`].
#[inline]
pub fn int_hash(h: u32) -> u32 {
    let h = h.wrapping_mul(INT_HASH_MULTIPLIER);
    h ^ (h >> 16)
}
