//! Parity checksums for pointer words.
//!
//! A pointer stored on disk is shifted left by N bits and the freed low bits
//! receive a check pattern derived from the payload. Reading the word back
//! recomputes the pattern; a mismatch means the word was torn or corrupted.
//!
//! | scheme | check bits | check pattern                                |
//! |--------|------------|----------------------------------------------|
//! | 1      | 1          | `(popcount(payload) + 1) % 2` (odd parity)   |
//! | 3      | 3          | `(popcount(payload) + 1) % 8`                |
//! | 4      | 4          | `(popcount(payload) + 1) % 16`               |
//! | 16     | 16         | low 16 bits of `long_hash(payload + 1)`, 0→1 |
//!
//! The payload of every scheme must fit in `64 - N` bits. For all schemes the
//! payload 0 gets a non-zero check pattern, so an all-zero word never passes.

use crate::bits::{fill_low_bits, long_hash};
use crate::def::{PARITY16_BITS, PARITY1_BITS, PARITY3_BITS, PARITY4_BITS};
use crate::error::{DataIoError, Result};
use log::warn;

#[inline]
fn popcount_check(payload: u64, bits: u32) -> u64 {
    (payload.count_ones() as u64 + 1) & fill_low_bits(bits)
}

#[inline]
fn hash_check(payload: u64) -> u64 {
    match long_hash(payload.wrapping_add(1)) & fill_low_bits(PARITY16_BITS) {
        0 => 1,
        c => c,
    }
}

#[inline]
fn stamp(payload: u64, bits: u32, check: fn(u64, u32) -> u64) -> u64 {
    debug_assert!(
        payload >> (64 - bits) == 0,
        "payload {:#x} does not fit in {} bits",
        payload,
        64 - bits
    );
    (payload << bits) | check(payload, bits)
}

#[inline]
fn verify(word: u64, bits: u32, check: fn(u64, u32) -> u64) -> Result<u64> {
    let payload = word >> bits;
    if word & fill_low_bits(bits) != check(payload, bits) {
        warn!("pointer checksum broken: word={:#x} check_bits={}", word, bits);
        return Err(DataIoError::PointerChecksumBroken(word));
    }
    Ok(payload)
}

pub fn parity1_set(payload: u64) -> u64 {
    stamp(payload, PARITY1_BITS, popcount_check)
}

pub fn parity1_get(word: u64) -> Result<u64> {
    verify(word, PARITY1_BITS, popcount_check)
}

pub fn parity3_set(payload: u64) -> u64 {
    stamp(payload, PARITY3_BITS, popcount_check)
}

pub fn parity3_get(word: u64) -> Result<u64> {
    verify(word, PARITY3_BITS, popcount_check)
}

pub fn parity4_set(payload: u64) -> u64 {
    stamp(payload, PARITY4_BITS, popcount_check)
}

pub fn parity4_get(word: u64) -> Result<u64> {
    verify(word, PARITY4_BITS, popcount_check)
}

pub fn parity16_set(payload: u64) -> u64 {
    stamp(payload, PARITY16_BITS, |p, _| hash_check(p))
}

pub fn parity16_get(word: u64) -> Result<u64> {
    verify(word, PARITY16_BITS, |p, _| hash_check(p))
}

/// Runtime selection of a parity scheme, for callers whose check width comes
/// from a page header or a command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParityScheme {
    Parity1,
    Parity3,
    Parity4,
    Parity16,
}

impl ParityScheme {
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            PARITY1_BITS => Ok(ParityScheme::Parity1),
            PARITY3_BITS => Ok(ParityScheme::Parity3),
            PARITY4_BITS => Ok(ParityScheme::Parity4),
            PARITY16_BITS => Ok(ParityScheme::Parity16),
            _ => Err(DataIoError::InvalidArgument(format!(
                "no parity scheme with {} check bits",
                bits
            ))),
        }
    }

    pub fn check_bits(self) -> u32 {
        match self {
            ParityScheme::Parity1 => PARITY1_BITS,
            ParityScheme::Parity3 => PARITY3_BITS,
            ParityScheme::Parity4 => PARITY4_BITS,
            ParityScheme::Parity16 => PARITY16_BITS,
        }
    }

    pub fn set(self, payload: u64) -> u64 {
        match self {
            ParityScheme::Parity1 => parity1_set(payload),
            ParityScheme::Parity3 => parity3_set(payload),
            ParityScheme::Parity4 => parity4_set(payload),
            ParityScheme::Parity16 => parity16_set(payload),
        }
    }

    pub fn get(self, word: u64) -> Result<u64> {
        match self {
            ParityScheme::Parity1 => parity1_get(word),
            ParityScheme::Parity3 => parity3_get(word),
            ParityScheme::Parity4 => parity4_get(word),
            ParityScheme::Parity16 => parity16_get(word),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ParityScheme; 4] = [
        ParityScheme::Parity1,
        ParityScheme::Parity3,
        ParityScheme::Parity4,
        ParityScheme::Parity16,
    ];

    #[test]
    fn test_parity1() {
        assert_eq!(parity1_set(0), 0b1);
        assert_eq!(parity1_set(0b1), 0b10);
        assert_eq!(parity1_set(0b11), 0b111);
        assert_eq!(parity1_set(0b111), 0b1110);
        assert_eq!(parity1_set(0b101), 0b1011);

        assert_eq!(parity1_get(0b1).unwrap(), 0);
        assert_eq!(parity1_get(0b1011).unwrap(), 0b101);
        assert!(matches!(
            parity1_get(0),
            Err(DataIoError::PointerChecksumBroken(0))
        ));
        assert!(matches!(
            parity1_get(0b110),
            Err(DataIoError::PointerChecksumBroken(0b110))
        ));
    }

    #[test]
    fn test_parity1_word_has_odd_parity() {
        for payload in [0u64, 1, 2, 3, 0xFF, 0xDEAD_BEEF, (1 << 63) - 1] {
            assert_eq!(parity1_set(payload).count_ones() % 2, 1);
        }
    }

    #[test]
    fn test_parity_basic() {
        let mut i = 0u64;
        while i < i32::MAX as u64 {
            if i % 2 == 0 {
                assert_eq!(i, parity1_get(parity1_set(i)).unwrap());
            }
            if i % 8 == 0 {
                assert_eq!(i, parity3_get(parity3_set(i)).unwrap());
            }
            if i % 16 == 0 {
                assert_eq!(i, parity4_get(parity4_set(i)).unwrap());
            }
            if i & 0xFFFF == 0 {
                assert_eq!(i, parity16_get(parity16_set(i)).unwrap());
            }
            i += 1 + i / 1000000;
        }
    }

    #[test]
    fn test_round_trip_any_payload() {
        for scheme in ALL {
            let top = fill_low_bits(64 - scheme.check_bits());
            for payload in [0, 1, 7, 12345, top >> 1, top] {
                assert_eq!(scheme.get(scheme.set(payload)).unwrap(), payload);
            }
        }
    }

    #[test]
    fn test_zero_word_never_valid() {
        for scheme in ALL {
            assert_ne!(scheme.set(0), 0);
            assert!(scheme.get(0).is_err());
        }
    }

    #[test]
    fn test_single_bit_flips_rejected() {
        for scheme in [
            ParityScheme::Parity1,
            ParityScheme::Parity3,
            ParityScheme::Parity4,
        ] {
            for payload in [0u64, 1, 0x1234_5678, 0xFFFF] {
                let word = scheme.set(payload);
                for bit in 0..64 {
                    assert!(
                        scheme.get(word ^ (1 << bit)).is_err(),
                        "{:?} accepted flip of bit {} in {:#x}",
                        scheme,
                        bit,
                        word
                    );
                }
            }
        }
    }

    #[test]
    fn test_parity16_rejects_low_bit_flips() {
        let word = parity16_set(0xABCDEF);
        for bit in 0..17 {
            assert!(parity16_get(word ^ (1 << bit)).is_err());
        }
    }

    #[test]
    fn test_scheme_from_bits() {
        for scheme in ALL {
            assert_eq!(ParityScheme::from_bits(scheme.check_bits()).unwrap(), scheme);
            // the payload sits right above the check field
            assert_eq!(scheme.set(1) >> scheme.check_bits(), 1);
        }
        assert_eq!(parity1_set(1) >> PARITY1_BITS, 1);
        assert_eq!(parity3_set(1) >> PARITY3_BITS, 1);
        assert_eq!(parity4_set(1) >> PARITY4_BITS, 1);
        assert_eq!(parity16_set(1) >> PARITY16_BITS, 1);
        assert!(ParityScheme::from_bits(2).is_err());
    }
}
