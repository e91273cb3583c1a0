//! Hexadecimal text form of byte strings, used for diagnostics and identifiers.
//!
//! The text form is always lowercase, two digits per byte.

use crate::error::{DataIoError, Result};

pub fn to_hexa(bz: &[u8]) -> String {
    hex::encode(bz)
}

/// Parses text produced by [`to_hexa`]. Uppercase digits are accepted too.
pub fn from_hexa(text: &str) -> Result<Vec<u8>> {
    hex::decode(text.trim())
        .map_err(|e| DataIoError::InvalidArgument(format!("bad hex string {:?}: {}", text, e)))
}
