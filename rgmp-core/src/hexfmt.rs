//! Hex rendering used by the text output of a decoded request
//!
//! Two forms are part of the output contract:
//! - tags render as contiguous lowercase hex: `{0x60, 0x01, 0x02}` -> `"600102"`
//! - field values render bracketed, each byte preceded by a space:
//!   `{0x01, 0xAB, 0x00}` -> `"[ 01 ab 00]"`

use serde::Serializer;
use std::fmt::Write;

/// Render bytes as contiguous lowercase hex
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Render bytes as a bracketed, space-separated hex list
///
/// An empty slice renders as `"[]"`.
pub fn to_spaced_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 3);
    out.push('[');
    for byte in bytes {
        // Writing to a String cannot fail
        let _ = write!(out, " {:02x}", byte);
    }
    out.push(']');
    out
}

/// `serialize_with` helper for field values
pub fn serialize_spaced<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_spaced_hex(bytes))
}
