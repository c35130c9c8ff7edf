//! Variable-width length field
//!
//! Every message, group and field header carries its payload length in one
//! of three forms, selected by the first byte:
//!
//! ```text
//! 0x00..=0x80   the byte is the length                  (1 byte)
//! 0x81 LL       one following byte is the length        (2 bytes)
//! 0x82 HH LL    two following bytes, big-endian         (3 bytes)
//! ```
//!
//! Prefixes `0x83..=0xFF` are not part of the format and are rejected with
//! `MalformedLength`.

use rgmp_core::{RgmpError, RgmpResult};

use crate::cursor::Cursor;

/// Prefix of the one-extra-byte form
pub const ONE_BYTE_PREFIX: u8 = 0x81;
/// Prefix of the two-extra-byte form
pub const TWO_BYTE_PREFIX: u8 = 0x82;
/// Largest length the format can express
pub const MAX_LENGTH: usize = u16::MAX as usize;

/// Decoded length field, remembering the form it was read in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TlvLength {
    /// Literal form: 0-128
    Short(u8),
    /// `0x81` followed by one byte
    OneByte(u8),
    /// `0x82` followed by two big-endian bytes
    TwoByte(u16),
}

impl TlvLength {
    /// Choose the shortest form for `length`
    ///
    /// Returns `None` above [`MAX_LENGTH`].
    pub fn new(length: usize) -> Option<Self> {
        match length {
            0..=0x80 => Some(TlvLength::Short(length as u8)),
            0x81..=0xFF => Some(TlvLength::OneByte(length as u8)),
            0x100..=MAX_LENGTH => Some(TlvLength::TwoByte(length as u16)),
            _ => None,
        }
    }

    /// Length value
    pub fn value(&self) -> usize {
        match self {
            TlvLength::Short(l) => *l as usize,
            TlvLength::OneByte(l) => *l as usize,
            TlvLength::TwoByte(l) => *l as usize,
        }
    }

    /// Bytes occupied by this length field on the wire
    pub fn encoded_len(&self) -> usize {
        match self {
            TlvLength::Short(_) => 1,
            TlvLength::OneByte(_) => 2,
            TlvLength::TwoByte(_) => 3,
        }
    }

    /// Width of a length field starting with `prefix`
    ///
    /// Returns `None` for prefixes the format does not define.
    pub fn width_for_prefix(prefix: u8) -> Option<usize> {
        match prefix {
            p if p < ONE_BYTE_PREFIX => Some(1),
            ONE_BYTE_PREFIX => Some(2),
            TWO_BYTE_PREFIX => Some(3),
            _ => None,
        }
    }

    /// Encode to wire bytes
    pub fn encode(&self) -> Vec<u8> {
        match self {
            TlvLength::Short(l) => vec![*l],
            TlvLength::OneByte(l) => vec![ONE_BYTE_PREFIX, *l],
            TlvLength::TwoByte(l) => {
                let [hi, lo] = l.to_be_bytes();
                vec![TWO_BYTE_PREFIX, hi, lo]
            }
        }
    }

    /// Read a length field at the cursor
    ///
    /// # Returns
    /// Returns `Ok((TlvLength, bytes_consumed))`; the cursor is advanced by
    /// `bytes_consumed` (1, 2 or 3).
    ///
    /// # Error Handling
    /// - `MalformedLength` if the prefix is `0x83` or above
    /// - `BufferExhausted` if the buffer ends inside the field
    ///
    /// On error the cursor is left where it was.
    pub fn read(cursor: &mut Cursor<'_>) -> RgmpResult<(Self, usize)> {
        let offset = cursor.position();
        let prefix = cursor.peek_u8()?;

        let length = match prefix {
            v if v < ONE_BYTE_PREFIX => {
                cursor.skip(1)?;
                TlvLength::Short(v)
            }
            ONE_BYTE_PREFIX => {
                let [_, v] = cursor.read_array::<2>()?;
                TlvLength::OneByte(v)
            }
            TWO_BYTE_PREFIX => {
                let [_, hi, lo] = cursor.read_array::<3>()?;
                TlvLength::TwoByte(u16::from_be_bytes([hi, lo]))
            }
            _ => return Err(RgmpError::MalformedLength { offset, prefix }),
        };
        Ok((length, length.encoded_len()))
    }

    /// Decode a length field from the start of `data`
    pub fn decode(data: &[u8]) -> RgmpResult<(Self, usize)> {
        Self::read(&mut Cursor::new(data))
    }
}
