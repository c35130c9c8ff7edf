//! Request envelope
//!
//! # Frame Layout
//!
//! ```text
//! +--------+--------+----------+--------+---------+-----+
//! | size   | marker | reserved | serial | message | LRC |
//! | 2 (BE) | 1      | 4        | 12     | TLV     | 1   |
//! +--------+--------+----------+--------+---------+-----+
//!          |<------------- body (size bytes) ---->|
//! ```
//!
//! The marker and reserved bytes together form the 5-byte PDU header. The
//! LRC is the XOR of every body byte.

use rgmp_core::{RgmpError, RgmpResult, Request, Serial, SERIAL_LEN};

use crate::cursor::Cursor;
use crate::lrc::LrcCalc;
use crate::tlv::TlvDecoder;

/// Size prefix width
pub const SIZE_LEN: usize = 2;
/// PDU header width (marker + reserved)
pub const PDU_LEN: usize = 5;
/// Reserved bytes following the PDU marker
pub const RESERVED_LEN: usize = PDU_LEN - 1;
/// Checksum width
pub const CHECKSUM_LEN: usize = 1;
/// Smallest buffer that can hold a frame
pub const MIN_FRAME_LEN: usize = SIZE_LEN + PDU_LEN + SERIAL_LEN + CHECKSUM_LEN;
/// Default maximum body size
pub const MAX_MESSAGE_SIZE: usize = 2048;
/// Default PDU marker
pub const PDU_MARKER: u8 = 0x60;

/// Envelope settings
///
/// # Default Settings
/// - Max message size: 2048 bytes
/// - PDU marker: 0x60
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    max_message_size: usize,
    pdu_marker: u8,
}

impl ScanConfig {
    /// Create a config with the protocol defaults
    pub fn new() -> Self {
        Self {
            max_message_size: MAX_MESSAGE_SIZE,
            pdu_marker: PDU_MARKER,
        }
    }

    /// Set the largest accepted body size
    pub fn with_max_message_size(mut self, size: usize) -> Self {
        self.max_message_size = size;
        self
    }

    /// Set the expected PDU marker byte
    pub fn with_pdu_marker(mut self, marker: u8) -> Self {
        self.pdu_marker = marker;
        self
    }

    pub fn max_message_size(&self) -> usize {
        self.max_message_size
    }

    pub fn pdu_marker(&self) -> u8 {
        self.pdu_marker
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Request decoder
///
/// Validates the envelope of one complete frame and decodes the message it
/// carries. A `Scanner` holds no state between calls; each call works on its
/// own cursor.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    /// Create a scanner with the given settings
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Decode one frame
    ///
    /// # Decoding Process
    /// 1. Read the 2-byte big-endian size
    /// 2. Check it against the body length (buffer minus size and checksum)
    /// 3. Check it against the configured maximum
    /// 4. Verify the XOR checksum of the body
    /// 5. Check the PDU marker, skip the reserved bytes
    /// 6. Read the 12-byte serial
    /// 7. Decode the message, which must end exactly at the body boundary
    ///
    /// # Error Handling
    /// The first failed check aborts the decode; no partial request is
    /// returned. Buffers shorter than [`MIN_FRAME_LEN`] fail with
    /// `BufferExhausted` before any other check.
    pub fn scan(&self, buffer: &[u8]) -> RgmpResult<Request> {
        if buffer.len() < MIN_FRAME_LEN {
            return Err(RgmpError::BufferExhausted {
                offset: 0,
                needed: MIN_FRAME_LEN,
                available: buffer.len(),
            });
        }

        let body_end = buffer.len() - CHECKSUM_LEN;
        let trailer = buffer[body_end];
        // Reads past body_end would land on the checksum byte
        let mut cursor = Cursor::new(&buffer[..body_end]);

        let size = cursor.read_u16_be()? as usize;
        let body = cursor.rest();
        if size != body.len() {
            return Err(RgmpError::SizeMismatch {
                declared: size,
                actual: body.len(),
            });
        }

        if size > self.config.max_message_size {
            return Err(RgmpError::MessageTooLarge {
                size,
                max: self.config.max_message_size,
            });
        }

        let mut lrc = LrcCalc::new();
        lrc.update_bytes(body);
        lrc.validate(trailer)?;

        let offset = cursor.position();
        let marker = cursor.read_u8()?;
        if marker != self.config.pdu_marker {
            return Err(RgmpError::BadProtocolMarker {
                offset,
                expected: self.config.pdu_marker,
                found: marker,
            });
        }
        cursor.skip(RESERVED_LEN)?;

        let serial = Serial::new(cursor.read_array::<SERIAL_LEN>()?);

        let message = TlvDecoder::new(&mut cursor).decode_message(body_end)?;
        if cursor.has_remaining() {
            return Err(RgmpError::TrailingData {
                offset: cursor.position(),
                remaining: cursor.remaining(),
            });
        }

        Ok(Request::new(serial, size, message))
    }
}

/// Decode one frame with the default settings
pub fn scan(buffer: &[u8]) -> RgmpResult<Request> {
    Scanner::default().scan(buffer)
}
