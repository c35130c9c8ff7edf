use thiserror::Error;

use crate::level::Level;

/// Error type for request decoding
///
/// Every variant is fatal to the decode call that produced it. Variants that
/// are detected at a specific position carry the absolute byte offset into the
/// input buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RgmpError {
    #[error("Size mismatch: declared {declared} bytes, body has {actual}")]
    SizeMismatch { declared: usize, actual: usize },

    #[error("Message too large: {size} bytes (max {max})")]
    MessageTooLarge { size: usize, max: usize },

    #[error("Checksum failed: computed 0x{computed:02x}, trailer is 0x{expected:02x}")]
    ChecksumFailed { computed: u8, expected: u8 },

    #[error("Bad protocol marker at offset {offset}: expected 0x{expected:02x}, got 0x{found:02x}")]
    BadProtocolMarker { offset: usize, expected: u8, found: u8 },

    #[error("Malformed length prefix 0x{prefix:02x} at offset {offset}")]
    MalformedLength { offset: usize, prefix: u8 },

    #[error("Buffer exhausted at offset {offset}: need {needed} bytes, have {available}")]
    BufferExhausted {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Truncated {level} at offset {offset}: need {needed} bytes, {available} left before boundary")]
    TruncatedData {
        offset: usize,
        level: Level,
        needed: usize,
        available: usize,
    },

    #[error("Trailing data at offset {offset}: {remaining} bytes after message")]
    TrailingData { offset: usize, remaining: usize },
}

impl RgmpError {
    /// Byte offset in the input buffer where the error was detected
    ///
    /// Frame-level checks (size, checksum) apply to the whole buffer and
    /// return `None`.
    pub fn offset(&self) -> Option<usize> {
        match self {
            RgmpError::SizeMismatch { .. }
            | RgmpError::MessageTooLarge { .. }
            | RgmpError::ChecksumFailed { .. } => None,
            RgmpError::BadProtocolMarker { offset, .. }
            | RgmpError::MalformedLength { offset, .. }
            | RgmpError::BufferExhausted { offset, .. }
            | RgmpError::TruncatedData { offset, .. }
            | RgmpError::TrailingData { offset, .. } => Some(*offset),
        }
    }

    /// Stable name of the error kind
    pub fn kind_name(&self) -> &'static str {
        match self {
            RgmpError::SizeMismatch { .. } => "SizeMismatch",
            RgmpError::MessageTooLarge { .. } => "MessageTooLarge",
            RgmpError::ChecksumFailed { .. } => "ChecksumFailed",
            RgmpError::BadProtocolMarker { .. } => "BadProtocolMarker",
            RgmpError::MalformedLength { .. } => "MalformedLength",
            RgmpError::BufferExhausted { .. } => "BufferExhausted",
            RgmpError::TruncatedData { .. } => "TruncatedData",
            RgmpError::TrailingData { .. } => "TrailingData",
        }
    }
}

/// Result type alias for request decoding
pub type RgmpResult<T> = Result<T, RgmpError>;
