//! Decoder for RGMP terminal requests
//!
//! This crate turns one complete framed request into a [`Request`] tree:
//!
//! - [`envelope`]: frame checks (size, checksum, PDU marker) and serial
//! - [`tlv`]: message → group → field descent
//! - [`length`]: the variable-width length field shared by every level
//! - [`lrc`]: XOR checksum
//! - [`cursor`]: the bounds-checked read position threaded through all of it
//!
//! Decoding is synchronous and allocation-light; nothing here performs I/O
//! or logs.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use rgmp_codec::{ScanConfig, Scanner};
//!
//! # let frame: Vec<u8> = Vec::new();
//! let scanner = Scanner::new(ScanConfig::new().with_max_message_size(2048));
//! let request = scanner.scan(&frame)?;
//! println!("{}", request.message().tag());
//! # Ok::<(), rgmp_codec::RgmpError>(())
//! ```
//!
//! [`Request`]: rgmp_core::Request

pub mod cursor;
pub mod envelope;
pub mod length;
pub mod lrc;
pub mod tlv;

pub use rgmp_core::{RgmpError, RgmpResult};

pub use cursor::Cursor;
pub use envelope::{scan, ScanConfig, Scanner, MAX_MESSAGE_SIZE, MIN_FRAME_LEN, PDU_MARKER};
pub use length::TlvLength;
pub use lrc::{lrc, LrcCalc};
pub use tlv::TlvDecoder;
