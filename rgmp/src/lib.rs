//! RGMP - decoder for framed point-of-sale terminal requests
//!
//! A request frame carries a size prefix, a PDU header, a terminal serial
//! number, one TLV-encoded message and an XOR checksum. This library turns
//! such a frame into an inspectable [`Request`] tree and renders it as text.
//!
//! # Architecture
//!
//! This library is organized as a workspace with multiple crates:
//!
//! - `rgmp-core`: Request tree types, error handling, hex helpers
//! - `rgmp-codec`: Envelope validation and TLV decoding
//! - `rgmp` (this crate): Logging entry points, rendering, tool configuration
//!
//! # Usage
//!
//! ```no_run
//! use rgmp::render::{render, OutputFormat};
//!
//! # let frame: Vec<u8> = Vec::new();
//! let request = rgmp::scan(&frame)?;
//! println!("{}", render(&request, OutputFormat::Json).unwrap_or_default());
//! # Ok::<(), rgmp::RgmpError>(())
//! ```

use log::{debug, warn};

pub mod config;
pub mod render;

// Re-export core types
pub use rgmp_core::{
    Field, Group, Level, Message, Request, RgmpError, RgmpResult, Serial, Tag,
};
pub use rgmp_codec::{ScanConfig, Scanner};

// Re-export decoder internals
pub mod codec {
    pub use rgmp_codec::*;
}

/// Decode one frame with `scanner`, logging the outcome
pub fn scan_with(scanner: &Scanner, buffer: &[u8]) -> RgmpResult<Request> {
    debug!("Decoding request frame of {} bytes", buffer.len());

    match scanner.scan(buffer) {
        Ok(request) => {
            debug!(
                "Decoded request serial={} size={} message={} groups={} fields={}",
                request.serial(),
                request.size(),
                request.message().tag(),
                request.message().groups().len(),
                request.message().field_count()
            );
            Ok(request)
        }
        Err(e) => {
            match e.offset() {
                Some(offset) => warn!("Rejected request ({} at offset {}): {}", e.kind_name(), offset, e),
                None => warn!("Rejected request ({}): {}", e.kind_name(), e),
            }
            Err(e)
        }
    }
}

/// Decode one frame with the default settings, logging the outcome
pub fn scan(buffer: &[u8]) -> RgmpResult<Request> {
    scan_with(&Scanner::default(), buffer)
}
