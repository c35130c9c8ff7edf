//! Core types for the RGMP terminal request format
//!
//! This crate provides the decoded request tree, the error type shared by
//! every decoding step, and the hex helpers behind the text output.

pub mod error;
pub mod hexfmt;
pub mod level;
pub mod request;

pub use error::{RgmpError, RgmpResult};
pub use level::{Level, MAX_TAG_WIDTH};
pub use request::{Field, Group, Message, Request, Serial, Tag, SERIAL_LEN};
