//! Decoded request tree
//!
//! A request is the result of one decode call: the envelope's scalar fields
//! plus exactly one message. All types are immutable once built; the decoder
//! is the only producer.
//!
//! Serialization uses the key names of the JSON output format
//! (`Serial`, `Size`, `Msg`, `Type`, `Len`, `Groups`, `Fields`, `Value`).

use serde::{Serialize, Serializer};
use std::fmt;

use crate::hexfmt;
use crate::level::MAX_TAG_WIDTH;

/// Serial number width in bytes
pub const SERIAL_LEN: usize = 12;

/// Fixed-width type tag of a message, group or field
///
/// Renders as contiguous lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    bytes: [u8; MAX_TAG_WIDTH],
    width: u8,
}

impl Tag {
    /// Create a tag from its raw bytes
    ///
    /// Tags are at most [`MAX_TAG_WIDTH`] bytes wide; longer input keeps only
    /// the leading bytes.
    pub fn new(bytes: &[u8]) -> Self {
        debug_assert!(bytes.len() <= MAX_TAG_WIDTH);
        let width = bytes.len().min(MAX_TAG_WIDTH);
        let mut buf = [0u8; MAX_TAG_WIDTH];
        buf[..width].copy_from_slice(&bytes[..width]);
        Self {
            bytes: buf,
            width: width as u8,
        }
    }

    /// Raw tag bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.width as usize]
    }

    /// Tag width in bytes
    pub fn width(&self) -> usize {
        self.width as usize
    }

    /// Lowercase hex form, e.g. `"010203"`
    pub fn to_hex(&self) -> String {
        hexfmt::to_hex(self.as_bytes())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Terminal serial number
///
/// Opaque bytes, displayed as text without validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Serial {
    bytes: [u8; SERIAL_LEN],
}

impl Serial {
    pub fn new(bytes: [u8; SERIAL_LEN]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; SERIAL_LEN] {
        &self.bytes
    }
}

impl fmt::Display for Serial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.bytes))
    }
}

impl Serialize for Serial {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Innermost TLV unit carrying an opaque value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    #[serde(rename = "Type")]
    tag: Tag,
    #[serde(rename = "Len")]
    length: usize,
    #[serde(rename = "Value", serialize_with = "hexfmt::serialize_spaced")]
    value: Vec<u8>,
}

impl Field {
    /// Create a field; its length is the length of `value`
    pub fn new(tag: Tag, value: Vec<u8>) -> Self {
        Self {
            tag,
            length: value.len(),
            value,
        }
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Raw field value, never interpreted by the decoder
    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field {} len={} {}",
            self.tag,
            self.length,
            hexfmt::to_spaced_hex(&self.value)
        )
    }
}

/// Group of fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    #[serde(rename = "Type")]
    tag: Tag,
    #[serde(rename = "Len")]
    length: usize,
    #[serde(rename = "Fields")]
    fields: Vec<Field>,
}

impl Group {
    /// Create a group
    ///
    /// # Arguments
    /// * `tag` - Group tag (2 bytes on the wire)
    /// * `length` - Declared length, the bytes occupied by `fields`
    /// * `fields` - Fields in encounter order
    pub fn new(tag: Tag, length: usize, fields: Vec<Field>) -> Self {
        Self {
            tag,
            length,
            fields,
        }
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group {} len={}", self.tag, self.length)
    }
}

/// The single message carried by a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    #[serde(rename = "Type")]
    tag: Tag,
    #[serde(rename = "Len")]
    length: usize,
    #[serde(rename = "Groups")]
    groups: Vec<Group>,
}

impl Message {
    /// Create a message
    ///
    /// # Arguments
    /// * `tag` - Message tag (3 bytes on the wire)
    /// * `length` - Declared length, the bytes occupied by `groups`
    /// * `groups` - Groups in encounter order
    pub fn new(tag: Tag, length: usize, groups: Vec<Group>) -> Self {
        Self {
            tag,
            length,
            groups,
        }
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Total number of fields across all groups
    pub fn field_count(&self) -> usize {
        self.groups.iter().map(|g| g.fields.len()).sum()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "message {} len={}", self.tag, self.length)
    }
}

/// Top-level decode result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Request {
    #[serde(rename = "Serial")]
    serial: Serial,
    #[serde(rename = "Size")]
    size: usize,
    #[serde(rename = "Msg")]
    message: Message,
}

impl Request {
    /// Create a request
    ///
    /// # Arguments
    /// * `serial` - Terminal serial number
    /// * `size` - Declared body size from the envelope
    /// * `message` - Decoded message
    pub fn new(serial: Serial, size: usize, message: Message) -> Self {
        Self {
            serial,
            size,
            message,
        }
    }

    pub fn serial(&self) -> &Serial {
        &self.serial
    }

    /// Declared size of the body (everything between the size prefix and
    /// the checksum byte)
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn message(&self) -> &Message {
        &self.message
    }
}

/// Indented tree, one line per node
impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "request serial={} size={}", self.serial, self.size)?;
        write!(f, "  {}", self.message)?;
        for group in &self.message.groups {
            write!(f, "\n    {}", group)?;
            for field in &group.fields {
                write!(f, "\n      {}", field)?;
            }
        }
        Ok(())
    }
}
