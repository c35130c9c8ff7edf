//! Nesting levels of the request TLV tree

use std::fmt;

/// Widest tag used by any level
pub const MAX_TAG_WIDTH: usize = 3;

/// Decode context of a TLV unit
///
/// A request body is a three-level tree: one message holding groups, each
/// group holding fields. Every level has its own fixed tag width; the length
/// encoding is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Message, 3-byte tag
    Message,
    /// Group, 2-byte tag
    Group,
    /// Field, 3-byte tag
    Field,
}

impl Level {
    /// Tag width in bytes
    pub const fn tag_width(self) -> usize {
        match self {
            Level::Message => 3,
            Level::Group => 2,
            Level::Field => 3,
        }
    }

    /// Level nested directly inside this one, if any
    ///
    /// Field values are opaque, so fields have no children.
    pub const fn child(self) -> Option<Level> {
        match self {
            Level::Message => Some(Level::Group),
            Level::Group => Some(Level::Field),
            Level::Field => None,
        }
    }

    /// Lowercase name used in diagnostics
    pub const fn name(self) -> &'static str {
        match self {
            Level::Message => "message",
            Level::Group => "group",
            Level::Field => "field",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
