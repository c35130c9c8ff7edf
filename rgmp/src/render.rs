//! Text output of a decoded request
//!
//! The JSON form is the interchange format read by downstream tooling:
//!
//! ```text
//! {"Serial":"000000000001","Size":24,"Msg":{"Type":"010203","Len":2,
//!  "Groups":[{"Type":"1020","Len":0,"Fields":[]}]}}
//! ```
//!
//! Tags are contiguous lowercase hex; field values are bracketed,
//! space-separated hex bytes (`"[ 01 ab 00]"`).

use std::fmt;
use std::str::FromStr;

use rgmp_core::Request;

use crate::config::ConfigError;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// Compact JSON on one line
    #[default]
    Json,
    /// Indented JSON
    Pretty,
    /// Indented text tree
    Tree,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "pretty" => Ok(OutputFormat::Pretty),
            "tree" => Ok(OutputFormat::Tree),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Json => "json",
            OutputFormat::Pretty => "pretty",
            OutputFormat::Tree => "tree",
        };
        f.write_str(name)
    }
}

/// Render `request` in the given format
pub fn render(request: &Request, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string(request),
        OutputFormat::Pretty => serde_json::to_string_pretty(request),
        OutputFormat::Tree => Ok(request.to_string()),
    }
}
