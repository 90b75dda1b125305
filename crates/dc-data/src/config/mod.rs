//! Load configuration

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// How the catalog text is split into fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Field delimiter (single ASCII character)
    pub delimiter: char,

    /// Honour double-quoted fields. When off, every delimiter breaks a field,
    /// so values cannot contain the delimiter.
    pub quoting: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quoting: false,
        }
    }
}

impl LoadConfig {
    /// Delimiter as the byte the CSV reader expects
    pub fn delimiter_byte(&self) -> Result<u8, ParseError> {
        if self.delimiter.is_ascii() && self.delimiter != '"' && self.delimiter != '\n' {
            Ok(self.delimiter as u8)
        } else {
            Err(ParseError::Config(format!(
                "delimiter {:?} must be a single ASCII character",
                self.delimiter
            )))
        }
    }
}
