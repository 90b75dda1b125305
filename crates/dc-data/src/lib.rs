//! Catalog loading for the device catalog viewer

pub mod config;
pub mod schema;
pub mod sources;

use dc_core::DatasetError;
use thiserror::Error;
use tokio::task::JoinError;

// Re-exports
pub use config::LoadConfig;
pub use schema::{summarize, ColumnKind, ColumnSummary};
pub use sources::{parse_catalog, CsvSource};

/// Errors that can occur while loading a catalog
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("Source is empty: no header row")]
    MissingHeader,

    #[error("Line {line}: expected {expected} fields, found {found}")]
    Ragged {
        line: u64,
        expected: u64,
        found: u64,
    },

    #[error("Invalid catalog: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Invalid load configuration: {0}")]
    Config(String),

    #[error("Join error: {0}")]
    Join(#[from] JoinError),
}

impl From<csv::Error> for ParseError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => {
                ParseError::Io(std::io::Error::new(io_err.kind(), error.to_string()))
            }
            csv::ErrorKind::UnequalLengths {
                pos,
                expected_len,
                len,
            } => ParseError::Ragged {
                line: pos.as_ref().map(|p| p.line()).unwrap_or(0),
                expected: *expected_len,
                found: *len,
            },
            _ => ParseError::Csv(error.to_string()),
        }
    }
}
