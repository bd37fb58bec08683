pub mod scenario;
pub mod sessions;

use thiserror::Error;

pub use sessions::{read_sessions_csv, read_sessions_csv_str, sessions_to_csv};

/// Errors reading or writing external session and scenario files
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Error encountered when reading or writing CSV data
    #[error("CSV error: {0}")]
    Csv(String),
    /// Error encountered when reading or writing JSON data
    #[error("JSON error: {0}")]
    Json(String),
    /// The file could not be read
    #[error("Could not read {path}: {reason}")]
    Io { path: String, reason: String },
}
