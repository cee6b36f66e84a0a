//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs, commands
//! and request handlers.

use thiserror::Error;

/// Errors that can occur during registry lookups
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Unknown function id: {0}")]
    UnknownId(usize),
}

/// Errors that can occur while building a report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Invalid sort key: {0:?} (expected one of cc, nc, tt, ct, epc, ipc)")]
    InvalidSortKey(String),

    #[error("Invalid function id: {0:?}")]
    InvalidFunctionId(String),

    #[error("Invalid filter expression: {0}")]
    InvalidFilter(#[from] regex::Error),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors that can occur while loading a stats artifact
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read stats file: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid stats format: {0}")]
    InvalidFormat(String),

    #[error("Unsupported schema version: {0}")]
    UnsupportedVersion(String),

    #[error("Function listed twice: {0}")]
    DuplicateFunction(String),

    #[error("Caller {caller} of {callee} is not a profiled function")]
    UnknownCaller { caller: String, callee: String },
}

impl From<RegistryError> for LoadError {
    fn from(err: RegistryError) -> Self {
        LoadError::InvalidFormat(err.to_string())
    }
}

/// Errors that can occur while running the HTTP server
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
