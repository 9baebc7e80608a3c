//! Common types and errors for docdex
//!
//! This crate provides the shared error type and telemetry setup used across
//! all docdex components.

pub mod telemetry;

use thiserror::Error;

/// Core error types for docdex operations
#[derive(Error, Debug)]
pub enum DocdexError {
    #[error("Library {library} not supported by this tool")]
    UnsupportedLibrary { library: String },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid input: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, DocdexError>;

/// Exit code constants for the CLI
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_USAGE: i32 = 2;
pub const EXIT_CONFIG_ERROR: i32 = 101;
