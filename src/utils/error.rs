//! Error handling for tabledraw conversions
//!
//! This module provides a unified error type and result type for all
//! conversion operations and AI prompt flows.

use thiserror::Error;

/// Conversion error type
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConversionError {
    /// Input was empty or whitespace only
    #[error("Input is empty")]
    EmptyInput,
    /// Input matched no known table format
    #[error("Parse error: {message}")]
    ParseError { message: String },
    /// Invalid input to an operation
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
    /// The text-generation backend failed
    #[error("Service error: {message}")]
    ServiceError { message: String },
    /// The text-generation backend replied with data that does not fit the output schema
    #[error("Schema mismatch: {message}")]
    SchemaMismatch { message: String },
    /// IO error (for file operations)
    #[error("IO error: {message}")]
    IoError { message: String },
    /// Invalid layout configuration
    #[error("Config error: {message}")]
    ConfigError { message: String },
    /// Internal error
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl From<std::io::Error> for ConversionError {
    fn from(err: std::io::Error) -> Self {
        ConversionError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

// Convenience constructors for errors
impl ConversionError {
    pub fn parse(message: impl Into<String>) -> Self {
        ConversionError::ParseError {
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ConversionError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn service(message: impl Into<String>) -> Self {
        ConversionError::ServiceError {
            message: message.into(),
        }
    }

    pub fn schema(message: impl Into<String>) -> Self {
        ConversionError::SchemaMismatch {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        ConversionError::ConfigError {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ConversionError::InternalError {
            message: message.into(),
        }
    }

    /// Whether this error means the input was not recognised as a table
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, ConversionError::ParseError { .. })
    }
}
