//! Error Handling Infrastructure
//!
//! This module defines all error types used throughout staffdesk.
//! Every failure path funnels into [`StaffdeskError`] and propagates to the
//! process boundary; there is no retry or recovery flow.
//!
//! # Error Categories
//! - `ConfigError`: Configuration file or environment variable errors
//! - `ConnectionFailed`: Database connection errors
//! - `QueryFailed`: Query execution errors
//! - `InvalidInput`: Malformed input or unsatisfiable selections
//! - `PromptFailed`: Terminal prompt errors (closed stdin, broken pipe)

use thiserror::Error;

/// Main error type for staffdesk operations
#[derive(Error, Debug)]
pub enum StaffdeskError {
    /// Configuration error (invalid JSON, missing environment variable, etc.)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Database connection failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query execution failed: {0}")]
    QueryFailed(String),

    /// Invalid input or unsatisfiable selection (e.g. empty picklist)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Terminal prompt failed
    #[error("Prompt failed: {0}")]
    PromptFailed(#[from] dialoguer::Error),
}

impl StaffdeskError {
    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Create a connection failed error
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::ConnectionFailed(message.into())
    }

    /// Create a query failed error
    pub fn query_failed(message: impl Into<String>) -> Self {
        Self::QueryFailed(message.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// Result type alias for staffdesk operations
pub type Result<T> = std::result::Result<T, StaffdeskError>;
