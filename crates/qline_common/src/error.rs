// --- File: crates/qline_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for service-level qline errors.
///
/// Domain crates keep their own error enums and convert into this one at the
/// service boundary, where it is mapped onto an HTTP status.
#[derive(Error, Debug)]
pub enum QlineError {
    /// Error occurred while parsing request data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during authentication or authorization
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to a timeout
    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for QlineError {
    fn status_code(&self) -> u16 {
        match self {
            QlineError::ParseError(_) => 400,
            QlineError::ConfigError(_) => 500,
            QlineError::AuthError(_) => 401,
            QlineError::ValidationError(_) => 400,
            QlineError::NotFoundError(_) => 404,
            QlineError::TimeoutError(_) => 504,
            QlineError::InternalError(_) => 500,
        }
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, QlineError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, QlineError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, QlineError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| QlineError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, QlineError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| QlineError::InternalError(format!("{}: {}", f(), error)))
    }
}

impl From<qline_config::ConfigModelError> for QlineError {
    fn from(err: qline_config::ConfigModelError) -> Self {
        QlineError::ConfigError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> QlineError {
    QlineError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> QlineError {
    QlineError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> QlineError {
    QlineError::NotFoundError(message.to_string())
}

pub fn parse_error<T: fmt::Display>(message: T) -> QlineError {
    QlineError::ParseError(message.to_string())
}
