// --- File: crates/salon_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for the salon booking client.
///
/// Each crate can extend this by implementing From<SpecificError> for SalonError.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SalonError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The backend refused the credential, or none was presented
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Input rejected before reaching the backend
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Durable client-side storage could not be read or written
    #[error("Storage error: {0}")]
    StorageError(String),

    /// The backend answered with a non-success status.
    ///
    /// `message` is the backend's own `error` text when the body carried one.
    #[error("Request rejected with status {status_code}: {}", .message.as_deref().unwrap_or("no details"))]
    Rejected {
        status_code: u16,
        message: Option<String>,
    },

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

impl SalonError {
    /// The backend's own explanation for a rejected request, if it sent one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            SalonError::Rejected { message, .. } => message.as_deref(),
            SalonError::AuthError(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Whether this error means the current credential is no longer accepted.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, SalonError::AuthError(_))
    }
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for SalonError {
    fn status_code(&self) -> u16 {
        match self {
            SalonError::HttpError(_) => 502,
            SalonError::ParseError(_) => 502,
            SalonError::ConfigError(_) => 500,
            SalonError::AuthError(_) => 401,
            SalonError::ValidationError(_) => 400,
            SalonError::StorageError(_) => 500,
            SalonError::Rejected { status_code, .. } => *status_code,
            SalonError::NotFoundError(_) => 404,
            SalonError::TimeoutError(_) => 504,
            SalonError::InternalError(_) => 500,
        }
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, SalonError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, SalonError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, SalonError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| SalonError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, SalonError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| SalonError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Common error conversions
impl From<reqwest::Error> for SalonError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SalonError::TimeoutError(err.to_string())
        } else {
            SalonError::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SalonError {
    fn from(err: serde_json::Error) -> Self {
        SalonError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for SalonError {
    fn from(err: std::io::Error) -> Self {
        SalonError::StorageError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> SalonError {
    SalonError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> SalonError {
    SalonError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> SalonError {
    SalonError::NotFoundError(message.to_string())
}

pub fn storage_error<T: fmt::Display>(message: T) -> SalonError {
    SalonError::StorageError(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> SalonError {
    SalonError::InternalError(message.to_string())
}
