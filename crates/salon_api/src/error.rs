// --- File: crates/salon_api/src/error.rs ---
use http::StatusCode;
use salon_common::{HttpStatusCode, SalonError};
use thiserror::Error;

/// Message used when the backend rejects the credential without explaining why.
pub const DEFAULT_AUTH_MESSAGE: &str = "Your session has expired, please sign in again";

/// Errors raised while talking to the salon REST API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Error occurred while sending the request or reading the response
    #[error("Salon API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The credential was missing, expired or not allowed for this call
    #[error("Salon API refused the credential (Status: {status_code})")]
    Unauthorized {
        status_code: u16,
        message: Option<String>,
    },

    /// Any other non-success status
    #[error("Salon API returned an error: {} (Status: {status_code})", .message.as_deref().unwrap_or("no details"))]
    Status {
        status_code: u16,
        message: Option<String>,
    },

    /// The response body did not have the expected shape
    #[error("Failed to parse Salon API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing or invalid API configuration
    #[error("Salon API configuration error: {0}")]
    ConfigError(String),
}

impl ApiError {
    /// Classifies a non-success response.
    pub fn from_status(status_code: u16, message: Option<String>) -> Self {
        if status_code == StatusCode::UNAUTHORIZED.as_u16()
            || status_code == StatusCode::FORBIDDEN.as_u16()
        {
            ApiError::Unauthorized {
                status_code,
                message,
            }
        } else {
            ApiError::Status {
                status_code,
                message,
            }
        }
    }
}

/// Convert ApiError to SalonError
impl From<ApiError> for SalonError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::RequestError(e) => SalonError::from(e),
            ApiError::Unauthorized { message, .. } => SalonError::AuthError(
                message.unwrap_or_else(|| DEFAULT_AUTH_MESSAGE.to_string()),
            ),
            ApiError::Status {
                status_code,
                message,
            } => SalonError::Rejected {
                status_code,
                message,
            },
            ApiError::ParseError(e) => {
                SalonError::ParseError(format!("Salon API response parse error: {}", e))
            }
            ApiError::ConfigError(msg) => SalonError::ConfigError(msg),
        }
    }
}

impl HttpStatusCode for ApiError {
    fn status_code(&self) -> u16 {
        match self {
            ApiError::RequestError(_) => 502,
            ApiError::Unauthorized { status_code, .. } => *status_code,
            ApiError::Status { status_code, .. } => *status_code,
            ApiError::ParseError(_) => 502,
            ApiError::ConfigError(_) => 500,
        }
    }
}
