//! Client error types

use shared::ErrorCode;
use thiserror::Error;

/// Transport-level classification shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkErrorKind {
    Timeout,
    Connectivity,
    Server,
    RateLimit,
    Unknown,
}

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request exceeded its timeout
    #[error("Request timed out")]
    Timeout,

    /// Could not reach the server
    #[error("Network error: {0}")]
    Network(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Server asked us to slow down (429)
    #[error("Too many requests")]
    RateLimited,

    /// Non-success HTTP status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Well-formed response that reports failure
    #[error("{0}")]
    Rejected(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() || err.is_request() {
            ClientError::Network(err.to_string())
        } else if err.is_decode() || err.is_body() {
            ClientError::InvalidResponse(err.to_string())
        } else if let Some(status) = err.status() {
            ClientError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ClientError::Internal(err.to_string())
        }
    }
}

impl ClientError {
    pub fn kind(&self) -> NetworkErrorKind {
        match self {
            Self::Timeout => NetworkErrorKind::Timeout,
            Self::Network(_) => NetworkErrorKind::Connectivity,
            Self::RateLimited => NetworkErrorKind::RateLimit,
            Self::Http { .. } | Self::Unauthorized | Self::Rejected(_) => NetworkErrorKind::Server,
            Self::InvalidResponse(_) | Self::Serialization(_) | Self::Internal(_) => {
                NetworkErrorKind::Unknown
            }
        }
    }

    /// Message from the server, when it sent one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Http { message, .. } | Self::Rejected(message) if !message.is_empty() => {
                Some(message.as_str())
            }
            _ => None,
        }
    }

    /// Message suitable for a toast
    pub fn user_message(&self) -> String {
        if let Some(message) = self.server_message() {
            return message.to_string();
        }
        match self {
            Self::Http { status, .. } => {
                format!("Server error ({}). Please try again later", status)
            }
            _ => self.error_code().message().to_string(),
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Timeout => ErrorCode::NetworkTimeout,
            Self::Network(_) => ErrorCode::NetworkUnavailable,
            Self::RateLimited => ErrorCode::RateLimited,
            Self::Unauthorized => ErrorCode::NotAuthenticated,
            Self::Http { .. } | Self::Rejected(_) => ErrorCode::ServerError,
            Self::InvalidResponse(_) | Self::Serialization(_) => ErrorCode::InvalidResponse,
            Self::Internal(_) => ErrorCode::InternalError,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
