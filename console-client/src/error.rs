//! Client error types

use shared::error::{AppError, ErrorCode};
use shared::graphql::GraphqlError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// The API answered with a GraphQL `errors` array
    #[error("GraphQL error [{code}]: {message}")]
    Graphql {
        code: ErrorCode,
        message: String,
        errors: Vec<GraphqlError>,
    },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Build a [`ClientError::Graphql`] from the response's error list
    pub fn from_graphql(errors: Vec<GraphqlError>) -> Self {
        let code = errors.first().map(GraphqlError::code).unwrap_or(ErrorCode::Unknown);
        let message = if errors.is_empty() {
            "GraphQL request failed".to_string()
        } else {
            errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ")
        };
        Self::Graphql {
            code,
            message,
            errors,
        }
    }

    /// Closest unified error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            Self::Http(e) => e
                .status()
                .map(ErrorCode::from_http_status)
                .unwrap_or(ErrorCode::NetworkError),
            Self::InvalidResponse(_) => ErrorCode::InvalidFormat,
            Self::Unauthorized => ErrorCode::NotAuthenticated,
            Self::Forbidden(_) => ErrorCode::PermissionDenied,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::Graphql { code, .. } => *code,
            Self::Internal(_) => ErrorCode::InternalError,
            Self::Serialization(_) => ErrorCode::InvalidFormat,
            Self::Config(_) => ErrorCode::ConfigError,
        }
    }

    /// Whether the same request may succeed if sent again unchanged
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Internal(_) => true,
            other => other.code().category().is_transient(),
        }
    }

    /// Operator-facing form of this error
    pub fn to_app_error(&self) -> AppError {
        AppError::with_message(self.code(), self.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
