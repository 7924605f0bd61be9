//! GraphQL envelope types
//!
//! Request/response wrappers used between the console API and its clients.
//! A response carries `data`, `errors`, or both (partial success).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, ErrorCode};

/// GraphQL request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest<V> {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    pub variables: V,
}

impl<V> GraphqlRequest<V> {
    pub fn new(query: impl Into<String>, variables: V) -> Self {
        Self {
            query: query.into(),
            operation_name: None,
            variables,
        }
    }

    pub fn with_operation(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }
}

/// GraphQL response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphqlError>,
}

impl<T> GraphqlResponse<T> {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// One entry of the `errors` array
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl GraphqlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Vec::new(),
            extensions: None,
        }
    }

    /// Error code from `extensions.code`, numeric or the common string forms
    pub fn code(&self) -> ErrorCode {
        let Some(code) = self.extensions.as_ref().and_then(|e| e.get("code")) else {
            return ErrorCode::Unknown;
        };
        if let Some(n) = code.as_u64() {
            return u16::try_from(n)
                .ok()
                .and_then(|n| ErrorCode::try_from(n).ok())
                .unwrap_or(ErrorCode::Unknown);
        }
        match code.as_str() {
            Some("UNAUTHENTICATED") => ErrorCode::NotAuthenticated,
            Some("FORBIDDEN") => ErrorCode::PermissionDenied,
            Some("NOT_FOUND") => ErrorCode::NotFound,
            Some("BAD_USER_INPUT") | Some("GRAPHQL_VALIDATION_FAILED") => {
                ErrorCode::ValidationFailed
            }
            Some("INTERNAL_SERVER_ERROR") => ErrorCode::InternalError,
            _ => ErrorCode::Unknown,
        }
    }
}

impl From<&GraphqlError> for AppError {
    fn from(err: &GraphqlError) -> Self {
        AppError::with_message(err.code(), err.message.clone())
    }
}
