//! Shared types for the admin console
//!
//! Data models exchanged with the GraphQL API (menus, role permissions,
//! user overrides), the unified error system, and the GraphQL envelope.

pub mod error;
pub mod graphql;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use graphql::{GraphqlError, GraphqlRequest, GraphqlResponse};
