//! Console Client - GraphQL client for the admin console API
//!
//! Provides the [`PermissionApi`] contract the permission editors are
//! written against, and [`GraphqlClient`], its network implementation.

pub mod api;
pub mod config;
pub mod error;
pub mod graphql;
mod queries;

pub use api::PermissionApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use graphql::GraphqlClient;

// Re-export shared types for convenience
pub use shared::models::{MenuNode, RolePermission, UserPermissionOverride};
