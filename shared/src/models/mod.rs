//! Data models
//!
//! Shared between the GraphQL client and the permission editor.
//! Field names follow the API's camelCase; all IDs are GraphQL `ID` strings.

pub mod menu;
pub mod permission;
pub mod role;
pub mod user_permission;

// Re-exports
pub use menu::*;
pub use permission::*;
pub use role::*;
pub use user_permission::*;
