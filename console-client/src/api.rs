//! Permission API contract
//!
//! The editors only ever talk to the server through this trait, so tests
//! and other transports can stand in for [`crate::GraphqlClient`].

use async_trait::async_trait;
use shared::models::{MenuNode, RolePermission, UserPermissionOverride};

use crate::ClientResult;

/// Reads and writes permission records on the console API
#[async_trait]
pub trait PermissionApi: Send + Sync {
    /// `GetMenus(page, limit)`: the menu list
    async fn get_menus(&self, page: u32, limit: u32) -> ClientResult<Vec<MenuNode>>;

    /// `GetRolePermissions(roleId, limit)`: a role's explicit records
    async fn get_role_permissions(
        &self,
        role_id: &str,
        limit: u32,
    ) -> ClientResult<Vec<RolePermission>>;

    /// `GetUserPermissions(userId)`: a user's overrides
    async fn get_user_permissions(&self, user_id: &str)
    -> ClientResult<Vec<UserPermissionOverride>>;

    /// `UpdatePermissions(input)`: batched role upsert
    async fn update_permissions(&self, input: Vec<RolePermission>) -> ClientResult<()>;

    /// `UpsertUserPermission(input)`: one user override
    async fn upsert_user_permission(&self, input: UserPermissionOverride) -> ClientResult<()>;
}
