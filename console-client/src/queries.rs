//! GraphQL documents for the permission API and the [`PermissionApi`]
//! implementation on [`GraphqlClient`].

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::IgnoredAny;
use serde_json::json;
use shared::models::{ListPayload, MenuNode, RolePermission, UserPermissionOverride};

use crate::{ClientResult, GraphqlClient, PermissionApi};

pub(crate) const GET_MENUS: &str = r#"
query GetMenus($page: Int!, $limit: Int!) {
  getMenus(page: $page, limit: $limit) {
    data { id name code parentId }
  }
}"#;

pub(crate) const GET_ROLE_PERMISSIONS: &str = r#"
query GetRolePermissions($roleId: ID!, $limit: Int!) {
  getRolePermissions(roleId: $roleId, limit: $limit) {
    data { roleId menuId canView canCreate canEdit canDelete }
  }
}"#;

pub(crate) const GET_USER_PERMISSIONS: &str = r#"
query GetUserPermissions($userId: ID!) {
  getUserPermissions(userId: $userId) {
    userId menuId canView canCreate canEdit canDelete
  }
}"#;

pub(crate) const UPDATE_PERMISSIONS: &str = r#"
mutation UpdatePermissions($input: [RolePermissionInput!]!) {
  updatePermissions(input: $input)
}"#;

pub(crate) const UPSERT_USER_PERMISSION: &str = r#"
mutation UpsertUserPermission($input: UserPermissionInput!) {
  upsertUserPermission(input: $input) { userId menuId }
}"#;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetMenusData {
    get_menus: Option<ListPayload<MenuNode>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetRolePermissionsData {
    get_role_permissions: Option<ListPayload<RolePermission>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetUserPermissionsData {
    get_user_permissions: Option<Vec<UserPermissionOverride>>,
}

#[async_trait]
impl PermissionApi for GraphqlClient {
    async fn get_menus(&self, page: u32, limit: u32) -> ClientResult<Vec<MenuNode>> {
        let data: GetMenusData = self
            .execute("GetMenus", GET_MENUS, json!({ "page": page, "limit": limit }))
            .await?;
        Ok(data.get_menus.map(|p| p.data).unwrap_or_default())
    }

    async fn get_role_permissions(
        &self,
        role_id: &str,
        limit: u32,
    ) -> ClientResult<Vec<RolePermission>> {
        let data: GetRolePermissionsData = self
            .execute(
                "GetRolePermissions",
                GET_ROLE_PERMISSIONS,
                json!({ "roleId": role_id, "limit": limit }),
            )
            .await?;
        Ok(data.get_role_permissions.map(|p| p.data).unwrap_or_default())
    }

    async fn get_user_permissions(
        &self,
        user_id: &str,
    ) -> ClientResult<Vec<UserPermissionOverride>> {
        let data: GetUserPermissionsData = self
            .execute(
                "GetUserPermissions",
                GET_USER_PERMISSIONS,
                json!({ "userId": user_id }),
            )
            .await?;
        Ok(data.get_user_permissions.unwrap_or_default())
    }

    async fn update_permissions(&self, input: Vec<RolePermission>) -> ClientResult<()> {
        let _: IgnoredAny = self
            .execute(
                "UpdatePermissions",
                UPDATE_PERMISSIONS,
                json!({ "input": input }),
            )
            .await?;
        Ok(())
    }

    async fn upsert_user_permission(&self, input: UserPermissionOverride) -> ClientResult<()> {
        let _: IgnoredAny = self
            .execute(
                "UpsertUserPermission",
                UPSERT_USER_PERMISSION,
                json!({ "input": input }),
            )
            .await?;
        Ok(())
    }
}
