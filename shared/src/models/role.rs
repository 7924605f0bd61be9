//! Role permission Model

use super::menu::MenuId;
use super::permission::PermissionSet;
use serde::{Deserialize, Serialize};

pub type RoleId = String;

/// Role-level permission on one menu (the baseline every holder gets)
///
/// A missing record means every flag is off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePermission {
    pub role_id: RoleId,
    pub menu_id: MenuId,
    #[serde(default)]
    pub can_view: bool,
    #[serde(default)]
    pub can_create: bool,
    #[serde(default)]
    pub can_edit: bool,
    #[serde(default)]
    pub can_delete: bool,
}

impl RolePermission {
    pub fn from_set(
        role_id: impl Into<String>,
        menu_id: impl Into<String>,
        set: PermissionSet<bool>,
    ) -> Self {
        Self {
            role_id: role_id.into(),
            menu_id: menu_id.into(),
            can_view: set.can_view,
            can_create: set.can_create,
            can_edit: set.can_edit,
            can_delete: set.can_delete,
        }
    }

    pub fn set(&self) -> PermissionSet<bool> {
        PermissionSet {
            can_view: self.can_view,
            can_create: self.can_create,
            can_edit: self.can_edit,
            can_delete: self.can_delete,
        }
    }
}
