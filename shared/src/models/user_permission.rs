//! User permission override Model

use super::menu::MenuId;
use super::permission::{PermissionSet, TriState};
use serde::{Deserialize, Serialize};

pub type UserId = String;

/// User-specific exception to the role baseline on one menu
///
/// Each flag is `null` (inherit), `true` or `false` on the wire. A missing
/// record means the user inherits everything from the role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPermissionOverride {
    pub user_id: UserId,
    pub menu_id: MenuId,
    #[serde(default)]
    pub can_view: TriState,
    #[serde(default)]
    pub can_create: TriState,
    #[serde(default)]
    pub can_edit: TriState,
    #[serde(default)]
    pub can_delete: TriState,
}

impl UserPermissionOverride {
    pub fn from_set(
        user_id: impl Into<String>,
        menu_id: impl Into<String>,
        set: PermissionSet<TriState>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            menu_id: menu_id.into(),
            can_view: set.can_view,
            can_create: set.can_create,
            can_edit: set.can_edit,
            can_delete: set.can_delete,
        }
    }

    pub fn set(&self) -> PermissionSet<TriState> {
        PermissionSet {
            can_view: self.can_view,
            can_create: self.can_create,
            can_edit: self.can_edit,
            can_delete: self.can_delete,
        }
    }
}
