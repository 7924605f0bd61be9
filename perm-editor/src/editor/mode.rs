//! Editor mode markers
//!
//! [`RoleMode`] edits a role's boolean baseline. [`UserMode`] edits one
//! user's tri-state overrides on top of the role baseline. The controller is
//! generic over the mode, so each editor only exposes the value type and
//! target that make sense for it.

use async_trait::async_trait;
use console_client::{ClientResult, PermissionApi};
use shared::models::{
    MenuId, PermissionSet, PermissionValue, RoleId, RolePermission, TriState, UserId,
    UserPermissionOverride,
};
use std::fmt;

use crate::resolver;
use crate::store::{OverrideStore, PermissionStore, RoleStore};

// ============================================================================
// Targets
// ============================================================================

/// Role whose baseline is being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleTarget {
    pub role_id: RoleId,
}

impl RoleTarget {
    pub fn new(role_id: impl Into<String>) -> Self {
        Self {
            role_id: role_id.into(),
        }
    }
}

/// User whose overrides are being edited, with the role they inherit from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTarget {
    pub user_id: UserId,
    pub role_id: RoleId,
}

impl UserTarget {
    pub fn new(user_id: impl Into<String>, role_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role_id: role_id.into(),
        }
    }
}

// ============================================================================
// Mode Markers
// ============================================================================

/// Role editor mode - boolean values, batched save.
#[derive(Debug, Clone, Copy)]
pub struct RoleMode;

/// User editor mode - tri-state overrides, one upsert per menu on save.
#[derive(Debug, Clone, Copy)]
pub struct UserMode;

/// Sealed trait for editor modes.
#[async_trait]
pub trait EditorMode: private::Sealed + Send + Sync + 'static {
    /// What `open` is called with
    type Target: Clone + fmt::Debug + Send + Sync + 'static;

    /// Value stored in the edited records
    type Value: PermissionValue;

    /// Mode name used in logs
    const NAME: &'static str;

    /// Role whose baseline is loaded
    fn role_id(target: &Self::Target) -> &str;

    /// User being edited, if any
    fn user_id(target: &Self::Target) -> Option<&str>;

    /// Fetch the user's overrides; `None` when the mode has none
    async fn fetch_overrides<A>(
        api: &A,
        target: &Self::Target,
    ) -> Option<ClientResult<Vec<UserPermissionOverride>>>
    where
        A: PermissionApi + ?Sized;

    /// Build the editable store from the fetched records
    fn seed(
        roles: &[RolePermission],
        overrides: &[UserPermissionOverride],
    ) -> PermissionStore<Self::Value>;

    /// Effective permission as shown to the operator
    fn effective(
        baseline: &RoleStore,
        edits: &PermissionStore<Self::Value>,
        menu_id: &str,
    ) -> PermissionSet<bool>;

    /// Write the dirty menus back; returns the number of records written
    async fn submit<A>(
        api: &A,
        target: &Self::Target,
        edits: &PermissionStore<Self::Value>,
        dirty: &[MenuId],
    ) -> ClientResult<usize>
    where
        A: PermissionApi + ?Sized;
}

#[async_trait]
impl EditorMode for RoleMode {
    type Target = RoleTarget;
    type Value = bool;

    const NAME: &'static str = "role";

    fn role_id(target: &RoleTarget) -> &str {
        &target.role_id
    }

    fn user_id(_target: &RoleTarget) -> Option<&str> {
        None
    }

    async fn fetch_overrides<A>(
        _api: &A,
        _target: &RoleTarget,
    ) -> Option<ClientResult<Vec<UserPermissionOverride>>>
    where
        A: PermissionApi + ?Sized,
    {
        None
    }

    fn seed(roles: &[RolePermission], _overrides: &[UserPermissionOverride]) -> RoleStore {
        RoleStore::from_role_records(roles)
    }

    fn effective(_baseline: &RoleStore, edits: &RoleStore, menu_id: &str) -> PermissionSet<bool> {
        resolver::effective(edits, None, menu_id)
    }

    async fn submit<A>(
        api: &A,
        target: &RoleTarget,
        edits: &RoleStore,
        dirty: &[MenuId],
    ) -> ClientResult<usize>
    where
        A: PermissionApi + ?Sized,
    {
        let records = edits.to_role_records(&target.role_id, dirty);
        let written = records.len();
        api.update_permissions(records).await?;
        Ok(written)
    }
}

#[async_trait]
impl EditorMode for UserMode {
    type Target = UserTarget;
    type Value = TriState;

    const NAME: &'static str = "user";

    fn role_id(target: &UserTarget) -> &str {
        &target.role_id
    }

    fn user_id(target: &UserTarget) -> Option<&str> {
        Some(&target.user_id)
    }

    async fn fetch_overrides<A>(
        api: &A,
        target: &UserTarget,
    ) -> Option<ClientResult<Vec<UserPermissionOverride>>>
    where
        A: PermissionApi + ?Sized,
    {
        Some(api.get_user_permissions(&target.user_id).await)
    }

    fn seed(_roles: &[RolePermission], overrides: &[UserPermissionOverride]) -> OverrideStore {
        OverrideStore::from_overrides(overrides)
    }

    fn effective(
        baseline: &RoleStore,
        edits: &OverrideStore,
        menu_id: &str,
    ) -> PermissionSet<bool> {
        resolver::effective(baseline, Some(edits), menu_id)
    }

    async fn submit<A>(
        api: &A,
        target: &UserTarget,
        edits: &OverrideStore,
        dirty: &[MenuId],
    ) -> ClientResult<usize>
    where
        A: PermissionApi + ?Sized,
    {
        let mut written = 0;
        for record in edits.to_overrides(&target.user_id, dirty) {
            api.upsert_user_permission(record).await?;
            written += 1;
        }
        Ok(written)
    }
}

mod private {
    pub trait Sealed {}
    impl Sealed for super::RoleMode {}
    impl Sealed for super::UserMode {}
}
