#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use console_client::{ClientError, ClientResult, PermissionApi};
use perm_editor::{EditorConfig, SessionContext};
use shared::models::{MenuNode, RolePermission, TriState, UserPermissionOverride};
use tokio::sync::Notify;

/// One recorded API call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetMenus { page: u32, limit: u32 },
    GetRolePermissions { role_id: String, limit: u32 },
    GetUserPermissions { user_id: String },
    UpdatePermissions(Vec<RolePermission>),
    UpsertUserPermission(UserPermissionOverride),
}

/// Holds the next call at the door until released
#[derive(Default)]
pub struct Gate {
    armed: AtomicBool,
    entered: Notify,
    release: Notify,
}

impl Gate {
    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }

    async fn pass(&self) {
        if self.armed.swap(false, Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
    }
}

/// In-memory API with a call log and switchable failures
#[derive(Default)]
pub struct MockApi {
    menus: Vec<MenuNode>,
    roles: Vec<RolePermission>,
    overrides: Vec<UserPermissionOverride>,
    calls: Mutex<Vec<Call>>,
    pub fail_menus: AtomicBool,
    pub fail_roles: AtomicBool,
    pub fail_overrides: AtomicBool,
    pub fail_writes: AtomicBool,
    pub menus_gate: Gate,
    pub write_gate: Gate,
}

impl MockApi {
    pub fn new(menus: Vec<MenuNode>) -> Self {
        Self {
            menus,
            ..Default::default()
        }
    }

    pub fn with_roles(mut self, roles: Vec<RolePermission>) -> Self {
        self.roles = roles;
        self
    }

    pub fn with_overrides(mut self, overrides: Vec<UserPermissionOverride>) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::UpdatePermissions(_) | Call::UpsertUserPermission(_)))
            .collect()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(flag: &AtomicBool, what: &str) -> ClientResult<()> {
        if flag.load(Ordering::SeqCst) {
            Err(ClientError::Internal(format!("{what} unavailable")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PermissionApi for MockApi {
    async fn get_menus(&self, page: u32, limit: u32) -> ClientResult<Vec<MenuNode>> {
        self.record(Call::GetMenus { page, limit });
        self.menus_gate.pass().await;
        Self::check(&self.fail_menus, "menus")?;
        Ok(self.menus.clone())
    }

    async fn get_role_permissions(
        &self,
        role_id: &str,
        limit: u32,
    ) -> ClientResult<Vec<RolePermission>> {
        self.record(Call::GetRolePermissions {
            role_id: role_id.to_string(),
            limit,
        });
        Self::check(&self.fail_roles, "role permissions")?;
        Ok(self
            .roles
            .iter()
            .filter(|r| r.role_id == role_id)
            .cloned()
            .collect())
    }

    async fn get_user_permissions(
        &self,
        user_id: &str,
    ) -> ClientResult<Vec<UserPermissionOverride>> {
        self.record(Call::GetUserPermissions {
            user_id: user_id.to_string(),
        });
        Self::check(&self.fail_overrides, "user permissions")?;
        Ok(self
            .overrides
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update_permissions(&self, input: Vec<RolePermission>) -> ClientResult<()> {
        self.record(Call::UpdatePermissions(input));
        self.write_gate.pass().await;
        Self::check(&self.fail_writes, "update")
    }

    async fn upsert_user_permission(&self, input: UserPermissionOverride) -> ClientResult<()> {
        self.record(Call::UpsertUserPermission(input));
        self.write_gate.pass().await;
        Self::check(&self.fail_writes, "upsert")
    }
}

// ========================================================================
// Fixtures
// ========================================================================

/// `p` (Pricing) with children `c1`, `c2`; `q` (Reports) standalone
pub fn menus() -> Vec<MenuNode> {
    vec![
        MenuNode::new("p", "Pricing", "PRICING"),
        MenuNode::new("c1", "Room Rates", "RATES").with_parent("p"),
        MenuNode::new("c2", "Seasons", "SEASONS").with_parent("p"),
        MenuNode::new("q", "Reports", "REPORTS"),
    ]
}

pub fn role_record(role_id: &str, menu_id: &str, view: bool, edit: bool) -> RolePermission {
    RolePermission {
        role_id: role_id.into(),
        menu_id: menu_id.into(),
        can_view: view,
        can_create: false,
        can_edit: edit,
        can_delete: false,
    }
}

pub fn override_record(user_id: &str, menu_id: &str, view: TriState) -> UserPermissionOverride {
    UserPermissionOverride {
        user_id: user_id.into(),
        menu_id: menu_id.into(),
        can_view: view,
        can_create: TriState::Inherit,
        can_edit: TriState::Inherit,
        can_delete: TriState::Inherit,
    }
}

pub fn session() -> SessionContext {
    SessionContext::new("op-1", "Front Desk Admin")
}

pub fn config() -> EditorConfig {
    EditorConfig::default()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
