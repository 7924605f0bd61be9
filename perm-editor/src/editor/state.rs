//! Editor lifecycle state and operation reports

use shared::error::AppError;
use std::fmt;

/// Editor lifecycle
///
/// `Closed -> Loading -> Ready -> Saving -> (Ready | Closed)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorState {
    #[default]
    Closed,
    Loading,
    Ready,
    Saving,
}

impl EditorState {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Saving => "saving",
        }
    }
}

impl fmt::Display for EditorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which load request failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSource {
    Menus,
    RolePermissions,
    UserPermissions,
}

impl fmt::Display for FetchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Menus => "menus",
            Self::RolePermissions => "role_permissions",
            Self::UserPermissions => "user_permissions",
        })
    }
}

/// A load request that failed; its data was treated as empty
#[derive(Debug, Clone)]
pub struct FetchFailure {
    pub source: FetchSource,
    pub error: AppError,
}

/// Result of [`open`](super::PermissionEditor::open)
#[derive(Debug, Clone, Default)]
pub struct OpenReport {
    /// Menus in the loaded tree
    pub menus: usize,
    /// Permission records seeded into the editable store
    pub records: usize,
    pub failures: Vec<FetchFailure>,
    /// The editor was closed or re-opened before loading finished and the
    /// loaded data was dropped
    pub stale: bool,
}

impl OpenReport {
    pub fn is_complete(&self) -> bool {
        !self.stale && self.failures.is_empty()
    }
}

/// Result of [`save`](super::PermissionEditor::save)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// No dirty menus; nothing was sent
    NothingToSave,
    /// `written` records were sent
    Saved { written: usize },
}
