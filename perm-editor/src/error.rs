//! Editor error types

use console_client::ClientError;
use shared::error::{AppError, ErrorCode};
use shared::models::{MenuId, PermissionField};
use thiserror::Error;

use crate::editor::EditorState;

/// Errors raised by the permission editors
#[derive(Debug, Error)]
pub enum EditorError {
    /// Operation not allowed in the current editor state
    #[error("Editor is {actual}, expected {expected}")]
    InvalidState {
        expected: EditorState,
        actual: EditorState,
    },

    /// Save requested while another save is in flight
    #[error("A save is already in progress")]
    SaveInProgress,

    /// Only view can be edited on a menu that has children
    #[error("{field} cannot be edited on menu group {menu_id}")]
    FieldNotEditable {
        menu_id: MenuId,
        field: PermissionField,
    },

    /// Menu id not present in the loaded tree
    #[error("Unknown menu: {0}")]
    UnknownMenu(MenuId),

    /// Menu list from the API does not form a tree
    #[error("Invalid menu tree: {0}")]
    InvalidMenuTree(String),

    /// Writing permissions back to the API failed
    #[error("Save failed: {0}")]
    Save(#[source] ClientError),
}

impl EditorError {
    /// Closest unified error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidState { .. } | Self::SaveInProgress => ErrorCode::EditorBusy,
            Self::FieldNotEditable { .. } => ErrorCode::PermissionFieldLocked,
            Self::UnknownMenu(_) => ErrorCode::MenuNotFound,
            Self::InvalidMenuTree(_) => ErrorCode::MenuTreeInvalid,
            Self::Save(e) => e.code(),
        }
    }

    /// Operator-facing notification for this error
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::with_message(self.code(), self.to_string());
        match self {
            Self::FieldNotEditable { menu_id, field } => err
                .with_detail("menuId", menu_id.clone())
                .with_detail("field", field.name()),
            Self::UnknownMenu(menu_id) => err.with_detail("menuId", menu_id.clone()),
            _ => err,
        }
    }
}

/// Result type for editor operations
pub type EditorResult<T> = Result<T, EditorError>;
