//! Permission Editor - menu permission resolution and editing
//!
//! # Components
//!
//! - [`MenuTree`]: validated menu forest
//! - [`PermissionStore`]: permission tuples of one session
//! - [`resolver`]: effective permissions and invariant-enforcing edits
//! - [`ChangeTracker`]: menus with unsaved edits
//! - [`PermissionEditor`]: role and user editors over a [`PermissionApi`]
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use console_client::{ClientConfig, GraphqlClient};
//! use perm_editor::{EditorConfig, RoleEditor, RoleTarget, SessionContext};
//! use shared::models::PermissionField;
//!
//! let api = Arc::new(GraphqlClient::new(&ClientConfig::from_env())?);
//! let session = SessionContext::new("u-1", "admin");
//! let editor = RoleEditor::new(api, session, EditorConfig::from_env());
//!
//! editor.open(RoleTarget::new("r-1")).await?;
//! editor.set_permission("rates", PermissionField::Edit, true).await?;
//! editor.save().await?;
//! ```
//!
//! [`PermissionApi`]: console_client::PermissionApi

pub mod config;
pub mod editor;
pub mod error;
pub mod resolver;
pub mod session;
pub mod store;
pub mod tracker;
pub mod tree;

pub use config::EditorConfig;
pub use editor::{
    EditorMode, EditorState, FetchFailure, FetchSource, OpenReport, PermissionEditor, RoleEditor,
    RoleMode, RoleTarget, SaveOutcome, UserEditor, UserMode, UserTarget,
};
pub use error::{EditorError, EditorResult};
pub use session::SessionContext;
pub use store::{OverrideStore, PermissionStore, RoleStore};
pub use tracker::ChangeTracker;
pub use tree::{DroppedMenu, MenuTree};
