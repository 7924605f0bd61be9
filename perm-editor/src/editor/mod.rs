//! Role and user permission editors
//!
//! [`PermissionEditor`] drives one editing session: load, edit through the
//! resolver, track dirty menus, save. The mode marker picks the record type
//! and the save strategy.

mod controller;
mod mode;
mod state;

pub use controller::{PermissionEditor, RoleEditor, UserEditor};
pub use mode::{EditorMode, RoleMode, RoleTarget, UserMode, UserTarget};
pub use state::{EditorState, FetchFailure, FetchSource, OpenReport, SaveOutcome};
