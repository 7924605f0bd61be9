//! Menu Model

use serde::{Deserialize, Serialize};

pub type MenuId = String;

/// A navigable module of the console
///
/// Menus form a shallow forest: top-level modules and their children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuNode {
    pub id: MenuId,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub parent_id: Option<MenuId>,
}

impl MenuNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            code: code.into(),
            parent_id: None,
        }
    }

    /// Attach this node under `parent_id`
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Paginated list payload (`{ data: [...] }`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPayload<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}
