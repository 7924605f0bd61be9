//! Editor configuration

/// Paging used when an editor loads its data
///
/// The menu list is requested as one page large enough to hold every menu.
///
/// # Environment variables
///
/// | Variable | Default |
/// |----------|---------|
/// | EDITOR_MENU_LIMIT | 1000 |
/// | EDITOR_ROLE_PERMISSION_LIMIT | 1000 |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Page requested from `GetMenus`
    pub menu_page: u32,
    /// Page size requested from `GetMenus`
    pub menu_limit: u32,
    /// Limit passed to `GetRolePermissions`
    pub role_permission_limit: u32,
}

impl EditorConfig {
    pub const DEFAULT_LIMIT: u32 = 1000;

    pub fn new() -> Self {
        Self {
            menu_page: 1,
            menu_limit: Self::DEFAULT_LIMIT,
            role_permission_limit: Self::DEFAULT_LIMIT,
        }
    }

    /// Load limits from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let limit = |name: &str| {
            std::env::var(name)
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(Self::DEFAULT_LIMIT)
        };
        Self {
            menu_page: 1,
            menu_limit: limit("EDITOR_MENU_LIMIT"),
            role_permission_limit: limit("EDITOR_ROLE_PERMISSION_LIMIT"),
        }
    }

    pub fn with_menu_limit(mut self, limit: u32) -> Self {
        self.menu_limit = limit;
        self
    }

    pub fn with_role_permission_limit(mut self, limit: u32) -> Self {
        self.role_permission_limit = limit;
        self
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}
