//! Permission tuple primitives
//!
//! A permission record is four flags (view/create/edit/delete) on one menu.
//! Role records hold plain booleans; user overrides hold a [`TriState`]
//! where `Inherit` defers to the role. Both share [`PermissionSet`] so the
//! cross-field rules are written once.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four permission flags on a menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PermissionField {
    #[serde(rename = "canView")]
    View,
    #[serde(rename = "canCreate")]
    Create,
    #[serde(rename = "canEdit")]
    Edit,
    #[serde(rename = "canDelete")]
    Delete,
}

impl PermissionField {
    /// All fields, view first
    pub const ALL: [PermissionField; 4] = [Self::View, Self::Create, Self::Edit, Self::Delete];

    /// Fields that require view
    pub const ACTIONS: [PermissionField; 3] = [Self::Create, Self::Edit, Self::Delete];

    /// Wire name (GraphQL field name)
    pub const fn name(&self) -> &'static str {
        match self {
            Self::View => "canView",
            Self::Create => "canCreate",
            Self::Edit => "canEdit",
            Self::Delete => "canDelete",
        }
    }
}

impl fmt::Display for PermissionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// User-level override value
///
/// Serialized as `null` (inherit), `true` (allow) or `false` (deny).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum TriState {
    /// Use the role's value
    #[default]
    Inherit,
    Allow,
    Deny,
}

impl TriState {
    /// Next value of the toggle button: Inherit -> Allow -> Deny -> Inherit
    pub const fn cycle(self) -> Self {
        match self {
            Self::Inherit => Self::Allow,
            Self::Allow => Self::Deny,
            Self::Deny => Self::Inherit,
        }
    }

    /// Resolve against the role baseline
    pub const fn resolve(self, baseline: bool) -> bool {
        match self {
            Self::Inherit => baseline,
            Self::Allow => true,
            Self::Deny => false,
        }
    }

    pub const fn as_option(self) -> Option<bool> {
        match self {
            Self::Inherit => None,
            Self::Allow => Some(true),
            Self::Deny => Some(false),
        }
    }

    pub const fn is_inherit(self) -> bool {
        matches!(self, Self::Inherit)
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Self::Inherit,
            Some(true) => Self::Allow,
            Some(false) => Self::Deny,
        }
    }
}

impl From<TriState> for Option<bool> {
    fn from(value: TriState) -> Self {
        value.as_option()
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value { Self::Allow } else { Self::Deny }
    }
}

/// Value stored in one permission field
///
/// Implemented for `bool` (role records) and [`TriState`] (user overrides).
pub trait PermissionValue:
    Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static
{
    /// The value that grants the permission
    fn allow() -> Self;
    /// The value that explicitly withholds the permission
    fn deny() -> Self;
    fn is_allow(self) -> bool;
    fn is_deny(self) -> bool;
    /// Value after one click on the field's toggle
    fn toggled(self) -> Self;
}

impl PermissionValue for bool {
    fn allow() -> Self {
        true
    }
    fn deny() -> Self {
        false
    }
    fn is_allow(self) -> bool {
        self
    }
    fn is_deny(self) -> bool {
        !self
    }
    fn toggled(self) -> Self {
        !self
    }
}

impl PermissionValue for TriState {
    fn allow() -> Self {
        TriState::Allow
    }
    fn deny() -> Self {
        TriState::Deny
    }
    fn is_allow(self) -> bool {
        self == TriState::Allow
    }
    fn is_deny(self) -> bool {
        self == TriState::Deny
    }
    fn toggled(self) -> Self {
        self.cycle()
    }
}

/// The four permission flags of one menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSet<V> {
    pub can_view: V,
    pub can_create: V,
    pub can_edit: V,
    pub can_delete: V,
}

impl<V: PermissionValue> PermissionSet<V> {
    /// Every field set to `value`
    pub fn uniform(value: V) -> Self {
        Self {
            can_view: value,
            can_create: value,
            can_edit: value,
            can_delete: value,
        }
    }

    /// Every field allowed
    pub fn all_allowed() -> Self {
        Self::uniform(V::allow())
    }

    pub fn get(&self, field: PermissionField) -> V {
        match field {
            PermissionField::View => self.can_view,
            PermissionField::Create => self.can_create,
            PermissionField::Edit => self.can_edit,
            PermissionField::Delete => self.can_delete,
        }
    }

    fn slot(&mut self, field: PermissionField) -> &mut V {
        match field {
            PermissionField::View => &mut self.can_view,
            PermissionField::Create => &mut self.can_create,
            PermissionField::Edit => &mut self.can_edit,
            PermissionField::Delete => &mut self.can_delete,
        }
    }

    /// Set one field and enforce the cross-field rules on this tuple:
    /// denying view denies every action, allowing an action allows view.
    pub fn apply(&mut self, field: PermissionField, value: V) {
        *self.slot(field) = value;
        match field {
            PermissionField::View if value.is_deny() => {
                for action in PermissionField::ACTIONS {
                    *self.slot(action) = V::deny();
                }
            }
            PermissionField::Create | PermissionField::Edit | PermissionField::Delete
                if value.is_allow() =>
            {
                self.can_view = V::allow();
            }
            _ => {}
        }
    }

    /// Copy of this tuple with the cross-field rules applied; a denied view
    /// wins over allowed actions.
    pub fn normalized(mut self) -> Self {
        if self.can_view.is_deny() {
            for action in PermissionField::ACTIONS {
                *self.slot(action) = V::deny();
            }
        } else if PermissionField::ACTIONS.iter().any(|f| self.get(*f).is_allow()) {
            self.can_view = V::allow();
        }
        self
    }

    /// Whether every field holds the type default
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
