//! In-memory permission records for one editing session

use std::collections::HashMap;

use shared::models::{
    MenuId, PermissionField, PermissionSet, PermissionValue, RolePermission, TriState,
    UserPermissionOverride,
};

/// Permission tuples keyed by menu id
///
/// Missing menus read as the type default (`false` / `Inherit`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionStore<V> {
    records: HashMap<MenuId, PermissionSet<V>>,
}

/// Role baseline records
pub type RoleStore = PermissionStore<bool>;

/// User override records
pub type OverrideStore = PermissionStore<TriState>;

impl<V> Default for PermissionStore<V> {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
        }
    }
}

impl<V: PermissionValue> PermissionStore<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored value of one field
    pub fn get(&self, menu_id: &str, field: PermissionField) -> V {
        self.tuple(menu_id).get(field)
    }

    /// Stored tuple of one menu
    pub fn tuple(&self, menu_id: &str) -> PermissionSet<V> {
        self.records.get(menu_id).copied().unwrap_or_default()
    }

    /// Set one field, creating the tuple if needed
    ///
    /// Denying view denies every action; allowing an action allows view.
    pub fn set(&mut self, menu_id: &str, field: PermissionField, value: V) {
        self.records
            .entry(menu_id.to_string())
            .or_default()
            .apply(field, value);
    }

    /// Store `tuple` on every menu in `menu_ids`
    pub fn bulk_set<I, S>(&mut self, menu_ids: I, tuple: PermissionSet<V>)
    where
        I: IntoIterator<Item = S>,
        S: Into<MenuId>,
    {
        let tuple = tuple.normalized();
        for id in menu_ids {
            self.records.insert(id.into(), tuple);
        }
    }

    /// Store a tuple as received, without normalizing
    pub fn put(&mut self, menu_id: impl Into<MenuId>, tuple: PermissionSet<V>) {
        self.records.insert(menu_id.into(), tuple);
    }

    pub fn contains(&self, menu_id: &str) -> bool {
        self.records.contains_key(menu_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MenuId, &PermissionSet<V>)> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RoleStore {
    pub fn from_role_records(records: &[RolePermission]) -> Self {
        let mut store = Self::new();
        for record in records {
            store.put(record.menu_id.clone(), record.set());
        }
        store
    }

    /// Wire records for `menu_ids` (missing menus become all-false records)
    pub fn to_role_records<'a>(
        &self,
        role_id: &str,
        menu_ids: impl IntoIterator<Item = &'a MenuId>,
    ) -> Vec<RolePermission> {
        menu_ids
            .into_iter()
            .map(|id| RolePermission::from_set(role_id, id.as_str(), self.tuple(id)))
            .collect()
    }
}

impl OverrideStore {
    pub fn from_overrides(records: &[UserPermissionOverride]) -> Self {
        let mut store = Self::new();
        for record in records {
            store.put(record.menu_id.clone(), record.set());
        }
        store
    }

    /// Wire records for `menu_ids` (missing menus become all-inherit records)
    pub fn to_overrides<'a>(
        &self,
        user_id: &str,
        menu_ids: impl IntoIterator<Item = &'a MenuId>,
    ) -> Vec<UserPermissionOverride> {
        menu_ids
            .into_iter()
            .map(|id| UserPermissionOverride::from_set(user_id, id.as_str(), self.tuple(id)))
            .collect()
    }
}
