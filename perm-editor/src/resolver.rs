//! Permission resolution and invariant-enforcing edits
//!
//! Everything here is a plain function over a [`MenuTree`] and one or two
//! [`PermissionStore`]s. The controller owns the stores; these functions
//! only read or mutate what they are handed.

use shared::models::{MenuId, PermissionField, PermissionSet, PermissionValue};

use crate::error::{EditorError, EditorResult};
use crate::store::{OverrideStore, PermissionStore, RoleStore};
use crate::tree::MenuTree;

const VIEW_ONLY: &[PermissionField] = &[PermissionField::View];

/// Effective permission of a menu
///
/// Each field is the override value unless it inherits, in which case the
/// role value (or `false` without a role record). A denied view denies the
/// actions even if the stored data says otherwise.
pub fn effective(
    baseline: &RoleStore,
    overrides: Option<&OverrideStore>,
    menu_id: &str,
) -> PermissionSet<bool> {
    let role = baseline.tuple(menu_id);
    let resolved = match overrides {
        Some(overrides) => {
            let over = overrides.tuple(menu_id);
            PermissionSet {
                can_view: over.can_view.resolve(role.can_view),
                can_create: over.can_create.resolve(role.can_create),
                can_edit: over.can_edit.resolve(role.can_edit),
                can_delete: over.can_delete.resolve(role.can_delete),
            }
        }
        None => role,
    };
    if resolved.can_view {
        resolved
    } else {
        PermissionSet::default()
    }
}

/// Fields the operator may edit directly on a menu
///
/// Menu groups (menus with children) only expose view.
pub fn editable_fields(tree: &MenuTree, menu_id: &str) -> &'static [PermissionField] {
    if tree.has_children(menu_id) {
        VIEW_ONLY
    } else {
        &PermissionField::ALL
    }
}

/// Set one field on one menu and return every menu id that changed
///
/// Allowing a group's view also allows view on its direct children; their
/// other fields are left alone.
pub fn apply_change<V: PermissionValue>(
    store: &mut PermissionStore<V>,
    tree: &MenuTree,
    menu_id: &str,
    field: PermissionField,
    value: V,
) -> EditorResult<Vec<MenuId>> {
    if !tree.contains(menu_id) {
        return Err(EditorError::UnknownMenu(menu_id.to_string()));
    }
    if !editable_fields(tree, menu_id).contains(&field) {
        return Err(EditorError::FieldNotEditable {
            menu_id: menu_id.to_string(),
            field,
        });
    }

    store.set(menu_id, field, value);
    let mut touched = vec![menu_id.to_string()];

    if field == PermissionField::View && value.is_allow() {
        for child in tree.child_ids(menu_id) {
            store.set(&child, PermissionField::View, V::allow());
            touched.push(child);
        }
    }

    tracing::debug!(menu_id, %field, value = ?value, touched = touched.len(), "Permission changed");
    Ok(touched)
}

/// Advance one field to its next value (bool flip or tri-state cycle)
pub fn toggle<V: PermissionValue>(
    store: &mut PermissionStore<V>,
    tree: &MenuTree,
    menu_id: &str,
    field: PermissionField,
) -> EditorResult<Vec<MenuId>> {
    let next = store.get(menu_id, field).toggled();
    apply_change(store, tree, menu_id, field, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{MenuNode, TriState};

    fn tree() -> MenuTree {
        MenuTree::new(vec![
            MenuNode::new("p", "Pricing", "PRICING"),
            MenuNode::new("c1", "Rates", "RATES").with_parent("p"),
            MenuNode::new("c2", "Seasons", "SEASONS").with_parent("p"),
            MenuNode::new("solo", "Reports", "REPORTS"),
        ])
        .unwrap()
    }

    #[test]
    fn test_no_role_record_is_all_false() {
        let baseline = RoleStore::new();
        let overrides = OverrideStore::new();
        assert_eq!(
            effective(&baseline, Some(&overrides), "solo"),
            PermissionSet::default()
        );
        assert_eq!(effective(&baseline, None, "solo"), PermissionSet::default());
    }

    #[test]
    fn test_effective_clamps_unnormalized_data() {
        let mut baseline = RoleStore::new();
        baseline.put(
            "solo",
            PermissionSet {
                can_view: false,
                can_create: true,
                can_edit: true,
                can_delete: true,
            },
        );
        assert_eq!(effective(&baseline, None, "solo"), PermissionSet::default());
    }

    #[test]
    fn test_override_wins_over_role() {
        let mut baseline = RoleStore::new();
        baseline.put("solo", PermissionSet::all_allowed());
        let mut overrides = OverrideStore::new();
        overrides.put(
            "solo",
            PermissionSet {
                can_delete: TriState::Deny,
                ..Default::default()
            },
        );

        let eff = effective(&baseline, Some(&overrides), "solo");
        assert!(eff.can_view && eff.can_create && eff.can_edit);
        assert!(!eff.can_delete);
    }

    #[test]
    fn test_user_denies_view_after_create() {
        let tree = tree();
        let mut baseline = RoleStore::new();
        baseline.put(
            "p",
            PermissionSet {
                can_view: true,
                ..Default::default()
            },
        );
        let mut overrides = OverrideStore::new();

        apply_change(&mut overrides, &tree, "c1", PermissionField::Create, TriState::Allow)
            .unwrap();
        assert_eq!(overrides.get("c1", PermissionField::View), TriState::Allow);

        let touched =
            apply_change(&mut overrides, &tree, "c1", PermissionField::View, TriState::Deny)
                .unwrap();
        assert_eq!(touched, vec!["c1"]);

        let eff = effective(&baseline, Some(&overrides), "c1");
        assert!(!eff.can_view);
        assert!(!eff.can_create);
    }

    #[test]
    fn test_action_allow_forces_override_view() {
        let tree = tree();
        let baseline = RoleStore::new();
        let mut overrides = OverrideStore::new();

        apply_change(&mut overrides, &tree, "c2", PermissionField::Edit, TriState::Allow).unwrap();

        let stored = overrides.tuple("c2");
        assert_eq!(stored.can_view, TriState::Allow);
        assert_eq!(stored.can_edit, TriState::Allow);
        assert_eq!(stored.can_create, TriState::Inherit);

        let eff = effective(&baseline, Some(&overrides), "c2");
        assert!(eff.can_view && eff.can_edit);
        assert!(!eff.can_create);
    }

    #[test]
    fn test_parent_view_cascades_to_children() {
        let tree = tree();
        let mut store = RoleStore::new();
        store.put(
            "c1",
            PermissionSet {
                can_view: false,
                can_edit: false,
                can_create: false,
                can_delete: false,
            },
        );

        let touched = apply_change(&mut store, &tree, "p", PermissionField::View, true).unwrap();
        assert_eq!(touched, vec!["p", "c1", "c2"]);
        assert!(store.get("c1", PermissionField::View));
        assert!(store.get("c2", PermissionField::View));
        assert!(!store.get("c2", PermissionField::Edit));
    }

    #[test]
    fn test_parent_view_deny_does_not_cascade() {
        let tree = tree();
        let mut store = RoleStore::new();
        store.put("c1", PermissionSet::all_allowed());

        let touched = apply_change(&mut store, &tree, "p", PermissionField::View, false).unwrap();
        assert_eq!(touched, vec!["p"]);
        assert_eq!(store.tuple("c1"), PermissionSet::all_allowed());
    }

    #[test]
    fn test_rejects_action_on_group() {
        let tree = tree();
        let mut store = RoleStore::new();
        for field in PermissionField::ACTIONS {
            let err = apply_change(&mut store, &tree, "p", field, true).unwrap_err();
            assert!(matches!(err, EditorError::FieldNotEditable { .. }));
        }
        assert!(store.is_empty());

        assert_eq!(editable_fields(&tree, "p"), &[PermissionField::View]);
        assert_eq!(editable_fields(&tree, "c1").len(), 4);
    }

    #[test]
    fn test_rejects_unknown_menu() {
        let mut store = RoleStore::new();
        let err =
            apply_change(&mut store, &tree(), "ghost", PermissionField::View, true).unwrap_err();
        assert!(matches!(err, EditorError::UnknownMenu(id) if id == "ghost"));
    }

    #[test]
    fn test_toggle() {
        let tree = tree();

        let mut roles = RoleStore::new();
        toggle(&mut roles, &tree, "solo", PermissionField::Edit).unwrap();
        assert!(roles.get("solo", PermissionField::Edit));
        toggle(&mut roles, &tree, "solo", PermissionField::Edit).unwrap();
        assert!(!roles.get("solo", PermissionField::Edit));
        assert!(roles.get("solo", PermissionField::View));

        let mut overrides = OverrideStore::new();
        let seen: Vec<_> = (0..3)
            .map(|_| {
                toggle(&mut overrides, &tree, "solo", PermissionField::View).unwrap();
                overrides.get("solo", PermissionField::View)
            })
            .collect();
        assert_eq!(seen, vec![TriState::Allow, TriState::Deny, TriState::Inherit]);
    }
}
