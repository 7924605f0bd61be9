mod common;

use common::*;
use perm_editor::{EditorState, FetchSource, SaveOutcome, UserEditor, UserTarget};
use shared::models::{PermissionField, PermissionSet, TriState};
use std::sync::Arc;
use std::sync::atomic::Ordering;

async fn open_user(api: MockApi) -> (Arc<MockApi>, UserEditor<MockApi>) {
    init_tracing();
    let api = Arc::new(api);
    let editor = UserEditor::new(api.clone(), session(), config());
    let report = editor.open(UserTarget::new("u1", "r1")).await.unwrap();
    assert!(!report.stale);
    (api, editor)
}

#[tokio::test]
async fn test_open_fetches_overrides() {
    let api = MockApi::new(menus())
        .with_roles(vec![role_record("r1", "q", true, true)])
        .with_overrides(vec![
            override_record("u1", "q", TriState::Deny),
            override_record("u2", "q", TriState::Allow),
        ]);
    let (api, editor) = open_user(api).await;

    assert!(api.calls().contains(&Call::GetUserPermissions {
        user_id: "u1".into()
    }));
    assert_eq!(editor.value("q", PermissionField::View).await, TriState::Deny);
    assert_eq!(editor.effective("q").await.unwrap(), PermissionSet::default());
}

#[tokio::test]
async fn test_inherit_reads_role_baseline() {
    let api = MockApi::new(menus()).with_roles(vec![role_record("r1", "q", true, true)]);
    let (_api, editor) = open_user(api).await;

    assert_eq!(editor.tuple("q").await, PermissionSet::default());
    let eff = editor.effective("q").await.unwrap();
    assert!(eff.can_view && eff.can_edit);
    assert!(!eff.can_create);

    editor
        .set_permission("q", PermissionField::Edit, TriState::Deny)
        .await
        .unwrap();
    let eff = editor.effective("q").await.unwrap();
    assert!(eff.can_view);
    assert!(!eff.can_edit);
}

#[tokio::test]
async fn test_view_deny_after_create_override() {
    let api = MockApi::new(menus()).with_roles(vec![role_record("r1", "p", true, false)]);
    let (_api, editor) = open_user(api).await;

    editor
        .set_permission("c1", PermissionField::Create, TriState::Allow)
        .await
        .unwrap();
    assert!(editor.effective("c1").await.unwrap().can_create);

    editor
        .set_permission("c1", PermissionField::View, TriState::Deny)
        .await
        .unwrap();
    let eff = editor.effective("c1").await.unwrap();
    assert!(!eff.can_view);
    assert!(!eff.can_create);
    assert!(editor.effective("p").await.unwrap().can_view);
}

#[tokio::test]
async fn test_action_allow_over_hidden_role() {
    let api = MockApi::new(menus()).with_roles(vec![role_record("r1", "q", false, false)]);
    let (_api, editor) = open_user(api).await;

    editor
        .set_permission("q", PermissionField::Edit, TriState::Allow)
        .await
        .unwrap();

    let stored = editor.tuple("q").await;
    assert_eq!(stored.can_view, TriState::Allow);
    assert_eq!(stored.can_edit, TriState::Allow);
    assert_eq!(stored.can_delete, TriState::Inherit);

    let eff = editor.effective("q").await.unwrap();
    assert!(eff.can_view && eff.can_edit);
}

#[tokio::test]
async fn test_toggle_cycles_tristate() {
    let (_api, editor) = open_user(MockApi::new(menus())).await;

    let mut seen = Vec::new();
    for _ in 0..3 {
        editor.toggle("q", PermissionField::Delete).await.unwrap();
        seen.push(editor.value("q", PermissionField::Delete).await);
    }
    assert_eq!(seen, vec![TriState::Allow, TriState::Deny, TriState::Inherit]);
    // allow on delete forced view; cycling delete back does not undo it
    assert_eq!(editor.value("q", PermissionField::View).await, TriState::Allow);
}

#[tokio::test]
async fn test_parent_view_allow_cascades_override() {
    let (_api, editor) = open_user(MockApi::new(menus())).await;

    let touched = editor
        .set_permission("p", PermissionField::View, TriState::Allow)
        .await
        .unwrap();
    assert_eq!(touched.len(), 3);
    assert_eq!(editor.value("c2", PermissionField::View).await, TriState::Allow);
    assert_eq!(editor.value("c2", PermissionField::Edit).await, TriState::Inherit);

    editor
        .set_permission("p", PermissionField::View, TriState::Inherit)
        .await
        .unwrap();
    assert_eq!(editor.value("c2", PermissionField::View).await, TriState::Allow);
}

#[tokio::test]
async fn test_select_all_is_idempotent() {
    let (_api, editor) = open_user(MockApi::new(menus())).await;

    let first = editor.select_all().await.unwrap();
    assert_eq!(first, vec!["p", "c1", "c2"]);
    let after_once = tuples(&editor, &first).await;
    assert_eq!(editor.pending_changes().await, 3);

    let second = editor.select_all().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(tuples(&editor, &second).await, after_once);
    assert_eq!(editor.pending_changes().await, 3);
    for id in &first {
        for field in PermissionField::ALL {
            assert_eq!(editor.value(id, field).await, TriState::Allow);
        }
    }
}

#[tokio::test]
async fn test_reset_restores_loaded_overrides() {
    let api = MockApi::new(menus())
        .with_roles(vec![role_record("r1", "q", true, true)])
        .with_overrides(vec![
            override_record("u1", "p", TriState::Allow),
            override_record("u1", "q", TriState::Deny),
        ]);
    let (api, editor) = open_user(api).await;
    let ids: Vec<String> = ["p", "c1", "c2", "q"].map(String::from).to_vec();
    let loaded = tuples(&editor, &ids).await;

    editor.clear().await.unwrap();
    editor.toggle("q", PermissionField::View).await.unwrap();
    assert!(editor.pending_changes().await > 0);
    assert_ne!(tuples(&editor, &ids).await, loaded);

    editor.reset().await.unwrap();
    assert_eq!(editor.pending_changes().await, 0);
    assert_eq!(tuples(&editor, &ids).await, loaded);
    assert_eq!(editor.value("q", PermissionField::View).await, TriState::Deny);
    assert_eq!(api.calls().len(), 3, "reset must not re-fetch");
}

#[tokio::test]
async fn test_save_upserts_each_dirty_menu() {
    let (api, editor) = open_user(MockApi::new(menus())).await;

    editor.select_all().await.unwrap();
    assert_eq!(editor.pending_changes().await, 3);

    let outcome = editor.save().await.unwrap();
    assert_eq!(outcome, SaveOutcome::Saved { written: 3 });
    assert_eq!(editor.state().await, EditorState::Closed);

    let writes = api.writes();
    assert_eq!(writes.len(), 3);
    for call in &writes {
        let Call::UpsertUserPermission(record) = call else {
            panic!("expected an upsert, got {call:?}");
        };
        assert_eq!(record.user_id, "u1");
        assert_eq!(record.set(), PermissionSet::all_allowed());
    }
}

#[tokio::test]
async fn test_clear_writes_inherit_records() {
    let api = MockApi::new(menus())
        .with_overrides(vec![override_record("u1", "c1", TriState::Deny)]);
    let (api, editor) = open_user(api).await;

    editor.clear().await.unwrap();
    editor.save().await.unwrap();

    let cleared = api.writes().into_iter().any(|c| {
        matches!(c, Call::UpsertUserPermission(r) if r.menu_id == "c1" && r.set().is_default())
    });
    assert!(cleared);
}

#[tokio::test]
async fn test_failed_override_fetch_still_opens() {
    let api = MockApi::new(menus())
        .with_overrides(vec![override_record("u1", "q", TriState::Deny)]);
    api.fail_overrides.store(true, Ordering::SeqCst);
    init_tracing();
    let editor = UserEditor::new(Arc::new(api), session(), config());

    let report = editor.open(UserTarget::new("u1", "r1")).await.unwrap();
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].source, FetchSource::UserPermissions);
    assert_eq!(editor.state().await, EditorState::Ready);
    assert_eq!(editor.value("q", PermissionField::View).await, TriState::Inherit);
}

#[tokio::test]
async fn test_upsert_failure_keeps_every_edit() {
    let (api, editor) = open_user(MockApi::new(menus())).await;
    editor
        .set_permission("q", PermissionField::View, TriState::Deny)
        .await
        .unwrap();
    editor
        .set_permission("c1", PermissionField::Edit, TriState::Allow)
        .await
        .unwrap();

    api.set_fail_writes(true);
    assert!(editor.save().await.is_err());
    assert_eq!(api.writes().len(), 1, "upserts stop at the first failure");
    assert_eq!(editor.pending_changes().await, 2);
    assert_eq!(editor.state().await, EditorState::Ready);

    api.set_fail_writes(false);
    assert_eq!(
        editor.save().await.unwrap(),
        SaveOutcome::Saved { written: 2 }
    );
}

async fn tuples(editor: &UserEditor<MockApi>, ids: &[String]) -> Vec<PermissionSet<TriState>> {
    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
        out.push(editor.tuple(id).await);
    }
    out
}
