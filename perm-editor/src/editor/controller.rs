//! Permission editor controller

use std::sync::Arc;

use console_client::{ClientResult, PermissionApi};
use shared::error::AppError;
use shared::models::{MenuId, MenuNode, PermissionField, PermissionSet};
use tokio::sync::Mutex;

use super::mode::{EditorMode, RoleMode, UserMode};
use super::state::{EditorState, FetchFailure, FetchSource, OpenReport, SaveOutcome};
use crate::config::EditorConfig;
use crate::error::{EditorError, EditorResult};
use crate::resolver;
use crate::session::SessionContext;
use crate::store::{PermissionStore, RoleStore};
use crate::tracker::ChangeTracker;
use crate::tree::MenuTree;

/// Role baseline editor
pub type RoleEditor<A> = PermissionEditor<A, RoleMode>;

/// User override editor
pub type UserEditor<A> = PermissionEditor<A, UserMode>;

/// Session data of one open editor
struct Inner<M: EditorMode> {
    state: EditorState,
    /// Bumped on every open and close; async results from an older
    /// generation are dropped
    generation: u64,
    target: Option<M::Target>,
    tree: MenuTree,
    baseline: RoleStore,
    edits: PermissionStore<M::Value>,
    snapshot: PermissionStore<M::Value>,
    tracker: ChangeTracker,
    selected: Option<MenuId>,
    search: String,
    last_error: Option<AppError>,
}

impl<M: EditorMode> Inner<M> {
    fn new() -> Self {
        Self {
            state: EditorState::Closed,
            generation: 0,
            target: None,
            tree: MenuTree::empty(),
            baseline: RoleStore::new(),
            edits: PermissionStore::new(),
            snapshot: PermissionStore::new(),
            tracker: ChangeTracker::new(),
            selected: None,
            search: String::new(),
            last_error: None,
        }
    }

    fn ensure_ready(&self) -> EditorResult<()> {
        match self.state {
            EditorState::Ready => Ok(()),
            actual => Err(EditorError::InvalidState {
                expected: EditorState::Ready,
                actual,
            }),
        }
    }

    /// Drop all session data and bump the generation
    fn discard(&mut self) {
        let generation = self.generation + 1;
        *self = Self::new();
        self.generation = generation;
    }

    /// Selected module and its direct children
    fn bulk_targets(&self) -> Vec<MenuId> {
        let Some(selected) = &self.selected else {
            return Vec::new();
        };
        let mut ids = vec![selected.clone()];
        ids.extend(self.tree.child_ids(selected));
        ids
    }
}

/// Editor for menu permissions, in role or user mode
///
/// All session data sits behind an async mutex that is never held across a
/// network call, so [`close`](Self::close) can run while a load or save is
/// in flight.
pub struct PermissionEditor<A: PermissionApi + ?Sized, M: EditorMode> {
    api: Arc<A>,
    session: SessionContext,
    config: EditorConfig,
    inner: Mutex<Inner<M>>,
}

impl<A: PermissionApi + ?Sized, M: EditorMode> PermissionEditor<A, M> {
    pub fn new(api: Arc<A>, session: SessionContext, config: EditorConfig) -> Self {
        Self {
            api,
            session,
            config,
            inner: Mutex::new(Inner::new()),
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Load menus and permissions for `target` and enter `Ready`
    ///
    /// Failed fetches are logged and reported but not fatal: the editor
    /// opens with an empty map for that data. Any session already open is
    /// discarded.
    pub async fn open(&self, target: M::Target) -> EditorResult<OpenReport> {
        let generation = {
            let mut inner = self.inner.lock().await;
            if inner.state == EditorState::Saving {
                return Err(EditorError::SaveInProgress);
            }
            let selected = inner.selected.take();
            inner.discard();
            inner.selected = selected;
            inner.state = EditorState::Loading;
            inner.target = Some(target.clone());
            inner.generation
        };

        let role_id = M::role_id(&target);
        tracing::info!(
            mode = M::NAME,
            role_id,
            user_id = M::user_id(&target),
            operator = %self.session.operator_id,
            generation,
            "Opening permission editor"
        );

        let api = self.api.as_ref();
        let (menus, roles, overrides) = tokio::join!(
            api.get_menus(self.config.menu_page, self.config.menu_limit),
            api.get_role_permissions(role_id, self.config.role_permission_limit),
            M::fetch_overrides(api, &target),
        );

        let mut failures = Vec::new();
        let tree = match menus {
            Ok(nodes) => match MenuTree::new(nodes) {
                Ok(tree) => {
                    // Already logged by the tree builder
                    failures.extend(tree.dropped().iter().map(|d| FetchFailure {
                        source: FetchSource::Menus,
                        error: EditorError::InvalidMenuTree(d.reason.clone())
                            .to_app_error()
                            .with_detail("menuId", d.menu_id.as_str()),
                    }));
                    tree
                }
                Err(e) => {
                    record_failure(&mut failures, FetchSource::Menus, e.to_app_error());
                    MenuTree::empty()
                }
            },
            Err(e) => {
                record_failure(&mut failures, FetchSource::Menus, e.to_app_error());
                MenuTree::empty()
            }
        };
        let roles = unwrap_or_record(roles, FetchSource::RolePermissions, &mut failures);
        let overrides = overrides
            .map(|r| unwrap_or_record(r, FetchSource::UserPermissions, &mut failures))
            .unwrap_or_default();

        let mut inner = self.inner.lock().await;
        if inner.generation != generation || inner.state != EditorState::Loading {
            tracing::debug!(
                mode = M::NAME,
                generation,
                current = inner.generation,
                "Discarding stale load"
            );
            return Ok(OpenReport {
                failures,
                stale: true,
                ..Default::default()
            });
        }

        let inner = &mut *inner;
        inner.baseline = RoleStore::from_role_records(&roles);
        inner.edits = M::seed(&roles, &overrides);
        inner.snapshot = inner.edits.clone();
        inner.tree = tree;
        inner.tracker.clear();
        if !inner
            .selected
            .as_deref()
            .is_some_and(|id| inner.tree.contains(id))
        {
            inner.selected = inner.tree.top_level().first().map(|n| n.id.clone());
        }
        inner.state = EditorState::Ready;

        let report = OpenReport {
            menus: inner.tree.len(),
            records: inner.edits.len(),
            failures,
            stale: false,
        };
        tracing::info!(
            mode = M::NAME,
            menus = report.menus,
            records = report.records,
            failures = report.failures.len(),
            "Permission editor ready"
        );
        Ok(report)
    }

    /// Write dirty menus back to the API
    ///
    /// On success the editor closes; on failure it returns to `Ready` with
    /// every pending edit kept so the save can be retried.
    pub async fn save(&self) -> EditorResult<SaveOutcome> {
        let (generation, target, edits, dirty) = {
            let mut inner = self.inner.lock().await;
            match inner.state {
                EditorState::Ready => {}
                EditorState::Saving => return Err(EditorError::SaveInProgress),
                actual => {
                    return Err(EditorError::InvalidState {
                        expected: EditorState::Ready,
                        actual,
                    });
                }
            }
            if inner.tracker.is_empty() {
                tracing::info!(mode = M::NAME, "Nothing to save, closing editor");
                inner.discard();
                return Ok(SaveOutcome::NothingToSave);
            }
            let Some(target) = inner.target.clone() else {
                return Err(EditorError::InvalidState {
                    expected: EditorState::Ready,
                    actual: EditorState::Closed,
                });
            };
            inner.state = EditorState::Saving;
            let dirty: Vec<MenuId> = inner.tracker.iter().cloned().collect();
            (inner.generation, target, inner.edits.clone(), dirty)
        };

        tracing::info!(
            mode = M::NAME,
            role_id = M::role_id(&target),
            user_id = M::user_id(&target),
            dirty = dirty.len(),
            "Saving permissions"
        );
        let result: ClientResult<usize> =
            M::submit(self.api.as_ref(), &target, &edits, &dirty).await;

        let mut inner = self.inner.lock().await;
        if inner.generation != generation {
            tracing::debug!(mode = M::NAME, generation, "Editor closed during save");
            return result
                .map(|written| SaveOutcome::Saved { written })
                .map_err(EditorError::Save);
        }

        match result {
            Ok(written) => {
                tracing::info!(mode = M::NAME, written, "Permissions saved");
                inner.discard();
                Ok(SaveOutcome::Saved { written })
            }
            Err(e) => {
                tracing::warn!(mode = M::NAME, error = %e, dirty = dirty.len(), "Save failed");
                inner.state = EditorState::Ready;
                inner.last_error = Some(e.to_app_error());
                Err(EditorError::Save(e))
            }
        }
    }

    /// Close the editor and drop all unsaved edits
    pub async fn close(&self) {
        let mut inner = self.inner.lock().await;
        let from = inner.state;
        let discarded = inner.tracker.len();
        inner.discard();
        tracing::info!(mode = M::NAME, %from, discarded, "Permission editor closed");
    }

    // ========================================================================
    // Edits
    // ========================================================================

    /// Set one field; returns every menu id that changed
    pub async fn set_permission(
        &self,
        menu_id: &str,
        field: PermissionField,
        value: M::Value,
    ) -> EditorResult<Vec<MenuId>> {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        inner.ensure_ready()?;
        let touched = resolver::apply_change(&mut inner.edits, &inner.tree, menu_id, field, value)?;
        inner.tracker.mark_dirty(touched.iter().cloned());
        Ok(touched)
    }

    /// Advance one field to its next value
    pub async fn toggle(&self, menu_id: &str, field: PermissionField) -> EditorResult<Vec<MenuId>> {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        inner.ensure_ready()?;
        let touched = resolver::toggle(&mut inner.edits, &inner.tree, menu_id, field)?;
        inner.tracker.mark_dirty(touched.iter().cloned());
        Ok(touched)
    }

    /// Allow every field on the selected module and its direct children
    pub async fn select_all(&self) -> EditorResult<Vec<MenuId>> {
        self.bulk(PermissionSet::all_allowed()).await
    }

    /// Reset every field on the selected module and its direct children
    pub async fn clear(&self) -> EditorResult<Vec<MenuId>> {
        self.bulk(PermissionSet::default()).await
    }

    async fn bulk(&self, tuple: PermissionSet<M::Value>) -> EditorResult<Vec<MenuId>> {
        let mut inner = self.inner.lock().await;
        inner.ensure_ready()?;
        let ids = inner.bulk_targets();
        inner.edits.bulk_set(ids.iter().cloned(), tuple);
        inner.tracker.mark_dirty(ids.iter().cloned());
        tracing::debug!(mode = M::NAME, menus = ids.len(), "Bulk permission change");
        Ok(ids)
    }

    /// Restore the state loaded by the last `open`, without re-fetching
    pub async fn reset(&self) -> EditorResult<()> {
        let mut inner = self.inner.lock().await;
        inner.ensure_ready()?;
        inner.edits = inner.snapshot.clone();
        inner.tracker.clear();
        tracing::debug!(mode = M::NAME, "Edits reset");
        Ok(())
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Select the module whose children are listed
    pub async fn select_module(&self, menu_id: &str) -> EditorResult<()> {
        let mut inner = self.inner.lock().await;
        inner.ensure_ready()?;
        if !inner.tree.contains(menu_id) {
            return Err(EditorError::UnknownMenu(menu_id.to_string()));
        }
        inner.selected = Some(menu_id.to_string());
        Ok(())
    }

    /// Filter the listed children by name
    pub async fn set_search(&self, text: impl Into<String>) {
        self.inner.lock().await.search = text.into();
    }

    /// Children of the selected module matching the search text
    pub async fn visible_children(&self) -> Vec<MenuNode> {
        let inner = self.inner.lock().await;
        match &inner.selected {
            Some(selected) => inner
                .tree
                .children_of(selected, Some(&inner.search))
                .into_iter()
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    pub async fn top_level(&self) -> Vec<MenuNode> {
        let inner = self.inner.lock().await;
        inner.tree.top_level().into_iter().cloned().collect()
    }

    pub async fn selected_module(&self) -> Option<MenuId> {
        self.inner.lock().await.selected.clone()
    }

    pub async fn search(&self) -> String {
        self.inner.lock().await.search.clone()
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub async fn state(&self) -> EditorState {
        self.inner.lock().await.state
    }

    pub async fn target(&self) -> Option<M::Target> {
        self.inner.lock().await.target.clone()
    }

    /// Number of menus with unsaved changes
    pub async fn pending_changes(&self) -> usize {
        self.inner.lock().await.tracker.len()
    }

    pub async fn is_dirty(&self, menu_id: &str) -> bool {
        self.inner.lock().await.tracker.contains(menu_id)
    }

    /// Error of the last failed save in this session
    pub async fn last_error(&self) -> Option<AppError> {
        self.inner.lock().await.last_error.clone()
    }

    /// Stored (editable) values of one menu
    pub async fn tuple(&self, menu_id: &str) -> PermissionSet<M::Value> {
        self.inner.lock().await.edits.tuple(menu_id)
    }

    pub async fn value(&self, menu_id: &str, field: PermissionField) -> M::Value {
        self.inner.lock().await.edits.get(menu_id, field)
    }

    /// Effective permission of one menu as the operator would see it
    pub async fn effective(&self, menu_id: &str) -> EditorResult<PermissionSet<bool>> {
        let inner = self.inner.lock().await;
        if !inner.tree.contains(menu_id) {
            return Err(EditorError::UnknownMenu(menu_id.to_string()));
        }
        Ok(M::effective(&inner.baseline, &inner.edits, menu_id))
    }

    pub async fn editable_fields(&self, menu_id: &str) -> &'static [PermissionField] {
        resolver::editable_fields(&self.inner.lock().await.tree, menu_id)
    }
}

fn record_failure(failures: &mut Vec<FetchFailure>, source: FetchSource, error: AppError) {
    tracing::warn!(
        %source,
        code = error.code.code(),
        error = %error,
        "Fetch failed, using empty data"
    );
    failures.push(FetchFailure { source, error });
}

fn unwrap_or_record<T: Default>(
    result: ClientResult<T>,
    source: FetchSource,
    failures: &mut Vec<FetchFailure>,
) -> T {
    result.unwrap_or_else(|e| {
        record_failure(failures, source, e.to_app_error());
        T::default()
    })
}
