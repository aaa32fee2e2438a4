//! The search component used by the rest of the application.
//!
//! [`SearchComponent`] is the only surface callers need: lifecycle, index,
//! delete and search. Apart from an empty search scope, failures never
//! reach the caller; they are logged and the operation degrades to a no-op
//! or an empty result.

use tracing::{error, info, warn};

use crate::config::Settings;
use crate::indexing::{IndexStats, WorkspaceIndexer};
use crate::model::Workspace;
use crate::query::QueryEngine;
use crate::storage::DocumentIndex;
use crate::types::{SearchResult, WorkspaceId};
use crate::{IndexError, IndexResult};

pub trait SearchComponent: Send + Sync {
    /// Provision the index, keeping prior content
    fn start(&self);

    /// Flush and release index resources
    fn stop(&self);

    /// Erase everything and leave an empty, writable index
    fn clear(&self);

    /// Replace every document of the workspace
    fn index(&self, workspace: &Workspace);

    fn delete(&self, workspace_id: WorkspaceId);

    /// Search within the given workspaces. Fails only when `workspace_ids`
    /// is empty. An empty `type_filter` matches every document type.
    fn search(
        &self,
        query: &str,
        type_filter: &str,
        workspace_ids: &[WorkspaceId],
    ) -> IndexResult<Vec<SearchResult>>;

    fn is_enabled(&self) -> bool;
}

/// Build the component selected by `search.enabled`.
pub fn create_search_component(settings: &Settings) -> Box<dyn SearchComponent> {
    if settings.search.enabled {
        Box::new(TantivySearchComponent::from_settings(settings))
    } else {
        info!("Search is disabled");
        Box::new(DisabledSearchComponent)
    }
}

/// Search backed by a tantivy index.
pub struct TantivySearchComponent {
    store: DocumentIndex,
    indexer: WorkspaceIndexer,
    engine: QueryEngine,
}

impl TantivySearchComponent {
    pub fn new(store: DocumentIndex, indexer: WorkspaceIndexer, engine: QueryEngine) -> Self {
        Self {
            store,
            indexer,
            engine,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            DocumentIndex::from_settings(settings),
            WorkspaceIndexer::from_settings(settings),
            QueryEngine::from_settings(settings),
        )
    }

    pub fn store(&self) -> &DocumentIndex {
        &self.store
    }

    /// [`SearchComponent::index`], with the outcome returned instead of logged
    pub fn reindex(&self, workspace: &Workspace) -> IndexResult<IndexStats> {
        self.indexer.reindex(&self.store, workspace)
    }

    /// [`SearchComponent::delete`], with the outcome returned instead of logged
    pub fn remove(&self, workspace_id: WorkspaceId) -> IndexResult<()> {
        self.indexer.delete(&self.store, workspace_id)
    }

    /// Lifecycle operation failures only ever get logged
    fn log_failure(operation: &str, error: IndexError) {
        error!(
            operation,
            status = %error.status_code(),
            "Search component operation failed: {error}"
        );
    }
}

impl SearchComponent for TantivySearchComponent {
    fn start(&self) {
        if let Err(e) = self.store.start() {
            Self::log_failure("start", IndexError::store_unavailable("start", e));
        }
    }

    fn stop(&self) {
        if let Err(e) = self.store.stop() {
            warn!("Failed to flush search index on stop: {e}");
        }
    }

    fn clear(&self) {
        if let Err(e) = self.store.clear() {
            Self::log_failure("clear", IndexError::store_unavailable("clear", e));
        }
    }

    fn index(&self, workspace: &Workspace) {
        if let Err(e) = self.reindex(workspace) {
            Self::log_failure("index", e);
        }
    }

    fn delete(&self, workspace_id: WorkspaceId) {
        if let Err(e) = self.remove(workspace_id) {
            Self::log_failure("delete", e);
        }
    }

    fn search(
        &self,
        query: &str,
        type_filter: &str,
        workspace_ids: &[WorkspaceId],
    ) -> IndexResult<Vec<SearchResult>> {
        self.engine
            .search(&self.store, query, type_filter, workspace_ids)
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

/// Accepts every call and indexes nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledSearchComponent;

impl SearchComponent for DisabledSearchComponent {
    fn start(&self) {}

    fn stop(&self) {}

    fn clear(&self) {}

    fn index(&self, _workspace: &Workspace) {}

    fn delete(&self, _workspace_id: WorkspaceId) {}

    fn search(
        &self,
        _query: &str,
        _type_filter: &str,
        workspace_ids: &[WorkspaceId],
    ) -> IndexResult<Vec<SearchResult>> {
        QueryEngine::validate_scope(workspace_ids)?;
        Ok(Vec::new())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
