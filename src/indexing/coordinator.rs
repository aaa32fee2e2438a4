//! Replaces the document set of a workspace in the index.
//!
//! A reindex always starts by deleting every document of the workspace and
//! then adds the freshly generated set. How often the writer commits is
//! governed by [`CommitMode`].

use tracing::{debug, error, info};

use super::decisions::decision_documents;
use super::documentation::section_documents;
use super::flatten::ModelFlattener;
use super::{IndexStats, Owner};
use crate::config::{CommitMode, Settings};
use crate::model::Workspace;
use crate::storage::{DocumentIndex, StorageError, WriteSession};
use crate::types::{IndexedDocument, WorkspaceId};
use crate::{IndexError, IndexResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct WorkspaceIndexer {
    commit_mode: CommitMode,
}

impl WorkspaceIndexer {
    pub fn new(commit_mode: CommitMode) -> Self {
        Self { commit_mode }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.index.commit_mode)
    }

    pub fn commit_mode(&self) -> CommitMode {
        self.commit_mode
    }

    /// Every document of a workspace in emission order: overview, diagrams,
    /// then documentation sections and decisions per owner.
    pub fn documents(&self, workspace: &Workspace) -> Vec<IndexedDocument> {
        let flattener = ModelFlattener::new(workspace);

        let mut documents = vec![flattener.overview()];
        documents.extend(flattener.diagrams());

        for owner in Owner::all(workspace) {
            if let Some(documentation) = owner.documentation() {
                documents.extend(section_documents(workspace.id, &owner, documentation));
                documents.extend(decision_documents(
                    workspace.id,
                    &owner,
                    &documentation.decisions,
                ));
            }
        }

        documents
    }

    /// Delete the workspace's documents and add the regenerated set.
    ///
    /// If an add fails, whatever was staged is committed and
    /// [`IndexError::PartialIndexFailure`] reports how many documents made it.
    pub fn reindex(&self, store: &DocumentIndex, workspace: &Workspace) -> IndexResult<IndexStats> {
        let workspace_id = workspace.id;
        let mut stats = IndexStats::new(workspace_id);

        let documents = self.documents(workspace);
        stats.documents_generated = documents.len();
        debug!(
            workspace_id,
            documents = documents.len(),
            mode = ?self.commit_mode,
            "Generated workspace documents"
        );

        let mut session = store
            .open_for_write()
            .map_err(|e| IndexError::store_unavailable("index", e))?;

        session.delete_workspace(workspace_id);
        if self.commit_mode == CommitMode::Document {
            commit(&mut session, &mut stats)
                .map_err(|e| IndexError::store_unavailable("index", e))?;
        }

        let mut committed = 0;
        for document in &documents {
            if let Err(e) = session.add(document) {
                return Err(self.partial_failure(&mut session, &mut stats, e));
            }
            stats.record(document.doc_type);

            if self.commit_mode == CommitMode::Document {
                if let Err(e) = commit(&mut session, &mut stats) {
                    stats.stop_timing();
                    return Err(IndexError::PartialIndexFailure {
                        workspace_id,
                        written: committed,
                        cause: e.to_string(),
                    });
                }
                committed += 1;
            }
        }

        if self.commit_mode == CommitMode::Batch {
            commit(&mut session, &mut stats)
                .map_err(|e| IndexError::store_unavailable("index", e))?;
        }

        stats.stop_timing();
        info!(
            workspace_id,
            documents = stats.documents_written,
            commits = stats.commits,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "Workspace indexed"
        );
        Ok(stats)
    }

    /// Remove every document of a workspace, committed immediately.
    pub fn delete(&self, store: &DocumentIndex, workspace_id: WorkspaceId) -> IndexResult<()> {
        let mut session = store
            .open_for_write()
            .map_err(|e| IndexError::store_unavailable("delete", e))?;

        session.delete_workspace(workspace_id);
        session
            .commit()
            .map_err(|e| IndexError::store_unavailable("delete", e))?;

        info!(workspace_id, "Workspace removed from index");
        Ok(())
    }

    /// Keep what was staged before the failing add; nothing is rolled back.
    fn partial_failure(
        &self,
        session: &mut WriteSession<'_>,
        stats: &mut IndexStats,
        cause: StorageError,
    ) -> IndexError {
        let workspace_id = stats.workspace_id;
        if let Err(e) = commit(session, stats) {
            error!(workspace_id, "Commit after failed add also failed: {e}");
        }
        stats.stop_timing();

        IndexError::PartialIndexFailure {
            workspace_id,
            written: stats.documents_written,
            cause: cause.to_string(),
        }
    }
}

fn commit(session: &mut WriteSession<'_>, stats: &mut IndexStats) -> Result<u64, StorageError> {
    let opstamp = session.commit()?;
    stats.commits += 1;
    Ok(opstamp)
}
