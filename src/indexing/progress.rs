//! Statistics for reindex operations

use std::time::{Duration, Instant};

use crate::types::{DocumentType, WorkspaceId};

/// Statistics collected while reindexing one workspace
#[derive(Debug, Default, Clone)]
pub struct IndexStats {
    pub workspace_id: WorkspaceId,

    /// Documents generated from the workspace
    pub documents_generated: usize,

    /// Documents handed to the store before the final commit
    pub documents_written: usize,

    /// Number of commits issued
    pub commits: usize,

    /// Documents written per type, in [`DocumentType::ALL`] order
    per_type: [usize; 4],

    /// Time elapsed during indexing
    pub elapsed: Duration,

    start_time: Option<Instant>,
}

impl IndexStats {
    /// Create new stats and start timing
    pub fn new(workspace_id: WorkspaceId) -> Self {
        Self {
            workspace_id,
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    pub fn record(&mut self, doc_type: DocumentType) {
        self.documents_written += 1;
        self.per_type[type_slot(doc_type)] += 1;
    }

    pub fn count(&self, doc_type: DocumentType) -> usize {
        self.per_type[type_slot(doc_type)]
    }

    /// Stop timing and record elapsed time
    pub fn stop_timing(&mut self) {
        if let Some(start) = self.start_time {
            self.elapsed = start.elapsed();
            self.start_time = None;
        }
    }
}

fn type_slot(doc_type: DocumentType) -> usize {
    match doc_type {
        DocumentType::Workspace => 0,
        DocumentType::Diagram => 1,
        DocumentType::Documentation => 2,
        DocumentType::Decision => 3,
    }
}
