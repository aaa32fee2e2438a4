//! Metadata tracking for index state
//!
//! Kept next to the index as `index.meta` (JSON). It records which
//! workspaces are indexed, how many documents each produced and when.

use crate::types::WorkspaceId;
use crate::{IndexError, IndexResult};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const METADATA_FILE: &str = "index.meta";

/// Metadata about the index state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexMetadata {
    /// Version of the index format
    pub version: u32,

    /// Last modification timestamp
    pub last_modified: u64,

    /// Last clear of the whole index, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_cleared: Option<u64>,

    /// Indexed workspaces by id
    #[serde(default)]
    pub workspaces: BTreeMap<WorkspaceId, WorkspaceEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceEntry {
    pub name: String,
    pub document_count: usize,
    pub indexed_at: u64,
}

impl Default for IndexMetadata {
    fn default() -> Self {
        Self {
            version: 1,
            last_modified: get_utc_timestamp(),
            last_cleared: None,
            workspaces: BTreeMap::new(),
        }
    }
}

impl IndexMetadata {
    /// Create new metadata for a fresh index
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed reindex
    pub fn record_indexed(&mut self, workspace_id: WorkspaceId, name: &str, document_count: usize) {
        let now = get_utc_timestamp();
        self.workspaces.insert(
            workspace_id,
            WorkspaceEntry {
                name: name.to_string(),
                document_count,
                indexed_at: now,
            },
        );
        self.last_modified = now;
    }

    /// Record a workspace deletion
    pub fn record_deleted(&mut self, workspace_id: WorkspaceId) -> Option<WorkspaceEntry> {
        self.last_modified = get_utc_timestamp();
        self.workspaces.remove(&workspace_id)
    }

    /// Record a full clear
    pub fn record_cleared(&mut self) {
        let now = get_utc_timestamp();
        self.workspaces.clear();
        self.last_cleared = Some(now);
        self.last_modified = now;
    }

    pub fn document_count(&self) -> usize {
        self.workspaces.values().map(|w| w.document_count).sum()
    }

    /// Save metadata to file
    pub fn save(&self, base_path: &Path) -> IndexResult<()> {
        let metadata_path = base_path.join(METADATA_FILE);
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| IndexError::General(format!("Failed to serialize metadata: {e}")))?;

        fs::create_dir_all(base_path).map_err(|e| IndexError::FileWrite {
            path: base_path.to_path_buf(),
            source: e,
        })?;
        fs::write(&metadata_path, json).map_err(|e| IndexError::FileWrite {
            path: metadata_path,
            source: e,
        })?;

        Ok(())
    }

    /// Load metadata from file, or fresh metadata if there is none yet
    pub fn load(base_path: &Path) -> IndexResult<Self> {
        let metadata_path = base_path.join(METADATA_FILE);

        if !metadata_path.exists() {
            return Ok(Self::new());
        }

        let json = fs::read_to_string(&metadata_path).map_err(|e| IndexError::FileRead {
            path: metadata_path.clone(),
            source: e,
        })?;

        serde_json::from_str(&json)
            .map_err(|e| IndexError::General(format!("Failed to parse metadata: {e}")))
    }
}

/// Get current UTC timestamp in seconds since UNIX_EPOCH
pub fn get_utc_timestamp() -> u64 {
    Utc::now().timestamp() as u64
}
