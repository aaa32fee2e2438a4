//! Error types for the workspace search system
//!
//! This module provides structured error types using thiserror. Only
//! [`IndexError::InvalidArgument`] ever reaches callers of the search
//! component; every other variant is logged and degrades the operation.

use crate::types::WorkspaceId;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for indexing and search operations
#[derive(Error, Debug)]
pub enum IndexError {
    /// The caller supplied arguments that can never succeed
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// The index could not be provisioned or opened
    #[error("Search index unavailable during {operation}: {cause}")]
    StoreUnavailable { operation: String, cause: String },

    /// A reindex stopped part way through
    #[error(
        "Indexing workspace {workspace_id} failed after {written} documents were written: {cause}"
    )]
    PartialIndexFailure {
        workspace_id: WorkspaceId,
        written: usize,
        cause: String,
    },

    /// The query could not be parsed or executed
    #[error("Query execution failed: {cause}")]
    QueryExecution { cause: String },

    /// File system errors
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The workspace JSON could not be deserialized
    #[error("Failed to parse workspace '{path}': {reason}")]
    WorkspaceParse { path: PathBuf, reason: String },

    /// Configuration errors
    #[error("Invalid configuration: {reason}")]
    ConfigError { reason: String },

    #[error("{0}")]
    General(String),
}

impl IndexError {
    /// Get a stable status code for this error type.
    ///
    /// Returns a string identifier that can be used in JSON responses
    /// for programmatic error handling.
    pub fn status_code(&self) -> String {
        match self {
            Self::InvalidArgument { .. } => "INVALID_ARGUMENT",
            Self::StoreUnavailable { .. } => "STORE_UNAVAILABLE",
            Self::PartialIndexFailure { .. } => "PARTIAL_INDEX_FAILURE",
            Self::QueryExecution { .. } => "QUERY_EXECUTION_FAILURE",
            Self::FileRead { .. } => "FILE_READ_ERROR",
            Self::FileWrite { .. } => "FILE_WRITE_ERROR",
            Self::WorkspaceParse { .. } => "WORKSPACE_PARSE_ERROR",
            Self::ConfigError { .. } => "CONFIG_ERROR",
            Self::General(_) => "GENERAL_ERROR",
        }
        .to_string()
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::InvalidArgument { .. } => {
                vec!["Pass at least one workspace id the caller is allowed to search"]
            }
            Self::StoreUnavailable { .. } => vec![
                "Check disk space and permissions in the data directory",
                "Run 'workspace-search clear' to rebuild the index from scratch",
            ],
            Self::PartialIndexFailure { .. } => vec![
                "Documents written before the failure remain searchable",
                "Index the workspace again to replace the partial document set",
            ],
            Self::QueryExecution { .. } => vec![
                "Check the query syntax: unbalanced quotes or brackets are rejected",
            ],
            Self::WorkspaceParse { .. } => vec![
                "Check that the file is a workspace JSON export with a numeric 'id'",
            ],
            Self::FileRead { .. } => vec![
                "Check that the file exists and you have read permissions",
            ],
            Self::ConfigError { .. } => vec![
                "Run 'workspace-search config' to see the effective settings",
            ],
            _ => vec![],
        }
    }

    pub(crate) fn store_unavailable(operation: &str, cause: impl std::fmt::Display) -> Self {
        Self::StoreUnavailable {
            operation: operation.to_string(),
            cause: cause.to_string(),
        }
    }
}

/// Result type alias for index operations
pub type IndexResult<T> = Result<T, IndexError>;
