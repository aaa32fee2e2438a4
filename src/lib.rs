//! Full-text search over architecture workspaces.
//!
//! Workspaces are flattened into flat documents (an overview, one per
//! diagram, one per documentation section and one per decision), written to
//! a tantivy index, and searched within a caller-supplied set of workspaces.

pub mod component;
pub mod config;
pub mod display;
pub mod error;
pub mod indexing;
pub mod model;
pub mod query;
pub mod storage;
pub mod types;

// Explicit exports for better API clarity
pub use component::{
    DisabledSearchComponent, SearchComponent, TantivySearchComponent, create_search_component,
};
pub use config::{CommitMode, Settings};
pub use error::{IndexError, IndexResult};
pub use indexing::{IndexStats, WorkspaceIndexer};
pub use model::Workspace;
pub use query::QueryEngine;
pub use storage::{DocumentIndex, IndexMetadata, StorageError, StorageResult};
pub use types::{DocumentType, IndexedDocument, SearchResult, WorkspaceId};
