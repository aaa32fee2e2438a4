//! Scoped full-text search over the index.
//!
//! A search combines three required clauses: the parsed free-text query
//! over `content`, membership of the document's workspace in the caller's
//! scope, and (optionally) an exact document type.

use tantivy::query::{BooleanQuery, Occur, Query, QueryParser, TermQuery};
use tantivy::schema::IndexRecordOption;
use tracing::{debug, error};

use crate::config::Settings;
use crate::storage::{DocumentIndex, ReadSession, StorageResult};
use crate::types::{DocumentType, SearchResult, WorkspaceId};
use crate::{IndexError, IndexResult};

pub const DEFAULT_MAX_RESULTS: usize = 20;

#[derive(Debug, Clone, Copy)]
pub struct QueryEngine {
    max_results: usize,
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RESULTS)
    }
}

impl QueryEngine {
    pub fn new(max_results: usize) -> Self {
        Self { max_results }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.search.max_results)
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// A search must be scoped to at least one workspace.
    pub fn validate_scope(workspace_ids: &[WorkspaceId]) -> IndexResult<()> {
        if workspace_ids.is_empty() {
            return Err(IndexError::InvalidArgument {
                reason: "One or more workspace IDs must be provided.".to_string(),
            });
        }
        Ok(())
    }

    /// Search the latest committed snapshot.
    ///
    /// Only an empty scope is reported to the caller. Every other failure
    /// is logged and produces no results.
    pub fn search(
        &self,
        store: &DocumentIndex,
        query: &str,
        type_filter: &str,
        workspace_ids: &[WorkspaceId],
    ) -> IndexResult<Vec<SearchResult>> {
        Self::validate_scope(workspace_ids)?;

        match self.execute(store, query, type_filter, workspace_ids) {
            Ok(results) => Ok(results),
            Err(e) => {
                error!(
                    query,
                    type_filter,
                    ?workspace_ids,
                    status = %e.status_code(),
                    "Search failed: {e}"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Like [`search`](Self::search), but execution failures are returned.
    pub fn execute(
        &self,
        store: &DocumentIndex,
        query: &str,
        type_filter: &str,
        workspace_ids: &[WorkspaceId],
    ) -> IndexResult<Vec<SearchResult>> {
        Self::validate_scope(workspace_ids)?;

        if query.trim().is_empty() {
            debug!("Blank query, nothing to search");
            return Ok(Vec::new());
        }

        // TopDocs needs a limit of at least one
        if self.max_results == 0 {
            debug!("max_results is 0, nothing to search");
            return Ok(Vec::new());
        }

        let session = store
            .open_for_read()
            .map_err(|e| IndexError::store_unavailable("search", e))?;

        let query = build_query(&session, query, type_filter, workspace_ids)
            .map_err(|e| IndexError::QueryExecution {
                cause: e.to_string(),
            })?;

        let documents = session
            .top_documents(query.as_ref(), self.max_results)
            .map_err(|e| IndexError::QueryExecution {
                cause: e.to_string(),
            })?;

        let results: Vec<SearchResult> = documents
            .iter()
            .filter_map(|doc| session.schema().to_search_result(doc))
            .collect();

        debug!(hits = results.len(), "Search complete");
        Ok(results)
    }
}

/// Build the combined query against a snapshot's index.
pub fn build_query(
    session: &ReadSession,
    query: &str,
    type_filter: &str,
    workspace_ids: &[WorkspaceId],
) -> StorageResult<Box<dyn Query>> {
    let schema = session.schema();

    let mut parser = QueryParser::for_index(session.index(), vec![schema.content]);
    parser.set_conjunction_by_default();
    let text_query = parser.parse_query(query)?;

    let scope: Vec<(Occur, Box<dyn Query>)> = workspace_ids
        .iter()
        .map(|&id| {
            let term = TermQuery::new(schema.workspace_term(id), IndexRecordOption::Basic);
            (Occur::Should, Box::new(term) as Box<dyn Query>)
        })
        .collect();

    let mut clauses: Vec<(Occur, Box<dyn Query>)> = vec![
        (Occur::Must, text_query),
        (Occur::Must, Box::new(BooleanQuery::new(scope)) as Box<dyn Query>),
    ];

    if let Some(doc_type) = type_filter_term(type_filter) {
        let term = TermQuery::new(schema.type_term(&doc_type), IndexRecordOption::Basic);
        clauses.push((Occur::Must, Box::new(term) as Box<dyn Query>));
    }

    Ok(Box::new(BooleanQuery::new(clauses)))
}

/// The index term for a type filter, or `None` when no filter applies.
///
/// Known type names match case-insensitively. Anything else is kept as a
/// lowercase term, which matches no document.
pub fn type_filter_term(type_filter: &str) -> Option<String> {
    let type_filter = type_filter.trim();
    if type_filter.is_empty() {
        return None;
    }

    Some(match type_filter.parse::<DocumentType>() {
        Ok(doc_type) => doc_type.as_str().to_string(),
        Err(_) => type_filter.to_ascii_lowercase(),
    })
}
