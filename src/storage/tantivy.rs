//! Tantivy-backed document store
//!
//! Owns the index lifecycle (provision, clear, close) and hands out two
//! kinds of session:
//!
//! - [`WriteSession`]: holds the writer lock for its whole lifetime, so at
//!   most one exists at a time. Dropping a session with uncommitted
//!   operations rolls them back.
//! - [`ReadSession`]: an immutable searcher over everything committed when
//!   it was opened. Any number may be open, including while a write
//!   session is active.

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard, RwLock};
use std::path::{Path, PathBuf};
use tantivy::collector::{Count, TopDocs};
use tantivy::directory::MmapDirectory;
use tantivy::query::{Query, TermQuery};
use tantivy::schema::{
    Field, INDEXED, IndexRecordOption, STORED, STRING, Schema, TEXT, Value,
};
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, Searcher, TantivyDocument, Term};
use tracing::{debug, info, warn};

use super::{StorageError, StorageResult};
use crate::config::Settings;
use crate::types::{DocumentType, IndexedDocument, SearchResult, WorkspaceId};

pub const URL_FIELD: &str = "url";
pub const WORKSPACE_FIELD: &str = "workspace";
pub const TYPE_FIELD: &str = "type";
pub const NAME_FIELD: &str = "name";
pub const DESCRIPTION_FIELD: &str = "description";
pub const CONTENT_FIELD: &str = "content";

/// Field handles of the document schema.
///
/// `workspace` and `type` are exact-match terms; `content` is tokenized
/// and not stored; everything else is stored only.
#[derive(Debug, Clone)]
pub struct IndexSchema {
    schema: Schema,
    pub url: Field,
    pub workspace: Field,
    pub doc_type: Field,
    pub name: Field,
    pub description: Field,
    pub content: Field,
}

impl Default for IndexSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexSchema {
    pub fn new() -> Self {
        let mut builder = Schema::builder();

        let url = builder.add_text_field(URL_FIELD, STORED);
        let workspace = builder.add_i64_field(WORKSPACE_FIELD, INDEXED | STORED);
        let doc_type = builder.add_text_field(TYPE_FIELD, STRING | STORED);
        let name = builder.add_text_field(NAME_FIELD, STORED);
        let description = builder.add_text_field(DESCRIPTION_FIELD, STORED);
        let content = builder.add_text_field(CONTENT_FIELD, TEXT);

        Self {
            schema: builder.build(),
            url,
            workspace,
            doc_type,
            name,
            description,
            content,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn workspace_term(&self, workspace_id: WorkspaceId) -> Term {
        Term::from_field_i64(self.workspace, workspace_id)
    }

    pub fn type_term(&self, doc_type: &str) -> Term {
        Term::from_field_text(self.doc_type, doc_type)
    }

    pub fn to_document(&self, doc: &IndexedDocument) -> TantivyDocument {
        let mut document = TantivyDocument::default();
        document.add_text(self.url, &doc.url);
        document.add_i64(self.workspace, doc.workspace_id);
        document.add_text(self.doc_type, doc.doc_type.as_str());
        document.add_text(self.name, &doc.name);
        document.add_text(self.description, &doc.description);
        document.add_text(self.content, &doc.content);
        document
    }

    /// Project the stored fields of a hit. Returns `None` for documents
    /// that were not written by this schema's [`to_document`](Self::to_document).
    pub fn to_search_result(&self, doc: &TantivyDocument) -> Option<SearchResult> {
        let workspace_id = doc.get_first(self.workspace).and_then(|v| v.as_i64())?;
        let doc_type = self.text(doc, self.doc_type).parse::<DocumentType>().ok()?;

        Some(SearchResult {
            workspace_id,
            url: self.text(doc, self.url),
            name: self.text(doc, self.name),
            description: self.text(doc, self.description),
            doc_type,
        })
    }

    fn text(&self, doc: &TantivyDocument, field: Field) -> String {
        doc.get_first(field)
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string()
    }
}

/// Where the index lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexLocation {
    Directory(PathBuf),
    InMemory,
}

#[derive(Clone)]
struct OpenIndex {
    index: Index,
    reader: IndexReader,
}

/// The single shared index of a process.
pub struct DocumentIndex {
    location: IndexLocation,
    schema: IndexSchema,
    writer_heap_bytes: usize,
    /// Replaced wholesale by `clear`. Lock order: `writer` before `state`.
    state: RwLock<Option<OpenIndex>>,
    writer: Mutex<Option<IndexWriter>>,
}

impl DocumentIndex {
    /// Create a store handle. Nothing is touched on disk until the index is
    /// started or a session is opened.
    pub fn new(location: IndexLocation, writer_heap_bytes: usize) -> Self {
        Self {
            location,
            schema: IndexSchema::new(),
            writer_heap_bytes,
            state: RwLock::new(None),
            writer: Mutex::new(None),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let location = if settings.index.in_memory {
            IndexLocation::InMemory
        } else {
            IndexLocation::Directory(settings.index_path())
        };
        Self::new(location, settings.index.writer_heap_bytes)
    }

    pub fn in_memory() -> Self {
        Self::from_settings(&Settings::in_memory())
    }

    pub fn location(&self) -> &IndexLocation {
        &self.location
    }

    pub fn schema(&self) -> &IndexSchema {
        &self.schema
    }

    /// Make sure the index exists, keeping any prior content.
    pub fn start(&self) -> StorageResult<()> {
        self.ensure_open()?;
        info!(location = ?self.location, "Search index started");
        Ok(())
    }

    /// Erase all content and reprovision an empty, writable index.
    pub fn clear(&self) -> StorageResult<()> {
        let mut writer = self.writer.lock();
        // The old writer holds the directory lock; release it before wiping.
        writer.take();

        let mut state = self.state.write();
        state.take();

        if let IndexLocation::Directory(path) = &self.location {
            remove_index_dir(path)?;
        }

        let open = self.open_index()?;
        *writer = Some(self.create_writer(&open.index)?);
        *state = Some(open);

        info!(location = ?self.location, "Search index cleared");
        Ok(())
    }

    /// Flush and release the writer. A no-op when no writer was ever opened.
    pub fn stop(&self) -> StorageResult<()> {
        let writer = self.writer.lock().take();
        if let Some(writer) = writer {
            writer.wait_merging_threads()?;
            info!("Search index writer closed");
        }
        Ok(())
    }

    /// Acquire the single write session, blocking while another is active.
    pub fn open_for_write(&self) -> StorageResult<WriteSession<'_>> {
        let mut guard = self.writer.lock();
        if guard.is_none() {
            let open = self.ensure_open()?;
            *guard = Some(self.create_writer(&open.index)?);
            debug!("Opened index writer");
        }

        let writer = MutexGuard::try_map(guard, Option::as_mut).map_err(|_| {
            StorageError::Unavailable {
                reason: "index writer missing after provisioning".to_string(),
            }
        })?;

        Ok(WriteSession {
            writer,
            schema: &self.schema,
            staged: 0,
        })
    }

    /// Open a snapshot of everything committed so far.
    pub fn open_for_read(&self) -> StorageResult<ReadSession> {
        let open = self.ensure_open()?;
        open.reader.reload()?;

        Ok(ReadSession {
            searcher: open.reader.searcher(),
            index: open.index,
            schema: self.schema.clone(),
        })
    }

    fn ensure_open(&self) -> StorageResult<OpenIndex> {
        if let Some(open) = self.state.read().as_ref() {
            return Ok(open.clone());
        }

        let mut state = self.state.write();
        if let Some(open) = state.as_ref() {
            return Ok(open.clone());
        }

        let open = self.open_index()?;
        *state = Some(open.clone());
        Ok(open)
    }

    fn open_index(&self) -> StorageResult<OpenIndex> {
        let index = match &self.location {
            IndexLocation::Directory(path) => {
                std::fs::create_dir_all(path)?;
                let dir = MmapDirectory::open(path)?;
                Index::open_or_create(dir, self.schema.schema().clone())?
            }
            IndexLocation::InMemory => Index::create_in_ram(self.schema.schema().clone()),
        };

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;

        debug!(location = ?self.location, "Opened search index");
        Ok(OpenIndex { index, reader })
    }

    fn create_writer(&self, index: &Index) -> StorageResult<IndexWriter> {
        Ok(index.writer_with_num_threads(1, self.writer_heap_bytes)?)
    }
}

fn remove_index_dir(path: &Path) -> StorageResult<()> {
    if path.exists() {
        std::fs::remove_dir_all(path)?;
    }
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Exclusive write access to the index.
///
/// Operations are staged until [`commit`](Self::commit). The writer lock is
/// released when the session is dropped.
pub struct WriteSession<'a> {
    writer: MappedMutexGuard<'a, IndexWriter>,
    schema: &'a IndexSchema,
    staged: usize,
}

impl WriteSession<'_> {
    pub fn add(&mut self, doc: &IndexedDocument) -> StorageResult<()> {
        self.writer.add_document(self.schema.to_document(doc))?;
        self.staged += 1;
        Ok(())
    }

    /// Stage the removal of every document owned by the workspace
    pub fn delete_workspace(&mut self, workspace_id: WorkspaceId) {
        self.writer
            .delete_term(self.schema.workspace_term(workspace_id));
        self.staged += 1;
    }

    /// Make staged operations visible to read sessions opened from now on
    pub fn commit(&mut self) -> StorageResult<u64> {
        let opstamp = self.writer.commit()?;
        debug!(opstamp, operations = self.staged, "Committed index changes");
        self.staged = 0;
        Ok(opstamp)
    }

    /// Number of operations staged since the last commit
    pub fn staged(&self) -> usize {
        self.staged
    }
}

impl Drop for WriteSession<'_> {
    fn drop(&mut self) {
        if self.staged > 0 {
            warn!(
                operations = self.staged,
                "Write session dropped without commit, rolling back"
            );
            if let Err(e) = self.writer.rollback() {
                warn!("Rollback of uncommitted index changes failed: {e}");
            }
        }
    }
}

/// An immutable snapshot of the index.
pub struct ReadSession {
    searcher: Searcher,
    index: Index,
    schema: IndexSchema,
}

impl ReadSession {
    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn schema(&self) -> &IndexSchema {
        &self.schema
    }

    pub fn num_docs(&self) -> u64 {
        self.searcher.num_docs()
    }

    /// Run a query and return up to `limit` matching documents, best first
    pub fn top_documents(
        &self,
        query: &dyn Query,
        limit: usize,
    ) -> StorageResult<Vec<TantivyDocument>> {
        let top_docs = self.searcher.search(query, &TopDocs::with_limit(limit))?;

        let mut documents = Vec::with_capacity(top_docs.len());
        for (_score, address) in top_docs {
            documents.push(self.searcher.doc::<TantivyDocument>(address)?);
        }
        Ok(documents)
    }

    /// Number of documents owned by a workspace in this snapshot
    pub fn workspace_document_count(&self, workspace_id: WorkspaceId) -> StorageResult<usize> {
        let query = TermQuery::new(
            self.schema.workspace_term(workspace_id),
            IndexRecordOption::Basic,
        );
        Ok(self.searcher.search(&query, &Count)?)
    }
}
