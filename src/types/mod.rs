//! Flat document model shared by the indexer, the store and the query engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of the workspace that owns a document.
pub type WorkspaceId = i64;

/// The kind of record a document was flattened from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// The workspace overview (name and description)
    Workspace,
    /// One view of the model
    Diagram,
    /// One heading-delimited documentation section
    Documentation,
    /// One architecture decision record
    Decision,
}

impl DocumentType {
    pub const ALL: [DocumentType; 4] = [
        DocumentType::Workspace,
        DocumentType::Diagram,
        DocumentType::Documentation,
        DocumentType::Decision,
    ];

    /// Canonical term stored in the index for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Workspace => "workspace",
            DocumentType::Diagram => "diagram",
            DocumentType::Documentation => "documentation",
            DocumentType::Decision => "decision",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "workspace" => Ok(DocumentType::Workspace),
            "diagram" => Ok(DocumentType::Diagram),
            "documentation" => Ok(DocumentType::Documentation),
            "decision" => Ok(DocumentType::Decision),
            _ => Err("Unknown document type"),
        }
    }
}

/// The unit of storage and search.
///
/// `content` is only ever written to the index. It is tokenized for
/// matching but never stored, so it can not appear in a [`SearchResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedDocument {
    pub url: String,
    pub workspace_id: WorkspaceId,
    pub doc_type: DocumentType,
    pub name: String,
    pub description: String,
    pub content: String,
}

impl IndexedDocument {
    pub fn new(workspace_id: WorkspaceId, doc_type: DocumentType) -> Self {
        Self {
            url: String::new(),
            workspace_id,
            doc_type,
            name: String::new(),
            description: String::new(),
            content: String::new(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }
}

/// Projection of a matched document: exactly its stored fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub workspace_id: WorkspaceId,
    pub url: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
}

/// Accumulates searchable text fragments separated by single spaces.
///
/// Empty fragments contribute nothing, so callers can push optional
/// model attributes without checking them first.
#[derive(Debug, Default, Clone)]
pub struct ContentBuilder {
    buf: String,
}

impl ContentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: &str) -> &mut Self {
        if !fragment.is_empty() {
            if !self.buf.is_empty() {
                self.buf.push(' ');
            }
            self.buf.push_str(fragment);
        }
        self
    }

    pub fn push_opt(&mut self, fragment: Option<&str>) -> &mut Self {
        if let Some(fragment) = fragment {
            self.push(fragment);
        }
        self
    }

    pub fn extend<'a>(&mut self, fragments: impl IntoIterator<Item = &'a str>) -> &mut Self {
        for fragment in fragments {
            self.push(fragment);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn build(self) -> String {
        self.buf
    }
}

/// Space-join the non-empty fragments.
pub fn join_non_empty<'a>(fragments: impl IntoIterator<Item = &'a str>) -> String {
    let mut builder = ContentBuilder::new();
    builder.extend(fragments);
    builder.build()
}
