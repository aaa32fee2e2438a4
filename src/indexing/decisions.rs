//! Architecture decision records to documents.

use super::Owner;
use super::urls::decision_url;
use crate::model::Decision;
use crate::types::{DocumentType, IndexedDocument, WorkspaceId, join_non_empty};

/// The status is stored as the description for display and is also
/// searchable through the content.
pub fn decision_document(
    workspace_id: WorkspaceId,
    owner: &Owner<'_>,
    decision: &Decision,
) -> IndexedDocument {
    IndexedDocument::new(workspace_id, DocumentType::Decision)
        .with_url(decision_url(&owner.path(), &decision.id))
        .with_name(format!(
            "{} - {}. {}",
            owner.name(),
            decision.id,
            decision.title
        ))
        .with_description(decision.status.as_str())
        .with_content(join_non_empty([
            decision.title.as_str(),
            decision.content.as_str(),
            decision.status.as_str(),
        ]))
}

pub fn decision_documents<'a>(
    workspace_id: WorkspaceId,
    owner: &Owner<'_>,
    decisions: impl IntoIterator<Item = &'a Decision>,
) -> Vec<IndexedDocument> {
    decisions
        .into_iter()
        .map(|decision| decision_document(workspace_id, owner, decision))
        .collect()
}
