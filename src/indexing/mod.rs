//! Turning workspaces into index documents and writing them.

pub mod coordinator;
pub mod decisions;
pub mod documentation;
pub mod flatten;
pub mod owner;
pub mod progress;
pub mod urls;

pub use coordinator::WorkspaceIndexer;
pub use decisions::{decision_document, decision_documents};
pub use documentation::{DocumentationSection, section_documents, split_sections};
pub use flatten::ModelFlattener;
pub use owner::Owner;
pub use progress::IndexStats;
