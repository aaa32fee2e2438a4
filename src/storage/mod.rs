pub mod error;
pub mod metadata;
pub mod tantivy;

pub use error::{StorageError, StorageResult};
pub use metadata::{IndexMetadata, WorkspaceEntry, get_utc_timestamp};
pub use self::tantivy::{DocumentIndex, IndexLocation, IndexSchema, ReadSession, WriteSession};
