//! Errors raised by the index store.

use tantivy::directory::error::OpenDirectoryError;
use tantivy::{TantivyError, query::QueryParserError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Tantivy error: {0}")]
    Tantivy(#[from] TantivyError),

    #[error("Tantivy query parser error: {0}")]
    QueryParser(#[from] QueryParserError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory error: {0}")]
    Directory(#[from] OpenDirectoryError),

    #[error("Index is not available: {reason}")]
    Unavailable { reason: String },
}

pub type StorageResult<T> = Result<T, StorageError>;
