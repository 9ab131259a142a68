//! Persistence for the record list
//!
//! The whole list is one JSON blob, read once at startup and overwritten
//! wholesale after every mutation. [`RecordStorage`] is injected into the
//! record store so tests and the item schema can run without a database.

mod database;
mod memory;

pub use database::{BLOBS_TABLE, RedbStorage};
pub use memory::MemoryStorage;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Load/save capability for a list of records
pub trait RecordStorage<R> {
    /// The persisted list, or `None` when nothing was ever saved
    fn load(&self) -> StorageResult<Option<Vec<R>>>;

    /// Replace the persisted list
    fn save(&self, records: &[R]) -> StorageResult<()>;
}
