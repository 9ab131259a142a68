//! redb-based blob storage for the record list

use super::{RecordStorage, StorageResult};
use redb::{Database, ReadableDatabase, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Named blobs: key = blob name, value = JSON
pub const BLOBS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("blobs");

/// One JSON blob under a fixed key in an embedded redb database
#[derive(Clone)]
pub struct RedbStorage {
    db: Arc<Database>,
    key: String,
}

impl RedbStorage {
    /// Open or create database
    pub fn open(path: impl AsRef<Path>, key: impl Into<String>) -> StorageResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let db = Database::create(path)?;
        Self::init(db, key.into())
    }

    /// Open in-memory database
    pub fn open_in_memory(key: impl Into<String>) -> StorageResult<Self> {
        let db =
            Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db, key.into())
    }

    fn init(db: Database, key: String) -> StorageResult<Self> {
        // Initialize tables
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(BLOBS_TABLE)?;
        }
        write_txn.commit()?;

        tracing::debug!(key = %key, "blob storage ready");
        Ok(Self {
            db: Arc::new(db),
            key,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Raw blob bytes
    pub fn read_blob(&self) -> StorageResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(BLOBS_TABLE)?;

        let bytes = table.get(self.key.as_str())?.map(|guard| guard.value().to_vec());
        Ok(bytes)
    }

    /// Overwrite the blob in a single write transaction
    pub fn write_blob(&self, bytes: &[u8]) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(BLOBS_TABLE)?;
            table.insert(self.key.as_str(), bytes)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

impl<R: Serialize + DeserializeOwned> RecordStorage<R> for RedbStorage {
    fn load(&self) -> StorageResult<Option<Vec<R>>> {
        match self.read_blob()? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn save(&self, records: &[R]) -> StorageResult<()> {
        let bytes = serde_json::to_vec(records)?;
        self.write_blob(&bytes)?;
        tracing::debug!(key = %self.key, count = records.len(), bytes = bytes.len(), "blob saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;
    use shared::{Item, Product};

    #[test]
    fn test_missing_blob_is_none() {
        let storage = RedbStorage::open_in_memory("products").unwrap();
        let loaded: Option<Vec<Product>> = storage.load().unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_then_load_keeps_order() {
        let storage = RedbStorage::open_in_memory("products").unwrap();
        let mut products = Product::seed();
        products.reverse();

        storage.save(products.as_slice()).unwrap();
        let loaded: Vec<Product> = storage.load().unwrap().unwrap();
        assert_eq!(loaded, products);
        assert_eq!(loaded[0].id, 2);
    }

    #[test]
    fn test_save_overwrites_wholesale() {
        let storage = RedbStorage::open_in_memory("products").unwrap();
        storage.save(Product::seed().as_slice()).unwrap();
        storage.save(&Product::seed()[..1]).unwrap();

        let loaded: Vec<Product> = storage.load().unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn test_keys_are_independent() {
        let products = RedbStorage::open_in_memory("products").unwrap();
        products.save(Product::seed().as_slice()).unwrap();

        let items = RedbStorage {
            db: products.db.clone(),
            key: "items".to_string(),
        };
        let loaded: Option<Vec<Item>> = items.load().unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_corrupt_blob_is_serialization_error() {
        let storage = RedbStorage::open_in_memory("products").unwrap();
        storage.write_blob(b"[{\"id\":").unwrap();

        let result: StorageResult<Option<Vec<Product>>> = storage.load();
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_reopen_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("catalog.redb");

        {
            let storage = RedbStorage::open(&path, "products").unwrap();
            storage.save(Product::seed().as_slice()).unwrap();
        }

        let storage = RedbStorage::open(&path, "products").unwrap();
        let loaded: Vec<Product> = storage.load().unwrap().unwrap();
        assert_eq!(loaded, Product::seed());
    }
}
