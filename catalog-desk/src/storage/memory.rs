//! In-memory blob storage

use super::{RecordStorage, StorageResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::rc::Rc;

/// Keeps the serialized blob in memory. Clones share the same blob, so a
/// test can hand one clone to the store and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    blob: Rc<RefCell<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing JSON blob
    pub fn with_blob(json: impl Into<String>) -> Self {
        Self {
            blob: Rc::new(RefCell::new(Some(json.into()))),
        }
    }

    /// Current JSON blob, if anything was saved
    pub fn blob(&self) -> Option<String> {
        self.blob.borrow().clone()
    }
}

impl<R: Serialize + DeserializeOwned> RecordStorage<R> for MemoryStorage {
    fn load(&self) -> StorageResult<Option<Vec<R>>> {
        match self.blob.borrow().as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, records: &[R]) -> StorageResult<()> {
        let json = serde_json::to_string(records)?;
        *self.blob.borrow_mut() = Some(json);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;
    use shared::Product;

    #[test]
    fn test_empty_then_saved() {
        let storage = MemoryStorage::new();
        let loaded: Option<Vec<Product>> = storage.load().unwrap();
        assert!(loaded.is_none());

        let products = Product::seed();
        storage.save(products.as_slice()).unwrap();

        let handle = storage.clone();
        let loaded: Option<Vec<Product>> = handle.load().unwrap();
        assert_eq!(loaded, Some(products));
        assert!(handle.blob().unwrap().contains("\"releaseDate\":\"2024-01-01\""));
    }

    #[test]
    fn test_corrupt_blob() {
        let storage = MemoryStorage::with_blob("{not json");
        let result: StorageResult<Option<Vec<Product>>> = storage.load();
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }
}
