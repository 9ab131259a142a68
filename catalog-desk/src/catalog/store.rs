//! Record Store
//!
//! Owns the ordered record list (newest first) and writes the whole list
//! back to its storage after every mutation. The in-memory change is
//! applied before persisting, so a failed save leaves the list updated
//! but not durable.

use crate::storage::{RecordStorage, StorageError, StorageResult};

use super::record::Record;

pub struct RecordStore<R: Record> {
    records: Vec<R>,
    storage: Option<Box<dyn RecordStorage<R>>>,
}

impl<R: Record> RecordStore<R> {
    /// Store that never persists
    pub fn in_memory(records: Vec<R>) -> Self {
        Self {
            records,
            storage: None,
        }
    }

    /// Load the persisted list
    ///
    /// Nothing persisted yet: seed and save. An unreadable blob is treated
    /// the same way (logged, then replaced by the seed). Storage failures
    /// are returned.
    pub fn open(storage: Box<dyn RecordStorage<R>>) -> StorageResult<Self> {
        let loaded = match storage.load() {
            Ok(loaded) => loaded,
            Err(StorageError::Serialization(e)) => {
                tracing::warn!(error = %e, "Persisted records unreadable, reseeding");
                None
            }
            Err(e) => return Err(e),
        };

        let store = match loaded {
            Some(mut records) => {
                let clamped = records
                    .iter_mut()
                    .map(|r| r.clamp_ranges())
                    .filter(|&c| c)
                    .count();
                if clamped > 0 {
                    tracing::warn!(clamped, "Loaded {} records out of range, clamped", R::ENTITY);
                }
                tracing::info!(count = records.len(), "Loaded {} records", R::ENTITY);
                Self {
                    records,
                    storage: Some(storage),
                }
            }
            None => {
                let store = Self {
                    records: R::seed(),
                    storage: Some(storage),
                };
                store.persist()?;
                tracing::info!(count = store.records.len(), "Seeded {} records", R::ENTITY);
                store
            }
        };

        Ok(store)
    }

    /// All records, newest first
    pub fn list(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.get(id).is_some()
    }

    pub fn is_persistent(&self) -> bool {
        self.storage.is_some()
    }

    /// Id for a new record: the current time in millis, bumped past the
    /// largest existing id so two creates in the same millisecond differ
    pub fn next_id(&self, now_millis: i64) -> i64 {
        let max = self.records.iter().map(|r| r.id()).max();
        match max {
            Some(max) if max >= now_millis => max
                .checked_add(1)
                .unwrap_or_else(|| self.lowest_free_id()),
            _ => now_millis,
        }
    }

    // Only reached when some stored id is already i64::MAX
    fn lowest_free_id(&self) -> i64 {
        (1..i64::MAX).find(|id| !self.contains(*id)).unwrap_or(0)
    }

    /// Insert a new record at the front and return its id
    pub fn create(&mut self, data: R::Data, now_millis: i64) -> StorageResult<i64> {
        let id = self.next_id(now_millis);
        self.records.insert(0, R::create(id, data));
        tracing::info!(id, "{} created", R::ENTITY);
        self.persist()?;
        Ok(id)
    }

    /// Replace a record's fields in place. Returns `false` (and touches
    /// nothing) when the id is unknown.
    pub fn update(&mut self, id: i64, data: R::Data) -> StorageResult<bool> {
        let Some(record) = self.records.iter_mut().find(|r| r.id() == id) else {
            tracing::debug!(id, "Update skipped, {} not found", R::ENTITY);
            return Ok(false);
        };
        record.apply(data);
        tracing::info!(id, "{} updated", R::ENTITY);
        self.persist()?;
        Ok(true)
    }

    /// Remove a record, returning it. Unknown ids are a no-op.
    pub fn delete(&mut self, id: i64) -> StorageResult<Option<R>> {
        let Some(pos) = self.records.iter().position(|r| r.id() == id) else {
            tracing::debug!(id, "Delete skipped, {} not found", R::ENTITY);
            return Ok(None);
        };
        let removed = self.records.remove(pos);
        tracing::info!(id, "{} deleted", R::ENTITY);
        self.persist()?;
        Ok(Some(removed))
    }

    fn persist(&self) -> StorageResult<()> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };
        storage.save(&self.records)
    }
}

impl<R: Record> std::fmt::Debug for RecordStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("records", &self.records)
            .field("persistent", &self.storage.is_some())
            .finish()
    }
}
