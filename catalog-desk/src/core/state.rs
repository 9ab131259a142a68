//! Desk state
//!
//! [`DeskState`] owns the store, the form and the notifier, and applies
//! every [`FormIntent`] through [`DeskState::update`]. The host supplies a
//! [`Confirm`] for delete prompts and a [`Clock`] for "today", new ids and
//! notification deadlines.

use shared::FormIntent;

use crate::catalog::{FormController, Notifier, Record, RecordStore, Severity, Submission};
use crate::storage::{RecordStorage, RedbStorage, StorageError};
use crate::utils::Clock;

use super::config::Config;
use super::error::Result;

pub const MSG_CHECK_INPUT: &str = "Periksa kembali input Anda.";
pub const MSG_SAVE_FAILED: &str = "Gagal menyimpan data.";

/// Blocking yes/no prompt
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Open the record store the configuration asks for
///
/// Persisted stores live in the redb file under the work dir; everything
/// else starts from the seed in memory.
pub fn open_store<R: Record>(config: &Config) -> Result<RecordStore<R>> {
    if !config.persists() {
        tracing::info!(entity = R::ENTITY, "Using in-memory store");
        return Ok(RecordStore::in_memory(R::seed()));
    }

    let path = config.database_path();
    let storage = RedbStorage::open(&path, &config.storage_key)?;
    tracing::info!(path = %path.display(), key = %config.storage_key, "Opened record storage");
    let storage: Box<dyn RecordStorage<R>> = Box::new(storage);
    Ok(RecordStore::open(storage)?)
}

pub struct DeskState<R: Record> {
    store: RecordStore<R>,
    form: FormController<R>,
    notifier: Notifier,
    clock: Box<dyn Clock>,
}

impl<R: Record> DeskState<R> {
    pub fn new(store: RecordStore<R>, notifier: Notifier, clock: Box<dyn Clock>) -> Self {
        Self {
            store,
            form: FormController::new(),
            notifier,
            clock,
        }
    }

    pub fn store(&self) -> &RecordStore<R> {
        &self.store
    }

    pub fn records(&self) -> &[R] {
        self.store.list()
    }

    pub fn form(&self) -> &FormController<R> {
        &self.form
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn update(&mut self, intent: FormIntent, confirm: &mut dyn Confirm) {
        match intent {
            FormIntent::EditField { field, value } => {
                if !self.form.edit_field(&field, &value) {
                    tracing::debug!(field = %field, value = %value, "Edit rejected");
                }
            }
            FormIntent::Submit => self.submit(),
            FormIntent::BeginEdit { id } => self.begin_edit(id),
            FormIntent::Cancel => self.form.reset(),
            FormIntent::Delete { id } => self.delete(id, confirm),
            FormIntent::DismissNotification => self.notifier.dismiss(),
            FormIntent::Tick => {
                self.notifier.tick(self.clock.now());
            }
        }
    }

    fn submit(&mut self) {
        let today = self.clock.today();
        match self.form.prepare(self.store.list(), today) {
            Submission::Invalid => {
                tracing::debug!(errors = self.form.errors().len(), "Submit rejected");
                self.notify(MSG_CHECK_INPUT, Severity::Danger);
            }
            Submission::TargetGone(id) => {
                tracing::warn!(id, "Edit target no longer exists");
                self.notify(
                    format!("{} yang diedit sudah tidak ada.", R::ENTITY),
                    Severity::Danger,
                );
            }
            Submission::Create(data) => {
                let result = self.store.create(data, self.clock.now_millis());
                self.form.reset();
                match result {
                    Ok(_) => self.notify(
                        format!("{} berhasil ditambahkan.", R::ENTITY),
                        Severity::Success,
                    ),
                    Err(e) => self.save_failed(e),
                }
            }
            Submission::Update(id, data) => {
                let result = self.store.update(id, data);
                self.form.reset();
                match result {
                    Ok(_) => self.notify(
                        format!("{} berhasil diperbarui.", R::ENTITY),
                        Severity::Success,
                    ),
                    Err(e) => self.save_failed(e),
                }
            }
        }
    }

    fn begin_edit(&mut self, id: i64) {
        match self.store.get(id) {
            Some(record) => self.form.begin_edit(record),
            None => tracing::debug!(id, "Edit requested for unknown record"),
        }
    }

    fn delete(&mut self, id: i64, confirm: &mut dyn Confirm) {
        let Some(record) = self.store.get(id) else {
            tracing::debug!(id, "Delete requested for unknown record");
            return;
        };

        let prompt = format!("Hapus {} \"{}\"?", R::ENTITY, record.name());
        if !confirm.confirm(&prompt) {
            tracing::debug!(id, "Delete declined");
            return;
        }

        let result = self.store.delete(id);
        if self.form.editing_id() == Some(id) {
            self.form.reset();
        }
        match result {
            Ok(_) => self.notify(format!("{} berhasil dihapus.", R::ENTITY), Severity::Success),
            Err(e) => self.save_failed(e),
        }
    }

    fn save_failed(&mut self, error: StorageError) {
        tracing::error!(error = %error, "Failed to persist {} records", R::ENTITY);
        self.notify(MSG_SAVE_FAILED, Severity::Danger);
    }

    fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        let now = self.clock.now();
        self.notifier.show(message, severity, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FormMode;
    use crate::storage::{MemoryStorage, StorageResult};
    use crate::utils::FixedClock;
    use chrono::{Duration, NaiveDate};
    use shared::{Item, Product};
    use std::cell::Cell;
    use std::rc::Rc;

    fn clock() -> FixedClock {
        FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
    }

    fn product_state(clock: &FixedClock) -> DeskState<Product> {
        DeskState::new(
            RecordStore::in_memory(Product::seed()),
            Notifier::default(),
            Box::new(clock.clone()),
        )
    }

    fn yes(_: &str) -> bool {
        true
    }

    fn no(_: &str) -> bool {
        false
    }

    fn fill(state: &mut DeskState<Product>, name: &str) {
        for (field, value) in [
            ("name", name),
            ("price", "15000"),
            ("category", "Makanan"),
            ("releaseDate", "2024-01-01"),
        ] {
            state.update(FormIntent::edit(field, value), &mut no);
        }
    }

    fn notice<R: Record>(state: &DeskState<R>) -> Option<(&str, Severity)> {
        state.notifier().current()
    }

    #[test]
    fn test_create_product() {
        let clock = clock();
        let mut state = product_state(&clock);
        fill(&mut state, "Nasi Uduk");
        state.update(FormIntent::Submit, &mut no);

        assert_eq!(state.records().len(), 3);
        assert_eq!(state.records()[0].name, "Nasi Uduk");
        assert_eq!(state.records()[0].id, clock.now_millis());
        assert_eq!(state.form().mode(), FormMode::Idle);
        assert_eq!(
            notice(&state),
            Some(("Produk berhasil ditambahkan.", Severity::Success))
        );
    }

    #[test]
    fn test_invalid_submit_keeps_draft() {
        let clock = clock();
        let mut state = product_state(&clock);
        state.update(FormIntent::edit("price", "10"), &mut no);
        state.update(FormIntent::Submit, &mut no);

        assert_eq!(state.records().len(), 2);
        assert_eq!(state.form().draft().price, "10");
        assert!(state.form().errors().contains("name"));
        assert_eq!(notice(&state), Some((MSG_CHECK_INPUT, Severity::Danger)));
    }

    #[test]
    fn test_future_release_date_rejected() {
        let clock = clock();
        let mut state = product_state(&clock);
        fill(&mut state, "Roti");
        state.update(FormIntent::edit("releaseDate", "2024-06-16"), &mut no);
        state.update(FormIntent::Submit, &mut no);
        assert!(state.form().errors().contains("releaseDate"));

        state.update(FormIntent::edit("releaseDate", "2024-06-15"), &mut no);
        state.update(FormIntent::Submit, &mut no);
        assert_eq!(state.records().len(), 3);
    }

    #[test]
    fn test_edit_then_submit_updates_in_place() {
        let clock = clock();
        let mut state = product_state(&clock);
        state.update(FormIntent::BeginEdit { id: 2 }, &mut no);
        assert_eq!(state.form().mode(), FormMode::Editing(2));

        state.update(FormIntent::edit("name", "Es Campur"), &mut no);
        state.update(FormIntent::Submit, &mut no);

        assert_eq!(state.records()[1].id, 2);
        assert_eq!(state.records()[1].name, "Es Campur");
        assert_eq!(state.records().len(), 2);
        assert_eq!(
            notice(&state),
            Some(("Produk berhasil diperbarui.", Severity::Success))
        );
    }

    #[test]
    fn test_cancel_edit() {
        let clock = clock();
        let mut state = product_state(&clock);
        state.update(FormIntent::BeginEdit { id: 1 }, &mut no);
        state.update(FormIntent::edit("name", "Changed"), &mut no);
        state.update(FormIntent::Cancel, &mut no);

        assert_eq!(state.form().mode(), FormMode::Idle);
        assert_eq!(state.records()[0].name, "Makanan");
    }

    #[test]
    fn test_delete_asks_first() {
        let clock = clock();
        let mut state = product_state(&clock);
        let prompts = Rc::new(Cell::new(0));
        let seen = prompts.clone();
        let mut decline = move |prompt: &str| {
            assert_eq!(prompt, "Hapus Produk \"Minuman\"?");
            seen.set(seen.get() + 1);
            false
        };

        state.update(FormIntent::Delete { id: 2 }, &mut decline);
        assert_eq!(prompts.get(), 1);
        assert_eq!(state.records().len(), 2);
        assert!(notice(&state).is_none());

        state.update(FormIntent::Delete { id: 2 }, &mut yes);
        assert_eq!(state.records().len(), 1);
        assert_eq!(
            notice(&state),
            Some(("Produk berhasil dihapus.", Severity::Success))
        );
    }

    #[test]
    fn test_delete_unknown_is_silent() {
        let clock = clock();
        let mut state = product_state(&clock);
        let mut never = |_: &str| -> bool { panic!("no prompt expected") };
        state.update(FormIntent::Delete { id: 404 }, &mut never);
        assert_eq!(state.records().len(), 2);
        assert!(notice(&state).is_none());
    }

    #[test]
    fn test_delete_record_under_edit_resets_form() {
        let clock = clock();
        let mut state = product_state(&clock);
        state.update(FormIntent::BeginEdit { id: 1 }, &mut no);
        state.update(FormIntent::Delete { id: 1 }, &mut yes);
        assert_eq!(state.form().mode(), FormMode::Idle);
    }

    #[test]
    fn test_notification_expires_on_tick() {
        let clock = clock();
        let mut state = product_state(&clock);
        state.update(FormIntent::Submit, &mut no);
        assert!(state.notifier().is_visible());

        clock.advance(Duration::milliseconds(2999));
        state.update(FormIntent::Tick, &mut no);
        assert!(state.notifier().is_visible());

        clock.advance(Duration::milliseconds(1));
        state.update(FormIntent::Tick, &mut no);
        assert!(!state.notifier().is_visible());
    }

    #[test]
    fn test_dismiss_notification() {
        let clock = clock();
        let mut state = product_state(&clock);
        state.update(FormIntent::Submit, &mut no);
        state.update(FormIntent::DismissNotification, &mut no);
        assert!(notice(&state).is_none());
    }

    #[test]
    fn test_rapid_creates_get_distinct_ids() {
        let clock = clock();
        let mut state = product_state(&clock);
        fill(&mut state, "A");
        state.update(FormIntent::Submit, &mut no);
        fill(&mut state, "B");
        state.update(FormIntent::Submit, &mut no);

        assert_ne!(state.records()[0].id, state.records()[1].id);
    }

    struct FailingStorage;

    impl RecordStorage<Product> for FailingStorage {
        fn load(&self) -> StorageResult<Option<Vec<Product>>> {
            Ok(Some(Product::seed()))
        }

        fn save(&self, _records: &[Product]) -> StorageResult<()> {
            Err(StorageError::Io(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn test_save_failure_is_reported() {
        let clock = clock();
        let store = RecordStore::<Product>::open(Box::new(FailingStorage)).unwrap();
        let mut state = DeskState::new(store, Notifier::default(), Box::new(clock.clone()));

        fill(&mut state, "Bakso");
        state.update(FormIntent::Submit, &mut no);

        assert_eq!(state.records().len(), 3);
        assert_eq!(state.form().mode(), FormMode::Idle);
        assert_eq!(notice(&state), Some((MSG_SAVE_FAILED, Severity::Danger)));
    }

    #[test]
    fn test_persisted_after_each_mutation() {
        let clock = clock();
        let storage = MemoryStorage::new();
        let store = RecordStore::<Product>::open(Box::new(storage.clone())).unwrap();
        let mut state = DeskState::new(store, Notifier::default(), Box::new(clock.clone()));

        state.update(FormIntent::Delete { id: 1 }, &mut yes);
        let saved: Vec<Product> = RecordStorage::load(&storage).unwrap().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, 2);
    }

    #[test]
    fn test_edit_target_deleted_elsewhere() {
        let clock = clock();
        let storage = MemoryStorage::new();
        let store = RecordStore::<Product>::open(Box::new(storage.clone())).unwrap();
        let mut state = DeskState::new(store, Notifier::default(), Box::new(clock.clone()));

        state.update(FormIntent::BeginEdit { id: 1 }, &mut no);
        state.store.delete(1).unwrap();
        state.update(FormIntent::Submit, &mut no);

        assert_eq!(state.records().len(), 1);
        assert_eq!(state.form().mode(), FormMode::Idle);
        assert_eq!(
            notice(&state),
            Some(("Produk yang diedit sudah tidak ada.", Severity::Danger))
        );
    }

    fn item_state(clock: &FixedClock) -> DeskState<Item> {
        DeskState::new(
            RecordStore::in_memory(Item::seed()),
            Notifier::default(),
            Box::new(clock.clone()),
        )
    }

    #[test]
    fn test_item_duplicate_name() {
        let clock = clock();
        let mut state = item_state(&clock);
        assert!(state.records().is_empty());

        state.update(FormIntent::edit("name", "Sembako"), &mut no);
        state.update(FormIntent::Submit, &mut no);
        assert_eq!(notice(&state), Some(("Item berhasil ditambahkan.", Severity::Success)));

        state.update(FormIntent::edit("name", "sembako"), &mut no);
        state.update(FormIntent::Submit, &mut no);
        assert_eq!(state.records().len(), 1);
        assert_eq!(state.form().errors().get("name"), Some("Nama sudah digunakan."));

        // typing clears the error for item forms
        state.update(FormIntent::edit("name", "Sembako Murah"), &mut no);
        assert!(state.form().errors().is_empty());
    }

    #[test]
    fn test_item_rename_keeps_own_name() {
        let clock = clock();
        let mut state = item_state(&clock);
        state.update(FormIntent::edit("name", "Sembako"), &mut no);
        state.update(FormIntent::Submit, &mut no);
        let id = state.records()[0].id;

        state.update(FormIntent::BeginEdit { id }, &mut no);
        state.update(FormIntent::edit("name", "SEMBAKO"), &mut no);
        state.update(FormIntent::Submit, &mut no);

        assert_eq!(state.records()[0].name, "SEMBAKO");
        assert_eq!(notice(&state), Some(("Item berhasil diperbarui.", Severity::Success)));
    }
}
