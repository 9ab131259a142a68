//! End-to-end flows through the public API with an on-disk database

use catalog_desk::core::{MSG_CHECK_INPUT, MSG_SAVE_FAILED};
use catalog_desk::{
    Config, DeskState, FixedClock, FormMode, Notifier, RecordStorage, RecordStore, RedbStorage,
    Schema, Severity, StorageError, open_store,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::{FormIntent, Item, Product};
use std::path::Path;

fn clock() -> FixedClock {
    FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
}

fn decline(_: &str) -> bool {
    false
}

fn accept(_: &str) -> bool {
    true
}

fn config(work_dir: &Path, schema: Schema) -> Config {
    Config {
        work_dir: work_dir.to_path_buf(),
        schema,
        ..Config::default()
    }
}

fn product_state(config: &Config, clock: &FixedClock) -> DeskState<Product> {
    let store = open_store::<Product>(config).unwrap();
    DeskState::new(store, Notifier::new(config.notify_timeout()), Box::new(clock.clone()))
}

fn submit_product(state: &mut DeskState<Product>, fields: &[(&str, &str)]) {
    for (field, value) in fields {
        state.update(FormIntent::edit(*field, *value), &mut decline);
    }
    state.update(FormIntent::Submit, &mut decline);
}

#[test]
fn test_first_run_seeds_database() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), Schema::Product);
    let state = product_state(&config, &clock());

    let names: Vec<_> = state.records().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Makanan", "Minuman"]);
    assert!(config.database_path().exists());
}

#[test]
fn test_changes_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), Schema::Product);
    let clock = clock();

    let created_id = {
        let mut state = product_state(&config, &clock);
        submit_product(
            &mut state,
            &[
                ("name", "  Keripik Singkong  "),
                ("description", "Keripik singkong pedas manis renyah"),
                ("price", "12500.50"),
                ("category", "Makanan"),
                ("releaseDate", "2024-06-15"),
                ("stock", "75"),
                ("isActive", "false"),
            ],
        );
        assert_eq!(
            state.notifier().current(),
            Some(("Produk berhasil ditambahkan.", Severity::Success))
        );

        state.update(FormIntent::Delete { id: 1 }, &mut accept);
        state.records()[0].id
    };

    let state = product_state(&config, &clock);
    let ids: Vec<_> = state.records().iter().map(|p| p.id).collect();
    assert_eq!(ids, [created_id, 2]);

    let product = &state.records()[0];
    assert_eq!(product.name, "Keripik Singkong");
    assert_eq!(product.price, Decimal::new(1_250_050, 2));
    assert_eq!(product.stock, 75);
    assert!(!product.is_active);
    assert_eq!(product.release_date, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
}

#[test]
fn test_persisted_json_shape() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), Schema::Product);
    drop(product_state(&config, &clock()));

    let storage = RedbStorage::open(config.database_path(), "products").unwrap();
    let blob = storage.read_blob().unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&blob).unwrap();

    let first = &json[0];
    assert_eq!(first["id"], 1);
    assert_eq!(first["releaseDate"], "2024-01-01");
    assert_eq!(first["isActive"], true);
    assert_eq!(first["category"], "Makanan");
    assert_eq!(first["price"], 15000.0);
}

#[test]
fn test_invalid_submit_leaves_database_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), Schema::Product);
    let clock = clock();
    let mut state = product_state(&config, &clock);

    submit_product(
        &mut state,
        &[
            ("price", "-5"),
            ("category", "Makanan"),
            ("releaseDate", "2024-06-16"),
        ],
    );

    let errors = state.form().errors();
    assert_eq!(errors.get("name"), Some("Nama Produk wajib diisi."));
    assert_eq!(errors.get("price"), Some("Harga harus angka dan lebih dari 0."));
    assert_eq!(
        errors.get("releaseDate"),
        Some("Tanggal rilis tidak boleh di masa depan.")
    );
    assert_eq!(
        state.notifier().current(),
        Some((MSG_CHECK_INPUT, Severity::Danger))
    );
    drop(state);

    let reopened = product_state(&config, &clock);
    assert_eq!(reopened.records().len(), 2);
}

#[test]
fn test_edit_session_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), Schema::Product);
    let clock = clock();
    let mut state = product_state(&config, &clock);

    state.update(FormIntent::BeginEdit { id: 2 }, &mut decline);
    assert_eq!(state.form().draft().category, "Minuman");
    submit_product(&mut state, &[("price", "6500")]);

    assert_eq!(state.form().mode(), FormMode::Idle);
    assert_eq!(state.records()[1].price, Decimal::from(6500));
    assert_eq!(state.records()[1].name, "Minuman");
}

#[test]
fn test_item_schema_runs_in_memory() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), Schema::Item);
    assert!(!config.persists());

    let clock = clock();
    let store = open_store::<Item>(&config).unwrap();
    let mut state = DeskState::new(store, Notifier::default(), Box::new(clock.clone()));
    assert!(state.records().is_empty());

    state.update(FormIntent::edit("name", "Ab"), &mut decline);
    state.update(FormIntent::Submit, &mut decline);
    assert_eq!(
        state.form().errors().get("name"),
        Some("Nama minimal 3 karakter.")
    );

    state.update(FormIntent::edit("name", "Alat Tulis"), &mut decline);
    state.update(FormIntent::Submit, &mut decline);
    assert_eq!(state.records().len(), 1);

    let mut prompted = None;
    let id = state.records()[0].id;
    state.update(FormIntent::Delete { id }, &mut |prompt: &str| {
        prompted = Some(prompt.to_string());
        true
    });
    assert_eq!(prompted.as_deref(), Some("Hapus Item \"Alat Tulis\"?"));
    assert!(state.records().is_empty());
    assert!(!config.database_path().exists());
}

struct ReadOnly(RedbStorage);

impl RecordStorage<Product> for ReadOnly {
    fn load(&self) -> Result<Option<Vec<Product>>, StorageError> {
        self.0.load()
    }

    fn save(&self, _records: &[Product]) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        )))
    }
}

#[test]
fn test_save_failure_keeps_change_in_memory() {
    let storage = RedbStorage::open_in_memory("products").unwrap();
    storage.save(Product::seed().as_slice()).unwrap();

    let clock = clock();
    let store = RecordStore::<Product>::open(Box::new(ReadOnly(storage))).unwrap();
    let mut state = DeskState::new(store, Notifier::default(), Box::new(clock.clone()));

    state.update(FormIntent::Delete { id: 1 }, &mut accept);
    assert_eq!(state.records().len(), 1);
    assert_eq!(
        state.notifier().current(),
        Some((MSG_SAVE_FAILED, Severity::Danger))
    );
}
