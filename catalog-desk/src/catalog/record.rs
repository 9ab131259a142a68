//! Record schemas
//!
//! [`Record`] ties a persisted entity to its draft, its validated payload and
//! its validation rules, so the store, the form and the view stay generic.

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::MAX_STOCK;
use shared::{Draft, FieldErrors, Item, ItemData, ItemDraft, Product, ProductData, ProductDraft};
use std::fmt::Debug;

use crate::utils::validation::{validate_item, validate_product};

pub trait Record: Clone + Debug + Serialize + DeserializeOwned + 'static {
    type Draft: Draft;
    type Data: Clone + Debug;

    /// Entity name used in titles and notifications ("Produk")
    const ENTITY: &'static str;

    /// Editing a field drops that field's error right away instead of
    /// waiting for the next submit
    const CLEAR_ERROR_ON_EDIT: bool;

    fn id(&self) -> i64;

    /// Name shown in the delete confirmation
    fn name(&self) -> &str;

    /// Starting list when nothing has been persisted
    fn seed() -> Vec<Self>;

    fn to_draft(&self) -> Self::Draft;

    /// Validate a draft. `editing` is the record being edited, if any.
    fn validate(
        draft: &Self::Draft,
        existing: &[Self],
        editing: Option<i64>,
        today: NaiveDate,
    ) -> Result<Self::Data, FieldErrors>;

    fn create(id: i64, data: Self::Data) -> Self;

    /// Replace the mutable fields, keeping the id
    fn apply(&mut self, data: Self::Data);

    /// Pull a loaded record back inside the ranges the form enforces.
    /// Returns `true` when something was changed.
    fn clamp_ranges(&mut self) -> bool {
        false
    }
}

/// Field errors of a draft; empty when the draft is valid
pub fn field_errors<R: Record>(
    draft: &R::Draft,
    existing: &[R],
    editing: Option<i64>,
    today: NaiveDate,
) -> FieldErrors {
    R::validate(draft, existing, editing, today)
        .err()
        .unwrap_or_default()
}

impl Record for Product {
    type Draft = ProductDraft;
    type Data = ProductData;

    const ENTITY: &'static str = "Produk";
    const CLEAR_ERROR_ON_EDIT: bool = false;

    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn seed() -> Vec<Self> {
        Product::seed()
    }

    fn to_draft(&self) -> ProductDraft {
        ProductDraft::from(self)
    }

    fn validate(
        draft: &ProductDraft,
        _existing: &[Self],
        _editing: Option<i64>,
        today: NaiveDate,
    ) -> Result<ProductData, FieldErrors> {
        validate_product(draft, today)
    }

    fn create(id: i64, data: ProductData) -> Self {
        Product::new(id, data)
    }

    fn apply(&mut self, data: ProductData) {
        Product::apply(self, data);
    }

    fn clamp_ranges(&mut self) -> bool {
        if self.stock > MAX_STOCK {
            self.stock = MAX_STOCK;
            return true;
        }
        false
    }
}

impl Record for Item {
    type Draft = ItemDraft;
    type Data = ItemData;

    const ENTITY: &'static str = "Item";
    const CLEAR_ERROR_ON_EDIT: bool = true;

    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn seed() -> Vec<Self> {
        Vec::new()
    }

    fn to_draft(&self) -> ItemDraft {
        ItemDraft::from(self)
    }

    fn validate(
        draft: &ItemDraft,
        existing: &[Self],
        editing: Option<i64>,
        _today: NaiveDate,
    ) -> Result<ItemData, FieldErrors> {
        validate_item(draft, existing, editing)
    }

    fn create(id: i64, data: ItemData) -> Self {
        Item::new(id, data)
    }

    fn apply(&mut self, data: ItemData) {
        Item::apply(self, data);
    }
}
