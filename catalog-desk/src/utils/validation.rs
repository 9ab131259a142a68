//! Input validation helpers
//!
//! Centralized text length constants and the per-schema validators.
//! Validators are pure: they read a draft and return either the parsed
//! payload or every field error at once. Lengths are counted in characters
//! after trimming.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::{Category, FieldErrors, Item, ItemData, ItemDraft, ProductData, ProductDraft};
use std::str::FromStr;

use super::time::{is_future, parse_date};

// ── Text length limits ──────────────────────────────────────────────

/// Product names
pub const MAX_PRODUCT_NAME_LEN: usize = 100;

/// A product description, when given, must be at least this long
pub const MIN_DESCRIPTION_LEN: usize = 20;

/// Descriptions are cut to this length for display
pub const DESCRIPTION_DISPLAY_LEN: usize = 200;

/// Item names
pub const MIN_ITEM_NAME_LEN: usize = 3;
pub const MAX_ITEM_NAME_LEN: usize = 50;

/// Item descriptions
pub const MAX_ITEM_DESCRIPTION_LEN: usize = 200;

// ── Messages ────────────────────────────────────────────────────────

pub const MSG_PRODUCT_NAME_REQUIRED: &str = "Nama Produk wajib diisi.";
pub const MSG_PRODUCT_NAME_TOO_LONG: &str = "Nama maksimal 100 karakter.";
pub const MSG_DESCRIPTION_TOO_SHORT: &str = "Deskripsi minimal 20 karakter.";
pub const MSG_PRICE_REQUIRED: &str = "Harga wajib diisi.";
pub const MSG_PRICE_INVALID: &str = "Harga harus angka dan lebih dari 0.";
pub const MSG_PRICE_TOO_LARGE: &str = "Harga terlalu besar.";
pub const MSG_CATEGORY_REQUIRED: &str = "Kategori wajib dipilih.";
pub const MSG_RELEASE_DATE_REQUIRED: &str = "Tanggal rilis wajib diisi.";
pub const MSG_RELEASE_DATE_FORMAT: &str = "Format tanggal harus YYYY-MM-DD.";
pub const MSG_RELEASE_DATE_FUTURE: &str = "Tanggal rilis tidak boleh di masa depan.";

pub const MSG_ITEM_NAME_REQUIRED: &str = "Nama wajib diisi.";
pub const MSG_ITEM_NAME_TOO_SHORT: &str = "Nama minimal 3 karakter.";
pub const MSG_ITEM_NAME_TOO_LONG: &str = "Nama maksimal 50 karakter.";
pub const MSG_ITEM_NAME_TAKEN: &str = "Nama sudah digunakan.";
pub const MSG_ITEM_DESCRIPTION_TOO_LONG: &str = "Deskripsi maksimal 200 karakter.";

/// Character count (not bytes)
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Parse a price as typed: plain or scientific notation
pub fn parse_price(value: &str) -> Option<Decimal> {
    let value = value.trim();
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}

/// A finite number too big for `Decimal` (about 7.9e28)
fn exceeds_decimal(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .is_ok_and(|v| v.is_finite() && v >= 1.0)
}

// ── Product ─────────────────────────────────────────────────────────

/// Validate a product draft against the calendar date `today`.
pub fn validate_product(draft: &ProductDraft, today: NaiveDate) -> Result<ProductData, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = draft.name.trim();
    if name.is_empty() {
        errors.insert("name", MSG_PRODUCT_NAME_REQUIRED);
    } else if char_len(name) > MAX_PRODUCT_NAME_LEN {
        errors.insert("name", MSG_PRODUCT_NAME_TOO_LONG);
    }

    let description = draft.description.trim();
    if !description.is_empty() && char_len(description) < MIN_DESCRIPTION_LEN {
        errors.insert("description", MSG_DESCRIPTION_TOO_SHORT);
    }

    let price = if draft.price.trim().is_empty() {
        errors.insert("price", MSG_PRICE_REQUIRED);
        None
    } else {
        match parse_price(&draft.price) {
            Some(p) if p > Decimal::ZERO => Some(p),
            Some(_) => {
                errors.insert("price", MSG_PRICE_INVALID);
                None
            }
            None if exceeds_decimal(&draft.price) => {
                errors.insert("price", MSG_PRICE_TOO_LARGE);
                None
            }
            None => {
                errors.insert("price", MSG_PRICE_INVALID);
                None
            }
        }
    };

    let category = match draft.category.parse::<Category>() {
        Ok(c) => Some(c),
        Err(_) => {
            errors.insert("category", MSG_CATEGORY_REQUIRED);
            None
        }
    };

    let release_date = if draft.release_date.trim().is_empty() {
        errors.insert("releaseDate", MSG_RELEASE_DATE_REQUIRED);
        None
    } else {
        match parse_date(&draft.release_date) {
            None => {
                errors.insert("releaseDate", MSG_RELEASE_DATE_FORMAT);
                None
            }
            Some(d) if is_future(d, today) => {
                errors.insert("releaseDate", MSG_RELEASE_DATE_FUTURE);
                None
            }
            Some(d) => Some(d),
        }
    };

    match (price, category, release_date) {
        (Some(price), Some(category), Some(release_date)) if errors.is_empty() => Ok(ProductData {
            name: name.to_string(),
            description: description.to_string(),
            price,
            category,
            release_date,
            stock: draft.stock.min(shared::models::MAX_STOCK),
            is_active: draft.is_active,
        }),
        _ => Err(errors),
    }
}

// ── Item ────────────────────────────────────────────────────────────

/// Validate an item draft. Names are unique case-insensitively among
/// `existing`, ignoring the record being edited.
pub fn validate_item(
    draft: &ItemDraft,
    existing: &[Item],
    editing: Option<i64>,
) -> Result<ItemData, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = draft.name.trim();
    let len = char_len(name);
    if name.is_empty() {
        errors.insert("name", MSG_ITEM_NAME_REQUIRED);
    } else if len < MIN_ITEM_NAME_LEN {
        errors.insert("name", MSG_ITEM_NAME_TOO_SHORT);
    } else if len > MAX_ITEM_NAME_LEN {
        errors.insert("name", MSG_ITEM_NAME_TOO_LONG);
    } else if is_name_taken(name, existing, editing) {
        errors.insert("name", MSG_ITEM_NAME_TAKEN);
    }

    let description = draft.description.trim();
    if char_len(description) > MAX_ITEM_DESCRIPTION_LEN {
        errors.insert("description", MSG_ITEM_DESCRIPTION_TOO_LONG);
    }

    errors.into_result(|| ItemData {
        name: name.to_string(),
        description: description.to_string(),
    })
}

fn is_name_taken(name: &str, existing: &[Item], editing: Option<i64>) -> bool {
    let wanted = name.to_lowercase();
    existing
        .iter()
        .filter(|item| Some(item.id) != editing)
        .any(|item| item.name.trim().to_lowercase() == wanted)
}
