//! Product Model

use super::form::{Draft, FieldKind, FieldSpec, parse_switch};
use crate::error::ParseCategoryError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest stock value the slider allows
pub const MAX_STOCK: u16 = 1000;

/// Stock preset for a fresh draft
pub const DEFAULT_STOCK: u16 = 50;

/// Product category (fixed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Makanan,
    Minuman,
    Elektronik,
    Pakaian,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Makanan,
        Category::Minuman,
        Category::Elektronik,
        Category::Pakaian,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Makanan => "Makanan",
            Self::Minuman => "Minuman",
            Self::Elektronik => "Elektronik",
            Self::Pakaian => "Pakaian",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

const CATEGORY_OPTIONS: &[&str] = &["Makanan", "Minuman", "Elektronik", "Pakaian"];

/// Product entity
///
/// Serialized with camelCase keys; this is also the persisted blob layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: Category,
    pub release_date: NaiveDate,
    pub stock: u16,
    pub is_active: bool,
}

impl Product {
    pub fn new(id: i64, data: ProductData) -> Self {
        Self {
            id,
            name: data.name,
            description: data.description,
            price: data.price,
            category: data.category,
            release_date: data.release_date,
            stock: data.stock,
            is_active: data.is_active,
        }
    }

    /// Replace every mutable field, keeping the id
    pub fn apply(&mut self, data: ProductData) {
        let id = self.id;
        *self = Self::new(id, data);
    }

    /// Starting list when nothing has been persisted yet
    pub fn seed() -> Vec<Product> {
        vec![
            Product {
                id: 1,
                name: "Makanan".to_string(),
                description: "Produk makanan siap saji".to_string(),
                price: Decimal::from(15000),
                category: Category::Makanan,
                release_date: ymd(2024, 1, 1),
                stock: 100,
                is_active: true,
            },
            Product {
                id: 2,
                name: "Minuman".to_string(),
                description: "Aneka minuman dingin & hangat".to_string(),
                price: Decimal::from(5000),
                category: Category::Minuman,
                release_date: ymd(2024, 1, 2),
                stock: 150,
                is_active: true,
            },
        ]
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Validated product payload (trimmed and parsed)
#[derive(Debug, Clone, PartialEq)]
pub struct ProductData {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: Category,
    pub release_date: NaiveDate,
    pub stock: u16,
    pub is_active: bool,
}

/// Product form draft, text exactly as typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    /// Empty until a category is chosen
    pub category: String,
    /// `YYYY-MM-DD`
    pub release_date: String,
    pub stock: u16,
    pub is_active: bool,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            category: String::new(),
            release_date: String::new(),
            stock: DEFAULT_STOCK,
            is_active: true,
        }
    }
}

impl From<&Product> for ProductDraft {
    fn from(p: &Product) -> Self {
        Self {
            name: p.name.clone(),
            description: p.description.clone(),
            price: p.price.normalize().to_string(),
            category: p.category.as_str().to_string(),
            release_date: p.release_date.format("%Y-%m-%d").to_string(),
            stock: p.stock,
            is_active: p.is_active,
        }
    }
}

const PRODUCT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "name",
        label: "Nama Produk",
        kind: FieldKind::Text { max_len: Some(100) },
    },
    FieldSpec {
        key: "description",
        label: "Deskripsi",
        kind: FieldKind::TextArea { max_len: 200 },
    },
    FieldSpec {
        key: "price",
        label: "Harga",
        kind: FieldKind::Number,
    },
    FieldSpec {
        key: "category",
        label: "Kategori",
        kind: FieldKind::Select {
            options: CATEGORY_OPTIONS,
        },
    },
    FieldSpec {
        key: "releaseDate",
        label: "Tanggal Rilis",
        kind: FieldKind::Date,
    },
    FieldSpec {
        key: "stock",
        label: "Stok Tersedia",
        kind: FieldKind::Range {
            min: 0,
            max: MAX_STOCK,
            step: 1,
        },
    },
    FieldSpec {
        key: "isActive",
        label: "Produk Aktif",
        kind: FieldKind::Switch,
    },
];

impl Draft for ProductDraft {
    fn fields() -> &'static [FieldSpec] {
        PRODUCT_FIELDS
    }

    fn value(&self, key: &str) -> Option<String> {
        let v = match key {
            "name" => self.name.clone(),
            "description" => self.description.clone(),
            "price" => self.price.clone(),
            "category" => self.category.clone(),
            "releaseDate" => self.release_date.clone(),
            "stock" => self.stock.to_string(),
            "isActive" => self.is_active.to_string(),
            _ => return None,
        };
        Some(v)
    }

    fn set_value(&mut self, key: &str, value: &str) -> bool {
        match key {
            "name" => self.name = value.to_string(),
            "description" => self.description = value.to_string(),
            "price" => self.price = value.to_string(),
            "category" => self.category = value.to_string(),
            "releaseDate" => self.release_date = value.to_string(),
            "stock" => match value.trim().parse::<u16>() {
                Ok(n) => self.stock = n.min(MAX_STOCK),
                Err(_) => return false,
            },
            "isActive" => match parse_switch(value) {
                Some(b) => self.is_active = b,
                None => return false,
            },
            _ => return false,
        }
        true
    }
}
