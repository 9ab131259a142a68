//! Shared types for the catalog desk
//!
//! Pure domain types used by the application crate and its front end:
//! records, form drafts, field-level validation errors and user intents.
//! Nothing in here performs I/O.

pub mod error;
pub mod intent;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{FieldErrors, ParseCategoryError};
pub use intent::FormIntent;
pub use models::{Category, Draft, FieldKind, FieldSpec, Item, ItemData, ItemDraft, Product, ProductData, ProductDraft};
