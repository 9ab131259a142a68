//! Data models
//!
//! Records, their validated payloads and their form drafts.

pub mod form;
pub mod item;
pub mod product;

// Re-exports
pub use form::{Draft, FieldKind, FieldSpec};
pub use item::*;
pub use product::*;
