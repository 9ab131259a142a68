//! Catalog domain: records, their store, the form and the notifier

pub mod form;
pub mod notifier;
pub mod record;
pub mod store;

pub use form::{FormController, FormMode, Submission};
pub use notifier::{Notifier, Severity};
pub use record::{Record, field_errors};
pub use store::RecordStore;
