//! Form Controller
//!
//! Holds the draft, the id of the record being edited and the current field
//! errors. The edit target is kept as an id only and re-resolved against the
//! store on submit.

use chrono::NaiveDate;
use shared::{Draft, FieldErrors};

use super::record::Record;

/// Where the form currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// Blank draft, nothing being edited
    Idle,
    /// Draft has input that would create a new record
    Creating,
    /// Editing the record with this id
    Editing(i64),
}

/// Outcome of preparing a submit
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<D> {
    Create(D),
    Update(i64, D),
    /// Errors were recorded on the form
    Invalid,
    /// The edit target no longer exists; the form has been reset
    TargetGone(i64),
}

#[derive(Debug, Clone)]
pub struct FormController<R: Record> {
    draft: R::Draft,
    editing: Option<i64>,
    errors: FieldErrors,
}

impl<R: Record> Default for FormController<R> {
    fn default() -> Self {
        Self {
            draft: R::Draft::default(),
            editing: None,
            errors: FieldErrors::new(),
        }
    }
}

impl<R: Record> FormController<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FormMode {
        match self.editing {
            Some(id) => FormMode::Editing(id),
            None if self.draft.is_blank() => FormMode::Idle,
            None => FormMode::Creating,
        }
    }

    pub fn draft(&self) -> &R::Draft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn editing_id(&self) -> Option<i64> {
        self.editing
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Load a record into the draft. Previous errors are dropped.
    pub fn begin_edit(&mut self, record: &R) {
        self.draft = record.to_draft();
        self.editing = Some(record.id());
        self.errors.clear();
    }

    /// Set one field. Returns `false` when the draft rejected the value.
    pub fn edit_field(&mut self, key: &str, value: &str) -> bool {
        if !self.draft.set_value(key, value) {
            return false;
        }
        if R::CLEAR_ERROR_ON_EDIT {
            self.errors.remove(key);
        }
        true
    }

    /// Blank draft, no edit target, no errors
    pub fn reset(&mut self) {
        self.draft = R::Draft::default();
        self.editing = None;
        self.errors.clear();
    }

    /// Validate the draft against `records` and decide what a submit does.
    ///
    /// On success the errors are cleared but the draft is kept; the caller
    /// resets the form after the store accepted the change.
    pub fn prepare(&mut self, records: &[R], today: NaiveDate) -> Submission<R::Data> {
        if let Some(id) = self.editing
            && !records.iter().any(|r| r.id() == id)
        {
            self.reset();
            return Submission::TargetGone(id);
        }

        match R::validate(&self.draft, records, self.editing, today) {
            Err(errors) => {
                self.errors = errors;
                Submission::Invalid
            }
            Ok(data) => {
                self.errors.clear();
                match self.editing {
                    Some(id) => Submission::Update(id, data),
                    None => Submission::Create(data),
                }
            }
        }
    }
}
