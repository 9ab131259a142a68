//! Form field descriptors
//!
//! Every draft exposes its fields by key, so one form view and one intent
//! type drive all record schemas.

use std::fmt::Debug;

/// How a field is edited in the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text; `max_len` caps the input widget, not validation
    Text { max_len: Option<usize> },
    /// Multi-line text shown with a `n/max` counter
    TextArea { max_len: usize },
    /// Free text expected to hold a number
    Number,
    /// One of a fixed set of options; an empty value means nothing selected
    Select { options: &'static [&'static str] },
    /// Calendar date typed as `YYYY-MM-DD`
    Date,
    /// Integer slider
    Range { min: u16, max: u16, step: u16 },
    /// On/off toggle
    Switch,
}

/// A single form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Key used in intents and in [`crate::FieldErrors`]
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

/// In-progress, unsaved form values
pub trait Draft: Default + Clone + PartialEq + Debug {
    /// Fields in display order
    fn fields() -> &'static [FieldSpec];

    /// Current value of a field rendered as text, `None` for unknown keys
    fn value(&self, key: &str) -> Option<String>;

    /// Replace a field's value. Returns `false` for unknown keys or values
    /// the field cannot hold (the draft is left unchanged).
    fn set_value(&mut self, key: &str, value: &str) -> bool;

    /// No field differs from its default
    fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    fn field(key: &str) -> Option<&'static FieldSpec> {
        Self::fields().iter().find(|f| f.key == key)
    }
}

/// Parse a switch value
pub(crate) fn parse_switch(value: &str) -> Option<bool> {
    match value.trim() {
        "true" | "1" | "on" => Some(true),
        "false" | "0" | "off" => Some(false),
        _ => None,
    }
}
