//! Intent 模块 - 用户意图
//!
//! Every user action on the form, the table or the notification is an
//! explicit [`FormIntent`], consumed by a single state-update function.
//! The tagged JSON shape matches the rest of the crate:
//!
//! ```json
//! { "type": "EditField", "data": { "field": "name", "value": "Teh" } }
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum FormIntent {
    /// Replace one draft field
    EditField { field: String, value: String },
    /// Validate the draft and create or update
    Submit,
    /// Load a record into the draft
    BeginEdit { id: i64 },
    /// Abandon the draft (and the edit session, if any)
    Cancel,
    /// Delete a record after confirmation
    Delete { id: i64 },
    /// Hide the notification now
    DismissNotification,
    /// Clock tick; expires the notification
    Tick,
}

impl FormIntent {
    pub fn edit(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::EditField {
            field: field.into(),
            value: value.into(),
        }
    }
}
