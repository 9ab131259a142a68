//! Item Model
//!
//! The simpler record schema: a unique name and an optional description.

use super::form::{Draft, FieldKind, FieldSpec};
use serde::{Deserialize, Serialize};

/// Item entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Item {
    pub fn new(id: i64, data: ItemData) -> Self {
        Self {
            id,
            name: data.name,
            description: data.description,
        }
    }

    pub fn apply(&mut self, data: ItemData) {
        self.name = data.name;
        self.description = data.description;
    }
}

/// Validated item payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemData {
    pub name: String,
    pub description: String,
}

/// Item form draft
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub description: String,
}

impl From<&Item> for ItemDraft {
    fn from(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
        }
    }
}

const ITEM_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "name",
        label: "Nama",
        kind: FieldKind::Text { max_len: None },
    },
    FieldSpec {
        key: "description",
        label: "Deskripsi",
        kind: FieldKind::TextArea { max_len: 200 },
    },
];

impl Draft for ItemDraft {
    fn fields() -> &'static [FieldSpec] {
        ITEM_FIELDS
    }

    fn value(&self, key: &str) -> Option<String> {
        match key {
            "name" => Some(self.name.clone()),
            "description" => Some(self.description.clone()),
            _ => None,
        }
    }

    fn set_value(&mut self, key: &str, value: &str) -> bool {
        match key {
            "name" => self.name = value.to_string(),
            "description" => self.description = value.to_string(),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_draft_fields() {
        let mut draft = ItemDraft::default();
        assert!(draft.set_value("name", "Sembako"));
        assert!(!draft.set_value("price", "10"));
        assert_eq!(draft.value("name").as_deref(), Some("Sembako"));
        assert_eq!(ItemDraft::field("description").map(|f| f.label), Some("Deskripsi"));
    }

    #[test]
    fn test_item_apply_keeps_id() {
        let mut item = Item::new(
            9,
            ItemData {
                name: "Sembako".into(),
                description: String::new(),
            },
        );
        item.apply(ItemData {
            name: "Beras".into(),
            description: "Beras pulen".into(),
        });
        assert_eq!(item.id, 9);
        assert_eq!(ItemDraft::from(&item).name, "Beras");
    }
}
