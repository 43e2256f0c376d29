// src/domain/note.rs
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::DomainError;

pub type NoteId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteField {
    pub value: String,
    #[serde(default)]
    pub order: u32,
}

/// A note as returned by AnkiConnect's `notesInfo` action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(rename = "noteId")]
    pub id: NoteId,
    #[serde(default)]
    pub model_name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub fields: HashMap<String, NoteField>,
}

impl Note {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn field(&self, name: &str) -> Result<&str, DomainError> {
        self.fields
            .get(name)
            .map(|f| f.value.as_str())
            .ok_or_else(|| DomainError::FieldMissing {
                note_id: self.id,
                field: name.to_string(),
            })
    }
}
