// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },
    #[error("AnkiConnect error: {0}")]
    AnkiConnect(String),
    #[error("Note not found: {0}")]
    NoteNotFound(i64),
    #[error("Note {note_id} has no field named '{field}'")]
    FieldMissing { note_id: i64, field: String },
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for DomainError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => DomainError::HttpStatus {
                status: status.as_u16(),
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
            },
            None => DomainError::Transport(e.to_string()),
        }
    }
}
