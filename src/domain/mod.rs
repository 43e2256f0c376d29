// src/domain/mod.rs
pub mod error;
pub mod note;
pub mod notification;

pub use error::DomainError;
pub use note::{Note, NoteField, NoteId};
pub use notification::Notification;
