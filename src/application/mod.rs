// src/application/mod.rs
pub mod card_notifier;

pub use card_notifier::{
    select_note, CardNotifier, Delivery, NoteSource, Notifier, RunOptions, RunOutcome,
};
