// src/infrastructure/mod.rs
pub mod anki_connect;
pub mod config;
pub mod pushplus;

pub use anki_connect::AnkiConnectClient;
pub use config::Config;
pub use pushplus::{DryRunNotifier, PushPlusClient};
