// src/infrastructure/anki_connect.rs
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::application::NoteSource;
use crate::constants::ANKI_CONNECT_VERSION;
use crate::domain::{DomainError, Note, NoteId};

/// Blocking client for the AnkiConnect add-on
pub struct AnkiConnectClient {
    url: String,
    client: reqwest::blocking::Client,
}

#[derive(Debug, Serialize)]
struct Request<'a> {
    action: &'a str,
    version: u8,
    params: Value,
}

/// Every AnkiConnect answer is `{result, error}` with exactly one of them set
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    result: Option<T>,
    #[serde(default)]
    error: Option<String>,
}

impl AnkiConnectClient {
    pub fn new(url: &str, timeout: Option<Duration>) -> Result<Self, DomainError> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self {
            url: url.to_string(),
            client,
        })
    }

    fn invoke<T: DeserializeOwned>(&self, action: &str, params: Value) -> Result<T, DomainError> {
        let request = Request {
            action,
            version: ANKI_CONNECT_VERSION,
            params,
        };
        let envelope: Envelope<T> = self
            .client
            .post(&self.url)
            .json(&request)
            .send()?
            .error_for_status()?
            .json()?;

        if let Some(error) = envelope.error {
            return Err(DomainError::AnkiConnect(error));
        }
        envelope
            .result
            .ok_or_else(|| DomainError::AnkiConnect(format!("{} returned no result", action)))
    }
}

impl NoteSource for AnkiConnectClient {
    #[instrument(level = "debug", skip(self))]
    fn find_notes(&mut self, query: &str) -> Result<Vec<NoteId>, DomainError> {
        let ids: Vec<NoteId> = self.invoke("findNotes", json!({ "query": query }))?;
        debug!(count = ids.len(), "findNotes returned");
        Ok(ids)
    }

    #[instrument(level = "debug", skip(self))]
    fn note_info(&mut self, id: NoteId) -> Result<Note, DomainError> {
        let mut infos: Vec<Value> = self.invoke("notesInfo", json!({ "notes": [id] }))?;

        // Unknown ids come back as `{}`
        let info = match infos.pop() {
            Some(Value::Object(map)) if !map.is_empty() => Value::Object(map),
            _ => return Err(DomainError::NoteNotFound(id)),
        };
        serde_json::from_value(info)
            .map_err(|e| DomainError::AnkiConnect(format!("Malformed notesInfo entry: {}", e)))
    }
}
