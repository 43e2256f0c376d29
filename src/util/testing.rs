// src/util/testing.rs

use anyhow::Result;
use std::collections::HashMap;
use std::env;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{Delivery, NoteSource, Notifier, RunOptions};
use crate::domain::{DomainError, Note, NoteField, NoteId, Notification};

/// Build a note with a single "Front" field
pub fn note(id: NoteId, front: &str, tags: &[&str]) -> Note {
    Note {
        id,
        model_name: "Basic".to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        fields: HashMap::from([(
            "Front".to_string(),
            NoteField {
                value: front.to_string(),
                order: 0,
            },
        )]),
    }
}

/// Options matching the built-in defaults, with a fixed token
pub fn options() -> RunOptions {
    RunOptions {
        deck: "0_JLPT".to_string(),
        front_field: "Front".to_string(),
        buried_tag: "1".to_string(),
        token: "test-token".to_string(),
        template: "txt".to_string(),
        topic: String::new(),
        channel: "personal".to_string(),
    }
}

/// Shared mock for use cases that depend on NoteSource
///
/// Every configured note is listed by `find_notes` (whatever the query) in
/// insertion order, and every call is recorded.
///
/// # Examples
///
/// ```
/// use ankinotify::application::NoteSource;
/// use ankinotify::util::testing::{note, MockNoteSource};
///
/// let mut mock = MockNoteSource::builder()
///     .with_note(note(123, "<b>猫</b>", &[]))
///     .build();
///
/// assert_eq!(mock.find_notes("deck:Default").unwrap(), vec![123]);
/// ```
pub struct MockNoteSource {
    order: Vec<NoteId>,
    notes: HashMap<NoteId, Note>,
    find_failure: Option<String>,
    info_failures_after: Option<usize>,
    queries: Vec<String>,
    info_requests: Vec<NoteId>,
}

impl MockNoteSource {
    pub fn builder() -> MockNoteSourceBuilder {
        MockNoteSourceBuilder::new()
    }

    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    pub fn info_requests(&self) -> &[NoteId] {
        &self.info_requests
    }
}

impl NoteSource for MockNoteSource {
    fn find_notes(&mut self, query: &str) -> Result<Vec<NoteId>, DomainError> {
        self.queries.push(query.to_string());
        match &self.find_failure {
            Some(reason) => Err(DomainError::Transport(reason.clone())),
            None => Ok(self.order.clone()),
        }
    }

    fn note_info(&mut self, id: NoteId) -> Result<Note, DomainError> {
        let served = self.info_requests.len();
        self.info_requests.push(id);
        if self.info_failures_after.is_some_and(|n| served >= n) {
            return Err(DomainError::Transport("connection reset".to_string()));
        }
        self.notes
            .get(&id)
            .cloned()
            .ok_or(DomainError::NoteNotFound(id))
    }
}

/// Builder for MockNoteSource
pub struct MockNoteSourceBuilder {
    order: Vec<NoteId>,
    notes: HashMap<NoteId, Note>,
    find_failure: Option<String>,
    info_failures_after: Option<usize>,
}

impl MockNoteSourceBuilder {
    pub fn new() -> Self {
        Self {
            order: vec![],
            notes: HashMap::new(),
            find_failure: None,
            info_failures_after: None,
        }
    }

    /// Add a note that is listed by find_notes and returned by note_info
    pub fn with_note(mut self, note: Note) -> Self {
        self.order.push(note.id);
        self.notes.insert(note.id, note);
        self
    }

    /// Make find_notes fail with a transport error
    pub fn with_find_failure(mut self, reason: &str) -> Self {
        self.find_failure = Some(reason.to_string());
        self
    }

    /// Serve `n` note_info calls, then fail every following one
    pub fn with_info_failures_after(mut self, n: usize) -> Self {
        self.info_failures_after = Some(n);
        self
    }

    pub fn build(self) -> MockNoteSource {
        MockNoteSource {
            order: self.order,
            notes: self.notes,
            find_failure: self.find_failure,
            info_failures_after: self.info_failures_after,
            queries: vec![],
            info_requests: vec![],
        }
    }
}

impl Default for MockNoteSourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Notifier that keeps every notification and answers with a fixed status
pub struct RecordingNotifier {
    status: u16,
    unreachable: Option<String>,
    sent: Vec<Notification>,
}

impl RecordingNotifier {
    pub fn ok() -> Self {
        Self::with_status(200)
    }

    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            unreachable: None,
            sent: vec![],
        }
    }

    /// Every send fails before reaching the webhook
    pub fn unreachable(reason: &str) -> Self {
        Self {
            status: 0,
            unreachable: Some(reason.to_string()),
            sent: vec![],
        }
    }

    pub fn sent(&self) -> &[Notification] {
        &self.sent
    }
}

impl Notifier for RecordingNotifier {
    fn send(&mut self, notification: &Notification) -> Result<Delivery, DomainError> {
        if let Some(reason) = &self.unreachable {
            return Err(DomainError::Transport(reason.clone()));
        }
        self.sent.push(notification.clone());
        Ok(Delivery {
            status: self.status,
            code: Some(i64::from(self.status)),
            message: None,
        })
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["reqwest", "hyper", "hyper_util", "mio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
