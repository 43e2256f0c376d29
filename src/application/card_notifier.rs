// src/application/card_notifier.rs
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::{DomainError, Note, NoteId, Notification};
use crate::util::text::strip_html_tags;

/// Read side of the flashcard application
pub trait NoteSource {
    /// Ids of all notes matching an Anki search query
    fn find_notes(&mut self, query: &str) -> Result<Vec<NoteId>, DomainError>;

    fn note_info(&mut self, id: NoteId) -> Result<Note, DomainError>;
}

/// What the webhook answered
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub status: u16,
    /// Service-level result code from the response body, if it had one
    pub code: Option<i64>,
    pub message: Option<String>,
}

impl Delivery {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

pub trait Notifier {
    fn send(&mut self, notification: &Notification) -> Result<Delivery, DomainError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub deck: String,
    pub front_field: String,
    pub buried_tag: String,
    pub token: String,
    pub template: String,
    pub topic: String,
    pub channel: String,
}

impl RunOptions {
    pub fn deck_query(&self) -> String {
        if self.deck.chars().any(char::is_whitespace) {
            format!("deck:\"{}\"", self.deck)
        } else {
            format!("deck:{}", self.deck)
        }
    }

    pub fn notification(&self, content: String) -> Notification {
        Notification {
            token: self.token.clone(),
            content,
            template: self.template.clone(),
            topic: self.topic.clone(),
            version: self.channel.clone(),
        }
    }
}

#[derive(Debug)]
pub enum RunOutcome {
    Sent { note_id: NoteId },
    /// The webhook answered with something other than 200
    Rejected { note_id: NoteId, status: u16 },
    NoCard,
    NoCardAfterRetry,
    Failed(DomainError),
}

impl RunOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, RunOutcome::Sent { .. })
    }
}

/// Uniform choice over the candidates, `None` when there are none
pub fn select_note<R: Rng + ?Sized>(candidates: &[NoteId], rng: &mut R) -> Option<NoteId> {
    candidates.choose(rng).copied()
}

pub struct CardNotifier<S: NoteSource, N: Notifier, R: Rng> {
    source: S,
    notifier: N,
    rng: R,
    options: RunOptions,
}

impl<S: NoteSource, N: Notifier, R: Rng> CardNotifier<S, N, R> {
    pub fn new(source: S, notifier: N, rng: R, options: RunOptions) -> Self {
        Self {
            source,
            notifier,
            rng,
            options,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Push one random card. Never fails: every problem ends up in the outcome
    /// and in the log.
    pub fn run(&mut self) -> RunOutcome {
        match self.try_run() {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "Error fetching and sending card");
                RunOutcome::Failed(e)
            }
        }
    }

    fn try_run(&mut self) -> Result<RunOutcome, DomainError> {
        let candidates = self.list_notes();

        let Some(mut note) = self.fetch_random(&candidates) else {
            warn!("No card data found");
            return Ok(RunOutcome::NoCard);
        };

        // Single retry, drawn from the same candidate list
        if note.has_tag(&self.options.buried_tag) {
            info!(note_id = note.id, tag = %self.options.buried_tag, "Note is buried, picking another");
            match self.fetch_random(&candidates) {
                Some(retry) => note = retry,
                None => {
                    warn!("No card data found after retrying");
                    return Ok(RunOutcome::NoCardAfterRetry);
                }
            }
        }

        let content = strip_html_tags(note.field(&self.options.front_field)?);
        debug!(note_id = note.id, %content, "Prepared card content");

        let delivery = self.notifier.send(&self.options.notification(content))?;
        if delivery.is_success() {
            info!(note_id = note.id, code = ?delivery.code, "Notification sent successfully");
            Ok(RunOutcome::Sent { note_id: note.id })
        } else {
            warn!(
                note_id = note.id,
                status = delivery.status,
                "Failed to send notification. Status code: {}",
                delivery.status
            );
            Ok(RunOutcome::Rejected {
                note_id: note.id,
                status: delivery.status,
            })
        }
    }

    /// Listing failures count as an empty deck
    fn list_notes(&mut self) -> Vec<NoteId> {
        let query = self.options.deck_query();
        match self.source.find_notes(&query) {
            Ok(ids) => {
                debug!(%query, count = ids.len(), "Found notes");
                ids
            }
            Err(e) => {
                error!(%query, error = %e, "Error listing notes");
                Vec::new()
            }
        }
    }

    #[instrument(level = "debug", skip(self, candidates), fields(count = candidates.len()))]
    fn fetch_random(&mut self, candidates: &[NoteId]) -> Option<Note> {
        let id = select_note(candidates, &mut self.rng)?;
        match self.source.note_info(id) {
            Ok(note) => Some(note),
            Err(e) => {
                error!(note_id = id, error = %e, "Error fetching note");
                None
            }
        }
    }
}
