mod proptest_fsm;

use std::sync::atomic::{AtomicUsize, Ordering};

use pick_core::remote::StaticSuggestionClient;
use pick_core::{Candidate, ModeConfig, RemoteError, SuggestionClient};

use super::{EngineMode, SelectionEngine};

pub(super) const LABELS: &[&str] = &[
    "Rust", "Rustacean", "Ruby", "Python", "Pytest", "Go", "Golang", "Widget", "Widget Pro",
];

/// Static client that counts how often it is called.
pub(super) struct CountingClient {
    inner: StaticSuggestionClient,
    pub calls: AtomicUsize,
}

impl CountingClient {
    pub fn new() -> Self {
        Self {
            inner: StaticSuggestionClient::from_labels(LABELS.iter().copied(), 30),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SuggestionClient for CountingClient {
    fn search(&self, term: &str, field_key: &str) -> Result<Vec<Candidate>, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.search(term, field_key)
    }
}

pub(super) struct FailingClient;

impl SuggestionClient for FailingClient {
    fn search(&self, _term: &str, _field_key: &str) -> Result<Vec<Candidate>, RemoteError> {
        Err(RemoteError::Http("connection refused".to_string()))
    }
}

pub(super) fn tag_engine() -> SelectionEngine {
    SelectionEngine::tag("id_skills-tags")
}

pub(super) fn lookup_engine() -> SelectionEngine {
    SelectionEngine::lookup("id_manager-position")
}

pub(super) fn engine_with(config: ModeConfig) -> SelectionEngine {
    SelectionEngine::with_config("field", EngineMode::Tag, config)
}
