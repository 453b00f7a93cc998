use pick_core::{BulkReport, Candidate, RemoteError};

use crate::dispatcher::Query;

/// Which of the two configured widgets an engine backs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMode {
    /// Multi-value tag selector.
    Tag,
    /// Single-value lookup selector.
    Lookup,
}

/// Why a suggestion list looks the way it does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionStatus {
    Ready,
    /// Input too short; `remaining` more chars are needed before searching.
    TooShort { remaining: usize },
    /// The remote call failed. The list is empty, but "try again" rather
    /// than "no such entry".
    RemoteFailure(RemoteError),
}

/// Candidate list to render for a term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestions {
    pub term: String,
    pub candidates: Vec<Candidate>,
    pub status: SuggestionStatus,
}

impl Suggestions {
    pub(crate) fn too_short(term: &str, remaining: usize) -> Self {
        Self {
            term: term.to_string(),
            candidates: Vec::new(),
            status: SuggestionStatus::TooShort { remaining },
        }
    }

    /// Whether at least one candidate is backed by a remote record.
    pub fn has_remote_matches(&self) -> bool {
        self.candidates.iter().any(|c| !c.is_synthesized)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.status, SuggestionStatus::RemoteFailure(_))
    }

    pub fn labels(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.label.as_str()).collect()
    }
}

/// What the suggestion list should do after an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionAction {
    /// Leave the list as-is while a query is in flight.
    Keep,
    Show(Suggestions),
}

/// Response from `on_input`, returned to the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputResponse {
    pub suggestions: SuggestionAction,
    /// Query the caller must run; its reply goes to `receive_suggestions`.
    pub request: Option<Query>,
    /// Set when completed tokens were moved into the selection.
    pub bulk: Option<BulkReport>,
    /// Text the input box should hold afterwards, set together with `bulk`.
    /// The committed tokens are gone from it; feeding the old box contents
    /// back in would commit them again.
    pub remainder: Option<String>,
}

impl InputResponse {
    pub(crate) fn show(suggestions: Suggestions) -> Self {
        Self {
            suggestions: SuggestionAction::Show(suggestions),
            request: None,
            bulk: None,
            remainder: None,
        }
    }

    pub(crate) fn pending(query: Query) -> Self {
        Self {
            suggestions: SuggestionAction::Keep,
            request: Some(query),
            bulk: None,
            remainder: None,
        }
    }

    /// The suggestions to render, if this response carries any.
    pub fn shown(&self) -> Option<&Suggestions> {
        match &self.suggestions {
            SuggestionAction::Show(s) => Some(s),
            SuggestionAction::Keep => None,
        }
    }
}
