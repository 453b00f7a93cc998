//! Remote-backed selection engine.
//!
//! As the user types, each field queries a suggestion source, drops replies
//! superseded by newer input, offers a "create new" entry when nothing
//! matches exactly, and keeps a bounded, duplicate-free selection.
//!
//! - [`pick_core`]: candidates, matcher, selection set, remote client, settings
//! - [`pick_session`]: per-field `SelectionEngine` and its `QueryDispatcher`
//! - this crate: threaded [`SuggestionWorker`] and the multi-field [`Form`]

mod async_worker;
mod form;
mod trace_init;

pub use pick_core;
pub use pick_session;

pub use async_worker::{QueryResult, SuggestionWorker};
pub use form::{FieldSuggestions, Form, FormError};
pub use trace_init::init_tracing;

pub use pick_core::remote::{HttpSuggestionClient, StaticSuggestionClient};
pub use pick_core::{
    BulkReport, Candidate, ModeConfig, RemoteError, SelectionError, SelectionSet,
    SuggestionClient,
};
pub use pick_session::{
    EngineMode, InputResponse, Query, SelectionEngine, SuggestionAction, SuggestionStatus,
    Suggestions,
};
