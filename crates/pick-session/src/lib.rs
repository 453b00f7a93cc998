//! Per-field selection engine.
//!
//! `SelectionEngine` owns one input field's state: its query sequence and its
//! selection set. The UI layer feeds it input and selection events and runs
//! the queries it hands back, returning the replies through
//! `receive_suggestions`.

pub mod dispatcher;
pub(crate) mod types;

mod input;
mod select;

#[cfg(test)]
mod tests;

use pick_core::{ModeConfig, SelectionSet};

pub use dispatcher::{Query, QueryDispatcher, Resolution, Submission};
pub use types::{EngineMode, InputResponse, SuggestionAction, SuggestionStatus, Suggestions};

pub struct SelectionEngine {
    field_key: String,
    mode: EngineMode,
    config: ModeConfig,
    dispatcher: QueryDispatcher,
    selection: SelectionSet,
}

impl SelectionEngine {
    /// Engine configured from the global settings for `mode`.
    pub fn new(field_key: impl Into<String>, mode: EngineMode) -> Self {
        let config = match mode {
            EngineMode::Tag => ModeConfig::tag(),
            EngineMode::Lookup => ModeConfig::lookup(),
        };
        Self::with_config(field_key, mode, config)
    }

    pub fn tag(field_key: impl Into<String>) -> Self {
        Self::new(field_key, EngineMode::Tag)
    }

    pub fn lookup(field_key: impl Into<String>) -> Self {
        Self::new(field_key, EngineMode::Lookup)
    }

    pub fn with_config(field_key: impl Into<String>, mode: EngineMode, config: ModeConfig) -> Self {
        Self {
            field_key: field_key.into(),
            mode,
            dispatcher: QueryDispatcher::new(config.min_query_length),
            selection: SelectionSet::new(config.selection_bound()),
            config,
        }
    }

    pub fn field_key(&self) -> &str {
        &self.field_key
    }

    pub fn mode(&self) -> EngineMode {
        self.mode
    }

    pub fn config(&self) -> &ModeConfig {
        &self.config
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Whether `query` would still be surfaced if its reply arrived now.
    pub fn is_current(&self, query: &Query) -> bool {
        query.field_key == self.field_key && self.dispatcher.is_current(query)
    }
}
