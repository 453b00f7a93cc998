//! Several independent selection fields sharing one suggestion worker.

use std::sync::Arc;
use std::time::{Duration, Instant};

use pick_core::{Candidate, SelectionError, SuggestionClient};
use pick_session::{InputResponse, SelectionEngine, Suggestions};
use tracing::debug;

use crate::async_worker::{QueryResult, SuggestionWorker};

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("unknown field {0:?}")]
    UnknownField(String),
    #[error("field {0:?} is already registered")]
    DuplicateField(String),
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Suggestions surfaced for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSuggestions {
    pub field_key: String,
    pub suggestions: Suggestions,
}

pub struct Form {
    fields: Vec<SelectionEngine>,
    worker: SuggestionWorker,
}

impl Form {
    pub fn new(client: Arc<dyn SuggestionClient>) -> Self {
        Self {
            fields: Vec::new(),
            worker: SuggestionWorker::new(client),
        }
    }

    pub fn add_field(&mut self, engine: SelectionEngine) -> Result<(), FormError> {
        if self.field(engine.field_key()).is_some() {
            return Err(FormError::DuplicateField(engine.field_key().to_string()));
        }
        self.fields.push(engine);
        Ok(())
    }

    pub fn field(&self, field_key: &str) -> Option<&SelectionEngine> {
        self.fields.iter().find(|e| e.field_key() == field_key)
    }

    fn field_mut(&mut self, field_key: &str) -> Result<&mut SelectionEngine, FormError> {
        self.fields
            .iter_mut()
            .find(|e| e.field_key() == field_key)
            .ok_or_else(|| FormError::UnknownField(field_key.to_string()))
    }

    /// Feed input to a field. Any query it issues is started on the worker;
    /// its reply arrives later through `poll` or `wait`.
    pub fn input(&mut self, field_key: &str, term: &str) -> Result<InputResponse, FormError> {
        let resp = self.field_mut(field_key)?.on_input(term);
        match &resp.request {
            Some(query) => self.worker.submit(query.clone()),
            None => self.worker.invalidate(field_key),
        }
        Ok(resp)
    }

    pub fn select(&mut self, field_key: &str, candidate: Candidate) -> Result<(), FormError> {
        self.field_mut(field_key)?.on_select(candidate)?;
        self.worker.invalidate(field_key);
        Ok(())
    }

    pub fn deselect(&mut self, field_key: &str, id: &str) -> Result<bool, FormError> {
        Ok(self.field_mut(field_key)?.on_deselect(id))
    }

    fn route(&mut self, result: QueryResult) -> Option<FieldSuggestions> {
        let QueryResult { query, outcome } = result;
        let engine = self
            .fields
            .iter_mut()
            .find(|e| e.field_key() == query.field_key)?;
        let suggestions = engine.receive_suggestions(&query, outcome)?;
        Some(FieldSuggestions {
            field_key: query.field_key,
            suggestions,
        })
    }

    /// Drain every reply received so far, keeping only fresh ones.
    pub fn poll(&mut self) -> Vec<FieldSuggestions> {
        let mut out = Vec::new();
        while let Some(result) = self.worker.try_recv() {
            if let Some(fresh) = self.route(result) {
                out.push(fresh);
            }
        }
        out
    }

    /// Block until a fresh reply arrives or `timeout` elapses.
    pub fn wait(&mut self, timeout: Duration) -> Option<FieldSuggestions> {
        let deadline = Instant::now() + timeout;
        loop {
            let left = deadline.checked_duration_since(Instant::now())?;
            let result = self.worker.recv_timeout(left)?;
            match self.route(result) {
                Some(fresh) => return Some(fresh),
                None => debug!("stale reply dropped while waiting"),
            }
        }
    }
}
