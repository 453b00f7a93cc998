use pick_core::{BulkReport, Candidate, SelectionError};
use tracing::debug;

use super::SelectionEngine;

impl SelectionEngine {
    /// Add a picked candidate. Closing the dropdown on success also
    /// supersedes any query still in flight.
    pub fn on_select(&mut self, candidate: Candidate) -> Result<(), SelectionError> {
        let id = candidate.id.clone();
        match self.selection.add(candidate) {
            Ok(()) => {
                debug!(field_key = %self.field_key, id, "selected");
                self.dispatcher.invalidate(&self.field_key);
                Ok(())
            }
            Err(e) => {
                debug!(field_key = %self.field_key, "select rejected: {e}");
                Err(e)
            }
        }
    }

    pub fn on_deselect(&mut self, id: &str) -> bool {
        let removed = self.selection.remove(id);
        debug!(field_key = %self.field_key, id, removed, "deselect");
        removed
    }

    /// Add every separator-delimited token of `raw`. Returns `None` when this
    /// mode does not tokenize.
    pub fn on_bulk_input(&mut self, raw: &str) -> Option<BulkReport> {
        if !self.config.allow_bulk_tokenization {
            return None;
        }
        Some(self.selection.add_bulk(raw, &self.config.token_separators))
    }
}
