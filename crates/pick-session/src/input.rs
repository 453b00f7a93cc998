use pick_core::matcher::match_term;
use pick_core::{Candidate, RemoteError, SuggestionClient};
use tracing::{debug, debug_span};

use super::dispatcher::{Query, Resolution, Submission};
use super::types::{InputResponse, SuggestionAction, SuggestionStatus, Suggestions};
use super::SelectionEngine;

impl SelectionEngine {
    /// Handle the current contents of the input box.
    ///
    /// With bulk tokenization, text up to the last separator is committed to
    /// the selection first and only the remainder is searched. The caller
    /// must then replace the box contents with `InputResponse::remainder`.
    pub fn on_input(&mut self, term: &str) -> InputResponse {
        let _span = debug_span!("on_input", field_key = %self.field_key).entered();

        let mut bulk = None;
        let mut term = term;
        if self.config.allow_bulk_tokenization {
            let separators = &self.config.token_separators;
            if let Some(pos) = term.rfind(|c: char| separators.contains(&c)) {
                let (done, rest) = term.split_at(pos);
                let sep_len = rest.chars().next().map_or(0, char::len_utf8);
                bulk = Some(self.selection.add_bulk(done, separators));
                term = rest[sep_len..].trim_start();
            }
        }

        let mut resp = match self.dispatcher.submit(&self.field_key, term) {
            Submission::BelowMinimum { remaining } => {
                InputResponse::show(Suggestions::too_short(term, remaining))
            }
            Submission::Issued(query) => InputResponse::pending(query),
        };
        if bulk.is_some() {
            resp.remainder = Some(term.to_string());
        }
        resp.bulk = bulk;
        resp
    }

    /// Receive the reply to a query handed out by `on_input`.
    /// Returns `None` if the reply is stale or belongs to another field.
    pub fn receive_suggestions(
        &mut self,
        query: &Query,
        outcome: Result<Vec<Candidate>, RemoteError>,
    ) -> Option<Suggestions> {
        if query.field_key != self.field_key {
            return None;
        }
        let suggestions = match self.dispatcher.resolve(query, outcome) {
            Resolution::Stale => return None,
            Resolution::Fresh(remote) => {
                let candidates = if self.config.synthesize {
                    match_term(&query.term, remote)
                } else {
                    remote
                };
                Suggestions {
                    term: query.term.clone(),
                    candidates,
                    status: SuggestionStatus::Ready,
                }
            }
            Resolution::Failed(e) => Suggestions {
                term: query.term.clone(),
                candidates: Vec::new(),
                status: SuggestionStatus::RemoteFailure(e),
            },
        };
        debug!(
            field_key = %self.field_key,
            sequence = query.sequence,
            count = suggestions.candidates.len(),
            "suggestions surfaced"
        );
        Some(suggestions)
    }

    /// `on_input` followed by running the query inline on `client`.
    pub fn on_input_with(&mut self, term: &str, client: &dyn SuggestionClient) -> InputResponse {
        let mut resp = self.on_input(term);
        if let Some(query) = resp.request.take() {
            let outcome = client.search(&query.term, &query.field_key);
            resp.suggestions = match self.receive_suggestions(&query, outcome) {
                Some(s) => SuggestionAction::Show(s),
                None => SuggestionAction::Keep,
            };
        }
        resp
    }
}
