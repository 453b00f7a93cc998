//! Query gating and out-of-order reply handling.
//!
//! Every submission for a field takes the next sequence number, including
//! submissions too short to be sent: a shorter input supersedes whatever was
//! in flight. A reply is surfaced only if it belongs to the latest submission
//! for its field and nothing newer has been surfaced. Transport requests are
//! never cancelled; their replies are simply dropped on resolution.

use std::collections::HashMap;

use pick_core::{Candidate, RemoteError};
use tracing::{debug, warn};

/// One search issued for a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub term: String,
    pub field_key: String,
    pub sequence: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Too short to search; no request must be made.
    BelowMinimum { remaining: usize },
    /// The caller must run this query and hand the reply to `resolve`.
    Issued(Query),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Superseded by a newer submission. Not an error.
    Stale,
    Fresh(Vec<Candidate>),
    Failed(RemoteError),
}

#[derive(Debug, Default, Clone, Copy)]
struct FieldSequence {
    submitted: u64,
    surfaced: u64,
}

#[derive(Debug, Clone)]
pub struct QueryDispatcher {
    min_query_length: usize,
    fields: HashMap<String, FieldSequence>,
}

impl QueryDispatcher {
    pub fn new(min_query_length: usize) -> Self {
        Self {
            min_query_length,
            fields: HashMap::new(),
        }
    }

    pub fn submit(&mut self, field_key: &str, term: &str) -> Submission {
        let seq = self.fields.entry(field_key.to_string()).or_default();
        seq.submitted += 1;
        let len = term.chars().count();
        if len < self.min_query_length {
            debug!(field_key, len, "below minimum query length");
            return Submission::BelowMinimum {
                remaining: self.min_query_length - len,
            };
        }
        debug!(field_key, sequence = seq.submitted, "query issued");
        Submission::Issued(Query {
            term: term.to_string(),
            field_key: field_key.to_string(),
            sequence: seq.submitted,
        })
    }

    /// Supersede every query issued so far for `field_key`.
    pub fn invalidate(&mut self, field_key: &str) {
        self.fields.entry(field_key.to_string()).or_default().submitted += 1;
    }

    /// Sequence of the latest submission for a field (0 if none).
    pub fn latest(&self, field_key: &str) -> u64 {
        self.fields.get(field_key).map_or(0, |s| s.submitted)
    }

    pub fn is_current(&self, query: &Query) -> bool {
        self.fields
            .get(&query.field_key)
            .is_some_and(|s| query.sequence == s.submitted && query.sequence > s.surfaced)
    }

    pub fn resolve(
        &mut self,
        query: &Query,
        outcome: Result<Vec<Candidate>, RemoteError>,
    ) -> Resolution {
        if !self.is_current(query) {
            debug!(
                field_key = %query.field_key,
                sequence = query.sequence,
                latest = self.latest(&query.field_key),
                "dropping stale reply"
            );
            return Resolution::Stale;
        }
        if let Some(seq) = self.fields.get_mut(&query.field_key) {
            seq.surfaced = query.sequence;
        }
        match outcome {
            Ok(candidates) => Resolution::Fresh(candidates),
            Err(e) => {
                warn!(field_key = %query.field_key, "suggestion request failed: {e}");
                Resolution::Failed(e)
            }
        }
    }
}
