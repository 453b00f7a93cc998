//! Remote suggestion source: the client contract and response mapping.
//!
//! Request: `search=<term>&search_field=<field key>`.
//! Response: `{"result": [{"id": ..., "text": ...}, ...]}`.

mod http;
mod offline;


use std::collections::HashSet;

use serde::Deserialize;

use crate::candidate::Candidate;

pub use http::HttpSuggestionClient;
pub use offline::StaticSuggestionClient;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Http(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Issues one search against a suggestion source.
///
/// Implementations block until the response arrives; callers that need to
/// keep typing run them off-thread and discard stale results themselves.
pub trait SuggestionClient: Send + Sync {
    fn search(&self, term: &str, field_key: &str) -> Result<Vec<Candidate>, RemoteError>;
}

impl<T: SuggestionClient + ?Sized> SuggestionClient for std::sync::Arc<T> {
    fn search(&self, term: &str, field_key: &str) -> Result<Vec<Candidate>, RemoteError> {
        (**self).search(term, field_key)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordId {
    Text(String),
    Number(serde_json::Number),
}

#[derive(Deserialize)]
struct RemoteRecord {
    id: RecordId,
    text: String,
}

/// Map a response body into candidates.
///
/// A missing or non-array `result` is an error, not an empty list. Records
/// with a blank id or label are skipped, repeated ids keep their first
/// occurrence, and at most `max_results` candidates are returned.
pub fn parse_response(body: &str, max_results: usize) -> Result<Vec<Candidate>, RemoteError> {
    let mut value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| RemoteError::Malformed(e.to_string()))?;
    let records = match value.get_mut("result").map(serde_json::Value::take) {
        Some(serde_json::Value::Array(items)) => items,
        Some(_) => return Err(RemoteError::Malformed("`result` is not a list".to_string())),
        None => return Err(RemoteError::Malformed("missing `result`".to_string())),
    };

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    for raw in records {
        if candidates.len() >= max_results {
            break;
        }
        let Ok(record) = serde_json::from_value::<RemoteRecord>(raw) else {
            continue;
        };
        let id = match record.id {
            RecordId::Text(s) => s.trim().to_string(),
            RecordId::Number(n) => n.to_string(),
        };
        let label = record.text.trim();
        if id.is_empty() || label.is_empty() {
            continue;
        }
        if seen.insert(id.clone()) {
            candidates.push(Candidate::remote(id, label));
        }
    }
    Ok(candidates)
}
