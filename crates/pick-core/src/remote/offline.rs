use super::{RemoteError, SuggestionClient};
use crate::candidate::Candidate;

/// In-memory suggestion source.
///
/// Matches case-insensitively: labels starting with the term come first,
/// then labels containing it elsewhere. The field key is ignored.
#[derive(Debug, Clone, Default)]
pub struct StaticSuggestionClient {
    entries: Vec<Candidate>,
    max_results: usize,
}

impl StaticSuggestionClient {
    pub fn new(entries: Vec<Candidate>, max_results: usize) -> Self {
        Self {
            entries,
            max_results,
        }
    }

    /// Build from plain labels; each id is the lowercased label.
    pub fn from_labels<I, S>(labels: I, max_results: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = labels
            .into_iter()
            .map(|l| l.as_ref().trim().to_string())
            .filter(|l| !l.is_empty())
            .map(|l| Candidate::remote(l.to_lowercase(), l))
            .collect();
        Self::new(entries, max_results)
    }
}

impl SuggestionClient for StaticSuggestionClient {
    fn search(&self, term: &str, _field_key: &str) -> Result<Vec<Candidate>, RemoteError> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let (mut prefix, mut inner): (Vec<_>, Vec<_>) = (Vec::new(), Vec::new());
        for c in &self.entries {
            let label = c.label.to_lowercase();
            if label.starts_with(&needle) {
                prefix.push(c.clone());
            } else if label.contains(&needle) {
                inner.push(c.clone());
            }
        }
        prefix.append(&mut inner);
        prefix.truncate(self.max_results);
        Ok(prefix)
    }
}
