//! Ordered, bounded set of chosen candidates.
//!
//! Membership is by `Candidate::id`. The bound is checked before every
//! insertion; existing members are never evicted to make room.


use tracing::debug;

use crate::candidate::Candidate;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("selection is full ({max} max)")]
    CapacityExceeded { max: usize },
    #[error("{id:?} is already selected")]
    DuplicateEntry { id: String },
}

/// Outcome of [`SelectionSet::add_bulk`]. Partial application is normal:
/// everything in `added` stays in the set even when `stopped` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkReport {
    /// Ids added, in order.
    pub added: Vec<String>,
    /// Tokens skipped because they were already selected.
    pub duplicates: Vec<String>,
    /// Set when the bound was hit; remaining tokens were not attempted.
    pub stopped: Option<SelectionError>,
}

impl BulkReport {
    pub fn is_complete(&self) -> bool {
        self.stopped.is_none()
    }
}

/// Split raw text on any of `separators`, trimming tokens and dropping empty ones.
pub fn tokenize<'a>(raw: &'a str, separators: &'a [char]) -> impl Iterator<Item = &'a str> + 'a {
    raw.split(move |c: char| separators.contains(&c))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[derive(Debug, Clone)]
pub struct SelectionSet {
    entries: Vec<Candidate>,
    max_size: usize,
}

impl SelectionSet {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_size,
        }
    }

    pub fn unbounded() -> Self {
        Self::new(usize::MAX)
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.max_size
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|c| c.id == id)
    }

    /// Append a candidate. A duplicate id is reported before a full set.
    pub fn add(&mut self, candidate: Candidate) -> Result<(), SelectionError> {
        if self.contains(&candidate.id) {
            return Err(SelectionError::DuplicateEntry { id: candidate.id });
        }
        if self.is_full() {
            return Err(SelectionError::CapacityExceeded { max: self.max_size });
        }
        self.entries.push(candidate);
        Ok(())
    }

    /// Remove by identity. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|c| c.id != id);
        self.entries.len() != before
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.entries.iter()
    }

    pub fn to_list(&self) -> Vec<Candidate> {
        self.entries.clone()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|c| c.id.as_str()).collect()
    }

    /// Add every token of `raw` as free text, in order.
    pub fn add_bulk(&mut self, raw: &str, separators: &[char]) -> BulkReport {
        let mut report = BulkReport::default();
        for token in tokenize(raw, separators) {
            match self.add(Candidate::synthesized(token)) {
                Ok(()) => report.added.push(token.to_string()),
                Err(SelectionError::DuplicateEntry { id }) => report.duplicates.push(id),
                Err(e @ SelectionError::CapacityExceeded { .. }) => {
                    report.stopped = Some(e);
                    break;
                }
            }
        }
        debug!(
            added = report.added.len(),
            duplicates = report.duplicates.len(),
            stopped = report.stopped.is_some(),
            "bulk add"
        );
        report
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
