use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use pick_engine::{BulkReport, Candidate, SelectionSet, SuggestionStatus, Suggestions};

/// JSON shape of one surfaced suggestion list.
#[derive(Debug, Serialize)]
pub struct SuggestionReport<'a> {
    pub field: &'a str,
    pub term: &'a str,
    pub status: String,
    pub candidates: &'a [Candidate],
}

impl<'a> SuggestionReport<'a> {
    pub fn new(field: &'a str, s: &'a Suggestions) -> Self {
        Self {
            field,
            term: &s.term,
            status: status_text(&s.status),
            candidates: &s.candidates,
        }
    }
}

pub fn status_text(status: &SuggestionStatus) -> String {
    match status {
        SuggestionStatus::Ready => "ready".to_string(),
        SuggestionStatus::TooShort { remaining } => {
            format!("please enter {remaining} more character(s)")
        }
        SuggestionStatus::RemoteFailure(e) => format!("search failed, try again ({e})"),
    }
}

/// Candidates as aligned rows: text padded to the widest entry, then id.
/// Synthesized entries are marked with `+` instead of the label suffix.
pub fn format_candidates(candidates: &[Candidate]) -> String {
    let width = candidates
        .iter()
        .map(|c| UnicodeWidthStr::width(c.display_text()))
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for (i, c) in candidates.iter().enumerate() {
        let text = c.display_text();
        let pad = width - UnicodeWidthStr::width(text);
        let marker = if c.is_synthesized { "+" } else { " " };
        out.push_str(&format!(
            "{marker}{:>2}. {}{}  id={}\n",
            i + 1,
            text,
            " ".repeat(pad),
            c.id
        ));
    }
    out
}

pub fn format_suggestions(s: &Suggestions) -> String {
    let mut out = format!("{:?}: {}\n", s.term, status_text(&s.status));
    if s.candidates.is_empty() && s.status == SuggestionStatus::Ready {
        out.push_str("  (no matches)\n");
    }
    out.push_str(&format_candidates(&s.candidates));
    out
}

pub fn format_selection(set: &SelectionSet) -> String {
    let bound = if set.max_size() == usize::MAX {
        "unbounded".to_string()
    } else {
        set.max_size().to_string()
    };
    format!("selection ({}/{bound}): {}", set.len(), set.ids().join(", "))
}

pub fn format_bulk(report: &BulkReport) -> String {
    let mut out = format!("added: {}", report.added.join(", "));
    if !report.duplicates.is_empty() {
        out.push_str(&format!("\nalready selected: {}", report.duplicates.join(", ")));
    }
    if let Some(e) = &report.stopped {
        out.push_str(&format!("\nstopped: {e}"));
    }
    out
}
