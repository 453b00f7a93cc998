use serde::{Deserialize, Serialize};

/// Marker appended to the label of every locally synthesized candidate.
pub const SYNTHESIZED_SUFFIX: &str = " (new tag)";

/// A selectable entry, either returned by the remote source or fabricated
/// locally from user-typed text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    /// Stable identity used for dedup and selection membership.
    pub id: String,
    /// Display text.
    pub label: String,
    /// `true` when the entry has no backing remote record.
    #[serde(default)]
    pub is_synthesized: bool,
}

impl Candidate {
    /// A remote-backed candidate.
    pub fn remote(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            is_synthesized: false,
        }
    }

    /// A "create new" candidate for free text. The text is trimmed and the
    /// label carries [`SYNTHESIZED_SUFFIX`].
    pub fn synthesized(text: &str) -> Self {
        let id = text.trim().to_string();
        let label = format!("{id}{SYNTHESIZED_SUFFIX}");
        Self {
            id,
            label,
            is_synthesized: true,
        }
    }

    /// Label without the synthesis marker.
    pub fn display_text(&self) -> &str {
        if self.is_synthesized {
            self.label
                .strip_suffix(SYNTHESIZED_SUFFIX)
                .unwrap_or(&self.label)
        } else {
            &self.label
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesized_trims_and_marks() {
        let c = Candidate::synthesized("  rust ");
        assert_eq!(c.id, "rust");
        assert_eq!(c.label, "rust (new tag)");
        assert!(c.is_synthesized);
        assert_eq!(c.display_text(), "rust");
    }

    #[test]
    fn remote_label_is_untouched() {
        let c = Candidate::remote("py", "Python (new tag)");
        assert!(!c.is_synthesized);
        assert_eq!(c.display_text(), "Python (new tag)");
    }
}
